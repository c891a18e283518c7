//! Data models module
//!
//! Defines request/response structures for the review API and the
//! upstream chat-completion wire format

pub mod completion;
pub mod review;

pub use completion::*;
pub use review::*;
