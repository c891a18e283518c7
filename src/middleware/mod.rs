//! Middleware module

pub mod logging;
