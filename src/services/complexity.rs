//! Local code complexity analysis
//!
//! Heuristic metrics computed without calling the upstream LLM: line count,
//! function-definition count by keyword, and maximum nesting depth inferred
//! from indentation. The 1-10 score is a fixed additive rubric.

use crate::models::ComplexityReport;

/// Keywords that open a function definition across supported languages
const FUNCTION_KEYWORDS: [&str; 5] = ["def ", "function ", "async def ", "func ", "fn "];

/// Indentation width assumed for space-indented code
const SPACES_PER_LEVEL: usize = 4;

/// Analyze a snippet and produce a complexity report
pub fn analyze(code: &str) -> ComplexityReport {
    let lines: Vec<&str> = code.trim().split('\n').collect();
    let line_count = lines.len();

    let function_count = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            FUNCTION_KEYWORDS.iter().any(|kw| trimmed.contains(kw))
        })
        .count();

    let max_depth = lines
        .iter()
        .filter_map(|line| nesting_depth(line))
        .max()
        .unwrap_or(0);

    let score = score_for(line_count, function_count, max_depth);

    ComplexityReport {
        lines: line_count,
        functions: function_count,
        max_nesting_depth: max_depth,
        complexity_score: score,
        analysis: analysis_for(score).to_string(),
    }
}

/// Indentation depth of a line; None for blank lines and comments
fn nesting_depth(line: &str) -> Option<usize> {
    let stripped = line.trim_start();
    if stripped.is_empty() || stripped.starts_with('#') || stripped.starts_with("//") {
        return None;
    }

    let indent = line.len() - stripped.len();
    let depth = if line.contains('\t') {
        line[..indent].matches('\t').count()
    } else {
        indent / SPACES_PER_LEVEL
    };
    Some(depth)
}

/// Additive 1-10 rubric over the three metrics
fn score_for(line_count: usize, function_count: usize, max_depth: usize) -> u8 {
    let mut score: u8 = 1;

    score += match line_count {
        n if n > 200 => 3,
        n if n > 100 => 2,
        n if n > 50 => 1,
        _ => 0,
    };

    score += match function_count {
        n if n > 10 => 3,
        n if n > 5 => 2,
        n if n > 2 => 1,
        _ => 0,
    };

    score += match max_depth {
        n if n > 5 => 4,
        n if n > 3 => 3,
        n if n > 2 => 2,
        n if n > 1 => 1,
        _ => 0,
    };

    score.min(10)
}

fn analysis_for(score: u8) -> &'static str {
    match score {
        0..=3 => "Low complexity - code is simple and easy to understand.",
        4..=6 => "Moderate complexity - code is reasonably maintainable.",
        7..=8 => "High complexity - consider refactoring for better maintainability.",
        _ => "Very high complexity - strongly recommend breaking into smaller functions.",
    }
}
