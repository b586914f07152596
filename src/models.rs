// src/models.rs
use serde::Serialize;

/// Outcome of a single policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub ok: bool,
    pub reasons: Vec<String>,
    pub score: u8,
    /// Uppercase SHA-1 hex of the password; absent when the input was not text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharClassReport {
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

// Password generation options
#[derive(Debug, Clone)]
pub struct PasswordGenerationOptions {
    pub length: usize,
    pub include_symbols: bool,
    pub require_each_class: bool,
}

impl Default for PasswordGenerationOptions {
    fn default() -> Self {
        Self {
            length: 16,
            include_symbols: true,
            require_each_class: true,
        }
    }
}
