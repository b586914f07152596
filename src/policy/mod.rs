// src/policy/mod.rs
//! Password policy evaluation.
//!
//! Scoring is a fixed weighted heuristic, not an entropy estimate:
//! 30 points for meeting the minimum length, 15 per character class,
//! 10 bonus points at 16+ characters and a 50 point penalty when the
//! password shows up in the breach corpus.

use lazy_static::lazy_static;
use regex::Regex;
use sha1::{Digest, Sha1};

use crate::models::{CharClassReport, EvaluationResult};

pub const DEFAULT_MIN_LENGTH: usize = 12;

/// Special characters recognised by the policy and used by the generator.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[]{};:,.<>/?";

const LENGTH_POINTS: u8 = 30;
const CLASS_POINTS: u8 = 15;
const LONG_BONUS_LENGTH: usize = 16;
const LONG_BONUS_POINTS: u8 = 10;
const BREACH_PENALTY: u8 = 50;

pub const PASSED_MESSAGE: &str = "Password passed checks.";
pub const NOT_TEXT_MESSAGE: &str = "Password must be a string.";
pub const NO_CHECKER_MESSAGE: &str = "Breach check requested but no hibp_check_fn provided.";
pub const BREACHED_MESSAGE: &str = "Password found in breach database (HIBP).";

lazy_static! {
    // Unicode decimal digits (general category Nd), not just ASCII
    static ref DIGIT_RE: Regex = Regex::new(r"\d").unwrap();
}

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Answers whether a SHA-1 digest (40 uppercase hex chars) is a known breached password.
///
/// Implementations only ever see the digest, never the password itself.
pub trait BreachChecker {
    fn is_breached(&self, sha1: &str) -> Result<bool, BoxError>;
}

impl<F> BreachChecker for F
where
    F: Fn(&str) -> Result<bool, BoxError>,
{
    fn is_breached(&self, sha1: &str) -> Result<bool, BoxError> {
        self(sha1)
    }
}

pub fn check_char_classes(password: &str) -> CharClassReport {
    CharClassReport {
        has_upper: password.chars().any(|c| c.is_ascii_uppercase()),
        has_lower: password.chars().any(|c| c.is_ascii_lowercase()),
        has_digit: DIGIT_RE.is_match(password),
        has_special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
    }
}

/// Uppercase hex SHA-1 of the UTF-8 bytes of `password`.
pub fn sha1_hex_upper(password: &str) -> String {
    hex::encode_upper(Sha1::digest(password.as_bytes()))
}

/// Evaluate `password` against the policy.
///
/// Never fails: policy violations are reported through `ok` and `reasons`.
/// When `check_breach` is set the digest is handed to `checker`; a checker
/// error becomes a reason and the password is scored as not breached.
pub fn evaluate_password(
    password: &str,
    min_length: usize,
    check_breach: bool,
    checker: Option<&dyn BreachChecker>,
) -> EvaluationResult {
    let mut reasons = Vec::new();
    let mut score: u8 = 0;

    let length = password.chars().count();
    if length < min_length {
        reasons.push(format!("Too short (minimum {} characters).", min_length));
    } else {
        score += LENGTH_POINTS;
    }

    let classes = check_char_classes(password);
    let class_checks = [
        (classes.has_upper, "Missing uppercase character."),
        (classes.has_lower, "Missing lowercase character."),
        (classes.has_digit, "Missing digit."),
        (classes.has_special, "Missing special character (e.g., !@#$%)."),
    ];
    for (present, missing) in class_checks {
        if present {
            score += CLASS_POINTS;
        } else {
            reasons.push(missing.to_string());
        }
    }

    if length >= LONG_BONUS_LENGTH {
        score += LONG_BONUS_POINTS;
    }

    let sha1 = sha1_hex_upper(password);

    if check_breach {
        match checker {
            None => reasons.push(NO_CHECKER_MESSAGE.to_string()),
            Some(checker) => {
                let breached = match checker.is_breached(&sha1) {
                    Ok(found) => found,
                    Err(e) => {
                        log::warn!("Breach lookup failed for prefix {}: {}", &sha1[..5], e);
                        reasons.push(format!("Error checking breach status: {}", e));
                        false
                    }
                };
                if breached {
                    reasons.push(BREACHED_MESSAGE.to_string());
                    score = score.saturating_sub(BREACH_PENALTY);
                }
            }
        }
    }

    let ok = reasons.is_empty();
    if ok {
        reasons.push(PASSED_MESSAGE.to_string());
    }

    EvaluationResult {
        ok,
        reasons,
        score: score.min(100),
        sha1: Some(sha1),
    }
}

/// Same as [`evaluate_password`] for raw input that may not be valid UTF-8.
pub fn evaluate_password_bytes(
    password: &[u8],
    min_length: usize,
    check_breach: bool,
    checker: Option<&dyn BreachChecker>,
) -> EvaluationResult {
    match std::str::from_utf8(password) {
        Ok(text) => evaluate_password(text, min_length, check_breach, checker),
        Err(_) => EvaluationResult {
            ok: false,
            reasons: vec![NOT_TEXT_MESSAGE.to_string()],
            score: 0,
            sha1: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn never_breached(_: &str) -> Result<bool, BoxError> {
        Ok(false)
    }

    fn always_breached(_: &str) -> Result<bool, BoxError> {
        Ok(true)
    }

    #[test]
    fn char_classes_detected() {
        let classes = check_char_classes("Ab1!");
        assert!(classes.has_upper);
        assert!(classes.has_lower);
        assert!(classes.has_digit);
        assert!(classes.has_special);

        let none = check_char_classes("   ");
        assert_eq!(none, CharClassReport::default());
    }

    #[test]
    fn non_ascii_decimal_digits_count_as_digits() {
        // ARABIC-INDIC DIGIT THREE
        let result = evaluate_password("Abcdefghijk\u{0663}!", 12, false, None);
        assert!(result.ok, "{:?}", result.reasons);
        assert!(check_char_classes("\u{0967}").has_digit);
        // Numeric but not decimal digits: superscript two, roman numeral one
        assert!(!check_char_classes("\u{00B2}\u{2160}").has_digit);
    }

    #[test]
    fn pipe_and_backslash_are_not_special() {
        assert!(!check_char_classes("|\\~`'\"").has_special);
    }

    #[test]
    fn short_password_fails() {
        let result = evaluate_password("aB3!", 12, false, None);
        assert!(!result.ok);
        assert_eq!(result.reasons, vec!["Too short (minimum 12 characters).".to_string()]);
        assert_eq!(result.score, 60);
    }

    #[test]
    fn strong_password_passes() {
        let result = evaluate_password("StrongPassw0rd!", 8, false, None);
        assert!(result.ok);
        assert_eq!(result.reasons, vec![PASSED_MESSAGE.to_string()]);
        // 15 chars: no long bonus
        assert_eq!(result.score, 90);
    }

    #[test]
    fn long_password_gets_full_score() {
        let result = evaluate_password("CorrectHorse9!Battery", 12, false, None);
        assert!(result.ok);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn long_bonus_is_independent_of_min_length() {
        let result = evaluate_password("abcdefghijklmnop", 20, false, None);
        assert!(!result.ok);
        // lowercase only, 16 chars, below min length
        assert_eq!(result.score, 15 + 10);
    }

    #[test]
    fn missing_classes_are_reported_in_order() {
        let result = evaluate_password("abcdefghijklm", 12, false, None);
        assert_eq!(
            result.reasons,
            vec![
                "Missing uppercase character.".to_string(),
                "Missing digit.".to_string(),
                "Missing special character (e.g., !@#$%).".to_string(),
            ]
        );
        assert_eq!(result.score, 45);
    }

    #[test]
    fn known_sha1_vector() {
        let result = evaluate_password("StrongPassw0rd!", 12, false, None);
        assert_eq!(
            result.sha1.as_deref(),
            Some("2E967B0D1268DED62798C4187603E74037F2C742")
        );
        assert_eq!(sha1_hex_upper("password"), "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 12 chars, more than 12 bytes
        let result = evaluate_password("Ééééééééé1!a", 12, false, None);
        assert!(!result.reasons.iter().any(|r| r.starts_with("Too short")));
    }

    #[test]
    fn breach_requested_without_checker() {
        let result = evaluate_password("CorrectHorse9!Battery", 12, true, None);
        assert!(!result.ok);
        assert_eq!(result.reasons, vec![NO_CHECKER_MESSAGE.to_string()]);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn breached_password_is_penalised() {
        let result = evaluate_password("CorrectHorse9!Battery", 12, true, Some(&always_breached));
        assert!(!result.ok);
        assert_eq!(result.reasons, vec![BREACHED_MESSAGE.to_string()]);
        assert_eq!(result.score, 50);

        let weak = evaluate_password("abc", 12, true, Some(&always_breached));
        assert_eq!(weak.score, 0);
    }

    #[test]
    fn checker_receives_the_digest() {
        let seen = std::cell::RefCell::new(String::new());
        let checker = |sha1: &str| -> Result<bool, BoxError> {
            seen.borrow_mut().push_str(sha1);
            Ok(false)
        };
        let result = evaluate_password("password", 4, true, Some(&checker));
        assert_eq!(seen.borrow().as_str(), "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8");
        assert_eq!(result.sha1.as_deref(), Some(seen.borrow().as_str()));
    }

    #[test]
    fn checker_error_becomes_reason() {
        let failing = |_: &str| -> Result<bool, BoxError> { Err("service unavailable".into()) };
        let result = evaluate_password("CorrectHorse9!Battery", 12, true, Some(&failing));
        assert!(!result.ok);
        assert_eq!(
            result.reasons,
            vec!["Error checking breach status: service unavailable".to_string()]
        );
        assert_eq!(result.score, 100);
        assert!(!result.reasons.iter().any(|r| r.contains("CorrectHorse")));
    }

    #[test]
    fn checker_not_called_when_breach_check_disabled() {
        let calls = Cell::new(0);
        let checker = |_: &str| -> Result<bool, BoxError> {
            calls.set(calls.get() + 1);
            Ok(true)
        };
        let result = evaluate_password("CorrectHorse9!Battery", 12, false, Some(&checker));
        assert!(result.ok);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let first = evaluate_password("Tr0ub4dor&3", 12, true, Some(&never_breached));
        for _ in 0..5 {
            assert_eq!(evaluate_password("Tr0ub4dor&3", 12, true, Some(&never_breached)), first);
        }
    }

    #[test]
    fn invalid_utf8_is_not_text() {
        let result = evaluate_password_bytes(&[0xff, 0xfe, 0x41], 12, true, Some(&always_breached));
        assert!(!result.ok);
        assert_eq!(result.score, 0);
        assert_eq!(result.reasons, vec![NOT_TEXT_MESSAGE.to_string()]);
        assert_eq!(result.sha1, None);

        let text = evaluate_password_bytes("StrongPassw0rd!".as_bytes(), 8, false, None);
        assert!(text.ok);
    }
}
