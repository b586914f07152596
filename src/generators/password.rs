// src/generators/password.rs
use rand::rngs::OsRng;
use rand::seq::SliceRandom;

use crate::models::PasswordGenerationOptions;
use crate::policy::SPECIAL_CHARS;

pub const GEN_MIN_LENGTH: usize = 16;
pub const GEN_MAX_LENGTH: usize = 24;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

/// Generate a random password from the operating system CSPRNG.
///
/// The length is clamped into [`GEN_MIN_LENGTH`, `GEN_MAX_LENGTH`]. With
/// `require_each_class` one character of every enabled class is seeded
/// before the fill and the whole sequence is shuffled afterwards. Without
/// symbols the fourth seed is an extra lowercase letter.
pub fn generate_password(options: &PasswordGenerationOptions) -> String {
    let mut rng = OsRng;
    let length = options.length.clamp(GEN_MIN_LENGTH, GEN_MAX_LENGTH);
    let symbols = SPECIAL_CHARS.as_bytes();

    let mut alphabet = Vec::with_capacity(UPPERCASE.len() + LOWERCASE.len() + DIGITS.len() + symbols.len());
    alphabet.extend_from_slice(UPPERCASE);
    alphabet.extend_from_slice(LOWERCASE);
    alphabet.extend_from_slice(DIGITS);
    if options.include_symbols {
        alphabet.extend_from_slice(symbols);
    }

    let mut chars: Vec<u8> = Vec::with_capacity(length);
    if options.require_each_class {
        let fourth = if options.include_symbols { symbols } else { LOWERCASE };
        for class in [UPPERCASE, LOWERCASE, DIGITS, fourth] {
            // Character sets are non-empty constants
            if let Some(c) = class.choose(&mut rng) {
                chars.push(*c);
            }
        }
    }

    while chars.len() < length {
        if let Some(c) = alphabet.choose(&mut rng) {
            chars.push(*c);
        }
    }

    chars.shuffle(&mut rng);
    chars.into_iter().map(char::from).collect()
}
