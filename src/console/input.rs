//! Parsers for what the operator types at a prompt. Each one takes the raw
//! line without its terminator.

use std::str::FromStr;

use crate::{
    common::{error::InputError, money::Money},
    domain::account::{AccountNumber, AccountType, Gender, Pin},
};

/// Account numbers are typed with at least this many digits (`0007`).
pub const ACCOUNT_DIGITS: usize = 4;

/// Digits only, at least `min_digits` of them.
pub fn number(line: &str, min_digits: usize) -> Result<u64, InputError> {
    if line.len() < min_digits.max(1) || !line.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::Number);
    }
    line.parse().map_err(|_| InputError::Number)
}

pub fn account_number(line: &str) -> Result<AccountNumber, InputError> {
    let value = number(line, ACCOUNT_DIGITS)?;
    AccountNumber::try_from(value).map_err(|_| InputError::Number)
}

/// Letters and spaces, trimmed, with at least `min_letters` letters.
pub fn name(line: &str, min_letters: usize) -> Result<String, InputError> {
    let trimmed = line.trim_matches(' ');
    let letters = trimmed.chars().filter(|c| c.is_ascii_alphabetic()).count();
    let alpha_space = trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == ' ');
    if trimmed.is_empty() || !alpha_space || letters < min_letters {
        return Err(InputError::Name);
    }
    Ok(trimmed.to_string())
}

pub fn pin(line: &str) -> Result<Pin, InputError> {
    Pin::from_str(line)
}

/// Strips all whitespace and uppercases before checking for 6-9 letters
/// or digits.
pub fn passport(line: &str) -> Result<String, InputError> {
    let cleaned: String = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if cleaned.is_empty() {
        return Err(InputError::PassportMissing);
    }
    let valid = (6..=9).contains(&cleaned.len())
        && cleaned
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if !valid {
        return Err(InputError::Passport);
    }
    Ok(cleaned)
}

pub fn gender(line: &str) -> Result<Gender, InputError> {
    match line.trim() {
        "M" | "m" => Ok(Gender::Male),
        "F" | "f" => Ok(Gender::Female),
        _ => Err(InputError::Gender),
    }
}

pub fn account_type(line: &str) -> Result<AccountType, InputError> {
    match line.trim() {
        "C" | "c" => Ok(AccountType::Current),
        "S" | "s" => Ok(AccountType::Savings),
        _ => Err(InputError::AccountType),
    }
}

pub fn amount(line: &str) -> Result<Money, InputError> {
    Money::from_str(line.trim()).map_err(|e| InputError::Amount(e.to_string()))
}

pub fn choice(line: &str) -> Result<u8, InputError> {
    line.trim().parse().map_err(|_| InputError::Choice)
}
