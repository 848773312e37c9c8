// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input validation shared by every delivery path.
//!
//! Both the spool writer and the command dispatcher run these checks before
//! touching the filesystem or starting a process, so a malformed recipient
//! such as `+49123; rm -rf /` never reaches either.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static RECIPIENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+([0-9]+)$").expect("recipient pattern is valid"));

/// Minimum digits accepted for address book entries.
pub const CONTACT_MIN_DIGITS: usize = 5;

/// Recipient format rule: `+` followed by at least `min_digits` ASCII digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipientPolicy {
    pub min_digits: usize,
}

impl RecipientPolicy {
    pub fn new(min_digits: usize) -> Self {
        Self { min_digits }
    }

    /// Check `recipient` against `^\+[0-9]{min_digits,}$`.
    pub fn validate(&self, recipient: &str) -> Result<(), ValidationError> {
        let digits = RECIPIENT_PATTERN
            .captures(recipient)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().len());

        match digits {
            Some(n) if n >= self.min_digits => Ok(()),
            _ => Err(ValidationError::InvalidRecipient {
                recipient: recipient.to_string(),
                min_digits: self.min_digits,
            }),
        }
    }
}

impl Default for RecipientPolicy {
    fn default() -> Self {
        Self { min_digits: 10 }
    }
}

/// Reject bodies that are empty or contain only whitespace.
pub fn validate_body(body: &str) -> Result<(), ValidationError> {
    if body.trim().is_empty() {
        Err(ValidationError::EmptyMessage)
    } else {
        Ok(())
    }
}

/// Validate a complete recipient/body pair.
pub fn validate_message(
    policy: &RecipientPolicy,
    recipient: &str,
    body: &str,
) -> Result<(), ValidationError> {
    policy.validate(recipient)?;
    validate_body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_international_number() {
        let policy = RecipientPolicy::new(10);
        assert!(policy.validate("+491234567890").is_ok());
    }

    #[test]
    fn rejects_too_few_digits() {
        let policy = RecipientPolicy::new(10);
        let err = policy.validate("+49123").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidRecipient {
                recipient: "+49123".into(),
                min_digits: 10
            }
        );
    }

    #[test]
    fn rejects_shell_metacharacters() {
        let policy = RecipientPolicy::new(2);
        assert!(policy.validate("+49123; rm -rf /").is_err());
        assert!(policy.validate("+49123|cat").is_err());
        assert!(policy.validate("+49123$(id)").is_err());
        assert!(policy.validate("+49123\n").is_err());
    }

    #[test]
    fn rejects_missing_plus() {
        assert!(RecipientPolicy::new(2).validate("0049123456").is_err());
    }

    #[test]
    fn rejects_non_ascii_digits() {
        // Arabic-Indic digits are Unicode digits but not ASCII.
        assert!(RecipientPolicy::new(2).validate("+٤٩١٢٣").is_err());
    }

    #[test]
    fn whitespace_only_body_is_empty() {
        assert_eq!(validate_body("  \n\t"), Err(ValidationError::EmptyMessage));
        assert!(validate_body(" hi ").is_ok());
    }

    proptest! {
        #[test]
        fn anything_with_a_non_digit_after_plus_is_rejected(
            prefix in "[0-9]{0,12}",
            bad in "[^0-9]",
            suffix in "[0-9]{0,12}",
        ) {
            let candidate = format!("+{prefix}{bad}{suffix}");
            prop_assert!(RecipientPolicy::new(1).validate(&candidate).is_err());
        }

        #[test]
        fn digit_strings_respect_minimum(digits in "[0-9]{1,20}", min in 1usize..16) {
            let candidate = format!("+{digits}");
            let ok = RecipientPolicy::new(min).validate(&candidate).is_ok();
            prop_assert_eq!(ok, digits.len() >= min);
        }
    }
}
