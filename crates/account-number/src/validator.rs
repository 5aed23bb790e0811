//! Account-number validation.
//!
//! Validation never fails with an error: every outcome, including malformed input, is a
//! [`ValidationResult`]. Only [`AccountNumberValidator::extract_prefix`] and
//! [`AccountNumberValidator::extract_info`] return errors, because they have nothing useful to
//! hand back for a bad number.

use crate::checksum::check_digit;
use crate::prefix::{account_type_label, KnownPrefix};
use crate::{AccountError, AccountResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Three-letter prefix, 15 body digits, one check digit.
static ACCOUNT_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{3}[0-9]{15}[0-9]$").expect("account number pattern is a valid regex")
});

const PREFIX_LEN: usize = 3;
const TIMESTAMP_DIGITS: usize = 8;

const REASON_EMPTY: &str = "account number cannot be empty";
const REASON_FORMAT: &str = "invalid format: expected 3 letters followed by 16 digits";
const REASON_DIGIT_NOT_NUMERIC: &str = "check digit must be numeric";
const REASON_ALL_ZEROS: &str = "invalid account number (all zeros)";
const REASON_SIMPLE_SEQUENCE: &str = "suspicious account number (simple sequence)";
const REASON_VALID: &str = "valid";
const REASON_ERROR: &str = "error during validation";

/// Outcome of validating one candidate number.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationResult {
    #[cfg_attr(feature = "serde", serde(rename = "valido"))]
    pub valid: bool,
    #[cfg_attr(feature = "serde", serde(rename = "motivo"))]
    pub reason: String,
    /// Present only for valid numbers.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "prefixo", skip_serializing_if = "Option::is_none")
    )]
    pub prefix: Option<String>,
}

impl ValidationResult {
    pub fn valid(reason: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            valid: true,
            reason: reason.into(),
            prefix: Some(prefix.into()),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: reason.into(),
            prefix: None,
        }
    }
}

/// A valid number broken into its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AccountInfo {
    #[cfg_attr(feature = "serde", serde(rename = "numeroCompleto"))]
    pub full_number: String,
    #[cfg_attr(feature = "serde", serde(rename = "prefixo"))]
    pub prefix: String,
    #[cfg_attr(feature = "serde", serde(rename = "tipoConta"))]
    pub account_type: String,
    /// Everything between the prefix and the check digit.
    #[cfg_attr(feature = "serde", serde(rename = "parteNumerica"))]
    pub numeric_part: String,
    #[cfg_attr(feature = "serde", serde(rename = "digitoVerificador"))]
    pub check_digit: String,
    /// First eight body digits. Positional only; the value is not decoded.
    #[cfg_attr(feature = "serde", serde(rename = "timestampAproximado"))]
    pub approximate_timestamp: String,
    #[cfg_attr(feature = "serde", serde(rename = "valido"))]
    pub valid: bool,
}

/// Validates account numbers in the three-letter-prefix form.
///
/// The validator is stateless; it needs nothing from the generator that produced a number.
#[derive(Clone, Debug, Default)]
pub struct AccountNumberValidator;

impl AccountNumberValidator {
    pub fn new() -> Self {
        Self
    }

    /// Runs the full validation pipeline, stopping at the first failure:
    ///
    /// 1. missing or blank input
    /// 2. format (after trimming and uppercasing)
    /// 3. known prefix
    /// 4. check digit
    /// 5. structural checks on the digits after the prefix (all zeros, simple ascending run)
    pub fn validate(&self, candidate: Option<&str>) -> ValidationResult {
        self.evaluate(candidate).unwrap_or_else(|e| {
            tracing::warn!("account number validation failed: {}", e);
            ValidationResult::invalid(REASON_ERROR)
        })
    }

    /// Format-only check. No checksum, no prefix lookup.
    pub fn is_well_formed(&self, candidate: Option<&str>) -> bool {
        match candidate.map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => {
                ACCOUNT_NUMBER_PATTERN.is_match(&trimmed.to_uppercase())
            }
            _ => false,
        }
    }

    /// Checks only whether the first three characters name a known prefix.
    pub fn has_known_prefix(&self, candidate: Option<&str>) -> bool {
        candidate
            .and_then(leading_prefix)
            .is_some_and(|prefix| KnownPrefix::from_code(&prefix).is_some())
    }

    /// Returns the first three characters, uppercased.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidArgument`] if `candidate` is shorter than three characters.
    pub fn extract_prefix(&self, candidate: &str) -> AccountResult<String> {
        leading_prefix(candidate)
            .ok_or_else(|| AccountError::InvalidArgument("account number too short".into()))
    }

    /// Validates every candidate independently.
    ///
    /// A failure while evaluating one item turns into an invalid result for that item only; the
    /// rest of the batch is still processed. Duplicate inputs collapse to one entry.
    pub fn validate_batch<I, S>(&self, candidates: I) -> BTreeMap<String, ValidationResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let results: BTreeMap<String, ValidationResult> = candidates
            .into_iter()
            .map(|candidate| {
                let candidate = candidate.as_ref();
                let result = self
                    .evaluate(Some(candidate))
                    .unwrap_or_else(|e| {
                        tracing::warn!("validation of '{}' failed: {}", candidate, e);
                        ValidationResult::invalid(REASON_ERROR)
                    });
                (candidate.to_owned(), result)
            })
            .collect();

        tracing::info!("validated batch of {} account numbers", results.len());
        results
    }

    /// Validates `candidate` and, if valid, splits it into its parts.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidArgument`] carrying the validation reason if the number is
    /// not valid.
    pub fn extract_info(&self, candidate: &str) -> AccountResult<AccountInfo> {
        let result = self.validate(Some(candidate));
        if !result.valid {
            return Err(AccountError::InvalidArgument(result.reason));
        }

        // A valid number is exactly 19 ASCII characters, so these slices are in bounds.
        let number = candidate.trim().to_uppercase();
        let prefix = &number[..PREFIX_LEN];
        let numeric_part = &number[PREFIX_LEN..number.len() - 1];
        let check = &number[number.len() - 1..];

        Ok(AccountInfo {
            full_number: number.clone(),
            prefix: prefix.to_owned(),
            account_type: account_type_label(prefix).to_owned(),
            numeric_part: numeric_part.to_owned(),
            check_digit: check.to_owned(),
            approximate_timestamp: numeric_part[..TIMESTAMP_DIGITS].to_owned(),
            valid: true,
        })
    }

    fn evaluate(&self, candidate: Option<&str>) -> AccountResult<ValidationResult> {
        let trimmed = match candidate.map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => return Ok(ValidationResult::invalid(REASON_EMPTY)),
        };

        let number = trimmed.to_uppercase();
        if !ACCOUNT_NUMBER_PATTERN.is_match(&number) {
            return Ok(ValidationResult::invalid(REASON_FORMAT));
        }

        let split = number.len() - 1;
        let (prefix, base, provided) = match (
            number.get(..PREFIX_LEN),
            number.get(..split),
            number.get(split..),
        ) {
            (Some(prefix), Some(base), Some(provided)) => (prefix, base, provided),
            _ => {
                return Err(AccountError::InvalidArgument(format!(
                    "cannot split account number '{}'",
                    number
                )))
            }
        };

        if KnownPrefix::from_code(prefix).is_none() {
            return Ok(ValidationResult::invalid(format!(
                "unknown prefix: {}",
                prefix
            )));
        }

        let expected = check_digit(base);
        let provided = match provided.chars().next().and_then(|c| c.to_digit(10)) {
            Some(d) => d,
            None => return Ok(ValidationResult::invalid(REASON_DIGIT_NOT_NUMERIC)),
        };
        if u32::from(expected) != provided {
            return Ok(ValidationResult::invalid(format!(
                "invalid check digit: expected {}, provided {}",
                expected, provided
            )));
        }

        if let Some(reason) = structural_issue(&number[PREFIX_LEN..]) {
            return Ok(ValidationResult::invalid(reason));
        }

        tracing::debug!("valid account number: {}", number);
        Ok(ValidationResult::valid(REASON_VALID, prefix))
    }
}

fn leading_prefix(candidate: &str) -> Option<String> {
    let prefix: String = candidate.chars().take(PREFIX_LEN).collect();
    (prefix.chars().count() == PREFIX_LEN).then(|| prefix.to_uppercase())
}

/// Rejects tails that are all zeros or a plain ascending run (`1234567890123...`).
///
/// The ascending check only looks at digit-to-digit transitions and flags the tail unless some
/// adjacent pair breaks `current == (previous + 1) % 10`.
fn structural_issue(tail: &str) -> Option<&'static str> {
    if !tail.is_empty() && tail.bytes().all(|b| b == b'0') {
        return Some(REASON_ALL_ZEROS);
    }

    let digits: Vec<Option<u32>> = tail.chars().map(|c| c.to_digit(10)).collect();
    let breaks_run = digits.windows(2).any(|pair| match (pair[0], pair[1]) {
        (Some(previous), Some(current)) => current != (previous + 1) % 10,
        _ => false,
    });

    if breaks_run {
        None
    } else {
        Some(REASON_SIMPLE_SEQUENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::AccountNumberGenerator;
    use crate::prefix::Prefix;

    fn with_check_digit(base: &str) -> String {
        format!("{}{}", base, check_digit(base))
    }

    #[test]
    fn test_hand_built_number_is_valid() {
        let number = with_check_digit(&format!("USR{}{}{}", "12345678", "0001", "123"));
        assert_eq!(number, "USR1234567800011235");

        let result = AccountNumberValidator::new().validate(Some(&number));

        assert!(result.valid, "{}", result.reason);
        assert_eq!(result.reason, "valid");
        assert_eq!(result.prefix.as_deref(), Some("USR"));
    }

    #[test]
    fn test_generated_numbers_validate() {
        let generator = AccountNumberGenerator::new();
        let validator = AccountNumberValidator::new();

        for number in generator.generate_user_batch(200).unwrap() {
            let result = validator.validate(Some(&number));
            assert!(result.valid, "{} rejected: {}", number, result.reason);
        }
        for known in KnownPrefix::ALL {
            let number = generator.generate(&known.prefix()).unwrap();
            assert!(validator.validate(Some(&number)).valid);
        }
    }

    #[test]
    fn test_empty_and_missing_input() {
        let validator = AccountNumberValidator::new();

        for candidate in [None, Some(""), Some("   ")] {
            let result = validator.validate(candidate);
            assert!(!result.valid);
            assert_eq!(result.reason, REASON_EMPTY);
            assert_eq!(result.prefix, None);
        }
    }

    #[test]
    fn test_input_is_trimmed_and_uppercased() {
        let result = AccountNumberValidator::new().validate(Some("  usr1234567800011235 "));
        assert!(result.valid, "{}", result.reason);
    }

    #[test]
    fn test_format_failures() {
        let validator = AccountNumberValidator::new();

        for candidate in [
            "USR123",
            "USR12345678000112350",
            "US1234567800011235",
            "USRX234567800011235",
            "ABCDE12345678000112",
            "USR１２３４５６７８０００１１２３５",
        ] {
            let result = validator.validate(Some(candidate));
            assert!(!result.valid);
            assert_eq!(result.reason, REASON_FORMAT, "input: {}", candidate);
        }
    }

    #[test]
    fn test_unknown_prefix_rejected_even_with_correct_digit() {
        let number = with_check_digit("ZZZ123456780001123");
        let result = AccountNumberValidator::new().validate(Some(&number));

        assert!(!result.valid);
        assert_eq!(result.reason, "unknown prefix: ZZZ");
    }

    #[test]
    fn test_all_zero_tail_with_unknown_prefix() {
        let result = AccountNumberValidator::new().validate(Some("XYZ0000000000000000"));
        assert!(!result.valid);
    }

    #[test]
    fn test_all_zero_tail_rejected_even_when_checksum_matches() {
        // BOL followed by 15 zeros has check digit 0
        let number = with_check_digit("BOL000000000000000");
        assert_eq!(number, "BOL0000000000000000");

        let result = AccountNumberValidator::new().validate(Some(&number));
        assert!(!result.valid);
        assert_eq!(result.reason, REASON_ALL_ZEROS);
    }

    #[test]
    fn test_simple_sequence_rejected_even_when_checksum_matches() {
        let number = with_check_digit("ADM123456789012345");
        assert_eq!(number, "ADM1234567890123456");

        let result = AccountNumberValidator::new().validate(Some(&number));
        assert!(!result.valid);
        assert_eq!(result.reason, REASON_SIMPLE_SEQUENCE);
    }

    #[test]
    fn test_wrong_check_digit_reports_both_digits() {
        let result = AccountNumberValidator::new().validate(Some("USR1234567800011230"));

        assert!(!result.valid);
        assert_eq!(result.reason, "invalid check digit: expected 5, provided 0");
    }

    #[test]
    fn test_structural_issue_rules() {
        assert_eq!(structural_issue("0000000000000000"), Some(REASON_ALL_ZEROS));
        assert_eq!(
            structural_issue("1234567890123456"),
            Some(REASON_SIMPLE_SEQUENCE)
        );
        assert_eq!(
            structural_issue("7890123456789012"),
            Some(REASON_SIMPLE_SEQUENCE)
        );
        assert_eq!(structural_issue("1234567800011235"), None);
        // Repeated non-zero digits are not an ascending run
        assert_eq!(structural_issue("1111111111111111"), None);
        assert_eq!(structural_issue("1234567890123455"), None);
    }

    #[test]
    fn test_is_well_formed_ignores_checksum_and_prefix() {
        let validator = AccountNumberValidator::new();

        assert!(validator.is_well_formed(Some("ZZZ0000000000000009")));
        assert!(validator.is_well_formed(Some(" usr1234567800011230")));
        assert!(!validator.is_well_formed(Some("USR12")));
        assert!(!validator.is_well_formed(Some("")));
        assert!(!validator.is_well_formed(None));
    }

    #[test]
    fn test_has_known_prefix() {
        let validator = AccountNumberValidator::new();

        assert!(validator.has_known_prefix(Some("usr")));
        assert!(validator.has_known_prefix(Some("LOG-anything")));
        assert!(!validator.has_known_prefix(Some("ZZZ123")));
        assert!(!validator.has_known_prefix(Some("US")));
        assert!(!validator.has_known_prefix(None));
    }

    #[test]
    fn test_extract_prefix() {
        let validator = AccountNumberValidator::new();

        assert_eq!(validator.extract_prefix("txn999").unwrap(), "TXN");
        match validator.extract_prefix("ab") {
            Err(AccountError::InvalidArgument(msg)) => assert!(msg.contains("too short")),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_batch_keeps_going_after_bad_items() {
        let validator = AccountNumberValidator::new();
        let results = validator.validate_batch([
            "USR1234567800011235",
            "",
            "garbage",
            "USR1234567800011230",
        ]);

        assert_eq!(results.len(), 4);
        assert!(results["USR1234567800011235"].valid);
        assert_eq!(results[""].reason, REASON_EMPTY);
        assert_eq!(results["garbage"].reason, REASON_FORMAT);
        assert!(!results["USR1234567800011230"].valid);
    }

    #[test]
    fn test_validate_batch_collapses_duplicates() {
        let validator = AccountNumberValidator::new();
        let inputs = vec!["USR1234567800011235".to_string(); 3];

        let results = validator.validate_batch(&inputs);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_extract_info_decomposes_valid_number() {
        let info = AccountNumberValidator::new()
            .extract_info("usr1234567800011235")
            .unwrap();

        assert_eq!(info.full_number, "USR1234567800011235");
        assert_eq!(info.prefix, "USR");
        assert_eq!(info.account_type, "User account");
        assert_eq!(info.numeric_part, "123456780001123");
        assert_eq!(info.check_digit, "5");
        assert_eq!(info.approximate_timestamp, "12345678");
        assert!(info.valid);
    }

    #[test]
    fn test_extract_info_rejects_invalid_number() {
        match AccountNumberValidator::new().extract_info("USR1234567800011230") {
            Err(AccountError::InvalidArgument(msg)) => {
                assert!(msg.starts_with("invalid check digit"));
            }
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_prefix_numbers_fail_fixed_form() {
        let generator = AccountNumberGenerator::new();
        let number = generator
            .generate(&Prefix::parse("ABCD").unwrap())
            .unwrap();

        let result = AccountNumberValidator::new().validate(Some(&number));
        assert_eq!(result.reason, REASON_FORMAT);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_validation_json_field_names() {
        let valid = serde_json::to_value(ValidationResult::valid("valid", "USR")).unwrap();
        assert_eq!(
            valid,
            serde_json::json!({ "valido": true, "motivo": "valid", "prefixo": "USR" })
        );

        let invalid = serde_json::to_value(ValidationResult::invalid("nope")).unwrap();
        assert_eq!(invalid, serde_json::json!({ "valido": false, "motivo": "nope" }));
    }
}
