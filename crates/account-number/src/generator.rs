//! Account-number generation.
//!
//! A generator owns the rolling sequence counter. Independent generators never share a
//! counter, so tests (and callers that want separate number spaces) can create as many as
//! they like. Within one generator the counter is updated with a single atomic
//! read-modify-write, which keeps sequence values unique under concurrent callers.

use crate::checksum::check_digit;
use crate::prefix::{KnownPrefix, Prefix};
use crate::{AccountError, AccountResult};
use chrono::{Local, NaiveDateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use std::sync::atomic::{AtomicU32, Ordering};

/// Highest sequence value before the counter wraps back to 1.
pub const MAX_SEQUENCE: u32 = 9999;

/// Largest batch [`AccountNumberGenerator::generate_batch`] will produce.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Algorithm tag reported with detailed numbers.
pub const ALGORITHM_TAG: &str = "ModulO11-SecureRandom";

/// Algorithm version reported with detailed numbers.
pub const ALGORITHM_VERSION: &str = "2.0";

const TIMESTAMP_DIGITS: usize = 8;

// Largest multiple of 1000 that fits in a u16; draws at or above it are rejected so the
// salt stays uniform.
const SALT_ACCEPT_BELOW: u16 = 64_000;

/// A generated number together with how and when it was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DetailedAccountNumber {
    #[cfg_attr(feature = "serde", serde(rename = "numero"))]
    pub number: String,
    #[cfg_attr(feature = "serde", serde(rename = "prefixo"))]
    pub prefix: Prefix,
    /// Local wall-clock time of generation.
    #[cfg_attr(feature = "serde", serde(rename = "timestampGeracao"))]
    pub generated_at: NaiveDateTime,
    #[cfg_attr(feature = "serde", serde(rename = "algoritmo"))]
    pub algorithm: String,
    #[cfg_attr(feature = "serde", serde(rename = "versao"))]
    pub version: String,
}

/// Generates account numbers of the form `<prefix><8-digit time><4-digit sequence><3-digit salt><check digit>`.
#[derive(Debug)]
pub struct AccountNumberGenerator {
    counter: AtomicU32,
}

impl Default for AccountNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountNumberGenerator {
    /// Creates a generator whose first number carries sequence `0001`.
    pub fn new() -> Self {
        Self {
            counter: AtomicU32::new(1),
        }
    }

    /// Creates a generator whose first number carries sequence `start`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidArgument`] if `start` is not in `1..=9999`.
    pub fn starting_at(start: u32) -> AccountResult<Self> {
        if !(1..=MAX_SEQUENCE).contains(&start) {
            return Err(AccountError::InvalidArgument(format!(
                "counter start must be between 1 and {}, got: {}",
                MAX_SEQUENCE, start
            )));
        }
        Ok(Self {
            counter: AtomicU32::new(start),
        })
    }

    /// Generates a number for an already validated prefix.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Generation`] if the OS random source fails.
    pub fn generate(&self, prefix: &Prefix) -> AccountResult<String> {
        let timestamp = timestamp_tail(Utc::now().timestamp_millis());
        let sequence = self.next_sequence();
        let salt = draw_salt().map_err(|source| {
            tracing::error!(
                "failed to generate account number with prefix {}: {}",
                prefix,
                source
            );
            AccountError::Generation {
                prefix: prefix.to_string(),
                source,
            }
        })?;

        let base = format!("{}{}{:04}{:03}", prefix, timestamp, sequence, salt);
        let number = format!("{}{}", base, check_digit(&base));

        tracing::debug!("generated account number {} (prefix: {})", number, prefix);
        Ok(number)
    }

    pub fn generate_user(&self) -> AccountResult<String> {
        self.generate(&KnownPrefix::User.prefix())
    }

    pub fn generate_bet(&self) -> AccountResult<String> {
        self.generate(&KnownPrefix::Bet.prefix())
    }

    pub fn generate_transaction(&self) -> AccountResult<String> {
        self.generate(&KnownPrefix::Transaction.prefix())
    }

    pub fn generate_pool(&self) -> AccountResult<String> {
        self.generate(&KnownPrefix::Pool.prefix())
    }

    /// Generates a number for a caller-supplied prefix.
    ///
    /// The prefix is trimmed and uppercased first (see [`Prefix::parse`]).
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidArgument`] if the prefix is empty, longer than five
    /// characters or not alphabetic, and [`AccountError::Generation`] if the random source fails.
    pub fn generate_custom(&self, prefix: &str) -> AccountResult<String> {
        let prefix = Prefix::parse(prefix).inspect_err(|e| {
            tracing::warn!("rejected custom prefix: {}", e);
        })?;
        self.generate(&prefix)
    }

    /// Generates `count` numbers one after another, each advancing the counter.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidArgument`] if `count` is 0 or larger than
    /// [`MAX_BATCH_SIZE`]. A random-source failure aborts the whole batch.
    pub fn generate_batch(&self, prefix: &Prefix, count: usize) -> AccountResult<Vec<String>> {
        if count == 0 || count > MAX_BATCH_SIZE {
            tracing::warn!("rejected batch size {}", count);
            return Err(AccountError::InvalidArgument(format!(
                "batch size must be between 1 and {}, got: {}",
                MAX_BATCH_SIZE, count
            )));
        }

        let numbers = (0..count)
            .map(|_| self.generate(prefix))
            .collect::<AccountResult<Vec<_>>>()?;

        tracing::info!("generated batch of {} account numbers", numbers.len());
        Ok(numbers)
    }

    /// Batch of user (`USR`) numbers.
    pub fn generate_user_batch(&self, count: usize) -> AccountResult<Vec<String>> {
        self.generate_batch(&KnownPrefix::User.prefix(), count)
    }

    /// Generates a number and records the generation time, algorithm tag and version.
    pub fn generate_detailed(&self, prefix: &Prefix) -> AccountResult<DetailedAccountNumber> {
        let number = self.generate(prefix)?;

        Ok(DetailedAccountNumber {
            number,
            prefix: prefix.clone(),
            generated_at: Local::now().naive_local(),
            algorithm: ALGORITHM_TAG.to_owned(),
            version: ALGORITHM_VERSION.to_owned(),
        })
    }

    /// Takes the next sequence value.
    ///
    /// The counter always holds the value the next call will use. When the value read exceeds
    /// [`MAX_SEQUENCE`] the wrap applies to this call: it uses 1 and leaves 2 behind.
    fn next_sequence(&self) -> u32 {
        let previous = self
            .counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(if current > MAX_SEQUENCE { 2 } else { current + 1 })
            })
            .unwrap_or_else(|current| current);

        if previous > MAX_SEQUENCE {
            1
        } else {
            previous
        }
    }
}

/// Last eight characters of the decimal epoch-millis value.
fn timestamp_tail(epoch_millis: i64) -> String {
    let digits = epoch_millis.to_string();
    let start = digits.len().saturating_sub(TIMESTAMP_DIGITS);
    digits[start..].to_owned()
}

/// Uniform value in `0..=999` from the OS random source.
fn draw_salt() -> Result<u16, rand::Error> {
    let mut buf = [0u8; 2];
    loop {
        OsRng.try_fill_bytes(&mut buf)?;
        let value = u16::from_le_bytes(buf);
        if value < SALT_ACCEPT_BELOW {
            return Ok(value % 1000);
        }
    }
}
