//! Account-number generation and validation.
//!
//! Account numbers identify users, bets, transactions and pools. They are generated on demand,
//! never stored by this crate, and can be validated later from the string alone.
//!
//! ## Format
//! `<prefix><timestamp tail><sequence><salt><check digit>`
//!
//! | Segment | Length | Content |
//! |---|---|---|
//! | prefix | 1-5 | uppercase letters, for example `USR` |
//! | timestamp tail | 8 | last 8 digits of the epoch milliseconds at generation |
//! | sequence | 4 | rolling counter `0001`..`9999` |
//! | salt | 3 | uniformly random `000`..`999` from the OS random source |
//! | check digit | 1 | mod-11 checksum of everything before it |
//!
//! Example: `USR1234567800011235`
//!
//! The total length is always the prefix length plus 16. The validator only accepts the
//! three-letter form with one of the known prefixes (see [`KnownPrefix`]).
//!
//! ## Errors vs. results
//! Bad input to the generator (an empty prefix, a batch size out of range) is an
//! [`AccountError`]. A candidate number that fails validation is *not* an error: the validator
//! returns a [`ValidationResult`] with `valid == false` and a human-readable reason.

mod checksum;
mod generator;
mod prefix;
mod validator;

pub use checksum::check_digit;
pub use generator::{
    AccountNumberGenerator, DetailedAccountNumber, ALGORITHM_TAG, ALGORITHM_VERSION,
    MAX_BATCH_SIZE, MAX_SEQUENCE,
};
pub use prefix::{account_type_label, KnownPrefix, Prefix, MAX_PREFIX_LEN};
pub use validator::{AccountInfo, AccountNumberValidator, ValidationResult};

/// Error type for account-number operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Invalid input provided by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The random source failed while composing a number
    #[error("failed to generate account number with prefix {prefix}: {source}")]
    Generation {
        prefix: String,
        #[source]
        source: rand::Error,
    },
}

/// Result type for account-number operations.
pub type AccountResult<T> = Result<T, AccountError>;
