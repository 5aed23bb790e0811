//! # Account-number core
//!
//! Service layer over the account-number algorithms in `acctnum-id`.
//!
//! This crate owns:
//! - Startup configuration ([`CoreConfig`]), resolved once and passed in
//! - [`AccountService`], which holds one generator (and therefore one sequence counter) and a
//!   validator, and applies the configured defaults
//!
//! **No presentation concerns**: argument parsing, output formatting and logging setup belong in
//! the CLI.

pub mod config;
pub mod constants;
pub mod error;

pub use acctnum_id::{
    check_digit, AccountInfo, DetailedAccountNumber, KnownPrefix, Prefix, ValidationResult,
};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};

use acctnum_id::{AccountNumberGenerator, AccountNumberValidator};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Account-number operations with configured defaults.
///
/// Cloning is cheap and clones share the generator, so every clone draws from the same
/// sequence counter.
#[derive(Clone, Debug)]
pub struct AccountService {
    cfg: Arc<CoreConfig>,
    generator: Arc<AccountNumberGenerator>,
    validator: AccountNumberValidator,
}

impl AccountService {
    /// Creates a service whose counter starts at the configured value.
    pub fn new(cfg: Arc<CoreConfig>) -> CoreResult<Self> {
        let generator = AccountNumberGenerator::starting_at(cfg.counter_start())?;
        tracing::debug!(
            "account service ready (default prefix: {}, counter start: {})",
            cfg.default_prefix(),
            cfg.counter_start()
        );

        Ok(Self {
            cfg,
            generator: Arc::new(generator),
            validator: AccountNumberValidator::new(),
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Generates a number with `prefix`, or with the configured default when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Account`] if the prefix is invalid or generation fails.
    pub fn generate(&self, prefix: Option<&str>) -> CoreResult<String> {
        match prefix {
            Some(raw) => Ok(self.generator.generate_custom(raw)?),
            None => Ok(self.generator.generate(self.cfg.default_prefix())?),
        }
    }

    /// Generates a number for one of the fixed account categories.
    pub fn generate_kind(&self, kind: KnownPrefix) -> CoreResult<String> {
        let number = match kind {
            KnownPrefix::User => self.generator.generate_user(),
            KnownPrefix::Bet => self.generator.generate_bet(),
            KnownPrefix::Transaction => self.generator.generate_transaction(),
            KnownPrefix::Pool => self.generator.generate_pool(),
            other => self.generator.generate(&other.prefix()),
        }?;
        Ok(number)
    }

    /// Generates `count` numbers (1..=1000) with `prefix` or the configured default.
    pub fn generate_batch(&self, prefix: Option<&str>, count: usize) -> CoreResult<Vec<String>> {
        let prefix = self.resolve_prefix(prefix)?;
        Ok(self.generator.generate_batch(&prefix, count)?)
    }

    /// Generates a number together with its generation metadata.
    pub fn generate_detailed(&self, prefix: Option<&str>) -> CoreResult<DetailedAccountNumber> {
        let prefix = self.resolve_prefix(prefix)?;
        Ok(self.generator.generate_detailed(&prefix)?)
    }

    pub fn validate(&self, candidate: Option<&str>) -> ValidationResult {
        self.validator.validate(candidate)
    }

    pub fn validate_many<I, S>(&self, candidates: I) -> BTreeMap<String, ValidationResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.validator.validate_batch(candidates)
    }

    pub fn is_well_formed(&self, candidate: &str) -> bool {
        self.validator.is_well_formed(Some(candidate))
    }

    pub fn has_known_prefix(&self, candidate: &str) -> bool {
        self.validator.has_known_prefix(Some(candidate))
    }

    pub fn extract_prefix(&self, candidate: &str) -> CoreResult<String> {
        Ok(self.validator.extract_prefix(candidate)?)
    }

    /// Decomposes a valid number; invalid numbers are an error carrying the reason.
    pub fn describe(&self, candidate: &str) -> CoreResult<AccountInfo> {
        Ok(self.validator.extract_info(candidate)?)
    }

    fn resolve_prefix(&self, prefix: Option<&str>) -> CoreResult<Prefix> {
        match prefix {
            Some(raw) => Ok(Prefix::parse(raw)?),
            None => Ok(self.cfg.default_prefix().clone()),
        }
    }
}
