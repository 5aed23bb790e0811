//! Constants used throughout the core crate.

use acctnum_id::KnownPrefix;

/// Environment variable naming the prefix used when a caller gives none.
pub const DEFAULT_PREFIX_ENV: &str = "ACCTNUM_DEFAULT_PREFIX";

/// Environment variable holding the first sequence value a new service hands out.
pub const COUNTER_START_ENV: &str = "ACCTNUM_COUNTER_START";

/// Prefix used when neither the caller nor the environment supplies one.
pub const DEFAULT_PREFIX: KnownPrefix = KnownPrefix::User;

/// First sequence value when `ACCTNUM_COUNTER_START` is unset.
pub const DEFAULT_COUNTER_START: u32 = 1;
