//! Account-number prefixes.

use crate::{AccountError, AccountResult};
use std::{fmt, str::FromStr};

/// Maximum number of characters in a prefix.
pub const MAX_PREFIX_LEN: usize = 5;

/// A validated account-number prefix: 1 to 5 uppercase ASCII letters.
///
/// # Construction
/// - [`Prefix::parse`] validates caller input. Surrounding whitespace is trimmed and the result
///   is uppercased before it is checked.
/// - [`KnownPrefix::prefix`] yields the prefix for one of the fixed categories without any
///   validation.
///
/// Once constructed, a `Prefix` only holds characters the checksum weighs by alphabet position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prefix(String);

impl Prefix {
    /// Validates and normalises a caller-supplied prefix.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidArgument`] if the trimmed input is empty, longer than
    /// [`MAX_PREFIX_LEN`], or contains anything other than ASCII letters.
    pub fn parse(input: &str) -> AccountResult<Self> {
        let trimmed = input.trim();
        let len = trimmed.chars().count();
        if len == 0 || len > MAX_PREFIX_LEN {
            return Err(AccountError::InvalidArgument(format!(
                "prefix must be between 1 and {} characters, got: '{}'",
                MAX_PREFIX_LEN, input
            )));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AccountError::InvalidArgument(format!(
                "prefix must contain only letters, got: '{}'",
                input
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the known category for this prefix, if any.
    pub fn known(&self) -> Option<KnownPrefix> {
        KnownPrefix::from_code(&self.0)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Prefix {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prefix::parse(s)
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<KnownPrefix> for Prefix {
    fn from(known: KnownPrefix) -> Self {
        known.prefix()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Prefix::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// The account categories the validator recognises.
///
/// The first four are issued by the named generator entry points; the remaining four are
/// administrative and only ever produced through a custom prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnownPrefix {
    User,
    Bet,
    Transaction,
    Pool,
    Admin,
    System,
    Report,
    Log,
}

impl KnownPrefix {
    pub const ALL: [KnownPrefix; 8] = [
        KnownPrefix::User,
        KnownPrefix::Bet,
        KnownPrefix::Transaction,
        KnownPrefix::Pool,
        KnownPrefix::Admin,
        KnownPrefix::System,
        KnownPrefix::Report,
        KnownPrefix::Log,
    ];

    pub fn code(self) -> &'static str {
        match self {
            KnownPrefix::User => "USR",
            KnownPrefix::Bet => "APT",
            KnownPrefix::Transaction => "TXN",
            KnownPrefix::Pool => "BOL",
            KnownPrefix::Admin => "ADM",
            KnownPrefix::System => "SYS",
            KnownPrefix::Report => "RPT",
            KnownPrefix::Log => "LOG",
        }
    }

    /// Human-readable account type.
    pub fn label(self) -> &'static str {
        match self {
            KnownPrefix::User => "User account",
            KnownPrefix::Bet => "Bet account",
            KnownPrefix::Transaction => "Transaction account",
            KnownPrefix::Pool => "Pool account",
            KnownPrefix::Admin => "Administrative account",
            KnownPrefix::System => "System account",
            KnownPrefix::Report => "Report account",
            KnownPrefix::Log => "Log account",
        }
    }

    /// Exact, case-sensitive lookup of a three-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.code() == code)
    }

    pub fn prefix(self) -> Prefix {
        Prefix(self.code().to_owned())
    }
}

/// Maps a prefix code to its account type, `"Unknown type"` for anything unrecognised.
pub fn account_type_label(code: &str) -> &'static str {
    KnownPrefix::from_code(code)
        .map(KnownPrefix::label)
        .unwrap_or("Unknown type")
}
