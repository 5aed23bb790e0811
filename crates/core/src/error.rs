use acctnum_id::AccountError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Account(#[from] AccountError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
