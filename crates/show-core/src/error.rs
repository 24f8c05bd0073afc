use thiserror::Error;

/// Errors surfaced by the show engine.
///
/// Formation generation itself cannot fail; the only failures are a caller
/// naming a formation that does not exist, or building an engine from a
/// configuration that makes no sense.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShowError {
    #[error("unknown formation `{0}`")]
    UnknownFormation(String),
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, ShowError>;
