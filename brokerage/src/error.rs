/// Everything that can end a report run.
///
/// All variants are fatal; the binary prints the message and exits.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("failed to fetch option orders: {0}")]
    Fetch(String),

    #[error("failed to parse order: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
