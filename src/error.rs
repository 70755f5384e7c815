#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The section sequence was empty; there is no primary product token to classify.
    #[error("malformed input: user agent has no sections")]
    MalformedInput,
    #[error("invalid rule: {0}")]
    InvalidRule(String),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
    #[error(transparent)]
    Regex(#[from] fancy_regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
