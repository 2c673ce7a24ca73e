use thiserror::Error;

pub type Result<T> = std::result::Result<T, Ai21Error>;

#[derive(Debug, Error)]
pub enum Ai21Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No choices in chat response")]
    EmptyResponse,
}

impl From<reqwest::Error> for Ai21Error {
    fn from(err: reqwest::Error) -> Self {
        Ai21Error::Network(err.to_string())
    }
}
