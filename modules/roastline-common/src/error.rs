use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoastlineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
