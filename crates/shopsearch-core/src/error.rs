use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read configuration: {0}")]
    Config(#[from] figment::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Catalog is not valid JSON: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
