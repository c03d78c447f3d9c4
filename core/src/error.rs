use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("image load timed out after {0} ms")]
    Timeout(u32),
    #[error("image failed to load: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("global configuration object missing")]
    Missing,
}
