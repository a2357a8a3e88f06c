use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatqError {
    #[error("Invalid service URL: {0}\n\nSet a http(s) base_url under [service] in ~/.config/chatq/config.toml")]
    InvalidBaseUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
