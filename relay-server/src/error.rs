use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] relay_config::ConfigError),

    #[error("Logging setup failed: {message}")]
    Logging { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
