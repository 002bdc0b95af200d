use thiserror::Error;


#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to marshal request: {0}")]
    Marshal(String),

    #[error("Failed to send request: {0}")]
    Transport(String),

    #[error("Unexpected status code: {status}, body: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to unmarshal response: {0}")]
    Unmarshal(String),

    #[error("File Update Error: {0}")]
    FileUpdate(String),

    #[error("Command Error: {0}")]
    Command(String),
}
