use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("No packets available for station {station}")]
    NoPacketsAvailable { station: usize },

    #[error("Channel is busy")]
    ChannelBusy,

    #[error("Sub-channel {index} is busy")]
    SubChannelBusy { index: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
