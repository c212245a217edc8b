use stack_string::StackString;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("invalid coordinate {0}")]
    InvalidCoordinate(StackString),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("transport error: {0}")]
    Transport(StackString),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("response decode error: {0}")]
    Decode(StackString),
    #[error("mount point #{0} not found")]
    MountPointMissing(StackString),
    #[error("debug hook {0} already registered")]
    DebugHookExists(StackString),
    #[error("store is no longer receiving actions")]
    StoreClosed,
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string().into())
    }
}
