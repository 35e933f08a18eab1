use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

#[derive(Debug)]
pub enum ResponderError {
    DelegateSpawn(std::io::Error),
    OutputFailed(std::io::Error),
}

impl fmt::Display for ResponderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponderError::DelegateSpawn(e) => write!(f, "Delegate spawn failed: {}", e),
            ResponderError::OutputFailed(e) => write!(f, "Output write failed: {}", e),
        }
    }
}

impl std::error::Error for ResponderError {}

impl From<std::io::Error> for ResponderError {
    fn from(err: std::io::Error) -> Self {
        ResponderError::OutputFailed(err)
    }
}

#[derive(Debug)]
pub enum AppError {
    ConfigError(ConfigError),
    ResponderError(ResponderError),
    IoError(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConfigError(e) => write!(f, "Configuration error: {}", e),
            AppError::ResponderError(e) => write!(f, "Responder error: {}", e),
            AppError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::ConfigError(err)
    }
}

impl From<ResponderError> for AppError {
    fn from(err: ResponderError) -> Self {
        AppError::ResponderError(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err)
    }
}
