use thiserror::Error;

#[derive(Error, Debug)]
pub enum CueError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),

    #[error(transparent)]
    SetLoggerError(#[from] log::SetLoggerError),

    #[error("Degenerate color gamut (triangle area {area})")]
    DegenerateGamut { area: f64 },

    #[error("No color gamut selected (set gamut in config, or pass --gamut)")]
    NoGamutSelected,

    #[error("Unknown gamut profile {0:?} (expected A, B, C or full)")]
    UnknownGamut(String),

    #[error("Invalid color {0:?} (expected #rrggbb or r,g,b)")]
    InvalidColor(String),
}

pub type CueResult<T> = Result<T, CueError>;
