use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrajError>;

#[derive(Debug, Error)]
pub enum TrajError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("Invalid CSV Header: {0}")]
    CsvHeader(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Invalid integer in column '{column}' at row {row}: {value}")]
    IntParse {
        row: usize,
        column: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Invalid number in column '{column}' at row {row}: {value}")]
    FloatParse {
        row: usize,
        column: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Cannot plot an empty trajectory")]
    EmptyTrajectory,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<toml::de::Error> for TrajError {
    fn from(err: toml::de::Error) -> Self {
        TrajError::Config(format!("TOML parse error: {}", err))
    }
}
