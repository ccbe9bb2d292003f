//! Error types for the radar classifier

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Training records and labels have different lengths
    #[error("Got {records} training records but {labels} labels")]
    LabelCountMismatch { records: usize, labels: usize },

    /// Training called without any records
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Table mode accepts exactly one likelihood row per class
    #[error("Class '{class}' has more than one likelihood row")]
    DuplicateTableRow { class: String },

    /// Measurement maps outside the likelihood row
    #[error(
        "Measurement {measurement} of class '{class}' maps to index {index}, row length is {len}"
    )]
    TableIndexOutOfRange {
        class: String,
        measurement: f64,
        index: i64,
        len: usize,
    },

    /// Gaussian estimate needs at least two values with non-zero spread
    #[error("Class '{class}' has degenerate variance {variance} over {samples} samples")]
    DegenerateVariance {
        class: String,
        samples: usize,
        variance: f64,
    },

    /// Predict called before train
    #[error("Classifier not trained yet")]
    NotTrained,

    /// A sequence to classify has no measurements
    #[error("Sequence {sequence} is empty")]
    EmptySequence { sequence: usize },

    /// Every class weight vanished at some time step
    #[error("All class weights are zero at time step {step}, cannot normalize")]
    DegenerateNormalization { step: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Token in a data file is not a number
    #[error("Line {line}, column {column}: '{token}' is not a number")]
    InvalidNumber {
        line: usize,
        column: usize,
        token: String,
    },

    /// Row with nothing but missing readings
    #[error("Line {line} has no valid readings")]
    EmptyRow { line: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML decoding error
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML encoding error
    #[error("Config encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

impl Error {
    /// Whether the error comes from reading input files rather than from the model
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidNumber { .. }
                | Error::EmptyRow { .. }
                | Error::Io(_)
                | Error::Csv(_)
                | Error::Toml(_)
        )
    }
}
