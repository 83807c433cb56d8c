use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A station's latitude or longitude is out of range or not a finite number.
    #[error("invalid coordinate for {name}: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate {
        name: String,
        latitude: f64,
        longitude: f64,
    },

    /// The weight mapping lacks the pair `{a, b}`.
    #[error("incomplete graph: no weight between {a} and {b}")]
    IncompleteGraph { a: String, b: String },

    #[error("station name must not be empty")]
    EmptyName,

    #[error("self edge on {name}")]
    SelfEdge { name: String },

    #[error("invalid weight {weight} between {a} and {b}")]
    InvalidWeight { a: String, b: String, weight: f64 },

    /// A text record could not be parsed. `line` is 1-based.
    #[error("malformed record on line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// A tree edge refers to a station that is not in the point set.
    #[error("unknown station: {name}")]
    UnknownStation { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
