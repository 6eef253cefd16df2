use std::path::PathBuf;

/// Errors raised while loading, cropping or saving an animation.
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse Lottie JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize animation: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The document has no root `h` and the caller asked for a hard failure.
    #[error("animation has no canvas height (`h`)")]
    MissingHeight,

    #[error("{0} is outside the JSON integer range")]
    Overflow(String),

    #[error("{0} is not a finite number")]
    NonFinite(String),
}

/// Rejected `n/d` or decimal fraction text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fraction {input:?}: {reason}")]
pub struct FractionError {
    pub input: String,
    pub reason: &'static str,
}
