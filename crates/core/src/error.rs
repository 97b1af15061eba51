/// Result alias that carries the custom [`VisualiserError`] type.
pub type Result<T> = std::result::Result<T, VisualiserError>;

/// Common error type for the core crate.
///
/// Playback commands themselves never fail; errors only come from input
/// validation, the collection ownership rule, and the I/O edges (config
/// files, transcripts).
#[derive(Debug, thiserror::Error)]
pub enum VisualiserError {
    /// Free-form message for conditions without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Config or transcript (de)serialisation failed.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Text entered for an add/search command is empty or not an integer.
    #[error("`{input}` is not a whole number")]
    InvalidInput { input: String },
    /// The collection was edited while a run was active.
    #[error("collection cannot be edited while a run is {phase}")]
    CollectionLocked { phase: &'static str },
    /// The command has no meaning for the selected visualisation.
    #[error("`{operation}` is not available for {visualisation}")]
    NotSupported {
        operation: &'static str,
        visualisation: &'static str,
    },
    /// A thread panicked while holding the shared playback controller.
    #[error("{0} has been poisoned")]
    Poisoned(&'static str),
}

impl VisualiserError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for VisualiserError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for VisualiserError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_locked_collection() {
        let err = VisualiserError::CollectionLocked { phase: "stepping" };
        assert_eq!(
            err.to_string(),
            "collection cannot be edited while a run is stepping"
        );
    }

    #[test]
    fn converts_plain_strings() {
        let err: VisualiserError = "boom".into();
        assert!(matches!(err, VisualiserError::Message(ref m) if m == "boom"));
    }
}
