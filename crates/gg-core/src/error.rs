use thiserror::Error;

/// Errors surfaced by the quantizer and the renderer.
///
/// Every variant aborts the whole conversion request: no partial grid is
/// ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Malformed quantizer input or malformed rendering options.
    #[error("Argument invalide : {0}")]
    InvalidArgument(String),

    /// Required companion data is absent (shape glyph missing in shape mode).
    #[error("Entrée manquante : {0}")]
    MissingInput(String),

    /// Source image has a zero dimension.
    #[error("Image vide : {width}×{height}")]
    EmptyImage {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// Source image could not be decoded.
    #[error("Échec du décodage : {0}")]
    DecodeFailure(String),

    /// An algorithmic impossibility, i.e. a bug. Never swallowed.
    #[error("Violation d'invariant interne : {0}")]
    InternalInvariantViolation(String),
}

impl ConvertError {
    /// Shorthand used by option and input validation.
    #[must_use]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Shorthand for invariant violations.
    #[must_use]
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InternalInvariantViolation(msg.into())
    }
}
