/// Result alias used throughout the crate.
pub type GifferResult<T> = Result<T, GifferError>;

/// Every failure a conversion run can produce.
#[derive(thiserror::Error, Debug)]
pub enum GifferError {
    /// The input buffer is not a recognized or valid image encoding.
    #[error("decode error: frame {index}: {source}")]
    Decode {
        /// Input position.
        index: usize,
        /// Detected format, when detection got that far.
        format: Option<image::ImageFormat>,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The decoded image could not be reduced to an indexed GIF frame.
    #[error("quantize error: frame {index}: {reason}")]
    Quantize {
        /// Input position.
        index: usize,
        /// What went wrong.
        reason: String,
    },

    /// The GIF container encoder failed; surfaced as-is.
    #[error("assembly error: {0}")]
    Assembly(#[from] gif::EncodingError),

    /// Assembly was asked to encode zero frames.
    #[error("assembly error: animation has no frames")]
    EmptyAnimation,

    /// Invalid options or inconsistent animation data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Options file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GifferError {
    /// Build a [`GifferError::Decode`] value.
    pub fn decode(
        index: usize,
        format: Option<image::ImageFormat>,
        source: image::ImageError,
    ) -> Self {
        Self::Decode {
            index,
            format,
            source,
        }
    }

    /// Build a [`GifferError::Quantize`] value.
    pub fn quantize(index: usize, reason: impl Into<String>) -> Self {
        Self::Quantize {
            index,
            reason: reason.into(),
        }
    }

    /// Build a [`GifferError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GifferError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Input position of the frame that failed, for per-frame errors.
    pub fn frame_index(&self) -> Option<usize> {
        match self {
            Self::Decode { index, .. } | Self::Quantize { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
