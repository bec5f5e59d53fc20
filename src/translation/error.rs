use thiserror::Error;

/// Failure of the request/response exchange with the upstream endpoint.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Connection refused, TLS failure, timeout, or a broken response body.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status, or a response envelope that is not what was expected.
    #[error("Unexpected upstream response: {0}")]
    UpstreamFormat(String),

    #[error("No API key configured. Run 'lexi configure' to set one")]
    MissingApiKey,

    /// The proxy or endpoint could not be turned into a usable transport.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl TranslationError {
    /// Network errors are the only ones worth retrying.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Failure to turn the model's reply into a [`TranslationResult`].
///
/// Both variants keep the reply exactly as received so it can be shown to the
/// user next to the error.
///
/// [`TranslationResult`]: super::TranslationResult
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Model reply is not valid JSON: {detail}")]
    InvalidJson { detail: String, raw: String },

    #[error("Model reply does not match the expected fields: {detail}")]
    SchemaMismatch { detail: String, raw: String },
}

impl ExtractionError {
    /// The unmodified reply text.
    pub fn raw(&self) -> &str {
        match self {
            Self::InvalidJson { raw, .. } | Self::SchemaMismatch { raw, .. } => raw,
        }
    }
}

/// Any failure of a full lookup: transport or extraction.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl LookupError {
    /// Raw model reply, when the failure happened after one was received.
    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            Self::Extraction(e) => Some(e.raw()),
            Self::Translation(_) => None,
        }
    }
}
