mod client;
mod error;
mod extract;
mod prompt;
mod types;

pub use client::{
    ClientOptions, DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF, DEFAULT_TIMEOUT,
    TranslationClient,
};
pub use error::{ExtractionError, LookupError, TranslationError};
pub use extract::{CODE_FENCE_CLOSE, CODE_FENCE_OPEN, extract, strip_code_fence};
pub use prompt::{JSON_ONLY_INSTRUCTION, build_prompt};
pub use types::{Kind, LOCALIZED_DEFINITION_NOT_FOUND, TranslationResult};
