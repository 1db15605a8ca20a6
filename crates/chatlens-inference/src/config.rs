//! Environment-driven configuration for the inference backends.
//!
//! Configuration is read once at startup via [`InferenceConfig::from_env`]
//! and handed to the concrete backends. Defaults come from
//! `chatlens_core::defaults` so every crate agrees on them.

use std::env;

use chatlens_core::defaults;

/// Configuration for the remote annotation service.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationConfig {
    /// Base URL of the annotation service. Empty disables the service
    /// entirely (the pipeline then takes the hard-error path every turn).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::ANNOTATION_URL.to_string(),
            timeout_secs: defaults::ANNOTATION_TIMEOUT_SECS,
        }
    }
}

impl AnnotationConfig {
    /// True when the configured URL can back a usable service handle.
    pub fn is_resolvable(&self) -> bool {
        !self.base_url.is_empty()
            && (self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
    }
}

/// Configuration for the response generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Generation model name.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::OLLAMA_URL.to_string(),
            model: defaults::GEN_MODEL.to_string(),
            timeout_secs: defaults::GEN_TIMEOUT_SECS,
        }
    }
}

/// Combined inference configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferenceConfig {
    pub annotation: AnnotationConfig,
    pub generation: GenerationConfig,
}

impl InferenceConfig {
    /// Load configuration from environment variables with fallback to
    /// defaults.
    ///
    /// Recognized variables: `CHATLENS_ANNOTATION_URL`,
    /// `CHATLENS_ANNOTATION_TIMEOUT_SECS`, `OLLAMA_BASE`,
    /// `OLLAMA_GEN_MODEL`, `CHATLENS_GEN_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self {
            annotation: AnnotationConfig {
                base_url: env::var("CHATLENS_ANNOTATION_URL")
                    .unwrap_or_else(|_| defaults::ANNOTATION_URL.to_string()),
                timeout_secs: env_u64(
                    "CHATLENS_ANNOTATION_TIMEOUT_SECS",
                    defaults::ANNOTATION_TIMEOUT_SECS,
                ),
            },
            generation: GenerationConfig {
                base_url: env::var("OLLAMA_BASE")
                    .unwrap_or_else(|_| defaults::OLLAMA_URL.to_string()),
                model: env::var("OLLAMA_GEN_MODEL")
                    .unwrap_or_else(|_| defaults::GEN_MODEL.to_string()),
                timeout_secs: env_u64("CHATLENS_GEN_TIMEOUT_SECS", defaults::GEN_TIMEOUT_SECS),
            },
        }
    }
}

fn env_u64(var: &str, default: u64) -> u64 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
