//! Centralized default constants for the chatlens system.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.

// =============================================================================
// ANNOTATION SERVICE
// =============================================================================

/// Default annotation service base URL.
pub const ANNOTATION_URL: &str = "http://127.0.0.1:8801";

/// Timeout for annotation requests in seconds.
pub const ANNOTATION_TIMEOUT_SECS: u64 = 30;

/// User-facing message when the annotation service cannot be reached.
///
/// This exact string is the hard-error contract: the front end shows it as
/// an error banner and suppresses topic/expansion display entirely.
pub const ANNOTATION_UNAVAILABLE_MSG: &str =
    "Annotation service is not running. Please start the annotation service.";

/// Maximum characters of remote diagnostic output copied into an annotation.
pub const RAW_OUTPUT_EXCERPT_CHARS: usize = 100;

// =============================================================================
// TOPIC DEFAULTS
// =============================================================================

/// Primary category substituted when a payload lacks a usable topic.
pub const DEFAULT_TOPIC_PRIMARY: &str = "General";

/// Secondary category substituted when a payload lacks a usable topic.
pub const DEFAULT_TOPIC_SECONDARY: &str = "Other";

// =============================================================================
// RESPONSE GENERATION
// =============================================================================

/// Default Ollama base URL.
pub const OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default generation model name (Ollama).
pub const GEN_MODEL: &str = "gpt-oss:20b";

/// Timeout for generation requests in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 120;

/// Sampling temperature for response generation.
pub const GEN_TEMPERATURE: f32 = 0.7;

/// Nucleus sampling bound for response generation.
pub const GEN_TOP_P: f32 = 0.95;

/// Top-k sampling bound for response generation.
pub const GEN_TOP_K: u32 = 40;

/// Maximum tokens per generated reply.
pub const GEN_MAX_TOKENS: u32 = 1024;

/// System instruction sent with every generation request.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant. Engage in natural conversation with the user.\nKeep your responses concise but informative. Be friendly and helpful.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_bounds_are_sane() {
        // Runtime check needed for floating point arithmetic
        assert!(GEN_TEMPERATURE > 0.0 && GEN_TEMPERATURE <= 2.0);
        assert!(GEN_TOP_P > 0.0 && GEN_TOP_P <= 1.0);
        const {
            assert!(GEN_TOP_K > 0);
            assert!(GEN_MAX_TOKENS > 0);
        }
    }

    #[test]
    fn unavailable_message_carries_connectivity_marker() {
        // The reconciler classifies errors by substring; the canonical
        // unavailability message must itself match the connectivity class.
        assert!(ANNOTATION_UNAVAILABLE_MSG.to_lowercase().contains("not running"));
    }

    #[test]
    fn raw_output_excerpt_is_bounded() {
        const {
            assert!(RAW_OUTPUT_EXCERPT_CHARS > 0);
            assert!(RAW_OUTPUT_EXCERPT_CHARS <= 1000);
        }
    }
}
