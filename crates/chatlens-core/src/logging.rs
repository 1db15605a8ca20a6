//! Structured logging schema and field name constants for chatlens.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Annotation service unreachable, generation hard failure |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, reset), completed exchanges |
//! | DEBUG | Decision points, reconciliation outcomes, config choices |
//! | TRACE | Per-turn iteration, raw payload excerpts |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "session", "inference", "cli"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "reconciler", "fallback", "remote", "responder"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "annotate", "analyze", "respond", "submit"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Turn UUID being operated on.
pub const TURN_ID: &str = "turn_id";

/// Zero-based index of the turn within the conversation.
pub const TURN_INDEX: &str = "turn_index";

/// Number of turns in the history sent to a backend.
pub const HISTORY_LEN: &str = "history_len";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for generation.
pub const MODEL: &str = "model";

/// Annotation service name used for analysis.
pub const SERVICE: &str = "service";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Reconciliation outcome class.
/// Values: "clean", "defaulted", "fallback", "unavailable"
pub const OUTCOME: &str = "outcome";

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
