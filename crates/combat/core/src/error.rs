//! Common error infrastructure for combat-core.
//!
//! Nothing in this crate is allowed to halt a game loop. Errors are returned so
//! callers can log or surface them, and every operation that reports one leaves
//! actor state untouched. Domain-specific errors (`ThresholdError`,
//! `ComboError`) live beside the code that produces them.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry with different input
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    ///
    /// Examples: combo slot not found, action already in the sequence
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: non-combo action offered to a combo sequence
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: thresholds configured out of order
    Internal,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
