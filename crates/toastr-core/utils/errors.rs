//! Error types for style compilation and notification handling
//!
//! Provides `StyleError` for the nested style compiler and the main
//! `ToastError` enum that every fallible operation in the crate returns.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling
//! - Keep best-effort UI paths recoverable: an unknown severity is reported
//!   and logged, never propagated out of a dispatch
//! - Host failures (DOM or timer) are unexpected and surface as `Host`

use std::fmt;

use thiserror::Error;

/// Errors produced while compiling a style rule tree into CSS text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// A property was declared at the root of the tree, with no selector above it
    #[error("declaration `{property}` has no enclosing selector")]
    DeclarationOutsideRule {
        /// Offending property name
        property: String,
    },

    /// A property name was empty
    #[error("empty property name in rule `{selector}`")]
    EmptyProperty {
        /// Selector of the rule holding the declaration
        selector: String,
    },

    /// A value would break out of its declaration block
    #[error("invalid value {value:?} for `{property}` in rule `{selector}`")]
    InvalidValue {
        /// Selector of the rule holding the declaration
        selector: String,
        /// Property name
        property: String,
        /// Rejected value text
        value: String,
    },
}

/// Main error type for toast operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToastError {
    /// Style tree could not be compiled
    #[error("style compilation failed: {0}")]
    Style(#[from] StyleError),

    /// Severity tag is not one of the enabled severities
    #[error("unknown severity `{0}`")]
    UnknownSeverity(String),

    /// A stylesheet from an earlier initialization is still mounted
    #[error("already initialized: stylesheet `{0}` is present in the document")]
    AlreadyInitialized(String),

    /// Configuration could not be read
    #[error("configuration error: {0}")]
    Config(String),

    /// Host document or timer service failed
    #[error("host error: {0}")]
    Host(String),
}

impl ToastError {
    /// Create host error from any displayable failure
    pub fn host<T: fmt::Display>(message: T) -> Self {
        Self::Host(format!("{message}"))
    }

    /// Create configuration error from any displayable failure
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(format!("{message}"))
    }

    /// Check if error is recoverable
    ///
    /// Recoverable errors leave the service usable; the caller may log and
    /// continue. Host failures indicate a broken environment.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Style(_)
            | Self::UnknownSeverity(_)
            | Self::AlreadyInitialized(_)
            | Self::Config(_) => true,
            Self::Host(_) => false,
        }
    }
}

/// Convert from JSON configuration errors
#[cfg(feature = "serde")]
impl From<serde_json::Error> for ToastError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(err)
    }
}

/// Result type alias for toast operations
pub type Result<T> = core::result::Result<T, ToastError>;
