//! # toastr-core
//!
//! Transient on-screen notifications ("toasts") for any document-like host.
//! The crate compiles a nested style configuration into CSS, renders one DOM
//! fragment per notification and fades it out on a timer.
//!
//! ## Features
//!
//! - **Nested styles**: selector trees with `&.modifier` / `&:pseudo`
//!   compound keys compile to plain CSS text
//! - **Stepwise fade**: explicit per-notification fade record, 30 steps per second
//! - **Host agnostic**: all DOM and timer access goes through [`host::Document`]
//!   and [`host::Timers`]; [`host::MemoryHost`] runs headless
//! - **Typed severities**: closed [`Severity`] set with best-effort handling
//!   of unknown tags
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use toastr_core::{host::MemoryHost, NotificationRequest, Severity, ToastService};
//!
//! let host = Rc::new(MemoryHost::new());
//! let toasts = ToastService::builder(Rc::clone(&host)).init()?;
//!
//! toasts.show_message(
//!     NotificationRequest::new(Severity::Success)
//!         .title("Saved")
//!         .message("All changes stored")
//!         .timeout(Duration::from_secs(1)),
//! )?;
//! assert_eq!(host.children(*toasts.container()).len(), 1);
//! # Ok::<(), toastr_core::ToastError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod animation;
pub mod host;
pub mod style;
pub mod toast;
pub mod utils;

pub use animation::{Animation, FadeAnimator};
pub use style::{compile, StyleRuleTree, StyleValue};
pub use toast::{
    ConfigOverride, IconSpec, NotificationRequest, Severity, SeverityTag, ToastConfig,
    ToastService,
};
pub use utils::{Result, StyleError, ToastError};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
