//! Host environment collaborators.
//!
//! The toast engine never touches a concrete DOM. It talks to a [`Document`]
//! for node creation and tree mutation and to a [`Timers`] service for
//! deferred callbacks. A browser binding implements both on top of the real
//! document and `setTimeout`; [`MemoryHost`] implements them in memory.
//!
//! All callbacks run on a single thread, so the traits carry no `Send` or
//! `Sync` bounds.

use std::time::Duration;

use crate::utils::Result;

mod memory;

pub use memory::{MemoryHost, NodeId};

/// Deferred unit of work handed to [`Timers::schedule_after`]
pub type Task = Box<dyn FnOnce()>;

/// Handler invoked each time a node is clicked
pub type ClickHandler = Box<dyn FnMut()>;

/// Longest delay a timer service accepts, the browser `setTimeout` limit
pub const MAX_DELAY: Duration = Duration::from_millis(i32::MAX as u64);

/// Opaque handle of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Document tree operations needed to mount and animate notifications
pub trait Document {
    /// Handle to an element or text node
    type Node: Clone + 'static;

    /// Create a detached element with the given tag name
    fn create_element(&self, tag: &str) -> Result<Self::Node>;

    /// Create a detached text node
    fn create_text_node(&self, text: &str) -> Result<Self::Node>;

    /// Document head, the stylesheet injection point
    fn head(&self) -> Result<Self::Node>;

    /// Document body, the default mount point
    fn body(&self) -> Result<Self::Node>;

    /// Find a mounted element by its id
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Set the element id
    fn set_id(&self, node: &Self::Node, id: &str) -> Result<()>;

    /// Replace the element class list
    fn set_class_name(&self, node: &Self::Node, class_name: &str) -> Result<()>;

    /// Set an arbitrary attribute
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    /// Append `child` as the last child of `parent`
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Insert `child` before the first child of `parent`
    fn prepend_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Whether the node is currently attached to a parent
    fn has_parent(&self, node: &Self::Node) -> bool;

    /// Remove the node from its parent
    fn detach(&self, node: &Self::Node) -> Result<()>;

    /// Inline opacity of the node, `None` when unset
    fn opacity(&self, node: &Self::Node) -> Option<f64>;

    /// Set the inline opacity of the node
    fn set_opacity(&self, node: &Self::Node, opacity: f64) -> Result<()>;

    /// Register a click handler on the node
    fn on_click(&self, node: &Self::Node, handler: ClickHandler) -> Result<()>;
}

/// Deferred-callback service
pub trait Timers {
    /// Run `task` once after `delay`
    ///
    /// Delays above [`MAX_DELAY`] are rejected with a host error.
    fn schedule_after(&self, delay: Duration, task: Task) -> Result<TimerHandle>;
}

/// Complete host environment: a document plus a timer service
pub trait Host: Document + Timers + 'static {}

impl<T> Host for T where T: Document + Timers + 'static {}
