//! Per-call notification requests

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::config::ConfigOverride;
use super::severity::{Severity, SeverityTag};
use crate::animation::{Animation, Completion};
use crate::host::Host;

/// Everything needed to show one notification
///
/// Requests have no identity: the service renders them and forgets them.
///
/// ```rust
/// use std::time::Duration;
/// use toastr_core::{host::MemoryHost, NotificationRequest, Severity};
///
/// let request: NotificationRequest<MemoryHost> = NotificationRequest::new(Severity::Error)
///     .message("Connection lost")
///     .title("Network")
///     .timeout(Duration::from_secs(5));
/// assert_eq!(request.severity().severity(), Some(Severity::Error));
/// ```
pub struct NotificationRequest<H: Host> {
    pub(crate) message: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) severity: SeverityTag,
    pub(crate) timeout: Option<Duration>,
    pub(crate) on_complete: Option<Completion>,
    pub(crate) overrides: ConfigOverride,
    pub(crate) animation: Option<Rc<dyn Animation<H>>>,
    pub(crate) container: Option<H::Node>,
}

impl<H: Host> NotificationRequest<H> {
    /// Empty request of the given severity
    pub fn new(severity: impl Into<SeverityTag>) -> Self {
        Self {
            message: None,
            title: None,
            severity: severity.into(),
            timeout: None,
            on_complete: None,
            overrides: ConfigOverride::default(),
            animation: None,
            container: None,
        }
    }

    /// Body text
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Title text
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the severity
    #[must_use]
    pub fn severity_tag(mut self, severity: impl Into<SeverityTag>) -> Self {
        self.severity = severity.into();
        self
    }

    /// Delay before the fade starts, overriding every configured default
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Callback run once the notification has faded out and been removed
    #[must_use]
    pub fn on_complete(mut self, on_complete: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Configuration changes for this notification only
    #[must_use]
    pub fn overrides(mut self, overrides: ConfigOverride) -> Self {
        self.overrides = overrides;
        self
    }

    /// Animation for this notification only
    #[must_use]
    pub fn animation(mut self, animation: Rc<dyn Animation<H>>) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Mount this notification in a different container
    #[must_use]
    pub fn container(mut self, container: H::Node) -> Self {
        self.container = Some(container);
        self
    }

    /// Requested severity
    pub const fn severity(&self) -> &SeverityTag {
        &self.severity
    }
}

/// Plain messages are informational until a typed helper sets the severity
impl<H: Host> From<&str> for NotificationRequest<H> {
    fn from(message: &str) -> Self {
        Self::new(Severity::Info).message(message)
    }
}

impl<H: Host> From<String> for NotificationRequest<H> {
    fn from(message: String) -> Self {
        Self::new(Severity::Info).message(message)
    }
}

impl<H: Host> From<(Severity, &str)> for NotificationRequest<H> {
    fn from((severity, message): (Severity, &str)) -> Self {
        Self::new(severity).message(message)
    }
}

impl<H: Host> fmt::Debug for NotificationRequest<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationRequest")
            .field("message", &self.message)
            .field("title", &self.title)
            .field("severity", &self.severity)
            .field("timeout", &self.timeout)
            .field("on_complete", &self.on_complete.is_some())
            .field("overrides", &self.overrides)
            .field("animation", &self.animation.is_some())
            .field("container", &self.container.is_some())
            .finish()
    }
}
