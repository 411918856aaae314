//! Notification service: mounts the container and renders toasts.
//!
//! [`ToastService`] compiles the configured style tree once, injects it into
//! the document head and mounts a container. Each [`show_message`] call
//! renders one fragment at the top of the container and schedules the
//! configured [`Animation`] to take it out after the timeout.
//!
//! [`show_message`]: ToastService::show_message
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use toastr_core::{host::MemoryHost, ToastService};
//!
//! let host = Rc::new(MemoryHost::new());
//! let toasts = ToastService::builder(Rc::clone(&host)).init()?;
//!
//! toasts.error("Connection lost")?.info("Retrying")?;
//! assert_eq!(host.children(*toasts.container()).len(), 2);
//!
//! host.advance(Duration::from_secs(5));
//! assert!(host.children(*toasts.container()).is_empty());
//! # Ok::<(), toastr_core::ToastError>(())
//! ```

use std::rc::Rc;

use crate::animation::{Animation, FadeAnimator};
use crate::host::Host;
use crate::style::compile;
use crate::utils::{Result, ToastError};

pub mod classes;
pub mod config;
pub mod request;
pub mod severity;

pub use config::{
    default_style, ConfigOverride, IconRegistry, IconSpec, MergedConfig, ToastConfig,
};
pub use request::NotificationRequest;
pub use severity::{Severity, SeverityTag};

/// Options for mounting a [`ToastService`]
pub struct ToastServiceBuilder<H: Host> {
    host: Rc<H>,
    config: ToastConfig,
    append_target: Option<H::Node>,
    container: Option<H::Node>,
    animation: Option<Rc<dyn Animation<H>>>,
}

impl<H: Host> ToastServiceBuilder<H> {
    /// Replace the default configuration
    #[must_use]
    pub fn config(mut self, config: ToastConfig) -> Self {
        self.config = config;
        self
    }

    /// Mount the container under this node instead of the body
    #[must_use]
    pub fn append_target(mut self, target: H::Node) -> Self {
        self.append_target = Some(target);
        self
    }

    /// Use an existing element as the container
    #[must_use]
    pub fn container(mut self, container: H::Node) -> Self {
        self.container = Some(container);
        self
    }

    /// Replace the default fade animation
    #[must_use]
    pub fn animation(mut self, animation: Rc<dyn Animation<H>>) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Inject the stylesheet, mount the container and return the service
    ///
    /// # Errors
    ///
    /// - [`ToastError::AlreadyInitialized`] if a stylesheet from an earlier
    ///   service is still in the document
    /// - [`ToastError::Style`] if the style tree does not compile
    /// - [`ToastError::Host`] if the document rejects an operation
    pub fn init(self) -> Result<ToastService<H>> {
        let host = self.host;
        if host.element_by_id(classes::STYLESHEET_ID).is_some() {
            return Err(ToastError::AlreadyInitialized(
                classes::STYLESHEET_ID.to_string(),
            ));
        }

        let css = compile(&self.config.style)?;
        let stylesheet = inject_stylesheet(&*host, &css)?;

        let container = match self.container {
            Some(container) => container,
            None => host.create_element("div")?,
        };
        host.set_id(&container, classes::CONTAINER)?;
        host.set_class_name(&container, classes::CONTAINER)?;
        let target = match self.append_target {
            Some(target) => target,
            None => host.body()?,
        };
        host.append_child(&target, &container)?;

        log::debug!(
            "mounted toast container with {} bytes of css, severities {:?}",
            css.len(),
            self.config.types
        );

        Ok(ToastService {
            host,
            config: self.config,
            animation: self
                .animation
                .unwrap_or_else(|| Rc::new(FadeAnimator::new()) as Rc<dyn Animation<H>>),
            container,
            stylesheet,
        })
    }
}

fn inject_stylesheet<H: Host>(host: &H, css: &str) -> Result<H::Node> {
    let style = host.create_element("style")?;
    host.set_id(&style, classes::STYLESHEET_ID)?;
    host.set_attribute(&style, "type", "text/css")?;
    let text = host.create_text_node(css)?;
    host.append_child(&style, &text)?;
    host.append_child(&host.head()?, &style)?;
    Ok(style)
}

/// Mounted notification service
pub struct ToastService<H: Host> {
    host: Rc<H>,
    config: ToastConfig,
    animation: Rc<dyn Animation<H>>,
    container: H::Node,
    stylesheet: H::Node,
}

impl<H: Host> ToastService<H> {
    /// Start configuring a service on `host`
    pub fn builder(host: Rc<H>) -> ToastServiceBuilder<H> {
        ToastServiceBuilder {
            host,
            config: ToastConfig::default(),
            append_target: None,
            container: None,
            animation: None,
        }
    }

    /// Base configuration
    pub const fn config(&self) -> &ToastConfig {
        &self.config
    }

    /// Host the service renders into
    pub const fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// Container every notification is prepended to
    pub const fn container(&self) -> &H::Node {
        &self.container
    }

    /// Injected `<style>` element
    pub const fn stylesheet(&self) -> &H::Node {
        &self.stylesheet
    }

    /// Render a notification and schedule its removal
    ///
    /// The fragment is a `div` carrying the notification class and, for an
    /// enabled severity, its modifier class. It holds an optional title, an
    /// optional icon and an optional message, in that order. Clicking it
    /// starts the animation immediately. An unknown or disabled severity is
    /// logged and the notification is rendered without severity styling.
    ///
    /// # Errors
    ///
    /// Returns [`ToastError::Host`] if the document or timer service fails.
    pub fn show_message(&self, request: NotificationRequest<H>) -> Result<&Self> {
        let config = self.config.merge(&request.overrides);
        let severity = resolve_severity(&config, &request.severity);
        let host = &self.host;

        let notification = host.create_element("div")?;
        let class_name = severity.map_or_else(
            || classes::NOTIFICATION.to_string(),
            |severity| format!("{} {}", classes::NOTIFICATION, severity.class_name()),
        );
        host.set_class_name(&notification, &class_name)?;

        let animation = request
            .animation
            .unwrap_or_else(|| Rc::clone(&self.animation));
        // Handlers live inside the host, so they must not keep it alive
        let click_host = Rc::downgrade(host);
        let click_animation = Rc::clone(&animation);
        let click_node = notification.clone();
        host.on_click(
            &notification,
            Box::new(move || {
                if let Some(host) = click_host.upgrade() {
                    click_animation.animate(&host, click_node.clone(), None);
                }
            }),
        )?;

        if let Some(title) = request.title.as_deref().filter(|text| !text.is_empty()) {
            self.append_text(&notification, title, classes::TITLE)?;
        }
        if let Some(icon) = severity.and_then(|severity| config.icons.get(&severity)) {
            self.append_icon(&notification, &icon.with_base_class())?;
        }
        if let Some(message) = request.message.as_deref().filter(|text| !text.is_empty()) {
            self.append_text(&notification, message, classes::MESSAGE)?;
        }

        let container = request
            .container
            .unwrap_or_else(|| self.container.clone());
        host.prepend_child(&container, &notification)?;

        let delay = request.timeout.unwrap_or_else(|| config.timeout());
        let on_complete = request.on_complete;
        let task_host = Rc::downgrade(host);
        let task_node = notification.clone();
        let scheduled = host.schedule_after(
            delay,
            Box::new(move || {
                if let Some(host) = task_host.upgrade() {
                    animation.animate(&host, task_node, on_complete);
                }
            }),
        );
        if let Err(err) = scheduled {
            // Without a timer the notification would never leave
            host.detach(&notification)?;
            return Err(err);
        }

        log::debug!("showing {} notification for {delay:?}", request.severity);
        Ok(self)
    }

    /// Show a notification with the given severity
    ///
    /// # Errors
    ///
    /// See [`show_message`](Self::show_message).
    pub fn notify(
        &self,
        severity: Severity,
        request: impl Into<NotificationRequest<H>>,
    ) -> Result<&Self> {
        self.show_message(request.into().severity_tag(severity))
    }

    /// Show an error notification
    ///
    /// # Errors
    ///
    /// See [`show_message`](Self::show_message).
    pub fn error(&self, request: impl Into<NotificationRequest<H>>) -> Result<&Self> {
        self.notify(Severity::Error, request)
    }

    /// Show a warning notification
    ///
    /// # Errors
    ///
    /// See [`show_message`](Self::show_message).
    pub fn warn(&self, request: impl Into<NotificationRequest<H>>) -> Result<&Self> {
        self.notify(Severity::Warn, request)
    }

    /// Show a success notification
    ///
    /// # Errors
    ///
    /// See [`show_message`](Self::show_message).
    pub fn success(&self, request: impl Into<NotificationRequest<H>>) -> Result<&Self> {
        self.notify(Severity::Success, request)
    }

    /// Show an informational notification
    ///
    /// # Errors
    ///
    /// See [`show_message`](Self::show_message).
    pub fn info(&self, request: impl Into<NotificationRequest<H>>) -> Result<&Self> {
        self.notify(Severity::Info, request)
    }

    /// Register the icon for a severity
    ///
    /// The icon base class is appended to `spec.class_str`. Only
    /// notifications shown afterwards pick up the change.
    pub fn set_icon(&mut self, severity: Severity, spec: IconSpec) -> &mut Self {
        self.config.icons.insert(severity, spec.with_base_class());
        self
    }

    /// Remove the stylesheet and the container from the document
    ///
    /// Pending fades keep running on nodes that are no longer mounted. After
    /// this a new service can be initialized on the same host.
    ///
    /// # Errors
    ///
    /// Returns [`ToastError::Host`] if a node cannot be detached.
    pub fn unmount(self) -> Result<()> {
        self.host.detach(&self.stylesheet)?;
        self.host.detach(&self.container)?;
        log::debug!("unmounted toast container");
        Ok(())
    }

    fn append_text(&self, parent: &H::Node, text: &str, class_name: &str) -> Result<()> {
        let element = self.host.create_element("div")?;
        self.host.set_class_name(&element, class_name)?;
        let text = self.host.create_text_node(text)?;
        self.host.append_child(&element, &text)?;
        self.host.append_child(parent, &element)
    }

    fn append_icon(&self, parent: &H::Node, icon: &IconSpec) -> Result<()> {
        let wrapper = self.host.create_element("div")?;
        self.host.set_class_name(&wrapper, &icon.class_str)?;
        let glyph = self.host.create_element(&icon.node_type)?;
        for (name, value) in &icon.attrs {
            self.host.set_attribute(&glyph, name, value)?;
        }
        self.host.append_child(&wrapper, &glyph)?;
        self.host.append_child(parent, &wrapper)
    }
}

fn resolve_severity(config: &MergedConfig<'_>, tag: &SeverityTag) -> Option<Severity> {
    match tag.severity() {
        Some(severity) if config.supports(severity) => Some(severity),
        _ => {
            let err = ToastError::UnknownSeverity(tag.to_string());
            log::warn!("{err}, rendering without severity styling");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Document, MemoryHost};

    #[test]
    fn disabled_severity_resolves_to_none() {
        let base = ToastConfig {
            types: vec![Severity::Error],
            ..ToastConfig::default()
        };
        let overrides = ConfigOverride::default();
        let config = base.merge(&overrides);
        assert_eq!(
            resolve_severity(&config, &Severity::Error.into()),
            Some(Severity::Error)
        );
        assert_eq!(resolve_severity(&config, &Severity::Info.into()), None);
        assert_eq!(resolve_severity(&config, &"fatal".into()), None);
    }

    #[test]
    fn stylesheet_is_tagged() {
        let host = Rc::new(MemoryHost::new());
        let service = ToastService::builder(Rc::clone(&host)).init().unwrap();

        let sheet = *service.stylesheet();
        assert_eq!(host.parent(sheet), Some(host.head().unwrap()));
        assert_eq!(host.attribute(sheet, "type").as_deref(), Some("text/css"));
        assert!(host.text_content(sheet).starts_with(".mini-toastr {"));
    }
}
