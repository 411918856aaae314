//! Notification service configuration
//!
//! [`ToastConfig`] is the immutable base configuration. Per-notification
//! changes travel in a [`ConfigOverride`] and are combined with
//! [`ToastConfig::merge`], which never touches the base.

use std::collections::BTreeMap;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::Deserialize;

use super::classes;
use super::severity::Severity;
use crate::style::StyleRuleTree;

/// Default delay before a notification starts fading, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Icon rendered inside notifications of one severity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct IconSpec {
    /// Tag name of the icon element
    #[cfg_attr(feature = "serde", serde(default = "default_icon_node"))]
    pub node_type: String,
    /// Classes of the icon wrapper
    pub class_str: String,
    /// Attributes set on the icon element
    #[cfg_attr(feature = "serde", serde(default))]
    pub attrs: BTreeMap<String, String>,
}

fn default_icon_node() -> String {
    "i".to_string()
}

impl IconSpec {
    /// Icon with the default `<i>` element
    pub fn new(class_str: impl Into<String>) -> Self {
        Self {
            node_type: default_icon_node(),
            class_str: class_str.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// Use a different element for the icon
    #[must_use]
    pub fn node_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = node_type.into();
        self
    }

    /// Add an attribute to the icon element
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Copy of this spec with the icon base class appended
    #[must_use]
    pub fn with_base_class(&self) -> Self {
        let mut spec = self.clone();
        if !spec
            .class_str
            .split_whitespace()
            .any(|class| class == classes::ICON)
        {
            if !spec.class_str.is_empty() {
                spec.class_str.push(' ');
            }
            spec.class_str.push_str(classes::ICON);
        }
        spec
    }
}

/// Icons keyed by severity
pub type IconRegistry = BTreeMap<Severity, IconSpec>;

/// Base configuration of a notification service
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ToastConfig {
    /// Severities that get severity styling and icons
    pub types: Vec<Severity>,
    /// Delay before the fade starts, in milliseconds
    #[cfg_attr(feature = "serde", serde(rename = "timeout"))]
    pub timeout_ms: u64,
    /// Icons per severity
    pub icons: IconRegistry,
    /// Style tree compiled into the injected stylesheet
    pub style: StyleRuleTree,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            types: Severity::ALL.to_vec(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            icons: IconRegistry::new(),
            style: default_style(),
        }
    }
}

impl ToastConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    ///
    /// # Errors
    ///
    /// Returns [`ToastError::Config`](crate::ToastError::Config) when the
    /// text is not valid JSON or a field has the wrong shape.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Delay before the fade starts
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Whether `severity` is enabled
    #[must_use]
    pub fn supports(&self, severity: Severity) -> bool {
        self.types.contains(&severity)
    }

    /// Effective configuration for one notification
    ///
    /// Fields set in `overrides` replace the base ones wholesale. The result
    /// borrows from both sides, so nothing is copied per dispatch.
    #[must_use]
    pub fn merge<'a>(&'a self, overrides: &'a ConfigOverride) -> MergedConfig<'a> {
        MergedConfig {
            types: overrides.types.as_deref().unwrap_or(&self.types),
            timeout_ms: overrides.timeout_ms.unwrap_or(self.timeout_ms),
            icons: overrides.icons.as_ref().unwrap_or(&self.icons),
        }
    }
}

/// Borrowed view of a base configuration with overrides applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedConfig<'a> {
    /// Enabled severities
    pub types: &'a [Severity],
    /// Delay before the fade starts, in milliseconds
    pub timeout_ms: u64,
    /// Icons per severity
    pub icons: &'a IconRegistry,
}

impl MergedConfig<'_> {
    /// Delay before the fade starts
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Whether `severity` is enabled
    #[must_use]
    pub fn supports(&self, severity: Severity) -> bool {
        self.types.contains(&severity)
    }
}

/// Per-notification configuration changes
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ConfigOverride {
    /// Replacement severity set
    pub types: Option<Vec<Severity>>,
    /// Replacement default timeout, in milliseconds
    #[cfg_attr(feature = "serde", serde(rename = "timeout"))]
    pub timeout_ms: Option<u64>,
    /// Replacement icon registry
    pub icons: Option<IconRegistry>,
}

impl ConfigOverride {
    /// Parse overrides from JSON
    ///
    /// # Errors
    ///
    /// Returns [`ToastError::Config`](crate::ToastError::Config) on malformed input.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override the default timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Override the icon registry
    #[must_use]
    pub fn icons(mut self, icons: IconRegistry) -> Self {
        self.icons = Some(icons);
        self
    }

    /// Override the enabled severities
    #[must_use]
    pub fn types(mut self, types: Vec<Severity>) -> Self {
        self.types = Some(types);
        self
    }
}

/// Stylesheet used when the configuration does not supply one
#[must_use]
pub fn default_style() -> StyleRuleTree {
    let notification = Severity::ALL
        .into_iter()
        .fold(
            StyleRuleTree::new()
                .property("cursor", "pointer")
                .property("padding", "12px 18px")
                .property("margin", "0 0 6px 0")
                .property("background-color", "#000")
                .property("opacity", 0.8)
                .property("color", "#fff")
                .property("border-radius", "3px")
                .property("box-shadow", "#3c3b3b 0 0 12px")
                .property("width", "300px"),
            |rules, severity| {
                rules.rule(
                    format!("&.{}", severity.class_name()),
                    StyleRuleTree::new().property("background-color", severity_color(severity)),
                )
            },
        )
        .rule(
            "&:hover",
            StyleRuleTree::new()
                .property("opacity", 1)
                .property("box-shadow", "#000 0 0 12px"),
        );

    StyleRuleTree::new()
        .rule(
            format!(".{}", classes::CONTAINER),
            StyleRuleTree::new()
                .property("position", "fixed")
                .property("z-index", 99999)
                .property("right", "12px")
                .property("top", "12px"),
        )
        .rule(format!(".{}", classes::NOTIFICATION), notification)
        .rule(
            format!(".{}", classes::TITLE),
            StyleRuleTree::new().property("font-weight", "500"),
        )
        .rule(
            format!(".{}", classes::MESSAGE),
            StyleRuleTree::new()
                .property("display", "inline-block")
                .property("vertical-align", "middle")
                .property("width", "240px")
                .property("padding", "0 12px"),
        )
}

const fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "#D5122B",
        Severity::Warn => "#F5AA1E",
        Severity::Success => "#7AC13E",
        Severity::Info => "#4196E1",
    }
}
