//! Notification severities

use std::fmt;
use std::str::FromStr;

use crate::utils::ToastError;

/// Closed set of notification severities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Failure the user should notice
    Error,
    /// Something worth a second look
    Warn,
    /// Completed action
    Success,
    /// Neutral information
    Info,
}

impl Severity {
    /// Every severity, in declaration order
    pub const ALL: [Self; 4] = [Self::Error, Self::Warn, Self::Success, Self::Info];

    /// Tag used in configuration and by the JavaScript API
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Success => "success",
            Self::Info => "info",
        }
    }

    /// Modifier class added to the notification root
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Error => "-error",
            Self::Warn => "-warn",
            Self::Success => "-success",
            Self::Info => "-info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Severity {
    type Err = ToastError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.tag() == tag)
            .ok_or_else(|| ToastError::UnknownSeverity(tag.to_string()))
    }
}

/// Severity as requested by a caller, which may not name a known severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeverityTag {
    /// One of the closed set
    Known(Severity),
    /// Anything else; rendered without severity styling
    Unknown(String),
}

impl SeverityTag {
    /// Known severity, if any
    #[must_use]
    pub const fn severity(&self) -> Option<Severity> {
        match self {
            Self::Known(severity) => Some(*severity),
            Self::Unknown(_) => None,
        }
    }
}

impl fmt::Display for SeverityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(severity) => fmt::Display::fmt(severity, f),
            Self::Unknown(tag) => f.write_str(tag),
        }
    }
}

impl From<Severity> for SeverityTag {
    fn from(severity: Severity) -> Self {
        Self::Known(severity)
    }
}

impl From<&str> for SeverityTag {
    fn from(tag: &str) -> Self {
        tag.parse()
            .map_or_else(|_| Self::Unknown(tag.to_string()), Self::Known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for severity in Severity::ALL {
            assert_eq!(severity.tag().parse::<Severity>(), Ok(severity));
            assert_eq!(severity.class_name(), format!("-{severity}"));
        }
    }

    #[test]
    fn unknown_tag_is_kept() {
        let tag = SeverityTag::from("fatal");
        assert_eq!(tag, SeverityTag::Unknown("fatal".to_string()));
        assert_eq!(tag.severity(), None);
        assert_eq!(SeverityTag::from("warn").severity(), Some(Severity::Warn));
    }
}
