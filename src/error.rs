use std::fmt;

/// Errors that can occur in the page-guard crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A page request was refused
    #[error("Page access violation: {0}")]
    Violation(#[from] Violation),
    /// The app catalogue could not be parsed
    #[error("Invalid app catalogue: {0}")]
    Catalogue(#[from] serde_json::Error),
}

/// A refused page request with details about what failed.
///
/// Every violation is terminal for the request that produced it. The host
/// framework decides which response status it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The kind of violation that occurred
    pub kind: ViolationKind,
    /// Human-readable message explaining the violation
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a [`ViolationKind::Configuration`] violation.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Configuration, message)
    }

    /// Shorthand for a [`ViolationKind::AuthenticationRequired`] violation.
    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::AuthenticationRequired, message)
    }

    /// Shorthand for a [`ViolationKind::AccessDenied`] violation.
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::AccessDenied, message)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Violation {}

/// The kind of page access violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Handler metadata is contradictory, a shared page is missing its
    /// `appId`, or an app id does not exist. An authoring bug, not
    /// something the caller can fix.
    Configuration,
    /// The caller has no session and the page is not public
    AuthenticationRequired,
    /// The caller is authenticated but may not use the resolved app
    AccessDenied,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Configuration => write!(f, "Configuration error"),
            ViolationKind::AuthenticationRequired => write!(f, "Authentication required"),
            ViolationKind::AccessDenied => write!(f, "Access denied"),
        }
    }
}
