//! Authentication state of the caller.
//!
//! The guard never authenticates anyone itself. It asks an [`AuthState`]
//! whether the current caller has a session and which privileges the
//! caller holds.

use std::collections::BTreeSet;

/// An authenticated user and the privileges granted to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Unique identifier for this principal
    pub id: String,
    /// Display name
    pub name: String,
    /// Names of granted privileges
    pub privileges: BTreeSet<String>,
}

impl Principal {
    /// Creates a principal with no privileges.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            privileges: BTreeSet::new(),
        }
    }

    /// Grants a privilege.
    pub fn with_privilege(mut self, privilege: impl Into<String>) -> Self {
        self.privileges.insert(privilege.into());
        self
    }
}

/// Authentication and privilege oracle scoped to the current caller.
pub trait AuthState {
    /// Whether the caller has a valid session.
    fn is_authenticated(&self) -> bool;

    /// Whether the caller holds the named privilege.
    ///
    /// Unauthenticated callers hold no privileges.
    fn has_privilege(&self, privilege: &str) -> bool;
}

impl<A: AuthState + ?Sized> AuthState for &A {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }

    fn has_privilege(&self, privilege: &str) -> bool {
        (**self).has_privilege(privilege)
    }
}

/// [`AuthState`] backed by an optional session principal.
///
/// # Examples
///
/// ```
/// use page_guard::{AuthState, Principal, SessionAuth};
///
/// let anonymous = SessionAuth::anonymous();
/// assert!(!anonymous.is_authenticated());
///
/// let session = SessionAuth::new(Some(
///     Principal::new("user-1", "Alice").with_privilege("App: clinic"),
/// ));
/// assert!(session.is_authenticated());
/// assert!(session.has_privilege("App: clinic"));
/// assert!(!session.has_privilege("App: admin"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionAuth {
    principal: Option<Principal>,
    superuser: bool,
}

impl SessionAuth {
    /// Creates the auth state for a session, authenticated iff a principal is present.
    pub fn new(principal: Option<Principal>) -> Self {
        Self {
            principal,
            superuser: false,
        }
    }

    /// Auth state with no session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Marks the principal as a superuser who holds every privilege.
    ///
    /// Has no effect on an anonymous session.
    pub fn as_superuser(mut self) -> Self {
        self.superuser = true;
        self
    }

    /// Returns the session principal, if any.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

impl AuthState for SessionAuth {
    fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    fn has_privilege(&self, privilege: &str) -> bool {
        match &self.principal {
            Some(_) if self.superuser => true,
            Some(p) => p.privileges.contains(privilege),
            None => false,
        }
    }
}
