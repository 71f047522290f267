//! Apps and the registry that resolves them.
//!
//! An app is a named functional area of the host application. Each app is
//! gated by exactly one privilege. The guard only ever looks apps up; it
//! never creates or changes them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Violation;

/// A registered app, identified by its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    /// Unique app id, e.g. `"kenyaemr.medicalEncounter"`
    pub id: String,
    /// Display label
    #[serde(default)]
    pub label: String,
    /// Landing page of the app, if it has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Privilege a principal must hold to use this app
    pub required_privilege: String,
}

impl AppDescriptor {
    /// Creates a descriptor whose label is its id.
    pub fn new(id: impl Into<String>, required_privilege: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            url: None,
            required_privilege: required_privilege.into(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the landing page url.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Returns the privilege required to use this app.
    pub fn required_privilege(&self) -> &str {
        &self.required_privilege
    }
}

/// Keyed lookup of apps by id.
///
/// Implementations must be safe to share across concurrent requests; the
/// guard only reads from them.
pub trait AppRegistry {
    /// Returns the app with the given id, if registered.
    fn app_by_id(&self, app_id: &str) -> Option<AppDescriptor>;
}

impl<R: AppRegistry + ?Sized> AppRegistry for &R {
    fn app_by_id(&self, app_id: &str) -> Option<AppDescriptor> {
        (**self).app_by_id(app_id)
    }
}

/// A fixed set of apps held in memory.
///
/// # Examples
///
/// ```
/// use page_guard::{AppDescriptor, AppRegistry, InMemoryAppRegistry};
///
/// let mut registry = InMemoryAppRegistry::new();
/// registry
///     .register(AppDescriptor::new("clinic", "App: clinic"))
///     .expect("first registration");
///
/// assert!(registry.app_by_id("clinic").is_some());
/// assert!(registry.app_by_id("billing").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryAppRegistry {
    apps: HashMap<String, AppDescriptor>,
}

impl InMemoryAppRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an app.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` violation if an app with the same id is
    /// already registered.
    pub fn register(&mut self, app: AppDescriptor) -> Result<(), Violation> {
        if self.apps.contains_key(&app.id) {
            return Err(Violation::configuration(format!(
                "Duplicate app with appId {}",
                app.id
            )));
        }
        self.apps.insert(app.id.clone(), app);
        Ok(())
    }

    /// Number of registered apps.
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Returns `true` if no apps are registered.
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Iterates over registered app ids in no particular order.
    pub fn app_ids(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }
}

impl AppRegistry for InMemoryAppRegistry {
    fn app_by_id(&self, app_id: &str) -> Option<AppDescriptor> {
        self.apps.get(app_id).cloned()
    }
}
