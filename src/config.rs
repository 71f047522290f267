//! App catalogue configuration.
//!
//! The catalogue is a JSON document listing the apps the host application
//! provides:
//!
//! ```json
//! {
//!   "apps": [
//!     { "id": "clinic", "label": "Clinician", "url": "clinician/home.page",
//!       "requiredPrivilege": "App: clinic" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::app::{AppDescriptor, InMemoryAppRegistry};
use crate::error::Error;

/// Parsed app catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Apps in declaration order
    #[serde(default)]
    pub apps: Vec<AppDescriptor>,
}

impl RegistryConfig {
    /// Parses a catalogue from JSON.
    ///
    /// Apps without a label get their id as label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalogue`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let mut config: RegistryConfig = serde_json::from_str(json)?;
        for app in &mut config.apps {
            if app.label.is_empty() {
                app.label = app.id.clone();
            }
        }
        Ok(config)
    }

    /// Builds a registry holding every app in the catalogue.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` violation if two apps share an id.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_guard::{AppRegistry, RegistryConfig};
    ///
    /// let registry = RegistryConfig::from_json_str(
    ///     r#"{"apps": [{"id": "clinic", "requiredPrivilege": "App: clinic"}]}"#,
    /// )
    /// .and_then(|config| config.into_registry())
    /// .expect("valid catalogue");
    ///
    /// assert_eq!(registry.app_by_id("clinic").unwrap().label, "clinic");
    /// ```
    pub fn into_registry(self) -> Result<InMemoryAppRegistry, Error> {
        let mut registry = InMemoryAppRegistry::new();
        for app in self.apps {
            registry.register(app)?;
        }
        tracing::info!(apps = registry.len(), "app registry loaded");
        Ok(registry)
    }
}
