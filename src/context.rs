use std::collections::HashMap;

use crate::app::AppDescriptor;
use crate::classification::PageTags;

/// Request attribute carrying the app id for shared pages.
pub const APP_ID_ATTRIBUTE: &str = "appId";

/// Output attribute and model key holding the resolved app.
pub const CURRENT_APP_ATTRIBUTE: &str = "currentApp";

/// A value written to the request's output attributes or view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// Explicitly empty
    Null,
    /// Plain text
    Text(String),
    /// A resolved app
    App(AppDescriptor),
}

impl From<Option<AppDescriptor>> for Attribute {
    fn from(app: Option<AppDescriptor>) -> Self {
        app.map_or(Attribute::Null, Attribute::App)
    }
}

/// Per-request page context.
///
/// Owned by the request pipeline for the lifetime of one request. Carries
/// the target controller's classification tags, the inbound request
/// attributes, and the output request attributes and view model that
/// interceptors and the controller write into.
///
/// # Examples
///
/// ```
/// use page_guard::{PageContext, PageTags};
///
/// let mut ctx = PageContext::new("req-1", PageTags::none().shared(["clinic"]));
/// ctx.set_app_id("clinic");
///
/// assert_eq!(ctx.app_id(), Some("clinic"));
/// // Guard has not run yet
/// assert!(ctx.current_app().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PageContext {
    request_id: String,
    tags: PageTags,
    request_attributes: HashMap<String, String>,
    attributes: HashMap<String, Attribute>,
    model: HashMap<String, Attribute>,
}

impl PageContext {
    /// Creates a context for a request to a controller with the given tags.
    pub fn new(request_id: impl Into<String>, tags: impl Into<PageTags>) -> Self {
        Self {
            request_id: request_id.into(),
            tags: tags.into(),
            request_attributes: HashMap::new(),
            attributes: HashMap::new(),
            model: HashMap::new(),
        }
    }

    /// Returns the request ID for this context.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Classification tags of the target controller.
    pub fn tags(&self) -> &PageTags {
        &self.tags
    }

    /// Sets an inbound request attribute.
    pub fn set_request_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.request_attributes.insert(key.into(), value.into());
    }

    /// Returns an inbound request attribute.
    pub fn request_attribute(&self, key: &str) -> Option<&str> {
        self.request_attributes.get(key).map(String::as_str)
    }

    /// Sets the inbound `appId` attribute.
    pub fn set_app_id(&mut self, app_id: impl Into<String>) {
        self.set_request_attribute(APP_ID_ATTRIBUTE, app_id);
    }

    /// Inbound `appId` attribute, if supplied.
    pub fn app_id(&self) -> Option<&str> {
        self.request_attribute(APP_ID_ATTRIBUTE)
    }

    /// Writes an output request attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Attribute>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Returns an output request attribute.
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    /// Adds a view model entry.
    pub fn add_model_attribute(&mut self, key: impl Into<String>, value: impl Into<Attribute>) {
        self.model.insert(key.into(), value.into());
    }

    /// Returns a view model entry.
    pub fn model_attribute(&self, key: &str) -> Option<&Attribute> {
        self.model.get(key)
    }

    /// The full view model.
    pub fn model(&self) -> &HashMap<String, Attribute> {
        &self.model
    }

    /// Writes the resolved app into both the output attributes and the
    /// model under `currentApp`. An absent app is written as
    /// [`Attribute::Null`], never omitted.
    pub(crate) fn set_current_app(&mut self, app: Option<AppDescriptor>) {
        let value = Attribute::from(app);
        self.model
            .insert(CURRENT_APP_ATTRIBUTE.to_string(), value.clone());
        self.attributes
            .insert(CURRENT_APP_ATTRIBUTE.to_string(), value);
    }

    /// The app resolved for this request.
    ///
    /// - `None`: no app has been resolved yet (guard has not run)
    /// - `Some(None)`: resolved, the request has no app
    /// - `Some(Some(app))`: resolved to `app`
    pub fn current_app(&self) -> Option<Option<&AppDescriptor>> {
        match self.attributes.get(CURRENT_APP_ATTRIBUTE)? {
            Attribute::App(app) => Some(Some(app)),
            _ => Some(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::PageClass;

    #[test]
    fn new_context_is_empty() {
        let ctx = PageContext::new("req-123", PageClass::Public);
        assert_eq!(ctx.request_id(), "req-123");
        assert_eq!(ctx.tags(), &PageTags::none().public());
        assert!(ctx.app_id().is_none());
        assert!(ctx.model().is_empty());
        assert!(ctx.current_app().is_none());
    }

    #[test]
    fn request_attributes_roundtrip() {
        let mut ctx = PageContext::new("req-1", PageTags::none());
        ctx.set_request_attribute("patientId", "42");
        ctx.set_app_id("clinic");

        assert_eq!(ctx.request_attribute("patientId"), Some("42"));
        assert_eq!(ctx.request_attribute(APP_ID_ATTRIBUTE), Some("clinic"));
        assert_eq!(ctx.app_id(), Some("clinic"));
    }

    #[test]
    fn absent_current_app_is_written_as_null() {
        let mut ctx = PageContext::new("req-1", PageTags::none());
        ctx.set_current_app(None);

        assert_eq!(ctx.attribute(CURRENT_APP_ATTRIBUTE), Some(&Attribute::Null));
        assert_eq!(
            ctx.model_attribute(CURRENT_APP_ATTRIBUTE),
            Some(&Attribute::Null)
        );
        assert_eq!(ctx.current_app(), Some(None));
    }

    #[test]
    fn resolved_current_app_is_written_to_both_maps() {
        let mut ctx = PageContext::new("req-1", PageTags::none().app("clinic"));
        let app = AppDescriptor::new("clinic", "App: clinic");
        ctx.set_current_app(Some(app.clone()));

        assert_eq!(
            ctx.attribute(CURRENT_APP_ATTRIBUTE),
            Some(&Attribute::App(app.clone()))
        );
        assert_eq!(
            ctx.model_attribute(CURRENT_APP_ATTRIBUTE),
            Some(&Attribute::App(app.clone()))
        );
        assert_eq!(ctx.current_app(), Some(Some(&app)));
    }

    #[test]
    fn output_attributes_are_independent_of_model() {
        let mut ctx = PageContext::new("req-1", PageTags::none());
        ctx.set_attribute("title", Attribute::Text("Home".into()));

        assert!(ctx.attribute("title").is_some());
        assert!(ctx.model_attribute("title").is_none());

        ctx.add_model_attribute("title", Attribute::Text("Model".into()));
        assert_eq!(
            ctx.model_attribute("title"),
            Some(&Attribute::Text("Model".into()))
        );
    }
}
