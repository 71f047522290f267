//! Page classification metadata.
//!
//! A page controller declares its access policy with at most one of three
//! tags: public, app-scoped (fixed app id) or shared (app id supplied by
//! the request, optionally restricted to an allow-list). [`PageTags`] is
//! the raw declaration and may be contradictory; [`PageClass`] is the
//! validated form the guard works with.

use std::collections::BTreeSet;

use crate::error::Violation;

/// The validated access policy of a page controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageClass {
    /// Anyone may view the page, with or without a session
    Public,
    /// The page belongs to one fixed app
    AppScoped(String),
    /// The page is shared between apps; the request names the app.
    /// An empty allow-list means any app.
    SharedScoped(BTreeSet<String>),
    /// No tag: login required, no app scope
    #[default]
    Unclassified,
}

impl PageClass {
    /// Creates a shared classification from an allow-list.
    pub fn shared<I, S>(allowed_app_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PageClass::SharedScoped(allowed_app_ids.into_iter().map(Into::into).collect())
    }

    /// Whether callers need a session to view the page.
    pub fn requires_login(&self) -> bool {
        !matches!(self, PageClass::Public)
    }
}

/// Classification tags as declared on a page controller.
///
/// Mirrors the three independent declarations a controller can carry.
/// More than one tag is a configuration error detected by
/// [`PageTags::classify`].
///
/// # Examples
///
/// ```
/// use page_guard::{PageClass, PageTags, ViolationKind};
///
/// let tags = PageTags::none().app("clinic");
/// assert_eq!(tags.classify().unwrap(), PageClass::AppScoped("clinic".into()));
///
/// let broken = PageTags::none().public().app("clinic");
/// assert_eq!(broken.classify().unwrap_err().kind, ViolationKind::Configuration);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageTags {
    public: bool,
    app: Option<String>,
    shared: Option<Vec<String>>,
}

impl PageTags {
    /// No tags.
    pub fn none() -> Self {
        Self::default()
    }

    /// Adds the public tag.
    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }

    /// Adds the app tag with a fixed app id.
    pub fn app(mut self, app_id: impl Into<String>) -> Self {
        self.app = Some(app_id.into());
        self
    }

    /// Adds the shared tag with an allow-list (empty allows any app).
    pub fn shared<I, S>(mut self, allowed_app_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shared = Some(allowed_app_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Number of tags present.
    pub fn count(&self) -> usize {
        usize::from(self.public) + usize::from(self.app.is_some()) + usize::from(self.shared.is_some())
    }

    /// Validates the tags into a [`PageClass`].
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` violation if more than one tag is present.
    pub fn classify(&self) -> Result<PageClass, Violation> {
        if self.count() > 1 {
            return Err(Violation::configuration(
                "Page controller should have only one of the public, app and shared page tags",
            ));
        }

        let class = if self.public {
            PageClass::Public
        } else if let Some(app_id) = &self.app {
            PageClass::AppScoped(app_id.clone())
        } else if let Some(allowed) = &self.shared {
            PageClass::shared(allowed.iter().cloned())
        } else {
            PageClass::Unclassified
        };
        Ok(class)
    }
}

impl From<PageClass> for PageTags {
    fn from(class: PageClass) -> Self {
        match class {
            PageClass::Public => PageTags::none().public(),
            PageClass::AppScoped(app_id) => PageTags::none().app(app_id),
            PageClass::SharedScoped(allowed) => PageTags::none().shared(allowed),
            PageClass::Unclassified => PageTags::none(),
        }
    }
}
