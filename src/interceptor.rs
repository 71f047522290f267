//! Page request pipeline.
//!
//! The host page framework routes each request to a [`PageController`].
//! Before the controller runs, every registered [`PageRequestInterceptor`]
//! gets mutable access to the request's [`PageContext`]. The first
//! interceptor to fail aborts the request; the controller never runs.
//!
//! # Integration Flow
//!
//! ```text
//! Page request
//!   ↓
//! PagePipeline builds PageContext from the controller's tags
//!   ↓
//! Interceptors run in registration order (PageAccessGuard among them)
//!   ↓
//! Controller handles the request with currentApp already resolved
//! ```

use std::collections::HashMap;

use crate::classification::PageTags;
use crate::context::PageContext;
use crate::error::Violation;

/// A page controller: the handler a request is routed to.
pub trait PageController {
    /// Classification tags declared by this controller.
    ///
    /// Controllers without tags require a login and have no app scope.
    fn tags(&self) -> PageTags {
        PageTags::none()
    }

    /// Handles the request, returning the rendered view.
    fn handle(&self, ctx: &mut PageContext) -> Result<String, Violation>;
}

/// A hook invoked before a page controller handles a request.
pub trait PageRequestInterceptor {
    /// Called exactly once per request, before the controller.
    ///
    /// # Errors
    ///
    /// Any error aborts the request.
    fn before_handle_request(&self, ctx: &mut PageContext) -> Result<(), Violation>;
}

/// Ordered interceptors in front of page controllers.
///
/// # Examples
///
/// ```
/// use page_guard::{
///     InMemoryAppRegistry, PageAccessGuard, PageContext, PageController, PagePipeline,
///     PageTags, SessionAuth, Violation,
/// };
/// use std::collections::HashMap;
///
/// struct LoginPage;
///
/// impl PageController for LoginPage {
///     fn tags(&self) -> PageTags {
///         PageTags::none().public()
///     }
///
///     fn handle(&self, _ctx: &mut PageContext) -> Result<String, Violation> {
///         Ok("login".to_string())
///     }
/// }
///
/// let registry = InMemoryAppRegistry::new();
/// let auth = SessionAuth::anonymous();
///
/// let mut pipeline = PagePipeline::new();
/// pipeline.add_interceptor(PageAccessGuard::new(&auth, &registry));
///
/// let view = pipeline.handle("req-1", HashMap::new(), &LoginPage).unwrap();
/// assert_eq!(view, "login");
/// ```
#[derive(Default)]
pub struct PagePipeline<'a> {
    interceptors: Vec<Box<dyn PageRequestInterceptor + 'a>>,
}

impl<'a> PagePipeline<'a> {
    /// Creates a pipeline with no interceptors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interceptor; interceptors run in the order added.
    pub fn add_interceptor(&mut self, interceptor: impl PageRequestInterceptor + 'a) {
        self.interceptors.push(Box::new(interceptor));
    }

    /// Number of registered interceptors.
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Returns `true` if no interceptors are registered.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Runs every interceptor against `ctx`, stopping at the first failure.
    pub fn intercept(&self, ctx: &mut PageContext) -> Result<(), Violation> {
        for interceptor in &self.interceptors {
            interceptor.before_handle_request(ctx)?;
        }
        Ok(())
    }

    /// Handles one page request.
    ///
    /// Builds the request's context from the controller's tags and the
    /// inbound attributes, runs the interceptors, then the controller.
    ///
    /// # Errors
    ///
    /// Returns the first interceptor failure, or the controller's error.
    pub fn handle(
        &self,
        request_id: impl Into<String>,
        request_attributes: HashMap<String, String>,
        controller: &dyn PageController,
    ) -> Result<String, Violation> {
        let mut ctx = PageContext::new(request_id, controller.tags());
        for (key, value) in request_attributes {
            ctx.set_request_attribute(key, value);
        }

        self.intercept(&mut ctx)?;
        controller.handle(&mut ctx)
    }
}

impl std::fmt::Debug for PagePipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagePipeline")
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}
