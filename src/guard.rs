use crate::{
    app::{AppDescriptor, AppRegistry},
    auth::AuthState,
    classification::PageClass,
    context::PageContext,
    error::Violation,
    interceptor::PageRequestInterceptor,
};

/// The page access guard.
///
/// Runs once per page request, before the page controller. It checks the
/// controller's classification, requires a session for non-public pages,
/// resolves the app the request is scoped to, checks the caller holds
/// that app's privilege, and records the resolved app in the context.
///
/// The guard holds no per-request state; one instance can serve
/// concurrent requests as long as its oracles can.
///
/// # Examples
///
/// ```
/// use page_guard::{
///     AppDescriptor, InMemoryAppRegistry, PageAccessGuard, PageContext, PageTags, Principal,
///     SessionAuth,
/// };
///
/// let mut registry = InMemoryAppRegistry::new();
/// registry.register(AppDescriptor::new("clinic", "App: clinic")).unwrap();
///
/// let auth = SessionAuth::new(Some(
///     Principal::new("user-1", "Alice").with_privilege("App: clinic"),
/// ));
///
/// let guard = PageAccessGuard::new(&auth, &registry);
/// let mut ctx = PageContext::new("req-123", PageTags::none().app("clinic"));
///
/// guard.authorize(&mut ctx).expect("caller may use the clinic app");
/// assert_eq!(ctx.current_app().unwrap().unwrap().id, "clinic");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PageAccessGuard<A, R> {
    auth: A,
    registry: R,
}

impl<A: AuthState, R: AppRegistry> PageAccessGuard<A, R> {
    /// Creates a guard over the given authentication oracle and app registry.
    pub fn new(auth: A, registry: R) -> Self {
        Self { auth, registry }
    }

    /// Authorizes a page request.
    ///
    /// On success the context carries `currentApp` in both its output
    /// attributes and its model, written as null when the page has no app.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the controller carries more than one tag, a
    ///   shared page has no `appId`, or the app id is not registered
    /// - `AuthenticationRequired` if the page is not public and the caller
    ///   has no session
    /// - `AccessDenied` if a shared page's allow-list excludes the `appId`
    ///   or the caller lacks the app's privilege
    pub fn authorize(&self, ctx: &mut PageContext) -> Result<(), Violation> {
        let request_id = ctx.request_id().to_string();
        let class = ctx
            .tags()
            .classify()
            .inspect_err(|v| deny(&request_id, v))?;

        // Start by checking if a login is required
        if class.requires_login() && !self.auth.is_authenticated() {
            let v = Violation::authentication_required("Login is required");
            deny(&request_id, &v);
            return Err(v);
        }

        let app_id = resolve_app_id(&class, ctx).inspect_err(|v| deny(&request_id, v))?;
        tracing::debug!(
            request_id = %request_id,
            class = ?class,
            app_id = ?app_id,
            "page classified"
        );

        self.set_request_app(ctx, app_id.as_deref())?;
        Ok(())
    }

    /// Resolves `app_id` and records it as the request's current app.
    ///
    /// See [`set_request_app`].
    pub fn set_request_app(
        &self,
        ctx: &mut PageContext,
        app_id: Option<&str>,
    ) -> Result<Option<AppDescriptor>, Violation> {
        set_request_app(&self.auth, &self.registry, ctx, app_id)
    }
}

impl<A: AuthState, R: AppRegistry> PageRequestInterceptor for PageAccessGuard<A, R> {
    fn before_handle_request(&self, ctx: &mut PageContext) -> Result<(), Violation> {
        self.authorize(ctx)
    }
}

/// Sets the app associated with a request.
///
/// Looks `app_id` up in the registry, checks the caller holds the app's
/// required privilege, and writes the app under `currentApp` into both the
/// output attributes and the model. A `None` app id skips the lookup and
/// writes an explicit null. Calling this twice with the same id leaves the
/// context in the same state.
///
/// Returns the resolved app.
///
/// # Errors
///
/// - `Configuration` if no app with `app_id` is registered
/// - `AccessDenied` if the caller lacks the app's required privilege
///
/// The context is left untouched on error.
///
/// # Examples
///
/// ```
/// use page_guard::{
///     set_request_app, AppDescriptor, InMemoryAppRegistry, PageContext, PageTags, SessionAuth,
///     Principal,
/// };
///
/// let mut registry = InMemoryAppRegistry::new();
/// registry.register(AppDescriptor::new("clinic", "App: clinic")).unwrap();
/// let auth = SessionAuth::new(Some(Principal::new("u1", "Alice").with_privilege("App: clinic")));
///
/// let mut ctx = PageContext::new("req-1", PageTags::none());
/// let app = set_request_app(&auth, &registry, &mut ctx, Some("clinic")).unwrap();
/// assert_eq!(app.unwrap().id, "clinic");
///
/// set_request_app(&auth, &registry, &mut ctx, None).unwrap();
/// assert_eq!(ctx.current_app(), Some(None));
/// ```
pub fn set_request_app(
    auth: &impl AuthState,
    registry: &impl AppRegistry,
    ctx: &mut PageContext,
    app_id: Option<&str>,
) -> Result<Option<AppDescriptor>, Violation> {
    let app = match app_id {
        Some(id) => {
            let app = registry.app_by_id(id).ok_or_else(|| {
                Violation::configuration(format!("No such app with appId {id}"))
            });
            let app = app.and_then(|app| {
                // Check logged in user has required privilege for this app
                if auth.has_privilege(app.required_privilege()) {
                    Ok(app)
                } else {
                    Err(Violation::access_denied(format!(
                        "Insufficient privileges for app {id}"
                    )))
                }
            });
            Some(app.inspect_err(|v| deny(ctx.request_id(), v))?)
        }
        None => None,
    };

    tracing::debug!(
        request_id = %ctx.request_id(),
        current_app = ?app.as_ref().map(|a| a.id.as_str()),
        "request app set"
    );

    // Written even when there is no app
    ctx.set_current_app(app.clone());
    Ok(app)
}

/// Picks the effective app id for a classified page.
fn resolve_app_id(class: &PageClass, ctx: &PageContext) -> Result<Option<String>, Violation> {
    match class {
        PageClass::AppScoped(app_id) => Ok(Some(app_id.clone())),
        PageClass::SharedScoped(allowed) => {
            let app_id = ctx.app_id().ok_or_else(|| {
                Violation::configuration(
                    "Shared page controller requires the appId request parameter",
                )
            })?;

            if !allowed.is_empty() && !allowed.contains(app_id) {
                return Err(Violation::access_denied(format!(
                    "Shared page accessed with invalid appId: {app_id}"
                )));
            }
            Ok(Some(app_id.to_string()))
        }
        PageClass::Public | PageClass::Unclassified => Ok(None),
    }
}

fn deny(request_id: &str, violation: &Violation) {
    tracing::warn!(
        request_id = %request_id,
        kind = %violation.kind,
        "page request refused: {}",
        violation.message
    );
}
