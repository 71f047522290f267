use page_guard::{
    set_request_app, AppDescriptor, AppRegistry, Attribute, AuthState, InMemoryAppRegistry,
    PageAccessGuard, PageContext, PageTags, Principal, SessionAuth, ViolationKind,
    CURRENT_APP_ATTRIBUTE,
};
use std::cell::Cell;

fn registry() -> InMemoryAppRegistry {
    let mut registry = InMemoryAppRegistry::new();
    for id in ["clinic", "registration", "billing"] {
        registry
            .register(AppDescriptor::new(id, format!("App: {id}")))
            .unwrap();
    }
    registry
}

fn user_with(privileges: &[&str]) -> SessionAuth {
    let principal = privileges
        .iter()
        .fold(Principal::new("user-1", "Alice"), |p, priv_name| {
            p.with_privilege(*priv_name)
        });
    SessionAuth::new(Some(principal))
}

/// Auth oracle that records whether privileges were consulted.
struct SpyAuth {
    authenticated: bool,
    privilege_checks: Cell<usize>,
}

impl AuthState for SpyAuth {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn has_privilege(&self, _privilege: &str) -> bool {
        self.privilege_checks.set(self.privilege_checks.get() + 1);
        true
    }
}

struct SpyRegistry {
    lookups: Cell<usize>,
}

impl AppRegistry for SpyRegistry {
    fn app_by_id(&self, app_id: &str) -> Option<AppDescriptor> {
        self.lookups.set(self.lookups.get() + 1);
        Some(AppDescriptor::new(app_id, "any"))
    }
}

#[test]
fn contradictory_tags_fail_regardless_of_session() {
    let registry = registry();
    let sessions = [SessionAuth::anonymous(), user_with(&["App: clinic"])];
    let tag_sets = [
        PageTags::none().public().app("clinic"),
        PageTags::none().public().shared(["clinic"]),
        PageTags::none().app("clinic").shared(Vec::<String>::new()),
    ];

    for auth in &sessions {
        let guard = PageAccessGuard::new(auth, &registry);
        for tags in &tag_sets {
            let mut ctx = PageContext::new("req-multi", tags.clone());
            let err = guard.authorize(&mut ctx).unwrap_err();
            assert_eq!(err.kind, ViolationKind::Configuration);
        }
    }
}

#[test]
fn unauthenticated_fails_before_any_app_resolution() {
    let auth = SpyAuth {
        authenticated: false,
        privilege_checks: Cell::new(0),
    };
    let registry = SpyRegistry {
        lookups: Cell::new(0),
    };
    let guard = PageAccessGuard::new(&auth, &registry);

    let tag_sets = [
        PageTags::none(),
        PageTags::none().app("clinic"),
        PageTags::none().shared(["clinic"]),
    ];
    for tags in tag_sets {
        let mut ctx = PageContext::new("req-anon", tags);
        ctx.set_app_id("clinic");

        let err = guard.authorize(&mut ctx).unwrap_err();
        assert_eq!(err.kind, ViolationKind::AuthenticationRequired);
        assert!(ctx.current_app().is_none());
    }

    assert_eq!(registry.lookups.get(), 0);
    assert_eq!(auth.privilege_checks.get(), 0);
}

#[test]
fn public_page_succeeds_with_and_without_session() {
    let registry = registry();
    for auth in [SessionAuth::anonymous(), user_with(&[])] {
        let guard = PageAccessGuard::new(&auth, &registry);
        let mut ctx = PageContext::new("req-public", PageTags::none().public());

        guard.authorize(&mut ctx).unwrap();
        assert_eq!(ctx.attribute(CURRENT_APP_ATTRIBUTE), Some(&Attribute::Null));
        assert_eq!(
            ctx.model_attribute(CURRENT_APP_ATTRIBUTE),
            Some(&Attribute::Null)
        );
    }
}

#[test]
fn app_page_checks_privilege() {
    let registry = registry();

    let allowed = user_with(&["App: clinic"]);
    let guard = PageAccessGuard::new(&allowed, &registry);
    let mut ctx = PageContext::new("req-app", PageTags::none().app("clinic"));
    guard.authorize(&mut ctx).unwrap();
    assert_eq!(
        ctx.current_app(),
        Some(Some(&AppDescriptor::new("clinic", "App: clinic")))
    );

    let denied = user_with(&["App: registration"]);
    let guard = PageAccessGuard::new(&denied, &registry);
    let mut ctx = PageContext::new("req-app", PageTags::none().app("clinic"));
    let err = guard.authorize(&mut ctx).unwrap_err();
    assert_eq!(err.kind, ViolationKind::AccessDenied);
}

#[test]
fn shared_page_outcomes() {
    let registry = registry();
    let auth = user_with(&["App: clinic"]);
    let guard = PageAccessGuard::new(&auth, &registry);
    let tags = PageTags::none().shared(["clinic", "registration"]);

    let mut ctx = PageContext::new("req-shared", tags.clone());
    ctx.set_app_id("billing");
    assert_eq!(
        guard.authorize(&mut ctx).unwrap_err().kind,
        ViolationKind::AccessDenied
    );

    let mut ctx = PageContext::new("req-shared", tags.clone());
    assert_eq!(
        guard.authorize(&mut ctx).unwrap_err().kind,
        ViolationKind::Configuration
    );

    let mut ctx = PageContext::new("req-shared", tags);
    ctx.set_app_id("clinic");
    guard.authorize(&mut ctx).unwrap();
    assert_eq!(ctx.current_app().unwrap().unwrap().id, "clinic");
}

#[test]
fn shared_page_empty_allow_list_means_unrestricted() {
    let registry = registry();
    let auth = user_with(&["App: billing"]);
    let guard = PageAccessGuard::new(&auth, &registry);

    let mut ctx = PageContext::new("req-open", PageTags::none().shared(Vec::<String>::new()));
    ctx.set_app_id("billing");
    guard.authorize(&mut ctx).unwrap();
    assert_eq!(ctx.current_app().unwrap().unwrap().id, "billing");

    // Unknown apps are still rejected
    let mut ctx = PageContext::new("req-open", PageTags::none().shared(Vec::<String>::new()));
    ctx.set_app_id("pharmacy");
    assert_eq!(
        guard.authorize(&mut ctx).unwrap_err().kind,
        ViolationKind::Configuration
    );
}

#[test]
fn set_request_app_twice_gives_same_state() {
    let registry = registry();
    let auth = user_with(&["App: clinic"]);

    for app_id in [Some("clinic"), None] {
        let mut ctx = PageContext::new("req-idem", PageTags::none());
        set_request_app(&auth, &registry, &mut ctx, app_id).unwrap();
        let attribute = ctx.attribute(CURRENT_APP_ATTRIBUTE).cloned();
        let model = ctx.model().clone();

        set_request_app(&auth, &registry, &mut ctx, app_id).unwrap();
        assert_eq!(ctx.attribute(CURRENT_APP_ATTRIBUTE).cloned(), attribute);
        assert_eq!(ctx.model(), &model);
    }
}
