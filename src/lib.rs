//! Page access guard for UI page controllers.
//!
//! This crate decides, before a page controller runs, whether a page
//! request may proceed and which app it is scoped to:
//! - **Classification**: each controller is public, belongs to one app, is
//!   shared between apps, or is unclassified
//! - **Authentication**: every page except public ones requires a session
//! - **App authorization**: the resolved app's privilege must be held by
//!   the caller
//! - **Context enrichment**: the resolved app (or an explicit null) is
//!   written to the request under `currentApp`
//!
//! # Core Types
//!
//! - [`PageAccessGuard`]: The guard, also usable as a [`PageRequestInterceptor`]
//! - [`PageTags`] / [`PageClass`]: Controller classification
//! - [`PageContext`]: Per-request attributes and view model
//! - [`AuthState`]: Authentication and privilege oracle
//! - [`AppRegistry`]: App lookup by id
//!
//! # Examples
//!
//! ```
//! use page_guard::{
//!     AppDescriptor, InMemoryAppRegistry, PageAccessGuard, PageContext, PageTags, Principal,
//!     SessionAuth, ViolationKind,
//! };
//!
//! let mut registry = InMemoryAppRegistry::new();
//! registry.register(AppDescriptor::new("clinic", "App: clinic")).unwrap();
//! registry.register(AppDescriptor::new("registration", "App: registration")).unwrap();
//!
//! let auth = SessionAuth::new(Some(
//!     Principal::new("user-1", "Alice").with_privilege("App: clinic"),
//! ));
//! let guard = PageAccessGuard::new(&auth, &registry);
//!
//! // A page shared by two apps; the request names the app
//! let mut ctx = PageContext::new("req-1", PageTags::none().shared(["clinic", "registration"]));
//! ctx.set_app_id("clinic");
//! guard.authorize(&mut ctx).expect("clinic privilege held");
//!
//! // Same page, app the caller may not use
//! let mut ctx = PageContext::new("req-2", PageTags::none().shared(["clinic", "registration"]));
//! ctx.set_app_id("registration");
//! let err = guard.authorize(&mut ctx).unwrap_err();
//! assert_eq!(err.kind, ViolationKind::AccessDenied);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod auth;
mod classification;
pub mod config;
mod context;
mod error;
mod guard;
mod interceptor;
pub mod lifecycle;

pub use app::{AppDescriptor, AppRegistry, InMemoryAppRegistry};
pub use auth::{AuthState, Principal, SessionAuth};
pub use classification::{PageClass, PageTags};
pub use config::RegistryConfig;
pub use context::{Attribute, PageContext, APP_ID_ATTRIBUTE, CURRENT_APP_ATTRIBUTE};
pub use error::{Error, Violation, ViolationKind};
pub use guard::{set_request_app, PageAccessGuard};
pub use interceptor::{PageController, PagePipeline, PageRequestInterceptor};
