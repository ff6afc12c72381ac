//! Apphub micro-app context library.
//!
//! Utilities for independently-deployed micro-applications sharing one
//! host page: identity resolution against the host navigation tree,
//! session-scoped state storage namespaced per app, and the cross-app
//! notification protocol.
//!
//! The host environment is injected, never read from ambient globals:
//! navigation data comes through [`nav::NavigationProvider`], session
//! storage through [`store::KeyValueStore`], and notifications go out
//! through [`notify::NotificationBus`]. [`AppContext`] wires the three
//! behind one cheaply-clonable handle.

pub mod config;
pub mod context;
pub mod error;
pub mod nav;
pub mod notify;
pub mod resolver;
pub mod store;

pub use config::ContextConfig;
pub use context::{AppContext, AppContextBuilder};
pub use error::ContextError;
