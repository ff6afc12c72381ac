//! Host navigation tree model and provider interface.
//!
//! The host page owns the navigation data; this module only reads it.
//! `NavigationTree` is the typed snapshot, `NavigationProvider` is the
//! injection seam through which the library sees the host's current
//! tree and URL path.

mod provider;
mod tree;

pub use provider::{NavigationProvider, StaticNavigation};
pub use tree::{NavItem, NavigationTree, Region, UserInfo};
