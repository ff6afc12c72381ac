//! Navigation provider interface.
//!
//! The host environment owns the navigation tree and the current URL
//! path; all reads go through this trait so hosts and tests can inject
//! their own source.

use std::sync::Arc;

use parking_lot::RwLock;

use super::NavigationTree;

/// Read access to the host's navigation data.
pub trait NavigationProvider: Send + Sync {
    /// Current navigation tree snapshot, or `None` when the host has
    /// not published one yet.
    fn tree(&self) -> Option<Arc<NavigationTree>>;

    /// Current document URL path (e.g. `/app/profile/edit`).
    fn current_path(&self) -> String;
}

/// Host-mutable navigation provider.
///
/// The host publishes a tree snapshot and updates the current path as
/// the page navigates; readers get cheap `Arc` clones of the snapshot.
///
/// Uses `parking_lot::RwLock` rather than `std::sync::RwLock` because
/// there is no poisoning: a panic in a writer won't permanently wedge
/// every reader.
#[derive(Default)]
pub struct StaticNavigation {
    inner: RwLock<StaticNavigationInner>,
}

#[derive(Default)]
struct StaticNavigationInner {
    tree: Option<Arc<NavigationTree>>,
    current_path: String,
}

impl StaticNavigation {
    /// Create a provider with no tree and an empty current path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new tree snapshot, replacing any previous one.
    pub fn set_tree(&self, tree: NavigationTree) {
        self.inner.write().tree = Some(Arc::new(tree));
    }

    /// Withdraw the tree (host not ready / tearing down).
    pub fn clear_tree(&self) {
        self.inner.write().tree = None;
    }

    /// Update the current document URL path.
    pub fn set_current_path(&self, path: impl Into<String>) {
        self.inner.write().current_path = path.into();
    }
}

impl NavigationProvider for StaticNavigation {
    fn tree(&self) -> Option<Arc<NavigationTree>> {
        self.inner.read().tree.clone()
    }

    fn current_path(&self) -> String {
        self.inner.read().current_path.clone()
    }
}
