//! Micro-app identity resolution.
//!
//! Matches the current URL path against the host navigation tree to
//! find the owning app id. The scan walks the allow-listed regions in
//! tree order and their items in sequence order; the first item whose
//! registered path prefixes the current URL wins.

use std::sync::Arc;

use regex::Regex;
use tracing::{debug, warn};

use crate::nav::{NavigationProvider, NavigationTree};

/// Resolves the current micro-app's identity and paths.
pub struct AppResolver {
    nav: Arc<dyn NavigationProvider>,
    regions: Vec<String>,
}

impl AppResolver {
    /// Create a resolver over a navigation provider.
    ///
    /// `regions` is the allow-list of region names considered during
    /// resolution; filtering preserves tree order, not allow-list order.
    pub fn new(nav: Arc<dyn NavigationProvider>, regions: Vec<String>) -> Self {
        Self { nav, regions }
    }

    /// The id of the micro-app owning the current URL path.
    ///
    /// `None` when the host has not published a tree yet or no
    /// allow-listed item's path prefixes the current URL.
    pub fn current_app_id(&self) -> Option<String> {
        let tree = self.nav.tree()?;
        let cur_path = self.nav.current_path().to_lowercase();

        let id = first_matching_app(&tree, &self.regions, &cur_path);
        match &id {
            Some(id) => debug!(app = %id, path = %cur_path, "resolved current app"),
            None => debug!(path = %cur_path, "no app owns the current path"),
        }
        id
    }

    /// The URL path prefix for an app, or the context-path sentinel.
    ///
    /// When `app_id` is `None` the current app is resolved first. An id
    /// with no registered path yields the context path — a sentinel,
    /// not an error.
    pub fn path_for(&self, app_id: Option<&str>) -> String {
        let id = match app_id {
            Some(id) => Some(id.to_string()),
            None => self.current_app_id(),
        };

        if let (Some(tree), Some(id)) = (self.nav.tree(), id)
            && let Some(path) = tree.path_of(&id)
        {
            return path.to_string();
        }

        self.context_path()
    }

    /// Whether the app for `app_id` is reachable by the current user.
    ///
    /// An app whose own registered path happens to equal the context
    /// path is reported unavailable; the sentinel comparison cannot
    /// tell the two apart.
    pub fn is_app_available(&self, app_id: &str) -> bool {
        self.path_for(Some(app_id)) != self.context_path()
    }

    /// The current multi-tenant context path, empty when absent.
    pub fn context_path(&self) -> String {
        self.nav
            .tree()
            .and_then(|tree| tree.context_path().map(str::to_string))
            .unwrap_or_default()
    }

    /// The user's preferred locale key, empty when any part of the
    /// chain is absent.
    pub fn preferred_locale(&self) -> String {
        self.nav
            .tree()
            .and_then(|tree| tree.preferred_locale().map(str::to_string))
            .unwrap_or_default()
    }
}

/// First app in the allow-listed (region, item) sequence whose
/// registered path prefixes `cur_path`.
fn first_matching_app(tree: &NavigationTree, regions: &[String], cur_path: &str) -> Option<String> {
    tree.regions()
        .iter()
        .filter(|region| regions.iter().any(|name| *name == region.name))
        .flat_map(|region| region.items.iter())
        .find_map(|item| {
            let candidate = item.app_id();
            let prefix = tree.path_of(candidate)?;
            prefix_matches(prefix, cur_path).then(|| candidate.to_string())
        })
}

/// Anchored, case-insensitive prefix test requiring a `/` immediately
/// after the prefix.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    match Regex::new(&format!("(?i)^{}/", regex::escape(prefix))) {
        Ok(pattern) => pattern.is_match(path),
        Err(e) => {
            warn!(prefix = %prefix, error = %e, "unusable path prefix");
            false
        }
    }
}
