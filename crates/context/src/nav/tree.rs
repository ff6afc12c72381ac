//! Navigation tree snapshot supplied by the host page.
//!
//! The host exposes one object holding named regions (`{items: [{id}]}`
//! shaped), a flat `paths` map from app id to URL path prefix, an
//! optional multi-tenant `contextPath`, and optional user info. Region
//! order is meaningful: identity resolution scans regions in the order
//! the host object enumerates them, so construction preserves the JSON
//! object's key order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::ContextError;

/// A single navigation entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    /// Dotted identifier; everything before the last `.` names the
    /// owning micro-app.
    pub id: String,
}

impl NavItem {
    /// The owning app id: the portion of `id` before the last `.`.
    ///
    /// A dot-free id is its own app id.
    pub fn app_id(&self) -> &str {
        match self.id.rfind('.') {
            Some(idx) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// A named region of the navigation tree with its ordered items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Region name (the host object's key, e.g. "main").
    pub name: String,
    /// Items in the region's display order.
    pub items: Vec<NavItem>,
}

/// User info attached to the navigation object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    /// The user's preferred locale key, when declared.
    #[serde(rename = "preferredLocale", skip_serializing_if = "Option::is_none")]
    pub preferred_locale: Option<String>,
}

/// Read-only snapshot of the host navigation object.
#[derive(Debug, Clone, Default)]
pub struct NavigationTree {
    regions: Vec<Region>,
    paths: HashMap<String, String>,
    context_path: Option<String>,
    user: Option<UserInfo>,
}

impl NavigationTree {
    /// Create an empty tree; populate with the `with_*` methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region. Regions are scanned in insertion order.
    pub fn with_region<I, S>(mut self, name: impl Into<String>, item_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions.push(Region {
            name: name.into(),
            items: item_ids
                .into_iter()
                .map(|id| NavItem { id: id.into() })
                .collect(),
        });
        self
    }

    /// Map an app id to its URL path prefix.
    pub fn with_path(mut self, app_id: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.paths.insert(app_id.into(), prefix.into());
        self
    }

    /// Set the multi-tenant context path.
    pub fn with_context_path(mut self, path: impl Into<String>) -> Self {
        self.context_path = Some(path.into());
        self
    }

    /// Set the user's preferred locale.
    pub fn with_preferred_locale(mut self, locale: impl Into<String>) -> Self {
        self.user = Some(UserInfo {
            preferred_locale: Some(locale.into()),
        });
        self
    }

    /// Build a tree from the host's navigation JSON text.
    pub fn from_json(json: &str) -> Result<Self, ContextError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Build a tree from the host's navigation object.
    ///
    /// Top-level keys holding an `items` array become regions, in key
    /// order. `paths`, `contextPath`, and `user` are lifted into their
    /// typed fields. Anything else is ignored; malformed entries are
    /// skipped with a warning rather than failing the whole tree.
    pub fn from_value(value: &Value) -> Result<Self, ContextError> {
        let Some(object) = value.as_object() else {
            return Err(ContextError::NavigationNotAnObject);
        };

        let mut tree = Self::new();

        for (key, entry) in object {
            match key.as_str() {
                "paths" => tree.paths = parse_paths(entry),
                "contextPath" => {
                    tree.context_path = entry.as_str().map(str::to_string);
                }
                "user" => match UserInfo::deserialize(entry) {
                    Ok(user) => tree.user = Some(user),
                    Err(e) => warn!(error = %e, "ignoring malformed user info"),
                },
                _ => {
                    if let Some(items) = entry.get("items").and_then(Value::as_array) {
                        tree.regions.push(Region {
                            name: key.clone(),
                            items: parse_items(key, items),
                        });
                    }
                }
            }
        }

        Ok(tree)
    }

    /// Regions in scan order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// URL path prefix registered for an app id.
    pub fn path_of(&self, app_id: &str) -> Option<&str> {
        self.paths.get(app_id).map(String::as_str)
    }

    /// The multi-tenant context path, when the host declares one.
    pub fn context_path(&self) -> Option<&str> {
        self.context_path.as_deref()
    }

    /// The user's preferred locale, when declared.
    pub fn preferred_locale(&self) -> Option<&str> {
        self.user.as_ref()?.preferred_locale.as_deref()
    }
}

fn parse_paths(entry: &Value) -> HashMap<String, String> {
    let Some(object) = entry.as_object() else {
        warn!("navigation `paths` is not an object, ignoring");
        return HashMap::new();
    };

    let mut paths = HashMap::new();
    for (app_id, prefix) in object {
        match prefix.as_str() {
            Some(prefix) => {
                paths.insert(app_id.clone(), prefix.to_string());
            }
            None => warn!(app = %app_id, "ignoring non-string path prefix"),
        }
    }
    paths
}

fn parse_items(region: &str, items: &[Value]) -> Vec<NavItem> {
    items
        .iter()
        .filter_map(|item| match NavItem::deserialize(item) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(region = %region, error = %e, "ignoring malformed nav item");
                None
            }
        })
        .collect()
}
