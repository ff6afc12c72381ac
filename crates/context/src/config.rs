//! Context configuration.
//!
//! The configuration surface is fixed and constructor-provided, not
//! environment-driven: hosts that need different values pass their own
//! `ContextConfig` when building an `AppContext`.

/// Reserved namespace for cross-app shared state.
///
/// Distinct from any real app id; app ids come from navigation item
/// identifiers and never start with `_`.
pub const DEFAULT_GLOBAL_KEY: &str = "_apphub";

/// Sub-key holding the shared state blob inside the global namespace.
pub const DEFAULT_STATE_KEY: &str = "state";

/// Navigation regions considered during identity resolution.
pub const DEFAULT_REGIONS: [&str; 3] = ["main", "settings", "profile"];

/// Configuration for an [`AppContext`](crate::AppContext).
#[derive(Debug, Clone)]
pub struct ContextConfig {
    global_key: String,
    state_key: String,
    regions: Vec<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            global_key: DEFAULT_GLOBAL_KEY.to_string(),
            state_key: DEFAULT_STATE_KEY.to_string(),
            regions: DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl ContextConfig {
    /// Create a config with the default keys and region allow-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the reserved shared-state namespace key.
    pub fn with_global_key(mut self, key: impl Into<String>) -> Self {
        self.global_key = key.into();
        self
    }

    /// Override the sub-key the shared state blob is stored under.
    pub fn with_state_key(mut self, key: impl Into<String>) -> Self {
        self.state_key = key.into();
        self
    }

    /// Override the region allow-list used during identity resolution.
    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// The reserved shared-state namespace key.
    pub fn global_key(&self) -> &str {
        &self.global_key
    }

    /// The sub-key the shared state blob is stored under.
    pub fn state_key(&self) -> &str {
        &self.state_key
    }

    /// The region allow-list used during identity resolution.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }
}
