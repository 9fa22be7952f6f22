use serde::{Deserialize, Serialize};

use crate::{ConfigError, Route, RouterError};


/// Settings for a [`RouteContainer`](crate::RouteContainer).
///
/// ```toml
/// fallback_route = "/"
/// active_class = "active"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Route used when the location cannot be resolved to a route.
    pub fallback_route: Route,
    /// Class attribute set on the anchor of an active `NavLink`.
    pub active_class: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            fallback_route: Route::root(),
            active_class: "active".to_string(),
        }
    }
}

impl RouterConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RouterError> {
        self.fallback_route.check_absolute()
    }
}
