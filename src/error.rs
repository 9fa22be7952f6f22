use parse_display::Display;

use crate::Route;

/// Errors raised by the router and the components that use it.
#[non_exhaustive]
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[display("route must not be empty")]
    EmptyRoute,
    #[display("`NavLink` to `{to}` was rendered outside of a `RouteContainer`")]
    MissingRouteContainer { to: Route },
    #[display("route `{route}` must start with `/`")]
    InvalidRoute { route: Route },
}

impl std::error::Error for RouterError {}

/// Errors raised while loading a [`RouterConfig`](crate::RouterConfig).
#[non_exhaustive]
#[derive(Display, Debug)]
pub enum ConfigError {
    #[display("failed to parse router config: {0}")]
    Parse(toml::de::Error),
    #[display("invalid router config: {0}")]
    Invalid(RouterError),
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(e) => Some(e),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}
impl From<RouterError> for ConfigError {
    fn from(e: RouterError) -> Self {
        ConfigError::Invalid(e)
    }
}
