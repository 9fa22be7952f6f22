use std::{borrow::Borrow, fmt, rc::Rc, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{History, RouterError};


/// Canonical path identifier such as `/`, `/active` or `/complete`.
///
/// Never empty.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route(Rc<str>);

impl Route {
    pub fn new(route: &str) -> Result<Self, RouterError> {
        if route.is_empty() {
            return Err(RouterError::EmptyRoute);
        }
        Ok(Self(route.into()))
    }

    /// `/`
    pub fn root() -> Self {
        Self("/".into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        &*self.0 == "/"
    }

    /// Returns `true` if the route starts with `/`.
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Fails with [`RouterError::InvalidRoute`] unless the route starts with `/`.
    ///
    /// Resolved locations always start with `/`, so any other route can never become current.
    pub fn check_absolute(&self) -> Result<(), RouterError> {
        if self.is_absolute() {
            Ok(())
        } else {
            Err(RouterError::InvalidRoute {
                route: self.clone(),
            })
        }
    }
}

/// Derives the route from a location pathname.
///
/// The route is the part of `pathname` from its last `/` to the end, so
/// `/foo/active` resolves to `/active`. A pathname without any `/` resolves to
/// itself. An empty pathname has no route.
pub fn resolve_route(pathname: &str) -> Result<Route, RouterError> {
    let start = pathname.rfind('/').unwrap_or(0);
    Route::new(&pathname[start..])
}

/// Resolves the route of the location `history` currently points at.
pub fn resolve_current_route(history: &dyn History) -> Result<Route, RouterError> {
    resolve_route(&history.pathname())
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
impl FromStr for Route {
    type Err = RouterError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
impl TryFrom<String> for Route {
    type Error = RouterError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}
impl From<Route> for String {
    fn from(value: Route) -> Self {
        value.0.to_string()
    }
}
impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl Borrow<str> for Route {
    fn borrow(&self) -> &str {
        &self.0
    }
}
impl PartialEq<str> for Route {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}
impl PartialEq<&str> for Route {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
