use std::{cell::Cell, fmt, rc::Rc};

use crate::{ActionContext, History, Route, RouterConfig, Signal, SignalContext, State};

/// What a [`RouteContainer`](crate::RouteContainer) shares with its descendants.
///
/// Holds a read-only view of the current route and a [`Navigator`]. Cheap to
/// clone; all clones observe the same container.
#[derive(Clone)]
pub struct RouteContext {
    current: Signal<Route>,
    navigator: Navigator,
    config: Rc<RouterConfig>,
}

impl RouteContext {
    pub(crate) fn new(
        route: &State<Route>,
        history: Rc<dyn History>,
        mounted: Rc<Cell<bool>>,
        config: RouterConfig,
    ) -> Self {
        Self {
            current: route.to_signal(),
            navigator: Navigator {
                route: route.clone(),
                history,
                mounted,
            },
            config: Rc::new(config),
        }
    }

    /// Current route. Adds a dependency on it to `sc`.
    pub fn current_route(&self, sc: &mut SignalContext) -> Route {
        self.current.get(sc)
    }
    pub fn route_signal(&self) -> &Signal<Route> {
        &self.current
    }

    /// Returns `true` if `route` is the current route. Adds a dependency on the current route to `sc`.
    pub fn is_active(&self, route: &Route, sc: &mut SignalContext) -> bool {
        self.current.get(sc) == *route
    }

    /// See [`Navigator::navigate`].
    pub fn navigate(&self, route: Route, ac: &mut ActionContext) -> bool {
        self.navigator.navigate(route, ac)
    }
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

impl fmt::Debug for RouteContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteContext")
            .field("navigator", &self.navigator)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Requests navigation on behalf of a [`RouteContainer`](crate::RouteContainer).
///
/// A navigator outlives its container only as a no-op: once the container is
/// dropped, navigation is ignored.
#[derive(Clone)]
pub struct Navigator {
    route: State<Route>,
    history: Rc<dyn History>,
    mounted: Rc<Cell<bool>>,
}

impl Navigator {
    /// Pushes a history entry for `route` and makes it the current route.
    ///
    /// Both happen before any effect can observe the change. Returns `false`
    /// and does nothing if the container was unmounted.
    pub fn navigate(&self, route: Route, ac: &mut ActionContext) -> bool {
        if !self.is_mounted() {
            tracing::warn!(route = %route, "navigation after the route container was unmounted");
            return false;
        }
        self.history.push(&route);
        tracing::debug!(route = %route, history_len = self.history.len(), "navigate");
        apply_route(&self.route, route, ac);
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("route", &self.route)
            .field("mounted", &self.mounted.get())
            .finish_non_exhaustive()
    }
}

/// The single write path of the current route, shared by navigation and history pops.
pub(crate) fn apply_route(state: &State<Route>, route: Route, ac: &mut ActionContext) {
    if !state.set_dedup(route, ac) {
        tracing::trace!("route unchanged");
    }
}
