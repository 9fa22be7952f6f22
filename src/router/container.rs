use std::{cell::Cell, rc::Rc};

use super::context::apply_route;
use crate::{
    resolve_route, ActionContext, Element, History, Navigator, Node, Render, RenderContext,
    Route, RouteContext, RouterConfig, RouterError, Signal, SignalContext, State, Subscription,
};


/// Owner of the current route.
///
/// Mounting reads the initial route from the history location and subscribes
/// to back/forward navigation; dropping the container unsubscribes. The route
/// only changes through [`navigate`](Self::navigate) (or a [`Navigator`]
/// obtained from the context) and through history pops.
///
/// Containers are not meant to be nested. A nested container replaces the
/// context of its own subtree only.
pub struct RouteContainer {
    context: RouteContext,
    history: Rc<dyn History>,
    mounted: Rc<Cell<bool>>,
    _pop: Subscription,
}

impl RouteContainer {
    pub fn mount(
        history: impl History + 'static,
        config: RouterConfig,
    ) -> Result<Self, RouterError> {
        config.validate()?;
        let history: Rc<dyn History> = Rc::new(history);
        let fallback = config.fallback_route.clone();
        let route = State::new(resolve_or_fallback(&history.pathname(), &fallback));
        let pop = history.on_pop(Box::new({
            let route = route.clone();
            move |pathname: &str, ac: &mut ActionContext| {
                let to = resolve_or_fallback(pathname, &fallback);
                tracing::debug!(route = %to, "route restored from history");
                apply_route(&route, to, ac);
            }
        }));
        tracing::debug!(route = ?route, "route container mounted");
        let mounted = Rc::new(Cell::new(true));
        Ok(Self {
            context: RouteContext::new(&route, history.clone(), mounted.clone(), config),
            history,
            mounted,
            _pop: pop,
        })
    }

    /// Context to hand to descendants.
    pub fn context(&self) -> &RouteContext {
        &self.context
    }
    pub fn current_route(&self, sc: &mut SignalContext) -> Route {
        self.context.current_route(sc)
    }
    /// Read-only view of the current route.
    pub fn route_signal(&self) -> &Signal<Route> {
        self.context.route_signal()
    }
    pub fn navigator(&self) -> &Navigator {
        self.context.navigator()
    }
    pub fn navigate(&self, route: Route, ac: &mut ActionContext) -> bool {
        self.context.navigate(route, ac)
    }
    pub fn history(&self) -> &dyn History {
        &*self.history
    }

    /// Stops following the history. Equivalent to dropping the container.
    pub fn unmount(self) {}

    /// Renders `children` with this container's context and wraps them in a `div`.
    pub fn render(
        &self,
        children: &dyn Render,
        cx: &mut RenderContext,
    ) -> Result<Node, RouterError> {
        let child = cx.with_route_context(self.context.clone(), |cx| children.render(cx))?;
        Ok(Element::new("div").child(child).into())
    }
}

impl Drop for RouteContainer {
    fn drop(&mut self) {
        self.mounted.set(false);
        tracing::debug!("route container unmounted");
    }
}

fn resolve_or_fallback(pathname: &str, fallback: &Route) -> Route {
    match resolve_route(pathname) {
        Ok(route) => route,
        Err(e) => {
            tracing::warn!(pathname, fallback = %fallback, "{e}, using fallback route");
            fallback.clone()
        }
    }
}
