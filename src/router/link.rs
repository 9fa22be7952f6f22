use crate::{
    ActionContext, Element, Event, EventKind, Node, Render, RenderContext, Route, RouteContext,
    RouterError, Signal, SignalContext,
};

#[cfg(test)]
mod tests;

/// Clickable link to a single route.
///
/// A `NavLink` owns no routing state. It reads the current route and the
/// navigator from the [`RouteContext`] it is rendered with, so it must be
/// rendered inside a [`RouteContainer`](crate::RouteContainer); otherwise
/// [`render`](Render::render) fails with [`RouterError::MissingRouteContainer`].
#[derive(Clone, Debug)]
pub struct NavLink {
    to: Route,
    children: Vec<Node>,
}

impl NavLink {
    /// Creates a link to `to`. Fails if `to` is empty or does not start with `/`.
    pub fn new(to: &str, child: impl Into<Node>) -> Result<Self, RouterError> {
        Self::from_route(Route::new(to)?, child)
    }
    pub fn from_route(to: Route, child: impl Into<Node>) -> Result<Self, RouterError> {
        to.check_absolute()?;
        Ok(Self {
            to,
            children: vec![child.into()],
        })
    }
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn to(&self) -> &Route {
        &self.to
    }

    /// Returns `true` if the link target is the current route of `context`.
    pub fn is_active(&self, context: &RouteContext, sc: &mut SignalContext) -> bool {
        context.is_active(&self.to, sc)
    }

    /// Active flag as a signal. Dependants are only notified when the flag flips.
    pub fn active_signal(&self, context: &RouteContext) -> Signal<bool> {
        let current = context.route_signal().clone();
        let to = self.to.clone();
        Signal::new_dedup(move |sc| current.get(sc) == to)
    }

    /// Handles activation of the link: suppresses the host's default navigation
    /// and asks the container to navigate to the target.
    pub fn click(&self, context: &RouteContext, event: &mut Event, ac: &mut ActionContext) {
        follow(context, &self.to, event, ac)
    }
}

fn follow(context: &RouteContext, to: &Route, event: &mut Event, ac: &mut ActionContext) {
    event.prevent_default();
    context.navigate(to.clone(), ac);
}

impl Render for NavLink {
    fn render(&self, cx: &mut RenderContext) -> Result<Node, RouterError> {
        let Some(context) = cx.route_context().cloned() else {
            return Err(RouterError::MissingRouteContainer {
                to: self.to.clone(),
            });
        };
        let active = self.is_active(&context, cx.sc());
        let class = context.config().active_class.clone();
        let to = self.to.clone();
        let a = Element::new("a")
            .attr("href", self.to.as_str())
            .attr_if(active, "class", class)
            .attr_if(active, "aria-current", "page")
            .children(self.children.iter().cloned())
            .on(EventKind::Click, move |event, ac| {
                follow(&context, &to, event, ac)
            });
        Ok(Element::new("div").child(a).into())
    }
}
