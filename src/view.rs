//! Minimal render boundary.
//!
//! Components produce a [`Node`] tree. Event listeners on the tree receive an
//! [`Event`] and an [`ActionContext`], which is the only way they can change
//! state.

use std::{fmt, mem::replace, rc::Rc};

use parse_display::Display;

use crate::{ActionContext, RouteContext, RouterError, SignalContext};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(style = "lowercase")]
pub enum EventKind {
    Click,
    Input,
    Change,
    Submit,
}

/// A DOM-like event delivered to listeners.
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventKind,
    value: String,
    prevent_default_calls: usize,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            value: String::new(),
            prevent_default_calls: 0,
        }
    }
    pub fn click() -> Self {
        Self::new(EventKind::Click)
    }
    pub fn submit() -> Self {
        Self::new(EventKind::Submit)
    }
    pub fn change() -> Self {
        Self::new(EventKind::Change)
    }
    /// Input event carrying the new value of the target.
    pub fn input(value: &str) -> Self {
        Self {
            value: value.to_string(),
            ..Self::new(EventKind::Input)
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Suppresses the default action of the host (following a link, submitting a form).
    pub fn prevent_default(&mut self) {
        self.prevent_default_calls += 1;
    }
    pub fn default_prevented(&self) -> bool {
        self.prevent_default_calls > 0
    }
    pub fn prevent_default_calls(&self) -> usize {
        self.prevent_default_calls
    }
}

pub type EventHandler = Rc<dyn Fn(&mut Event, &mut ActionContext)>;

#[derive(Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut s = String::new();
        self.write_text(&mut s);
        s
    }
    fn write_text(&self, s: &mut String) {
        match self {
            Node::Element(e) => {
                for c in &e.children {
                    c.write_text(s);
                }
            }
            Node::Text(t) => s.push_str(t),
        }
    }

    /// First element in document order that satisfies `f`.
    pub fn find(&self, f: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.find_dyn(&f)
    }
    fn find_dyn(&self, f: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let e = self.as_element()?;
        if f(e) {
            return Some(e);
        }
        e.children.iter().find_map(|c| c.find_dyn(f))
    }

    /// All elements in document order that satisfy `f`.
    pub fn find_all(&self, f: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(&f, &mut found);
        found
    }
    fn collect<'a>(&'a self, f: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let Node::Element(e) = self {
            if f(e) {
                found.push(e);
            }
            for c in &e.children {
                c.collect(f, found);
            }
        }
    }

    /// Element with tag `tag` whose text content is `text`.
    pub fn find_by_text(&self, tag: &str, text: &str) -> Option<&Element> {
        self.find(|e| e.tag() == tag && e.text_content() == text)
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}
impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::text(s)
    }
}
impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

#[derive(Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
    listeners: Vec<(EventKind, EventHandler)>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Sets attribute `name`, replacing a previous value.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
        self
    }
    pub fn attr_if(self, cond: bool, name: &'static str, value: impl Into<String>) -> Self {
        if cond {
            self.attr(name, value)
        } else {
            self
        }
    }
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }
    pub fn on(
        mut self,
        kind: EventKind,
        f: impl Fn(&mut Event, &mut ActionContext) + 'static,
    ) -> Self {
        self.listeners.push((kind, Rc::new(f)));
        self
    }

    pub fn tag(&self) -> &str {
        self.tag
    }
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }
    pub fn text_content(&self) -> String {
        let mut s = String::new();
        for c in &self.children {
            c.write_text(&mut s);
        }
        s
    }
    pub fn has_listener(&self, kind: EventKind) -> bool {
        self.listeners.iter().any(|(k, _)| *k == kind)
    }

    /// Delivers `event` to the listeners of this element registered for its kind.
    ///
    /// Returns `false` if there was no such listener.
    pub fn dispatch(&self, event: &mut Event, ac: &mut ActionContext) -> bool {
        let mut handled = false;
        for (kind, f) in &self.listeners {
            if *kind == event.kind() {
                f(event, ac);
                handled = true;
            }
        }
        handled
    }
}

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    for c in s.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' => f.write_str("&quot;")?,
            c => write!(f, "{c}")?,
        }
    }
    Ok(())
}

/// Formats the node as HTML. Listeners are not rendered.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(t) => write_escaped(f, t),
            Node::Element(e) => fmt::Display::fmt(e, f),
        }
    }
}
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {name}=\"")?;
            write_escaped(f, value)?;
            f.write_str("\"")?;
        }
        f.write_str(">")?;
        if VOID_TAGS.contains(&self.tag) {
            return Ok(());
        }
        for c in &self.children {
            fmt::Display::fmt(c, f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(e) => fmt::Debug::fmt(e, f),
            Node::Text(t) => fmt::Debug::fmt(t, f),
        }
    }
}
impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners: Vec<EventKind> = self.listeners.iter().map(|(k, _)| *k).collect();
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attrs", &self.attrs)
            .field("listeners", &listeners)
            .field("children", &self.children)
            .finish()
    }
}

/// Context passed down the render call chain.
///
/// Tracks the signals read while rendering and carries the [`RouteContext`]
/// of the nearest enclosing [`RouteContainer`](crate::RouteContainer).
pub struct RenderContext<'a, 's> {
    sc: &'a mut SignalContext<'s>,
    route: Option<RouteContext>,
}

impl<'a, 's> RenderContext<'a, 's> {
    /// Creates a context with no enclosing route container.
    pub fn new(sc: &'a mut SignalContext<'s>) -> Self {
        Self { sc, route: None }
    }

    pub fn sc(&mut self) -> &mut SignalContext<'s> {
        self.sc
    }

    /// Route context of the nearest enclosing container, if any.
    pub fn route_context(&self) -> Option<&RouteContext> {
        self.route.as_ref()
    }

    /// Calls `f` with `route` as the route context of everything rendered inside it.
    pub fn with_route_context<T>(
        &mut self,
        route: RouteContext,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let old = replace(&mut self.route, Some(route));
        let ret = f(self);
        self.route = old;
        ret
    }
}

/// Something that can be rendered into a [`Node`].
pub trait Render {
    fn render(&self, cx: &mut RenderContext) -> Result<Node, RouterError>;
}

impl<F> Render for F
where
    F: Fn(&mut RenderContext) -> Result<Node, RouterError>,
{
    fn render(&self, cx: &mut RenderContext) -> Result<Node, RouterError> {
        self(cx)
    }
}
