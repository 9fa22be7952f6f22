use crate::{
    ActionContext, Element, EventKind, History, NavLink, Node, Render, RenderContext, Route,
    RouteContainer, RouterConfig, RouterError, SignalContext, State,
};

use super::{
    add_todo, filter_todos, find_by_id, next_id, remove_todo, toggle_todo, update_todo, Todo,
};

#[cfg(test)]
mod tests;

pub const EMPTY_NAME_MESSAGE: &str = "Please supply a todo name";

/// Todos shown when the app starts.
pub fn default_todos() -> Vec<Todo> {
    vec![
        Todo {
            is_complete: true,
            ..Todo::new(1, "Learn JSX")
        },
        Todo::new(2, "Build an Awesome App"),
        Todo::new(3, "Ship It!"),
    ]
}

/// State of the todo list and its input form.
///
/// Clones share the same state.
#[derive(Clone, Debug)]
pub struct TodoStore {
    todos: State<Vec<Todo>>,
    current_todo: State<String>,
    error_message: State<Option<String>>,
}

impl TodoStore {
    pub fn new(todos: Vec<Todo>) -> Self {
        Self {
            todos: State::new(todos),
            current_todo: State::new(String::new()),
            error_message: State::new(None),
        }
    }

    pub fn todos(&self, sc: &mut SignalContext) -> Vec<Todo> {
        self.todos.get(sc)
    }
    pub fn current_todo(&self, sc: &mut SignalContext) -> String {
        self.current_todo.get(sc)
    }
    pub fn error_message(&self, sc: &mut SignalContext) -> Option<String> {
        self.error_message.get(sc)
    }

    pub fn handle_input_change(&self, value: &str, ac: &mut ActionContext) {
        self.current_todo.set(value.to_string(), ac);
        self.error_message.set_dedup(None, ac);
    }

    /// Adds the current input as a new todo.
    ///
    /// An empty (or blank) input sets the error message instead. Returns `true` if a todo was added.
    pub fn handle_submit(&self, ac: &mut ActionContext) -> bool {
        let name = self.current_todo.get(&mut ac.sc());
        let name = name.trim();
        if name.is_empty() {
            self.handle_empty_submit(ac);
            return false;
        }
        let todos = self.todos.get(&mut ac.sc());
        let todo = Todo::new(next_id(&todos), name);
        tracing::debug!(id = todo.id, name = %todo.name, "todo added");
        self.todos.set(add_todo(&todos, todo), ac);
        self.current_todo.set(String::new(), ac);
        self.error_message.set_dedup(None, ac);
        true
    }
    pub fn handle_empty_submit(&self, ac: &mut ActionContext) {
        self.error_message
            .set_dedup(Some(EMPTY_NAME_MESSAGE.to_string()), ac);
    }

    /// Flips the completion of the todo with `id`. Returns `false` if there is no such todo.
    pub fn handle_toggle(&self, id: u32, ac: &mut ActionContext) -> bool {
        let todos = self.todos.get(&mut ac.sc());
        let Some(todo) = find_by_id(id, &todos) else {
            tracing::warn!(id, "toggle of unknown todo");
            return false;
        };
        let updated = update_todo(&todos, toggle_todo(todo));
        self.todos.set(updated, ac);
        true
    }

    /// Removes the todo with `id`. Returns `false` if there is no such todo.
    pub fn handle_remove(&self, id: u32, ac: &mut ActionContext) -> bool {
        let todos = self.todos.get(&mut ac.sc());
        if find_by_id(id, &todos).is_none() {
            tracing::warn!(id, "removal of unknown todo");
            return false;
        }
        tracing::debug!(id, "todo removed");
        self.todos.set(remove_todo(&todos, id), ac);
        true
    }

    fn render_form(&self, sc: &mut SignalContext) -> Node {
        let on_submit = self.clone();
        let on_input = self.clone();
        Element::new("form")
            .on(EventKind::Submit, move |event, ac| {
                event.prevent_default();
                on_submit.handle_submit(ac);
            })
            .child(
                Element::new("input")
                    .attr("type", "text")
                    .attr("value", self.current_todo(sc))
                    .on(EventKind::Input, move |event, ac| {
                        on_input.handle_input_change(event.value(), ac)
                    }),
            )
            .into()
    }

    fn render_item(&self, todo: &Todo) -> Node {
        let id = todo.id;
        let on_toggle = self.clone();
        let on_remove = self.clone();
        Element::new("li")
            .child(
                Element::new("span")
                    .attr("class", "delete-item")
                    .child("X")
                    .on(EventKind::Click, move |_, ac| {
                        on_remove.handle_remove(id, ac);
                    }),
            )
            .child(
                Element::new("input")
                    .attr("type", "checkbox")
                    .attr_if(todo.is_complete, "checked", "checked")
                    .on(EventKind::Change, move |_, ac| {
                        on_toggle.handle_toggle(id, ac);
                    }),
            )
            .child(todo.name.as_str())
            .into()
    }

    fn render_list(&self, route: &Route, sc: &mut SignalContext) -> Node {
        let todos = filter_todos(&self.todos(sc), route);
        Element::new("div")
            .attr("class", "Todo-List")
            .child(Element::new("ul").children(todos.iter().map(|t| self.render_item(t))))
            .into()
    }
}

fn footer_links() -> Result<[NavLink; 3], RouterError> {
    Ok([
        NavLink::new("/", "All")?,
        NavLink::new("/active", "Active")?,
        NavLink::new("/complete", "Complete")?,
    ])
}

fn render_footer(cx: &mut RenderContext) -> Result<Node, RouterError> {
    let mut footer = Element::new("div").attr("class", "Footer");
    for link in footer_links()? {
        footer = footer.child(link.render(cx)?);
    }
    Ok(footer.into())
}

/// List and footer, rendered inside the route container.
struct TodoBody<'a>(&'a TodoStore);

impl Render for TodoBody<'_> {
    fn render(&self, cx: &mut RenderContext) -> Result<Node, RouterError> {
        let route = match cx.route_context().cloned() {
            Some(context) => context.current_route(cx.sc()),
            None => Route::root(),
        };
        Ok(Element::new("div")
            .child(self.0.render_list(&route, cx.sc()))
            .child(render_footer(cx)?)
            .into())
    }
}

/// The todo application: a form, the list filtered by the current route and
/// a footer of links, with routing provided by a [`RouteContainer`].
pub struct TodoApp {
    store: TodoStore,
    router: RouteContainer,
}

impl TodoApp {
    pub fn new(
        history: impl History + 'static,
        config: RouterConfig,
    ) -> Result<Self, RouterError> {
        Self::with_todos(default_todos(), history, config)
    }
    pub fn with_todos(
        todos: Vec<Todo>,
        history: impl History + 'static,
        config: RouterConfig,
    ) -> Result<Self, RouterError> {
        Ok(Self {
            store: TodoStore::new(todos),
            router: RouteContainer::mount(history, config)?,
        })
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }
    pub fn router(&self) -> &RouteContainer {
        &self.router
    }

    /// Todos visible on the current route.
    pub fn visible_todos(&self, sc: &mut SignalContext) -> Vec<Todo> {
        let route = self.router.current_route(sc);
        filter_todos(&self.store.todos(sc), &route)
    }

    pub fn render(&self, sc: &mut SignalContext) -> Result<Node, RouterError> {
        let mut cx = RenderContext::new(sc);
        let store = &self.store;
        let error = store.error_message(cx.sc()).map(|message| {
            Node::from(Element::new("span").attr("class", "error").child(message))
        });
        let form = store.render_form(cx.sc());
        let body = self.router.render(&TodoBody(store), &mut cx)?;
        Ok(Element::new("div")
            .attr("class", "App")
            .child(
                Element::new("header")
                    .attr("class", "App-header")
                    .child(Element::new("h1").attr("class", "App-title").child("Todos")),
            )
            .child(
                Element::new("div")
                    .attr("class", "Todo-App")
                    .children(error)
                    .child(form)
                    .child(body),
            )
            .into())
    }
}
