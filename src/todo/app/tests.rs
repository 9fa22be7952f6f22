use assert_call::{call, CallRecorder};

use crate::{
    core::Runtime, effect, Event, History, MemoryHistory, Node, Route, RouterConfig,
};

use super::*;

fn app(history: &MemoryHistory) -> TodoApp {
    TodoApp::new(history.clone(), RouterConfig::default()).unwrap()
}

fn render(app: &TodoApp, rt: &mut Runtime) -> Node {
    app.render(&mut rt.sc()).unwrap()
}

fn names(todos: &[Todo]) -> Vec<&str> {
    todos.iter().map(|t| t.name.as_str()).collect()
}

#[test]
fn starts_with_default_todos() {
    let mut rt = Runtime::new();
    let app = app(&MemoryHistory::new("/"));
    let todos = app.store().todos(&mut rt.sc());
    assert_eq!(
        names(&todos),
        ["Learn JSX", "Build an Awesome App", "Ship It!"]
    );
    assert!(todos[0].is_complete);
    assert_eq!(app.store().current_todo(&mut rt.sc()), "");
    assert_eq!(app.store().error_message(&mut rt.sc()), None);
}

#[test]
fn submit_adds_todo_and_clears_input() {
    let mut rt = Runtime::new();
    let store = TodoStore::new(Vec::new());
    store.handle_input_change("  Write tests ", rt.ac());
    assert!(store.handle_submit(rt.ac()));
    assert_eq!(
        store.todos(&mut rt.sc()),
        vec![Todo::new(1, "Write tests")]
    );
    assert_eq!(store.current_todo(&mut rt.sc()), "");

    store.handle_input_change("Ship", rt.ac());
    assert!(store.handle_submit(rt.ac()));
    let todos = store.todos(&mut rt.sc());
    assert_eq!(todos.last(), Some(&Todo::new(2, "Ship")));
}

#[test]
fn empty_submit_sets_error_message() {
    let mut rt = Runtime::new();
    let store = TodoStore::new(default_todos());
    store.handle_input_change("   ", rt.ac());
    assert!(!store.handle_submit(rt.ac()));
    assert_eq!(
        store.error_message(&mut rt.sc()).as_deref(),
        Some(EMPTY_NAME_MESSAGE)
    );
    assert_eq!(store.todos(&mut rt.sc()).len(), 3);

    store.handle_input_change("x", rt.ac());
    assert_eq!(store.error_message(&mut rt.sc()), None);
}

#[test]
fn toggle_and_remove_by_id() {
    let mut rt = Runtime::new();
    let store = TodoStore::new(default_todos());

    assert!(store.handle_toggle(2, rt.ac()));
    assert!(store.todos(&mut rt.sc())[1].is_complete);
    assert!(!store.handle_toggle(9, rt.ac()));

    assert!(store.handle_remove(1, rt.ac()));
    assert_eq!(
        names(&store.todos(&mut rt.sc())),
        ["Build an Awesome App", "Ship It!"]
    );
    assert!(!store.handle_remove(1, rt.ac()));
}

#[test]
fn visible_todos_follow_route() {
    let mut rt = Runtime::new();
    let history = MemoryHistory::new("/complete");
    let app = app(&history);
    assert_eq!(names(&app.visible_todos(&mut rt.sc())), ["Learn JSX"]);

    app.router()
        .navigate(Route::new("/active").unwrap(), rt.ac());
    assert_eq!(
        names(&app.visible_todos(&mut rt.sc())),
        ["Build an Awesome App", "Ship It!"]
    );
}

#[test]
fn render_layout() {
    let mut rt = Runtime::new();
    let app = app(&MemoryHistory::new("/"));
    let node = render(&app, &mut rt);

    assert!(node.find(|e| e.has_class("App-title")).is_some());
    assert!(node.find(|e| e.tag() == "form").is_some());
    assert_eq!(node.find_all(|e| e.tag() == "li").len(), 3);
    let links = node.find_all(|e| e.tag() == "a");
    let hrefs: Vec<_> = links.iter().filter_map(|a| a.get_attr("href")).collect();
    assert_eq!(hrefs, ["/", "/active", "/complete"]);
    assert!(links[0].has_class("active"));
    assert!(node.find(|e| e.has_class("error")).is_none());
}

#[test]
fn render_shows_error_message() {
    let mut rt = Runtime::new();
    let app = app(&MemoryHistory::new("/"));
    app.store().handle_empty_submit(rt.ac());
    let node = render(&app, &mut rt);
    let error = node.find(|e| e.has_class("error")).unwrap();
    assert_eq!(error.text_content(), EMPTY_NAME_MESSAGE);
}

#[test]
fn rendered_listeners_update_store() {
    let mut rt = Runtime::new();
    let app = app(&MemoryHistory::new("/"));

    let node = render(&app, &mut rt);
    let input = node
        .find(|e| e.tag() == "input" && e.get_attr("type") == Some("text"))
        .unwrap();
    input.dispatch(&mut Event::input("New"), rt.ac());

    let node = render(&app, &mut rt);
    let form = node.find(|e| e.tag() == "form").unwrap();
    let mut submit = Event::submit();
    assert!(form.dispatch(&mut submit, rt.ac()));
    assert!(submit.default_prevented());
    assert_eq!(app.store().todos(&mut rt.sc()).len(), 4);

    let node = render(&app, &mut rt);
    let checkbox = node
        .find(|e| e.get_attr("type") == Some("checkbox") && e.get_attr("checked").is_none())
        .unwrap();
    checkbox.dispatch(&mut Event::change(), rt.ac());
    assert!(app.store().todos(&mut rt.sc())[1].is_complete);

    let node = render(&app, &mut rt);
    let delete = node.find(|e| e.has_class("delete-item")).unwrap();
    delete.dispatch(&mut Event::click(), rt.ac());
    assert_eq!(app.store().todos(&mut rt.sc()).len(), 3);
}

#[test]
fn effect_rerenders_on_route_change() {
    let mut rt = Runtime::new();
    let mut cr = CallRecorder::new();
    let history = MemoryHistory::new("/");
    let app = std::rc::Rc::new(app(&history));

    let _e = effect({
        let app = app.clone();
        move |sc| {
            let node = app.render(sc).unwrap();
            let items = node.find_all(|e| e.tag() == "li").len();
            call!("{items}");
        }
    });
    rt.update();
    cr.verify("3");

    app.router()
        .navigate(Route::new("/active").unwrap(), rt.ac());
    rt.update();
    cr.verify("2");

    history.back(rt.ac());
    rt.update();
    cr.verify("3");
    assert_eq!(history.len(), 2);
}
