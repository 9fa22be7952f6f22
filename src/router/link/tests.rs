use assert_call::{call, CallRecorder};

use crate::{
    core::Runtime, Event, EventKind, History, MemoryHistory, NavLink, Node, Render,
    RenderContext, Route, RouteContainer, RouterConfig, RouterError,
};

fn route(s: &str) -> Route {
    Route::new(s).unwrap()
}

fn mount(history: &MemoryHistory) -> RouteContainer {
    RouteContainer::mount(history.clone(), RouterConfig::default()).unwrap()
}

fn render_in(router: &RouteContainer, link: &NavLink, rt: &mut Runtime) -> Node {
    let mut sc = rt.sc();
    let mut cx = RenderContext::new(&mut sc);
    let node = router.render(link, &mut cx).unwrap();
    node
}

#[test]
fn new_rejects_empty_target() {
    assert_eq!(NavLink::new("", "All").err(), Some(RouterError::EmptyRoute));
}

#[test]
fn new_rejects_relative_target() {
    let e = NavLink::new("active", "Active").unwrap_err();
    assert_eq!(
        e,
        RouterError::InvalidRoute {
            route: route("active")
        }
    );
    assert_eq!(e.to_string(), "route `active` must start with `/`");
    assert!(NavLink::from_route(route("complete"), "Complete").is_err());
    assert!(NavLink::from_route(route("/complete"), "Complete").is_ok());
}

#[test]
fn render_outside_container_fails() {
    let mut rt = Runtime::new();
    let link = NavLink::new("/active", "Active").unwrap();
    let mut sc = rt.sc();
    let e = link.render(&mut RenderContext::new(&mut sc)).unwrap_err();
    assert_eq!(
        e,
        RouterError::MissingRouteContainer {
            to: route("/active")
        }
    );
    assert_eq!(
        e.to_string(),
        "`NavLink` to `/active` was rendered outside of a `RouteContainer`"
    );
}

#[test]
fn render_marks_active_link() {
    let mut rt = Runtime::new();
    let history = MemoryHistory::new("/active");
    let router = mount(&history);

    let active = NavLink::new("/active", "Active").unwrap();
    let node = render_in(&router, &active, &mut rt);
    assert_eq!(
        node.to_string(),
        r#"<div><div><a href="/active" class="active" aria-current="page">Active</a></div></div>"#
    );

    let inactive = NavLink::new("/complete", "Complete").unwrap();
    let node = render_in(&router, &inactive, &mut rt);
    assert_eq!(
        node.to_string(),
        r#"<div><div><a href="/complete">Complete</a></div></div>"#
    );
}

#[test]
fn render_uses_configured_active_class() {
    let mut rt = Runtime::new();
    let config = RouterConfig {
        active_class: "selected".into(),
        ..RouterConfig::default()
    };
    let router = RouteContainer::mount(MemoryHistory::new("/"), config).unwrap();
    let node = render_in(&router, &NavLink::new("/", "All").unwrap(), &mut rt);
    let a = node.find(|e| e.tag() == "a").unwrap();
    assert!(a.has_class("selected"));
    assert!(!a.has_class("active"));
}

#[test]
fn click_prevents_default_once_and_navigates() {
    let mut rt = Runtime::new();
    let history = MemoryHistory::new("/");
    let router = mount(&history);
    let link = NavLink::new("/complete", "Complete").unwrap();

    let node = render_in(&router, &link, &mut rt);
    let a = node.find(|e| e.tag() == "a").unwrap();
    assert!(a.has_listener(EventKind::Click));

    let mut event = Event::click();
    assert!(a.dispatch(&mut event, rt.ac()));
    assert_eq!(event.prevent_default_calls(), 1);
    assert_eq!(router.current_route(&mut rt.sc()), "/complete");
    assert_eq!(history.len(), 2);

    let mut event = Event::click();
    link.click(router.context(), &mut event, rt.ac());
    assert_eq!(event.prevent_default_calls(), 1);
    assert_eq!(history.len(), 3);
}

#[test]
fn is_active_follows_current_route() {
    let mut rt = Runtime::new();
    let history = MemoryHistory::new("/");
    let router = mount(&history);
    let active = NavLink::new("/active", "Active").unwrap();

    assert!(!active.is_active(router.context(), &mut rt.sc()));
    router.navigate(route("/active"), rt.ac());
    assert!(active.is_active(router.context(), &mut rt.sc()));
    router.navigate(route("/complete"), rt.ac());
    assert!(!active.is_active(router.context(), &mut rt.sc()));
}

#[test]
fn only_affected_links_are_notified() {
    let mut rt = Runtime::new();
    let mut cr = CallRecorder::new();
    let history = MemoryHistory::new("/active");
    let router = mount(&history);

    let links = [
        NavLink::new("/", "All").unwrap(),
        NavLink::new("/active", "Active").unwrap(),
        NavLink::new("/complete", "Complete").unwrap(),
    ];
    let _subscriptions: Vec<_> = links
        .iter()
        .map(|link| {
            let to = link.to().clone();
            link.active_signal(router.context())
                .for_each(move |active| call!("{to} {active}"))
        })
        .collect();
    rt.update();
    cr.verify(["/ false", "/active true", "/complete false"]);

    router.navigate(route("/complete"), rt.ac());
    rt.update();
    cr.verify(["/active false", "/complete true"]);

    assert!(history.back(rt.ac()));
    rt.update();
    cr.verify(["/active true", "/complete false"]);
}
