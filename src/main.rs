use std::{cell::RefCell, error::Error, rc::Rc};

use sigroute::{
    core::Runtime, effect, todo::TodoApp, Event, MemoryHistory, Node, RouterConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RouterConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => RouterConfig::default(),
    };

    let mut rt = Runtime::new();
    let history = MemoryHistory::new("/");
    let app = Rc::new(TodoApp::new(history.clone(), config)?);
    let view: Rc<RefCell<Option<Node>>> = Rc::new(RefCell::new(None));

    let _render = effect({
        let app = app.clone();
        let view = view.clone();
        move |sc| match app.render(sc) {
            Ok(node) => {
                println!("{node}");
                *view.borrow_mut() = Some(node);
            }
            Err(e) => tracing::error!("{e}"),
        }
    });
    rt.update();

    for text in ["Active", "Complete"] {
        let link = view
            .borrow()
            .as_ref()
            .and_then(|node| node.find_by_text("a", text).cloned());
        if let Some(link) = link {
            link.dispatch(&mut Event::click(), rt.ac());
        }
        rt.update();
    }

    history.back(rt.ac());
    rt.update();
    println!("history: {:?} at {}", history.entries(), history.index());
    Ok(())
}
