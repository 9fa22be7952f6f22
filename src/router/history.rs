use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use slabmap::SlabMap;

use crate::{ActionContext, Route, Subscription};


/// Handler called when the user moves through history with back/forward.
///
/// Receives the pathname of the location that became current.
pub type PopHandler = Box<dyn FnMut(&str, &mut ActionContext)>;

/// Boundary to the session history of the host environment.
///
/// The router only ever pushes entries and listens for pops, so this is all it
/// needs from a browser's `history` and `location` objects.
pub trait History {
    /// Pathname of the current location.
    fn pathname(&self) -> String;

    /// Adds an entry for `route` and makes it current, without reloading.
    fn push(&self, route: &Route);

    /// Number of entries in the session history.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers a handler for back/forward navigation.
    ///
    /// The handler stays registered until the returned [`Subscription`] is dropped.
    fn on_pop(&self, handler: PopHandler) -> Subscription;
}

/// In-memory [`History`].
///
/// Behaves like a browser session history: pushing discards the entries ahead
/// of the current one, and [`back`](Self::back) / [`forward`](Self::forward)
/// move the cursor and dispatch the pop handlers. Cloning yields another handle
/// to the same history.
#[derive(Clone)]
pub struct MemoryHistory(Rc<RawMemoryHistory>);

struct RawMemoryHistory {
    entries: RefCell<Vec<String>>,
    index: Cell<usize>,
    push_count: Cell<usize>,
    handlers: RefCell<SlabMap<Rc<RefCell<PopHandler>>>>,
}

impl MemoryHistory {
    /// Creates a history with a single entry at `pathname`.
    pub fn new(pathname: &str) -> Self {
        Self(Rc::new(RawMemoryHistory {
            entries: RefCell::new(vec![pathname.to_string()]),
            index: Cell::new(0),
            push_count: Cell::new(0),
            handlers: RefCell::new(SlabMap::new()),
        }))
    }

    /// Moves `delta` entries through the history and dispatches the pop handlers.
    ///
    /// Returns `false` and does nothing if the target entry does not exist.
    pub fn go(&self, delta: isize, ac: &mut ActionContext) -> bool {
        let len = self.0.entries.borrow().len();
        let Some(index) = self.0.index.get().checked_add_signed(delta) else {
            return false;
        };
        if delta == 0 || index >= len {
            return false;
        }
        self.0.index.set(index);
        self.dispatch_pop(ac);
        true
    }
    pub fn back(&self, ac: &mut ActionContext) -> bool {
        self.go(-1, ac)
    }
    pub fn forward(&self, ac: &mut ActionContext) -> bool {
        self.go(1, ac)
    }

    /// Index of the current entry.
    pub fn index(&self) -> usize {
        self.0.index.get()
    }

    /// Pathnames of all entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.0.entries.borrow().clone()
    }

    /// Number of calls to [`History::push`].
    pub fn push_count(&self) -> usize {
        self.0.push_count.get()
    }

    /// Number of registered pop handlers.
    pub fn handler_count(&self) -> usize {
        self.0.handlers.borrow().len()
    }

    fn dispatch_pop(&self, ac: &mut ActionContext) {
        let pathname = self.pathname();
        tracing::debug!(pathname = %pathname, index = self.index(), "history popped");
        let keys: Vec<usize> = self.0.handlers.borrow().iter().map(|(key, _)| key).collect();
        for key in keys {
            // a handler may unsubscribe others while dispatching
            let handler = self.0.handlers.borrow().get(key).cloned();
            if let Some(handler) = handler {
                let mut f = handler.borrow_mut();
                (*f)(&pathname, ac);
            }
        }
    }
}

impl History for MemoryHistory {
    fn pathname(&self) -> String {
        self.0.entries.borrow()[self.0.index.get()].clone()
    }

    fn push(&self, route: &Route) {
        let mut entries = self.0.entries.borrow_mut();
        let index = self.0.index.get() + 1;
        entries.truncate(index);
        entries.push(route.to_string());
        self.0.index.set(index);
        self.0.push_count.set(self.0.push_count.get() + 1);
    }

    fn len(&self) -> usize {
        self.0.entries.borrow().len()
    }

    fn on_pop(&self, handler: PopHandler) -> Subscription {
        let key = self
            .0
            .handlers
            .borrow_mut()
            .insert(Rc::new(RefCell::new(handler)));
        tracing::trace!(key, "pop handler registered");
        Subscription::from_weak_fn(Rc::downgrade(&self.0), move |this| {
            this.handlers.borrow_mut().remove(key);
            tracing::trace!(key, "pop handler removed");
        })
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("entries", &self.0.entries.borrow())
            .field("index", &self.0.index.get())
            .finish_non_exhaustive()
    }
}
