use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use derive_ex::derive_ex;

use crate::{
    core::{Observer, Observers, Revision, Source},
    signal::SignalNode,
    ActionContext, Signal, SignalContext,
};


/// Shared value whose readers are re-evaluated when it is written.
///
/// Writing requires an [`ActionContext`], so only the code that is handed one
/// can change the value. Readers that only need to observe it should be given
/// a [`Signal`] from [`to_signal`](Self::to_signal).
#[derive_ex(Clone, bound())]
pub struct State<T: 'static>(Rc<StateNode<T>>);

impl<T: 'static> State<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(StateNode {
            value: RefCell::new(value),
            changed_at: Cell::new(Revision::default()),
            observers: Observers::default(),
        }))
    }

    /// Current value. Adds a dependency on this state to `sc`.
    pub fn get(&self, sc: &mut SignalContext) -> T
    where
        T: Clone,
    {
        sc.track(self.0.clone());
        self.0.value.borrow().clone()
    }

    /// Replaces the value and invalidates every reader, even if the value is equal.
    pub fn set(&self, value: T, ac: &mut ActionContext) {
        *self.0.value.borrow_mut() = value;
        self.0.changed(ac);
    }

    /// Replaces the value only if it differs from the current one.
    ///
    /// Returns `true` if the value was changed.
    pub fn set_dedup(&self, value: T, ac: &mut ActionContext) -> bool
    where
        T: PartialEq,
    {
        if *self.0.value.borrow() == value {
            return false;
        }
        self.set(value, ac);
        true
    }

    /// Read-only view of this state.
    pub fn to_signal(&self) -> Signal<T>
    where
        T: Clone,
    {
        Signal::from_node(self.0.clone())
    }
}
impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.value.try_borrow() {
            Ok(value) => fmt::Debug::fmt(&*value, f),
            Err(_) => f.write_str("<borrowed>"),
        }
    }
}

struct StateNode<T: 'static> {
    value: RefCell<T>,
    changed_at: Cell<Revision>,
    observers: Observers,
}
impl<T: 'static> StateNode<T> {
    fn changed(&self, _ac: &mut ActionContext) {
        self.changed_at.set(Revision::next());
        self.observers.invalidate();
    }
}

impl<T: 'static> Source for StateNode<T> {
    fn observe(&self, observer: Weak<dyn Observer>) -> usize {
        self.observers.insert(observer)
    }
    fn unobserve(&self, key: usize) {
        self.observers.remove(key)
    }
    fn changed_since(self: Rc<Self>, revision: Revision) -> bool {
        self.changed_at.get() > revision
    }
}

impl<T: Clone + 'static> SignalNode for StateNode<T> {
    type Value = T;
    fn get(self: Rc<Self>, sc: &mut SignalContext) -> T {
        sc.track(self.clone());
        let value = self.value.borrow();
        value.clone()
    }
}
