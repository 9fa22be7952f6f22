use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use derive_ex::derive_ex;

use crate::{
    core::{Dependencies, Observer, Observers, Revision, Source, Stale},
    effect, SignalContext, Subscription,
};


pub(crate) trait SignalNode: 'static {
    type Value: 'static;
    fn get(self: Rc<Self>, sc: &mut SignalContext) -> Self::Value;
}

/// Read-only view of a value that can change over time.
///
/// Reading through [`get`](Self::get) registers a dependency on the
/// [`SignalContext`], so effects and computed signals that read it are
/// re-evaluated when it changes.
#[derive_ex(Clone, bound())]
pub struct Signal<T: 'static>(Rc<dyn SignalNode<Value = T>>);

impl<T: Clone + 'static> Signal<T> {
    /// Signal computed by `f`. The result is cached until a dependency changes.
    pub fn new(f: impl Fn(&mut SignalContext) -> T + 'static) -> Self {
        Self::from_node(ComputedNode::new(f, None))
    }

    /// Like [`new`](Self::new), but dependants are only notified when the result actually changes.
    pub fn new_dedup(f: impl Fn(&mut SignalContext) -> T + 'static) -> Self
    where
        T: PartialEq,
    {
        Self::from_node(ComputedNode::new(f, Some(<T as PartialEq>::eq)))
    }

    pub(crate) fn from_node(node: Rc<impl SignalNode<Value = T>>) -> Self {
        Signal(node)
    }

    pub fn get(&self, sc: &mut SignalContext) -> T {
        self.0.clone().get(sc)
    }

    pub fn map<U: Clone + 'static>(&self, f: impl Fn(T) -> U + 'static) -> Signal<U> {
        let this = self.clone();
        Signal::new(move |sc| f(this.get(sc)))
    }

    /// Calls `f` with the current value now and every time it changes.
    ///
    /// `f` runs during [`Runtime::update`](crate::core::Runtime::update).
    pub fn for_each(&self, mut f: impl FnMut(T) + 'static) -> Subscription {
        let this = self.clone();
        effect(move |sc| f(this.get(sc)))
    }
}
impl<T: 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Signal(..)")
    }
}

struct Cache<T, F> {
    f: F,
    value: Option<T>,
    deps: Dependencies,
}

struct ComputedNode<T: 'static, F> {
    cache: RefCell<Cache<T, F>>,
    stale: Stale,
    changed_at: Cell<Revision>,
    observers: Observers,
    this: Weak<Self>,
    eq: Option<fn(&T, &T) -> bool>,
}
impl<T, F> ComputedNode<T, F>
where
    T: Clone + 'static,
    F: Fn(&mut SignalContext) -> T + 'static,
{
    fn new(f: F, eq: Option<fn(&T, &T) -> bool>) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            cache: RefCell::new(Cache {
                f,
                value: None,
                deps: Dependencies::new(),
            }),
            stale: Stale::default(),
            changed_at: Cell::new(Revision::default()),
            observers: Observers::default(),
            this: this.clone(),
            eq,
        })
    }

    /// Recomputes the value if it was never computed or a dependency changed.
    fn refresh(&self) {
        let Ok(mut cache) = self.cache.try_borrow_mut() else {
            panic!("detect cyclic dependency");
        };
        let was_stale = self.stale.clear();
        let cache = &mut *cache;
        if cache.value.is_some() && !(was_stale && cache.deps.is_outdated()) {
            return;
        }
        let f = &cache.f;
        let observer: Weak<dyn Observer> = self.this.clone();
        let value = cache.deps.track(observer, |sc| f(sc));
        let changed = match (&cache.value, self.eq) {
            (Some(old), Some(eq)) => !eq(old, &value),
            _ => true,
        };
        if changed {
            self.changed_at.set(Revision::next());
        }
        cache.value = Some(value);
    }
}

impl<T, F> SignalNode for ComputedNode<T, F>
where
    T: Clone + 'static,
    F: Fn(&mut SignalContext) -> T + 'static,
{
    type Value = T;
    fn get(self: Rc<Self>, sc: &mut SignalContext) -> T {
        self.refresh();
        sc.track(self.clone());
        let cache = self.cache.borrow();
        match &cache.value {
            Some(value) => value.clone(),
            None => unreachable!("computed signal has no value after refresh"),
        }
    }
}

impl<T, F> Source for ComputedNode<T, F>
where
    T: Clone + 'static,
    F: Fn(&mut SignalContext) -> T + 'static,
{
    fn observe(&self, observer: Weak<dyn Observer>) -> usize {
        self.observers.insert(observer)
    }
    fn unobserve(&self, key: usize) {
        self.observers.remove(key)
    }
    fn changed_since(self: Rc<Self>, revision: Revision) -> bool {
        self.refresh();
        self.changed_at.get() > revision
    }
}

impl<T, F> Observer for ComputedNode<T, F>
where
    T: Clone + 'static,
    F: Fn(&mut SignalContext) -> T + 'static,
{
    fn invalidate(self: Rc<Self>) {
        if self.stale.mark() {
            self.observers.invalidate();
        }
    }
}
