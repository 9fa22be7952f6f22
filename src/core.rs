//! Reactive runtime.
//!
//! Sources ([`State`](crate::State) and computed [`Signal`](crate::Signal)s)
//! stamp every change with a revision taken from a per-thread clock. Sinks
//! remember the revision at which they last ran, so deciding whether a sink is
//! out of date only compares numbers. Writes invalidate observers eagerly;
//! recomputation happens lazily, when a value is read or an effect runs in
//! [`Runtime::update`].

use std::{
    cell::{Cell, RefCell},
    marker::PhantomData,
    mem::{replace, swap, take, transmute},
    rc::{Rc, Weak},
};

use derive_ex::derive_ex;
use slabmap::SlabMap;


thread_local! {
    static CLOCK: RefCell<Clock> = RefCell::new(Clock::default());
}

#[derive(Default)]
struct Clock {
    is_running: bool,
    revision: Revision,
    reactions: Vec<Weak<dyn Reaction>>,
}
impl Clock {
    fn with<T>(f: impl FnOnce(&mut Self) -> T) -> T {
        CLOCK.with(|c| f(&mut c.borrow_mut()))
    }
}

/// Point in the change history of the current thread.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub(crate) struct Revision(u64);

impl Revision {
    pub(crate) fn now() -> Self {
        Clock::with(|c| c.revision)
    }
    /// Advances the clock and returns the new revision.
    pub(crate) fn next() -> Self {
        Clock::with(|c| {
            c.revision.0 += 1;
            c.revision
        })
    }
}

/// Reactive runtime of the current thread.
///
/// State is written through [`ac`](Self::ac) and read through
/// [`sc`](Self::sc). Effects invalidated by writes run in
/// [`update`](Self::update). Only one runtime may exist per thread at a time.
#[derive_ex(Default)]
#[default(Self::new())]
pub struct Runtime {
    batch: Vec<Weak<dyn Reaction>>,
}
impl Runtime {
    pub fn new() -> Self {
        if Clock::with(|c| replace(&mut c.is_running, true)) {
            panic!("Only one `Runtime` can exist in the same thread at the same time.");
        }
        Self { batch: Vec::new() }
    }

    pub fn ac(&mut self) -> &mut ActionContext {
        ActionContext::new(self)
    }
    pub fn sc(&mut self) -> SignalContext<'_> {
        SignalContext::untracked()
    }

    /// Runs invalidated effects until none are left.
    pub fn update(&mut self) {
        loop {
            let mut batch = take(&mut self.batch);
            Clock::with(|c| swap(&mut c.reactions, &mut batch));
            if batch.is_empty() {
                self.batch = batch;
                return;
            }
            for reaction in batch.drain(..) {
                if let Some(reaction) = reaction.upgrade() {
                    reaction.react();
                }
            }
            self.batch = batch;
        }
    }
}
impl Drop for Runtime {
    fn drop(&mut self) {
        let pending = CLOCK.try_with(|c| {
            let mut c = c.borrow_mut();
            c.is_running = false;
            take(&mut c.reactions)
        });
        drop(pending);
    }
}

/// Context for changing state.
#[repr(transparent)]
pub struct ActionContext(Runtime);

impl ActionContext {
    fn new(rt: &mut Runtime) -> &mut Self {
        unsafe { transmute(rt) }
    }

    /// Reads state without tracking, e.g. to compute the next value of a write.
    pub fn sc(&mut self) -> SignalContext<'_> {
        self.0.sc()
    }
}

/// Context for reading state.
///
/// While a computed signal or an effect runs, its context records every source
/// read through it.
pub struct SignalContext<'s> {
    tracker: Option<&'s mut Tracker>,
    _runtime: PhantomData<&'s mut Runtime>,
}

impl<'s> SignalContext<'s> {
    fn untracked() -> Self {
        Self {
            tracker: None,
            _runtime: PhantomData,
        }
    }

    /// Records that the running sink depends on `source`.
    pub(crate) fn track(&mut self, source: Rc<dyn Source>) {
        if let Some(tracker) = &mut self.tracker {
            tracker.read(source);
        }
    }
}

/// Something whose value can be read and observed.
pub(crate) trait Source: 'static {
    fn observe(&self, observer: Weak<dyn Observer>) -> usize;
    fn unobserve(&self, key: usize);

    /// Brings the value up to date and returns `true` if it changed after `revision`.
    fn changed_since(self: Rc<Self>, revision: Revision) -> bool;
}

/// Something that must be told when a source it read may have changed.
pub(crate) trait Observer: 'static {
    fn invalidate(self: Rc<Self>);
}

/// Work queued for the next [`Runtime::update`].
pub(crate) trait Reaction: 'static {
    fn react(self: Rc<Self>);
}

pub(crate) fn schedule(reaction: Weak<dyn Reaction>) {
    Clock::with(|c| c.reactions.push(reaction));
}

/// Observers of one source.
///
/// Entries of observers that were dropped without unsubscribing are removed
/// on the next invalidation.
#[derive(Default)]
pub(crate) struct Observers(RefCell<SlabMap<Weak<dyn Observer>>>);

impl Observers {
    pub(crate) fn insert(&self, observer: Weak<dyn Observer>) -> usize {
        self.0.borrow_mut().insert(observer)
    }
    pub(crate) fn remove(&self, key: usize) {
        if let Ok(mut observers) = self.0.try_borrow_mut() {
            observers.remove(key);
        }
    }
    pub(crate) fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Tells every live observer that the source may have changed.
    pub(crate) fn invalidate(&self) {
        let mut live = Vec::new();
        let mut dead = Vec::new();
        for (key, observer) in self.0.borrow().iter() {
            match observer.upgrade() {
                Some(observer) => live.push(observer),
                None => dead.push(key),
            }
        }
        if !dead.is_empty() {
            let mut observers = self.0.borrow_mut();
            for key in dead {
                observers.remove(key);
            }
        }
        for observer in live {
            observer.invalidate();
        }
    }
}

struct Dependency {
    source: Rc<dyn Source>,
    key: usize,
}

/// Sources a sink read during its last run.
pub(crate) struct Dependencies {
    sources: Vec<Dependency>,
    seen_at: Revision,
}

impl Dependencies {
    pub(crate) fn new() -> Self {
        Self {
            sources: Vec::new(),
            seen_at: Revision::default(),
        }
    }

    /// Returns `true` if a source changed since the last [`track`](Self::track).
    pub(crate) fn is_outdated(&self) -> bool {
        let seen_at = self.seen_at;
        self.sources
            .iter()
            .any(|d| d.source.clone().changed_since(seen_at))
    }

    /// Runs `f`, replacing the recorded sources with the ones `f` reads.
    ///
    /// Sources read again keep their subscription; sources no longer read are unsubscribed.
    pub(crate) fn track<T>(
        &mut self,
        observer: Weak<dyn Observer>,
        f: impl FnOnce(&mut SignalContext) -> T,
    ) -> T {
        let mut tracker = Tracker {
            observer,
            previous: take(&mut self.sources),
            current: Vec::new(),
        };
        let value = f(&mut SignalContext {
            tracker: Some(&mut tracker),
            _runtime: PhantomData,
        });
        for d in tracker.previous.drain(..) {
            d.source.unobserve(d.key);
        }
        self.sources = take(&mut tracker.current);
        self.seen_at = Revision::now();
        value
    }
}
impl Drop for Dependencies {
    fn drop(&mut self) {
        for d in self.sources.drain(..) {
            d.source.unobserve(d.key);
        }
    }
}

struct Tracker {
    observer: Weak<dyn Observer>,
    previous: Vec<Dependency>,
    current: Vec<Dependency>,
}
impl Tracker {
    fn read(&mut self, source: Rc<dyn Source>) {
        if self.current.iter().any(|d| Rc::ptr_eq(&d.source, &source)) {
            return;
        }
        let d = match self
            .previous
            .iter()
            .position(|d| Rc::ptr_eq(&d.source, &source))
        {
            Some(index) => self.previous.swap_remove(index),
            None => Dependency {
                key: source.observe(self.observer.clone()),
                source,
            },
        };
        self.current.push(d);
    }
}

/// Flag set when a sink is invalidated and cleared when it catches up.
#[derive(Default)]
pub(crate) struct Stale(Cell<bool>);

impl Stale {
    /// Marks the sink stale. Returns `true` if it was fresh before.
    pub(crate) fn mark(&self) -> bool {
        !self.0.replace(true)
    }
    pub(crate) fn clear(&self) -> bool {
        self.0.replace(false)
    }
}
