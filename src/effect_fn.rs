use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use crate::{
    core::{schedule, Dependencies, Observer, Reaction},
    SignalContext, Subscription,
};

#[cfg(test)]
mod tests;

/// Calls `f` now and again every time a state or signal it read changes.
///
/// Calls happen in [`Runtime::update`](crate::core::Runtime::update), at most
/// once per update. A dependency that was invalidated but ends up with an equal
/// value (a deduplicated signal) does not cause a call.
///
/// Dropping the returned [`Subscription`] stops the calls.
pub fn effect(f: impl FnMut(&mut SignalContext) + 'static) -> Subscription {
    let node = Rc::new_cyclic(|this: &Weak<EffectNode<_>>| EffectNode {
        body: RefCell::new(EffectBody {
            deps: Dependencies::new(),
            f,
            has_run: false,
        }),
        is_scheduled: Cell::new(false),
        this: this.clone(),
    });
    node.schedule();
    Subscription::from_rc(node)
}

struct EffectBody<F> {
    deps: Dependencies,
    f: F,
    has_run: bool,
}

struct EffectNode<F> {
    body: RefCell<EffectBody<F>>,
    is_scheduled: Cell<bool>,
    this: Weak<Self>,
}
impl<F: FnMut(&mut SignalContext) + 'static> EffectNode<F> {
    fn schedule(&self) {
        if !self.is_scheduled.replace(true) {
            let this: Weak<dyn Reaction> = self.this.clone();
            schedule(this);
        }
    }
}

impl<F: FnMut(&mut SignalContext) + 'static> Reaction for EffectNode<F> {
    fn react(self: Rc<Self>) {
        self.is_scheduled.set(false);
        let body = &mut *self.body.borrow_mut();
        if body.has_run && !body.deps.is_outdated() {
            return;
        }
        body.has_run = true;
        let f = &mut body.f;
        let observer: Weak<dyn Observer> = self.this.clone();
        body.deps.track(observer, f);
    }
}

impl<F: FnMut(&mut SignalContext) + 'static> Observer for EffectNode<F> {
    fn invalidate(self: Rc<Self>) {
        self.schedule();
    }
}
