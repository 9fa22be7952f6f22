use std::{
    any::Any,
    fmt,
    rc::{Rc, Weak},
};

#[cfg(test)]
mod tests;

/// Handle that keeps a registration alive.
///
/// Dropping it cancels the registration: an effect stops running, a history
/// handler is removed.
#[must_use]
pub struct Subscription(Option<Teardown>);

enum Teardown {
    Keep(#[allow(unused)] Rc<dyn Any>),
    Call(Box<dyn FnOnce()>),
}

impl Subscription {
    /// Keeps `rc` alive until the subscription is dropped.
    pub fn from_rc(rc: Rc<dyn Any>) -> Self {
        Self(Some(Teardown::Keep(rc)))
    }

    /// Calls `unsubscribe` on drop if `this` is still alive.
    pub fn from_weak_fn<T: 'static>(
        this: Weak<T>,
        unsubscribe: impl FnOnce(Rc<T>) + 'static,
    ) -> Self {
        Self(Some(Teardown::Call(Box::new(move || {
            if let Some(this) = this.upgrade() {
                unsubscribe(this)
            }
        }))))
    }
}
impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(Teardown::Call(f)) = self.0.take() {
            f()
        }
    }
}
impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.0 {
            Some(Teardown::Keep(_)) => "keep",
            Some(Teardown::Call(_)) => "call",
            None => "done",
        };
        f.debug_tuple("Subscription").field(&kind).finish()
    }
}
