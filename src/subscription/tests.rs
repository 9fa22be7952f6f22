use std::{cell::Cell, rc::Rc};

use assert_call::{call, CallRecorder};

use super::*;

fn on_unsubscribe(rc: Rc<Cell<i32>>) {
    call!("{}", rc.get());
}

#[test]
fn from_rc_keeps_value_alive() {
    let rc = Rc::new(Cell::new(3));
    let s = Subscription::from_rc(rc.clone());
    assert_eq!(Rc::strong_count(&rc), 2);
    drop(s);
    assert_eq!(Rc::strong_count(&rc), 1);
}

#[test]
fn from_weak_fn_calls_when_alive() {
    let mut cr = CallRecorder::new();
    let rc = Rc::new(Cell::new(9));
    let s = Subscription::from_weak_fn(Rc::downgrade(&rc), on_unsubscribe);
    cr.verify(());
    drop(s);
    cr.verify("9");
}

#[test]
fn from_weak_fn_noop_when_dead() {
    let mut cr = CallRecorder::new();
    let rc = Rc::new(Cell::new(1));
    let weak = Rc::downgrade(&rc);
    drop(rc);
    drop(Subscription::from_weak_fn(weak, on_unsubscribe));
    cr.verify(());
}
