use assert_call::{call, CallRecorder};

use crate::{core::Runtime, effect, Signal, State};

#[test]
fn runs_on_update_and_after_changes() {
    let mut rt = Runtime::new();
    let mut cr = CallRecorder::new();
    let s = State::new(10);

    let s0 = s.to_signal();
    let e = effect(move |sc| call!("{}", s0.get(sc)));
    cr.verify(());

    rt.update();
    cr.verify("10");

    rt.update();
    cr.verify(());

    s.set(20, rt.ac());
    rt.update();
    cr.verify("20");

    s.set(30, rt.ac());
    drop(e);
    rt.update();
    cr.verify(());
}

#[test]
fn skips_when_deduplicated_signal_is_unchanged() {
    let mut rt = Runtime::new();
    let mut cr = CallRecorder::new();
    let n = State::new(1);
    let is_big = {
        let n = n.clone();
        Signal::new_dedup(move |sc| n.get(sc) > 10)
    };
    let _e = effect(move |sc| call!("{}", is_big.get(sc)));
    rt.update();
    cr.verify("false");

    n.set(5, rt.ac());
    rt.update();
    cr.verify(());

    n.set(50, rt.ac());
    rt.update();
    cr.verify("true");
}

#[test]
fn switches_dependencies() {
    let mut rt = Runtime::new();
    let mut cr = CallRecorder::new();
    let flag = State::new(true);
    let a = State::new("a");
    let b = State::new("b");

    let _e = effect({
        let (flag, a, b) = (flag.clone(), a.clone(), b.clone());
        move |sc| {
            if flag.get(sc) {
                call!("{}", a.get(sc));
            } else {
                call!("{}", b.get(sc));
            }
        }
    });
    rt.update();
    cr.verify("a");

    flag.set(false, rt.ac());
    rt.update();
    cr.verify("b");

    a.set("a2", rt.ac());
    rt.update();
    cr.verify(());

    b.set("b2", rt.ac());
    rt.update();
    cr.verify("b2");
}
