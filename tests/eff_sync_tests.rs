//! Integration tests for the synchronous `EffSync` container.

#![cfg(feature = "effect")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use funcify::effect::EffSync;
use funcify::triple::Triple;
use rstest::rstest;

#[rstest]
fn chains_defer_until_run() {
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = counter.clone();

    let effect = EffSync::new(move || {
        seen.fetch_add(1, Ordering::SeqCst);
        2
    })
    .map(|v| v + 1)
    .bind(|v| EffSync::of(v * 10));

    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(effect.run(), 30);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[rstest]
fn catch_recovers_with_the_panic_message() {
    let effect = EffSync::new(|| -> i32 { panic!("sync failure") })
        .catch(|message| EffSync::of(i32::try_from(message.len()).unwrap()));
    assert_eq!(effect.run(), 12);
}

#[rstest]
fn ensure_runs_cleanup_on_the_panic_path() {
    let cleanups = Arc::new(AtomicUsize::new(0));
    let seen = cleanups.clone();

    let effect = EffSync::new(|| -> i32 { panic!("boom") })
        .ensure(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .catch(|_| EffSync::of(0));

    assert_eq!(effect.run(), 0);
    assert_eq!(cleanups.load(Ordering::SeqCst), 1);
}

#[rstest]
fn right_combinators_short_circuit_bad_branches() {
    let touched = Arc::new(AtomicUsize::new(0));
    let seen = touched.clone();

    let effect: EffSync<Triple<i32, String>> =
        EffSync::of(Triple::Nothing).map_right(move |v: i32| {
            seen.fetch_add(1, Ordering::SeqCst);
            v
        });

    assert!(effect.run().is_nothing());
    assert_eq!(touched.load(Ordering::SeqCst), 0);
}

#[rstest]
fn right_combinators_chain_on_success() {
    let effect: EffSync<Triple<i32, String>> = EffSync::of(Triple::pure(3))
        .map_right(|v| v + 1)
        .bind_right(|v| EffSync::of(Triple::pure(v * 10)));
    assert_eq!(effect.run(), Triple::Right(40));
}
