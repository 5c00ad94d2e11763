//! Integration tests for the asynchronous currying facade.
//!
//! `AsyncCurry` must walk the chain step for step like `Curry` does: the
//! same validation outcomes, the same completion policy, the same branching
//! behaviour. The only difference is that invocation awaits the wrapped
//! async function.

#![cfg(feature = "async")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use funcify::args;
use funcify::curry::{AsyncCurry, BadArgumentsKind, CallArgs, Curry, Signature};

fn spec3() -> Signature<i32> {
    Signature::builder()
        .required("a")
        .required("b")
        .required("c")
        .build()
        .unwrap()
}

fn async_add3() -> AsyncCurry<i32, i32> {
    AsyncCurry::new("add3", spec3(), |call: CallArgs<i32>| async move {
        call.positional.iter().sum()
    })
}

// =============================================================================
// Step-for-Step Equivalence with the Synchronous Facade
// =============================================================================

#[tokio::test]
async fn async_chain_completes_exactly_like_the_sync_chain() {
    let sync_result = Curry::new("add3", spec3(), |call: CallArgs<i32>| {
        call.positional.iter().sum::<i32>()
    })
    .apply(args![1])
    .unwrap()
    .unwrap_partial()
    .apply(args![2, 3])
    .unwrap()
    .done();

    let step = async_add3().apply(args![1]).await.unwrap().unwrap_partial();
    let async_result = step.apply(args![2, 3]).await.unwrap().done();

    assert_eq!(sync_result, async_result);
    assert_eq!(async_result, Some(6));
}

#[tokio::test]
async fn async_validation_mirrors_the_sync_errors() {
    let step = async_add3().apply(args![a = 1]).await.unwrap().unwrap_partial();
    let error = step.apply(args![a = 2]).await.unwrap_err();
    assert_eq!(
        error.bad_arguments().unwrap().kind,
        BadArgumentsKind::Duplicate("a".to_string())
    );

    let error = async_add3().apply(args![z = 1]).await.unwrap_err();
    assert_eq!(
        error.bad_arguments().unwrap().kind,
        BadArgumentsKind::UnexpectedKeyword("z".to_string())
    );
}

#[tokio::test]
async fn async_continuations_branch_independently() {
    let shared = async_add3()
        .apply(args![1, 2])
        .await
        .unwrap()
        .unwrap_partial();

    let low = shared.apply(args![3]).await.unwrap().done();
    let high = shared.apply(args![30]).await.unwrap().done();

    assert_eq!(low, Some(6));
    assert_eq!(high, Some(33));
}

// =============================================================================
// Awaiting the Target
// =============================================================================

#[tokio::test]
async fn the_target_may_suspend_before_resolving() {
    let spec = Signature::builder().required("ms").build().unwrap();
    let sleepy = AsyncCurry::new("sleepy", spec, |call: CallArgs<u64>| async move {
        tokio::time::sleep(Duration::from_millis(call.positional[0])).await;
        call.positional[0]
    });
    assert_eq!(sleepy.apply(args![5]).await.unwrap().done(), Some(5));
}

#[tokio::test]
async fn validation_happens_before_the_target_is_polled() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let spec = Signature::builder().required("a").build().unwrap();
    let counting = AsyncCurry::new("counting", spec, move |call: CallArgs<i32>| {
        let seen = seen.clone();
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
            call.positional[0]
        }
    });

    assert!(counting.apply(args![1, 2]).await.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(counting.apply(args![1]).await.unwrap().done(), Some(1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Finalize
// =============================================================================

#[tokio::test]
async fn finalize_forces_completion_with_empty_channels() {
    let spec = Signature::builder()
        .required("a")
        .var_positional("rest")
        .build()
        .unwrap();
    let report = AsyncCurry::new("report", spec, |call: CallArgs<i32>| async move {
        format!("{:?}+{:?}", call.positional, call.var_positional)
    });

    let step = report.apply(args![1]).await.unwrap().unwrap_partial();
    assert_eq!(step.finalize().await.unwrap(), "[1]+[]");
}

#[tokio::test]
async fn finalize_still_rejects_missing_required_slots() {
    let step = async_add3().apply(args![1]).await.unwrap().unwrap_partial();
    let error = step.finalize().await.unwrap_err();
    assert_eq!(
        error.bad_arguments().unwrap().kind,
        BadArgumentsKind::MissingRequired
    );
}
