//! Tests for the `OptionT` transformer.

use optask::fault::Fault;
use optask::option_transformer::OptionT;
use optask::task::Task;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[rstest]
#[tokio::test]
async fn test_pure_is_defined() {
    assert_eq!(OptionT::pure(42).run().await.unwrap(), Some(42));
}

#[rstest]
#[tokio::test]
async fn test_none_is_undefined() {
    assert_eq!(OptionT::<i32>::none().run().await.unwrap(), None);
}

#[rstest]
#[tokio::test]
async fn test_lift_wraps_an_always_defined_task() {
    assert_eq!(OptionT::lift(Task::now(7)).run().await.unwrap(), Some(7));
}

#[rstest]
#[tokio::test]
async fn test_fmap_transforms_the_defined_case() {
    let value = OptionT::pure(21).fmap(|n| n * 2).run().await.unwrap();
    assert_eq!(value, Some(42));
}

#[rstest]
#[tokio::test]
async fn test_fmap_skips_undefined() {
    let invocations = Arc::new(AtomicUsize::new(0));
    let probe = invocations.clone();

    let value = OptionT::<i32>::none()
        .fmap(move |n| {
            probe.fetch_add(1, Ordering::SeqCst);
            n
        })
        .run()
        .await
        .unwrap();

    assert_eq!(value, None);
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn test_flat_map_chains_and_short_circuits() {
    let chained = OptionT::pure(10)
        .flat_map(|n| OptionT::pure(n + 1))
        .run()
        .await
        .unwrap();
    assert_eq!(chained, Some(11));

    let invocations = Arc::new(AtomicUsize::new(0));
    let probe = invocations.clone();
    let skipped = OptionT::<i32>::none()
        .flat_map(move |n| {
            probe.fetch_add(1, Ordering::SeqCst);
            OptionT::pure(n)
        })
        .run()
        .await
        .unwrap();

    assert_eq!(skipped, None);
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn test_or_else_prefers_the_defined_value() {
    let invocations = Arc::new(AtomicUsize::new(0));
    let probe = invocations.clone();

    let value = OptionT::pure(1)
        .or_else(move || {
            probe.fetch_add(1, Ordering::SeqCst);
            OptionT::pure(2)
        })
        .run()
        .await
        .unwrap();

    assert_eq!(value, Some(1));
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn test_or_else_falls_back_when_undefined() {
    let value = OptionT::<i32>::none()
        .or_else(|| OptionT::pure(2))
        .run()
        .await
        .unwrap();
    assert_eq!(value, Some(2));
}

#[rstest]
#[tokio::test]
async fn test_get_or_else_is_lazy() {
    let invocations = Arc::new(AtomicUsize::new(0));
    let probe = invocations.clone();

    let value = OptionT::pure(1)
        .get_or_else(move || {
            probe.fetch_add(1, Ordering::SeqCst);
            Task::now(0)
        })
        .await
        .unwrap();

    assert_eq!(value, 1);
    assert_eq!(invocations.load(Ordering::SeqCst), 0);

    let fallback = OptionT::<i32>::none().get_or_else(|| Task::now(0)).await.unwrap();
    assert_eq!(fallback, 0);
}

#[rstest]
#[tokio::test]
async fn test_faults_pass_through_the_option_channel() {
    let fault = OptionT::<i32>::fail(Fault::message("boom"))
        .fmap(|n| n + 1)
        .or_else(|| OptionT::pure(0))
        .run()
        .await
        .unwrap_err();

    assert_eq!(fault.to_string(), "boom");
}
