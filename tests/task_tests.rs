//! Behavioral tests for the `Task` collaborator type.
//!
//! Covers deferral (nothing runs until awaited), the success and failure
//! channels, and the racing primitive.

use optask::fault::{EmptyRace, Fault};
use optask::task::Task;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[rstest]
#[tokio::test]
async fn test_now_resolves_immediately() {
    assert_eq!(Task::now(42).await.unwrap(), 42);
}

#[rstest]
#[tokio::test]
async fn test_fail_resolves_to_the_fault() {
    let fault = Task::<i32>::fail(Fault::message("boom")).await.unwrap_err();
    assert_eq!(fault.to_string(), "boom");
}

#[rstest]
#[tokio::test]
async fn test_new_defers_side_effects_until_awaited() {
    let effects = Arc::new(AtomicUsize::new(0));
    let probe = effects.clone();

    let task = Task::new(move || async move {
        probe.fetch_add(1, Ordering::SeqCst);
        42
    });

    assert_eq!(effects.load(Ordering::SeqCst), 0);
    assert_eq!(task.await.unwrap(), 42);
    assert_eq!(effects.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn test_from_future_defers_polling_until_awaited() {
    let effects = Arc::new(AtomicUsize::new(0));
    let probe = effects.clone();

    let task = Task::from_future(async move {
        probe.fetch_add(1, Ordering::SeqCst);
        42
    });

    assert_eq!(effects.load(Ordering::SeqCst), 0);
    assert_eq!(task.await.unwrap(), 42);
    assert_eq!(effects.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_debug_shows_the_state_without_the_payload() {
    assert_eq!(format!("{:?}", Task::now(42)), r#"Task { state: "Pure" }"#);
    assert_eq!(
        format!("{:?}", Task::<i32>::fail(Fault::message("boom"))),
        r#"Task { state: "Faulted" }"#
    );
}

#[rstest]
#[tokio::test]
async fn test_fmap_transforms_the_success_channel() {
    let task = Task::now(21).fmap(|n| n * 2);
    assert_eq!(task.await.unwrap(), 42);
}

#[rstest]
#[tokio::test]
async fn test_fmap_passes_faults_through() {
    let task = Task::<i32>::fail(Fault::message("boom")).fmap(|n| n * 2);
    assert_eq!(task.await.unwrap_err().to_string(), "boom");
}

#[rstest]
#[tokio::test]
async fn test_flat_map_chains_tasks() {
    let task = Task::now(10).flat_map(|n| Task::now(n + 5));
    assert_eq!(task.await.unwrap(), 15);
}

#[rstest]
#[tokio::test]
async fn test_flat_map_short_circuits_on_fault() {
    let invocations = Arc::new(AtomicUsize::new(0));
    let probe = invocations.clone();

    let task = Task::<i32>::fail(Fault::message("boom")).flat_map(move |n| {
        probe.fetch_add(1, Ordering::SeqCst);
        Task::now(n)
    });

    assert!(task.await.is_err());
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn test_and_then_is_flat_map() {
    let task = Task::now(10).and_then(|n| Task::now(n * 3));
    assert_eq!(task.await.unwrap(), 30);
}

#[rstest]
#[tokio::test]
async fn test_attempt_reifies_the_failure_channel() {
    let failed = Task::<i32>::fail(Fault::message("boom")).attempt().await.unwrap();
    assert_eq!(failed.unwrap_err().to_string(), "boom");

    let succeeded = Task::now(1).attempt().await.unwrap();
    assert_eq!(succeeded.unwrap(), 1);
}

#[rstest]
#[tokio::test]
async fn test_handle_error_recovers_a_fault() {
    let task = Task::<i32>::fail(Fault::message("boom")).handle_error(|fault| {
        assert_eq!(fault.to_string(), "boom");
        Task::now(7)
    });
    assert_eq!(task.await.unwrap(), 7);
}

#[rstest]
#[tokio::test]
async fn test_handle_error_passes_success_through() {
    let invocations = Arc::new(AtomicUsize::new(0));
    let probe = invocations.clone();

    let task = Task::now(3).handle_error(move |_| {
        probe.fetch_add(1, Ordering::SeqCst);
        Task::now(0)
    });

    assert_eq!(task.await.unwrap(), 3);
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn test_deferred_chains_stay_deferred() {
    let effects = Arc::new(AtomicUsize::new(0));
    let probe = effects.clone();

    let task = Task::new(move || async move {
        probe.fetch_add(1, Ordering::SeqCst);
        1
    })
    .fmap(|n| n + 1)
    .flat_map(|n| Task::now(n * 10));

    assert_eq!(effects.load(Ordering::SeqCst), 0);
    assert_eq!(task.await.unwrap(), 20);
    assert_eq!(effects.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn test_race_all_resolves_to_the_first_completion() {
    let slow = Task::new(|| async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        1
    });
    let fast = Task::new(|| async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        2
    });

    let (first, remaining) = Task::race_all(vec![slow, fast]).await.unwrap();
    assert_eq!(first, 2);
    assert_eq!(remaining.len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_race_all_remaining_resume_in_declared_order() {
    let first = Task::new(|| async {
        tokio::time::sleep(Duration::from_millis(40)).await;
        1
    });
    let second = Task::now(2);
    let third = Task::new(|| async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        3
    });

    let (winner, remaining) = Task::race_all(vec![first, second, third]).await.unwrap();
    assert_eq!(winner, 2);

    let values: Vec<i32> = {
        let mut collected = Vec::new();
        for task in remaining {
            collected.push(task.await.unwrap());
        }
        collected
    };
    assert_eq!(values, vec![1, 3]);
}

#[rstest]
#[tokio::test]
async fn test_race_all_empty_list_faults() {
    let fault = Task::<i32>::race_all(vec![]).await.unwrap_err();
    assert!(fault.downcast_ref::<EmptyRace>().is_some());
}

#[rstest]
#[tokio::test]
async fn test_race_all_faulting_first_completion_fails_fast() {
    let failing = Task::<i32>::fail(Fault::message("dead"));
    let healthy = Task::new(|| async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        1
    });

    let fault = Task::race_all(vec![failing, healthy]).await.unwrap_err();
    assert_eq!(fault.to_string(), "dead");
}

#[rstest]
#[tokio::test]
async fn test_delay_completes() {
    Task::delay(Duration::from_millis(1)).await.unwrap();
}
