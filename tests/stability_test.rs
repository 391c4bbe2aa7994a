//! Stability waiter timing branches and the subscription teardown contract.

use depobot::browser::{wait_stable_on, NetworkSubscription};
use futures::StreamExt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn counting(
    stream: futures::stream::BoxStream<'static, ()>,
) -> (NetworkSubscription, Arc<AtomicU32>) {
    let teardowns = Arc::new(AtomicU32::new(0));
    let counter = teardowns.clone();
    let sub = NetworkSubscription::from_stream(stream, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (sub, teardowns)
}

#[tokio::test]
async fn silent_page_is_stable_immediately() {
    let (sub, teardowns) = counting(futures::stream::pending().boxed());

    assert!(wait_stable_on(sub, 500, 5_000).await);
    assert_eq!(teardowns.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn burst_then_silence_becomes_stable() {
    let events = futures::stream::iter([(), (), ()])
        .chain(futures::stream::pending())
        .boxed();
    let (sub, teardowns) = counting(events);

    assert!(wait_stable_on(sub, 100, 5_000).await);
    assert_eq!(teardowns.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn constant_traffic_times_out_and_still_tears_down() {
    let ticks = futures::stream::unfold((), |()| async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Some(((), ()))
    });
    let events = futures::stream::iter([()]).chain(ticks).boxed();
    let (sub, teardowns) = counting(events);

    assert!(!wait_stable_on(sub, 400, 900).await);
    assert_eq!(teardowns.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn teardown_fires_exactly_once_even_when_dropped_unpolled() {
    let (sub, teardowns) = counting(futures::stream::pending().boxed());
    drop(sub);
    assert_eq!(teardowns.load(Ordering::SeqCst), 1);
}
