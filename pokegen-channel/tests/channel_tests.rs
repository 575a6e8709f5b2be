use pokegen_channel::{Channel, Teardown};

// ── Retention ─────────────────────────────────────────────────────

#[tokio::test]
async fn latest_delivers_current_value_to_new_subscribers() {
    let channel = Channel::latest(1);
    channel.emit(2);
    channel.emit(3);

    let mut sub = channel.subscribe();
    assert_eq!(sub.next().await, Some(3));
    assert_eq!(sub.try_next(), None);
}

#[tokio::test]
async fn latest_empty_has_no_value_until_first_emit() {
    let channel: Channel<u32> = Channel::latest_empty();
    assert_eq!(channel.current(), None);

    let mut sub = channel.subscribe();
    assert_eq!(sub.try_next(), None);

    channel.emit(7);
    assert_eq!(channel.current(), Some(7));
    assert_eq!(sub.next().await, Some(7));
}

#[tokio::test]
async fn replay_delivers_full_history_in_order() {
    let channel = Channel::replay();
    channel.emit("a");
    channel.emit("b");
    channel.emit("c");

    let mut sub = channel.subscribe();
    assert_eq!(sub.next().await, Some("a"));
    assert_eq!(sub.next().await, Some("b"));
    assert_eq!(sub.next().await, Some("c"));
    assert_eq!(sub.try_next(), None);
}

#[tokio::test]
async fn event_channel_retains_nothing() {
    let channel = Channel::event();
    channel.emit(1);

    let mut sub = channel.subscribe();
    assert_eq!(sub.try_next(), None);

    channel.emit(2);
    assert_eq!(sub.next().await, Some(2));
}

#[test]
fn current_is_none_for_replay_and_event() {
    let replay = Channel::replay();
    replay.emit(1);
    assert_eq!(replay.current(), None);

    let event = Channel::event();
    event.emit(1);
    assert_eq!(event.current(), None);
}

// ── Delivery ──────────────────────────────────────────────────────

#[tokio::test]
async fn emissions_reach_subscribers_in_emission_order() {
    let channel = Channel::event();
    let mut sub = channel.subscribe();

    for i in 0..100 {
        channel.emit(i);
    }
    for i in 0..100 {
        assert_eq!(sub.next().await, Some(i));
    }
}

#[tokio::test]
async fn every_subscriber_receives_every_emission() {
    let channel = Channel::event();
    let mut first = channel.subscribe();
    let mut second = channel.subscribe();

    channel.emit(42);
    assert_eq!(first.next().await, Some(42));
    assert_eq!(second.next().await, Some(42));
}

#[tokio::test]
async fn dropped_subscribers_are_pruned() {
    let channel = Channel::event();
    let sub = channel.subscribe();
    assert_eq!(channel.subscriber_count(), 1);

    drop(sub);
    channel.emit(1);
    assert_eq!(channel.subscriber_count(), 0);
}

#[tokio::test]
async fn clones_share_the_same_channel() {
    let channel = Channel::latest_empty();
    let alias = channel.clone();

    let mut sub = channel.subscribe();
    alias.emit(5);
    assert_eq!(sub.next().await, Some(5));
    assert_eq!(channel.current(), Some(5));
}

// ── Close ─────────────────────────────────────────────────────────

#[tokio::test]
async fn close_ends_subscriptions_after_backlog() {
    let channel = Channel::replay();
    channel.emit(1);
    let mut sub = channel.subscribe();

    channel.close();
    channel.emit(2);

    assert_eq!(sub.next().await, Some(1));
    assert_eq!(sub.next().await, None);
}

// ── Teardown ──────────────────────────────────────────────────────

#[tokio::test]
async fn teardown_fires_once_and_is_visible_late() {
    let teardown = Teardown::new();
    assert!(!teardown.is_fired());

    teardown.fire();
    teardown.fire();
    assert!(teardown.is_fired());

    // A waiter attaching after the fact resolves immediately.
    teardown.fired().await;
}

#[tokio::test]
async fn teardown_wakes_pending_waiters() {
    let teardown = Teardown::new();
    let waiter = {
        let teardown = teardown.clone();
        tokio::spawn(async move { teardown.fired().await })
    };

    teardown.fire();
    waiter.await.unwrap();
}
