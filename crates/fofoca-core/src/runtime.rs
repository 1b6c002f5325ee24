//! Tokio event loop around [`NavigationSync`].
//!
//! [`SyncDriver`] moves the synchronizer into a spawned task that reacts to
//! session changes and live query events, and publishes every new list on a
//! `watch` channel. Snapshot events are processed in arrival order; the
//! epoch check inside [`NavigationSync::on_snapshot`] drops anything left
//! over from a replaced subscription.

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::nav::NavigationList;
use crate::session::{Session, SessionProvider};
use crate::snapshot::{LiveQuery, SnapshotEvent};
use crate::sync::NavigationSync;

/// Sender handed to live query implementations for their deliveries.
pub type SnapshotSink = mpsc::Sender<SnapshotEvent>;

/// Create the channel carrying live query deliveries to the driver.
#[must_use]
pub fn snapshot_channel(capacity: usize) -> (SnapshotSink, mpsc::Receiver<SnapshotEvent>) {
    mpsc::channel(capacity.max(1))
}

/// Session provider backed by a `watch` channel.
#[derive(Debug, Clone)]
pub struct WatchSessionProvider {
    rx: watch::Receiver<Option<Session>>,
}

impl WatchSessionProvider {
    /// Create a provider and the sender that updates it.
    #[must_use]
    pub fn new(initial: Option<Session>) -> (watch::Sender<Option<Session>>, Self) {
        let (tx, rx) = watch::channel(initial);
        (tx, Self { rx })
    }

    /// Receiver to hand to [`SyncDriver::start`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.rx.clone()
    }
}

impl SessionProvider for WatchSessionProvider {
    fn current_user(&self) -> Option<Session> {
        self.rx.borrow().clone()
    }
}

/// Handle for controlling a running driver.
#[derive(Debug, Clone)]
pub struct SyncDriverHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl SyncDriverHandle {
    /// Stop the driver. The live query subscription is released.
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Runs a [`NavigationSync`] on the tokio runtime.
pub struct SyncDriver<Q: LiveQuery> {
    sync: NavigationSync<Q>,
}

impl<Q> SyncDriver<Q>
where
    Q: LiveQuery + Send + 'static,
{
    /// Create a driver over the initial list.
    #[must_use]
    pub const fn new(entries: NavigationList, query: Q) -> Self {
        Self {
            sync: NavigationSync::new(entries, query),
        }
    }

    /// Start the event loop.
    ///
    /// The current session value is applied immediately. Returns a receiver
    /// of the synchronized list and a handle to stop the loop. The loop also
    /// ends, releasing the subscription, when the session sender is dropped.
    #[must_use]
    pub fn start(
        self,
        mut session_rx: watch::Receiver<Option<Session>>,
        mut snapshot_rx: mpsc::Receiver<SnapshotEvent>,
    ) -> (watch::Receiver<NavigationList>, SyncDriverHandle) {
        let (list_tx, list_rx) = watch::channel(self.sync.entries().clone());
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let mut sync = self.sync;

        tokio::spawn(async move {
            let initial = session_rx.borrow_and_update().clone();
            sync.on_session_changed(initial.as_ref());

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => {
                        debug!("Sync driver shutting down");
                        break;
                    }
                    changed = session_rx.changed() => {
                        if changed.is_err() {
                            info!("Session provider closed, stopping sync driver");
                            break;
                        }
                        let session = session_rx.borrow_and_update().clone();
                        sync.on_session_changed(session.as_ref());
                    }
                    Some(event) = snapshot_rx.recv() => {
                        if sync.on_snapshot(event).changed() {
                            list_tx.send_replace(sync.entries().clone());
                        }
                    }
                }
            }

            sync.release();
            debug!("Sync driver ended");
        });

        (list_rx, SyncDriverHandle { shutdown_tx })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::error::Result;
    use crate::snapshot::{Epoch, NotificationFilter, NotificationSnapshot};

    /// Live query that answers every subscription with a fixed count per user.
    struct FakeQuery {
        sink: SnapshotSink,
        counts: HashMap<String, u32>,
        subscribed: Mutex<Vec<(NotificationFilter, Epoch)>>,
        unsubscribed: Mutex<Vec<Epoch>>,
    }

    impl FakeQuery {
        fn new(sink: SnapshotSink, counts: &[(&str, u32)]) -> Self {
            Self {
                sink,
                counts: counts.iter().map(|(u, c)| ((*u).to_string(), *c)).collect(),
                subscribed: Mutex::new(vec![]),
                unsubscribed: Mutex::new(vec![]),
            }
        }
    }

    impl LiveQuery for FakeQuery {
        fn subscribe(&self, filter: &NotificationFilter, epoch: Epoch) -> Result<()> {
            self.subscribed
                .lock()
                .expect("lock")
                .push((filter.clone(), epoch));
            let size = self.counts.get(&filter.target_user_id).copied().unwrap_or(0);
            let _ = self
                .sink
                .try_send(SnapshotEvent::snapshot(epoch, NotificationSnapshot::new(size)));
            Ok(())
        }

        fn unsubscribe(&self, epoch: Epoch) {
            self.unsubscribed.lock().expect("lock").push(epoch);
        }
    }

    async fn wait_for_count(rx: &mut watch::Receiver<NavigationList>, count: u32) {
        tokio::time::timeout(
            Duration::from_secs(1),
            rx.wait_for(|list| list.target_count() == Some(count)),
        )
        .await
        .expect("timeout waiting for badge")
        .expect("driver ended");
    }

    #[tokio::test]
    async fn test_driver_applies_initial_session() {
        let (sink, events) = snapshot_channel(8);
        let query = Arc::new(FakeQuery::new(sink, &[("alice", 2)]));
        let (_session_tx, provider) =
            WatchSessionProvider::new(Some(Session::new("alice", "alice")));

        let (mut list_rx, handle) =
            SyncDriver::new(NavigationList::defaults(), Arc::clone(&query))
                .start(provider.subscribe(), events);

        wait_for_count(&mut list_rx, 2).await;
        let subscribed = query.subscribed.lock().expect("lock").clone();
        assert_eq!(
            subscribed,
            vec![(NotificationFilter::for_user("alice"), Epoch::INITIAL.next())]
        );

        handle.stop().await;
    }

    #[tokio::test]
    async fn test_driver_discards_stale_epoch_after_switch() {
        let (sink, events) = snapshot_channel(8);
        let query = Arc::new(FakeQuery::new(sink.clone(), &[("alice", 2), ("bob", 5)]));
        let (session_tx, provider) =
            WatchSessionProvider::new(Some(Session::new("alice", "alice")));

        let (mut list_rx, handle) =
            SyncDriver::new(NavigationList::defaults(), Arc::clone(&query))
                .start(provider.subscribe(), events);
        wait_for_count(&mut list_rx, 2).await;

        session_tx.send_replace(Some(Session::new("bob", "bob")));
        wait_for_count(&mut list_rx, 5).await;
        assert_eq!(provider.current_user().map(|s| s.id), Some("bob".to_string()));

        // A late delivery from alice's subscription, followed by a fresh one for bob.
        let alice_epoch = Epoch::INITIAL.next();
        let bob_epoch = alice_epoch.next();
        sink.send(SnapshotEvent::snapshot(alice_epoch, NotificationSnapshot::new(9)))
            .await
            .expect("send");
        sink.send(SnapshotEvent::snapshot(bob_epoch, NotificationSnapshot::new(7)))
            .await
            .expect("send");

        wait_for_count(&mut list_rx, 7).await;
        assert_eq!(list_rx.borrow().target_count(), Some(7));
        assert_eq!(*query.unsubscribed.lock().expect("lock"), vec![alice_epoch]);

        handle.stop().await;
    }

    #[tokio::test]
    async fn test_driver_stop_releases_subscription() {
        let (sink, events) = snapshot_channel(8);
        let query = Arc::new(FakeQuery::new(sink, &[("alice", 1)]));
        let (_session_tx, provider) =
            WatchSessionProvider::new(Some(Session::new("alice", "alice")));

        let (mut list_rx, handle) =
            SyncDriver::new(NavigationList::defaults(), Arc::clone(&query))
                .start(provider.subscribe(), events);
        wait_for_count(&mut list_rx, 1).await;

        handle.stop().await;
        tokio::time::timeout(Duration::from_secs(1), list_rx.changed())
            .await
            .expect("timeout waiting for driver to end")
            .expect_err("list sender should be dropped");

        assert_eq!(
            *query.unsubscribed.lock().expect("lock"),
            vec![Epoch::INITIAL.next()]
        );
    }

    #[tokio::test]
    async fn test_driver_sign_out_keeps_badge_and_unsubscribes() {
        let (sink, events) = snapshot_channel(8);
        let query = Arc::new(FakeQuery::new(sink.clone(), &[("alice", 3)]));
        let (session_tx, provider) =
            WatchSessionProvider::new(Some(Session::new("alice", "alice")));

        let (mut list_rx, handle) =
            SyncDriver::new(NavigationList::defaults(), Arc::clone(&query))
                .start(provider.subscribe(), events);
        wait_for_count(&mut list_rx, 3).await;

        session_tx.send_replace(None);
        // Queued behind the session change, so it is seen after the suspension.
        sink.send(SnapshotEvent::snapshot(
            Epoch::INITIAL.next(),
            NotificationSnapshot::new(8),
        ))
        .await
        .expect("send");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(list_rx.borrow().target_count(), Some(3));
        assert_eq!(
            *query.unsubscribed.lock().expect("lock"),
            vec![Epoch::INITIAL.next()]
        );

        handle.stop().await;
    }

    #[test]
    fn test_snapshot_channel_minimum_capacity() {
        let (sink, _events) = snapshot_channel(0);
        assert_eq!(sink.max_capacity(), 1);
    }
}
