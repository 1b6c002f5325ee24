//! Navigation state synchronizer.
//!
//! [`NavigationSync`] owns the canonical [`NavigationList`] and keeps the
//! notification badge in line with the latest live query snapshot. It is
//! driven by two kinds of events:
//! - session changes, which rebuild the query filter and re-subscribe under a
//!   fresh [`Epoch`]
//! - snapshot events, which are applied only if they carry the epoch of the
//!   active subscription
//!
//! The synchronizer never blocks and never fails loudly: subscription errors
//! and stale events leave the list as it was.

use tracing::{debug, info, warn};

use crate::nav::NavigationList;
use crate::session::Session;
use crate::snapshot::{Epoch, LiveQuery, NotificationFilter, SnapshotEvent, SnapshotOutcome};

/// What a session change did to the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTransition {
    /// Same user as before, nothing to do.
    Unchanged,
    /// Subscribed for the new user under this epoch.
    Subscribed(Epoch),
    /// Signed out; no subscription under this epoch.
    Suspended(Epoch),
    /// The live query refused the subscription for this epoch.
    Failed(Epoch),
}

/// What a snapshot event did to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The badge count changed.
    Applied,
    /// The badge already showed this count.
    Unchanged,
    /// No entry is flagged as notification target.
    NoTarget,
    /// The event belongs to a superseded or inactive subscription.
    Stale {
        /// Epoch the event carried.
        received: Epoch,
        /// Current epoch.
        current: Epoch,
    },
    /// The live query reported a failure.
    Failed(String),
    /// The live query refused the subscription after accepting the request.
    /// The next session notification for the same user subscribes again.
    Rejected(String),
}

impl SyncOutcome {
    /// Whether a new list was produced.
    #[must_use]
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone)]
struct ActiveSubscription {
    epoch: Epoch,
    filter: NotificationFilter,
}

/// Keeps a navigation list in sync with the unread-notification live query.
pub struct NavigationSync<Q: LiveQuery> {
    entries: NavigationList,
    query: Q,
    epoch: Epoch,
    user_id: Option<String>,
    subscription: Option<ActiveSubscription>,
}

impl<Q: LiveQuery> NavigationSync<Q> {
    /// Take ownership of the initial list. Nothing is subscribed until the
    /// first session change.
    pub const fn new(entries: NavigationList, query: Q) -> Self {
        Self {
            entries,
            query,
            epoch: Epoch::INITIAL,
            user_id: None,
            subscription: None,
        }
    }

    /// The synchronized list.
    pub const fn entries(&self) -> &NavigationList {
        &self.entries
    }

    /// The current epoch.
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Filter of the active subscription, if any.
    pub fn filter(&self) -> Option<&NotificationFilter> {
        self.subscription.as_ref().map(|s| &s.filter)
    }

    /// Whether a subscription is active.
    pub const fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// The wrapped live query.
    pub const fn query(&self) -> &Q {
        &self.query
    }

    /// React to a session change.
    ///
    /// A different user id (including signing in or out) tears down the
    /// current subscription and moves to a new epoch, so anything still in
    /// flight from the old one is ignored by [`Self::on_snapshot`].
    pub fn on_session_changed(&mut self, session: Option<&Session>) -> SessionTransition {
        let user_id = session.map(|s| s.id.as_str());
        if self.user_id.as_deref() == user_id {
            return SessionTransition::Unchanged;
        }

        self.release();
        self.epoch = self.epoch.next();
        self.user_id = user_id.map(str::to_owned);
        let epoch = self.epoch;

        let Some(user_id) = user_id else {
            info!(%epoch, "Signed out, notification subscription suspended");
            return SessionTransition::Suspended(epoch);
        };

        let filter = NotificationFilter::for_user(user_id);
        match self.query.subscribe(&filter, epoch) {
            Ok(()) => {
                info!(%epoch, user_id, "Subscribed to unread notifications");
                self.subscription = Some(ActiveSubscription { epoch, filter });
                SessionTransition::Subscribed(epoch)
            }
            Err(e) => {
                warn!(%epoch, user_id, error = %e, "Notification subscription failed");
                // Forget the user so the next notification for it retries.
                self.user_id = None;
                SessionTransition::Failed(epoch)
            }
        }
    }

    /// Apply a live query event.
    pub fn on_snapshot(&mut self, event: SnapshotEvent) -> SyncOutcome {
        let active = self.subscription.as_ref().map(|s| s.epoch);
        if active != Some(event.epoch) {
            debug!(
                received = %event.epoch,
                current = %self.epoch,
                "Discarding stale snapshot"
            );
            return SyncOutcome::Stale {
                received: event.epoch,
                current: self.epoch,
            };
        }

        match event.outcome {
            SnapshotOutcome::Failed(reason) => {
                warn!(epoch = %event.epoch, %reason, "Notification query failed, keeping badge");
                SyncOutcome::Failed(reason)
            }
            SnapshotOutcome::Rejected(reason) => {
                warn!(epoch = %event.epoch, %reason, "Notification subscription rejected");
                // Never opened, so there is nothing to unsubscribe.
                self.subscription = None;
                self.user_id = None;
                SyncOutcome::Rejected(reason)
            }
            SnapshotOutcome::Snapshot(snapshot) => {
                let previous = self.entries.target_count();
                match self.entries.try_apply_snapshot(&snapshot) {
                    Ok(_) if previous == Some(snapshot.size) => SyncOutcome::Unchanged,
                    Ok(next) => {
                        debug!(
                            epoch = %event.epoch,
                            count = snapshot.size,
                            "Notification badge updated"
                        );
                        self.entries = next;
                        SyncOutcome::Applied
                    }
                    Err(e) => {
                        debug!("{e}, ignoring snapshot");
                        SyncOutcome::NoTarget
                    }
                }
            }
        }
    }

    /// Release the active subscription, if any.
    ///
    /// Called when the sidebar is no longer displayed; also runs on drop.
    pub fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            debug!(epoch = %subscription.epoch, "Releasing notification subscription");
            self.query.unsubscribe(subscription.epoch);
        }
    }
}

impl<Q: LiveQuery> Drop for NavigationSync<Q> {
    fn drop(&mut self) {
        self.release();
    }
}
