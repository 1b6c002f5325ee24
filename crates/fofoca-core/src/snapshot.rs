//! Live notification query types.
//!
//! A live query re-delivers its result whenever the matching notification
//! set changes. Each delivery is a [`NotificationSnapshot`] wrapped in a
//! [`SnapshotEvent`] tagged with the [`Epoch`] of the subscription that
//! produced it, so late events from a replaced subscription can be told apart
//! from current ones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Subscription generation counter.
///
/// Every re-subscription gets a strictly greater epoch than its predecessor.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Epoch(u64);

impl Epoch {
    /// The epoch before any subscription has been made.
    pub const INITIAL: Self = Self(0);

    /// Returns the epoch that supersedes this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Raw generation number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A notification record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Record identifier.
    pub id: String,
    /// User the notification is addressed to.
    pub target_user_id: String,
    /// Whether the user has already seen the notification.
    pub is_checked: bool,
}

/// Filter parameters for the unread-notification live query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationFilter {
    /// Only notifications addressed to this user match.
    pub target_user_id: String,
    /// Only unchecked notifications match.
    pub unread_only: bool,
}

impl NotificationFilter {
    /// Build the unread-only filter for a user.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            target_user_id: user_id.into(),
            unread_only: true,
        }
    }

    /// Check whether a record belongs to this filter's result set.
    #[must_use]
    pub fn matches(&self, record: &NotificationRecord) -> bool {
        record.target_user_id == self.target_user_id && !(self.unread_only && record.is_checked)
    }
}

/// One emission of the live query. Only the size of the set is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationSnapshot {
    /// Number of matching records.
    pub size: u32,
}

impl NotificationSnapshot {
    /// Create a snapshot with the given size.
    #[must_use]
    pub const fn new(size: u32) -> Self {
        Self { size }
    }

    /// Evaluate a filter over a full record set.
    #[must_use]
    pub fn evaluate<'a>(
        filter: &NotificationFilter,
        records: impl IntoIterator<Item = &'a NotificationRecord>,
    ) -> Self {
        let matching = records.into_iter().filter(|r| filter.matches(r)).count();
        Self {
            size: u32::try_from(matching).unwrap_or(u32::MAX),
        }
    }

    /// Whether the matching set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Result carried by a [`SnapshotEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SnapshotOutcome {
    /// A fresh result set.
    Snapshot(NotificationSnapshot),
    /// The live query errored mid-stream.
    Failed(String),
    /// The live query refused to open the subscription.
    Rejected(String),
}

/// A live query delivery tagged with its subscription epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEvent {
    /// Epoch of the subscription that produced this event.
    pub epoch: Epoch,
    /// What the live query delivered.
    pub outcome: SnapshotOutcome,
}

impl SnapshotEvent {
    /// A successful delivery.
    #[must_use]
    pub const fn snapshot(epoch: Epoch, snapshot: NotificationSnapshot) -> Self {
        Self {
            epoch,
            outcome: SnapshotOutcome::Snapshot(snapshot),
        }
    }

    /// A failed delivery.
    pub fn failed(epoch: Epoch, reason: impl Into<String>) -> Self {
        Self {
            epoch,
            outcome: SnapshotOutcome::Failed(reason.into()),
        }
    }

    /// Report that the subscription for `epoch` was never opened.
    pub fn rejected(epoch: Epoch, reason: impl Into<String>) -> Self {
        Self {
            epoch,
            outcome: SnapshotOutcome::Rejected(reason.into()),
        }
    }
}

/// Live query over the notification store.
///
/// `subscribe` only registers interest and must not block; results arrive
/// later as [`SnapshotEvent`]s tagged with the given epoch, through whatever
/// channel the implementation was wired to at construction.
#[cfg_attr(test, mockall::automock)]
pub trait LiveQuery {
    /// Start delivering snapshots for `filter`, tagged with `epoch`.
    fn subscribe(&self, filter: &NotificationFilter, epoch: Epoch) -> Result<()>;

    /// Stop delivering snapshots for the subscription made under `epoch`.
    fn unsubscribe(&self, epoch: Epoch);
}

impl<Q: LiveQuery + ?Sized> LiveQuery for std::sync::Arc<Q> {
    fn subscribe(&self, filter: &NotificationFilter, epoch: Epoch) -> Result<()> {
        (**self).subscribe(filter, epoch)
    }

    fn unsubscribe(&self, epoch: Epoch) {
        (**self).unsubscribe(epoch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, user: &str, checked: bool) -> NotificationRecord {
        NotificationRecord {
            id: id.to_string(),
            target_user_id: user.to_string(),
            is_checked: checked,
        }
    }

    #[test]
    fn test_epoch_ordering() {
        let first = Epoch::INITIAL.next();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.value(), 2);
        assert_eq!(Epoch::default(), Epoch::INITIAL);
    }

    #[test]
    fn test_filter_for_user_is_unread_only() {
        let filter = NotificationFilter::for_user("alice");
        assert_eq!(filter.target_user_id, "alice");
        assert!(filter.unread_only);
    }

    #[test]
    fn test_filter_matches_unread_for_target_only() {
        let filter = NotificationFilter::for_user("alice");
        assert!(filter.matches(&record("1", "alice", false)));
        assert!(!filter.matches(&record("2", "alice", true)));
        assert!(!filter.matches(&record("3", "bob", false)));
    }

    #[test]
    fn test_filter_without_unread_flag_matches_checked() {
        let filter = NotificationFilter {
            target_user_id: "alice".to_string(),
            unread_only: false,
        };
        assert!(filter.matches(&record("1", "alice", true)));
    }

    #[test]
    fn test_snapshot_evaluate() {
        let records = vec![
            record("1", "alice", false),
            record("2", "alice", false),
            record("3", "alice", true),
            record("4", "bob", false),
        ];
        let snapshot = NotificationSnapshot::evaluate(&NotificationFilter::for_user("alice"), &records);
        assert_eq!(snapshot, NotificationSnapshot::new(2));
        assert!(!snapshot.is_empty());

        let empty = NotificationSnapshot::evaluate(&NotificationFilter::for_user("carol"), &records);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_snapshot_event_serialization() {
        let event = SnapshotEvent::snapshot(Epoch::INITIAL.next(), NotificationSnapshot::new(3));
        let json = serde_json::to_string(&event).expect("serialize failed");
        assert_eq!(
            json,
            r#"{"epoch":1,"outcome":{"type":"Snapshot","data":{"size":3}}}"#
        );

        let failed: SnapshotEvent =
            serde_json::from_str(r#"{"epoch":4,"outcome":{"type":"Failed","data":"offline"}}"#)
                .expect("deserialize failed");
        assert_eq!(failed.outcome, SnapshotOutcome::Failed("offline".to_string()));
        assert_eq!(failed.epoch.value(), 4);

        let rejected: SnapshotEvent =
            serde_json::from_str(r#"{"epoch":5,"outcome":{"type":"Rejected","data":"forbidden"}}"#)
                .expect("deserialize rejected");
        assert_eq!(rejected, SnapshotEvent::rejected(Epoch(5), "forbidden"));
    }

    #[test]
    fn test_arc_query_delegates() {
        let mut mock = MockLiveQuery::new();
        mock.expect_subscribe().times(1).returning(|_, _| Ok(()));
        mock.expect_unsubscribe().times(1).return_const(());

        let query = std::sync::Arc::new(mock);
        let epoch = Epoch::INITIAL.next();
        query
            .subscribe(&NotificationFilter::for_user("alice"), epoch)
            .expect("subscribe failed");
        query.unsubscribe(epoch);
    }
}
