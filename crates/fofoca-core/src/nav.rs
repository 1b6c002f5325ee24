//! Navigation entries and the badge-count update.
//!
//! A [`NavigationList`] is immutable. Applying a snapshot produces a new list
//! that shares every untouched entry with its predecessor, so consumers can
//! detect per-entry changes with [`Arc::ptr_eq`].

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::snapshot::NotificationSnapshot;

/// Glyph shown next to a navigation entry. Resolved by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconToken {
    /// Home.
    Home,
    /// Trends.
    Hashtag,
    /// Notifications.
    Bell,
    /// Messages.
    Envelope,
    /// Bookmarks.
    Bookmark,
    /// Search.
    Search,
    /// Profile.
    User,
    /// Compose.
    Feather,
    /// Settings.
    Settings,
}

const fn default_true() -> bool {
    true
}

/// One sidebar destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// Target path. Unique within a list.
    pub route: String,
    /// Human-readable name.
    pub label: String,
    /// Glyph token.
    pub icon: IconToken,
    /// Receives live notification counts.
    #[serde(default)]
    pub is_notification_target: bool,
    /// Whether the entry stays visible in the compact layout.
    #[serde(default = "default_true")]
    pub visible_when_compact: bool,
    /// Whether the entry is navigable.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Badge value. `None` means no badge data.
    #[serde(default)]
    pub count: Option<u32>,
}

impl NavigationEntry {
    /// Create an enabled, always-visible entry without badge data.
    pub fn new(route: impl Into<String>, label: impl Into<String>, icon: IconToken) -> Self {
        Self {
            route: route.into(),
            label: label.into(),
            icon,
            is_notification_target: false,
            visible_when_compact: true,
            enabled: true,
            count: None,
        }
    }

    /// Flag this entry as the recipient of live notification counts.
    #[must_use]
    pub const fn notification_target(mut self) -> Self {
        self.is_notification_target = true;
        self
    }

    /// Hide this entry in the compact layout.
    #[must_use]
    pub const fn hidden_when_compact(mut self) -> Self {
        self.visible_when_compact = false;
        self
    }

    /// Mark this entry as not navigable.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Set the baseline badge count.
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

/// The sidebar's default destinations.
#[must_use]
pub fn default_entries() -> Vec<NavigationEntry> {
    vec![
        NavigationEntry::new("/home", "Home", IconToken::Home).with_count(0),
        NavigationEntry::new("/trends", "Tendências", IconToken::Hashtag).with_count(0),
        NavigationEntry::new("/notifications", "Notificações", IconToken::Bell)
            .notification_target()
            .with_count(0),
        NavigationEntry::new("/messages", "Mensagens", IconToken::Envelope).with_count(0),
        NavigationEntry::new("/bookmarks", "Babados", IconToken::Bookmark)
            .hidden_when_compact()
            .with_count(0),
        NavigationEntry::new("/search", "Pesquisar", IconToken::Search).hidden_when_compact(),
    ]
}

/// Ordered, immutable list of navigation entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationList {
    entries: Vec<Arc<NavigationEntry>>,
}

impl NavigationList {
    /// Build a list, rejecting duplicate routes.
    ///
    /// More than one notification target is accepted; the first one in list
    /// order receives counts.
    pub fn new(entries: Vec<NavigationEntry>) -> Result<Self> {
        let mut routes = HashSet::new();
        for entry in &entries {
            if !routes.insert(entry.route.as_str()) {
                return Err(Error::DuplicateRoute(entry.route.clone()));
            }
        }

        let targets = entries.iter().filter(|e| e.is_notification_target).count();
        if targets > 1 {
            warn!(
                targets,
                "Several entries are flagged as notification target; only the first receives counts"
            );
        } else if targets == 0 {
            debug!("Navigation list has no notification target");
        }

        Ok(Self {
            entries: entries.into_iter().map(Arc::new).collect(),
        })
    }

    /// The default sidebar list.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            entries: default_entries().into_iter().map(Arc::new).collect(),
        }
    }

    /// Shared entries, in order.
    #[must_use]
    pub fn entries(&self) -> &[Arc<NavigationEntry>] {
        &self.entries
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &NavigationEntry> {
        self.entries.iter().map(AsRef::as_ref)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by route.
    #[must_use]
    pub fn get(&self, route: &str) -> Option<&NavigationEntry> {
        self.iter().find(|e| e.route == route)
    }

    fn target_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.is_notification_target)
    }

    /// The entry receiving notification counts.
    #[must_use]
    pub fn notification_target(&self) -> Option<&NavigationEntry> {
        self.target_index().map(|i| self.entries[i].as_ref())
    }

    /// Current badge count of the notification target.
    #[must_use]
    pub fn target_count(&self) -> Option<u32> {
        self.notification_target().and_then(|e| e.count)
    }

    /// Write a snapshot's size into the notification target.
    ///
    /// Every other entry is shared with `self`. When the target already shows
    /// the snapshot's size the target is shared too.
    pub fn try_apply_snapshot(&self, snapshot: &NotificationSnapshot) -> Result<Self> {
        let index = self.target_index().ok_or(Error::NoMatchingEntry)?;
        let target = &self.entries[index];
        if target.count == Some(snapshot.size) {
            return Ok(self.clone());
        }

        let mut entries = self.entries.clone();
        entries[index] = Arc::new(NavigationEntry {
            count: Some(snapshot.size),
            ..NavigationEntry::clone(target)
        });
        Ok(Self { entries })
    }

    /// Apply the latest snapshot, if any.
    ///
    /// `None` means no data has arrived yet and leaves the list untouched, as
    /// does a list without notification target.
    #[must_use]
    pub fn apply_snapshot(&self, snapshot: Option<&NotificationSnapshot>) -> Self {
        match snapshot {
            Some(snapshot) => self
                .try_apply_snapshot(snapshot)
                .unwrap_or_else(|_| self.clone()),
            None => self.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a NavigationList {
    type Item = &'a Arc<NavigationEntry>;
    type IntoIter = std::slice::Iter<'a, Arc<NavigationEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Free-function form of [`NavigationList::apply_snapshot`].
#[must_use]
pub fn apply_snapshot(
    list: &NavigationList,
    snapshot: Option<&NotificationSnapshot>,
) -> NavigationList {
    list.apply_snapshot(snapshot)
}
