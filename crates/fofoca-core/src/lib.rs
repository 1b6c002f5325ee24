//! `Fofoca` Sidebar Core Library
//!
//! This crate provides the state behind the Fofoca navigation sidebar:
//! - Navigation entries and the immutable navigation list
//! - Live unread-notification badge synchronization with epoch-tagged
//!   subscriptions
//! - Session, viewport, live query and modal collaborator contracts
//! - The compose modal state machine
//! - The presentation model rendered by the UI
//! - Sidebar configuration
//!
//! With the default `runtime` feature it also provides a tokio event loop
//! ([`runtime::SyncDriver`]) and tracing subscriber setup ([`logging`]).
//!
//! ```rust,ignore
//! use fofoca_core::{NavigationList, NavigationSync, Session};
//!
//! let mut sync = NavigationSync::new(NavigationList::defaults(), query);
//! sync.on_session_changed(Some(&Session::new("u1", "maria")));
//! // later, for each live query delivery:
//! if sync.on_snapshot(event).changed() {
//!     render(sync.entries());
//! }
//! ```

pub mod config;
pub mod error;
#[cfg(feature = "runtime")]
pub mod logging;
pub mod modal;
pub mod nav;
#[cfg(feature = "runtime")]
pub mod runtime;
pub mod session;
pub mod shell;
pub mod snapshot;
pub mod sync;
pub mod viewport;

pub use config::{DEFAULT_EVENT_CHANNEL_CAPACITY, DEFAULT_MESSAGE_THREAD_PREFIX, SidebarConfig};
pub use error::{Error, Result};
pub use modal::{ComposeModal, ModalController, ModalEvent, ModalState, dispatch};
pub use nav::{IconToken, NavigationEntry, NavigationList, apply_snapshot, default_entries};
#[cfg(feature = "runtime")]
pub use runtime::{
    SnapshotSink, SyncDriver, SyncDriverHandle, WatchSessionProvider, snapshot_channel,
};
pub use session::{Session, SessionProvider};
pub use shell::{LinkView, ShellModel, badge_label, is_message_thread};
pub use snapshot::{
    Epoch, LiveQuery, NotificationFilter, NotificationRecord, NotificationSnapshot,
    SnapshotEvent, SnapshotOutcome,
};
pub use sync::{NavigationSync, SessionTransition, SyncOutcome};
pub use viewport::{
    Breakpoints, DEFAULT_COMPACT_BREAKPOINT_PX, MeasuredViewport, ViewportClassifier,
};
