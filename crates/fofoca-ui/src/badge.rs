//! Reactive wrapper around [`NavigationSync`].

use fofoca_core::{
    NavigationList, NavigationSync, SessionTransition, SnapshotEvent, SyncOutcome,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

use crate::context::SessionContext;
use crate::tauri_api::{self, TauriLiveQuery};

/// Keep `initial` in sync with the notification live query for the
/// session in `session`.
///
/// The returned signal only changes when a snapshot changes the badge
/// count. The subscription is released when the owning scope is disposed.
pub fn use_navigation_sync(
    initial: NavigationList,
    session: SessionContext,
) -> ReadSignal<NavigationList> {
    let (entries, set_entries) = signal(initial.clone());
    let sync = StoredValue::new_local(None::<NavigationSync<TauriLiveQuery>>);

    let deliver = Callback::new(move |event: SnapshotEvent| {
        let updated = sync
            .try_update_value(|slot| {
                let sync = slot.as_mut()?;
                let outcome = sync.on_snapshot(event);
                match &outcome {
                    SyncOutcome::Failed(reason) => {
                        leptos::logging::warn!("Notification query failed: {}", reason);
                    }
                    SyncOutcome::Rejected(reason) => {
                        leptos::logging::warn!("Notification subscription rejected: {}", reason);
                    }
                    _ => {}
                }
                outcome.changed().then(|| sync.entries().clone())
            })
            .flatten();
        if let Some(list) = updated {
            set_entries.set(list);
        }
    });
    sync.set_value(Some(NavigationSync::new(initial, TauriLiveQuery::new(deliver))));

    // Subscribing before the listener is registered could lose the first
    // snapshot, so session changes wait for it.
    let (listening, set_listening) = signal(false);
    let unlisten = StoredValue::new_local(None::<js_sys::Function>);
    spawn_local(async move {
        match tauri_api::listen_to_notification_snapshots(move |event| deliver.run(event)).await {
            Ok(stop) => {
                unlisten.set_value(Some(stop));
                set_listening.set(true);
            }
            Err(e) => leptos::logging::warn!("Notification badge disabled: {}", e),
        }
    });

    Effect::new(move || {
        if !listening.get() {
            return;
        }
        let current = session.session.get();
        sync.update_value(|slot| {
            if let Some(sync) = slot.as_mut() {
                match sync.on_session_changed(current.as_ref()) {
                    SessionTransition::Failed(epoch) => {
                        leptos::logging::warn!("Notification subscription {} failed", epoch);
                    }
                    SessionTransition::Subscribed(epoch) => {
                        leptos::logging::log!("Notification subscription {} opened", epoch);
                    }
                    SessionTransition::Suspended(_) | SessionTransition::Unchanged => {}
                }
            }
        });
    });

    on_cleanup(move || {
        sync.update_value(|slot| {
            if let Some(sync) = slot.as_mut() {
                sync.release();
            }
        });
        unlisten.update_value(|stop| {
            if let Some(stop) = stop.take() {
                let _ = stop.call0(&JsValue::NULL);
            }
        });
    });

    entries
}
