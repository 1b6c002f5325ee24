//! Tauri API bindings for WASM.
//!
//! Commands and events exchanged with the Fofoca backend, plus
//! [`TauriLiveQuery`], the live query implementation the sidebar uses.

use fofoca_core::{
    Epoch, Error as CoreError, LiveQuery, NotificationFilter, Session, SidebarConfig,
    SnapshotEvent,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    /// The global Tauri invoke function (Tauri 2.x API).
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], js_name = invoke, catch)]
    fn tauri_invoke(cmd: &str, args: JsValue) -> Result<js_sys::Promise, JsValue>;

    /// Listen to Tauri events (Tauri 2.x API).
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], js_name = listen, catch)]
    fn tauri_listen(
        event: &str,
        handler: &Closure<dyn Fn(JsValue)>,
    ) -> Result<js_sys::Promise, JsValue>;
}

/// Backend command names.
pub mod commands {
    /// Load the sidebar configuration.
    pub const SIDEBAR_CONFIG: &str = "sidebar_config";
    /// Resolve the signed-in user, if any.
    pub const CURRENT_USER: &str = "current_user";
    /// Open a live unread-notification query.
    pub const SUBSCRIBE_NOTIFICATIONS: &str = "subscribe_notifications";
    /// Close a live unread-notification query.
    pub const UNSUBSCRIBE_NOTIFICATIONS: &str = "unsubscribe_notifications";
    /// Publish a post from the compose dialog.
    pub const CREATE_POST: &str = "create_post";
    /// End the current session.
    pub const SIGN_OUT: &str = "sign_out";
}

/// Backend event names.
pub mod events {
    /// Carries a [`fofoca_core::SnapshotEvent`] for the active subscription.
    pub const NOTIFICATIONS_SNAPSHOT: &str = "notifications-snapshot";
    /// Carries the new `Option<Session>` after sign-in or sign-out.
    pub const SESSION_CHANGED: &str = "session-changed";
}

/// Listen to a Tauri event.
///
/// Returns a function that stops listening when called.
pub async fn listen_to_event<F>(event: &str, handler: F) -> Result<js_sys::Function, String>
where
    F: Fn(JsValue) + 'static,
{
    if !is_tauri_available() {
        return Err("Tauri API not available".to_string());
    }

    let closure = Closure::new(handler);
    let promise = tauri_listen(event, &closure).map_err(|e| {
        e.as_string()
            .unwrap_or_else(|| format!("Failed to listen to {event}"))
    })?;

    closure.forget();

    let unlisten = JsFuture::from(promise).await.map_err(|e| {
        e.as_string()
            .unwrap_or_else(|| format!("Failed to set up listener for {event}"))
    })?;

    Ok(unlisten.unchecked_into())
}

/// Listen to an event and decode its payload.
///
/// Payloads that fail to decode are logged and dropped.
async fn listen_to_payload<T, F>(event: &'static str, handler: F) -> Result<js_sys::Function, String>
where
    T: serde::de::DeserializeOwned,
    F: Fn(T) + 'static,
{
    listen_to_event(event, move |value| {
        let payload = match js_sys::Reflect::get(&value, &JsValue::from_str("payload")) {
            Ok(payload) => payload,
            Err(_) => {
                leptos::logging::warn!("{} event without payload", event);
                return;
            }
        };
        match serde_wasm_bindgen::from_value::<T>(payload) {
            Ok(decoded) => handler(decoded),
            Err(e) => leptos::logging::warn!("Malformed {} payload: {}", event, e),
        }
    })
    .await
}

/// Check if the Tauri API is available.
#[must_use]
pub fn is_tauri_available() -> bool {
    web_sys::window()
        .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str("__TAURI__")).ok())
        .is_some_and(|tauri| !tauri.is_undefined())
}

/// Call a Tauri command with the given arguments.
async fn invoke<T: serde::de::DeserializeOwned>(
    cmd: &str,
    args: impl serde::Serialize,
) -> Result<T, String> {
    if !is_tauri_available() {
        return Err("Tauri API not available - are you running in a Tauri app?".to_string());
    }

    let args_value = serde_wasm_bindgen::to_value(&args)
        .map_err(|e| format!("Failed to serialize args for {cmd}: {e}"))?;

    let promise = tauri_invoke(cmd, args_value).map_err(|e| {
        e.as_string()
            .unwrap_or_else(|| format!("Failed to invoke {cmd}"))
    })?;

    let result = JsFuture::from(promise).await.map_err(|e| {
        let msg = e
            .as_string()
            .unwrap_or_else(|| format!("Unknown error from {cmd}"));
        leptos::logging::error!("{} failed: {}", cmd, msg);
        msg
    })?;

    serde_wasm_bindgen::from_value(result)
        .map_err(|e| format!("Failed to deserialize result of {cmd}: {e}"))
}

// =============================================================================
// Config API
// =============================================================================

/// Get the sidebar configuration stored by the backend.
pub async fn sidebar_config() -> Result<SidebarConfig, String> {
    #[derive(serde::Serialize)]
    struct Args {}

    invoke(commands::SIDEBAR_CONFIG, Args {}).await
}

// =============================================================================
// Session API
// =============================================================================

/// Get the signed-in user.
pub async fn current_user() -> Result<Option<Session>, String> {
    #[derive(serde::Serialize)]
    struct Args {}

    invoke(commands::CURRENT_USER, Args {}).await
}

/// Sign the current user out. The backend follows up with a
/// [`events::SESSION_CHANGED`] event.
pub async fn sign_out() -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct Args {}

    invoke(commands::SIGN_OUT, Args {}).await
}

/// Listen to session changes.
pub async fn listen_to_session_changes<F>(handler: F) -> Result<js_sys::Function, String>
where
    F: Fn(Option<Session>) + 'static,
{
    listen_to_payload(events::SESSION_CHANGED, handler).await
}

// =============================================================================
// Notification API
// =============================================================================

/// Open the live unread-notification query for `filter`, tagged with `epoch`.
pub async fn subscribe_notifications(
    filter: &NotificationFilter,
    epoch: Epoch,
) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct Args<'a> {
        filter: &'a NotificationFilter,
        epoch: Epoch,
    }

    invoke(commands::SUBSCRIBE_NOTIFICATIONS, Args { filter, epoch }).await
}

/// Close the live query opened with `epoch`.
pub async fn unsubscribe_notifications(epoch: Epoch) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct Args {
        epoch: Epoch,
    }

    invoke(commands::UNSUBSCRIBE_NOTIFICATIONS, Args { epoch }).await
}

/// Listen to live query deliveries.
pub async fn listen_to_notification_snapshots<F>(handler: F) -> Result<js_sys::Function, String>
where
    F: Fn(SnapshotEvent) + 'static,
{
    listen_to_payload(events::NOTIFICATIONS_SNAPSHOT, handler).await
}

// =============================================================================
// Compose API
// =============================================================================

/// Publish a post.
pub async fn create_post(text: &str) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct Args<'a> {
        text: &'a str,
    }

    invoke(commands::CREATE_POST, Args { text }).await
}

/// Live query backed by the Tauri notification commands.
///
/// Commands are fire-and-forget; a rejected subscribe is reported back
/// through `on_failure` as a rejected [`SnapshotEvent`] for the same epoch,
/// which drops the subscription without an unsubscribe.
#[derive(Clone, Copy)]
pub struct TauriLiveQuery {
    on_failure: Callback<SnapshotEvent>,
}

impl TauriLiveQuery {
    /// Create a live query reporting subscribe failures to `on_failure`.
    #[must_use]
    pub const fn new(on_failure: Callback<SnapshotEvent>) -> Self {
        Self { on_failure }
    }
}

impl LiveQuery for TauriLiveQuery {
    fn subscribe(&self, filter: &NotificationFilter, epoch: Epoch) -> fofoca_core::Result<()> {
        if !is_tauri_available() {
            return Err(CoreError::subscription_failed(epoch, "Tauri API not available"));
        }

        let filter = filter.clone();
        let report = self.on_failure;
        spawn_local(async move {
            if let Err(reason) = subscribe_notifications(&filter, epoch).await {
                report.run(SnapshotEvent::rejected(epoch, reason));
            }
        });
        Ok(())
    }

    fn unsubscribe(&self, epoch: Epoch) {
        if !is_tauri_available() {
            return;
        }
        spawn_local(async move {
            if let Err(e) = unsubscribe_notifications(epoch).await {
                leptos::logging::warn!("Failed to close notification query {}: {}", epoch, e);
            }
        });
    }
}
