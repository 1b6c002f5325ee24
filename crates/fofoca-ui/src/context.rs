//! Reactive collaborators shared through Leptos context.
//!
//! The session and viewport contexts implement the core collaborator traits
//! by reading signals, so a [`fofoca_core::ShellModel`] built inside a memo
//! re-runs whenever either changes.

use fofoca_core::{
    Breakpoints, ModalController, ModalState, Session, SessionProvider, SidebarConfig,
    ViewportClassifier,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use crate::tauri_api;

/// Sidebar configuration, loaded once at startup.
#[derive(Clone, Copy)]
pub struct ConfigContext {
    /// The configuration.
    pub config: StoredValue<SidebarConfig>,
}

/// Signed-in user as reported by the backend.
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Current session, `None` when signed out.
    pub session: ReadSignal<Option<Session>>,
}

impl SessionProvider for SessionContext {
    fn current_user(&self) -> Option<Session> {
        self.session.get()
    }
}

/// Resolve the current user and follow backend session changes.
pub fn provide_session() -> SessionContext {
    let (session, set_session) = signal(None::<Session>);

    spawn_local(async move {
        if let Err(e) = tauri_api::listen_to_session_changes(move |next| {
            set_session.set(next);
        })
        .await
        {
            leptos::logging::warn!("Session updates unavailable: {}", e);
        }

        match tauri_api::current_user().await {
            Ok(current) => set_session.set(current),
            Err(e) => leptos::logging::warn!("Could not resolve current user: {}", e),
        }
    });

    let ctx = SessionContext { session };
    provide_context(ctx);
    ctx
}

/// Layout classification derived from the window width.
#[derive(Clone, Copy)]
pub struct ViewportContext {
    /// Whether the viewport is narrower than the compact breakpoint.
    pub compact: ReadSignal<bool>,
}

impl ViewportClassifier for ViewportContext {
    fn is_compact_layout(&self) -> bool {
        self.compact.get()
    }
}

fn measure(breakpoints: Breakpoints) -> bool {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .is_some_and(|width| breakpoints.classify(width))
}

/// Track the window width against `breakpoints`.
pub fn provide_viewport(breakpoints: Breakpoints) -> ViewportContext {
    let (compact, set_compact) = signal(measure(breakpoints));

    let on_resize = Closure::<dyn Fn()>::new(move || {
        let next = measure(breakpoints);
        if compact.get_untracked() != next {
            set_compact.set(next);
        }
    });
    if let Some(window) = web_sys::window()
        && window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .is_err()
    {
        leptos::logging::warn!("Could not track window resizes");
    }
    // Lives as long as the page.
    on_resize.forget();

    let ctx = ViewportContext { compact };
    provide_context(ctx);
    ctx
}

/// Compose modal state, driven through [`fofoca_core::dispatch`].
#[derive(Clone, Copy)]
pub struct ComposeModalHandle {
    state: RwSignal<ModalState>,
}

impl ComposeModalHandle {
    /// A closed modal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(ModalState::Closed),
        }
    }

    /// Reactive open flag.
    #[must_use]
    pub fn is_open_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_open())
    }
}

impl Default for ComposeModalHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController for ComposeModalHandle {
    fn open_modal(&mut self) {
        self.state.set(ModalState::Open);
    }

    fn close_modal(&mut self) {
        self.state.set(ModalState::Closed);
    }

    fn is_open(&self) -> bool {
        self.state.get_untracked().is_open()
    }
}
