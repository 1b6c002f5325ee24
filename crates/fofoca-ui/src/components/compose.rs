//! Compose button and dialog.
//!
//! Both talk to the modal only through [`fofoca_core::dispatch`], so the
//! dialog opens once per click and closes on dismiss or after a post is
//! accepted by the backend.

use fofoca_core::{IconToken, ModalEvent, dispatch};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::icons::NavIcon;
use crate::context::ComposeModalHandle;
use crate::tauri_api;

/// Maximum post length accepted by the dialog.
pub const MAX_POST_CHARS: usize = 280;

/// Whether `text` can be submitted as a post.
#[must_use]
pub fn can_submit(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_POST_CHARS
}

/// Button that opens the compose dialog.
#[component]
pub fn ComposeButton(
    /// Button label.
    #[prop(into)]
    label: Signal<String>,
    /// The compose modal.
    modal: ComposeModalHandle,
) -> impl IntoView {
    let open = move |_| {
        let mut modal = modal;
        dispatch(&mut modal, ModalEvent::Compose);
    };

    view! {
        <button class="btn btn-primary compose-button" on:click=open>
            <NavIcon icon=IconToken::Feather size=22 />
            <span class="compose-button-label">{move || label.get()}</span>
        </button>
    }
}

/// Overlay dialog for writing a post.
#[component]
pub fn ComposeDialog(
    /// The compose modal.
    modal: ComposeModalHandle,
) -> impl IntoView {
    let is_open = modal.is_open_signal();
    let (text, set_text) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let dismiss = move || {
        if submitting.get_untracked() {
            return;
        }
        let mut modal = modal;
        dispatch(&mut modal, ModalEvent::Dismiss);
        set_error.set(None);
    };

    let submit = move |_| {
        let body = text.get_untracked();
        if !can_submit(&body) || submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match tauri_api::create_post(body.trim()).await {
                Ok(()) => {
                    set_text.set(String::new());
                    let mut modal = modal;
                    dispatch(&mut modal, ModalEvent::Submitted);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_submitting.set(false);
        });
    };

    let remaining = move || {
        let used = text.with(|t| t.trim().chars().count());
        MAX_POST_CHARS.saturating_sub(used)
    };

    view! {
        <div
            class="compose-dialog-overlay"
            class:visible=move || is_open.get()
            on:click=move |_| dismiss()
        >
            <div
                class="compose-dialog"
                on:click=move |e| e.stop_propagation()
                role="dialog"
                aria-modal="true"
                aria-label="Nova fofoca"
            >
                <div class="compose-dialog-header">
                    <button class="btn btn-ghost" aria-label="Fechar" on:click=move |_| dismiss()>
                        "✕"
                    </button>
                </div>
                <textarea
                    class="compose-dialog-input"
                    placeholder="O que está acontecendo?"
                    prop:value=move || text.get()
                    on:input=move |e| set_text.set(event_target_value(&e))
                    disabled=move || submitting.get()
                ></textarea>
                {move || error.get().map(|msg| view! {
                    <p class="compose-dialog-error">{msg}</p>
                })}
                <div class="compose-dialog-actions">
                    <span class="compose-dialog-remaining">{remaining}</span>
                    <button
                        class="btn btn-primary"
                        disabled=move || submitting.get() || !text.with(|t| can_submit(t))
                        on:click=submit
                    >
                        {move || if submitting.get() { "Enviando..." } else { "Fofocar" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
