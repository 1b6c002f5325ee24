//! "More" menu shown below the links in the wide layout.

use fofoca_core::IconToken;
use leptos::prelude::*;
use leptos_router::components::A;

use super::icons::NavIcon;

/// Collapsible menu with secondary destinations.
#[component]
pub fn MoreSettings() -> impl IntoView {
    let (open, set_open) = signal(false);

    view! {
        <div class="more-settings" class:open=move || open.get()>
            <button
                class="sidebar-link more-settings-toggle"
                aria-expanded=move || if open.get() { "true" } else { "false" }
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                <span class="sidebar-link-icon">
                    <NavIcon icon=IconToken::Settings />
                </span>
                <span class="sidebar-link-label">"Mais"</span>
            </button>
            <Show when=move || open.get()>
                <div class="more-settings-menu" on:click=move |_| set_open.set(false)>
                    <A href="/settings" {..} attr:class="more-settings-item">"Configurações"</A>
                    <A href="/settings/privacy" {..} attr:class="more-settings-item">"Privacidade"</A>
                    <A href="/help" {..} attr:class="more-settings-item">"Central de ajuda"</A>
                </div>
            </Show>
        </div>
    }
}
