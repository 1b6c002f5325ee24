//! Main application component.

use fofoca_core::SidebarConfig;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::Sidebar;
use crate::context::{ConfigContext, provide_session, provide_viewport};
use crate::tauri_api;

const SIDEBAR_CSS: &str = include_str!("../styles/sidebar.css");

/// Content area placeholder for a top-level route.
#[component]
fn Page(
    /// Page heading.
    title: &'static str,
) -> impl IntoView {
    view! {
        <section class="page">
            <h2 class="page-title">{title}</h2>
        </section>
    }
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let config = StoredValue::new(SidebarConfig::default());
    provide_context(ConfigContext { config });
    let (config_ready, set_config_ready) = signal(false);

    provide_session();

    spawn_local(async move {
        match tauri_api::sidebar_config().await {
            Ok(loaded) => match loaded.validate() {
                Ok(()) => config.set_value(loaded),
                Err(e) => leptos::logging::error!("Rejected sidebar config: {}", e),
            },
            Err(e) => leptos::logging::warn!("Using default sidebar config: {}", e),
        }
        set_config_ready.set(true);
    });

    view! {
        <style>{SIDEBAR_CSS}</style>
        <Router>
            <div class="app-layout">
                <Show when=move || config_ready.get()>
                    <ViewportSidebar />
                </Show>
                <main class="app-content">
                    <Routes fallback=|| view! { <Page title="Página não encontrada" /> }>
                        <Route path=path!("/") view=|| view! { <Page title="Home" /> } />
                        <Route path=path!("/home") view=|| view! { <Page title="Home" /> } />
                        <Route path=path!("/trends") view=|| view! { <Page title="Tendências" /> } />
                        <Route path=path!("/notifications") view=|| view! { <Page title="Notificações" /> } />
                        <Route path=path!("/messages") view=|| view! { <Page title="Mensagens" /> } />
                        <Route path=path!("/messages/:thread") view=|| view! { <Page title="Conversa" /> } />
                        <Route path=path!("/bookmarks") view=|| view! { <Page title="Babados" /> } />
                        <Route path=path!("/search") view=|| view! { <Page title="Pesquisar" /> } />
                        <Route path=path!("/user/:username") view=|| view! { <Page title="Perfil" /> } />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// Installs the viewport context with the loaded breakpoints, then renders
/// the sidebar.
#[component]
fn ViewportSidebar() -> impl IntoView {
    let config = expect_context::<ConfigContext>().config;
    provide_viewport(config.with_value(SidebarConfig::breakpoints));

    view! { <Sidebar /> }
}
