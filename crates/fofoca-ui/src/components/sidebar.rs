//! The navigation sidebar.

use fofoca_core::{NavigationList, ShellModel};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use super::compose::{ComposeButton, ComposeDialog};
use super::more_settings::MoreSettings;
use super::sidebar_link::SidebarLink;
use super::sidebar_profile::SidebarProfile;
use crate::badge::use_navigation_sync;
use crate::context::{ComposeModalHandle, ConfigContext, SessionContext, ViewportContext};

/// Sidebar with live notification badge, compose button and account panel.
///
/// Expects [`ConfigContext`], [`SessionContext`] and [`ViewportContext`] in
/// context.
#[component]
pub fn Sidebar() -> impl IntoView {
    let config = expect_context::<ConfigContext>().config;
    let session = expect_context::<SessionContext>();
    let viewport = expect_context::<ViewportContext>();
    let location = use_location();

    let initial = config.with_value(|c| {
        c.navigation_list().unwrap_or_else(|e| {
            leptos::logging::error!("Invalid sidebar entries, using defaults: {}", e);
            NavigationList::defaults()
        })
    });
    let entries = use_navigation_sync(initial, session);

    let model = Memo::new(move |_| {
        let route = location.pathname.get();
        entries.with(|list| {
            config.with_value(|c| {
                ShellModel::from_collaborators(list, &session, &viewport, &route, c)
            })
        })
    });

    let modal = ComposeModalHandle::new();
    let compose_label = Signal::derive(move || model.with(|m| m.compose_label.clone()));

    view! {
        <header id="sidebar" class="sidebar" class:compact=move || viewport.compact.get()>
            <ComposeDialog modal=modal />
            <div class="sidebar-inner">
                <section class="sidebar-main">
                    <h1 class="sidebar-logo">
                        <A href="/home">
                            <img src="/logo-fofocame.png" alt="Logo da fofoca-me" width="64" height="64" />
                        </A>
                    </h1>
                    <nav class="sidebar-nav">
                        <For
                            each=move || model.with(|m| m.links.clone())
                            key=|link| (link.route.clone(), link.badge.clone(), link.active, link.enabled)
                            children=move |link| view! { <SidebarLink link=link /> }
                        />
                        {move || model.with(|m| m.profile.clone()).map(|link| view! { <SidebarLink link=link /> })}
                        <Show when=move || model.with(|m| m.show_more_settings)>
                            <MoreSettings />
                        </Show>
                    </nav>
                    <Show when=move || model.with(|m| m.show_compose)>
                        <ComposeButton label=compose_label modal=modal />
                    </Show>
                </section>
                <Show when=move || model.with(|m| m.show_account_panel)>
                    <SidebarProfile />
                </Show>
            </div>
        </header>
    }
}
