//! A single sidebar link with its optional badge.

use fofoca_core::LinkView;
use leptos::prelude::*;
use leptos_router::components::A;

use super::icons::NavIcon;

/// Render one [`LinkView`].
///
/// Disabled links keep their place in the list but are not navigable.
#[component]
pub fn SidebarLink(
    /// The link to render.
    link: LinkView,
) -> impl IntoView {
    let LinkView {
        route,
        label,
        icon,
        enabled,
        active,
        badge,
    } = link;

    let content = view! {
        <span class="sidebar-link-icon">
            <NavIcon icon=icon />
            {badge.map(|text| view! {
                <span class="sidebar-link-badge" aria-label=format!("{text} não lidas")>{text.clone()}</span>
            })}
        </span>
        <span class="sidebar-link-label">{label}</span>
    };

    if enabled {
        view! {
            <A href={route} {..} attr:class="sidebar-link" class:active=active>
                {content}
            </A>
        }
        .into_any()
    } else {
        view! {
            <span class="sidebar-link disabled" aria-disabled="true">
                {content}
            </span>
        }
        .into_any()
    }
}
