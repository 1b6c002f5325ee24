//! Account panel at the bottom of the wide sidebar.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::SessionContext;
use crate::tauri_api;

/// Initial shown in the avatar bubble.
#[must_use]
pub fn avatar_initial(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Signed-in user with a sign-out action. Renders nothing when signed out.
#[component]
pub fn SidebarProfile() -> impl IntoView {
    let session = expect_context::<SessionContext>().session;
    let (signing_out, set_signing_out) = signal(false);

    let sign_out = move |_| {
        set_signing_out.set(true);
        spawn_local(async move {
            // The backend follows up with a session-changed event.
            if let Err(e) = tauri_api::sign_out().await {
                leptos::logging::error!("Sign out failed: {}", e);
            }
            set_signing_out.set(false);
        });
    };

    move || {
        session.get().map(|user| {
            view! {
                <div class="sidebar-profile">
                    <span class="sidebar-profile-avatar">{avatar_initial(&user.username)}</span>
                    <span class="sidebar-profile-name">{format!("@{}", user.username)}</span>
                    <button
                        class="btn btn-ghost sidebar-profile-sign-out"
                        disabled=move || signing_out.get()
                        on:click=sign_out
                    >
                        "Sair"
                    </button>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_initial() {
        assert_eq!(avatar_initial("maria"), "M");
        assert_eq!(avatar_initial("élio"), "É");
        assert_eq!(avatar_initial(""), "");
    }
}
