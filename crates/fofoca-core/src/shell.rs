//! Presentation model of the sidebar.
//!
//! [`ShellModel`] is what the UI renders: the synchronized entries filtered
//! for the current layout, the profile link, and the flags gating the
//! compose button and the two layout-dependent panels. It is rebuilt from
//! scratch whenever an input changes; building it has no side effects.

use serde::{Deserialize, Serialize};

use crate::config::SidebarConfig;
use crate::nav::{IconToken, NavigationEntry, NavigationList};
use crate::session::{Session, SessionProvider};
use crate::viewport::ViewportClassifier;

/// One rendered link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkView {
    /// Target path.
    pub route: String,
    /// Display label.
    pub label: String,
    /// Glyph token.
    pub icon: IconToken,
    /// Whether the link is navigable.
    pub enabled: bool,
    /// Whether the current route is this link's route.
    pub active: bool,
    /// Badge text, `None` when no badge should show.
    pub badge: Option<String>,
}

impl LinkView {
    fn from_entry(entry: &NavigationEntry, current_route: &str) -> Self {
        Self {
            route: entry.route.clone(),
            label: entry.label.clone(),
            icon: entry.icon,
            enabled: entry.enabled,
            active: entry.route == current_route,
            badge: badge_label(entry.count),
        }
    }
}

/// Badge text for a count. Absent and zero counts show no badge.
#[must_use]
pub fn badge_label(count: Option<u32>) -> Option<String> {
    count.filter(|&c| c > 0).map(|c| c.to_string())
}

/// Whether `route` is inside a message thread.
#[must_use]
pub fn is_message_thread(route: &str, prefix: &str) -> bool {
    route.starts_with(prefix)
}

/// Everything the sidebar needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellModel {
    /// Synchronized entries visible in the current layout.
    pub links: Vec<LinkView>,
    /// Profile link of the signed-in user.
    pub profile: Option<LinkView>,
    /// Whether the "more settings" panel is shown.
    pub show_more_settings: bool,
    /// Whether the account panel is shown.
    pub show_account_panel: bool,
    /// Whether the compose button is shown.
    pub show_compose: bool,
    /// Compose button label.
    pub compose_label: String,
}

impl ShellModel {
    /// Build the model from explicit inputs.
    #[must_use]
    pub fn build(
        entries: &NavigationList,
        session: Option<&Session>,
        compact: bool,
        current_route: &str,
        config: &SidebarConfig,
    ) -> Self {
        let links = entries
            .iter()
            .filter(|e| !compact || e.visible_when_compact)
            .map(|e| LinkView::from_entry(e, current_route))
            .collect();

        let profile = session.map(|s| {
            let route = s.profile_route();
            LinkView {
                active: route == current_route,
                route,
                label: config.profile_label.clone(),
                icon: IconToken::User,
                enabled: true,
                badge: None,
            }
        });

        Self {
            links,
            profile,
            show_more_settings: !compact,
            show_account_panel: !compact,
            show_compose: !is_message_thread(current_route, &config.message_thread_prefix),
            compose_label: config.compose_label.clone(),
        }
    }

    /// Build the model by querying the session and viewport collaborators.
    #[must_use]
    pub fn from_collaborators(
        entries: &NavigationList,
        session: &dyn SessionProvider,
        viewport: &dyn ViewportClassifier,
        current_route: &str,
        config: &SidebarConfig,
    ) -> Self {
        let user = session.current_user();
        Self::build(
            entries,
            user.as_ref(),
            viewport.is_compact_layout(),
            current_route,
            config,
        )
    }

    /// Link for a route, if visible.
    #[must_use]
    pub fn link(&self, route: &str) -> Option<&LinkView> {
        self.links.iter().find(|l| l.route == route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MockSessionProvider;
    use crate::snapshot::NotificationSnapshot;
    use crate::viewport::MockViewportClassifier;

    fn maria() -> Session {
        Session::new("u1", "maria")
    }

    #[test]
    fn test_badge_label() {
        assert_eq!(badge_label(None), None);
        assert_eq!(badge_label(Some(0)), None);
        assert_eq!(badge_label(Some(3)), Some("3".to_string()));
    }

    #[test]
    fn test_zero_count_renders_no_badge() {
        let config = SidebarConfig::default();
        let list = NavigationList::defaults().apply_snapshot(Some(&NotificationSnapshot::new(0)));
        let model = ShellModel::build(&list, Some(&maria()), false, "/home", &config);

        let notifications = model.link("/notifications").expect("visible");
        assert_eq!(list.target_count(), Some(0));
        assert_eq!(notifications.badge, None);
    }

    #[test]
    fn test_positive_count_renders_badge() {
        let config = SidebarConfig::default();
        let list = NavigationList::defaults().apply_snapshot(Some(&NotificationSnapshot::new(12)));
        let model = ShellModel::build(&list, Some(&maria()), false, "/home", &config);
        assert_eq!(
            model.link("/notifications").and_then(|l| l.badge.as_deref()),
            Some("12")
        );
    }

    #[test]
    fn test_compact_layout_hides_entries_and_panels() {
        let config = SidebarConfig::default();
        let list = NavigationList::defaults();

        let wide = ShellModel::build(&list, Some(&maria()), false, "/home", &config);
        assert_eq!(wide.links.len(), 6);
        assert!(wide.show_more_settings);
        assert!(wide.show_account_panel);

        let compact = ShellModel::build(&list, Some(&maria()), true, "/home", &config);
        let routes: Vec<&str> = compact.links.iter().map(|l| l.route.as_str()).collect();
        assert_eq!(
            routes,
            vec!["/home", "/trends", "/notifications", "/messages"]
        );
        assert!(!compact.show_more_settings);
        assert!(!compact.show_account_panel);
    }

    #[test]
    fn test_compose_hidden_inside_message_thread() {
        let config = SidebarConfig::default();
        let list = NavigationList::defaults();

        let inbox = ShellModel::build(&list, None, false, "/messages", &config);
        assert!(inbox.show_compose);

        let thread = ShellModel::build(&list, None, false, "/messages/abc123", &config);
        assert!(!thread.show_compose);
        assert_eq!(thread.compose_label, "Fofocar");
    }

    #[test]
    fn test_active_link() {
        let config = SidebarConfig::default();
        let model = ShellModel::build(
            &NavigationList::defaults(),
            Some(&maria()),
            false,
            "/trends",
            &config,
        );
        let active: Vec<&str> = model
            .links
            .iter()
            .filter(|l| l.active)
            .map(|l| l.route.as_str())
            .collect();
        assert_eq!(active, vec!["/trends"]);
    }

    #[test]
    fn test_profile_link() {
        let config = SidebarConfig::default();
        let list = NavigationList::defaults();

        let signed_in = ShellModel::build(&list, Some(&maria()), false, "/user/maria", &config);
        let profile = signed_in.profile.expect("profile link");
        assert_eq!(profile.route, "/user/maria");
        assert_eq!(profile.label, "Perfil");
        assert_eq!(profile.icon, IconToken::User);
        assert!(profile.active);

        let signed_out = ShellModel::build(&list, None, false, "/home", &config);
        assert!(signed_out.profile.is_none());
    }

    #[test]
    fn test_from_collaborators() {
        let mut session = MockSessionProvider::new();
        session.expect_current_user().returning(|| Some(maria()));
        let mut viewport = MockViewportClassifier::new();
        viewport.expect_is_compact_layout().return_const(true);

        let model = ShellModel::from_collaborators(
            &NavigationList::defaults(),
            &session,
            &viewport,
            "/home",
            &SidebarConfig::default(),
        );

        assert!(!model.show_account_panel);
        assert!(model.link("/search").is_none());
        assert_eq!(
            model.profile.map(|p| p.route),
            Some("/user/maria".to_string())
        );
    }
}
