//! UI components for the Fofoca sidebar.

pub mod compose;
pub mod icons;
pub mod more_settings;
pub mod sidebar;
pub mod sidebar_link;
pub mod sidebar_profile;

pub use compose::{ComposeButton, ComposeDialog};
pub use icons::NavIcon;
pub use more_settings::MoreSettings;
pub use sidebar::Sidebar;
pub use sidebar_link::SidebarLink;
pub use sidebar_profile::SidebarProfile;
