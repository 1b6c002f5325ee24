//! `Fofoca` UI - Leptos navigation sidebar.
//!
//! Renders the [`fofoca_core::ShellModel`] and keeps the notification badge
//! in sync with the live query exposed by the Tauri backend.

// Component files tend to be large by nature - they contain view logic
#![allow(clippy::too_many_lines)]
// Pass by value suggestions for small types like bool - not always clearer
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod app;
pub mod badge;
pub mod components;
pub mod context;
pub mod tauri_api;

pub use app::App;
