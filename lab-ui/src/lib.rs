//! Shared Dioxus components and state for the lab dashboard.
//!
//! This crate provides:
//! - `browser`: session token lookup and file downloads via `web-sys`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (stat cards, tables, pagination, selectors)

pub mod browser;
pub mod components;
pub mod state;
