//! querylens Dashboard
//!
//! Tenant query analytics dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - KPI cards, confidence distribution and query trend charts
//! - Sortable, paginated user table with per-user detail view
//! - Per-user drilldown counts behind the confidence chart
//!
//! # Architecture
//!
//! Client-side rendered (CSR) application. All view logic lives in the
//! `querylens` core crate; this crate only renders its `ViewModel` and runs
//! the fetches its `ViewState` asks for.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
