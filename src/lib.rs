//! # querylens
//!
//! Query analytics dashboard core: fetches tenant, dashboard and per-user
//! drilldown data from the analytics REST API and turns it into KPI cards,
//! chart series and a sortable, paginated user table.
//!
//! ## Modules
//!
//! - [`model`], [`dto`]: domain values and wire shapes
//! - [`query`], [`decode`]: request building and validated response decoding
//! - [`metrics`], [`table`], [`detail`]: derived aggregates and the user table
//! - [`view`], [`interaction`], [`view_model`]: view state with its three
//!   load cycles, gated actions and the render-ready projection
//! - [`client`], [`demo`], [`driver`], [`config`]: HTTP and demo data
//!   sources, the async host and configuration (feature `client`)
//!
//! Without the `client` feature the crate has no I/O and builds for
//! `wasm32-unknown-unknown`; the web dashboard depends on it that way.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use querylens::{DemoApi, Driver, TableState, ViewModel, ViewSettings, ViewState, Event};
//! use querylens::model::DatePreset;
//!
//! #[tokio::main]
//! async fn main() {
//!     let today = chrono::Utc::now().date_naive();
//!     let view = ViewState::new(ViewSettings::default(), DatePreset::Last30.window(today));
//!
//!     let mut driver = Driver::new(Arc::new(DemoApi::new()), view);
//!     driver.dispatch(Event::Start);
//!     driver.run_until_idle().await;
//!
//!     let model = ViewModel::build(driver.view(), &TableState::default());
//!     println!("{}", model.header());
//!     for card in &model.cards {
//!         println!("{}: {}", card.title, card.value);
//!     }
//! }
//! ```

pub mod decode;
pub mod detail;
pub mod dto;
pub mod error;
pub mod interaction;
pub mod metrics;
pub mod model;
pub mod query;
pub mod table;
pub mod view;
pub mod view_model;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod demo;
#[cfg(feature = "client")]
pub mod driver;

#[cfg(test)]
mod test_support;

// Re-export top-level types for convenience
pub use decode::DashboardSnapshot;
pub use error::{ApiError, ApiResult};
pub use model::{DateWindow, ModelError, TenantSummary, UserSelection};
pub use table::{SortDirection, SortKey, TablePage, TableState};
pub use view::{Effect, Event, LoadCycle, Notice, NoticeLevel, ViewSettings, ViewState};
pub use view_model::ViewModel;

#[cfg(feature = "client")]
pub use client::{AnalyticsApi, ClientConfig, HttpClient};
#[cfg(feature = "client")]
pub use config::{Config, ConfigError};
#[cfg(feature = "client")]
pub use demo::DemoApi;
#[cfg(feature = "client")]
pub use driver::Driver;
