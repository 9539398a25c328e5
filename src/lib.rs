//! `collection-explorer` is the data core of a museum-collection dashboard: it loads
//! collection records into an in-memory [`store::RecordStore`], turns interactive selections
//! (a time-range brush, a department click) into filtered views, and pushes per-chart
//! aggregations to rendering [`sinks`].
//!
//! The primary entrypoint is [`controller::SelectionController`], fed by
//! [`ingestion::load_from_path`], which auto-detects the input format from the file
//! extension (`.csv`, `.json`, `.ndjson`).
//!
//! ## Quick example: load and select
//!
//! ```no_run
//! use collection_explorer::config::DashboardOptions;
//! use collection_explorer::controller::{DashboardEvent, SelectionController};
//! use collection_explorer::ingestion::{load_from_path, LoadOptions};
//! use collection_explorer::sinks::ChartViews;
//!
//! # fn main() -> Result<(), collection_explorer::DashboardError> {
//! let store = load_from_path("MetObjects.csv", &LoadOptions::default())?;
//! let options = DashboardOptions::from_path("dashboard.json")?;
//! let views = ChartViews::from_options(&options);
//!
//! let mut controller = SelectionController::new(store, options, views)?;
//! controller.start();
//! controller.handle(DashboardEvent::DepartmentClicked {
//!     department: "Paintings".to_string(),
//! })?;
//!
//! for bucket in controller.sinks().bar() {
//!     println!("{}: {}", bucket.key, bucket.count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Aggregations
//!
//! The functions in [`processing`] are pure and never fail; empty input gives an empty
//! result.
//!
//! ```rust
//! use collection_explorer::processing::top_n_with_other;
//! use collection_explorer::types::{Bucket, Record};
//!
//! let records = vec![
//!     Record::new(2000, "Vase"),
//!     Record::new(2000, "Vase"),
//!     Record::new(2001, "Coin"),
//! ];
//! let view = top_n_with_other(&records, Record::object_name_key, 2);
//! assert_eq!(view, vec![Bucket::new("Vase", 2), Bucket::new("Other", 1)]);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loading records, heatmap cells and country counts, with load observers
//! - [`types`]: records, year ranges, buckets and series
//! - [`store`]: the immutable record store
//! - [`processing`]: aggregations and filters
//! - [`execution`]: the chunked, parallel record filter
//! - [`controller`]: filter state, events, scheduling and sink notification
//! - [`sinks`]: the chart sink contract and an in-memory implementation
//! - [`config`]: dashboard options and user-adjustable parameters
//! - [`error`]: the crate error type

pub mod config;
pub mod controller;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod processing;
pub mod sinks;
pub mod store;
pub mod types;

pub use error::{DashboardError, DashboardResult};
