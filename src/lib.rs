//! sustainability_index
//!
//! A small Rust library for turning heterogeneous country indicator datasets
//! (World Bank WDI downloads, Our World in Data exports, UNDP HDI tables) into
//! a composite sustainability score per country. Pairs with the `susidx` CLI.
//!
//! ### Pipeline
//! - Read each CSV, skipping the WDI metadata block and falling back to
//!   Windows-1252 when the file is not UTF-8 ([`reader`])
//! - Reconcile each table into `(country, year, value)` observations ([`reconcile`])
//! - Keep the latest known value per country ([`reduce`])
//! - Outer-join all indicators on the ISO3 code ([`merge`])
//! - Min-max normalize each indicator, inverting where lower is better ([`normalize`])
//! - Combine into a weighted score that tolerates missing indicators ([`score`])
//!
//! ### Example
//! ```no_run
//! use sustainability_index::{Sources, pipeline, storage};
//!
//! let sources = Sources::in_dir("data");
//! let records = pipeline::build_index(&sources)?;
//! storage::save_csv(&records, "data/OUT/sustainability_index.csv")?;
//! # Ok::<(), sustainability_index::IndexError>(())
//! ```

pub mod error;
pub mod indicators;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod reader;
pub mod reconcile;
pub mod reduce;
pub mod score;
pub mod stats;
pub mod storage;

pub use error::IndexError;
pub use indicators::{INDICATORS, Indicator, IndicatorSpec};
pub use models::{FinalRecord, Observation, RawTable};
pub use pipeline::{PipelineConfig, Sources};
