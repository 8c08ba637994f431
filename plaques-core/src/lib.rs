//! # Plaques Core
//!
//! Derived-data and filtering pipeline for the London plaques explorer.
//!
//! Raw records flow through the fixture augmenter and the normalizer into an
//! immutable normalized collection. Statistics, aggregates, the filter engine
//! and the table projection are pure reductions over that collection, and
//! [`session::Dashboard`] memoizes them against the current filter state.

pub mod aggregate;
pub mod augment;
pub mod classify;
pub mod filter;
pub mod normalize;
pub mod pagination;
pub mod pipeline;
pub mod record;
pub mod region;
pub mod session;
pub mod stats;
pub mod table;
pub mod year;

pub use filter::{CategoryFilter, FilterState, FilterUpdate, SelectionFilter, YearRange};
pub use plaques_common::{Error, Position, RawRecord, Result};
pub use record::{Category, NormalizedRecord, Region};
pub use session::Dashboard;
