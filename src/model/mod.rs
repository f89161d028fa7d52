//! Model layer - the passenger data and everything computed from it
//!
//! - `Dataset` / `Passenger` - the immutable manifest
//! - `Filter` / `View` - predicates and the subsets they select
//! - `percentages` / `stats` - aggregations feeding the charts
//! - `DashboardData` - one full pipeline run per interaction
//! - `ModalStack` / `ui` - presentation state

pub mod dashboard;
pub mod dataset;
pub mod filter;
pub mod modal;
pub mod passenger;
pub mod percentages;
pub mod stats;
pub mod ui;

pub use dashboard::{AgeSection, DashboardData, DashboardInputs, RangeHandle};
pub use dataset::Dataset;
pub use filter::{Filter, View};
pub use passenger::{Category, Column, Passenger};
pub use percentages::{compute_percentages, percentages, Distribution};
pub use stats::{AgeBin, BoxStats};
