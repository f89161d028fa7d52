//! Dashboard pipeline - widget state in, chart series out
//!
//! Every interaction updates [`DashboardInputs`] and recomputes a complete
//! [`DashboardData`] from the immutable [`Dataset`]. Nothing is cached
//! between interactions.

use super::dataset::Dataset;
use super::filter::{Filter, View};
use super::passenger::{Category, Column};
use super::percentages::{percentages, Distribution};
use super::stats::{age_boxes_by, count_by, count_by_pair, survivors_by_age, AgeBin, BoxStats};
use std::collections::BTreeSet;

/// Bounds of the age range slider
pub const AGE_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Default position of the age range slider
pub const DEFAULT_AGE_RANGE: (f64, f64) = (25.0, 75.0);

/// Width of the survival histogram buckets, in years
pub const AGE_BIN_WIDTH: f64 = 10.0;

/// Which handle of the age range slider is being moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeHandle {
    #[default]
    Low,
    High,
}

impl RangeHandle {
    pub fn other(self) -> Self {
        match self {
            RangeHandle::Low => RangeHandle::High,
            RangeHandle::High => RangeHandle::Low,
        }
    }
}

/// Current state of every input widget
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardInputs {
    /// Ports ticked in the multiselect
    pub ports: BTreeSet<Category>,
    /// Port chosen in the single select
    pub port: Option<Category>,
    /// Minimum age number input, truncated toward zero when applied
    pub min_age: f64,
    /// Age range slider, exclusive at both ends when applied
    pub age_range: (f64, f64),
    /// Free-text sex filter, compared verbatim
    pub sex: String,
}

impl DashboardInputs {
    /// Widget defaults for a dataset: every port ticked, first port selected
    pub fn for_dataset(dataset: &Dataset, age_range: (f64, f64)) -> Self {
        let ports = dataset.distinct(Column::Embarked);
        let mut inputs = Self {
            port: ports.first().cloned(),
            ports: ports.into_iter().collect(),
            min_age: 0.0,
            age_range: DEFAULT_AGE_RANGE,
            sex: String::new(),
        };
        inputs.set_age_range(age_range.0, age_range.1);
        inputs
    }

    /// Set both slider handles, clamped to [`AGE_DOMAIN`] with `lo <= hi`
    pub fn set_age_range(&mut self, lo: f64, hi: f64) {
        let lo = lo.clamp(AGE_DOMAIN.0, AGE_DOMAIN.1);
        let hi = hi.clamp(AGE_DOMAIN.0, AGE_DOMAIN.1);
        self.age_range = if lo <= hi { (lo, hi) } else { (hi, lo) };
    }

    /// Move one slider handle; it stops at the other handle and the domain edges
    pub fn move_age_handle(&mut self, handle: RangeHandle, delta: f64) {
        let (lo, hi) = self.age_range;
        self.age_range = match handle {
            RangeHandle::Low => ((lo + delta).clamp(AGE_DOMAIN.0, hi), hi),
            RangeHandle::High => (lo, (hi + delta).clamp(lo, AGE_DOMAIN.1)),
        };
    }

    /// Threshold applied by the minimum age filter
    pub fn min_age_threshold(&self) -> f64 {
        self.min_age.trunc()
    }

    fn port_filter(&self) -> Filter {
        Filter::EmbarkedIn(self.ports.clone())
    }
}

/// Charts driven by one age filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgeSection {
    /// Records passing the filter
    pub count: usize,
    /// Box plot of age per port
    pub age_boxes: Vec<(Category, BoxStats)>,
    /// Histogram of sex, coloured by port
    pub sex_by_port: Vec<((Category, Category), usize)>,
}

impl AgeSection {
    fn from_view(view: &View<'_>) -> Self {
        Self {
            count: view.len(),
            age_boxes: age_boxes_by(view, Column::Embarked),
            sex_by_port: count_by_pair(view, Column::Sex, Column::Embarked)
                .into_iter()
                .collect(),
        }
    }
}

/// Every series shown on the dashboard for one set of inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    /// Records in the whole dataset
    pub total: usize,
    /// Passengers per sex, whole dataset
    pub sex_counts: Vec<(Category, usize)>,
    /// Survivors per age bucket split by sex, whole dataset
    pub survival_by_age: Vec<AgeBin>,
    /// Records in the port multiselect view
    pub selected_count: usize,
    pub embarked: Distribution,
    pub embarked_survived: Distribution,
    pub embarked_died: Distribution,
    /// Records for the single selected port
    pub port_count: usize,
    pub port_classes: Distribution,
    pub port_sexes: Distribution,
    pub min_age: AgeSection,
    pub age_range: AgeSection,
    /// Records matching the sex text filter
    pub sex_count: usize,
    pub sex_table: Distribution,
}

impl DashboardData {
    /// Run the whole filter → aggregate pipeline for one interaction
    pub fn compute(dataset: &Dataset, inputs: &DashboardInputs) -> Self {
        let all = dataset.all();

        let selected = dataset.view(&[inputs.port_filter()]);
        let survived = selected.refine(&[Filter::Survived(true)]);
        let died = selected.refine(&[Filter::Survived(false)]);

        let port = match &inputs.port {
            Some(port) => dataset.view(&[Filter::EmbarkedIs(port.clone())]),
            None => View::default(),
        };

        let older = dataset.view(&[Filter::AgeAbove(inputs.min_age_threshold())]);
        let (lo, hi) = inputs.age_range;
        let in_range = dataset.view(&[Filter::AgeBetween(lo, hi)]);

        let by_sex = dataset.view(&[Filter::SexIs(inputs.sex.clone())]);

        Self {
            total: dataset.len(),
            sex_counts: count_by(&all, Column::Sex).into_iter().collect(),
            survival_by_age: survivors_by_age(&all, AGE_BIN_WIDTH, Column::Sex),
            selected_count: selected.len(),
            embarked: percentages(&selected, Column::Embarked),
            embarked_survived: percentages(&survived, Column::Embarked),
            embarked_died: percentages(&died, Column::Embarked),
            port_count: port.len(),
            port_classes: percentages(&port, Column::Pclass),
            port_sexes: percentages(&port, Column::Sex),
            min_age: AgeSection::from_view(&older),
            age_range: AgeSection::from_view(&in_range),
            sex_count: by_sex.len(),
            sex_table: percentages(&by_sex, Column::Embarked),
        }
    }
}
