//! Summary statistics behind the histograms and box plots

use super::passenger::{Category, Column, Passenger};
use std::collections::BTreeMap;

/// Upper bound on histogram buckets; older ages collapse into the last one
pub const MAX_AGE_BINS: usize = 256;

/// Count records per category, ordered by category
pub fn count_by<'a, I>(records: I, column: Column) -> BTreeMap<Category, usize>
where
    I: IntoIterator<Item = &'a Passenger>,
{
    let mut counts = BTreeMap::new();
    for passenger in records {
        *counts.entry(passenger.category(column)).or_insert(0) += 1;
    }
    counts
}

/// Count records per pair of categories, ordered by `(first, second)`
pub fn count_by_pair<'a, I>(
    records: I,
    first: Column,
    second: Column,
) -> BTreeMap<(Category, Category), usize>
where
    I: IntoIterator<Item = &'a Passenger>,
{
    let mut counts = BTreeMap::new();
    for passenger in records {
        let key = (passenger.category(first), passenger.category(second));
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// One age bucket of the survival histogram
#[derive(Debug, Clone, PartialEq)]
pub struct AgeBin {
    pub lower: f64,
    pub upper: f64,
    /// Survivors in this bucket per group, every group present in the input
    pub survivors: Vec<(Category, usize)>,
}

impl AgeBin {
    pub fn label(&self) -> String {
        format!("{}-{}", self.lower, self.upper)
    }
}

/// Sum the survived flag per fixed-width age bucket, split by `group`
///
/// Records without an age are skipped. Buckets are `[lower, upper)`, starting
/// at zero and running up to the oldest passenger.
pub fn survivors_by_age<'a, I>(records: I, bin_width: f64, group: Column) -> Vec<AgeBin>
where
    I: IntoIterator<Item = &'a Passenger>,
{
    if bin_width <= 0.0 {
        return Vec::new();
    }

    let aged: Vec<(f64, &Passenger)> = records
        .into_iter()
        .filter_map(|p| p.age.map(|age| (age, p)))
        .collect();
    let Some(oldest) = aged.iter().map(|(age, _)| *age).reduce(f64::max) else {
        return Vec::new();
    };

    let groups: Vec<Category> = count_by(aged.iter().map(|(_, p)| *p), group)
        .into_keys()
        .collect();
    let bin_count = (oldest / bin_width).floor().min((MAX_AGE_BINS - 1) as f64) as usize + 1;

    let mut sums: Vec<BTreeMap<Category, usize>> = vec![BTreeMap::new(); bin_count];
    for (age, passenger) in &aged {
        let index = ((age / bin_width).floor() as usize).min(bin_count - 1);
        let entry = sums[index].entry(passenger.category(group)).or_insert(0);
        *entry += usize::from(passenger.survived);
    }

    sums.into_iter()
        .enumerate()
        .map(|(i, bin)| AgeBin {
            lower: i as f64 * bin_width,
            upper: (i + 1) as f64 * bin_width,
            survivors: groups
                .iter()
                .map(|g| (g.clone(), bin.get(g).copied().unwrap_or(0)))
                .collect(),
        })
        .collect()
}

/// Five-number summary for a box plot
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Lower whisker: smallest value inside the lower fence
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Upper whisker: largest value inside the upper fence
    pub max: f64,
    pub outliers: Vec<f64>,
    pub count: usize,
}

impl BoxStats {
    /// Compute the summary, ignoring non-finite values
    pub fn from_values(values: &[f64]) -> Option<BoxStats> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);

        let iqr = q3 - q1;
        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let min = sorted
            .iter()
            .copied()
            .find(|&v| v >= lower_fence)
            .unwrap_or(q1);
        let max = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= upper_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Some(BoxStats {
            min,
            q1,
            median,
            q3,
            max,
            outliers,
            count: sorted.len(),
        })
    }

    /// Full extent including outliers
    pub fn range(&self) -> (f64, f64) {
        self.outliers
            .iter()
            .fold((self.min, self.max), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

/// Linear-interpolation quantile of sorted, non-empty data
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Box-plot summary of ages per group, skipping groups with no known age
pub fn age_boxes_by<'a, I>(records: I, group: Column) -> Vec<(Category, BoxStats)>
where
    I: IntoIterator<Item = &'a Passenger>,
{
    let mut ages: BTreeMap<Category, Vec<f64>> = BTreeMap::new();
    for passenger in records {
        if let Some(age) = passenger.age {
            ages.entry(passenger.category(group)).or_default().push(age);
        }
    }

    ages.into_iter()
        .filter_map(|(category, values)| BoxStats::from_values(&values).map(|s| (category, s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(sex: &str, age: Option<f64>, embarked: &str, survived: bool) -> Passenger {
        Passenger {
            id: 0,
            sex: sex.to_string(),
            age,
            pclass: 3,
            embarked: Some(embarked.to_string()),
            survived,
        }
    }

    #[test]
    fn test_count_by_orders_categories() {
        let records = vec![
            passenger("male", None, "S", false),
            passenger("female", None, "S", true),
            passenger("male", None, "C", false),
        ];
        let counts: Vec<_> = count_by(&records, Column::Sex).into_iter().collect();
        assert_eq!(
            counts,
            vec![(Category::text("female"), 1), (Category::text("male"), 2)]
        );
    }

    #[test]
    fn test_count_by_pair() {
        let records = vec![
            passenger("male", None, "S", false),
            passenger("male", None, "S", false),
            passenger("male", None, "C", false),
        ];
        let counts = count_by_pair(&records, Column::Sex, Column::Embarked);
        assert_eq!(counts.len(), 2);
        assert_eq!(
            counts.get(&(Category::text("male"), Category::text("S"))),
            Some(&2)
        );
    }

    #[test]
    fn test_quantiles_interpolate() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn test_box_stats_flags_outliers() {
        let stats = BoxStats::from_values(&[10.0, 11.0, 12.0, 13.0, 14.0, 80.0]).unwrap();
        assert_eq!(stats.outliers, vec![80.0]);
        assert_eq!(stats.max, 14.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.range(), (10.0, 80.0));
    }

    #[test]
    fn test_box_stats_empty_is_none() {
        assert!(BoxStats::from_values(&[]).is_none());
        assert!(BoxStats::from_values(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_single_value_box() {
        let stats = BoxStats::from_values(&[42.0]).unwrap();
        assert_eq!(stats.min, 42.0);
        assert_eq!(stats.median, 42.0);
        assert_eq!(stats.max, 42.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_survivors_by_age_bins() {
        let records = vec![
            passenger("female", Some(4.0), "S", true),
            passenger("male", Some(8.0), "S", true),
            passenger("male", Some(25.0), "S", false),
            passenger("female", Some(29.5), "S", true),
            passenger("female", None, "S", true),
        ];

        let bins = survivors_by_age(&records, 10.0, Column::Sex);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].label(), "0-10");
        assert_eq!(
            bins[0].survivors,
            vec![(Category::text("female"), 1), (Category::text("male"), 1)]
        );
        assert_eq!(
            bins[1].survivors,
            vec![(Category::text("female"), 0), (Category::text("male"), 0)]
        );
        assert_eq!(
            bins[2].survivors,
            vec![(Category::text("female"), 1), (Category::text("male"), 0)]
        );
    }

    #[test]
    fn test_survivors_by_age_caps_bucket_count() {
        let records = vec![
            passenger("female", Some(1e20), "S", true),
            passenger("male", Some(3.0), "S", true),
        ];

        let bins = survivors_by_age(&records, 10.0, Column::Sex);
        assert_eq!(bins.len(), MAX_AGE_BINS);
        assert_eq!(
            bins[0].survivors,
            vec![(Category::text("female"), 0), (Category::text("male"), 1)]
        );
        assert_eq!(
            bins[MAX_AGE_BINS - 1].survivors,
            vec![(Category::text("female"), 1), (Category::text("male"), 0)]
        );
    }

    #[test]
    fn test_survivors_by_age_without_ages() {
        let records = vec![passenger("female", None, "S", true)];
        assert!(survivors_by_age(&records, 10.0, Column::Sex).is_empty());
    }

    #[test]
    fn test_age_boxes_by_port() {
        let records = vec![
            passenger("male", Some(20.0), "S", false),
            passenger("male", Some(40.0), "S", false),
            passenger("male", None, "Q", false),
            passenger("male", Some(30.0), "C", false),
        ];
        let boxes = age_boxes_by(&records, Column::Embarked);
        let ports: Vec<_> = boxes.iter().map(|(c, _)| c.to_string()).collect();
        assert_eq!(ports, vec!["C", "S"]);
        assert_eq!(boxes[1].1.median, 30.0);
    }
}
