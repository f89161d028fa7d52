//! Relative-frequency distributions over a categorical column

use super::passenger::{Category, Column, Passenger};
use super::stats::count_by;
use crate::error::DataError;

/// `(category, percentage)` pairs ordered by category
pub type Distribution = Vec<(Category, f64)>;

/// Percentage of records per distinct value of `column`
///
/// Missing values form their own category. An empty input yields an empty
/// distribution. Output is ordered ascending by category.
pub fn percentages<'a, I>(records: I, column: Column) -> Distribution
where
    I: IntoIterator<Item = &'a Passenger>,
{
    let counts = count_by(records, column);
    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    counts
        .into_iter()
        .map(|(category, count)| (category, count as f64 / total as f64 * 100.0))
        .collect()
}

/// Same as [`percentages`], with the column given by its CSV header name
pub fn compute_percentages<'a, I>(records: I, column: &str) -> Result<Distribution, DataError>
where
    I: IntoIterator<Item = &'a Passenger>,
{
    let column: Column = column.parse()?;
    Ok(percentages(records, column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dataset, Filter};
    use proptest::prelude::*;

    fn passenger(sex: &str, age: Option<f64>, pclass: u8, embarked: Option<&str>) -> Passenger {
        Passenger {
            id: 0,
            sex: sex.to_string(),
            age,
            pclass,
            embarked: embarked.map(str::to_string),
            survived: false,
        }
    }

    fn embarked(port: &str) -> Passenger {
        passenger("male", None, 3, Some(port))
    }

    #[test]
    fn test_embarked_percentages() {
        let records = vec![embarked("S"), embarked("S"), embarked("C")];
        let dist = compute_percentages(&records, "Embarked").unwrap();

        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].0, Category::text("C"));
        assert!((dist[0].1 - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(dist[1].0, Category::text("S"));
        assert!((dist[1].1 - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_records_give_empty_distribution() {
        let records: Vec<Passenger> = Vec::new();
        assert!(compute_percentages(&records, "Embarked").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let records = vec![embarked("S")];
        let err = compute_percentages(&records, "Cabin").unwrap_err();
        assert!(matches!(err, DataError::InvalidColumn(name) if name == "Cabin"));
    }

    #[test]
    fn test_unknown_column_is_rejected_even_when_empty() {
        let records: Vec<Passenger> = Vec::new();
        assert!(compute_percentages(&records, "Fare").is_err());
    }

    #[test]
    fn test_missing_is_its_own_category() {
        let records = vec![embarked("S"), passenger("male", None, 3, None)];
        let dist = percentages(&records, Column::Embarked);
        assert_eq!(
            dist,
            vec![(Category::text("S"), 50.0), (Category::Missing, 50.0)]
        );
    }

    #[test]
    fn test_no_females_gives_empty_distribution() {
        let dataset = Dataset::new(vec![embarked("S"), embarked("C")]);
        let view = dataset.view(&[Filter::SexIs("female".to_string())]);
        assert!(percentages(&view, Column::Embarked).is_empty());
    }

    #[test]
    fn test_age_filter_then_class() {
        let dataset = Dataset::new(vec![
            passenger("male", Some(45.0), 1, Some("S")),
            passenger("female", Some(61.0), 1, Some("C")),
            passenger("male", Some(22.0), 3, Some("S")),
            passenger("female", None, 2, Some("Q")),
        ]);
        let view = dataset.view(&[Filter::AgeAbove(30.0)]);
        let dist = compute_percentages(&view, "Pclass").unwrap();
        assert_eq!(dist, vec![(Category::Int(1), 100.0)]);
    }

    fn arb_passenger() -> impl Strategy<Value = Passenger> {
        (
            prop_oneof![Just("female"), Just("male"), Just("unknown")],
            proptest::option::of(0.0..80.0_f64),
            1..=3u8,
            proptest::option::of(prop_oneof![Just("C"), Just("Q"), Just("S")]),
            any::<bool>(),
        )
            .prop_map(|(sex, age, pclass, embarked, survived)| Passenger {
                id: 0,
                sex: sex.to_string(),
                age,
                pclass,
                embarked: embarked.map(str::to_string),
                survived,
            })
    }

    fn arb_column() -> impl Strategy<Value = Column> {
        prop::sample::select(Column::all().to_vec())
    }

    proptest! {
        #[test]
        fn percentages_sum_to_one_hundred(
            records in prop::collection::vec(arb_passenger(), 1..200),
            column in arb_column(),
        ) {
            let total: f64 = percentages(&records, column).iter().map(|(_, p)| p).sum();
            prop_assert!((total - 100.0).abs() < 1e-6);
        }

        #[test]
        fn percentages_are_sorted_and_distinct(
            records in prop::collection::vec(arb_passenger(), 0..200),
            column in arb_column(),
        ) {
            let dist = percentages(&records, column);
            prop_assert!(dist.windows(2).all(|w| w[0].0 < w[1].0));

            let mut present: Vec<Category> = records.iter().map(|p| p.category(column)).collect();
            present.sort();
            present.dedup();
            let categories: Vec<Category> = dist.into_iter().map(|(c, _)| c).collect();
            prop_assert_eq!(categories, present);
        }

        #[test]
        fn percentages_are_idempotent(
            records in prop::collection::vec(arb_passenger(), 0..100),
            column in arb_column(),
        ) {
            let first = percentages(&records, column);
            let second = percentages(&records, column);
            prop_assert_eq!(first.len(), second.len());
            for ((c1, p1), (c2, p2)) in first.iter().zip(second.iter()) {
                prop_assert_eq!(c1, c2);
                prop_assert_eq!(p1.to_bits(), p2.to_bits());
            }
        }
    }
}
