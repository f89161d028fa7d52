//! Record predicates and the filtered views they produce

use super::passenger::{Category, Column, Passenger};
use std::collections::BTreeSet;

/// A predicate over passenger records
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Port is one of the selected values (missing can be selected too)
    EmbarkedIn(BTreeSet<Category>),
    /// Port equals a single value
    EmbarkedIs(Category),
    /// Age is known and strictly greater than the threshold
    AgeAbove(f64),
    /// Age is known and strictly between the bounds
    AgeBetween(f64, f64),
    /// Sex equals the value exactly
    SexIs(String),
    Survived(bool),
}

impl Filter {
    pub fn matches(&self, passenger: &Passenger) -> bool {
        match self {
            Filter::EmbarkedIn(ports) => ports.contains(&passenger.category(Column::Embarked)),
            Filter::EmbarkedIs(port) => passenger.category(Column::Embarked) == *port,
            Filter::AgeAbove(threshold) => passenger.age.is_some_and(|age| age > *threshold),
            Filter::AgeBetween(lo, hi) => passenger
                .age
                .is_some_and(|age| age > *lo && age < *hi),
            // No normalisation: "Female" or " female" match nothing
            Filter::SexIs(sex) => passenger.sex == *sex,
            Filter::Survived(survived) => passenger.survived == *survived,
        }
    }
}

/// Borrowed subset of the dataset
#[derive(Debug, Clone, Default)]
pub struct View<'a> {
    records: Vec<&'a Passenger>,
}

impl<'a> View<'a> {
    pub fn new(records: Vec<&'a Passenger>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[&'a Passenger] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Passenger> + '_ {
        self.records.iter().copied()
    }

    /// Narrow this view further
    pub fn refine(&self, filters: &[Filter]) -> View<'a> {
        View::new(
            self.iter()
                .filter(|p| filters.iter().all(|f| f.matches(p)))
                .collect(),
        )
    }
}

impl<'a, 'v> IntoIterator for &'v View<'a> {
    type Item = &'a Passenger;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a Passenger>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().copied()
    }
}
