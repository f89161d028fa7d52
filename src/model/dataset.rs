//! Immutable passenger dataset handle

use super::filter::{Filter, View};
use super::passenger::{Category, Column, Passenger};
use std::collections::HashSet;

/// All passengers loaded at startup
///
/// Built once and only ever read; every query borrows it and produces a
/// fresh [`View`].
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Passenger>,
}

impl Dataset {
    pub fn new(records: Vec<Passenger>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Passenger] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// View over every record
    pub fn all(&self) -> View<'_> {
        View::new(self.records.iter().collect())
    }

    /// View over the records matching every filter, in file order
    pub fn view(&self, filters: &[Filter]) -> View<'_> {
        View::new(
            self.records
                .iter()
                .filter(|p| filters.iter().all(|f| f.matches(p)))
                .collect(),
        )
    }

    /// Distinct values of a column in order of first appearance
    pub fn distinct(&self, column: Column) -> Vec<Category> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|p| p.category(column))
            .filter(|c| seen.insert(c.clone()))
            .collect()
    }
}
