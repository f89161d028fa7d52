//! Passenger records, columns, and categorical cell values

use crate::error::DataError;
use ordered_float::OrderedFloat;
use std::fmt;
use std::str::FromStr;

/// One row of the manifest
#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    /// Value of the leading index column
    pub id: i64,
    pub sex: String,
    /// Age in years, absent for roughly a fifth of the manifest
    pub age: Option<f64>,
    pub pclass: u8,
    /// Port code (C, Q, S), absent for a handful of rows
    pub embarked: Option<String>,
    pub survived: bool,
}

impl Passenger {
    /// Categorical value of this record in the given column
    pub fn category(&self, column: Column) -> Category {
        match column {
            Column::Id => Category::Int(self.id),
            Column::Sex => Category::Text(self.sex.clone()),
            Column::Age => self
                .age
                .map(|age| Category::Number(OrderedFloat(age)))
                .unwrap_or(Category::Missing),
            Column::Pclass => Category::Int(i64::from(self.pclass)),
            Column::Embarked => self
                .embarked
                .as_ref()
                .map(|port| Category::Text(port.clone()))
                .unwrap_or(Category::Missing),
            Column::Survived => Category::Int(i64::from(self.survived)),
        }
    }
}

/// Fields of a passenger record that can be grouped on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Sex,
    Age,
    Pclass,
    Embarked,
    Survived,
}

impl Column {
    pub fn all() -> [Column; 6] {
        [
            Column::Id,
            Column::Sex,
            Column::Age,
            Column::Pclass,
            Column::Embarked,
            Column::Survived,
        ]
    }

    /// Header name as it appears in the CSV
    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "Id",
            Column::Sex => "Sex",
            Column::Age => "Age",
            Column::Pclass => "Pclass",
            Column::Embarked => "Embarked",
            Column::Survived => "Survived",
        }
    }
}

impl FromStr for Column {
    type Err = DataError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Column::all()
            .into_iter()
            .find(|column| column.name() == name)
            .ok_or_else(|| DataError::InvalidColumn(name.to_string()))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single categorical value
///
/// Variant order defines the sort order across kinds; `Missing` sorts last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Int(i64),
    Number(OrderedFloat<f64>),
    Text(String),
    Missing,
}

impl Category {
    pub fn text(value: &str) -> Self {
        Category::Text(value.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Category::Missing)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Int(value) => write!(f, "{}", value),
            Category::Number(value) => write!(f, "{}", value.0),
            Category::Text(value) => f.write_str(value),
            Category::Missing => f.write_str("(missing)"),
        }
    }
}
