//! Dataset loading service
//!
//! Reads the cleaned manifest CSV into a [`Dataset`]. Columns are located by
//! header name so extra columns and column order do not matter; the leading
//! index column supplies the passenger id.

use crate::error::DataError;
use crate::model::{Column, Dataset, Passenger};
use csv::StringRecord;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Columns that must be present in the header row
const REQUIRED: [Column; 5] = [
    Column::Sex,
    Column::Age,
    Column::Pclass,
    Column::Embarked,
    Column::Survived,
];

/// Load the dataset from a CSV file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_dataset(file)?;
    tracing::info!(
        "Loaded {} passengers from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse the dataset from any CSV source
pub fn read_dataset<R: Read>(source: R) -> Result<Dataset, DataError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        records.push(layout.parse(&record, row)?);
    }

    Ok(Dataset::new(records))
}

/// Positions of the known columns in the header row
struct ColumnLayout {
    /// `None` when the file has no index column; row numbers are used instead
    id: Option<usize>,
    sex: usize,
    age: usize,
    pclass: usize,
    embarked: usize,
    survived: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, DataError> {
        let find = |column: Column| {
            headers
                .iter()
                .position(|h| h.trim() == column.name())
                .ok_or(DataError::MissingColumn(column.name()))
        };

        for column in REQUIRED {
            find(column)?;
        }

        // The leading column is the index unless it is one of the data columns
        let id = match headers.get(0) {
            Some(first) if REQUIRED.iter().any(|c| c.name() == first.trim()) => None,
            Some(_) => Some(0),
            None => None,
        };

        Ok(Self {
            id,
            sex: find(Column::Sex)?,
            age: find(Column::Age)?,
            pclass: find(Column::Pclass)?,
            embarked: find(Column::Embarked)?,
            survived: find(Column::Survived)?,
        })
    }

    fn parse(&self, record: &StringRecord, row: usize) -> Result<Passenger, DataError> {
        // Header is line 1
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(row as u64 + 2);
        let field = |index: usize| record.get(index).unwrap_or("").trim();
        let invalid = |column: Column, value: &str| DataError::InvalidValue {
            line,
            column: column.name(),
            value: value.to_string(),
        };

        let id = match self.id {
            Some(index) => {
                let raw = field(index);
                parse_integer(raw).ok_or_else(|| invalid(Column::Id, raw))?
            }
            None => row as i64,
        };

        let sex = field(self.sex);
        if sex.is_empty() {
            return Err(invalid(Column::Sex, sex));
        }

        let raw_age = field(self.age);
        let age = parse_age(raw_age).map_err(|_| invalid(Column::Age, raw_age))?;

        let raw_class = field(self.pclass);
        let pclass = parse_integer(raw_class)
            .and_then(|c| u8::try_from(c).ok())
            .filter(|c| (1..=3).contains(c))
            .ok_or_else(|| invalid(Column::Pclass, raw_class))?;

        let embarked = match field(self.embarked) {
            "" => None,
            port => Some(port.to_string()),
        };

        let raw_survived = field(self.survived);
        let survived = parse_flag(raw_survived).ok_or_else(|| invalid(Column::Survived, raw_survived))?;

        Ok(Passenger {
            id,
            sex: sex.to_string(),
            age,
            pclass,
            embarked,
            survived,
        })
    }
}

/// Integers written either plainly or as whole floats ("3", "3.0")
fn parse_integer(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .map(|v| v as i64)
}

/// Oldest age the loader accepts
const MAX_AGE: f64 = 150.0;

/// Empty and NaN cells are missing ages; negative or implausible ages are rejected
fn parse_age(raw: &str) -> Result<Option<f64>, ()> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(age) if age.is_nan() => Ok(None),
        Ok(age) if (0.0..=MAX_AGE).contains(&age) => Ok(Some(age)),
        _ => Err(()),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "1.0" | "True" | "true" => Some(true),
        "0" | "0.0" | "False" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use std::io::Write;

    const SAMPLE: &str = "\
,Survived,Pclass,Sex,Age,Embarked
0,0,3,male,22.0,S
1,1,1,female,38.0,C
2,1,3,female,,S
5,0,3,male,,Q
61,1,1,female,38.0,
";

    #[test]
    fn test_read_sample() {
        let dataset = read_dataset(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 5);

        let first = &dataset.records()[0];
        assert_eq!(first.id, 0);
        assert_eq!(first.sex, "male");
        assert_eq!(first.age, Some(22.0));
        assert_eq!(first.pclass, 3);
        assert_eq!(first.embarked.as_deref(), Some("S"));
        assert!(!first.survived);

        assert_eq!(dataset.records()[2].age, None);
        assert_eq!(dataset.records()[4].id, 61);
        assert_eq!(dataset.records()[4].embarked, None);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv = "\
,PassengerId,Survived,Pclass,Name,Sex,Age,Fare,Embarked
0,1,0,3,\"Braund, Mr. Owen Harris\",male,22,7.25,S
";
        let dataset = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].sex, "male");
        assert_eq!(dataset.records()[0].age, Some(22.0));
    }

    #[test]
    fn test_without_index_column_uses_row_numbers() {
        let csv = "Survived,Pclass,Sex,Age,Embarked\n1,2,female,4,S\n0,3,male,,Q\n";
        let dataset = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(dataset.records()[0].id, 0);
        assert_eq!(dataset.records()[1].id, 1);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = ",Survived,Pclass,Sex,Age\n0,0,3,male,22,\n";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("Embarked")));
    }

    #[test]
    fn test_bad_class_reports_line() {
        let csv = ",Survived,Pclass,Sex,Age,Embarked\n0,0,3,male,22,S\n1,1,first,female,30,C\n";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        match err {
            DataError::InvalidValue { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Pclass");
                assert_eq!(value, "first");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ragged_row_is_fatal() {
        let csv = ",Survived,Pclass,Sex,Age,Embarked\n0,0,3,male\n";
        assert!(matches!(
            read_dataset(csv.as_bytes()),
            Err(DataError::Csv(_))
        ));
    }

    #[test]
    fn test_negative_age_is_rejected() {
        let csv = ",Survived,Pclass,Sex,Age,Embarked\n0,0,3,male,-4,S\n";
        assert!(matches!(
            read_dataset(csv.as_bytes()),
            Err(DataError::InvalidValue { column: "Age", .. })
        ));
    }

    #[test]
    fn test_implausible_age_is_rejected() {
        for age in ["1e20", "1e9", "150.5", "inf"] {
            let csv = format!(",Survived,Pclass,Sex,Age,Embarked\n0,1,1,female,{age},S\n");
            assert!(
                matches!(
                    read_dataset(csv.as_bytes()),
                    Err(DataError::InvalidValue { line: 2, column: "Age", .. })
                ),
                "age {age} should be rejected"
            );
        }

        let csv = ",Survived,Pclass,Sex,Age,Embarked\n0,1,1,female,150,S\n";
        assert_eq!(read_dataset(csv.as_bytes()).unwrap().records()[0].age, Some(150.0));
    }

    #[test]
    fn test_float_flags_and_classes() {
        let csv = ",Survived,Pclass,Sex,Age,Embarked\n0,1.0,2.0,female,NaN,S\n";
        let dataset = read_dataset(csv.as_bytes()).unwrap();
        let p = &dataset.records()[0];
        assert!(p.survived);
        assert_eq!(p.pclass, 2);
        assert_eq!(p.age, None);
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let csv = ",Survived,Pclass,Sex,Age,Embarked\n";
        assert!(read_dataset(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.distinct(Column::Embarked).len(), 4);
        assert!(dataset.distinct(Column::Embarked).contains(&Category::Missing));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path().join("clean_titanic.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
