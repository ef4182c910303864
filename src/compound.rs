//! Compound table input.
//!
//! Reads a delimited table of compounds with a header row. Two columns are
//! semantically required (a sample identifier and an exact molecular mass,
//! both with configurable names); every other column passes through to the
//! reports unchanged and in its original position.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Errors raised while reading the compound table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading the input file.
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-table parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header.
    #[error("Input file must contain a '{0}' column")]
    MissingColumn(String),

    /// A mass field could not be converted to a finite number.
    #[error("Row {row}: cannot parse exact mass '{value}'")]
    InvalidMass {
        /// 1-based data row number (header excluded).
        row: usize,
        /// The offending field value.
        value: String,
    },

    /// The delimiter name is not one of `tab`, `comma` or `space`.
    #[error("Unsupported delimiter: {0}")]
    UnsupportedDelimiter(String),
}

/// Input field delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Tab-separated values.
    #[default]
    Tab,
    /// Comma-separated values.
    Comma,
    /// Single-space-separated values.
    Space,
}

impl Delimiter {
    /// The delimiter byte handed to the CSV reader.
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Tab => b'\t',
            Self::Comma => b',',
            Self::Space => b' ',
        }
    }

    /// Resolve a delimiter name (`tab`, `comma`, `space`).
    pub fn from_name(name: &str) -> Result<Self, TableError> {
        match name {
            "tab" => Ok(Self::Tab),
            "comma" => Ok(Self::Comma),
            "space" => Ok(Self::Space),
            other => Err(TableError::UnsupportedDelimiter(other.to_string())),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tab => "tab",
            Self::Comma => "comma",
            Self::Space => "space",
        };
        write!(f, "{}", name)
    }
}

/// Names of the two required columns.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Sample identifier column name.
    pub sample: String,
    /// Exact mass column name.
    pub mass: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            sample: "sample".to_string(),
            mass: "ExactMass".to_string(),
        }
    }
}

/// One compound row: all original fields plus the two extracted values.
#[derive(Debug, Clone)]
pub struct Compound {
    /// Every input field in original column order.
    pub fields: Vec<String>,
    /// Sample identifier, extracted by column position.
    pub sample_id: String,
    /// Exact molecular mass, parsed from its field. Always finite.
    pub exact_mass: f64,
}

/// A parsed compound table: header, rows and the bound column positions.
#[derive(Debug, Clone)]
pub struct CompoundTable {
    /// Header fields in original order.
    pub header: Vec<String>,
    /// Compound rows in input order.
    pub compounds: Vec<Compound>,
    /// Index of the sample identifier column.
    pub sample_index: usize,
    /// Index of the exact mass column.
    pub mass_index: usize,
}

impl CompoundTable {
    /// Read a compound table from a file.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        columns: &ColumnSpec,
        delimiter: Delimiter,
    ) -> Result<Self, TableError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), columns, delimiter)
    }

    /// Read a compound table from any reader.
    pub fn from_reader<R: Read>(
        reader: R,
        columns: &ColumnSpec,
        delimiter: Delimiter,
    ) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let header: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

        let sample_index = header
            .iter()
            .position(|h| h == &columns.sample)
            .ok_or_else(|| TableError::MissingColumn(columns.sample.clone()))?;
        let mass_index = header
            .iter()
            .position(|h| h == &columns.mass)
            .ok_or_else(|| TableError::MissingColumn(columns.mass.clone()))?;

        let mut compounds = Vec::new();

        for (row_number, record) in csv_reader.records().enumerate() {
            let record = record?;
            let fields: Vec<String> = record.iter().map(str::to_string).collect();

            let sample_id = fields
                .get(sample_index)
                .map(String::as_str)
                .unwrap_or("")
                .to_string();
            let mass_field = fields.get(mass_index).map(String::as_str).unwrap_or("");

            let exact_mass: f64 =
                mass_field
                    .trim()
                    .parse()
                    .map_err(|_| TableError::InvalidMass {
                        row: row_number + 1,
                        value: mass_field.to_string(),
                    })?;
            if !exact_mass.is_finite() {
                return Err(TableError::InvalidMass {
                    row: row_number + 1,
                    value: mass_field.to_string(),
                });
            }

            compounds.push(Compound {
                fields,
                sample_id,
                exact_mass,
            });
        }

        log::debug!(
            "read {} compounds ({} columns, sample column {}, mass column {})",
            compounds.len(),
            header.len(),
            sample_index,
            mass_index
        );

        Ok(Self {
            header,
            compounds,
            sample_index,
            mass_index,
        })
    }

    /// Number of compound rows.
    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    /// Whether the table has no compound rows.
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TSV: &str = "sample\tSmiles\tExactMass\n\
                       CMP-1\tCCO\t46.0419\n\
                       CMP-2\tC\t16.0313\n";

    #[test]
    fn test_read_tab_delimited() {
        let table =
            CompoundTable::from_reader(Cursor::new(TSV), &ColumnSpec::default(), Delimiter::Tab)
                .unwrap();

        assert_eq!(table.header, vec!["sample", "Smiles", "ExactMass"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.sample_index, 0);
        assert_eq!(table.mass_index, 2);

        assert_eq!(table.compounds[0].sample_id, "CMP-1");
        assert_eq!(table.compounds[0].exact_mass, 46.0419);
        // Full row preserved, including columns the pipeline ignores.
        assert_eq!(table.compounds[0].fields, vec!["CMP-1", "CCO", "46.0419"]);
    }

    #[test]
    fn test_read_comma_delimited() {
        let data = "id,ExactMass\nA,100.5\n";
        let columns = ColumnSpec {
            sample: "id".to_string(),
            mass: "ExactMass".to_string(),
        };
        let table =
            CompoundTable::from_reader(Cursor::new(data), &columns, Delimiter::Comma).unwrap();
        assert_eq!(table.compounds[0].sample_id, "A");
        assert_eq!(table.compounds[0].exact_mass, 100.5);
    }

    #[test]
    fn test_read_space_delimited() {
        let data = "sample ExactMass\nA 100.5\n";
        let table =
            CompoundTable::from_reader(Cursor::new(data), &ColumnSpec::default(), Delimiter::Space)
                .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_sample_column() {
        let data = "name\tExactMass\nA\t100.5\n";
        let err =
            CompoundTable::from_reader(Cursor::new(data), &ColumnSpec::default(), Delimiter::Tab)
                .unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(c) if c == "sample"));
    }

    #[test]
    fn test_missing_mass_column() {
        let data = "sample\tMass\nA\t100.5\n";
        let err =
            CompoundTable::from_reader(Cursor::new(data), &ColumnSpec::default(), Delimiter::Tab)
                .unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(c) if c == "ExactMass"));
    }

    #[test]
    fn test_malformed_mass_fails_fast() {
        let data = "sample\tExactMass\nA\t100.5\nB\tnot-a-number\n";
        let err =
            CompoundTable::from_reader(Cursor::new(data), &ColumnSpec::default(), Delimiter::Tab)
                .unwrap_err();
        match err {
            TableError::InvalidMass { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "not-a-number");
            }
            other => panic!("expected InvalidMass, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_mass_rejected() {
        let data = "sample\tExactMass\nA\tNaN\n";
        assert!(CompoundTable::from_reader(
            Cursor::new(data),
            &ColumnSpec::default(),
            Delimiter::Tab
        )
        .is_err());

        let data = "sample\tExactMass\nA\tinf\n";
        assert!(CompoundTable::from_reader(
            Cursor::new(data),
            &ColumnSpec::default(),
            Delimiter::Tab
        )
        .is_err());
    }

    #[test]
    fn test_empty_table() {
        let data = "sample\tExactMass\n";
        let table =
            CompoundTable::from_reader(Cursor::new(data), &ColumnSpec::default(), Delimiter::Tab)
                .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_delimiter_names() {
        assert_eq!(Delimiter::from_name("tab").unwrap(), Delimiter::Tab);
        assert_eq!(Delimiter::from_name("comma").unwrap(), Delimiter::Comma);
        assert_eq!(Delimiter::from_name("space").unwrap(), Delimiter::Space);
        assert!(matches!(
            Delimiter::from_name("pipe"),
            Err(TableError::UnsupportedDelimiter(_))
        ));
    }
}
