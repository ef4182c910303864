//! Plate geometry and well addressing.
//!
//! Maps a linear slot index onto a `(plate, well)` position for the three
//! standard microplate formats (96, 384, 1536). Addressing is a pure
//! function of the slot index and the geometry: slot 0 is plate 1 well A01,
//! slots fill row-major (A01, A02, ..) and roll over to a new plate once a
//! plate is full.

use std::fmt;

/// Row labels in plate order: `A`..`Z`, then `AA`..`AF`.
///
/// The 1536-well format has 32 rows, which is more than the alphabet; after
/// `Z` the labels continue with an `A` prefix. Kept as an explicit table so
/// the continuation rule is data, not character arithmetic, and so report
/// sorting can rank rows by table position.
pub const ROW_LABELS: [&str; 32] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z", "AA", "AB", "AC", "AD", "AE", "AF",
];

/// Errors raised by plate geometry configuration.
#[derive(Debug, thiserror::Error)]
pub enum PlateError {
    /// The requested well count is not a supported plate format.
    #[error("unsupported plate format: {0} (supported formats are 96, 384 and 1536)")]
    UnsupportedFormat(u32),
}

/// One of the three supported microplate geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlateFormat {
    /// 96-well plate: 8 rows (A-H) x 12 columns.
    W96,
    /// 384-well plate: 16 rows (A-P) x 24 columns.
    W384,
    /// 1536-well plate: 32 rows (A-AF) x 48 columns.
    W1536,
}

impl PlateFormat {
    /// Resolve a numeric format id (96, 384 or 1536) to a geometry.
    pub fn from_wells(wells: u32) -> Result<Self, PlateError> {
        match wells {
            96 => Ok(Self::W96),
            384 => Ok(Self::W384),
            1536 => Ok(Self::W1536),
            other => Err(PlateError::UnsupportedFormat(other)),
        }
    }

    /// Number of rows on one plate.
    pub fn rows(&self) -> u8 {
        match self {
            Self::W96 => 8,
            Self::W384 => 16,
            Self::W1536 => 32,
        }
    }

    /// Number of columns on one plate.
    pub fn columns(&self) -> u8 {
        match self {
            Self::W96 => 12,
            Self::W384 => 24,
            Self::W1536 => 48,
        }
    }

    /// Total wells on one plate (`rows x columns`).
    pub fn wells_per_plate(&self) -> usize {
        self.rows() as usize * self.columns() as usize
    }

    /// The numeric format id (96, 384 or 1536).
    pub fn well_count(&self) -> u32 {
        self.wells_per_plate() as u32
    }
}

impl fmt::Display for PlateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.well_count())
    }
}

/// A physical well position: 1-based plate number plus 0-based row/column.
///
/// `Ord` sorts by plate, then row, then column, which is the review order
/// used by the compound report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WellAddress {
    /// Plate number, starting at 1.
    pub plate: u32,
    /// Row index into [`ROW_LABELS`] (0 = `A`).
    pub row: u8,
    /// Column index (0 = column `01`).
    pub column: u8,
}

impl WellAddress {
    /// Row label, e.g. `A` or `AA`.
    pub fn row_label(&self) -> &'static str {
        ROW_LABELS[self.row as usize]
    }

    /// Well label: row label plus zero-padded 1-based column, e.g. `A01`.
    pub fn well_label(&self) -> String {
        format!("{}{:02}", self.row_label(), self.column as u16 + 1)
    }
}

impl fmt::Display for WellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plate {} well {}", self.plate, self.well_label())
    }
}

/// Map a linear slot index to its well address for the given geometry.
///
/// Pure and total for any slot index: indices past the end of a plate roll
/// over to the next plate. Emits a `trace!` record of each mapping for
/// diagnostics; tracing never influences the result.
pub fn well_address(slot: usize, format: PlateFormat) -> WellAddress {
    let wells_per_plate = format.wells_per_plate();
    let columns = format.columns() as usize;

    let plate = (slot / wells_per_plate) as u32 + 1;
    let local = slot % wells_per_plate;
    let row = (local / columns) as u8;
    let column = (local % columns) as u8;

    let address = WellAddress { plate, row, column };
    log::trace!(
        "slot {} -> {} (row index {}, column index {})",
        slot,
        address,
        row,
        column
    );
    address
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_slot_is_a01() {
        for format in [PlateFormat::W96, PlateFormat::W384, PlateFormat::W1536] {
            let address = well_address(0, format);
            assert_eq!(address.plate, 1);
            assert_eq!(address.well_label(), "A01");
        }
    }

    #[test]
    fn test_last_slot_of_384_plate() {
        let address = well_address(383, PlateFormat::W384);
        assert_eq!(address.plate, 1);
        assert_eq!(address.well_label(), "P24");
    }

    #[test]
    fn test_last_slot_of_96_plate() {
        let address = well_address(95, PlateFormat::W96);
        assert_eq!(address.plate, 1);
        assert_eq!(address.well_label(), "H12");
    }

    #[test]
    fn test_row_major_fill_order() {
        // Column advances first, then row.
        assert_eq!(well_address(1, PlateFormat::W96).well_label(), "A02");
        assert_eq!(well_address(12, PlateFormat::W96).well_label(), "B01");
    }

    #[test]
    fn test_plate_rollover() {
        let address = well_address(384, PlateFormat::W384);
        assert_eq!(address.plate, 2);
        assert_eq!(address.well_label(), "A01");

        let address = well_address(2 * 384 + 25, PlateFormat::W384);
        assert_eq!(address.plate, 3);
        assert_eq!(address.well_label(), "B02");
    }

    #[test]
    fn test_1536_double_letter_rows() {
        // Row 27 (index 26) is the first double-letter row.
        let address = well_address(26 * 48, PlateFormat::W1536);
        assert_eq!(address.well_label(), "AA01");

        let address = well_address(1535, PlateFormat::W1536);
        assert_eq!(address.plate, 1);
        assert_eq!(address.well_label(), "AF48");
    }

    #[test]
    fn test_row_label_table_continuation() {
        assert_eq!(ROW_LABELS[0], "A");
        assert_eq!(ROW_LABELS[25], "Z");
        assert_eq!(ROW_LABELS[26], "AA");
        assert_eq!(ROW_LABELS[31], "AF");
    }

    #[test]
    fn test_format_from_wells() {
        assert_eq!(PlateFormat::from_wells(96).unwrap(), PlateFormat::W96);
        assert_eq!(PlateFormat::from_wells(384).unwrap(), PlateFormat::W384);
        assert_eq!(PlateFormat::from_wells(1536).unwrap(), PlateFormat::W1536);
        assert!(PlateFormat::from_wells(24).is_err());
        assert!(PlateFormat::from_wells(0).is_err());
    }

    #[test]
    fn test_address_ordering_matches_review_order() {
        let a01_p1 = well_address(0, PlateFormat::W96);
        let a02_p1 = well_address(1, PlateFormat::W96);
        let b01_p1 = well_address(12, PlateFormat::W96);
        let a01_p2 = well_address(96, PlateFormat::W96);

        assert!(a01_p1 < a02_p1);
        assert!(a02_p1 < b01_p1);
        assert!(b01_p1 < a01_p2);
    }
}
