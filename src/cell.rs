//! Cell and row model for an already-decoded tabular source.
//!
//! The mapping engine never touches workbook bytes; it consumes rows of
//! [`CellValue`]s, a content-kind tag plus the typed payload for that kind.
//! The [`crate::workbook`] module adapts calamine output into this shape, and
//! tests construct rows directly.

use std::fmt;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A single cell's content, tagged by kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    /// Human-readable text content
    Text(String),
    /// Numeric content; spreadsheets store all numbers as doubles
    Number(f64),
    /// Boolean content
    Boolean(bool),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Kind tag for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Text(_) => "text",
            CellValue::Number(_) => "number",
            CellValue::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(value) => write!(f, "{value}"),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

/// One row of cells, addressed by zero-based column index.
#[derive(Clone, Debug, Default)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Returns the cell at `col`, treating positions past the end of the row
    /// as empty. A data row shorter than the fixed layout is not an error.
    pub fn cell(&self, col: usize) -> &CellValue {
        self.cells.get(col).unwrap_or(&EMPTY_CELL)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &CellValue)> {
        self.cells.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<CellValue>> for Row {
    fn from(cells: Vec<CellValue>) -> Self {
        Self::new(cells)
    }
}

impl FromIterator<CellValue> for Row {
    fn from_iter<I: IntoIterator<Item = CellValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Excel-style reference ("A1", "C7") for a zero-based row/column pair.
/// Used so diagnostics name the offending cell the way a user sees it.
pub fn cell_reference(row: usize, col: usize) -> String {
    let mut letters = String::new();
    let mut remainder = col;
    loop {
        letters.insert(0, (b'A' + (remainder % 26) as u8) as char);
        if remainder < 26 {
            break;
        }
        remainder = remainder / 26 - 1;
    }
    format!("{}{}", letters, row + 1)
}
