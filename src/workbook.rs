//! Workbook adapter: the seam to the external spreadsheet library.
//!
//! calamine owns container decoding (XLSX, XLSB, XLS, ODS, format and
//! encoding detection included); this module only converts its cell model
//! into [`CellValue`] rows. Failures here are the one fatal error class of
//! a mapping run.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use log::debug;

use crate::cell::{CellValue, Row};
use crate::error::MapError;

/// Decodes one worksheet into rows, in strict top-to-bottom order.
/// Defaults to the first worksheet when no name is given.
pub fn load_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<Row>, MapError> {
    let mut workbook = open_workbook_auto(path)?;
    let name = match sheet {
        Some(requested) => {
            if !workbook.sheet_names().iter().any(|n| n == requested) {
                return Err(MapError::UnknownWorksheet(requested.to_string()));
            }
            requested.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(MapError::NoWorksheet)?,
    };
    debug!("decoding worksheet '{}' from {}", name, path.display());
    let range = workbook.worksheet_range(&name)?;
    Ok(range.rows().map(convert_row).collect())
}

fn convert_row(cells: &[Data]) -> Row {
    cells.iter().map(convert_cell).collect()
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(number) => CellValue::Number(*number),
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Bool(flag) => CellValue::Boolean(*flag),
        // Serial date/times keep their numeric form; ISO strings stay text.
        Data::DateTime(datetime) => CellValue::Number(datetime.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
        // Formula error cells cannot poison a row; they read as absent.
        Data::Error(_) => CellValue::Empty,
    }
}
