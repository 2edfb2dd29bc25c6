//! Data-row decoding: cell extraction, semantic-type coercion, and the
//! validation gate.
//!
//! A row is never partially emitted. Either every mapped cell coerces (or
//! is absent, leaving the field unset) and the populated record passes its
//! own validation, or the row contributes nothing to the output. Cell-level
//! problems are absorbed per field; only the record-level outcomes decide
//! whether the row survives.

use std::fmt;

use anyhow::Result;
use log::{error, warn};

use crate::cell::{CellValue, Row, cell_reference};
use crate::engine::ParseReport;
use crate::header::ColumnLayout;
use crate::schema::{FieldValue, RecordSchema, SemanticType, Validate};

/// Coerces one cell into a field's semantic type.
///
/// `Ok(None)` means the cell is empty and the field stays unset. `Err`
/// carries the cell's actual kind when it does not match the semantic
/// type, such as text under an integer field. Integer coercion truncates
/// toward zero; text coercion trims surrounding whitespace.
pub fn coerce(cell: &CellValue, datatype: SemanticType) -> Result<Option<FieldValue>, &'static str> {
    if cell.is_empty() {
        return Ok(None);
    }
    let value = match (datatype, cell) {
        (SemanticType::Text, CellValue::Text(text)) => FieldValue::Text(text.trim().to_string()),
        (SemanticType::Integer, CellValue::Number(number)) => {
            FieldValue::Integer(number.trunc() as i64)
        }
        (SemanticType::Decimal, CellValue::Number(number)) => FieldValue::Decimal(*number),
        (SemanticType::Boolean, CellValue::Boolean(flag)) => FieldValue::Boolean(*flag),
        _ => return Err(cell.kind()),
    };
    Ok(Some(value))
}

/// Decodes one data row against the fixed layout into a fresh record.
///
/// Returns the record only if the factory succeeded and the populated
/// record passed [`Validate::is_valid`]; every other outcome is logged,
/// counted in the report, and the caller moves on to the next row.
pub fn decode_row<T, F>(
    row: &Row,
    row_index: usize,
    layout: &ColumnLayout,
    schema: &RecordSchema<T>,
    factory: &F,
    report: &mut ParseReport,
) -> Option<T>
where
    T: Validate + fmt::Debug,
    F: Fn() -> Result<T>,
{
    let mut record = match factory() {
        Ok(record) => record,
        Err(err) => {
            error!(
                "row {}: failed to create a record instance: {err:#}",
                row_index + 1
            );
            report.factory_failures += 1;
            return None;
        }
    };

    for (slot, col) in layout.entries() {
        let binding = schema.field(slot);
        match coerce(row.cell(col), binding.datatype()) {
            Ok(Some(value)) => binding.assign(&mut record, value),
            Ok(None) => {} // field not present in this data row
            Err(kind) => {
                warn!(
                    "cell {}: cannot read {} content as {} for field '{}'; leaving the field unset",
                    cell_reference(row_index, col),
                    kind,
                    binding.datatype(),
                    binding.name()
                );
                report.coercion_failures += 1;
            }
        }
    }

    if record.is_valid() {
        report.records_kept += 1;
        Some(record)
    } else {
        warn!("row {} failed validation: {:?}", row_index + 1, record);
        report.validation_failures += 1;
        None
    }
}
