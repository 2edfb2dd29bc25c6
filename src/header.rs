//! Header-row detection and the fixed column layout it produces.
//!
//! The header may be preceded by arbitrary title or blank rows. The first
//! row whose text cells resolve at least one schema field becomes the
//! header; matching a single field out of many is enough on purpose, so a
//! sheet that renamed most columns still maps the ones it kept.

use log::warn;

use crate::alias::AliasIndex;
use crate::cell::{CellValue, Row, cell_reference};
use crate::schema::RecordSchema;

/// Field-slot to column-position mapping fixed from the header row.
/// Entries keep header column order; one entry per field at most.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    positions: Vec<(usize, usize)>,
}

impl ColumnLayout {
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.positions.iter().copied()
    }

    pub fn column_of(&self, slot: usize) -> Option<usize> {
        self.positions
            .iter()
            .find(|(mapped, _)| *mapped == slot)
            .map(|(_, col)| *col)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn insert(&mut self, slot: usize, col: usize) -> bool {
        if self.positions.iter().any(|(mapped, _)| *mapped == slot) {
            return false;
        }
        self.positions.push((slot, col));
        true
    }
}

/// Tests whether `row` qualifies as the header row. Only text cells
/// participate; numeric, boolean, and empty cells never look like labels.
/// Returns the fixed layout when at least one field resolved.
pub fn try_header<T>(
    row: &Row,
    row_index: usize,
    index: &AliasIndex,
    schema: &RecordSchema<T>,
) -> Option<ColumnLayout> {
    let mut layout = ColumnLayout::default();
    for (col, cell) in row.iter() {
        let CellValue::Text(label) = cell else {
            continue;
        };
        let Some(slot) = index.resolve(label) else {
            continue;
        };
        if !layout.insert(slot, col) {
            let first = layout.column_of(slot).unwrap_or(col);
            warn!(
                "header row {} labels field '{}' at both {} and {}; keeping the first",
                row_index + 1,
                schema.field(slot).name(),
                cell_reference(row_index, first),
                cell_reference(row_index, col)
            );
        }
    }
    if layout.is_empty() { None } else { Some(layout) }
}
