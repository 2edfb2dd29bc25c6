//! Orchestration of the full mapping run.
//!
//! [`MappingEngine`] builds the alias index once, then makes a single
//! forward pass over the row sequence: searching for the header row until
//! one is found, then decoding every subsequent row against the fixed
//! layout. Output preserves input-row order; the header row itself is
//! never decoded as data.

use std::fmt;

use anyhow::Result;
use log::{debug, warn};

use crate::alias::{AliasCollision, AliasIndex};
use crate::cell::Row;
use crate::decode::decode_row;
use crate::header::{ColumnLayout, try_header};
use crate::schema::{RecordSchema, Validate};

/// Two-phase parse state. `Mapped` is terminal for the remainder of the
/// run; the layout never reverts once fixed.
enum ParseState {
    SearchingHeader,
    Mapped(ColumnLayout),
}

/// Counters accumulated over one mapping run.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub(crate) rows_scanned: usize,
    pub(crate) header_row: Option<usize>,
    pub(crate) records_kept: usize,
    pub(crate) validation_failures: usize,
    pub(crate) factory_failures: usize,
    pub(crate) coercion_failures: usize,
}

impl ParseReport {
    pub fn rows_scanned(&self) -> usize {
        self.rows_scanned
    }

    /// Zero-based index of the row accepted as the header, if any.
    pub fn header_row(&self) -> Option<usize> {
        self.header_row
    }

    pub fn records_kept(&self) -> usize {
        self.records_kept
    }

    pub fn validation_failures(&self) -> usize {
        self.validation_failures
    }

    pub fn factory_failures(&self) -> usize {
        self.factory_failures
    }

    pub fn coercion_failures(&self) -> usize {
        self.coercion_failures
    }
}

/// Maps a sequence of rows into validated records of type `T`.
pub struct MappingEngine<'s, T> {
    schema: &'s RecordSchema<T>,
    index: AliasIndex,
    collisions: Vec<AliasCollision>,
}

impl<'s, T: Validate + fmt::Debug> MappingEngine<'s, T> {
    /// Builds the alias index for `schema`. Collisions are logged during
    /// the build and kept available through [`MappingEngine::collisions`].
    pub fn new(schema: &'s RecordSchema<T>) -> Self {
        let (index, collisions) = AliasIndex::build(schema);
        Self {
            schema,
            index,
            collisions,
        }
    }

    pub fn collisions(&self) -> &[AliasCollision] {
        &self.collisions
    }

    /// Single-pass run with default-constructed records.
    pub fn run<I>(&self, rows: I) -> Vec<T>
    where
        T: Default,
        I: IntoIterator<Item = Row>,
    {
        self.run_with_report(rows).0
    }

    pub fn run_with_report<I>(&self, rows: I) -> (Vec<T>, ParseReport)
    where
        T: Default,
        I: IntoIterator<Item = Row>,
    {
        self.run_with_factory(rows, || Ok(T::default()))
    }

    /// Single-pass run with a caller-supplied record factory. A factory
    /// error skips that row and the run continues.
    pub fn run_with_factory<I, F>(&self, rows: I, factory: F) -> (Vec<T>, ParseReport)
    where
        I: IntoIterator<Item = Row>,
        F: Fn() -> Result<T>,
    {
        let mut state = ParseState::SearchingHeader;
        let mut records = Vec::new();
        let mut report = ParseReport::default();

        for (row_index, row) in rows.into_iter().enumerate() {
            report.rows_scanned += 1;
            match &state {
                ParseState::SearchingHeader => {
                    if let Some(layout) = try_header(&row, row_index, &self.index, self.schema) {
                        debug!(
                            "header found at row {} mapping {} field(s)",
                            row_index + 1,
                            layout.len()
                        );
                        report.header_row = Some(row_index);
                        state = ParseState::Mapped(layout);
                    }
                }
                ParseState::Mapped(layout) => {
                    if let Some(record) =
                        decode_row(&row, row_index, layout, self.schema, &factory, &mut report)
                    {
                        records.push(record);
                    }
                }
            }
        }

        if report.header_row.is_none() {
            warn!(
                "no header row found after scanning {} row(s)",
                report.rows_scanned
            );
        }
        (records, report)
    }
}
