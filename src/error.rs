use thiserror::Error;

/// Fatal error class: problems that abort a whole mapping run.
///
/// Everything row- or cell-scoped (factory failures, coercion mismatches,
/// validation rejections) is absorbed and logged instead of surfacing here.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("failed to decode workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook contains no worksheets")]
    NoWorksheet,

    #[error("worksheet '{0}' not found in workbook")]
    UnknownWorksheet(String),
}
