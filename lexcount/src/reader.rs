use std::path::Path;

use crate::errors::{LexcountError, Result};

/// Reads the sentence column from a workbook.
///
/// Sentences are taken from column A of the resolved sheet, one per row,
/// in row order. Blank cells are kept as empty strings so sentence
/// indices stay aligned with the workbook rows.
///
/// Sheet resolution: an explicitly named sheet must exist; without a
/// name the first sheet is used, then a sheet literally named `data`.
///
/// # Arguments
/// * `path` - The path to the workbook.
/// * `sheet_name` - Optional name of the sheet to read.
///
/// # Returns
/// The sentences in row order.
///
/// # Errors
/// Returns `InputNotFound` if the file does not exist,
/// `SheetResolution` if no sheet can be resolved, and `Workbook` if the
/// file cannot be read as a workbook.
pub fn read_sentences(path: &Path, sheet_name: Option<&str>) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(LexcountError::InputNotFound(path.to_path_buf()));
    }

    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| LexcountError::Workbook(e.to_string()))?;

    let sheet = match sheet_name {
        Some(name) => book.get_sheet_by_name(name).ok_or_else(|| {
            LexcountError::SheetResolution(format!("could not read sheet '{}'", name))
        })?,
        None => book
            .get_sheet(&0)
            .or_else(|| book.get_sheet_by_name("data"))
            .ok_or_else(|| {
                LexcountError::SheetResolution(
                    "could not read the first sheet or the 'data' sheet; \
                     please specify the sheet name explicitly"
                        .to_string(),
                )
            })?,
    };

    let highest_row = sheet.get_highest_row();
    let mut sentences = Vec::with_capacity(highest_row as usize);
    for row in 1..=highest_row {
        sentences.push(sheet.get_value((1, row)));
    }

    log::debug!("read {} sentences from {}", sentences.len(), path.display());

    Ok(sentences)
}
