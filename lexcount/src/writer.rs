use std::path::Path;

use umya_spreadsheet::Worksheet;

use crate::errors::{LexcountError, Result};
use crate::layout::OutputRow;

/// Writes the layout rows into a named sheet of an existing workbook.
///
/// Any existing sheet with the same name is dropped and recreated, so
/// repeated runs replace earlier results. The column order is fixed:
/// label, noun word, noun count, verb word, verb count, adjective word,
/// adjective count. Counts are written as numbers; blank cells are left
/// untouched.
///
/// # Arguments
/// * `path` - The path to the workbook; it must already exist.
/// * `sheet_name` - The sheet to create or replace.
/// * `rows` - The rows produced by [`layout`](crate::layout::layout).
///
/// # Errors
/// Returns `InputNotFound` if the workbook does not exist and `Workbook`
/// for any read, sheet-management or write failure.
pub fn write_count_sheet(path: &Path, sheet_name: &str, rows: &[OutputRow]) -> Result<()> {
    if !path.is_file() {
        return Err(LexcountError::InputNotFound(path.to_path_buf()));
    }

    let mut book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| LexcountError::Workbook(e.to_string()))?;

    if book.get_sheet_by_name(sheet_name).is_some() {
        book.remove_sheet_by_name(sheet_name).map_err(|e| {
            LexcountError::Workbook(format!("could not replace sheet '{}': {}", sheet_name, e))
        })?;
    }
    let sheet = book.new_sheet(sheet_name).map_err(|e| {
        LexcountError::Workbook(format!("could not create sheet '{}': {}", sheet_name, e))
    })?;

    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        set_text(sheet, 1, row_num, &row.label);
        set_text(sheet, 2, row_num, &row.noun_word);
        set_count(sheet, 3, row_num, row.noun_count);
        set_text(sheet, 4, row_num, &row.verb_word);
        set_count(sheet, 5, row_num, row.verb_count);
        set_text(sheet, 6, row_num, &row.adj_word);
        set_count(sheet, 7, row_num, row.adj_count);
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| LexcountError::Workbook(e.to_string()))?;

    log::debug!(
        "wrote {} rows to sheet '{}' of {}",
        rows.len(),
        sheet_name,
        path.display()
    );

    Ok(())
}

fn set_text(sheet: &mut Worksheet, col: u32, row: u32, value: &str) {
    if !value.is_empty() {
        sheet.get_cell_mut((col, row)).set_value(value);
    }
}

fn set_count(sheet: &mut Worksheet, col: u32, row: u32, value: Option<u32>) {
    if let Some(count) = value {
        sheet.get_cell_mut((col, row)).set_value_number(count);
    }
}
