//! Renders a view as an Excel workbook.

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

use crate::{
    Error,
    ledger::{LEDGER_COLUMNS, Transaction},
};

/// The name of the only sheet in the workbook.
const SHEET_NAME: &str = "Relatório";

/// Write `view` to a workbook with one sheet holding the ledger columns and
/// one row per transaction.
///
/// # Errors
/// Returns [Error::SpreadsheetExport] if the workbook cannot be written or a
/// date cannot be represented in Excel.
pub(super) fn spreadsheet_bytes(view: &[Transaction]) -> Result<Vec<u8>, Error> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(LEDGER_COLUMNS) {
        worksheet.write_string_with_format(0, col, title, &header_format)?;
    }

    for (row, transaction) in (1u32..).zip(view) {
        let date = excel_date(transaction)?;

        worksheet.write_number(row, 0, transaction.amount)?;
        worksheet.write_string(row, 1, &transaction.category)?;
        worksheet.write_datetime_with_format(row, 2, &date, &date_format)?;
        worksheet.write_string(row, 3, &transaction.description)?;
    }

    worksheet.set_column_width(2, 12)?;
    worksheet.set_column_width(3, 40)?;

    let bytes = workbook.save_to_buffer()?;

    tracing::info!(
        "Exported {} transactions to a spreadsheet of {} bytes",
        view.len(),
        bytes.len()
    );

    Ok(bytes)
}

fn excel_date(transaction: &Transaction) -> Result<ExcelDateTime, Error> {
    let date = transaction.date;
    let year = u16::try_from(date.year()).map_err(|_| {
        Error::SpreadsheetExport(format!("{date} cannot be written to a spreadsheet"))
    })?;

    Ok(ExcelDateTime::from_ymd(year, u8::from(date.month()), date.day())?)
}
