//! CSV export of a school selection.

use chrono::{Local, NaiveDate};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;
use tracing::debug;

use crate::school::School;

pub const CSV_HEADERS: [&str; 12] = [
    "ID",
    "Name",
    "Name (Arabic)",
    "Address",
    "Address (Arabic)",
    "Region",
    "Province",
    "Commune",
    "Type",
    "Level",
    "Latitude",
    "Longitude",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no schools to export")]
    Empty,
    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV output is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Renders `schools` as CSV: a bare header row, then one row per school with
/// every cell double-quoted. Rows are separated by `\n` with no trailing
/// newline.
pub fn to_csv<'a, I>(schools: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a School>,
{
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(CSV_HEADERS)?;
    let buf = header.into_inner().map_err(|err| csv::Error::from(err.into_error()))?;

    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buf);
    let mut written = 0;
    for school in schools {
        rows.write_record([
            school.id.to_string(),
            school.name_latin.clone(),
            school.name_arabic.clone().unwrap_or_default(),
            school.address_latin.clone(),
            school.address_arabic.clone().unwrap_or_default(),
            school.region.clone(),
            school.province.clone(),
            school.commune.clone(),
            school.school_type.to_string(),
            school.level.to_string(),
            school.latitude.to_string(),
            school.longitude.to_string(),
        ])?;
        written += 1;
    }
    if written == 0 {
        return Err(ExportError::Empty);
    }

    let bytes = rows.into_inner().map_err(|err| csv::Error::from(err.into_error()))?;
    let mut out = String::from_utf8(bytes)?;
    if out.ends_with('\n') {
        out.pop();
    }
    debug!(rows = written, "rendered CSV export");
    Ok(out)
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("morocco-schools-{}.csv", date.format("%Y-%m-%d"))
}

pub fn export_filename_today() -> String {
    export_filename(Local::now().date_naive())
}
