use std::collections::HashSet;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use log::{debug, info};
use reqwest::header;

use super::error::{DataError, Result};
use super::model::{CellValue, Dataset, KEY_COLUMN};

/// USDA FNDDS 2019-2020 "At A Glance" nutrient values workbook.
pub const DATASET_URL: &str = "https://www.ars.usda.gov/ARSUserFiles/80400530/apps/2019-2020%20FNDDS%20At%20A%20Glance%20-%20FNDDS%20Nutrient%20Values.xlsx";

/// The server rejects bare client requests, so present as a browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";
const SPREADSHEET_ACCEPT: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet, application/octet-stream, */*";

/// Zero-based physical row holding column names; row 0 is a title banner.
const HEADER_ROW: u32 = 1;

/// Source columns 49..=67 are not needed.
const DROPPED_RANGE: std::ops::Range<usize> = 49..68;

/// Positions dropped after the range above: the food code and the
/// category number.
const DROPPED_POSITIONS: [usize; 2] = [0, 2];

/// Narrowest header the cleaning step accepts.
pub const MIN_SOURCE_COLUMNS: usize = DROPPED_RANGE.end;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Download the USDA workbook and return the cleaned dataset.
///
/// Every call re-fetches; nothing is written to disk.
pub fn load_clean() -> Result<Dataset> {
    load_clean_from(DATASET_URL)
}

/// [`load_clean`] against an arbitrary URL.
pub fn load_clean_from(url: &str) -> Result<Dataset> {
    let body = fetch(url)?;
    parse_workbook(body)
}

/// Parse an in-memory workbook and clean its first worksheet.
pub fn parse_workbook(bytes: Vec<u8>) -> Result<Dataset> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::Parse("workbook has no worksheets".into()))??;
    dataset_from_range(&range)
}

// ---------------------------------------------------------------------------
// HTTP fetch
// ---------------------------------------------------------------------------

fn fetch(url: &str) -> Result<Vec<u8>> {
    let fetch_err = |source| DataError::Fetch {
        url: url.to_string(),
        source,
    };

    info!("downloading dataset from {url}");
    let client = reqwest::blocking::Client::builder()
        .build()
        .map_err(fetch_err)?;
    let response = client
        .get(url)
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .header(header::ACCEPT, SPREADSHEET_ACCEPT)
        .send()
        .map_err(fetch_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DataError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes().map_err(fetch_err)?;
    info!("downloaded {} bytes (HTTP {status})", body.len());
    Ok(body.to_vec())
}

// ---------------------------------------------------------------------------
// Sheet → Dataset
// ---------------------------------------------------------------------------

/// Build the cleaned dataset from a decoded worksheet.
///
/// Column positions are counted from column A and row positions from row 1,
/// regardless of where the used range starts.
pub fn dataset_from_range(range: &Range<Data>) -> Result<Dataset> {
    let (start_row, start_col) = range
        .start()
        .ok_or_else(|| DataError::Parse("worksheet is empty".into()))?;
    if start_row > HEADER_ROW {
        return Err(DataError::Parse(format!(
            "missing header row {}",
            HEADER_ROW + 1
        )));
    }

    let lead = start_col as usize;
    let mut rows = range.rows().skip((HEADER_ROW - start_row) as usize);
    let header_cells = rows
        .next()
        .ok_or_else(|| DataError::Parse(format!("missing header row {}", HEADER_ROW + 1)))?;

    let raw_header: Vec<String> = std::iter::repeat(String::new())
        .take(lead)
        .chain(header_cells.iter().map(|c| cell_value(c).to_string()))
        .collect();
    let header = normalize_header(raw_header);

    if header.len() < MIN_SOURCE_COLUMNS {
        return Err(DataError::Parse(format!(
            "expected at least {MIN_SOURCE_COLUMNS} columns, found {}",
            header.len()
        )));
    }

    let keep = clean_columns(header.len());
    let columns: Vec<String> = keep.iter().map(|&i| header[i].clone()).collect();
    if !columns.iter().any(|c| c == KEY_COLUMN) {
        return Err(DataError::Parse(format!("missing '{KEY_COLUMN}' column")));
    }

    let data: Vec<Vec<CellValue>> = rows
        .filter(|cells| !cells.iter().all(|c| matches!(c, Data::Empty)))
        .map(|cells| {
            keep.iter()
                .map(|&i| {
                    i.checked_sub(lead)
                        .and_then(|j| cells.get(j))
                        .map(cell_value)
                        .unwrap_or(CellValue::Null)
                })
                .collect()
        })
        .collect();

    debug!(
        "dropped {} of {} source columns",
        header.len() - columns.len(),
        header.len()
    );
    info!("loaded {} rows x {} columns", data.len(), columns.len());
    Ok(Dataset::new(columns, data))
}

/// Source column indices that survive cleaning, in order.
///
/// The contiguous range goes first, then positions 0 and 2 of what remains.
pub fn clean_columns(header_len: usize) -> Vec<usize> {
    (0..header_len)
        .filter(|i| !DROPPED_RANGE.contains(i))
        .enumerate()
        .filter(|(pos, _)| !DROPPED_POSITIONS.contains(pos))
        .map(|(_, i)| i)
        .collect()
}

/// Collapse whitespace runs (the workbook wraps units onto a second line),
/// name blank headers and suffix duplicates so every name is unique.
fn normalize_header(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
            let name = if name.is_empty() {
                format!("Unnamed: {i}")
            } else {
                name
            };
            let mut unique = name.clone();
            let mut n = 1;
            while seen.contains(&unique) {
                unique = format!("{name}.{n}");
                n += 1;
            }
            seen.insert(unique.clone());
            unique
        })
        .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) => CellValue::Text(dt.to_string()),
            None => CellValue::Text(cell.to_string()),
        },
        other => CellValue::Text(other.to_string()),
    }
}
