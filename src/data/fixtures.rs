//! Test-only source tables and a minimal `.xlsx` writer.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::model::{CellValue, Dataset, CATEGORY_COLUMN, KEY_COLUMN};

/// Width of the synthetic source sheet; wider than the dropped range.
const SOURCE_WIDTH: usize = 72;

/// A header laid out like the USDA workbook: code, description, category
/// number and description, then nutrients. Columns 49..=67 are named
/// `Dropped <n>` so tests can check they are gone.
pub fn source_header() -> Vec<String> {
    let named = [
        "Food code",
        KEY_COLUMN,
        "WWEIA Category number",
        CATEGORY_COLUMN,
        "Energy (kcal)",
        "Protein (g)",
        "Carbohydrate (g)",
        "Sugars, total\n(g)",
        "Fiber, total dietary (g)",
        "Total Fat (g)",
        "Calcium (mg)",
        "Magnesium (mg)",
        "Iron\n(mg)",
        "Vitamin C (mg)",
    ];
    (0..SOURCE_WIDTH)
        .map(|i| match named.get(i) {
            Some(name) => name.to_string(),
            None if (49..68).contains(&i) => format!("Dropped {i}"),
            None => format!("Nutrient {i}"),
        })
        .collect()
}

/// Three foods with distinct values in every nutrient column.
pub fn source_rows() -> Vec<Vec<CellValue>> {
    let foods = [
        (11_000_000, "Apple, raw", 6_002, "Apples", 0.3),
        (11_000_001, "Banana, raw", 6_004, "Bananas", 1.1),
        (11_000_002, "Milk, whole", 1_002, "Milk, whole", 3.3),
    ];
    foods
        .iter()
        .enumerate()
        .map(|(r, &(code, name, cat_no, cat, protein))| {
            let mut row: Vec<CellValue> = vec![
                CellValue::Integer(code),
                name.into(),
                CellValue::Integer(cat_no),
                cat.into(),
                CellValue::Float(50.0 + r as f64),
                CellValue::Float(protein),
            ];
            row.extend((6..SOURCE_WIDTH).map(|c| CellValue::Float((r * 100 + c) as f64 / 10.0)));
            row
        })
        .collect()
}

/// A small already-cleaned dataset with a duplicated food name.
pub fn cleaned() -> Dataset {
    Dataset::new(
        vec![
            KEY_COLUMN.into(),
            CATEGORY_COLUMN.into(),
            "Protein (g)".into(),
            "Carbohydrate (g)".into(),
            "Sugars, total (g)".into(),
            "Calcium (mg)".into(),
            "Magnesium (mg)".into(),
            "Iron (mg)".into(),
            "Vitamin C (mg)".into(),
            "Total Fat (g)".into(),
        ],
        vec![
            vec![
                "Apple, raw".into(),
                "Apples".into(),
                0.3.into(),
                13.8.into(),
                10.4.into(),
                6.0.into(),
                5.0.into(),
                0.12.into(),
                4.6.into(),
                0.17.into(),
            ],
            vec![
                "Banana, raw".into(),
                "Bananas".into(),
                1.1.into(),
                22.8.into(),
                12.2.into(),
                5.0.into(),
                27.0.into(),
                0.26.into(),
                8.7.into(),
                0.33.into(),
            ],
            vec![
                "Apple, raw".into(),
                "Apples".into(),
                0.2.into(),
                14.1.into(),
                10.9.into(),
                5.0.into(),
                4.0.into(),
                0.1.into(),
                4.0.into(),
                0.2.into(),
            ],
            vec![
                "<Tart> & tangy".into(),
                "Desserts".into(),
                3.0.into(),
                40.0.into(),
                20.0.into(),
                CellValue::Null,
                10.0.into(),
                1.0.into(),
                0.0.into(),
                12.0.into(),
            ],
        ],
    )
}

/// Workbook bytes with a title banner, the [`source_header`] and
/// [`source_rows`].
pub fn source_workbook() -> Vec<u8> {
    let mut sheet: Vec<Vec<CellValue>> = vec![vec!["FNDDS Nutrient Values".into()]];
    sheet.push(source_header().iter().map(|h| h.as_str().into()).collect());
    sheet.extend(source_rows());
    xlsx_bytes(&sheet)
}

/// Write `rows` as the single worksheet of a minimal `.xlsx` package.
pub fn xlsx_bytes(rows: &[Vec<CellValue>]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", WORKBOOK.to_string()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(rows)),
    ];
    for (name, body) in parts {
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn sheet_xml(rows: &[Vec<CellValue>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let pos = format!("{}{}", column_letters(c), r + 1);
            match cell {
                CellValue::Null => {}
                CellValue::Text(s) => xml.push_str(&format!(
                    r#"<c r="{pos}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    escape(s)
                )),
                CellValue::Bool(b) => {
                    xml.push_str(&format!(r#"<c r="{pos}" t="b"><v>{}</v></c>"#, u8::from(*b)))
                }
                number => xml.push_str(&format!(r#"<c r="{pos}"><v>{number}</v></c>"#)),
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="FNDDS" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

#[test]
fn column_letters_follow_spreadsheet_naming() {
    assert_eq!(column_letters(0), "A");
    assert_eq!(column_letters(25), "Z");
    assert_eq!(column_letters(26), "AA");
    assert_eq!(column_letters(71), "BT");
}
