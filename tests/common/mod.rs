//! Workbook fixtures for integration tests.

use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const SPOKEN_HEADER: &[&str] = &["SID", "원문", "번역문"];
pub const DIALOG_HEADER: &[&str] = &[
    "대분류", "소분류", "상황", "Set Nr.", "발화자", "원문", "번역문",
];

const CONTENT_TYPES: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#;
const WORKBOOK: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;
const WORKBOOK_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn column(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Builds an `.xlsx` with one sheet; row 1 is `header`.
pub fn build_xlsx(header: &[&str], rows: &[Vec<&str>]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(CONTENT_TYPES).unwrap();

    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(WORKBOOK).unwrap();

    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(WORKBOOK_RELS).unwrap();

    let mut strings: Vec<String> = Vec::new();
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    let all_rows = std::iter::once(header.to_vec()).chain(rows.iter().cloned());
    for (r, row) in all_rows.enumerate() {
        let number = r + 1;
        sheet.push_str(&format!("<row r=\"{}\">", number));
        for (c, value) in row.iter().enumerate() {
            // Empty cells are left out, as spreadsheet applications do.
            if value.is_empty() {
                continue;
            }
            sheet.push_str(&format!(
                "<c r=\"{}{}\" t=\"s\"><v>{}</v></c>",
                column(c),
                number,
                strings.len()
            ));
            let text = escape(value);
            strings.push(format!("<si><t xml:space=\"preserve\">{}</t></si>", text));
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
    zip.write_all(sheet.as_bytes()).unwrap();

    zip.start_file("xl/sharedStrings.xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{1}</sst>"#,
            strings.len(),
            strings.concat()
        )
        .as_bytes(),
    )
    .unwrap();

    zip.finish().unwrap();
    buffer
}

/// Writes a spoken-schema workbook of `(korean, english)` pairs.
pub fn write_spoken(dir: &Path, name: &str, pairs: &[(&str, &str)]) {
    let ids: Vec<String> = (1..=pairs.len()).map(|i| i.to_string()).collect();
    let rows: Vec<Vec<&str>> = pairs
        .iter()
        .zip(&ids)
        .map(|((ko, en), id)| vec![id.as_str(), *ko, *en])
        .collect();
    std::fs::write(dir.join(name), build_xlsx(SPOKEN_HEADER, &rows)).unwrap();
}

/// Writes a dialog-schema workbook of `(major, minor, korean, english)` rows.
pub fn write_dialog(dir: &Path, name: &str, rows: &[(&str, &str, &str, &str)]) {
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|&(major, minor, ko, en)| vec![major, minor, "상황", "1", "A", ko, en])
        .collect();
    std::fs::write(dir.join(name), build_xlsx(DIALOG_HEADER, &rows)).unwrap();
}
