//! Streaming worksheet reader.

use super::xml::{
    get_attr_string, get_attr_usize, get_local_name, read_rich_text, read_text, unescape_ooxml,
};
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{BufReader, Read};

/// One worksheet row with cells placed at their column positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based row number.
    pub number: usize,
    /// Cell text by column; gaps are empty strings.
    pub cells: Vec<String>,
}

impl SheetRow {
    fn empty(number: usize) -> Self {
        Self {
            number,
            cells: Vec::new(),
        }
    }
}

/// Extracted cell attributes from XML.
#[derive(Default)]
struct CellAttrs {
    column: Option<usize>,
    cell_type: Option<String>,
}

/// Iterator over the rows of one worksheet part.
///
/// Rows are parsed lazily from the compressed stream. Row numbers skipped in
/// the XML are yielded as empty rows, so the sequence matches what a
/// spreadsheet application displays.
pub struct SheetRows<'a> {
    reader: Reader<BufReader<Box<dyn Read + 'a>>>,
    shared_strings: &'a [String],
    next_row: usize,
    pending: Option<SheetRow>,
    finished: bool,
}

impl<'a> SheetRows<'a> {
    pub(crate) fn new(part: Box<dyn Read + 'a>, shared_strings: &'a [String]) -> Self {
        Self {
            reader: Reader::from_reader(BufReader::new(part)),
            shared_strings,
            next_row: 1,
            pending: None,
            finished: false,
        }
    }

    /// Reads the next `<row>` element, or `None` at end of sheet.
    fn read_row(&mut self) -> Result<Option<SheetRow>> {
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"row" => {
                    let number = get_attr_usize(&e, "r").unwrap_or(self.next_row);
                    buf.clear();
                    let cells = self.parse_row_cells()?;
                    return Ok(Some(SheetRow { number, cells }));
                }
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"row" => {
                    let number = get_attr_usize(&e, "r").unwrap_or(self.next_row);
                    return Ok(Some(SheetRow::empty(number)));
                }
                Ok(Event::Eof) => return Ok(None),
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }
    }

    /// Parses `<c>` children until `</row>`.
    fn parse_row_cells(&mut self) -> Result<Vec<String>> {
        let mut cells: Vec<String> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"c" => {
                    let attrs = cell_attrs(&e);
                    buf.clear();
                    let value = self.parse_cell(attrs.cell_type.as_deref())?;
                    place_cell(&mut cells, attrs.column, value);
                }
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"c" => {
                    let attrs = cell_attrs(&e);
                    place_cell(&mut cells, attrs.column, String::new());
                }
                Ok(Event::End(e)) if e.local_name().as_ref() == b"row" => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(cells)
    }

    /// Parses the content of one `<c>` element into display text.
    fn parse_cell(&mut self, cell_type: Option<&str>) -> Result<String> {
        let mut raw_value: Option<String> = None;
        let mut inline: Option<String> = None;
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = get_local_name(&e);
                    buf.clear();

                    match name.as_str() {
                        "v" => raw_value = Some(read_text(&mut self.reader, b"v")?),
                        "is" => inline = Some(read_rich_text(&mut self.reader, b"is")?),
                        // Formula source text is not a value
                        "f" => {
                            read_text(&mut self.reader, b"f")?;
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(e)) if e.local_name().as_ref() == b"c" => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        self.cell_text(cell_type, raw_value, inline)
    }

    fn cell_text(
        &self,
        cell_type: Option<&str>,
        raw_value: Option<String>,
        inline: Option<String>,
    ) -> Result<String> {
        let text = match cell_type {
            Some("s") => match raw_value {
                Some(v) => {
                    let index: usize = v.trim().parse().map_err(|_| {
                        Error::InvalidData(format!("shared string index '{}'", v))
                    })?;
                    self.shared_strings.get(index).cloned().ok_or_else(|| {
                        Error::InvalidData(format!("shared string index {} out of range", index))
                    })?
                }
                None => String::new(),
            },
            Some("inlineStr") => inline.unwrap_or_default(),
            Some("str") => unescape_ooxml(&raw_value.unwrap_or_default()),
            Some("b") => match raw_value.as_deref().map(str::trim) {
                Some("1") => "TRUE".to_string(),
                Some("0") => "FALSE".to_string(),
                _ => String::new(),
            },
            // Numbers, dates and error codes keep their stored text.
            Some("n") | None => format_number(&raw_value.unwrap_or_default()),
            Some(_) => raw_value.unwrap_or_default(),
        };
        Ok(text)
    }
}

impl Iterator for SheetRows<'_> {
    type Item = Result<SheetRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.take() {
                if row.number > self.next_row {
                    let gap = SheetRow::empty(self.next_row);
                    self.next_row += 1;
                    self.pending = Some(row);
                    return Some(Ok(gap));
                }
                self.next_row = self.next_row.max(row.number + 1);
                return Some(Ok(row));
            }

            if self.finished {
                return None;
            }

            match self.read_row() {
                Ok(Some(row)) => self.pending = Some(row),
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

fn cell_attrs(e: &BytesStart) -> CellAttrs {
    CellAttrs {
        column: get_attr_string(e, "r").and_then(|r| column_index(&r)),
        cell_type: get_attr_string(e, "t"),
    }
}

/// Places a cell at its column, or after the last cell when unreferenced.
fn place_cell(cells: &mut Vec<String>, column: Option<usize>, value: String) {
    let index = column.unwrap_or(cells.len());
    if index >= cells.len() {
        cells.resize(index + 1, String::new());
    }
    cells[index] = value;
}

/// Converts a cell reference like `"AB12"` into a 0-based column index.
pub(crate) fn column_index(reference: &str) -> Option<usize> {
    let letters: Vec<u8> = reference
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }

    let mut index = 0usize;
    for b in letters {
        index = index * 26 + (b.to_ascii_uppercase() - b'A' + 1) as usize;
    }
    Some(index - 1)
}

/// Renders integral floats without a fractional part (`"1.0"` -> `"1"`).
fn format_number(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_of(xml: &'static str, shared: &'static [String]) -> Vec<SheetRow> {
        let part: Box<dyn Read> = Box::new(xml.as_bytes());
        SheetRows::new(part, shared)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A1"), Some(0));
        assert_eq!(column_index("G7"), Some(6));
        assert_eq!(column_index("Z3"), Some(25));
        assert_eq!(column_index("AA10"), Some(26));
        assert_eq!(column_index("ab2"), Some(27));
        assert_eq!(column_index("12"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number("1"), "1");
        assert_eq!(format_number("3.0"), "3");
        assert_eq!(format_number("1.5"), "1.5");
        assert_eq!(format_number("3E+2"), "300");
        assert_eq!(format_number("abc"), "abc");
    }

    #[test]
    fn test_cell_types_and_sparse_columns() {
        let shared: &'static [String] = Box::leak(Box::new(vec![
            "가자".to_string(),
            "Let's go".to_string(),
        ]));
        let xml = r#"<worksheet><sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>SID</t></is></c></row>
<row r="2"><c r="A2"><v>7</v></c><c r="B2" t="s"><v>0</v></c><c r="C2" t="s"><v>1</v></c></row>
<row r="3"><c r="C3" t="str"><f>A1&amp;"x"</f><v>SIDx</v></c><c r="E3" t="b"><v>1</v></c></row>
</sheetData></worksheet>"#;

        let rows = rows_of(xml, shared);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].cells, vec!["SID"]);
        assert_eq!(rows[1].cells, vec!["7", "가자", "Let's go"]);
        assert_eq!(rows[2].cells, vec!["", "", "SIDx", "", "TRUE"]);
    }

    #[test]
    fn test_row_gaps_become_empty_rows() {
        let xml = r#"<worksheet><sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>h</t></is></c></row>
<row r="4"><c r="A4"><v>4</v></c></row>
<row r="5"/>
</sheetData></worksheet>"#;

        let rows = rows_of(xml, &[]);
        let numbers: Vec<usize> = rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert!(rows[1].cells.is_empty());
        assert!(rows[2].cells.is_empty());
        assert_eq!(rows[3].cells, vec!["4"]);
        assert!(rows[4].cells.is_empty());
    }

    #[test]
    fn test_rows_without_references() {
        let xml = concat!(
            "<worksheet><sheetData>",
            "<row><c t=\"inlineStr\"><is><t>a</t></is></c>",
            "<c t=\"inlineStr\"><is><t>b</t></is></c></row>",
            "<row><c/><c><v>2</v></c></row>",
            "</sheetData></worksheet>"
        );
        let rows = rows_of(xml, &[]);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].cells, vec!["a", "b"]);
        assert_eq!(rows[1].number, 2);
        assert_eq!(rows[1].cells, vec!["", "2"]);
    }

    #[test]
    fn test_bad_shared_string_index() {
        let xml = concat!(
            r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>9</v></c></row>"#,
            "</sheetData></worksheet>"
        );
        let part: Box<dyn Read> = Box::new(xml.as_bytes());
        let mut rows = SheetRows::new(part, &[]);
        assert!(matches!(rows.next(), Some(Err(Error::InvalidData(_)))));
        assert!(rows.next().is_none());
    }
}
