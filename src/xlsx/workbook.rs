//! Workbook-level parts: sheet list, relationships and shared strings.

use super::xml::{get_attr_string, read_rich_text};
use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;

/// A sheet declared in `xl/workbook.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    /// Display name of the sheet.
    pub name: String,
    /// Relationship id pointing at the sheet part.
    pub rel_id: String,
}

/// Parses the `<sheets>` list from workbook.xml in declaration order.
pub(crate) fn parse_sheet_list(xml: &str) -> Result<Vec<SheetInfo>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    let name = get_attr_string(&e, "name").unwrap_or_default();
                    // r:id has local name "id"; sheetId does not collide.
                    if let Some(rel_id) = get_attr_string(&e, "id") {
                        sheets.push(SheetInfo { name, rel_id });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Parses workbook relationships into an id -> target map.
pub(crate) fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    if let (Some(id), Some(target)) =
                        (get_attr_string(&e, "Id"), get_attr_string(&e, "Target"))
                    {
                        rels.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Parses the shared string table.
pub(crate) fn parse_shared_strings<R: BufRead>(source: R) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut strings = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"sst" {
                    if let Some(count) = super::xml::get_attr_usize(&e, "uniqueCount") {
                        strings.reserve(count);
                    }
                } else if e.local_name().as_ref() == b"si" {
                    buf.clear();
                    strings.push(read_rich_text(&mut reader, b"si")?);
                }
            }
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"si" {
                    strings.push(String::new());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}
