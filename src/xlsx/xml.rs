//! quick-xml helpers shared by the workbook part parsers.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Gets the local name of an element (without namespace prefix).
pub(crate) fn get_local_name(e: &BytesStart) -> String {
    std::str::from_utf8(e.local_name().as_ref())
        .unwrap_or("")
        .to_string()
}

/// Gets an attribute value by local name (ignores namespace prefixes).
pub(crate) fn get_attr_string(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name.as_bytes() {
            if let Ok(val) = std::str::from_utf8(&attr.value) {
                return Some(val.to_string());
            }
        }
    }
    None
}

/// Gets a numeric attribute value.
pub(crate) fn get_attr_usize(e: &BytesStart, name: &str) -> Option<usize> {
    get_attr_string(e, name).and_then(|v| v.trim().parse().ok())
}

/// Collects character data until the end tag `end`.
///
/// Nested elements are skipped; their text is not collected.
pub(crate) fn read_text<R: BufRead>(reader: &mut Reader<R>, end: &[u8]) -> Result<String> {
    let mut text = String::new();
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(t)) if depth == 0 => {
                let s = t.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                text.push_str(&s);
            }
            Ok(Event::CData(c)) if depth == 0 => {
                text.push_str(std::str::from_utf8(&c.into_inner())?);
            }
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(e)) => {
                if depth == 0 && e.local_name().as_ref() == end {
                    break;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Reads a string item (`<si>` or `<is>`) up to its end tag `end`.
///
/// Plain `<t>` and rich-text runs `<r><t>` are concatenated in order;
/// phonetic runs (`<rPh>`) are skipped.
pub(crate) fn read_rich_text<R: BufRead>(reader: &mut Reader<R>, end: &[u8]) -> Result<String> {
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = get_local_name(&e);
                buf.clear();

                match name.as_str() {
                    "t" => text.push_str(&read_text(reader, b"t")?),
                    "rPh" => skip_element(reader)?,
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == end {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(unescape_ooxml(&text))
}

/// Skips an element and all its children.
pub(crate) fn skip_element<R: BufRead>(reader: &mut Reader<R>) -> Result<()> {
    let mut depth = 1;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Decodes OOXML `_xHHHH_` escapes (e.g. `_x000D_` for a carriage return).
pub(crate) fn unescape_ooxml(text: &str) -> String {
    if !text.contains("_x") {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);

    result
}
