//! CSV output of the final sentence records.

use crate::error::{Error, Result};
use crate::model::SentenceRecord;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Output header row, in column order.
pub const OUTPUT_COLUMNS: [&str; 6] = [
    "english_text",
    "korean_ref",
    "difficulty",
    "category",
    "subcategory",
    "source",
];

/// Writes `records` to `path` as UTF-8 CSV, creating or truncating the file.
///
/// Any failure is reported as [`Error::OutputWrite`].
pub fn write_records(path: impl AsRef<Path>, records: &[SentenceRecord]) -> Result<()> {
    let path = path.as_ref();
    let wrap = |source: io::Error| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, records).map_err(wrap)?;
    writer.flush().map_err(wrap)?;

    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Writes the header and one row per record to `writer`.
///
/// Rows end in CRLF. The header is always written, even with no records.
pub fn write_to<W: Write>(writer: W, records: &[SentenceRecord]) -> io::Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv.write_record(OUTPUT_COLUMNS).map_err(into_io)?;
    for record in records {
        csv.serialize(record).map_err(into_io)?;
    }
    csv.flush()
}

fn into_io(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn to_string(records: &[SentenceRecord]) -> String {
        let mut buf = Vec::new();
        write_to(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_only() {
        assert_eq!(
            to_string(&[]),
            "english_text,korean_ref,difficulty,category,subcategory,source\r\n"
        );
    }

    #[test]
    fn test_rows_in_order_with_quoting() {
        let records = vec![
            SentenceRecord::new(
                "Let's go",
                "가자",
                Difficulty::Starter,
                "DAILY",
                "",
                "AIHUB_SPOKEN_1",
            )
            .unwrap(),
            SentenceRecord::new(
                "Yes, \"that\" one",
                "네, 그거요",
                Difficulty::Beginner,
                "쇼핑",
                "옷",
                "AIHUB_DIALOG",
            )
            .unwrap(),
        ];

        let text = to_string(&records);
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines[1], "Let's go,가자,STARTER,DAILY,,AIHUB_SPOKEN_1");
        assert_eq!(
            lines[2],
            "\"Yes, \"\"that\"\" one\",\"네, 그거요\",BEGINNER,쇼핑,옷,AIHUB_DIALOG"
        );
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        assert!(matches!(
            write_records(&path, &[]),
            Err(Error::OutputWrite { .. })
        ));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleansed_sentences.csv");
        let records =
            vec![SentenceRecord::new("Go", "가자", Difficulty::Starter, "DAILY", "", "X").unwrap()];
        write_records(&path, &records).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("Go,가자,STARTER,DAILY,,X\r\n"));
    }
}
