//! Configured input sources.

use super::SourceSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One input file with its origin label and column layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// File path, relative to the data directory unless absolute.
    pub file: PathBuf,
    /// Origin label written to the `source` output column.
    pub label: String,
    pub schema: SourceSchema,
}

impl SourceSpec {
    pub fn new(file: impl Into<PathBuf>, label: impl Into<String>, schema: SourceSchema) -> Self {
        Self {
            file: file.into(),
            label: label.into(),
            schema,
        }
    }

    /// The AI Hub Korean-English parallel corpus files.
    pub fn aihub_defaults() -> Vec<SourceSpec> {
        vec![
            SourceSpec::new("1_구어체(1).xlsx", "AIHUB_SPOKEN_1", SourceSchema::Spoken),
            SourceSpec::new("1_구어체(2).xlsx", "AIHUB_SPOKEN_2", SourceSchema::Spoken),
            SourceSpec::new("2_대화체.xlsx", "AIHUB_DIALOG", SourceSchema::Dialog),
        ]
    }

    /// Resolves the file against `data_dir`.
    pub fn path_in(&self, data_dir: &Path) -> PathBuf {
        if self.file.is_absolute() {
            self.file.clone()
        } else {
            data_dir.join(&self.file)
        }
    }

    /// File name for display.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aihub_defaults() {
        let sources = SourceSpec::aihub_defaults();
        let labels: Vec<&str> = sources.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["AIHUB_SPOKEN_1", "AIHUB_SPOKEN_2", "AIHUB_DIALOG"]
        );
        assert_eq!(sources[2].schema, SourceSchema::Dialog);
    }

    #[test]
    fn test_path_resolution() {
        let spec = SourceSpec::new("a/b.xlsx", "X", SourceSchema::Spoken);
        assert_eq!(
            spec.path_in(Path::new("/data")),
            PathBuf::from("/data/a/b.xlsx")
        );
        assert_eq!(spec.file_name(), "b.xlsx");

        let absolute = std::env::temp_dir().join("c.xlsx");
        let spec = SourceSpec::new(absolute.clone(), "Y", SourceSchema::Spoken);
        assert_eq!(spec.path_in(Path::new("/data")), absolute);
    }
}
