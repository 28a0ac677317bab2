use std::fmt;
use std::path::Path;
use std::str::FromStr;

use jobtrack_ingest::strip_bom;
use jobtrack_model::ModelError;
use serde::{Deserialize, Serialize};

/// Format of an import file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Csv,
    Json,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Kind implied by the file extension, if it names one.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// JSON when the first non-whitespace character opens an array or
    /// object, CSV otherwise.
    pub fn sniff(content: &str) -> Self {
        match strip_bom(content).trim_start().chars().next() {
            Some('[' | '{') => Self::Json,
            _ => Self::Csv,
        }
    }

    /// Extension first, then content.
    pub fn detect(path: &Path, content: &str) -> Self {
        Self::from_extension(path).unwrap_or_else(|| Self::sniff(content))
    }

    /// Only CSV imports go through column mapping.
    pub fn needs_mapping(&self) -> bool {
        matches!(self, Self::Csv)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ModelError::InvalidValue {
                kind: "source format",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_wins_over_content() {
        assert_eq!(SourceKind::detect(Path::new("export.CSV"), "[]"), SourceKind::Csv);
        assert_eq!(SourceKind::detect(Path::new("a.json"), "Company"), SourceKind::Json);
    }

    #[test]
    fn sniffs_unknown_extensions() {
        assert_eq!(SourceKind::detect(Path::new("dump"), "\u{feff}  [{}]"), SourceKind::Json);
        assert_eq!(SourceKind::detect(Path::new("dump.dat"), "Company,Role"), SourceKind::Csv);
        assert_eq!(SourceKind::sniff(""), SourceKind::Csv);
    }

    #[test]
    fn tab_separated_files_are_not_claimed_as_csv() {
        assert_eq!(SourceKind::from_extension(Path::new("export.tsv")), None);
        assert_eq!(SourceKind::from_extension(Path::new("export.txt")), Some(SourceKind::Csv));
    }

    #[test]
    fn parses_names() {
        assert_eq!(" JSON ".parse::<SourceKind>().unwrap(), SourceKind::Json);
        assert!("xml".parse::<SourceKind>().is_err());
    }
}
