//! Input discovery: documents arrive as pre-extracted text files.

use crate::error::{CliError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read every `*.txt` file directly under `dir`, keyed by filename.
///
/// Subdirectories and other extensions are skipped.
pub fn read_text_dir(dir: &Path) -> Result<BTreeMap<String, String>> {
    if !dir.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut documents = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_text = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if !path.is_file() || !is_text {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        debug!("Reading {}", path.display());
        documents.insert(name.to_string(), fs::read_to_string(&path)?);
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_only_text_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("pmk-46.txt"), "Peraturan Menteri Keuangan").unwrap();
        fs::write(dir.path().join("perda.TXT"), "Peraturan Daerah").unwrap();
        fs::write(dir.path().join("scan.pdf"), "%PDF").unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let documents = read_text_dir(dir.path()).unwrap();

        assert_eq!(
            documents.keys().collect::<Vec<_>>(),
            vec!["perda.TXT", "pmk-46.txt"]
        );
        assert_eq!(documents["pmk-46.txt"], "Peraturan Menteri Keuangan");
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_text_dir(&dir.path().join("absent"));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
