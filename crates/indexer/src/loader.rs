use std::path::{Path, PathBuf};

use hr_chunker::Document;
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::error::{IndexerError, Result};

/// File extensions accepted as raw policy documents.
const SUPPORTED_EXTENSIONS: &[&str] = &["md", "txt"];

/// Load every plain-text policy document under `raw_dir`.
///
/// Walks the directory recursively and visits files in sorted path order so
/// document (and therefore chunk) ordering is stable across runs. Files are
/// decoded as UTF-8 with invalid sequences replaced. The file name becomes
/// the document source id; the path relative to `raw_dir` and the lowercased
/// extension are recorded in metadata.
pub async fn load_documents(raw_dir: &Path) -> Result<Vec<Document>> {
    if !raw_dir.is_dir() {
        return Err(IndexerError::invalid_path(format!(
            "{} is not a directory",
            raw_dir.display()
        )));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for result in WalkDir::new(raw_dir) {
        match result {
            Ok(entry) => {
                if entry.file_type().is_file() && is_document_file(entry.path()) {
                    paths.push(entry.into_path());
                }
            }
            Err(e) => log::warn!("Failed to read entry: {e}"),
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(IndexerError::empty_input(format!(
            "no .md or .txt documents under {}",
            raw_dir.display()
        )));
    }

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(&path).await?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        let source = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                IndexerError::invalid_path(format!("unreadable file name: {}", path.display()))
            })?;

        let rel = path.strip_prefix(raw_dir).unwrap_or(path.as_path());
        let mut metadata = Map::new();
        metadata.insert(
            "path".to_string(),
            Value::String(rel.to_string_lossy().into_owned()),
        );
        if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
            metadata.insert("ext".to_string(), Value::String(ext.to_lowercase()));
        }

        documents.push(Document::new(source, text, metadata));
    }

    log::info!(
        "Loaded {} documents from {}",
        documents.len(),
        raw_dir.display()
    );
    Ok(documents)
}

fn is_document_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_loads_matching_files_in_sorted_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir(root.join("nested")).unwrap();
        std::fs::write(root.join("b.txt"), "benefits text").unwrap();
        std::fs::write(root.join("a.md"), "attendance text").unwrap();
        std::fs::write(root.join("skip.pdf"), "binary-ish").unwrap();
        std::fs::write(root.join("nested").join("c.txt"), "conduct text").unwrap();

        let docs = load_documents(root).await.unwrap();

        let sources: Vec<&str> = docs.iter().map(|doc| doc.source.as_str()).collect();
        assert_eq!(sources, vec!["a.md", "b.txt", "c.txt"]);
        assert_eq!(docs[0].text, "attendance text");
        assert_eq!(
            docs[2].metadata.get("path").and_then(|v| v.as_str()),
            Some("nested/c.txt")
        );
    }

    #[tokio::test]
    async fn test_extension_match_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("POLICY.TXT"), "uppercase name").unwrap();

        let docs = load_documents(temp_dir.path()).await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].source, "POLICY.TXT");
        assert_eq!(
            docs[0].metadata.get("ext").and_then(|v| v.as_str()),
            Some("txt")
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nowhere");

        let err = load_documents(&missing).await.unwrap_err();
        assert!(matches!(err, IndexerError::InvalidPath(_)));
    }

    #[tokio::test]
    async fn test_no_matching_files_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("image.png"), [0u8, 1, 2]).unwrap();

        let err = load_documents(temp_dir.path()).await.unwrap_err();
        assert!(matches!(err, IndexerError::EmptyInput(_)));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("odd.txt"), [b'o', b'k', 0xFF, b'!']).unwrap();

        let docs = load_documents(temp_dir.path()).await.unwrap();

        assert_eq!(docs.len(), 1);
        assert!(docs[0].text.starts_with("ok"));
        assert!(docs[0].text.ends_with('!'));
    }
}
