//! Turns an input path into the report documents it holds.
//!
//! Classification looks at the leading bytes only, so a zip named `report.xml`
//! is still opened as an archive.

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use log::{debug, info};
use zip::ZipArchive;

use crate::errors::{StatementError, StatementResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Archive,
    Plain,
}

impl DocumentKind {
    pub fn sniff(content: &[u8]) -> Self {
        if infer::archive::is_zip(content) {
            DocumentKind::Archive
        } else {
            DocumentKind::Plain
        }
    }
}

/// Raw bytes of one report document plus a label naming where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub origin: String,
    pub content: Vec<u8>,
}

/// Reads `path` and yields its documents: the file itself, or every non-directory
/// member of the archive in container order. Archives nested inside archives are
/// expanded the same way.
pub fn resolve(path: &Path) -> StatementResult<Vec<Document>> {
    let content = fs::read(path).map_err(|source| StatementError::UnreadableInput {
        path: path.to_path_buf(),
        source,
    })?;

    let document = Document {
        origin: path.display().to_string(),
        content,
    };
    match DocumentKind::sniff(&document.content) {
        DocumentKind::Archive => info!("Zip file: {}", document.origin),
        DocumentKind::Plain => info!("Processing file: {}", document.origin),
    }
    expand(path, document)
}

fn expand(path: &Path, document: Document) -> StatementResult<Vec<Document>> {
    match DocumentKind::sniff(&document.content) {
        DocumentKind::Plain => Ok(vec![document]),
        DocumentKind::Archive => read_zip(path, &document)?
            .into_iter()
            .map(|member| expand(path, member))
            .collect::<StatementResult<Vec<_>>>()
            .map(|nested| nested.into_iter().flatten().collect()),
    }
}

fn read_zip(path: &Path, archive: &Document) -> StatementResult<Vec<Document>> {
    let corrupt = |source| StatementError::Archive {
        path: path.to_path_buf(),
        source,
    };
    let mut zip = ZipArchive::new(Cursor::new(archive.content.as_slice())).map_err(corrupt)?;

    let mut members = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        let mut file = zip.by_index(index).map_err(corrupt)?;
        if file.is_dir() {
            debug!("Skipping directory in archive: {}", file.name());
            continue;
        }
        debug!("File in archive: {}", file.name());

        let origin = format!("{}/{}", archive.origin, file.name());
        // The header's declared size is not trusted for allocation.
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|source| StatementError::UnreadableInput {
                path: PathBuf::from(&origin),
                source,
            })?;
        members.push(Document { origin, content });
    }
    Ok(members)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Builds an in-memory zip; names ending in `/` become directory entries.
    pub(crate) fn zip_bytes(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in members {
            if name.ends_with('/') {
                writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .unwrap();
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                writer.write_all(content).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_sniff() {
        assert_eq!(DocumentKind::sniff(&zip_bytes(&[("a.xml", b"<a/>")])), DocumentKind::Archive);
        assert_eq!(DocumentKind::sniff(b"<?xml version=\"1.0\"?><a/>"), DocumentKind::Plain);
        assert_eq!(DocumentKind::sniff(b""), DocumentKind::Plain);
    }

    #[test]
    fn test_resolve_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "report.xml", b"<Document/>");

        let documents = resolve(&path).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].content, b"<Document/>");
        assert_eq!(documents[0].origin, path.display().to_string());
    }

    #[test]
    fn test_resolve_archive_skips_directories_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_bytes(&[
            ("2023/", b""),
            ("2023/05.xml", b"<may/>"),
            ("2023/04.xml", b"<april/>"),
        ]);
        let path = write_temp(&dir, "bundle.zip", &bytes);

        let documents = resolve(&path).unwrap();
        let contents: Vec<&[u8]> = documents.iter().map(|d| d.content.as_slice()).collect();
        assert_eq!(contents, vec![b"<may/>".as_slice(), b"<april/>".as_slice()]);
        assert!(documents[0].origin.ends_with("bundle.zip/2023/05.xml"));
    }

    #[test]
    fn test_resolve_misnamed_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "report.xml", &zip_bytes(&[("inner.xml", b"<inner/>")]));

        let documents = resolve(&path).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].content, b"<inner/>");
    }

    #[test]
    fn test_resolve_nested_archive() {
        let dir = tempfile::tempdir().unwrap();
        let inner = zip_bytes(&[("a.xml", b"<a/>"), ("b.xml", b"<b/>")]);
        let outer = zip_bytes(&[("first.xml", b"<first/>"), ("inner.zip", inner.as_slice())]);
        let path = write_temp(&dir, "outer.zip", &outer);

        let documents = resolve(&path).unwrap();
        assert_eq!(documents.len(), 3);
        assert!(documents[2].origin.ends_with("outer.zip/inner.zip/b.xml"));
    }

    #[test]
    fn test_resolve_corrupt_archive() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = zip_bytes(&[("a.xml", b"<a/>")]);
        bytes.truncate(bytes.len() / 2);
        let path = write_temp(&dir, "broken.zip", &bytes);

        let result = resolve(&path);
        assert!(matches!(result, Err(StatementError::Archive { .. })));
    }

    fn stored_zip(name: &str, content: &[u8]) -> Vec<u8> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(name, options).unwrap();
        writer.write_all(content).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn position(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
            .unwrap()
    }

    #[test]
    fn test_unreadable_nested_member_names_full_origin() {
        let dir = tempfile::tempdir().unwrap();
        let mut inner = stored_zip("a.xml", b"<payload>checksummed</payload>");
        let at = position(&inner, b"checksummed");
        inner[at] = b'C';
        let path = write_temp(&dir, "outer.zip", &stored_zip("inner.zip", &inner));

        match resolve(&path) {
            Err(StatementError::UnreadableInput { path, .. }) => {
                assert!(path.ends_with("outer.zip/inner.zip/a.xml"), "{path:?}")
            }
            other => panic!("expected UnreadableInput, got {other:?}"),
        }
    }

    #[test]
    fn test_declared_member_size_is_not_trusted() {
        let dir = tempfile::tempdir().unwrap();
        let payload = b"<a/>";
        let mut bytes = stored_zip("a.xml", payload);

        // Uncompressed size field: offset 22 in the local header, 24 in the central one.
        let claimed = 0xFFFF_FFF0u32.to_le_bytes();
        let local = position(&bytes, &[0x50, 0x4b, 0x03, 0x04]);
        bytes[local + 22..local + 26].copy_from_slice(&claimed);
        let central = position(&bytes, &[0x50, 0x4b, 0x01, 0x02]);
        bytes[central + 24..central + 28].copy_from_slice(&claimed);
        let path = write_temp(&dir, "lying.zip", &bytes);

        match resolve(&path) {
            Ok(documents) => assert_eq!(documents[0].content, payload),
            Err(e) => assert!(
                matches!(e, StatementError::UnreadableInput { .. } | StatementError::Archive { .. }),
                "{e:?}"
            ),
        }
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve(&dir.path().join("absent.xml"));
        assert!(matches!(result, Err(StatementError::UnreadableInput { .. })));
    }
}
