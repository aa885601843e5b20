//! Multipart form data bodies.
//!
//! A [`Multipart`] owns an ordered list of [`Part`]s; part order is preserved
//! on the wire and an empty part list is legal (it encodes to the closing
//! boundary alone).
//!
//! # Example
//!
//! ```
//! use restkit_core::{Multipart, Part};
//!
//! let form = Multipart::new()
//!     .text("title", "report")
//!     .buffer("data", vec![1, 2, 3], "blob.bin", None);
//!
//! let (content_type, body) = form.into_body().expect("encode");
//! assert!(content_type.starts_with("multipart/form-data; boundary="));
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use bytes::{BufMut, Bytes, BytesMut};

use crate::{ContentType, Result};

/// A single part of a multipart body.
///
/// File-like parts ([`Part::Buffer`], [`Part::Stream`], [`Part::File`]) carry
/// a file name and an optional content type that defaults to
/// `application/octet-stream` when unset. A [`Part::Stream`] reader is
/// consumed once, when the body is encoded at dispatch; the caller must not
/// hand over a reader it still needs.
pub enum Part {
    /// Plain text field; content type is fixed as `text/plain`.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// In-memory binary payload.
    Buffer {
        /// Field name.
        name: String,
        /// Payload bytes.
        bytes: Bytes,
        /// File name reported in the content disposition.
        file_name: String,
        /// Content type; `application/octet-stream` when unset.
        content_type: Option<String>,
    },
    /// Payload read from an open reader at encode time.
    Stream {
        /// Field name.
        name: String,
        /// Source reader, consumed exactly once.
        reader: Box<dyn Read + Send>,
        /// File name reported in the content disposition.
        file_name: String,
        /// Content type; `application/octet-stream` when unset.
        content_type: Option<String>,
    },
    /// Payload read from the filesystem at encode time.
    File {
        /// Field name.
        name: String,
        /// Path read when the body is encoded.
        path: PathBuf,
        /// File name reported in the content disposition.
        file_name: String,
        /// Content type, defaulted to `application/octet-stream`.
        content_type: String,
    },
}

impl Part {
    /// Create a text part.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create an in-memory binary part.
    #[must_use]
    pub fn buffer(
        name: impl Into<String>,
        bytes: impl Into<Bytes>,
        file_name: impl Into<String>,
        content_type: Option<&str>,
    ) -> Self {
        Self::Buffer {
            name: name.into(),
            bytes: bytes.into(),
            file_name: file_name.into(),
            content_type: content_type.map(str::to_string),
        }
    }

    /// Create a stream-backed part. The reader is consumed when the body is
    /// encoded at dispatch.
    #[must_use]
    pub fn stream(
        name: impl Into<String>,
        reader: impl Read + Send + 'static,
        file_name: impl Into<String>,
        content_type: Option<&str>,
    ) -> Self {
        Self::Stream {
            name: name.into(),
            reader: Box::new(reader),
            file_name: file_name.into(),
            content_type: content_type.map(str::to_string),
        }
    }

    /// Create a file-backed part. The file is read when the body is encoded
    /// at dispatch.
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        content_type: Option<&str>,
    ) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
            file_name: file_name.into(),
            content_type: content_type
                .unwrap_or(ContentType::OctetStream.as_str())
                .to_string(),
        }
    }

    /// Create a file-backed part, deriving the reported file name from the
    /// last component of the path.
    #[must_use]
    pub fn file_from_path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::file(name, path, file_name, None)
    }

    /// Part name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. }
            | Self::Buffer { name, .. }
            | Self::Stream { name, .. }
            | Self::File { name, .. } => name,
        }
    }

    /// File name, for file-like parts.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::Buffer { file_name, .. }
            | Self::Stream { file_name, .. }
            | Self::File { file_name, .. } => Some(file_name),
        }
    }

    /// Effective content type as written on the wire.
    #[must_use]
    pub fn content_type(&self) -> &str {
        match self {
            Self::Text { .. } => ContentType::PlainText.as_str(),
            Self::Buffer { content_type, .. } | Self::Stream { content_type, .. } => content_type
                .as_deref()
                .unwrap_or(ContentType::OctetStream.as_str()),
            Self::File { content_type, .. } => content_type,
        }
    }

    /// Read out the part payload. Stream and file parts perform I/O here.
    fn read_data(self) -> Result<(PartMeta, Bytes)> {
        match self {
            Self::Text { name, value } => Ok((
                PartMeta {
                    name,
                    file_name: None,
                    content_type: ContentType::PlainText.as_str().to_string(),
                },
                Bytes::from(value),
            )),
            Self::Buffer {
                name,
                bytes,
                file_name,
                content_type,
            } => Ok((
                PartMeta {
                    name,
                    file_name: Some(file_name),
                    content_type: content_type
                        .unwrap_or_else(|| ContentType::OctetStream.as_str().to_string()),
                },
                bytes,
            )),
            Self::Stream {
                name,
                mut reader,
                file_name,
                content_type,
            } => {
                let mut data = Vec::new();
                reader.read_to_end(&mut data)?;
                Ok((
                    PartMeta {
                        name,
                        file_name: Some(file_name),
                        content_type: content_type
                            .unwrap_or_else(|| ContentType::OctetStream.as_str().to_string()),
                    },
                    Bytes::from(data),
                ))
            }
            Self::File {
                name,
                path,
                file_name,
                content_type,
            } => {
                let data = std::fs::read(&path)?;
                Ok((
                    PartMeta {
                        name,
                        file_name: Some(file_name),
                        content_type,
                    },
                    Bytes::from(data),
                ))
            }
        }
    }
}

impl std::fmt::Debug for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text { name, value } => f
                .debug_struct("Text")
                .field("name", name)
                .field("value", value)
                .finish(),
            Self::Buffer {
                name,
                bytes,
                file_name,
                content_type,
            } => f
                .debug_struct("Buffer")
                .field("name", name)
                .field("len", &bytes.len())
                .field("file_name", file_name)
                .field("content_type", content_type)
                .finish(),
            Self::Stream {
                name,
                file_name,
                content_type,
                ..
            } => f
                .debug_struct("Stream")
                .field("name", name)
                .field("file_name", file_name)
                .field("content_type", content_type)
                .finish_non_exhaustive(),
            Self::File {
                name,
                path,
                file_name,
                content_type,
            } => f
                .debug_struct("File")
                .field("name", name)
                .field("path", path)
                .field("file_name", file_name)
                .field("content_type", content_type)
                .finish(),
        }
    }
}

/// Wire metadata of an encoded part.
struct PartMeta {
    name: String,
    file_name: Option<String>,
    content_type: String,
}

/// A multipart form with exclusive ownership of its ordered parts.
#[derive(Debug)]
pub struct Multipart {
    parts: Vec<Part>,
    boundary: String,
}

impl Default for Multipart {
    fn default() -> Self {
        Self::new()
    }
}

impl Multipart {
    /// Create an empty form with a generated boundary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            boundary: generate_boundary(),
        }
    }

    /// Create an empty form with a custom boundary.
    ///
    /// The boundary must not appear in any part payload.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            parts: Vec::new(),
            boundary: boundary.into(),
        }
    }

    /// Append a part.
    #[must_use]
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Append a text field.
    #[must_use]
    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.part(Part::text(name, value))
    }

    /// Append an in-memory binary part.
    #[must_use]
    pub fn buffer(
        self,
        name: impl Into<String>,
        bytes: impl Into<Bytes>,
        file_name: impl Into<String>,
        content_type: Option<&str>,
    ) -> Self {
        self.part(Part::buffer(name, bytes, file_name, content_type))
    }

    /// Append a stream-backed part.
    #[must_use]
    pub fn stream(
        self,
        name: impl Into<String>,
        reader: impl Read + Send + 'static,
        file_name: impl Into<String>,
        content_type: Option<&str>,
    ) -> Self {
        self.part(Part::stream(name, reader, file_name, content_type))
    }

    /// Append a file-backed part.
    #[must_use]
    pub fn file(
        self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        content_type: Option<&str>,
    ) -> Self {
        self.part(Part::file(name, path, file_name, content_type))
    }

    /// Append a file-backed part, deriving the file name from the path.
    #[must_use]
    pub fn file_from_path(self, name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        self.part(Part::file_from_path(name, path.as_ref()))
    }

    /// The boundary string.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The parts, in order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// The `Content-Type` header value for this form.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode into a `(content type, body)` pair, reading stream- and
    /// file-backed parts.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if reading a stream or file part fails.
    pub fn into_body(self) -> Result<(String, Bytes)> {
        let content_type = self.content_type();
        let body = self.encode()?;
        Ok((content_type, body))
    }

    fn encode(self) -> Result<Bytes> {
        let mut buf = BytesMut::new();

        for part in self.parts {
            let (meta, data) = part.read_data()?;

            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");

            buf.put_slice(b"Content-Disposition: form-data; name=\"");
            buf.put_slice(meta.name.as_bytes());
            buf.put_slice(b"\"");
            if let Some(file_name) = &meta.file_name {
                buf.put_slice(b"; filename=\"");
                buf.put_slice(file_name.as_bytes());
                buf.put_slice(b"\"");
            }
            buf.put_slice(b"\r\n");

            buf.put_slice(b"Content-Type: ");
            buf.put_slice(meta.content_type.as_bytes());
            buf.put_slice(b"\r\n");

            // Empty line before data
            buf.put_slice(b"\r\n");

            buf.put_slice(&data);
            buf.put_slice(b"\r\n");
        }

        // Final boundary
        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");

        Ok(buf.freeze())
    }
}

/// Generate a boundary unlikely to appear in part payloads.
fn generate_boundary() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    format!("----RestkitBoundary{timestamp:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_text_fixed_content_type() {
        let part = Part::text("a", "b");
        assert_eq!(part.name(), "a");
        assert_eq!(part.content_type(), "text/plain");
        assert!(part.file_name().is_none());
    }

    #[test]
    fn part_file_defaults_octet_stream() {
        let part = Part::file("f", "/tmp/data", "x.txt", None);
        assert_eq!(part.content_type(), "application/octet-stream");
        assert_eq!(part.file_name(), Some("x.txt"));

        let part = Part::file("f", "/tmp/data", "x.txt", Some("text/plain"));
        assert_eq!(part.content_type(), "text/plain");
    }

    #[test]
    fn part_file_from_path_derives_file_name() {
        let part = Part::file_from_path("upload", "/some/dir/photo.jpg");
        assert_eq!(part.file_name(), Some("photo.jpg"));
    }

    #[test]
    fn form_preserves_part_order() {
        let form = Multipart::new()
            .text("a", "b")
            .file("f", "/tmp/data", "x.txt", None);

        let names: Vec<&str> = form.parts().iter().map(Part::name).collect();
        assert_eq!(names, vec!["a", "f"]);
    }

    #[test]
    fn form_content_type() {
        let form = Multipart::with_boundary("test-boundary");
        assert_eq!(
            form.content_type(),
            "multipart/form-data; boundary=test-boundary"
        );
    }

    #[test]
    fn form_empty_encodes_closing_boundary_only() {
        let form = Multipart::with_boundary("b0");
        let (_, body) = form.into_body().expect("encode");
        assert_eq!(body.as_ref(), b"--b0--\r\n");
    }

    #[test]
    fn form_encode_text_part() {
        let form = Multipart::with_boundary("boundary123").text("field", "value");
        let (content_type, body) = form.into_body().expect("encode");

        assert_eq!(content_type, "multipart/form-data; boundary=boundary123");

        let body_str = String::from_utf8_lossy(&body);
        assert!(body_str.contains("--boundary123\r\n"));
        assert!(body_str.contains("Content-Disposition: form-data; name=\"field\"\r\n"));
        assert!(body_str.contains("Content-Type: text/plain\r\n"));
        assert!(body_str.contains("value\r\n"));
        assert!(body_str.contains("--boundary123--\r\n"));
    }

    #[test]
    fn form_encode_buffer_part() {
        let form =
            Multipart::with_boundary("bb").buffer("data", vec![1, 2, 3], "blob.bin", None);
        let (_, body) = form.into_body().expect("encode");

        let body_str = String::from_utf8_lossy(&body);
        assert!(body_str.contains("name=\"data\"; filename=\"blob.bin\""));
        assert!(body_str.contains("Content-Type: application/octet-stream\r\n"));
    }

    #[test]
    fn form_encode_stream_part() {
        let reader = std::io::Cursor::new(b"streamed content".to_vec());
        let form = Multipart::with_boundary("bs").stream("s", reader, "s.txt", Some("text/plain"));
        let (_, body) = form.into_body().expect("encode");

        let body_str = String::from_utf8_lossy(&body);
        assert!(body_str.contains("name=\"s\"; filename=\"s.txt\""));
        assert!(body_str.contains("Content-Type: text/plain\r\n"));
        assert!(body_str.contains("streamed content\r\n"));
    }

    #[test]
    fn form_encode_file_part_reads_disk() {
        let path = std::env::temp_dir().join("restkit-multipart-test.txt");
        std::fs::write(&path, b"file content").expect("write temp file");

        let form = Multipart::with_boundary("bf").file("f", &path, "x.txt", None);
        let (_, body) = form.into_body().expect("encode");
        std::fs::remove_file(&path).ok();

        let body_str = String::from_utf8_lossy(&body);
        assert!(body_str.contains("name=\"f\"; filename=\"x.txt\""));
        assert!(body_str.contains("file content\r\n"));
    }

    #[test]
    fn form_encode_missing_file_is_io_error() {
        let form = Multipart::new().file("f", "/nonexistent/restkit/file", "x.bin", None);
        let result = form.into_body();
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
