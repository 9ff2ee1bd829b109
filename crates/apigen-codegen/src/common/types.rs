//! Rendered artifacts.
//!
//! # Examples
//!
//! ```
//! use apigen_codegen::{GeneratedCode, GeneratedFile};
//! use apigen_core::ArtifactKind;
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile::new(ArtifactKind::Types, "export interface A {}\n"));
//!
//! assert_eq!(code.file_count(), 1);
//! assert!(code.file(ArtifactKind::Types).is_some());
//! assert!(code.file(ArtifactKind::Server).is_none());
//! ```

use apigen_core::ArtifactKind;
use serde::Serialize;

/// All artifacts rendered in one run, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedCode {
    /// Rendered artifacts
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates an empty container.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Appends an artifact.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Number of rendered artifacts.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Iterates over the rendered artifacts.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// The artifact of a kind, if it was rendered.
    #[must_use]
    pub fn file(&self, kind: ArtifactKind) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.kind == kind)
    }
}

/// One rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Which artifact this is
    pub kind: ArtifactKind,
    /// Full text, ending in exactly one newline
    pub content: String,
}

impl GeneratedFile {
    /// Wraps rendered text, normalizing the trailing newline.
    #[must_use]
    pub fn new(kind: ArtifactKind, content: impl Into<String>) -> Self {
        let mut content = content.into();
        content.truncate(content.trim_end().len());
        content.push('\n');
        Self { kind, content }
    }

    /// Size of the content in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if the content is a lone newline.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_trailing_newline() {
        let file = GeneratedFile::new(ArtifactKind::Hooks, "export {};\n\n\n");
        assert_eq!(file.content, "export {};\n");

        let file = GeneratedFile::new(ArtifactKind::Hooks, "export {};");
        assert_eq!(file.content, "export {};\n");
    }

    #[test]
    fn test_emission_order_kept() {
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile::new(ArtifactKind::Types, "a"));
        code.add_file(GeneratedFile::new(ArtifactKind::Endpoints, "b"));

        let kinds: Vec<_> = code.files().map(|f| f.kind).collect();
        assert_eq!(kinds, [ArtifactKind::Types, ArtifactKind::Endpoints]);
        assert_eq!(code.file(ArtifactKind::Endpoints).unwrap().len(), 2);
    }
}
