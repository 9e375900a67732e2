//! Input lists for ffmpeg's concat demuxer.

use crate::Result;
use std::path::{Path, PathBuf};

/// Ordered list of files to concatenate.
///
/// Entries are written in insertion order; nothing is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConcatManifest {
    entries: Vec<PathBuf>,
}

impl ConcatManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file. Relative paths are resolved against the manifest's directory.
    pub fn push(&mut self, entry: impl Into<PathBuf>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `file '<path>'` directive per entry.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str("file '");
            out.push_str(&quote(&entry.to_string_lossy()));
            out.push_str("'\n");
        }
        out
    }

    /// Write the manifest to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Wrote concat manifest with {} entries to {:?}", self.len(), path);

        Ok(())
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for ConcatManifest {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// The concat demuxer closes a quoted string at `'`; splice an escaped quote in.
fn quote(s: &str) -> String {
    s.replace('\'', r"'\''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_insertion_order() {
        let manifest: ConcatManifest = ["./10_tempo.aac", "./2_tempo.aac", "./0_tempo.aac"]
            .into_iter()
            .collect();
        assert_eq!(
            manifest.render(),
            "file './10_tempo.aac'\nfile './2_tempo.aac'\nfile './0_tempo.aac'\n"
        );
    }

    #[test]
    fn test_render_escapes_single_quotes() {
        let mut manifest = ConcatManifest::new();
        manifest.push("./it's.aac");
        assert_eq!(manifest.render(), "file './it'\\''s.aac'\n");
    }

    #[test]
    fn test_write_to() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("concat_input.txt");
        let mut manifest = ConcatManifest::new();
        manifest.push("./0_tempo.aac");
        manifest.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "file './0_tempo.aac'\n");
        assert_eq!(manifest.len(), 1);
        assert!(!manifest.is_empty());
    }
}
