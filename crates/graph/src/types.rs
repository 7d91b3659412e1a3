use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Path of the vault root folder.
pub const ROOT_PATH: &str = "/";

/// Timestamps (unix millis) and size of a file, shown in item tooltips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileStat {
    #[serde(default)]
    pub ctime: i64,
    #[serde(default)]
    pub mtime: i64,
    #[serde(default)]
    pub size: u64,
}

/// A file in the vault. The path is the stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaultFile {
    /// Vault-relative path, `/`-separated (e.g. "topics/rust/rust.md")
    pub path: String,

    #[serde(default)]
    pub stat: FileStat,
}

impl VaultFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            stat: FileStat::default(),
        }
    }

    pub fn with_stat(mut self, stat: FileStat) -> Self {
        self.stat = stat;
        self
    }

    /// File name including extension
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// File name without its last extension
    pub fn basename(&self) -> &str {
        let name = self.name();
        match name.rsplit_once('.') {
            Some((base, _)) if !base.is_empty() => base,
            _ => name,
        }
    }

    pub fn extension(&self) -> &str {
        let name = self.name();
        match name.rsplit_once('.') {
            Some((base, ext)) if !base.is_empty() => ext,
            _ => "",
        }
    }

    /// Path of the containing folder; [`ROOT_PATH`] for top-level files.
    pub fn parent_path(&self) -> &str {
        parent_dir(&self.path)
    }

    /// Name of the containing folder; empty for the root.
    pub fn parent_name(&self) -> &str {
        folder_name(self.parent_path())
    }

    /// A file named after its folder stands in for that folder.
    pub fn is_folder_index(&self) -> bool {
        let parent = self.parent_name();
        !parent.is_empty() && parent == self.basename()
    }

    /// Path to highlight in the file navigator: index files alias their folder.
    pub fn highlight_path(&self) -> &str {
        if self.is_folder_index() {
            self.parent_path()
        } else {
            &self.path
        }
    }
}

/// A folder in the vault. Only used as the fallback target of tag removal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaultFolder {
    pub path: String,
}

impl VaultFolder {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn name(&self) -> &str {
        folder_name(&self.path)
    }
}

/// Folder containing `path`; [`ROOT_PATH`] when there is none.
pub fn parent_dir(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => dir,
        _ => ROOT_PATH,
    }
}

pub fn folder_name(path: &str) -> &str {
    if path == ROOT_PATH {
        return "";
    }
    path.rsplit('/').next().unwrap_or(path)
}

/// Source of the ftag parent/child relation.
///
/// Results are ordered and the order is meaningful to callers. Unknown files
/// yield empty lists; the oracle never fails.
pub trait TagOracle {
    fn direct_parents(&self, file: &VaultFile) -> Vec<VaultFile>;

    fn direct_children(&self, file: &VaultFile) -> Vec<VaultFile>;
}

impl<T: TagOracle + ?Sized> TagOracle for &T {
    fn direct_parents(&self, file: &VaultFile) -> Vec<VaultFile> {
        (**self).direct_parents(file)
    }

    fn direct_children(&self, file: &VaultFile) -> Vec<VaultFile> {
        (**self).direct_children(file)
    }
}

impl<T: TagOracle + ?Sized> TagOracle for Arc<T> {
    fn direct_parents(&self, file: &VaultFile) -> Vec<VaultFile> {
        (**self).direct_parents(file)
    }

    fn direct_children(&self, file: &VaultFile) -> Vec<VaultFile> {
        (**self).direct_children(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_parts() {
        let file = VaultFile::new("topics/rust/ownership.notes.md");
        assert_eq!(file.name(), "ownership.notes.md");
        assert_eq!(file.basename(), "ownership.notes");
        assert_eq!(file.extension(), "md");
        assert_eq!(file.parent_path(), "topics/rust");
        assert_eq!(file.parent_name(), "rust");
    }

    #[test]
    fn top_level_files_live_in_root() {
        let file = VaultFile::new("readme.md");
        assert_eq!(file.parent_path(), ROOT_PATH);
        assert_eq!(file.parent_name(), "");
        assert!(!file.is_folder_index());
    }

    #[test]
    fn index_file_aliases_its_folder() {
        let index = VaultFile::new("topics/rust/rust.md");
        assert!(index.is_folder_index());
        assert_eq!(index.highlight_path(), "topics/rust");

        let plain = VaultFile::new("topics/rust/cargo.md");
        assert!(!plain.is_folder_index());
        assert_eq!(plain.highlight_path(), "topics/rust/cargo.md");
    }

    #[test]
    fn dotfiles_have_no_extension() {
        let file = VaultFile::new("config/.hidden");
        assert_eq!(file.basename(), ".hidden");
        assert_eq!(file.extension(), "");
    }
}
