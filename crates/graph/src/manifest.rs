use crate::error::{GraphError, Result};
use crate::graph::VaultGraph;
use crate::types::{FileStat, VaultFile};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declarative vault description, JSON or TOML.
///
/// ```toml
/// inbox = "inbox"
/// ignore_filters = ["/^archive\\//"]
/// folders = ["inbox"]
///
/// [[files]]
/// path = "notes/borrowck.md"
/// tags = ["topics/rust/rust.md"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VaultManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbox: Option<String>,

    #[serde(default)]
    pub ignore_filters: Vec<String>,

    #[serde(default)]
    pub folders: Vec<String>,

    #[serde(default)]
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub stat: FileStat,
}

impl VaultManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::parse(&bytes)
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        match serde_json::from_slice(bytes) {
            Ok(manifest) => Ok(manifest),
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes)
                    .map_err(|err| GraphError::Manifest(format!("{json_err}; {err}")))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    GraphError::Manifest(format!(
                        "not valid JSON ({json_err}) or TOML ({toml_err})"
                    ))
                })
            }
        }
    }

    /// Build the graph. Tags must name files declared in the manifest.
    pub fn build_graph(&self) -> Result<VaultGraph> {
        let mut graph = VaultGraph::new();
        for folder in &self.folders {
            graph.add_folder(folder.trim_end_matches('/'));
        }
        for file in &self.files {
            graph.add_file(VaultFile::new(file.path.clone()).with_stat(file.stat));
        }
        for file in &self.files {
            for tag in &file.tags {
                graph.add_tag(&file.path, tag)?;
            }
        }

        log::info!(
            "Built vault graph: {} files, {} tags",
            graph.file_count(),
            graph.tag_count()
        );
        Ok(graph)
    }

    /// Replace folders and files with the current state of `graph`, keeping
    /// the inbox and ignore filters.
    pub fn sync_from_graph(&mut self, graph: &VaultGraph) {
        self.folders = graph.declared_folders().map(str::to_string).collect();
        self.files = graph
            .files()
            .map(|file| ManifestFile {
                path: file.path.clone(),
                tags: graph
                    .tags_of(&file.path)
                    .into_iter()
                    .map(|tag| tag.path.clone())
                    .collect(),
                stat: file.stat,
            })
            .collect();
    }

    /// Write as JSON when `path` ends in `.json`, TOML otherwise
    pub fn save(&self, path: &Path) -> Result<()> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let text = if is_json {
            serde_json::to_string_pretty(self).map_err(|e| GraphError::Manifest(e.to_string()))?
        } else {
            toml::to_string(self).map_err(|e| GraphError::Manifest(e.to_string()))?
        };
        std::fs::write(path, text)?;
        Ok(())
    }
}
