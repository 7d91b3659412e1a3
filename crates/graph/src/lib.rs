//! # ftags Graph
//!
//! Traversal of the ftag hierarchy: tags are files, and a file's tags are its
//! parents.
//!
//! ## Architecture
//!
//! ```text
//! TagOracle (direct parents / children of a file)
//!     │
//!     ├──> Ancestor Expander
//!     │      ├─ first  = direct parents (oracle order)
//!     │      ├─ second..fourth = parents of the previous layer
//!     │      └─ visited set: each path once, cycles terminate
//!     │
//!     └──> Descendant Lister
//!            ├─ drop children matching ignore filters
//!            └─ show 5, flag overflow
//! ```
//!
//! [`VaultGraph`] is an in-memory oracle backed by petgraph, built from a
//! [`VaultManifest`] or by hand.

mod ancestors;
mod children;
mod error;
mod graph;
mod manifest;
mod types;

pub use ancestors::{expand_ancestors, AncestorExpander, LayeredAncestors};
pub use children::{classify_icon, list_children, ChildListing};
pub use error::{GraphError, Result};
pub use graph::{TagEdge, VaultGraph};
pub use manifest::{ManifestFile, VaultManifest};
pub use types::{folder_name, parent_dir, FileStat, TagOracle, VaultFile, VaultFolder, ROOT_PATH};
