//! # ftags Viewer
//!
//! Keeps tag chips in the header of every open view in sync with the ftag
//! graph.
//!
//! ## Pipeline
//!
//! ```text
//! ChangeEvent (active view, rename, delete, create, metadata)
//!     │
//!     ├──> Refresh Coordinator
//!     │      ├─ trigger policy (+ leading-edge debounce for "resolve")
//!     │      └─ Idle -> Scheduled -> Rendering -> Idle
//!     │
//!     ├──> per open view
//!     │      ├─ unmount old fragments
//!     │      ├─ layered ancestors  -> ChipStrip
//!     │      └─ filtered children  -> ChildStrip
//!     │
//!     └──> Removal Workflow (first-layer chip "x")
//!            ├─ inbox advisory
//!            ├─ confirmation
//!            └─ TagMutator::remove_ftag
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use ftags_graph::VaultManifest;
//! use ftags_viewer::{RefreshCoordinator, ViewerSettings};
//!
//! fn main() -> anyhow::Result<()> {
//!     let manifest = VaultManifest::load("vault.toml".as_ref())?;
//!     let coordinator = RefreshCoordinator::new(manifest.build_graph()?, ViewerSettings::default());
//!     println!("{} passes so far", coordinator.passes());
//!     Ok(())
//! }
//! ```

mod coordinator;
mod debounce;
mod error;
mod events;
mod host;
mod interaction;
mod removal;
mod render;
mod service;
mod settings;
mod shared;

pub use coordinator::{PassContext, RefreshCoordinator};
pub use debounce::{LeadingDebounce, RefreshPhase};
pub use error::{Result, ViewerError};
pub use events::ChangeEvent;
pub use host::{
    Confirmation, Navigator, Notifier, TagMutator, UntagPrompt, VaultFolders, ViewKind, ViewPane,
    Workspace,
};
pub use interaction::{context_menu, open_detached, open_target_for_click, run_menu_action, Modifiers};
pub use removal::{missing_inbox_notice, RemovalOutcome, RemovalWorkflow};
pub use render::{build_child_strip, build_chip_strip, tooltip, tooltip_in};
pub use service::{RefreshService, RefreshUpdate};
pub use settings::{ViewerSettings, DEFAULT_INBOX, DEFAULT_RESOLVE_DEBOUNCE_MS};
pub use shared::SharedVault;
