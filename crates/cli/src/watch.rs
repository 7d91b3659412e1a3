use crate::terminal::TerminalWorkspace;
use anyhow::{Context as AnyhowContext, Result};
use ftags_graph::{VaultGraph, VaultManifest};
use ftags_viewer::{ChangeEvent, RefreshCoordinator};
use log::{debug, info, warn};
use notify::{Config as NotifyConfig, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::mpsc;

/// Swap in the graph, ignore filters and inbox of a reloaded manifest.
///
/// Nothing changes when the graph cannot be built. A manifest without an
/// inbox keeps the current one.
fn apply_manifest(
    manifest: VaultManifest,
    coordinator: &mut RefreshCoordinator<VaultGraph>,
    workspace: &mut TerminalWorkspace,
) -> Result<()> {
    let graph = manifest.build_graph()?;
    coordinator.set_oracle(graph);
    workspace.set_ignore_filters(manifest.ignore_filters);
    if let Some(inbox) = manifest.inbox {
        debug!("inbox is {inbox}");
        coordinator.set_inbox(inbox);
    }
    Ok(())
}

/// Re-render every time the manifest is rewritten, until ctrl-c.
///
/// A manifest that fails to parse keeps the previous graph on screen.
pub async fn run(
    manifest_path: PathBuf,
    mut coordinator: RefreshCoordinator<VaultGraph>,
    mut workspace: TerminalWorkspace,
    json: bool,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::channel::<notify::Result<Event>>(64);
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = event_tx.blocking_send(res);
        },
        NotifyConfig::default(),
    )
    .context("watcher init failed")?;

    // Watch the directory: editors replace the file rather than writing it.
    let dir = manifest_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", dir.display()))?;
    let manifest_name = manifest_path
        .file_name()
        .map(ToOwned::to_owned)
        .with_context(|| format!("{} has no file name", manifest_path.display()))?;

    coordinator.refresh_all(&mut workspace);
    workspace.print(json)?;
    info!("watching {}", manifest_path.display());

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(event) = event_rx.recv() => {
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        warn!("watch error: {err}");
                        continue;
                    }
                };
                if !event
                    .paths
                    .iter()
                    .any(|path| path.file_name() == Some(manifest_name.as_os_str()))
                {
                    continue;
                }
                if event.kind.is_access() {
                    continue;
                }
                debug!("manifest event: {:?}", event.kind);

                let manifest = match VaultManifest::load(&manifest_path) {
                    Ok(manifest) => manifest,
                    Err(err) => {
                        warn!("keeping previous graph: {err}");
                        continue;
                    }
                };
                if let Err(err) = apply_manifest(manifest, &mut coordinator, &mut workspace) {
                    warn!("keeping previous graph: {err}");
                    continue;
                }

                let change = ChangeEvent::MetadataChanged {
                    path: manifest_path.display().to_string(),
                };
                if coordinator.handle(&change, &mut workspace, Instant::now()).is_some() {
                    println!();
                    workspace.print(json)?;
                }
            }
            result = &mut shutdown => {
                result.context("failed to listen for ctrl-c")?;
                coordinator.teardown(&mut workspace);
                info!("stopped watching");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalView;
    use ftags_graph::VaultFile;
    use ftags_viewer::{ViewerSettings, Workspace};
    use pretty_assertions::assert_eq;

    fn manifest(text: &str) -> VaultManifest {
        VaultManifest::parse(text.as_bytes()).unwrap()
    }

    fn setup() -> (RefreshCoordinator<VaultGraph>, TerminalWorkspace) {
        let coordinator = RefreshCoordinator::new(VaultGraph::new(), ViewerSettings::default());
        let workspace = TerminalWorkspace::new(
            vec![TerminalView::open(VaultFile::new("notes/a.md"))],
            Vec::new(),
            false,
        );
        (coordinator, workspace)
    }

    #[test]
    fn reload_picks_up_a_new_inbox() {
        let (mut coordinator, mut workspace) = setup();
        let reloaded = manifest(
            r#"
inbox = "triage"
ignore_filters = ["drafts/"]

[[files]]
path = "notes/a.md"
"#,
        );

        apply_manifest(reloaded, &mut coordinator, &mut workspace).unwrap();

        assert_eq!(coordinator.settings().inbox, "triage");
        assert_eq!(coordinator.oracle().file_count(), 1);
        assert_eq!(workspace.user_ignore_filters(), vec!["drafts/".to_string()]);
    }

    #[test]
    fn missing_inbox_keeps_the_current_one() {
        let (mut coordinator, mut workspace) = setup();
        coordinator.set_inbox("triage");

        apply_manifest(manifest("files = []\n"), &mut coordinator, &mut workspace).unwrap();

        assert_eq!(coordinator.settings().inbox, "triage");
    }

    #[test]
    fn broken_graph_changes_nothing() {
        let (mut coordinator, mut workspace) = setup();
        let dangling = manifest(
            r#"
inbox = "triage"

[[files]]
path = "notes/a.md"
tags = ["missing.md"]
"#,
        );

        assert!(apply_manifest(dangling, &mut coordinator, &mut workspace).is_err());
        assert_ne!(coordinator.settings().inbox, "triage");
    }
}
