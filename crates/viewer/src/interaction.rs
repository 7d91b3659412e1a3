use crate::host::Navigator;
use ftags_graph::VaultFile;
use ftags_protocol::{MenuAction, MenuEntry, MenuSection, OpenTarget};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
    };
    pub const CTRL_ALT: Modifiers = Modifiers {
        ctrl: true,
        alt: true,
    };
}

pub fn open_target_for_click(modifiers: Modifiers) -> OpenTarget {
    match (modifiers.ctrl, modifiers.alt) {
        (true, true) => OpenTarget::Split,
        (true, false) => OpenTarget::Tab,
        (false, _) => OpenTarget::Current,
    }
}

/// Context menu of a chip or child item. "Open to the right" is desktop-only.
pub fn context_menu(is_desktop: bool) -> Vec<MenuEntry> {
    let mut entries = vec![
        entry(MenuSection::Open, "Open child", "lucide-file", MenuAction::Open(OpenTarget::Current)),
        entry(
            MenuSection::Open,
            "Open in new tab",
            "lucide-file-plus",
            MenuAction::Open(OpenTarget::Tab),
        ),
    ];
    if is_desktop {
        entries.push(entry(
            MenuSection::Open,
            "Open to the right",
            "lucide-separator-vertical",
            MenuAction::Open(OpenTarget::Split),
        ));
    }
    entries.push(entry(MenuSection::Action, "Rename", "lucide-edit-3", MenuAction::Rename));
    let mut remove = entry(MenuSection::Danger, "Remove", "lucide-trash-2", MenuAction::Delete);
    remove.warning = true;
    entries.push(remove);
    entries
}

fn entry(section: MenuSection, title: &str, icon: &str, action: MenuAction) -> MenuEntry {
    MenuEntry {
        section,
        title: title.to_string(),
        icon: icon.to_string(),
        warning: false,
        action,
    }
}

/// Start opening `file` on the current tokio runtime without waiting for it.
///
/// Render passes that run before the open completes may still show the old
/// file; the next change event corrects them. Failures are only logged.
/// Outside a runtime nothing is opened and `None` is returned.
pub fn open_detached(
    navigator: &Arc<dyn Navigator>,
    file: VaultFile,
    target: OpenTarget,
) -> Option<JoinHandle<()>> {
    let Ok(runtime) = Handle::try_current() else {
        log::warn!("no async runtime to open {} ({target:?})", file.path);
        return None;
    };
    let navigator = Arc::clone(navigator);
    Some(runtime.spawn(async move {
        let path = file.path.clone();
        if let Err(err) = navigator.open_file(file, target).await {
            log::warn!("failed to open {path} ({target:?}): {err:#}");
        }
    }))
}

/// Carry out a context menu choice. Opens behave like [`open_detached`].
pub fn run_menu_action(navigator: &Arc<dyn Navigator>, file: &VaultFile, action: MenuAction) {
    match action {
        MenuAction::Open(target) => {
            open_detached(navigator, file.clone(), target);
        }
        MenuAction::Rename => navigator.prompt_rename(file),
        MenuAction::Delete => navigator.prompt_delete(file),
    }
}
