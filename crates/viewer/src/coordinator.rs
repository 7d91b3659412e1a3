use crate::debounce::{LeadingDebounce, RefreshPhase};
use crate::events::ChangeEvent;
use crate::host::{Navigator, ViewPane, Workspace};
use crate::interaction::{context_menu, open_detached, open_target_for_click, Modifiers};
use crate::render::{build_child_strip, build_chip_strip};
use crate::settings::ViewerSettings;
use ftags_graph::{expand_ancestors, list_children, parent_dir, TagOracle, VaultFile};
use ftags_protocol::{
    Fragment, FragmentKind, IgnoreRules, MenuEntry, OpenTarget, ADD_FTAG_COMMAND,
    ADD_FTAG_PLUGIN, REVEAL_ACTIVE_FILE_COMMAND,
};
use std::sync::Arc;
use std::time::Instant;

/// Inputs shared by every view of one render pass.
#[derive(Debug, Clone, Default)]
pub struct PassContext {
    pub ignore: IgnoreRules,
    pub add_tag_button: bool,
}

impl PassContext {
    pub fn from_workspace<W: Workspace + ?Sized>(workspace: &W) -> Self {
        Self {
            ignore: IgnoreRules::parse(&workspace.user_ignore_filters()),
            add_tag_button: workspace.plugin_enabled(ADD_FTAG_PLUGIN),
        }
    }
}

/// Decides when chips are recomputed and re-injects them into every open view.
///
/// Each pass replaces the fragments of a view wholesale; nothing is diffed.
pub struct RefreshCoordinator<O> {
    oracle: O,
    settings: ViewerSettings,
    phase: RefreshPhase,
    resolve_debounce: LeadingDebounce,
    highlighted: Option<String>,
    passes: u64,
}

impl<O: TagOracle> RefreshCoordinator<O> {
    pub fn new(oracle: O, settings: ViewerSettings) -> Self {
        let resolve_debounce = LeadingDebounce::new(settings.resolve_debounce());
        Self {
            oracle,
            settings,
            phase: RefreshPhase::Idle,
            resolve_debounce,
            highlighted: None,
            passes: 0,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    pub fn set_oracle(&mut self, oracle: O) {
        self.oracle = oracle;
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Files inside `inbox` stop the ancestor walk from the next pass on.
    pub fn set_inbox(&mut self, inbox: impl Into<String>) {
        self.settings.inbox = inbox.into();
    }

    pub const fn phase(&self) -> RefreshPhase {
        self.phase
    }

    /// Completed render passes
    pub const fn passes(&self) -> u64 {
        self.passes
    }

    /// Whether `event` warrants a render pass.
    ///
    /// Creations only count when they land in the active file's folder; files
    /// created next to other open views are not noticed.
    pub fn should_refresh<W: Workspace + ?Sized>(
        &mut self,
        event: &ChangeEvent,
        workspace: &W,
        now: Instant,
    ) -> bool {
        match event {
            ChangeEvent::ActiveViewChanged
            | ChangeEvent::FileRenamed { .. }
            | ChangeEvent::FileDeleted { .. }
            | ChangeEvent::MetadataChanged { .. } => true,
            ChangeEvent::FileCreated { path } => workspace
                .active_file()
                .is_some_and(|active| active.parent_path() == parent_dir(path)),
            ChangeEvent::MetadataResolved => self.resolve_debounce.admit(now),
        }
    }

    /// Apply one change event; returns the number of views rendered.
    pub fn handle<W: Workspace + ?Sized>(
        &mut self,
        event: &ChangeEvent,
        workspace: &mut W,
        now: Instant,
    ) -> Option<usize> {
        if !self.should_refresh(event, workspace, now) {
            log::trace!("{} absorbed", event.reason());
            return None;
        }
        self.phase = RefreshPhase::Scheduled;
        log::debug!("refresh scheduled by {}", event.reason());
        Some(self.refresh_all(workspace))
    }

    /// Recompute and re-inject chips in every open view.
    pub fn refresh_all<W: Workspace + ?Sized>(&mut self, workspace: &mut W) -> usize {
        self.phase = RefreshPhase::Rendering;
        let context = PassContext::from_workspace(workspace);
        let mut rendered = 0;
        workspace.iterate_views(&mut |view| {
            if self.inject_chips(view, &context) {
                rendered += 1;
            }
        });
        self.phase = RefreshPhase::Idle;
        self.passes += 1;
        log::debug!("render pass {} covered {rendered} views", self.passes);
        rendered
    }

    /// Replace the ancestor and descendant fragments of one view.
    ///
    /// Views of an unknown kind, without a file or without a header are left
    /// alone; returns false for those.
    pub fn inject_chips(&self, view: &mut dyn ViewPane, context: &PassContext) -> bool {
        if !view.kind().is_file_view() {
            return false;
        }
        let Some(file) = view.file() else {
            return false;
        };
        if !view.has_header() {
            return false;
        }

        let layers = expand_ancestors(&self.oracle, &file, &self.settings.inbox);
        let chips = build_chip_strip(&layers, context.add_tag_button);
        view.unmount(FragmentKind::Ancestors);
        if chips.add_tag_button || !chips.chips.is_empty() {
            view.mount(Fragment::Ancestors(chips));
        }

        let listing = list_children(&self.oracle, &file, &context.ignore);
        let children = build_child_strip(&listing);
        view.unmount(FragmentKind::Descendants);
        if !children.items.is_empty() {
            view.mount(Fragment::Descendants(children));
        }
        true
    }

    pub fn remove_chips(&self, view: &mut dyn ViewPane) {
        for kind in FragmentKind::ALL {
            view.unmount(kind);
        }
    }

    /// Strip every injected fragment and forget the highlight.
    pub fn teardown<W: Workspace + ?Sized>(&mut self, workspace: &mut W) {
        workspace.iterate_views(&mut |view| self.remove_chips(view));
        self.highlighted = None;
        self.resolve_debounce.reset();
        self.phase = RefreshPhase::Idle;
    }

    /// Path currently highlighted in the file navigator
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    /// Pointer entered a chip or child item. Holding ctrl also asks the host
    /// for a hover preview.
    pub fn hover_enter(
        &mut self,
        navigator: &dyn Navigator,
        source: &VaultFile,
        file: &VaultFile,
        modifiers: Modifiers,
    ) {
        self.highlighted = Some(file.highlight_path().to_string());
        if modifiers.ctrl {
            navigator.hover_link(source, &file.path);
        }
    }

    pub fn hover_leave(&mut self) {
        self.highlighted = None;
    }

    /// Open `file` per the click modifiers. The open is not awaited.
    ///
    /// The open is spawned on the ambient tokio runtime. Called outside one,
    /// the click is logged and dropped; the target and highlight still update.
    pub fn click_item(
        &mut self,
        navigator: &Arc<dyn Navigator>,
        file: &VaultFile,
        modifiers: Modifiers,
    ) -> OpenTarget {
        let target = open_target_for_click(modifiers);
        open_detached(navigator, file.clone(), target);
        self.highlighted = None;
        target
    }

    /// The overflow item reveals the active file instead of listing more.
    pub fn click_more(&self, navigator: &dyn Navigator) {
        navigator.execute_command(REVEAL_ACTIVE_FILE_COMMAND);
    }

    pub fn click_add_tag(&self, navigator: &dyn Navigator) {
        navigator.execute_command(ADD_FTAG_COMMAND);
    }

    /// Context menu of a chip or child item in `workspace`
    pub fn context_menu_for<W: Workspace + ?Sized>(&self, workspace: &W) -> Vec<MenuEntry> {
        context_menu(workspace.is_desktop())
    }
}
