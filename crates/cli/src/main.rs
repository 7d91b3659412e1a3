use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use ftags_graph::{expand_ancestors, list_children, VaultFile, VaultGraph, VaultManifest};
use ftags_protocol::IgnoreRules;
use ftags_viewer::{
    build_child_strip, build_chip_strip, Confirmation, RefreshCoordinator, RemovalOutcome,
    RemovalWorkflow, SharedVault, ViewerSettings,
};
use prompt::{AssumeYes, LogNotifier, StdinConfirmation};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use terminal::{render_children, render_chips, TerminalView, TerminalWorkspace};

mod prompt;
mod terminal;
mod watch;

#[derive(Parser)]
#[command(name = "ftags")]
#[command(about = "Browse the ftag hierarchy of a vault", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Viewer settings file (JSON or TOML)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the layered ancestor chips of a file
    Chips(FileArgs),

    /// Show the first children of a tag file
    Children(ChildrenArgs),

    /// Render chips for a set of open files the way the viewer does
    View(ViewArgs),

    /// Like `view`, re-rendering whenever the manifest changes
    Watch(ViewArgs),

    /// Remove a tag from a file and save the manifest
    Untag(UntagArgs),
}

#[derive(Args)]
struct VaultArgs {
    /// Vault manifest (JSON or TOML)
    #[arg(long, default_value = "vault.toml")]
    vault: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FileArgs {
    #[command(flatten)]
    vault: VaultArgs,

    /// Vault-relative path of the file
    file: String,
}

#[derive(Args)]
struct ChildrenArgs {
    #[command(flatten)]
    vault: VaultArgs,

    /// Vault-relative path of the tag file
    file: String,

    /// Extra ignore filter on top of the manifest's; `/regex/` or a path prefix
    #[arg(long = "ignore")]
    ignore: Vec<String>,
}

#[derive(Args)]
struct ViewArgs {
    #[command(flatten)]
    vault: VaultArgs,

    /// Open files; the first one is the active view
    #[arg(required = true)]
    files: Vec<String>,

    /// Show the "+ Add tag..." button
    #[arg(long)]
    add_tag: bool,
}

#[derive(Args)]
struct UntagArgs {
    /// Vault manifest (JSON or TOML); rewritten after the removal
    #[arg(long, default_value = "vault.toml")]
    vault: PathBuf,

    /// Vault-relative path of the tagged file
    file: String,

    /// Vault-relative path of the tag to remove
    tag: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

struct Vault {
    manifest: VaultManifest,
    graph: VaultGraph,
    settings: ViewerSettings,
}

impl Vault {
    fn load(path: &Path, settings: Option<&PathBuf>) -> Result<Self> {
        let manifest = VaultManifest::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        let mut settings = match settings {
            Some(path) => ViewerSettings::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => ViewerSettings::default(),
        };
        if let Some(inbox) = &manifest.inbox {
            settings.inbox.clone_from(inbox);
        }
        settings.validate()?;
        let graph = manifest.build_graph()?;
        Ok(Self {
            manifest,
            graph,
            settings,
        })
    }

    fn file(&self, path: &str) -> Result<VaultFile> {
        self.graph
            .file(path)
            .cloned()
            .with_context(|| format!("{path} is not in the vault"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let settings = cli.settings.as_ref();
    match cli.command {
        Commands::Chips(args) => run_chips(&args, settings),
        Commands::Children(args) => run_children(&args, settings),
        Commands::View(args) => run_view(args, settings, false).await,
        Commands::Watch(args) => run_view(args, settings, true).await,
        Commands::Untag(args) => run_untag(args, settings).await,
    }
}

fn run_chips(args: &FileArgs, settings: Option<&PathBuf>) -> Result<()> {
    let vault = Vault::load(&args.vault.vault, settings)?;
    let file = vault.file(&args.file)?;
    let layers = expand_ancestors(&vault.graph, &file, &vault.settings.inbox);
    let strip = build_chip_strip(&layers, false);

    if args.vault.json {
        println!("{}", serde_json::to_string_pretty(&strip)?);
    } else {
        print!("{}", render_chips(&strip));
    }
    Ok(())
}

fn run_children(args: &ChildrenArgs, settings: Option<&PathBuf>) -> Result<()> {
    let vault = Vault::load(&args.vault.vault, settings)?;
    let file = vault.file(&args.file)?;
    let filters: Vec<&String> = vault
        .manifest
        .ignore_filters
        .iter()
        .chain(&args.ignore)
        .collect();
    let listing = list_children(&vault.graph, &file, &IgnoreRules::parse(&filters));
    let strip = build_child_strip(&listing);

    if args.vault.json {
        println!("{}", serde_json::to_string_pretty(&strip)?);
    } else {
        print!("{}", render_children(&strip));
    }
    Ok(())
}

async fn run_view(args: ViewArgs, settings: Option<&PathBuf>, watch: bool) -> Result<()> {
    let vault = Vault::load(&args.vault.vault, settings)?;
    let views = args
        .files
        .iter()
        .map(|path| {
            let file = vault.graph.file(path).cloned().unwrap_or_else(|| {
                log::warn!("{path} is not in the vault");
                VaultFile::new(path.as_str())
            });
            TerminalView::open(file)
        })
        .collect();
    let mut workspace =
        TerminalWorkspace::new(views, vault.manifest.ignore_filters.clone(), args.add_tag);
    let mut coordinator = RefreshCoordinator::new(vault.graph, vault.settings);

    if watch {
        return watch::run(args.vault.vault, coordinator, workspace, args.vault.json).await;
    }
    coordinator.refresh_all(&mut workspace);
    workspace.print(args.vault.json)
}

async fn run_untag(args: UntagArgs, settings: Option<&PathBuf>) -> Result<()> {
    let Vault {
        mut manifest,
        graph,
        settings,
    } = Vault::load(&args.vault, settings)?;
    let vault = SharedVault::new(graph);
    let (file, tag) = {
        let graph = vault.read();
        let lookup = |path: &str| {
            graph
                .file(path)
                .cloned()
                .with_context(|| format!("{path} is not in the vault"))
        };
        (lookup(&args.file)?, lookup(&args.tag)?)
    };

    let confirmation: Arc<dyn Confirmation> = if args.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(StdinConfirmation)
    };
    let workflow = RemovalWorkflow::new(
        settings.inbox,
        Arc::new(vault.clone()),
        Arc::new(LogNotifier),
        confirmation,
        Arc::new(vault.clone()),
    );

    match workflow.request(&tag, &file).await? {
        RemovalOutcome::Cancelled => println!("cancelled"),
        RemovalOutcome::Removed => {
            manifest.sync_from_graph(&vault.read());
            manifest
                .save(&args.vault)
                .with_context(|| format!("failed to save {}", args.vault.display()))?;
            println!("removed #{} from {}", tag.basename(), file.path);
        }
    }
    Ok(())
}
