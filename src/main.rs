//! Creates the organizer shortcut on the desktop.
//!
//! Run without arguments from the organizer's folder: the shortcut points at
//! the batch file there and starts in that folder.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use desktop_shortcut_rs::config::DEFAULT_NAME;
use desktop_shortcut_rs::platform::{self, dialog};
use desktop_shortcut_rs::shortcut;
use desktop_shortcut_rs::{
    IconLocation, LinkWriter, ShortcutConfig, ShortcutCreator, ShortcutDescriptor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Windows shell (IShellLinkW)
    Shell,
    /// Write the shortcut file directly
    Native,
}

#[derive(Parser, Debug)]
#[command(name = "desktop-shortcut-rs")]
#[command(about = "Create the WeChat File Organizer desktop shortcut")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shortcut name, without the .lnk extension
    #[arg(long)]
    name: Option<String>,

    /// Batch file to launch, relative to the current directory
    #[arg(long)]
    target: Option<String>,

    /// Working directory, relative to the current directory
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// Tooltip text
    #[arg(long)]
    description: Option<String>,

    /// Icon location as PATH,INDEX
    #[arg(long)]
    icon: Option<String>,

    /// Arguments passed to the batch file
    #[arg(long, allow_hyphen_values = true)]
    arguments: Option<String>,

    /// Write into this directory instead of the desktop
    #[arg(long)]
    desktop_dir: Option<PathBuf>,

    /// How the shortcut file is written
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// Skip the confirmation and error dialogs
    #[arg(long)]
    no_dialog: bool,

    /// Print an existing shortcut as JSON and exit
    #[arg(long, value_name = "LNK")]
    inspect: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Layer command-line values over the loaded settings.
    fn apply(&self, mut config: ShortcutConfig) -> ShortcutConfig {
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(target) = &self.target {
            config.batch_file = target.clone();
        }
        if let Some(dir) = &self.working_dir {
            config.working_dir = Some(dir.clone());
        }
        if let Some(description) = &self.description {
            config.description = description.clone();
        }
        if let Some(icon) = &self.icon {
            config.icon = IconLocation::parse(icon);
        }
        if let Some(arguments) = &self.arguments {
            config.arguments = Some(arguments.clone());
        }
        config
    }
}

fn init_logging(debug: bool, configured: Option<&str>) {
    let fallback = if debug {
        "debug"
    } else {
        configured.unwrap_or("info")
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn writer_for(backend: Option<Backend>) -> Result<Box<dyn LinkWriter>> {
    match backend {
        None => Ok(platform::default_writer()),
        Some(Backend::Native) => Ok(platform::native_writer()),
        #[cfg(windows)]
        Some(Backend::Shell) => Ok(Box::new(platform::ShellLinkWriter::new())),
        #[cfg(not(windows))]
        Some(Backend::Shell) => anyhow::bail!("The shell backend is only available on Windows"),
    }
}

/// Read the settings file, if any, and layer the command line over it.
fn load_config(args: &Args) -> Result<ShortcutConfig> {
    let config = match &args.config {
        Some(path) => ShortcutConfig::load(path)?,
        None => ShortcutConfig::default(),
    };
    Ok(args.apply(config))
}

fn run(args: &Args, config: &ShortcutConfig) -> Result<PathBuf> {
    let invocation_dir =
        std::env::current_dir().context("Failed to read the current directory")?;
    let desktop = match &args.desktop_dir {
        Some(dir) => dir.clone(),
        None => platform::desktop_dir()?,
    };
    debug!(
        "Invocation dir {}, desktop {}",
        invocation_dir.display(),
        desktop.display()
    );

    let descriptor = ShortcutDescriptor::for_invocation_dir(&invocation_dir, config);
    let creator = ShortcutCreator::new(desktop, writer_for(args.backend)?);

    creator
        .create(&config.name, &descriptor)
        .with_context(|| format!("Failed to create shortcut \"{}\"", config.name))
}

/// Everything that ends in the confirmation or the error dialog.
fn create(args: &Args, config: Result<ShortcutConfig>) -> Result<(String, PathBuf)> {
    let config = config?;
    let path = run(args, &config)?;
    Ok((config.name, path))
}

fn inspect(path: &Path) -> Result<()> {
    let summary = shortcut::inspect(path)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args);
    let log_level = config.as_ref().ok().and_then(|c| c.log_level.clone());
    init_logging(args.debug, log_level.as_deref());

    if let Some(path) = &args.inspect {
        return inspect(path);
    }

    match create(&args, config) {
        Ok((name, path)) => {
            if !args.no_dialog {
                dialog::show_info(
                    &name,
                    &format!("Desktop shortcut created:\n{}", path.display()),
                );
            }
            Ok(())
        }
        Err(e) => {
            if !args.no_dialog {
                let title = args.name.as_deref().unwrap_or(DEFAULT_NAME);
                dialog::show_error(title, &format!("{:#}", e));
            }
            Err(e)
        }
    }
}
