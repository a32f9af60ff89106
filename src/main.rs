use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use maskbrush::catalog::{Catalog, CatalogLayout};
use maskbrush::input::parse_script;
use maskbrush::overlay::blend_preview;
use maskbrush::raster;
use maskbrush::session::{ActionOutcome, EditSession};
use maskbrush::Config;
use std::fs;
use std::path::{Path, PathBuf};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MASKBRUSH_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "maskbrush")]
#[command(version = VERSION, about = "Erase-only brush editor for binary segmentation masks")]
struct Cli {
    /// Config file to use instead of ~/.config/maskbrush/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the image/mask pairs found under ROOT
    List {
        /// Folder holding the image and mask directories
        root: PathBuf,
    },

    /// Write binary exports of the masks (all items, or one with --index)
    Export {
        root: PathBuf,

        /// Only export this item (0-based)
        #[arg(long, value_name = "N")]
        index: Option<usize>,
    },

    /// Composite the overlay onto the source image and write it as an image
    Preview {
        root: PathBuf,

        /// Item to render (0-based)
        #[arg(long, value_name = "N", default_value_t = 0)]
        index: usize,

        /// Output image path
        #[arg(long, value_name = "PNG")]
        out: PathBuf,

        /// Overlay opacity (0.0 - 1.0), overriding the config
        #[arg(long, value_name = "F")]
        opacity: Option<f32>,

        /// Render the source image without the overlay
        #[arg(long)]
        hide_overlay: bool,
    },

    /// Replay a gesture script (press/drag/release/save/...) against ROOT
    Replay {
        root: PathBuf,

        /// Script file, one action per line
        #[arg(long, value_name = "FILE")]
        script: PathBuf,
    },

    /// Write the documented example config to the config path
    InitConfig,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::InitConfig => {
            let path = match cli.config {
                Some(path) => path,
                None => Config::get_config_path()?,
            };
            Config::create_default_file(&path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        command => {
            let config = load_config(cli.config.as_deref())?;
            run(command, config)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn run(command: Command, mut config: Config) -> Result<()> {
    match command {
        Command::List { root } => list(&root, &config),
        Command::Export { root, index } => export(&root, index, &config),
        Command::Preview {
            root,
            index,
            out,
            opacity,
            hide_overlay,
        } => {
            if let Some(opacity) = opacity {
                config.overlay.opacity = opacity.clamp(0.0, 1.0);
            }
            config.overlay.visible = !hide_overlay;
            preview(&root, index, &out, &config)
        }
        Command::Replay { root, script } => replay(&root, &script, &config),
        Command::InitConfig => Err(anyhow!("init-config is handled before loading config")),
    }
}

fn list(root: &Path, config: &Config) -> Result<()> {
    let catalog = Catalog::discover(root, &CatalogLayout::from(&config.catalog))
        .with_context(|| format!("Failed to read catalog under {}", root.display()))?;

    if catalog.is_empty() {
        println!("No image/mask pairs under {}", root.display());
        return Ok(());
    }

    for (index, entry) in catalog.entries().iter().enumerate() {
        println!(
            "{:>4}  {}  {}",
            index,
            entry.image.display(),
            entry.mask.display()
        );
    }
    Ok(())
}

fn open_session(root: &Path, config: &Config) -> Result<EditSession> {
    let mut session = EditSession::from_config(config);
    session
        .load_catalog(root)
        .with_context(|| format!("Failed to open catalog under {}", root.display()))?;
    Ok(session)
}

fn export(root: &Path, index: Option<usize>, config: &Config) -> Result<()> {
    let mut session = EditSession::from_config(config);
    session
        .open_catalog(root)
        .with_context(|| format!("Failed to open catalog under {}", root.display()))?;

    let indices: Vec<usize> = match index {
        Some(index) => vec![index],
        None => (0..session.catalog().len()).collect(),
    };

    let mut failures = 0usize;
    for index in indices {
        let saved = session
            .go_to(index)
            .and_then(|()| session.save_current());
        match saved {
            Ok(path) => println!("{}", path.display()),
            Err(err) => {
                log::error!("Item {}: {}", index, err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} item(s) could not be exported", failures));
    }
    Ok(())
}

fn preview(root: &Path, index: usize, out: &Path, config: &Config) -> Result<()> {
    let mut session = open_session(root, config)?;
    session
        .go_to(index)
        .with_context(|| format!("Failed to load item {}", index))?;

    let entry = session
        .current_entry()
        .context("No item loaded")?
        .clone();
    let source = raster::load_source_image(&entry.image)?;
    let composed = blend_preview(&source, session.current_overlay());

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    raster::save_rgb(&composed, out)?;
    println!("{}", out.display());
    Ok(())
}

fn replay(root: &Path, script: &Path, config: &Config) -> Result<()> {
    let source = fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let actions = parse_script(&source)
        .with_context(|| format!("Invalid script {}", script.display()))?;

    let mut session = open_session(root, config)?;
    let mut saves = 0usize;
    for (step, action) in actions.iter().enumerate() {
        let outcome = session
            .apply(action)
            .with_context(|| format!("Step {} ({}) failed", step + 1, action))?;
        if let ActionOutcome::Saved(path) = outcome {
            println!("saved {}", path.display());
            saves += 1;
        }
    }

    let position = match (session.current_index(), session.current_entry()) {
        (Some(index), Some(entry)) => format!(
            "item {}/{} ({})",
            index + 1,
            session.catalog().len(),
            entry.image_name()
        ),
        _ => "no item".to_string(),
    };
    let unsaved = if session.is_modified() {
        "unsaved edits"
    } else {
        "no unsaved edits"
    };
    println!(
        "replayed {} action(s): {}, {} save(s), {}",
        actions.len(),
        position,
        saves,
        unsaved
    );
    Ok(())
}
