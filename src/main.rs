use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use satchel::catalog::{Catalog, ItemRecord, Location};
use satchel::config::Config;
use satchel::inventory::{
    CompareSelector, DefaultPreset, DropSelector, Frontend, PickSelector, Selector, SelectorSettings,
};
use satchel::ui::{Keymap, TerminalFrontend, Theme};

#[derive(Parser, Debug)]
#[command(name = "satchel")]
#[command(about = "Terminal inventory selector with pick, compare and drop modes")]
#[command(version)]
struct Cli {
    /// Config file path [default: ~/.config/satchel/config.toml]
    #[arg(long)]
    config: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick a single item
    Pick(SelectArgs),
    /// Pick two items to compare
    Compare(SelectArgs),
    /// Choose items and quantities to drop
    Drop(SelectArgs),
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Item catalog (TOML)
    #[arg(long)]
    catalog: PathBuf,

    /// How far away nearby items are listed [default: from config]
    #[arg(long)]
    radius: Option<i32>,

    /// Window title
    #[arg(long)]
    title: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// One chosen item as printed
#[derive(Serialize)]
struct Chosen<'a> {
    name: String,
    category: &'a str,
    quantity: usize,
    location: &'a Location,
}

impl<'a> Chosen<'a> {
    fn new(record: &'a ItemRecord, quantity: usize) -> Self {
        Self {
            name: record.display_name(),
            category: &record.category,
            quantity,
            location: &record.location,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    // Load config
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Config::default_path().display().to_string());
    let config = Config::load(&config_path)?;

    let settings = SelectorSettings::from(&config);
    let theme = config.resolve_theme();
    let keymap = Keymap::new(&config.keys);

    match &cli.command {
        Command::Pick(args) => {
            let catalog = load_catalog(args)?;
            let mut driver = PickSelector::new(Rc::new(DefaultPreset::new()), settings);
            prepare(driver.selector_mut(), &catalog, args, &config, "Select an item");
            let picked = run_tui(theme, keymap, |f| driver.execute(f))?;

            let store = driver.selector().store();
            let chosen: Vec<Chosen> = picked
                .into_iter()
                .map(|item| Chosen::new(store.item(item), 1))
                .collect();
            print_chosen(&chosen, args.json)
        }
        Command::Compare(args) => {
            let catalog = load_catalog(args)?;
            let mut driver = CompareSelector::new(settings);
            prepare(driver.selector_mut(), &catalog, args, &config, "Compare items");
            let pair = run_tui(theme, keymap, |f| driver.execute(f))?;

            let store = driver.selector().store();
            let chosen: Vec<Chosen> = pair
                .map(|(first, second)| vec![first, second])
                .unwrap_or_default()
                .into_iter()
                .map(|item| Chosen::new(store.item(item), 1))
                .collect();
            print_chosen(&chosen, args.json)
        }
        Command::Drop(args) => {
            let catalog = load_catalog(args)?;
            if args.radius.is_some() {
                tracing::warn!("Nearby items can't be dropped, ignoring --radius");
            }
            let mut driver = DropSelector::new(Rc::new(DefaultPreset::new()), settings);
            driver.add_catalog(&catalog);
            let selector = driver.selector_mut();
            selector.set_title(args.title.as_deref().unwrap_or("Drop items"));
            selector.set_hint("To drop x items, type a number before selecting.");
            let dropped = run_tui(theme, keymap, |f| driver.execute(f))?;

            let store = driver.selector().store();
            let chosen: Vec<Chosen> = dropped
                .iter()
                .map(|&(item, quantity)| Chosen::new(store.item(item), quantity))
                .collect();
            print_chosen(&chosen, args.json)
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "satchel=warn".into());

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = log_file
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

fn load_catalog(args: &SelectArgs) -> Result<Catalog> {
    Catalog::load(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))
}

fn prepare(
    selector: &mut Selector,
    catalog: &Catalog,
    args: &SelectArgs,
    config: &Config,
    default_title: &str,
) {
    let radius = args.radius.unwrap_or(config.behavior.nearby_radius);
    selector.set_title(args.title.as_deref().unwrap_or(default_title));
    selector.add_catalog(catalog, radius);
}

/// Run a driver full-screen, restoring the terminal before returning
fn run_tui<T>(
    theme: Theme,
    keymap: Keymap,
    execute: impl FnOnce(&mut dyn Frontend) -> Result<T>,
) -> Result<T> {
    let mut frontend = TerminalFrontend::new(theme, keymap)?;
    let result = execute(&mut frontend);
    frontend.restore()?;
    result
}

fn print_chosen(chosen: &[Chosen], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(chosen)?);
        return Ok(());
    }
    for item in chosen {
        if item.quantity > 1 {
            println!("{} {}", item.quantity, item.name);
        } else {
            println!("{}", item.name);
        }
    }
    Ok(())
}
