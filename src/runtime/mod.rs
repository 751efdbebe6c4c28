use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mediadesc::catalog::{Catalog, SqliteCatalog};
use mediadesc::config;
use mediadesc::library;
use mediadesc::media::{BuiltinPlaceholders, Normalizer};
use mediadesc::probe::FileProbe;

mod settings;

const USAGE: &str = "usage: mediadesc [--print-config] [DIR]";

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut print_config = false;
    let mut dir: Option<PathBuf> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--print-config" => print_config = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => dir = Some(PathBuf::from(arg)),
        }
    }

    let settings = settings::load_settings();
    if print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let dir = dir
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let catalog = open_catalog(&settings);
    let probe = FileProbe::from_settings(&settings.library);
    let normalizer = Normalizer::new(
        Arc::new(BuiltinPlaceholders),
        settings.locale.language.clone(),
    );

    let items = library::load(&dir, &settings.library, &probe, &normalizer, catalog);

    let mut out = io::stdout().lock();
    for media in &items {
        writeln!(
            out,
            "{}",
            library::format_line(media, &settings.listing.fields, &settings.listing.separator)
        )?;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

/// The configured catalog, or `None` to run without persistence.
fn open_catalog(settings: &config::Settings) -> Option<Arc<dyn Catalog>> {
    if !settings.catalog.enabled {
        return None;
    }
    let Some(path) = settings.catalog_path() else {
        tracing::warn!("no catalog path (set catalog.path or HOME), running without catalog");
        return None;
    };
    match SqliteCatalog::open(&path) {
        Ok(catalog) => Some(Arc::new(catalog)),
        Err(e) => {
            // The catalog is optional; listing still works without it.
            tracing::warn!("failed to open catalog {}, running without it: {e}", path.display());
            None
        }
    }
}
