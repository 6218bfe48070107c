mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use folio_core::config::Config;
use folio_core::Page;
use std::path::Path;

fn load_config(path: Option<&Path>) -> Config {
    let mut config = Config::load_or_default(path);
    config.apply_env();
    config
}

fn open_db(config: &Config) -> Result<folio_db::pool::DbPool> {
    folio_db::pool::init_pool(&config.database).with_context(|| {
        format!("Failed to open database at {}", config.database.path.display())
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; variables may come from the environment.
    let dotenv = dotenvy::dotenv();

    // Respect RUST_LOG if set, otherwise pick defaults based on --verbose.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "folio=trace,folio_server=trace,folio_storage=debug,folio_db=debug,folio_core=debug,tower_http=debug".to_string()
        } else {
            "folio=info,folio_server=info,folio_storage=info,folio_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    match cli.command {
        Commands::Start { host, port } => {
            let mut config = load_config(cli.config.as_deref());
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(folio_server::start(config))?;
            Ok(())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("folio {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::CreateUser {
            username,
            password,
            role,
        } => {
            let config = load_config(cli.config.as_deref());
            let conn = folio_db::pool::get_conn(&open_db(&config)?)?;
            let user = folio_db::queries::users::create_user(&conn, &username, &password, &role)?;
            println!("Created user {} (id {}, role {})", user.username, user.id, user.role);
            Ok(())
        }
        Commands::AddImage {
            url,
            slot_type,
            pages,
        } => {
            let pages = pages
                .iter()
                .map(|p| p.parse::<Page>())
                .collect::<folio_core::Result<Vec<_>>>()?;
            let tags: Vec<&str> = pages.iter().map(Page::as_str).collect();

            let config = load_config(cli.config.as_deref());
            let conn = folio_db::pool::get_conn(&open_db(&config)?)?;
            let image =
                folio_db::queries::images::create_image(&conn, &url, slot_type.as_deref(), &tags)?;
            println!("{}", serde_json::to_string_pretty(&image_json(&image))?);
            Ok(())
        }
    }
}

fn image_json(image: &folio_db::models::ImageRecord) -> serde_json::Value {
    serde_json::json!({
        "id": image.id,
        "url": image.url,
        "type": image.slot_type,
        "page": image.pages,
    })
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            Config::load(p).with_context(|| format!("Invalid config file {}", p.display()))?
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("✓ Configuration is valid");
    } else {
        println!("Configuration loaded with {} warning(s):", warnings.len());
        for warning in &warnings {
            println!("  - {warning}");
        }
    }
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Database: {}", config.database.path.display());
    println!(
        "  Storage: {:?} bucket '{}'",
        config.storage.backend, config.storage.bucket
    );

    Ok(())
}
