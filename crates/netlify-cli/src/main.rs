//! netlify-deploy CLI
//!
//! Command-line interface for creating, listing and deploying Netlify sites

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::Result;
use eyre::{WrapErr, bail};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use netlify_api::{Deploy, Site};
use netlify_client::{DeployPayload, HttpResponse, NetlifyClient};

mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "netlify-deploy", version)]
#[command(about = "Create, list and deploy Netlify sites", long_about = None)]
struct Cli {
    /// Path to a config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Personal access token (overrides NETLIFY_AUTH_TOKEN and the config file)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a site
    #[command(name = "create-site")]
    CreateSite {
        /// Site name
        name: String,
    },

    /// List all sites
    #[command(name = "sites")]
    Sites,

    /// Print the id of a site
    #[command(name = "site-id")]
    SiteId {
        /// Site name
        name: String,
    },

    /// Deploy a zip archive or a file digest
    #[command(name = "deploy")]
    Deploy {
        /// Site id, or site name with --by-name
        site: String,

        /// Zip archive of the site
        #[arg(long)]
        zip: Option<PathBuf>,

        /// JSON file mapping file paths to SHA1 hashes
        #[arg(long)]
        digest: Option<PathBuf>,

        /// Resolve SITE as a site name
        #[arg(long)]
        by_name: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let found = Config::resolve(cli.config.as_deref())?;
    let config = found.clone().unwrap_or_default();

    let level = if cli.verbose { "debug" } else { config.log.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if found.is_none() {
        tracing::warn!("no config file found, using defaults");
    }

    let client = NetlifyClient::new(config.client_config(cli.token))?;

    match cli.command {
        Commands::CreateSite { name } => {
            let response = client.create_site(&name).await?;
            let site: Site = success(response)?.json()?;
            println!("created {} ({})", site.name, site.id);
        }
        Commands::Sites => {
            let response = client.list_sites().await?;
            let sites: Vec<Site> = success(response)?.json()?;
            for site in sites {
                let url = site.ssl_url().or(site.url()).unwrap_or_default();
                println!("{}\t{}\t{}", site.id, site.name, url);
            }
        }
        Commands::SiteId { name } => match client.get_site_id(&name).await? {
            Some(id) => println!("{id}"),
            None => bail!("site '{name}' not found"),
        },
        Commands::Deploy {
            site,
            zip,
            digest,
            by_name,
        } => {
            let site_id = if by_name {
                match client.get_site_id(&site).await? {
                    Some(id) => id,
                    None => bail!("site '{site}' not found"),
                }
            } else {
                site
            };

            let payload = load_payload(zip.as_deref(), digest.as_deref())?;
            let response = client.deploy_site(&site_id, payload).await?;
            let deploy: Deploy = success(response)?.json()?;

            println!(
                "deploy {} {}",
                deploy.id,
                deploy.state.as_deref().unwrap_or("unknown")
            );
            if !deploy.required.is_empty() {
                println!("{} file(s) still to upload", deploy.required.len());
            }
        }
    }

    Ok(())
}

/// Read the archive and digest files given on the command line
fn load_payload(zip: Option<&Path>, digest: Option<&Path>) -> Result<DeployPayload> {
    let archive = zip
        .map(|path| {
            std::fs::File::open(path).wrap_err_with(|| format!("opening {}", path.display()))
        })
        .transpose()?;

    // Unparsable digest text is passed on as a string so it is rejected as a
    // digest type error, after the archive has been checked.
    let digest = digest
        .map(|path| -> Result<Value> {
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading {}", path.display()))?;
            Ok(serde_json::from_str(&content).unwrap_or(Value::String(content)))
        })
        .transpose()?;

    Ok(DeployPayload::from_parts(archive, digest)?)
}

/// Turn a non-2xx response into an error carrying the body
fn success(response: HttpResponse) -> Result<HttpResponse> {
    if !response.is_success() {
        bail!("API error ({}): {}", response.status, response.text());
    }
    Ok(response)
}
