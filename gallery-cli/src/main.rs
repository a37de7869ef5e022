mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gallery_core::{Gallery, StorageConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gallery")]
#[command(about = "Image gallery CLI for a blob storage container", long_about = None)]
struct Cli {
    #[command(flatten)]
    credentials: Credentials,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Credentials {
    /// Storage account name
    #[arg(long, env = "STORAGE_ACCOUNT", default_value = "", global = true)]
    account: String,

    /// Shared access signature with read/write/delete/list on the container
    #[arg(long, env = "STORAGE_SAS", default_value = "", hide_env_values = true, global = true)]
    sas: String,

    /// Container name
    #[arg(long, env = "STORAGE_CONTAINER", default_value = "", global = true)]
    container: String,

    /// Blob service endpoint override (e.g. Azurite)
    #[arg(long, env = "STORAGE_ENDPOINT", global = true)]
    endpoint: Option<String>,
}

impl Credentials {
    fn into_gallery(self) -> Result<Gallery> {
        let endpoint = self.endpoint;
        let config = StorageConfig::new(self.account, self.sas, self.container).map(|config| {
            match endpoint {
                Some(endpoint) if !endpoint.trim().is_empty() => config.with_endpoint(endpoint),
                _ => config,
            }
        });

        Ok(Gallery::from_config(config)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List every image in the container
    List,

    /// Upload image files, or every image under a directory
    Upload {
        /// Directories or files to upload
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Delete an image by its stored name
    Delete {
        /// Stored blob name, as shown by `gallery list`
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_cli=info,gallery_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let gallery = cli.credentials.into_gallery()?;

    match cli.command {
        Commands::List => commands::list::execute(&gallery).await?,
        Commands::Upload { paths } => commands::upload::execute(&gallery, paths).await?,
        Commands::Delete { name } => commands::delete::execute(&gallery, &name).await?,
    }

    Ok(())
}
