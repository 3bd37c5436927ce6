use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug, Default)]
#[command(name = "formbuilder")]
#[command(about = "Serve an input form generated from a PocketBase collection schema")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Address to bind (overrides FORMBUILDER_HOST)")]
    pub host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides FORMBUILDER_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "PocketBase base URL (overrides PB_URL)")]
    pub backend_url: Option<String>,

    #[arg(long, help = "Target collection name (overrides PB_COLLECTION)")]
    pub collection: Option<String>,
}

impl Cli {
    /// Flags given on the command line win over the environment.
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.backend_url {
            config.backend.base_url = url;
        }
        if let Some(collection) = self.collection {
            config.backend.collection = collection;
        }
        config
    }
}
