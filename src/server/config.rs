use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Session server for Tapioca City Racers
#[derive(Parser, Debug, Clone)]
#[command(name = "server", version, about)]
pub struct ServerArgs {
    /// Interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory served for non-API paths
    #[arg(long, default_value = "public")]
    pub root: PathBuf,
}

#[derive(Resource, Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_root: PathBuf,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            static_root: args.root,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_root: PathBuf::from("public"),
        }
    }
}
