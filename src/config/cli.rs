//! Command-line surface of the `linggan` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

#[derive(Debug, Parser)]
#[command(name = "linggan", version, about = "Linggan content service")]
pub struct CliArgs {
    /// Extra TOML file layered over `config/default.toml` and `linggan.toml`.
    #[arg(long = "config-file", env = "LINGGAN_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP service (default).
    Serve(Box<ServeArgs>),
    /// Inspect or edit the sensitive-word list directly.
    Words(WordsArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

/// Flags that win over every file and environment layer for `serve`.
#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Seconds to let in-flight requests finish after a shutdown signal.
    #[arg(long = "grace-seconds", value_name = "SECONDS")]
    pub grace_seconds: Option<u64>,

    /// trace | debug | info | warn | error
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    #[command(flatten)]
    pub database: DatabaseOverride,

    #[arg(long = "db-max-connections", value_name = "COUNT")]
    pub db_max_connections: Option<u32>,

    /// Age after which the word cache reloads on the next check.
    #[arg(long = "staleness-seconds", value_name = "SECONDS")]
    pub staleness_seconds: Option<u64>,

    #[arg(long = "admin-token", value_name = "TOKEN")]
    pub admin_token: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct DatabaseOverride {
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct WordsArgs {
    #[command(flatten)]
    pub database: DatabaseOverride,

    #[command(subcommand)]
    pub command: WordsCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum WordsCommand {
    /// Print `id<TAB>word` for every stored word.
    List,
    Add {
        #[arg(value_name = "WORD")]
        word: String,
    },
    Remove {
        #[arg(value_name = "ID")]
        id: i64,
    },
}
