//! Runtime settings.
//!
//! Layers, lowest first: built-in defaults, `config/default.toml`,
//! `linggan.toml`, `--config-file`, `LINGGAN__*` environment variables, and
//! finally command-line flags. The merged tree is deserialised into
//! [`RawSettings`] and validated into [`Settings`].

mod cli;

pub use cli::{
    CliArgs, Command, DatabaseOverride, ServeArgs, ServeOverrides, WordsArgs, WordsCommand,
};

use std::{
    net::SocketAddr,
    num::{NonZeroU32, NonZeroU64},
    str::FromStr,
    time::Duration,
};

use clap::Parser;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const ENV_PREFIX: &str = "LINGGAN";
const CONFIG_FILES: [&str; 2] = ["config/default", "linggan"];

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub moderation: ModerationSettings,
    pub admin: AdminSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub graceful_shutdown: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// Required by every command that touches the word store.
    pub url: Option<String>,
    pub max_connections: NonZeroU32,
}

#[derive(Debug, Clone)]
pub struct ModerationSettings {
    pub staleness_seconds: NonZeroU64,
}

#[derive(Debug, Clone)]
pub struct AdminSettings {
    /// `None` locks every admin route.
    pub token: Option<String>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Parse the command line and resolve settings for the chosen command.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder();
    for name in CONFIG_FILES {
        builder = builder.add_source(File::with_name(name).required(false));
    }
    if let Some(path) = cli.config_file.as_deref() {
        builder = builder.add_source(File::from(path));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    resolve(builder, cli.command.as_ref())
}

/// Add defaults underneath and command-line flags on top, then validate.
fn resolve(
    builder: ConfigBuilder<DefaultState>,
    command: Option<&Command>,
) -> Result<Settings, LoadError> {
    let builder = builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000_u64)?
        .set_default("server.graceful_shutdown_seconds", 30_u64)?
        .set_default("logging.level", "info")?
        .set_default("logging.json", false)?
        .set_default("database.max_connections", 8_u64)?
        .set_default("moderation.staleness_seconds", 3600_u64)?;

    let builder = match command {
        Some(Command::Serve(args)) => serve_flags(builder, &args.overrides)?,
        Some(Command::Words(args)) => database_flags(builder, &args.database)?,
        None => builder,
    };

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    Settings::try_from(raw)
}

fn serve_flags(
    builder: ConfigBuilder<DefaultState>,
    flags: &ServeOverrides,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder
        .set_override_option("server.host", flags.host.clone())?
        .set_override_option("server.port", flags.port.map(u64::from))?
        .set_override_option("server.graceful_shutdown_seconds", flags.grace_seconds)?
        .set_override_option("logging.level", flags.log_level.clone())?
        .set_override_option("logging.json", flags.log_json)?
        .set_override_option(
            "database.max_connections",
            flags.db_max_connections.map(u64::from),
        )?
        .set_override_option("moderation.staleness_seconds", flags.staleness_seconds)?
        .set_override_option("admin.token", flags.admin_token.clone())?;
    database_flags(builder, &flags.database)
}

fn database_flags(
    builder: ConfigBuilder<DefaultState>,
    flags: &DatabaseOverride,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder.set_override_option("database.url", flags.database_url.clone())
}

/// The merged configuration tree before validation.
#[derive(Debug, Deserialize)]
struct RawSettings {
    server: RawServer,
    logging: RawLogging,
    database: RawDatabase,
    moderation: RawModeration,
    #[serde(default)]
    admin: RawAdmin,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    host: String,
    port: u16,
    graceful_shutdown_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct RawLogging {
    level: String,
    json: bool,
}

#[derive(Debug, Deserialize)]
struct RawDatabase {
    url: Option<String>,
    max_connections: u32,
}

#[derive(Debug, Deserialize)]
struct RawModeration {
    staleness_seconds: u64,
}

#[derive(Debug, Default, Deserialize)]
struct RawAdmin {
    token: Option<String>,
}

impl TryFrom<RawSettings> for Settings {
    type Error = LoadError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let RawSettings {
            server,
            logging,
            database,
            moderation,
            admin,
        } = raw;

        if server.port == 0 {
            return Err(LoadError::invalid("server.port", "must be greater than zero"));
        }
        let addr = format!("{}:{}", server.host, server.port)
            .parse::<SocketAddr>()
            .map_err(|err| LoadError::invalid("server.host", err.to_string()))?;
        if server.graceful_shutdown_seconds == 0 {
            return Err(LoadError::invalid(
                "server.graceful_shutdown_seconds",
                "must be greater than zero",
            ));
        }

        let level = LevelFilter::from_str(logging.level.trim())
            .map_err(|err| LoadError::invalid("logging.level", err.to_string()))?;
        let format = if logging.json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };

        let max_connections = NonZeroU32::new(database.max_connections).ok_or_else(|| {
            LoadError::invalid("database.max_connections", "must be greater than zero")
        })?;
        let staleness_seconds = NonZeroU64::new(moderation.staleness_seconds).ok_or_else(|| {
            LoadError::invalid("moderation.staleness_seconds", "must be greater than zero")
        })?;

        Ok(Self {
            server: ServerSettings {
                addr,
                graceful_shutdown: Duration::from_secs(server.graceful_shutdown_seconds),
            },
            logging: LoggingSettings { level, format },
            database: DatabaseSettings {
                url: present(database.url),
                max_connections,
            },
            moderation: ModerationSettings { staleness_seconds },
            admin: AdminSettings {
                token: present(admin.token),
            },
        })
    }
}

/// Treat blank strings like absent ones.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve(overrides: ServeOverrides) -> Command {
        Command::Serve(Box::new(ServeArgs { overrides }))
    }

    #[test]
    fn built_in_defaults_resolve() {
        let settings = resolve(Config::builder(), None).unwrap();

        assert_eq!(settings.server.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
        assert_eq!(settings.logging.level, LevelFilter::INFO);
        assert_eq!(settings.logging.format, LogFormat::Compact);
        assert_eq!(settings.database.max_connections.get(), 8);
        assert_eq!(settings.moderation.staleness_seconds.get(), 3600);
        assert!(settings.database.url.is_none());
        assert!(settings.admin.token.is_none());
    }

    #[test]
    fn flags_beat_file_values() {
        let from_file = Config::builder()
            .set_override("server.port", 4000_u64)
            .unwrap()
            .set_override("moderation.staleness_seconds", 600_u64)
            .unwrap();
        let command = serve(ServeOverrides {
            port: Some(4321),
            log_level: Some("debug".into()),
            staleness_seconds: Some(60),
            ..Default::default()
        });

        let settings = resolve(from_file, Some(&command)).unwrap();

        assert_eq!(settings.server.addr.port(), 4321);
        assert_eq!(settings.logging.level, LevelFilter::DEBUG);
        assert_eq!(settings.moderation.staleness_seconds.get(), 60);
    }

    #[test]
    fn json_flag_switches_log_format() {
        let command = serve(ServeOverrides {
            log_json: Some(true),
            ..Default::default()
        });

        let settings = resolve(Config::builder(), Some(&command)).unwrap();
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn zero_staleness_is_rejected() {
        let command = serve(ServeOverrides {
            staleness_seconds: Some(0),
            ..Default::default()
        });

        let err = resolve(Config::builder(), Some(&command)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                key: "moderation.staleness_seconds",
                ..
            }
        ));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let command = serve(ServeOverrides {
            log_level: Some("loud".into()),
            ..Default::default()
        });

        let err = resolve(Config::builder(), Some(&command)).unwrap_err();
        assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
    }

    #[test]
    fn blank_admin_token_locks_admin_routes() {
        let command = serve(ServeOverrides {
            admin_token: Some("   ".into()),
            ..Default::default()
        });

        let settings = resolve(Config::builder(), Some(&command)).unwrap();
        assert!(settings.admin.token.is_none());
    }

    #[test]
    fn words_command_only_takes_the_database_url() {
        let args = CliArgs::parse_from([
            "linggan",
            "words",
            "--database-url",
            "postgres://example",
            "add",
            "badword",
        ]);

        let Some(Command::Words(words)) = args.command.as_ref() else {
            panic!("expected the words command");
        };
        assert!(matches!(
            &words.command,
            WordsCommand::Add { word } if word == "badword"
        ));

        let settings = resolve(Config::builder(), args.command.as_ref()).unwrap();
        assert_eq!(settings.database.url.as_deref(), Some("postgres://example"));
    }

    #[test]
    fn words_remove_parses_the_id() {
        let args = CliArgs::parse_from(["linggan", "words", "remove", "42"]);

        assert!(matches!(
            args.command,
            Some(Command::Words(WordsArgs {
                command: WordsCommand::Remove { id: 42 },
                ..
            }))
        ));
    }

    #[test]
    fn bare_invocation_has_no_subcommand() {
        let args = CliArgs::parse_from(["linggan"]);
        assert!(args.command.is_none());
    }
}
