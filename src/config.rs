use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bookmarks-api")]
#[command(about = "Runs the bookmarks REST service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookmarks")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE: &str = "bookmarks.db";

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    database: String,
    port: u16,
    /// When set, every `/api` request must carry `Authorization: Bearer <token>`.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub turso_url: Option<String>,
    #[serde(default)]
    pub turso_auth_token: Option<String>,
    #[serde(default = "default_sync_interval")]
    pub sync_interval_seconds: u64,
}

fn default_sync_interval() -> u64 {
    60
}

impl Default for App {
    fn default() -> Self {
        App {
            database: DEFAULT_DATABASE.to_string(),
            port: DEFAULT_PORT,
            api_token: None,
            turso_url: None,
            turso_auth_token: None,
            sync_interval_seconds: default_sync_interval(),
        }
    }
}

impl App {
    pub fn get_db(&self) -> &str {
        &self.database
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub app: App,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let cfg = Config::load_config(path)?;
        Ok(cfg)
    }

    /// Builds a config purely from the process environment.
    pub fn from_env() -> Result<Self> {
        let mut app = App::default();

        if let Some(port) = non_empty_var("PORT") {
            app.port = port.parse().with_context(|| format!("invalid PORT '{port}'"))?;
        }
        if let Some(database) = non_empty_var("DB_PATH") {
            app.database = database;
        }
        if let Some(interval) = non_empty_var("SYNC_INTERVAL_SECONDS") {
            app.sync_interval_seconds = interval
                .parse()
                .with_context(|| format!("invalid SYNC_INTERVAL_SECONDS '{interval}'"))?;
        }
        app.api_token = non_empty_var("API_TOKEN");
        app.turso_url = non_empty_var("TURSO_URL");
        app.turso_auth_token = non_empty_var("TURSO_AUTH_TOKEN");

        Ok(Config { app })
    }

    /// Picks the config source: an explicit file, else the default file if it
    /// exists, else the environment. Also returns the data directory the
    /// database path is resolved against.
    pub fn resolve(explicit: Option<&str>) -> Result<(Self, PathBuf)> {
        match explicit {
            Some(path) => {
                let dir = Path::new(path)
                    .parent()
                    .map(|p| p.to_path_buf())
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| PathBuf::from("."));
                Ok((Config::new(path)?, dir))
            }
            None => {
                let default_path = default_config_path();
                if default_path.is_file() {
                    let path = default_path
                        .to_str()
                        .context("config path is not valid UTF-8")?;
                    Ok((Config::new(path)?, default_config_dir()))
                } else {
                    Ok((Config::from_env()?, PathBuf::from(".")))
                }
            }
        }
    }

    fn load_config(path: &str) -> Result<Config> {
        let yaml_str =
            fs::read_to_string(path).with_context(|| format!("failed to read config file {path}"))?;
        let yaml_with_env = Config::substitute_env_vars(&yaml_str)?;
        let mut config: Config = serde_yaml::from_str(&yaml_with_env)?;

        // substitution cannot tell an unset ${VAR} from one set to "", both
        // arrive here as "" and both mean "not configured"
        let app = &mut config.app;
        app.api_token = app.api_token.take().filter(|v| !v.is_empty());
        app.turso_url = app.turso_url.take().filter(|v| !v.is_empty());
        app.turso_auth_token = app.turso_auth_token.take().filter(|v| !v.is_empty());

        Ok(config)
    }

    /// Expands `${VAR}` and `${VAR:-default}` placeholders. An unterminated
    /// placeholder ends expansion and is left as written.
    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut out = String::with_capacity(yaml_str.len());
        let mut rest = yaml_str;

        while let Some(open) = rest.find("${") {
            let Some(len) = rest[open..].find('}') else {
                break;
            };
            out.push_str(&rest[..open]);
            out.push_str(&expand_placeholder(&rest[open + 2..open + len]));
            rest = &rest[open + len + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn expand_placeholder(expr: &str) -> String {
    match expr.split_once(":-") {
        Some((name, default)) => env::var(name).unwrap_or_else(|_| default.to_string()),
        None => env::var(expr).unwrap_or_else(|_| {
            tracing::warn!(var = expr, "environment variable not set, substituting an empty string");
            String::new()
        }),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
