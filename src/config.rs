use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ranoberead")]
#[command(about = "Runs the ranoberead api", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ranoberead")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

fn default_port() -> u16 {
    8080
}

fn default_database_name() -> String {
    "ranoberead".to_string()
}

fn default_allowed_origin() -> String {
    "http://localhost:5000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for App {
    fn default() -> Self {
        App {
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub uri: String,
    #[serde(default = "default_database_name")]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allowed_origin: default_allowed_origin(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub app: App,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Config {
    /// Resolves configuration in order: `--config`, the default config file
    /// when it exists, then the process environment.
    pub fn load(cli: &Cli) -> Result<Self> {
        let lookup = |name: &str| env::var(name).ok();
        let default_path = default_config_path();

        let mut cfg = match &cli.config_path {
            Some(path) => Config::from_file(Path::new(path), lookup)?,
            None if default_path.exists() => Config::from_file(&default_path, lookup)?,
            None => Config::from_env(lookup),
        };

        if let Some(port) = cli.port {
            cfg.app.port = port;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Config::from_yaml(&yaml, lookup)
    }

    pub fn from_yaml(yaml: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let expanded = substitute_env_vars(yaml, lookup);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);

        Config {
            app: App { port },
            database: DatabaseConfig {
                uri: lookup("MONGODB_URI").unwrap_or_default(),
                name: lookup("MONGODB_DATABASE").unwrap_or_else(default_database_name),
            },
            cors: CorsConfig {
                allowed_origin: lookup("CORS_ALLOWED_ORIGIN").unwrap_or_else(default_allowed_origin),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.uri.trim().is_empty() {
            bail!("MONGODB_URI not found");
        }
        if self.database.name.trim().is_empty() {
            bail!("database name is empty");
        }
        Ok(())
    }
}

/// Expands `${VAR}` and `${VAR:-default}`. Unknown variables without a
/// default become empty strings.
fn substitute_env_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);

        let token = &rest[start + 2..start + len];
        let value = match token.split_once(":-") {
            Some((name, default)) => lookup(name).unwrap_or_else(|| default.to_string()),
            None => lookup(token).unwrap_or_else(|| {
                tracing::warn!(variable = token, "environment variable not found");
                String::new()
            }),
        };
        out.push_str(&value);
        rest = &rest[start + len + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn substitutes_known_and_defaulted_variables() {
        let lookup = vars(&[("MONGODB_URI", "mongodb://db:27017")]);
        let out = substitute_env_vars("uri: ${MONGODB_URI}\nname: ${DB_NAME:-reader}\n", lookup);
        assert_eq!(out, "uri: mongodb://db:27017\nname: reader\n");
    }

    #[test]
    fn missing_variable_becomes_empty() {
        let out = substitute_env_vars("a${NOPE}b", vars(&[]));
        assert_eq!(out, "ab");
    }

    #[test]
    fn unterminated_token_is_left_alone() {
        let out = substitute_env_vars("port: ${PORT", vars(&[("PORT", "1")]));
        assert_eq!(out, "port: ${PORT");
    }

    #[test]
    fn parses_yaml_with_defaults() {
        let yaml = r#"
database:
  uri: ${MONGODB_URI}
"#;
        let cfg = Config::from_yaml(yaml, vars(&[("MONGODB_URI", "mongodb://localhost")])).unwrap();
        assert_eq!(cfg.database.uri, "mongodb://localhost");
        assert_eq!(cfg.database.name, "ranoberead");
        assert_eq!(cfg.app.port, 8080);
        assert_eq!(cfg.cors.allowed_origin, "http://localhost:5000");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn env_config_requires_uri() {
        let cfg = Config::from_env(vars(&[("PORT", "3000")]));
        assert_eq!(cfg.app.port, 3000);
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.to_string(), "MONGODB_URI not found");
    }

    #[test]
    fn env_config_reads_all_values() {
        let cfg = Config::from_env(vars(&[
            ("MONGODB_URI", "mongodb://m"),
            ("MONGODB_DATABASE", "reader"),
            ("CORS_ALLOWED_ORIGIN", "https://read.example"),
        ]));
        assert_eq!(cfg.database.name, "reader");
        assert_eq!(cfg.cors.allowed_origin, "https://read.example");
        assert!(cfg.validate().is_ok());
    }
}
