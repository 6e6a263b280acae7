//! Configuration loading: optional TOML file, then environment overrides.

use crate::schema::Config;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use tweetgraph_common::{Result, TweetGraphError};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tweetgraph.toml";
/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "TWEETGRAPH_CONFIG";
/// Environment variable holding the OAuth client id.
pub const CLIENT_ID_ENV: &str = "TWITTER_CLIENTID";
/// Environment variable holding the OAuth client secret.
pub const CLIENT_SECRET_ENV: &str = "TWITTER_CLIENTSECRET";
/// Environment variable overriding the handle list path.
pub const INPUT_PATH_ENV: &str = "TWEETGRAPH_INPUT";
/// Environment variable overriding the output directory.
pub const OUTPUT_DIR_ENV: &str = "TWEETGRAPH_OUTPUT";
/// Environment variable overriding the failure policy.
pub const FAILURE_POLICY_ENV: &str = "TWEETGRAPH_FAILURE_POLICY";
/// Environment variable overriding the log filter.
pub const LOG_LEVEL_ENV: &str = "RUST_LOG";

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    required: bool,
}

impl ConfigLoader {
    /// Loader for an explicit file that must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            required: true,
        }
    }

    /// Loader that uses `$TWEETGRAPH_CONFIG` if set, otherwise an optional
    /// `tweetgraph.toml` in the working directory.
    #[must_use]
    pub fn discover() -> Self {
        match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::new(path),
            None => Self {
                path: Some(PathBuf::from(DEFAULT_CONFIG_FILE)),
                required: false,
            },
        }
    }

    /// Loader that ignores files and starts from defaults.
    #[must_use]
    pub const fn defaults_only() -> Self {
        Self {
            path: None,
            required: false,
        }
    }

    /// The file this loader reads, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads the file (if present) and applies process environment overrides.
    pub fn load(&self) -> Result<Config> {
        self.load_with_env(|key| env::var(key).ok())
    }

    /// Loads the file (if present) and applies overrides from `lookup`.
    pub fn load_with_env<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.path {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                let text = fs::read_to_string(path).map_err(|e| {
                    TweetGraphError::config_with_source(
                        format!("failed to read {}", path.display()),
                        e,
                    )
                })?;
                Self::from_toml_str(&text)?
            }
            Some(path) if self.required => {
                return Err(TweetGraphError::config(format!(
                    "configuration file {} does not exist",
                    path.display()
                )));
            }
            _ => {
                debug!("No configuration file, starting from defaults");
                Config::default()
            }
        };

        apply_env_overrides(&mut config, lookup)?;
        Ok(config)
    }

    /// Parses a TOML document; missing sections fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Config> {
        Ok(toml::from_str(text)?)
    }
}

/// Overlays environment values on top of `config`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(client_id) = non_empty(CLIENT_ID_ENV) {
        config.twitter.client_id = client_id;
    }
    if let Some(client_secret) = non_empty(CLIENT_SECRET_ENV) {
        config.twitter.client_secret = client_secret;
    }
    if let Some(path) = non_empty(INPUT_PATH_ENV) {
        config.input.path = PathBuf::from(path);
    }
    if let Some(directory) = non_empty(OUTPUT_DIR_ENV) {
        config.output.directory = PathBuf::from(directory);
    }
    if let Some(policy) = non_empty(FAILURE_POLICY_ENV) {
        config.run.failure_policy = policy.parse()?;
    }
    if let Some(level) = non_empty(LOG_LEVEL_ENV) {
        config.logging.level = level;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailurePolicy;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_document_is_all_defaults() {
        let config = ConfigLoader::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = ConfigLoader::from_toml_str(
            r#"
            [output]
            directory = "charts"
            caption = true

            [run]
            failure_policy = "continue"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.directory, PathBuf::from("charts"));
        assert!(config.output.caption);
        assert_eq!(config.output.width, 1024);
        assert_eq!(config.run.failure_policy, FailurePolicy::Continue);
        assert_eq!(config.twitter.page_size, 200);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = ConfigLoader::from_toml_str("[output]\ncolour = \"red\"\n");
        assert!(matches!(result, Err(TweetGraphError::Config { .. })));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = ConfigLoader::from_toml_str(
            "[twitter]\nclient_id = \"from-file\"\nclient_secret = \"file-secret\"\n",
        )
        .unwrap();

        apply_env_overrides(
            &mut config,
            env_of(&[
                (CLIENT_ID_ENV, "from-env"),
                (CLIENT_SECRET_ENV, "   "),
                (OUTPUT_DIR_ENV, "/tmp/charts"),
                (FAILURE_POLICY_ENV, "Continue"),
            ]),
        )
        .unwrap();

        assert_eq!(config.twitter.client_id, "from-env");
        assert_eq!(config.twitter.client_secret, "file-secret");
        assert_eq!(config.output.directory, PathBuf::from("/tmp/charts"));
        assert_eq!(config.run.failure_policy, FailurePolicy::Continue);
    }

    #[test]
    fn test_bad_failure_policy_in_env() {
        let mut config = Config::default();
        let result = apply_env_overrides(&mut config, env_of(&[(FAILURE_POLICY_ENV, "retry")]));
        assert!(matches!(result, Err(TweetGraphError::Validation { .. })));
    }

    #[test]
    fn test_missing_required_file() {
        let loader = ConfigLoader::new("/definitely/not/here/tweetgraph.toml");
        let result = loader.load_with_env(|_| None);
        assert!(matches!(result, Err(TweetGraphError::Config { .. })));
    }

    #[test]
    fn test_defaults_only_loader() {
        let config = ConfigLoader::defaults_only()
            .load_with_env(env_of(&[(CLIENT_ID_ENV, "id")]))
            .unwrap();
        assert_eq!(config.twitter.client_id, "id");
        assert_eq!(config.input.path, PathBuf::from("input.csv"));
    }
}
