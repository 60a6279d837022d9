//! Loader for mixtape configuration with YAML + environment overlays.
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. built-in defaults (credentials point at `${SPOTIFY_*}` variables)
//! 2. `~/.config/mixtape/mixtape.yaml`, when present
//! 3. files and inline snippets added with [`MixtapeConfigLoader::with_file`] /
//!    [`MixtapeConfigLoader::with_yaml_str`]
//! 4. `MIXTAPE__SECTION__KEY` environment variables
//!
//! `${VAR}` placeholders are expanded after merging.
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

const DEFAULTS_YAML: &str = r#"
spotify:
  client_id: "${SPOTIFY_CLIENT_ID}"
  client_secret: "${SPOTIFY_CLIENT_SECRET}"
  refresh_token: "${SPOTIFY_REFRESH_TOKEN}"
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct MixtapeConfig {
    pub spotify: SpotifyConfig,
    #[serde(default)]
    pub playlist: PlaylistConfig,
    #[serde(default)]
    pub forem: ForemConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default = "default_spotify_api")]
    pub api_base: String,
    #[serde(default = "default_spotify_accounts")]
    pub accounts_base: String,
}

/// Target playlist, either by id or by share URL. The id wins when both are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistConfig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForemConfig {
    #[serde(default = "default_forem_base")]
    pub base_url: String,
    #[serde(default = "default_forem_username")]
    pub username: String,
    #[serde(default = "default_forem_tag")]
    pub tag: String,
    #[serde(default = "default_article_limit", deserialize_with = "native_or_text")]
    pub article_limit: usize,
    #[serde(default = "default_rate_limit_delay", deserialize_with = "native_or_text")]
    pub rate_limit_delay_secs: u64,
}

impl Default for ForemConfig {
    fn default() -> Self {
        Self {
            base_url: default_forem_base(),
            username: default_forem_username(),
            tag: default_forem_tag(),
            article_limit: default_article_limit(),
            rate_limit_delay_secs: default_rate_limit_delay(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    /// Report what would be added without touching the playlist.
    #[serde(default, deserialize_with = "native_or_text")]
    pub dry_run: bool,
    /// Also report matches that are already in the playlist.
    #[serde(default, deserialize_with = "native_or_text")]
    pub show_all_matches: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// `text` or `json`.
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default = "default_true", deserialize_with = "native_or_text")]
    pub stderr: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            dir: None,
            format: None,
            stderr: true,
        }
    }
}

fn default_spotify_api() -> String {
    "https://api.spotify.com/v1/".into()
}
fn default_spotify_accounts() -> String {
    "https://accounts.spotify.com/".into()
}
fn default_forem_base() -> String {
    "https://music.forem.com/".into()
}
fn default_forem_username() -> String {
    "musicfrorem".into()
}
fn default_forem_tag() -> String {
    "musicmonday".into()
}
fn default_article_limit() -> usize {
    10
}
fn default_rate_limit_delay() -> u64 {
    2
}
fn default_true() -> bool {
    true
}

/// Environment values stay strings (playlist ids and secrets must not turn
/// into numbers), so typed fields accept either the native value or its text.
fn native_or_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Native(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Native(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl SpotifyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("spotify.client_id", &self.client_id),
            ("spotify.client_secret", &self.client_secret),
            ("spotify.refresh_token", &self.refresh_token),
        ] {
            if value.trim().is_empty() || value.contains("${") {
                return Err(ConfigError::Message(format!(
                    "{name} is not set (unresolved value: {value:?})"
                )));
            }
        }
        Ok(())
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mixtape").join("mixtape.yaml"))
}

/// Builder hiding the `config` crate wiring.
pub struct MixtapeConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: String,
}

impl Default for MixtapeConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MixtapeConfigLoader {
    /// Start from the built-in defaults plus the per-user config file, if any.
    ///
    /// ```
    /// use mixtape_config::MixtapeConfigLoader;
    ///
    /// let cfg = MixtapeConfigLoader::bare()
    ///     .with_yaml_str(r#"
    /// spotify:
    ///   client_id: "id"
    ///   client_secret: "secret"
    ///   refresh_token: "refresh"
    /// "#)
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(cfg.forem.article_limit, 10);
    /// assert!(!cfg.run.dry_run);
    /// ```
    pub fn new() -> Self {
        let loader = Self::bare().with_yaml_str(DEFAULTS_YAML);
        match user_config_path() {
            Some(path) => loader.with_optional_file(path),
            None => loader,
        }
    }

    /// No defaults and no user file; only what the caller adds plus env overrides.
    pub fn bare() -> Self {
        Self {
            builder: Config::builder(),
            env_prefix: "MIXTAPE".into(),
        }
    }

    /// Use a different environment prefix (mainly for tests).
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`Self::with_file`], but a missing file is skipped.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// Environment variables such as `MIXTAPE__RUN__DRY_RUN=true` override file
    /// values; `${VAR}` placeholders are expanded before typing.
    ///
    /// ```
    /// use mixtape_config::MixtapeConfigLoader;
    ///
    /// unsafe { std::env::set_var("DOC_REFRESH", "from-env"); }
    ///
    /// let cfg = MixtapeConfigLoader::bare()
    ///     .with_yaml_str(r#"
    /// spotify:
    ///   client_id: "id"
    ///   client_secret: "secret"
    ///   refresh_token: "${DOC_REFRESH}"
    /// playlist:
    ///   url: "https://open.spotify.com/playlist/abc123"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(cfg.spotify.refresh_token, "from-env");
    /// assert_eq!(cfg.playlist.url.as_deref(), Some("https://open.spotify.com/playlist/abc123"));
    ///
    /// unsafe { std::env::remove_var("DOC_REFRESH"); }
    /// ```
    pub fn load(self) -> Result<MixtapeConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .separator("__")
                    .try_parsing(false),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: MixtapeConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.spotify.validate()?;
        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_inside_nested_objects() {
        temp_env::with_vars([("CID", Some("abc")), ("SECRET", Some("xyz"))], || {
            let mut v = json!({
                "spotify": { "client_id": "${CID}", "client_secret": "$SECRET" },
                "run": { "dry_run": true }
            });
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!({
                    "spotify": { "client_id": "abc", "client_secret": "xyz" },
                    "run": { "dry_run": true }
                })
            );
        });
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unresolved_credentials_are_rejected() {
        let spotify = SpotifyConfig {
            client_id: "${SPOTIFY_CLIENT_ID}".into(),
            client_secret: "s".into(),
            refresh_token: "r".into(),
            api_base: default_spotify_api(),
            accounts_base: default_spotify_accounts(),
        };
        let err = spotify.validate().unwrap_err();
        assert!(err.to_string().contains("spotify.client_id"));
    }

    #[test]
    fn typed_fields_accept_text() {
        let run: RunConfig =
            serde_json::from_value(json!({ "dry_run": "true", "show_all_matches": false })).unwrap();
        assert!(run.dry_run);
        assert!(!run.show_all_matches);

        let forem: ForemConfig = serde_json::from_value(json!({ "article_limit": " 4 " })).unwrap();
        assert_eq!(forem.article_limit, 4);

        assert!(serde_json::from_value::<RunConfig>(json!({ "dry_run": "maybe" })).is_err());
    }

    #[test]
    fn forem_defaults_match_the_music_monday_feed() {
        let forem = ForemConfig::default();
        assert_eq!(forem.username, "musicfrorem");
        assert_eq!(forem.tag, "musicmonday");
        assert_eq!(forem.rate_limit_delay_secs, 2);
    }
}
