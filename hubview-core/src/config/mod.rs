pub mod keys;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub use keys::{Command, KeysConfig};

use crate::github::ClientConfig;

pub const APP_NAME: &str = "hubview";

pub const DEFAULT_PATH: &str = "the-road-to-learn-react/the-road-to-learn-react";
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

fn config_dir() -> PathBuf {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return PathBuf::from(xdg_config_home).join(APP_NAME);
        }
        dirs::home_dir()
            .expect("Unable to find home directory")
            .join(".config")
            .join(APP_NAME)
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .expect("Unable to find config directory")
            .join(APP_NAME)
    }
}

pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Repository shown on startup, as `organization/repository`. For example:
    /// ```toml
    /// default_path = "rust-lang/rust"
    /// ```
    #[serde(default = "Config::default_path")]
    pub default_path: String,

    /// GitHub API connection settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Key binding configuration.
    /// To unbind an inherited key mapping, assign it to `noop`.
    #[serde(default)]
    pub keys: KeysConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_path: Self::default_path(),
            github: GitHubConfig::default(),
            theme: ThemeConfig::default(),
            keys: KeysConfig::default(),
        }
    }
}

impl Config {
    fn default_path() -> String {
        DEFAULT_PATH.to_string()
    }

    /// Build the transport configuration, reading the token from the environment once.
    pub fn client_config(&self) -> ClientConfig {
        let token = std::env::var(&self.github.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty());
        if token.is_none() {
            log::warn!(
                "{} is not set; requests will be sent unauthenticated",
                self.github.token_env
            );
        }
        ClientConfig::new(self.github.endpoint.clone(), token)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// GraphQL endpoint (default: `https://api.github.com/graphql`).
    #[serde(default = "GitHubConfig::default_endpoint")]
    pub endpoint: String,
    /// Environment variable holding the personal access token (default: `GITHUB_TOKEN`).
    /// The token is read once at startup and sent as `Authorization: bearer <token>`.
    #[serde(default = "GitHubConfig::default_token_env")]
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            token_env: Self::default_token_env(),
        }
    }
}

impl GitHubConfig {
    fn default_endpoint() -> String {
        DEFAULT_ENDPOINT.to_string()
    }
    fn default_token_env() -> String {
        DEFAULT_TOKEN_ENV.to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Primary accent color (default: "magenta").
    #[serde(
        default = "ThemeConfig::default_accent",
        deserialize_with = "deserialize_color"
    )]
    pub accent: ThemeColor,
    /// Link color for organization, repository and issue URLs (default: "cyan").
    #[serde(
        default = "ThemeConfig::default_link",
        deserialize_with = "deserialize_color"
    )]
    pub link: ThemeColor,
    /// Error color (default: "red").
    #[serde(
        default = "ThemeConfig::default_error",
        deserialize_with = "deserialize_color"
    )]
    pub error: ThemeColor,
    /// Muted/dim text color (default: "gray").
    #[serde(
        default = "ThemeConfig::default_muted",
        deserialize_with = "deserialize_color"
    )]
    pub muted: ThemeColor,
    /// Border color (default: "gray").
    #[serde(
        default = "ThemeConfig::default_border",
        deserialize_with = "deserialize_color"
    )]
    pub border: ThemeColor,
    /// Hint/key binding color (default: "blue").
    #[serde(
        default = "ThemeConfig::default_hint",
        deserialize_with = "deserialize_color"
    )]
    pub hint: ThemeColor,
    /// Foreground color for the selected issue (default: "black").
    #[serde(
        default = "ThemeConfig::default_highlight_fg",
        deserialize_with = "deserialize_color"
    )]
    pub highlight_fg: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: Self::default_accent(),
            link: Self::default_link(),
            error: Self::default_error(),
            muted: Self::default_muted(),
            border: Self::default_border(),
            hint: Self::default_hint(),
            highlight_fg: Self::default_highlight_fg(),
        }
    }
}

impl ThemeConfig {
    fn default_accent() -> ThemeColor {
        ThemeColor::Named(NamedColor::Magenta)
    }
    fn default_link() -> ThemeColor {
        ThemeColor::Named(NamedColor::Cyan)
    }
    fn default_error() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
    fn default_muted() -> ThemeColor {
        ThemeColor::Named(NamedColor::Gray)
    }
    fn default_border() -> ThemeColor {
        ThemeColor::Named(NamedColor::Gray)
    }
    fn default_hint() -> ThemeColor {
        ThemeColor::Named(NamedColor::Blue)
    }
    fn default_highlight_fg() -> ThemeColor {
        ThemeColor::Named(NamedColor::Black)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl NamedColor {
    /// All named colours in alphabetical order, as accepted by the config parser.
    pub const fn all() -> &'static [(&'static str, NamedColor)] {
        &[
            ("black", NamedColor::Black),
            ("blue", NamedColor::Blue),
            ("cyan", NamedColor::Cyan),
            ("gray", NamedColor::Gray),
            ("green", NamedColor::Green),
            ("magenta", NamedColor::Magenta),
            ("red", NamedColor::Red),
            ("white", NamedColor::White),
            ("yellow", NamedColor::Yellow),
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
        }
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n.as_str()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl Serialize for ThemeColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#')
            && hex.len() == 6
        {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        let lower = s.to_lowercase();
        let lookup = match lower.as_str() {
            "grey" => "gray",
            other => other,
        };
        NamedColor::all()
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(_, color)| Self::Named(*color))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey) or hex (#rrggbb)"
        ))
    })
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

/// Load the config file. A missing default file yields the defaults; a missing
/// `config_override` is an error.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = if let Some(path) = config_override {
        if !path.exists() {
            anyhow::bail!("Config file not found at {}", path.display());
        }
        path.to_path_buf()
    } else {
        let default = config_file();
        if !default.exists() {
            log::debug!("no config at {}, using defaults", default.display());
            return Ok(Config::default());
        }
        default
    };
    let contents = fs::read_to_string(&config_file)?;
    let config = load_config_from_str(&contents)?;
    Ok(config)
}
