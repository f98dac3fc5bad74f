//! Tuxagotchi configuration.
//!
//! Loaded once at startup from `$XDG_CONFIG_HOME/tuxagotchi/config.toml`
//! (or an explicit `--config` path) and never reloaded. Every table rejects
//! unknown keys so a typo fails at load instead of silently defaulting.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use jiff::SignedDuration;
use ratatui::style::Color;
use serde::{Deserialize, Deserializer};

use crate::observe::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE};

/// Environment fallback for `github.token`.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Written by `tuxagotchi init`.
pub const TEMPLATE: &str = r##"# Tuxagotchi configuration.

[github]
# Owner and repository whose commits feed the pet.
username = "your-github-username"
repo = "your-repo"
# Optional. Raises the API rate limit. Falls back to $GITHUB_TOKEN.
# token = "ghp_..."
# api_url = "https://api.github.com"
# per_page = 30

[timing]
# Minimum spacing between fetches.
debounce_secs = 60
# How often the scheduler is asked whether a fetch is due.
poll_secs = 30
# Animation frame interval.
animation_secs = 2

[colors]
# Color names, "#rrggbb", an indexed color (0-255), or "transparent".
accent = "red"
background = "transparent"
foreground = "red"
highlight = "red"
todo_border = "red"

# [assets]
# Directory holding <mood>_1.txt and <mood>_2.txt animation frames.
# dir = "~/.config/tuxagotchi/assets"
"##;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error(
        "no config file found at {}\n\
         Create one with `tuxagotchi init`, then set github.username and github.repo.",
        .0.display()
    )]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config at {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub github: GitHubConfig,

    #[serde(default)]
    pub timing: Timing,

    #[serde(default)]
    pub colors: Colors,

    #[serde(default)]
    pub assets: Assets,
}

/// Which repository to watch and how to reach it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    pub username: String,
    pub repo: String,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_per_page")]
    pub per_page: u8,
}

/// Timer intervals, in whole seconds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timing {
    pub debounce_secs: u32,
    pub poll_secs: u32,
    pub animation_secs: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            debounce_secs: 60,
            poll_secs: 30,
            animation_secs: 2,
        }
    }
}

impl Timing {
    pub fn debounce(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.debounce_secs))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.poll_secs))
    }

    pub fn animation_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.animation_secs))
    }
}

/// Panel colors. Validated while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
    pub accent: ThemeColor,
    pub background: ThemeColor,
    pub foreground: ThemeColor,
    pub highlight: ThemeColor,
    pub todo_border: ThemeColor,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            accent: ThemeColor(Color::Red),
            background: ThemeColor(Color::Reset),
            foreground: ThemeColor(Color::Red),
            highlight: ThemeColor(Color::Red),
            todo_border: ThemeColor(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Assets {
    /// Frame directory. Built-in art is used when unset.
    pub dir: Option<PathBuf>,
}

/// A terminal color parsed from config.
///
/// `transparent` means the terminal's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColor(pub Color);

impl FromStr for ThemeColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self(Color::Reset));
        }
        Color::from_str(s)
            .map(Self)
            .map_err(|_| format!("unrecognized color {s:?}"))
    }
}

impl<'de> Deserialize<'de> for ThemeColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Color::Reset => f.write_str("transparent"),
            color => write!(f, "{color}"),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_per_page() -> u8 {
    DEFAULT_PAGE_SIZE
}

impl Config {
    /// Load from `explicit` or the default location.
    ///
    /// A missing file is an error: without a repository there is nothing to watch.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(explicit, |key| std::env::var(key).ok())
    }

    /// [`Config::load`] with the environment lookup supplied by the caller.
    pub fn load_with_env(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => Self::path().ok_or(ConfigError::NoConfigDir)?,
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path));
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let mut config = Self::parse(&contents, &path)?;
        if config.github.token.is_none() {
            config.github.token = env(TOKEN_ENV);
        }
        config.github.token = config.github.token.filter(|t| !t.trim().is_empty());
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate config text. `path` is only used in messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.github.username.trim().is_empty() {
            return Err("github.username is empty".into());
        }
        if self.github.repo.trim().is_empty() {
            return Err("github.repo is empty".into());
        }
        if !(1..=100).contains(&self.github.per_page) {
            return Err(format!(
                "github.per_page must be between 1 and 100, got {}",
                self.github.per_page
            ));
        }
        let timing = &self.timing;
        for (name, value) in [
            ("timing.debounce_secs", timing.debounce_secs),
            ("timing.poll_secs", timing.poll_secs),
            ("timing.animation_secs", timing.animation_secs),
        ] {
            if value == 0 {
                return Err(format!("{name} must be at least 1"));
            }
        }
        Ok(())
    }

    /// The default config path: `$XDG_CONFIG_HOME/tuxagotchi/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tuxagotchi").join("config.toml"))
    }

    /// Write [`TEMPLATE`] to `path`, refusing to clobber unless `force`.
    pub fn write_template(path: &Path, force: bool) -> io::Result<()> {
        if path.exists() && !force {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists (use --force to overwrite)", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn parse(s: &str) -> Result<Config, ConfigError> {
        Config::parse(s, Path::new("test.toml"))
    }

    const MINIMAL: &str = r#"
        [github]
        username = "octo"
        repo = "pet"
    "#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse(MINIMAL).unwrap();
        assert_eq!(config.github.username, "octo");
        assert_eq!(config.github.repo, "pet");
        assert_eq!(config.github.token, None);
        assert_eq!(config.github.api_url, DEFAULT_API_URL);
        assert_eq!(config.github.per_page, 30);
        assert_eq!(config.timing.debounce(), SignedDuration::from_secs(60));
        assert_eq!(config.timing.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.timing.animation_interval(), Duration::from_secs(2));
        assert_eq!(config.colors, Colors::default());
        assert!(config.assets.dir.is_none());
    }

    #[test]
    fn partial_colors_fill_defaults() {
        let config = parse(&format!(
            "{MINIMAL}\n[colors]\naccent = \"#00ff00\"\nbackground = \"blue\"\n"
        ))
        .unwrap();
        assert_eq!(config.colors.accent, ThemeColor(Color::Rgb(0, 255, 0)));
        assert_eq!(config.colors.background, ThemeColor(Color::Blue));
        assert_eq!(config.colors.foreground, ThemeColor(Color::Red));
        assert_eq!(config.colors.todo_border, ThemeColor(Color::Red));
    }

    #[test]
    fn transparent_is_terminal_default() {
        assert_eq!("transparent".parse::<ThemeColor>(), Ok(ThemeColor(Color::Reset)));
        assert_eq!("Transparent".parse::<ThemeColor>(), Ok(ThemeColor(Color::Reset)));
        assert_eq!(ThemeColor(Color::Reset).to_string(), "transparent");
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = parse(&format!("{MINIMAL}\n[colors]\naccent = \"not-a-color\"\n")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse(&format!("{MINIMAL}\nfavourite_color = \"red\"\n")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let err = parse(
            r#"
            [github]
            username = "octo"
            repo = "pet"
            branch = "main"
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_repo_is_rejected() {
        let err = parse("[github]\nusername = \"octo\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_username_is_invalid() {
        let err = parse("[github]\nusername = \" \"\nrepo = \"pet\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn zero_interval_is_invalid() {
        let err = parse(&format!("{MINIMAL}\n[timing]\npoll_secs = 0\n")).unwrap_err();
        assert!(err.to_string().contains("timing.poll_secs"));
    }

    #[test]
    fn per_page_out_of_range_is_invalid() {
        let err = parse(
            "[github]\nusername = \"octo\"\nrepo = \"pet\"\nper_page = 101\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn token_falls_back_to_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, MINIMAL).unwrap();

        let env = |key: &str| (key == TOKEN_ENV).then(|| "from-env".to_string());
        let config = Config::load_with_env(Some(&path), env).unwrap();
        assert_eq!(config.github.token.as_deref(), Some("from-env"));

        let config = Config::load_with_env(Some(&path), |_| None).unwrap();
        assert_eq!(config.github.token, None);

        let config = Config::load_with_env(Some(&path), |_| Some("  ".into())).unwrap();
        assert_eq!(config.github.token, None);
    }

    #[test]
    fn configured_token_wins_over_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, format!("{MINIMAL}token = \"abc\"\n")).unwrap();
        let config = Config::load_with_env(Some(&path), |_| Some("from-env".into())).unwrap();
        assert_eq!(config.github.token.as_deref(), Some("abc"));
    }

    #[test]
    fn template_is_a_valid_config() {
        let config = parse(TEMPLATE).unwrap();
        assert_eq!(config.github.username, "your-github-username");
        assert_eq!(config.colors, Colors::default());
    }

    #[test]
    fn write_template_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::write_template(&path, false).unwrap();
        assert!(path.exists());

        let err = Config::write_template(&path, false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Config::write_template(&path, true).unwrap();
    }
}
