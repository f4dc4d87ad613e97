use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parsing(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parsing(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parsing(value)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Config {
    pub site: Option<SiteConfig>,
    pub wall: Option<WallConfig>,
    /// Set by `mural serve`; never read from the config file. Templates see
    /// it as the `dev` context value and include the live-reload script.
    #[serde(skip)]
    pub dev_server: Option<DevConfig>,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&data)?;

        Ok(config)
    }

    pub fn dev(&mut self, host: String, port: u16) {
        self.dev_server = Some(DevConfig { host, port });
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub title: Option<String>,
    pub tagline: Option<String>,
    /// Body of the about page, in the wall's markdown subset. No page is
    /// generated when absent.
    pub about: Option<String>,
    /// Body of the contact page, in the wall's markdown subset.
    pub contact: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: Some("Research Wall".into()),
            tagline: Some("Notes, experiments and write-ups, pinned to a curved wall".to_string()),
            about: None,
            contact: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct WallConfig {
    /// Posts data file, relative to the source directory.
    pub data: String,
    /// Tile columns baked into the generated wall.
    pub columns: u32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            data: "posts.json".to_string(),
            columns: 4,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct DevConfig {
    pub host: String,
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.site.is_none());
        assert!(config.wall.is_none());
        assert!(config.dev_server.is_none());

        let wall = WallConfig::default();
        assert_eq!(wall.data, "posts.json");
        assert_eq!(wall.columns, 4);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [site]
            title = "My Wall"

            [wall]
            columns = 3
            "#,
        )
        .unwrap();

        let site = config.site.unwrap();
        assert_eq!(site.title.as_deref(), Some("My Wall"));
        // Unset keys in a present section fall back to section defaults.
        assert!(site.tagline.is_some());
        assert!(site.about.is_none());

        let wall = config.wall.unwrap();
        assert_eq!(wall.columns, 3);
        assert_eq!(wall.data, "posts.json");
    }

    #[test]
    fn test_read_from_file() {
        let path = std::env::temp_dir().join(format!("mural-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[wall]\ndata = \"entries.json\"\n").unwrap();

        let config = Config::read(&path).unwrap();
        assert_eq!(config.wall.unwrap().data, "entries.json");
        assert!(Config::read("./no-such-mural.toml").is_err());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_dev_mode_setter() {
        let mut config = Config::default();
        config.dev("127.0.0.1".to_string(), 3000);
        let dev = config.dev_server.unwrap();
        assert_eq!(dev.host, "127.0.0.1");
        assert_eq!(dev.port, 3000);
    }
}
