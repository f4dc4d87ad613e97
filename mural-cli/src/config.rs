use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration that merges CLI args, env vars, the config file,
/// and defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MuralConfig {
    /// Build configuration
    pub build: BuildConfig,
    /// Wall configuration (from mural-core)
    #[serde(flatten)]
    pub site: mural_core::config::Config,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Source directory containing the posts data file and assets
    pub source: String,
    /// Output directory for the generated site
    pub output: String,
    /// Theme directory (built-in theme is used when it doesn't exist)
    pub theme: String,
    /// Configuration file path
    pub config: String,
    /// Host for the dev server
    pub host: String,
    /// Port for the dev server
    pub port: u16,
    /// Open browser automatically
    pub open: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: "./site".to_string(),
            output: "./out".to_string(),
            theme: "./theme".to_string(),
            config: "./mural.toml".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            open: false,
        }
    }
}

impl Default for MuralConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            site: mural_core::config::Config::default(),
        }
    }
}

impl MuralConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (MURAL_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = string_arg(args, "config")
            .unwrap_or_else(|| "./mural.toml".to_string());

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Add the configuration file if it exists
        if Path::new(&config_file).exists() {
            builder = builder.add_source(File::from(Path::new(&config_file)));
        }

        // 3. Add environment variables with MURAL_ prefix
        builder = builder.add_source(
            Environment::with_prefix("MURAL")
                .prefix_separator("_")
                .separator("__"), // Double underscore for nested keys
        );

        // 4. Override with CLI arguments (highest priority). Not every
        // subcommand declares every flag, so each one is probed; a flag's
        // clap default never outranks the file or environment.
        if let Some(source) = cli_arg(args, "source") {
            builder = builder.set_override("build.source", source)?;
        }
        if let Some(output) = cli_arg(args, "output") {
            builder = builder.set_override("build.output", output)?;
        }
        if let Some(theme) = cli_arg(args, "theme") {
            builder = builder.set_override("build.theme", theme)?;
        }
        if let Some(config) = cli_arg(args, "config") {
            builder = builder.set_override("build.config", config)?;
        }
        if let Some(host) = cli_arg(args, "host") {
            builder = builder.set_override("build.host", host)?;
        }
        if let Some(port) = cli_arg(args, "port") {
            if let Ok(port) = port.parse::<u16>() {
                builder = builder.set_override("build.port", port as i64)?;
            }
        }
        if args.try_get_one::<bool>("open").unwrap_or(None) == Some(&true) {
            builder = builder.set_override("build.open", true)?;
        }

        let config = builder.build()?;
        let mural_config: MuralConfig = config.try_deserialize()?;

        Ok(mural_config)
    }

    /// The wall configuration for passing to mural-core
    pub fn site_config(&self) -> &mural_core::config::Config {
        &self.site
    }

    /// The build configuration
    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}

fn string_arg(args: &ArgMatches, name: &str) -> Option<String> {
    args.try_get_one::<String>(name).unwrap_or(None).cloned()
}

/// A string arg, but only when the user actually typed it.
fn cli_arg(args: &ArgMatches, name: &str) -> Option<String> {
    match args.try_get_one::<String>(name) {
        Ok(Some(value))
            if args.value_source(name) == Some(clap::parser::ValueSource::CommandLine) =>
        {
            Some(value.clone())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    #[test]
    fn test_default_config() {
        let config = MuralConfig::default();
        assert_eq!(config.build.source, "./site");
        assert_eq!(config.build.output, "./out");
        assert_eq!(config.build.theme, "./theme");
        assert_eq!(config.build.port, 3000);
    }

    #[test]
    fn test_cli_args_override() {
        let app = Command::new("test")
            .arg(Arg::new("source").long("source").value_name("DIR"))
            .arg(Arg::new("output").long("output").value_name("DIR"))
            .arg(Arg::new("config").long("config").value_name("FILE"));

        let matches = app
            .try_get_matches_from(vec![
                "test",
                "--source",
                "/custom/source",
                "--output",
                "/custom/output",
            ])
            .unwrap();

        let config = MuralConfig::load(&matches).unwrap();
        assert_eq!(config.build.source, "/custom/source");
        assert_eq!(config.build.output, "/custom/output");
        // Non-overridden values keep their defaults
        assert_eq!(config.build.theme, "./theme");
    }

    #[test]
    fn test_args_missing_from_subcommand_are_skipped() {
        let app = Command::new("test")
            .arg(Arg::new("source").long("source").value_name("DIR"));
        let matches = app.try_get_matches_from(vec!["test"]).unwrap();

        // No declared output/theme/host/port args; load must not panic.
        let config = MuralConfig::load(&matches).unwrap();
        assert_eq!(config.build.output, "./out");
    }
}
