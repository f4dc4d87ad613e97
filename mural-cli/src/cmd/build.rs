use crate::config::MuralConfig;
use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use mural_core::build_wall;
use std::path::Path;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .value_name("DIR")
                .help("Source directory containing the posts data file and assets")
                .default_value("./site"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for the generated site")
                .default_value("./out"),
        )
        .arg(
            Arg::new("theme")
                .short('t')
                .long("theme")
                .value_name("DIR")
                .help("Theme directory (falls back to the built-in theme)")
                .default_value("./theme"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value("./mural.toml"),
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build")).about("Build the research wall into a static site")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let mural_config = MuralConfig::load(args)?;
    let build_config = mural_config.build_config();

    let source_dir = Path::new(&build_config.source);
    let output_dir = Path::new(&build_config.output);
    let theme_dir = Path::new(&build_config.theme);

    build_wall(mural_config.site_config(), source_dir, output_dir, theme_dir)?;

    println!("Wall built successfully in {}", output_dir.display());

    Ok(())
}
