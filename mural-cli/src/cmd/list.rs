use crate::config::MuralConfig;
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use mural_core::{PostFilter, posts_from_json};
use std::path::Path;

pub fn make_subcommand() -> Command {
    Command::new("list")
        .about("List wall posts, optionally filtered by text or tag")
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .value_name("DIR")
                .help("Source directory containing the posts data file")
                .default_value("./site"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value("./mural.toml"),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .value_name("TEXT")
                .help("Case-insensitive text search over title, subtitle, tags and body"),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .value_name("TAG")
                .help("Only posts carrying this exact tag"),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let mural_config = MuralConfig::load(args)?;
    let source_dir = Path::new(&mural_config.build_config().source);

    let wall_config = mural_config.site_config().wall.clone().unwrap_or_default();
    let data_path = source_dir.join(&wall_config.data);

    let data = std::fs::read_to_string(&data_path)
        .with_context(|| format!("Could not load posts data file: {}", data_path.display()))?;
    let mut posts = posts_from_json(&data)?;
    mural_core::post::sort_newest_first(&mut posts);

    let filter = PostFilter {
        query: args
            .get_one::<String>("query")
            .cloned()
            .unwrap_or_default(),
        tag: args.get_one::<String>("tag").cloned(),
    };

    let matching: Vec<_> = posts.iter().filter(|p| filter.matches(p)).collect();

    if matching.is_empty() {
        println!("No posts match your filters.");
        return Ok(());
    }

    println!("{} post(s):", matching.len());
    for post in matching {
        let tags = post.tags.join(", ");
        if tags.is_empty() {
            println!("- {}  {}", post.date, post.title);
        } else {
            println!("- {}  {}  [{}]", post.date, post.title, tags);
        }
    }

    Ok(())
}
