use crate::config::MuralConfig;
use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use mural_core::build_wall;
use mural_dev_server::{PreviewConfig, PreviewServer};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub fn make_subcommand() -> Command {
    crate::cmd::build::add_build_args(Command::new("serve"))
        .about("Preview the wall with live reload, rebuilding on change")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to serve on")
                .default_value("3000"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Host to bind to")
                .default_value("127.0.0.1"),
        )
        .arg(
            Arg::new("open")
                .long("open")
                .help("Open browser automatically")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn execute(args: &ArgMatches) -> Result<()> {
    let mut mural_config = MuralConfig::load(args)?;
    let build_config = mural_config.build_config();

    let output_dir = PathBuf::from(&build_config.output);
    let host = build_config.host.clone();
    let port = build_config.port;
    let open = build_config.open;

    // Dev mode puts the live-reload script into every generated page.
    mural_config.site.dev(host.clone(), port);

    rebuild(&mural_config)?;

    let server = PreviewServer::new(PreviewConfig {
        host,
        port,
        root: output_dir,
        open,
    });
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            eprintln!("Dev server error: {}", e);
        }
    });

    let watcher_config = mural_config.clone();
    let watcher_handle = tokio::spawn(async move {
        if let Err(e) = watch_source_files(watcher_config).await {
            eprintln!("Source watcher error: {}", e);
        }
    });

    let _ = tokio::try_join!(server_handle, watcher_handle)?;

    Ok(())
}

fn rebuild(mural_config: &MuralConfig) -> Result<()> {
    let build_config = mural_config.build_config();
    build_wall(
        mural_config.site_config(),
        Path::new(&build_config.source),
        Path::new(&build_config.output),
        Path::new(&build_config.theme),
    )?;
    Ok(())
}

/// Watch the source dir, theme dir and config file; rebuild the wall whenever
/// one of them changes. The preview server notices the rewritten output and
/// reloads connected browsers.
async fn watch_source_files(mural_config: MuralConfig) -> Result<()> {
    let build_config = mural_config.build_config();
    let source_dir = PathBuf::from(&build_config.source);
    let theme_dir = PathBuf::from(&build_config.theme);
    let config_file = PathBuf::from(&build_config.config);

    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            if let Ok(events) = res {
                for event in events {
                    let _ = tx.blocking_send(event.path);
                }
            }
        },
    )?;

    debouncer
        .watcher()
        .watch(&source_dir, notify::RecursiveMode::Recursive)?;
    println!("Watching source directory: {}", source_dir.display());

    if theme_dir.exists() {
        debouncer
            .watcher()
            .watch(&theme_dir, notify::RecursiveMode::Recursive)?;
        println!("Watching theme directory: {}", theme_dir.display());
    }

    if config_file.exists() {
        debouncer
            .watcher()
            .watch(&config_file, notify::RecursiveMode::NonRecursive)?;
        println!("Watching config file: {}", config_file.display());
    }

    while let Some(path) = rx.recv().await {
        println!("Source changed: {}", path.display());

        match rebuild(&mural_config) {
            Ok(_) => println!("Wall rebuilt successfully"),
            Err(e) => eprintln!("Build error: {}", e),
        }
    }

    Ok(())
}
