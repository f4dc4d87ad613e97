use anyhow::Result;
use clap::Command;

mod cmd;
mod config;

fn build_cli() -> Command {
    Command::new("mural")
        .about("Build a 3D research-wall website from a folder of posts")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::serve::make_subcommand())
        .subcommand(cmd::list::make_subcommand())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("serve", args)) => cmd::serve::execute(args).await,
        Some(("list", args)) => cmd::list::execute(args),
        _ => unreachable!("subcommand required"),
    }
}
