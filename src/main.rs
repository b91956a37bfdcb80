//! orgeval - organization tree selection and evaluation assignment CLI

use clap::{CommandFactory, Parser};

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod session;
mod tree;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, OrgCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("orgeval version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Org(org_cmd) => match org_cmd {
            OrgCommands::Tree {
                expand,
                all,
                collapse,
                select,
            } => cli::org::tree(&opts, &expand, all, &collapse, &select).await,
            OrgCommands::Children { up_code } => cli::org::children(&opts, &up_code).await,
            OrgCommands::Descendants { id } => cli::org::descendants(&opts, id).await,
        },
        Commands::Assign {
            ids,
            period,
            dry_run,
            yes,
        } => cli::assign::run(&opts, &ids, period.as_deref(), dry_run, yes).await,
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "orgeval", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// `--debug` forces debug level; otherwise `RUST_LOG` decides, defaulting to warnings.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
