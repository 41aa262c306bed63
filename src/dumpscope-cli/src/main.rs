mod cli;
mod commands;
mod config;
mod render;

use anyhow::{bail, Result};
use clap::Parser;
use config::Config;
use dumpscope::RepositoryBrowser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cli::*;

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "dumpscope=debug,dumpscope_cli=debug"
    } else {
        "dumpscope=warn,dumpscope_cli=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Configure {
            api,
            local,
            clear_local,
            show,
        } => commands::configure::handle(api, local, clear_local, show),
        command => {
            let config = Config::load()?;
            let browser = commands::browser(&cli.source, &config);
            run(command, &*browser)
        }
    }
}

fn run(command: Commands, browser: &dyn RepositoryBrowser) -> Result<()> {
    match command {
        Commands::Games { filter, json } => {
            commands::games::handle(browser, filter.as_deref(), json)?;
        }

        Commands::List {
            game,
            category,
            json,
        } => {
            commands::records::list(browser, &game, category, json)?;
        }

        Commands::Search {
            game,
            term,
            category,
            filters,
            json,
        } => {
            commands::records::search(browser, &game, &term, category, filters.into(), json)?;
        }

        Commands::Show {
            game,
            name,
            category,
            json,
        } => {
            commands::records::show(browser, &game, &name, category, json)?;
        }

        Commands::Browse { game } => {
            commands::browse::handle(browser, &game)?;
        }

        Commands::Configure { .. } => bail!("configure does not read dumps"),
    }

    Ok(())
}
