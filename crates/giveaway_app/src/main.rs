mod cli;
mod comments;
mod config;
mod render;

use agent_logging::{agent_error, agent_info, LogDestination};
use anyhow::{bail, Context};
use clap::Parser;
use giveaway_core::{RunEvent, RunTally};
use giveaway_engine::{EngineEvent, EngineHandle};
use log::LevelFilter;

use crate::cli::Cli;
use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    agent_logging::initialize(destination, level);

    let run = AppConfig::load(&cli.config)
        .and_then(|config| config.into_run_config(cli.session_id, cli.titles))
        .with_context(|| format!("invalid configuration in {:?}", cli.config))?;

    let handle = EngineHandle::start(run);
    let mut tally = RunTally::new();
    while let Some(event) = handle.recv() {
        match event {
            EngineEvent::SessionReady => agent_info!("Session validated, searching"),
            EngineEvent::Aborted(err) => {
                agent_error!("Aborting: {}", err);
                return Err(err).context("could not start the run");
            }
            EngineEvent::Run(event) => {
                tally.apply(&event);
                match event {
                    RunEvent::Outcome(outcome) => println!("{}", render::outcome_line(&outcome)),
                    RunEvent::Done => {
                        println!("{}", render::summary_line(&tally));
                        return Ok(());
                    }
                }
            }
        }
    }

    bail!("engine stopped before reporting completion")
}
