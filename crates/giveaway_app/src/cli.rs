use std::path::PathBuf;

use clap::Parser;

/// Search giveaways by title and enter every open one.
#[derive(Debug, Parser)]
#[command(name = "giveaway_agent", version)]
pub struct Cli {
    /// Path to the RON config file
    #[arg(short, long, default_value = "giveaway_agent.ron")]
    pub config: PathBuf,

    /// Session cookie value; overrides the config file
    #[arg(long, env = "GIVEAWAY_SESSION_ID", hide_env_values = true)]
    pub session_id: Option<String>,

    /// Additional title to search (repeatable)
    #[arg(short = 't', long = "title")]
    pub titles: Vec<String>,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write logs to ./giveaway_agent.log
    #[arg(long)]
    pub log_file: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_repeatable() {
        let cli = Cli::parse_from([
            "giveaway_agent",
            "--config",
            "agent.ron",
            "-t",
            "Portal 2",
            "--title",
            "Braid",
        ]);
        assert_eq!(cli.config, PathBuf::from("agent.ron"));
        assert_eq!(cli.titles, vec!["Portal 2".to_string(), "Braid".to_string()]);
        assert!(!cli.verbose);
    }
}
