//! Cricket statistics CLI
//!
//! Loads the historical dataset and answers team and career queries,
//! or serves them over HTTP.

use clap::{Parser, Subcommand};
use cricket::{Config, Result};

#[derive(Parser)]
#[command(name = "cricket")]
#[command(about = "Cricket league statistics over historical match data", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all teams in the league
    Teams,
    /// Head-to-head record between two teams
    TeamVsTeam {
        team1: String,
        team2: String,
    },
    /// Full record for one team
    TeamRecord {
        team: String,
    },
    /// Career batting record for a player
    Batsman {
        name: String,
    },
    /// Career bowling record for a player
    Bowler {
        name: String,
    },
    /// Summarize the loaded dataset
    Status,
    /// Start the HTTP API server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Initialize a new project with default config
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command {
        Commands::Teams => commands::teams(&config),
        Commands::TeamVsTeam { team1, team2 } => commands::team_vs_team(&config, &team1, &team2),
        Commands::TeamRecord { team } => commands::team_record(&config, &team),
        Commands::Batsman { name } => commands::batsman(&config, &name),
        Commands::Bowler { name } => commands::bowler(&config, &name),
        Commands::Status => commands::status(&config),
        Commands::Serve { port } => commands::serve(&config, port),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use cricket::query::{respond, Engine};
    use cricket::web;

    fn print_json(value: &serde_json::Value) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn teams(config: &Config) -> Result<()> {
        let engine = Engine::load(&config.data)?;
        print_json(&respond(Ok(engine.teams())))
    }

    pub fn team_vs_team(config: &Config, team1: &str, team2: &str) -> Result<()> {
        let engine = Engine::load(&config.data)?;
        print_json(&respond(engine.team_vs_team(team1, team2)))
    }

    pub fn team_record(config: &Config, team: &str) -> Result<()> {
        let engine = Engine::load(&config.data)?;
        print_json(&respond(engine.team_record(team)))
    }

    pub fn batsman(config: &Config, name: &str) -> Result<()> {
        let engine = Engine::load(&config.data)?;
        print_json(&respond(Ok(engine.batsman_record(name))))
    }

    pub fn bowler(config: &Config, name: &str) -> Result<()> {
        let engine = Engine::load(&config.data)?;
        print_json(&respond(Ok(engine.bowler_record(name))))
    }

    pub fn status(config: &Config) -> Result<()> {
        let engine = Engine::load(&config.data)?;
        let data = engine.data();
        println!("Matches:    {}", data.matches().len());
        println!("Deliveries: {}", data.balls().len());
        println!("Teams:      {}", data.teams().len());
        if let Some((first, last)) = data.date_range() {
            println!("Date range: {} to {}", first, last);
        }
        Ok(())
    }

    pub fn serve(config: &Config, port: Option<u16>) -> Result<()> {
        let engine = Engine::load(&config.data)?;
        let mut server = config.server.clone();
        if let Some(port) = port {
            server.port = port;
        }
        println!(
            "Serving cricket statistics API on {}:{}",
            server.address, server.port
        );
        web::serve(engine, &server)
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("data")?;
        println!("Created data/ directory");

        println!("\nNext steps:");
        println!("  1. Edit {} to point at your CSV files", config_path);
        println!("  2. Run 'cricket status' to check the dataset loads");
        println!("  3. Run 'cricket teams' or 'cricket serve' to query it");

        Ok(())
    }
}
