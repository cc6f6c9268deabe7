use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use moodlens_edge::client::{MoodLensClient, Tone};
use moodlens_edge::config::load_config;
use moodlens_edge::routing::{rewrite::upstream_path, RouteDecision, Router, UpstreamTarget, ARCHIVE_PAGE};

#[derive(Parser)]
#[command(name = "moodlens-cli")]
#[command(about = "Call MoodLens APIs through the edge and inspect its routing", long_about = None)]
struct Cli {
    /// Edge base URL.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how the edge would route a path (no network)
    Route {
        /// Request path, optionally with a query string
        path: String,
        /// Edge config file used to resolve origins
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Classify the emotions in a piece of text
    Classify { text: String },
    /// Rewrite text in another tone
    Rewrite {
        text: String,
        #[arg(short, long, value_enum, default_value_t = ToneArg::Neutral)]
        tone: ToneArg,
    },
    /// Fetch the self-assessment questionnaire
    Questionnaire {
        #[arg(short, long, default_value = "default")]
        mode: String,
    },
    /// Fetch feedback for an emotional level (1-4)
    LevelFeedback {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=4))]
        level: u8,
    },
    /// GET any path through the edge
    Get { path: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum ToneArg {
    Neutral,
    Positive,
    Polite,
}

impl From<ToneArg> for Tone {
    fn from(arg: ToneArg) -> Self {
        match arg {
            ToneArg::Neutral => Tone::Neutral,
            ToneArg::Positive => Tone::Positive,
            ToneArg::Polite => Tone::Polite,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Route { path, config } = &cli.command {
        return explain_route(path, config.as_deref());
    }

    let client = MoodLensClient::new(&cli.url)?;
    match cli.command {
        Commands::Route { .. } => {}
        Commands::Classify { text } => {
            for score in client.classify(&text).await? {
                println!("{:<16} {:.4}", score.label, score.score);
            }
        }
        Commands::Rewrite { text, tone } => {
            println!("{}", client.rewrite(&text, tone.into()).await?);
        }
        Commands::Questionnaire { mode } => print_json(&client.questionnaire(&mode).await?)?,
        Commands::LevelFeedback { level } => print_json(&client.level_feedback(level).await?)?,
        Commands::Get { path } => print_json(&client.get(&path).await?)?,
    }

    Ok(())
}

fn explain_route(
    raw: &str,
    config_path: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (path, query) = match raw.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (raw, None),
    };

    let decision = Router::new().classify(path);
    println!("decision: {decision}");

    match decision {
        RouteDecision::ServeStaticArchive => println!("serves:   {ARCHIVE_PAGE} from assets"),
        RouteDecision::PassThroughToAssets => println!("serves:   {path} from assets"),
        _ => {
            let config = load_config(config_path)?;
            let origins = config.origins.resolve();
            match origins.for_decision(decision) {
                Some(origin) => {
                    let target = UpstreamTarget::resolve(origin, path, query)?;
                    println!("target:   {}", target.as_str());
                }
                None => {
                    println!("target:   <origin not configured> {}", upstream_path(path));
                }
            }
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
