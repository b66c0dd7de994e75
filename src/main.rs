//! NeuroShield - terminal host
//!
//! Drives the same command handlers a UI host would call.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use neuroshield_core::api::{self, AppContext};
use neuroshield_core::constants;
use neuroshield_core::logic::config::AppConfig;
use neuroshield_core::logic::emergency::EmergencyResponse;
use neuroshield_core::logic::workflow::{ImageAnalysis, TextAnalysis};

#[derive(Parser)]
#[command(name = "neuroshield")]
#[command(about = "NeuroShield - emotional risk self-screening", long_about = None)]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Inference base URL
    #[arg(long, env = "NEUROSHIELD_INFERENCE_BASE_URL")]
    base_url: Option<String>,

    /// Data directory for the persistent store
    #[arg(long, env = "NEUROSHIELD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze free text
    Text {
        /// Text to analyze (joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Analyze an image file
    Image { path: PathBuf },

    /// Show the score history (newest first)
    History,

    /// Show trend statistics
    Dashboard,

    /// Manage the inference credential
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Emergency support content
    Emergency {
        /// motivation, breathing, helpline or dismiss
        action: String,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Store a token
    Set { token: String },
    /// Remove the stored token
    Clear,
    /// Show where the token comes from
    Status,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);

    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let mut config = AppConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.inference_base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let ctx = AppContext::init(config)?;
    let json = cli.json;

    match cli.command {
        Commands::Text { text } => {
            let text = text.join(" ");
            let report = with_interrupt(&ctx, api::analyze_text(&ctx, &text)).await?;
            emit(json, &report, print_text_report)?;
            show_overlay_hint(&ctx, report.intervention_triggered);
        }
        Commands::Image { path } => {
            let report = with_interrupt(&ctx, api::analyze_image_file(&ctx, &path)).await?;
            emit(json, &report, print_image_report)?;
            show_overlay_hint(&ctx, report.intervention_triggered);
        }
        Commands::History => {
            let history = api::get_score_history(&ctx);
            emit(json, &history, |records| {
                if records.is_empty() {
                    println!("No scores recorded yet.");
                }
                for record in records {
                    let when = chrono::DateTime::from_timestamp_millis(record.timestamp)
                        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| record.timestamp.to_string());
                    println!("{}  {}", when, record.score);
                }
            })?;
        }
        Commands::Dashboard => {
            let summary = api::get_dashboard_summary(&ctx);
            emit(json, &summary, |s| {
                println!("Highest score: {}", s.highest);
                println!("Average score: {}", s.average_display());
                println!("Mood:          {}", s.mood);
                let trend: Vec<String> = s.series.iter().map(|p| p.score.to_string()).collect();
                println!("Trend:         {}", trend.join(" -> "));
            })?;
        }
        Commands::Token { command } => {
            let status = match command {
                TokenCommands::Set { token } => api::set_token(&ctx, &token)?,
                TokenCommands::Clear => api::set_token(&ctx, "")?,
                TokenCommands::Status => api::get_token_status(&ctx),
            };
            emit(json, &status, |s| match &s.masked {
                Some(masked) => println!("Token {} (from {})", masked, s.source),
                None => println!("No token configured"),
            })?;
        }
        Commands::Emergency { action } => {
            let response = api::emergency_action(&ctx, &action)?;
            emit(json, &response, print_emergency_response)?;
        }
    }

    Ok(())
}

/// Ctrl-C cancels the running analysis instead of killing the process
async fn with_interrupt<T>(
    ctx: &AppContext,
    analysis: impl std::future::Future<Output = Result<T, String>>,
) -> Result<T, String> {
    tokio::pin!(analysis);
    tokio::select! {
        result = &mut analysis => result,
        _ = tokio::signal::ctrl_c() => {
            api::cancel_analysis(ctx);
            analysis.await
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce(&T)) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
        println!("{}", out);
    } else {
        human(value);
    }
    Ok(())
}

fn print_text_report(report: &TextAnalysis) {
    println!("AI Analysis Result");
    println!("  Detected emotion:       {}", report.emotion);
    println!("  Sentiment polarity:     {}", report.polarity);
    println!("  Toxicity score:         {}", report.toxicity_percent());
    println!("  Self-harm risk (proxy): {}", report.self_harm_percent());
    println!("  Final risk score:       {}", report.score);
    println!("  Recommended action:     {}", report.recommendation);
    println!();
    println!("Explanation: {}", report.explanation);
}

fn print_image_report(report: &ImageAnalysis) {
    println!("Image Analysis Result");
    println!("  Facial emotion:       {}", report.facial_emotion);
    println!("  Overall sentiment:    {}", report.sentiment);
    println!("  Depressive indicators: {}", report.depressive_indicators_label());
    println!("  Final risk score:     {}", report.score);
    println!("  Recommended action:   {}", report.recommendation);
}

fn show_overlay_hint(ctx: &AppContext, triggered: bool) {
    if !triggered {
        return;
    }
    let status = api::get_emergency_status(ctx);
    println!();
    println!("!! {}", status.headline);
    println!("   {}", status.advice);
    println!("   Try: neuroshield emergency motivation | breathing | helpline");
}

fn print_emergency_response(response: &EmergencyResponse) {
    match response {
        EmergencyResponse::Motivation { quote } => println!("{}", quote),
        EmergencyResponse::Breathing { instructions, .. } => println!("Breathe. {}", instructions),
        EmergencyResponse::Helpline { message, .. } => println!("{}", message),
        EmergencyResponse::Dismissed => println!("Closed."),
    }
}
