use clap::Parser;
use log::{info, warn};
use mathnarrator::core::config::{self, CliOverrides, MathConfig};
use mathnarrator::core::session;
use mathnarrator::tui::{self, StartMode};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "mathnarrator", about = "FormulaVerse math tutor chat client")]
struct Args {
    /// Base URL of the tutoring API (overrides config and MATHNARRATOR_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Finish signing in with the address the browser was redirected to
    #[arg(long, value_name = "URL", conflicts_with = "guest")]
    callback: Option<String>,

    /// Skip the landing screen and chat as a guest
    #[arg(long)]
    guest: bool,

    /// Forget the stored session token and exit
    #[arg(long, conflicts_with_all = ["callback", "guest"])]
    logout: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to mathnarrator.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("mathnarrator.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        MathConfig::default()
    });
    let cli = CliOverrides {
        api_url: args.api_url,
    };
    let resolved = config::resolve(&file_config, &cli);
    info!("MathNarrator starting up against {}", resolved.api_base_url);

    if args.logout {
        let store = tui::build_store(&resolved);
        session::logout(store.as_ref());
        println!("Signed out.");
        return Ok(());
    }

    let start = match (args.callback, args.guest) {
        (Some(location), _) => StartMode::Callback(location),
        (None, true) => StartMode::Guest,
        (None, false) => StartMode::Landing,
    };

    tui::run(resolved, start)
}
