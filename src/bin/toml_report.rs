use afl_stats::core::{ConfigProvider, Pipeline};
use afl_stats::domain::services;
use afl_stats::utils::error::StatsError;
use afl_stats::utils::{logger, validation::Validate};
use afl_stats::{LocalStorage, ReportConfig, ReportEngine, ReportPipeline};
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "AFL team report driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "afl-report.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the team from config
    #[arg(long)]
    team: Option<String>,

    /// Dry run - load the data and show what would be written
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ReportConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    logger::init_cli_logger(args.verbose || config.log_level() == Some("debug"));

    tracing::info!("🚀 Starting TOML-based report");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(team) = &args.team {
        config.filter.team = Some(team.clone());
        tracing::info!("🔧 Team overridden to: {}", team);
    }

    if let Err(e) = config.validate() {
        fail(&e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ReportPipeline::new(storage, config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        if let Err(e) = perform_dry_run(&pipeline).await {
            fail(&e);
        }
        return Ok(());
    }

    let engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);
    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Report completed successfully!");
            println!("✅ Report completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn display_config_summary(config: &ReportConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Report: {} v{}",
        config.report.name,
        config.report.version.as_deref().unwrap_or("-")
    );
    println!("  Games: {}", config.games_file());
    println!(
        "  Player stats: {}",
        config.player_stats_file().unwrap_or("(none)")
    );
    println!("  Team: {}", config.team());
    if let Some(player) = config.player() {
        println!("  Player: {}", player);
    }
    let range = config.date_range();
    if !range.is_unbounded() {
        println!(
            "  Dates: {} to {}",
            range.start.map_or("start".to_string(), |d| d.to_string()),
            range.end.map_or("end".to_string(), |d| d.to_string())
        );
    }
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", format_list(config));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(
    pipeline: &ReportPipeline<LocalStorage, ReportConfig>,
) -> afl_stats::Result<()> {
    let config = pipeline.config();

    println!("🔍 Dry Run Analysis:");
    println!();

    let dataset = pipeline.extract().await?;
    println!("📡 Data Source Analysis:");
    println!("  Games: {}", dataset.games.len());
    println!("  Teams: {}", services::team_list(&dataset.games).len());
    println!("  Player stat rows: {}", dataset.player_stats.len());

    let result = pipeline.transform(dataset).await?;
    println!();
    println!("⚙️ Selection:");
    println!(
        "  {} games for {} ({} W / {} D / {} L)",
        result.report.games.len(),
        result.report.team,
        result.report.record.wins,
        result.report.record.draws,
        result.report.record.losses
    );
    println!("  {} players with stats", result.report.players.len());

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output_path());
    println!("  Formats: {}", format_list(config));
    for table in &result.tables {
        println!("  Table {}: {} rows", table.name, table.rows.len());
    }
    if config.compress() {
        println!("  Compression: {} (ZIP)", config.archive_name());
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}

fn format_list(config: &ReportConfig) -> String {
    config
        .output_formats()
        .iter()
        .map(|f| f.extension())
        .collect::<Vec<_>>()
        .join(", ")
}

fn fail(e: &StatsError) -> ! {
    tracing::error!(
        "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
