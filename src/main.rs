use afl_stats::core::Pipeline;
use afl_stats::domain::services;
use afl_stats::utils::error::StatsError;
use afl_stats::utils::{logger, validation::Validate};
use afl_stats::{CliConfig, LocalStorage, ReportEngine, ReportPipeline};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose.then_some("debug"));
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting afl-stats CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let listing = config.is_listing();
    let pipeline = ReportPipeline::new(storage, config);

    if listing {
        if let Err(e) = print_listings(&pipeline).await {
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

async fn print_listings(
    pipeline: &ReportPipeline<LocalStorage, CliConfig>,
) -> afl_stats::Result<()> {
    let config = pipeline.config();
    let dataset = pipeline.extract().await?;

    if config.list_teams {
        for team in services::team_list(&dataset.games) {
            println!("{}", team);
        }
    }

    if config.list_players {
        for player in pipeline.team_roster(&dataset)? {
            println!("{}", player);
        }
    }

    if let Some(stat) = config.top {
        let top = pipeline.leaderboard(&dataset, stat, config.top_n)?;
        if top.is_empty() {
            println!("No player stats for {}", config.team);
        }
        for (rank, player) in top.iter().enumerate() {
            println!(
                "{:>2}. {:<24} {:>6.2} over {} games",
                rank + 1,
                player.display_name,
                player.average(stat),
                player.games_played
            );
        }
    }

    Ok(())
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
