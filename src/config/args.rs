use crate::core::ConfigProvider;
use crate::domain::model::{DateRange, OutputFormat, PlayerStat};
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "afl-stats")]
#[command(about = "Team and player summaries from AFL results spreadsheets")]
pub struct CliConfig {
    /// Games table (homeTeam, awayTeam, homeTeamScore, awayTeamScore, date)
    #[arg(long, default_value = "games.csv")]
    pub games: String,

    /// Player stats table (team, displayName, gameNumber, Goals, Behinds, Disposals)
    #[arg(long)]
    pub players: Option<String>,

    #[arg(long, default_value = "Richmond")]
    pub team: String,

    #[arg(long)]
    pub player: Option<String>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    #[arg(long = "output", default_value = "./output")]
    pub output_path: String,

    #[arg(
        long = "format",
        value_enum,
        value_delimiter = ',',
        default_values = ["csv", "json"]
    )]
    pub formats: Vec<OutputFormat>,

    #[arg(long, help = "Bundle all outputs into report.zip")]
    pub zip: bool,

    #[arg(long, help = "Print the teams found in the games table and exit")]
    pub list_teams: bool,

    #[arg(long, help = "Print the players recorded for --team and exit")]
    pub list_players: bool,

    #[arg(long, value_enum, help = "Print a leaderboard ranked by this per-game average")]
    pub top: Option<PlayerStat>,

    #[arg(long, default_value = "5")]
    pub top_n: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log phase timings and resource usage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Listing modes only need the games table (and stats for players).
    pub fn is_listing(&self) -> bool {
        self.list_teams || self.list_players || self.top.is_some()
    }
}

impl ConfigProvider for CliConfig {
    fn games_file(&self) -> &str {
        &self.games
    }

    fn player_stats_file(&self) -> Option<&str> {
        self.players.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn team(&self) -> &str {
        &self.team
    }

    fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    fn date_range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn compress(&self) -> bool {
        self.zip
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("games", &self.games)?;
        validation::validate_file_extension("games", &self.games, &["csv"])?;

        if let Some(players) = &self.players {
            validation::validate_path("players", players)?;
            validation::validate_file_extension("players", players, &["csv"])?;
        }

        validation::validate_non_empty_string("team", &self.team)?;
        if let Some(player) = &self.player {
            validation::validate_non_empty_string("player", player)?;
            if self.players.is_none() {
                return Err(StatsError::MissingConfigError {
                    field: "players (required by --player)".to_string(),
                });
            }
        }
        if (self.list_players || self.top.is_some()) && self.players.is_none() {
            return Err(StatsError::MissingConfigError {
                field: "players (required by --list-players/--top)".to_string(),
            });
        }

        validation::validate_date_range("from/to", self.from, self.to)?;
        validation::validate_path("output_path", &self.output_path)?;

        if self.formats.is_empty() {
            return Err(StatsError::InvalidConfigValueError {
                field: "format".to_string(),
                value: String::new(),
                reason: "At least one output format is required".to_string(),
            });
        }

        Ok(())
    }
}
