use crate::core::{loader, render};
use crate::core::{ConfigProvider, Dataset, Pipeline, Storage, TeamReport, TransformResult};
use crate::domain::model::{GameRecord, OutputFormat, PlayerStat, PlayerSummary, Venue};
use crate::domain::services;
use crate::utils::error::{Result, StatsError};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const REPORT_JSON: &str = "report.json";

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Player names for the configured team.
    pub fn team_roster(&self, data: &Dataset) -> Result<Vec<String>> {
        let team = self.known_team(&data.games)?;
        Ok(services::player_list(&data.player_stats, team))
    }

    /// The configured team's best `n` players by the per-game average of
    /// `stat`. Empty when the stats table has no rows for the team.
    pub fn leaderboard(
        &self,
        data: &Dataset,
        stat: PlayerStat,
        n: usize,
    ) -> Result<Vec<PlayerSummary>> {
        let team = self.known_team(&data.games)?;
        let summaries = services::team_player_summaries(&data.player_stats, team);
        if summaries.is_empty() {
            tracing::warn!("No player stat rows for {}", team);
        }
        Ok(services::top_players(&summaries, stat, n))
    }

    fn known_team(&self, games: &[GameRecord]) -> Result<&str> {
        let team = self.config.team();
        if services::team_list(games).iter().any(|t| t == team) {
            Ok(team)
        } else {
            Err(StatsError::UnknownTeam {
                team: team.to_string(),
            })
        }
    }

    /// Renders every requested output as (file name, bytes).
    fn render_outputs(&self, result: &TransformResult) -> Result<Vec<(String, Vec<u8>)>> {
        let mut files = Vec::new();

        for format in self.config.output_formats() {
            match format {
                OutputFormat::Csv | OutputFormat::Tsv => {
                    let delimiter = if *format == OutputFormat::Csv { b',' } else { b'\t' };
                    for table in &result.tables {
                        let name = format!("{}.{}", table.name, format.extension());
                        files.push((name, render::write_delimited(table, delimiter)?));
                    }
                }
                OutputFormat::Json => {
                    let json = serde_json::to_vec_pretty(&result.report)?;
                    files.push((REPORT_JSON.to_string(), json));
                }
            }
        }

        if files.is_empty() {
            return Err(StatsError::ProcessingError {
                message: "No output formats selected".to_string(),
            });
        }
        Ok(files)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        let games_file = self.config.games_file();
        tracing::debug!("Reading games from {}", games_file);
        let raw = self.storage.read_file(games_file).await?;
        let games = loader::load_games(games_file, &raw)?;

        let player_stats = match self.config.player_stats_file() {
            Some(stats_file) => {
                tracing::debug!("Reading player stats from {}", stats_file);
                let raw = self.storage.read_file(stats_file).await?;
                loader::load_player_stats(stats_file, &raw)?
            }
            None => {
                tracing::debug!("No player stats file configured");
                Vec::new()
            }
        };

        Ok(Dataset {
            games,
            player_stats,
        })
    }

    async fn transform(&self, data: Dataset) -> Result<TransformResult> {
        let team = self.known_team(&data.games)?;
        let range = self.config.date_range();

        let games = services::team_games(&data.games, team, range);
        if games.is_empty() {
            tracing::warn!("{} played no games between {:?} and {:?}", team, range.start, range.end);
        }

        let players = services::team_player_summaries(&data.player_stats, team);
        let selected_player = match self.config.player() {
            Some(player) => Some(
                services::player_summary(&data.player_stats, team, player).ok_or_else(|| {
                    StatsError::UnknownPlayer {
                        team: team.to_string(),
                        player: player.to_string(),
                    }
                })?,
            ),
            None => None,
        };

        let report = TeamReport {
            team: team.to_string(),
            date_range: range,
            record: services::record(&games),
            home_record: services::venue_record(&games, Venue::Home),
            away_record: services::venue_record(&games, Venue::Away),
            home_scores: services::score_series(&games, Venue::Home),
            away_scores: services::score_series(&games, Venue::Away),
            score_summary: services::score_summary(&games),
            games,
            players,
            selected_player,
        };
        let tables = render::report_tables(&report);

        Ok(TransformResult { report, tables })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let files = self.render_outputs(&result)?;

        if self.config.compress() {
            let archive_name = self.config.archive_name();
            tracing::debug!("Creating ZIP file with {} files", files.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, data) in &files {
                    zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                    zip.write_all(data)?;
                }
                zip.finish()?.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(archive_name, &zip_data).await?;
            return Ok(format!("{}/{}", self.config.output_path(), archive_name));
        }

        for (name, data) in &files {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            self.storage.write_file(name, data).await?;
        }
        Ok(self.config.output_path().to_string())
    }
}
