//! CSV → typed records.
//!
//! Rows are checked as they are read; the first bad row aborts the load with
//! its file name and line number.

use crate::domain::model::{GameRecord, PlayerStatRecord};
use crate::utils::error::{Result, StatsError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const GAME_COLUMNS: [&str; 5] = [
    "homeTeam",
    "awayTeam",
    "homeTeamScore",
    "awayTeamScore",
    "date",
];

pub const PLAYER_STAT_COLUMNS: [&str; 6] = [
    "team",
    "displayName",
    "gameNumber",
    "Goals",
    "Behinds",
    "Disposals",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Deserialize)]
struct RawGame {
    #[serde(rename = "homeTeam")]
    home_team: String,
    #[serde(rename = "awayTeam")]
    away_team: String,
    #[serde(rename = "homeTeamScore")]
    home_team_score: i64,
    #[serde(rename = "awayTeamScore")]
    away_team_score: i64,
    date: String,
}

#[derive(Debug, Deserialize)]
struct RawPlayerStat {
    team: String,
    #[serde(rename = "displayName")]
    display_name: String,
    #[serde(rename = "gameNumber")]
    game_number: i64,
    #[serde(rename = "Goals")]
    goals: i64,
    #[serde(rename = "Behinds")]
    behinds: i64,
    #[serde(rename = "Disposals")]
    disposals: i64,
}

pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub fn load_games(source: &str, data: &[u8]) -> Result<Vec<GameRecord>> {
    let games = read_rows(source, data, &GAME_COLUMNS, |line, raw: RawGame| {
        let home_team = raw.home_team;
        let away_team = raw.away_team;
        if home_team.is_empty() || away_team.is_empty() {
            return Err(invalid(source, line, "team name is empty"));
        }
        if home_team == away_team {
            return Err(invalid(
                source,
                line,
                format!("home and away team are both '{}'", home_team),
            ));
        }

        let date = parse_date(&raw.date)
            .ok_or_else(|| invalid(source, line, format!("unrecognised date '{}'", raw.date)))?;

        Ok(GameRecord {
            home_team_score: count(source, line, "homeTeamScore", raw.home_team_score)?,
            away_team_score: count(source, line, "awayTeamScore", raw.away_team_score)?,
            home_team,
            away_team,
            date,
        })
    })?;

    tracing::debug!("Loaded {} games from {}", games.len(), source);
    Ok(games)
}

pub fn load_player_stats(source: &str, data: &[u8]) -> Result<Vec<PlayerStatRecord>> {
    let stats = read_rows(source, data, &PLAYER_STAT_COLUMNS, |line, raw: RawPlayerStat| {
        if raw.team.is_empty() || raw.display_name.is_empty() {
            return Err(invalid(source, line, "team or player name is empty"));
        }

        Ok(PlayerStatRecord {
            game_number: count(source, line, "gameNumber", raw.game_number)?,
            goals: count(source, line, "Goals", raw.goals)?,
            behinds: count(source, line, "Behinds", raw.behinds)?,
            disposals: count(source, line, "Disposals", raw.disposals)?,
            team: raw.team,
            display_name: raw.display_name,
        })
    })?;

    tracing::debug!("Loaded {} player stat rows from {}", stats.len(), source);
    Ok(stats)
}

fn read_rows<R, T>(
    source: &str,
    data: &[u8],
    required: &[&str],
    mut convert: impl FnMut(u64, R) -> Result<T>,
) -> Result<Vec<T>>
where
    R: DeserializeOwned,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    if let Some(missing) = required
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(invalid(source, 1, format!("missing column '{}'", missing)));
    }

    let mut out = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let raw: R = row
            .deserialize(Some(&headers))
            .map_err(|e| invalid(source, line, e.to_string()))?;
        out.push(convert(line, raw)?);
    }
    Ok(out)
}

fn count(source: &str, line: u64, column: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        invalid(
            source,
            line,
            format!("{} must be a non-negative integer, got {}", column, value),
        )
    })
}

fn invalid(source: &str, line: u64, reason: impl Into<String>) -> StatsError {
    StatsError::InvalidRecord {
        file: source.to_string(),
        line,
        reason: reason.into(),
    }
}
