use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the games table. Teams are distinct and scores non-negative;
/// the loader rejects rows that break either rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub home_team: String,
    pub away_team: String,
    pub home_team_score: u32,
    pub away_team_score: u32,
    pub date: NaiveDateTime,
}

impl GameRecord {
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}

/// One player's line for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    pub team: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "gameNumber")]
    pub game_number: u32,
    #[serde(rename = "Goals")]
    pub goals: u32,
    #[serde(rename = "Behinds")]
    pub behinds: u32,
    #[serde(rename = "Disposals")]
    pub disposals: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub games: Vec<GameRecord>,
    pub player_stats: Vec<PlayerStatRecord>,
}

/// Calendar-date window; both bounds inclusive, either may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Home => write!(f, "home"),
            Venue::Away => write!(f, "away"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn from_scores(score_for: u32, score_against: u32) -> Self {
        match score_for.cmp(&score_against) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "W"),
            Outcome::Draw => write!(f, "D"),
            Outcome::Loss => write!(f, "L"),
        }
    }
}

/// A game seen from one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGame {
    pub date: NaiveDateTime,
    pub venue: Venue,
    pub opponent: String,
    pub score_for: u32,
    pub score_against: u32,
    pub outcome: Outcome,
}

impl TeamGame {
    pub fn margin(&self) -> i64 {
        i64::from(self.score_for) - i64::from(self.score_against)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WinDrawLoss {
    pub played: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_pct: f64,
    pub draw_pct: f64,
    pub loss_pct: f64,
}

impl WinDrawLoss {
    pub fn from_counts(wins: usize, draws: usize, losses: usize) -> Self {
        let played = wins + draws + losses;
        let pct = |n: usize| {
            if played == 0 {
                0.0
            } else {
                n as f64 * 100.0 / played as f64
            }
        };

        Self {
            played,
            wins,
            draws,
            losses,
            win_pct: pct(wins),
            draw_pct: pct(draws),
            loss_pct: pct(losses),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: NaiveDateTime,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub played: usize,
    pub points_for: u64,
    pub points_against: u64,
    pub avg_for: f64,
    pub avg_against: f64,
    pub avg_margin: f64,
    pub highest: Option<u32>,
    pub lowest: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub team: String,
    pub display_name: String,
    pub games_played: usize,
    pub goals: u64,
    pub behinds: u64,
    pub disposals: u64,
    /// Points contributed: six per goal, one per behind.
    pub score: u64,
    pub avg_goals: f64,
    pub avg_behinds: f64,
    pub avg_disposals: f64,
    pub avg_score: f64,
}

impl PlayerSummary {
    pub fn average(&self, stat: PlayerStat) -> f64 {
        match stat {
            PlayerStat::Goals => self.avg_goals,
            PlayerStat::Behinds => self.avg_behinds,
            PlayerStat::Disposals => self.avg_disposals,
            PlayerStat::Score => self.avg_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PlayerStat {
    Goals,
    Behinds,
    Disposals,
    Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

/// Everything the dashboards plotted for one team over one date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamReport {
    pub team: String,
    pub date_range: DateRange,
    pub games: Vec<TeamGame>,
    pub record: WinDrawLoss,
    pub home_record: WinDrawLoss,
    pub away_record: WinDrawLoss,
    pub home_scores: Vec<ScorePoint>,
    pub away_scores: Vec<ScorePoint>,
    pub score_summary: ScoreSummary,
    pub players: Vec<PlayerSummary>,
    pub selected_player: Option<PlayerSummary>,
}

/// A flat table ready to be written as CSV or TSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub report: TeamReport,
    pub tables: Vec<Table>,
}
