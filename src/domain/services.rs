//! Team and player summary statistics over the loaded tables.
//!
//! Everything here is a pure function of its inputs: no I/O, no logging.

use crate::domain::model::{
    DateRange, GameRecord, Outcome, PlayerStat, PlayerStatRecord, PlayerSummary, ScorePoint,
    ScoreSummary, TeamGame, Venue, WinDrawLoss,
};
use std::collections::{BTreeSet, HashSet};

/// Points for a goal under AFL scoring. A behind is worth one.
pub const POINTS_PER_GOAL: u64 = 6;

/// Every team that appears on either side of a game, alphabetically.
pub fn team_list(games: &[GameRecord]) -> Vec<String> {
    games
        .iter()
        .flat_map(|g| [g.home_team.as_str(), g.away_team.as_str()])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn team_perspective(game: &GameRecord, team: &str) -> Option<TeamGame> {
    let (venue, opponent, score_for, score_against) = if game.home_team == team {
        (
            Venue::Home,
            &game.away_team,
            game.home_team_score,
            game.away_team_score,
        )
    } else if game.away_team == team {
        (
            Venue::Away,
            &game.home_team,
            game.away_team_score,
            game.home_team_score,
        )
    } else {
        return None;
    };

    Some(TeamGame {
        date: game.date,
        venue,
        opponent: opponent.clone(),
        score_for,
        score_against,
        outcome: Outcome::from_scores(score_for, score_against),
    })
}

/// Games `team` played inside `range`, oldest first. Same-day games keep
/// their order from the input.
pub fn team_games(games: &[GameRecord], team: &str, range: DateRange) -> Vec<TeamGame> {
    let mut selected: Vec<TeamGame> = games
        .iter()
        .filter(|g| g.involves(team) && range.contains(g.date.date()))
        .filter_map(|g| team_perspective(g, team))
        .collect();
    selected.sort_by_key(|g| g.date);
    selected
}

pub fn record(games: &[TeamGame]) -> WinDrawLoss {
    tally(games.iter())
}

pub fn venue_record(games: &[TeamGame], venue: Venue) -> WinDrawLoss {
    tally(games.iter().filter(|g| g.venue == venue))
}

fn tally<'a>(games: impl Iterator<Item = &'a TeamGame>) -> WinDrawLoss {
    let (mut wins, mut draws, mut losses) = (0, 0, 0);
    for game in games {
        match game.outcome {
            Outcome::Win => wins += 1,
            Outcome::Draw => draws += 1,
            Outcome::Loss => losses += 1,
        }
    }
    WinDrawLoss::from_counts(wins, draws, losses)
}

pub fn score_series(games: &[TeamGame], venue: Venue) -> Vec<ScorePoint> {
    games
        .iter()
        .filter(|g| g.venue == venue)
        .map(|g| ScorePoint {
            date: g.date,
            score: g.score_for,
        })
        .collect()
}

pub fn score_summary(games: &[TeamGame]) -> ScoreSummary {
    if games.is_empty() {
        return ScoreSummary::default();
    }

    let played = games.len();
    let points_for: u64 = games.iter().map(|g| u64::from(g.score_for)).sum();
    let points_against: u64 = games.iter().map(|g| u64::from(g.score_against)).sum();
    let margin: i64 = games.iter().map(TeamGame::margin).sum();

    ScoreSummary {
        played,
        points_for,
        points_against,
        avg_for: points_for as f64 / played as f64,
        avg_against: points_against as f64 / played as f64,
        avg_margin: margin as f64 / played as f64,
        highest: games.iter().map(|g| g.score_for).max(),
        lowest: games.iter().map(|g| g.score_for).min(),
    }
}

pub fn player_list(stats: &[PlayerStatRecord], team: &str) -> Vec<String> {
    stats
        .iter()
        .filter(|s| s.team == team)
        .map(|s| s.display_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Totals and per-game averages for one player. `None` when the team has no
/// rows for that player.
pub fn player_summary(
    stats: &[PlayerStatRecord],
    team: &str,
    player: &str,
) -> Option<PlayerSummary> {
    let rows: Vec<&PlayerStatRecord> = stats
        .iter()
        .filter(|s| s.team == team && s.display_name == player)
        .collect();
    if rows.is_empty() {
        return None;
    }

    // A repeated game number is one game split over several rows.
    let games_played = rows
        .iter()
        .map(|r| r.game_number)
        .collect::<HashSet<_>>()
        .len();
    let goals: u64 = rows.iter().map(|r| u64::from(r.goals)).sum();
    let behinds: u64 = rows.iter().map(|r| u64::from(r.behinds)).sum();
    let disposals: u64 = rows.iter().map(|r| u64::from(r.disposals)).sum();
    let score = goals * POINTS_PER_GOAL + behinds;

    let per_game = |total: u64| total as f64 / games_played as f64;

    Some(PlayerSummary {
        team: team.to_string(),
        display_name: player.to_string(),
        games_played,
        goals,
        behinds,
        disposals,
        score,
        avg_goals: per_game(goals),
        avg_behinds: per_game(behinds),
        avg_disposals: per_game(disposals),
        avg_score: per_game(score),
    })
}

/// Summaries for the whole list, best ball-winners first.
pub fn team_player_summaries(stats: &[PlayerStatRecord], team: &str) -> Vec<PlayerSummary> {
    let mut summaries: Vec<PlayerSummary> = player_list(stats, team)
        .iter()
        .filter_map(|player| player_summary(stats, team, player))
        .collect();
    sort_by_stat(&mut summaries, PlayerStat::Disposals);
    summaries
}

pub fn top_players(summaries: &[PlayerSummary], stat: PlayerStat, n: usize) -> Vec<PlayerSummary> {
    let mut ranked = summaries.to_vec();
    sort_by_stat(&mut ranked, stat);
    ranked.truncate(n);
    ranked
}

fn sort_by_stat(summaries: &mut [PlayerSummary], stat: PlayerStat) {
    summaries.sort_by(|a, b| {
        b.average(stat)
            .total_cmp(&a.average(stat))
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn game(home: &str, away: &str, hs: u32, aws: u32, y: i32, m: u32, d: u32) -> GameRecord {
        GameRecord {
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_team_score: hs,
            away_team_score: aws,
            date: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(19, 25, 0)
                .unwrap(),
        }
    }

    fn stat(team: &str, name: &str, game: u32, g: u32, b: u32, d: u32) -> PlayerStatRecord {
        PlayerStatRecord {
            team: team.to_string(),
            display_name: name.to_string(),
            game_number: game,
            goals: g,
            behinds: b,
            disposals: d,
        }
    }

    fn season() -> Vec<GameRecord> {
        vec![
            game("Richmond", "Carlton", 97, 64, 2019, 3, 21),
            game("Collingwood", "Richmond", 105, 61, 2019, 3, 28),
            game("Richmond", "Sydney", 70, 70, 2019, 4, 6),
            game("Geelong", "Sydney", 80, 72, 2019, 4, 7),
            game("Sydney", "Richmond", 55, 90, 2019, 4, 13),
        ]
    }

    #[test]
    fn test_team_list_covers_home_and_away() {
        let teams = team_list(&season());
        assert_eq!(
            teams,
            vec!["Carlton", "Collingwood", "Geelong", "Richmond", "Sydney"]
        );
    }

    #[test]
    fn test_team_games_sorted_by_date() {
        let mut games = season();
        games.reverse();

        let selected = team_games(&games, "Richmond", DateRange::unbounded());
        assert_eq!(selected.len(), 4);
        assert!(selected.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(selected[0].opponent, "Carlton");
        assert_eq!(selected[1].venue, Venue::Away);
        assert_eq!(selected[1].score_for, 61);
        assert_eq!(selected[1].score_against, 105);
    }

    #[test]
    fn test_team_games_same_kickoff_keeps_input_order() {
        let games = vec![
            game("Richmond", "Sydney", 70, 70, 2019, 4, 6),
            game("Geelong", "Richmond", 80, 72, 2019, 4, 6),
            game("Carlton", "Richmond", 64, 97, 2019, 3, 21),
            game("Richmond", "Essendon", 88, 51, 2019, 4, 6),
        ];

        let selected = team_games(&games, "Richmond", DateRange::unbounded());
        let opponents: Vec<&str> = selected.iter().map(|g| g.opponent.as_str()).collect();
        assert_eq!(opponents, vec!["Carlton", "Sydney", "Geelong", "Essendon"]);
        assert_eq!(selected[1].date, selected[3].date);
    }

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2019, 3, 28),
            NaiveDate::from_ymd_opt(2019, 4, 6),
        );
        let selected = team_games(&season(), "Richmond", range);

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].opponent, "Collingwood");
        assert_eq!(selected[1].opponent, "Sydney");
    }

    #[test]
    fn test_record_counts_and_percentages() {
        let selected = team_games(&season(), "Richmond", DateRange::unbounded());
        let wdl = record(&selected);

        assert_eq!(wdl.played, 4);
        assert_eq!((wdl.wins, wdl.draws, wdl.losses), (2, 1, 1));
        assert_eq!(wdl.win_pct, 50.0);
        assert_eq!(wdl.draw_pct, 25.0);

        let home = venue_record(&selected, Venue::Home);
        assert_eq!((home.wins, home.draws, home.losses), (1, 1, 0));
        let away = venue_record(&selected, Venue::Away);
        assert_eq!((away.wins, away.draws, away.losses), (1, 0, 1));
    }

    #[test]
    fn test_record_with_no_games_is_zeroed() {
        let wdl = record(&[]);
        assert_eq!(wdl.played, 0);
        assert_eq!(wdl.win_pct, 0.0);
        assert_eq!(score_summary(&[]), ScoreSummary::default());
    }

    #[test]
    fn test_score_series_split_by_venue() {
        let selected = team_games(&season(), "Richmond", DateRange::unbounded());
        let home: Vec<u32> = score_series(&selected, Venue::Home)
            .iter()
            .map(|p| p.score)
            .collect();
        let away: Vec<u32> = score_series(&selected, Venue::Away)
            .iter()
            .map(|p| p.score)
            .collect();

        assert_eq!(home, vec![97, 70]);
        assert_eq!(away, vec![61, 90]);
    }

    #[test]
    fn test_score_summary() {
        let selected = team_games(&season(), "Richmond", DateRange::unbounded());
        let summary = score_summary(&selected);

        assert_eq!(summary.played, 4);
        assert_eq!(summary.points_for, 318);
        assert_eq!(summary.points_against, 294);
        assert_eq!(summary.avg_for, 79.5);
        assert_eq!(summary.avg_margin, 6.0);
        assert_eq!(summary.highest, Some(97));
        assert_eq!(summary.lowest, Some(61));
    }

    #[test]
    fn test_player_summary_averages() {
        let stats = vec![
            stat("Richmond", "Dustin Martin", 1, 2, 1, 30),
            stat("Richmond", "Dustin Martin", 2, 0, 2, 24),
            stat("Richmond", "Jack Riewoldt", 1, 4, 3, 12),
            stat("Sydney", "Dustin Martin", 1, 9, 9, 9),
        ];

        let summary = player_summary(&stats, "Richmond", "Dustin Martin").unwrap();
        assert_eq!(summary.games_played, 2);
        assert_eq!(summary.goals, 2);
        assert_eq!(summary.disposals, 54);
        assert_eq!(summary.score, 15);
        assert_eq!(summary.avg_disposals, 27.0);
        assert_eq!(summary.avg_behinds, 1.5);
        assert_eq!(summary.avg_score, 7.5);

        assert!(player_summary(&stats, "Richmond", "Lance Franklin").is_none());
    }

    #[test]
    fn test_repeated_game_number_counts_once() {
        let stats = vec![
            stat("Richmond", "Tom Lynch", 5, 1, 0, 6),
            stat("Richmond", "Tom Lynch", 5, 2, 1, 4),
        ];
        let summary = player_summary(&stats, "Richmond", "Tom Lynch").unwrap();

        assert_eq!(summary.games_played, 1);
        assert_eq!(summary.goals, 3);
        assert_eq!(summary.avg_disposals, 10.0);
    }

    #[test]
    fn test_team_player_summaries_and_top_players() {
        let stats = vec![
            stat("Richmond", "Dustin Martin", 1, 2, 1, 30),
            stat("Richmond", "Jack Riewoldt", 1, 4, 3, 12),
            stat("Richmond", "Dion Prestia", 1, 0, 0, 30),
        ];

        let summaries = team_player_summaries(&stats, "Richmond");
        let order: Vec<&str> = summaries.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(order, vec!["Dion Prestia", "Dustin Martin", "Jack Riewoldt"]);

        let top = top_players(&summaries, PlayerStat::Goals, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].display_name, "Jack Riewoldt");

        assert_eq!(
            player_list(&stats, "Richmond"),
            vec!["Dion Prestia", "Dustin Martin", "Jack Riewoldt"]
        );
        assert!(player_list(&stats, "Carlton").is_empty());
    }
}
