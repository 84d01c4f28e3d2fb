use crate::domain::model::{PlayerSummary, Table, TeamReport, WinDrawLoss};
use crate::utils::error::{Result, StatsError};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn games_table(report: &TeamReport) -> Table {
    Table {
        name: "games".to_string(),
        headers: strings(&["date", "venue", "opponent", "for", "against", "result"]),
        rows: report
            .games
            .iter()
            .map(|g| {
                vec![
                    g.date.format(DATE_FORMAT).to_string(),
                    g.venue.to_string(),
                    g.opponent.clone(),
                    g.score_for.to_string(),
                    g.score_against.to_string(),
                    g.outcome.to_string(),
                ]
            })
            .collect(),
    }
}

pub fn record_table(report: &TeamReport) -> Table {
    let row = |scope: &str, wdl: &WinDrawLoss| {
        vec![
            scope.to_string(),
            wdl.played.to_string(),
            wdl.wins.to_string(),
            wdl.draws.to_string(),
            wdl.losses.to_string(),
            format!("{:.1}", wdl.win_pct),
            format!("{:.1}", wdl.draw_pct),
            format!("{:.1}", wdl.loss_pct),
        ]
    };

    Table {
        name: "record".to_string(),
        headers: strings(&[
            "scope", "played", "wins", "draws", "losses", "win_pct", "draw_pct", "loss_pct",
        ]),
        rows: vec![
            row("overall", &report.record),
            row("home", &report.home_record),
            row("away", &report.away_record),
        ],
    }
}

pub fn players_table(players: &[PlayerSummary]) -> Table {
    Table {
        name: "players".to_string(),
        headers: strings(&[
            "player",
            "games",
            "goals",
            "behinds",
            "disposals",
            "score",
            "avg_goals",
            "avg_behinds",
            "avg_disposals",
            "avg_score",
        ]),
        rows: players
            .iter()
            .map(|p| {
                vec![
                    p.display_name.clone(),
                    p.games_played.to_string(),
                    p.goals.to_string(),
                    p.behinds.to_string(),
                    p.disposals.to_string(),
                    p.score.to_string(),
                    format!("{:.2}", p.avg_goals),
                    format!("{:.2}", p.avg_behinds),
                    format!("{:.2}", p.avg_disposals),
                    format!("{:.2}", p.avg_score),
                ]
            })
            .collect(),
    }
}

/// The tables written for a report. `players` is left out when no player
/// stats were loaded for the team.
pub fn report_tables(report: &TeamReport) -> Vec<Table> {
    let mut tables = vec![games_table(report), record_table(report)];
    if !report.players.is_empty() {
        tables.push(players_table(&report.players));
    }
    tables
}

pub fn write_delimited(table: &Table, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| StatsError::ProcessingError {
            message: format!("Failed to flush {} table: {}", table.name, e.error()),
        })
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
