use afl_stats::core::Pipeline;
use afl_stats::domain::model::PlayerStat;
use afl_stats::domain::services;
use afl_stats::utils::error::StatsError;
use afl_stats::{CliConfig, LocalStorage, OutputFormat, ReportEngine, ReportPipeline};
use chrono::NaiveDate;
use std::path::Path;
use tempfile::TempDir;

const GAMES_CSV: &str = "\
gameId,year,round,date,homeTeam,awayTeam,homeTeamScore,awayTeamScore
2019R101,2019,1,2019-03-21 19:25:00,Richmond,Carlton,97,64
2019R102,2019,1,2019-03-22 19:50:00,Collingwood,Geelong,65,91
2019R201,2019,2,2019-03-28 19:50:00,Collingwood,Richmond,105,61
2019R305,2019,3,2019-04-06 16:35:00,Richmond,Sydney,70,70
2019R401,2019,4,2019-04-13 13:45:00,Sydney,Richmond,55,90
";

const STATS_CSV: &str = "\
team,year,round,gameNumber,displayName,Disposals,Goals,Behinds
Richmond,2019,1,1,Dustin Martin,30,2,1
Richmond,2019,2,2,Dustin Martin,24,0,2
Richmond,2019,3,3,Dustin Martin,33,3,0
Richmond,2019,1,1,Jack Riewoldt,12,4,3
Richmond,2019,3,3,Jack Riewoldt,9,1,1
Sydney,2019,3,3,Luke Parker,28,1,0
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("games.csv"), GAMES_CSV).unwrap();
        std::fs::write(dir.path().join("stats.csv"), STATS_CSV).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_str().unwrap().to_string()
    }

    fn config(&self, team: &str) -> CliConfig {
        CliConfig {
            games: self.path("games.csv"),
            players: Some(self.path("stats.csv")),
            team: team.to_string(),
            player: None,
            from: None,
            to: None,
            output_path: self.path("output"),
            formats: vec![OutputFormat::Csv, OutputFormat::Json],
            zip: false,
            list_teams: false,
            list_players: false,
            top: None,
            top_n: 5,
            verbose: false,
            monitor: false,
            log_json: false,
        }
    }

    fn engine(&self, config: CliConfig) -> ReportEngine<ReportPipeline<LocalStorage, CliConfig>> {
        let storage = LocalStorage::new(config.output_path.clone());
        ReportEngine::new(ReportPipeline::new(storage, config))
    }

    fn read_output(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join("output").join(name)).unwrap()
    }
}

#[tokio::test]
async fn test_end_to_end_team_report() {
    let fixture = Fixture::new();
    let engine = fixture.engine(fixture.config("Richmond"));

    let output_path = engine.run().await.unwrap();
    assert_eq!(output_path, fixture.path("output"));

    let games = fixture.read_output("games.csv");
    let lines: Vec<&str> = games.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "date,venue,opponent,for,against,result");
    assert_eq!(lines[1], "2019-03-21 19:25,home,Carlton,97,64,W");
    assert_eq!(lines[4], "2019-04-13 13:45,away,Sydney,90,55,W");

    let record = fixture.read_output("record.csv");
    assert!(record.contains("overall,4,2,1,1,50.0,25.0,25.0"));
    assert!(record.contains("away,2,1,0,1,50.0,0.0,50.0"));

    let players = fixture.read_output("players.csv");
    let player_lines: Vec<&str> = players.lines().collect();
    assert_eq!(player_lines.len(), 3);
    assert!(player_lines[1].starts_with("Dustin Martin,3,5,3,87,33,"));

    let report: serde_json::Value =
        serde_json::from_str(&fixture.read_output("report.json")).unwrap();
    assert_eq!(report["team"], "Richmond");
    assert_eq!(report["score_summary"]["points_for"], 318);
    assert_eq!(report["home_scores"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_end_to_end_with_date_range_and_player() {
    let fixture = Fixture::new();
    let mut config = fixture.config("Richmond");
    config.from = NaiveDate::from_ymd_opt(2019, 3, 28);
    config.to = NaiveDate::from_ymd_opt(2019, 4, 6);
    config.player = Some("Jack Riewoldt".to_string());
    config.formats = vec![OutputFormat::Json];

    fixture.engine(config).run().await.unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&fixture.read_output("report.json")).unwrap();
    assert_eq!(report["games"].as_array().unwrap().len(), 2);
    assert_eq!(report["record"]["losses"], 1);
    assert_eq!(report["record"]["draws"], 1);
    assert_eq!(report["selected_player"]["display_name"], "Jack Riewoldt");
    assert_eq!(report["selected_player"]["games_played"], 2);
    assert_eq!(report["selected_player"]["avg_goals"], 2.5);

    assert!(!fixture.dir.path().join("output/games.csv").exists());
}

#[tokio::test]
async fn test_end_to_end_zip_and_tsv() {
    let fixture = Fixture::new();
    let mut config = fixture.config("Sydney");
    config.zip = true;
    config.formats = vec![OutputFormat::Tsv];

    let output_path = fixture.engine(config).run().await.unwrap();
    assert!(output_path.ends_with("report.zip"));

    let zip_data = std::fs::read(Path::new(&output_path)).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["games.tsv", "players.tsv", "record.tsv"]);

    let mut games = archive.by_name("games.tsv").unwrap();
    let mut content = String::new();
    std::io::Read::read_to_string(&mut games, &mut content).unwrap();
    assert!(content.contains("away\tRichmond\t70\t70\tD"));
}

#[tokio::test]
async fn test_end_to_end_unknown_team() {
    let fixture = Fixture::new();
    let err = fixture
        .engine(fixture.config("Fitzroy"))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, StatsError::UnknownTeam { .. }));
    assert!(!fixture.dir.path().join("output").exists());
}

#[tokio::test]
async fn test_end_to_end_rejects_bad_row() {
    let fixture = Fixture::new();
    std::fs::write(
        fixture.dir.path().join("games.csv"),
        "homeTeam,awayTeam,homeTeamScore,awayTeamScore,date\n\
         Richmond,Carlton,97,64,2019-03-21\n\
         Sydney,Sydney,55,90,2019-04-13\n",
    )
    .unwrap();

    let err = fixture
        .engine(fixture.config("Richmond"))
        .run()
        .await
        .unwrap_err();

    match err {
        StatsError::InvalidRecord { file, line, .. } => {
            assert!(file.ends_with("games.csv"));
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_listings_against_files() {
    let fixture = Fixture::new();
    let config = fixture.config("Richmond");
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ReportPipeline::new(storage, config);
    let dataset = pipeline.extract().await.unwrap();

    assert_eq!(
        services::team_list(&dataset.games),
        vec!["Carlton", "Collingwood", "Geelong", "Richmond", "Sydney"]
    );
    assert_eq!(
        pipeline.team_roster(&dataset).unwrap(),
        vec!["Dustin Martin", "Jack Riewoldt"]
    );

    let top = pipeline
        .leaderboard(&dataset, PlayerStat::Disposals, 5)
        .unwrap();
    let names: Vec<&str> = top.iter().map(|p| p.display_name.as_str()).collect();
    assert_eq!(names, vec!["Dustin Martin", "Jack Riewoldt"]);
    assert!(!fixture.dir.path().join("output").exists());
}

#[tokio::test]
async fn test_listings_team_checks() {
    let fixture = Fixture::new();

    // Carlton played but has no rows in the stats table.
    let carlton = fixture.config("Carlton");
    let storage = LocalStorage::new(carlton.output_path.clone());
    let pipeline = ReportPipeline::new(storage, carlton);
    let dataset = pipeline.extract().await.unwrap();
    assert!(pipeline.team_roster(&dataset).unwrap().is_empty());
    assert!(pipeline
        .leaderboard(&dataset, PlayerStat::Goals, 5)
        .unwrap()
        .is_empty());

    let fitzroy = fixture.config("Fitzroy");
    let storage = LocalStorage::new(fitzroy.output_path.clone());
    let pipeline = ReportPipeline::new(storage, fitzroy);
    let dataset = pipeline.extract().await.unwrap();
    assert!(matches!(
        pipeline.team_roster(&dataset),
        Err(StatsError::UnknownTeam { .. })
    ));
    assert!(matches!(
        pipeline.leaderboard(&dataset, PlayerStat::Goals, 5),
        Err(StatsError::UnknownTeam { .. })
    ));
}

#[test]
fn test_end_to_end_with_monitoring() {
    let fixture = Fixture::new();
    let config = fixture.config("Carlton");
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ReportEngine::new_with_monitoring(ReportPipeline::new(storage, config), true);

    let result = tokio_test::block_on(engine.run());
    assert!(result.is_ok());

    let record = fixture.read_output("record.csv");
    assert!(record.contains("overall,1,0,0,1,0.0,0.0,100.0"));
    assert!(!fixture.dir.path().join("output/players.csv").exists());
}
