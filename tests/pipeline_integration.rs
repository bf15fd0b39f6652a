//! Integration tests for the snapshot-to-report pipeline using a fixture of
//! the rendered ownership table.

use dfs_crawler::analysis::{self, Metric};
use dfs_crawler::config::OutputFormat;
use dfs_crawler::format::Formatter;
use dfs_crawler::ownership::parser::{Parser, RowOutcome};
use dfs_crawler::ownership::session::HarvestSession;
use dfs_crawler::ownership::Sport;

const RENDERED_FIXTURE: &str = include_str!("fixtures/rendered_table.html");

#[test]
fn test_parse_rendered_snapshot() {
    let parser = Parser::new(Sport::Mlb);

    assert!(parser.container_present(RENDERED_FIXTURE));
    // 5 row elements rendered, including the incomplete one and a duplicate
    assert_eq!(parser.row_count(RENDERED_FIXTURE), 5);

    let outcomes = parser.parse_rows(RENDERED_FIXTURE);
    let complete = outcomes.iter().filter(|o| matches!(o, RowOutcome::Row(_))).count();
    let skipped = outcomes.iter().filter(|o| matches!(o, RowOutcome::Skipped(_))).count();
    assert_eq!(complete, 4);
    assert_eq!(skipped, 1);
}

#[test]
fn test_snapshot_through_session_dedupes() {
    let parser = Parser::new(Sport::Mlb);
    let mut session = HarvestSession::new();

    let new_players = session.absorb(&parser.parse_rows(RENDERED_FIXTURE));
    // The duplicated Aaron Judge row collapses to one record
    assert_eq!(new_players, 3);
    assert_eq!(session.skipped_count(), 1);

    let rows = session.into_rows();
    let players: Vec<_> = rows.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(players, vec!["Aaron Judge", "Juan Soto", "Shohei Ohtani"]);
}

#[test]
fn test_snapshot_to_normalized_records() {
    let parser = Parser::new(Sport::Mlb);
    let mut session = HarvestSession::new();
    session.absorb(&parser.parse_rows(RENDERED_FIXTURE));
    let rows = session.into_rows();

    let records = analysis::normalize(&rows).unwrap();
    assert_eq!(records.len(), 3);

    let judge = &records[0];
    assert_eq!(judge.player(), "Aaron Judge");
    assert_eq!(judge.team(), "NYY");
    assert_eq!(judge.dk_ownership_pct, 31.2);
    assert_eq!(judge.fd_ownership_pct, 24.8);
    assert!((judge.combined_ownership - 56.0).abs() < 1e-9);
    assert_eq!(judge.min_ownership, 24.8);
}

#[test]
fn test_snapshot_to_leaders_and_top_n() {
    let parser = Parser::new(Sport::Mlb);
    let mut session = HarvestSession::new();
    session.absorb(&parser.parse_rows(RENDERED_FIXTURE));
    let records = analysis::normalize(&session.into_rows()).unwrap();

    let leaders = analysis::highest_in_each_category(&records).unwrap();
    assert_eq!(leaders.by_dk.player(), "Aaron Judge"); // 31.2
    assert_eq!(leaders.by_fd.player(), "Juan Soto"); // 30.1
    assert_eq!(leaders.by_combined.player(), "Shohei Ohtani"); // 58.0
    assert_eq!(leaders.by_min.player(), "Shohei Ohtani"); // 29.0

    let top = analysis::top_n(&records, 2, Metric::Combined).unwrap();
    let players: Vec<_> = top.iter().map(|r| r.player()).collect();
    assert_eq!(players, vec!["Shohei Ohtani", "Aaron Judge"]);

    // Asking for more rows than exist returns everything, sorted
    let all = analysis::top_n(&records, 50, Metric::Combined).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn test_snapshot_to_rendered_output() {
    let parser = Parser::new(Sport::Mlb);
    let mut session = HarvestSession::new();
    session.absorb(&parser.parse_rows(RENDERED_FIXTURE));
    let records = analysis::normalize(&session.into_rows()).unwrap();

    let table = Formatter::new(OutputFormat::Table).format_records(&records);
    assert!(table.contains("Aaron Judge"));
    assert!(table.contains("Total: 3 players"));

    let csv = Formatter::new(OutputFormat::Csv).format_records(&records);
    assert!(csv.lines().next().unwrap().starts_with("Team,Player,DK Price"));
    assert_eq!(csv.lines().count(), 4);

    let json = Formatter::new(OutputFormat::Json).format_records(&records);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
}

#[test]
fn test_wrong_sport_sees_no_container() {
    let parser = Parser::new(Sport::Nba);
    assert!(!parser.container_present(RENDERED_FIXTURE));
}
