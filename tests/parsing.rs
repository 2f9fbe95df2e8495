use std::fs;
use std::path::PathBuf;

use analytics_terminal::state::{Filter, League};
use analytics_terminal::stats_fetch::{parse_stats_json, stats_url};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_stats_fixture() {
    let raw = read_fixture("stats_response.json");
    let data = parse_stats_json(&raw).expect("fixture should parse");
    assert_eq!(data.meta.total_players, 3.0);
    assert_eq!(data.meta.total_goals, 1234.0);
    assert_eq!(data.meta.avg_xg, Some(0.41));
    assert_eq!(data.charts.top_scorers.len(), 2);
    assert_eq!(data.charts.top_scorers[0].player_name, "Harry Kane");
    assert_eq!(data.charts.scatter[1].xg, 47.9);
    assert_eq!(data.table.len(), 3);
    assert_eq!(data.table[0].team_name, "Tottenham");
    assert_eq!(data.table[0].minutes, 15421.0);
}

#[test]
fn null_and_missing_fields_fall_back_to_defaults() {
    let raw = read_fixture("stats_response.json");
    let data = parse_stats_json(&raw).expect("fixture should parse");
    let row = &data.table[2];
    assert_eq!(row.player_name, "Kane Wilson");
    assert_eq!(row.team_name, "");
    assert_eq!(row.minutes, 90.0);

    let sparse = parse_stats_json(r#"{"meta": {"total_players": 0, "avg_xg": null}}"#)
        .expect("sparse payload should parse");
    assert!(sparse.table.is_empty());
    assert!(sparse.charts.top_scorers.is_empty());
    assert_eq!(sparse.meta.avg_xg, None);
}

#[test]
fn server_error_body_is_an_error() {
    let err = parse_stats_json(r#"{"error": "No data loaded"}"#).unwrap_err();
    assert!(format!("{err:#}").contains("No data loaded"));
}

#[test]
fn malformed_bodies_are_errors() {
    assert!(parse_stats_json("").is_err());
    assert!(parse_stats_json("null").is_err());
    assert!(parse_stats_json("<html>502 Bad Gateway</html>").is_err());
    assert!(parse_stats_json("[1, 2, 3]").is_err());
    // pandas emits a bare NaN when the xG average is undefined.
    assert!(parse_stats_json(r#"{"meta": {"avg_xg": NaN}}"#).is_err());
}

#[test]
fn stats_url_encodes_filter_as_query() {
    let filter = Filter {
        league: League::EPL,
        search: "Kane".to_string(),
    };
    let url = stats_url("http://localhost:5000", &filter).expect("valid base");
    assert_eq!(url, "http://localhost:5000/api/stats?league=EPL&search=Kane");
}

#[test]
fn stats_url_uses_form_encoding_and_trims_base() {
    let filter = Filter {
        league: League::All,
        search: "Son Heung&Min".to_string(),
    };
    let url = stats_url("http://localhost:5000/", &filter).expect("valid base");
    assert_eq!(
        url,
        "http://localhost:5000/api/stats?league=All&search=Son+Heung%26Min"
    );

    let empty = stats_url("http://stats.local:8080", &Filter::default()).expect("valid base");
    assert_eq!(empty, "http://stats.local:8080/api/stats?league=All&search=");
}

#[test]
fn stats_url_rejects_garbage_base() {
    assert!(stats_url("not a url", &Filter::default()).is_err());
}
