use analytics_terminal::state::{ChartData, Meta, Player, ScatterPoint, TopScorer};
use analytics_terminal::view::{
    dashboard_cards, format_fixed2, format_thousands, player_rows, scatter_bounds,
    scatter_points, top_scorer_bars,
};

fn player(name: &str, xg: f64) -> Player {
    Player {
        player_name: name.to_string(),
        team_name: "Team".to_string(),
        league: "EPL".to_string(),
        minutes: 900.0,
        goals: 3.0,
        xg,
    }
}

#[test]
fn dashboard_cards_format_only_total_goals() {
    let meta = Meta {
        total_players: 4321.0,
        total_goals: 1234.0,
        avg_xg: Some(0.35),
    };
    let cards = dashboard_cards(&meta);
    assert_eq!(cards[0].title, "Total Players");
    assert_eq!(cards[0].value, "4321");
    assert_eq!(cards[1].title, "Total Goals");
    assert_eq!(cards[1].value, "1,234");
    assert_eq!(cards[2].title, "Avg xG per 90");
    assert_eq!(cards[2].value, "0.35");
}

#[test]
fn missing_average_renders_dash() {
    let meta = Meta {
        avg_xg: None,
        ..Meta::default()
    };
    assert_eq!(dashboard_cards(&meta)[2].value, "-");
    assert_eq!(dashboard_cards(&meta)[1].value, "0");
}

#[test]
fn thousands_grouping() {
    assert_eq!(format_thousands(0.0), "0");
    assert_eq!(format_thousands(999.0), "999");
    assert_eq!(format_thousands(1000.0), "1,000");
    assert_eq!(format_thousands(1234567.0), "1,234,567");
    assert_eq!(format_thousands(1234.5), "1,234.5");
    assert_eq!(format_thousands(1234.56789), "1,234.568");
    assert_eq!(format_thousands(-4500.0), "-4,500");
}

#[test]
fn player_rows_keep_order_and_two_decimal_xg() {
    let players = vec![
        player("Zed", 0.004),
        player("Amy", 12.345),
        player("Bob", 7.0),
        player("Cy", 0.125),
        player("Dee", 3.625),
        player("Eve", 1.375),
    ];
    let rows = player_rows(&players);
    assert_eq!(rows.len(), 6);
    let names: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(names, vec!["Zed", "Amy", "Bob", "Cy", "Dee", "Eve"]);
    let xg: Vec<&str> = rows.iter().map(|r| r[5].as_str()).collect();
    // Exact binary ties round up.
    assert_eq!(xg, vec!["0.00", "12.35", "7.00", "0.13", "3.63", "1.38"]);
    assert_eq!(rows[0][3], "900");
    assert_eq!(rows[0][4], "3");
}

#[test]
fn fixed2_rounds_on_the_stored_value() {
    assert_eq!(format_fixed2(1.005), "1.00");
    assert_eq!(format_fixed2(2.5), "2.50");
    assert_eq!(format_fixed2(-0.125), "-0.13");
    assert_eq!(format_fixed2(0.995), "0.99");
    assert_eq!(format_fixed2(f64::NAN), "-");
}

#[test]
fn chart_models_follow_delivered_order() {
    let charts = ChartData {
        top_scorers: vec![
            TopScorer {
                player_name: "B".to_string(),
                goals: 5.0,
                league: "EPL".to_string(),
            },
            TopScorer {
                player_name: "A".to_string(),
                goals: 9.0,
                league: "EPL".to_string(),
            },
        ],
        scatter: vec![ScatterPoint {
            player_name: "A".to_string(),
            goals: 9.0,
            xg: 7.5,
            league: "EPL".to_string(),
        }],
    };
    let bars = top_scorer_bars(&charts);
    assert_eq!(bars, vec![("B".to_string(), 5), ("A".to_string(), 9)]);

    let points = scatter_points(&charts);
    assert_eq!(points, vec![(7.5, 9.0)]);
    let (x_max, y_max) = scatter_bounds(&points);
    assert!(x_max >= 7.5);
    assert!(y_max >= 9.0);
    assert_eq!(scatter_bounds(&[]), (1.0, 1.0));
}
