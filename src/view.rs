//! Plain-data view models for the dashboard widgets. Everything here maps
//! server values onto display strings; nothing is aggregated.

use crate::state::{ChartData, Meta, Player};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
}

pub fn dashboard_cards(meta: &Meta) -> [MetricCard; 3] {
    [
        MetricCard {
            title: "Total Players",
            value: format_plain(meta.total_players),
        },
        MetricCard {
            title: "Total Goals",
            value: format_thousands(meta.total_goals),
        },
        MetricCard {
            title: "Avg xG per 90",
            value: meta
                .avg_xg
                .map(format_plain)
                .unwrap_or_else(|| "-".to_string()),
        },
    ]
}

/// Shortest round-trip rendering, so `12.0` shows as `12` and `0.35` as `0.35`.
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("{value}")
}

/// en-US grouping with at most three fraction digits: `1234` -> `1,234`,
/// `1234567.5` -> `1,234,567.5`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, d) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d as char);
    }

    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// Two fraction digits with ties rounded up, matching a browser's
/// `toFixed(2)`: `0.125` -> `0.13`, `1.005` (really 1.00499..) -> `1.00`.
pub fn format_fixed2(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    // Exact for every double above ~1e-8; the third fraction digit decides.
    let exact = format!("{:.80}", value.abs());
    let Some((int_part, frac)) = exact.split_once('.') else {
        return format!("{value:.2}");
    };
    let Ok(int) = int_part.parse::<u128>() else {
        return format!("{value:.2}");
    };
    let frac = frac.as_bytes();
    let mut cents = int * 100 + u128::from(frac[0] - b'0') * 10 + u128::from(frac[1] - b'0');
    if frac[2] >= b'5' {
        cents += 1;
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

pub const TABLE_HEADER: [&str; 6] = ["Player", "Team", "League", "Mins", "Goals", "xG"];

pub fn player_row(player: &Player) -> [String; 6] {
    [
        player.player_name.clone(),
        player.team_name.clone(),
        player.league.clone(),
        format_plain(player.minutes),
        format_plain(player.goals),
        format_fixed2(player.xg),
    ]
}

pub fn player_rows(players: &[Player]) -> Vec<[String; 6]> {
    players.iter().map(player_row).collect()
}

/// `(label, value)` per bar, in delivered order. Negative or fractional goal
/// counts are clamped/rounded since the bar widget takes whole numbers.
pub fn top_scorer_bars(charts: &ChartData) -> Vec<(String, u64)> {
    charts
        .top_scorers
        .iter()
        .map(|s| (s.player_name.clone(), s.goals.max(0.0).round() as u64))
        .collect()
}

/// `(xg, goals)` pairs for the scatter plot.
pub fn scatter_points(charts: &ChartData) -> Vec<(f64, f64)> {
    charts
        .scatter
        .iter()
        .filter(|p| p.xg.is_finite() && p.goals.is_finite())
        .map(|p| (p.xg, p.goals))
        .collect()
}

/// Axis upper bounds `(x_max, y_max)`, padded a little and never zero.
pub fn scatter_bounds(points: &[(f64, f64)]) -> (f64, f64) {
    let x_max = points.iter().map(|p| p.0).fold(0.0_f64, f64::max);
    let y_max = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
    (pad_bound(x_max), pad_bound(y_max))
}

fn pad_bound(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    (max * 1.1).ceil()
}
