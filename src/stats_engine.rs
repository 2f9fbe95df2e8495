//! Server-side shaping of `/api/stats` payloads, used by the offline demo
//! source. The HTTP path never calls into this module: the real server does
//! this work and the client renders whatever it is given.

use std::cmp::Ordering;

use anyhow::{Result, bail};
use crate::state::{
    ChartData, DashboardData, Filter, League, Meta, Player, ScatterPoint, TopScorer,
};

pub const TOP_SCORERS_LIMIT: usize = 10;
pub const SCATTER_MIN_GOALS: f64 = 5.0;
pub const AVG_XG_MIN_MINUTES: f64 = 500.0;
pub const TABLE_PAGE_SIZE: usize = 50;

/// Per-player totals over the whole season range.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub player_name: String,
    pub team_name: String,
    pub league: League,
    pub minutes: f64,
    pub goals: f64,
    pub xg: f64,
    pub xg_per90: f64,
}

impl PlayerRecord {
    fn table_row(&self) -> Player {
        Player {
            player_name: self.player_name.clone(),
            team_name: self.team_name.clone(),
            league: self.league.wire_value().to_string(),
            minutes: self.minutes,
            goals: self.goals,
            xg: self.xg,
        }
    }
}

pub fn filter_records<'a>(records: &'a [PlayerRecord], filter: &Filter) -> Vec<&'a PlayerRecord> {
    let needle = filter.search.to_lowercase();
    records
        .iter()
        .filter(|r| filter.league == League::All || r.league == filter.league)
        .filter(|r| needle.is_empty() || r.player_name.to_lowercase().contains(&needle))
        .collect()
}

pub fn build_dashboard(records: &[PlayerRecord], filter: &Filter) -> Result<DashboardData> {
    if records.is_empty() {
        bail!("No data loaded");
    }

    let filtered = filter_records(records, filter);

    let meta = Meta {
        total_players: filtered.len() as f64,
        total_goals: filtered.iter().map(|r| r.goals).sum(),
        avg_xg: average_xg_per90(&filtered),
    };

    let mut by_goals = filtered.clone();
    // Stable sort keeps first-seen order among equal goal counts.
    by_goals.sort_by(|a, b| b.goals.partial_cmp(&a.goals).unwrap_or(Ordering::Equal));
    let top_scorers = by_goals
        .iter()
        .take(TOP_SCORERS_LIMIT)
        .map(|r| TopScorer {
            player_name: r.player_name.clone(),
            goals: r.goals,
            league: r.league.wire_value().to_string(),
        })
        .collect();

    let scatter = filtered
        .iter()
        .filter(|r| r.goals > SCATTER_MIN_GOALS)
        .map(|r| ScatterPoint {
            player_name: r.player_name.clone(),
            goals: r.goals,
            xg: r.xg,
            league: r.league.wire_value().to_string(),
        })
        .collect();

    let table = filtered
        .iter()
        .take(TABLE_PAGE_SIZE)
        .map(|r| r.table_row())
        .collect();

    Ok(DashboardData {
        meta,
        charts: ChartData {
            top_scorers,
            scatter,
        },
        table,
    })
}

/// Zero for an empty selection; null when nobody cleared the minutes bar
/// (where the pandas server would emit a bare `NaN` that no JSON parser accepts).
fn average_xg_per90(filtered: &[&PlayerRecord]) -> Option<f64> {
    if filtered.is_empty() {
        return Some(0.0);
    }
    let regulars: Vec<f64> = filtered
        .iter()
        .filter(|r| r.minutes > AVG_XG_MIN_MINUTES)
        .map(|r| r.xg_per90)
        .collect();
    if regulars.is_empty() {
        return None;
    }
    let mean = regulars.iter().sum::<f64>() / regulars.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}
