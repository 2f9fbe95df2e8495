use std::collections::VecDeque;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Players,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum League {
    #[default]
    All,
    EPL,
    LaLiga,
    Bundesliga,
}

impl League {
    pub const ALL: [League; 4] = [
        League::All,
        League::EPL,
        League::LaLiga,
        League::Bundesliga,
    ];

    /// Value sent as the `league` query parameter.
    pub fn wire_value(self) -> &'static str {
        match self {
            League::All => "All",
            League::EPL => "EPL",
            League::LaLiga => "LaLiga",
            League::Bundesliga => "Bundesliga",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub fn league_label(league: League) -> &'static str {
    match league {
        League::All => "All Leagues",
        League::EPL => "Premier League",
        League::LaLiga => "La Liga",
        League::Bundesliga => "Bundesliga",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub league: League,
    pub search: String,
}

// Server payloads come from pandas, so any field may be null and integer
// columns may arrive as floats.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: Meta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub charts: ChartData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub table: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_players: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_goals: f64,
    #[serde(default)]
    pub avg_xg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_scorers: Vec<TopScorer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scatter: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopScorer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub league: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScatterPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub xg: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub league: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub league: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub minutes: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub xg: f64,
}

/// One fetch, tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    pub seq: u64,
    pub filter: Filter,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub tab: Tab,
    pub filter: Filter,
    pub data: Option<DashboardData>,
    pub loading: bool,
    pub search_active: bool,
    pub table_selected: usize,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
    pub updated_at: Option<String>,
    /// Sequence number of the most recently issued request.
    pub issued_seq: u64,
    /// Sequence number of the response currently held in `data`.
    pub applied_seq: u64,
    /// Newest sequence number that has settled, successfully or not.
    /// Responses at or below it are stale.
    pub settled_seq: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            tab: Tab::Dashboard,
            filter: Filter::default(),
            data: None,
            loading: true,
            search_active: false,
            table_selected: 0,
            help_overlay: false,
            logs: VecDeque::new(),
            updated_at: None,
            issued_seq: 0,
            applied_seq: 0,
            settled_seq: 0,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Stamps a new request for the current filter and marks the state as loading.
    pub fn begin_request(&mut self) -> StatsRequest {
        self.issued_seq += 1;
        self.loading = true;
        StatsRequest {
            seq: self.issued_seq,
            filter: self.filter.clone(),
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            Tab::Dashboard => Tab::Players,
            Tab::Players => Tab::Dashboard,
        };
    }

    /// Returns true when the league actually changed.
    pub fn set_league(&mut self, league: League) -> bool {
        if self.filter.league == league {
            return false;
        }
        self.filter.league = league;
        true
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filter.search.push(c);
    }

    pub fn pop_search_char(&mut self) -> bool {
        self.filter.search.pop().is_some()
    }

    pub fn clear_search(&mut self) -> bool {
        if self.filter.search.is_empty() {
            return false;
        }
        self.filter.search.clear();
        true
    }

    pub fn table_len(&self) -> usize {
        self.data.as_ref().map(|d| d.table.len()).unwrap_or(0)
    }

    pub fn select_next(&mut self) {
        let len = self.table_len();
        if len == 0 {
            self.table_selected = 0;
            return;
        }
        self.table_selected = (self.table_selected + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        self.table_selected = self.table_selected.saturating_sub(1);
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.data
            .as_ref()
            .and_then(|d| d.table.get(self.table_selected))
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    StatsLoaded { seq: u64, data: DashboardData },
    StatsFailed { seq: u64, error: String },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchStats(StatsRequest),
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::StatsLoaded { seq, data } => {
            if seq >= state.issued_seq {
                state.loading = false;
            }
            if seq <= state.settled_seq {
                state.push_log(format!(
                    "[INFO] Dropped stale response #{seq} (newer #{} already settled)",
                    state.settled_seq
                ));
                return;
            }
            state.applied_seq = seq;
            state.settled_seq = seq;
            let rows = data.table.len();
            state.data = Some(data);
            state.table_selected = state.table_selected.min(rows.saturating_sub(1));
            state.updated_at = Some(Local::now().format("%H:%M:%S").to_string());
        }
        Delta::StatsFailed { seq, error } => {
            if seq >= state.issued_seq {
                state.loading = false;
            }
            state.settled_seq = state.settled_seq.max(seq);
            state.push_log(format!("[WARN] Stats fetch failed: {error}"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
