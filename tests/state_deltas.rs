use analytics_terminal::state::{
    AppState, DashboardData, Delta, Meta, Player, apply_delta,
};

fn data_with_goals(total_goals: f64, rows: usize) -> DashboardData {
    DashboardData {
        meta: Meta {
            total_players: rows as f64,
            total_goals,
            avg_xg: Some(0.3),
        },
        table: (0..rows)
            .map(|i| Player {
                player_name: format!("P{i}"),
                ..Player::default()
            })
            .collect(),
        ..DashboardData::default()
    }
}

#[test]
fn starts_loading_without_data() {
    let state = AppState::new();
    assert!(state.loading);
    assert!(state.data.is_none());
}

#[test]
fn loaded_response_replaces_data_and_clears_loading() {
    let mut state = AppState::new();
    let req = state.begin_request();

    apply_delta(
        &mut state,
        Delta::StatsLoaded {
            seq: req.seq,
            data: data_with_goals(10.0, 2),
        },
    );

    assert!(!state.loading);
    assert_eq!(state.applied_seq, req.seq);
    assert_eq!(state.data.as_ref().map(|d| d.meta.total_goals), Some(10.0));
    assert!(state.updated_at.is_some());
}

#[test]
fn failed_fetch_keeps_previous_data() {
    let mut state = AppState::new();
    let first = state.begin_request();
    apply_delta(
        &mut state,
        Delta::StatsLoaded {
            seq: first.seq,
            data: data_with_goals(10.0, 2),
        },
    );

    let second = state.begin_request();
    assert!(state.loading);
    apply_delta(
        &mut state,
        Delta::StatsFailed {
            seq: second.seq,
            error: "request failed: connection refused".to_string(),
        },
    );

    assert!(!state.loading);
    assert_eq!(state.data.as_ref().map(|d| d.meta.total_goals), Some(10.0));
    let last = state.logs.back().expect("failure should be logged");
    assert!(last.starts_with("[WARN]"));
    assert!(last.contains("connection refused"));
}

#[test]
fn failed_first_fetch_leaves_no_data_and_stops_loading() {
    let mut state = AppState::new();
    let req = state.begin_request();
    apply_delta(
        &mut state,
        Delta::StatsFailed {
            seq: req.seq,
            error: "invalid stats json".to_string(),
        },
    );
    assert!(state.data.is_none());
    assert!(!state.loading);
}

#[test]
fn stale_response_after_newer_one_is_dropped() {
    let mut state = AppState::new();
    let older = state.begin_request();
    let newer = state.begin_request();

    apply_delta(
        &mut state,
        Delta::StatsLoaded {
            seq: newer.seq,
            data: data_with_goals(99.0, 1),
        },
    );
    apply_delta(
        &mut state,
        Delta::StatsLoaded {
            seq: older.seq,
            data: data_with_goals(1.0, 5),
        },
    );

    assert_eq!(state.applied_seq, newer.seq);
    assert_eq!(state.data.as_ref().map(|d| d.meta.total_goals), Some(99.0));
    assert!(!state.loading);
}

#[test]
fn older_response_after_newest_failure_is_dropped() {
    let mut state = AppState::new();
    let first = state.begin_request();
    apply_delta(
        &mut state,
        Delta::StatsLoaded {
            seq: first.seq,
            data: data_with_goals(40.0, 3),
        },
    );

    state.filter.search = "Kan".to_string();
    let partial = state.begin_request();
    state.filter.search = "Kane".to_string();
    let full = state.begin_request();

    apply_delta(
        &mut state,
        Delta::StatsFailed {
            seq: full.seq,
            error: "http 500 Internal Server Error: boom".to_string(),
        },
    );
    apply_delta(
        &mut state,
        Delta::StatsLoaded {
            seq: partial.seq,
            data: data_with_goals(7.0, 1),
        },
    );

    assert_eq!(state.applied_seq, first.seq);
    assert_eq!(state.settled_seq, full.seq);
    assert_eq!(state.data.as_ref().map(|d| d.meta.total_goals), Some(40.0));
    assert!(!state.loading);
    assert!(
        state
            .logs
            .back()
            .expect("stale drop is logged")
            .contains("Dropped stale response")
    );
}

#[test]
fn older_response_in_order_is_applied_but_keeps_loading() {
    let mut state = AppState::new();
    let older = state.begin_request();
    let newer = state.begin_request();

    apply_delta(
        &mut state,
        Delta::StatsLoaded {
            seq: older.seq,
            data: data_with_goals(1.0, 1),
        },
    );
    assert!(state.loading, "newest request is still in flight");
    assert_eq!(state.applied_seq, older.seq);

    apply_delta(
        &mut state,
        Delta::StatsLoaded {
            seq: newer.seq,
            data: data_with_goals(2.0, 1),
        },
    );
    assert!(!state.loading);
    assert_eq!(state.data.as_ref().map(|d| d.meta.total_goals), Some(2.0));
}

#[test]
fn selection_is_clamped_when_table_shrinks() {
    let mut state = AppState::new();
    let first = state.begin_request();
    apply_delta(
        &mut state,
        Delta::StatsLoaded {
            seq: first.seq,
            data: data_with_goals(0.0, 10),
        },
    );
    for _ in 0..20 {
        state.select_next();
    }
    assert_eq!(state.table_selected, 9);

    let second = state.begin_request();
    apply_delta(
        &mut state,
        Delta::StatsLoaded {
            seq: second.seq,
            data: data_with_goals(0.0, 3),
        },
    );
    assert_eq!(state.table_selected, 2);
    assert_eq!(state.selected_player().map(|p| p.player_name.as_str()), Some("P2"));
}

#[test]
fn log_ring_is_capped() {
    let mut state = AppState::new();
    for i in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}
