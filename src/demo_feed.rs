use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::{Delta, League, ProviderCommand, StatsRequest};
use crate::stats_engine::{self, PlayerRecord};

const ROSTER_SEED: u64 = 2014;

/// Offline provider: answers stats requests from a seeded synthetic roster.
/// Latency is randomized per request so responses can arrive out of order.
pub fn spawn_demo_provider(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    latency: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let roster = Arc::new(seed_roster(ROSTER_SEED));
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Demo source ready ({} players)",
            roster.len()
        )));

        let mut rng = rand::thread_rng();
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::FetchStats(request) => {
                    let delay = jitter(latency, &mut rng);
                    let roster = Arc::clone(&roster);
                    let tx = tx.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = tx.send(answer(&roster, request));
                    });
                }
            }
        }
    })
}

pub fn answer(roster: &[PlayerRecord], request: StatsRequest) -> Delta {
    match stats_engine::build_dashboard(roster, &request.filter) {
        Ok(data) => Delta::StatsLoaded {
            seq: request.seq,
            data,
        },
        Err(err) => Delta::StatsFailed {
            seq: request.seq,
            error: format!("{err:#}"),
        },
    }
}

fn jitter(latency: Duration, rng: &mut impl Rng) -> Duration {
    let base = latency.as_millis() as u64;
    if base == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rng.gen_range(base / 2..=base * 2))
}

/// Deterministic for a given seed.
pub fn seed_roster(seed: u64) -> Vec<PlayerRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::new();
    for (league, teams) in seed_teams() {
        for team in teams {
            for (idx, name) in squad_names(league, team).into_iter().enumerate() {
                out.push(seed_player(&mut rng, league, team, name, idx));
            }
        }
    }
    out
}

fn seed_teams() -> Vec<(League, Vec<&'static str>)> {
    vec![
        (
            League::EPL,
            vec!["Tottenham", "Liverpool", "Manchester City", "Arsenal"],
        ),
        (
            League::LaLiga,
            vec!["Barcelona", "Real Madrid", "Atletico Madrid", "Sevilla"],
        ),
        (
            League::Bundesliga,
            vec!["Bayern Munich", "Borussia Dortmund", "RB Leipzig", "Schalke 04"],
        ),
    ]
}

fn squad_names(league: League, team: &str) -> Vec<String> {
    const FIRST: [&str; 8] = ["Alex", "Marco", "Luis", "Jonas", "Pablo", "Kai", "Sam", "Leon"];
    const LAST: [&str; 8] = [
        "Moreno", "Fischer", "Walsh", "Ortega", "Brandt", "Hughes", "Navarro", "Keller",
    ];

    let mut names: Vec<String> = marquee_names(team).iter().map(|s| s.to_string()).collect();
    let offset = team.len() + league.wire_value().len();
    while names.len() < 6 {
        let i = names.len() + offset;
        names.push(format!("{} {}", FIRST[i % FIRST.len()], LAST[(i * 3) % LAST.len()]));
    }
    names
}

fn marquee_names(team: &str) -> &'static [&'static str] {
    match team {
        "Tottenham" => &["Harry Kane", "Son Heung-Min"],
        "Liverpool" => &["Mohamed Salah", "Sadio Mané"],
        "Manchester City" => &["Sergio Agüero", "Raheem Sterling"],
        "Arsenal" => &["Pierre-Emerick Aubameyang"],
        "Barcelona" => &["Lionel Messi", "Luis Suárez"],
        "Real Madrid" => &["Cristiano Ronaldo", "Karim Benzema"],
        "Atletico Madrid" => &["Antoine Griezmann"],
        "Bayern Munich" => &["Robert Lewandowski", "Thomas Müller"],
        "Borussia Dortmund" => &["Marco Reus"],
        "RB Leipzig" => &["Timo Werner"],
        _ => &[],
    }
}

fn seed_player(
    rng: &mut StdRng,
    league: League,
    team: &str,
    name: String,
    squad_idx: usize,
) -> PlayerRecord {
    // Earlier squad slots are the attackers.
    let goal_rate = match squad_idx {
        0 | 1 => rng.gen_range(0.45..0.85),
        2 | 3 => rng.gen_range(0.10..0.35),
        _ => rng.gen_range(0.01..0.08),
    };
    let minutes = rng.gen_range(300..=14_000) as f64;
    let games = minutes / 90.0;
    let xg = (games * goal_rate * rng.gen_range(0.8..1.15) * 100.0).round() / 100.0;
    let goals = (xg * rng.gen_range(0.85..1.25)).round();
    let xg_per90 = if games > 0.0 {
        (xg / games * 100.0).round() / 100.0
    } else {
        0.0
    };

    PlayerRecord {
        player_name: name,
        team_name: team.to_string(),
        league,
        minutes,
        goals,
        xg,
        xg_per90,
    }
}
