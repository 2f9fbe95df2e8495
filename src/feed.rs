use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::state::{Delta, ProviderCommand, StatsRequest};
use crate::stats_fetch;

/// HTTP provider. Each request runs on the fetch pool, so a slow earlier
/// request may finish after a faster later one; `apply_delta` sorts that out
/// by sequence number.
pub fn spawn_provider(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    config: &Config,
) -> thread::JoinHandle<()> {
    let base: Arc<str> = Arc::from(config.api_base.as_str());
    let timeout = config.request_timeout;
    let parallelism = config.fetch_parallelism;

    thread::spawn(move || {
        let pool = build_fetch_pool(parallelism);
        if pool.is_none() {
            let _ = tx.send(Delta::Log(
                "[WARN] Fetch pool unavailable, using one thread per request".to_string(),
            ));
        }

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::FetchStats(request) => {
                    let tx = tx.clone();
                    let base = Arc::clone(&base);
                    let job = move || run_fetch(&tx, &base, timeout, request);
                    match pool.as_ref() {
                        Some(pool) => pool.spawn(job),
                        None => {
                            thread::spawn(job);
                        }
                    }
                }
            }
        }
    })
}

fn run_fetch(tx: &Sender<Delta>, base: &str, timeout: Duration, request: StatsRequest) {
    let delta = match stats_fetch::fetch_stats(base, timeout, &request.filter) {
        Ok(data) => Delta::StatsLoaded {
            seq: request.seq,
            data,
        },
        Err(err) => Delta::StatsFailed {
            seq: request.seq,
            error: format!("{err:#}"),
        },
    };
    let _ = tx.send(delta);
}

fn build_fetch_pool(threads: usize) -> Option<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|idx| format!("stats-fetch-{idx}"))
        .build()
        .ok()
}
