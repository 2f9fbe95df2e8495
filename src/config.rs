use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    Http,
    Demo,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub source: StatsSource,
    pub request_timeout: Duration,
    pub fetch_parallelism: usize,
    pub demo_latency: Duration,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            source: StatsSource::Http,
            request_timeout: Duration::from_secs(10),
            fetch_parallelism: 4,
            demo_latency: Duration::from_millis(400),
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Reads the process environment. Call after `dotenvy` has loaded any
    /// `.env` files so those values are visible here.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base = opt_env("STATS_API_BASE")
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);
        let source = match opt_env("STATS_SOURCE")
            .map(|val| val.trim().to_lowercase())
            .as_deref()
        {
            Some("demo") | Some("fake") | Some("offline") => StatsSource::Demo,
            _ => StatsSource::Http,
        };
        let request_timeout = Duration::from_secs(
            opt_env("STATS_TIMEOUT_SECS")
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(10)
                .clamp(1, 120),
        );
        let fetch_parallelism = opt_env("FETCH_PARALLELISM")
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(defaults.fetch_parallelism)
            .clamp(1, 16);
        let demo_latency = Duration::from_millis(
            opt_env("DEMO_LATENCY_MS")
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(400)
                .min(10_000),
        );
        let export_dir = opt_env("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        Self {
            api_base,
            source,
            request_timeout,
            fetch_parallelism,
            demo_latency,
            export_dir,
        }
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        if val.trim().is_empty() {
            None
        } else {
            Some(val)
        }
    })
}
