use clap::Parser;
use incident_core::DashboardConfig;

/// Headless runner for the incident dashboard simulation.
#[derive(Parser, Debug, Clone)]
#[command(name = "incident-host")]
#[command(about = "Runs the simulated incident feed and logs every update")]
pub struct Args {
    /// Run a fixed number of ticks back to back, file one report, then print a snapshot
    #[arg(long)]
    pub demo: bool,

    /// Ticks to run in demo mode
    #[arg(long, default_value_t = 12)]
    pub ticks: u32,

    /// RNG seed for reproducible runs
    #[arg(long, env = "INCIDENT_SEED")]
    pub seed: Option<u64>,

    /// Seconds between simulated updates
    #[arg(long, env = "INCIDENT_TICK_SECS")]
    pub tick_secs: Option<u64>,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn dashboard_config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::from_env();
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(secs) = self.tick_secs {
            config.tick_interval_secs = secs;
        }
        config
    }
}
