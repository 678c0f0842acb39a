#![forbid(unsafe_code)]

//! Command-line options.
//!
//! Every flag can also be set through an `INVVIEW_*` environment variable;
//! an explicit flag wins over the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use invview_runtime::ProgramConfig;

use crate::app::AppConfig;
use crate::source::MockSource;
use crate::state::Variant;

#[derive(Debug, Clone, Parser)]
#[command(name = "invview", version, about = "Look up a player's profile and inventory")]
pub struct Opts {
    /// Screen layout to show.
    #[arg(long, value_enum, default_value_t = Variant::Profile, env = "INVVIEW_VARIANT")]
    pub variant: Variant,

    /// Simulated search latency in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 1500, env = "INVVIEW_LATENCY_MS")]
    pub latency_ms: u64,

    /// Seed for generated profile fields; OS entropy when absent.
    #[arg(long, env = "INVVIEW_SEED")]
    pub seed: Option<u64>,

    /// Interval between animation ticks in milliseconds.
    #[arg(
        long,
        value_name = "MS",
        default_value_t = 100,
        env = "INVVIEW_TICK_MS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,

    /// How long notifications stay on screen in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 4000, env = "INVVIEW_TOAST_MS")]
    pub toast_ms: u64,

    /// Quit automatically after this many milliseconds (0 = never).
    #[arg(long, value_name = "MS", default_value_t = 0, env = "INVVIEW_EXIT_AFTER_MS")]
    pub exit_after_ms: u64,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long, value_hint = clap::ValueHint::FilePath, env = "INVVIEW_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Draw inline instead of on the alternate screen.
    #[arg(long)]
    pub no_alt_screen: bool,
}

impl Opts {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn app_config(&self) -> AppConfig {
        let tick = self.tick();
        AppConfig {
            variant: self.variant,
            tick,
            toast_ticks: AppConfig::ticks_for(tick, Duration::from_millis(self.toast_ms)),
        }
    }

    pub fn program_config(&self) -> ProgramConfig {
        ProgramConfig {
            alternate_screen: !self.no_alt_screen,
            exit_after: (self.exit_after_ms > 0).then(|| Duration::from_millis(self.exit_after_ms)),
            ..ProgramConfig::default()
        }
    }

    pub fn source(&self) -> MockSource {
        let latency = Duration::from_millis(self.latency_ms);
        match self.seed {
            Some(seed) => MockSource::seeded(latency, seed),
            None => MockSource::from_entropy(latency),
        }
    }
}
