//! Taxflap entry point
//!
//! Runs one round natively with the autopilot at the controls.
//!
//! Usage: `taxflap [CONFIG.json] [--out DIR] [--seed N] [--fast]`
//!
//! With `--out`, the finalized record is written to `DIR/<roundId>.json` and
//! the best-profit board is kept in `DIR/highscores.json`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use taxflap::persistence::JsonDirSink;
use taxflap::platform::{
    Autopilot, HeadlessScheduler, IntervalScheduler, RoundObserver, Session, TickScheduler,
};
use taxflap::sim::{RoundRecord, Snapshot, Stage};
use taxflap::{HighScores, RoundConfig};

/// Logs a HUD line once per simulated second
struct HudLogger {
    ticks_per_second: u64,
}

impl RoundObserver for HudLogger {
    fn on_frame(&mut self, snapshot: &Snapshot) {
        if snapshot.stage != Stage::Playing || snapshot.frame % self.ticks_per_second != 0 {
            return;
        }
        log::info!(
            "t={:>3}s  rate {:>3}/s  tax {:>2}/s  produced {:>5}  taxed {:>5}  profit {:>5}",
            snapshot.timer_seconds,
            snapshot.production_rate,
            snapshot.current_tax_rate,
            snapshot.score_produced,
            snapshot.score_taxed,
            snapshot.profit
        );
    }

    fn on_round_complete(&mut self, record: &RoundRecord) {
        log::info!(
            "Round complete: produced {}, taxed {}, profit {}",
            record.produced,
            record.taxed,
            record.profit
        );
    }
}

#[derive(Debug, Parser)]
#[command(name = "taxflap", version)]
#[command(about = "Play one Taxflap round with the autopilot at the controls")]
struct Args {
    /// Round config JSON (defaults to a built-in demo round)
    config: Option<PathBuf>,

    /// Directory for the round record and highscores.json
    #[arg(long)]
    out: Option<PathBuf>,

    /// Autopilot RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Run without real-time pacing
    #[arg(long)]
    fast: bool,
}

/// Demo round used when no config file is given
fn demo_config() -> RoundConfig {
    RoundConfig::default()
        .with_tax_zone(5, 15, 4)
        .with_tax_zone(25, 35, 8)
        .with_tax_zone(30, 40, 2)
        .with_tax_zone(50, 58, 6)
}

fn run(args: Args) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => RoundConfig::load(path).map_err(|e| e.to_string())?,
        None => demo_config(),
    };
    if args.out.is_some() && config.round_id.is_none() {
        config.round_id = Some(format!("demo-{}", args.seed));
    }

    let out_dir = args.out.clone().unwrap_or_else(|| PathBuf::from("."));
    let hud = HudLogger {
        ticks_per_second: config.ticks_per_second(),
    };
    let frame_ms = config.frame_duration_ms;
    let round_id = config.round_id.clone();
    let mut session =
        Session::new(config, JsonDirSink::new(&out_dir), hud).map_err(|e| e.to_string())?;
    let mut pilot = Autopilot::new(args.seed);

    let mut scheduler: Box<dyn TickScheduler> = if args.fast {
        Box::new(HeadlessScheduler::new())
    } else {
        Box::new(IntervalScheduler::from_frame_ms(frame_ms))
    };

    let record = session
        .run(scheduler.as_mut(), &mut pilot)
        .cloned()
        .ok_or("round ended without a record")?;

    if args.out.is_some() {
        let path = out_dir.join("highscores.json");
        let mut scores = HighScores::load(&path);
        match scores.add_record(&record, round_id.as_deref()) {
            Some(rank) => log::info!("New high score! Rank #{}", rank),
            None => log::info!("Best profit so far: {:?}", scores.best()),
        }
        if let Err(e) = scores.save(&path) {
            log::warn!("Could not save high scores: {}", e);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Taxflap (native) starting...");

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
