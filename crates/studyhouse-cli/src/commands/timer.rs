//! Focus-timer commands.
//!
//! The timer engine is parked in the key/value store between invocations;
//! each command loads it, flushes elapsed wall time with `tick()`, applies
//! the action, and saves it back.

use clap::Subcommand;
use studyhouse_core::{Config, Database, FocusTimer, TimerDurations, TimerMode};

const TIMER_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or restart) the countdown
    Start {
        /// Mode: focus, short, or long
        #[arg(long)]
        mode: Option<String>,
    },
    /// Pause the countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Reset the current mode's countdown
    Reset,
    /// Print current timer state as JSON
    Status,
}

fn durations(config: &Config) -> TimerDurations {
    TimerDurations {
        focus_min: config.timer.focus_minutes,
        short_break_min: config.timer.short_break_minutes,
        long_break_min: config.timer.long_break_minutes,
    }
}

fn load_timer(db: &Database, durations: TimerDurations) -> FocusTimer {
    if let Ok(Some(json)) = db.kv_get(TIMER_KEY) {
        if let Ok(timer) = serde_json::from_str::<FocusTimer>(&json) {
            return timer;
        }
    }
    FocusTimer::new(durations)
}

fn save_timer(db: &Database, timer: &FocusTimer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    db.kv_set(TIMER_KEY, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut timer = load_timer(&db, durations(&config));
    timer.tick();

    match action {
        TimerAction::Start { mode } => {
            if let Some(mode) = mode {
                let mode = match mode.as_str() {
                    "focus" => TimerMode::Focus,
                    "short" => TimerMode::ShortBreak,
                    "long" => TimerMode::LongBreak,
                    other => return Err(format!("unknown mode: {other}").into()),
                };
                timer.switch_mode(mode);
            }
            timer.start();
        }
        TimerAction::Pause => timer.pause(),
        TimerAction::Resume => timer.resume(),
        TimerAction::Reset => timer.reset(),
        TimerAction::Status => {}
    }

    save_timer(&db, &timer)?;
    println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
    Ok(())
}
