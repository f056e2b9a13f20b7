use std::io::Write;
use std::time::Duration;

use clap::{Args, Subcommand};
use moon_core::notify;
use moon_core::timer::{Countdown, PhaseDurations, TimerSnapshot, TokioScheduler};
use moon_core::{Config, Event, TimerEngine};
use tracing::debug;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown in the foreground until enough phases finish
    Run(RunArgs),
    /// Print the initial timer state as JSON
    Status,
}

#[derive(Args)]
pub struct RunArgs {
    /// Stop after this many phase completions (0 runs until interrupted)
    #[arg(long, default_value = "1")]
    cycles: u32,
    /// Focus length in seconds (overrides config)
    #[arg(long)]
    focus_secs: Option<u64>,
    /// Break length in seconds (overrides config)
    #[arg(long)]
    break_secs: Option<u64>,
    /// Milliseconds between ticks (overrides config)
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Print one JSON object per tick and event
    #[arg(long)]
    json: bool,
    /// Do not play the completion cue
    #[arg(long)]
    silent: bool,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        TimerAction::Run(args) => run_countdown(&config, args),
        TimerAction::Status => {
            let engine = TimerEngine::with_durations(config.timer.durations()?);
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            Ok(())
        }
    }
}

fn run_countdown(config: &Config, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let durations = PhaseDurations::new(
        args.focus_secs.unwrap_or(config.timer.focus_secs),
        args.break_secs.unwrap_or(config.timer.break_secs),
    )?;
    let tick = Duration::from_millis(args.tick_ms.unwrap_or(config.timer.tick_ms));
    let notifier: Box<dyn notify::Notifier> = if args.silent {
        Box::new(notify::Silent)
    } else {
        notify::from_config(&config.notifications)
    };

    debug!(
        focus_secs = durations.focus_secs,
        break_secs = durations.break_secs,
        tick_ms = tick.as_millis() as u64,
        cycles = args.cycles,
        "running countdown"
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    rt.block_on(async {
        let mut countdown = Countdown::new(
            TimerEngine::with_durations(durations),
            TokioScheduler::new(),
            notifier,
        )
        .with_interval(tick);
        countdown.set_cue_enabled(config.settings.notifications);

        if let Some(event) = countdown.start() {
            emit_event(&event, args.json)?;
        }
        emit_tick(&countdown.engine().snapshot(), args.json)?;

        let mut completions = 0;
        loop {
            let event = countdown.next_tick().await;
            emit_tick(&countdown.engine().snapshot(), args.json)?;
            if let Some(event) = event {
                emit_event(&event, args.json)?;
                completions += 1;
                if args.cycles > 0 && completions >= args.cycles {
                    break;
                }
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn emit_tick(snapshot: &TimerSnapshot, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string(snapshot)?)?;
    } else {
        write!(
            out,
            "\r{:<10} {} {}",
            snapshot.phase.title(),
            snapshot.clock,
            progress_bar(snapshot.progress, 20)
        )?;
        out.flush()?;
    }
    Ok(())
}

fn emit_event(event: &Event, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::TimerStarted { phase, .. } => println!("{}: {}", phase.title(), phase.hint()),
        Event::PhaseCompleted {
            finished,
            next,
            completed_focus_sessions,
            ..
        } => {
            println!();
            println!(
                "{} complete. {}: {} ({} pomodoro sessions completed)",
                finished.title(),
                next.title(),
                next.hint(),
                completed_focus_sessions
            );
        }
        _ => {}
    }
    Ok(())
}

/// `[#####.....]` style bar for a 0.0 .. 1.0 fraction.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, 4), "[....]");
        assert_eq!(progress_bar(0.5, 4), "[##..]");
        assert_eq!(progress_bar(1.0, 4), "[####]");
        assert_eq!(progress_bar(3.0, 4), "[####]");
    }
}
