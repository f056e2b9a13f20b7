//! Interactive session over stdin.
//!
//! Every list lives in one [`Session`] for the lifetime of the process. The
//! countdown ticks on the same single-threaded runtime that reads input, so
//! phase completions are announced between commands.

use std::error::Error;
use std::fmt::Write as _;
use std::io::Write as _;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveTime, Weekday};
use clap::{Args, Parser, Subcommand};
use moon_core::habits::{current_run, NewHabit, DEFAULT_WINDOW_DAYS};
use moon_core::journal::{adjacent_day, DayStep};
use moon_core::notify::{self, Notifier};
use moon_core::profile::ProfileEdit;
use moon_core::sleep::{format_duration, NewSleepEntry, DEFAULT_QUALITY};
use moon_core::tasks::{date_strip, NewTask};
use moon_core::timer::{Countdown, TokioScheduler};
use moon_core::{Config, Event, Phase, Session, SettingKey, TimerEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::parse;
use super::timer::progress_bar;

type CmdResult<T> = Result<T, Box<dyn Error>>;

#[derive(Args)]
pub struct ShellArgs {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, value_parser = parse::date)]
    today: Option<NaiveDate>,
    /// Start with example tasks, habits, journal entries and sleep logs
    #[arg(long)]
    samples: bool,
}

#[derive(Parser)]
#[command(name = "moon", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Day-planned tasks
    Task {
        #[command(subcommand)]
        action: TaskCmd,
    },
    /// Weekly habits and their completion marks
    Habit {
        #[command(subcommand)]
        action: HabitCmd,
    },
    /// One entry per day
    Journal {
        #[command(subcommand)]
        action: JournalCmd,
    },
    /// Nightly sleep log
    Sleep {
        #[command(subcommand)]
        action: SleepCmd,
    },
    /// Profile card and edit form
    Profile {
        #[command(subcommand)]
        action: ProfileCmd,
    },
    /// Preference switches
    Settings {
        #[command(subcommand)]
        action: SettingsCmd,
    },
    /// Focus/break countdown
    Timer {
        #[command(subcommand)]
        action: TimerCmd,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
enum TaskCmd {
    Add {
        name: String,
        #[arg(long, value_parser = parse::date)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = parse::time)]
        time: Option<NaiveTime>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        reward: String,
    },
    List {
        #[arg(long, value_parser = parse::date)]
        date: Option<NaiveDate>,
    },
    Toggle {
        id: String,
    },
    /// Task counts for the next seven days
    Week,
}

#[derive(Subcommand)]
enum HabitCmd {
    Add {
        name: String,
        /// Comma-separated weekdays, e.g. Mon,Wed,Fri
        #[arg(long, value_delimiter = ',', value_parser = parse::weekday)]
        days: Vec<Weekday>,
        #[arg(long, value_parser = parse::date)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = parse::date)]
        end: Option<NaiveDate>,
        #[arg(long)]
        reward: Option<String>,
    },
    List,
    Toggle {
        id: String,
        #[arg(long, value_parser = parse::date)]
        date: Option<NaiveDate>,
    },
    Window {
        id: String,
        #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS, value_parser = parse::window_days)]
        days: usize,
    },
}

#[derive(Subcommand)]
enum JournalCmd {
    /// Save text for the selected day, replacing any earlier entry
    Write {
        #[arg(required = true)]
        text: Vec<String>,
    },
    Show,
    Prev,
    Next,
    /// Jump back to today
    Today,
    /// Days that have an entry
    Dates,
}

#[derive(Subcommand)]
enum SleepCmd {
    Add {
        #[arg(long, value_parser = parse::date)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = parse::time)]
        sleep: NaiveTime,
        #[arg(long, value_parser = parse::time)]
        wake: NaiveTime,
        #[arg(long, default_value_t = DEFAULT_QUALITY)]
        quality: u8,
        #[arg(long, default_value = "")]
        notes: String,
    },
    List,
    Stats,
}

#[derive(Subcommand)]
enum ProfileCmd {
    Show,
    Edit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsCmd {
    List,
    Toggle {
        #[arg(value_parser = parse::setting)]
        key: SettingKey,
    },
}

#[derive(Subcommand)]
enum TimerCmd {
    /// Start or resume the countdown
    Start {
        /// What this focus session is for
        #[arg(long)]
        task: Option<String>,
        /// Notes shown alongside the task during focus
        #[arg(long)]
        notes: Option<String>,
    },
    Pause,
    Reset,
    Status,
}

pub enum Reply {
    Text(String),
    Quit,
}

pub struct Shell {
    session: Session,
    today: NaiveDate,
    journal_day: NaiveDate,
    countdown: Countdown<TokioScheduler, Box<dyn Notifier>>,
    focus: FocusTarget,
}

/// What the user said they are working on; shown only during focus.
#[derive(Debug, Default)]
struct FocusTarget {
    task: Option<String>,
    notes: Option<String>,
}

impl FocusTarget {
    fn update(&mut self, task: Option<String>, notes: Option<String>) {
        let clean = |v: String| {
            let v = v.trim().to_string();
            (!v.is_empty()).then_some(v)
        };
        if let Some(task) = task {
            self.task = clean(task);
        }
        if let Some(notes) = notes {
            self.notes = clean(notes);
        }
    }
}

impl Shell {
    pub fn new(
        session: Session,
        today: NaiveDate,
        countdown: Countdown<TokioScheduler, Box<dyn Notifier>>,
    ) -> Self {
        let mut shell = Self {
            session,
            today,
            journal_day: today,
            countdown,
            focus: FocusTarget::default(),
        };
        shell.sync_cue();
        shell
    }

    fn sync_cue(&mut self) {
        let enabled = self.session.settings.notifications;
        self.countdown.set_cue_enabled(enabled);
    }

    /// Run one input line. Parse errors and command failures come back as
    /// `Err`; the caller reports them and keeps reading.
    pub fn handle(&mut self, line: &str) -> CmdResult<Reply> {
        let words = parse::split_words(line)?;
        if words.is_empty() {
            return Ok(Reply::Text(String::new()));
        }
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => match e.kind() {
                clap::error::ErrorKind::DisplayHelp
                | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    return Ok(Reply::Text(e.to_string()))
                }
                _ => {
                    let message = e.to_string();
                    return Err(message.trim_start_matches("error: ").trim_end().into());
                }
            },
        };

        let mut out = String::new();
        match parsed.command {
            ShellCommand::Task { action } => self.task(action, &mut out)?,
            ShellCommand::Habit { action } => self.habit(action, &mut out)?,
            ShellCommand::Journal { action } => self.journal(action, &mut out)?,
            ShellCommand::Sleep { action } => self.sleep(action, &mut out)?,
            ShellCommand::Profile { action } => self.profile(action, &mut out)?,
            ShellCommand::Settings { action } => self.settings(action, &mut out)?,
            ShellCommand::Timer { action } => self.timer(action, &mut out)?,
            ShellCommand::Quit => return Ok(Reply::Quit),
        }
        Ok(Reply::Text(out))
    }

    fn task(&mut self, action: TaskCmd, out: &mut String) -> CmdResult<()> {
        match action {
            TaskCmd::Add {
                name,
                date,
                time,
                description,
                reward,
            } => {
                let mut form = NewTask::new(name, date.unwrap_or(self.today))
                    .description(description)
                    .reward(reward);
                if let Some(time) = time {
                    form = form.at(time);
                }
                let task = self.session.tasks.add(form)?;
                writeln!(out, "added task {} ({})", task.id, task.name)?;
            }
            TaskCmd::List { date } => {
                let date = date.unwrap_or(self.today);
                let tasks = self.session.tasks.for_date(date);
                writeln!(out, "Tasks for {}", date.format("%a %Y-%m-%d"))?;
                if tasks.is_empty() {
                    writeln!(out, "  no tasks")?;
                }
                for task in tasks {
                    let time = task
                        .time
                        .map(|t| t.format("%H:%M").to_string())
                        .unwrap_or_else(|| "--:--".into());
                    writeln!(
                        out,
                        "  [{}] {} {}  [{}]",
                        check(task.completed),
                        time,
                        task.name,
                        task.id
                    )?;
                    if !task.description.is_empty() {
                        writeln!(out, "        {}", task.description)?;
                    }
                    if !task.reward.is_empty() {
                        writeln!(out, "        reward: {}", task.reward)?;
                    }
                }
            }
            TaskCmd::Toggle { id } => {
                let done = self.session.tasks.toggle(&id)?;
                writeln!(out, "task {id}: {}", if done { "done" } else { "open" })?;
            }
            TaskCmd::Week => {
                for date in date_strip(self.today, 7) {
                    let marker = if date == self.today { "*" } else { " " };
                    writeln!(
                        out,
                        "{marker} {}  {} task(s)",
                        date.format("%a %d"),
                        self.session.tasks.for_date(date).len()
                    )?;
                }
            }
        }
        Ok(())
    }

    fn habit(&mut self, action: HabitCmd, out: &mut String) -> CmdResult<()> {
        match action {
            HabitCmd::Add {
                name,
                days,
                start,
                end,
                reward,
            } => {
                let mut form = NewHabit::new(name, start.unwrap_or(self.today)).days(days);
                if let Some(end) = end {
                    form = form.ending(end);
                }
                if let Some(reward) = reward {
                    form = form.reward(reward);
                }
                let habit = self.session.habits.add(form)?;
                writeln!(out, "added habit {} ({})", habit.id, habit.name)?;
            }
            HabitCmd::List => {
                if self.session.habits.is_empty() {
                    writeln!(out, "no habits")?;
                }
                for habit in self.session.habits.list() {
                    writeln!(
                        out,
                        "[{}] {}  [{}]",
                        check(habit.is_completed_on(self.today)),
                        habit.name,
                        habit.id
                    )?;
                    writeln!(
                        out,
                        "      days: {}  streak: {}  run: {}",
                        habit.days_label(),
                        habit.streak_days,
                        current_run(habit, self.today)
                    )?;
                    if let Some(reward) = &habit.reward {
                        writeln!(out, "      reward: {reward}")?;
                    }
                }
            }
            HabitCmd::Toggle { id, date } => {
                let date = date.unwrap_or(self.today);
                if let Event::HabitToggled {
                    completed,
                    streak_days,
                    ..
                } = self.session.habits.toggle(&id, date)?
                {
                    writeln!(
                        out,
                        "habit {id} on {date}: {} (streak {streak_days})",
                        if completed { "done" } else { "not done" }
                    )?;
                }
            }
            HabitCmd::Window { id, days } => {
                let marks = self.session.habits.window(&id, self.today, days)?;
                let days: Vec<String> = marks
                    .iter()
                    .map(|m| m.date.format("%a").to_string())
                    .collect();
                let ticks: Vec<String> = marks
                    .iter()
                    .map(|m| format!("{:<3}", check(m.completed)))
                    .collect();
                writeln!(out, "{}", days.join(" "))?;
                writeln!(out, "{}", ticks.join(" ").trim_end())?;
            }
        }
        Ok(())
    }

    fn journal(&mut self, action: JournalCmd, out: &mut String) -> CmdResult<()> {
        match action {
            JournalCmd::Write { text } => {
                let entry = self.session.journal.save(self.journal_day, text.join(" "))?;
                writeln!(out, "saved entry for {}", entry.date)?;
                return Ok(());
            }
            JournalCmd::Prev => self.step_journal(DayStep::Prev)?,
            JournalCmd::Next => self.step_journal(DayStep::Next)?,
            JournalCmd::Today => self.journal_day = self.today,
            JournalCmd::Dates => {
                let dates = self.session.journal.entry_dates();
                if dates.is_empty() {
                    writeln!(out, "no entries")?;
                }
                for date in dates {
                    writeln!(out, "{}", date.format("%a %Y-%m-%d"))?;
                }
                return Ok(());
            }
            JournalCmd::Show => {}
        }

        writeln!(out, "{}", self.journal_day.format("%A, %B %-d, %Y"))?;
        match self.session.journal.entry_for(self.journal_day) {
            Some(entry) => writeln!(out, "{}", entry.content)?,
            None => writeln!(out, "(no entry)")?,
        }
        Ok(())
    }

    fn step_journal(&mut self, step: DayStep) -> CmdResult<()> {
        self.journal_day =
            adjacent_day(self.journal_day, step).ok_or("no further days in that direction")?;
        Ok(())
    }

    fn sleep(&mut self, action: SleepCmd, out: &mut String) -> CmdResult<()> {
        match action {
            SleepCmd::Add {
                date,
                sleep,
                wake,
                quality,
                notes,
            } => {
                let entry = self.session.sleep.add(NewSleepEntry {
                    date: Some(date.unwrap_or(self.today)),
                    sleep_time: Some(sleep),
                    wake_time: Some(wake),
                    quality,
                    notes,
                })?;
                writeln!(
                    out,
                    "logged {} for {}",
                    format_duration(entry.duration_min),
                    entry.date
                )?;
            }
            SleepCmd::List => {
                let entries = self.session.sleep.entries();
                if entries.is_empty() {
                    writeln!(out, "no sleep entries")?;
                }
                for entry in entries {
                    writeln!(
                        out,
                        "{}  {}-{}  {}  quality {}/5",
                        entry.date,
                        entry.sleep_time.format("%H:%M"),
                        entry.wake_time.format("%H:%M"),
                        format_duration(entry.duration_min),
                        entry.quality
                    )?;
                    if !entry.notes.is_empty() {
                        writeln!(out, "    {}", entry.notes)?;
                    }
                }
            }
            SleepCmd::Stats => {
                writeln!(
                    out,
                    "average duration: {}",
                    format_duration(self.session.sleep.average_duration_min())
                )?;
                match self.session.sleep.average_quality() {
                    Some(q) => writeln!(out, "average quality: {q:.1}/5")?,
                    None => writeln!(out, "average quality: -")?,
                }
            }
        }
        Ok(())
    }

    fn profile(&mut self, action: ProfileCmd, out: &mut String) -> CmdResult<()> {
        match action {
            ProfileCmd::Show => {
                self.session.refresh_profile_stats(self.countdown.engine());
                let p = &self.session.profile;
                writeln!(out, "{} ({})", p.name, p.age)?;
                writeln!(out, "member since {}", p.join_date.format("%B %Y"))?;
                writeln!(out, "sleep average: {}", format_duration(p.sleep_average_min))?;
                writeln!(out, "focus time: {} min", p.focus_time_min)?;
                writeln!(out, "tasks completed: {}", p.tasks_completed)?;
                writeln!(out, "habits tracked: {}", p.habits_tracked)?;
            }
            ProfileCmd::Edit { name, age } => {
                let mut form = ProfileEdit::from_profile(&self.session.profile);
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(age) = age {
                    form.age = age;
                }
                self.session.profile.apply_edit(form)?;
                let p = &self.session.profile;
                writeln!(out, "profile updated: {} ({})", p.name, p.age)?;
            }
        }
        Ok(())
    }

    fn settings(&mut self, action: SettingsCmd, out: &mut String) -> CmdResult<()> {
        match action {
            SettingsCmd::List => {
                for (key, on) in self.session.settings.iter() {
                    writeln!(out, "{key:<16} {}", on_off(on))?;
                }
            }
            SettingsCmd::Toggle { key } => {
                let on = self.session.settings.toggle(key);
                if key == SettingKey::Notifications {
                    self.sync_cue();
                }
                writeln!(out, "{key} {}", on_off(on))?;
            }
        }
        Ok(())
    }

    fn timer(&mut self, action: TimerCmd, out: &mut String) -> CmdResult<()> {
        let event = match action {
            TimerCmd::Start { task, notes } => {
                self.focus.update(task, notes);
                self.countdown.start()
            }
            TimerCmd::Pause => self.countdown.pause(),
            TimerCmd::Reset => {
                self.focus = FocusTarget::default();
                Some(self.countdown.reset())
            }
            TimerCmd::Status => None,
        };
        if let Some(event) = event {
            writeln!(out, "{}", describe(&event))?;
        }
        let snap = self.countdown.engine().snapshot();
        writeln!(
            out,
            "{} {} {} ({:?})",
            snap.phase.title(),
            snap.clock,
            progress_bar(snap.progress, 20),
            snap.state
        )?;
        writeln!(out, "{}", snap.phase.hint())?;
        if snap.phase == Phase::Focus {
            if let Some(task) = &self.focus.task {
                writeln!(out, "working on: {task}")?;
            }
            if let Some(notes) = &self.focus.notes {
                writeln!(out, "notes: {notes}")?;
            }
        }
        writeln!(
            out,
            "{} pomodoro sessions completed",
            snap.completed_focus_sessions
        )?;
        Ok(())
    }

    /// Wait for the countdown's next tick; pends while the timer is idle.
    pub async fn next_tick(&mut self) -> Option<Event> {
        self.countdown.next_tick().await
    }
}

fn check(done: bool) -> &'static str {
    if done {
        "x"
    } else {
        " "
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

/// One-line human rendering of a timer event.
pub fn describe(event: &Event) -> String {
    match event {
        Event::TimerStarted {
            phase,
            remaining_secs,
            ..
        } => format!("{} started with {remaining_secs}s left", phase.title()),
        Event::TimerPaused {
            phase,
            remaining_secs,
            ..
        } => format!("{} paused with {remaining_secs}s left", phase.title()),
        Event::TimerReset { phase, .. } => format!("{} reset", phase.title()),
        Event::PhaseCompleted {
            finished,
            next,
            completed_focus_sessions,
            ..
        } => format!(
            "{} complete, {} begins ({completed_focus_sessions} pomodoro sessions completed)",
            finished.title(),
            next.title()
        ),
        Event::HabitToggled {
            habit_id,
            date,
            completed,
            ..
        } => format!("habit {habit_id} on {date}: {completed}"),
    }
}

fn prompt() {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "moon> ");
    let _ = stdout.flush();
}

pub fn run(args: ShellArgs) -> CmdResult<()> {
    let config = Config::load_or_default();
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let session = if args.samples {
        Session::with_samples(&config, today)
    } else {
        Session::new(&config, today)
    };
    let durations = config.timer.durations()?;
    let notifier = notify::from_config(&config.notifications);
    debug!(%today, samples = args.samples, "shell session started");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let result = rt.block_on(async move {
        let countdown = Countdown::new(
            TimerEngine::with_durations(durations),
            TokioScheduler::new(),
            notifier,
        )
        .with_interval(Duration::from_millis(config.timer.tick_ms));
        let mut shell = Shell::new(session, today, countdown);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        prompt();
        loop {
            tokio::select! {
                event = shell.next_tick() => {
                    if let Some(event) = event {
                        println!();
                        println!("{}", describe(&event));
                        prompt();
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match shell.handle(&line) {
                        Ok(Reply::Quit) => break,
                        Ok(Reply::Text(text)) => print!("{text}"),
                        Err(e) => println!("error: {e}"),
                    }
                    prompt();
                }
            }
        }
        println!();
        Ok::<(), Box<dyn Error>>(())
    });
    // A stdin read may still be parked on the blocking pool.
    rt.shutdown_background();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use moon_core::notify::Silent;
    use moon_core::timer::PhaseDurations;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn shell(samples: bool) -> Shell {
        shell_with(samples, TimerEngine::new())
    }

    fn shell_with(samples: bool, engine: TimerEngine) -> Shell {
        let config = Config::default();
        let session = if samples {
            Session::with_samples(&config, today())
        } else {
            Session::new(&config, today())
        };
        let countdown = Countdown::new(
            engine,
            TokioScheduler::new(),
            Box::new(Silent) as Box<dyn Notifier>,
        );
        Shell::new(session, today(), countdown)
    }

    fn text(shell: &mut Shell, line: &str) -> String {
        match shell.handle(line).unwrap() {
            Reply::Text(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[tokio::test]
    async fn task_add_then_list() {
        let mut sh = shell(false);
        let added = text(&mut sh, r#"task add "Plan week" --time 09:30 --reward tea"#);
        assert!(added.starts_with("added task "));
        let list = text(&mut sh, "task list");
        assert!(list.contains("09:30 Plan week"));
        assert!(list.contains("reward: tea"));
    }

    #[tokio::test]
    async fn habit_toggle_reports_streak() {
        let mut sh = shell(true);
        let out = text(&mut sh, "habit toggle habit-3");
        assert!(out.contains("done (streak 31)"));
        let out = text(&mut sh, "habit toggle habit-3");
        assert!(out.contains("not done (streak 30)"));
    }

    #[tokio::test]
    async fn habit_without_days_is_rejected() {
        let mut sh = shell(false);
        assert!(sh.handle("habit add Stretch").is_err());
        assert!(sh.handle("habit add Stretch --days Mon,Thu").is_ok());
    }

    #[tokio::test]
    async fn journal_navigation_moves_cursor() {
        let mut sh = shell(true);
        let out = text(&mut sh, "journal prev");
        assert!(out.contains("Sunday, October 18, 2026"));
        assert!(out.contains("productive day"));
        let out = text(&mut sh, "journal prev");
        assert!(out.contains("(no entry)"));
        text(&mut sh, "journal write Quiet day");
        let out = text(&mut sh, "journal show");
        assert!(out.contains("Quiet day"));
    }

    #[tokio::test]
    async fn sleep_stats_follow_log() {
        let mut sh = shell(false);
        let out = text(&mut sh, "sleep add --sleep 23:30 --wake 06:00 --quality 4");
        assert!(out.contains("6h 30m"));
        let out = text(&mut sh, "sleep stats");
        assert!(out.contains("average duration: 6h 30m"));
        assert!(out.contains("4.0/5"));
        assert!(sh.handle("sleep add --sleep 23:30 --wake 06:00 --quality 9").is_err());
    }

    #[tokio::test]
    async fn settings_toggle_and_profile_edit() {
        let mut sh = shell(false);
        assert_eq!(text(&mut sh, "settings toggle privacy"), "privacy on\n");
        let out = text(&mut sh, "profile edit --name Ada --age abc");
        assert!(out.contains("Ada (28)"));
        assert!(sh.handle(r#"profile edit --name """#).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn timer_commands_drive_countdown() {
        let mut sh = shell(false);
        let out = text(&mut sh, "timer start");
        assert!(out.contains("Focus Time started"));
        assert!(out.contains("25:00"));
        assert!(sh.next_tick().await.is_none());
        let out = text(&mut sh, "timer pause");
        assert!(out.contains("24:59"));
        let out = text(&mut sh, "timer reset");
        assert!(out.contains("25:00"));
    }

    #[tokio::test(start_paused = true)]
    async fn focus_task_shows_only_during_focus() {
        let durations = PhaseDurations::new(1, 60).unwrap();
        let mut sh = shell_with(false, TimerEngine::with_durations(durations));

        let out = text(
            &mut sh,
            r#"timer start --task "Write report" --notes "outline first""#,
        );
        assert!(out.contains("working on: Write report"));
        assert!(out.contains("notes: outline first"));

        let event = sh.next_tick().await;
        assert!(matches!(event, Some(Event::PhaseCompleted { .. })));
        let out = text(&mut sh, "timer status");
        assert!(out.contains("Break Time"));
        assert!(!out.contains("working on"));

        text(&mut sh, "timer reset");
        let out = text(&mut sh, "timer status");
        assert!(!out.contains("working on"));
    }

    #[tokio::test]
    async fn timer_start_without_task_shows_none() {
        let mut sh = shell(false);
        let out = text(&mut sh, "timer start");
        assert!(!out.contains("working on"));
        assert!(!out.contains("notes:"));
    }

    #[tokio::test]
    async fn quit_and_unknown_commands() {
        let mut sh = shell(false);
        assert!(matches!(sh.handle("exit").unwrap(), Reply::Quit));
        assert!(sh.handle("dance").is_err());
        assert!(matches!(sh.handle("   ").unwrap(), Reply::Text(t) if t.is_empty()));
    }
}
