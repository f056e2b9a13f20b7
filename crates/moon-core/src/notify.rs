//! Best-effort completion cue.
//!
//! A cue either plays or it doesn't; callers log the error and move on.
//! Nothing here waits for playback to finish.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::config::NotificationsConfig;
use crate::error::NotifyError;
use crate::timer::Phase;

/// Plays a short cue when a phase finishes.
pub trait Notifier {
    fn notify(&mut self, finished: Phase) -> Result<(), NotifyError>;
}

impl Notifier for Box<dyn Notifier> {
    fn notify(&mut self, finished: Phase) -> Result<(), NotifyError> {
        (**self).notify(finished)
    }
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&mut self, _finished: Phase) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Rings the terminal bell on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify(&mut self, _finished: Phase) -> Result<(), NotifyError> {
        let mut err = std::io::stderr();
        err.write_all(b"\x07").map_err(NotifyError::Bell)?;
        err.flush().map_err(NotifyError::Bell)
    }
}

/// Spawns an external player (`afplay`, `paplay`, `aplay`, ...) with the cue
/// file as its last argument.
///
/// Players that are still running when the next cue starts are kept and
/// reaped on later calls, so overlapping cues never leave zombies behind.
#[derive(Debug)]
pub struct SoundCommand {
    program: String,
    args: Vec<String>,
    sound_file: Option<PathBuf>,
    players: Vec<Child>,
}

impl SoundCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            sound_file: None,
            players: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn sound_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sound_file = Some(path.into());
        self
    }

    /// Players spawned but not yet collected.
    pub fn players_in_flight(&self) -> usize {
        self.players.len()
    }

    /// Collect every player that has exited. Returns the first failure seen;
    /// players still running stay in the list.
    pub fn reap(&mut self) -> Result<(), NotifyError> {
        let mut failure = None;
        self.players.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() && failure.is_none() {
                    failure = Some(status.to_string());
                }
                false
            }
            Ok(None) => true,
            // Not ours to wait on any more.
            Err(_) => false,
        });
        match failure {
            Some(status) => Err(NotifyError::PlayerFailed {
                program: self.program.clone(),
                status,
            }),
            None => Ok(()),
        }
    }
}

impl Notifier for SoundCommand {
    fn notify(&mut self, finished: Phase) -> Result<(), NotifyError> {
        if let Err(e) = self.reap() {
            debug!(error = %e, "previous cue did not play");
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(file) = &self.sound_file {
            cmd.arg(file);
        }
        let child = cmd.spawn().map_err(|source| NotifyError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        debug!(
            program = %self.program,
            ?finished,
            pid = child.id(),
            in_flight = self.players.len(),
            "cue started"
        );
        self.players.push(child);
        Ok(())
    }
}

/// Pick a notifier from configuration.
///
/// Disabled notifications give [`Silent`]; a configured player gives
/// [`SoundCommand`]; otherwise the terminal bell.
pub fn from_config(config: &NotificationsConfig) -> Box<dyn Notifier> {
    if !config.enabled {
        return Box::new(Silent);
    }
    match &config.sound_command {
        Some(program) if !program.trim().is_empty() => {
            let mut cmd = SoundCommand::new(program.trim()).args(config.sound_args.clone());
            if let Some(file) = &config.sound_file {
                cmd = cmd.sound_file(file);
            }
            Box::new(cmd)
        }
        _ => Box::new(TerminalBell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_player_reports_spawn_error() {
        let mut cmd = SoundCommand::new("moon-no-such-player-binary");
        let err = cmd.notify(Phase::Focus).unwrap_err();
        assert!(matches!(err, NotifyError::Spawn { .. }));
    }

    #[test]
    fn silent_always_succeeds() {
        assert!(Silent.notify(Phase::Break).is_ok());
    }

    #[test]
    fn disabled_config_is_silent() {
        let config = NotificationsConfig {
            enabled: false,
            sound_command: Some("moon-no-such-player-binary".into()),
            ..NotificationsConfig::default()
        };
        let mut notifier = from_config(&config);
        assert!(notifier.notify(Phase::Focus).is_ok());
    }

    #[test]
    fn configured_player_is_used() {
        let config = NotificationsConfig {
            enabled: true,
            sound_command: Some("moon-no-such-player-binary".into()),
            ..NotificationsConfig::default()
        };
        let mut notifier = from_config(&config);
        assert!(notifier.notify(Phase::Focus).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn overlapping_cues_are_all_kept() {
        let mut cmd = SoundCommand::new("sleep").args(["1"]);
        cmd.notify(Phase::Focus).unwrap();
        cmd.notify(Phase::Break).unwrap();
        assert_eq!(cmd.players_in_flight(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn finished_players_are_reaped() {
        let mut cmd = SoundCommand::new("true");
        cmd.notify(Phase::Focus).unwrap();
        cmd.notify(Phase::Break).unwrap();
        for _ in 0..250 {
            if cmd.players_in_flight() == 0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
            cmd.reap().unwrap();
        }
        assert_eq!(cmd.players_in_flight(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn failed_player_is_reported_once_reaped() {
        let mut cmd = SoundCommand::new("false");
        cmd.notify(Phase::Focus).unwrap();
        let mut result = Ok(());
        for _ in 0..250 {
            if cmd.players_in_flight() == 0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
            result = cmd.reap();
        }
        assert!(matches!(result, Err(NotifyError::PlayerFailed { .. })));
    }
}
