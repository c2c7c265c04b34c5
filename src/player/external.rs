// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::PlaybackError;

use super::controller::{MediaElement, PlayOutcome};

/// Player command used when none is configured
pub const DEFAULT_PLAYER: &str = "mpv";

/// How a player process ended on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerExit {
    /// Exited successfully; the episode played to its end
    Completed,
    /// Exited with an error or was killed by a signal
    Failed(ExitStatus),
}

/// Plays audio by launching an external player process.
///
/// The process gives no feedback about its position, so the position is
/// the wall-clock time since launch plus the offset it was started at.
/// Pausing stops the process; resuming relaunches it at the remembered
/// offset. The duration is never known.
pub struct ExternalPlayer {
    command: String,
    source: Option<String>,
    child: Option<Child>,
    offset: f64,
    started_at: Option<Instant>,
}

impl ExternalPlayer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            source: None,
            child: None,
            offset: 0.0,
            started_at: None,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// Process id of the running player
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// Check whether the player exited by itself.
    ///
    /// Returns the exit once when the process has finished. A successful
    /// exit is the end of the episode; anything else is a playback failure.
    pub fn poll_finished(&mut self) -> Option<PlayerExit> {
        let child = self.child.as_mut()?;

        match child.try_wait() {
            Ok(Some(status)) => {
                self.offset = self.current_time();
                self.child = None;
                self.started_at = None;

                if status.success() {
                    debug!(%status, "player exited");
                    Some(PlayerExit::Completed)
                } else {
                    warn!(player = %self.command, %status, "player exited with an error");
                    Some(PlayerExit::Failed(status))
                }
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "could not query player process");
                None
            }
        }
    }

    fn spawn(&mut self, url: &str) -> Result<(), PlaybackError> {
        let args = player_args(&self.command, url, self.offset);
        debug!(player = %self.command, ?args, "launching player");

        let mut command = Command::new(&self.command);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Own process group, so Ctrl-C in the terminal reaches only us
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let child = command
            .spawn()
            .map_err(|source| PlaybackError::SpawnFailed {
                player: self.command.clone(),
                source,
            })?;

        self.child = Some(child);
        self.started_at = Some(Instant::now());
        Ok(())
    }

    fn terminate(&mut self) -> Result<(), PlaybackError> {
        let position = self.current_time();
        self.started_at = None;
        self.offset = position;

        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        // Already exited on its own
        if let Ok(Some(_)) = child.try_wait() {
            return Ok(());
        }

        child.kill().map_err(PlaybackError::StopFailed)?;
        child.wait().map_err(PlaybackError::StopFailed)?;
        Ok(())
    }
}

impl MediaElement for ExternalPlayer {
    fn set_source(&mut self, url: &str) {
        if let Err(e) = self.terminate() {
            warn!(error = %e, "failed to stop previous episode");
        }
        self.source = Some(url.to_string());
        self.offset = 0.0;
    }

    fn play(&mut self) -> Result<PlayOutcome, PlaybackError> {
        let Some(url) = self.source.clone() else {
            return Ok(PlayOutcome::Blocked);
        };

        if self.child.is_none() {
            self.spawn(&url)?;
        }
        Ok(PlayOutcome::Started)
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.terminate()
    }

    fn current_time(&self) -> f64 {
        match self.started_at {
            Some(started) => self.offset + started.elapsed().as_secs_f64(),
            None => self.offset,
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        let running = self.child.is_some();
        if let Err(e) = self.terminate() {
            warn!(error = %e, "failed to stop player for seeking");
        }
        self.offset = seconds.max(0.0);

        if running && let Some(url) = self.source.clone() {
            if let Err(e) = self.spawn(&url) {
                warn!(error = %e, "failed to restart player after seeking");
            }
        }
    }

    fn duration(&self) -> Option<f64> {
        None
    }
}

impl Drop for ExternalPlayer {
    fn drop(&mut self) {
        if let Err(e) = self.terminate() {
            warn!(error = %e, "failed to stop player on exit");
        }
    }
}

/// Arguments for playing `url` from `start` seconds with `command`.
///
/// mpv and ffplay are told to skip video and start at the offset; any
/// other player just gets the URL.
pub fn player_args(command: &str, url: &str, start: f64) -> Vec<String> {
    let name = Path::new(command)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(command)
        .to_lowercase();
    let start = start.max(0.0).floor() as u64;

    if name.contains("mpv") {
        let mut args = vec!["--no-video".to_string(), "--really-quiet".to_string()];
        if start > 0 {
            args.push(format!("--start={start}"));
        }
        args.push(url.to_string());
        args
    } else if name.contains("ffplay") {
        let mut args = vec![
            "-nodisp".to_string(),
            "-autoexit".to_string(),
            "-loglevel".to_string(),
            "quiet".to_string(),
        ];
        if start > 0 {
            args.push("-ss".to_string());
            args.push(start.to_string());
        }
        args.push(url.to_string());
        args
    } else {
        vec![url.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/episode.mp3";

    #[test]
    fn mpv_args() {
        assert_eq!(
            player_args("mpv", URL, 0.0),
            vec!["--no-video", "--really-quiet", URL]
        );
        assert_eq!(
            player_args("/usr/bin/mpv", URL, 42.7),
            vec!["--no-video", "--really-quiet", "--start=42", URL]
        );
    }

    #[test]
    fn ffplay_args() {
        assert_eq!(
            player_args("ffplay.exe", URL, 90.0),
            vec!["-nodisp", "-autoexit", "-loglevel", "quiet", "-ss", "90", URL]
        );
    }

    #[test]
    fn unknown_player_gets_url_only() {
        assert_eq!(player_args("vlc", URL, 30.0), vec![URL]);
    }

    #[test]
    fn play_without_source_is_blocked() {
        let mut player = ExternalPlayer::new("mpv");
        assert_eq!(player.play().unwrap(), PlayOutcome::Blocked);
        assert!(!player.is_running());
    }

    #[test]
    fn missing_player_fails_to_spawn() {
        let mut player = ExternalPlayer::new("podbrowse-no-such-player-binary");
        player.set_source(URL);

        let err = player.play().unwrap_err();
        assert!(matches!(err, PlaybackError::SpawnFailed { .. }));
        assert!(!player.is_running());
    }

    #[test]
    fn seeking_while_stopped_only_moves_offset() {
        let mut player = ExternalPlayer::new("mpv");
        player.set_source(URL);

        player.set_current_time(25.0);
        assert_eq!(player.current_time(), 25.0);
        assert!(!player.is_running());

        player.set_current_time(-5.0);
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn new_source_resets_offset() {
        let mut player = ExternalPlayer::new("mpv");
        player.set_source(URL);
        player.set_current_time(60.0);

        player.set_source("https://example.com/next.mp3");
        assert_eq!(player.current_time(), 0.0);
        assert_eq!(player.duration(), None);
        assert_eq!(player.poll_finished(), None);
    }

    /// Write an executable shell script standing in for a player
    #[cfg(unix)]
    fn script_player(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("player.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    fn wait_for_exit(player: &mut ExternalPlayer) -> PlayerExit {
        for _ in 0..100 {
            if let Some(exit) = player.poll_finished() {
                return exit;
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
        }
        panic!("player did not exit");
    }

    #[cfg(unix)]
    #[test]
    fn failing_player_is_reported_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = ExternalPlayer::new(script_player(dir.path(), "exit 1"));
        player.set_source(URL);

        assert_eq!(player.play().unwrap(), PlayOutcome::Started);
        let exit = wait_for_exit(&mut player);

        assert!(matches!(exit, PlayerExit::Failed(status) if !status.success()));
        assert!(!player.is_running());
        assert_eq!(player.poll_finished(), None);
    }

    #[cfg(unix)]
    #[test]
    fn finished_player_is_reported_as_completed() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = ExternalPlayer::new(script_player(dir.path(), "exit 0"));
        player.set_source(URL);

        player.play().unwrap();
        assert_eq!(wait_for_exit(&mut player), PlayerExit::Completed);
    }

    #[cfg(target_os = "linux")]
    fn process_group(stat_path: &str) -> i64 {
        let stat = std::fs::read_to_string(stat_path).unwrap();
        // Fields after the parenthesized command name: state ppid pgrp
        let rest = &stat[stat.rfind(')').unwrap() + 1..];
        rest.split_whitespace().nth(2).unwrap().parse().unwrap()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn player_runs_in_its_own_process_group() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = ExternalPlayer::new(script_player(dir.path(), "sleep 5"));
        player.set_source(URL);
        player.play().unwrap();

        let pid = player.pid().unwrap();
        let player_group = process_group(&format!("/proc/{pid}/stat"));
        let own_group = process_group("/proc/self/stat");

        assert_eq!(player_group, i64::from(pid));
        assert_ne!(player_group, own_group);

        player.pause().unwrap();
        assert!(!player.is_running());
    }
}
