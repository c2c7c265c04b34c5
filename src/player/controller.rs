// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::{debug, warn};

use crate::api::{Episode, Show};
use crate::error::PlaybackError;
use crate::favorites::FavoriteRecord;

/// Result of asking a media element to start playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback started right away
    Started,
    /// Playback will start once the media is ready; the element reports
    /// back through [`MediaEvent::Playing`] or [`MediaEvent::PlayRejected`]
    Pending,
    /// The element refused to start on its own (autoplay policy)
    Blocked,
}

/// A single playable audio resource.
///
/// This is the seam between the controller's state machine and whatever
/// actually produces sound.
pub trait MediaElement: Send {
    /// Switch to a new source URL, stopping the current one
    fn set_source(&mut self, url: &str);

    /// Ask the element to start or resume playback
    fn play(&mut self) -> Result<PlayOutcome, PlaybackError>;

    /// Pause playback, keeping the current position
    fn pause(&mut self) -> Result<(), PlaybackError>;

    /// Playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position, in seconds
    fn set_current_time(&mut self, seconds: f64);

    /// Length of the media in seconds, if known
    fn duration(&self) -> Option<f64>;
}

/// Where the controller's state machine stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Playing,
    Paused,
}

/// Identifies one play request so late media events can be matched up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Notifications from the media element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// A pending play request started
    Playing(LoadTicket),
    /// A pending play request was refused
    PlayRejected(LoadTicket),
    /// The playback position moved
    TimeUpdate,
    /// The media played to its end
    Ended,
    /// Playback stopped because of an error
    Failed,
}

/// An episode ready to be played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub show_title: String,
    /// URL of the audio file
    pub file: String,
}

impl Track {
    pub fn from_episode(show: &Show, episode: &Episode) -> Self {
        Self {
            title: episode.title.clone(),
            show_title: show.title.clone(),
            file: episode.file.clone(),
        }
    }
}

impl From<&FavoriteRecord> for Track {
    fn from(favorite: &FavoriteRecord) -> Self {
        Self {
            title: favorite.title.clone(),
            show_title: favorite.show_title.clone(),
            file: favorite.file.clone(),
        }
    }
}

/// The application's single audio player.
///
/// Owns the one [`MediaElement`] there is, so at most one episode can be
/// audible at a time. State changes follow
/// `Idle -> Loading -> Playing <-> Paused`, with `Loading -> Paused` when
/// autoplay is blocked and any state going back to `Loading` on a new load.
pub struct AudioPlaybackController<M> {
    media: M,
    state: PlaybackState,
    track: Option<Track>,
    generation: u64,
    pending: Option<LoadTicket>,
    progress: f64,
}

impl<M: MediaElement> AudioPlaybackController<M> {
    pub fn new(media: M) -> Self {
        Self {
            media,
            state: PlaybackState::Idle,
            track: None,
            generation: 0,
            pending: None,
            progress: 0.0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The loaded track, if any
    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Stop whatever plays, switch to `track` from the start and try to
    /// autoplay it
    pub fn load_episode(&mut self, track: Track) -> LoadTicket {
        if matches!(self.state, PlaybackState::Playing | PlaybackState::Loading) {
            self.pause_media();
        }

        self.media.set_source(&track.file);
        self.media.set_current_time(0.0);
        self.progress = 0.0;
        self.track = Some(track);
        self.state = PlaybackState::Loading;

        let ticket = self.next_ticket();
        self.request_play(ticket);
        ticket
    }

    /// Switch between playing and paused; returns the new state.
    ///
    /// Does nothing before an episode was loaded. Toggling while loading
    /// cancels the pending autoplay.
    pub fn toggle_play(&mut self) -> PlaybackState {
        if self.track.is_none() {
            return self.state;
        }

        match self.state {
            PlaybackState::Playing | PlaybackState::Loading => {
                self.pause_media();
                self.pending = None;
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                let ticket = self.next_ticket();
                self.request_play(ticket);
            }
            PlaybackState::Idle => {}
        }

        self.state
    }

    /// Move the position by `offset_seconds`, clamped to the media bounds
    pub fn seek(&mut self, offset_seconds: f64) {
        if self.track.is_none() || !offset_seconds.is_finite() {
            return;
        }

        let mut target = (self.media.current_time() + offset_seconds).max(0.0);
        if let Some(duration) = self.known_duration() {
            target = target.min(duration);
        }

        self.media.set_current_time(target);
        self.refresh_progress();
    }

    /// Feed an event from the media element into the state machine
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Playing(ticket) | MediaEvent::PlayRejected(ticket)
                if self.pending != Some(ticket) =>
            {
                debug!(?ticket, "ignoring media event for a superseded request");
            }
            MediaEvent::Playing(_) => {
                self.pending = None;
                self.state = PlaybackState::Playing;
            }
            MediaEvent::PlayRejected(_) => {
                self.pending = None;
                self.state = PlaybackState::Paused;
            }
            MediaEvent::TimeUpdate => self.refresh_progress(),
            MediaEvent::Ended => {
                if self.state != PlaybackState::Idle {
                    self.pending = None;
                    self.state = PlaybackState::Paused;
                    self.progress = 100.0;
                }
            }
            MediaEvent::Failed => {
                if self.state != PlaybackState::Idle {
                    self.pending = None;
                    self.state = PlaybackState::Paused;
                }
            }
        }
    }

    /// Played share of the episode in percent; 0 while the duration is
    /// unknown
    pub fn progress_percent(&self) -> f64 {
        self.progress
    }

    /// Leaving now would interrupt audible playback
    pub fn should_confirm_exit(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Pause and release the current track
    pub fn stop(&mut self) {
        if matches!(self.state, PlaybackState::Playing | PlaybackState::Loading) {
            self.pause_media();
        }
        self.pending = None;
        if self.track.is_some() {
            self.state = PlaybackState::Paused;
        }
    }

    fn next_ticket(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    fn request_play(&mut self, ticket: LoadTicket) {
        self.pending = None;

        match self.media.play() {
            Ok(PlayOutcome::Started) => self.state = PlaybackState::Playing,
            Ok(PlayOutcome::Pending) => {
                self.state = PlaybackState::Loading;
                self.pending = Some(ticket);
            }
            Ok(PlayOutcome::Blocked) => {
                debug!("autoplay blocked, staying paused");
                self.state = PlaybackState::Paused;
            }
            Err(e) => {
                warn!(error = %e, "playback could not start");
                self.state = PlaybackState::Paused;
            }
        }
    }

    fn pause_media(&mut self) {
        if let Err(e) = self.media.pause() {
            warn!(error = %e, "failed to pause playback");
        }
    }

    fn known_duration(&self) -> Option<f64> {
        self.media
            .duration()
            .filter(|duration| duration.is_finite() && *duration > 0.0)
    }

    fn refresh_progress(&mut self) {
        self.progress = match self.known_duration() {
            Some(duration) => (self.media.current_time() / duration * 100.0).clamp(0.0, 100.0),
            None => 0.0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    /// Scripted media element
    #[derive(Default)]
    struct MockMedia {
        source: Option<String>,
        outcomes: VecDeque<PlayOutcome>,
        fail_next_play: bool,
        playing: bool,
        position: f64,
        duration: Option<f64>,
        play_calls: usize,
    }

    impl MockMedia {
        fn with_outcomes(outcomes: &[PlayOutcome]) -> Self {
            Self {
                outcomes: outcomes.iter().copied().collect(),
                ..Default::default()
            }
        }
    }

    impl MediaElement for MockMedia {
        fn set_source(&mut self, url: &str) {
            self.playing = false;
            self.source = Some(url.to_string());
        }

        fn play(&mut self) -> Result<PlayOutcome, PlaybackError> {
            self.play_calls += 1;
            if self.fail_next_play {
                self.fail_next_play = false;
                return Err(PlaybackError::SpawnFailed {
                    player: "mock".to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                });
            }
            let outcome = self.outcomes.pop_front().unwrap_or(PlayOutcome::Started);
            self.playing = outcome == PlayOutcome::Started;
            Ok(outcome)
        }

        fn pause(&mut self) -> Result<(), PlaybackError> {
            self.playing = false;
            Ok(())
        }

        fn current_time(&self) -> f64 {
            self.position
        }

        fn set_current_time(&mut self, seconds: f64) {
            self.position = seconds;
        }

        fn duration(&self) -> Option<f64> {
            self.duration
        }
    }

    fn track(name: &str) -> Track {
        Track {
            title: name.to_string(),
            show_title: "Alpha".to_string(),
            file: format!("https://example.com/{name}.mp3"),
        }
    }

    #[test]
    fn starts_idle() {
        let controller = AudioPlaybackController::new(MockMedia::default());
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(controller.track().is_none());
        assert_eq!(controller.progress_percent(), 0.0);
        assert!(!controller.should_confirm_exit());
    }

    #[test]
    fn load_with_autoplay_plays() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        controller.load_episode(track("e1"));

        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(
            controller.media().source.as_deref(),
            Some("https://example.com/e1.mp3")
        );
        assert!(controller.should_confirm_exit());
    }

    #[test]
    fn blocked_autoplay_is_paused_not_an_error() {
        let mut controller =
            AudioPlaybackController::new(MockMedia::with_outcomes(&[PlayOutcome::Blocked]));
        controller.load_episode(track("e1"));

        assert_eq!(controller.state(), PlaybackState::Paused);
        assert!(!controller.should_confirm_exit());
    }

    #[test]
    fn failing_media_surfaces_as_paused() {
        let mut media = MockMedia::default();
        media.fail_next_play = true;
        let mut controller = AudioPlaybackController::new(media);

        controller.load_episode(track("e1"));
        assert_eq!(controller.state(), PlaybackState::Paused);
    }

    #[test]
    fn load_resets_position() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        controller.media_mut().duration = Some(100.0);
        controller.load_episode(track("e1"));
        controller.seek(40.0);
        assert_eq!(controller.progress_percent(), 40.0);

        controller.load_episode(track("e2"));
        assert_eq!(controller.media().position, 0.0);
        assert_eq!(controller.progress_percent(), 0.0);
    }

    #[test]
    fn toggle_without_source_is_noop() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        assert_eq!(controller.toggle_play(), PlaybackState::Idle);
        assert_eq!(controller.media().play_calls, 0);
    }

    #[test]
    fn toggle_switches_between_playing_and_paused() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        controller.load_episode(track("e1"));

        assert_eq!(controller.toggle_play(), PlaybackState::Paused);
        assert!(!controller.media().playing);
        assert_eq!(controller.toggle_play(), PlaybackState::Playing);
        assert!(controller.media().playing);
    }

    #[test]
    fn toggle_after_blocked_autoplay_starts_playing() {
        let mut controller =
            AudioPlaybackController::new(MockMedia::with_outcomes(&[PlayOutcome::Blocked]));
        controller.load_episode(track("e1"));

        assert_eq!(controller.toggle_play(), PlaybackState::Playing);
    }

    #[test]
    fn pending_load_resolves_through_events() {
        let mut controller =
            AudioPlaybackController::new(MockMedia::with_outcomes(&[PlayOutcome::Pending]));
        let ticket = controller.load_episode(track("e1"));
        assert_eq!(controller.state(), PlaybackState::Loading);

        controller.handle_event(MediaEvent::Playing(ticket));
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn pending_load_can_be_rejected() {
        let mut controller =
            AudioPlaybackController::new(MockMedia::with_outcomes(&[PlayOutcome::Pending]));
        let ticket = controller.load_episode(track("e1"));

        controller.handle_event(MediaEvent::PlayRejected(ticket));
        assert_eq!(controller.state(), PlaybackState::Paused);
    }

    #[test]
    fn last_load_wins_over_slow_first_load() {
        let mut controller = AudioPlaybackController::new(MockMedia::with_outcomes(&[
            PlayOutcome::Pending,
            PlayOutcome::Pending,
        ]));

        let first = controller.load_episode(track("e1"));
        let second = controller.load_episode(track("e2"));

        // e1 finishes buffering after e2 was requested
        controller.handle_event(MediaEvent::Playing(first));
        assert_eq!(controller.state(), PlaybackState::Loading);
        assert_eq!(
            controller.media().source.as_deref(),
            Some("https://example.com/e2.mp3")
        );

        controller.handle_event(MediaEvent::Playing(second));
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(controller.track().unwrap().title, "e2");
        assert_eq!(
            controller.media().source.as_deref(),
            Some("https://example.com/e2.mp3")
        );
    }

    #[test]
    fn toggle_while_loading_cancels_autoplay() {
        let mut controller =
            AudioPlaybackController::new(MockMedia::with_outcomes(&[PlayOutcome::Pending]));
        let ticket = controller.load_episode(track("e1"));

        assert_eq!(controller.toggle_play(), PlaybackState::Paused);
        controller.handle_event(MediaEvent::Playing(ticket));
        assert_eq!(controller.state(), PlaybackState::Paused);
    }

    #[test]
    fn load_from_any_state_goes_through_loading() {
        let mut controller = AudioPlaybackController::new(MockMedia::with_outcomes(&[
            PlayOutcome::Started,
            PlayOutcome::Pending,
        ]));
        controller.load_episode(track("e1"));
        controller.toggle_play();
        assert_eq!(controller.state(), PlaybackState::Paused);

        controller.load_episode(track("e2"));
        assert_eq!(controller.state(), PlaybackState::Loading);
    }

    #[test]
    fn seek_clamps_to_bounds() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        controller.media_mut().duration = Some(60.0);
        controller.load_episode(track("e1"));

        controller.seek(-10.0);
        assert_eq!(controller.media().position, 0.0);

        controller.seek(30.0);
        assert_eq!(controller.media().position, 30.0);
        assert_eq!(controller.progress_percent(), 50.0);

        controller.seek(120.0);
        assert_eq!(controller.media().position, 60.0);
        assert_eq!(controller.progress_percent(), 100.0);
    }

    #[test]
    fn seek_with_unknown_duration_only_clamps_at_zero() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        controller.load_episode(track("e1"));

        controller.seek(500.0);
        assert_eq!(controller.media().position, 500.0);
        assert_eq!(controller.progress_percent(), 0.0);

        controller.seek(-1000.0);
        assert_eq!(controller.media().position, 0.0);
    }

    #[test]
    fn seek_without_source_is_noop() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        controller.seek(10.0);
        assert_eq!(controller.media().position, 0.0);
    }

    #[test]
    fn time_updates_refresh_progress() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        controller.media_mut().duration = Some(200.0);
        controller.load_episode(track("e1"));

        controller.media_mut().position = 50.0;
        assert_eq!(controller.progress_percent(), 0.0);
        controller.handle_event(MediaEvent::TimeUpdate);
        assert_eq!(controller.progress_percent(), 25.0);
    }

    #[test]
    fn ended_pauses_at_full_progress() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        controller.load_episode(track("e1"));

        controller.handle_event(MediaEvent::Ended);
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(controller.progress_percent(), 100.0);
    }

    #[test]
    fn failure_pauses_without_completing() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        controller.media_mut().duration = Some(100.0);
        controller.load_episode(track("e1"));
        controller.seek(20.0);

        controller.handle_event(MediaEvent::Failed);
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(controller.progress_percent(), 20.0);
        assert!(!controller.should_confirm_exit());
    }

    #[test]
    fn failure_before_any_load_is_ignored() {
        let mut controller = AudioPlaybackController::new(MockMedia::default());
        controller.handle_event(MediaEvent::Failed);
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[test]
    fn track_from_favorite() {
        let favorite = FavoriteRecord {
            id: "Alpha-S1-E1".to_string(),
            title: "Pilot".to_string(),
            show_title: "Alpha".to_string(),
            season_number: 1,
            episode_number: 1,
            description: String::new(),
            image: String::new(),
            file: "https://example.com/pilot.mp3".to_string(),
            added_at: chrono::Utc::now(),
        };

        let track = Track::from(&favorite);
        assert_eq!(track.title, "Pilot");
        assert_eq!(track.file, "https://example.com/pilot.mp3");
    }
}
