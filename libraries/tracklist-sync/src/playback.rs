//! Playback coordination
//!
//! At most one track is playing at a time. The coordinator owns the single
//! optional playing id and publishes it over a `watch` channel; every
//! [`TrackPlayer`] observes that value and pauses itself once it is no longer
//! the playing id. Nothing ever tells a player to pause directly.

use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, trace};
use tracklist_core::TrackId;

/// Audio backend driven by a [`TrackPlayer`]
///
/// Implementations are expected to be cheap; they are called synchronously
/// from state transitions.
pub trait AudioOutput: Send {
    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self) -> Result<()>;

    /// Jump to a position
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set the volume (0.0 = silent, 1.0 = full volume)
    fn set_volume(&mut self, volume: f32) -> Result<()>;
}

/// Single source of truth for which track is playing
#[derive(Debug, Clone)]
pub struct PlaybackCoordinator {
    playing: Arc<watch::Sender<Option<TrackId>>>,
}

impl Default for PlaybackCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackCoordinator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            playing: Arc::new(tx),
        }
    }

    /// Toggle playback of `id`.
    ///
    /// - `id` already playing: nothing plays afterwards.
    /// - `force_pause`: only ever stops `id`; it never starts playback and
    ///   leaves another playing track alone.
    /// - otherwise `id` becomes the only playing track.
    ///
    /// Returns the playing id after the transition.
    pub fn request_play(&self, id: &TrackId, force_pause: bool) -> Option<TrackId> {
        let changed = self.playing.send_if_modified(|playing| {
            if playing.as_ref() == Some(id) {
                *playing = None;
                true
            } else if force_pause {
                false
            } else {
                *playing = Some(id.clone());
                true
            }
        });
        let now = self.playing();
        if changed {
            debug!(track_id = %id, force_pause, playing = ?now, "Playback changed");
        }
        now
    }

    /// Stop whatever is playing
    pub fn stop(&self) {
        self.playing.send_if_modified(|playing| playing.take().is_some());
    }

    pub fn playing(&self) -> Option<TrackId> {
        self.playing.borrow().clone()
    }

    pub fn is_playing(&self, id: &TrackId) -> bool {
        self.playing.borrow().as_ref() == Some(id)
    }

    /// Watch the playing id
    pub fn subscribe(&self) -> watch::Receiver<Option<TrackId>> {
        self.playing.subscribe()
    }
}

/// One rendered player for a track with an attached audio file
pub struct TrackPlayer<O: AudioOutput> {
    id: TrackId,
    output: O,
    coordinator: PlaybackCoordinator,
    playing_rx: watch::Receiver<Option<TrackId>>,
    duration: Option<Duration>,
    position: Duration,
    volume: f32,
    repeat: bool,
    /// Whether the output is currently told to play
    active: bool,
}

impl<O: AudioOutput> TrackPlayer<O> {
    pub fn new(id: TrackId, output: O, coordinator: PlaybackCoordinator) -> Self {
        let playing_rx = coordinator.subscribe();
        Self {
            id,
            output,
            coordinator,
            playing_rx,
            duration: None,
            position: Duration::ZERO,
            volume: 1.0,
            repeat: false,
            active: false,
        }
    }

    pub fn id(&self) -> &TrackId {
        &self.id
    }

    /// Audio is decoded and its duration known
    pub fn on_ready(&mut self, duration: Duration) -> Result<()> {
        self.duration = Some(duration);
        self.sync()
    }

    /// Play stays disabled until the audio is ready
    pub fn can_play(&self) -> bool {
        self.duration.is_some()
    }

    /// User pressed the play/pause button
    pub fn press_play(&mut self) -> Result<()> {
        if !self.can_play() {
            debug!(track_id = %self.id, "Play pressed before audio was ready");
            return Ok(());
        }
        self.coordinator.request_play(&self.id, false);
        self.sync()
    }

    /// Bring the output in line with the coordinator
    pub fn sync(&mut self) -> Result<()> {
        let should_play =
            self.can_play() && self.playing_rx.borrow_and_update().as_ref() == Some(&self.id);

        if should_play == self.active {
            return Ok(());
        }
        trace!(track_id = %self.id, should_play, "Syncing player");
        if should_play {
            self.output.play()?;
        } else {
            self.output.pause()?;
        }
        self.active = should_play;
        Ok(())
    }

    /// Wait for the next coordinator change and react to it.
    ///
    /// Returns `Ok(false)` once the coordinator is gone.
    pub async fn changed(&mut self) -> Result<bool> {
        if self.playing_rx.changed().await.is_err() {
            return Ok(false);
        }
        self.sync()?;
        Ok(true)
    }

    /// Progress report from the output
    pub fn on_position(&mut self, position: Duration) {
        self.position = self.clamp_position(position);
    }

    pub fn seek(&mut self, position: Duration) -> Result<()> {
        let position = self.clamp_position(position);
        self.output.seek(position)?;
        self.position = position;
        Ok(())
    }

    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.output.set_volume(volume)?;
        self.volume = volume;
        Ok(())
    }

    /// Flip single-track repeat; returns the new setting
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    /// The output reached the end of the track.
    ///
    /// With repeat on, playback restarts from zero. Otherwise the position
    /// rewinds and the coordinator is told this track ended.
    pub fn on_finished(&mut self) -> Result<()> {
        self.seek(Duration::ZERO)?;
        if self.repeat {
            self.output.play()?;
            self.active = true;
            return Ok(());
        }
        self.coordinator.request_play(&self.id, true);
        self.sync()
    }

    pub fn is_playing(&self) -> bool {
        self.active
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    fn clamp_position(&self, position: Duration) -> Duration {
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }
}

/// Render a duration as `m:ss`
pub fn format_time(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
