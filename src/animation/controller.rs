//! Play/pause/direction state machine for scene animation.

use super::{AnimationDirection, AnimationSource, AnimationState};

/// Drives an [`AnimationSource`] through time.
///
/// Responsibilities:
/// - Track the play state and direction
/// - Advance the current time on each tick, wrapping inside the source's
///   time range
/// - Ask the source to load the frame at the new time
#[derive(Default)]
pub struct AnimationController {
    state: AnimationState,
    source: Option<Box<dyn AnimationSource>>,
    current_time: f64,
}

impl AnimationController {
    /// Stopped controller without a source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the animation source. Playback stops and the time rewinds
    /// to the start of the new source's range.
    pub fn set_source(&mut self, source: Box<dyn AnimationSource>) {
        self.current_time = source.time_range().map_or(0.0, |(start, _)| start);
        self.source = Some(source);
        self.state = AnimationState::Stopped;
        log::debug!(
            "Animation: source replaced, time reset to {}",
            self.current_time
        );
    }

    /// Drop the animation source and stop.
    pub fn clear_source(&mut self) {
        self.source = None;
        self.state = AnimationState::Stopped;
        self.current_time = 0.0;
    }

    /// Whether a source is attached.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Start playing in `direction`, switching direction if already playing.
    pub fn start(&mut self, direction: AnimationDirection) {
        self.state = match direction {
            AnimationDirection::Forward => AnimationState::PlayingForward,
            AnimationDirection::Backward => AnimationState::PlayingBackward,
        };
    }

    /// Stop playing.
    pub fn stop(&mut self) {
        self.state = AnimationState::Stopped;
    }

    /// Stopped starts; same direction stops; opposite direction switches
    /// without stopping.
    pub fn toggle(&mut self, direction: AnimationDirection) {
        if self.direction() == Some(direction) {
            self.stop();
        } else {
            self.start(direction);
        }
    }

    /// Whether the animation is playing in either direction.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state != AnimationState::Stopped
    }

    /// Current direction, `None` when stopped.
    #[must_use]
    pub const fn direction(&self) -> Option<AnimationDirection> {
        match self.state {
            AnimationState::Stopped => None,
            AnimationState::PlayingForward => Some(AnimationDirection::Forward),
            AnimationState::PlayingBackward => {
                Some(AnimationDirection::Backward)
            }
        }
    }

    /// Current play state.
    #[must_use]
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    /// Current animation time.
    #[must_use]
    pub const fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Time range of the attached source.
    #[must_use]
    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.source.as_ref().and_then(|s| s.time_range())
    }

    /// Seek to `time`, clamped to the source's range.
    ///
    /// Returns whether the source loaded the frame.
    pub fn load_at_time(&mut self, time: f64) -> bool {
        let time = match self.time_range() {
            Some((start, end)) if time < start || time > end => {
                let clamped = time.clamp(start, end);
                log::warn!(
                    "Animation time {time} is outside of range \
                     [{start}, {end}], using {clamped}."
                );
                clamped
            }
            _ => time,
        };
        self.current_time = time;
        self.source
            .as_mut()
            .is_some_and(|source| source.load_at_time(time))
    }

    /// Select the animation that follows `index` and rewind to the start
    /// of its range.
    ///
    /// Indices go `0, 1, ..` up to the last animation, then `-1` (every
    /// animation at once) when there are several, then back to `0`.
    /// Returns the new index, or `None` when there is nothing to cycle.
    pub fn cycle_animation(&mut self, index: i64) -> Option<i64> {
        let source = self.source.as_mut()?;
        let count = i64::try_from(source.animation_count()).ok()?;
        if count == 0 {
            return None;
        }
        let next = if index < 0 {
            0
        } else if index + 1 < count {
            index + 1
        } else if count > 1 {
            -1
        } else {
            0
        };
        if !source.select_animation(next) {
            log::warn!("Animation: could not select animation {next}");
            return None;
        }
        log::debug!("Animation: playing {}", source.animation_name(next));

        let start = self.time_range().map_or(0.0, |(start, _)| start);
        let _ = self.load_at_time(start);
        Some(next)
    }

    /// Display name of animation `index`, or `No animation` without a
    /// source.
    #[must_use]
    pub fn animation_name(&self, index: i64) -> String {
        self.source.as_ref().map_or_else(
            || "No animation".to_owned(),
            |source| source.animation_name(index),
        )
    }

    /// Advance by `dt * speed_factor` in the current direction.
    ///
    /// Returns `true` when playing, meaning a render is needed.
    pub fn tick(&mut self, dt: f64, speed_factor: f64) -> bool {
        let sign = match self.direction() {
            None => return false,
            Some(direction) => direction.sign(),
        };

        let mut time = sign.mul_add(dt * speed_factor, self.current_time);
        if let Some((start, end)) = self.time_range() {
            let span = end - start;
            time = if span > 0.0 {
                start + (time - start).rem_euclid(span)
            } else {
                start
            };
        }
        self.current_time = time;

        if let Some(source) = self.source.as_mut() {
            if !source.load_at_time(time) {
                log::error!("Animation: could not load time value {time}");
            }
        }
        true
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("state", &self.state)
            .field("has_source", &self.source.is_some())
            .field("current_time", &self.current_time)
            .finish()
    }
}
