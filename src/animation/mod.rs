//! Scene animation playback reachable through console commands.

mod controller;

pub use controller::AnimationController;

/// Playback direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationDirection {
    /// Time increases.
    Forward,
    /// Time decreases.
    Backward,
}

impl AnimationDirection {
    /// `1.0` forward, `-1.0` backward.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Play state of an [`AnimationController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Not playing.
    #[default]
    Stopped,
    /// Playing with increasing time.
    PlayingForward,
    /// Playing with decreasing time.
    PlayingBackward,
}

/// The animated part of the scene, owned by the host.
pub trait AnimationSource {
    /// `(start, end)` of the available animation, `None` if not animated.
    fn time_range(&self) -> Option<(f64, f64)>;

    /// Move the scene to `time`. Returns `false` if the frame failed to load.
    fn load_at_time(&mut self, time: f64) -> bool;

    /// Number of animations the scene offers.
    fn animation_count(&self) -> usize {
        1
    }

    /// Play animation `index`, or every animation at once when `index` is
    /// negative. Returns `false` if the selection is not supported.
    fn select_animation(&mut self, index: i64) -> bool {
        index == 0
    }

    /// Display name of animation `index`.
    fn animation_name(&self, index: i64) -> String {
        if index < 0 {
            "All Animations".to_owned()
        } else {
            format!("Animation {index}")
        }
    }
}
