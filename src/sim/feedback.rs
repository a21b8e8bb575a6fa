/// Result feedback: the "pop" on the result text.
///
/// Two mechanisms, chosen by config:
///   - `ClipAnimator`: named keyframe clips, the renderer's native path.
///     `play(name)` restarts the clip from time 0.
///   - `PopAnimator`: the code-driven tween fallback.
///
/// Selection mirrors the host rules: with `use_animator` set, only the
/// animator is used (nothing plays if none is bound); otherwise the tween
/// runs on the result slot.

use std::collections::HashMap;

use log::warn;

use crate::config::FeedbackConfig;
use glam::Vec3;

use crate::domain::tween::PopAnimator;
use crate::sim::board::ResultBoard;

pub const DEFAULT_POP_CLIP: &str = "TxtResult_Pop";

/// A keyframed scale curve. Keys are `(time_seconds, scale)`, sorted by time.
#[derive(Clone, Debug)]
pub struct Clip {
    keys: Vec<(f32, Vec3)>,
}

impl Clip {
    pub fn new(mut keys: Vec<(f32, Vec3)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Clip { keys }
    }

    pub fn length(&self) -> f32 {
        self.keys.last().map(|k| k.0).unwrap_or(0.0)
    }

    /// Linear sample. Holds the first/last key outside the keyed range.
    pub fn sample(&self, t: f32) -> Vec3 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return Vec3::ONE,
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for pair in self.keys.windows(2) {
            let (t0, a) = pair[0];
            let (t1, b) = pair[1];
            if t >= t0 && t <= t1 {
                let span = t1 - t0;
                let f = if span > 0.0 { (t - t0) / span } else { 1.0 };
                return a.lerp(b, f.clamp(0.0, 1.0));
            }
        }
        last.1
    }
}

struct Playing {
    name: String,
    elapsed: f32,
}

pub struct ClipAnimator {
    clips: HashMap<String, Clip>,
    playing: Option<Playing>,
}

impl ClipAnimator {
    pub fn new() -> Self {
        ClipAnimator { clips: HashMap::new(), playing: None }
    }

    /// Animator preloaded with the stock result-text pop.
    pub fn with_default_clips() -> Self {
        let mut anim = ClipAnimator::new();
        anim.add_clip(DEFAULT_POP_CLIP, Clip::new(vec![
            (0.0, Vec3::new(0.5, 0.5, 1.0)),
            (0.175, Vec3::new(1.25, 1.25, 1.0)),
            (0.35, Vec3::ONE),
        ]));
        anim
    }

    pub fn add_clip(&mut self, name: &str, clip: Clip) {
        self.clips.insert(name.to_string(), clip);
    }

    /// Start `name` from normalized time 0, replacing whatever was playing.
    /// Returns the scale at time 0, or `None` if no such clip exists.
    pub fn play(&mut self, name: &str) -> Option<Vec3> {
        match self.clips.get(name) {
            Some(clip) => {
                let scale = clip.sample(0.0);
                self.playing = Some(Playing { name: name.to_string(), elapsed: 0.0 });
                Some(scale)
            }
            None => {
                warn!("animator has no clip named {:?}", name);
                None
            }
        }
    }

    /// Advance the playing clip. The final key is emitted once, then the
    /// animator stops reporting.
    pub fn tick(&mut self, dt: f32) -> Option<Vec3> {
        let playing = self.playing.as_mut()?;
        let clip = self.clips.get(&playing.name)?;
        playing.elapsed += dt.max(0.0);
        let scale = clip.sample(playing.elapsed);
        if playing.elapsed >= clip.length() {
            self.playing = None;
        }
        Some(scale)
    }
}

pub struct Feedback {
    use_animator: bool,
    state_name: String,
    animator: Option<ClipAnimator>,
    pop: PopAnimator,
}

impl Feedback {
    pub fn new(cfg: &FeedbackConfig, animator: Option<ClipAnimator>) -> Self {
        Feedback {
            use_animator: cfg.use_animator,
            state_name: cfg.anim_state_name.clone(),
            animator,
            pop: PopAnimator::new(cfg.pop),
        }
    }

    pub fn from_config(cfg: &FeedbackConfig) -> Self {
        Feedback::new(cfg, Some(ClipAnimator::with_default_clips()))
    }

    /// Play the result feedback for a freshly shown result.
    pub fn trigger(&mut self, board: &mut ResultBoard) {
        if self.use_animator {
            if self.state_name.is_empty() {
                return;
            }
            if let Some(anim) = &mut self.animator {
                if let Some(scale) = anim.play(&self.state_name) {
                    board.set_result_scale(scale);
                }
            }
        } else if let Some(current) = board.result_scale() {
            let scale = self.pop.trigger(current);
            board.set_result_scale(scale);
        }
    }

    /// Once per frame.
    pub fn tick(&mut self, dt: f32, board: &mut ResultBoard) {
        let scale = if self.use_animator {
            self.animator.as_mut().and_then(|a| a.tick(dt))
        } else {
            self.pop.tick(dt)
        };
        if let Some(s) = scale {
            board.set_result_scale(s);
        }
    }
}

#[cfg(test)]
impl ClipAnimator {
    pub fn current(&self) -> Option<&str> {
        self.playing.as_ref().map(|p| p.name.as_str())
    }
}

#[cfg(test)]
impl Feedback {
    pub fn is_animating(&self) -> bool {
        if self.use_animator {
            self.animator.as_ref().map_or(false, |a| a.current().is_some())
        } else {
            self.pop.is_running()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tween::PopSettings;

    const DT: f32 = 1.0 / 60.0;

    fn cfg(use_animator: bool, name: &str) -> FeedbackConfig {
        FeedbackConfig {
            use_animator,
            anim_state_name: name.to_string(),
            pop: PopSettings::default(),
        }
    }

    fn drain(fb: &mut Feedback, board: &mut ResultBoard) -> Vec<Vec3> {
        let mut seen = vec![];
        for _ in 0..1000 {
            if !fb.is_animating() {
                break;
            }
            fb.tick(DT, board);
            if let Some(s) = board.result_scale() {
                seen.push(s);
            }
        }
        seen
    }

    #[test]
    fn clip_samples_between_keys() {
        let clip = Clip::new(vec![(1.0, Vec3::ONE), (0.0, Vec3::new(0.0, 0.0, 0.0))]);
        assert_eq!(clip.length(), 1.0);
        assert!(clip.sample(0.5).abs_diff_eq(Vec3::new(0.5, 0.5, 0.5), 1e-6));
        assert_eq!(clip.sample(-1.0), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(clip.sample(5.0), Vec3::ONE);
    }

    #[test]
    fn replay_restarts_from_zero() {
        let mut anim = ClipAnimator::with_default_clips();
        anim.play(DEFAULT_POP_CLIP);
        for _ in 0..5 {
            anim.tick(DT);
        }
        let restart = anim.play(DEFAULT_POP_CLIP);
        assert_eq!(restart, Some(Vec3::new(0.5, 0.5, 1.0)));
        assert_eq!(anim.current(), Some(DEFAULT_POP_CLIP));
    }

    #[test]
    fn unknown_clip_is_ignored() {
        let mut anim = ClipAnimator::with_default_clips();
        assert_eq!(anim.play("Nope"), None);
        assert_eq!(anim.current(), None);
        assert_eq!(anim.tick(DT), None);
    }

    #[test]
    fn animator_path_ends_on_last_key() {
        let mut fb = Feedback::from_config(&cfg(true, DEFAULT_POP_CLIP));
        let mut board = ResultBoard::bound();
        fb.trigger(&mut board);
        assert_eq!(board.result_scale(), Some(Vec3::new(0.5, 0.5, 1.0)));
        let seen = drain(&mut fb, &mut board);
        assert_eq!(seen.last().copied(), Some(Vec3::ONE));
        assert!(!fb.pop.is_running());
    }

    #[test]
    fn tween_path_passes_peak_and_restores() {
        let mut fb = Feedback::from_config(&cfg(false, DEFAULT_POP_CLIP));
        let mut board = ResultBoard::bound();
        fb.trigger(&mut board);
        let seen = drain(&mut fb, &mut board);
        assert!(seen.iter().any(|s| s.abs_diff_eq(Vec3::new(1.25, 1.25, 1.0), 1e-4)));
        assert_eq!(board.result_scale(), Some(Vec3::ONE));
    }

    #[test]
    fn tween_retrigger_mid_flight_restores_origin() {
        let mut fb = Feedback::from_config(&cfg(false, DEFAULT_POP_CLIP));
        let mut board = ResultBoard::bound();
        fb.trigger(&mut board);
        for _ in 0..14 {
            fb.tick(DT, &mut board);
        }
        fb.trigger(&mut board);
        drain(&mut fb, &mut board);
        assert_eq!(board.result_scale(), Some(Vec3::ONE));
    }

    #[test]
    fn animator_selected_but_unbound_does_nothing() {
        let mut fb = Feedback::new(&cfg(true, DEFAULT_POP_CLIP), None);
        let mut board = ResultBoard::bound();
        fb.trigger(&mut board);
        assert!(!fb.is_animating());
        assert_eq!(board.result_scale(), Some(Vec3::ONE));
    }

    #[test]
    fn empty_state_name_does_nothing() {
        let mut fb = Feedback::from_config(&cfg(true, ""));
        let mut board = ResultBoard::bound();
        fb.trigger(&mut board);
        assert!(!fb.is_animating());
    }

    #[test]
    fn tween_without_result_slot_is_noop() {
        let mut fb = Feedback::from_config(&cfg(false, DEFAULT_POP_CLIP));
        let mut board = ResultBoard::unbound();
        fb.trigger(&mut board);
        assert!(!fb.is_animating());
    }
}
