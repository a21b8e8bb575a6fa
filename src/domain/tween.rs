/// Scale tweening: easing and the two-phase "pop" animator.
///
/// The pop runs as an explicit state machine advanced by `tick(dt)` once
/// per frame:
///
///   Idle ──trigger──▶ Running(Grow, 0) ──half──▶ Running(Settle, 0) ──half──▶ Idle
///
/// Grow eases `start → peak`, Settle eases `peak → origin`. A new trigger
/// while Running restarts at Grow but keeps the origin captured by the first
/// trigger, so an interrupted pop still lands on the pre-trigger scale.

use glam::Vec3;

/// Hermite smoothstep between `from` and `to`.
pub fn smoothstep(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t = t * t * (3.0 - 2.0 * t);
    from + (to - from) * t
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PopSettings {
    /// Total length of both phases, in seconds.
    pub duration: f32,
    pub start_scale: Vec3,
    pub peak_scale: Vec3,
}

impl Default for PopSettings {
    fn default() -> Self {
        PopSettings {
            duration: 0.35,
            start_scale: Vec3::new(0.5, 0.5, 1.0),
            peak_scale: Vec3::new(1.25, 1.25, 1.0),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PopPhase {
    Grow,
    Settle,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PopState {
    Idle,
    Running { phase: PopPhase, elapsed: f32, origin: Vec3 },
}

#[derive(Clone, Debug)]
pub struct PopAnimator {
    pub settings: PopSettings,
    state: PopState,
}

impl PopAnimator {
    pub fn new(settings: PopSettings) -> Self {
        PopAnimator { settings, state: PopState::Idle }
    }

    fn half(&self) -> f32 {
        self.settings.duration * 0.5
    }

    /// Start (or restart) the pop. Returns the scale to apply right now.
    pub fn trigger(&mut self, current: Vec3) -> Vec3 {
        let origin = match self.state {
            PopState::Running { origin, .. } => origin,
            PopState::Idle => current,
        };
        if self.half() <= 0.0 {
            self.state = PopState::Idle;
            return origin;
        }
        self.state = PopState::Running { phase: PopPhase::Grow, elapsed: 0.0, origin };
        self.settings.start_scale
    }

    /// Advance by one frame. `None` while idle, otherwise the scale for this frame.
    pub fn tick(&mut self, dt: f32) -> Option<Vec3> {
        let half = self.half();
        let PopState::Running { phase, elapsed, origin } = self.state else {
            return None;
        };
        let elapsed = elapsed + dt.max(0.0);
        let s = &self.settings;

        let scale = match phase {
            PopPhase::Grow if elapsed < half => {
                self.state = PopState::Running { phase, elapsed, origin };
                s.start_scale.lerp(s.peak_scale, smoothstep(0.0, 1.0, elapsed / half))
            }
            PopPhase::Grow => {
                self.state = PopState::Running { phase: PopPhase::Settle, elapsed: 0.0, origin };
                s.peak_scale
            }
            PopPhase::Settle if elapsed < half => {
                self.state = PopState::Running { phase, elapsed, origin };
                s.peak_scale.lerp(origin, smoothstep(0.0, 1.0, elapsed / half))
            }
            PopPhase::Settle => {
                self.state = PopState::Idle;
                origin
            }
        };
        Some(scale)
    }
}

#[cfg(test)]
impl PopAnimator {
    pub fn state(&self) -> PopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PopState::Running { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const EPS: f32 = 1e-4;

    fn run_to_idle(anim: &mut PopAnimator, scale: &mut Vec3, peak_seen: &mut bool) {
        let peak = anim.settings.peak_scale;
        for _ in 0..10_000 {
            match anim.tick(DT) {
                Some(s) => {
                    *scale = s;
                    if s.abs_diff_eq(peak, EPS) {
                        *peak_seen = true;
                    }
                }
                None => return,
            }
        }
        panic!("pop never finished");
    }

    #[test]
    fn smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < EPS);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    }

    #[test]
    fn trigger_jumps_to_start_scale() {
        let mut anim = PopAnimator::new(PopSettings::default());
        let s = anim.trigger(Vec3::ONE);
        assert_eq!(s, Vec3::new(0.5, 0.5, 1.0));
        assert!(anim.is_running());
    }

    #[test]
    fn full_pop_hits_peak_and_returns_to_origin() {
        let mut anim = PopAnimator::new(PopSettings::default());
        let origin = Vec3::new(1.0, 1.0, 1.0);
        let mut scale = anim.trigger(origin);
        let mut peak_seen = false;
        run_to_idle(&mut anim, &mut scale, &mut peak_seen);
        assert!(peak_seen);
        assert_eq!(scale, origin);
        assert_eq!(anim.state(), PopState::Idle);
    }

    #[test]
    fn restart_mid_flight_keeps_original_scale() {
        let mut anim = PopAnimator::new(PopSettings::default());
        let origin = Vec3::new(0.9, 0.9, 1.0);
        let mut scale = anim.trigger(origin);
        for _ in 0..8 {
            scale = anim.tick(DT).unwrap_or(scale);
        }
        assert!(!scale.abs_diff_eq(origin, EPS));

        scale = anim.trigger(scale);
        assert_eq!(anim.state(), PopState::Running { phase: PopPhase::Grow, elapsed: 0.0, origin });
        let mut peak_seen = false;
        run_to_idle(&mut anim, &mut scale, &mut peak_seen);
        assert!(peak_seen);
        assert_eq!(scale, origin);
    }

    #[test]
    fn phases_ease_monotonically() {
        let mut anim = PopAnimator::new(PopSettings::default());
        anim.trigger(Vec3::ONE);
        let mut prev = 0.5_f32;
        let mut growing = true;
        while let Some(s) = anim.tick(DT) {
            if s.x >= 1.25 - EPS {
                growing = false;
            }
            if growing {
                assert!(s.x >= prev - EPS);
            } else {
                assert!(s.x <= prev + EPS);
            }
            prev = s.x;
        }
        assert_eq!(prev, 1.0);
    }

    #[test]
    fn zero_duration_is_instant() {
        let mut anim = PopAnimator::new(PopSettings { duration: 0.0, ..PopSettings::default() });
        let origin = Vec3::new(2.0, 2.0, 1.0);
        assert_eq!(anim.trigger(origin), origin);
        assert_eq!(anim.tick(DT), None);
    }

    #[test]
    fn idle_tick_is_noop() {
        let mut anim = PopAnimator::new(PopSettings::default());
        assert_eq!(anim.tick(DT), None);
    }
}
