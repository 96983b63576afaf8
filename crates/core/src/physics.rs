//! Physics module - vertical bounce with squash and stretch
//!
//! All quantities are in dots and frames. Height is measured upward from the
//! floor line; velocity is positive while rising.
//!
//! The bounce never settles: a rebound that damping has made too slow is
//! replaced by the full restart velocity, so the animation loops forever.

use crate::transform::Viewport;
use crate::types::{
    BOUNCE_HEIGHT, DAMPING, FALL_FRAMES, RESTART_THRESHOLD, SQUASH_DECAY, SQUASH_MAX,
};

/// Integration constants derived once from the display geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceParams {
    pub max_height: f32,
    pub gravity: f32,
    /// Launch speed that reaches `max_height` again.
    pub restart_velocity: f32,
    pub damping: f32,
    pub squash_decay: f32,
    /// Rebounds slower than `gravity * restart_threshold` restart.
    pub restart_threshold: f32,
}

impl BounceParams {
    /// Scale the bounce with the display so a fall always takes
    /// `FALL_FRAMES` frames from the apex.
    pub fn from_viewport(viewport: &Viewport) -> Self {
        let max_height = viewport.floor_y * BOUNCE_HEIGHT;
        let gravity = 2.0 * max_height / (FALL_FRAMES * FALL_FRAMES);
        Self {
            max_height,
            gravity,
            restart_velocity: (2.0 * max_height * gravity).sqrt(),
            damping: DAMPING,
            squash_decay: SQUASH_DECAY,
            restart_threshold: RESTART_THRESHOLD,
        }
    }
}

/// Reported by [`Bounce::step`] when the solid hits the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Downward speed at the moment of contact.
    pub speed: f32,
    /// Whether the rebound was reset to the restart velocity.
    pub restarted: bool,
}

/// Position, velocity and squash of the bouncing solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    height: f32,
    velocity: f32,
    squash: f32,
}

impl Bounce {
    /// Resting at the top of the bounce, undeformed.
    pub fn at_apex(params: &BounceParams) -> Self {
        Self {
            height: params.max_height,
            velocity: 0.0,
            squash: 0.0,
        }
    }

    /// Construct an arbitrary state. Height and squash are clamped into range.
    pub fn new(height: f32, velocity: f32, squash: f32) -> Self {
        Self {
            height: height.max(0.0),
            velocity,
            squash: squash.clamp(0.0, SQUASH_MAX),
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn squash(&self) -> f32 {
        self.squash
    }

    /// Advance one frame.
    pub fn step(&mut self, params: &BounceParams) -> Option<Impact> {
        self.velocity -= params.gravity;
        self.height += self.velocity;

        let mut impact = None;
        if self.height <= 0.0 {
            let speed = self.velocity.abs();
            self.height = 0.0;
            self.squash = (speed / params.restart_velocity * 0.5).min(SQUASH_MAX);
            self.velocity = speed * params.damping;

            let restarted = self.velocity < params.gravity * params.restart_threshold;
            if restarted {
                self.velocity = params.restart_velocity;
            }
            impact = Some(Impact { speed, restarted });
        }

        self.squash *= params.squash_decay;
        impact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Geometry;

    fn params(cols: u16, rows: u16) -> BounceParams {
        let vp = Viewport::from_geometry(Geometry::new(cols, rows).unwrap());
        BounceParams::from_viewport(&vp)
    }

    #[test]
    fn derived_constants_for_80x24() {
        let p = params(80, 24);
        // floor line = 13 rows * 4 dots
        assert!((p.max_height - 52.0 * 0.55).abs() < 1e-4);
        assert!((p.gravity - 2.0 * p.max_height / 484.0).abs() < 1e-6);
        assert!((p.restart_velocity - p.gravity * 22.0).abs() < 1e-3);
    }

    #[test]
    fn first_impact_after_fall_frames() {
        let p = params(80, 24);
        let mut b = Bounce::at_apex(&p);
        let mut frames = 0;
        loop {
            frames += 1;
            if b.step(&p).is_some() {
                break;
            }
            assert!(frames < 100);
        }
        // Discrete integration overshoots slightly; contact lands around frame 22.
        assert!((21..=23).contains(&frames), "impact at frame {frames}");
    }

    #[test]
    fn invariants_hold_over_long_runs() {
        for (cols, rows) in [(20, 10), (80, 24), (300, 90)] {
            let p = params(cols, rows);
            let mut b = Bounce::at_apex(&p);
            for _ in 0..5_000 {
                b.step(&p);
                assert!(b.height() >= 0.0);
                assert!((0.0..=SQUASH_MAX).contains(&b.squash()));
            }
        }
    }

    #[test]
    fn impact_applies_damping_or_restart() {
        let p = params(80, 24);
        let mut b = Bounce::at_apex(&p);
        let mut impacts = 0;
        for _ in 0..2_000 {
            let before = b.velocity() - p.gravity;
            if let Some(impact) = b.step(&p) {
                impacts += 1;
                assert!((impact.speed - before.abs()).abs() < 1e-5);
                let damped = impact.speed * p.damping;
                if damped < p.gravity * p.restart_threshold {
                    assert!(impact.restarted);
                    assert_eq!(b.velocity(), p.restart_velocity);
                } else {
                    assert!(!impact.restarted);
                    assert!((b.velocity() - damped).abs() < 1e-5);
                }
            }
        }
        assert!(impacts > 10);
    }

    #[test]
    fn slow_impact_restarts_at_full_speed() {
        let p = params(80, 24);
        let mut b = Bounce::new(0.1, 0.0, 0.0);
        let impact = b.step(&p).unwrap();
        assert!(impact.restarted);
        assert_eq!(b.velocity(), p.restart_velocity);
        assert_eq!(b.height(), 0.0);
    }

    #[test]
    fn fast_impact_squash_is_capped_then_decayed() {
        let p = params(80, 24);
        let mut b = Bounce::new(0.0, -10.0 * p.restart_velocity, 0.0);
        b.step(&p).unwrap();
        assert!((b.squash() - SQUASH_MAX * p.squash_decay).abs() < 1e-6);
    }

    #[test]
    fn squash_decays_while_airborne() {
        let p = params(80, 24);
        let mut b = Bounce::new(p.max_height, 0.0, 0.4);
        assert!(b.step(&p).is_none());
        assert!((b.squash() - 0.4 * p.squash_decay).abs() < 1e-6);
    }

    #[test]
    fn bounce_never_decays_to_rest() {
        let p = params(80, 24);
        let mut b = Bounce::at_apex(&p);
        let mut peak = 0.0f32;
        for _ in 0..10_000 {
            b.step(&p);
        }
        for _ in 0..200 {
            b.step(&p);
            peak = peak.max(b.height());
        }
        assert!(peak > p.max_height * 0.25);
    }
}
