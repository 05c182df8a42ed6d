//! Linear step tweens.
//!
//! [`TweenDriver`] is the runtime's [`AnimationDriver`]. It keeps at most one
//! tween per character and reports each finished tween exactly once; the scene
//! turns those reports into `finish_step` calls.

use std::collections::BTreeMap;
use std::time::Duration;

use game_core::{AnimationDriver, EntityId, Position, StepAnimation};

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: Position,
    to: Position,
    duration: Duration,
    elapsed: Duration,
}

impl Tween {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let ratio = self.elapsed.as_nanos() as f64 / self.duration.as_nanos() as f64;
        ratio.min(1.0) as f32
    }
}

#[derive(Debug, Default)]
pub struct TweenDriver {
    tweens: BTreeMap<EntityId, Tween>,
}

impl TweenDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self, entity: EntityId) -> bool {
        self.tweens.contains_key(&entity)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    /// Advances every tween by `dt` and returns the entities whose tween
    /// completed, in id order. Completed tweens are dropped.
    pub fn advance(&mut self, dt: Duration) -> Vec<EntityId> {
        let mut finished = Vec::new();
        for (entity, tween) in &mut self.tweens {
            tween.elapsed = tween.elapsed.saturating_add(dt);
            if tween.elapsed >= tween.duration {
                finished.push(*entity);
            }
        }
        for entity in &finished {
            self.tweens.remove(entity);
        }
        finished
    }

    /// Interpolated sprite position in world pixels, or `None` when idle.
    pub fn visual_position(&self, entity: EntityId) -> Option<(f32, f32)> {
        self.tweens.get(&entity).map(|tween| {
            let t = tween.progress();
            let lerp = |a: i32, b: i32| a as f32 + (b - a) as f32 * t;
            (lerp(tween.from.x, tween.to.x), lerp(tween.from.y, tween.to.y))
        })
    }
}

impl AnimationDriver for TweenDriver {
    fn animate(&mut self, step: StepAnimation) {
        let tween = Tween {
            from: step.from,
            to: step.to,
            duration: step.duration,
            elapsed: Duration::ZERO,
        };
        if self.tweens.insert(step.entity, tween).is_some() {
            tracing::warn!(entity = %step.entity, "replaced an unfinished step tween");
        }
    }
}
