// src/systems/animation.rs - Keyed alpha fades on sprites
use bevy::color::Alpha;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub key: &'static str,
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl Fade {
    pub fn value(&self) -> f32 {
        if self.finished() {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    pub fn finished(&self) -> bool {
        // tolerate accumulated frame time rounding
        self.elapsed + 1e-5 >= self.duration
    }
}

/// One fade slot per entity. Playing a new fade replaces whatever was running.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct FadeAnimator {
    current: Option<Fade>,
    started: u32,
}

impl FadeAnimator {
    pub fn play(&mut self, key: &'static str, from: f32, to: f32, duration: f32) {
        self.current = Some(Fade {
            key,
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        });
        self.started += 1;
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.current.is_some_and(|fade| fade.key == key)
    }

    pub fn current(&self) -> Option<&Fade> {
        self.current.as_ref()
    }

    /// Total fades ever started on this entity.
    pub fn started(&self) -> u32 {
        self.started
    }

    pub fn stop(&mut self, key: &str) {
        if self.is_running(key) {
            self.current = None;
        }
    }

    /// Steps the running fade and returns the value to apply. The slot is freed once the
    /// fade has produced its final value.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        let fade = self.current.as_mut()?;
        fade.elapsed += dt.max(0.0);
        let value = fade.value();
        if fade.finished() {
            self.current = None;
        }
        Some(value)
    }
}

pub fn advance_fades(time: Res<Time>, mut fades: Query<(&mut FadeAnimator, &mut Sprite)>) {
    let dt = time.delta_secs();
    for (mut animator, mut sprite) in fades.iter_mut() {
        if animator.current.is_none() {
            continue;
        }
        if let Some(alpha) = animator.advance(dt) {
            sprite.color.set_alpha(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_reaches_target_after_duration() {
        let mut animator = FadeAnimator::default();
        animator.play("k", 0.0, 0.8, 0.3);

        let first = animator.advance(0.1).unwrap();
        assert!(first > 0.0 && first < 0.8);
        assert!(animator.is_running("k"));

        animator.advance(0.1);
        let last = animator.advance(0.1).unwrap();
        assert_eq!(last, 0.8);
        assert!(!animator.is_running("k"));
        assert_eq!(animator.advance(0.1), None);
    }

    #[test]
    fn new_fade_replaces_running_one() {
        let mut animator = FadeAnimator::default();
        animator.play("k", 0.0, 1.0, 1.0);
        animator.advance(0.5);
        animator.play("k", 0.5, 0.0, 1.0);

        let fade = animator.current().unwrap();
        assert_eq!(fade.from, 0.5);
        assert_eq!(fade.to, 0.0);
        assert_eq!(fade.elapsed, 0.0);
        assert_eq!(animator.started(), 2);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut animator = FadeAnimator::default();
        animator.play("k", 1.0, 0.0, 0.0);
        assert_eq!(animator.advance(0.0), Some(0.0));
        assert!(!animator.is_running("k"));
    }

    #[test]
    fn stop_only_clears_matching_key() {
        let mut animator = FadeAnimator::default();
        animator.play("a", 0.0, 1.0, 1.0);
        animator.stop("b");
        assert!(animator.is_running("a"));
        animator.stop("a");
        assert!(!animator.is_running("a"));
    }
}
