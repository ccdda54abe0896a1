// src/systems/reveal.rs - Reveal/hide state machine for scanned subfloor entities
use bevy::color::Alpha;
use bevy::prelude::*;

use crate::core::*;
use crate::systems::animation::FadeAnimator;
use crate::systems::scan::RevealCandidates;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealParams {
    pub reveal_alpha: f32,
    pub fade_duration: f32,
}

impl From<&ScannerConfig> for RevealParams {
    fn from(config: &ScannerConfig) -> Self {
        Self {
            reveal_alpha: config.reveal_alpha,
            fade_duration: config.fade_duration,
        }
    }
}

/// Visual inputs and outputs of one reveal step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealView {
    pub alpha: f32,
    /// Replicated "scanner revealed" appearance flag.
    pub revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    Keep(RevealPhase),
    /// Fade-out finished; drop the reveal mark.
    Unmark,
}

/// Advances one entity by one tick. Safe to call repeatedly with the same inputs: a fade
/// is only started when no fade with the tray key is already running.
pub fn step_reveal(
    qualifies: bool,
    view: &mut RevealView,
    animator: &mut FadeAnimator,
    params: &RevealParams,
) -> RevealStep {
    if qualifies {
        // Predicted runs get reset by server state; don't inherit a stale opaque alpha.
        if !view.revealed && view.alpha > params.reveal_alpha {
            view.alpha = 0.0;
        }
        view.revealed = true;

        if view.alpha >= params.reveal_alpha {
            return RevealStep::Keep(RevealPhase::Revealed);
        }
        if let Some(fade) = animator.current().filter(|f| f.key == TRAY_ANIMATION_KEY) {
            return RevealStep::Keep(phase_of(fade.to));
        }

        view.alpha = 0.0;
        animator.play(TRAY_ANIMATION_KEY, 0.0, params.reveal_alpha, params.fade_duration);
        return RevealStep::Keep(RevealPhase::Revealing);
    }

    if view.alpha <= 0.0 {
        animator.stop(TRAY_ANIMATION_KEY);
        view.revealed = false;
        view.alpha = 1.0;
        return RevealStep::Unmark;
    }

    view.revealed = true;
    if let Some(fade) = animator.current().filter(|f| f.key == TRAY_ANIMATION_KEY) {
        return RevealStep::Keep(phase_of(fade.to));
    }

    animator.play(TRAY_ANIMATION_KEY, view.alpha, 0.0, params.fade_duration);
    RevealStep::Keep(RevealPhase::Hiding)
}

fn phase_of(target_alpha: f32) -> RevealPhase {
    if target_alpha > 0.0 {
        RevealPhase::Revealing
    } else {
        RevealPhase::Hiding
    }
}

pub fn reveal_update_system(
    mut commands: Commands,
    config: Res<ScannerConfig>,
    candidates: Res<RevealCandidates>,
    marked: Query<Entity, With<TrayRevealed>>,
    mut targets: Query<(
        Option<&mut TrayRevealed>,
        Option<&mut Sprite>,
        Option<&mut SubfloorAppearance>,
        Option<&mut FadeAnimator>,
    )>,
) {
    let params = RevealParams::from(&*config);

    // Snapshot the work list before touching any marks.
    let mut pending: Vec<Entity> = candidates.qualifying.iter().copied().collect();
    pending.extend(marked.iter().filter(|e| !candidates.qualifying.contains(e)));

    for entity in pending {
        let Ok((mark, sprite, appearance, animator)) = targets.get_mut(entity) else {
            continue;
        };

        // Nothing left to fade; drop the mark outright.
        let (Some(mut sprite), Some(mut appearance), Some(mut animator)) = (sprite, appearance, animator) else {
            if mark.is_some() {
                debug!("Subfloor {:?} lost its visuals, unmarking", entity);
                commands.entity(entity).remove::<TrayRevealed>();
            }
            continue;
        };

        let qualifies = candidates.qualifying.contains(&entity);
        let mut view = RevealView {
            alpha: sprite.color.alpha(),
            revealed: appearance.scanner_revealed,
        };
        let step = step_reveal(qualifies, &mut view, &mut animator, &params);

        if sprite.color.alpha() != view.alpha {
            sprite.color.set_alpha(view.alpha);
        }
        appearance.set_if_neq(SubfloorAppearance { scanner_revealed: view.revealed });

        match (step, mark) {
            (RevealStep::Unmark, Some(_)) => {
                debug!("Subfloor {:?} hidden again", entity);
                commands.entity(entity).remove::<TrayRevealed>();
            }
            (RevealStep::Unmark, None) => {}
            (RevealStep::Keep(phase), Some(mut mark)) => {
                if mark.phase != phase {
                    debug!("Subfloor {:?} {:?} -> {:?}", entity, mark.phase, phase);
                    mark.phase = phase;
                }
            }
            (RevealStep::Keep(phase), None) => {
                debug!("Subfloor {:?} marked {:?}", entity, phase);
                commands.entity(entity).insert(TrayRevealed { phase });
            }
        }
    }
}
