// src/systems/subfloor.rs - Under-cover occlusion and subfloor spawning
use bevy::prelude::*;
use crate::core::*;

/// Covered entities stay invisible unless a scanner is revealing them.
pub fn subfloor_visibility_system(
    mut subfloor: Query<(&SubfloorHide, Has<TrayRevealed>, &mut Visibility)>,
) {
    for (hide, revealed, mut visibility) in subfloor.iter_mut() {
        let wanted = if hide.under_cover && !revealed {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        visibility.set_if_neq(wanted);
    }
}

pub fn spawn_subfloor(
    commands: &mut Commands,
    name: &str,
    tags: SubfloorTags,
    position: Vec2,
    map: MapId,
) -> Entity {
    commands
        .spawn((
            Name::new(name.to_string()),
            SubfloorHide::default(),
            tags,
            map,
            Sprite {
                color: subfloor_color(tags),
                custom_size: Some(Vec2::new(0.9, 0.2)),
                ..default()
            },
            Transform::from_translation(position.extend(0.5)),
            Visibility::Hidden,
        ))
        .id()
}

fn subfloor_color(tags: SubfloorTags) -> Color {
    if tags.contains(SubfloorTags::CABLE_HV) {
        Color::srgb(0.9, 0.3, 0.2)
    } else if tags.contains(SubfloorTags::CABLE_MV) {
        Color::srgb(0.9, 0.7, 0.2)
    } else if tags.intersects(SubfloorTags::ANY_CABLE) {
        Color::srgb(0.3, 0.5, 0.9)
    } else if tags.contains(SubfloorTags::DISPOSAL) {
        Color::srgb(0.5, 0.5, 0.5)
    } else {
        Color::srgb(0.3, 0.8, 0.8)
    }
}
