// src/systems/verbs.rs - Alternative verb for cycling a scanner's filter
use bevy::prelude::*;

use crate::core::*;
use crate::systems::scan::carried_items;
use crate::systems::scanner::{cycle_scanner_filter, ScannerDeviceMut};

/// Verbs offered for the most recent menu request.
#[derive(Resource, Debug, Default)]
pub struct VerbMenu {
    pub user: Option<Entity>,
    pub target: Option<Entity>,
    pub verbs: Vec<AlternativeVerb>,
}

/// Carried devices are always in reach; anything else must be within `reach`.
pub fn can_access(carried: bool, user_pos: Option<Vec2>, device_pos: Option<Vec2>, reach: f32) -> bool {
    if carried {
        return true;
    }
    match (user_pos, device_pos) {
        (Some(user), Some(device)) => user.distance(device) <= reach,
        _ => false,
    }
}

pub fn scanner_alternative_verb(
    device: Entity,
    scanner: &TrayScanner,
    can_access: bool,
    can_interact: bool,
) -> Option<AlternativeVerb> {
    if !can_access || !can_interact {
        return None;
    }
    Some(AlternativeVerb {
        label: format!("Switch filter to {}", scanner.filter.next().label()),
        priority: 1,
        act: VerbAct::CycleScannerFilter { device },
    })
}

type UserQuery<'w, 's> = Query<
    'w,
    's,
    (Option<&'static Transform>, Option<&'static Hands>, Option<&'static Equipment>, Option<&'static InteractionAbility>),
>;

fn verbs_for(
    user: Entity,
    target: Entity,
    users: &UserQuery,
    scanners: &Query<(&TrayScanner, Option<&Transform>)>,
    reach: f32,
) -> Option<AlternativeVerb> {
    let (user_transform, hands, equipment, ability) = users.get(user).ok()?;
    let (scanner, device_transform) = scanners.get(target).ok()?;

    let carried = carried_items(hands, equipment).contains(&target);
    let access = can_access(
        carried,
        user_transform.map(|t| t.translation.truncate()),
        device_transform.map(|t| t.translation.truncate()),
        reach,
    );
    let interact = ability.map_or(true, |a| a.can_interact);
    scanner_alternative_verb(target, scanner, access, interact)
}

pub fn collect_verb_menu_system(
    mut requests: EventReader<VerbMenuRequest>,
    users: UserQuery,
    scanners: Query<(&TrayScanner, Option<&Transform>)>,
    config: Res<ScannerConfig>,
    mut menu: ResMut<VerbMenu>,
) {
    for request in requests.read() {
        menu.user = Some(request.user);
        menu.target = Some(request.target);
        menu.verbs.clear();
        if let Some(verb) = verbs_for(request.user, request.target, &users, &scanners, config.interaction_range) {
            menu.verbs.push(verb);
        }
    }
}

/// Alt-click: run the highest priority alternative verb straight away.
pub fn alt_activate_system(
    mut events: EventReader<AltActivateEvent>,
    users: UserQuery,
    scanners: Query<(&TrayScanner, Option<&Transform>)>,
    config: Res<ScannerConfig>,
    mut execute: EventWriter<ExecuteVerbEvent>,
) {
    for event in events.read() {
        if let Some(verb) = verbs_for(event.user, event.target, &users, &scanners, config.interaction_range) {
            execute.write(ExecuteVerbEvent { user: event.user, verb });
        }
    }
}

pub fn execute_verb_system(
    mut events: EventReader<ExecuteVerbEvent>,
    mut devices: Query<ScannerDeviceMut>,
) {
    for event in events.read() {
        match event.verb.act {
            VerbAct::CycleScannerFilter { device } => {
                let Ok(mut scanner) = devices.get_mut(device) else { continue; };
                let filter = cycle_scanner_filter(&mut scanner);
                info!("Scanner {:?} now showing {}", device, filter.label());
            }
        }
    }
}
