use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use crate::core::*;
use crate::systems::plugin::TrayScannerSet;

pub struct ScannerInputPlugin;

impl Plugin for ScannerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<ScannerAction>::default())
            .add_systems(Update, scanner_input_system.in_set(TrayScannerSet::Input));
    }
}

pub fn scanner_input_map() -> InputMap<ScannerAction> {
    InputMap::new([
        (ScannerAction::Use, KeyCode::KeyZ),
        (ScannerAction::CycleFilter, KeyCode::KeyX),
    ])
}

pub fn scanner_input_system(
    players: Query<(Entity, &ActionState<ScannerAction>, &Hands), With<LocalObserver>>,
    scanners: Query<(), With<TrayScanner>>,
    mut use_events: EventWriter<UseScannerEvent>,
    mut alt_events: EventWriter<AltActivateEvent>,
) {
    for (player, action_state, hands) in players.iter() {
        let Some(item) = hands.active_item() else { continue; };
        if !scanners.contains(item) {
            continue;
        }

        if action_state.just_pressed(&ScannerAction::Use) {
            use_events.write(UseScannerEvent { user: player, device: item });
        }
        if action_state.just_pressed(&ScannerAction::CycleFilter) {
            alt_events.write(AltActivateEvent { user: player, target: item });
        }
    }
}
