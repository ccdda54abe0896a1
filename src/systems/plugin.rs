// src/systems/plugin.rs - Wires the scanner systems for one simulation side
use bevy::prelude::*;

use crate::core::*;
use crate::systems::animation::advance_fades;
use crate::systems::filter::classify_new_subfloor;
use crate::systems::replication::*;
use crate::systems::reveal::reveal_update_system;
use crate::systems::scan::{scan_subfloor_system, RevealCandidates};
use crate::systems::scanner::{scanner_indicator_system, use_scanner_system};
use crate::systems::spatial::{update_subfloor_index, SubfloorIndex};
use crate::systems::subfloor::subfloor_visibility_system;
use crate::systems::verbs::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrayScannerSet {
    Input,
    Device,
    Replication,
    Scan,
    Reveal,
    Animate,
}

pub struct TrayScannerPlugin {
    pub side: SimulationSide,
}

impl Default for TrayScannerPlugin {
    fn default() -> Self {
        Self { side: SimulationSide::Listen }
    }
}

impl Plugin for TrayScannerPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ScannerConfig>() {
            app.insert_resource(ScannerConfig::default());
        }
        let cell_size = app.world().resource::<ScannerConfig>().index_cell_size;

        app.insert_resource(self.side)
            .init_resource::<SimulationTick>()
            .insert_resource(SubfloorIndex::new(cell_size))
            .init_resource::<RevealCandidates>()
            .init_resource::<SnapshotOutbox>()
            .init_resource::<SnapshotInbox>()
            .init_resource::<VerbMenu>()
            .add_event::<UseScannerEvent>()
            .add_event::<AltActivateEvent>()
            .add_event::<VerbMenuRequest>()
            .add_event::<ExecuteVerbEvent>()
            .configure_sets(Update, (
                TrayScannerSet::Input,
                TrayScannerSet::Device,
                TrayScannerSet::Replication,
                TrayScannerSet::Scan,
                TrayScannerSet::Reveal,
                TrayScannerSet::Animate,
            ).chain())
            .add_systems(Update, advance_tick.in_set(TrayScannerSet::Input))
            // Both sides run device actions; the observer predicts them locally.
            .add_systems(Update, (
                use_scanner_system,
                alt_activate_system,
                collect_verb_menu_system,
                execute_verb_system,
                scanner_indicator_system,
            ).chain().in_set(TrayScannerSet::Device));

        if self.side.is_authoritative() {
            app.add_systems(Update, capture_scanner_snapshots.in_set(TrayScannerSet::Replication));
        }

        if self.side == SimulationSide::Listen {
            app.add_systems(Update, loopback_snapshots
                .after(capture_scanner_snapshots)
                .before(apply_scanner_snapshots)
                .in_set(TrayScannerSet::Replication));
        }

        if self.side.is_observer() {
            app.add_systems(Update, apply_scanner_snapshots.in_set(TrayScannerSet::Replication))
                .add_systems(Update, (
                    classify_new_subfloor,
                    update_subfloor_index,
                    scan_subfloor_system,
                ).chain().in_set(TrayScannerSet::Scan))
                .add_systems(Update, reveal_update_system.in_set(TrayScannerSet::Reveal))
                .add_systems(Update, (
                    advance_fades,
                    subfloor_visibility_system,
                ).in_set(TrayScannerSet::Animate));
        }

        info!("Tray scanner plugin running as {:?}", self.side);
    }
}
