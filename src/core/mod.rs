// src/core/mod.rs - Shared scanner types, input actions and simulation resources
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

pub mod components;
pub mod config;
pub mod events;

pub use components::*;
pub use config::*;
pub use events::*;

/// Key used for the single reveal/hide fade slot on each subfloor entity.
pub const TRAY_ANIMATION_KEY: &str = "trays";

// === INPUT ===
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
#[reflect(Hash, PartialEq)]
pub enum ScannerAction {
    /// Primary use of the item in the active hand.
    Use,
    /// Alternative verb on the item in the active hand.
    CycleFilter,
}

// === SIMULATION ===
/// Which half of the simulation this world runs.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationSide {
    /// Source of truth; publishes scanner snapshots.
    Authoritative,
    /// Predicts locally, applies snapshots, renders reveals.
    Observer,
    /// Both halves in one world, snapshots looped back locally.
    Listen,
}

impl SimulationSide {
    pub fn is_authoritative(self) -> bool {
        matches!(self, SimulationSide::Authoritative | SimulationSide::Listen)
    }

    pub fn is_observer(self) -> bool {
        matches!(self, SimulationSide::Observer | SimulationSide::Listen)
    }
}

#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationTick(pub u64);

pub fn advance_tick(mut tick: ResMut<SimulationTick>) {
    tick.0 += 1;
}
