// src/core/components.rs - Scanner device, subfloor and carrier components
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::systems::animation::FadeAnimator;

// === SCANNER DEVICE ===
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect)]
pub enum CategoryFilter {
    #[default]
    All,
    GasPipes,
    CargoPipes,
    AllWires,
    Lv,
    Mv,
    Hv,
}

impl CategoryFilter {
    /// Cycling order; `next` walks this list and wraps back to `All`.
    pub const ORDER: [CategoryFilter; 7] = [
        CategoryFilter::All,
        CategoryFilter::GasPipes,
        CategoryFilter::CargoPipes,
        CategoryFilter::AllWires,
        CategoryFilter::Lv,
        CategoryFilter::Mv,
        CategoryFilter::Hv,
    ];

    pub fn next(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::GasPipes,
            CategoryFilter::GasPipes => CategoryFilter::CargoPipes,
            CategoryFilter::CargoPipes => CategoryFilter::AllWires,
            CategoryFilter::AllWires => CategoryFilter::Lv,
            CategoryFilter::Lv => CategoryFilter::Mv,
            CategoryFilter::Mv => CategoryFilter::Hv,
            CategoryFilter::Hv => CategoryFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "everything",
            CategoryFilter::GasPipes => "gas pipes",
            CategoryFilter::CargoPipes => "disposal pipes",
            CategoryFilter::AllWires => "all wires",
            CategoryFilter::Lv => "LV cables",
            CategoryFilter::Mv => "MV cables",
            CategoryFilter::Hv => "HV cables",
        }
    }
}

/// A t-ray style scanner. Lives on the item entity, carried in a hand or equipment slot.
#[derive(Component, Debug, Clone, PartialEq)]
#[require(ScannerVisual, ReplicatedScanner)]
pub struct TrayScanner {
    pub enabled: bool,
    pub filter: CategoryFilter,
    /// Reveal radius around the carrier. Local to each side, never replicated.
    pub range: f32,
}

impl TrayScanner {
    pub fn new(range: f32) -> Self {
        Self {
            enabled: false,
            filter: CategoryFilter::All,
            range: range.max(0.0),
        }
    }
}

impl Default for TrayScanner {
    fn default() -> Self {
        Self::new(4.0)
    }
}

/// On/off indicator shown on the device itself.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScannerVisual {
    On,
    #[default]
    Off,
}

#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicatedScanner {
    /// Set on every real change, cleared when the state is captured for observers.
    pub dirty: bool,
    /// Number of real changes applied to this device.
    pub changes: u32,
    pub last_applied_tick: Option<u64>,
}

/// Stable id shared by both sides of the simulation.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetEntity(pub u64);

// === SUBFLOOR ===
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
#[require(SubfloorAppearance, SubfloorTags, FadeAnimator, MapId)]
pub struct SubfloorHide {
    /// Owned by the surface (tiles) layer; true while a floor covers the entity.
    pub under_cover: bool,
}

impl Default for SubfloorHide {
    fn default() -> Self {
        Self { under_cover: true }
    }
}

/// Appearance flag the observing side raises while a scanner shows the entity.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubfloorAppearance {
    pub scanner_revealed: bool,
}

/// Category tags, fixed when the entity is created.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SubfloorTags(pub u8);

impl SubfloorTags {
    pub const NONE: SubfloorTags = SubfloorTags(0);
    pub const PIPE: SubfloorTags = SubfloorTags(1 << 0);
    pub const DISPOSAL: SubfloorTags = SubfloorTags(1 << 1);
    pub const CABLE_LV: SubfloorTags = SubfloorTags(1 << 2);
    pub const CABLE_MV: SubfloorTags = SubfloorTags(1 << 3);
    pub const CABLE_HV: SubfloorTags = SubfloorTags(1 << 4);
    /// Cable of unknown tier.
    pub const CABLE: SubfloorTags = SubfloorTags(1 << 5);

    pub const ANY_CABLE: SubfloorTags = SubfloorTags(
        Self::CABLE.0 | Self::CABLE_LV.0 | Self::CABLE_MV.0 | Self::CABLE_HV.0,
    );

    pub fn contains(self, other: SubfloorTags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: SubfloorTags) -> bool {
        self.0 & other.0 != 0
    }

    pub fn with(self, other: SubfloorTags) -> Self {
        SubfloorTags(self.0 | other.0)
    }
}

/// Atmos pipe visuals; marks gas pipes for entities tagged by name.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PipeAppearance;

/// Reveal state of a subfloor entity while a scanner is involved with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealPhase {
    #[default]
    Hidden,
    Revealing,
    Revealed,
    Hiding,
}

/// Present while some scanner qualifies the entity, or while it is still fading out.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrayRevealed {
    pub phase: RevealPhase,
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MapId(pub u32);

// === CARRIERS ===
#[derive(Component, Debug, Clone, Default)]
pub struct Hands {
    pub slots: Vec<Option<Entity>>,
    pub active: usize,
}

impl Hands {
    pub fn new(count: usize) -> Self {
        Self { slots: vec![None; count], active: 0 }
    }

    pub fn held(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn active_item(&self) -> Option<Entity> {
        self.slots.get(self.active).copied().flatten()
    }

    pub fn holds(&self, item: Entity) -> bool {
        self.held().any(|held| held == item)
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Equipment {
    pub slots: Vec<Option<Entity>>,
}

impl Equipment {
    pub fn worn(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.iter().flatten().copied()
    }
}

/// The entity the local player controls.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LocalObserver;

#[derive(Component, Debug, Clone, Copy)]
pub struct InteractionAbility {
    pub can_interact: bool,
}

impl Default for InteractionAbility {
    fn default() -> Self {
        Self { can_interact: true }
    }
}
