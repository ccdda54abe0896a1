use bevy::prelude::*;

/// Primary use of a scanner device (activate in hand / in world).
#[derive(Event, Debug, Clone, Copy)]
pub struct UseScannerEvent {
    pub user: Entity,
    pub device: Entity,
}

/// Ask for the alternative verbs `user` may perform on `target`.
#[derive(Event, Debug, Clone, Copy)]
pub struct VerbMenuRequest {
    pub user: Entity,
    pub target: Entity,
}

/// Alt-click: perform the top alternative verb without opening the menu.
#[derive(Event, Debug, Clone, Copy)]
pub struct AltActivateEvent {
    pub user: Entity,
    pub target: Entity,
}

#[derive(Event, Debug, Clone)]
pub struct ExecuteVerbEvent {
    pub user: Entity,
    pub verb: AlternativeVerb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeVerb {
    pub label: String,
    pub priority: i32,
    pub act: VerbAct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbAct {
    CycleScannerFilter { device: Entity },
}
