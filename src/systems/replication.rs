// src/systems/replication.rs - Scanner state snapshots between authoritative and observing sides
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::*;
use crate::systems::scanner::{set_scanner_enabled, set_scanner_filter, ScannerDeviceMut, ScannerDeviceMutItem};

/// Replicated fields of a scanner. Range stays local to each side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrayScannerState {
    pub enabled: bool,
    pub filter: CategoryFilter,
}

impl From<&TrayScanner> for TrayScannerState {
    fn from(scanner: &TrayScanner) -> Self {
        Self { enabled: scanner.enabled, filter: scanner.filter }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerSnapshot {
    pub net_id: u64,
    pub tick: u64,
    pub state: TrayScannerState,
}

impl ScannerSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Encoded snapshots waiting for the transport.
#[derive(Resource, Default, Debug)]
pub struct SnapshotOutbox(pub Vec<Vec<u8>>);

/// Encoded snapshots delivered by the transport, possibly duplicated or out of order.
#[derive(Resource, Default, Debug)]
pub struct SnapshotInbox(pub Vec<Vec<u8>>);

/// Applies an incoming state through the normal setters so side effects fire once per
/// real change. Returns true if anything changed.
pub fn apply_scanner_state(device: &mut ScannerDeviceMutItem, state: TrayScannerState) -> bool {
    let enabled_changed = set_scanner_enabled(device, state.enabled);
    let filter_changed = set_scanner_filter(device, state.filter);
    enabled_changed || filter_changed
}

pub fn capture_scanner_snapshots(
    tick: Res<SimulationTick>,
    mut devices: Query<(&NetEntity, &TrayScanner, &mut ReplicatedScanner)>,
    mut outbox: ResMut<SnapshotOutbox>,
) {
    for (net, scanner, mut replicated) in devices.iter_mut() {
        if !replicated.dirty {
            continue;
        }
        let snapshot = ScannerSnapshot {
            net_id: net.0,
            tick: tick.0,
            state: TrayScannerState::from(scanner),
        };
        match snapshot.encode() {
            Ok(bytes) => {
                debug!("Captured scanner snapshot {:?}", snapshot);
                outbox.0.push(bytes);
                replicated.dirty = false;
            }
            Err(e) => error!("Failed to encode scanner snapshot: {}", e),
        }
    }
}

pub fn apply_scanner_snapshots(
    mut inbox: ResMut<SnapshotInbox>,
    ids: Query<(Entity, &NetEntity), With<TrayScanner>>,
    mut devices: Query<ScannerDeviceMut>,
) {
    if inbox.0.is_empty() {
        return;
    }
    let by_net_id: HashMap<u64, Entity> = ids.iter().map(|(entity, net)| (net.0, entity)).collect();

    for bytes in inbox.0.drain(..) {
        let snapshot = match ScannerSnapshot::decode(&bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Dropping undecodable scanner snapshot: {}", e);
                continue;
            }
        };
        let Some(&entity) = by_net_id.get(&snapshot.net_id) else {
            warn!("Scanner snapshot for unknown net id {}", snapshot.net_id);
            continue;
        };
        let Ok(mut device) = devices.get_mut(entity) else { continue; };

        if let Some(last) = device.replicated.last_applied_tick {
            if snapshot.tick < last {
                debug!("Ignoring stale scanner snapshot (tick {} < {})", snapshot.tick, last);
                continue;
            }
        }

        if apply_scanner_state(&mut device, snapshot.state) {
            debug!("Applied scanner snapshot {:?}", snapshot);
        }
        device.replicated.last_applied_tick = Some(snapshot.tick);
    }
}

/// Listen-mode transport: everything captured is delivered straight back.
pub fn loopback_snapshots(mut outbox: ResMut<SnapshotOutbox>, mut inbox: ResMut<SnapshotInbox>) {
    let delivered = std::mem::take(&mut outbox.0);
    inbox.0.extend(delivered);
}
