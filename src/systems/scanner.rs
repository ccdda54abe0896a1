// src/systems/scanner.rs - Scanner device toggling, filter cycling and indicator
use bevy::ecs::query::QueryData;
use bevy::prelude::*;

use crate::core::*;

/// Mutable view of a scanner device used by every state-changing operation.
#[derive(QueryData)]
#[query_data(mutable)]
pub struct ScannerDeviceMut {
    pub scanner: &'static mut TrayScanner,
    pub replicated: &'static mut ReplicatedScanner,
    pub visual: &'static mut ScannerVisual,
}

fn mark_dirty(replicated: &mut ReplicatedScanner) {
    replicated.dirty = true;
    replicated.changes += 1;
}

/// Returns false when the scanner was already in the requested state.
pub fn set_scanner_enabled(device: &mut ScannerDeviceMutItem, enabled: bool) -> bool {
    if device.scanner.enabled == enabled {
        return false;
    }
    device.scanner.enabled = enabled;
    mark_dirty(&mut device.replicated);

    // Revealed subfloor is left alone here; the reveal pass fades it out once the
    // scanner stops qualifying anything.
    let visual = if enabled { ScannerVisual::On } else { ScannerVisual::Off };
    device.visual.set_if_neq(visual);
    true
}

pub fn set_scanner_filter(device: &mut ScannerDeviceMutItem, filter: CategoryFilter) -> bool {
    if device.scanner.filter == filter {
        return false;
    }
    device.scanner.filter = filter;
    mark_dirty(&mut device.replicated);
    true
}

pub fn cycle_scanner_filter(device: &mut ScannerDeviceMutItem) -> CategoryFilter {
    let next = device.scanner.filter.next();
    set_scanner_filter(device, next);
    next
}

pub fn activate_scanner(device: &mut ScannerDeviceMutItem) -> bool {
    let enabled = !device.scanner.enabled;
    set_scanner_enabled(device, enabled);
    enabled
}

pub fn spawn_tray_scanner(commands: &mut Commands, net_id: u64, scanner: TrayScanner) -> Entity {
    let visual = if scanner.enabled { ScannerVisual::On } else { ScannerVisual::Off };
    commands
        .spawn((
            Name::new("tray scanner"),
            scanner,
            visual,
            NetEntity(net_id),
            Sprite {
                color: indicator_color(visual),
                custom_size: Some(Vec2::new(0.4, 0.6)),
                ..default()
            },
            Transform::default(),
        ))
        .id()
}

pub fn use_scanner_system(
    mut use_events: EventReader<UseScannerEvent>,
    mut devices: Query<ScannerDeviceMut>,
) {
    for event in use_events.read() {
        let Ok(mut device) = devices.get_mut(event.device) else { continue; };
        let enabled = activate_scanner(&mut device);
        info!("Scanner {:?} {} by {:?}", event.device, if enabled { "enabled" } else { "disabled" }, event.user);
    }
}

fn indicator_color(visual: ScannerVisual) -> Color {
    match visual {
        ScannerVisual::On => Color::srgb(0.2, 0.9, 0.4),
        ScannerVisual::Off => Color::srgb(0.35, 0.35, 0.35),
    }
}

pub fn scanner_indicator_system(
    mut devices: Query<(&ScannerVisual, &mut Sprite), Changed<ScannerVisual>>,
) {
    for (visual, mut sprite) in devices.iter_mut() {
        sprite.color = indicator_color(*visual);
    }
}
