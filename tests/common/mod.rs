#![allow(dead_code)]

use std::collections::HashSet;
use std::time::Duration;

use bevy::color::Alpha;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use tray_scanner::core::*;
use tray_scanner::TrayScannerPlugin;

pub fn app(side: SimulationSide) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins(TrayScannerPlugin { side });
    app
}

pub fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

pub fn scanner(enabled: bool, range: f32, filter: CategoryFilter) -> TrayScanner {
    TrayScanner { enabled, filter, range }
}

pub fn spawn_scanner(app: &mut App, net_id: u64, scanner: TrayScanner) -> Entity {
    let visual = if scanner.enabled { ScannerVisual::On } else { ScannerVisual::Off };
    app.world_mut().spawn((scanner, visual, NetEntity(net_id))).id()
}

pub fn spawn_observer(app: &mut App, position: Vec2, held: &[Entity]) -> Entity {
    let mut hands = Hands::new(held.len().max(2));
    for (slot, item) in held.iter().enumerate() {
        hands.slots[slot] = Some(*item);
    }
    app.world_mut()
        .spawn((
            LocalObserver,
            hands,
            MapId(0),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

pub fn spawn_hidden(app: &mut App, tags: SubfloorTags, position: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            SubfloorHide::default(),
            tags,
            Sprite::default(),
            Transform::from_translation(position.extend(0.0)),
            Visibility::Hidden,
        ))
        .id()
}

pub fn revealed(app: &mut App) -> HashSet<Entity> {
    let mut query = app.world_mut().query_filtered::<Entity, With<TrayRevealed>>();
    query.iter(app.world()).collect()
}

pub fn alpha(app: &App, entity: Entity) -> f32 {
    app.world().get::<Sprite>(entity).map(|s| s.color.alpha()).unwrap_or(f32::NAN)
}

pub fn revealed_flag(app: &App, entity: Entity) -> bool {
    app.world()
        .get::<SubfloorAppearance>(entity)
        .is_some_and(|a| a.scanner_revealed)
}
