use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use tray_scanner::core::*;
use tray_scanner::systems::input::scanner_input_map;
use tray_scanner::systems::scanner::spawn_tray_scanner;
use tray_scanner::systems::subfloor::spawn_subfloor;
use tray_scanner::{ScannerInputPlugin, TrayScannerPlugin};

const FIELD_HALF_EXTENT: f32 = 12.0;
const SUBFLOOR_COUNT: usize = 120;
const WALK_SPEED: f32 = 4.0;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tray Scanner".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ScannerConfig::load())
        .add_plugins(TrayScannerPlugin { side: SimulationSide::Listen })
        .add_plugins(ScannerInputPlugin)
        .add_systems(Startup, (setup_camera, spawn_demo_station))
        .add_systems(Update, (player_movement, camera_follow).chain())
        .run();
}

fn setup_camera(mut commands: Commands) {
    // One world unit per tile.
    commands.spawn((Camera2d, Transform::from_scale(Vec3::splat(1.0 / 32.0))));
}

fn spawn_demo_station(mut commands: Commands, config: Res<ScannerConfig>) {
    let mut rng = fastrand::Rng::with_seed(14);

    let scanner = spawn_tray_scanner(&mut commands, 1, TrayScanner::new(config.default_range));
    let mut hands = Hands::new(2);
    hands.slots[0] = Some(scanner);

    commands.spawn((
        Name::new("player"),
        LocalObserver,
        hands,
        Equipment::default(),
        InteractionAbility::default(),
        MapId(0),
        Sprite {
            color: Color::srgb(0.95, 0.95, 0.95),
            custom_size: Some(Vec2::splat(0.8)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 2.0),
        scanner_input_map(),
        ActionState::<ScannerAction>::default(),
    ));

    let kinds: [(&str, SubfloorTags); 6] = [
        ("gas pipe", SubfloorTags::PIPE),
        ("disposal pipe", SubfloorTags::DISPOSAL),
        ("power cable", SubfloorTags::CABLE),
        ("LV power cable", SubfloorTags::CABLE.with(SubfloorTags::CABLE_LV)),
        ("MV power cable", SubfloorTags::CABLE.with(SubfloorTags::CABLE_MV)),
        ("HV power cable", SubfloorTags::CABLE.with(SubfloorTags::CABLE_HV)),
    ];

    for _ in 0..SUBFLOOR_COUNT {
        let (name, tags) = kinds[rng.usize(..kinds.len())];
        let position = Vec2::new(
            (rng.f32() * 2.0 - 1.0) * FIELD_HALF_EXTENT,
            (rng.f32() * 2.0 - 1.0) * FIELD_HALF_EXTENT,
        )
        .round();
        spawn_subfloor(&mut commands, name, tags, position, MapId(0));
    }

    info!("Spawned demo station with {} subfloor entities", SUBFLOOR_COUNT);
    info!("Z toggles the scanner, X cycles its filter, arrows walk");
}

fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut players: Query<&mut Transform, With<LocalObserver>>,
) {
    let mut direction = Vec2::ZERO;
    if keyboard.pressed(KeyCode::ArrowUp) { direction.y += 1.0; }
    if keyboard.pressed(KeyCode::ArrowDown) { direction.y -= 1.0; }
    if keyboard.pressed(KeyCode::ArrowLeft) { direction.x -= 1.0; }
    if keyboard.pressed(KeyCode::ArrowRight) { direction.x += 1.0; }
    if direction == Vec2::ZERO {
        return;
    }

    let step = direction.normalize() * WALK_SPEED * time.delta_secs();
    for mut transform in players.iter_mut() {
        transform.translation += step.extend(0.0);
    }
}

fn camera_follow(
    players: Query<&Transform, (With<LocalObserver>, Without<Camera2d>)>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(player) = players.single() else { return; };
    for mut camera in cameras.iter_mut() {
        camera.translation.x = player.translation.x;
        camera.translation.y = player.translation.y;
    }
}
