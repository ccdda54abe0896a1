mod common;

use bevy::prelude::*;
use tray_scanner::core::*;
use tray_scanner::systems::verbs::VerbMenu;

use common::*;

fn filter_of(app: &App, device: Entity) -> CategoryFilter {
    app.world().get::<TrayScanner>(device).unwrap().filter
}

#[test]
fn alt_activation_walks_the_filter_cycle() {
    let mut app = app(SimulationSide::Observer);
    let device = spawn_scanner(&mut app, 1, TrayScanner::default());
    let player = spawn_observer(&mut app, Vec2::ZERO, &[device]);

    let mut visited = Vec::new();
    for _ in 0..7 {
        app.world_mut().send_event(AltActivateEvent { user: player, target: device });
        app.update();
        visited.push(filter_of(&app, device));
    }

    assert_eq!(
        visited,
        vec![
            CategoryFilter::GasPipes,
            CategoryFilter::CargoPipes,
            CategoryFilter::AllWires,
            CategoryFilter::Lv,
            CategoryFilter::Mv,
            CategoryFilter::Hv,
            CategoryFilter::All,
        ]
    );
}

#[test]
fn incapacitated_user_gets_no_verb() {
    let mut app = app(SimulationSide::Observer);
    let device = spawn_scanner(&mut app, 1, TrayScanner::default());
    let player = spawn_observer(&mut app, Vec2::ZERO, &[device]);
    app.world_mut()
        .entity_mut(player)
        .insert(InteractionAbility { can_interact: false });

    app.world_mut().send_event(VerbMenuRequest { user: player, target: device });
    app.world_mut().send_event(AltActivateEvent { user: player, target: device });
    app.update();

    assert!(app.world().resource::<VerbMenu>().verbs.is_empty());
    assert_eq!(filter_of(&app, device), CategoryFilter::All);
}

#[test]
fn nearby_device_on_the_floor_is_reachable() {
    let mut app = app(SimulationSide::Observer);
    let near = spawn_scanner(&mut app, 1, TrayScanner::default());
    let far = spawn_scanner(&mut app, 2, TrayScanner::default());
    app.world_mut().entity_mut(near).insert(Transform::from_xyz(1.0, 0.0, 0.0));
    app.world_mut().entity_mut(far).insert(Transform::from_xyz(6.0, 0.0, 0.0));
    let player = spawn_observer(&mut app, Vec2::ZERO, &[]);

    app.world_mut().send_event(AltActivateEvent { user: player, target: near });
    app.world_mut().send_event(AltActivateEvent { user: player, target: far });
    app.update();

    assert_eq!(filter_of(&app, near), CategoryFilter::GasPipes);
    assert_eq!(filter_of(&app, far), CategoryFilter::All);
}

#[test]
fn menu_lists_cycle_verb_and_executing_it_cycles() {
    let mut app = app(SimulationSide::Observer);
    let device = spawn_scanner(&mut app, 1, TrayScanner::default());
    let player = spawn_observer(&mut app, Vec2::ZERO, &[device]);

    app.world_mut().send_event(VerbMenuRequest { user: player, target: device });
    app.update();

    let verb = {
        let menu = app.world().resource::<VerbMenu>();
        assert_eq!(menu.user, Some(player));
        assert_eq!(menu.target, Some(device));
        assert_eq!(menu.verbs.len(), 1);
        menu.verbs[0].clone()
    };
    assert_eq!(verb.act, VerbAct::CycleScannerFilter { device });
    assert_eq!(filter_of(&app, device), CategoryFilter::All);

    app.world_mut().send_event(ExecuteVerbEvent { user: player, verb });
    app.update();

    assert_eq!(filter_of(&app, device), CategoryFilter::GasPipes);
}

#[test]
fn non_scanner_targets_offer_nothing() {
    let mut app = app(SimulationSide::Observer);
    let player = spawn_observer(&mut app, Vec2::ZERO, &[]);
    let crate_entity = app.world_mut().spawn(Transform::default()).id();

    app.world_mut().send_event(VerbMenuRequest { user: player, target: crate_entity });
    app.update();

    assert!(app.world().resource::<VerbMenu>().verbs.is_empty());
}
