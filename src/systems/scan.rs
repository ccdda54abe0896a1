// src/systems/scan.rs - Finds the observer's active scanner and the subfloor it qualifies
use bevy::prelude::*;
use std::collections::HashSet;

use crate::core::*;
use crate::systems::filter::matches_filter;
use crate::systems::spatial::SubfloorIndex;

/// Combined effect of every enabled scanner an observer carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveScan {
    pub range: f32,
    pub filter: CategoryFilter,
}

/// Subfloor entities that currently qualify for reveal, rebuilt every tick.
#[derive(Resource, Debug, Default)]
pub struct RevealCandidates {
    pub qualifying: HashSet<Entity>,
}

/// Items carried by an actor in lookup order: hand slots first, then equipment slots.
pub fn carried_items(hands: Option<&Hands>, equipment: Option<&Equipment>) -> Vec<Entity> {
    let mut items: Vec<Entity> = hands.map(|h| h.held().collect()).unwrap_or_default();
    if let Some(equipment) = equipment {
        items.extend(equipment.worn());
    }
    items
}

/// Range is the largest among enabled scanners; the filter comes from the first enabled
/// scanner in `carried` order. Returns `None` when nothing carried is an enabled scanner.
pub fn resolve_active_scan<'a>(
    carried: impl IntoIterator<Item = Entity>,
    lookup: impl Fn(Entity) -> Option<&'a TrayScanner>,
) -> Option<ActiveScan> {
    let mut active: Option<ActiveScan> = None;
    for item in carried {
        let Some(scanner) = lookup(item) else { continue; };
        if !scanner.enabled {
            continue;
        }
        // Struct literals can carry a negative or NaN range.
        let range = scanner.range.max(0.0);
        match active.as_mut() {
            Some(scan) => scan.range = scan.range.max(range),
            None => active = Some(ActiveScan { range, filter: scanner.filter }),
        }
    }
    active
}

pub fn scan_subfloor_system(
    observers: Query<(&Transform, Option<&MapId>, Option<&Hands>, Option<&Equipment>), With<LocalObserver>>,
    scanners: Query<&TrayScanner>,
    index: Res<SubfloorIndex>,
    subfloor: Query<(&SubfloorHide, &SubfloorTags, &Transform)>,
    mut candidates: ResMut<RevealCandidates>,
) {
    candidates.qualifying.clear();

    for (transform, map, hands, equipment) in observers.iter() {
        let carried = carried_items(hands, equipment);
        let Some(scan) = resolve_active_scan(carried, |item| scanners.get(item).ok()) else {
            continue;
        };

        let origin = transform.translation.truncate();
        let map = map.copied().unwrap_or_default();

        for entity in index.query_range(map, origin, scan.range) {
            let Ok((hide, tags, target)) = subfloor.get(entity) else { continue; };
            if !hide.under_cover || !matches_filter(scan.filter, *tags) {
                continue;
            }
            if target.translation.truncate().distance(origin) > scan.range {
                continue;
            }
            candidates.qualifying.insert(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(enabled: bool, range: f32, filter: CategoryFilter) -> TrayScanner {
        TrayScanner { enabled, filter, range }
    }

    #[test]
    fn no_enabled_scanner_means_no_scan() {
        let off = scanner(false, 10.0, CategoryFilter::All);
        let carried = [Entity::from_raw(1)];
        assert_eq!(resolve_active_scan(carried, |_| Some(&off)), None);
        assert_eq!(resolve_active_scan(Vec::new(), |_| Some(&off)), None);
    }

    #[test]
    fn range_is_max_and_filter_is_first_enabled() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let c = Entity::from_raw(3);
        let disabled = scanner(false, 50.0, CategoryFilter::GasPipes);
        let short = scanner(true, 2.0, CategoryFilter::Hv);
        let long = scanner(true, 8.0, CategoryFilter::Lv);

        let lookup = |e: Entity| match e.index() {
            1 => Some(&disabled),
            2 => Some(&short),
            3 => Some(&long),
            _ => None,
        };

        let scan = resolve_active_scan([a, b, c], lookup).unwrap();
        assert_eq!(scan.range, 8.0);
        assert_eq!(scan.filter, CategoryFilter::Hv);

        let scan = resolve_active_scan([c, b, a], lookup).unwrap();
        assert_eq!(scan.filter, CategoryFilter::Lv);
    }

    #[test]
    fn negative_and_nan_ranges_count_as_zero() {
        let negative = scanner(true, -3.0, CategoryFilter::All);
        let nan = scanner(true, f32::NAN, CategoryFilter::All);
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);

        let lookup = |e: Entity| if e == a { Some(&nan) } else { Some(&negative) };
        assert_eq!(resolve_active_scan([a, b], lookup).unwrap().range, 0.0);
        assert_eq!(resolve_active_scan([b, a], lookup).unwrap().range, 0.0);
    }

    #[test]
    fn hands_come_before_equipment() {
        let held = Entity::from_raw(1);
        let worn = Entity::from_raw(2);
        let mut hands = Hands::new(2);
        hands.slots[1] = Some(held);
        let equipment = Equipment { slots: vec![None, Some(worn)] };

        assert_eq!(carried_items(Some(&hands), Some(&equipment)), vec![held, worn]);
        assert_eq!(carried_items(None, Some(&equipment)), vec![worn]);
        assert!(carried_items(None, None).is_empty());
    }
}
