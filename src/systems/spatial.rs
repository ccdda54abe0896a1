// src/systems/spatial.rs - Uniform grid over subfloor entities
use bevy::prelude::*;
use std::collections::HashMap;

use crate::core::*;

/// Approximate index of subfloor entities bucketed by grid cell.
///
/// `query_range` returns everything in the cells overlapping the query square, so the
/// caller is expected to discard entities outside the actual radius.
#[derive(Resource, Debug)]
pub struct SubfloorIndex {
    cell_size: f32,
    cells: HashMap<(MapId, IVec2), Vec<Entity>>,
    locations: HashMap<Entity, (MapId, IVec2)>,
}

impl Default for SubfloorIndex {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl SubfloorIndex {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: if cell_size > 0.0 { cell_size } else { 4.0 },
            cells: HashMap::new(),
            locations: HashMap::new(),
        }
    }

    pub fn cell_of(&self, position: Vec2) -> IVec2 {
        (position / self.cell_size).floor().as_ivec2()
    }

    /// Inserts or moves `entity`.
    pub fn insert(&mut self, entity: Entity, map: MapId, position: Vec2) {
        let key = (map, self.cell_of(position));
        if self.locations.get(&entity) == Some(&key) {
            return;
        }
        self.remove(entity);
        self.cells.entry(key).or_default().push(entity);
        self.locations.insert(entity, key);
    }

    pub fn remove(&mut self, entity: Entity) {
        let Some(key) = self.locations.remove(&entity) else { return; };
        if let Some(bucket) = self.cells.get_mut(&key) {
            bucket.retain(|&e| e != entity);
            if bucket.is_empty() {
                self.cells.remove(&key);
            }
        }
    }

    pub fn query_range(&self, map: MapId, center: Vec2, range: f32) -> Box<dyn Iterator<Item = Entity> + '_> {
        let range = range.max(0.0);
        let min = self.cell_of(center - Vec2::splat(range));
        let max = self.cell_of(center + Vec2::splat(range));

        // Walking the square costs more than scanning what is occupied; fall back.
        let span_x = i64::from(max.x) - i64::from(min.x) + 1;
        let span_y = i64::from(max.y) - i64::from(min.y) + 1;
        if span_x.saturating_mul(span_y) > self.cells.len() as i64 {
            return Box::new(
                self.cells
                    .iter()
                    .filter(move |((cell_map, cell), _)| {
                        *cell_map == map && cell.cmpge(min).all() && cell.cmple(max).all()
                    })
                    .flat_map(|(_, bucket)| bucket.iter().copied()),
            );
        }

        Box::new(
            (min.y..=max.y)
                .flat_map(move |y| (min.x..=max.x).map(move |x| IVec2::new(x, y)))
                .filter_map(move |cell| self.cells.get(&(map, cell)))
                .flatten()
                .copied(),
        )
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

pub fn update_subfloor_index(
    mut index: ResMut<SubfloorIndex>,
    moved: Query<
        (Entity, &Transform, &MapId),
        (With<SubfloorHide>, Or<(Added<SubfloorHide>, Changed<Transform>, Changed<MapId>)>),
    >,
    mut removed: RemovedComponents<SubfloorHide>,
) {
    for entity in removed.read() {
        index.remove(entity);
    }
    for (entity, transform, map) in moved.iter() {
        index.insert(entity, *map, transform.translation.truncate());
    }
}
