//! Per-category entity storage and identifier allocation.

use std::collections::BTreeMap;

use glam::Vec3;
use maw_core::{Body, Category, EntityId, EntityKind, EntitySnapshot, EntityState};

/// Authoritative record of a single entity stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Entity {
    pub(crate) id: EntityId,
    pub(crate) kind: EntityKind,
    pub(crate) position: Vec3,
    pub(crate) scale: Vec3,
    pub(crate) yaw: f32,
    pub(crate) health: f32,
    pub(crate) max_health: f32,
    pub(crate) active: bool,
    pub(crate) state: EntityState,
}

impl Entity {
    /// Creates an active entity at full health.
    pub(crate) fn new(
        id: EntityId,
        kind: EntityKind,
        position: Vec3,
        scale: Vec3,
        health: f32,
        state: EntityState,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            scale,
            yaw: 0.0,
            health,
            max_health: health,
            active: true,
            state,
        }
    }

    pub(crate) fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub(crate) fn body(&self) -> Body {
        Body::new(self.kind, self.position, self.scale, self.active)
    }

    pub(crate) fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            body: self.body(),
            yaw: self.yaw,
            health: self.health,
            max_health: self.max_health,
            state: self.state,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    category: Category,
    position: usize,
}

/// Registry that stores non-player entities per category and allocates identifiers.
///
/// Identifiers are handed out from a monotonically increasing counter, so
/// clearing a category never causes an identifier to be reused.
#[derive(Debug)]
pub(crate) struct EntityRegistry {
    collections: [Vec<Entity>; 6],
    index: BTreeMap<EntityId, Slot>,
    next_entity_id: EntityId,
}

impl EntityRegistry {
    /// Creates an empty registry. Identifier zero is reserved for the player.
    pub(crate) fn new() -> Self {
        Self {
            collections: Default::default(),
            index: BTreeMap::new(),
            next_entity_id: EntityId::new(1),
        }
    }

    pub(crate) fn allocate_id(&mut self) -> EntityId {
        let allocated = self.next_entity_id;
        self.next_entity_id = EntityId::new(allocated.get().saturating_add(1));
        allocated
    }

    /// Stores the entity in the collection owning its kind. The player is rejected.
    pub(crate) fn insert(&mut self, entity: Entity) -> bool {
        let Some(category) = entity.kind.category() else {
            return false;
        };
        let collection = &mut self.collections[category.index()];
        let slot = Slot {
            category,
            position: collection.len(),
        };
        let _ = self.index.insert(entity.id, slot);
        collection.push(entity);
        true
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.index.get(&id)?;
        self.collections[slot.category.index()].get(slot.position)
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = *self.index.get(&id)?;
        self.collections[slot.category.index()].get_mut(slot.position)
    }

    pub(crate) fn collection(&self, category: Category) -> &[Entity] {
        &self.collections[category.index()]
    }

    /// Removes every entity of the category, returning how many were dropped.
    pub(crate) fn clear(&mut self, category: Category) -> usize {
        let removed = std::mem::take(&mut self.collections[category.index()]);
        for entity in &removed {
            let _ = self.index.remove(&entity.id);
        }
        removed.len()
    }

    /// Iterates over every stored entity in category storage order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.collections.iter().flatten()
    }
}
