//! Authoritative entity collection
//!
//! Owns every live entity and drives the per-frame update/eviction pass.
//! Iteration is always insertion order, which keeps collision tie-breaks
//! and spawn ordering deterministic. Removal reports what was evicted so
//! the controller can tell the presentation layer to tear down visuals;
//! nothing in here can fail, and removing a missing id is a no-op.

use super::entity::{Entity, EntityKind};

pub type EntityId = u32;

#[derive(Debug, Default)]
pub struct EntityManager {
    entities: Vec<(EntityId, Entity)>,
    next_id: EntityId,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity to the live set and hand back its id.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        self.next_id += 1;
        let id = self.next_id;
        self.entities.push((id, entity));
        id
    }

    /// Remove by id if present. Returns the removed entity's kind so the
    /// caller can emit a despawn event; `None` means it was already gone.
    pub fn remove(&mut self, id: EntityId) -> Option<EntityKind> {
        let index = self.entities.iter().position(|(eid, _)| *eid == id)?;
        let (_, entity) = self.entities.remove(index);
        Some(entity.kind())
    }

    /// Run every live entity's update, then evict everything whose
    /// liveness flag dropped. Returns the evicted `(id, kind)` pairs in
    /// insertion order.
    ///
    /// Entities do not interact during their own update (aliens chase a
    /// target fixed before this pass), so in-order iteration is safe.
    pub fn update(&mut self, dt: f32) -> Vec<(EntityId, EntityKind)> {
        for (_, entity) in &mut self.entities {
            if entity.is_alive() {
                entity.update(dt);
            }
        }
        let mut evicted = Vec::new();
        self.entities.retain(|(id, entity)| {
            if entity.is_alive() {
                true
            } else {
                evicted.push((*id, entity.kind()));
                false
            }
        });
        evicted
    }

    /// Ids of all entities of one kind, in insertion order. The returned
    /// list is a snapshot, not a live view.
    pub fn of_kind(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, e)| e.kind() == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Count of entities of one kind whose liveness flag is still up.
    pub fn live_count(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|(_, e)| e.kind() == kind && e.is_alive())
            .count()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.entities.iter_mut().map(|(id, e)| (*id, e))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop everything. Session start/restart only. Returns the evicted
    /// `(id, kind)` pairs for despawn notification.
    pub fn clear(&mut self) -> Vec<(EntityId, EntityKind)> {
        self.entities
            .drain(..)
            .map(|(id, e)| (id, e.kind()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Alien, Projectile};
    use crate::tuning::Config;
    use glam::Vec3;

    fn alien_at(x: f32) -> Entity {
        Entity::Alien(Alien::new(Vec3::new(x, 0.0, 0.0), 3.0, 1, 0))
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut manager = EntityManager::new();
        let id = manager.add(alien_at(1.0));
        assert_eq!(manager.remove(id), Some(EntityKind::Alien));
        assert_eq!(manager.remove(id), None);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_of_kind_preserves_insertion_order() {
        let config = Config::default();
        let mut manager = EntityManager::new();
        let a = manager.add(alien_at(1.0));
        let p = manager.add(Entity::Projectile(Projectile::new(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            &config,
        )));
        let b = manager.add(alien_at(2.0));
        assert_eq!(manager.of_kind(EntityKind::Alien), vec![a, b]);
        assert_eq!(manager.of_kind(EntityKind::Projectile), vec![p]);
    }

    #[test]
    fn test_update_evicts_dead_entities() {
        let mut manager = EntityManager::new();
        let doomed = manager.add(alien_at(1.0));
        let survivor = manager.add(alien_at(2.0));
        manager
            .get_mut(doomed)
            .and_then(Entity::as_alien_mut)
            .unwrap()
            .take_damage(1);

        let evicted = manager.update(0.016);
        assert_eq!(evicted, vec![(doomed, EntityKind::Alien)]);
        assert_eq!(manager.of_kind(EntityKind::Alien), vec![survivor]);
    }

    #[test]
    fn test_live_count_ignores_marked_dead() {
        let mut manager = EntityManager::new();
        let id = manager.add(alien_at(1.0));
        manager.add(alien_at(2.0));
        assert_eq!(manager.live_count(EntityKind::Alien), 2);
        manager
            .get_mut(id)
            .and_then(Entity::as_alien_mut)
            .unwrap()
            .take_damage(1);
        // Not yet evicted, but no longer counted as live.
        assert_eq!(manager.live_count(EntityKind::Alien), 1);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_clear_reports_everything() {
        let mut manager = EntityManager::new();
        manager.add(alien_at(1.0));
        manager.add(alien_at(2.0));
        let evicted = manager.clear();
        assert_eq!(evicted.len(), 2);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut manager = EntityManager::new();
        let first = manager.add(alien_at(1.0));
        manager.remove(first);
        let second = manager.add(alien_at(2.0));
        assert_ne!(first, second);
    }
}
