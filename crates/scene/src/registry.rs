use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use shapeyard_common::{Color, EntityId, Model, Pose};

use crate::shapes::{ShapeKind, ShapeSet};

/// A placed shape instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEntity {
    pub id: EntityId,
    pub kind: ShapeKind,
    pub pose: Pose,
    pub color: Color,
    pub model: Model,
}

impl SceneEntity {
    /// Stable name for interaction ids (grab handles and the like).
    pub fn name(&self) -> String {
        self.id.to_string()
    }
}

/// Insertion-ordered registry of scene entities.
///
/// Entities live in a BTreeMap keyed by a monotonically increasing spawn
/// ordinal, so iteration always visits them in creation order, even after
/// interleaved removals. A side index maps ids to ordinals for by-id access.
#[derive(Debug, Clone)]
pub struct SceneRegistry {
    shapes: ShapeSet,
    spawn_color: Color,
    entities: BTreeMap<u64, SceneEntity>,
    index: HashMap<EntityId, u64>,
    next_ordinal: u64,
}

impl SceneRegistry {
    /// Empty registry over a set of shared shape models.
    pub fn new(shapes: ShapeSet) -> Self {
        Self {
            shapes,
            spawn_color: Color::hsv(0.0, 1.0, 1.0).to_linear(),
            entities: BTreeMap::new(),
            index: HashMap::new(),
            next_ordinal: 0,
        }
    }

    /// The shared shape models entities reference.
    pub fn shapes(&self) -> &ShapeSet {
        &self.shapes
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Append a new entity of `kind` at `pose`. Returns its id.
    pub fn create(&mut self, kind: ShapeKind, pose: Pose) -> EntityId {
        let id = EntityId::new();
        let entity = SceneEntity {
            id,
            kind,
            pose,
            color: self.spawn_color,
            model: self.shapes.model(kind),
        };
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        self.entities.insert(ordinal, entity);
        self.index.insert(id, ordinal);
        tracing::debug!(%id, ?kind, "entity created");
        id
    }

    /// Get a reference to an entity.
    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.index.get(&id).and_then(|ord| self.entities.get(ord))
    }

    /// Get a mutable reference to an entity.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        let ordinal = *self.index.get(&id)?;
        self.entities.get_mut(&ordinal)
    }

    /// Remove one entity. Returns it if it existed.
    pub fn remove(&mut self, id: EntityId) -> Option<SceneEntity> {
        let ordinal = self.index.remove(&id)?;
        let entity = self.entities.remove(&ordinal)?;
        tracing::debug!(%id, "entity removed");
        Some(entity)
    }

    /// Remove every entity, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entities.len();
        self.entities.clear();
        self.index.clear();
        if removed > 0 {
            tracing::debug!(removed, "registry cleared");
        }
        removed
    }

    /// Entities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneEntity> {
        self.entities.values()
    }

    /// Mutable traversal in creation order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneEntity> {
        self.entities.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use shapeyard_common::{Bounds, ModelHandle};

    fn test_shapes() -> ShapeSet {
        let model = |handle: u64, size: f32| Model {
            handle: ModelHandle(handle),
            bounds: Bounds::from_dimensions(Vec3::splat(size)),
        };
        ShapeSet::new(model(1, 0.1), model(2, 0.1), model(3, 0.2))
    }

    #[test]
    fn registry_starts_empty() {
        let r = SceneRegistry::new(test_shapes());
        assert_eq!(r.len(), 0);
        assert!(r.is_empty());
        assert_eq!(r.iter().count(), 0);
    }

    #[test]
    fn create_appends_in_order() {
        let mut r = SceneRegistry::new(test_shapes());
        r.create(ShapeKind::Cube, Pose::IDENTITY);
        r.create(ShapeKind::Ball, Pose::IDENTITY);
        r.create(ShapeKind::Cylinder, Pose::IDENTITY);

        let kinds: Vec<ShapeKind> = r.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ShapeKind::Cube, ShapeKind::Ball, ShapeKind::Cylinder]);
    }

    #[test]
    fn create_assigns_unique_ids() {
        let mut r = SceneRegistry::new(test_shapes());
        let a = r.create(ShapeKind::Cube, Pose::IDENTITY);
        let b = r.create(ShapeKind::Cube, Pose::IDENTITY);
        assert_ne!(a, b);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn entities_share_kind_model() {
        let mut r = SceneRegistry::new(test_shapes());
        let a = r.create(ShapeKind::Ball, Pose::IDENTITY);
        let b = r.create(ShapeKind::Ball, Pose::IDENTITY);
        let ha = r.get(a).map(|e| e.model.handle);
        let hb = r.get(b).map(|e| e.model.handle);
        assert_eq!(ha, hb);
        assert_eq!(ha, Some(r.shapes().ball.handle));
    }

    #[test]
    fn get_mut_updates_pose() {
        let mut r = SceneRegistry::new(test_shapes());
        let id = r.create(ShapeKind::Cube, Pose::IDENTITY);
        let moved = Vec3::new(0.3, 0.1, -0.4);
        if let Some(e) = r.get_mut(id) {
            e.pose.position = moved;
        }
        assert_eq!(r.get(id).map(|e| e.pose.position), Some(moved));
    }

    #[test]
    fn remove_preserves_order() {
        let mut r = SceneRegistry::new(test_shapes());
        let a = r.create(ShapeKind::Cube, Pose::IDENTITY);
        let b = r.create(ShapeKind::Ball, Pose::IDENTITY);
        let c = r.create(ShapeKind::Cylinder, Pose::IDENTITY);

        assert!(r.remove(b).is_some());
        let order: Vec<EntityId> = r.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![a, c]);

        // new entities still land at the end
        let d = r.create(ShapeKind::Ball, Pose::IDENTITY);
        let order: Vec<EntityId> = r.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![a, c, d]);
    }

    #[test]
    fn remove_missing_is_none() {
        let mut r = SceneRegistry::new(test_shapes());
        let id = r.create(ShapeKind::Cube, Pose::IDENTITY);
        assert!(r.remove(id).is_some());
        assert!(r.remove(id).is_none());
        assert!(r.remove(EntityId::new()).is_none());
    }

    #[test]
    fn clear_removes_all() {
        let mut r = SceneRegistry::new(test_shapes());
        for _ in 0..5 {
            r.create(ShapeKind::Cube, Pose::IDENTITY);
        }
        assert_eq!(r.clear(), 5);
        assert!(r.is_empty());
        assert_eq!(r.clear(), 0);
    }

    #[test]
    fn iteration_is_restartable() {
        let mut r = SceneRegistry::new(test_shapes());
        r.create(ShapeKind::Cube, Pose::IDENTITY);
        r.create(ShapeKind::Ball, Pose::IDENTITY);
        let first: Vec<EntityId> = r.iter().map(|e| e.id).collect();
        let second: Vec<EntityId> = r.iter().map(|e| e.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn spawn_color_is_fixed_red() {
        let mut r = SceneRegistry::new(test_shapes());
        let id = r.create(ShapeKind::Cube, Pose::IDENTITY);
        let color = r.get(id).map(|e| e.color);
        // saturated red survives the linear conversion untouched
        assert_eq!(color, Some(Color::new(1.0, 0.0, 0.0, 1.0)));
    }
}
