use serde::Serialize;
use shapeyard_common::EntityId;
use shapeyard_scene::{SceneRegistry, ShapeKind};

/// Scene inspector for developer tooling.
///
/// Read-only queries against the registry for debugging and the CLI's
/// inspect command.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(registry: &SceneRegistry) -> SceneSummary {
        let mut summary = SceneSummary {
            entity_count: registry.len(),
            cubes: 0,
            balls: 0,
            cylinders: 0,
        };
        for entity in registry.iter() {
            match entity.kind {
                ShapeKind::Cube => summary.cubes += 1,
                ShapeKind::Ball => summary.balls += 1,
                ShapeKind::Cylinder => summary.cylinders += 1,
            }
        }
        summary
    }

    /// Get the state of a specific entity as plain numbers.
    pub fn inspect_entity(registry: &SceneRegistry, id: EntityId) -> Option<EntityInfo> {
        registry.get(id).map(|entity| {
            let p = entity.pose.position;
            let o = entity.pose.orientation;
            EntityInfo {
                id,
                kind: entity.kind,
                position: [p.x, p.y, p.z],
                orientation: [o.x, o.y, o.z, o.w],
                color: entity.color.to_array(),
            }
        })
    }

    /// All entity ids, in creation order.
    pub fn list_entities(registry: &SceneRegistry) -> Vec<EntityId> {
        registry.iter().map(|entity| entity.id).collect()
    }
}

/// Summary of the scene for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub entity_count: usize,
    pub cubes: usize,
    pub balls: usize,
    pub cylinders: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: entities={} cubes={} balls={} cylinders={}",
            self.entity_count, self.cubes, self.balls, self.cylinders
        )
    }
}

/// Detailed info about a single entity.
#[derive(Debug, Clone, Serialize)]
pub struct EntityInfo {
    pub id: EntityId,
    pub kind: ShapeKind,
    pub position: [f32; 3],
    pub orientation: [f32; 4],
    pub color: [f32; 4],
}

impl std::fmt::Display for EntityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entity [{}] {} pos=({:.2}, {:.2}, {:.2})",
            &self.id.0.to_string()[..8],
            self.kind.label(),
            self.position[0],
            self.position[1],
            self.position[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use shapeyard_common::{Bounds, Model, ModelHandle, Pose};
    use shapeyard_scene::ShapeSet;

    fn test_registry() -> SceneRegistry {
        let model = |handle: u64| Model {
            handle: ModelHandle(handle),
            bounds: Bounds::from_dimensions(Vec3::splat(0.1)),
        };
        SceneRegistry::new(ShapeSet::new(model(1), model(2), model(3)))
    }

    #[test]
    fn summary_empty_scene() {
        let registry = test_registry();
        let summary = SceneInspector::summary(&registry);
        assert_eq!(summary.entity_count, 0);
        assert_eq!(summary.cubes, 0);
    }

    #[test]
    fn summary_counts_kinds() {
        let mut registry = test_registry();
        registry.create(ShapeKind::Cube, Pose::IDENTITY);
        registry.create(ShapeKind::Ball, Pose::IDENTITY);
        registry.create(ShapeKind::Ball, Pose::IDENTITY);

        let summary = SceneInspector::summary(&registry);
        assert_eq!(summary.entity_count, 3);
        assert_eq!(summary.cubes, 1);
        assert_eq!(summary.balls, 2);
        assert_eq!(summary.cylinders, 0);
    }

    #[test]
    fn inspect_entity_found() {
        let mut registry = test_registry();
        let id = registry.create(
            ShapeKind::Cylinder,
            Pose::new(Vec3::new(1.0, 2.0, 3.0), glam::Quat::IDENTITY),
        );

        let info = SceneInspector::inspect_entity(&registry, id).unwrap();
        assert_eq!(info.kind, ShapeKind::Cylinder);
        assert_eq!(info.position, [1.0, 2.0, 3.0]);
        assert_eq!(info.orientation, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn inspect_entity_not_found() {
        let registry = test_registry();
        let fake_id = EntityId::new();
        assert!(SceneInspector::inspect_entity(&registry, fake_id).is_none());
    }

    #[test]
    fn list_entities_in_creation_order() {
        let mut registry = test_registry();
        let id1 = registry.create(ShapeKind::Cube, Pose::IDENTITY);
        let id2 = registry.create(ShapeKind::Ball, Pose::IDENTITY);

        let ids = SceneInspector::list_entities(&registry);
        assert_eq!(ids, vec![id1, id2]);
    }

    #[test]
    fn summary_display() {
        let registry = test_registry();
        let summary = SceneInspector::summary(&registry);
        let s = format!("{summary}");
        assert!(s.contains("entities=0"));
    }

    #[test]
    fn summary_serializes_to_json() {
        let mut registry = test_registry();
        registry.create(ShapeKind::Cube, Pose::IDENTITY);
        let summary = SceneInspector::summary(&registry);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"entity_count\":1"));
        assert!(json.contains("\"cubes\":1"));
    }
}
