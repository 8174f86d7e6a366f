//! Scene slots: the pickable fruit group, the decoration group and the
//! background.
//!
//! Membership of both groups is decided once, at construction, by an
//! [`Arrangement`]. After that the interaction core only reads the groups
//! (picking, focus targets); the host may retexture, recolor or move
//! individual meshes through the [`Scene`] setters.

mod arrangement;
mod mesh;

pub use arrangement::{
    Arrangement, ArrangementError, BowlArrangement, BranchArrangement,
    CustomArrangement, ExtraGeometry, ExtraSpec,
};
use glam::{Vec3, Vec4};
pub use mesh::{Geometry, LeafKind, Material, Mesh, Transform, WHITE};

use crate::options::Background;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Which of the two mesh containers a mesh lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Fruit spheres; the only meshes picking considers.
    Pickable,
    /// Branches, leaves, bowls and other scenery.
    Decoration,
}

/// Non-owning handle to a mesh: its group and its index within the group.
///
/// Handles stay valid until the scene is rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId {
    /// Owning group.
    pub group: GroupKind,
    /// Position in the group's mesh list.
    pub index: usize,
}

// ---------------------------------------------------------------------------
// MeshGroup
// ---------------------------------------------------------------------------

/// An ordered mesh container with a group-level translation.
#[derive(Debug, Clone)]
pub struct MeshGroup {
    kind: GroupKind,
    /// Translation applied to every mesh in the group.
    pub offset: Vec3,
    meshes: Vec<Mesh>,
}

impl MeshGroup {
    fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            offset: Vec3::ZERO,
            meshes: Vec::new(),
        }
    }

    /// Which container this is.
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Append a mesh and return its handle.
    pub fn add(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId {
            group: self.kind,
            index: self.meshes.len() - 1,
        }
    }

    /// Number of meshes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the group holds no meshes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Mesh by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    /// All meshes in insertion order, with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &Mesh)> + '_ {
        let group = self.kind;
        self.meshes
            .iter()
            .enumerate()
            .map(move |(index, mesh)| (MeshId { group, index }, mesh))
    }

    /// World-space position of the mesh at `index`.
    #[must_use]
    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        self.meshes
            .get(index)
            .map(|m| self.offset + m.transform.position)
    }

    /// World-space enclosing sphere (`xyz` center, `w` radius) of the mesh
    /// at `index`.
    #[must_use]
    pub fn world_bounds(&self, index: usize) -> Option<Vec4> {
        self.meshes
            .get(index)
            .map(|m| m.local_bounds() + self.offset.extend(0.0))
    }

    fn clear(&mut self) {
        self.meshes.clear();
        self.offset = Vec3::ZERO;
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The authoritative scene handed to the renderer every frame.
#[derive(Debug, Clone)]
pub struct Scene {
    pickable: MeshGroup,
    decoration: MeshGroup,
    background: Background,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with a transparent background.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pickable: MeshGroup::new(GroupKind::Pickable),
            decoration: MeshGroup::new(GroupKind::Decoration),
            background: Background::None,
            generation: 0,
            rendered_generation: 0,
        }
    }

    // -- Mutation helpers --

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether scene data changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as rendered (call after updating renderers).
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    // -- Groups --

    /// The fruit group.
    #[must_use]
    pub fn pickable(&self) -> &MeshGroup {
        &self.pickable
    }

    /// The scenery group.
    #[must_use]
    pub fn decoration(&self) -> &MeshGroup {
        &self.decoration
    }

    /// Group by kind.
    #[must_use]
    pub fn group(&self, kind: GroupKind) -> &MeshGroup {
        match kind {
            GroupKind::Pickable => &self.pickable,
            GroupKind::Decoration => &self.decoration,
        }
    }

    /// Mutable group by kind. Marks the scene dirty.
    pub fn group_mut(&mut self, kind: GroupKind) -> &mut MeshGroup {
        self.invalidate();
        match kind {
            GroupKind::Pickable => &mut self.pickable,
            GroupKind::Decoration => &mut self.decoration,
        }
    }

    /// Remove every mesh from both groups and reset their offsets.
    pub fn clear(&mut self) {
        self.pickable.clear();
        self.decoration.clear();
        self.invalidate();
    }

    // -- Meshes --

    /// Mesh by handle.
    #[must_use]
    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.group(id.group).get(id.index)
    }

    fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        let group = match id.group {
            GroupKind::Pickable => &mut self.pickable,
            GroupKind::Decoration => &mut self.decoration,
        };
        let mesh = group.meshes.get_mut(id.index)?;
        self.generation += 1;
        Some(mesh)
    }

    /// World-space position of a mesh.
    #[must_use]
    pub fn world_position(&self, id: MeshId) -> Option<Vec3> {
        self.group(id.group).world_position(id.index)
    }

    /// Apply a texture to a mesh (tinted white), or remove its texture when
    /// `texture` is `None`. Returns `false` for an unknown handle.
    pub fn set_texture(&mut self, id: MeshId, texture: Option<&str>) -> bool {
        let Some(mesh) = self.mesh_mut(id) else {
            return false;
        };
        match texture {
            Some(url) => {
                mesh.material.color = WHITE.to_owned();
                mesh.material.texture = Some(url.to_owned());
            }
            None => mesh.material.texture = None,
        }
        true
    }

    /// Replace a mesh's texture with a flat color. Returns `false` for an
    /// unknown handle.
    pub fn set_color(&mut self, id: MeshId, color: &str) -> bool {
        let Some(mesh) = self.mesh_mut(id) else {
            return false;
        };
        mesh.material.texture = None;
        color.clone_into(&mut mesh.material.color);
        true
    }

    /// Replace a mesh's transform. Returns `false` for an unknown handle.
    pub fn set_transform(&mut self, id: MeshId, transform: Transform) -> bool {
        let Some(mesh) = self.mesh_mut(id) else {
            return false;
        };
        mesh.transform = transform;
        true
    }

    // -- Background --

    /// Current background.
    #[must_use]
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Replace the background.
    pub fn set_background(&mut self, background: Background) {
        self.background = background;
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_two_fruit() -> Scene {
        let mut scene = Scene::new();
        let images = vec!["a.jpg".to_owned(), "b.jpg".to_owned()];
        let group = scene.group_mut(GroupKind::Pickable);
        group.offset = Vec3::new(0.0, -1.0, 0.0);
        let _ = group.add(
            Mesh::fruit(&images, 0, 8)
                .with_transform(Transform::from_position(Vec3::X)),
        );
        let _ = group.add(Mesh::fruit(&images, 1, 8));
        scene
    }

    #[test]
    fn world_position_includes_group_offset() {
        let scene = scene_with_two_fruit();
        let id = MeshId {
            group: GroupKind::Pickable,
            index: 0,
        };
        assert_eq!(scene.world_position(id), Some(Vec3::new(1.0, -1.0, 0.0)));
        let bounds = scene.pickable().world_bounds(0).unwrap();
        assert_eq!(bounds, Vec4::new(1.0, -1.0, 0.0, 1.0));
    }

    #[test]
    fn setters_mark_dirty_and_reject_unknown_handles() {
        let mut scene = scene_with_two_fruit();
        scene.mark_rendered();
        assert!(!scene.is_dirty());

        let id = MeshId {
            group: GroupKind::Pickable,
            index: 1,
        };
        assert!(scene.set_color(id, "red"));
        assert!(scene.is_dirty());
        let mesh = scene.mesh(id).unwrap();
        assert_eq!(mesh.material.color, "red");
        assert!(mesh.material.texture.is_none());

        assert!(scene.set_texture(id, Some("c.jpg")));
        assert_eq!(scene.mesh(id).unwrap().material.color, WHITE);

        let missing = MeshId {
            group: GroupKind::Decoration,
            index: 3,
        };
        assert!(!scene.set_color(missing, "red"));
    }

    #[test]
    fn clear_empties_both_groups() {
        let mut scene = scene_with_two_fruit();
        scene.clear();
        assert!(scene.pickable().is_empty());
        assert!(scene.decoration().is_empty());
        assert_eq!(scene.pickable().offset, Vec3::ZERO);
    }
}
