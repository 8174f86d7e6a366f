//! Pointer picking against the pickable fruit group.
//!
//! Picking is polled every tick rather than on input, because the ambient
//! rotation changes what lies under a stationary pointer.

mod ray;

use glam::Vec2;
pub use ray::{pixel_to_ndc, Ray};

use crate::camera::Camera;
use crate::scene::{MeshGroup, MeshId};

/// Nearest-hit query used by the picking service.
///
/// The default [`BoundingSphereCaster`] tests each mesh's enclosing sphere;
/// hosts with access to real triangle data can plug in an exact caster.
pub trait RayCaster {
    /// Nearest mesh in `group` hit by the ray from `camera` through `ndc`.
    fn intersect(
        &self,
        camera: &Camera,
        ndc: Vec2,
        group: &MeshGroup,
    ) -> Option<MeshId>;
}

/// Analytic ray/sphere test against every mesh's world bounding sphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingSphereCaster;

impl RayCaster for BoundingSphereCaster {
    fn intersect(
        &self,
        camera: &Camera,
        ndc: Vec2,
        group: &MeshGroup,
    ) -> Option<MeshId> {
        let ray = Ray::from_camera(camera, ndc);
        let mut closest: Option<(f32, MeshId)> = None;
        for (id, _) in group.iter() {
            let Some(bounds) = group.world_bounds(id.index) else {
                continue;
            };
            let Some(t) = ray.intersect_sphere(bounds.truncate(), bounds.w)
            else {
                continue;
            };
            if closest.map_or(true, |(best, _)| t < best) {
                closest = Some((t, id));
            }
        }
        closest.map(|(_, id)| id)
    }
}

// ---------------------------------------------------------------------------
// PickState
// ---------------------------------------------------------------------------

/// Pointer position and the mesh currently under it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickState {
    pointer: Option<Vec2>,
    hovered: Option<MeshId>,
}

impl PickState {
    /// No pointer, nothing hovered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position in NDC.
    #[must_use]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Record the pointer position in NDC.
    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.pointer = Some(ndc);
    }

    /// Mesh under the pointer as of the last update.
    #[must_use]
    pub fn hovered(&self) -> Option<MeshId> {
        self.hovered
    }

    /// Re-run the query with the current camera.
    pub fn update(
        &mut self,
        caster: &dyn RayCaster,
        camera: &Camera,
        group: &MeshGroup,
    ) {
        self.hovered = self
            .pointer
            .and_then(|ndc| caster.intersect(camera, ndc, group));
    }

    /// Forget the hovered mesh.
    pub fn clear(&mut self) {
        self.hovered = None;
    }
}
