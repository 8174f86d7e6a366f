use glam::{Vec3, Vec4};

// ---------------------------------------------------------------------------
// Geometry descriptors
// ---------------------------------------------------------------------------

/// Leaf outline family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// Five-lobed vine leaf.
    Grape,
    /// Narrow serrated leaf.
    Cherry,
    /// Oval pointed leaf.
    Apple,
}

/// Parametric shape of a mesh.
///
/// The core never tessellates these; the renderer turns each descriptor into
/// triangles. Only [`bounding_radius`](Self::bounding_radius) is used here,
/// for picking.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// UV sphere.
    Sphere {
        /// Sphere radius.
        radius: f32,
        /// Width and height segment count.
        segments: u32,
    },
    /// Torus or torus arc.
    Torus {
        /// Distance from the torus center to the tube center.
        radius: f32,
        /// Tube radius.
        tube: f32,
        /// Radial and tubular segment count.
        segments: u32,
        /// Swept angle in radians (`2π` for a full ring).
        arc: f32,
    },
    /// Flat leaf outline.
    Leaf {
        /// Outline family.
        kind: LeafKind,
        /// Overall leaf size.
        radius: f32,
        /// Curve segment count.
        segments: u32,
    },
    /// Forked branch made of wavy open cylinders.
    TreeBranch {
        /// Overall branch scale.
        radius: f32,
        /// Cylinder segment count.
        segments: u32,
        /// Number of sub-branches (3 or 5).
        branch_number: u32,
    },
    /// Lathed bowl.
    Bowl {
        /// Rim radius.
        radius: f32,
        /// Lathe segment count.
        segments: u32,
    },
    /// Lathed basket with a handle.
    Basket {
        /// Rim radius.
        radius: f32,
        /// Lathe segment count.
        segments: u32,
        /// Basket height.
        height: f32,
    },
    /// Axis-aligned box.
    Cuboid {
        /// Size along X.
        width: f32,
        /// Size along Y.
        height: f32,
        /// Size along Z.
        depth: f32,
    },
    /// Flat rectangle in the XY plane.
    Plane {
        /// Size along X.
        width: f32,
        /// Size along Y.
        height: f32,
    },
    /// Flat disc in the XY plane.
    Circle {
        /// Disc radius.
        radius: f32,
        /// Rim segment count.
        segments: u32,
    },
}

impl Geometry {
    /// Radius of a sphere centered on the mesh origin that encloses the
    /// shape (before the mesh scale is applied).
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Self::Sphere { radius, .. }
            | Self::Leaf { radius, .. }
            | Self::Circle { radius, .. } => radius,
            Self::Torus { radius, tube, .. } => radius + tube,
            // The trunk is five radii long and starts at the origin.
            Self::TreeBranch { radius, .. } => radius * 5.0,
            Self::Bowl { radius, .. } => radius,
            Self::Basket { radius, height, .. } => radius.max(height),
            Self::Cuboid {
                width,
                height,
                depth,
            } => 0.5 * Vec3::new(width, height, depth).length(),
            Self::Plane { width, height } => 0.5 * width.hypot(height),
        }
    }
}

// ---------------------------------------------------------------------------
// Transform & material
// ---------------------------------------------------------------------------

/// Position, Euler rotation (XYZ order, radians) and scale of a mesh
/// relative to its group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation.
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Transform with only a translation.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Builder-style rotation setter.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Unlit surface description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    /// CSS-style color string multiplied with the texture.
    pub color: String,
    /// Texture URL, if any.
    pub texture: Option<String>,
    /// Render both faces (needed to see a fruit from inside).
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: WHITE.to_owned(),
            texture: None,
            double_sided: true,
        }
    }
}

/// Neutral tint used whenever a texture is applied.
pub const WHITE: &str = "white";

impl Material {
    /// A colored material, replaced by a white-tinted texture when one is
    /// given.
    #[must_use]
    pub fn colored_or_textured(color: &str, texture: Option<&str>) -> Self {
        match texture {
            Some(url) => Self {
                color: WHITE.to_owned(),
                texture: Some(url.to_owned()),
                double_sided: true,
            },
            None => Self {
                color: color.to_owned(),
                texture: None,
                double_sided: true,
            },
        }
    }

    /// Builder-style face culling setter.
    #[must_use]
    pub fn single_sided(mut self) -> Self {
        self.double_sided = false;
        self
    }
}

// ---------------------------------------------------------------------------
// Mesh
// ---------------------------------------------------------------------------

/// A renderable object in one of the scene groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Optional label ("branch", "leaf", or a host-chosen name).
    pub name: String,
    /// Shape descriptor.
    pub geometry: Geometry,
    /// Surface.
    pub material: Material,
    /// Placement within the owning group.
    pub transform: Transform,
}

impl Mesh {
    /// Create a mesh at the group origin.
    #[must_use]
    pub fn new(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            transform: Transform::default(),
        }
    }

    /// Builder-style transform setter.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Unit fruit sphere textured with `images[index]` when that image
    /// exists.
    #[must_use]
    pub fn fruit(images: &[String], index: usize, segments: u32) -> Self {
        let material = Material {
            texture: images.get(index).cloned(),
            ..Material::default()
        };
        Self::new(
            format!("fruit-{index}"),
            Geometry::Sphere {
                radius: 1.0,
                segments,
            },
            material,
        )
    }

    /// Enclosing sphere (center relative to the group, radius) including
    /// the mesh scale.
    #[must_use]
    pub fn local_bounds(&self) -> Vec4 {
        let scale = self.transform.scale.abs().max_element();
        self.transform
            .position
            .extend(self.geometry.bounding_radius() * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fruit_uses_matching_image() {
        let images = vec!["a.jpg".to_owned(), "b.jpg".to_owned()];
        let mesh = Mesh::fruit(&images, 1, 16);
        assert_eq!(mesh.material.texture.as_deref(), Some("b.jpg"));
        assert_eq!(mesh.material.color, WHITE);
        assert!(mesh.material.double_sided);

        let untextured = Mesh::fruit(&images, 5, 16);
        assert!(untextured.material.texture.is_none());
    }

    #[test]
    fn texture_overrides_color() {
        let m = Material::colored_or_textured("brown", Some("bark.jpg"));
        assert_eq!(m.color, WHITE);
        let m = Material::colored_or_textured("brown", None);
        assert_eq!(m.color, "brown");
        assert!(m.texture.is_none());
    }

    #[test]
    fn bounds_follow_largest_scale_axis() {
        let mut mesh = Mesh::fruit(&[], 0, 8);
        mesh.transform.scale = Vec3::new(1.0, 3.0, 2.0);
        mesh.transform.position = Vec3::new(1.0, 2.0, 3.0);
        let bounds = mesh.local_bounds();
        assert_eq!(bounds.truncate(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.w, 3.0);
    }
}
