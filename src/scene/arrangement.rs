//! Fruit layouts. Each arrangement checks the image count first and only
//! then fills the scene, so a rejected layout leaves both groups untouched.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, PI, TAU};
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::mesh::{Geometry, LeafKind, Material, Mesh, Transform};
use super::{GroupKind, Scene};
use crate::util::spherical::from_spherical;

/// Polar angle used by every ring layout (a horizontal circle, mirrored).
const RING_PHI: f32 = 1.5 * PI;
/// Extra gap between neighbouring cherries.
const CHERRY_SPACING: f32 = 0.1;
/// Radius of the torus arcs used as grape and cherry stems.
const STEM_RADIUS: f32 = 4.0;
const STEM_TUBE: f32 = 0.1;

const APPLE_POSITIONS: [[f32; 3]; 6] = [
    [6.7, -2.6, -0.8],
    [3.4, 0.4, 1.5],
    [5.4, -2.5, 1.2],
    [2.4, 0.3, -2.0],
    [3.3, -1.9, 0.0],
    [0.8, -1.2, 0.0],
];

/// Leaf placements as `[px, py, pz, rx, ry, rz]`.
const APPLE_LEAVES: [[f32; 6]; 6] = [
    [8.4, 0.4, -0.6, 1.6, 0.4, 4.2],
    [7.8, 0.1, 1.2, 1.6, 0.2, -0.4],
    [6.8, -0.3, -1.2, 1.5, 0.2, 2.8],
    [4.2, 1.9, 1.0, 1.6, 0.2, -2.3],
    [3.9, 2.0, 2.9, 1.5, 0.2, -0.5],
    [2.2, 1.7, 2.6, 1.4, 0.1, 0.9],
];

/// Leaves that only exist on the five-fork branch.
const APPLE_LEAVES_FIVE_FORKS: [[f32; 6]; 3] = [
    [1.5, 1.7, -2.7, -1.5, -0.1, 0.8],
    [3.5, 1.9, -2.2, -1.5, -0.1, -1.2],
    [2.8, 1.6, -0.5, 1.7, 0.2, -0.3],
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// An arrangement cannot lay out the given number of images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrangementError {
    /// The arrangement needs at least one image.
    NoImages {
        /// Arrangement name.
        arrangement: &'static str,
    },
    /// The image count does not fit the arrangement's layout rule.
    UnsupportedCount {
        /// Arrangement name.
        arrangement: &'static str,
        /// Number of images supplied.
        count: usize,
        /// Human-readable layout rule.
        expected: &'static str,
    },
}

impl fmt::Display for ArrangementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoImages { arrangement } => {
                write!(f, "{arrangement} arrangement has no images")
            }
            Self::UnsupportedCount {
                arrangement,
                count,
                expected,
            } => write!(
                f,
                "{arrangement} arrangement cannot lay out {count} images \
                 (expected {expected})"
            ),
        }
    }
}

impl std::error::Error for ArrangementError {}

// ---------------------------------------------------------------------------
// Arrangement options
// ---------------------------------------------------------------------------

/// Colors and textures for layouts built around a branch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BranchArrangement {
    /// Branch color when untextured.
    pub branch_color: String,
    /// Branch texture URL.
    pub branch_texture: Option<String>,
    /// Whether leaves are added.
    pub enable_leaf: bool,
    /// Leaf color when untextured.
    pub leaf_color: String,
    /// Leaf texture URL.
    pub leaf_texture: Option<String>,
}

impl Default for BranchArrangement {
    fn default() -> Self {
        Self {
            branch_color: "brown".to_owned(),
            branch_texture: None,
            enable_leaf: true,
            leaf_color: "green".to_owned(),
            leaf_texture: None,
        }
    }
}

impl BranchArrangement {
    fn branch_material(&self) -> Material {
        Material::colored_or_textured(
            &self.branch_color,
            self.branch_texture.as_deref(),
        )
    }

    fn leaf_material(&self) -> Material {
        Material::colored_or_textured(
            &self.leaf_color,
            self.leaf_texture.as_deref(),
        )
    }
}

/// Colors for the fruit bowl layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BowlArrangement {
    /// Bowl color when untextured.
    pub bowl_color: String,
    /// Bowl texture URL.
    pub bowl_texture: Option<String>,
}

impl Default for BowlArrangement {
    fn default() -> Self {
        Self {
            bowl_color: "brown".to_owned(),
            bowl_texture: None,
        }
    }
}

/// Shape of a host-defined decoration. Missing parameters fall back to the
/// shape's natural defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ExtraGeometry {
    GrapeLeaf {
        radius: Option<f32>,
    },
    CherryLeaf {
        radius: Option<f32>,
    },
    AppleLeaf {
        radius: Option<f32>,
    },
    TreeBranch {
        radius: Option<f32>,
        branch_number: Option<u32>,
    },
    Bowl {
        radius: Option<f32>,
    },
    Basket {
        radius: Option<f32>,
        height: Option<f32>,
    },
    #[serde(rename = "box")]
    Cuboid {
        width: Option<f32>,
        height: Option<f32>,
        depth: Option<f32>,
    },
    Sphere {
        radius: Option<f32>,
    },
    Torus {
        radius: Option<f32>,
        tube: Option<f32>,
        arc: Option<f32>,
    },
    Plane {
        width: Option<f32>,
        height: Option<f32>,
    },
    Circle {
        radius: Option<f32>,
    },
}

impl ExtraGeometry {
    fn to_geometry(&self, segments: u32) -> Geometry {
        let leaf = |kind, radius: Option<f32>| Geometry::Leaf {
            kind,
            radius: radius.unwrap_or(1.0),
            segments,
        };
        match *self {
            Self::GrapeLeaf { radius } => leaf(LeafKind::Grape, radius),
            Self::CherryLeaf { radius } => leaf(LeafKind::Cherry, radius),
            Self::AppleLeaf { radius } => leaf(LeafKind::Apple, radius),
            Self::TreeBranch {
                radius,
                branch_number,
            } => Geometry::TreeBranch {
                radius: radius.unwrap_or(1.0),
                segments,
                branch_number: branch_number.unwrap_or(3).clamp(1, 5),
            },
            Self::Bowl { radius } => Geometry::Bowl {
                radius: radius.unwrap_or(1.0),
                segments,
            },
            Self::Basket { radius, height } => Geometry::Basket {
                radius: radius.unwrap_or(1.0),
                segments,
                height: height.unwrap_or(1.0),
            },
            Self::Cuboid {
                width,
                height,
                depth,
            } => Geometry::Cuboid {
                width: width.unwrap_or(1.0),
                height: height.unwrap_or(1.0),
                depth: depth.unwrap_or(1.0),
            },
            Self::Sphere { radius } => Geometry::Sphere {
                radius: radius.unwrap_or(1.0),
                segments,
            },
            Self::Torus { radius, tube, arc } => Geometry::Torus {
                radius: radius.unwrap_or(1.0),
                tube: tube.unwrap_or(0.4),
                segments,
                arc: arc.unwrap_or(TAU),
            },
            Self::Plane { width, height } => Geometry::Plane {
                width: width.unwrap_or(1.0),
                height: height.unwrap_or(1.0),
            },
            Self::Circle { radius } => Geometry::Circle {
                radius: radius.unwrap_or(1.0),
                segments,
            },
        }
    }
}

/// A host-defined decoration mesh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtraSpec {
    /// Mesh label.
    #[serde(default)]
    pub name: String,
    /// Shape.
    pub geometry: ExtraGeometry,
    /// Flat color (white when absent).
    #[serde(default)]
    pub color: Option<String>,
    /// Texture URL; overrides `color`.
    #[serde(default)]
    pub texture: Option<String>,
    /// Translation (origin when absent).
    #[serde(default)]
    pub position: Option<[f32; 3]>,
    /// Euler rotation in radians.
    #[serde(default)]
    pub rotation: Option<[f32; 3]>,
    /// Per-axis scale (one when absent).
    #[serde(default)]
    pub scale: Option<[f32; 3]>,
}

impl ExtraSpec {
    fn to_mesh(&self, segments: u32) -> Mesh {
        let material = Material::colored_or_textured(
            self.color.as_deref().unwrap_or(super::WHITE),
            self.texture.as_deref(),
        );
        let transform = Transform {
            position: self.position.map_or(Vec3::ZERO, Vec3::from),
            rotation: self.rotation.map_or(Vec3::ZERO, Vec3::from),
            scale: self.scale.map_or(Vec3::ONE, Vec3::from),
        };
        Mesh::new(self.name.clone(), self.geometry.to_geometry(segments), material)
            .with_transform(transform)
    }
}

/// Free layout: explicit fruit positions and scales plus arbitrary
/// decorations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CustomArrangement {
    /// Per-fruit position; fruit without an entry sit at the origin.
    pub positions: Vec<[f32; 3]>,
    /// Per-fruit uniform scale; fruit without an entry use 1.
    pub scales: Vec<f32>,
    /// Decorations added to the decoration group.
    pub extras: Vec<ExtraSpec>,
}

// ---------------------------------------------------------------------------
// Arrangement
// ---------------------------------------------------------------------------

/// How the fruit (and the scenery around them) are placed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Arrangement {
    /// Triangular bunch; needs a square number of images.
    Grape(BranchArrangement),
    /// One to three cherries hanging from stems.
    Cherry(BranchArrangement),
    /// Two to six apples on a forked branch.
    AppleBranch(BranchArrangement),
    /// Fruit in a bowl; three to five images, or a multiple of three.
    FruitBowl(BowlArrangement),
    /// Host-placed fruit and decorations.
    Custom(CustomArrangement),
}

impl Default for Arrangement {
    fn default() -> Self {
        Self::Custom(CustomArrangement::default())
    }
}

impl Arrangement {
    /// Short name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grape(_) => "grape",
            Self::Cherry(_) => "cherry",
            Self::AppleBranch(_) => "apple branch",
            Self::FruitBowl(_) => "fruit bowl",
            Self::Custom(_) => "custom",
        }
    }

    /// Lay out one fruit per image plus decorations into `scene`.
    ///
    /// On error nothing is added.
    pub fn build(
        &self,
        images: &[String],
        segments: u32,
        scene: &mut Scene,
    ) -> Result<(), ArrangementError> {
        match self {
            Self::Grape(opts) => build_grape(opts, images, segments, scene),
            Self::Cherry(opts) => build_cherry(opts, images, segments, scene),
            Self::AppleBranch(opts) => {
                build_apple_branch(opts, images, segments, scene)
            }
            Self::FruitBowl(opts) => {
                build_fruit_bowl(opts, images, segments, scene)
            }
            Self::Custom(opts) => {
                build_custom(opts, images, segments, scene);
                Ok(())
            }
        }
    }
}

/// Radius of a ring on which `count` unit spheres just touch.
fn ring_radius(count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        1.0 / (PI / count as f32).sin()
    }
}

fn add_fruit(
    scene: &mut Scene,
    images: &[String],
    index: usize,
    segments: u32,
    transform: Transform,
) {
    let mesh = Mesh::fruit(images, index, segments).with_transform(transform);
    let _ = scene.group_mut(GroupKind::Pickable).add(mesh);
}

fn add_decoration(scene: &mut Scene, mesh: Mesh) {
    let _ = scene.group_mut(GroupKind::Decoration).add(mesh);
}

fn leaf(kind: LeafKind, segments: u32, opts: &BranchArrangement) -> Mesh {
    Mesh::new(
        "leaf",
        Geometry::Leaf {
            kind,
            radius: 1.0,
            segments,
        },
        opts.leaf_material(),
    )
}

fn stem(arc: f32, segments: u32, material: Material) -> Mesh {
    Mesh::new(
        "branch",
        Geometry::Torus {
            radius: STEM_RADIUS,
            tube: STEM_TUBE,
            segments,
            arc,
        },
        material,
    )
}

// ── Grape ──

fn build_grape(
    opts: &BranchArrangement,
    images: &[String],
    segments: u32,
    scene: &mut Scene,
) -> Result<(), ArrangementError> {
    let count = images.len();
    if count == 0 {
        return Err(ArrangementError::NoImages {
            arrangement: "grape",
        });
    }
    let rows = (count as f64).sqrt().round() as usize;
    if rows * rows != count {
        return Err(ArrangementError::UnsupportedCount {
            arrangement: "grape",
            count,
            expected: "a square number",
        });
    }

    let mut nth = 0;
    for row in 0..rows {
        let in_row = row * 2 + 1;
        let radius = ring_radius(in_row);
        for j in 0..in_row {
            let theta = TAU / in_row as f32 * j as f32;
            let mut position = from_spherical(radius, RING_PHI, theta);
            position.y = in_row as f32 - rows as f32;
            add_fruit(scene, images, nth, segments, Transform::from_position(position));
            nth += 1;
        }
    }

    let branch = stem(FRAC_PI_4, segments, opts.branch_material());
    add_decoration(
        scene,
        branch
            .clone()
            .with_transform(Transform::from_position(Vec3::new(-4.0, 0.0, 0.0))),
    );
    add_decoration(
        scene,
        branch.with_transform(
            Transform::from_position(Vec3::new(-2.0, 0.7, -3.3))
                .with_rotation(Vec3::new(1.0, 0.0, 1.0)),
        ),
    );
    if opts.enable_leaf {
        add_decoration(
            scene,
            leaf(LeafKind::Grape, segments, opts).with_transform(
                Transform::from_position(Vec3::new(-0.3, 2.1, 0.7))
                    .with_rotation(Vec3::new(2.6, 0.0, -0.7)),
            ),
        );
    }

    scene.group_mut(GroupKind::Pickable).offset = Vec3::new(0.0, -1.0, 0.0);
    scene.group_mut(GroupKind::Decoration).offset =
        Vec3::new(0.0, rows as f32 - 2.0, 0.0);
    Ok(())
}

// ── Cherry ──

fn build_cherry(
    opts: &BranchArrangement,
    images: &[String],
    segments: u32,
    scene: &mut Scene,
) -> Result<(), ArrangementError> {
    let count = images.len();
    if count == 0 {
        return Err(ArrangementError::NoImages {
            arrangement: "cherry",
        });
    }
    if count > 3 {
        return Err(ArrangementError::UnsupportedCount {
            arrangement: "cherry",
            count,
            expected: "1 to 3",
        });
    }

    let radius = if count == 1 {
        0.0
    } else {
        ring_radius(count) + CHERRY_SPACING
    };
    let step = TAU / count as f32;
    for i in 0..count {
        let theta = step * i as f32 + FRAC_PI_2;
        let position = from_spherical(radius, RING_PHI, theta);
        add_fruit(scene, images, i, segments, Transform::from_position(position));
    }

    let material = opts.branch_material().single_sided();
    for i in 0..count {
        let theta = step * i as f32 + FRAC_PI_2;
        let position = from_spherical(radius - STEM_RADIUS, RING_PHI, theta);
        let rotation = Vec3::new(0.0, step * i as f32 + PI, 0.25);
        add_decoration(
            scene,
            stem(FRAC_PI_6, segments, material.clone()).with_transform(
                Transform::from_position(position).with_rotation(rotation),
            ),
        );
    }

    if opts.enable_leaf {
        let mut transform = Transform::from_position(Vec3::new(1.0, 2.5, 0.3))
            .with_rotation(Vec3::new(2.6, 0.0, -1.2));
        if count == 1 {
            transform.position.x = 0.1;
            transform.rotation.y = PI;
        }
        add_decoration(
            scene,
            leaf(LeafKind::Cherry, segments, opts).with_transform(transform),
        );
    }
    Ok(())
}

// ── Apple branch ──

fn build_apple_branch(
    opts: &BranchArrangement,
    images: &[String],
    segments: u32,
    scene: &mut Scene,
) -> Result<(), ArrangementError> {
    let count = images.len();
    if !(2..=APPLE_POSITIONS.len()).contains(&count) {
        return Err(ArrangementError::UnsupportedCount {
            arrangement: "apple branch",
            count,
            expected: "2 to 6",
        });
    }

    for (i, position) in APPLE_POSITIONS.iter().take(count).enumerate() {
        add_fruit(
            scene,
            images,
            i,
            segments,
            Transform::from_position(Vec3::from(*position)),
        );
    }

    let branch_number = if count < 3 { 3 } else { 5 };
    add_decoration(
        scene,
        Mesh::new(
            "branch",
            Geometry::TreeBranch {
                radius: 3.0,
                segments,
                branch_number,
            },
            opts.branch_material(),
        )
        .with_transform(
            Transform::default().with_rotation(Vec3::new(0.0, 0.0, -FRAC_PI_2)),
        ),
    );

    if opts.enable_leaf {
        let extra: &[[f32; 6]] = if branch_number == 5 {
            &APPLE_LEAVES_FIVE_FORKS
        } else {
            &[]
        };
        for p in APPLE_LEAVES.iter().chain(extra) {
            add_decoration(
                scene,
                leaf(LeafKind::Apple, segments, opts).with_transform(
                    Transform::from_position(Vec3::new(p[0], p[1], p[2]))
                        .with_rotation(Vec3::new(p[3], p[4], p[5])),
                ),
            );
        }
    }

    scene.group_mut(GroupKind::Pickable).offset = Vec3::new(-1.0, 0.0, 0.0);
    scene.group_mut(GroupKind::Decoration).offset = Vec3::new(-1.0, 0.0, 0.0);
    Ok(())
}

// ── Fruit bowl ──

fn build_fruit_bowl(
    opts: &BowlArrangement,
    images: &[String],
    segments: u32,
    scene: &mut Scene,
) -> Result<(), ArrangementError> {
    let count = images.len();
    if count == 0 {
        return Err(ArrangementError::NoImages {
            arrangement: "fruit bowl",
        });
    }
    let (row1, row2) = if (3..=5).contains(&count) {
        (count, 0)
    } else if count % 3 == 0 {
        (count * 2 / 3, count / 3)
    } else {
        return Err(ArrangementError::UnsupportedCount {
            arrangement: "fruit bowl",
            count,
            expected: "3 to 5 or a multiple of 3",
        });
    };

    let radius1 = ring_radius(row1);
    for i in 0..row1 {
        let theta = TAU / row1 as f32 * i as f32;
        let position = from_spherical(radius1, RING_PHI, theta);
        add_fruit(scene, images, i, segments, Transform::from_position(position));
    }
    let radius2 = ring_radius(row2);
    for i in 0..row2 {
        let theta = TAU / row2 as f32 * i as f32 + 0.5;
        let mut position = from_spherical(radius2, RING_PHI, theta);
        position.y = 1.65;
        add_fruit(
            scene,
            images,
            row1 + i,
            segments,
            Transform::from_position(position),
        );
    }

    let bowl_y = -((row1 as f32 - 2.0) * 0.2 + 1.2);
    add_decoration(
        scene,
        Mesh::new(
            "bowl",
            Geometry::Bowl {
                radius: radius1 / 2.0 + 0.5,
                segments,
            },
            Material::colored_or_textured(
                &opts.bowl_color,
                opts.bowl_texture.as_deref(),
            ),
        )
        .with_transform(Transform::from_position(Vec3::new(0.0, bowl_y, 0.0))),
    );
    Ok(())
}

// ── Custom ──

fn build_custom(
    opts: &CustomArrangement,
    images: &[String],
    segments: u32,
    scene: &mut Scene,
) {
    for i in 0..images.len() {
        let position = opts.positions.get(i).map_or(Vec3::ZERO, |p| Vec3::from(*p));
        let scale = opts.scales.get(i).copied().unwrap_or(1.0);
        let transform = Transform {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(scale),
        };
        add_fruit(scene, images, i, segments, transform);
    }
    for extra in &opts.extras {
        add_decoration(scene, extra.to_mesh(segments));
    }
}
