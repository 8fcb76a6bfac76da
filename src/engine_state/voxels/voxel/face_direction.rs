//! # Face Direction Module
//!
//! The six axis-aligned faces of a voxel, expressed in storage space where `z`
//! is the vertical axis. Each direction knows the offset to its neighbouring
//! cell, the corners of its face on the unit cube and its shading factor.

use cgmath::{Point3, Vector3};

/// One of the six faces of a voxel cell.
///
/// The order matches the order the mesher visits faces in, which is also the
/// order quads appear in a mesh for a single voxel.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum FaceDirection {
    /// Facing negative X.
    NegX = 0,

    /// Facing positive X.
    PosX = 1,

    /// Facing negative Y.
    NegY = 2,

    /// Facing positive Y.
    PosY = 3,

    /// Facing down (negative Z).
    NegZ = 4,

    /// Facing up (positive Z).
    PosZ = 5,
}

impl FaceDirection {
    /// Returns all six faces in visiting order.
    pub fn all() -> [FaceDirection; 6] {
        [
            FaceDirection::NegX,
            FaceDirection::PosX,
            FaceDirection::NegY,
            FaceDirection::PosY,
            FaceDirection::NegZ,
            FaceDirection::PosZ,
        ]
    }

    /// Offset from a cell to the neighbour this face looks at.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            FaceDirection::NegX => Vector3::new(-1, 0, 0),
            FaceDirection::PosX => Vector3::new(1, 0, 0),
            FaceDirection::NegY => Vector3::new(0, -1, 0),
            FaceDirection::PosY => Vector3::new(0, 1, 0),
            FaceDirection::NegZ => Vector3::new(0, 0, -1),
            FaceDirection::PosZ => Vector3::new(0, 0, 1),
        }
    }

    /// Corners of this face on the unit cube at the origin, in storage space.
    ///
    /// The corners run clockwise seen from outside the cube in storage space.
    /// The storage-to-render axis swap mirrors the handedness, so after
    /// `to_render_space` the same corners run counter-clockwise, which is
    /// what the renderer culls against.
    pub fn corners(self) -> [Point3<i32>; 4] {
        match self {
            FaceDirection::NegX => [
                Point3::new(0, 0, 0),
                Point3::new(0, 1, 0),
                Point3::new(0, 1, 1),
                Point3::new(0, 0, 1),
            ],
            FaceDirection::PosX => [
                Point3::new(1, 0, 0),
                Point3::new(1, 0, 1),
                Point3::new(1, 1, 1),
                Point3::new(1, 1, 0),
            ],
            FaceDirection::NegY => [
                Point3::new(0, 0, 0),
                Point3::new(0, 0, 1),
                Point3::new(1, 0, 1),
                Point3::new(1, 0, 0),
            ],
            FaceDirection::PosY => [
                Point3::new(0, 1, 0),
                Point3::new(1, 1, 0),
                Point3::new(1, 1, 1),
                Point3::new(0, 1, 1),
            ],
            FaceDirection::NegZ => [
                Point3::new(0, 0, 0),
                Point3::new(1, 0, 0),
                Point3::new(1, 1, 0),
                Point3::new(0, 1, 0),
            ],
            FaceDirection::PosZ => [
                Point3::new(0, 0, 1),
                Point3::new(0, 1, 1),
                Point3::new(1, 1, 1),
                Point3::new(1, 0, 1),
            ],
        }
    }

    /// Cheap directional lighting: side colors are scaled by this factor.
    pub fn shading(self) -> f32 {
        match self {
            FaceDirection::NegX => 0.6,
            FaceDirection::PosX => 0.9,
            FaceDirection::NegY => 0.5,
            FaceDirection::PosY => 1.0,
            FaceDirection::NegZ => 1.0,
            FaceDirection::PosZ => 1.0,
        }
    }

    /// Whether this is the upward face, which gets the top color.
    pub fn is_top(self) -> bool {
        self == FaceDirection::PosZ
    }
}
