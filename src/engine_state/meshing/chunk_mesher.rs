//! Face-culling mesher.
//!
//! Every occupied cell contributes one quad per face whose neighbour is empty.
//! Neighbours inside the chunk are read from the chunk itself, everything else
//! goes through a [`VoxelLookup`] so faces on chunk borders see the adjacent
//! chunk. Unresolvable neighbours read as empty, which gives edge chunks their
//! outer walls.

use cgmath::{Point3, Vector3};

use super::mesh_builder::{Mesh, MeshBuilder};
use super::palette::Palette;
use crate::config::MeshConfig;
use crate::engine_state::voxels::{
    chunk::Chunk,
    voxel::{face_direction::FaceDirection, Voxel},
    world::VoxelLookup,
};

/// Maps a storage-space point (z up) to render space (y up).
pub fn to_render_space(point: Point3<i32>) -> Point3<f32> {
    Point3::new(point.x as f32, point.z as f32, point.y as f32)
}

/// Turns chunks into meshes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChunkMesher {
    palette: Palette,
}

impl ChunkMesher {
    pub fn new(config: &MeshConfig) -> Self {
        Self::with_palette(Palette::new(config))
    }

    pub fn with_palette(palette: Palette) -> Self {
        ChunkMesher { palette }
    }

    /// Builds the mesh of `chunk`, reading out-of-chunk neighbours from
    /// `lookup`.
    pub fn mesh_chunk<L: VoxelLookup + ?Sized>(&self, chunk: &Chunk, lookup: &L) -> Mesh {
        let mut builder = MeshBuilder::new();
        self.mesh_chunk_into(chunk, lookup, &mut builder);
        builder.build()
    }

    /// Like `mesh_chunk`, but refills an existing builder.
    pub fn mesh_chunk_into<L: VoxelLookup + ?Sized>(
        &self,
        chunk: &Chunk,
        lookup: &L,
        builder: &mut MeshBuilder,
    ) {
        builder.clear();
        let origin = chunk.origin();

        for (local, voxel) in chunk.occupied_voxels() {
            let global = origin + Vector3::new(local.x as i32, local.y as i32, local.z as i32);

            for direction in FaceDirection::all() {
                let neighbour = global + direction.offset();
                if !self.neighbour(chunk, lookup, neighbour).is_empty() {
                    continue;
                }

                let [a, b, c, d] = direction.corners().map(|corner| {
                    to_render_space(global + Vector3::new(corner.x, corner.y, corner.z))
                });
                let color = self.palette.face_color(voxel, direction, global.x, global.y);
                let alpha = self.palette.alpha(voxel);
                if alpha < 1.0 {
                    builder.push_quad_with_alpha(a, b, c, d, color, alpha);
                } else {
                    builder.push_quad(a, b, c, d, color);
                }
            }
        }
    }

    fn neighbour<L: VoxelLookup + ?Sized>(
        &self,
        chunk: &Chunk,
        lookup: &L,
        global: Point3<i32>,
    ) -> Voxel {
        let local = global - chunk.origin();
        let extents = chunk.extents();
        let inside = local.x >= 0
            && local.y >= 0
            && local.z >= 0
            && (local.x as usize) < extents.sx
            && (local.y as usize) < extents.sy
            && (local.z as usize) < extents.sz;
        if inside {
            chunk.get(Point3::new(local.x as usize, local.y as usize, local.z as usize))
        } else {
            lookup.voxel_at(global)
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Point2};

    use super::*;
    use crate::config::ChunkExtents;
    use crate::engine_state::meshing::palette::{DIRT, GRASS_DARK, HARD, WATER};
    use crate::engine_state::voxels::voxel::material::Material;

    /// A world that is solid everywhere.
    struct Solid;

    impl VoxelLookup for Solid {
        fn voxel_at(&self, _global: Point3<i32>) -> Voxel {
            Voxel::new(Material::Hard)
        }
    }

    /// A world that is empty everywhere.
    struct Void;

    impl VoxelLookup for Void {
        fn voxel_at(&self, _global: Point3<i32>) -> Voxel {
            Voxel::EMPTY
        }
    }

    fn single_voxel(material: Material) -> Chunk {
        let mut chunk = Chunk::empty(Point2::new(0, 0), ChunkExtents::new(2, 2, 2));
        chunk.set(Point3::new(0, 0, 0), Voxel::new(material));
        chunk
    }

    #[test]
    fn render_space_swaps_y_and_z() {
        assert_eq!(to_render_space(Point3::new(1, 2, 3)), Point3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn single_voxel_has_six_faces() {
        let mesh = ChunkMesher::default().mesh_chunk(&single_voxel(Material::Hard), &Void);
        assert_eq!(mesh.quad_count(), 6);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);

        for (quad, direction) in FaceDirection::all().into_iter().enumerate() {
            let expected = HARD * direction.shading();
            for vertex in mesh.quad(quad) {
                assert_eq!(vertex.color, [expected.x, expected.y, expected.z, 1.0]);
            }
        }
    }

    #[test]
    fn solid_surroundings_cull_everything() {
        let chunk = Chunk::solid(Point2::new(3, 3), ChunkExtents::new(4, 4, 4), Material::Stone);
        let mesh = ChunkMesher::default().mesh_chunk(&chunk, &Solid);
        assert!(mesh.is_empty());
    }

    #[test]
    fn internal_faces_are_culled() {
        let chunk = Chunk::solid(Point2::new(0, 0), ChunkExtents::new(2, 2, 2), Material::Hard);
        let mesh = ChunkMesher::default().mesh_chunk(&chunk, &Void);
        // Four cells per side of the cube, six sides.
        assert_eq!(mesh.quad_count(), 24);
    }

    #[test]
    fn quads_wind_counter_clockwise_from_outside() {
        let mesh = ChunkMesher::default().mesh_chunk(&single_voxel(Material::Hard), &Void);
        let centre = to_render_space(Point3::new(0, 0, 0)) + Vector3::new(0.5, 0.5, 0.5);

        for quad in 0..mesh.quad_count() {
            let corners: Vec<_> = mesh.quad(quad).iter().map(|v| v.position()).collect();
            let normal = (corners[1] - corners[0]).cross(corners[2] - corners[0]);
            let outward = corners[0] - centre;
            assert!(normal.dot(outward) > 0.0, "quad {quad} faces inward");
        }
    }

    #[test]
    fn stone_tops_are_grass_by_global_column() {
        let mut chunk = Chunk::empty(Point2::new(1, 0), ChunkExtents::new(2, 2, 2));
        chunk.set(Point3::new(0, 1, 0), Voxel::new(Material::Stone));
        let mesh = ChunkMesher::default().mesh_chunk(&chunk, &Void);

        // Global column (2, 1) has odd parity sum, so it is the dark shade.
        let top = mesh.quad(5);
        assert_eq!(top[0].color, [GRASS_DARK.x, GRASS_DARK.y, GRASS_DARK.z, 1.0]);
        let bottom = mesh.quad(4);
        assert_eq!(bottom[0].color, [DIRT.x, DIRT.y, DIRT.z, 1.0]);
    }

    #[test]
    fn translucent_water_keeps_its_alpha() {
        let mesher = ChunkMesher::new(&MeshConfig { water_alpha: 0.5 });
        let mesh = mesher.mesh_chunk(&single_voxel(Material::Water), &Void);
        assert_eq!(mesh.quad_count(), 6);
        let top = mesh.quad(5);
        assert_eq!(top[0].color, [WATER.x, WATER.y, WATER.z, 0.5]);
    }

    #[test]
    fn positions_are_global() {
        let mut chunk = Chunk::empty(Point2::new(2, 3), ChunkExtents::new(2, 2, 2));
        chunk.set(Point3::new(1, 0, 1), Voxel::new(Material::Hard));
        let mesh = ChunkMesher::default().mesh_chunk(&chunk, &Void);
        for vertex in &mesh.vertices {
            let p = vertex.position();
            // Global cell (5, 6, 1) spans x 5..6, y (render) 1..2, z (render) 6..7.
            assert!((5.0..=6.0).contains(&p.x));
            assert!((1.0..=2.0).contains(&p.y));
            assert!((6.0..=7.0).contains(&p.z));
        }
    }

    #[test]
    fn meshing_is_repeatable() {
        let chunk = Chunk::checkerboard(Point2::new(0, 0), ChunkExtents::new(4, 4, 4));
        let mesher = ChunkMesher::default();
        let first = mesher.mesh_chunk(&chunk, &Void);
        let second = mesher.mesh_chunk(&chunk, &Void);
        assert_eq!(first.vertex_bytes(), second.vertex_bytes());
        assert_eq!(first.index_bytes(), second.index_bytes());
    }
}
