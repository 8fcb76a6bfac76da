use cgmath::{InnerSpace, Point2, Point3, Vector3};
use voxel_world::{
    config::{ChunkExtents, MeshConfig, WorldExtent},
    engine_state::meshing::palette::{GRASS_DARK, GRASS_LIGHT, HARD},
    Chunk, ChunkMesher, FaceDirection, Material, TerrainGenerator, Voxel, VoxelLookup, WorldConfig,
    WorldGrid,
};

fn grid(max_x: usize, max_y: usize, extents: ChunkExtents) -> WorldGrid {
    WorldGrid::new(
        WorldExtent {
            max_chunks_x: max_x,
            max_chunks_y: max_y,
        },
        extents,
    )
}

#[test]
fn single_hard_voxel() {
    let mut world = grid(1, 1, ChunkExtents::new(2, 2, 2));
    world
        .insert_chunk(Chunk::empty(Point2::new(0, 0), world.chunk_extents()))
        .unwrap();
    world
        .set_cell_at(Point3::new(0, 0, 0), Voxel::new(Material::Hard))
        .unwrap();

    let mesher = ChunkMesher::default();
    let chunk_mesh = world.chunk_mesh(Point2::new(0, 0), &mesher).unwrap();
    let mesh = &chunk_mesh.mesh;
    assert_eq!(chunk_mesh.revision, 1);
    assert_eq!(mesh.quad_count(), 6);
    assert_eq!(mesh.vertices.len(), 24);
    assert_eq!(mesh.indices.len(), 36);

    for (quad, direction) in FaceDirection::all().into_iter().enumerate() {
        let shaded = HARD * direction.shading();
        for vertex in mesh.quad(quad) {
            assert_eq!(vertex.color, [shaded.x, shaded.y, shaded.z, 1.0]);
            assert_ne!(&vertex.color[..3], &[GRASS_LIGHT.x, GRASS_LIGHT.y, GRASS_LIGHT.z]);
            assert_ne!(&vertex.color[..3], &[GRASS_DARK.x, GRASS_DARK.y, GRASS_DARK.z]);
        }
    }
    let top = mesh.quad(5);
    assert_eq!(top[0].color, [HARD.x, HARD.y, HARD.z, 1.0]);
}

#[test]
fn shared_boundary_between_solid_chunks_has_no_faces() {
    let extents = ChunkExtents::new(2, 2, 2);
    let mut world = grid(2, 1, extents);
    for x in 0..2 {
        world
            .insert_chunk(Chunk::solid(Point2::new(x, 0), extents, Material::Hard))
            .unwrap();
    }

    let mesher = ChunkMesher::default();
    let left = world.chunk_mesh(Point2::new(0, 0), &mesher).unwrap().mesh.clone();
    let right = world.chunk_mesh(Point2::new(1, 0), &mesher).unwrap().mesh.clone();

    // A lone 2x2x2 cube has 24 faces; the shared side loses 4 on each chunk.
    assert_eq!(left.quad_count(), 20);
    assert_eq!(right.quad_count(), 20);
    for mesh in [&left, &right] {
        for quad in 0..mesh.quad_count() {
            let on_boundary = mesh.quad(quad).iter().all(|v| v.position[0] == 2.0);
            assert!(!on_boundary, "quad {quad} lies on the shared boundary");
        }
    }
}

#[test]
fn isolated_voxels_get_all_six_faces() {
    let extents = ChunkExtents::new(4, 4, 6);
    let mut world = grid(3, 3, extents);
    world
        .insert_chunk(Chunk::checkerboard(Point2::new(1, 1), extents))
        .unwrap();

    let occupied = world.chunk(Point2::new(1, 1)).unwrap().occupied_count();
    let mesh = &world
        .chunk_mesh(Point2::new(1, 1), &ChunkMesher::default())
        .unwrap()
        .mesh;
    assert_eq!(occupied, 4 * 4 * 6 / 2);
    assert_eq!(mesh.quad_count(), 6 * occupied);
}

#[test]
fn fully_enclosed_chunk_has_no_faces() {
    struct Bedrock;

    impl VoxelLookup for Bedrock {
        fn voxel_at(&self, _global: Point3<i32>) -> Voxel {
            Voxel::new(Material::Hard)
        }
    }

    let chunk = Chunk::solid(Point2::new(0, 0), ChunkExtents::default(), Material::Hard);
    let mesh = ChunkMesher::default().mesh_chunk(&chunk, &Bedrock);
    assert_eq!(mesh.quad_count(), 0);
    assert!(mesh.vertices.is_empty());
}

#[test]
fn edge_chunks_are_closed_by_the_void() {
    let extents = ChunkExtents::new(2, 2, 2);
    let mut world = grid(1, 1, extents);
    world
        .insert_chunk(Chunk::solid(Point2::new(0, 0), extents, Material::Stone))
        .unwrap();
    let mesh = &world
        .chunk_mesh(Point2::new(0, 0), &ChunkMesher::default())
        .unwrap()
        .mesh;
    assert_eq!(mesh.quad_count(), 24);
}

#[test]
fn meshing_twice_is_byte_identical() {
    let config = WorldConfig {
        world: WorldExtent {
            max_chunks_x: 2,
            max_chunks_y: 2,
        },
        ..WorldConfig::default()
    };
    let mut world = WorldGrid::from_config(&config);
    world.generate(&TerrainGenerator::from_config(&config)).unwrap();

    let mesher = ChunkMesher::default();
    let coord = Point2::new(1, 0);
    let first = world.rebuild_chunk_mesh(coord, &mesher).unwrap().clone();
    let second = world.rebuild_chunk_mesh(coord, &mesher).unwrap().clone();
    assert_eq!(first.mesh.vertex_bytes(), second.mesh.vertex_bytes());
    assert_eq!(first.mesh.index_bytes(), second.mesh.index_bytes());
    assert_eq!((first.revision, second.revision), (1, 2));
}

#[test]
fn cell_edits_wait_for_an_explicit_rebuild() {
    let extents = ChunkExtents::new(2, 2, 2);
    let mut world = grid(1, 1, extents);
    world
        .insert_chunk(Chunk::empty(Point2::new(0, 0), extents))
        .unwrap();
    let mesher = ChunkMesher::default();
    assert!(world.chunk_mesh(Point2::new(0, 0), &mesher).unwrap().mesh.is_empty());

    world
        .set_cell_at(Point3::new(1, 1, 1), Voxel::new(Material::Water))
        .unwrap();
    let cached = world.chunk_mesh(Point2::new(0, 0), &mesher).unwrap();
    assert!(cached.mesh.is_empty());
    assert_eq!(cached.revision, 1);

    let rebuilt = world.rebuild_chunk_mesh(Point2::new(0, 0), &mesher).unwrap();
    assert_eq!(rebuilt.mesh.quad_count(), 6);
    assert_eq!(rebuilt.revision, 2);
}

#[test]
fn terrain_quads_wind_counter_clockwise() {
    let config = WorldConfig {
        world: WorldExtent {
            max_chunks_x: 2,
            max_chunks_y: 1,
        },
        mesh: MeshConfig { water_alpha: 0.6 },
        ..WorldConfig::default()
    };
    let mut world = WorldGrid::from_config(&config);
    world.generate(&TerrainGenerator::from_config(&config)).unwrap();
    let mesher = ChunkMesher::new(&config.mesh);

    for coord in [Point2::new(0, 0), Point2::new(1, 0)] {
        let mesh = world.chunk_mesh(coord, &mesher).unwrap().mesh.clone();
        assert!(mesh.quad_count() > 0);
        for quad in 0..mesh.quad_count() {
            let corners: Vec<_> = mesh.quad(quad).iter().map(|v| v.position()).collect();
            let normal = (corners[1] - corners[0]).cross(corners[2] - corners[0]);
            // Every face normal is axis aligned and points at the empty side,
            // which is the one the quad's own cell is not on.
            let centre = corners
                .iter()
                .fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + Vector3::new(p.x, p.y, p.z))
                / 4.0;
            let inside = centre - normal.normalize() * 0.5;
            let cell = Point3::new(
                inside.x.floor() as i32,
                inside.z.floor() as i32,
                inside.y.floor() as i32,
            );
            assert!(!world.cell_at(cell).is_empty(), "quad {quad} of {coord:?} faces inward");
            let outside = centre + normal.normalize() * 0.5;
            let beyond = Point3::new(
                outside.x.floor() as i32,
                outside.z.floor() as i32,
                outside.y.floor() as i32,
            );
            assert!(world.cell_at(beyond).is_empty());
            assert!(normal.magnitude() > 0.0);
        }
    }
}
