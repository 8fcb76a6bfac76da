//! # Chunk Schedule
//!
//! Bookkeeping of which grid slots are generated and meshed.
//!
//! A chunk's mesh depends on its neighbours' border cells, so a chunk may only
//! be meshed once it and every in-grid horizontal neighbour exist. The grid is
//! one chunk tall, so there are at most four neighbours.

use bitvec::vec::BitVec;
use cgmath::Point2;

use crate::config::WorldExtent;

#[derive(Clone, Debug)]
pub struct ChunkSchedule {
    extent: WorldExtent,
    generated: BitVec,
    mesh_requested: BitVec,
    meshed: BitVec,
}

impl ChunkSchedule {
    pub fn new(extent: WorldExtent) -> Self {
        let slots = extent.slot_count();
        ChunkSchedule {
            extent,
            generated: BitVec::repeat(false, slots),
            mesh_requested: BitVec::repeat(false, slots),
            meshed: BitVec::repeat(false, slots),
        }
    }

    fn slot(&self, coord: Point2<i32>) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        (x < self.extent.max_chunks_x && y < self.extent.max_chunks_y)
            .then(|| x + y * self.extent.max_chunks_x)
    }

    /// The 4-connected horizontal neighbours of `coord` that lie in the grid.
    pub fn neighbours(&self, coord: Point2<i32>) -> Vec<Point2<i32>> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .map(|(dx, dy)| Point2::new(coord.x + dx, coord.y + dy))
            .filter(|neighbour| self.slot(*neighbour).is_some())
            .collect()
    }

    pub fn is_generated(&self, coord: Point2<i32>) -> bool {
        self.slot(coord).is_some_and(|slot| self.generated[slot])
    }

    pub fn is_meshed(&self, coord: Point2<i32>) -> bool {
        self.slot(coord).is_some_and(|slot| self.meshed[slot])
    }

    /// The chunk and all of its neighbours are generated.
    pub fn is_ready_to_mesh(&self, coord: Point2<i32>) -> bool {
        self.is_generated(coord)
            && self
                .neighbours(coord)
                .into_iter()
                .all(|neighbour| self.is_generated(neighbour))
    }

    /// Records a finished generation.
    ///
    /// # Returns
    /// The chunks that became ready to mesh because of it. Each chunk is
    /// returned at most once over the schedule's lifetime.
    pub fn mark_generated(&mut self, coord: Point2<i32>) -> Vec<Point2<i32>> {
        let Some(slot) = self.slot(coord) else {
            return Vec::new();
        };
        self.generated.set(slot, true);

        let mut candidates = self.neighbours(coord);
        candidates.push(coord);

        let mut ready = Vec::new();
        for candidate in candidates {
            let Some(candidate_slot) = self.slot(candidate) else {
                continue;
            };
            if !self.mesh_requested[candidate_slot] && self.is_ready_to_mesh(candidate) {
                self.mesh_requested.set(candidate_slot, true);
                ready.push(candidate);
            }
        }
        ready
    }

    pub fn mark_meshed(&mut self, coord: Point2<i32>) {
        if let Some(slot) = self.slot(coord) {
            debug_assert!(self.mesh_requested[slot], "meshed a chunk nobody asked for");
            self.meshed.set(slot, true);
        }
    }

    pub fn generated_count(&self) -> usize {
        self.generated.count_ones()
    }

    pub fn meshed_count(&self) -> usize {
        self.meshed.count_ones()
    }

    /// Every slot is generated and meshed.
    pub fn is_complete(&self) -> bool {
        self.generated.all() && self.meshed.all()
    }
}
