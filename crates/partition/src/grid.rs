//! Discretisation of a bounding box into a dense voxel grid.
//!
//! A point `p` lands in the absolute cell `floor(p * inverse_leaf_size)`.
//! Cells are addressed locally relative to `min_b`, the absolute cell of the
//! box's min corner, and linearised as `x + y * div.x + z * div.x * div.y`.

use nalgebra::Vector3;
use thiserror::Error;
use voxpart_core::Aabb;

/// Largest number of cells a grid may hold; linear cell indices must fit a
/// signed 32-bit integer.
pub const MAX_CELLS: i64 = i32::MAX as i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cannot lay a grid over an empty bounding box")]
    EmptyBounds,

    #[error(
        "leaf size is too small for the input dataset, \
         {divisions:?} divisions would overflow 32-bit cell indices"
    )]
    Overflow { divisions: [i64; 3] },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridShape {
    /// Absolute cell coordinate of the bounding box min corner.
    pub min_b: Vector3<i64>,
    /// Absolute cell coordinate of the bounding box max corner.
    pub max_b: Vector3<i64>,
    /// Number of cells along each axis, all >= 1.
    pub divisions: Vector3<u32>,
    /// `(1, div.x, div.x * div.y)`.
    pub multiplier: Vector3<u32>,
    pub inverse_leaf_size: Vector3<f32>,
}

impl GridShape {
    /// Lay a grid of `leaf_size` voxels over `aabb`.
    ///
    /// Fails when `aabb` is empty or the grid would need more than
    /// [`MAX_CELLS`] cells. The division counts are computed in `i64` so the
    /// check itself cannot wrap. `leaf_size` must be positive.
    pub fn compute(aabb: &Aabb, leaf_size: [f32; 3]) -> Result<Self, GridError> {
        if aabb.is_empty() {
            return Err(GridError::EmptyBounds);
        }

        let inv = Vector3::new(1.0 / leaf_size[0], 1.0 / leaf_size[1], 1.0 / leaf_size[2]);
        let min = Vector3::from(aabb.min);
        let max = Vector3::from(aabb.max);

        let extent_divisions: [i64; 3] = std::array::from_fn(|axis| {
            (((max[axis] - min[axis]) * inv[axis]) as i64).saturating_add(1)
        });
        let min_b = min.component_mul(&inv).map(|v| v.floor() as i64);
        let max_b = max.component_mul(&inv).map(|v| v.floor() as i64);
        let divisions: [i64; 3] =
            std::array::from_fn(|axis| max_b[axis].saturating_sub(min_b[axis]).saturating_add(1));

        // Rounding can make the cell-bound counts exceed the extent-derived
        // ones by one per axis; both must fit.
        if cell_product(extent_divisions) > MAX_CELLS || cell_product(divisions) > MAX_CELLS {
            return Err(GridError::Overflow {
                divisions: std::array::from_fn(|axis| {
                    divisions[axis].max(extent_divisions[axis])
                }),
            });
        }

        let divisions = Vector3::new(divisions[0] as u32, divisions[1] as u32, divisions[2] as u32);
        let multiplier = Vector3::new(1, divisions.x, divisions.x * divisions.y);

        Ok(Self {
            min_b,
            max_b,
            divisions,
            multiplier,
            inverse_leaf_size: inv,
        })
    }

    pub fn cell_count(&self) -> usize {
        self.divisions.x as usize * self.divisions.y as usize * self.divisions.z as usize
    }

    /// Absolute cell coordinate of `point`.
    pub fn grid_coordinates(&self, point: [f32; 3]) -> Vector3<i64> {
        Vector3::from(point)
            .component_mul(&self.inverse_leaf_size)
            .map(|v| v.floor() as i64)
    }

    /// Cell coordinate of `point` relative to `min_b`, or `None` when the
    /// point is non-finite or falls outside the grid.
    pub fn local_coordinates(&self, point: [f32; 3]) -> Option<Vector3<u32>> {
        if !point.iter().all(|v| v.is_finite()) {
            return None;
        }
        let local = self.grid_coordinates(point) - self.min_b;
        self.local_from_offset(local)
    }

    fn local_from_offset(&self, local: Vector3<i64>) -> Option<Vector3<u32>> {
        for axis in 0..3 {
            if local[axis] < 0 || local[axis] >= self.divisions[axis] as i64 {
                return None;
            }
        }
        Some(local.map(|v| v as u32))
    }

    pub fn linear_index(&self, local: &Vector3<u32>) -> u32 {
        local.dot(&self.multiplier)
    }

    /// Linear index of the cell containing `point`.
    pub fn cell_of(&self, point: [f32; 3]) -> Option<u32> {
        self.local_coordinates(point)
            .map(|local| self.linear_index(&local))
    }

    /// Linear index of the absolute cell coordinate `ijk`, if inside the grid.
    pub fn cell_at(&self, ijk: Vector3<i64>) -> Option<u32> {
        self.local_from_offset(ijk - self.min_b)
            .map(|local| self.linear_index(&local))
    }

    /// Absolute cell coordinate of a linear index; inverse of [`Self::cell_at`].
    pub fn cell_coordinates(&self, cell: u32) -> Vector3<i64> {
        let plane = self.multiplier.z;
        let z = cell / plane;
        let rest = cell % plane;
        let y = rest / self.divisions.x;
        let x = rest % self.divisions.x;
        Vector3::new(x as i64, y as i64, z as i64) + self.min_b
    }
}

fn cell_product(divisions: [i64; 3]) -> i64 {
    divisions
        .iter()
        .fold(1i64, |acc, &d| acc.saturating_mul(d.max(0)))
}
