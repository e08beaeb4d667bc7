use voxpart_core::{FieldLimits, PointCloud};

use crate::GridShape;

/// One admitted point and the linear index of the cell it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellAssignment {
    pub cell: u32,
    pub point: usize,
}

/// Compute the cell of every candidate point.
///
/// Candidates are `indices` when given, every point of `cloud` otherwise.
/// Points are skipped, never reported, when they are non-finite on a cloud
/// that is not dense, when `limits` rejects their field value, or when they
/// fall outside `grid`. The output follows candidate order.
///
/// # Panics
///
/// Panics if an index is out of bounds or `limits` names a field the cloud
/// does not carry; callers resolve both beforehand.
pub fn assign_cells(
    cloud: &PointCloud,
    indices: Option<&[usize]>,
    grid: &GridShape,
    limits: Option<&FieldLimits>,
) -> Vec<CellAssignment> {
    let capacity = indices.map_or(cloud.len(), <[usize]>::len);
    let mut out = Vec::with_capacity(capacity);

    let mut visit = |i: usize| {
        if !cloud.is_dense && !cloud.is_finite_at(i) {
            return;
        }
        if let Some(limits) = limits {
            let value = cloud
                .scalar(limits.field, i)
                .unwrap_or_else(|| panic!("cloud has no `{}` field", limits.field));
            if !limits.admits(value) {
                return;
            }
        }
        if let Some(cell) = grid.cell_of(cloud.point(i)) {
            out.push(CellAssignment { cell, point: i });
        }
    };

    match indices {
        Some(indices) => indices.iter().copied().for_each(&mut visit),
        None => (0..cloud.len()).for_each(&mut visit),
    }
    out
}
