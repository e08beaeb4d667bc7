use crate::PartitionError;

/// Dense lookup from linear cell index to the position of that cell's
/// cluster in a [`VoxelPartition`](crate::VoxelPartition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafLayout {
    slots: Vec<i32>,
}

impl LeafLayout {
    pub const UNASSIGNED: i32 = -1;

    /// A table of `cells` unassigned slots. Allocation failure is reported
    /// instead of aborting, since `cells` can reach `i32::MAX`.
    pub fn try_new(cells: usize, leaf_size: [f32; 3]) -> Result<Self, PartitionError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(cells)
            .map_err(|_| PartitionError::LayoutAllocation { cells, leaf_size })?;
        slots.resize(cells, Self::UNASSIGNED);
        Ok(Self { slots })
    }

    pub(crate) fn assign(&mut self, cell: u32, cluster: usize) {
        self.slots[cell as usize] = cluster as i32;
    }

    /// Cluster position for `cell`, `None` when the cell has no cluster or is
    /// outside the table.
    pub fn get(&self, cell: u32) -> Option<usize> {
        match self.slots.get(cell as usize) {
            Some(&slot) if slot >= 0 => Some(slot as usize),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.slots
    }

    /// `(cell, cluster)` for every assigned slot, by ascending cell.
    pub fn occupied(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|&(_, &slot)| slot >= 0)
            .map(|(cell, &slot)| (cell as u32, slot as usize))
    }
}
