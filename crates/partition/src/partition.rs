use log::{debug, info, warn};
use nalgebra::Vector3;
use voxpart_core::{Aabb, PointCloud};

use crate::{
    assign_cells, group_runs, CellAssignment, GridShape, LeafLayout, PartitionConfig,
    PartitionError, Run,
};

/// Result of partitioning one cloud: one sub-cloud per surviving voxel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoxelPartition {
    /// Sub-clouds by ascending linear cell index. Each holds the unmodified
    /// points of one voxel.
    pub clusters: Vec<PointCloud>,
    /// Linear cell index of each cluster, parallel to `clusters`.
    pub cells: Vec<u32>,
    /// Grid used for this call, `None` when nothing was partitioned.
    pub grid: Option<GridShape>,
    /// Present when `PartitionConfig::save_leaf_layout` was set and a grid
    /// was built.
    pub leaf_layout: Option<LeafLayout>,
}

impl VoxelPartition {
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &PointCloud)> + '_ {
        self.cells.iter().copied().zip(&self.clusters)
    }

    /// Position of the cluster covering the absolute cell coordinate `ijk`.
    pub fn cluster_index_at(&self, ijk: Vector3<i64>) -> Option<usize> {
        let cell = self.grid.as_ref()?.cell_at(ijk)?;
        match &self.leaf_layout {
            Some(layout) => layout.get(cell),
            None => self.cells.binary_search(&cell).ok(),
        }
    }

    /// The cluster whose voxel contains `point`.
    pub fn cluster_at(&self, point: [f32; 3]) -> Option<&PointCloud> {
        if !point.iter().all(|v| v.is_finite()) {
            return None;
        }
        let ijk = self.grid.as_ref()?.grid_coordinates(point);
        self.cluster_index_at(ijk).map(|i| &self.clusters[i])
    }

    pub fn into_clouds(self) -> Vec<PointCloud> {
        self.clusters
    }
}

/// Partitions a cloud into per-voxel sub-clouds.
///
/// Not meant to be shared between threads mid-call; each `compute` builds
/// fresh scratch state and returns everything it produced.
///
/// ```
/// use voxpart_core::PointCloud;
/// use voxpart_partition::{PartitionConfig, VoxelGridPartition};
///
/// let cloud = PointCloud::from_points(&[[0.1, 0.1, 0.1], [0.2, 0.2, 0.2], [3.5, 0.0, 0.0]]);
/// let result = VoxelGridPartition::new(PartitionConfig::new(1.0))
///     .input(&cloud)
///     .compute()
///     .unwrap();
/// assert_eq!(result.len(), 2);
/// assert_eq!(result.clusters[0].len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct VoxelGridPartition<'a> {
    config: PartitionConfig,
    input: Option<&'a PointCloud>,
    indices: Option<&'a [usize]>,
}

impl<'a> VoxelGridPartition<'a> {
    pub fn new(config: PartitionConfig) -> Self {
        Self {
            config,
            input: None,
            indices: None,
        }
    }

    pub fn input(mut self, cloud: &'a PointCloud) -> Self {
        self.input = Some(cloud);
        self
    }

    /// Restrict partitioning to these points of the input.
    pub fn indices(mut self, indices: &'a [usize]) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PartitionConfig {
        &mut self.config
    }

    /// Run the partition.
    ///
    /// A missing input, an empty candidate set and a grid too fine for 32-bit
    /// cell indices all yield an empty partition. Configuration mistakes and a
    /// failed leaf layout allocation are errors.
    pub fn compute(&self) -> Result<VoxelPartition, PartitionError> {
        self.config.validate()?;

        let Some(cloud) = self.input else {
            info!("voxel_partition: no input dataset given");
            return Ok(VoxelPartition::default());
        };

        if let Some(indices) = self.indices {
            if let Some(&index) = indices.iter().find(|&&i| i >= cloud.len()) {
                return Err(PartitionError::IndexOutOfBounds {
                    index,
                    len: cloud.len(),
                });
            }
        }

        let limits = self
            .config
            .admission
            .as_ref()
            .map(|filter| filter.resolve(cloud))
            .transpose()?;

        let aabb = Aabb::from_cloud(cloud, self.indices, limits.as_ref());
        if aabb.is_empty() {
            debug!("voxel_partition: no admitted points");
            return Ok(VoxelPartition::default());
        }

        let grid = match GridShape::compute(&aabb, self.config.leaf_size) {
            Ok(grid) => grid,
            Err(err) => {
                warn!("voxel_partition: {err}");
                return Ok(VoxelPartition::default());
            }
        };

        let mut assignments = assign_cells(cloud, self.indices, &grid, limits.as_ref());
        let runs = group_runs(&mut assignments, self.config.min_points_per_voxel);

        let mut leaf_layout = if self.config.save_leaf_layout {
            Some(LeafLayout::try_new(grid.cell_count(), self.config.leaf_size)?)
        } else {
            None
        };

        let clusters = build_clusters(cloud, &assignments, &runs, leaf_layout.as_mut());
        let cells = runs.iter().map(|run| run.cell).collect();

        debug!(
            "voxel_partition: {} admitted points, {} cells over {:?} divisions, {} clusters",
            assignments.len(),
            grid.cell_count(),
            grid.divisions.as_slice(),
            clusters.len()
        );

        Ok(VoxelPartition {
            clusters,
            cells,
            grid: Some(grid),
            leaf_layout,
        })
    }
}

/// One cloud per run, in run order, holding verbatim copies of the run's
/// points. Records each run's position in `layout` when given.
fn build_clusters(
    cloud: &PointCloud,
    assignments: &[CellAssignment],
    runs: &[Run],
    mut layout: Option<&mut LeafLayout>,
) -> Vec<PointCloud> {
    let mut clusters = Vec::with_capacity(runs.len());
    for (position, run) in runs.iter().enumerate() {
        let mut cluster = PointCloud::empty_like(cloud, run.len());
        for assignment in &assignments[run.range.clone()] {
            cluster.push_from(cloud, assignment.point);
        }
        // every copied point went through the grid, so it is finite
        cluster.is_dense = true;
        clusters.push(cluster);

        if let Some(layout) = layout.as_deref_mut() {
            layout.assign(run.cell, position);
        }
    }
    clusters
}

/// Partition every point of `cloud` into per-voxel sub-clouds.
pub fn voxel_partition(
    cloud: &PointCloud,
    config: &PartitionConfig,
) -> Result<VoxelPartition, PartitionError> {
    VoxelGridPartition::new(config.clone())
        .input(cloud)
        .compute()
}

/// Like [`voxel_partition`], restricted to the points at `indices`.
pub fn voxel_partition_indices(
    cloud: &PointCloud,
    indices: &[usize],
    config: &PartitionConfig,
) -> Result<VoxelPartition, PartitionError> {
    VoxelGridPartition::new(config.clone())
        .input(cloud)
        .indices(indices)
        .compute()
}
