//! Partition 3D point clouds into per-voxel sub-clouds.
//!
//! ```
//! use voxpart::{voxel_partition, PartitionConfig, PointCloud};
//!
//! let cloud = PointCloud::from_points(&[[0.1, 0.1, 0.1], [5.1, 5.1, 5.1], [5.2, 5.2, 5.2]]);
//! let config = PartitionConfig::new(1.0).min_points_per_voxel(2);
//! let clusters = voxel_partition(&cloud, &config).unwrap().into_clouds();
//! assert_eq!(clusters.len(), 1);
//! assert_eq!(clusters[0].len(), 2);
//! ```

#![forbid(unsafe_code)]

pub use voxpart_core::{Aabb, Colors, Field, FieldError, FieldLimits, Normals, PointCloud};
pub use voxpart_partition::{
    assign_cells, group_runs, voxel_partition, voxel_partition_indices, AdmissionFilter,
    CellAssignment, GridError, GridShape, LeafLayout, PartitionConfig, PartitionError, Run,
    VoxelGridPartition, VoxelPartition, MAX_CELLS,
};
