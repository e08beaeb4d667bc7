//! Voxel grid partitioning.
//!
//! Overlays a uniform grid on a point cloud and returns one sub-cloud per
//! occupied voxel, each holding the original (not averaged) points of that
//! voxel. The pipeline is: bounding box, [`GridShape`], [`assign_cells`],
//! [`group_runs`], then cluster construction in [`VoxelGridPartition`].

#![forbid(unsafe_code)]

pub mod assign;
pub mod config;
pub mod error;
pub mod grid;
pub mod group;
pub mod layout;
pub mod partition;

pub use assign::{assign_cells, CellAssignment};
pub use config::{AdmissionFilter, PartitionConfig};
pub use error::PartitionError;
pub use grid::{GridError, GridShape, MAX_CELLS};
pub use group::{group_runs, Run};
pub use layout::LeafLayout;
pub use partition::{voxel_partition, voxel_partition_indices, VoxelGridPartition, VoxelPartition};
