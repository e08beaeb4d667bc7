use thiserror::Error;
use voxpart_core::{Field, FieldError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PartitionError {
    #[error("leaf size must be finite and > 0 on every axis, got {0:?}")]
    InvalidLeafSize([f32; 3]),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("admission field `{0}` is not present on the input cloud")]
    MissingField(Field),

    #[error("admission field `{field}` holds {len} values for a cloud of {expected} points")]
    FieldLength {
        field: Field,
        len: usize,
        expected: usize,
    },

    #[error("candidate index {index} is out of bounds for a cloud of {len} points")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The leaf layout table could not be allocated. Fatal: no partial result
    /// is returned.
    #[error(
        "voxel_partition: bin size {leaf_size:?} is too low, \
         impossible to allocate a leaf layout of {cells} cells"
    )]
    LayoutAllocation { cells: usize, leaf_size: [f32; 3] },
}
