use voxpart_core::{Field, FieldLimits, PointCloud};

use crate::PartitionError;

/// Restricts which points take part in partitioning, by the value of one
/// named scalar field. See [`FieldLimits`] for the interval semantics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdmissionFilter {
    pub field_name: String,
    pub min: f32,
    pub max: f32,
    /// Keep values outside `(min, max)` instead of inside `[min, max]`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub negative: bool,
}

impl AdmissionFilter {
    pub fn new(field_name: impl Into<String>, min: f32, max: f32) -> Self {
        Self {
            field_name: field_name.into(),
            min,
            max,
            negative: false,
        }
    }

    pub fn negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// Resolve the field name against `cloud`. Unknown names, fields the
    /// cloud does not carry and attributes of the wrong length are
    /// configuration errors.
    pub fn resolve(&self, cloud: &PointCloud) -> Result<FieldLimits, PartitionError> {
        let field: Field = self.field_name.parse()?;
        match cloud.field_len(field) {
            None => return Err(PartitionError::MissingField(field)),
            Some(len) if len != cloud.len() => {
                return Err(PartitionError::FieldLength {
                    field,
                    len,
                    expected: cloud.len(),
                })
            }
            Some(_) => {}
        }
        Ok(FieldLimits {
            field,
            min: self.min,
            max: self.max,
            negative: self.negative,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PartitionConfig {
    /// Voxel edge length along x, y and z.
    pub leaf_size: [f32; 3],
    /// Cells holding fewer points are dropped entirely.
    pub min_points_per_voxel: usize,
    pub admission: Option<AdmissionFilter>,
    /// Only meaningful to centroid downsampling; partitioning always copies
    /// full point records.
    pub downsample_all_data: bool,
    /// Return a dense cell -> cluster lookup table with the result.
    pub save_leaf_layout: bool,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            leaf_size: [1.0; 3],
            min_points_per_voxel: 1,
            admission: None,
            downsample_all_data: true,
            save_leaf_layout: false,
        }
    }
}

impl PartitionConfig {
    /// Cubic voxels of edge `leaf`.
    pub fn new(leaf: f32) -> Self {
        Self::with_leaf_size(leaf, leaf, leaf)
    }

    pub fn with_leaf_size(lx: f32, ly: f32, lz: f32) -> Self {
        Self {
            leaf_size: [lx, ly, lz],
            ..Default::default()
        }
    }

    pub fn min_points_per_voxel(mut self, min_points: usize) -> Self {
        self.min_points_per_voxel = min_points;
        self
    }

    pub fn admission(mut self, filter: AdmissionFilter) -> Self {
        self.admission = Some(filter);
        self
    }

    pub fn save_leaf_layout(mut self, save: bool) -> Self {
        self.save_leaf_layout = save;
        self
    }

    pub fn downsample_all_data(mut self, all: bool) -> Self {
        self.downsample_all_data = all;
        self
    }

    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.leaf_size.iter().all(|v| v.is_finite() && *v > 0.0) {
            Ok(())
        } else {
            Err(PartitionError::InvalidLeafSize(self.leaf_size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxpart_core::FieldError;

    #[test]
    fn default_keeps_every_non_empty_cell() {
        let config = PartitionConfig::default();
        assert_eq!(config.min_points_per_voxel, 1);
        assert!(config.admission.is_none());
        assert!(!config.save_leaf_layout);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_leaf_sizes() {
        let bad = [
            [0.0, 1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, f32::NAN],
            [f32::INFINITY; 3],
        ];
        for leaf in bad {
            let config = PartitionConfig::with_leaf_size(leaf[0], leaf[1], leaf[2]);
            assert!(matches!(
                config.validate(),
                Err(PartitionError::InvalidLeafSize(_))
            ));
        }
    }

    #[test]
    fn resolve_known_field() {
        let mut cloud = PointCloud::from_xyz(vec![0.0], vec![0.0], vec![0.0]);
        cloud.intensity = Some(vec![1.0]);
        let limits = AdmissionFilter::new("intensity", 0.5, 2.0)
            .negative(true)
            .resolve(&cloud)
            .unwrap();
        assert_eq!(limits.field, Field::Intensity);
        assert!(limits.negative);
    }

    #[test]
    fn resolve_rejects_unknown_field() {
        let cloud = PointCloud::from_xyz(vec![0.0], vec![0.0], vec![0.0]);
        let err = AdmissionFilter::new("distance", 0.0, 1.0)
            .resolve(&cloud)
            .unwrap_err();
        assert_eq!(
            err,
            PartitionError::Field(FieldError::UnknownField("distance".into()))
        );
    }

    #[test]
    fn resolve_rejects_absent_attribute() {
        let cloud = PointCloud::from_xyz(vec![0.0], vec![0.0], vec![0.0]);
        let err = AdmissionFilter::new("intensity", 0.0, 1.0)
            .resolve(&cloud)
            .unwrap_err();
        assert_eq!(err, PartitionError::MissingField(Field::Intensity));
    }

    #[test]
    fn resolve_rejects_short_attribute() {
        let mut cloud = PointCloud::from_xyz(vec![0.0; 3], vec![0.0; 3], vec![0.0; 3]);
        cloud.intensity = Some(vec![1.0]);
        let err = AdmissionFilter::new("intensity", 0.0, 1.0)
            .resolve(&cloud)
            .unwrap_err();
        assert_eq!(
            err,
            PartitionError::FieldLength {
                field: Field::Intensity,
                len: 1,
                expected: 3
            }
        );
    }

    #[test]
    fn builder_chain() {
        let config = PartitionConfig::new(0.5)
            .min_points_per_voxel(3)
            .save_leaf_layout(true)
            .admission(AdmissionFilter::new("z", -1.0, 1.0));
        assert_eq!(config.leaf_size, [0.5; 3]);
        assert_eq!(config.min_points_per_voxel, 3);
        assert!(config.save_leaf_layout);
        assert!(config.admission.is_some());
    }
}
