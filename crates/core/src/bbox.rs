use crate::{FieldLimits, PointCloud};

#[derive(Debug, Clone, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
    empty: bool,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn expand_with_point(&mut self, point: [f32; 3]) {
        if !point.iter().all(|v| v.is_finite()) {
            return;
        }

        if self.empty {
            self.min = point;
            self.max = point;
            self.empty = false;
            return;
        }

        for (axis, &val) in point.iter().enumerate() {
            self.min[axis] = self.min[axis].min(val);
            self.max[axis] = self.max[axis].max(val);
        }
    }

    pub fn contains(&self, point: &[f32; 3]) -> bool {
        if self.empty || !point.iter().all(|v| v.is_finite()) {
            return false;
        }

        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    pub fn extent(&self) -> [f32; 3] {
        if self.empty {
            return [0.0; 3];
        }
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn from_xyz(x: &[f32], y: &[f32], z: &[f32]) -> Self {
        let n = x.len().min(y.len()).min(z.len());
        let mut aabb = Self::empty();
        for i in 0..n {
            aabb.expand_with_point([x[i], y[i], z[i]]);
        }
        aabb
    }

    /// Bounds of the candidate points of `cloud`.
    ///
    /// Candidates are `indices` when given, every point otherwise. With
    /// `limits`, only points whose field value is admitted count. Points with
    /// a non-finite coordinate never contribute.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds or `limits` names a field the cloud
    /// does not carry.
    pub fn from_cloud(
        cloud: &PointCloud,
        indices: Option<&[usize]>,
        limits: Option<&FieldLimits>,
    ) -> Self {
        let mut aabb = Self::empty();
        let mut visit = |i: usize| {
            if let Some(limits) = limits {
                let value = cloud
                    .scalar(limits.field, i)
                    .unwrap_or_else(|| panic!("cloud has no `{}` field", limits.field));
                if !limits.admits(value) {
                    return;
                }
            }
            aabb.expand_with_point(cloud.point(i));
        };

        match indices {
            Some(indices) => indices.iter().copied().for_each(&mut visit),
            None => (0..cloud.len()).for_each(&mut visit),
        }
        aabb
    }
}
