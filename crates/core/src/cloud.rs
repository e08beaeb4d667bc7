use crate::{Aabb, Field};

#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    pub normals: Option<Normals>,
    pub colors: Option<Colors>,
    pub intensity: Option<Vec<f32>>,
    /// `true` when every coordinate is known to be finite. Consumers skip
    /// per-point finiteness checks on dense clouds.
    pub is_dense: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normals {
    pub nx: Vec<f32>,
    pub ny: Vec<f32>,
    pub nz: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Colors {
    pub r: Vec<u8>,
    pub g: Vec<u8>,
    pub b: Vec<u8>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
            normals: None,
            colors: None,
            intensity: None,
            is_dense: false,
        }
    }

    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");

        Self {
            x,
            y,
            z,
            normals: None,
            colors: None,
            intensity: None,
            is_dense: false,
        }
    }

    pub fn from_points(points: &[[f32; 3]]) -> Self {
        Self::from_xyz(
            points.iter().map(|p| p[0]).collect(),
            points.iter().map(|p| p[1]).collect(),
            points.iter().map(|p| p[2]).collect(),
        )
    }

    /// An empty cloud carrying the same attribute set as `other`, with room
    /// for `capacity` points.
    pub fn empty_like(other: &PointCloud, capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
            normals: other.normals.as_ref().map(|_| Normals {
                nx: Vec::with_capacity(capacity),
                ny: Vec::with_capacity(capacity),
                nz: Vec::with_capacity(capacity),
            }),
            colors: other.colors.as_ref().map(|_| Colors {
                r: Vec::with_capacity(capacity),
                g: Vec::with_capacity(capacity),
                b: Vec::with_capacity(capacity),
            }),
            intensity: other
                .intensity
                .as_ref()
                .map(|_| Vec::with_capacity(capacity)),
            is_dense: other.is_dense,
        }
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_xyz(&self.x, &self.y, &self.z)
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    pub fn is_finite_at(&self, i: usize) -> bool {
        self.x[i].is_finite() && self.y[i].is_finite() && self.z[i].is_finite()
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.field_len(field).is_some()
    }

    /// Number of stored values for `field`, or `None` when the attribute is
    /// absent. Equals `len()` on a well-formed cloud.
    pub fn field_len(&self, field: Field) -> Option<usize> {
        let len = match field {
            Field::X => self.x.len(),
            Field::Y => self.y.len(),
            Field::Z => self.z.len(),
            Field::Intensity => self.intensity.as_ref()?.len(),
            Field::NormalX => self.normals.as_ref()?.nx.len(),
            Field::NormalY => self.normals.as_ref()?.ny.len(),
            Field::NormalZ => self.normals.as_ref()?.nz.len(),
            Field::R => self.colors.as_ref()?.r.len(),
            Field::G => self.colors.as_ref()?.g.len(),
            Field::B => self.colors.as_ref()?.b.len(),
        };
        Some(len)
    }

    /// Value of `field` for point `i`, or `None` when the cloud does not
    /// carry that attribute.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn scalar(&self, field: Field, i: usize) -> Option<f32> {
        let value = match field {
            Field::X => self.x[i],
            Field::Y => self.y[i],
            Field::Z => self.z[i],
            Field::Intensity => self.intensity.as_ref()?[i],
            Field::NormalX => self.normals.as_ref()?.nx[i],
            Field::NormalY => self.normals.as_ref()?.ny[i],
            Field::NormalZ => self.normals.as_ref()?.nz[i],
            Field::R => self.colors.as_ref()?.r[i] as f32,
            Field::G => self.colors.as_ref()?.g[i] as f32,
            Field::B => self.colors.as_ref()?.b[i] as f32,
        };
        Some(value)
    }

    /// Append point `i` of `src` with every attribute this cloud carries.
    /// Attributes this cloud has but `src` lacks are left untouched, so only
    /// push between clouds built with [`PointCloud::empty_like`].
    pub fn push_from(&mut self, src: &PointCloud, i: usize) {
        self.x.push(src.x[i]);
        self.y.push(src.y[i]);
        self.z.push(src.z[i]);

        if let (Some(dst), Some(n)) = (self.normals.as_mut(), src.normals.as_ref()) {
            dst.nx.push(n.nx[i]);
            dst.ny.push(n.ny[i]);
            dst.nz.push(n.nz[i]);
        }
        if let (Some(dst), Some(c)) = (self.colors.as_mut(), src.colors.as_ref()) {
            dst.r.push(c.r[i]);
            dst.g.push(c.g[i]);
            dst.b.push(c.b[i]);
        }
        if let (Some(dst), Some(it)) = (self.intensity.as_mut(), src.intensity.as_ref()) {
            dst.push(it[i]);
        }
    }

    pub fn select(&self, indices: &[usize]) -> Self {
        let mut out = Self::empty_like(self, indices.len());
        for &idx in indices {
            assert!(idx < self.len(), "index out of bounds in select");
            out.push_from(self, idx);
        }
        out
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::PointCloud;
    use crate::{Colors, Field, Normals};
    use proptest::prelude::*;

    fn attributed_cloud() -> PointCloud {
        let mut cloud = PointCloud::from_xyz(
            vec![0.0, 1.0, 2.0],
            vec![3.0, 4.0, 5.0],
            vec![6.0, 7.0, 8.0],
        );
        cloud.normals = Some(Normals {
            nx: vec![0.1, 0.2, 0.3],
            ny: vec![0.4, 0.5, 0.6],
            nz: vec![0.7, 0.8, 0.9],
        });
        cloud.colors = Some(Colors {
            r: vec![10, 20, 30],
            g: vec![40, 50, 60],
            b: vec![70, 80, 90],
        });
        cloud.intensity = Some(vec![100.0, 200.0, 300.0]);
        cloud
    }

    #[test]
    fn new_is_empty() {
        let cloud = PointCloud::new();
        assert!(cloud.is_empty());
        assert_eq!(cloud.len(), 0);
        assert!(!cloud.is_dense);
    }

    #[test]
    fn from_xyz_builds_cloud() {
        let cloud = PointCloud::from_xyz(vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]);
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.point(0), [1.0, 3.0, 5.0]);
        assert_eq!(cloud.point(1), [2.0, 4.0, 6.0]);
    }

    #[test]
    fn from_points_deinterleaves() {
        let cloud = PointCloud::from_points(&[[1.0, 10.0, 100.0], [2.0, 20.0, 200.0]]);
        assert_eq!(cloud.x, vec![1.0, 2.0]);
        assert_eq!(cloud.y, vec![10.0, 20.0]);
        assert_eq!(cloud.z, vec![100.0, 200.0]);
    }

    #[test]
    fn empty_like_keeps_attribute_set() {
        let src = attributed_cloud();
        let out = PointCloud::empty_like(&src, 4);
        assert!(out.is_empty());
        assert!(out.has_field(Field::Intensity));
        assert!(out.has_field(Field::NormalY));
        assert!(out.has_field(Field::B));

        let plain = PointCloud::empty_like(&PointCloud::new(), 0);
        assert!(!plain.has_field(Field::Intensity));
        assert!(!plain.has_field(Field::NormalX));
        assert!(!plain.has_field(Field::R));
    }

    #[test]
    fn push_from_copies_every_attribute() {
        let src = attributed_cloud();
        let mut out = PointCloud::empty_like(&src, 1);
        out.push_from(&src, 2);
        assert_eq!(out.point(0), [2.0, 5.0, 8.0]);
        assert_eq!(out.normals.as_ref().unwrap().nz, vec![0.9]);
        assert_eq!(out.colors.as_ref().unwrap().g, vec![60]);
        assert_eq!(out.intensity, Some(vec![300.0]));
    }

    #[test]
    fn field_len_reports_stored_values() {
        let mut cloud = attributed_cloud();
        assert_eq!(cloud.field_len(Field::G), Some(3));
        cloud.intensity = Some(vec![1.0]);
        assert_eq!(cloud.field_len(Field::Intensity), Some(1));
        cloud.normals = None;
        assert_eq!(cloud.field_len(Field::NormalY), None);
        assert!(!cloud.has_field(Field::NormalY));
    }

    #[test]
    fn scalar_reads_named_fields() {
        let cloud = attributed_cloud();
        assert_eq!(cloud.scalar(Field::Y, 1), Some(4.0));
        assert_eq!(cloud.scalar(Field::Intensity, 0), Some(100.0));
        assert_eq!(cloud.scalar(Field::NormalX, 2), Some(0.3));
        assert_eq!(cloud.scalar(Field::R, 1), Some(20.0));

        let plain = PointCloud::from_xyz(vec![1.0], vec![2.0], vec![3.0]);
        assert_eq!(plain.scalar(Field::Intensity, 0), None);
        assert_eq!(plain.scalar(Field::G, 0), None);
    }

    #[test]
    fn select_subsets_points() {
        let cloud = PointCloud::from_xyz(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![10.0, 11.0, 12.0, 13.0],
            vec![20.0, 21.0, 22.0, 23.0],
        );
        let selected = cloud.select(&[3, 1]);
        assert_eq!(selected.x, vec![3.0, 1.0]);
        assert_eq!(selected.y, vec![13.0, 11.0]);
        assert_eq!(selected.z, vec![23.0, 21.0]);
    }

    #[test]
    fn select_carries_attributes() {
        let cloud = attributed_cloud();
        let selected = cloud.select(&[1]);
        assert_eq!(selected.intensity, Some(vec![200.0]));
        assert_eq!(selected.colors.as_ref().unwrap().b, vec![80]);
    }

    #[test]
    fn is_finite_at_detects_nan() {
        let cloud = PointCloud::from_xyz(vec![0.0, f32::NAN], vec![0.0, 0.0], vec![0.0, 0.0]);
        assert!(cloud.is_finite_at(0));
        assert!(!cloud.is_finite_at(1));
    }

    #[test]
    fn aabb_ignores_nan() {
        let cloud = PointCloud::from_xyz(
            vec![0.0, f32::NAN, 2.0],
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
        );
        let aabb = cloud.aabb();
        assert!(aabb.contains(&[0.0, 1.0, 4.0]));
        assert!(aabb.contains(&[2.0, 3.0, 6.0]));
        assert!(!aabb.contains(&[f32::NAN, 2.0, 5.0]));
    }

    #[test]
    #[should_panic]
    fn from_xyz_panics_on_mismatch() {
        let _ = PointCloud::from_xyz(vec![1.0], vec![2.0, 3.0], vec![4.0]);
    }

    proptest! {
        #[test]
        fn aabb_contains_all_finite_points(
            pts in prop::collection::vec((-1000.0f32..1000.0f32, -1000.0f32..1000.0f32, -1000.0f32..1000.0f32), 1..500)
        ) {
            let cloud = PointCloud::from_xyz(
                pts.iter().map(|p| p.0).collect(),
                pts.iter().map(|p| p.1).collect(),
                pts.iter().map(|p| p.2).collect(),
            );
            let aabb = cloud.aabb();
            for p in cloud.iter_points() {
                prop_assert!(aabb.contains(&p));
            }
        }

        #[test]
        fn select_never_changes_length_to_more_than_indices(
            data in prop::collection::vec((-10.0f32..10.0f32, -10.0f32..10.0f32, -10.0f32..10.0f32), 1..200),
            idxs in prop::collection::vec(0usize..200, 0..200)
        ) {
            let n = data.len();
            let cloud = PointCloud::from_xyz(
                data.iter().map(|p| p.0).collect(),
                data.iter().map(|p| p.1).collect(),
                data.iter().map(|p| p.2).collect(),
            );
            let valid: Vec<usize> = idxs.into_iter().filter(|i| *i < n).collect();
            let out = cloud.select(&valid);
            prop_assert_eq!(out.len(), valid.len());
        }
    }
}
