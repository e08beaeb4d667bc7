use voxpart::{voxel_partition, AdmissionFilter, PartitionConfig, PointCloud};

fn main() {
    // Create a synthetic point cloud: 1000 random-ish points
    let n = 1000;
    let x: Vec<f32> = (0..n).map(|i| (i as f32 * 0.731) % 10.0).collect();
    let y: Vec<f32> = (0..n).map(|i| (i as f32 * 0.419) % 10.0).collect();
    let z: Vec<f32> = (0..n).map(|i| (i as f32 * 0.257) % 10.0).collect();
    let cloud = PointCloud::from_xyz(x, y, z);
    println!("Original cloud: {} points", cloud.len());

    // Partition into 2.5 m voxels, keeping cells with at least 5 points
    let config = PartitionConfig::new(2.5)
        .min_points_per_voxel(5)
        .save_leaf_layout(true);
    let partition = match voxel_partition(&cloud, &config) {
        Ok(partition) => partition,
        Err(err) => {
            eprintln!("partition failed: {err}");
            return;
        }
    };
    println!("Voxels kept (>= 5 points): {}", partition.len());
    if let Some(grid) = &partition.grid {
        println!("Grid divisions: {:?}", grid.divisions.as_slice());
    }
    for (cell, cluster) in partition.iter().take(5) {
        let aabb = cluster.aabb();
        println!(
            "  cell {cell}: {} points, min={:?}, max={:?}",
            cluster.len(),
            aabb.min,
            aabb.max
        );
    }

    // Only the lower half of the cloud takes part
    let lower = config.admission(AdmissionFilter::new("z", 0.0, 5.0));
    if let Ok(partition) = voxel_partition(&cloud, &lower) {
        let total: usize = partition.clusters.iter().map(PointCloud::len).sum();
        println!(
            "Lower half (z in [0, 5]): {} voxels, {} points",
            partition.len(),
            total
        );
    }
}
