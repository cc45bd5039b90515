//! Builds a scene with many repeated object poses and deduplicates their transforms.

use lumen::{
    intern::InternCache,
    linalg::{hash, vec3, Mat4, Quat, Transform},
};

fn main() -> anyhow::Result<()> {
    lumen::init_logger!();

    let mut rng = fastrand::Rng::with_seed(42);
    let mut cache = InternCache::<Mat4<f32>>::new("poses");

    for instance in 0..1000 {
        // Only a handful of distinct orientations and positions are used.
        let angle = rng.u8(0..8) as f32 * std::f32::consts::FRAC_PI_4;
        let offset = vec3(rng.u8(0..4) as f32, 0.0, -(rng.u8(0..4) as f32));

        let pose = Transform::from_translation(offset)
            * Transform::<f32, 4>::from_quat(Quat::from_rotation_y(angle));
        let shared = cache.intern(pose.matrix());
        if instance < 4 {
            log::debug!("instance {instance}: hash {:#010x}", hash::hash(&*shared));
        }
    }

    log::info!("{cache}");
    anyhow::ensure!(cache.len() <= 8 * 4 * 4, "unexpected number of distinct poses");
    Ok(())
}
