//! Intersects a fan of rays with a sphere, using the cancellation-free quadratic solver.

use anyhow::Context;
use lumen::linalg::{num::quadratic, vec3, Quat, Transform, Vec3d};

const RADIUS: f64 = 1.0;

/// Returns the distances along `dir` at which the ray enters and leaves the sphere.
fn intersect(origin: Vec3d, dir: Vec3d, center: Vec3d) -> Option<(f64, f64)> {
    // |origin + t*dir - center|² = r²
    let oc = origin - center;
    let a = dir.length2();
    let b = 2.0 * dir.dot(oc);
    let c = oc.length2() - RADIUS * RADIUS;
    quadratic(a, b, c)
}

fn main() -> anyhow::Result<()> {
    lumen::init_logger!();

    let center = vec3(0.0, 0.0, 5.0);
    let origin = Vec3d::ZERO;

    let (near, far) = intersect(origin, Vec3d::Z, center).context("central ray missed")?;
    log::info!("central ray: enters at {near}, leaves at {far}");

    for step in 1..=12 {
        let tilt = Transform::<f64, 3>::from_quat(Quat::from_rotation_y(step as f64 * 0.02));
        let dir = tilt.transform_vector(Vec3d::Z);
        match intersect(origin, dir, center) {
            Some((t0, t1)) => log::info!("ray {step}: {dir:?} hits at t={t0:.6} (exit {t1:.6})"),
            None => log::info!("ray {step}: {dir:?} misses"),
        }
    }

    // A sphere far away makes `b²` dwarf `4ac`; the near root stays accurate.
    let distant = vec3(0.0, 0.0, 1e8);
    let (near, _) = intersect(origin, Vec3d::Z, distant).context("distant ray missed")?;
    log::info!("distant sphere: enters at {near} (expected {})", 1e8 - RADIUS);

    Ok(())
}
