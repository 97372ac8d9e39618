//! Depth map example.
//!
//! Shoots an orthographic grid of rays at a saddle-shaped patch and saves
//! the nearest hit depth of each pixel as a grayscale PPM.

use anyhow::{Context, Result};
use bezel_patch::{closest_depths, ControlGrid, DQuat, DVec3, Patch, PatchMode, PatchSettings, Ray};
use std::fs::File;
use std::io::{BufWriter, Write};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mode = match std::env::args().nth(1) {
        Some(arg) => {
            let patch_type: i32 = arg.parse().context("patch type must be an integer")?;
            PatchMode::from_type(patch_type)?
        }
        None => PatchMode::Cached,
    };

    let start = std::time::Instant::now();
    let mut patch = Patch::new(
        saddle(),
        PatchSettings::default().with_mode(mode).with_steps(5, 5).with_flatness(0.005),
    )?;
    patch.rotate(DQuat::from_rotation_x(-0.5))?;
    log::info!("Patch ready in {:?}", start.elapsed());

    let rays = camera_rays(&patch);
    let start = std::time::Instant::now();
    let depths = closest_depths(&patch, &rays);
    log::info!("Traced {} rays in {:?}", rays.len(), start.elapsed());

    let filename = "depth_map.ppm";
    save_ppm(&depths, filename).with_context(|| format!("failed to write {filename}"))?;
    log::info!("Saved to {}", filename);
    Ok(())
}

fn saddle() -> ControlGrid {
    ControlGrid::from_fn(|i, j| {
        let x = i as f64 - 1.5;
        let y = j as f64 - 1.5;
        DVec3::new(x, y, 0.4 * x * y)
    })
}

/// One ray per pixel, looking down -Z across the patch's bounding box.
fn camera_rays(patch: &Patch) -> Vec<Ray> {
    let bbox = patch.bounding_box();
    let (min, max) = (bbox.min, bbox.max);
    let origin_z = max.z + 1.0;

    let mut rays = Vec::with_capacity((WIDTH * HEIGHT) as usize);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let fx = (x as f64 + 0.5) / WIDTH as f64;
            let fy = 1.0 - (y as f64 + 0.5) / HEIGHT as f64;
            let origin = DVec3::new(
                min.x + fx * (max.x - min.x),
                min.y + fy * (max.y - min.y),
                origin_z,
            );
            rays.push(Ray::new(origin, DVec3::new(0.0, 0.0, -1.0)));
        }
    }
    rays
}

fn save_ppm(depths: &[Option<f64>], filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    let (near, far) = depths
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| (lo.min(d), hi.max(d)));
    let range = (far - near).max(f64::EPSILON);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", WIDTH, HEIGHT)?;
    writeln!(writer, "255")?;

    for depth in depths {
        let shade = match depth {
            Some(d) => (255.0 * (1.0 - (d - near) / range)).clamp(0.0, 255.0) as u8,
            None => 0,
        };
        writeln!(writer, "{} {} {}", shade, shade, shade)?;
    }

    Ok(())
}
