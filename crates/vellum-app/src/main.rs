//! Vellum gallery renderer.
//!
//! Usage: `vellum-gallery [skin.toml] [out.png]`
//!
//! Paints every widget kind through the skin's painters onto a software
//! canvas, twice, then writes the frame to a PNG. The skin path falls back
//! to `VELLUM_SKIN`, then to the built-in skin. `VELLUM_SCALE` selects the
//! canvas scale factor.

mod gallery;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use vellum_backend_soft::{ProceduralRasterizer, SoftCanvas};
use vellum_core::{ImageCache, Painter, SkinConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let skin_path = args
        .next()
        .or_else(|| std::env::var("VELLUM_SKIN").ok())
        .map(PathBuf::from);
    let out_path = PathBuf::from(args.next().unwrap_or_else(|| "gallery.png".to_string()));
    let scale = match std::env::var("VELLUM_SCALE") {
        Ok(v) => v
            .parse::<u32>()
            .with_context(|| format!("VELLUM_SCALE={v} is not a scale factor"))?,
        Err(_) => 1,
    };

    let skin = match &skin_path {
        Some(path) => {
            log::info!("Loading skin from {}", path.display());
            SkinConfig::from_file(path)?
        }
        None => SkinConfig::builtin()?,
    };

    let cache = Arc::new(ImageCache::from_config(&skin.cache));
    let painter = Painter::from_skin(
        &skin,
        Arc::clone(&cache),
        Arc::new(ProceduralRasterizer::default()),
    )?;

    let (w, h) = gallery::canvas_size();
    let mut canvas = SoftCanvas::with_scale(w, h, scale)?;
    log::info!("Canvas {w}x{h} at scale {scale}");

    for pass in 0..2 {
        let painted = gallery::render(&painter, &mut canvas, pass)?;
        let stats = cache.stats();
        log::info!(
            "Pass {pass}: {painted} controls, cache {} entries / {} px, {} hits, {} misses, {} evictions ({:.0}% hit ratio)",
            cache.len(),
            cache.pixel_count(),
            stats.hits,
            stats.misses,
            stats.evictions,
            stats.hit_ratio() * 100.0,
        );
    }

    let surface = canvas.into_surface();
    save_png(
        &out_path,
        surface.width(),
        surface.height(),
        &surface.to_straight_rgba(),
    )?;
    println!("Gallery saved to {}", out_path.display());
    Ok(())
}

/// Save RGBA pixel data as a PNG file.
fn save_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> anyhow::Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    Ok(())
}
