//! PWA icon generation.

use crate::config::IconConfig;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Something that can rasterise and store one icon.
pub trait IconWriter {
    fn write_icon(&self, size: u32, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconOutcome {
    Generated(Vec<PathBuf>),
    /// No image encoder is available in this build; nothing was written.
    Unavailable,
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon-{}x{}.png", size, size)
}

/// Look up the PNG encoder compiled into this binary.
#[cfg(feature = "png")]
pub fn probe() -> Option<Box<dyn IconWriter>> {
    Some(Box::new(crate::utils::images::PngIconWriter::default()))
}

#[cfg(not(feature = "png"))]
pub fn probe() -> Option<Box<dyn IconWriter>> {
    None
}

/// Write one icon per configured size, or report that no writer exists.
pub fn generate_icons(
    config: &IconConfig,
    writer: Option<&dyn IconWriter>,
) -> Result<IconOutcome> {
    let Some(writer) = writer else {
        warn!("PNG encoder unavailable, skipping icon generation");
        println!("PNG support is not available in this build.");
        println!("No fallback encoder is implemented, so no icons were written.");
        println!("Rebuild with: cargo install pwa-devtools --features png");
        return Ok(IconOutcome::Unavailable);
    };

    config.validate()?;

    let mut written = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let file_name = icon_file_name(size);
        let path = config.output_dir.join(&file_name);
        debug!("Rendering {}x{} icon to {}", size, size, path.display());

        writer.write_icon(size, &path)?;
        println!("Created {}", file_name);
        written.push(path);
    }

    println!("Icons generated successfully!");
    Ok(IconOutcome::Generated(written))
}
