use crate::config::IconPalette;
use crate::icons::IconWriter;
use crate::utils::error::Result;
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use std::path::Path;

/// Outline stroke for an icon of edge `size`.
pub fn outline_width(size: u32) -> u32 {
    (size / 50).max(1)
}

/// Rasterise one icon: a filled, outlined circle inset by `size / 8` with a
/// translucent dark disc inset by `size / 4` on top of it.
///
/// Later shapes replace pixels instead of blending, so the inner disc keeps
/// its own alpha.
pub fn render_icon(size: u32, palette: &IconPalette) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, Rgba(palette.background));

    let outer_margin = size / 8;
    let inner_margin = size / 4;
    let center = ((size / 2) as i32, (size / 2) as i32);

    let outer_radius = radius_for_margin(size, outer_margin);
    let stroke = outline_width(size) as i32;

    // The outline is the band between the outer edge and the fill.
    draw_filled_circle_mut(&mut img, center, outer_radius, Rgba(palette.ring_outline));
    if outer_radius > stroke {
        draw_filled_circle_mut(
            &mut img,
            center,
            outer_radius - stroke,
            Rgba(palette.ring_fill),
        );
    }

    draw_filled_circle_mut(
        &mut img,
        center,
        radius_for_margin(size, inner_margin),
        Rgba(palette.inner_fill),
    );

    img
}

fn radius_for_margin(size: u32, margin: u32) -> i32 {
    (size.saturating_sub(2 * margin) / 2) as i32
}

/// Writes icons as PNG through the `image` crate.
#[derive(Debug, Default)]
pub struct PngIconWriter {
    pub palette: IconPalette,
}

impl IconWriter for PngIconWriter {
    fn write_icon(&self, size: u32, path: &Path) -> Result<()> {
        let img = render_icon(size, &self.palette);
        img.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_width_never_drops_below_one() {
        assert_eq!(outline_width(16), 1);
        assert_eq!(outline_width(192), 3);
        assert_eq!(outline_width(512), 10);
    }

    #[test]
    fn rendered_icon_has_ring_layout() {
        let palette = IconPalette::default();
        let img = render_icon(192, &palette);

        assert_eq!(img.dimensions(), (192, 192));
        assert_eq!(img.get_pixel(0, 0).0, palette.background);
        assert_eq!(img.get_pixel(96, 96).0, palette.inner_fill);
        // Between the inner disc (radius 48) and the outline (radius 69..72).
        assert_eq!(img.get_pixel(96 + 58, 96).0, palette.ring_fill);
        assert_eq!(img.get_pixel(96 + 71, 96).0, palette.ring_outline);
    }

    #[test]
    fn tiny_icons_still_render() {
        let img = render_icon(1, &IconPalette::default());
        assert_eq!(img.dimensions(), (1, 1));
    }
}
