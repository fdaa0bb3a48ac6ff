use crate::backend::RenderedPixmap;

/// Paints a rendered PDF page (or page-part) pixmap as the scene's
/// background, via a Cairo `ImageSurface` over a premultiplied BGRA copy of
/// its rows (Cairo's `ARgb32` format is native-endian, premultiplied alpha
/// — the opposite of the straight RGBA this crate stores elsewhere).
pub fn render_page_background(ctx: &cairo::Context, pixmap: &RenderedPixmap) -> Result<(), cairo::Error> {
    let w = pixmap.width as i32;
    let h = pixmap.height as i32;
    let mut stride_data = vec![0u8; (w * h * 4) as usize];
    for (i, px) in pixmap.rgba.chunks_exact(4).enumerate() {
        let [r, g, b, a] = [px[0], px[1], px[2], px[3]];
        let af = a as f64 / 255.0;
        let base = i * 4;
        stride_data[base] = (b as f64 * af).round() as u8;
        stride_data[base + 1] = (g as f64 * af).round() as u8;
        stride_data[base + 2] = (r as f64 * af).round() as u8;
        stride_data[base + 3] = a;
    }
    let surface = cairo::ImageSurface::create_for_data(stride_data, cairo::Format::ARgb32, w, h, w * 4)?;
    ctx.set_source_surface(&surface, 0.0, 0.0)?;
    ctx.paint()?;
    Ok(())
}
