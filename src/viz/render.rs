/// Darkest-to-brightest character ramp. Index by intensity in [0, 1].
const RAMP: &[u8] = b" .:-=+*#%@";

/// Validates that `pixels` fills a `rows × cols` grid and returns the
/// expected pixel count. The multiply is checked since the dimensions come
/// from the caller.
fn expected_pixel_count(pixels: &[f64], rows: usize, cols: usize) -> Result<usize, String> {
    let expected = rows.checked_mul(cols).ok_or_else(|| {
        format!("Image dimensions overflow usize (rows={}, cols={}).", rows, cols)
    })?;
    if pixels.len() != expected {
        return Err(format!(
            "Pixel count mismatch: expected {}×{}={} values, got {}.",
            rows, cols, expected,
            pixels.len()
        ));
    }
    Ok(expected)
}

/// Renders normalized pixels as ASCII art, one text line per image row.
///
/// `pixels` must hold exactly `rows * cols` values in [0, 1]; values outside
/// that range are clamped.
pub fn render_ascii(pixels: &[f64], rows: usize, cols: usize) -> Result<String, String> {
    let expected = expected_pixel_count(pixels, rows, cols)?;

    let mut out = String::with_capacity(expected + rows);
    for row in pixels.chunks_exact(cols) {
        for &p in row {
            let intensity = p.clamp(0.0, 1.0);
            let idx = (intensity * (RAMP.len() - 1) as f64).round() as usize;
            out.push(RAMP[idx] as char);
        }
        out.push('\n');
    }
    Ok(out)
}

/// Writes normalized pixels as a grayscale PNG, de-normalizing back to
/// [0, 255].
pub fn save_png(pixels: &[f64], rows: usize, cols: usize, path: &str) -> Result<(), String> {
    expected_pixel_count(pixels, rows, cols)?;

    let buf: Vec<u8> = pixels
        .iter()
        .map(|&p| (p.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();

    let img = image::GrayImage::from_raw(cols as u32, rows as u32, buf)
        .ok_or_else(|| "Pixel buffer does not fill the image dimensions.".to_owned())?;
    img.save(path).map_err(|e| e.to_string())
}
