use crate::foundation::error::{PostreelError, PostreelResult};

/// Separable gaussian blur of premultiplied RGBA8, in place.
///
/// Only the band `rows.start - radius .. rows.end + radius` (clamped to the image) is read and
/// written, which keeps text shadows cheap on tall portrait canvases. Band edges clamp.
pub fn blur_rows_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    rows: std::ops::Range<u32>,
    radius: u32,
    sigma: f32,
) -> PostreelResult<()> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PostreelError::render("blur buffer size overflow"))?;
    if buf.len() != expected_len {
        return Err(PostreelError::render(
            "blur expects a buffer matching width*height*4",
        ));
    }
    if radius == 0 || width == 0 || height == 0 || rows.is_empty() {
        return Ok(());
    }

    let kernel = gaussian_kernel(radius, sigma)?;
    let y0 = rows.start.saturating_sub(radius).min(height);
    let y1 = rows.end.saturating_add(radius).min(height);
    if y0 >= y1 {
        return Ok(());
    }

    let w = width as usize;
    let band = &mut buf[y0 as usize * w * 4..y1 as usize * w * 4];
    let band_h = (y1 - y0) as usize;

    let mut tmp = vec![0f32; band.len()];
    horizontal_pass(band, &mut tmp, w, band_h, &kernel);
    vertical_pass(&tmp, band, w, band_h, &kernel);
    Ok(())
}

fn gaussian_kernel(radius: u32, sigma: f32) -> PostreelResult<Vec<f32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(PostreelError::validation("blur sigma must be > 0"));
    }
    let r = radius as i32;
    let denom = 2.0 * sigma * sigma;
    let mut k: Vec<f32> = (-r..=r)
        .map(|i| {
            let x = i as f32;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f32 = k.iter().sum();
    if sum <= 0.0 {
        return Err(PostreelError::render("gaussian kernel sum is zero"));
    }
    for v in &mut k {
        *v /= sum;
    }
    Ok(k)
}

fn horizontal_pass(src: &[u8], dst: &mut [f32], w: usize, h: usize, k: &[f32]) {
    let r = (k.len() / 2) as isize;
    for y in 0..h {
        let row = y * w;
        for x in 0..w {
            let mut acc = [0f32; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x as isize + ki as isize - r).clamp(0, w as isize - 1) as usize;
                let idx = (row + sx) * 4;
                for c in 0..4 {
                    acc[c] += kw * f32::from(src[idx + c]);
                }
            }
            dst[(row + x) * 4..(row + x) * 4 + 4].copy_from_slice(&acc);
        }
    }
}

fn vertical_pass(src: &[f32], dst: &mut [u8], w: usize, h: usize, k: &[f32]) {
    let r = (k.len() / 2) as isize;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0f32; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y as isize + ki as isize - r).clamp(0, h as isize - 1) as usize;
                let idx = (sy * w + x) * 4;
                for c in 0..4 {
                    acc[c] += kw * src[idx + c];
                }
            }
            let out = (y * w + x) * 4;
            for c in 0..4 {
                dst[out + c] = acc[c].round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
