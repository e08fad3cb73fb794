use super::*;

#[test]
fn radius_0_is_identity() {
    let mut buf = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    blur_rows_in_place(&mut buf, 1, 2, 0..2, 0, 1.0).unwrap();
    assert_eq!(buf, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn constant_image_is_unchanged() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20, 30, 40];
    let mut buf = px.repeat((w * h) as usize);
    blur_rows_in_place(&mut buf, w, h, 0..h, 3, 2.0).unwrap();
    assert_eq!(buf, px.repeat((w * h) as usize));
}

#[test]
fn spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    buf[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    blur_rows_in_place(&mut buf, w, h, 0..h, 2, 1.2).unwrap();

    let nonzero = buf.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    let sum_a: i32 = buf.chunks_exact(4).map(|px| i32::from(px[3])).sum();
    assert!((sum_a - 255).abs() <= 12, "sum_a = {sum_a}");
}

#[test]
fn rows_outside_the_band_are_untouched() {
    let (w, h) = (4u32, 20u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    for (i, px) in buf.chunks_exact_mut(4).enumerate() {
        let v = if (i / w as usize) % 2 == 0 { 255 } else { 0 };
        px.copy_from_slice(&[v, v, v, v]);
    }
    let before = buf.clone();

    blur_rows_in_place(&mut buf, w, h, 8..10, 2, 1.0).unwrap();

    let row_bytes = (w * 4) as usize;
    assert_eq!(buf[..6 * row_bytes], before[..6 * row_bytes]);
    assert_eq!(buf[12 * row_bytes..], before[12 * row_bytes..]);
    assert_ne!(buf[8 * row_bytes..10 * row_bytes], before[8 * row_bytes..10 * row_bytes]);
}

#[test]
fn rejects_bad_inputs() {
    let mut buf = vec![0u8; 4];
    assert!(blur_rows_in_place(&mut buf, 2, 2, 0..2, 1, 1.0).is_err());
    let mut buf = vec![0u8; 16];
    assert!(blur_rows_in_place(&mut buf, 2, 2, 0..2, 1, 0.0).is_err());
}
