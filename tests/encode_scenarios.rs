//! End-to-end tests for encoding and rendering.
//!
//! These check the structural guarantees of produced symbols (size, finder patterns,
//! dark module, mask choice) and the behavior of the public render entry point.

use image::GrayImage;
use proptest::prelude::*;
use qrpaint::{
    encode_and_render, CapacityPolicy, Framebuffer, Module, QrCode, QrCodeEcc, QrError, RasterTarget,
    RenderOptions, Version,
};

const LEVELS: [QrCodeEcc; 4] = [QrCodeEcc::Low, QrCodeEcc::Medium, QrCodeEcc::Quartile, QrCodeEcc::High];

fn encode(text: &str, ecl: QrCodeEcc) -> QrCode {
    QrCode::encode_text(text, ecl, CapacityPolicy::Clamp).expect("encoding failed")
}

/// Cells of the finder patterns with separators, the timing patterns and
/// the dark module: everything that never depends on the payload.
fn fixed_cells(ver: Version) -> Vec<(usize, usize)> {
    let size = ver.size();
    let mut cells = Vec::new();
    for r in 0..size {
        for c in 0..size {
            let finder = (r < 8 && c < 8) || (r < 8 && c >= size - 8) || (r >= size - 8 && c < 8);
            let timing = r == 6 || c == 6;
            if finder || timing {
                cells.push((r, c));
            }
        }
    }
    cells.push((size - 8, 8));
    cells
}

fn assert_finder(qr: &QrCode, top: usize, left: usize) {
    let m = qr.modules();
    for r in 0..7 {
        for c in 0..7 {
            let ring = r == 0 || r == 6 || c == 0 || c == 6;
            let core = (2..=4).contains(&r) && (2..=4).contains(&c);
            assert_eq!(m.is_dark(top + r, left + c), ring || core, "finder ({}, {}) cell ({}, {})", top, left, r, c);
        }
    }
}

#[test]
fn test_hello_medium_is_version_1() {
    let qr = encode("HELLO", QrCodeEcc::Medium);
    assert_eq!(qr.version(), Version::new(1));
    assert_eq!(qr.size(), 21);
    assert_finder(&qr, 0, 0);
    assert_finder(&qr, 14, 0);
    assert_finder(&qr, 0, 14);
    // No finder in the bottom-right corner.
    let m = qr.modules();
    let bottom_right_dark = (14..21).flat_map(|r| (14..21).map(move |c| (r, c))).filter(|&(r, c)| m.is_dark(r, c)).count();
    assert!(bottom_right_dark < 49);
}

#[test]
fn test_repeat_encoding_is_deterministic() {
    for &ecl in &LEVELS {
        let a = encode("HELLO", ecl);
        let b = encode("HELLO", ecl);
        assert_eq!(a, b);
        assert_eq!(a.mask(), b.mask());
    }
}

#[test]
fn test_empty_text_only_differs_in_data_region() {
    let empty = encode("", QrCodeEcc::Low);
    let hello = encode("HELLO", QrCodeEcc::Medium);
    assert_eq!(empty.version(), Version::new(1));
    assert_eq!(empty.size(), 21);
    for (r, c) in fixed_cells(Version::new(1)) {
        assert_eq!(empty.modules().get(r, c), hello.modules().get(r, c), "cell ({}, {})", r, c);
    }
}

#[test]
fn test_empty_text_at_every_level() {
    for &ecl in &LEVELS {
        let qr = encode("", ecl);
        assert_eq!(qr.version(), Version::new(1));
        assert!(qr.modules().is_dark(13, 8));
    }
}

#[test]
fn test_oversized_text_clamps_to_version_10() {
    let text = "A".repeat(500);
    let qr = encode(&text, QrCodeEcc::High);
    assert_eq!(qr.version(), Version::new(10));
    assert_eq!(qr.size(), 57);
}

#[test]
fn test_oversized_text_rejected_when_strict() {
    let text = "A".repeat(500);
    let err = QrCode::encode_text(&text, QrCodeEcc::High, CapacityPolicy::Reject).unwrap_err();
    assert!(matches!(err, QrError::CapacityExceeded { len: 500, capacity: 119 }));
}

#[test]
fn test_multibyte_text_counts_bytes() {
    // 7 characters, 14 UTF-8 bytes: too many for 1-H (7 bytes), fits 2-H (14 bytes).
    let qr = encode("ééééééé", QrCodeEcc::High);
    assert_eq!(qr.version(), Version::new(2));
}

#[test]
fn test_version_7_has_version_information() {
    // 122 bytes is the 7-M capacity.
    let qr = encode(&"x".repeat(122), QrCodeEcc::Medium);
    assert_eq!(qr.version(), Version::new(7));
    let bits = qrpaint::format::version_bits(Version::new(7));
    let m = qr.modules();
    let size = qr.size() as usize;
    for i in 0..18 {
        let expected = (bits >> i) & 1 != 0;
        assert_eq!(m.is_dark(i / 3, size - 11 + i % 3), expected);
        assert_eq!(m.is_dark(size - 11 + i % 3, i / 3), expected);
    }
}

#[test]
fn test_selected_mask_has_minimal_penalty() {
    for text in ["HELLO", "", "https://example.com/some/path?q=1", "0123456789"] {
        for &ecl in &LEVELS {
            let qr = encode(text, ecl);
            let penalties = qr.mask_penalties().expect("mask chosen automatically");
            let chosen = usize::from(qr.mask().value());
            assert!(penalties.iter().all(|&p| penalties[chosen] <= p));
            assert!(penalties[..chosen].iter().all(|&p| p > penalties[chosen]));
        }
    }
}

#[test]
fn test_no_unset_modules_remain() {
    for v in [1usize, 20, 60, 150, 200] {
        let qr = encode(&"z".repeat(v), QrCodeEcc::Low);
        assert!(qr.modules().rows().flatten().all(|&m| m != Module::Unset));
    }
}

#[test]
fn test_encode_and_render_defaults() {
    let mut img = GrayImage::new(3, 3);
    encode_and_render(&mut img, "HELLO", &RenderOptions::default()).unwrap();
    assert_eq!(img.dimensions(), (320, 320));
    assert!(img.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    // Corner is quiet zone; the finder starts 4 modules in.
    assert_eq!(img.get_pixel(0, 0).0[0], 255);
    let module_px = 320.0 / 29.0;
    let finder_px = (4.5 * module_px) as u32;
    assert_eq!(img.get_pixel(finder_px, finder_px).0[0], 0);
}

#[test]
fn test_encode_and_render_coerces_to_string() {
    let mut a = GrayImage::new(1, 1);
    let mut b = GrayImage::new(1, 1);
    let opts = RenderOptions::default().with_size(100).with_margin(0);
    encode_and_render(&mut a, &12345, &opts).unwrap();
    encode_and_render(&mut b, "12345", &opts).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_unknown_level_falls_back_to_medium() {
    let mut a = GrayImage::new(1, 1);
    let mut b = GrayImage::new(1, 1);
    encode_and_render(&mut a, "HELLO", &RenderOptions::default().with_level_name("?")).unwrap();
    encode_and_render(&mut b, "HELLO", &RenderOptions::default().with_level(QrCodeEcc::Medium)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_invalid_target() {
    let mut backing = [0u8; 16];
    let mut fb = Framebuffer::new(&mut backing, 4, 4).unwrap();
    let err = encode_and_render(&mut fb, "HELLO", &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, QrError::InvalidTarget(_)));
}

#[test]
fn test_margin_zero_and_exact_size() {
    let mut img = GrayImage::new(1, 1);
    let opts = RenderOptions::default().with_size(84).with_margin(0);
    encode_and_render(&mut img, "HELLO", &opts).unwrap();
    assert_eq!(RasterTarget::dimensions(&img), (84, 84));
    // 84 = 4 px per module; top-left pixel is the finder corner.
    assert_eq!(img.get_pixel(0, 0).0[0], 0);
    assert_eq!(img.get_pixel(83, 83).0[0] == 0, encode("HELLO", QrCodeEcc::Medium).get_module(20, 20));
}

proptest! {
    #[test]
    fn prop_symbol_is_square_with_dark_module(text in ".{0,80}", level in 0usize..4) {
        let ecl = LEVELS[level];
        let qr = encode(&text, ecl);
        let ver = qr.version();
        prop_assert_eq!(qr.size() as usize, ver.size());
        prop_assert_eq!(qr.modules().size(), usize::from(ver.value()) * 4 + 17);
        prop_assert!(qr.modules().is_dark(ver.size() - 8, 8));
        if text.len() <= Version::MAX.byte_capacity(ecl) {
            prop_assert!(text.len() <= ver.byte_capacity(ecl));
        }
    }

    #[test]
    fn prop_encoding_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..120), level in 0usize..4) {
        let ecl = LEVELS[level];
        let a = QrCode::encode_binary(&data, ecl, CapacityPolicy::Clamp).unwrap();
        let b = QrCode::encode_binary(&data, ecl, CapacityPolicy::Clamp).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_smallest_fitting_version(len in 0usize..300, level in 0usize..4) {
        let ecl = LEVELS[level];
        let (ver, fits) = Version::for_byte_len(len, ecl);
        prop_assert_eq!(fits, len <= Version::MAX.byte_capacity(ecl));
        if fits {
            prop_assert!(ver.byte_capacity(ecl) >= len);
            if ver > Version::MIN {
                prop_assert!(Version::new(ver.value() - 1).byte_capacity(ecl) < len);
            }
        } else {
            prop_assert_eq!(ver, Version::MAX);
        }
    }
}
