//! I/O formats regression test
//!
//! Writes synthetic images to a temporary directory in every writable
//! format, then checks detection and decoded contents.

use morphdemo_io::{
    ImageFormat, IoError, detect_format, format_from_extension, read_image, write_image,
};
use morphdemo_test::{RegParams, make_gray_ramp, make_rgb_blocks};

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");
    let dir = tempfile::tempdir().expect("create temp dir");

    let gray = make_gray_ramp(37, 21).expect("gray ramp");
    let rgb = make_rgb_blocks(40, 30).expect("rgb blocks");

    for format in [ImageFormat::Bmp, ImageFormat::Png, ImageFormat::Pnm] {
        for (name, pix) in [("gray", &gray), ("rgb", &rgb)] {
            let path = dir
                .path()
                .join(format!("{}.{}", name, format.extension()));
            write_image(pix, &path, format).expect("write image");

            let detected = detect_format(&path).expect("detect format");
            rp.compare_values(1.0, if detected == format { 1.0 } else { 0.0 }, 0.0);

            let back = read_image(&path).expect("read image");
            rp.compare_values(pix.depth().bits() as f64, back.depth().bits() as f64, 0.0);
            rp.compare_pix(pix, &back);
            eprintln!(
                "  {}.{}: {}x{} d={}",
                name,
                format.extension(),
                back.width(),
                back.height(),
                back.depth().bits()
            );
        }
    }

    assert!(rp.cleanup(), "ioformats regression test failed");
}

#[test]
fn ioformats_extension_fallback() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let rgb = make_rgb_blocks(8, 8).expect("rgb blocks");

    let path = dir.path().join("blocks.ppm");
    assert_eq!(format_from_extension(&path), ImageFormat::Pnm);
    write_image(&rgb, &path, ImageFormat::Unknown).expect("write by extension");
    assert_eq!(detect_format(&path).unwrap(), ImageFormat::Pnm);

    let bad = dir.path().join("blocks.xyz");
    assert!(matches!(
        write_image(&rgb, &bad, ImageFormat::Unknown),
        Err(IoError::UnsupportedFormat(_))
    ));
}

#[test]
fn ioformats_unreadable_inputs() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let missing = dir.path().join("nope.png");
    assert!(matches!(read_image(&missing), Err(IoError::Io(_))));

    let text = dir.path().join("notes.txt");
    std::fs::write(&text, b"hello, world").unwrap();
    assert!(matches!(
        read_image(&text),
        Err(IoError::UnsupportedFormat(_))
    ));

    let empty = dir.path().join("empty.bmp");
    std::fs::write(&empty, b"").unwrap();
    assert!(matches!(read_image(&empty), Err(IoError::InvalidData(_))));
}
