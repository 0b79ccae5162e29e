//! Gray morphology regression test
//!
//! Tests:
//!   (1) Ordering: erode <= open <= src <= close <= dilate
//!   (2) Idempotence of opening and closing
//!   (3) Duality for grayscale erode/dilate and open/close
//!   (4) Top-hat and black-hat pick out bright and dark spots
//!   (5) Gradient is dilation minus erosion
//!
//! Run with:
//! ```
//! cargo test -p morphdemo-morph --test graymorph_reg
//! ```

use morphdemo_core::{Pix, PixelDepth};
use morphdemo_morph::{
    ElementShape, Sel, bottom_hat_gray, close_gray, dilate_gray, erode_gray, gradient_gray,
    open_gray, top_hat_gray,
};
use morphdemo_test::{RegParams, make_gray_ramp, make_gray_spots};

/// Invert an 8-bpp grayscale image (255 - pixel)
fn invert_gray(pix: &Pix) -> Pix {
    let data: Vec<u8> = pix.get_gray_data().unwrap().iter().map(|v| 255 - v).collect();
    let mut pm = pix.create_template().to_mut();
    pm.set_gray_data(&data).unwrap();
    pm.into()
}

/// True if every pixel of `a` is <= the matching pixel of `b`
fn all_le(a: &Pix, b: &Pix) -> bool {
    let (da, db) = (a.get_gray_data().unwrap(), b.get_gray_data().unwrap());
    da.iter().zip(&db).all(|(x, y)| x <= y)
}

fn sels() -> Vec<Sel> {
    let mut v = Vec::new();
    for shape in ElementShape::ALL {
        for size in [3, 7] {
            v.push(Sel::create_shaped(shape, size, size).unwrap());
        }
    }
    v.push(Sel::create_brick(9, 1).unwrap());
    v
}

#[test]
fn graymorph_reg() {
    let mut rp = RegParams::new("graymorph");

    let pixs = make_gray_spots(64, 48).expect("gray spots");
    let ramp = make_gray_ramp(40, 30).expect("gray ramp");
    assert_eq!(pixs.depth(), PixelDepth::Bit8);

    for sel in sels() {
        eprintln!("  sel {}x{} hits={}", sel.width(), sel.height(), sel.hit_count());
        for src in [&pixs, &ramp] {
            let ero = erode_gray(src, &sel).expect("erode_gray");
            let dil = dilate_gray(src, &sel).expect("dilate_gray");
            let opn = open_gray(src, &sel).expect("open_gray");
            let cls = close_gray(src, &sel).expect("close_gray");

            // (1) Ordering
            let ordered = all_le(&ero, &opn)
                && all_le(&opn, src)
                && all_le(src, &cls)
                && all_le(&cls, &dil);
            rp.compare_values(1.0, if ordered { 1.0 } else { 0.0 }, 0.0);

            // (2) Idempotence
            rp.compare_pix(&opn, &open_gray(&opn, &sel).unwrap());
            rp.compare_pix(&cls, &close_gray(&cls, &sel).unwrap());

            // (3) Duality
            let inv = invert_gray(src);
            rp.compare_pix(&ero, &invert_gray(&dilate_gray(&inv, &sel).unwrap()));
            rp.compare_pix(&opn, &invert_gray(&close_gray(&inv, &sel).unwrap()));

            // (5) Gradient
            let grad = gradient_gray(src, &sel).expect("gradient_gray");
            rp.compare_pix(&grad, &dil.arith_subtract(&ero).unwrap());
        }
    }

    assert!(rp.cleanup(), "graymorph regression test failed");
}

#[test]
fn graymorph_hats_reg() {
    let mut rp = RegParams::new("graymorph_hats");
    let pixs = make_gray_spots(64, 48).expect("gray spots");

    // (4) A 5x5 element is larger than the 3x3 spots
    let sel = Sel::create_shaped(ElementShape::Rect, 5, 5).unwrap();
    let th = top_hat_gray(&pixs, &sel).expect("top_hat_gray");
    let bh = bottom_hat_gray(&pixs, &sel).expect("bottom_hat_gray");

    rp.compare_values(102.0, th.get_pixel(5, 5).unwrap() as f64, 0.0);
    rp.compare_values(0.0, th.get_pixel(13, 13).unwrap() as f64, 0.0);
    rp.compare_values(0.0, th.get_pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(108.0, bh.get_pixel(13, 13).unwrap() as f64, 0.0);
    rp.compare_values(0.0, bh.get_pixel(5, 5).unwrap() as f64, 0.0);

    // A 3x3 element fits inside the spots, so neither hat sees them
    let small = Sel::create_brick(3, 3).unwrap();
    rp.compare_values(
        1.0,
        if top_hat_gray(&pixs, &small).unwrap().is_zero() { 1.0 } else { 0.0 },
        0.0,
    );
    rp.compare_values(
        1.0,
        if bottom_hat_gray(&pixs, &small).unwrap().is_zero() { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup(), "graymorph_hats regression test failed");
}
