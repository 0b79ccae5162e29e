//! Structuring Element (SEL) regression test
//!
//! Tests shaped Sel creation, string parsing and the row-run
//! decomposition used by the morphology engine.
//!
//! Run with:
//! ```
//! cargo test -p morphdemo-morph --test sel_reg -- --nocapture
//! ```

use morphdemo_morph::{ElementShape, Sel, SelElement};
use morphdemo_test::RegParams;

// 9x9 ellipse: row half-widths 0, 3, 3, 4, 4, 4, 3, 3, 0
const ELLIPSE9: &str = "\
....x....
.xxxxxxx.
.xxxxxxx.
xxxxxxxxx
xxxxxxxxx
xxxxxxxxx
.xxxxxxx.
.xxxxxxx.
....x....";

#[test]
fn sel_reg() {
    let mut rp = RegParams::new("sel");

    // Element size is 2r+1 for every shape
    for shape in ElementShape::ALL {
        for r in 0..=10u32 {
            let size = 2 * r + 1;
            let sel = Sel::create_shaped(shape, size, size).expect("create_shaped");
            rp.compare_values(size as f64, sel.width() as f64, 0.0);
            rp.compare_values(size as f64, sel.height() as f64, 0.0);
            rp.compare_values(r as f64, sel.origin_x() as f64, 0.0);
            rp.compare_values(r as f64, sel.origin_y() as f64, 0.0);
            // The origin is always a hit
            rp.compare_values(
                1.0,
                if sel.get_element(r, r) == Some(SelElement::Hit) { 1.0 } else { 0.0 },
                0.0,
            );

            let expected_hits = match shape {
                ElementShape::Rect => (size * size) as f64,
                ElementShape::Cross => (2 * size - 1) as f64,
                ElementShape::Ellipse => sel.hit_count() as f64,
            };
            rp.compare_values(expected_hits, sel.hit_count() as f64, 0.0);

            // Runs cover exactly the hits
            let run_hits: u32 = sel.row_runs().iter().map(|r| r.len).sum();
            rp.compare_values(sel.hit_count() as f64, run_hits as f64, 0.0);
        }
    }

    // Ellipse mask matches the reference pattern
    let ellipse = Sel::create_shaped(ElementShape::Ellipse, 9, 9).unwrap();
    let reference = Sel::from_string(ELLIPSE9, 4, 4).unwrap();
    rp.compare_values(1.0, if ellipse == reference { 1.0 } else { 0.0 }, 0.0);
    eprintln!("{}", ellipse);

    // Ellipse is symmetric under 180-degree rotation
    for r in 1..=10u32 {
        let sel = Sel::create_shaped(ElementShape::Ellipse, 2 * r + 1, 2 * r + 1).unwrap();
        let offsets: Vec<(i32, i32)> = sel.hit_offsets().collect();
        let symmetric = offsets.iter().all(|&(x, y)| offsets.contains(&(-x, -y)));
        rp.compare_values(1.0, if symmetric { 1.0 } else { 0.0 }, 0.0);
    }

    assert!(rp.cleanup(), "sel regression test failed");
}
