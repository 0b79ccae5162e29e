//! Regression check bookkeeping

use morphdemo_core::Pix;

/// State of one regression test
///
/// Each `compare_*` call is one numbered check. A failing check is logged
/// to stderr and remembered; [`RegParams::cleanup`] prints the summary.
pub struct RegParams {
    test_name: String,
    /// Number of checks made so far
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        Self {
            test_name: test_name.to_string(),
            index: 0,
            failures: Vec::new(),
        }
    }

    fn fail(&mut self, what: String) {
        let msg = format!("Failure in {}_reg, check {}: {}", self.test_name, self.index, what);
        eprintln!("{}", msg);
        self.failures.push(msg);
    }

    /// Check `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff <= delta {
            return true;
        }
        self.fail(format!(
            "expected {expected}, got {actual} (difference {diff}, allowed {delta})"
        ));
        false
    }

    /// Check that two images have the same geometry and identical pixels.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;
        if !pix1.sizes_equal(pix2) {
            self.fail(format!(
                "geometry {}x{}x{} vs {}x{}x{}",
                pix1.width(),
                pix1.height(),
                pix1.depth().bits(),
                pix2.width(),
                pix2.height(),
                pix2.depth().bits()
            ));
            return false;
        }
        match pix1.count_pixel_diffs(pix2) {
            Ok(r) if r.n_diff == 0 => true,
            Ok(r) => {
                self.fail(format!("{} pixels differ, max diff {}", r.n_diff, r.max_diff));
                false
            }
            Err(e) => {
                self.fail(e.to_string());
                false
            }
        }
    }

    /// Print the summary. Returns `true` if every check passed.
    pub fn cleanup(self) -> bool {
        let ok = self.failures.is_empty();
        if ok {
            eprintln!("SUCCESS: {}_reg ({} checks)", self.test_name, self.index);
        } else {
            eprintln!(
                "FAILURE: {}_reg ({} of {} checks failed)",
                self.test_name,
                self.failures.len(),
                self.index
            );
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphdemo_core::PixelDepth;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("values");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert_eq!(rp.index, 3);
        assert_eq!(rp.failures.len(), 1);
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_pix() {
        let mut rp = RegParams::new("pix");
        let a = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(rp.compare_pix(&a, &a.deep_clone()));

        let mut b = a.to_mut();
        b.set_pixel(1, 1, 9).unwrap();
        let b: Pix = b.into();
        assert!(!rp.compare_pix(&a, &b));

        let c = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(!rp.compare_pix(&a, &c));
        assert_eq!(rp.failures.len(), 2);
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_all_passing() {
        let mut rp = RegParams::new("ok");
        rp.compare_values(1.0, 1.0, 0.0);
        assert!(rp.cleanup());
    }
}
