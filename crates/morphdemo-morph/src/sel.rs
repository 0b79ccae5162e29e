//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Only hits matter for grayscale and color morphology; every
//! other position is "don't care".

use crate::{MorphError, MorphResult};
use std::fmt;
use std::str::FromStr;

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - this position takes part in the min/max
    Hit = 1,
}

/// Shape of a generated structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementShape {
    /// Filled rectangle
    Rect,
    /// Filled ellipse inscribed in the bounding box
    Ellipse,
    /// One full row and one full column through the origin
    Cross,
}

impl ElementShape {
    /// All shapes, in the order the space bar cycles through them.
    pub const ALL: [ElementShape; 3] = [Self::Rect, Self::Ellipse, Self::Cross];

    /// The shape after this one in the cycle Rect, Ellipse, Cross.
    pub fn next(self) -> Self {
        match self {
            Self::Rect => Self::Ellipse,
            Self::Ellipse => Self::Cross,
            Self::Cross => Self::Rect,
        }
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Cross => "cross",
        }
    }
}

impl fmt::Display for ElementShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementShape {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Ok(Self::Rect),
            "ellipse" => Ok(Self::Ellipse),
            "cross" => Ok(Self::Cross),
            other => Err(MorphError::InvalidParameters(format!(
                "unknown element shape {:?} (expected rect, ellipse or cross)",
                other
            ))),
        }
    }
}

/// A horizontal run of consecutive hits, relative to the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelRun {
    /// Row offset from the origin
    pub dy: i32,
    /// Column offset of the first hit from the origin
    pub dx: i32,
    /// Number of hits in the run
    pub len: u32,
}

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
}

impl Sel {
    /// Create a new empty structuring element with its origin at the center
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                MorphError::InvalidSel(format!("dimensions {}x{} too large", width, height))
            })?;
        Ok(Sel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; len],
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(SelElement::Hit);
        Ok(sel)
    }

    /// Create a cross (+) structuring element through the center
    pub fn create_cross(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        let (cx, cy) = (sel.cx, sel.cy);
        for x in 0..width {
            sel.set_element(x, cy, SelElement::Hit)?;
        }
        for y in 0..height {
            sel.set_element(cx, y, SelElement::Hit)?;
        }
        Ok(sel)
    }

    /// Create an ellipse inscribed in a `width` x `height` box
    ///
    /// Row `i` is filled over `[c - dx, c + dx]` (clipped to the box) where
    /// `r = height / 2`, `c = width / 2`, `dy = i - r` and
    /// `dx = round(c * sqrt(1 - dy^2 / r^2))`.
    pub fn create_ellipse(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        let r = (height / 2) as i64;
        let c = (width / 2) as i64;
        let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };

        for i in 0..height as i64 {
            let dy = i - r;
            if dy.abs() > r {
                continue;
            }
            let dx = (c as f64 * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round_ties_even()
                as i64;
            let j1 = (c - dx).max(0);
            let j2 = (c + dx + 1).min(width as i64);
            for j in j1..j2 {
                sel.set_element(j as u32, i as u32, SelElement::Hit)?;
            }
        }
        Ok(sel)
    }

    /// Create a structuring element of the given shape, origin at the center
    ///
    /// A 1x1 element is always a single hit, whatever the shape.
    pub fn create_shaped(shape: ElementShape, width: u32, height: u32) -> MorphResult<Self> {
        if width == 1 && height == 1 {
            return Self::create_brick(1, 1);
        }
        match shape {
            ElementShape::Rect => Self::create_brick(width, height),
            ElementShape::Ellipse => Self::create_ellipse(width, height),
            ElementShape::Cross => Self::create_cross(width, height),
        }
    }

    /// Create a structuring element from a string pattern
    ///
    /// # Arguments
    /// * `pattern` - Rows separated by newlines, 'x' for hit, '.' for don't care
    /// * `origin_x` - X coordinate of origin
    /// * `origin_y` - Y coordinate of origin
    pub fn from_string(pattern: &str, origin_x: u32, origin_y: u32) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut sel = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.len() as u32 != width {
                return Err(MorphError::InvalidSel(format!(
                    "row {} has length {}, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let elem = match ch {
                    'x' | 'X' => SelElement::Hit,
                    '.' => SelElement::DontCare,
                    other => {
                        return Err(MorphError::InvalidSel(format!(
                            "invalid character {:?} in pattern",
                            other
                        )));
                    }
                };
                sel.set_element(x as u32, y as u32, elem)?;
            }
        }
        sel.set_origin(origin_x, origin_y)?;
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({}, {}) outside {}x{} element",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set an element at (x, y)
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) -> MorphResult<()> {
        if x >= self.width || y >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "element ({}, {}) outside {}x{} element",
                x, y, self.width, self.height
            )));
        }
        self.data[(y * self.width + x) as usize] = elem;
        Ok(())
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &elem)| {
                if elem == SelElement::Hit {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }

    /// Decompose the hits into maximal horizontal runs, top to bottom
    pub fn row_runs(&self) -> Vec<SelRun> {
        let mut runs = Vec::new();
        for y in 0..self.height {
            let row = &self.data[(y * self.width) as usize..((y + 1) * self.width) as usize];
            let mut x = 0usize;
            while x < row.len() {
                if row[x] != SelElement::Hit {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < row.len() && row[x] == SelElement::Hit {
                    x += 1;
                }
                runs.push(SelRun {
                    dy: y as i32 - self.cy as i32,
                    dx: start as i32 - self.cx as i32,
                    len: (x - start) as u32,
                });
            }
        }
        runs
    }
}

impl fmt::Display for Sel {
    /// Renders the pattern in the format accepted by [`Sel::from_string`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = match self.data[(y * self.width + x) as usize] {
                    SelElement::Hit => 'x',
                    SelElement::DontCare => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick() {
        let sel = Sel::create_brick(5, 3).unwrap();
        assert_eq!(sel.hit_count(), 15);
        assert_eq!((sel.origin_x(), sel.origin_y()), (2, 1));
        assert!(Sel::create_brick(0, 3).is_err());
    }

    #[test]
    fn test_oversized_is_rejected() {
        // 80001 * 80001 does not fit in u32
        let err = Sel::new(80_001, 80_001).unwrap_err();
        assert!(matches!(err, MorphError::InvalidSel(_)));
        assert!(Sel::create_shaped(ElementShape::Rect, 80_001, 80_001).is_err());
    }

    #[test]
    fn test_cross() {
        let sel = Sel::create_cross(5, 5).unwrap();
        assert_eq!(sel.hit_count(), 9);
        assert_eq!(sel.get_element(2, 0), Some(SelElement::Hit));
        assert_eq!(sel.get_element(0, 2), Some(SelElement::Hit));
        assert_eq!(sel.get_element(1, 1), Some(SelElement::DontCare));
    }

    #[test]
    fn test_ellipse_3x3_is_a_plus() {
        let sel = Sel::create_ellipse(3, 3).unwrap();
        assert_eq!(sel.to_string(), ".x.\nxxx\n.x.\n");
    }

    #[test]
    fn test_ellipse_5x5() {
        let sel = Sel::create_ellipse(5, 5).unwrap();
        let expected = "..x..\nxxxxx\nxxxxx\nxxxxx\n..x..\n";
        assert_eq!(sel.to_string(), expected);
    }

    #[test]
    fn test_ellipse_7x7() {
        // dx per row: 0, 2, 3, 3, 3, 2, 0
        let sel = Sel::create_ellipse(7, 7).unwrap();
        let expected = "...x...\n.xxxxx.\nxxxxxxx\nxxxxxxx\nxxxxxxx\n.xxxxx.\n...x...\n";
        assert_eq!(sel.to_string(), expected);
    }

    #[test]
    fn test_one_by_one_is_single_hit() {
        for shape in ElementShape::ALL {
            let sel = Sel::create_shaped(shape, 1, 1).unwrap();
            assert_eq!(sel.hit_count(), 1);
            assert_eq!(sel.hit_offsets().collect::<Vec<_>>(), vec![(0, 0)]);
        }
    }

    #[test]
    fn test_row_runs() {
        let sel = Sel::create_cross(3, 3).unwrap();
        assert_eq!(
            sel.row_runs(),
            vec![
                SelRun { dy: -1, dx: 0, len: 1 },
                SelRun { dy: 0, dx: -1, len: 3 },
                SelRun { dy: 1, dx: 0, len: 1 },
            ]
        );

        let sel = Sel::from_string("xx.xx", 2, 0).unwrap();
        assert_eq!(
            sel.row_runs(),
            vec![
                SelRun { dy: 0, dx: -2, len: 2 },
                SelRun { dy: 0, dx: 1, len: 2 },
            ]
        );
    }

    #[test]
    fn test_from_string_roundtrip_and_errors() {
        let sel = Sel::create_ellipse(5, 5).unwrap();
        let back = Sel::from_string(&sel.to_string(), 2, 2).unwrap();
        assert_eq!(back, sel);

        assert!(Sel::from_string("xx\nx", 0, 0).is_err());
        assert!(Sel::from_string("xo", 0, 0).is_err());
        assert!(Sel::from_string("xx", 2, 0).is_err());
    }

    #[test]
    fn test_shape_parse_and_cycle() {
        assert_eq!("Rect".parse::<ElementShape>().unwrap(), ElementShape::Rect);
        assert_eq!(" ellipse ".parse::<ElementShape>().unwrap(), ElementShape::Ellipse);
        assert_eq!("cross".parse::<ElementShape>().unwrap(), ElementShape::Cross);
        assert!("disk".parse::<ElementShape>().is_err());

        let mut shape = ElementShape::Ellipse;
        for _ in 0..3 {
            shape = shape.next();
        }
        assert_eq!(shape, ElementShape::Ellipse);
        assert_eq!(ElementShape::Cross.to_string(), "cross");
    }
}
