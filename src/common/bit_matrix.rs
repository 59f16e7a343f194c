use image::{GrayImage, Luma};

// Bit matrix
//------------------------------------------------------------------------------

/// Final boolean module grid, `true` meaning dark. Indexed by `(row, column)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    w: usize,
    h: usize,
    bits: Vec<bool>,
}

impl BitMatrix {
    pub fn new(w: usize, h: usize) -> Self {
        Self { w, h, bits: vec![false; w * h] }
    }

    pub fn square(w: usize) -> Self {
        Self::new(w, w)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        debug_assert!(r < self.h && c < self.w, "Coordinate ({r}, {c}) out of bounds");
        self.bits[r * self.w + c]
    }

    pub fn set(&mut self, r: usize, c: usize, dark: bool) {
        debug_assert!(r < self.h && c < self.w, "Coordinate ({r}, {c}) out of bounds");
        self.bits[r * self.w + c] = dark;
    }

    pub fn flip(&mut self, r: usize, c: usize) {
        let i = r * self.w + c;
        self.bits[i] = !self.bits[i];
    }

    /// Sets every module in the `height` x `width` rectangle whose top left is `(top, left)`.
    pub fn set_region(&mut self, top: usize, left: usize, height: usize, width: usize) {
        debug_assert!(top + height <= self.h && left + width <= self.w, "Region out of bounds");
        for r in top..top + height {
            self.bits[r * self.w + left..r * self.w + left + width].fill(true);
        }
    }

    pub fn count_dark(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.w as u32, self.h as u32, |x, y| {
            if self.get(y as usize, x as usize) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }

    /// Renders rows of `dark`/`light` characters separated by newlines.
    pub fn to_str(&self, dark: char, light: char) -> String {
        let mut res = String::with_capacity(self.h * (self.w + 1));
        for r in 0..self.h {
            for c in 0..self.w {
                res.push(if self.get(r, c) { dark } else { light });
            }
            res.push('\n');
        }
        res
    }
}
