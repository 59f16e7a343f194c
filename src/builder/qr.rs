use std::fmt::{self, Display};

use image::GrayImage;

use super::matrix::{ByteMatrix, Module};
use crate::common::bit_matrix::BitMatrix;
use crate::common::codec::Mode;
use crate::common::error::{QRError, QRResult};
use crate::common::mask::MaskPattern;
use crate::common::metadata::{ECLevel, Version};

// QR
//------------------------------------------------------------------------------

/// A finished symbol: the chosen parameters plus the fully placed module grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    mode: Mode,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
    margin: usize,
    matrix: ByteMatrix,
}

impl QR {
    pub(crate) fn new(
        mode: Mode,
        ecl: ECLevel,
        mask: MaskPattern,
        margin: usize,
        matrix: ByteMatrix,
    ) -> Self {
        Self { mode, ver: matrix.version(), ecl, mask, margin, matrix }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Quiet zone width in modules used by [`QR::to_image`] and [`QR::to_str`].
    pub fn margin(&self) -> usize {
        self.margin
    }

    pub fn width(&self) -> usize {
        self.matrix.width()
    }

    /// Module at `(r, c)`; negative coordinates count from the bottom or right edge.
    pub fn get(&self, r: i16, c: i16) -> Module {
        self.matrix.get(r, c)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.to_bit_matrix().count_dark()
    }

    /// Module grid without quiet zone, one bit per module.
    pub fn to_bit_matrix(&self) -> BitMatrix {
        self.matrix.to_bit_matrix()
    }
}

impl Display for QR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ Mode: {:?}, Version: {}, Ec level: {:?}, Mask: {} }}",
            self.mode, self.ver, self.ecl, *self.mask
        )
    }
}

// Render
//------------------------------------------------------------------------------

impl QR {
    /// Scales the symbol into a `width` x `height` canvas with at least `margin` light modules
    /// on every side. The canvas grows to the symbol's minimum size when requested dimensions
    /// are smaller, modules are scaled by the largest whole factor that fits, and the result
    /// is centered.
    pub fn render(&self, width: usize, height: usize, margin: usize) -> QRResult<BitMatrix> {
        if width == 0 || height == 0 {
            return Err(QRError::invalid_argument(format!(
                "Render dimensions must be positive, got {width}x{height}"
            )));
        }

        let w = self.width();
        let qr_w = w + 2 * margin;
        let out_w = width.max(qr_w);
        let out_h = height.max(qr_w);
        let multiple = (out_w / qr_w).min(out_h / qr_w);
        let left = (out_w - w * multiple) / 2;
        let top = (out_h - w * multiple) / 2;

        let modules = self.to_bit_matrix();
        let mut canvas = BitMatrix::new(out_w, out_h);
        for r in 0..w {
            for c in 0..w {
                if modules.get(r, c) {
                    canvas.set_region(top + r * multiple, left + c * multiple, multiple, multiple);
                }
            }
        }
        Ok(canvas)
    }

    /// Grayscale image with `module_sz` pixels per module and the symbol's margin.
    pub fn to_image(&self, module_sz: usize) -> QRResult<GrayImage> {
        let sz = (self.width() + 2 * self.margin) * module_sz;
        Ok(self.render(sz, sz, self.margin)?.to_image())
    }

    /// Terminal rendering, light modules as blocks so dark-background terminals show a
    /// scannable code.
    pub fn to_str(&self, module_sz: usize) -> QRResult<String> {
        let sz = (self.width() + 2 * self.margin) * module_sz;
        Ok(self.render(sz, sz, self.margin)?.to_str(' ', '█'))
    }
}

#[cfg(test)]
mod render_tests {
    use crate::builder::QRBuilder;
    use crate::common::error::QRError;

    #[test]
    fn test_render_minimum_size() {
        let qr = QRBuilder::new("HELLO WORLD").build().unwrap();
        let w = qr.width();
        let canvas = qr.render(1, 1, 4).unwrap();
        assert_eq!(canvas.width(), w + 8);
        assert_eq!(canvas.height(), w + 8);
        assert_eq!(canvas.count_dark(), qr.count_dark_modules());
        for r in 0..w {
            for c in 0..w {
                assert_eq!(canvas.get(r + 4, c + 4), qr.to_bit_matrix().get(r, c));
            }
        }
    }

    #[test]
    fn test_render_scaled_and_centered() {
        let qr = QRBuilder::new("HELLO WORLD").build().unwrap();
        assert_eq!(qr.width(), 21);
        // 29 modules with margin, 100 / 29 = 3 pixels per module, (100 - 63) / 2 = 18
        let canvas = qr.render(100, 120, 4).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (100, 120));
        assert_eq!(canvas.count_dark(), qr.count_dark_modules() * 9);
        // Top left finder corner
        assert!(canvas.get(28, 18));
        assert!(!canvas.get(27, 18));
        assert!(!canvas.get(28, 17));
        assert!(canvas.get(28 + 62, 18 + 62) == qr.to_bit_matrix().get(20, 20));
    }

    #[test]
    fn test_render_zero_margin() {
        let qr = QRBuilder::new("HELLO WORLD").build().unwrap();
        let canvas = qr.render(21, 21, 0).unwrap();
        assert_eq!(canvas, qr.to_bit_matrix());
    }

    #[test]
    fn test_render_invalid_dimensions() {
        let qr = QRBuilder::new("HELLO WORLD").build().unwrap();
        assert!(matches!(qr.render(0, 10, 4), Err(QRError::InvalidArgument(_))));
        assert!(matches!(qr.render(10, 0, 4), Err(QRError::InvalidArgument(_))));
        assert!(matches!(qr.to_image(0), Err(QRError::InvalidArgument(_))));
    }

    #[test]
    fn test_to_image() {
        let qr = QRBuilder::new("HELLO WORLD").build().unwrap();
        let img = qr.to_image(2).unwrap();
        assert_eq!(img.dimensions(), (58, 58));
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(8, 8).0, [0]);
        assert_eq!(img.get_pixel(9, 9).0, [0]);
    }

    #[test]
    fn test_to_str() {
        let qr = QRBuilder::new("HELLO WORLD").build().unwrap();
        let s = qr.to_str(1).unwrap();
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(lines.len(), 29);
        assert!(lines.iter().all(|l| l.chars().count() == 29));
        assert!(lines[0].chars().all(|c| c == '█'));
        assert_eq!(lines[4].chars().nth(4), Some(' '));
    }
}
