use crate::common::bit_matrix::BitMatrix;
use crate::common::error::{QRError, QRResult};
use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::{FormatInfo, Version, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN};

// Module
//------------------------------------------------------------------------------

/// One cell of the construction grid. `Empty` cells are the ones still open for data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(bool),
    Version(bool),
    Format(bool),
    Data(bool),
}

impl Module {
    pub fn is_dark(self) -> bool {
        match self {
            Module::Empty => false,
            Module::Func(d) | Module::Version(d) | Module::Format(d) | Module::Data(d) => d,
        }
    }
}

// Format & version info coordinates, most significant bit first
//------------------------------------------------------------------------------

pub(crate) static FORMAT_INFO_COORDS_MAIN: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub(crate) static FORMAT_INFO_COORDS_SIDE: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

pub(crate) static VERSION_INFO_COORDS_TR: [(i16, i16); VERSION_INFO_BIT_LEN] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

pub(crate) static VERSION_INFO_COORDS_BL: [(i16, i16); VERSION_INFO_BIT_LEN] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

// Byte matrix
//------------------------------------------------------------------------------

/// Construction grid for one symbol. Negative coordinates count from the far edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteMatrix {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
}

impl ByteMatrix {
    pub fn new(ver: Version) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn clear(&mut self) {
        self.grid.fill(Module::Empty);
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row {r} out of bounds for width {w}");
        debug_assert!(-w <= c && c < w, "Column {c} out of bounds for width {w}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    /// Writes `module` into an empty cell. Rewriting a cell with the same module is a no-op;
    /// anything else is a placement conflict.
    pub fn place(&mut self, r: i16, c: i16, module: Module) -> QRResult<()> {
        let idx = self.coord_to_index(r, c);
        match self.grid[idx] {
            Module::Empty => {
                self.grid[idx] = module;
                Ok(())
            }
            m if m == module => Ok(()),
            m => Err(QRError::internal(format!(
                "Conflicting placement at ({r}, {c}): {m:?} already set, {module:?} requested"
            ))),
        }
    }

    #[cfg(test)]
    pub fn count_empty(&self) -> usize {
        self.grid.iter().filter(|m| matches!(m, Module::Empty)).count()
    }

    pub fn to_bit_matrix(&self) -> BitMatrix {
        let mut res = BitMatrix::square(self.w);
        for (i, m) in self.grid.iter().enumerate() {
            if m.is_dark() {
                res.set(i / self.w, i % self.w, true);
            }
        }
        res
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(true) => 'f',
                    Module::Func(false) => 'F',
                    Module::Version(true) => 'v',
                    Module::Version(false) => 'V',
                    Module::Format(true) => 'm',
                    Module::Format(false) => 'M',
                    Module::Data(true) => 'd',
                    Module::Data(false) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl ByteMatrix {
    pub(crate) fn draw_finder_patterns(&mut self) -> QRResult<()> {
        self.draw_finder_pattern_at(3, 3)?;
        self.draw_finder_pattern_at(3, -4)?;
        self.draw_finder_pattern_at(-4, 3)
    }

    // 7x7 pattern plus its one module separator on the sides facing the symbol
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) -> QRResult<()> {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                let dark = match (i, j) {
                    (4 | -4, _) | (_, 4 | -4) => false,
                    (3 | -3, _) | (_, 3 | -3) => true,
                    (2 | -2, _) | (_, 2 | -2) => false,
                    _ => true,
                };
                self.place(r + i, c + j, Module::Func(dark))?;
            }
        }
        Ok(())
    }

    pub(crate) fn draw_dark_module(&mut self) -> QRResult<()> {
        self.place(-8, 8, Module::Func(true))
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl ByteMatrix {
    pub(crate) fn draw_timing_pattern(&mut self) -> QRResult<()> {
        let last = self.w as i16 - 9;
        self.draw_line(6, 8, 6, last)?;
        self.draw_line(8, 6, last, 6)
    }

    // Alternating line starting dark on even coordinates. Crossing alignment patterns agree
    // with the timing pattern, so rewrites there are accepted by `place`.
    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) -> QRResult<()> {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.place(r1, j, Module::Func(j & 1 == 0))?;
            }
        } else {
            for i in r1..=r2 {
                self.place(i, c1, Module::Func(i & 1 == 0))?;
            }
        }
        Ok(())
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl ByteMatrix {
    pub(crate) fn draw_alignment_patterns(&mut self) -> QRResult<()> {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r as i16, c as i16)?;
            }
        }
        Ok(())
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) -> QRResult<()> {
        let w = self.w as i16;
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return Ok(());
        }
        for i in -2..=2 {
            for j in -2..=2 {
                let dark = matches!((i, j), (-2 | 2, _) | (_, -2 | 2) | (0, 0));
                self.place(r + i, c + j, Module::Func(dark))?;
            }
        }
        Ok(())
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl ByteMatrix {
    /// Finders with separators, dark module, alignment and timing patterns, in that order.
    pub fn draw_all_function_patterns(&mut self) -> QRResult<()> {
        self.draw_finder_patterns()?;
        self.draw_dark_module()?;
        self.draw_alignment_patterns()?;
        self.draw_timing_pattern()
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl ByteMatrix {
    /// Writes both copies of the format word, then reads them back as a decoder would.
    pub(crate) fn draw_format_info(&mut self, info: FormatInfo) -> QRResult<()> {
        let word = info.encode();
        self.draw_number(word, FORMAT_INFO_BIT_LEN, Module::Format, &FORMAT_INFO_COORDS_MAIN)?;
        self.draw_number(word, FORMAT_INFO_BIT_LEN, Module::Format, &FORMAT_INFO_COORDS_SIDE)?;

        let main = self.read_number(&FORMAT_INFO_COORDS_MAIN);
        let side = self.read_number(&FORMAT_INFO_COORDS_SIDE);
        match FormatInfo::decode(main, side) {
            Some(decoded) if decoded == info => Ok(()),
            decoded => Err(QRError::internal(format!(
                "Format info {info:?} written as 0x{word:04X} reads back as {decoded:?}"
            ))),
        }
    }

    /// Writes both version blocks for versions 7 and up and reads them back.
    pub(crate) fn draw_version_info(&mut self) -> QRResult<()> {
        let Some(word) = self.ver.info() else {
            return Ok(());
        };
        self.draw_number(word, VERSION_INFO_BIT_LEN, Module::Version, &VERSION_INFO_COORDS_BL)?;
        self.draw_number(word, VERSION_INFO_BIT_LEN, Module::Version, &VERSION_INFO_COORDS_TR)?;

        for coords in [&VERSION_INFO_COORDS_BL, &VERSION_INFO_COORDS_TR] {
            let read = self.read_number(coords);
            if Version::decode_info(read) != Some(self.ver) {
                return Err(QRError::internal(format!(
                    "Version info 0x{word:05X} of version {} reads back as 0x{read:05X}",
                    self.ver
                )));
            }
        }
        Ok(())
    }

    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        module: fn(bool) -> Module,
        coords: &[(i16, i16)],
    ) -> QRResult<()> {
        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            self.place(r, c, module(number & mask != 0))?;
            mask >>= 1;
        }
        Ok(())
    }

    fn read_number(&self, coords: &[(i16, i16)]) -> u32 {
        coords.iter().fold(0, |acc, &(r, c)| (acc << 1) | self.get(r, c).is_dark() as u32)
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl ByteMatrix {
    /// Fills every empty module in placement order with `codewords`, most significant bit
    /// first, inverting where `mask` holds. Modules past the end of the stream are light
    /// before masking.
    pub(crate) fn draw_payload(&mut self, codewords: &[u8], mask: Option<MaskPattern>) -> QRResult<()> {
        let mask_fn = mask.map(MaskPattern::mask_function);
        let total_bits = codewords.len() << 3;
        let mut bit_idx = 0;
        for (r, c) in EncRegionIter::new(self.ver) {
            let (r, c) = (r as i16, c as i16);
            if self.get(r, c) != Module::Empty {
                continue;
            }
            let mut bit = bit_idx < total_bits && (codewords[bit_idx >> 3] >> (7 - (bit_idx & 7))) & 1 == 1;
            bit_idx += 1;
            if mask_fn.is_some_and(|f| f(r as usize, c as usize)) {
                bit = !bit;
            }
            self.place(r, c, Module::Data(bit))?;
        }

        if bit_idx < total_bits {
            return Err(QRError::internal(format!(
                "Not all data placed: {bit_idx} of {total_bits} bits"
            )));
        }
        Ok(())
    }
}
