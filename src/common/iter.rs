use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

const VERT_TIMING_COL: usize = 6;

/// Walks every module outside the vertical timing column in placement order: column pairs from
/// the right edge, right module before left, alternating upward and downward sweeps.
pub struct EncRegionIter {
    r: usize,
    // Right column of the current pair
    c: usize,
    w: usize,
    left: bool,
    upward: bool,
    done: bool,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width();
        Self { r: w - 1, c: w - 1, w, left: false, upward: true, done: false }
    }
}

impl Iterator for EncRegionIter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = (self.r, self.c - self.left as usize);

        if !self.left {
            self.left = true;
            return Some(res);
        }
        self.left = false;

        let at_edge = if self.upward { self.r == 0 } else { self.r == self.w - 1 };
        if !at_edge {
            if self.upward {
                self.r -= 1;
            } else {
                self.r += 1;
            }
            return Some(res);
        }

        self.upward = !self.upward;
        if self.c < 2 {
            self.done = true;
        } else {
            self.c -= 2;
            if self.c == VERT_TIMING_COL {
                self.c -= 1;
            }
        }
        Some(res)
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::EncRegionIter;
    use crate::common::metadata::Version;

    #[test]
    fn test_start_sequence() {
        let v1 = Version::new(1).unwrap();
        let coords: Vec<_> = EncRegionIter::new(v1).take(6).collect();
        assert_eq!(coords, [(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
    }

    #[test]
    fn test_turn_at_top() {
        let v1 = Version::new(1).unwrap();
        let coords: Vec<_> = EncRegionIter::new(v1).skip(40).take(4).collect();
        assert_eq!(coords, [(0, 20), (0, 19), (0, 18), (0, 17)]);
    }

    #[test]
    fn test_skips_timing_column() {
        for v in [1, 7, 40] {
            let ver = Version::new(v).unwrap();
            let w = ver.width();
            let coords: Vec<_> = EncRegionIter::new(ver).collect();
            assert_eq!(coords.len(), w * (w - 1));
            assert!(coords.iter().all(|&(_, c)| c != 6));
            let unique: HashSet<_> = coords.iter().collect();
            assert_eq!(unique.len(), coords.len());
            assert_eq!(coords.last(), Some(&(w - 1, 0)));
        }
    }

    #[test]
    fn test_data_modules_match_codewords() {
        for ver in Version::all() {
            let fp = ver.function_pattern();
            let data_modules = EncRegionIter::new(ver).filter(|&(r, c)| !fp.get(r, c)).count();
            assert_eq!(data_modules / 8, ver.total_codewords(), "Version {ver}");
            // Remainder bits
            assert!(matches!(data_modules % 8, 0 | 3 | 4 | 7), "Version {ver}");
        }
    }
}
