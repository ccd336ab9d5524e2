/// A border type for filters that read outside of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingMode {
    /// This border type fills the border with zeros.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    Constant,

    /// This border type takes the outermost row or column of pixels and repeats it
    /// into the padded region.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// This border type reflects the pixel values at the boundary, starting with the
    /// pixel 'next' to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    #[default]
    Reflect101,

    /// This border type reflects the pixel values at the boundary, starting with the
    /// edge pixel itself.
    ///
    /// Example: ...d c b a | a b c d...
    Reflect,

    /// This border type wraps the content from the opposite side to fill the border.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

impl PaddingMode {
    #[inline]
    fn reflect(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i - 1;
            } else if i >= len {
                i = 2 * len - i - 1;
            }
        }
        i as usize
    }

    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i;
            } else if i >= len {
                i = 2 * len - i - 2;
            }
        }
        i as usize
    }

    #[inline]
    fn wrap(i: isize, len: usize) -> usize {
        ((i % len as isize + len as isize) % len as isize) as usize
    }

    /// Maps index `i` to a valid index i.e. within `[0, len)` according to the padding mode.
    ///
    /// - `Replicate`: clamp to edge
    /// - `Reflect`: mirror including edge
    /// - `Reflect101`: mirror excluding edge
    /// - `Wrap`: circular wrap
    /// - `Constant`: `None` for any index outside of `[0, len)`
    ///
    /// # Arguments
    /// - `i`: The (possibly out-of-range) coordinate index.
    /// - `len`: The valid length of the dimension, must be non-zero.
    ///
    /// # Returns
    /// A valid mapped index within `[0, len)`, or `None` if the sample is a constant zero.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            PaddingMode::Constant => None,
            PaddingMode::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
            PaddingMode::Reflect => Some(Self::reflect(i, len)),
            PaddingMode::Reflect101 => Some(Self::reflect101(i, len)),
            PaddingMode::Wrap => Some(Self::wrap(i, len)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(mode: PaddingMode, range: std::ops::Range<isize>, len: usize) -> Vec<Option<usize>> {
        range.map(|i| mode.map_index(i, len)).collect()
    }

    #[test]
    fn test_map_index_reflect101() {
        assert_eq!(
            mapped(PaddingMode::Reflect101, -3..7, 4),
            [3, 2, 1, 0, 1, 2, 3, 2, 1, 0].map(Some).to_vec()
        );
    }

    #[test]
    fn test_map_index_reflect() {
        assert_eq!(
            mapped(PaddingMode::Reflect, -3..7, 4),
            [2, 1, 0, 0, 1, 2, 3, 3, 2, 1].map(Some).to_vec()
        );
    }

    #[test]
    fn test_map_index_replicate_and_wrap() {
        assert_eq!(
            mapped(PaddingMode::Replicate, -2..6, 4),
            [0, 0, 0, 1, 2, 3, 3, 3].map(Some).to_vec()
        );
        assert_eq!(
            mapped(PaddingMode::Wrap, -2..6, 4),
            [2, 3, 0, 1, 2, 3, 0, 1].map(Some).to_vec()
        );
    }

    #[test]
    fn test_map_index_constant() {
        assert_eq!(
            mapped(PaddingMode::Constant, -1..5, 4),
            vec![None, Some(0), Some(1), Some(2), Some(3), None]
        );
    }

    #[test]
    fn test_map_index_longer_than_signal() {
        // a kernel wider than the image keeps bouncing between the borders
        assert_eq!(PaddingMode::Reflect101.map_index(-5, 3), Some(1));
        assert_eq!(PaddingMode::Reflect101.map_index(9, 3), Some(1));
        assert_eq!(PaddingMode::Reflect101.map_index(4, 1), Some(0));
    }
}
