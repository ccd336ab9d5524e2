/// A morphological structuring element.
///
/// The kernel stores a binary mask where 1 indicates pixels included in the
/// operation and 0 indicates excluded pixels. The only element in use is the
/// 3x3 box returned by [`Kernel::default`].
///
/// # Example
///
/// ```rust
/// use cornerstone_imgproc::morphology::Kernel;
///
/// let kernel = Kernel::default();
/// assert_eq!(kernel.width(), 3);
/// assert_eq!(kernel.height(), 3);
/// assert_eq!(kernel.pad(), (1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Get a reference to the kernel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the padding for the kernel (offset from center).
    pub fn pad(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }
}

impl Default for Kernel {
    /// The 3x3 box used for local maximum search.
    fn default() -> Self {
        Self {
            data: vec![1u8; 9],
            width: 3,
            height: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_3x3_box() {
        let kernel = Kernel::default();
        assert_eq!(kernel.data(), &[1u8; 9]);
        assert_eq!((kernel.width(), kernel.height()), (3, 3));
        assert_eq!(kernel.pad(), (1, 1));
    }
}
