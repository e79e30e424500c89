use alloc::vec::Vec;

/// Row-major sample grid. Row 0 is the top of the image, column 0 the left edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster<S> {
    width: usize,
    height: usize,
    samples: Vec<S>,
}

impl<S: Copy> Raster<S> {
    /// A `width` x `height` raster filled with `fill`.
    ///
    /// Returns `None` if the sample buffer cannot be sized or allocated.
    pub fn filled(width: usize, height: usize, fill: S) -> Option<Self> {
        let len = width.checked_mul(height)?;
        len.checked_mul(core::mem::size_of::<S>())?;
        let mut samples = Vec::new();
        samples.try_reserve_exact(len).ok()?;
        samples.resize(len, fill);
        Some(Self {
            width,
            height,
            samples,
        })
    }

    /// Wrap row-major samples. Returns `None` if the length is not `width * height`.
    pub fn from_vec(width: usize, height: usize, samples: Vec<S>) -> Option<Self> {
        (width.checked_mul(height)? == samples.len()).then_some(Self {
            width,
            height,
            samples,
        })
    }

    /// Build from a sequence of rows. Returns `None` if any row is not `width` long.
    pub fn from_rows(width: usize, rows: &[Vec<S>]) -> Option<Self> {
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let samples: Vec<S> = rows.iter().flatten().copied().collect();
        Some(Self {
            width,
            height: rows.len(),
            samples,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<S> {
        self.samples
    }

    pub fn get(&self, x: usize, y: usize) -> Option<S> {
        if x < self.width && y < self.height {
            Some(self.samples[y * self.width + x])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut S> {
        if x < self.width && y < self.height {
            Some(&mut self.samples[y * self.width + x])
        } else {
            None
        }
    }

    pub fn row(&self, y: usize) -> Option<&[S]> {
        let start = y.checked_mul(self.width)?;
        self.samples.get(start..start.checked_add(self.width)?)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[S]> {
        // chunks_exact(0) panics
        self.samples.chunks_exact(self.width.max(1))
    }

    pub fn rows_mut(&mut self) -> impl ExactSizeIterator<Item = &mut [S]> {
        self.samples.chunks_exact_mut(self.width.max(1))
    }

    pub(crate) fn map<T: Copy>(&self, f: impl FnMut(&S) -> T) -> Raster<T> {
        Raster {
            width: self.width,
            height: self.height,
            samples: self.samples.iter().map(f).collect(),
        }
    }

    pub(crate) fn for_each_mut(&mut self, f: impl FnMut(&mut S)) {
        self.samples.iter_mut().for_each(f);
    }

    /// Mirror horizontally: reverse each row in place.
    pub fn flip(&mut self) {
        for row in self.rows_mut() {
            row.reverse();
        }
    }

    /// Mirror vertically: reverse the row order in place.
    pub fn flop(&mut self) {
        let w = self.width;
        let h = self.height;
        for top in 0..h / 2 {
            let bottom = h - 1 - top;
            let (upper, lower) = self.samples.split_at_mut(bottom * w);
            upper[top * w..(top + 1) * w].swap_with_slice(&mut lower[..w]);
        }
    }

    /// Rotate 90° clockwise into a new `height` x `width` raster.
    ///
    /// Output row `i`, column `j` is input row `height - 1 - j`, column `i`.
    pub fn rotated_90_cw(&self) -> Self {
        let (w, h) = (self.width, self.height);
        let mut samples = Vec::with_capacity(self.samples.len());
        for i in 0..w {
            for j in 0..h {
                samples.push(self.samples[(h - 1 - j) * w + i]);
            }
        }
        Self {
            width: h,
            height: w,
            samples,
        }
    }
}
