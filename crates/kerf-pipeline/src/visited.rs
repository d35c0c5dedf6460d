//! Per-pass visited tracking.
//!
//! Each traversal pass (outline tracing, region filling) owns exactly
//! one [`VisitedSet`] for its lifetime. The set is passed by mutable
//! reference into the seed-finding scan and the walk/fill routines and
//! discarded when the pass ends, so no visited state is ever shared
//! between passes.

/// A boolean grid tracking which pixels a traversal pass has consumed.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    width: u32,
    cells: Vec<bool>,
}

impl VisitedSet {
    /// Create a set covering a `width` x `height` grid, all unvisited.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            cells: vec![false; width as usize * height as usize],
        }
    }

    const fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns `true` if the pixel has already been consumed.
    #[must_use]
    pub fn visited(&self, x: u32, y: u32) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Mark a pixel as consumed.
    pub fn mark(&mut self, x: u32, y: u32) {
        let idx = self.index(x, y);
        self.cells[idx] = true;
    }
}
