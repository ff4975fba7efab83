//! Structural depth tracking, only consulted in Normal lexical mode.

/// Parenthesis, BEGIN/END and CASE/END nesting. All counters clamp at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DepthTracker {
    paren: usize,
    block: usize,
    case: usize,
}

impl DepthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn paren_depth(&self) -> usize {
        self.paren
    }

    #[inline]
    pub fn block_depth(&self) -> usize {
        self.block
    }

    /// Boundaries are only recognized outside parentheses.
    #[inline]
    pub fn at_top_level(&self) -> bool {
        self.paren == 0
    }

    #[inline]
    pub fn in_case(&self) -> bool {
        self.case > 0
    }

    pub fn open_paren(&mut self) {
        self.paren += 1;
    }

    pub fn close_paren(&mut self) {
        self.paren = self.paren.saturating_sub(1);
    }

    pub fn open_block(&mut self) {
        self.block += 1;
    }

    pub fn close_block(&mut self) {
        self.block = self.block.saturating_sub(1);
    }

    pub fn open_case(&mut self) {
        self.case += 1;
    }

    pub fn close_case(&mut self) {
        self.case = self.case.saturating_sub(1);
    }

    /// A statement boundary abandons any CASE expression left open.
    pub fn reset_case(&mut self) {
        self.case = 0;
    }
}
