use std::collections::VecDeque;

/// Rolling window of recent scroll offsets, newest first.
///
/// The window reports a stall only once it has been filled by real
/// observations that are all equal.
#[derive(Debug, Clone)]
pub struct OffsetHistory {
    window: usize,
    offsets: VecDeque<i64>,
}

impl OffsetHistory {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            offsets: VecDeque::with_capacity(window),
        }
    }

    pub fn push(&mut self, offset: i64) {
        self.offsets.push_front(offset);
        self.offsets.truncate(self.window);
    }

    pub fn is_stalled(&self) -> bool {
        if self.window == 0 || self.offsets.len() < self.window {
            return false;
        }
        let newest = self.offsets[0];
        self.offsets.iter().all(|&o| o == newest)
    }

    pub fn reset(&mut self) {
        self.offsets.clear();
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Offsets currently tracked, newest first
    pub fn recent(&self) -> impl Iterator<Item = i64> + '_ {
        self.offsets.iter().copied()
    }
}
