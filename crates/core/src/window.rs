use std::collections::VecDeque;

/// Bounded FIFO of recent low-overlap rejections, one entry per query.
/// Owned by whoever orchestrates retrieval; intentionally not a global.
/// Per process only, so in a multi-worker deployment each worker keeps
/// its own soft signal.
#[derive(Debug, Clone)]
pub struct LowOverlapWindow {
    entries: VecDeque<bool>,
    capacity: usize,
}

impl LowOverlapWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, is_low_overlap: bool) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(is_low_overlap);
    }

    /// Fraction of recorded queries that hit a low-overlap rejection,
    /// 0.0 while the window is empty.
    pub fn rate(&self) -> f32 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let hits = self.entries.iter().filter(|v| **v).count();
        hits as f32 / self.entries.len() as f32
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_rate_is_zero() {
        assert_eq!(LowOverlapWindow::new(50).rate(), 0.0);
    }

    #[test]
    fn rate_counts_true_entries() {
        let mut window = LowOverlapWindow::new(50);
        for i in 0..50 {
            window.push(i < 13);
        }
        assert!((window.rate() - 0.26).abs() < 1e-6);
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let mut window = LowOverlapWindow::new(3);
        window.push(true);
        window.push(false);
        window.push(false);
        window.push(false);
        assert_eq!(window.len(), 3);
        assert_eq!(window.rate(), 0.0);
    }
}
