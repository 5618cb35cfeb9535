//! FIFO: evict in load order
//! FIFO：按装入顺序驱逐
//!
//! - on_load: O(1)
//! - victim: O(1)

use std::collections::VecDeque;

use super::{Evict, View};

#[derive(Debug, Default)]
pub struct Fifo(VecDeque<usize>);

impl Evict for Fifo {
  #[inline]
  fn on_load(&mut self, frame: usize) {
    self.0.push_back(frame);
  }

  #[inline]
  fn victim(&mut self, view: &View<'_>) -> usize {
    self
      .0
      .pop_front()
      .or_else(|| view.core().iter().next().map(|(frame, _)| frame))
      .unwrap_or_default()
  }
}
