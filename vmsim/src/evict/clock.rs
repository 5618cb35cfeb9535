//! Clock: second chance with one reference bit per frame
//! 时钟算法：每帧一个访问位的二次机会

use super::{Evict, View};
use crate::Access;

pub struct Clock {
  refd: Vec<bool>,
  hand: usize,
}

impl Clock {
  pub fn new(frames: usize) -> Self {
    Self {
      refd: vec![false; frames],
      hand: 0,
    }
  }
}

impl Evict for Clock {
  #[inline]
  fn on_ref(&mut self, frame: usize, _: Access) {
    if let Some(r) = self.refd.get_mut(frame) {
      *r = true;
    }
  }

  fn victim(&mut self, view: &View<'_>) -> usize {
    let len = self.refd.len().min(view.len());
    if len == 0 {
      return 0;
    }
    // Two sweeps clear every bit, so a victim is always found
    // 两轮扫描必然清空所有访问位，因此一定能找到牺牲帧
    for _ in 0..2 * len {
      let frame = self.hand;
      self.hand = (self.hand + 1) % len;
      if !view.in_use(frame) {
        continue;
      }
      if self.refd[frame] {
        self.refd[frame] = false;
      } else {
        return frame;
      }
    }
    self.hand
  }
}
