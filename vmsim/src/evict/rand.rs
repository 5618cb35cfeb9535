//! Random: uniform victim from a seeded generator
//! 随机：由带种子的生成器均匀选择牺牲帧

use fastrand::Rng;

use super::{Evict, View};

pub struct Rand(Rng);

impl Rand {
  /// Same seed, same victims
  /// 相同种子产生相同的牺牲帧序列
  #[inline]
  pub fn new(seed: u64) -> Self {
    Self(Rng::with_seed(seed))
  }
}

impl Evict for Rand {
  #[inline]
  fn victim(&mut self, view: &View<'_>) -> usize {
    if view.is_empty() {
      return 0;
    }
    self.0.usize(..view.len())
  }
}
