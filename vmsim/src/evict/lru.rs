//! LRU: evict least recently referenced frame
//! LRU：驱逐最近最少访问的帧
//!
//! # Complexity
//! 复杂度
//!
//! - on_ref: O(1)
//! - victim: O(1)
//!
//! Based on hashlink::LruCache keyed by frame number.
//! 基于以帧号为键的 hashlink::LruCache。

use hashlink::LruCache;

use super::{Evict, View};
use crate::Access;

pub struct Lru(LruCache<usize, ()>);

impl Lru {
  /// Create for `frames` frames (min 1)
  /// 为 `frames` 个帧创建（最小 1）
  #[inline]
  pub fn new(frames: usize) -> Self {
    Self(LruCache::new(frames.max(1)))
  }
}

impl Evict for Lru {
  #[inline]
  fn on_ref(&mut self, frame: usize, _: Access) {
    // get moves to most recent
    // get 会移到最近使用端
    if self.0.get(&frame).is_none() {
      self.0.insert(frame, ());
    }
  }

  #[inline]
  fn victim(&mut self, view: &View<'_>) -> usize {
    match self.0.remove_lru() {
      Some((frame, ())) => frame,
      None => view.core().iter().next().map_or(0, |(frame, _)| frame),
    }
  }
}
