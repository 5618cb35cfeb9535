//! Slot bitmap
//! 槽位图

use crate::{Error, Result};

/// Fixed-size slot allocator, lowest free slot first
/// 固定大小槽分配器，优先最小空闲槽
#[derive(Debug, Clone)]
pub struct Slots {
  bits: Vec<u64>,
  cap: usize,
  used: usize,
}

impl Slots {
  pub fn new(cap: usize) -> Self {
    Self {
      bits: vec![0; cap.div_ceil(64)],
      cap,
      used: 0,
    }
  }

  #[inline]
  pub fn cap(&self) -> usize {
    self.cap
  }

  #[inline]
  pub fn used(&self) -> usize {
    self.used
  }

  #[inline]
  pub fn is_used(&self, slot: usize) -> bool {
    slot < self.cap && self.bits[slot / 64] & (1 << (slot % 64)) != 0
  }

  /// Take lowest free slot
  /// 取最小空闲槽
  pub fn alloc(&mut self) -> Result<usize> {
    for (i, word) in self.bits.iter_mut().enumerate() {
      if *word == u64::MAX {
        continue;
      }
      let slot = i * 64 + word.trailing_ones() as usize;
      if slot >= self.cap {
        break;
      }
      *word |= 1 << (slot % 64);
      self.used += 1;
      return Ok(slot);
    }
    Err(Error::Full)
  }

  /// Release slot, no-op if already free
  /// 释放槽，已空闲则忽略
  pub fn free(&mut self, slot: usize) {
    if self.is_used(slot) {
      self.bits[slot / 64] &= !(1 << (slot % 64));
      self.used -= 1;
    }
  }
}

/// Map an offset back to its slot, checking alignment and allocation
/// 偏移量转槽号，检查对齐与分配状态
pub(crate) fn slot_of(slots: &Slots, page_size: usize, off: u64) -> Result<usize> {
  let size = page_size as u64;
  if off % size != 0 {
    return Err(Error::Offset(off));
  }
  let slot = (off / size) as usize;
  if !slots.is_used(slot) {
    return Err(Error::Offset(off));
  }
  Ok(slot)
}

/// Validate page length
/// 校验页长度
#[inline]
pub(crate) fn check_len(page_size: usize, got: usize) -> Result<()> {
  if got != page_size {
    return Err(Error::Size {
      expect: page_size,
      got,
    });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn alloc_lowest_first() {
    let mut s = Slots::new(130);
    for i in 0..130 {
      assert_eq!(s.alloc().ok(), Some(i));
    }
    assert!(matches!(s.alloc(), Err(Error::Full)));
    s.free(65);
    s.free(3);
    assert_eq!(s.alloc().ok(), Some(3));
    assert_eq!(s.alloc().ok(), Some(65));
    assert_eq!(s.used(), 130);
  }
}
