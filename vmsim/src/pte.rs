//! Page table entry
//! 页表项

use crate::consts::{DIRTY, INVALID_SWAP, ON_SWAP, VALID};

/// One virtual page: frame number, flag bits and swap offset
/// 单个虚拟页：帧号、标志位与交换区偏移
///
/// | VALID | ON_SWAP | state                          |
/// |-------|---------|--------------------------------|
/// | 0     | 0       | never touched 从未访问         |
/// | 1     | 0       | resident 驻留                  |
/// | 0     | 1       | evicted 已换出                 |
/// | 1     | 1       | resident with swap copy 驻留且有交换副本 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pte {
  frame: u32,
  flag: u8,
  swap_off: u64,
}

impl Default for Pte {
  fn default() -> Self {
    Self::EMPTY
  }
}

impl Pte {
  pub const EMPTY: Self = Self {
    frame: 0,
    flag: 0,
    swap_off: INVALID_SWAP,
  };

  #[inline]
  pub const fn flag(&self) -> u8 {
    self.flag
  }

  #[inline]
  pub const fn is_valid(&self) -> bool {
    self.flag & VALID != 0
  }

  #[inline]
  pub const fn is_dirty(&self) -> bool {
    self.flag & DIRTY != 0
  }

  #[inline]
  pub const fn on_swap(&self) -> bool {
    self.flag & ON_SWAP != 0
  }

  /// Neither resident nor on swap
  /// 既未驻留也不在交换区
  #[inline]
  pub const fn is_untouched(&self) -> bool {
    self.flag & (VALID | ON_SWAP) == 0
  }

  /// Frame number, only while resident
  /// 帧号，仅驻留时有效
  #[inline]
  pub const fn frame(&self) -> Option<usize> {
    if self.is_valid() {
      Some(self.frame as usize)
    } else {
      None
    }
  }

  /// Swap offset, only once written to swap
  /// 交换区偏移，仅写入交换区后有效
  #[inline]
  pub const fn swap_off(&self) -> Option<u64> {
    if self.on_swap() {
      Some(self.swap_off)
    } else {
      None
    }
  }

  /// Raw swap offset, `INVALID_SWAP` if never written
  /// 原始交换区偏移，从未写入则为 `INVALID_SWAP`
  #[inline]
  pub const fn raw_swap_off(&self) -> u64 {
    self.swap_off
  }

  #[inline]
  pub(crate) fn map(&mut self, frame: usize) {
    self.frame = frame as u32;
    self.flag |= VALID;
  }

  #[inline]
  pub(crate) fn unmap(&mut self) {
    self.flag &= !VALID;
  }

  #[inline]
  pub(crate) fn mark_dirty(&mut self) {
    debug_assert!(self.is_valid());
    self.flag |= DIRTY;
  }

  #[inline]
  pub(crate) fn clean(&mut self) {
    self.flag &= !DIRTY;
  }

  #[inline]
  pub(crate) fn set_swap(&mut self, off: u64) {
    self.swap_off = off;
    self.flag |= ON_SWAP;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lifecycle() {
    let mut pte = Pte::default();
    assert!(pte.is_untouched());
    assert_eq!(pte.frame(), None);
    assert_eq!(pte.swap_off(), None);
    assert_eq!(pte.raw_swap_off(), INVALID_SWAP);

    pte.map(7);
    pte.mark_dirty();
    assert_eq!(pte.frame(), Some(7));
    assert!(pte.is_dirty());

    pte.unmap();
    pte.clean();
    pte.set_swap(4096);
    assert_eq!(pte.frame(), None);
    assert!(!pte.is_dirty());
    assert_eq!(pte.swap_off(), Some(4096));
    assert!(!pte.is_untouched());

    pte.map(2);
    assert_eq!(pte.flag(), VALID | ON_SWAP);
  }
}
