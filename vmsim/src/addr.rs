//! Virtual address layout
//! 虚拟地址布局
//!
//! ```text
//! | dir_idx (dir_bits) | tbl_idx (tbl_bits) | offset (page_shift) |
//! ```

use crate::consts::{DIR_BITS, PAGE_SHIFT, TBL_BITS};

/// Access type of one reference
/// 单次访问类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  Read,
  Write,
}

impl Access {
  #[inline]
  pub const fn is_write(self) -> bool {
    matches!(self, Self::Write)
  }
}

/// Field widths of a virtual address
/// 虚拟地址各字段位宽
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
  pub page_shift: u32,
  pub tbl_bits: u32,
  pub dir_bits: u32,
}

impl Default for Layout {
  fn default() -> Self {
    Self::new(PAGE_SHIFT, TBL_BITS, DIR_BITS)
  }
}

impl Layout {
  #[inline]
  pub const fn new(page_shift: u32, tbl_bits: u32, dir_bits: u32) -> Self {
    Self {
      page_shift,
      tbl_bits,
      dir_bits,
    }
  }

  /// 地址总位宽 Address width in bits
  #[inline]
  pub const fn width(&self) -> u32 {
    self.page_shift + self.tbl_bits + self.dir_bits
  }

  #[inline]
  pub const fn page_size(&self) -> usize {
    1 << self.page_shift
  }

  /// 页目录槽数 Directory slots
  #[inline]
  pub const fn dir_len(&self) -> usize {
    1 << self.dir_bits
  }

  /// 二级表槽数 Table slots
  #[inline]
  pub const fn tbl_len(&self) -> usize {
    1 << self.tbl_bits
  }

  /// Fits in address width
  /// 是否在地址位宽内
  #[inline]
  pub const fn contains(&self, vaddr: u64) -> bool {
    vaddr >> self.width() == 0
  }

  /// Virtual page number
  /// 虚拟页号
  #[inline]
  pub const fn vpn(&self, vaddr: u64) -> u64 {
    vaddr >> self.page_shift
  }

  #[inline]
  pub const fn dir_idx(&self, vaddr: u64) -> usize {
    (self.vpn(vaddr) >> self.tbl_bits) as usize & (self.dir_len() - 1)
  }

  #[inline]
  pub const fn tbl_idx(&self, vaddr: u64) -> usize {
    self.vpn(vaddr) as usize & (self.tbl_len() - 1)
  }

  #[inline]
  pub const fn offset(&self, vaddr: u64) -> usize {
    vaddr as usize & (self.page_size() - 1)
  }

  /// Page-aligned base of vaddr
  /// 页对齐基址
  #[inline]
  pub const fn base(&self, vaddr: u64) -> u64 {
    vaddr & !(self.page_size() as u64 - 1)
  }

  /// Base address of a virtual page
  /// 虚拟页的基址
  #[inline]
  pub const fn vaddr(&self, vpn: u64) -> u64 {
    vpn << self.page_shift
  }
}
