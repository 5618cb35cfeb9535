#![cfg_attr(docsrs, feature(doc_cfg))]

//! Swap store for evicted pages
//! 被驱逐页面的交换存储
//!
//! Storage is split into page-sized slots. An offset is always
//! `slot * page_size`; a page written without an offset gets the
//! lowest free slot.
//! 存储按页大小划分为槽。偏移量恒为 `slot * page_size`；
//! 未指定偏移量的写入分配最小的空闲槽。

mod error;
mod file;
mod mem;
mod slot;

pub use error::{Error, Result};
pub use file::FileSwap;
pub use mem::MemSwap;
pub use slot::Slots;

/// Offset-addressable page store
/// 按偏移量寻址的页存储
pub trait Swap {
  /// Write one page. Reuses `off` when given, otherwise allocates a slot.
  /// Returns the offset the page now lives at.
  /// 写入一页。给定 `off` 时复用，否则分配新槽。返回页面所在偏移量。
  fn write(&mut self, page: &[u8], off: Option<u64>) -> Result<u64>;

  /// Read the page stored at `off` into `buf`
  /// 将 `off` 处的页读入 `buf`
  fn read(&mut self, off: u64, buf: &mut [u8]) -> Result<()>;
}

impl<T: Swap + ?Sized> Swap for Box<T> {
  #[inline]
  fn write(&mut self, page: &[u8], off: Option<u64>) -> Result<u64> {
    (**self).write(page, off)
  }

  #[inline]
  fn read(&mut self, off: u64, buf: &mut [u8]) -> Result<()> {
    (**self).read(off, buf)
  }
}
