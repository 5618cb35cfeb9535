//! In-memory swap
//! 内存交换区

use log::trace;

use crate::{
  Result, Slots, Swap,
  slot::{check_len, slot_of},
};

/// Swap kept in a growable buffer, counts I/O for inspection
/// 基于可增长缓冲区的交换区，统计 I/O 次数便于检查
#[derive(Debug)]
pub struct MemSwap {
  buf: Vec<u8>,
  slots: Slots,
  page_size: usize,
  writes: u64,
  reads: u64,
}

impl MemSwap {
  /// Create with page size and slot count
  /// 指定页大小与槽数创建
  pub fn new(page_size: usize, slots: usize) -> Self {
    Self {
      buf: Vec::new(),
      slots: Slots::new(slots),
      page_size,
      writes: 0,
      reads: 0,
    }
  }

  #[inline]
  pub fn page_size(&self) -> usize {
    self.page_size
  }

  /// Page writes so far
  /// 已写入页数
  #[inline]
  pub fn writes(&self) -> u64 {
    self.writes
  }

  /// Page reads so far
  /// 已读取页数
  #[inline]
  pub fn reads(&self) -> u64 {
    self.reads
  }

  /// Slots in use
  /// 已用槽数
  #[inline]
  pub fn used(&self) -> usize {
    self.slots.used()
  }
}

impl Swap for MemSwap {
  fn write(&mut self, page: &[u8], off: Option<u64>) -> Result<u64> {
    check_len(self.page_size, page.len())?;
    let slot = match off {
      Some(off) => slot_of(&self.slots, self.page_size, off)?,
      None => self.slots.alloc()?,
    };
    let start = slot * self.page_size;
    let end = start + self.page_size;
    if self.buf.len() < end {
      self.buf.resize(end, 0);
    }
    self.buf[start..end].copy_from_slice(page);
    self.writes += 1;
    trace!("mem swap write slot={slot}");
    Ok(start as u64)
  }

  fn read(&mut self, off: u64, buf: &mut [u8]) -> Result<()> {
    check_len(self.page_size, buf.len())?;
    let slot = slot_of(&self.slots, self.page_size, off)?;
    let start = slot * self.page_size;
    buf.copy_from_slice(&self.buf[start..start + self.page_size]);
    self.reads += 1;
    trace!("mem swap read slot={slot}");
    Ok(())
  }
}
