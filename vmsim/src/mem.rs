//! Simulated physical memory
//! 模拟物理内存

use crate::consts::STAMP_OFF;

const STAMP_END: usize = STAMP_OFF + size_of::<u64>();

/// Flat buffer of `frames * page_size` bytes
/// `frames * page_size` 字节的平坦缓冲区
#[derive(Debug)]
pub struct Mem {
  buf: Box<[u8]>,
  page_size: usize,
}

impl Mem {
  pub fn new(frames: usize, page_size: usize) -> Self {
    debug_assert!(page_size >= STAMP_END);
    Self {
      buf: vec![0; frames * page_size].into_boxed_slice(),
      page_size,
    }
  }

  #[inline]
  pub fn page_size(&self) -> usize {
    self.page_size
  }

  #[inline]
  pub fn frame(&self, frame: usize) -> &[u8] {
    let start = frame * self.page_size;
    &self.buf[start..start + self.page_size]
  }

  #[inline]
  pub fn frame_mut(&mut self, frame: usize) -> &mut [u8] {
    let start = frame * self.page_size;
    &mut self.buf[start..start + self.page_size]
  }

  #[inline]
  pub fn as_slice(&self) -> &[u8] {
    &self.buf
  }

  #[inline]
  pub fn as_mut_slice(&mut self) -> &mut [u8] {
    &mut self.buf
  }

  /// Zero the frame and stamp the owning page address
  /// 清零帧并写入所属页地址标记
  pub fn init_frame(&mut self, frame: usize, vaddr: u64) {
    let page = self.frame_mut(frame);
    page.fill(0);
    page[STAMP_OFF..STAMP_END].copy_from_slice(&vaddr.to_le_bytes());
  }

  /// Page address stamped by `init_frame`
  /// `init_frame` 写入的页地址标记
  pub fn stamp(&self, frame: usize) -> u64 {
    let mut b = [0u8; size_of::<u64>()];
    b.copy_from_slice(&self.frame(frame)[STAMP_OFF..STAMP_END]);
    u64::from_le_bytes(b)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn init_zeroes_and_stamps() {
    let mut mem = Mem::new(2, 16);
    mem.frame_mut(1).fill(0xff);
    mem.init_frame(1, 0xabc0);
    assert_eq!(mem.stamp(1), 0xabc0);
    let page = mem.frame(1);
    assert!(page[..STAMP_OFF].iter().all(|&b| b == 0));
    assert!(page[STAMP_END..].iter().all(|&b| b == 0));
    assert!(mem.frame(0).iter().all(|&b| b == 0));
  }
}
