//! File-backed swap with positional I/O
//! 基于文件的交换区，使用定位读写

use std::{
  fs::{File, OpenOptions},
  path::Path,
};

use log::{debug, trace};

use crate::{
  Error, Result, Slots, Swap,
  slot::{check_len, slot_of},
};

/// Swap file of `slots` page-sized slots
/// 由 `slots` 个页大小槽组成的交换文件
#[derive(Debug)]
pub struct FileSwap {
  file: File,
  slots: Slots,
  page_size: usize,
}

impl FileSwap {
  /// Create a new swap file sized to hold every slot, fails if the path exists
  /// 新建交换文件并预设容纳全部槽的大小，路径已存在则失败
  pub fn create(path: impl AsRef<Path>, page_size: usize, slots: usize) -> Result<Self> {
    let path = path.as_ref();
    let len = (page_size as u64)
      .checked_mul(slots as u64)
      .ok_or(Error::Cap { page_size, slots })?;
    let file = OpenOptions::new()
      .read(true)
      .write(true)
      .create_new(true)
      .open(path)?;
    file.set_len(len)?;
    debug!("swap file {} slots={slots} page={page_size}", path.display());
    Ok(Self {
      file,
      slots: Slots::new(slots),
      page_size,
    })
  }

  /// Slots in use
  /// 已用槽数
  #[inline]
  pub fn used(&self) -> usize {
    self.slots.used()
  }

  /// Slot capacity
  /// 槽容量
  #[inline]
  pub fn cap(&self) -> usize {
    self.slots.cap()
  }
}

impl Swap for FileSwap {
  fn write(&mut self, page: &[u8], off: Option<u64>) -> Result<u64> {
    check_len(self.page_size, page.len())?;
    let slot = match off {
      Some(off) => slot_of(&self.slots, self.page_size, off)?,
      None => self.slots.alloc()?,
    };
    let pos = (slot * self.page_size) as u64;
    if let Err(e) = os::write_at(&self.file, page, pos) {
      // Fresh slot never held data
      // 新分配的槽未写入任何数据
      if off.is_none() {
        self.slots.free(slot);
      }
      return Err(e.into());
    }
    trace!("file swap write slot={slot}");
    Ok(pos)
  }

  fn read(&mut self, off: u64, buf: &mut [u8]) -> Result<()> {
    check_len(self.page_size, buf.len())?;
    slot_of(&self.slots, self.page_size, off)?;
    os::read_at(&self.file, buf, off)?;
    trace!("file swap read off={off}");
    Ok(())
  }
}

#[cfg(unix)]
mod os {
  use std::{fs::File, io, os::unix::fs::FileExt};

  #[inline]
  pub fn write_at(file: &File, buf: &[u8], pos: u64) -> io::Result<()> {
    file.write_all_at(buf, pos)
  }

  #[inline]
  pub fn read_at(file: &File, buf: &mut [u8], pos: u64) -> io::Result<()> {
    file.read_exact_at(buf, pos)
  }
}

#[cfg(windows)]
mod os {
  use std::{fs::File, io, os::windows::fs::FileExt};

  pub fn write_at(file: &File, mut buf: &[u8], mut pos: u64) -> io::Result<()> {
    while !buf.is_empty() {
      match file.seek_write(buf, pos)? {
        0 => return Err(io::ErrorKind::WriteZero.into()),
        n => {
          buf = &buf[n..];
          pos += n as u64;
        }
      }
    }
    Ok(())
  }

  pub fn read_at(file: &File, mut buf: &mut [u8], mut pos: u64) -> io::Result<()> {
    while !buf.is_empty() {
      match file.seek_read(buf, pos)? {
        0 => return Err(io::ErrorKind::UnexpectedEof.into()),
        n => {
          buf = &mut std::mem::take(&mut buf)[n..];
          pos += n as u64;
        }
      }
    }
    Ok(())
  }
}
