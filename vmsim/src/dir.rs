//! Two-level page table
//! 两级页表

use std::fmt;

use log::debug;

use crate::{Layout, Pte};

/// Second-level table
/// 二级页表
#[derive(Debug)]
pub struct Table(Box<[Pte]>);

impl Table {
  /// All entries invalid, not on swap
  /// 所有项无效且不在交换区
  pub fn new(len: usize) -> Self {
    Self(vec![Pte::EMPTY; len].into_boxed_slice())
  }

  #[inline]
  pub fn get(&self, idx: usize) -> &Pte {
    &self.0[idx]
  }

  #[inline]
  pub fn get_mut(&mut self, idx: usize) -> &mut Pte {
    &mut self.0[idx]
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[inline]
  pub fn iter(&self) -> std::slice::Iter<'_, Pte> {
    self.0.iter()
  }
}

/// Page directory, tables allocated on first use and kept for the session
/// 页目录，二级表首次使用时分配并在会话内保留
#[derive(Debug)]
pub struct Dir {
  slots: Box<[Option<Box<Table>>]>,
  tbl_bits: u32,
}

impl Dir {
  pub fn new(layout: Layout) -> Self {
    Self {
      slots: (0..layout.dir_len()).map(|_| None).collect(),
      tbl_bits: layout.tbl_bits,
    }
  }

  /// Directory slots
  /// 页目录槽数
  #[inline]
  pub fn len(&self) -> usize {
    self.slots.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  #[inline]
  pub fn tbl_len(&self) -> usize {
    1 << self.tbl_bits
  }

  /// Allocated tables
  /// 已分配的二级表数
  pub fn tables(&self) -> usize {
    self.slots.iter().filter(|t| t.is_some()).count()
  }

  #[inline]
  pub fn table(&self, idx: usize) -> Option<&Table> {
    self.slots.get(idx)?.as_deref()
  }

  /// Table at `idx`, created if the slot is invalid
  /// 取 `idx` 处的二级表，槽无效时创建
  pub fn table_mut(&mut self, idx: usize) -> &mut Table {
    let len = self.tbl_len();
    self.slots[idx].get_or_insert_with(|| {
      debug!("page table {idx} created");
      Box::new(Table::new(len))
    })
  }

  #[inline]
  fn split(&self, vpn: u64) -> (usize, usize) {
    (
      (vpn >> self.tbl_bits) as usize,
      vpn as usize & (self.tbl_len() - 1),
    )
  }

  /// PTE of a virtual page, without creating tables
  /// 取虚拟页的页表项，不创建二级表
  pub fn pte(&self, vpn: u64) -> Option<&Pte> {
    let (d, t) = self.split(vpn);
    Some(self.table(d)?.get(t))
  }

  pub fn pte_mut(&mut self, vpn: u64) -> Option<&mut Pte> {
    let (d, t) = self.split(vpn);
    Some(self.slots.get_mut(d)?.as_deref_mut()?.get_mut(t))
  }

  /// Textual listing, runs of invalid entries coalesced
  /// 文本列表，合并连续无效项
  #[inline]
  pub fn dump(&self) -> Dump<'_> {
    Dump(self)
  }
}

/// Display adapter for `Dir::dump`
/// `Dir::dump` 的显示适配器
pub struct Dump<'a>(&'a Dir);

impl fmt::Display for Dump<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut run: Option<(usize, usize)> = None;
    for (i, slot) in self.0.slots.iter().enumerate() {
      let Some(table) = slot else {
        run = Some(run.map_or((i, i), |(a, _)| (a, i)));
        continue;
      };
      if let Some((a, b)) = run.take() {
        writeln!(f, "[{a}]: INVALID\n  to\n[{b}]: INVALID")?;
      }
      writeln!(f, "[{i}]: table")?;
      fmt_table(f, table)?;
    }
    if let Some((a, b)) = run {
      writeln!(f, "[{a}]: INVALID\n  to\n[{b}]: INVALID")?;
    }
    Ok(())
  }
}

fn fmt_table(f: &mut fmt::Formatter<'_>, table: &Table) -> fmt::Result {
  let mut run: Option<(usize, usize)> = None;
  for (i, pte) in table.iter().enumerate() {
    if pte.is_untouched() {
      run = Some(run.map_or((i, i), |(a, _)| (a, i)));
      continue;
    }
    if let Some((a, b)) = run.take() {
      writeln!(f, "\t[{a}] - [{b}]: INVALID")?;
    }
    write!(f, "\t[{i}]: ")?;
    match pte.frame() {
      Some(frame) => {
        f.write_str("VALID, ")?;
        if pte.is_dirty() {
          f.write_str("DIRTY, ")?;
        }
        writeln!(f, "in frame {frame}")?;
      }
      None => writeln!(f, "ONSWAP, at offset {}", pte.raw_swap_off())?,
    }
  }
  if let Some((a, b)) = run {
    writeln!(f, "\t[{a}] - [{b}]: INVALID")?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lazy_tables() {
    let l = Layout::new(4, 2, 2);
    let mut dir = Dir::new(l);
    assert_eq!(dir.len(), 4);
    assert_eq!(dir.tables(), 0);
    assert!(dir.table(1).is_none());
    assert!(dir.pte(5).is_none());
    assert!(dir.pte_mut(5).is_none());

    let table = dir.table_mut(1);
    assert_eq!(table.len(), 4);
    assert!(table.iter().all(Pte::is_untouched));
    table.get_mut(1).map(3);

    assert_eq!(dir.tables(), 1);
    // vpn 5 = dir 1, tbl 1
    assert_eq!(dir.pte(5).and_then(Pte::frame), Some(3));
    assert!(dir.pte(99).is_none());
  }

  #[test]
  fn dump_coalesces() {
    let l = Layout::new(4, 2, 2);
    let mut dir = Dir::new(l);
    let table = dir.table_mut(1);
    table.get_mut(1).map(3);
    table.get_mut(1).mark_dirty();
    table.get_mut(2).set_swap(32);

    let out = dir.dump().to_string();
    assert_eq!(
      out,
      "[0]: INVALID\n  to\n[0]: INVALID\n\
       [1]: table\n\
       \t[0] - [0]: INVALID\n\
       \t[1]: VALID, DIRTY, in frame 3\n\
       \t[2]: ONSWAP, at offset 32\n\
       \t[3] - [3]: INVALID\n\
       [2]: INVALID\n  to\n[3]: INVALID\n"
    );
  }
}
