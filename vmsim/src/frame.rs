//! Frame allocation and eviction
//! 帧分配与驱逐

use log::debug;
use vmsim_swap::Swap;

use crate::{
  Error, Result, Sim,
  evict::{Evict, View},
};

impl<E: Evict, S: Swap> Sim<E, S> {
  /// Frame for the page `vpn`, evicting a victim when the pool is full.
  /// The core map entry is owned by `vpn` afterwards.
  /// 为虚拟页 `vpn` 分配帧，内存池满时驱逐牺牲帧。之后核心映射表项归 `vpn` 所有。
  pub(crate) fn alloc_frame(&mut self, vpn: u64) -> Result<usize> {
    let frame = match self.core.free() {
      Some(frame) => frame,
      None => {
        let frame = self.evict.victim(&View::new(&self.core, &self.dir));
        self.evict_frame(frame)?;
        frame
      }
    };
    self.core.set(frame, vpn);
    Ok(frame)
  }

  /// Unmap the victim, writing it to swap unless a clean copy is already there
  /// 解除牺牲帧映射，除非交换区已有干净副本，否则写回交换区
  fn evict_frame(&mut self, frame: usize) -> Result<()> {
    let vpn = self.core.owner(frame).ok_or(Error::Victim(frame))?;
    let pte = match self.dir.pte_mut(vpn) {
      Some(pte) if pte.frame() == Some(frame) => pte,
      _ => return Err(Error::Victim(frame)),
    };

    let dirty = pte.is_dirty();
    pte.unmap();
    if dirty {
      self.stat.evict_dirty += 1;
    } else {
      self.stat.evict_clean += 1;
    }

    if !pte.on_swap() || dirty {
      pte.clean();
      let off = self.swap.write(self.mem.frame(frame), pte.swap_off())?;
      pte.set_swap(off);
      debug!("evict frame {frame} vpn {vpn:#x} -> swap {off}");
    } else {
      debug!("evict frame {frame} vpn {vpn:#x} clean");
    }
    Ok(())
  }
}
