//! Simulation session and address translation
//! 模拟会话与地址转换

use std::path::Path;

use log::{error, info, trace};
use vmsim_swap::{FileSwap, Swap};

use crate::{
  Access, Conf, CoreMap, Dir, Error, Layout, Mem, Pte, Result, Stat,
  evict::Evict,
};

/// One address space: page directory, frame pool, policy, swap and counters
/// 单个地址空间：页目录、帧池、置换策略、交换区与计数器
pub struct Sim<E = Box<dyn Evict>, S = Box<dyn Swap>> {
  pub(crate) layout: Layout,
  pub(crate) dir: Dir,
  pub(crate) core: CoreMap,
  pub(crate) mem: Mem,
  pub(crate) evict: E,
  pub(crate) swap: S,
  pub(crate) stat: Stat,
  poisoned: bool,
}

impl Sim {
  /// Session with the configured policy and a swap file at `path`
  /// 使用配置的置换策略，并在 `path` 创建交换文件
  pub fn open(conf: &Conf, path: impl AsRef<Path>) -> Result<Self> {
    conf.check()?;
    let swap = FileSwap::create(path, conf.layout().page_size(), conf.swapsize)?;
    Self::new(
      conf,
      conf.policy.build(conf.memsize, conf.seed),
      Box::new(swap),
    )
  }
}

impl<E: Evict, S: Swap> Sim<E, S> {
  pub fn new(conf: &Conf, evict: E, swap: S) -> Result<Self> {
    conf.check()?;
    let layout = conf.layout();
    info!(
      "vmsim: {} frames x {} bytes, {}-bit address, policy {}",
      conf.memsize,
      layout.page_size(),
      layout.width(),
      conf.policy
    );
    Ok(Self {
      layout,
      dir: Dir::new(layout),
      core: CoreMap::new(conf.memsize),
      mem: Mem::new(conf.memsize, layout.page_size()),
      evict,
      swap,
      stat: Stat::default(),
      poisoned: false,
    })
  }

  /// Translate `vaddr`, faulting the page in if needed.
  /// Returns the byte index in simulated physical memory.
  /// 转换 `vaddr`，必要时调入页面。返回模拟物理内存中的字节下标。
  ///
  /// Swap failures abort the session: later calls return `Error::Poisoned`.
  /// 交换区故障会终止会话：后续调用返回 `Error::Poisoned`。
  pub fn access(&mut self, vaddr: u64, access: Access) -> Result<usize> {
    if self.poisoned {
      return Err(Error::Poisoned);
    }
    if !self.layout.contains(vaddr) {
      return Err(Error::Addr(vaddr));
    }
    self.translate(vaddr, access).inspect_err(|e| {
      error!("vmsim abort at {vaddr:#x}: {e}");
      self.poisoned = true;
    })
  }

  /// Byte at `vaddr` in simulated physical memory
  /// `vaddr` 在模拟物理内存中对应的字节
  pub fn byte_mut(&mut self, vaddr: u64, access: Access) -> Result<&mut u8> {
    let idx = self.access(vaddr, access)?;
    Ok(&mut self.mem.as_mut_slice()[idx])
  }

  fn translate(&mut self, vaddr: u64, access: Access) -> Result<usize> {
    let l = self.layout;
    self.stat.refs += 1;

    let (dir_idx, tbl_idx) = (l.dir_idx(vaddr), l.tbl_idx(vaddr));
    let pte = *self.dir.table_mut(dir_idx).get(tbl_idx);

    let frame = match pte.frame() {
      Some(frame) => {
        self.stat.hit += 1;
        trace!("hit {vaddr:#x} frame {frame}");
        frame
      }
      None => {
        self.stat.miss += 1;
        let frame = self.alloc_frame(l.vpn(vaddr))?;
        match pte.swap_off() {
          Some(off) => {
            self.swap.read(off, self.mem.frame_mut(frame))?;
            trace!("swap in {vaddr:#x} off {off} frame {frame}");
          }
          None => self.mem.init_frame(frame, l.base(vaddr)),
        }
        self.dir.table_mut(dir_idx).get_mut(tbl_idx).map(frame);
        self.evict.on_load(frame);
        frame
      }
    };

    if access.is_write() {
      self.dir.table_mut(dir_idx).get_mut(tbl_idx).mark_dirty();
    }
    self.evict.on_ref(frame, access);

    Ok(frame * l.page_size() + l.offset(vaddr))
  }

  #[inline]
  pub fn stat(&self) -> Stat {
    self.stat
  }

  /// Zero the counters
  /// 计数器清零
  #[inline]
  pub fn reset_stat(&mut self) {
    self.stat = Stat::default();
  }

  #[inline]
  pub fn is_poisoned(&self) -> bool {
    self.poisoned
  }

  #[inline]
  pub fn layout(&self) -> Layout {
    self.layout
  }

  #[inline]
  pub fn dir(&self) -> &Dir {
    &self.dir
  }

  #[inline]
  pub fn core(&self) -> &CoreMap {
    &self.core
  }

  #[inline]
  pub fn mem(&self) -> &Mem {
    &self.mem
  }

  #[inline]
  pub fn swap(&self) -> &S {
    &self.swap
  }

  #[inline]
  pub fn evict(&self) -> &E {
    &self.evict
  }

  /// PTE of the page holding `vaddr`, if its table exists
  /// `vaddr` 所在页的页表项（二级表存在时）
  #[inline]
  pub fn pte(&self, vaddr: u64) -> Option<&Pte> {
    if !self.layout.contains(vaddr) {
      return None;
    }
    self.dir.pte(self.layout.vpn(vaddr))
  }
}
