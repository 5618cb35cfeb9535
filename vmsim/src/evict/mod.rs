//! Page replacement policies
//! 页面置换策略
//!
//! The allocator only asks for a victim once every frame is in use, so
//! `victim` may assume a full pool. Policies keep their own state keyed
//! by frame number and learn about the pool through the hooks.
//! 分配器仅在所有帧均被占用时请求牺牲帧，因此 `victim` 可假定内存池已满。
//! 策略以帧号为键维护自身状态，通过回调获知内存池变化。

mod clock;
mod fifo;
mod lru;
mod rand;

pub use clock::Clock;
pub use fifo::Fifo;
pub use lru::Lru;
pub use rand::Rand;

use crate::{Access, CoreMap, Dir, Pte};

/// Victim selection
/// 牺牲帧选择
pub trait Evict {
  /// Frame filled with a newly resident page
  /// 帧装入新驻留页面
  fn on_load(&mut self, _frame: usize) {}

  /// Every reference, after the page is resident
  /// 每次访问，页面驻留之后调用
  fn on_ref(&mut self, _frame: usize, _access: Access) {}

  /// Pick an in-use frame to evict
  /// 选出待驱逐的使用中帧
  fn victim(&mut self, view: &View<'_>) -> usize;
}

impl<T: Evict + ?Sized> Evict for Box<T> {
  #[inline]
  fn on_load(&mut self, frame: usize) {
    (**self).on_load(frame);
  }

  #[inline]
  fn on_ref(&mut self, frame: usize, access: Access) {
    (**self).on_ref(frame, access);
  }

  #[inline]
  fn victim(&mut self, view: &View<'_>) -> usize {
    (**self).victim(view)
  }
}

/// Read-only view of the core map and the PTEs it points at
/// 核心映射表及其指向页表项的只读视图
#[derive(Clone, Copy)]
pub struct View<'a> {
  core: &'a CoreMap,
  dir: &'a Dir,
}

impl<'a> View<'a> {
  #[inline]
  pub fn new(core: &'a CoreMap, dir: &'a Dir) -> Self {
    Self { core, dir }
  }

  /// Frames in pool
  /// 帧总数
  #[inline]
  pub fn len(&self) -> usize {
    self.core.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.core.is_empty()
  }

  #[inline]
  pub fn in_use(&self, frame: usize) -> bool {
    self.core.in_use(frame)
  }

  #[inline]
  pub fn owner(&self, frame: usize) -> Option<u64> {
    self.core.owner(frame)
  }

  /// PTE occupying the frame
  /// 占用该帧的页表项
  #[inline]
  pub fn pte(&self, frame: usize) -> Option<&'a Pte> {
    self.dir.pte(self.core.owner(frame)?)
  }

  #[inline]
  pub fn core(&self) -> &'a CoreMap {
    self.core
  }
}
