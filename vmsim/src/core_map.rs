//! Core map: one entry per simulated frame
//! 核心映射表：每个模拟物理帧一项

/// Frame occupancy, each in-use frame records the vpn of its owner PTE
/// 帧占用情况，使用中的帧记录其所属页表项的虚拟页号
#[derive(Debug, Clone)]
pub struct CoreMap(Box<[Option<u64>]>);

impl CoreMap {
  pub fn new(frames: usize) -> Self {
    Self(vec![None; frames].into_boxed_slice())
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
  pub fn in_use(&self, frame: usize) -> bool {
    self.owner(frame).is_some()
  }

  /// Vpn occupying the frame
  /// 占用该帧的虚拟页号
  #[inline]
  pub fn owner(&self, frame: usize) -> Option<u64> {
    self.0.get(frame).copied().flatten()
  }

  /// Lowest free frame
  /// 最小空闲帧
  #[inline]
  pub fn free(&self) -> Option<usize> {
    self.0.iter().position(Option::is_none)
  }

  /// Frames in use
  /// 使用中的帧数
  pub fn used(&self) -> usize {
    self.0.iter().filter(|o| o.is_some()).count()
  }

  #[inline]
  pub(crate) fn set(&mut self, frame: usize, vpn: u64) {
    self.0[frame] = Some(vpn);
  }

  /// (frame, owner vpn) of every in-use frame
  /// 所有使用中帧的 (帧号, 所属虚拟页号)
  pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
    self
      .0
      .iter()
      .enumerate()
      .filter_map(|(frame, owner)| owner.map(|vpn| (frame, vpn)))
  }
}
