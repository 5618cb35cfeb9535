//! Event counters
//! 事件计数器

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-session counters, observation only
/// 会话级计数器，仅用于观测
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
  pub hit: u64,
  pub miss: u64,
  pub refs: u64,
  pub evict_clean: u64,
  pub evict_dirty: u64,
}

impl Stat {
  #[inline]
  pub const fn evicts(&self) -> u64 {
    self.evict_clean + self.evict_dirty
  }

  /// Hit percentage, 0 when nothing referenced
  /// 命中百分比，无访问时为 0
  pub fn hit_rate(&self) -> f64 {
    if self.refs == 0 {
      return 0.0;
    }
    self.hit as f64 * 100.0 / self.refs as f64
  }

  pub fn miss_rate(&self) -> f64 {
    if self.refs == 0 {
      return 0.0;
    }
    self.miss as f64 * 100.0 / self.refs as f64
  }
}

impl fmt::Display for Stat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Hit count: {}", self.hit)?;
    writeln!(f, "Miss count: {}", self.miss)?;
    writeln!(f, "Clean evictions: {}", self.evict_clean)?;
    writeln!(f, "Dirty evictions: {}", self.evict_dirty)?;
    writeln!(f, "Total references: {}", self.refs)?;
    writeln!(f, "Hit rate: {:.4}", self.hit_rate())?;
    write!(f, "Miss rate: {:.4}", self.miss_rate())
  }
}
