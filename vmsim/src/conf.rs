//! Simulation configuration 模拟配置

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Layout, Result,
  consts::{DIR_BITS, PAGE_SHIFT, STAMP_OFF, TBL_BITS},
  evict::{Clock, Evict, Fifo, Lru, Rand},
};

/// Replacement policy chosen at start-up
/// 启动时选定的页面置换策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
  #[default]
  Fifo,
  Lru,
  Clock,
  Rand,
}

impl Policy {
  /// Build the policy for a pool of `memsize` frames
  /// 为 `memsize` 帧的内存池构建策略
  pub fn build(self, memsize: usize, seed: u64) -> Box<dyn Evict> {
    match self {
      Self::Fifo => Box::new(Fifo::default()),
      Self::Lru => Box::new(Lru::new(memsize)),
      Self::Clock => Box::new(Clock::new(memsize)),
      Self::Rand => Box::new(Rand::new(seed)),
    }
  }
}

impl FromStr for Policy {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Ok(match s.to_ascii_lowercase().as_str() {
      "fifo" => Self::Fifo,
      "lru" => Self::Lru,
      "clock" => Self::Clock,
      "rand" | "random" => Self::Rand,
      _ => return Err(Error::Policy(s.into())),
    })
  }
}

impl fmt::Display for Policy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Fifo => "fifo",
      Self::Lru => "lru",
      Self::Clock => "clock",
      Self::Rand => "rand",
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
  /// log2 of page size 页大小的以 2 为底对数
  pub page_shift: u32,
  /// Table index bits 二级表索引位数
  pub tbl_bits: u32,
  /// Directory index bits 页目录索引位数
  pub dir_bits: u32,
  /// Frames in simulated memory 模拟内存帧数
  pub memsize: usize,
  /// Slots in swap 交换区槽数
  pub swapsize: usize,
  pub policy: Policy,
  /// Seed for the random policy 随机策略种子
  pub seed: u64,
}

impl Default for Conf {
  fn default() -> Self {
    Self {
      page_shift: PAGE_SHIFT,
      tbl_bits: TBL_BITS,
      dir_bits: DIR_BITS,
      memsize: 64,
      swapsize: 4096,
      policy: Policy::Fifo,
      seed: 0,
    }
  }
}

impl Conf {
  /// Load from JSON file, missing fields take defaults
  /// 从 JSON 文件加载，缺省字段取默认值
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let json = std::fs::read_to_string(path)?;
    let conf: Self = sonic_rs::from_str(&json)?;
    conf.check()?;
    Ok(conf)
  }

  #[inline]
  pub fn layout(&self) -> Layout {
    Layout::new(self.page_shift, self.tbl_bits, self.dir_bits)
  }

  pub fn check(&self) -> Result<()> {
    // Frame must hold the vaddr stamp
    // 帧需容纳虚拟地址标记
    let min_shift = (STAMP_OFF + size_of::<u64>()).next_power_of_two().trailing_zeros();
    if !(min_shift..=20).contains(&self.page_shift) {
      return Err(Error::conf(format!(
        "page_shift {} not in {min_shift}..=20",
        self.page_shift
      )));
    }
    for (name, bits) in [("tbl_bits", self.tbl_bits), ("dir_bits", self.dir_bits)] {
      if !(1..=16).contains(&bits) {
        return Err(Error::conf(format!("{name} {bits} not in 1..=16")));
      }
    }
    if self.memsize == 0 || self.memsize > u32::MAX as usize {
      return Err(Error::conf(format!("memsize {} out of range", self.memsize)));
    }
    if self.swapsize == 0 || self.swapsize > u32::MAX as usize {
      return Err(Error::conf(format!("swapsize {} out of range", self.swapsize)));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn check_bounds() {
    assert!(Conf::default().check().is_ok());
    let bad = [
      Conf {
        page_shift: 3,
        ..Conf::default()
      },
      Conf {
        tbl_bits: 0,
        ..Conf::default()
      },
      Conf {
        dir_bits: 17,
        ..Conf::default()
      },
      Conf {
        memsize: 0,
        ..Conf::default()
      },
      Conf {
        swapsize: 0,
        ..Conf::default()
      },
      Conf {
        swapsize: u32::MAX as usize + 1,
        ..Conf::default()
      },
    ];
    for conf in bad {
      assert!(matches!(conf.check(), Err(Error::Conf(_))), "{conf:?}");
    }
  }

  #[test]
  fn policy_parse() {
    assert_eq!("LRU".parse::<Policy>().ok(), Some(Policy::Lru));
    assert_eq!("random".parse::<Policy>().ok(), Some(Policy::Rand));
    assert!("opt".parse::<Policy>().is_err());
    assert_eq!(Policy::Clock.to_string(), "clock");
  }
}
