//! Error types for vmsim
//! vmsim 错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("swap: {0}")]
  Swap(#[from] vmsim_swap::Error),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("json: {0}")]
  Json(#[from] sonic_rs::Error),

  #[error("virtual address out of range: {0:#x}")]
  Addr(u64),

  #[error("victim frame {0} is not resident")]
  Victim(usize),

  #[error("conf: {0}")]
  Conf(Box<str>),

  #[error("unknown policy: {0}")]
  Policy(Box<str>),

  #[error("trace line {line}: {msg}")]
  Trace { line: usize, msg: Box<str> },

  #[error("session aborted by an earlier fatal error")]
  Poisoned,
}

impl Error {
  /// Create Conf error
  /// 创建配置错误
  #[inline]
  pub fn conf(msg: impl Into<Box<str>>) -> Self {
    Self::Conf(msg.into())
  }
}
