//! Error types for vmsim_swap
//! vmsim_swap 错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("swap full")]
  Full,

  #[error("invalid swap offset: {0}")]
  Offset(u64),

  #[error("swap too large: {slots} slots of {page_size} bytes")]
  Cap { page_size: usize, slots: usize },

  #[error("page size mismatch: expect {expect}, got {got}")]
  Size { expect: usize, got: usize },
}
