#![cfg_attr(docsrs, feature(doc_cfg))]

//! vmsim - demand-paged virtual memory simulator
//! vmsim - 按需分页虚拟内存模拟器
//!
//! A two-level page table maps virtual pages onto a fixed pool of
//! simulated frames. When the pool is full a pluggable policy picks a
//! victim, which is written to swap unless a clean copy already lives there.
//! 两级页表将虚拟页映射到固定数量的模拟物理帧。内存池满时由可插拔策略选出牺牲帧，
//! 除非交换区已有干净副本，否则将其写回交换区。

pub mod addr;
pub mod conf;
pub mod consts;
pub mod core_map;
pub mod dir;
mod error;
pub mod evict;
mod frame;
pub mod mem;
pub mod pte;
mod sim;
pub mod stat;
pub mod trace;

pub use addr::{Access, Layout};
pub use conf::{Conf, Policy};
pub use consts::INVALID_SWAP;
pub use core_map::CoreMap;
pub use dir::{Dir, Table};
pub use error::{Error, Result};
pub use evict::{Evict, View};
pub use mem::Mem;
pub use pte::Pte;
pub use sim::Sim;
pub use stat::Stat;
pub use vmsim_swap::{FileSwap, MemSwap, Swap};
