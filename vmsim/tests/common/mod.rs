#![allow(dead_code)]

use vmsim::{Conf, Evict, MemSwap, Policy, Sim, Swap};

pub const PAGE: usize = 16;

/// 16-byte pages, 16 table slots, 16 directory slots: 12-bit addresses
pub fn conf(memsize: usize) -> Conf {
  Conf {
    page_shift: 4,
    tbl_bits: 4,
    dir_bits: 4,
    memsize,
    swapsize: 256,
    policy: Policy::Fifo,
    seed: 0,
  }
}

pub fn sim<E: Evict>(memsize: usize, evict: E) -> vmsim::Result<Sim<E, MemSwap>> {
  Sim::new(&conf(memsize), evict, MemSwap::new(PAGE, 256))
}

/// Page base address of the n-th page
pub const fn page(n: u64) -> u64 {
  n * PAGE as u64
}

/// In-use frames and resident PTEs point at each other
pub fn check_bijection<E: Evict, S: Swap>(sim: &Sim<E, S>) {
  for (frame, vpn) in sim.core().iter() {
    let pte = sim.dir().pte(vpn);
    assert_eq!(pte.and_then(|p| p.frame()), Some(frame), "frame {frame}");
  }
  let mut resident = 0;
  for d in 0..sim.dir().len() {
    let Some(table) = sim.dir().table(d) else {
      continue;
    };
    for (i, pte) in table.iter().enumerate() {
      if let Some(frame) = pte.frame() {
        resident += 1;
        assert_eq!(sim.core().owner(frame), Some((d * table.len() + i) as u64));
      }
      if pte.is_dirty() {
        assert!(pte.is_valid());
      }
    }
  }
  assert_eq!(resident, sim.core().used());
}
