//! vmsim - replay a memory reference trace through the paging simulator
//! vmsim - 通过分页模拟器回放内存访问轨迹
//!
//! Usage: vmsim -f trace -m 64 -s 4096 -a lru

use std::{
  fs::File,
  io::{self, BufReader, Read, Write},
  path::PathBuf,
  process::ExitCode,
};

use clap::Parser;
use log::{error, warn};
use vmsim::{Conf, Policy, Result, Sim};

#[derive(Parser)]
#[command(name = "vmsim")]
#[command(about = "Demand-paged virtual memory simulator")]
struct Args {
  /// Trace file, `-` for stdin
  #[arg(short = 'f', long, default_value = "-")]
  trace: PathBuf,

  /// Frames of simulated memory
  #[arg(short, long)]
  memsize: Option<usize>,

  /// Slots in the swap file
  #[arg(short, long)]
  swapsize: Option<usize>,

  /// Replacement policy: fifo, lru, clock, rand
  #[arg(short = 'a', long)]
  policy: Option<Policy>,

  /// Seed for the rand policy
  #[arg(long)]
  seed: Option<u64>,

  /// JSON config, flags override its fields
  #[arg(long)]
  conf: Option<PathBuf>,

  /// Swap file path, must not exist yet
  #[arg(long, default_value = "vmsim.swap")]
  swapfile: PathBuf,

  /// Print the page table after the run
  #[arg(long)]
  dump: bool,

  /// Print counters as JSON
  #[arg(long)]
  json: bool,
}

impl Args {
  fn conf(&self) -> Result<Conf> {
    let mut conf = match &self.conf {
      Some(path) => Conf::load(path)?,
      None => Conf::default(),
    };
    if let Some(v) = self.memsize {
      conf.memsize = v;
    }
    if let Some(v) = self.swapsize {
      conf.swapsize = v;
    }
    if let Some(v) = self.policy {
      conf.policy = v;
    }
    if let Some(v) = self.seed {
      conf.seed = v;
    }
    conf.check()?;
    Ok(conf)
  }
}

/// Swap file is removed only after this run created it
/// 仅删除本次运行创建的交换文件
fn run(args: &Args, out: &mut impl Write) -> Result<()> {
  let conf = args.conf()?;
  let mut sim = Sim::open(&conf, &args.swapfile)?;
  let r = replay(args, &mut sim, out);
  drop(sim);
  if let Err(e) = std::fs::remove_file(&args.swapfile) {
    warn!("remove {}: {e}", args.swapfile.display());
  }
  r
}

fn replay(args: &Args, sim: &mut Sim, out: &mut impl Write) -> Result<()> {
  let input: Box<dyn Read> = if args.trace.as_os_str() == "-" {
    Box::new(io::stdin().lock())
  } else {
    Box::new(File::open(&args.trace)?)
  };
  let stat = sim.run(BufReader::new(input))?;

  if args.json {
    writeln!(out, "{}", sonic_rs::to_string(&stat)?)?;
  } else {
    writeln!(out, "{stat}")?;
  }
  if args.dump {
    write!(out, "{}", sim.dir().dump())?;
  }
  Ok(())
}

fn main() -> ExitCode {
  log_init::init();
  let args = Args::parse();
  match run(&args, &mut io::stdout().lock()) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{e}");
      eprintln!("vmsim: {e}");
      ExitCode::FAILURE
    }
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use aok::{OK, Void};
  use vmsim::{Error, Stat};

  use super::*;

  fn args(swapfile: &Path, extra: &[&str]) -> Args {
    let mut argv = vec!["vmsim", "--swapfile", swapfile.to_str().unwrap()];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
  }

  #[test]
  fn flags_override_conf_file() -> Void {
    let dir = tempfile::tempdir()?;
    let conf = dir.path().join("conf.json");
    std::fs::write(
      &conf,
      r#"{"memsize":8,"swapsize":100,"policy":"lru","seed":3}"#,
    )?;
    let conf = conf.to_str().unwrap();
    let swap = dir.path().join("swap");

    let c = args(&swap, &["--conf", conf]).conf()?;
    assert_eq!((c.memsize, c.swapsize, c.policy, c.seed), (8, 100, Policy::Lru, 3));

    let c = args(&swap, &["--conf", conf, "-m", "4", "-a", "clock", "--seed", "9"]).conf()?;
    assert_eq!((c.memsize, c.swapsize, c.policy, c.seed), (4, 100, Policy::Clock, 9));

    let c = args(&swap, &["-s", "7"]).conf()?;
    assert_eq!(c, Conf {
      swapsize: 7,
      ..Conf::default()
    });
    OK
  }

  #[test]
  fn bad_flag_rejected() {
    assert!(Args::try_parse_from(["vmsim", "-a", "opt"]).is_err());
  }

  #[test]
  fn existing_swapfile_survives() -> Void {
    let dir = tempfile::tempdir()?;
    let swap = dir.path().join("keep.dat");
    std::fs::write(&swap, b"keep")?;
    let trace = dir.path().join("trace");
    std::fs::write(&trace, "R 0x1000\n")?;
    let trace = trace.to_str().unwrap();

    let mut out = Vec::new();
    let r = run(&args(&swap, &["-m", "0", "-f", trace]), &mut out);
    assert!(matches!(r, Err(Error::Conf(_))));
    assert_eq!(std::fs::read(&swap)?, b"keep");

    let r = run(&args(&swap, &["-m", "2", "-f", trace]), &mut out);
    assert!(matches!(r, Err(Error::Swap(_))));
    assert_eq!(std::fs::read(&swap)?, b"keep");
    assert!(out.is_empty());
    OK
  }

  #[test]
  fn run_removes_own_swapfile() -> Void {
    let dir = tempfile::tempdir()?;
    let swap = dir.path().join("vmsim.swap");
    let trace = dir.path().join("trace");
    std::fs::write(&trace, "W 0x1000\nR 0x2000\nR 0x1000\nW 0x3000\n")?;
    let trace = trace.to_str().unwrap();

    let mut out = Vec::new();
    run(&args(&swap, &["-m", "2", "-f", trace, "--json"]), &mut out)?;
    let stat: Stat = sonic_rs::from_slice(&out)?;
    assert_eq!(
      stat,
      Stat {
        hit: 1,
        miss: 3,
        refs: 4,
        evict_clean: 0,
        evict_dirty: 1,
      }
    );
    assert!(!swap.exists());
    OK
  }
}
