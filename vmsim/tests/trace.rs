use aok::{OK, Void};
use log::info;
use vmsim::{Conf, Error, Policy, Sim, Stat};

mod common;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

const TRACE: &str = "\
# lackey style
W 0x10
 S 20,4
R 0x30
==12== noise
L 10,8
M 0x40,4
";

#[test]
fn test_run_file_swap() -> Void {
  info!("> 文件交换区回放轨迹");

  let dir = tempfile::tempdir()?;
  let conf = Conf {
    policy: Policy::Lru,
    ..common::conf(2)
  };
  let mut sim = Sim::open(&conf, dir.path().join("swap"))?;
  let stat = sim.run(TRACE.as_bytes())?;
  assert_eq!(
    stat,
    Stat {
      hit: 0,
      miss: 5,
      refs: 5,
      evict_clean: 1,
      evict_dirty: 2,
    }
  );
  common::check_bijection(&sim);

  let dump = sim.dir().dump().to_string();
  info!("\n{dump}");
  assert!(dump.starts_with("[0]: table\n"));
  assert!(dump.contains("\t[2]: ONSWAP, at offset"));
  assert!(dump.contains("\t[1]: VALID, in frame"));
  assert!(dump.contains("\t[4]: VALID, DIRTY, in frame"));
  assert!(dump.ends_with("[1]: INVALID\n  to\n[15]: INVALID\n"));
  OK
}

#[test]
fn test_run_bad_line() -> Void {
  info!("> 轨迹格式错误");

  let mut sim = common::sim(2, Policy::Fifo.build(2, 0))?;
  let err = sim.run("R 0x10\nbogus\n".as_bytes());
  assert!(matches!(err, Err(Error::Trace { line: 2, .. })));
  assert_eq!(sim.stat().refs, 1);
  OK
}

#[test]
fn test_conf_load() -> Void {
  info!("> 从 JSON 加载配置");

  let dir = tempfile::tempdir()?;
  let path = dir.path().join("conf.json");
  std::fs::write(&path, r#"{"memsize": 8, "policy": "clock", "seed": 3}"#)?;
  let conf = Conf::load(&path)?;
  assert_eq!(
    conf,
    Conf {
      memsize: 8,
      policy: Policy::Clock,
      seed: 3,
      ..Conf::default()
    }
  );

  std::fs::write(&path, r#"{"memsize": 0}"#)?;
  assert!(matches!(Conf::load(&path), Err(Error::Conf(_))));
  OK
}
