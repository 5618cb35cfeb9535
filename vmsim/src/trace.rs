//! Reference trace replay
//! 访问轨迹回放
//!
//! One reference per line, `<kind> <hex addr>[,size]`:
//! 每行一次访问，格式 `<类型> <十六进制地址>[,大小]`：
//!
//! | kind    | access |
//! |---------|--------|
//! | I L R   | read   |
//! | S M W   | write  |
//!
//! Blank lines and lines starting with `#` or `=` are skipped.
//! 空行及以 `#` 或 `=` 开头的行被跳过。

use std::io::BufRead;

use vmsim_swap::Swap;

use crate::{Access, Error, Result, Sim, Stat, evict::Evict};

/// Parse one line, `Ok(None)` for lines carrying no reference
/// 解析一行，无访问的行返回 `Ok(None)`
pub fn parse_line(line: &str) -> std::result::Result<Option<(u64, Access)>, Box<str>> {
  let line = line.trim();
  if line.is_empty() || line.starts_with(['#', '=']) {
    return Ok(None);
  }

  let mut it = line.split_whitespace();
  let (Some(kind), Some(addr)) = (it.next(), it.next()) else {
    return Err(format!("expect `<kind> <addr>`, got `{line}`").into());
  };

  let access = match kind {
    "I" | "L" | "R" | "i" | "l" | "r" => Access::Read,
    "S" | "M" | "W" | "s" | "m" | "w" => Access::Write,
    _ => return Err(format!("unknown access kind `{kind}`").into()),
  };

  let hex = addr.split(',').next().unwrap_or(addr);
  let hex = hex
    .strip_prefix("0x")
    .or_else(|| hex.strip_prefix("0X"))
    .unwrap_or(hex);
  let vaddr = u64::from_str_radix(hex, 16).map_err(|e| format!("bad address `{addr}`: {e}"))?;

  Ok(Some((vaddr, access)))
}

impl<E: Evict, S: Swap> Sim<E, S> {
  /// Replay every reference of a trace, returns counters at the end
  /// 回放轨迹中的所有访问，结束时返回计数器
  pub fn run(&mut self, reader: impl BufRead) -> Result<Stat> {
    for (no, line) in reader.lines().enumerate() {
      let line = line?;
      let parsed = parse_line(&line).map_err(|msg| Error::Trace { line: no + 1, msg })?;
      if let Some((vaddr, access)) = parsed {
        self.access(vaddr, access)?;
      }
    }
    Ok(self.stat)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_forms() {
    assert_eq!(parse_line("I  04222cac,4"), Ok(Some((0x0422_2cac, Access::Read))));
    assert_eq!(parse_line(" S 7ff000ab8,8"), Ok(Some((0x7_ff00_0ab8, Access::Write))));
    assert_eq!(parse_line(" M 1000,4"), Ok(Some((0x1000, Access::Write))));
    assert_eq!(parse_line("R 0x2a"), Ok(Some((0x2a, Access::Read))));
    assert_eq!(parse_line("w 0X10"), Ok(Some((0x10, Access::Write))));
    assert_eq!(parse_line(""), Ok(None));
    assert_eq!(parse_line("  # comment"), Ok(None));
    assert_eq!(parse_line("==1234== lackey"), Ok(None));
    assert!(parse_line("X 10").is_err());
    assert!(parse_line("L").is_err());
    assert!(parse_line("L zz").is_err());
  }
}
