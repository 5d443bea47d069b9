//! 終了前のキー入力待ち
//!
//! 標準入力が端末でない場合は待たずに戻る。

use crate::core::BenchResult;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use mockall::automock;
use std::io::IsTerminal;

/// プロセス終了前に呼ばれるゲート
#[automock]
pub trait ExitGate {
    fn wait(&mut self) -> BenchResult<()>;
}

/// 任意のキーが押されるまでブロックする
#[derive(Debug, Default)]
pub struct KeyPressGate;

impl KeyPressGate {
    pub fn new() -> Self {
        Self
    }

    fn read_key_press() -> BenchResult<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

impl ExitGate for KeyPressGate {
    fn wait(&mut self) -> BenchResult<()> {
        if !std::io::stdin().is_terminal() {
            tracing::debug!("標準入力が端末ではないためキー入力待ちを省略");
            return Ok(());
        }

        enable_raw_mode()?;
        let result = Self::read_key_press();
        // 読み取りに失敗しても端末は元に戻す
        disable_raw_mode()?;
        result
    }
}

/// 待たずに戻る
#[derive(Debug, Default)]
pub struct NoWaitGate;

impl ExitGate for NoWaitGate {
    fn wait(&mut self) -> BenchResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_wait_gate_returns_immediately() {
        let mut gate = NoWaitGate;
        assert!(gate.wait().is_ok());
    }

    #[test]
    fn test_mock_gate() {
        let mut gate = MockExitGate::new();
        gate.expect_wait().times(1).returning(|| Ok(()));

        gate.wait().unwrap();
    }
}
