// 計測ランナー - 全戦略のプライミングと計測

use super::timer::{self, ObservationSlot};
use crate::core::{BenchResult, Measurement};
use crate::strategies::StrategyRegistry;

/// 1戦略あたりの計測回数
pub const CYCLES: u64 = 100_000;

/// 登録順に全戦略を実行する計測ランナー
#[derive(Debug)]
pub struct Runner {
    cycles: u64,
    slot: ObservationSlot,
}

impl Runner {
    pub fn new(cycles: u64) -> Self {
        Self {
            cycles,
            slot: ObservationSlot::new(),
        }
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn slot(&self) -> &ObservationSlot {
        &self.slot
    }

    /// 各戦略を1回ずつ呼び出し、初回のみのコストを計測範囲外に追い出す
    pub fn prime(&mut self, registry: &mut StrategyRegistry) -> BenchResult<()> {
        for entry in registry.active_mut() {
            let elapsed = timer::run(entry.invoker_mut(), 1, &mut self.slot)?;
            tracing::debug!(strategy = %entry.kind(), ?elapsed, "プライミング完了");
        }
        Ok(())
    }

    /// 各戦略を `cycles` 回ずつ計測
    pub fn measure(&mut self, registry: &mut StrategyRegistry) -> BenchResult<Vec<Measurement>> {
        let mut measurements = Vec::new();
        for entry in registry.active_mut() {
            let elapsed = timer::run(entry.invoker_mut(), self.cycles, &mut self.slot)?;
            tracing::debug!(
                strategy = %entry.kind(),
                cycles = self.cycles,
                ?elapsed,
                "計測完了"
            );
            measurements.push(Measurement::new(entry.kind(), self.cycles, elapsed));
        }
        Ok(measurements)
    }

    /// プライミングの後に計測する
    ///
    /// いずれかの戦略が失敗した場合は結果を返さない。
    pub fn run(&mut self, registry: &mut StrategyRegistry) -> BenchResult<Vec<Measurement>> {
        self.prime(registry)?;
        self.measure(registry)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(CYCLES)
    }
}
