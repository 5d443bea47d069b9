//! 固定回数の計測ループ
//!
//! 生成結果は毎回 `ObservationSlot` に書き込まれる。
//! スロットは最適化による呼び出しの除去を防ぐためだけに存在し、
//! 書き込まれた値がロジックで読まれることはない。

use crate::core::{BenchResult, Instance};
use std::hint::black_box;
use std::time::{Duration, Instant};

/// 最新の生成結果と書き込み回数を保持する
#[derive(Debug, Default)]
pub struct ObservationSlot {
    latest: Option<Instance>,
    writes: u64,
}

impl ObservationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn observe(&mut self, instance: Instance) {
        self.latest = Some(black_box(instance));
        self.writes += 1;
    }

    pub fn latest(&self) -> Option<&Instance> {
        self.latest.as_ref()
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }
}

/// 呼び出し本体を `count` 回連続で実行し、経過時間を返す
///
/// 途中でエラーが発生した場合はその時点で中断して伝播する。
pub fn run<F>(invoker: &mut F, count: u64, slot: &mut ObservationSlot) -> BenchResult<Duration>
where
    F: FnMut() -> BenchResult<Instance> + ?Sized,
{
    let start = Instant::now();
    for _ in 0..count {
        let instance = invoker()?;
        slot.observe(instance);
    }
    Ok(start.elapsed())
}
