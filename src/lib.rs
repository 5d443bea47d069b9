pub mod benchmarks;
pub mod cli;
pub mod core;
pub mod emit;
pub mod expression;
pub mod reflection;
pub mod strategies;

use crate::benchmarks::{OutputFormat, ReportSink, Reporter, Runner};
use crate::cli::ExitGate;
use crate::core::{BenchResult, Measurement};
use crate::strategies::StrategyRegistry;

// 依存関係を直接所有するジェネリックなApp構造体
// 出力先とキー入力待ちを差し替えてテストする
pub struct App<S, G>
where
    S: ReportSink,
    G: ExitGate,
{
    pub runner: Runner,
    pub reporter: Reporter<S>,
    pub gate: G,
}

impl<S, G> App<S, G>
where
    S: ReportSink,
    G: ExitGate,
{
    /// 新しいAppインスタンスを作成（コンストラクタインジェクション）
    pub fn new(runner: Runner, sink: S, format: OutputFormat, gate: G) -> Self {
        Self {
            runner,
            reporter: Reporter::new(sink, format),
            gate,
        }
    }

    /// プライミング、計測、レポート出力、キー入力待ちを順に行う
    ///
    /// 計測中にエラーが発生した場合はレポートを出力しない。
    pub fn run(&mut self, registry: &mut StrategyRegistry) -> BenchResult<Vec<Measurement>> {
        tracing::info!(
            cycles = self.runner.cycles(),
            strategies = ?registry.active_kinds(),
            "計測開始"
        );

        let measurements = self.runner.run(registry)?;
        self.reporter.report(self.runner.cycles(), &measurements)?;
        self.gate.wait()?;

        Ok(measurements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::report::MockReportSink;
    use crate::cli::gate::MockExitGate;
    use crate::core::{BenchError, StrategyKind};
    use crate::strategies::{invokers, StrategyContext};
    use mockall::Sequence;

    #[test]
    fn test_run_reports_every_active_strategy_then_waits() {
        let mut registry = StrategyContext::initialize()
            .unwrap()
            .into_registry()
            .unwrap();

        let mut seq = Sequence::new();
        let mut sink = MockReportSink::new();
        for name in [
            "Zero",
            "Lambda",
            "Compiled",
            "CompiledMethod",
            "Reflection",
            "Compile",
        ] {
            sink.expect_write_line()
                .withf(move |line| line.starts_with(&format!("{name}: ")))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
        }
        let mut gate = MockExitGate::new();
        gate.expect_wait()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        let mut app = App::new(Runner::new(20), sink, OutputFormat::Text, gate);
        let measurements = app.run(&mut registry).unwrap();

        assert_eq!(measurements.len(), 6);
        // プライミング 6回 + 計測 6 x 20回
        assert_eq!(app.runner.slot().writes(), 126);
    }

    #[test]
    fn test_run_failure_skips_report_and_gate() {
        let mut registry = StrategyRegistry::new();
        registry
            .register(StrategyKind::Zero, true, invokers::zero_level())
            .unwrap();
        registry
            .register(
                StrategyKind::Reflection,
                true,
                Box::new(|| Err(BenchError::type_not_found("Missing"))),
            )
            .unwrap();

        let mut sink = MockReportSink::new();
        sink.expect_write_line().times(0);
        let mut gate = MockExitGate::new();
        gate.expect_wait().times(0);

        let mut app = App::new(Runner::new(5), sink, OutputFormat::Text, gate);
        assert!(app.run(&mut registry).is_err());
    }

    #[test]
    fn test_gate_error_propagates() {
        let mut registry = StrategyRegistry::new();
        registry
            .register(StrategyKind::Zero, true, invokers::zero_level())
            .unwrap();

        let mut sink = MockReportSink::new();
        sink.expect_write_line().times(1).returning(|_| Ok(()));
        let mut gate = MockExitGate::new();
        gate.expect_wait().times(1).returning(|| {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "端末エラー").into())
        });

        let mut app = App::new(Runner::new(1), sink, OutputFormat::Text, gate);
        assert!(app.run(&mut registry).is_err());
    }
}
