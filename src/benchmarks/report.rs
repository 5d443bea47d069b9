//! 計測結果のレポート出力
//!
//! テキスト形式は `<戦略名>: <ミリ秒>` を1戦略1行で登録順に出力する。
//! JSON形式は標準出力に書き出すのみで、ファイルには保存しない。

use crate::core::{BenchResult, Measurement};
use mockall::automock;
use serde::Serialize;
use std::io::Write;

/// レポートの出力先を抽象化するトレイト
#[automock]
pub trait ReportSink {
    /// 1行出力
    fn write_line(&mut self, line: &str) -> BenchResult<()>;
}

/// 標準出力への出力
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> BenchResult<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()?;
        Ok(())
    }
}

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// JSON出力用のレポート
#[derive(Debug, Serialize)]
pub struct BenchReport<'a> {
    pub timestamp: String,
    pub cycles: u64,
    pub measurements: &'a [Measurement],
}

impl<'a> BenchReport<'a> {
    pub fn new(cycles: u64, measurements: &'a [Measurement]) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            cycles,
            measurements,
        }
    }

    pub fn to_json(&self) -> BenchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 1戦略分の行
pub fn format_line(measurement: &Measurement) -> String {
    format!("{}: {}", measurement.strategy, measurement.elapsed_ms)
}

/// 計測結果を出力先に書き出す
pub struct Reporter<S: ReportSink> {
    sink: S,
    format: OutputFormat,
}

impl<S: ReportSink> Reporter<S> {
    pub fn new(sink: S, format: OutputFormat) -> Self {
        Self { sink, format }
    }

    pub fn report(&mut self, cycles: u64, measurements: &[Measurement]) -> BenchResult<()> {
        match self.format {
            OutputFormat::Text => {
                for measurement in measurements {
                    self.sink.write_line(&format_line(measurement))?;
                }
            }
            OutputFormat::Json => {
                let json = BenchReport::new(cycles, measurements).to_json()?;
                self.sink.write_line(&json)?;
            }
        }
        Ok(())
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
