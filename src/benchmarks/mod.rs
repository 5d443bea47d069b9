//! 計測とレポート出力モジュール
//!
//! 固定回数の計測ループ、全戦略を順に回すランナー、結果の出力を提供

pub mod report;
pub mod runner;
pub mod timer;

pub use report::{BenchReport, OutputFormat, ReportSink, Reporter, StdoutSink};
pub use runner::{Runner, CYCLES};
pub use timer::ObservationSlot;
