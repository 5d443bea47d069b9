// 計測に関連するデータ型定義

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// コンストラクタ呼び出し戦略の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StrategyKind {
    /// コンストラクタの直接呼び出し
    Zero,
    /// 起動時に作成したクロージャ経由
    Lambda,
    /// 呼び出しごとに式木をコンパイル
    Compile,
    /// 起動時に一度だけコンパイルした式木
    Compiled,
    /// 型レジストリによるシグネチャ解決
    Reflection,
    /// 呼び出しごとに動的モジュールへメソッドを発行
    CompileMethod,
    /// 起動時に一度だけ発行したメソッド
    CompiledMethod,
}

impl StrategyKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "Zero",
            Self::Lambda => "Lambda",
            Self::Compile => "Compile",
            Self::Compiled => "Compiled",
            Self::Reflection => "Reflection",
            Self::CompileMethod => "CompileMethod",
            Self::CompiledMethod => "CompiledMethod",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1戦略分の計測結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub strategy: StrategyKind,
    pub iterations: u64,
    pub elapsed_ms: f64,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl Measurement {
    pub fn new(strategy: StrategyKind, iterations: u64, elapsed: Duration) -> Self {
        Self {
            strategy,
            iterations,
            elapsed_ms: elapsed.as_nanos() as f64 / 1_000_000.0,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_display_names() {
        assert_eq!(StrategyKind::Zero.to_string(), "Zero");
        assert_eq!(StrategyKind::CompiledMethod.to_string(), "CompiledMethod");
        assert_eq!(format!("{}", StrategyKind::Compile), "Compile");
    }

    #[test]
    fn test_measurement_milliseconds() {
        let measurement = Measurement::new(StrategyKind::Zero, 10, Duration::from_micros(1500));

        assert_eq!(measurement.iterations, 10);
        assert!((measurement.elapsed_ms - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_milliseconds_print_without_rounding_noise() {
        let measurement =
            Measurement::new(StrategyKind::CompiledMethod, 1, Duration::from_nanos(3_352_321));

        assert_eq!(measurement.elapsed_ms, 3.352321);
        assert_eq!(measurement.elapsed_ms.to_string(), "3.352321");
    }

    #[test]
    fn test_measurement_serialization_skips_duration() {
        let measurement = Measurement::new(StrategyKind::Reflection, 1, Duration::from_millis(2));
        let json = serde_json::to_value(&measurement).unwrap();

        assert_eq!(json["strategy"], "Reflection");
        assert_eq!(json["iterations"], 1);
        assert!(json.get("elapsed").is_none());
    }
}
