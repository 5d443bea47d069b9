// コアレイヤー - 計測対象の型、戦略識別子、エラー定義
// 他のレイヤーから参照される基本的な型を提供

pub mod error;
pub mod target;
pub mod types;

// 公開API - 明示的にエクスポートして曖昧性を回避
pub use error::{BenchError, BenchResult};
pub use target::{CtorSource, Instance};
pub use types::{Measurement, StrategyKind};
