//! コンストラクタ呼び出し戦略モジュール
//!
//! 起動時のセットアップ、各戦略の呼び出し本体、登録順を保持するレジストリを提供

pub mod context;
pub mod invokers;
pub mod registry;

pub use context::{build_ctor_expression, emit_method, StrategyContext};
pub use invokers::{construct_directly, ARG_I, ARG_LEVEL};
pub use registry::{Invoker, StrategyEntry, StrategyRegistry};
