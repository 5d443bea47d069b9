//! 動的コード生成モジュール
//!
//! 命令列（IL）を組み立て、検証し、呼び出し可能なデリゲートに変換する：
//! - il: 命令セット
//! - builder: 動的モジュール・型・メソッドの定義
//! - jit: 命令列からクロージャへの変換

pub mod builder;
pub mod il;
pub mod jit;

pub use builder::{
    unique_name, DynamicModule, MethodBuilder, RuntimeMethod, RuntimeType, TypeBuilder,
};
pub use il::OpCode;

use crate::core::Instance;
use std::sync::Arc;

/// `(Int32, Float64, Object) -> Object` 形状のデリゲート
pub type CtorDelegate = Arc<dyn Fn(i32, f64, Option<Instance>) -> Instance + Send + Sync>;
