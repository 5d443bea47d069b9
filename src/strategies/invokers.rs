// 各戦略の呼び出し本体
//
// 引数は常に (1, 1.0, null) で固定。

use super::context::emit_method;
use super::registry::Invoker;
use crate::core::{CtorSource, Instance};
use crate::emit::{CtorDelegate, DynamicModule};
use crate::expression::LambdaExpression;
use crate::reflection::{Activator, Reflect, TypeRegistry, Value};
use std::sync::Arc;

pub const ARG_I: i32 = 1;
pub const ARG_LEVEL: f64 = 1.0;

/// コンストラクタを直接呼び出す
#[inline]
pub fn construct_directly() -> Instance {
    Arc::new(CtorSource::new(ARG_I, ARG_LEVEL, None))
}

pub fn zero_level() -> Invoker {
    Box::new(|| Ok(construct_directly()))
}

/// 作成済みのデリゲートを呼び出す（Lambda / Compiled / CompiledMethod）
pub fn delegate(handle: CtorDelegate) -> Invoker {
    Box::new(move || Ok(handle(ARG_I, ARG_LEVEL, None)))
}

/// 呼び出しごとに式木をコンパイルしてから呼び出す
pub fn compile_each_call(expression: Arc<LambdaExpression>) -> Invoker {
    Box::new(move || {
        let compiled = expression.compile()?;
        Ok(compiled(ARG_I, ARG_LEVEL, None))
    })
}

/// 呼び出しごとに型名とシグネチャからコンストラクタを解決する
pub fn reflection(types: Arc<TypeRegistry>) -> Invoker {
    Box::new(move || {
        Activator::create_instance(
            &types,
            CtorSource::TYPE_NAME,
            &[Value::Int32(ARG_I), Value::Float64(ARG_LEVEL), Value::null()],
        )
    })
}

/// 呼び出しごとに新しい型を定義してメソッドを発行する
///
/// 定義した型はモジュールに蓄積され続ける。
pub fn compile_method_each_call(
    mut module: DynamicModule,
    expression: Arc<LambdaExpression>,
) -> Invoker {
    Box::new(move || {
        let emitted = emit_method(&mut module, &expression)?;
        Ok(emitted(ARG_I, ARG_LEVEL, None))
    })
}
