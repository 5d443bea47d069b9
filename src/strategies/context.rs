//! 起動時の一回限りのセットアップ
//!
//! クロージャ、式木、コンパイル済みデリゲート、動的モジュールと
//! 発行済みメソッドのデリゲートをまとめて作成する。
//! ここで失敗した場合は計測を開始せずに終了する。

use super::invokers;
use super::registry::StrategyRegistry;
use crate::core::{BenchError, BenchResult, CtorSource, Instance, StrategyKind};
use crate::emit::{unique_name, CtorDelegate, DynamicModule};
use crate::expression::{Expression, LambdaExpression, ParameterExpression};
use crate::reflection::{TypeInfo, TypeRegistry, ValueType};
use std::sync::Arc;

/// 発行するメソッドの名前
pub const METHOD_NAME: &str = "MyMethod";
/// 動的モジュール名の接頭辞
pub const MODULE_PREFIX: &str = "CtorStats";
/// 動的型名の接頭辞
pub const TYPE_PREFIX: &str = "MyType";

/// `(i, d, cl) => new CtorSource(i, d, cl)` を構築
pub fn build_ctor_expression(info: &TypeInfo) -> BenchResult<LambdaExpression> {
    let constructor = info
        .get_constructor(&[ValueType::Int32, ValueType::Float64, ValueType::Object])
        .ok_or_else(|| {
            BenchError::constructor_not_found(info.name(), "Int32, Float64, Object")
        })?;

    let parameters = vec![
        ParameterExpression::new("i", ValueType::Int32),
        ParameterExpression::new("d", ValueType::Float64),
        ParameterExpression::new("cl", ValueType::Object),
    ];
    let arguments = parameters.iter().cloned().map(Expression::from).collect();
    let body = Expression::new_object(constructor, arguments)?;

    LambdaExpression::new(body, parameters)
}

/// 一意な名前の型を定義してメソッドを発行し、そのデリゲートを返す
///
/// 呼び出すたびにモジュールに型が1つ追加される。
pub fn emit_method(
    module: &mut DynamicModule,
    expression: &LambdaExpression,
) -> BenchResult<CtorDelegate> {
    let mut type_builder = module.define_type(unique_name(TYPE_PREFIX))?;
    expression.compile_to_method(type_builder.define_method(METHOD_NAME)?)?;
    let runtime_type = type_builder.create_type(module)?;

    let method = runtime_type
        .get_method(METHOD_NAME)
        .ok_or_else(|| BenchError::method_not_found(runtime_type.name(), METHOD_NAME))?;
    method.create_delegate()
}

/// 全戦略が共有するセットアップ成果物
pub struct StrategyContext {
    types: Arc<TypeRegistry>,
    lambda: CtorDelegate,
    expression: Arc<LambdaExpression>,
    compiled_expression: CtorDelegate,
    module: DynamicModule,
    compiled_method: CtorDelegate,
}

impl StrategyContext {
    /// セットアップを実行
    pub fn initialize() -> BenchResult<Self> {
        let mut types = TypeRegistry::new();
        let info = types.register::<CtorSource>()?;

        let lambda: CtorDelegate = Arc::new(|i: i32, d: f64, cl: Option<Instance>| {
            Arc::new(CtorSource::new(i, d, cl))
        });

        let expression = build_ctor_expression(&info)?;
        let compiled_expression = expression.compile()?;
        tracing::debug!("式木をコンパイルしました");

        let mut module = DynamicModule::define(MODULE_PREFIX);
        let compiled_method = emit_method(&mut module, &expression)?;

        tracing::info!(
            module = module.name(),
            types = ?types.type_names(),
            "セットアップが完了しました"
        );

        Ok(Self {
            types: Arc::new(types),
            lambda,
            expression: Arc::new(expression),
            compiled_expression,
            module,
            compiled_method,
        })
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn lambda(&self) -> &CtorDelegate {
        &self.lambda
    }

    pub fn expression(&self) -> &LambdaExpression {
        &self.expression
    }

    pub fn compiled_expression(&self) -> &CtorDelegate {
        &self.compiled_expression
    }

    pub fn module(&self) -> &DynamicModule {
        &self.module
    }

    pub fn compiled_method(&self) -> &CtorDelegate {
        &self.compiled_method
    }

    /// 既定の登録順でレジストリを作成
    ///
    /// `CompileMethod` は無効状態で最後に登録される。
    pub fn into_registry(self) -> BenchResult<StrategyRegistry> {
        let Self {
            types,
            lambda,
            expression,
            compiled_expression,
            module,
            compiled_method,
        } = self;

        let mut registry = StrategyRegistry::new();
        registry.register(StrategyKind::Zero, true, invokers::zero_level())?;
        registry.register(StrategyKind::Lambda, true, invokers::delegate(lambda))?;
        registry.register(
            StrategyKind::Compiled,
            true,
            invokers::delegate(compiled_expression),
        )?;
        registry.register(
            StrategyKind::CompiledMethod,
            true,
            invokers::delegate(compiled_method),
        )?;
        registry.register(StrategyKind::Reflection, true, invokers::reflection(types))?;
        registry.register(
            StrategyKind::Compile,
            true,
            invokers::compile_each_call(Arc::clone(&expression)),
        )?;
        registry.register(
            StrategyKind::CompileMethod,
            false,
            invokers::compile_method_each_call(module, expression),
        )?;
        Ok(registry)
    }
}
