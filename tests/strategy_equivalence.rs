// 各戦略が同じ結果を生むことの統合テスト
use ctor_stats::core::{CtorSource, StrategyKind};
use ctor_stats::emit::DynamicModule;
use ctor_stats::reflection::{Activator, Reflect, Value};
use ctor_stats::strategies::{
    build_ctor_expression, emit_method, StrategyContext, StrategyRegistry, ARG_I, ARG_LEVEL,
};
use std::sync::Arc;

fn registry() -> StrategyRegistry {
    StrategyContext::initialize()
        .and_then(StrategyContext::into_registry)
        .expect("セットアップに失敗")
}

#[test]
fn test_default_order_and_disabled_strategy() {
    let registry = registry();

    assert_eq!(registry.len(), 7);
    assert_eq!(
        registry.active_kinds(),
        vec![
            StrategyKind::Zero,
            StrategyKind::Lambda,
            StrategyKind::Compiled,
            StrategyKind::CompiledMethod,
            StrategyKind::Reflection,
            StrategyKind::Compile,
        ]
    );
    assert!(!registry.is_enabled(StrategyKind::CompileMethod));
}

#[test]
fn test_every_strategy_produces_fresh_instance() {
    let mut registry = registry();
    registry.set_enabled(StrategyKind::CompileMethod, true);

    for entry in registry.active_mut() {
        let first = entry.invoke().unwrap();
        let second = entry.invoke().unwrap();
        assert!(
            !Arc::ptr_eq(&first, &second),
            "{} が同じインスタンスを返しました",
            entry.kind()
        );
    }
}

#[test]
fn test_priming_then_batch_succeeds() {
    let mut registry = registry();

    for entry in registry.active_mut() {
        entry.invoke().unwrap();
        for _ in 0..1_000 {
            entry.invoke().unwrap();
        }
    }
}

#[test]
fn test_enabling_compile_method_keeps_it_last() {
    let mut registry = registry();

    assert!(registry.set_enabled(StrategyKind::CompileMethod, true));
    assert_eq!(
        registry.active_kinds().last(),
        Some(&StrategyKind::CompileMethod)
    );
    assert_eq!(registry.active_kinds().len(), 7);
}

#[test]
fn test_setup_artifacts_are_callable() {
    let context = StrategyContext::initialize().unwrap();

    let baseline = CtorSource::allocate(ARG_I, ARG_LEVEL, None);
    for delegate in [
        context.lambda(),
        context.compiled_expression(),
        context.compiled_method(),
    ] {
        let first = delegate(ARG_I, ARG_LEVEL, None);
        let second = delegate(ARG_I, ARG_LEVEL, None);
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &baseline));
        assert_eq!(Arc::strong_count(&first), 1);
    }
    assert_eq!(context.module().type_count(), 1);
}

#[test]
fn test_emitted_methods_accumulate_types() {
    let context = StrategyContext::initialize().unwrap();
    let info = context.types().get(CtorSource::TYPE_NAME).unwrap();
    let expression = build_ctor_expression(info).unwrap();
    let mut module = DynamicModule::define("CtorStats");

    let mut produced = Vec::new();
    for _ in 0..10 {
        let delegate = emit_method(&mut module, &expression).unwrap();
        produced.push(delegate(ARG_I, ARG_LEVEL, None));
    }
    assert_eq!(module.type_count(), 10);
    for (index, instance) in produced.iter().enumerate() {
        assert!(produced[index + 1..]
            .iter()
            .all(|other| !Arc::ptr_eq(instance, other)));
    }
}

#[test]
fn test_reflection_rejects_unknown_type_and_signature() {
    let context = StrategyContext::initialize().unwrap();

    let unknown = Activator::create_instance(
        context.types(),
        "CtorStats.Missing",
        &[Value::Int32(1), Value::Float64(1.0), Value::null()],
    );
    assert!(unknown.is_err());

    let wrong_shape = Activator::create_instance(
        context.types(),
        CtorSource::TYPE_NAME,
        &[Value::Float64(1.0), Value::Int32(1), Value::null()],
    );
    assert!(wrong_shape.is_err());

    let with_parent = Activator::create_instance(
        context.types(),
        CtorSource::TYPE_NAME,
        &[
            Value::Int32(1),
            Value::Float64(1.0),
            Value::Object(Some(CtorSource::allocate(1, 1.0, None))),
        ],
    );
    assert!(with_parent.is_ok());
}
