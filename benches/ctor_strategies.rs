//! コンストラクタ呼び出し戦略ごとのベンチマーク
//!
//! 固定回数ループの計測結果を統計的に裏付けるための補助

use criterion::{criterion_group, criterion_main, Criterion};
use ctor_stats::core::{CtorSource, StrategyKind};
use ctor_stats::emit::DynamicModule;
use ctor_stats::reflection::Reflect;
use ctor_stats::strategies::{build_ctor_expression, emit_method, StrategyContext};
use std::time::Duration;

/// 有効な全戦略の1回あたりの呼び出しコスト
fn benchmark_active_strategies(c: &mut Criterion) {
    let mut registry = StrategyContext::initialize()
        .and_then(StrategyContext::into_registry)
        .unwrap();

    let mut group = c.benchmark_group("Constructor Strategies");
    group.measurement_time(Duration::from_secs(5));

    for entry in registry.active_mut() {
        let name = entry.kind().as_str();
        group.bench_function(name, |b| {
            b.iter(|| std::hint::black_box(entry.invoke().unwrap()))
        });
    }

    group.finish();
}

/// 呼び出しごとのメソッド発行
///
/// 型がモジュールに蓄積され続けるため、サンプル数を絞って別グループで計測する。
fn benchmark_compile_method(c: &mut Criterion) {
    let context = StrategyContext::initialize().unwrap();
    let info = context.types().get(CtorSource::TYPE_NAME).unwrap();
    let expression = build_ctor_expression(info).unwrap();
    let mut module = DynamicModule::define("CtorStatsBench");

    let mut group = c.benchmark_group("Dynamic Method Emission");
    group.sample_size(10);

    group.bench_function(StrategyKind::CompileMethod.as_str(), |b| {
        b.iter(|| {
            let delegate = emit_method(&mut module, &expression).unwrap();
            std::hint::black_box(delegate(1, 1.0, None))
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_active_strategies, benchmark_compile_method);
criterion_main!(benches);
