use anyhow::{Context, Result};
use clap::Parser;
use ctor_stats::{
    benchmarks::{OutputFormat, Runner, StdoutSink},
    cli::{Cli, ExitGate, KeyPressGate, NoWaitGate},
    core::StrategyKind,
    strategies::{StrategyContext, StrategyRegistry},
    App,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ログは標準エラーへ。標準出力はレポート専用
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .with_context(|| format!("ログレベルの指定が不正です: {}", cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut registry = StrategyContext::initialize()
        .and_then(StrategyContext::into_registry)
        .context("戦略の初期化に失敗しました")?;

    if cli.include_compile_method {
        registry.set_enabled(StrategyKind::CompileMethod, true);
    }

    if cli.no_wait {
        run(&mut registry, cli.format, NoWaitGate)
    } else {
        run(&mut registry, cli.format, KeyPressGate::new())
    }
}

fn run<G: ExitGate>(registry: &mut StrategyRegistry, format: OutputFormat, gate: G) -> Result<()> {
    let mut app = App::new(Runner::default(), StdoutSink::new(), format, gate);
    app.run(registry).context("計測に失敗しました")?;
    Ok(())
}
