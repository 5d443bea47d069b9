use crate::benchmarks::OutputFormat;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ctor_stats")]
#[command(about = "Measures the relative cost of constructor invocation strategies")]
#[command(version)]
pub struct Cli {
    /// Exit immediately after printing the report instead of waiting for a key press
    #[arg(long)]
    pub no_wait: bool,

    /// Also measure the strategy that emits a new dynamic method on every call
    #[arg(long)]
    pub include_compile_method: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
