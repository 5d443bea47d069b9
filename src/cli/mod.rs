// CLI層 - コマンドライン引数と終了前のキー入力待ち

pub mod args;
pub mod gate;

pub use args::Cli;
pub use gate::{ExitGate, KeyPressGate, NoWaitGate};
