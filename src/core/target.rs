//! 計測対象のオブジェクト
//!
//! 3つの引数を受け取るが何も保持しないコンストラクタを持つ。
//! 参照型として扱うため、生成結果は常に `Arc` で共有される。

use std::sync::Arc;

/// 生成済みインスタンス
pub type Instance = Arc<CtorSource>;

/// 全戦略が生成する型
#[derive(Debug)]
pub struct CtorSource {
    _sealed: (),
}

impl CtorSource {
    /// 引数はすべて破棄される
    #[inline]
    pub fn new(_i: i32, _level: f64, _parent: Option<Instance>) -> Self {
        Self { _sealed: () }
    }

    /// ヒープに確保して共有可能なインスタンスを返す
    #[inline]
    pub fn allocate(i: i32, level: f64, parent: Option<Instance>) -> Instance {
        Arc::new(Self::new(i, level, parent))
    }
}
