// 型レジストリとシグネチャ解決による生成

use super::{signature_of, Reflect, TypeInfo, Value};
use crate::core::{BenchError, BenchResult, Instance};
use std::collections::HashMap;
use std::sync::Arc;

/// 型名からコンストラクタ記述子への対応表
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<&'static str, Arc<TypeInfo>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 型を登録
    pub fn register<T: Reflect>(&mut self) -> BenchResult<Arc<TypeInfo>> {
        if self.types.contains_key(T::TYPE_NAME) {
            return Err(BenchError::duplicate_definition("type", T::TYPE_NAME));
        }

        let info = Arc::new(TypeInfo::new(T::TYPE_NAME, T::constructors()));
        self.types.insert(T::TYPE_NAME, Arc::clone(&info));
        tracing::debug!(type_name = T::TYPE_NAME, "型を登録しました");
        Ok(info)
    }

    /// 型名から型情報を取得
    pub fn get(&self, type_name: &str) -> Option<&Arc<TypeInfo>> {
        self.types.get(type_name)
    }

    /// 登録済みの型名一覧（ソート済み）
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// 型名と引数値から実行時にインスタンスを生成する
pub struct Activator;

impl Activator {
    /// 型解決、シグネチャ照合、アンマーシャル、生成を毎回行う
    pub fn create_instance(
        registry: &TypeRegistry,
        type_name: &str,
        args: &[Value],
    ) -> BenchResult<Instance> {
        let info = registry
            .get(type_name)
            .ok_or_else(|| BenchError::type_not_found(type_name))?;

        let ctor = info.find_constructor(args).ok_or_else(|| {
            BenchError::constructor_not_found(
                type_name,
                signature_of(args.iter().map(Value::value_type)),
            )
        })?;

        ctor.invoke(args)
    }
}
