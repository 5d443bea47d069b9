// 動的モジュール・型・メソッドの構築

use super::il::{disassemble, OpCode};
use super::{jit, CtorDelegate};
use crate::core::{BenchError, BenchResult};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// `<prefix>_<uuid>` 形式の一意な名前を生成
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// メソッド本体の命令列を組み立てる
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    name: String,
    code: Vec<OpCode>,
}

impl MethodBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: Vec::new(),
        }
    }

    /// 型に属さない匿名メソッド
    pub fn anonymous() -> Self {
        Self::new("lambda_method")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn emit(&mut self, op: OpCode) {
        self.code.push(op);
    }

    pub fn code(&self) -> &[OpCode] {
        &self.code
    }

    /// 命令列を検証してデリゲートを生成
    pub fn create_delegate(&self) -> BenchResult<CtorDelegate> {
        jit::compile(&self.name, &self.code)
    }
}

/// 定義中の型
#[derive(Debug)]
pub struct TypeBuilder {
    name: String,
    methods: Vec<MethodBuilder>,
}

impl TypeBuilder {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 静的メソッドを定義
    pub fn define_method(&mut self, name: &str) -> BenchResult<&mut MethodBuilder> {
        if self.methods.iter().any(|m| m.name == name) {
            return Err(BenchError::duplicate_definition(
                "method",
                format!("{}::{name}", self.name),
            ));
        }

        self.methods.push(MethodBuilder::new(name));
        let index = self.methods.len() - 1;
        Ok(&mut self.methods[index])
    }

    /// 全メソッドを検証し、型をモジュールに登録する
    pub fn create_type(self, module: &mut DynamicModule) -> BenchResult<Arc<RuntimeType>> {
        if module.types.contains_key(&self.name) {
            return Err(BenchError::duplicate_definition("type", self.name));
        }

        let mut methods = HashMap::with_capacity(self.methods.len());
        for method in self.methods {
            jit::verify(&method.name, &method.code)?;
            tracing::trace!(
                type_name = %self.name,
                method = %method.name,
                "\n{}",
                disassemble(&method.code)
            );

            let runtime = RuntimeMethod {
                name: method.name.clone(),
                declaring_type: self.name.clone(),
                code: method.code.into(),
            };
            methods.insert(method.name, Arc::new(runtime));
        }

        let runtime_type = Arc::new(RuntimeType {
            name: self.name.clone(),
            methods,
        });
        module.types.insert(self.name, Arc::clone(&runtime_type));
        Ok(runtime_type)
    }
}

/// 生成済みの型
#[derive(Debug)]
pub struct RuntimeType {
    name: String,
    methods: HashMap<String, Arc<RuntimeMethod>>,
}

impl RuntimeType {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 名前でメソッドを検索
    pub fn get_method(&self, name: &str) -> Option<Arc<RuntimeMethod>> {
        self.methods.get(name).cloned()
    }
}

/// 検証済みのメソッド
#[derive(Debug)]
pub struct RuntimeMethod {
    name: String,
    declaring_type: String,
    code: Arc<[OpCode]>,
}

impl RuntimeMethod {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn code(&self) -> &[OpCode] {
        &self.code
    }

    /// 呼び出し可能なハンドルを生成
    pub fn create_delegate(&self) -> BenchResult<CtorDelegate> {
        jit::compile(&self.name, &self.code)
    }
}

/// 動的に生成した型を保持するコンテナ
///
/// 生成された型はプロセス終了まで解放されない。
#[derive(Debug)]
pub struct DynamicModule {
    name: String,
    types: HashMap<String, Arc<RuntimeType>>,
}

impl DynamicModule {
    /// `<prefix>_<uuid>` という名前でモジュールを作成
    pub fn define(prefix: &str) -> Self {
        let name = unique_name(prefix);
        tracing::debug!(module = %name, "動的モジュールを作成しました");
        Self {
            name,
            types: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 型の定義を開始
    pub fn define_type(&self, name: impl Into<String>) -> BenchResult<TypeBuilder> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(BenchError::duplicate_definition("type", name));
        }

        Ok(TypeBuilder {
            name,
            methods: Vec::new(),
        })
    }

    pub fn get_type(&self, name: &str) -> Option<Arc<RuntimeType>> {
        self.types.get(name).cloned()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}
