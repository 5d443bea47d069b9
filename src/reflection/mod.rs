//! 実行時型情報モジュール
//!
//! 型名からコンストラクタ記述子を引くレジストリを提供する。
//! 呼び出し時に引数シグネチャでコンストラクタを解決し、
//! ボックス化された引数をアンマーシャルして生成する。

pub mod registry;

pub use registry::{Activator, TypeRegistry};

use crate::core::{BenchError, BenchResult, CtorSource, Instance};
use std::fmt;
use std::sync::Arc;

/// 引数・スタック値の型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int32,
    Float64,
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int32 => "Int32",
            Self::Float64 => "Float64",
            Self::Object => "Object",
        };
        f.write_str(name)
    }
}

/// ボックス化された引数値
#[derive(Debug, Clone)]
pub enum Value {
    Int32(i32),
    Float64(f64),
    Object(Option<Instance>),
}

impl Value {
    /// null参照
    pub const fn null() -> Self {
        Self::Object(None)
    }

    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Int32(_) => ValueType::Int32,
            Self::Float64(_) => ValueType::Float64,
            Self::Object(_) => ValueType::Object,
        }
    }

    /// nullは任意のオブジェクト型パラメータに代入可能
    pub fn is_assignable_to(&self, ty: ValueType) -> bool {
        self.value_type() == ty
    }
}

/// 型の並びを `Int32, Float64, Object` 形式で表示
pub fn signature_of<I>(types: I) -> String
where
    I: IntoIterator<Item = ValueType>,
{
    types
        .into_iter()
        .map(|ty| ty.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// コンストラクタのパラメータ情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: &'static str,
    pub ty: ValueType,
}

/// ネイティブのコンストラクタ本体
pub type NativeCtor = fn(i32, f64, Option<Instance>) -> Instance;

/// コンストラクタ記述子
///
/// ネイティブ関数は `(Int32, Float64, Object)` 形状に固定される。
/// JITはこの関数を直接呼び出し、リフレクション経路は
/// ボックス化された引数をアンマーシャルしてから呼び出す。
#[derive(Debug)]
pub struct ConstructorInfo {
    declaring_type: &'static str,
    parameters: Vec<ParameterInfo>,
    entry: NativeCtor,
}

impl ConstructorInfo {
    pub fn new(declaring_type: &'static str, names: [&'static str; 3], entry: NativeCtor) -> Self {
        let [i, level, parent] = names;
        Self {
            declaring_type,
            parameters: vec![
                ParameterInfo {
                    name: i,
                    ty: ValueType::Int32,
                },
                ParameterInfo {
                    name: level,
                    ty: ValueType::Float64,
                },
                ParameterInfo {
                    name: parent,
                    ty: ValueType::Object,
                },
            ],
            entry,
        }
    }

    pub fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    pub fn parameter_types(&self) -> impl Iterator<Item = ValueType> + '_ {
        self.parameters.iter().map(|p| p.ty)
    }

    pub fn entry(&self) -> NativeCtor {
        self.entry
    }

    /// 引数列がこのコンストラクタに適合するか
    pub fn accepts(&self, args: &[Value]) -> bool {
        args.len() == self.parameters.len()
            && args
                .iter()
                .zip(&self.parameters)
                .all(|(arg, param)| arg.is_assignable_to(param.ty))
    }

    /// ボックス化された引数をアンマーシャルして生成
    pub fn invoke(&self, args: &[Value]) -> BenchResult<Instance> {
        match args {
            [Value::Int32(i), Value::Float64(level), Value::Object(parent)] => {
                Ok((self.entry)(*i, *level, parent.clone()))
            }
            _ => Err(BenchError::argument_mismatch(format!(
                "{}({}) に ({}) は渡せません",
                self.declaring_type,
                signature_of(self.parameter_types()),
                signature_of(args.iter().map(Value::value_type)),
            ))),
        }
    }
}

/// 登録済みの型情報
#[derive(Debug)]
pub struct TypeInfo {
    name: &'static str,
    constructors: Vec<Arc<ConstructorInfo>>,
}

impl TypeInfo {
    pub fn new(name: &'static str, constructors: Vec<ConstructorInfo>) -> Self {
        Self {
            name,
            constructors: constructors.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn constructors(&self) -> &[Arc<ConstructorInfo>] {
        &self.constructors
    }

    /// 引数値によるコンストラクタ解決（呼び出し時）
    pub fn find_constructor(&self, args: &[Value]) -> Option<&Arc<ConstructorInfo>> {
        self.constructors.iter().find(|ctor| ctor.accepts(args))
    }

    /// パラメータ型の完全一致によるコンストラクタ取得（式構築時）
    pub fn get_constructor(&self, types: &[ValueType]) -> Option<Arc<ConstructorInfo>> {
        self.constructors
            .iter()
            .find(|ctor| ctor.parameter_types().eq(types.iter().copied()))
            .cloned()
    }
}

/// レジストリに登録可能な型
pub trait Reflect {
    const TYPE_NAME: &'static str;

    fn constructors() -> Vec<ConstructorInfo>;
}

impl Reflect for CtorSource {
    const TYPE_NAME: &'static str = "CtorStats.CtorSource";

    fn constructors() -> Vec<ConstructorInfo> {
        vec![ConstructorInfo::new(
            Self::TYPE_NAME,
            ["i", "level", "parent"],
            CtorSource::allocate,
        )]
    }
}
