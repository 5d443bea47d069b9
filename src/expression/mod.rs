//! 式木モジュール
//!
//! 「与えられた引数でコンストラクタを呼び出す」という処理を
//! データとして表現し、実行時にデリゲートへコンパイルする。

pub mod compiler;

use crate::core::{BenchError, BenchResult};
use crate::reflection::{signature_of, ConstructorInfo, Value, ValueType};
use std::collections::HashSet;
use std::sync::Arc;

/// 型付きのパラメータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterExpression {
    name: String,
    ty: ValueType,
}

impl ParameterExpression {
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ValueType {
        self.ty
    }
}

/// 式ノード
#[derive(Debug, Clone)]
pub enum Expression {
    Parameter(ParameterExpression),
    Constant(Value),
    New {
        constructor: Arc<ConstructorInfo>,
        arguments: Vec<Expression>,
    },
}

impl From<ParameterExpression> for Expression {
    fn from(parameter: ParameterExpression) -> Self {
        Self::Parameter(parameter)
    }
}

impl Expression {
    pub fn parameter(name: impl Into<String>, ty: ValueType) -> Self {
        Self::Parameter(ParameterExpression::new(name, ty))
    }

    pub fn constant(value: Value) -> Self {
        Self::Constant(value)
    }

    /// コンストラクタ呼び出し式を作成（引数の個数と型を検証）
    pub fn new_object(
        constructor: Arc<ConstructorInfo>,
        arguments: Vec<Expression>,
    ) -> BenchResult<Self> {
        let expected: Vec<_> = constructor.parameter_types().collect();
        let actual: Vec<_> = arguments.iter().map(Expression::ty).collect();

        if expected != actual {
            return Err(BenchError::invalid_expression(format!(
                "{}({}) を ({}) で呼び出すことはできません",
                constructor.declaring_type(),
                signature_of(expected),
                signature_of(actual),
            )));
        }

        Ok(Self::New {
            constructor,
            arguments,
        })
    }

    /// 式の評価結果の型
    pub fn ty(&self) -> ValueType {
        match self {
            Self::Parameter(parameter) => parameter.ty,
            Self::Constant(value) => value.value_type(),
            Self::New { .. } => ValueType::Object,
        }
    }

    fn visit_parameters<'a>(&'a self, found: &mut Vec<&'a ParameterExpression>) {
        match self {
            Self::Parameter(parameter) => found.push(parameter),
            Self::Constant(_) => {}
            Self::New { arguments, .. } => {
                for argument in arguments {
                    argument.visit_parameters(found);
                }
            }
        }
    }
}

/// パラメータ列と本体を束ねたラムダ式
#[derive(Debug, Clone)]
pub struct LambdaExpression {
    parameters: Vec<ParameterExpression>,
    body: Expression,
}

impl LambdaExpression {
    /// ラムダ式を作成
    ///
    /// 本体はコンストラクタ呼び出しでなければならず、
    /// 本体が参照するパラメータはすべて宣言されている必要がある。
    pub fn new(body: Expression, parameters: Vec<ParameterExpression>) -> BenchResult<Self> {
        if !matches!(body, Expression::New { .. }) {
            return Err(BenchError::invalid_expression(
                "ラムダ式の本体はコンストラクタ呼び出しである必要があります",
            ));
        }

        let mut names = HashSet::new();
        if let Some(duplicate) = parameters.iter().find(|p| !names.insert(p.name.as_str())) {
            return Err(BenchError::invalid_expression(format!(
                "パラメータ名が重複しています: {}",
                duplicate.name
            )));
        }

        let mut referenced = Vec::new();
        body.visit_parameters(&mut referenced);
        if let Some(undeclared) = referenced.iter().find(|p| !parameters.contains(**p)) {
            return Err(BenchError::invalid_expression(format!(
                "未宣言のパラメータを参照しています: {} ({})",
                undeclared.name, undeclared.ty
            )));
        }

        Ok(Self { parameters, body })
    }

    pub fn parameters(&self) -> &[ParameterExpression] {
        &self.parameters
    }

    pub fn body(&self) -> &Expression {
        &self.body
    }

    /// パラメータの型の並び
    pub fn signature(&self) -> Vec<ValueType> {
        self.parameters.iter().map(|p| p.ty).collect()
    }
}
