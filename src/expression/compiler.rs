// 式木から命令列への変換とデリゲート生成

use super::{Expression, LambdaExpression, ParameterExpression};
use crate::core::{BenchError, BenchResult};
use crate::emit::{CtorDelegate, MethodBuilder, OpCode};
use crate::reflection::{signature_of, Value, ValueType};
use std::sync::Arc;

/// デリゲートが要求するパラメータ型
pub const DELEGATE_SIGNATURE: [ValueType; 3] =
    [ValueType::Int32, ValueType::Float64, ValueType::Object];

impl LambdaExpression {
    /// 匿名メソッドに変換してデリゲートを生成
    pub fn compile(&self) -> BenchResult<CtorDelegate> {
        let mut method = MethodBuilder::anonymous();
        self.compile_to_method(&mut method)?;
        method.create_delegate()
    }

    /// 指定したメソッドに本体の命令列を書き込む
    pub fn compile_to_method(&self, method: &mut MethodBuilder) -> BenchResult<()> {
        let signature = self.signature();
        if signature != DELEGATE_SIGNATURE {
            return Err(BenchError::signature_mismatch(
                format!("({}) -> Object", signature_of(DELEGATE_SIGNATURE)),
                format!("({}) -> Object", signature_of(signature)),
            ));
        }

        lower(self.body(), self.parameters(), method)?;
        method.emit(OpCode::Ret);
        Ok(())
    }
}

fn lower(
    expression: &Expression,
    parameters: &[ParameterExpression],
    method: &mut MethodBuilder,
) -> BenchResult<()> {
    match expression {
        Expression::Parameter(parameter) => {
            let index = parameters
                .iter()
                .position(|declared| declared == parameter)
                .and_then(|index| u8::try_from(index).ok())
                .ok_or_else(|| {
                    BenchError::invalid_expression(format!(
                        "パラメータを解決できません: {}",
                        parameter.name()
                    ))
                })?;
            method.emit(OpCode::Ldarg(index));
        }
        Expression::Constant(Value::Int32(value)) => method.emit(OpCode::LdcI4(*value)),
        Expression::Constant(Value::Float64(value)) => method.emit(OpCode::LdcR8(*value)),
        Expression::Constant(Value::Object(None)) => method.emit(OpCode::Ldnull),
        Expression::Constant(Value::Object(Some(_))) => {
            return Err(BenchError::invalid_expression(
                "null 以外のオブジェクト定数は命令列に埋め込めません",
            ));
        }
        Expression::New {
            constructor,
            arguments,
        } => {
            for argument in arguments {
                lower(argument, parameters, method)?;
            }
            method.emit(OpCode::Newobj(Arc::clone(constructor)));
        }
    }
    Ok(())
}
