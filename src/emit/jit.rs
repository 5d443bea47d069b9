//! 命令列からネイティブクロージャへの変換
//!
//! 命令列を抽象的に実行し、スタックの各スロットを型付きのクロージャとして
//! 組み立てる。型の整合しない命令列は生成前にエラーとなるため、
//! 生成されたデリゲートは実行時に型検査を行わない。

use super::il::OpCode;
use super::CtorDelegate;
use crate::core::{BenchError, BenchResult, Instance};
use std::sync::Arc;

/// デリゲート呼び出し時の引数
struct Frame {
    arg0: i32,
    arg1: f64,
    arg2: Option<Instance>,
}

type Thunk<T> = Box<dyn Fn(&Frame) -> T + Send + Sync>;

/// 評価スタック上の1スロット
enum Operand {
    Int32(Thunk<i32>),
    Float64(Thunk<f64>),
    /// nullになり得る参照
    Object(Thunk<Option<Instance>>),
    /// newobjの結果（常に非null）
    Instance(Thunk<Instance>),
}

impl Operand {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Int32(_) => "Int32",
            Self::Float64(_) => "Float64",
            Self::Object(_) => "Object",
            Self::Instance(_) => "Instance",
        }
    }
}

struct Emitter<'a> {
    method: &'a str,
    stack: Vec<Operand>,
}

impl<'a> Emitter<'a> {
    fn new(method: &'a str) -> Self {
        Self {
            method,
            stack: Vec::new(),
        }
    }

    fn error(&self, offset: usize, reason: impl std::fmt::Display) -> BenchError {
        BenchError::invalid_program(self.method, format!("IL_{offset:04}: {reason}"))
    }

    fn pop(&mut self, offset: usize) -> BenchResult<Operand> {
        self.stack
            .pop()
            .ok_or_else(|| self.error(offset, "スタックアンダーフロー"))
    }

    fn pop_int(&mut self, offset: usize) -> BenchResult<Thunk<i32>> {
        match self.pop(offset)? {
            Operand::Int32(thunk) => Ok(thunk),
            other => Err(self.error(offset, format!("Int32 が必要ですが {} です", other.kind()))),
        }
    }

    fn pop_float(&mut self, offset: usize) -> BenchResult<Thunk<f64>> {
        match self.pop(offset)? {
            Operand::Float64(thunk) => Ok(thunk),
            other => Err(self.error(
                offset,
                format!("Float64 が必要ですが {} です", other.kind()),
            )),
        }
    }

    fn pop_object(&mut self, offset: usize) -> BenchResult<Thunk<Option<Instance>>> {
        match self.pop(offset)? {
            Operand::Object(thunk) => Ok(thunk),
            Operand::Instance(thunk) => Ok(Box::new(move |frame: &Frame| Some(thunk(frame)))),
            other => Err(self.error(
                offset,
                format!("Object が必要ですが {} です", other.kind()),
            )),
        }
    }

    fn step(&mut self, offset: usize, op: &OpCode) -> BenchResult<()> {
        let operand = match op {
            OpCode::Ldarg(0) => Operand::Int32(Box::new(|frame: &Frame| frame.arg0)),
            OpCode::Ldarg(1) => Operand::Float64(Box::new(|frame: &Frame| frame.arg1)),
            OpCode::Ldarg(2) => Operand::Object(Box::new(|frame: &Frame| frame.arg2.clone())),
            OpCode::Ldarg(index) => {
                return Err(self.error(offset, format!("引数 {index} は範囲外です")));
            }
            OpCode::LdcI4(value) => {
                let value = *value;
                Operand::Int32(Box::new(move |_: &Frame| value))
            }
            OpCode::LdcR8(value) => {
                let value = *value;
                Operand::Float64(Box::new(move |_: &Frame| value))
            }
            OpCode::Ldnull => Operand::Object(Box::new(|_: &Frame| None)),
            OpCode::Newobj(ctor) => {
                let arity = ctor.parameters().len();
                if self.stack.len() < arity {
                    return Err(self.error(
                        offset,
                        format!(
                            "スタックアンダーフロー: newobj には {arity} 個の値が必要ですが {} 個です",
                            self.stack.len()
                        ),
                    ));
                }
                // 引数は右から順に積まれている
                let parent = self.pop_object(offset)?;
                let level = self.pop_float(offset)?;
                let i = self.pop_int(offset)?;
                let entry = ctor.entry();
                Operand::Instance(Box::new(move |frame: &Frame| {
                    entry(i(frame), level(frame), parent(frame))
                }))
            }
            OpCode::Ret => {
                return Err(self.error(offset, "ret の後に命令があります"));
            }
        };
        self.stack.push(operand);
        Ok(())
    }

    fn finish(mut self, offset: usize) -> BenchResult<Thunk<Instance>> {
        let body = match self.pop(offset)? {
            Operand::Instance(thunk) => thunk,
            Operand::Object(_) => {
                return Err(self.error(offset, "戻り値が null になり得ます"));
            }
            other => {
                return Err(self.error(
                    offset,
                    format!("戻り値は Object である必要がありますが {} です", other.kind()),
                ));
            }
        };

        if !self.stack.is_empty() {
            return Err(self.error(
                offset,
                format!("ret 時にスタックに {} 個の値が残っています", self.stack.len()),
            ));
        }
        Ok(body)
    }
}

/// 命令列をデリゲートに変換
pub fn compile(method: &str, code: &[OpCode]) -> BenchResult<CtorDelegate> {
    let Some((OpCode::Ret, body)) = code.split_last() else {
        return Err(BenchError::invalid_program(
            method,
            "命令列が ret で終わっていません",
        ));
    };

    let mut emitter = Emitter::new(method);
    for (offset, op) in body.iter().enumerate() {
        emitter.step(offset, op)?;
    }
    let thunk = emitter.finish(body.len())?;

    let delegate: CtorDelegate =
        Arc::new(move |arg0: i32, arg1: f64, arg2: Option<Instance>| {
            thunk(&Frame { arg0, arg1, arg2 })
        });
    Ok(delegate)
}

/// 命令列の検証のみ行う
///
/// 変換と同じ規則で検査し、生成したクロージャは破棄する。
pub fn verify(method: &str, code: &[OpCode]) -> BenchResult<()> {
    compile(method, code).map(|_| ())
}
