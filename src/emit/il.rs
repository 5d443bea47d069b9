// 中間命令セット

use crate::reflection::ConstructorInfo;
use std::fmt;
use std::sync::Arc;

/// スタックマシン命令
#[derive(Debug, Clone)]
pub enum OpCode {
    /// n番目の引数をロード
    Ldarg(u8),
    /// 32bit整数定数をロード
    LdcI4(i32),
    /// 64bit浮動小数点定数をロード
    LdcR8(f64),
    /// null参照をロード
    Ldnull,
    /// スタック上の引数でコンストラクタを呼び出す
    Newobj(Arc<ConstructorInfo>),
    /// スタック先頭を返す
    Ret,
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ldarg(index) => write!(f, "ldarg.{index}"),
            Self::LdcI4(value) => write!(f, "ldc.i4 {value}"),
            Self::LdcR8(value) => write!(f, "ldc.r8 {value:?}"),
            Self::Ldnull => f.write_str("ldnull"),
            Self::Newobj(ctor) => write!(
                f,
                "newobj {}({})",
                ctor.declaring_type(),
                crate::reflection::signature_of(ctor.parameter_types())
            ),
            Self::Ret => f.write_str("ret"),
        }
    }
}

/// 命令列を1行1命令のリストにする（ログ用）
pub fn disassemble(code: &[OpCode]) -> String {
    code.iter()
        .enumerate()
        .map(|(offset, op)| format!("IL_{offset:04}: {op}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CtorSource;
    use crate::reflection::Reflect;

    #[test]
    fn test_disassemble() {
        let ctor = Arc::new(CtorSource::constructors().remove(0));
        let code = vec![
            OpCode::Ldarg(0),
            OpCode::LdcR8(1.0),
            OpCode::Ldnull,
            OpCode::Newobj(ctor),
            OpCode::Ret,
        ];

        let listing = disassemble(&code);
        assert_eq!(
            listing,
            "IL_0000: ldarg.0\n\
             IL_0001: ldc.r8 1.0\n\
             IL_0002: ldnull\n\
             IL_0003: newobj CtorStats.CtorSource(Int32, Float64, Object)\n\
             IL_0004: ret"
        );
    }
}
