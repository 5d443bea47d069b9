// ベンチマークハーネス専用のカスタムエラー型定義

use thiserror::Error;

/// コード生成・リフレクション・計測で発生するエラー型
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("型が見つかりません: {type_name}")]
    TypeNotFound { type_name: String },

    #[error("コンストラクタが見つかりません: {type_name}({signature})")]
    ConstructorNotFound { type_name: String, signature: String },

    #[error("引数の不一致: {message}")]
    ArgumentMismatch { message: String },

    #[error("無効な式: {message}")]
    InvalidExpression { message: String },

    #[error("シグネチャ不一致: 期待値 {expected}, 実際 {actual}")]
    SignatureMismatch { expected: String, actual: String },

    #[error("重複定義: {kind} {name}")]
    DuplicateDefinition { kind: String, name: String },

    #[error("メソッドが見つかりません: {type_name}::{method}")]
    MethodNotFound { type_name: String, method: String },

    #[error("無効なプログラム: {method} - {reason}")]
    InvalidProgram { method: String, reason: String },

    #[error("入出力エラー: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("シリアライズエラー: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("内部エラー: {source}")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl BenchError {
    /// 型未登録エラーの作成
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        Self::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// コンストラクタ解決失敗エラーの作成
    pub fn constructor_not_found(type_name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::ConstructorNotFound {
            type_name: type_name.into(),
            signature: signature.into(),
        }
    }

    /// 引数不一致エラーの作成
    pub fn argument_mismatch(message: impl Into<String>) -> Self {
        Self::ArgumentMismatch {
            message: message.into(),
        }
    }

    /// 無効な式エラーの作成
    pub fn invalid_expression(message: impl Into<String>) -> Self {
        Self::InvalidExpression {
            message: message.into(),
        }
    }

    /// シグネチャ不一致エラーの作成
    pub fn signature_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::SignatureMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// 重複定義エラーの作成
    pub fn duplicate_definition(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// メソッド未定義エラーの作成
    pub fn method_not_found(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            type_name: type_name.into(),
            method: method.into(),
        }
    }

    /// IL検証エラーの作成
    pub fn invalid_program(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProgram {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// 内部エラーの作成
    pub fn internal(source: anyhow::Error) -> Self {
        Self::Internal { source }
    }

    /// ログ出力用のエラー分類を取得
    pub const fn category(&self) -> &'static str {
        match self {
            Self::TypeNotFound { .. }
            | Self::ConstructorNotFound { .. }
            | Self::ArgumentMismatch { .. } => "reflection",
            Self::InvalidExpression { .. } | Self::SignatureMismatch { .. } => "expression",
            Self::DuplicateDefinition { .. }
            | Self::MethodNotFound { .. }
            | Self::InvalidProgram { .. } => "emit",
            Self::Io { .. } | Self::Serialization { .. } => "report",
            Self::Internal { .. } => "internal",
        }
    }
}

impl From<anyhow::Error> for BenchError {
    fn from(error: anyhow::Error) -> Self {
        BenchError::Internal { source: error }
    }
}

/// ハーネス全体の結果型
pub type BenchResult<T> = std::result::Result<T, BenchError>;
