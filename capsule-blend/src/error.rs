//! # Error 模块
//!
//! 定义 capsule-blend 中使用的错误类型。
//!
//! 会话生命周期（begin / tick / end）本身从不返回错误，失败一律退化为不操作；
//! 错误只出现在配置的加载、保存与校验中。

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读写配置文件失败
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置解析失败
    #[error("配置解析失败: {0}")]
    Parse(#[source] serde_json::Error),

    /// 配置序列化失败
    #[error("配置序列化失败: {0}")]
    Serialize(#[source] serde_json::Error),

    /// 字段取值无效
    #[error("配置验证失败: 字段 '{field}' {message}")]
    Validation { field: String, message: String },
}

impl ConfigError {
    /// 创建校验错误
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type BlendResult<T> = Result<T, ConfigError>;
