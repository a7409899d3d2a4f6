// ==========================================
// 商品目录导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 输入校验失败（空文件/无有效行）在落库前终止；
//       商品批量插入失败为终止性错误，携带存储层原始错误文本
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.xlsm/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 输入校验错误 =====
    #[error("文件为空: 未读取到任何数据行")]
    EmptyFile,

    #[error("没有有效数据行: 所有行均缺少商品名称")]
    NoValidRows,

    // ===== 落库错误 =====
    #[error("商品批量插入失败: {0}")]
    InsertFailed(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    // ===== 并发控制 =====
    #[error("已有导入任务正在进行")]
    Busy,

    // ===== 配置错误 =====
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
