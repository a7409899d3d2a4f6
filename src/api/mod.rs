// ==========================================
// 商品目录导入 - API 层
// ==========================================
// 职责: 提供面向界面/CLI 的导入接口
// ==========================================

pub mod error;
pub mod import_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse};
