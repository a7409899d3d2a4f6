// ==========================================
// 商品目录导入 - 应用层
// ==========================================
// 职责: 组装共享状态，供 CLI/界面宿主使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
