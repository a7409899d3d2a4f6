// ==========================================
// 商品目录导入 - 领域模型层
// ==========================================
// 职责: 定义租户、分类、商品与导入结果等领域类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod category;
pub mod import;
pub mod product;
pub mod tenant;

// 重导出核心类型
pub use category::{Category, NewCategory};
pub use import::{CategoryFailure, ImportSummary, NormalizedProduct, RawRow};
pub use product::{NewProduct, Product};
pub use tenant::TenantId;
