// ==========================================
// 商品目录导入 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::NewCategory;
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取缺省分类名称（行内未提供分类时使用）
    ///
    /// # 默认值
    /// - "Uncategorized"
    async fn get_default_category_name(&self) -> ImportResult<String>;

    /// 获取导入时新建分类的颜色
    ///
    /// # 默认值
    /// - "#6366f1"
    async fn get_new_category_color(&self) -> ImportResult<String>;

    /// 获取导入时新建分类的图标
    ///
    /// # 默认值
    /// - "package"
    async fn get_new_category_icon(&self) -> ImportResult<String>;

    /// 获取缺省低库存预警阈值
    ///
    /// # 默认值
    /// - 10
    async fn get_default_low_stock_threshold(&self) -> ImportResult<i64>;

    /// 组装新建分类模板（颜色 + 图标，名称留空）
    async fn get_new_category_template(&self) -> ImportResult<NewCategory> {
        Ok(NewCategory {
            name: String::new(),
            color: self.get_new_category_color().await?,
            icon: self.get_new_category_icon().await?,
        })
    }
}
