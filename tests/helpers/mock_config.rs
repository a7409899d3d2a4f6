// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use catalog_importer::config::ImportConfigReader;
use catalog_importer::importer::ImportResult;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub default_category_name: String,
    pub new_category_color: String,
    pub new_category_icon: String,
    pub default_low_stock_threshold: i64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_category_name: "Uncategorized".to_string(),
            new_category_color: "#6366f1".to_string(),
            new_category_icon: "package".to_string(),
            default_low_stock_threshold: 10,
        }
    }
}

impl MockConfig {
    /// 自定义缺省分类与阈值
    pub fn with_defaults(category: &str, threshold: i64) -> Self {
        Self {
            default_category_name: category.to_string(),
            default_low_stock_threshold: threshold,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ImportConfigReader for MockConfig {
    async fn get_default_category_name(&self) -> ImportResult<String> {
        Ok(self.default_category_name.clone())
    }

    async fn get_new_category_color(&self) -> ImportResult<String> {
        Ok(self.new_category_color.clone())
    }

    async fn get_new_category_icon(&self) -> ImportResult<String> {
        Ok(self.new_category_icon.clone())
    }

    async fn get_default_low_stock_threshold(&self) -> ImportResult<i64> {
        Ok(self.default_low_stock_threshold)
    }
}
