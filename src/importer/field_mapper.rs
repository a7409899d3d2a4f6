// ==========================================
// 商品目录导入 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射 + 类型转换
// 规则: 每个字段一张有序别名表，第一个存在且非空的列胜出；
//       新增别名只需追加表项，不改分支代码
// ==========================================

use crate::config::config_manager::defaults;
use crate::domain::{NormalizedProduct, RawRow};
use tracing::warn;

/// 标准商品字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Category,
    SellingPrice,
    CostPrice,
    StockQuantity,
    LowStockThreshold,
}

impl ProductField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Category => "category",
            ProductField::SellingPrice => "selling_price",
            ProductField::CostPrice => "cost_price",
            ProductField::StockQuantity => "stock_quantity",
            ProductField::LowStockThreshold => "low_stock_threshold",
        }
    }
}

/// 字段缺省值
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    /// 缺失即丢弃整行
    Required,
    Text(String),
    Number(f64),
}

/// 单个字段的映射规则：有序别名表 + 缺省值
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: ProductField,
    pub headers: Vec<String>,
    pub default: FieldDefault,
}

impl FieldRule {
    fn new(field: ProductField, headers: &[&str], default: FieldDefault) -> Self {
        Self {
            field,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            default,
        }
    }
}

// ==========================================
// ProductFieldMapper - 数据驱动的字段映射器
// ==========================================
#[derive(Debug, Clone)]
pub struct ProductFieldMapper {
    rules: Vec<FieldRule>,
}

impl Default for ProductFieldMapper {
    fn default() -> Self {
        Self {
            rules: vec![
                FieldRule::new(
                    ProductField::Name,
                    &["Product Name", "Name", "name"],
                    FieldDefault::Required,
                ),
                FieldRule::new(
                    ProductField::Category,
                    &["Category", "category"],
                    FieldDefault::Text(defaults::CATEGORY_NAME.to_string()),
                ),
                FieldRule::new(
                    ProductField::SellingPrice,
                    &["Selling Price", "Price", "price", "selling_price"],
                    FieldDefault::Number(0.0),
                ),
                FieldRule::new(
                    ProductField::CostPrice,
                    &["Cost Price", "Cost", "cost", "cost_price"],
                    FieldDefault::Number(0.0),
                ),
                FieldRule::new(
                    ProductField::StockQuantity,
                    &["Stock Quantity", "Stock", "stock", "stock_quantity", "Quantity"],
                    FieldDefault::Number(0.0),
                ),
                FieldRule::new(
                    ProductField::LowStockThreshold,
                    &["Low Stock Threshold", "Min Stock", "low_stock_threshold"],
                    FieldDefault::Number(defaults::LOW_STOCK_THRESHOLD as f64),
                ),
            ],
        }
    }
}

impl ProductFieldMapper {
    /// 追加一个列名别名（优先级最低）
    pub fn with_alias(mut self, field: ProductField, header: &str) -> Self {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.field == field) {
            if !rule.headers.iter().any(|h| h == header) {
                rule.headers.push(header.to_string());
            }
        }
        self
    }

    /// 覆盖缺省分类名称与缺省低库存阈值（来自配置）
    pub fn with_defaults(mut self, default_category: &str, default_low_stock_threshold: i64) -> Self {
        for rule in &mut self.rules {
            match rule.field {
                ProductField::Category => {
                    rule.default = FieldDefault::Text(default_category.to_string());
                }
                ProductField::LowStockThreshold => {
                    rule.default = FieldDefault::Number(default_low_stock_threshold as f64);
                }
                _ => {}
            }
        }
        self
    }

    /// 全部映射规则（模板导出使用）
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    fn rule(&self, field: ProductField) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// 按别名优先级取第一个非空单元格
    fn lookup<'r>(&self, row: &'r RawRow, field: ProductField) -> Option<&'r str> {
        let rule = self.rule(field)?;
        rule.headers
            .iter()
            .filter_map(|alias| row.get(alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }

    fn text(&self, row: &RawRow, field: ProductField) -> String {
        match self.lookup(row, field) {
            Some(value) => value.to_string(),
            None => match self.rule(field).map(|r| &r.default) {
                Some(FieldDefault::Text(default)) => default.clone(),
                _ => String::new(),
            },
        }
    }

    fn number(&self, row: &RawRow, field: ProductField, row_number: usize) -> f64 {
        let default = match self.rule(field).map(|r| &r.default) {
            Some(FieldDefault::Number(n)) => *n,
            _ => 0.0,
        };

        match self.lookup(row, field) {
            None => default,
            Some(raw) => match parse_number(raw) {
                Some(n) => n,
                None => {
                    warn!(
                        row_number,
                        field = field.as_str(),
                        raw_value = raw,
                        "数值无法解析，使用缺省值"
                    );
                    default
                }
            },
        }
    }

    fn count(&self, row: &RawRow, field: ProductField, row_number: usize) -> i64 {
        let n = self.number(row, field, row_number);
        (n.trunc() as i64).max(0)
    }

    /// 将原始行归一化为商品记录
    ///
    /// # 返回
    /// - Some(NormalizedProduct): 名称非空
    /// - None: 名称缺失/为空，行被丢弃
    pub fn normalize(&self, row: &RawRow, row_number: usize) -> Option<NormalizedProduct> {
        let name = self.lookup(row, ProductField::Name)?.to_string();

        Some(NormalizedProduct {
            name,
            category_name: self.text(row, ProductField::Category),
            selling_price: self.number(row, ProductField::SellingPrice, row_number),
            cost_price: self.number(row, ProductField::CostPrice, row_number),
            stock_quantity: self.count(row, ProductField::StockQuantity, row_number),
            low_stock_threshold: self.count(row, ProductField::LowStockThreshold, row_number),
            row_number,
        })
    }
}

/// 解析数值单元格（容忍千分位逗号与货币符号）
fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '¥' | '€' | '£' | ' '))
        .collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
