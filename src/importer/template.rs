// ==========================================
// 商品目录导入 - 导入模板导出
// ==========================================
// 用途: 生成可直接导入的 CSV 模板（表头取每个字段的首选别名）
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{ProductField, ProductFieldMapper};
use std::io::Write;

/// 示例行（与表头列一一对应）
fn sample_value(field: ProductField) -> &'static str {
    match field {
        ProductField::Name => "Sample Product",
        ProductField::Category => "General",
        ProductField::SellingPrice => "19.99",
        ProductField::CostPrice => "12.50",
        ProductField::StockQuantity => "100",
        ProductField::LowStockThreshold => "10",
    }
}

/// 写出导入模板
///
/// # 参数
/// - writer: 输出目标（文件/内存缓冲）
/// - mapper: 字段映射器，决定列顺序与表头
pub fn write_template<W: Write>(writer: W, mapper: &ProductFieldMapper) -> ImportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let headers: Vec<&str> = mapper
        .rules()
        .iter()
        .filter_map(|rule| rule.headers.first().map(String::as_str))
        .collect();
    csv_writer.write_record(&headers)?;

    let sample: Vec<&str> = mapper
        .rules()
        .iter()
        .filter(|rule| !rule.headers.is_empty())
        .map(|rule| sample_value(rule.field))
        .collect();
    csv_writer.write_record(&sample)?;

    csv_writer.flush()?;
    Ok(())
}
