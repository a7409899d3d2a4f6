// ==========================================
// 商品目录导入 - 导入层
// ==========================================
// 职责: 表格文件 → 商品记录，按需补建分类
// 支持: Excel, CSV, 内存行
// ==========================================

// 模块声明
pub mod category_resolver;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod import_gate;
pub mod product_importer_impl;
pub mod product_importer_trait;
pub mod template;

// 重导出核心类型
pub use category_resolver::{
    distinct_category_names, resolve_or_create, CategoryResolution, CategoryResolutionMap,
};
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldDefault, FieldRule, ProductField, ProductFieldMapper};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use import_gate::{ImportGate, ImportPermit};
pub use product_importer_impl::ProductImporterImpl;
pub use template::write_template;

// 重导出 Trait 接口
pub use product_importer_trait::{FileParser, ProductImporter};
