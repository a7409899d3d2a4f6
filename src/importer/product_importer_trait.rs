// ==========================================
// 商品目录导入 - 导入器 Trait
// ==========================================
// 职责: 定义商品导入与文件解析接口（不包含实现）
// ==========================================

use crate::domain::{ImportSummary, RawRow, TenantId};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// ProductImporter Trait
// ==========================================
// 用途: 商品导入主接口
// 实现者: ProductImporterImpl
#[async_trait]
pub trait ProductImporter: Send + Sync {
    /// 从文件导入商品（Excel 第一个工作表或 CSV）
    ///
    /// # 参数
    /// - tenant: 租户
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(ImportSummary): 导入结果
    /// - Err: 文件错误 / 空文件 / 无有效行 / 插入失败
    ///
    /// # 导入流程
    /// 1. 文件解析（空 → EmptyFile）
    /// 2. 字段映射（别名表 + 缺省值）
    /// 3. 丢弃无名称行（全部丢弃 → NoValidRows）
    /// 4. 收集引用的分类名称
    /// 5. 读取现有分类，初始化解析表
    /// 6. 顺序创建缺失分类（失败仅记录）
    /// 7. 构建商品批次（解析分类 ID）
    /// 8. 单次批量插入
    async fn import_file(&self, tenant: &TenantId, file_path: &Path) -> ImportResult<ImportSummary>;

    /// 从上传的文件内容导入（扩展名取自 file_name）
    async fn import_bytes(
        &self,
        tenant: &TenantId,
        file_name: &str,
        bytes: &[u8],
    ) -> ImportResult<ImportSummary>;

    /// 对已解析的原始行执行导入（流程 1-8，解析步骤除外）
    async fn import_rows(&self, tenant: &TenantId, rows: Vec<RawRow>) -> ImportResult<ImportSummary>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: ExcelParser, CsvParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（已跳过完全空白的行）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;

    /// 解析上传的文件内容（格式由 file_name 的扩展名决定）
    ///
    /// # 返回
    /// - Err(UnsupportedFormat): 扩展名不属于该解析器
    fn parse_bytes_to_raw_rows(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Vec<RawRow>>;
}
