// ==========================================
// 商品目录导入 - 商品导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到数据库
// 流程: 解析 → 映射 → 过滤 → 分类对账 → 构建批次 → 批量落库
// 副作用: 分类在商品插入前创建，插入失败时不回滚
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::{ImportSummary, NewProduct, NormalizedProduct, RawRow, TenantId};
use crate::importer::category_resolver::{
    distinct_category_names, resolve_or_create, CategoryResolutionMap,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::ProductFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::product_importer_trait::{FileParser, ProductImporter};
use crate::repository::CatalogRepository;
use async_trait::async_trait;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// ProductImporterImpl - 商品导入器实现
// ==========================================
pub struct ProductImporterImpl<R, C>
where
    R: CatalogRepository,
    C: ImportConfigReader,
{
    // 数据访问层
    repo: R,

    // 配置读取器
    config: C,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: ProductFieldMapper,
}

impl<R, C> ProductImporterImpl<R, C>
where
    R: CatalogRepository,
    C: ImportConfigReader,
{
    /// 创建新的 ProductImporter 实例
    ///
    /// # 参数
    /// - repo: 目录仓储
    /// - config: 配置读取器
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器（缺省值会在每次导入时按配置覆盖）
    pub fn new(
        repo: R,
        config: C,
        file_parser: Box<dyn FileParser>,
        field_mapper: ProductFieldMapper,
    ) -> Self {
        Self {
            repo,
            config,
            file_parser,
            field_mapper,
        }
    }

    /// 使用默认解析器与映射表创建
    pub fn with_defaults(repo: R, config: C) -> Self {
        Self::new(
            repo,
            config,
            Box::new(UniversalFileParser),
            ProductFieldMapper::default(),
        )
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// 按当前配置生成本次导入使用的映射器
    async fn effective_mapper(&self) -> ImportResult<ProductFieldMapper> {
        let default_category = self.config.get_default_category_name().await?;
        let default_threshold = self.config.get_default_low_stock_threshold().await?;
        Ok(self
            .field_mapper
            .clone()
            .with_defaults(&default_category, default_threshold))
    }

    /// 构建商品批次（小写查找 → 原样查找 → 未分类）
    fn build_products(
        products: &[NormalizedProduct],
        map: &CategoryResolutionMap,
    ) -> Vec<NewProduct> {
        products
            .iter()
            .map(|p| NewProduct {
                name: p.name.clone(),
                category_id: map.resolve(&p.category_name).map(str::to_string),
                selling_price: p.selling_price,
                cost_price: p.cost_price,
                stock_quantity: p.stock_quantity,
                low_stock_threshold: p.low_stock_threshold,
                is_active: true,
            })
            .collect()
    }
}

#[async_trait]
impl<R, C> ProductImporter for ProductImporterImpl<R, C>
where
    R: CatalogRepository,
    C: ImportConfigReader,
{
    #[instrument(skip(self, file_path), fields(tenant = %tenant, file = %file_path.display()))]
    async fn import_file(&self, tenant: &TenantId, file_path: &Path) -> ImportResult<ImportSummary> {
        debug!("步骤 1: 解析文件");
        let rows = self.file_parser.parse_to_raw_rows(file_path).map_err(|e| {
            error!(error = %e, "文件解析失败");
            e
        })?;
        info!(total_rows = rows.len(), "文件解析完成");

        self.import_rows(tenant, rows).await
    }

    #[instrument(skip(self, bytes), fields(tenant = %tenant, size = bytes.len()))]
    async fn import_bytes(
        &self,
        tenant: &TenantId,
        file_name: &str,
        bytes: &[u8],
    ) -> ImportResult<ImportSummary> {
        debug!("步骤 1: 解析上传内容");
        let rows = self
            .file_parser
            .parse_bytes_to_raw_rows(file_name, bytes)
            .map_err(|e| {
                error!(error = %e, "文件解析失败");
                e
            })?;
        info!(total_rows = rows.len(), "文件解析完成");

        self.import_rows(tenant, rows).await
    }

    #[instrument(skip(self, rows), fields(tenant = %tenant, batch_id))]
    async fn import_rows(&self, tenant: &TenantId, rows: Vec<RawRow>) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let total_rows = rows.len();
        if total_rows == 0 {
            info!("文件无数据行，终止导入");
            return Err(ImportError::EmptyFile);
        }

        // === 步骤 2-3: 字段映射 + 过滤无名称行 ===
        debug!("步骤 2: 字段映射");
        let mapper = self.effective_mapper().await?;
        let products: Vec<NormalizedProduct> = rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| mapper.normalize(row, idx + 1))
            .collect();
        let skipped_rows = total_rows - products.len();
        info!(
            valid = products.len(),
            skipped = skipped_rows,
            "字段映射完成"
        );

        if products.is_empty() {
            info!("没有有效数据行，终止导入");
            return Err(ImportError::NoValidRows);
        }

        // === 步骤 4-6: 分类对账 ===
        debug!("步骤 3: 分类对账");
        let names = distinct_category_names(&products);
        let template = self.config.get_new_category_template().await?;
        let resolution = resolve_or_create(&self.repo, tenant, &names, &template).await?;

        // === 步骤 7: 构建商品批次 ===
        debug!("步骤 4: 构建商品批次");
        let batch = Self::build_products(&products, &resolution.map);
        let uncategorized = batch.iter().filter(|p| p.category_id.is_none()).count();

        // === 步骤 8: 批量插入 ===
        debug!(count = batch.len(), "步骤 5: 批量插入商品");
        let imported = self
            .repo
            .batch_insert_products(tenant, batch)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    categories_created = resolution.created.len(),
                    "商品批量插入失败，已创建的分类不回滚"
                );
                ImportError::InsertFailed(e.to_string())
            })?;

        let elapsed = start_time.elapsed();
        info!(
            batch_id = %batch_id,
            total = total_rows,
            imported,
            categories_created = resolution.created.len(),
            uncategorized,
            elapsed_ms = elapsed.as_millis() as u64,
            "商品导入完成"
        );

        Ok(ImportSummary {
            batch_id,
            total_rows,
            valid_rows: products.len(),
            skipped_rows,
            imported,
            categories_created: resolution.created,
            category_failures: resolution.failures,
            uncategorized,
            elapsed,
        })
    }
}
