// ==========================================
// 商品目录导入 - 导入忙碌标记
// ==========================================
// 用途: 导入进行中禁止再次触发（对应界面上禁用导入按钮）
// 约束: 标记随 ImportPermit 释放，成功/失败/提前返回都会复位
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ImportGate {
    busy: Arc<AtomicBool>,
}

impl ImportGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取导入许可
    ///
    /// # 返回
    /// - Ok(ImportPermit): 获取成功，持有期间标记为忙碌
    /// - Err(ImportError::Busy): 已有导入在进行
    pub fn try_acquire(&self) -> ImportResult<ImportPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ImportError::Busy)?;

        Ok(ImportPermit {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// 导入许可，Drop 时释放忙碌标记
#[derive(Debug)]
pub struct ImportPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for ImportPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
