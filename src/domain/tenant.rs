// ==========================================
// 商品目录导入 - 租户标识
// ==========================================
// 用途: 所有记录与查询都按租户（business_id）隔离
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 租户标识（业务侧的 business_id，对本系统不透明）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// 创建租户标识
    ///
    /// 空白字符串返回 None
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_trims_whitespace() {
        let tenant = TenantId::new("  biz-001 ").unwrap();
        assert_eq!(tenant.as_str(), "biz-001");
        assert_eq!(tenant.to_string(), "biz-001");
    }

    #[test]
    fn test_tenant_id_rejects_blank() {
        assert!(TenantId::new("").is_none());
        assert!(TenantId::new("   ").is_none());
    }
}
