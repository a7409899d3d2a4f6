// ==========================================
// 商品目录导入 - 提示文案
// ==========================================
// 文案来自 locales/*.yml（zh-CN 为默认与回退语言）
// 键空间: import.* / seed.* / template.*
// 占位符写法: %{name}
// ==========================================

/// 可选语言（第一个为默认）
pub const SUPPORTED_LOCALES: &[&str] = &["zh-CN", "en"];

/// 当前提示语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 将外部传入的语言标记归一到可选语言
///
/// "en-US" / "en_GB" → "en"，"zh" / "zh_CN" → "zh-CN"；无法识别时返回 None
pub fn normalize_locale(raw: &str) -> Option<&'static str> {
    let tag = raw.trim().replace('_', "-").to_lowercase();
    let primary = tag.split('-').next().unwrap_or("");
    match primary {
        "zh" => Some("zh-CN"),
        "en" => Some("en"),
        _ => None,
    }
}

/// 切换提示语言；无法识别的语言保持当前设置并返回 false
pub fn set_locale(raw: &str) -> bool {
    match normalize_locale(raw) {
        Some(locale) => {
            rust_i18n::set_locale(locale);
            true
        }
        None => {
            tracing::warn!(locale = raw, current = %current_locale(), "不支持的提示语言，保持原设置");
            false
        }
    }
}

/// 取文案；键缺失时按 zh-CN 回退
///
/// ```no_run
/// use catalog_importer::i18n::t;
/// let msg = t("import.busy");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 取文案并替换 %{name} 占位符
///
/// ```no_run
/// use catalog_importer::i18n::t_with_args;
/// let msg = t_with_args("import.failed", &[("reason", "disk full")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(key), |text, (name, value)| {
        text.replace(&format!("%{{{}}}", name), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // 语言为进程级全局状态，相关测试串行执行
    static LOCALE_LOCK: Mutex<()> = Mutex::new(());

    fn with_locale<T>(locale: &str, f: impl FnOnce() -> T) -> T {
        assert!(set_locale(locale));
        let out = f();
        set_locale(SUPPORTED_LOCALES[0]);
        out
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("en-US"), Some("en"));
        assert_eq!(normalize_locale(" en_GB "), Some("en"));
        assert_eq!(normalize_locale("zh"), Some("zh-CN"));
        assert_eq!(normalize_locale("zh_CN"), Some("zh-CN"));
        assert_eq!(normalize_locale("fr-FR"), None);
        assert_eq!(normalize_locale(""), None);
    }

    #[test]
    fn test_unknown_locale_keeps_current() {
        let _guard = LOCALE_LOCK.lock().unwrap();
        with_locale("en", || {
            assert!(!set_locale("de"));
            assert_eq!(current_locale(), "en");
        });
        assert_eq!(current_locale(), "zh-CN");
    }

    #[test]
    fn test_import_failed_notice() {
        let _guard = LOCALE_LOCK.lock().unwrap();
        let zh = with_locale("zh-CN", || {
            t_with_args("import.failed", &[("reason", "UNIQUE constraint failed")])
        });
        assert_eq!(zh, "导入失败: UNIQUE constraint failed");

        let en = with_locale("en", || {
            t_with_args("import.failed", &[("reason", "UNIQUE constraint failed")])
        });
        assert_eq!(en, "Import failed: UNIQUE constraint failed");
    }

    #[test]
    fn test_busy_and_empty_file_notices() {
        let _guard = LOCALE_LOCK.lock().unwrap();
        with_locale("zh-CN", || {
            assert_eq!(t("import.busy"), "已有导入任务正在进行，请稍后再试");
            assert_eq!(t("import.empty_file"), "文件为空，没有可导入的数据");
        });
        with_locale("en", || {
            assert_eq!(
                t("import.busy"),
                "An import is already in progress, please try again later"
            );
            assert_eq!(t("import.empty_file"), "The file is empty, nothing to import");
        });
    }

    #[test]
    fn test_success_notice_with_categories() {
        let _guard = LOCALE_LOCK.lock().unwrap();
        let en = with_locale("en", || {
            t_with_args(
                "import.success_with_categories",
                &[("count", "2"), ("categories", "1")],
            )
        });
        assert_eq!(en, "Successfully imported 2 products, created 1 categories");

        let zh = with_locale("zh-CN", || t_with_args("import.success", &[("count", "2")]));
        assert_eq!(zh, "成功导入 2 个商品");
    }

    #[test]
    fn test_file_not_found_keeps_path() {
        let _guard = LOCALE_LOCK.lock().unwrap();
        let zh = with_locale("zh-CN", || {
            t_with_args("import.file_not_found", &[("path", "/tmp/catalog.xlsx")])
        });
        assert_eq!(zh, "文件不存在: /tmp/catalog.xlsx");
    }

    #[test]
    fn test_unused_placeholder_left_as_is() {
        let _guard = LOCALE_LOCK.lock().unwrap();
        let msg = with_locale("en", || t_with_args("import.failed", &[]));
        assert_eq!(msg, "Import failed: %{reason}");
    }
}
