// ==========================================
// 商品目录导入 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析（仅读取第一个工作表，首行为表头）
// 支持: Excel (.xlsx/.xls/.xlsm/.ods) / CSV (.csv)
// ==========================================

use crate::domain::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::product_importer_trait::FileParser;
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "ods"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// 按表头组装一行；完全空白的行返回 None
fn build_row<I>(headers: &[String], cells: I) -> Option<RawRow>
where
    I: IntoIterator<Item = String>,
{
    let mut row_map = RawRow::new();
    for (col_idx, value) in cells.into_iter().enumerate() {
        match headers.get(col_idx) {
            Some(header) if !header.is_empty() => {
                row_map.insert(header.clone(), value.trim().to_string());
            }
            _ => {}
        }
    }

    if row_map.values().all(|v| v.is_empty()) {
        None
    } else {
        Some(row_map)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Reader 读取 CSV（表头 + 数据行）
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头（去掉 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            if let Some(row) = build_row(&headers, record.iter().map(str::to_string)) {
                records.push(row);
            }
        }

        Ok(records)
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        self.parse_reader(file)
    }

    fn parse_bytes_to_raw_rows(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let ext = extension_of(Path::new(file_name));
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }
        self.parse_reader(bytes)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 从内存中的工作簿字节解析（上传场景）
    pub fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        match first_sheet_range(&mut workbook)? {
            Some(range) => Ok(rows_from_range(&range)),
            None => Ok(Vec::new()),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;
        match first_sheet_range(&mut workbook)? {
            Some(range) => Ok(rows_from_range(&range)),
            None => Ok(Vec::new()),
        }
    }

    fn parse_bytes_to_raw_rows(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let ext = extension_of(Path::new(file_name));
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }
        self.parse_bytes(bytes)
    }
}

/// 读取第一个工作表；无工作表时返回 None
fn first_sheet_range<RS>(workbook: &mut calamine::Sheets<RS>) -> ImportResult<Option<Range<Data>>>
where
    RS: std::io::Read + std::io::Seek,
{
    let sheet_name = match workbook.sheet_names().first() {
        Some(name) => name.clone(),
        None => return Ok(None),
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;
    Ok(Some(range))
}

fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();

    // 无表头 → 视为空文件
    let header_row = match rows.next() {
        Some(row) => row,
        None => return Vec::new(),
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    rows.filter_map(|data_row| build_row(&headers, data_row.iter().map(|cell| cell.to_string())))
        .collect()
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let ext = extension_of(file_path);
        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_rows(file_path),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelParser.parse_to_raw_rows(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    fn parse_bytes_to_raw_rows(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let ext = extension_of(Path::new(file_name));
        match ext.as_str() {
            "csv" => CsvParser.parse_reader(bytes),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelParser.parse_bytes(bytes),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&["Name,Category,Price", "Widget,Tools,100", " Gadget ,tools,50"]);

        let records = CsvParser.parse_to_raw_rows(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Name"), Some(&"Widget".to_string()));
        assert_eq!(records[1].get("Name"), Some(&"Gadget".to_string()));
        assert_eq!(records[1].get("Price"), Some(&"50".to_string()));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file(&["Name,Price", "Widget,1", ",", "Gadget,2"]);

        let records = CsvParser.parse_to_raw_rows(temp_file.path()).unwrap();

        // 应跳过空行
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_csv_parser_header_only_is_empty() {
        let temp_file = csv_file(&["Name,Category,Price"]);
        let records = CsvParser.parse_to_raw_rows(temp_file.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_csv_parser_strips_bom() {
        let records = CsvParser
            .parse_reader("\u{feff}Name,Price\nWidget,3\n".as_bytes())
            .unwrap();
        assert_eq!(records[0].get("Name"), Some(&"Widget".to_string()));
    }

    #[test]
    fn test_file_not_found() {
        let result = UniversalFileParser.parse_to_raw_rows(Path::new("non_existent.xlsx"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = UniversalFileParser.parse_bytes_to_raw_rows("catalog.json", b"{}");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "json"));
    }

    #[test]
    fn test_parse_bytes_csv() {
        let records = UniversalFileParser
            .parse_bytes_to_raw_rows("upload.CSV", b"Product Name,Stock\nLamp,4\n")
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Stock"), Some(&"4".to_string()));
    }

    #[test]
    fn test_excel_reads_first_sheet_only() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Name").unwrap();
        sheet.write_string(0, 1, "Price").unwrap();
        sheet.write_string(1, 0, "Widget").unwrap();
        sheet.write_number(1, 1, 100.0).unwrap();
        sheet.write_string(2, 0, "Gadget").unwrap();
        sheet.write_number(2, 1, 19.99).unwrap();
        workbook
            .add_worksheet()
            .write_string(0, 0, "Name")
            .unwrap()
            .write_string(1, 0, "Ghost")
            .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let records = ExcelParser
            .parse_bytes_to_raw_rows("catalog.xlsx", &bytes)
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Name"), Some(&"Widget".to_string()));
        assert_eq!(records[0].get("Price"), Some(&"100".to_string()));
        assert_eq!(records[1].get("Price"), Some(&"19.99".to_string()));
        assert!(records.iter().all(|r| r.get("Name") != Some(&"Ghost".to_string())));
    }

    #[test]
    fn test_excel_file_on_disk() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        workbook
            .add_worksheet()
            .write_string(0, 0, "Product Name")
            .unwrap()
            .write_string(1, 0, "Lamp")
            .unwrap();
        let temp_file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        workbook.save(temp_file.path()).unwrap();

        let records = UniversalFileParser.parse_to_raw_rows(temp_file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Product Name"), Some(&"Lamp".to_string()));
    }

    #[test]
    fn test_csv_parser_rejects_workbook_name() {
        let result = CsvParser.parse_bytes_to_raw_rows("catalog.xls", b"Name\nLamp\n");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "xls"));
    }

    #[test]
    fn test_parse_bytes_invalid_workbook() {
        let result = UniversalFileParser.parse_bytes_to_raw_rows("upload.xlsx", b"not a workbook");
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }
}
