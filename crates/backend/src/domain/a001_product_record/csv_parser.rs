//! Разбор CSV файла с товарами.
//!
//! Разделитель определяется по строке заголовка: если в ней есть `;`, файл
//! считается разделенным точкой с запятой, иначе запятой. Кавычки не
//! поддерживаются, так что значения с разделителем внутри разбиваются.
//!
//! Колонки ищутся по имени из заголовка (без учета регистра и пробелов по краям),
//! порядок колонок значения не имеет. Плохая строка пропускается с предупреждением,
//! весь файл отклоняется только если не осталось ни одной записи.

use std::collections::HashMap;
use std::num::{ParseFloatError, ParseIntError};

use contracts::domain::a001_product_record::ProductRecord;
use csv::StringRecord;

use super::error::{ImportError, RowError};
use crate::shared::logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
}

impl Delimiter {
    /// Смотрит только на строку заголовка
    pub fn detect(header_line: &str) -> Self {
        if header_line.contains(';') {
            Delimiter::Semicolon
        } else {
            Delimiter::Comma
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
        }
    }
}

/// Соответствие "имя колонки (lowercase, trim) -> индекс".
/// При повторе имени побеждает последнее вхождение.
#[derive(Debug, Default)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut columns = HashMap::new();
        for (index, cell) in cells.into_iter().enumerate() {
            columns.insert(cell.trim().to_lowercase(), index);
        }
        Self { columns }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Число различных имен колонок (дубликаты считаются один раз)
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Результат разбора: принятые записи в исходном порядке и число пропущенных строк
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<ProductRecord>,
    pub skipped: usize,
}

/// Разбирает содержимое файла целиком.
pub fn parse_products(content: &str) -> Result<ParseOutcome, ImportError> {
    if content.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    // Strip UTF-8 BOM if present
    let text = content.trim_start_matches('\u{FEFF}');

    let header_line = text.lines().next().unwrap_or_default();
    if header_line.trim().is_empty() {
        return Err(ImportError::NoHeader);
    }

    let delimiter = Delimiter::detect(header_line);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .delimiter(delimiter.as_byte())
        .from_reader(text.as_bytes());

    let mut rows = reader.records();

    let header = match rows.next() {
        Some(Ok(header)) => header,
        Some(Err(e)) => return Err(ImportError::Io(e.into())),
        None => return Err(ImportError::NoHeader),
    };
    let columns = HeaderMap::from_cells(header.iter());

    tracing::info!(
        "Found {} columns in CSV header (delimiter {:?})",
        header.len(),
        delimiter
    );

    let mut outcome = ParseOutcome::default();

    for result in rows {
        let fields = match result {
            Ok(fields) => fields,
            Err(e) => {
                logger::warn("import", &format!("Skipping unreadable CSV record: {}", e));
                outcome.skipped += 1;
                continue;
            }
        };
        let line = fields.position().map_or(0, |p| p.line());

        match parse_row(&fields, &columns, line) {
            Ok(record) => {
                tracing::debug!("Processed record ID: {}, Name: {}", record.id, record.name);
                outcome.records.push(record);
            }
            Err(e) => {
                logger::warn("import", &format!("Skipping line {}: {}", line, e));
                outcome.skipped += 1;
            }
        }
    }

    if outcome.records.is_empty() {
        return Err(ImportError::NoValidRecords);
    }

    tracing::info!(
        "CSV parsing complete: {} records, {} skipped",
        outcome.records.len(),
        outcome.skipped
    );

    Ok(outcome)
}

/// Разбирает одну строку данных. Ошибка означает, что строку нужно пропустить.
pub fn parse_row(
    fields: &StringRecord,
    columns: &HeaderMap,
    line: u64,
) -> Result<ProductRecord, RowError> {
    if fields.len() < columns.column_count() {
        return Err(RowError::Malformed {
            line,
            expected: columns.column_count(),
            actual: fields.len(),
        });
    }

    let row = Row { fields, columns };

    let id = row.string("id");
    if id.is_empty() {
        return Err(RowError::RequiredFieldMissing { line, field: "id" });
    }

    let name = row.string("name");
    if name.is_empty() {
        return Err(RowError::RequiredFieldMissing { line, field: "name" });
    }

    let price = row.float("price").map_err(|_| RowError::RequiredFieldParse {
        line,
        field: "price",
        value: row.cell("price").to_string(),
    })?;

    let stock = row.int("stock").map_err(|_| RowError::RequiredFieldParse {
        line,
        field: "stock",
        value: row.cell("stock").to_string(),
    })?;

    Ok(ProductRecord {
        id,
        name,
        price,
        stock,
        sku: row.string("sku"),
        barcode: row.string("barcode"),
        description: row.string("description"),
        category: row.string("category"),
        subcategory: row.string("subcategory"),
        brand: row.string("brand"),
        manufacturer: row.string("manufacturer"),
        country_of_origin: row.string("country_of_origin"),
        color: row.string("color"),
        material: row.string("material"),
        dimensions: row.string("dimensions"),
        image_url: row.string("image_url"),
        // Необязательные числа: ошибка разбора дает ноль
        weight: row.float("weight").unwrap_or_default(),
        tax_rate: row.float("tax_rate").unwrap_or_default(),
        discount_percentage: row.float("discount_percentage").unwrap_or_default(),
        rating: row.float("rating").unwrap_or_default(),
        review_count: row.int("review_count").unwrap_or_default(),
        is_active: row.flag("is_active"),
        created_at: row.string("created_at"),
        updated_at: row.string("updated_at"),
    })
}

struct Row<'a> {
    fields: &'a StringRecord,
    columns: &'a HeaderMap,
}

impl<'a> Row<'a> {
    /// Trimmed cell for the column, empty when the column is unknown
    fn cell(&self, key: &str) -> &'a str {
        self.columns
            .index_of(key)
            .and_then(|i| self.fields.get(i))
            .map(str::trim)
            .unwrap_or("")
    }

    fn string(&self, key: &str) -> String {
        self.cell(key).to_string()
    }

    fn float(&self, key: &str) -> Result<f64, ParseFloatError> {
        match self.cell(key) {
            "" => Ok(0.0),
            value => value.parse(),
        }
    }

    fn int(&self, key: &str) -> Result<i64, ParseIntError> {
        match self.cell(key) {
            "" => Ok(0),
            value => value.parse(),
        }
    }

    fn flag(&self, key: &str) -> bool {
        matches!(
            self.cell(key).to_lowercase().as_str(),
            "true" | "yes" | "1"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<ProductRecord> {
        parse_products(content).unwrap().records
    }

    #[test]
    fn test_detects_delimiter_from_header() {
        assert_eq!(Delimiter::detect("id;name;price"), Delimiter::Semicolon);
        assert_eq!(Delimiter::detect("id,name;price"), Delimiter::Semicolon);
        assert_eq!(Delimiter::detect("id,name,price"), Delimiter::Comma);
        assert_eq!(Delimiter::detect("id"), Delimiter::Comma);
    }

    #[test]
    fn test_header_lookup_ignores_case_and_spaces() {
        let columns = HeaderMap::from_cells(["  ID ", "Name", "PRICE  "]);
        assert_eq!(columns.index_of("id"), Some(0));
        assert_eq!(columns.index_of("name"), Some(1));
        assert_eq!(columns.index_of("price"), Some(2));
        assert_eq!(columns.index_of("stock"), None);
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let columns = HeaderMap::from_cells(["name", "id", "name"]);
        assert_eq!(columns.index_of("name"), Some(2));
        assert_eq!(columns.column_count(), 2);
    }

    #[test]
    fn test_rejects_invalid_price_row() {
        let records = parse("id,name,price,stock\n1,Widget,9.5,10\n2,Gadget,abc,5\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].name, "Widget");
        assert_eq!(records[0].price, 9.5);
        assert_eq!(records[0].stock, 10);
    }

    #[test]
    fn test_semicolon_file_with_empty_stock() {
        let records = parse("id;name;price;stock\n1;Widget;9.5;\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 9.5);
        assert_eq!(records[0].stock, 0);
    }

    #[test]
    fn test_empty_price_defaults_to_zero() {
        let records = parse("id,name,price,stock\n1,Widget,,4\n2,Lamp,  ,1\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price, 0.0);
        assert_eq!(records[0].stock, 4);
        assert_eq!(records[1].price, 0.0);
    }

    #[test]
    fn test_lone_carriage_return_stays_in_cell() {
        let records = parse("id,name,price\n1,Wid\rget,2\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Wid\rget");
        assert_eq!(records[0].price, 2.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_products(""), Err(ImportError::EmptyInput)));
    }

    #[test]
    fn test_header_only_has_no_valid_records() {
        assert!(matches!(
            parse_products("id,name,price,stock\n"),
            Err(ImportError::NoValidRecords)
        ));
    }

    #[test]
    fn test_blank_first_line_has_no_header() {
        assert!(matches!(
            parse_products("\n1,Widget\n"),
            Err(ImportError::NoHeader)
        ));
    }

    #[test]
    fn test_all_rows_rejected() {
        let result = parse_products("id,name,price\n,Widget,1\n2,,1\n3,Lamp,x\n");
        assert!(matches!(result, Err(ImportError::NoValidRecords)));
    }

    #[test]
    fn test_short_row_is_skipped() {
        let outcome = parse_products("id,name,price,stock\n1,Widget\n2,Gadget,3,4\n").unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, "2");
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_missing_id_or_name_is_skipped() {
        let records = parse("id,name\n  ,Widget\n2,   \n3,Lamp\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "3");
    }

    #[test]
    fn test_invalid_stock_is_skipped() {
        let records = parse("id,name,stock\n1,Widget,ten\n2,Lamp,2.5\n3,Desk,7\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stock, 7);
    }

    #[test]
    fn test_optional_numbers_default_to_zero() {
        let records = parse(
            "id,name,weight,tax_rate,discount_percentage,rating,review_count\n\
             1,Widget,heavy,n/a,ten,good,many\n",
        );
        let record = &records[0];
        assert_eq!(record.weight, 0.0);
        assert_eq!(record.tax_rate, 0.0);
        assert_eq!(record.discount_percentage, 0.0);
        assert_eq!(record.rating, 0.0);
        assert_eq!(record.review_count, 0);
    }

    #[test]
    fn test_optional_numbers_parsed() {
        let records = parse("id,name,rating,review_count,tax_rate\n1,Widget,4.5,120,0.18\n");
        assert_eq!(records[0].rating, 4.5);
        assert_eq!(records[0].review_count, 120);
        assert_eq!(records[0].tax_rate, 0.18);
    }

    #[test]
    fn test_is_active_values() {
        let records = parse(
            "id,name,is_active\n1,a,true\n2,b, YES \n3,c,1\n4,d,no\n5,e,\n6,f,TRUE\n7,g,y\n",
        );
        let flags: Vec<bool> = records.iter().map(|r| r.is_active).collect();
        assert_eq!(flags, vec![true, true, true, false, false, true, false]);
    }

    #[test]
    fn test_missing_columns_yield_defaults() {
        let records = parse("id,name\n1,Widget\n");
        let record = &records[0];
        assert_eq!(record.price, 0.0);
        assert_eq!(record.stock, 0);
        assert!(record.brand.is_empty());
        assert!(!record.is_active);
    }

    #[test]
    fn test_unknown_headers_ignored_and_order_free() {
        let records = parse("Stock ; Color;NAME;unused; Id \n3;red;Widget;zzz;42\n");
        let record = &records[0];
        assert_eq!(record.id, "42");
        assert_eq!(record.name, "Widget");
        assert_eq!(record.stock, 3);
        assert_eq!(record.color, "red");
    }

    #[test]
    fn test_preserves_row_order() {
        let records = parse("id,name\n3,c\nbad\n1,a\n2,b\n");
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_cells_are_trimmed() {
        let records = parse("id,name,price,brand\n  1 ,  Widget  , 2.50 , Acme \n");
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].name, "Widget");
        assert_eq!(records[0].price, 2.5);
        assert_eq!(records[0].brand, "Acme");
    }

    #[test]
    fn test_quotes_are_literal() {
        let records = parse("id,name,description\n1,\"Widget\",\"big, red\"\n");
        assert_eq!(records[0].name, "\"Widget\"");
        assert_eq!(records[0].description, "\"big");
    }

    #[test]
    fn test_extra_fields_are_accepted() {
        let records = parse("id,name\n1,Widget,extra,more\n");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_crlf_and_bom() {
        let records = parse("\u{FEFF}id,name,stock\r\n1,Widget,5\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stock, 5);
    }

    #[test]
    fn test_duplicate_header_uses_last_position() {
        // "id" встречается дважды: берется третья колонка
        let records = parse("id,name,id\n1,Widget,9\n");
        assert_eq!(records[0].id, "9");

        // Две различных колонки, так что строка из двух полей не считается короткой,
        // но значение "id" лежит за ее пределами
        assert!(matches!(
            parse_products("id,name,id\n1,Widget\n"),
            Err(ImportError::NoValidRecords)
        ));
    }

    #[test]
    fn test_parse_row_reports_reason() {
        let columns = HeaderMap::from_cells(["id", "name", "price"]);
        let fields = StringRecord::from(vec!["1", "Widget", "cheap"]);
        let err = parse_row(&fields, &columns, 4).unwrap_err();
        assert_eq!(
            err,
            RowError::RequiredFieldParse {
                line: 4,
                field: "price",
                value: "cheap".to_string(),
            }
        );

        let fields = StringRecord::from(vec!["1"]);
        let err = parse_row(&fields, &columns, 5).unwrap_err();
        assert_eq!(
            err,
            RowError::Malformed {
                line: 5,
                expected: 3,
                actual: 1,
            }
        );
    }
}
