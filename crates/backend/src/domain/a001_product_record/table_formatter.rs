use contracts::domain::a001_product_record::ProductRecord;

use crate::shared::format::fit_cell;

const CURRENCY: &str = "BRL";

enum CellSource {
    /// Порядковый номер строки в таблице (с 1), а не id записи
    RowIndex,
    Field(fn(&ProductRecord) -> String),
}

struct Column {
    header: &'static str,
    width: usize,
    source: CellSource,
}

fn column(header: &'static str, width: usize, source: CellSource) -> Column {
    Column {
        header,
        width,
        source,
    }
}

/// Моноширинная текстовая таблица для списка товаров
pub struct TableFormatter {
    columns: Vec<Column>,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    pub fn new() -> Self {
        use CellSource::{Field, RowIndex};

        Self {
            columns: vec![
                column("Index", 5, RowIndex),
                column("Name", 20, Field(|r| r.name.clone())),
                column("Description", 30, Field(|r| r.description.clone())),
                column("Brand", 15, Field(|r| r.brand.clone())),
                column("Category", 15, Field(|r| r.category.clone())),
                column("Price", 10, Field(|r| format!("{:.2}", r.price))),
                column("Currency", 10, Field(|_| CURRENCY.to_string())),
                column("Stock", 10, Field(|r| r.stock.to_string())),
                column("EAN", 15, Field(|r| r.barcode.clone())),
                column("Color", 10, Field(|r| r.color.clone())),
                column(
                    "Size",
                    10,
                    Field(|r| {
                        if r.dimensions.is_empty() {
                            "N/A".to_string()
                        } else {
                            r.dimensions.clone()
                        }
                    }),
                ),
                column(
                    "Availability",
                    15,
                    Field(|r| {
                        if r.is_available() {
                            "Disponível".to_string()
                        } else {
                            "Indisponível".to_string()
                        }
                    }),
                ),
                column("InternalID", 15, Field(|r| r.sku.clone())),
            ],
        }
    }

    pub fn format_as_table(&self, records: &[ProductRecord]) -> String {
        let mut out = String::new();

        self.write_row(&mut out, self.columns.iter().map(|c| c.header.to_string()));
        self.write_separator(&mut out);

        for (i, record) in records.iter().enumerate() {
            let cells = self.columns.iter().map(|c| match &c.source {
                CellSource::RowIndex => (i + 1).to_string(),
                CellSource::Field(get) => get(record),
            });
            self.write_row(&mut out, cells);
        }

        out
    }

    fn write_row(&self, out: &mut String, cells: impl Iterator<Item = String>) {
        for (i, (column, value)) in self.columns.iter().zip(cells).enumerate() {
            if i > 0 {
                out.push_str(" | ");
            }
            out.push_str(&fit_cell(&value, column.width));
        }
        out.push('\n');
    }

    fn write_separator(&self, out: &mut String) {
        let dashes: Vec<String> = self.columns.iter().map(|c| "-".repeat(c.width)).collect();
        out.push_str(&dashes.join("-+-"));
        out.push('\n');
    }
}
