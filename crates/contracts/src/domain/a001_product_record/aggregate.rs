use serde::{Deserialize, Serialize};

/// Товарная запись, разобранная из одной строки загруженного файла.
///
/// Имена полей совпадают с именами колонок заголовка (snake_case).
/// Запись создается один раз и дальше не меняется.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    // Идентификация
    pub id: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub barcode: String,

    // Описание
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub country_of_origin: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub image_url: String,

    // Коммерческие данные
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,

    // Флаги и отметки времени (без разбора дат)
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl ProductRecord {
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}
