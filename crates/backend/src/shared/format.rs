/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Приводит значение к ровно `width` символам: длинное обрезается с "..." в конце,
/// короткое дополняется пробелами справа. Ширина считается в символах, не в байтах.
///
/// ```
/// use backend::shared::format::fit_cell;
/// assert_eq!(fit_cell("Widget", 8), "Widget  ");
/// assert_eq!(fit_cell("Extremely long", 8), "Extre...");
/// ```
pub fn fit_cell(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len <= width {
        return format!("{:<width$}", value, width = width);
    }
    if width < 3 {
        return value.chars().take(width).collect();
    }
    let mut cut: String = value.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}
