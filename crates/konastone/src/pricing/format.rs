/// Render a whole-shilling amount the way the storefront prints prices, e.g. `KES 3,500,000`.
pub fn format_kes(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("KES {grouped}")
}
