use pivot_core::types::Price;

/// `"{tier_id}_{price}"` with the price rounded to the instrument precision.
/// Prices that render identically under the same tier id are the same line.
pub fn line_name(tier_id: &str, price: Price, digits: u32) -> String {
    format!("{}_{}", tier_id, price.to_fixed(digits))
}

/// Registry key: names compare case-insensitively
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}
