use shared::domain::Product;

use crate::table::{Column, SortKey, TableSpec};

pub const ID_COLUMN: &str = "id";
pub const PRICE_COLUMN: &str = "price";
pub const CATEGORY_COLUMN: &str = "category";
/// Rendered empty; front ends draw the row buttons in this slot.
pub const ACTIONS_COLUMN: &str = "actions";

/// Rows above this rating are highlighted.
pub const HIGH_RATING_THRESHOLD: f64 = 4.5;

type ProductColumn = Column<Product>;

pub fn product_table() -> TableSpec<Product> {
    TableSpec {
        columns: vec![
            ProductColumn::new(ID_COLUMN, "ID", |p| p.id.to_string()),
            ProductColumn::new("image", "Image", |p| p.image.clone()),
            ProductColumn::new("title", "Title", |p| p.title.clone()),
            ProductColumn::new(PRICE_COLUMN, "Price", |p| format_price(p.price)).sortable(price_key),
            ProductColumn::new("description", "Description", |p| p.description.clone()),
            ProductColumn::new(CATEGORY_COLUMN, "Category", |p| capitalize_first(&p.category))
                .filterable(category_text),
            ProductColumn::new("rating", "Rating", |p| {
                format!("{}/5 ({} reviews)", p.rating.rate, p.rating.count)
            }),
            ProductColumn::new(ACTIONS_COLUMN, "Actions", |_| String::new()),
        ],
        highlight: Some(is_high_rated as fn(&Product) -> bool),
    }
}

fn price_key(product: &Product) -> SortKey<'_> {
    SortKey::Number(product.price)
}

fn category_text(product: &Product) -> &str {
    &product.category
}

pub fn is_high_rated(product: &Product) -> bool {
    product.rating.rate > HIGH_RATING_THRESHOLD
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
