use std::fmt;

use shared::domain::{Product, ProductFields};

pub const TITLE_MAX_CHARS: usize = 30;

pub const REQUIRED_MESSAGE: &str = "Required.";
pub const TITLE_TOO_LONG_MESSAGE: &str = "Cannot be more than 30 characters long.";
pub const INVALID_PRICE_MESSAGE: &str = "Should be a valid non-negative price.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Title,
    Price,
    Description,
    Category,
    Image,
}

impl ProductField {
    pub const ALL: [ProductField; 5] = [
        Self::Title,
        Self::Price,
        Self::Description,
        Self::Category,
        Self::Image,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Price => "Price",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::Image => "Image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ProductField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn for_field(&self, field: ProductField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field.label(), err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw form values as typed. Price stays text until validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: String,
    pub image: String,
}

impl ProductDraft {
    pub fn blank() -> Self {
        Self {
            price: "0".to_string(),
            ..Self::default()
        }
    }

    /// Seeds the price with its shortest exact form so an untouched field resubmits unchanged.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }

    pub fn field_mut(&mut self, field: ProductField) -> &mut String {
        match field {
            ProductField::Title => &mut self.title,
            ProductField::Price => &mut self.price,
            ProductField::Description => &mut self.description,
            ProductField::Category => &mut self.category,
            ProductField::Image => &mut self.image,
        }
    }

    pub fn validate(&self) -> Result<ProductFields, ValidationErrors> {
        let mut errors = Vec::new();

        if self.title.is_empty() {
            errors.push(FieldError {
                field: ProductField::Title,
                message: REQUIRED_MESSAGE,
            });
        } else if self.title.chars().count() > TITLE_MAX_CHARS {
            errors.push(FieldError {
                field: ProductField::Title,
                message: TITLE_TOO_LONG_MESSAGE,
            });
        }

        let price = parse_price(&self.price).filter(|price| *price >= 0.0);
        if price.is_none() {
            errors.push(FieldError {
                field: ProductField::Price,
                message: INVALID_PRICE_MESSAGE,
            });
        }

        match price {
            Some(price) if errors.is_empty() => Ok(ProductFields {
                title: self.title.clone(),
                price,
                description: self.description.clone(),
                category: self.category.clone(),
                image: self.image.clone(),
            }),
            _ => Err(ValidationErrors { errors }),
        }
    }
}

/// Accepts `12.5`, `$1,299.00` and surrounding whitespace. Rejects NaN and infinities.
pub fn parse_price(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let normalized: String = trimmed.chars().filter(|c| *c != ',').collect();
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
