use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ProductId;

/// Collection path of the single remote resource.
pub const PRODUCTS_PATH: &str = "products";

/// The four remote calls the catalog exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOperation {
    List,
    Create,
    Update,
    Delete,
}

impl CatalogOperation {
    pub fn method(self) -> &'static str {
        match self {
            Self::List => "GET",
            Self::Create => "POST",
            Self::Update => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Path relative to the base URL. `id` is ignored for collection calls.
    pub fn path(self, id: Option<ProductId>) -> String {
        match (self, id) {
            (Self::Update | Self::Delete, Some(id)) => format!("/{PRODUCTS_PATH}/{id}"),
            _ => format!("/{PRODUCTS_PATH}"),
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::List => "Products loaded.",
            Self::Create => "Product created successfully!",
            Self::Update => "Product updated successfully!",
            Self::Delete => "Product deleted successfully!",
        }
    }

    /// Generic message shown for both transport failures and non-2xx statuses.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Error loading products!",
            Self::Create => "Error creating product!",
            Self::Update => "Error updating product!",
            Self::Delete => "Error deleting product!",
        }
    }
}

impl fmt::Display for CatalogOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_paths_include_product_id() {
        assert_eq!(CatalogOperation::List.path(None), "/products");
        assert_eq!(CatalogOperation::Create.path(Some(ProductId(4))), "/products");
        assert_eq!(CatalogOperation::Update.path(Some(ProductId(4))), "/products/4");
        assert_eq!(CatalogOperation::Delete.path(Some(ProductId(9))), "/products/9");
    }

    #[test]
    fn methods_match_rest_verbs() {
        assert_eq!(CatalogOperation::List.method(), "GET");
        assert_eq!(CatalogOperation::Create.method(), "POST");
        assert_eq!(CatalogOperation::Update.method(), "PUT");
        assert_eq!(CatalogOperation::Delete.method(), "DELETE");
    }
}
