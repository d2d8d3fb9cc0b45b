//! In-memory catalog double shared by the unit tests.

use async_trait::async_trait;
use shared::{
    domain::{Product, ProductFields, ProductId, Rating},
    protocol::CatalogOperation,
};
use tokio::sync::Mutex;

use crate::{CatalogApi, CatalogError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RecordedCall {
    List,
    Create(ProductFields),
    Update(ProductId, ProductFields),
    Delete(ProductId),
}

#[derive(Default)]
pub(crate) struct FakeCatalog {
    products: Mutex<Vec<Product>>,
    calls: Mutex<Vec<RecordedCall>>,
    fail_status: Mutex<Option<u16>>,
}

impl FakeCatalog {
    pub(crate) fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            ..Self::default()
        }
    }

    pub(crate) async fn fail_with_status(&self, status: Option<u16>) {
        *self.fail_status.lock().await = status;
    }

    pub(crate) async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: RecordedCall, operation: CatalogOperation) -> Result<(), CatalogError> {
        self.calls.lock().await.push(call);
        match *self.fail_status.lock().await {
            Some(status) => Err(CatalogError::Status { operation, status }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        self.record(RecordedCall::List, CatalogOperation::List).await?;
        Ok(self.products.lock().await.clone())
    }

    async fn create(&self, fields: &ProductFields) -> Result<(), CatalogError> {
        self.record(RecordedCall::Create(fields.clone()), CatalogOperation::Create)
            .await?;
        let mut products = self.products.lock().await;
        let next_id = products.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        products.push(Product {
            id: ProductId(next_id),
            title: fields.title.clone(),
            price: fields.price,
            description: fields.description.clone(),
            category: fields.category.clone(),
            image: fields.image.clone(),
            rating: Rating::default(),
        });
        Ok(())
    }

    async fn update(&self, id: ProductId, fields: &ProductFields) -> Result<(), CatalogError> {
        self.record(RecordedCall::Update(id, fields.clone()), CatalogOperation::Update)
            .await?;
        let mut products = self.products.lock().await;
        if let Some(product) = products.iter_mut().find(|p| p.id == id) {
            product.title = fields.title.clone();
            product.price = fields.price;
            product.description = fields.description.clone();
            product.category = fields.category.clone();
            product.image = fields.image.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        self.record(RecordedCall::Delete(id), CatalogOperation::Delete)
            .await?;
        self.products.lock().await.retain(|p| p.id != id);
        Ok(())
    }
}

pub(crate) fn product(id: i64, title: &str, price: f64, category: &str, rate: f64) -> Product {
    Product {
        id: ProductId(id),
        title: title.to_string(),
        price,
        description: format!("{title} description"),
        category: category.to_string(),
        image: format!("https://fakestoreapi.com/img/{id}.jpg"),
        rating: Rating { rate, count: 100 },
    }
}

pub(crate) fn sample_catalog() -> Vec<Product> {
    vec![
        product(1, "Fjallraven Backpack", 109.95, "men's clothing", 3.9),
        product(2, "Slim Fit T-Shirt", 22.3, "men's clothing", 4.1),
        product(3, "Gold Chain Bracelet", 695.0, "jewelery", 4.6),
        product(4, "Portable SSD 1TB", 64.0, "electronics", 4.8),
        product(5, "IPS Monitor", 599.0, "electronics", 2.9),
        product(6, "Rain Jacket", 39.99, "women's clothing", 3.8),
    ]
}
