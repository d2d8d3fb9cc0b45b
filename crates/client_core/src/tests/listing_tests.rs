use super::*;

use shared::domain::ProductId;
use shared::protocol::CatalogOperation;

use crate::test_support::{product, sample_catalog, FakeCatalog, RecordedCall};

#[test]
fn starts_loading_with_no_collection() {
    let controller = ProductListController::new();

    assert!(controller.is_loading());
    assert!(controller.products().is_none());
    assert!(controller.current_ticket().is_none());
}

#[tokio::test]
async fn refresh_loads_complete_snapshot() {
    let api = FakeCatalog::with_products(sample_catalog());
    let mut controller = ProductListController::new();

    assert!(controller.refresh(&api).await);

    assert_eq!(controller.products().expect("loaded"), sample_catalog().as_slice());
    assert_eq!(api.calls().await, vec![RecordedCall::List]);
}

#[tokio::test]
async fn failed_fetch_moves_to_failed_and_retry_recovers() {
    let api = FakeCatalog::with_products(sample_catalog());
    api.fail_with_status(Some(503)).await;
    let mut controller = ProductListController::new();

    controller.refresh(&api).await;
    assert_eq!(
        controller.state(),
        &ListState::Failed("Error loading products!".to_string())
    );

    api.fail_with_status(None).await;
    controller.refresh(&api).await;
    assert_eq!(controller.products().map(<[_]>::len), Some(6));
}

#[test]
fn refresh_from_loaded_goes_back_to_loading() {
    let mut controller = ProductListController::new();
    let ticket = controller.begin_refresh();
    controller.resolve(ticket, Ok(sample_catalog()));

    controller.begin_refresh();

    assert!(controller.is_loading());
}

#[test]
fn stale_resolution_never_overwrites_newer_refresh() {
    let mut controller = ProductListController::new();
    let first = controller.begin_refresh();
    let second = controller.begin_refresh();
    assert!(second.generation() > first.generation());

    assert!(controller.resolve(second, Ok(vec![product(9, "Newest", 1.0, "home", 4.0)])));
    assert!(!controller.resolve(first, Ok(sample_catalog())));

    let products = controller.products().expect("loaded");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, ProductId(9));
}

#[test]
fn stale_failure_is_ignored_while_newer_fetch_is_pending() {
    let mut controller = ProductListController::new();
    let first = controller.begin_refresh();
    let _second = controller.begin_refresh();

    let applied = controller.resolve(
        first,
        Err(CatalogError::Status {
            operation: CatalogOperation::List,
            status: 500,
        }),
    );

    assert!(!applied);
    assert!(controller.is_loading());
}
