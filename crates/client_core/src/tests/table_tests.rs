use super::*;

use shared::domain::{Product, ProductId};

use crate::columns::{product_table, CATEGORY_COLUMN, PRICE_COLUMN};
use crate::test_support::{product, sample_catalog};

fn ids(view: &TableView<'_, Product>) -> Vec<i64> {
    view.rows.iter().map(|row| row.item.id.0).collect()
}

fn many_products(n: i64) -> Vec<Product> {
    (1..=n)
        .map(|id| product(id, &format!("Item {id}"), id as f64, "electronics", 4.0))
        .collect()
}

#[test]
fn empty_collection_renders_no_results_and_disables_paging() {
    let spec = product_table();
    let mut state = TableState::new(CATEGORY_COLUMN, 10);
    let items: Vec<Product> = Vec::new();

    let view = render_table(&spec, &items, &mut state);

    assert!(view.is_empty());
    assert_eq!(view.page_count, 0);
    assert!(!view.can_previous);
    assert!(!view.can_next);
    assert_eq!(view.column_count(), spec.columns.len());
    assert_eq!(EMPTY_MESSAGE, "No results.");
}

#[test]
fn unsorted_view_keeps_input_order() {
    let spec = product_table();
    let items = sample_catalog();
    let mut state = TableState::new(CATEGORY_COLUMN, 10);

    let view = render_table(&spec, &items, &mut state);

    assert_eq!(ids(&view), vec![1, 2, 3, 4, 5, 6]);
    assert!(view.headers.iter().all(|header| header.sorted.is_none()));
}

#[test]
fn second_price_toggle_reverses_the_ascending_permutation() {
    let spec = product_table();
    let items = sample_catalog();
    let mut state = TableState::new(CATEGORY_COLUMN, 10);

    state.toggle_sort(PRICE_COLUMN);
    let ascending = ids(&render_table(&spec, &items, &mut state));
    state.toggle_sort(PRICE_COLUMN);
    let descending_view = render_table(&spec, &items, &mut state);
    let descending = ids(&descending_view);

    assert_eq!(ascending, vec![2, 6, 4, 1, 5, 3]);
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
    let price_header = descending_view
        .headers
        .iter()
        .find(|header| header.key == PRICE_COLUMN)
        .expect("price header");
    assert_eq!(price_header.sorted, Some(SortDirection::Descending));
    assert!(price_header.sortable);
}

#[test]
fn third_toggle_returns_to_ascending() {
    let mut state = TableState::new(CATEGORY_COLUMN, 10);

    state.toggle_sort(PRICE_COLUMN);
    state.toggle_sort(PRICE_COLUMN);
    state.toggle_sort(PRICE_COLUMN);

    assert_eq!(
        state.sort(),
        Some(SortState {
            column: PRICE_COLUMN,
            direction: SortDirection::Ascending
        })
    );
}

#[test]
fn ties_keep_input_order_in_both_directions() {
    let spec = product_table();
    let items = vec![
        product(1, "A", 10.0, "x", 4.0),
        product(2, "B", 5.0, "x", 4.0),
        product(3, "C", 10.0, "x", 4.0),
        product(4, "D", 5.0, "x", 4.0),
    ];
    let mut state = TableState::new(CATEGORY_COLUMN, 10);

    state.toggle_sort(PRICE_COLUMN);
    assert_eq!(ids(&render_table(&spec, &items, &mut state)), vec![2, 4, 1, 3]);
    state.toggle_sort(PRICE_COLUMN);
    assert_eq!(ids(&render_table(&spec, &items, &mut state)), vec![1, 3, 2, 4]);
}

#[test]
fn category_filter_is_case_sensitive_substring_and_resets_page() {
    let spec = product_table();
    let mut items = many_products(12);
    items.push(product(13, "Old Radio", 15.0, "Electronics", 4.0));
    items.push(product(14, "Scarf", 12.0, "women's clothing", 4.0));
    let mut state = TableState::new(CATEGORY_COLUMN, 10);

    let first_page = render_table(&spec, &items, &mut state);
    state.next_page(first_page.page_count);
    assert_eq!(state.page_index(), 1);

    state.set_filter("elec");
    let view = render_table(&spec, &items, &mut state);

    assert_eq!(view.page_index, 0);
    assert_eq!(view.filtered_len, 12);
    assert!(view
        .rows
        .iter()
        .all(|row| row.item.category.contains("elec")));
    assert!(!ids(&view).contains(&13));
}

#[test]
fn filter_without_matches_renders_no_results() {
    let spec = product_table();
    let items = sample_catalog();
    let mut state = TableState::new(CATEGORY_COLUMN, 10);

    state.set_filter("ELEC");
    let view = render_table(&spec, &items, &mut state);

    assert!(view.is_empty());
    assert!(!view.can_previous && !view.can_next);
}

#[test]
fn pagination_controls_disable_at_bounds() {
    let spec = product_table();
    let items = many_products(25);
    let mut state = TableState::new(CATEGORY_COLUMN, 10);

    let view = render_table(&spec, &items, &mut state);
    assert_eq!(view.page_count, 3);
    assert!(!view.can_previous);
    assert!(view.can_next);
    assert_eq!(ids(&view), (1..=10).collect::<Vec<_>>());

    state.next_page(view.page_count);
    state.next_page(3);
    let last = render_table(&spec, &items, &mut state);
    assert_eq!(last.page_index, 2);
    assert!(last.can_previous);
    assert!(!last.can_next);
    assert_eq!(ids(&last), (21..=25).collect::<Vec<_>>());

    state.next_page(last.page_count);
    assert_eq!(state.page_index(), 2);
    state.previous_page();
    state.previous_page();
    state.previous_page();
    assert_eq!(state.page_index(), 0);
}

#[test]
fn page_index_is_clamped_when_collection_shrinks() {
    let spec = product_table();
    let items = many_products(25);
    let mut state = TableState::new(CATEGORY_COLUMN, 10);
    state.next_page(3);
    state.next_page(3);
    assert_eq!(render_table(&spec, &items, &mut state).page_index, 2);

    let fewer = many_products(4);
    let view = render_table(&spec, &fewer, &mut state);

    assert_eq!(view.page_index, 0);
    assert_eq!(state.page_index(), 0);
    assert_eq!(ids(&view), vec![1, 2, 3, 4]);
}

#[test]
fn rows_carry_rendered_cells_and_highlight_flag() {
    let spec = product_table();
    let items = vec![product(4, "Portable SSD 1TB", 64.0, "electronics", 4.8)];
    let mut state = TableState::new(CATEGORY_COLUMN, 10);

    let view = render_table(&spec, &items, &mut state);
    let row = &view.rows[0];

    assert!(row.highlighted);
    assert_eq!(row.source_index, 0);
    assert_eq!(row.item.id, ProductId(4));
    let cell = |key: &str| {
        let index = spec
            .columns
            .iter()
            .position(|column| column.key == key)
            .expect("column");
        row.cells[index].clone()
    };
    assert_eq!(cell("price"), "$64.00");
    assert_eq!(cell("category"), "Electronics");
    assert_eq!(cell("rating"), "4.8/5 (100 reviews)");
    assert_eq!(cell("actions"), "");
}

#[test]
fn jumping_past_the_last_page_lands_on_the_last_page() {
    let spec = product_table();
    let items = many_products(25);
    let mut state = TableState::new(CATEGORY_COLUMN, 10);

    state.go_to_page(9);
    let view = render_table(&spec, &items, &mut state);

    assert_eq!(view.page_index, 2);
    assert_eq!(ids(&view), (21..=25).collect::<Vec<_>>());
}
