//! Product grid: sortable headers, highlighted rows, row actions, paging.

use client_core::{
    columns::{ACTIONS_COLUMN, PRICE_COLUMN},
    table::{render_table, SortDirection, TableSpec, TableState, EMPTY_MESSAGE},
};
use eframe::egui;
use shared::domain::Product;

#[derive(Debug, Clone, PartialEq)]
pub enum RowAction {
    View(Product),
    Update(Product),
    Delete(Product),
}

const HIGHLIGHT_COLOR: egui::Color32 = egui::Color32::from_rgb(214, 168, 40);
const IMAGE_COLUMN: &str = "image";
const DESCRIPTION_COLUMN: &str = "description";

fn header_label(label: &str, sorted: Option<SortDirection>) -> String {
    match sorted {
        Some(SortDirection::Ascending) => format!("{label} ⬆"),
        Some(SortDirection::Descending) => format!("{label} ⬇"),
        None => format!("{label} ↕"),
    }
}

pub fn show_product_table(
    ui: &mut egui::Ui,
    spec: &TableSpec<Product>,
    products: &[Product],
    state: &mut TableState,
) -> Option<RowAction> {
    let view = render_table(spec, products, state);
    let mut action = None;
    let mut sort_clicked: Option<&'static str> = None;

    egui::ScrollArea::both()
        .auto_shrink([false, true])
        .max_height((ui.available_height() - 36.0).max(120.0))
        .show(ui, |ui| {
            egui::Grid::new("product_table")
                .num_columns(view.column_count())
                .spacing([14.0, 8.0])
                .striped(true)
                .show(ui, |ui| {
                    for header in &view.headers {
                        if header.sortable {
                            if ui
                                .button(egui::RichText::new(header_label(header.label, header.sorted)).strong())
                                .clicked()
                            {
                                sort_clicked = Some(header.key);
                            }
                        } else {
                            ui.strong(header.label);
                        }
                    }
                    ui.end_row();

                    if view.is_empty() {
                        ui.label(EMPTY_MESSAGE);
                        ui.end_row();
                        return;
                    }

                    for row in &view.rows {
                        for (header, cell) in view.headers.iter().zip(&row.cells) {
                            match header.key {
                                ACTIONS_COLUMN => {
                                    ui.horizontal(|ui| {
                                        if ui.small_button("View").clicked() {
                                            action = Some(RowAction::View(row.item.clone()));
                                        }
                                        if ui.small_button("Update").clicked() {
                                            action = Some(RowAction::Update(row.item.clone()));
                                        }
                                        if ui.small_button("Delete").clicked() {
                                            action = Some(RowAction::Delete(row.item.clone()));
                                        }
                                    });
                                }
                                IMAGE_COLUMN if !cell.is_empty() => {
                                    ui.hyperlink_to("image", cell);
                                }
                                _ => {
                                    let mut text = egui::RichText::new(cell);
                                    if row.highlighted {
                                        text = text.color(HIGHLIGHT_COLOR);
                                    }
                                    if header.key == PRICE_COLUMN {
                                        text = text.monospace();
                                    }
                                    let label = egui::Label::new(text);
                                    if header.key == DESCRIPTION_COLUMN {
                                        ui.scope(|ui| {
                                            ui.set_max_width(260.0);
                                            ui.add(label.truncate());
                                        });
                                    } else {
                                        ui.add(label);
                                    }
                                }
                            }
                        }
                        ui.end_row();
                    }
                });
        });

    ui.horizontal(|ui| {
        if ui
            .add_enabled(view.can_previous, egui::Button::new("Previous"))
            .clicked()
        {
            state.previous_page();
        }
        if ui.add_enabled(view.can_next, egui::Button::new("Next")).clicked() {
            state.next_page(view.page_count);
        }
        if view.page_count > 0 {
            ui.label(format!(
                "Page {} of {} ({} products)",
                view.page_index + 1,
                view.page_count,
                view.filtered_len
            ));
        }
    });

    if let Some(column) = sort_clicked {
        state.toggle_sort(column);
    }
    action
}
