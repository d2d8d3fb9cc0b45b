//! Modal windows for row actions and product creation.

use client_core::{
    modal::{DeletionModal, FormMessage, MessageKind, ModalPhase, ProductFormModal, ViewModal},
    validation::ProductField,
};
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAction {
    None,
    Confirm,
    Cancel,
}

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);
const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(70, 170, 90);

fn show_message(ui: &mut egui::Ui, message: Option<&FormMessage>) {
    if let Some(message) = message {
        let color = match message.kind {
            MessageKind::Success => SUCCESS_COLOR,
            MessageKind::Error => ERROR_COLOR,
        };
        ui.colored_label(color, &message.text);
    }
}

fn accepts_input(phase: ModalPhase) -> bool {
    matches!(phase, ModalPhase::Open | ModalPhase::Failed)
}

pub fn show_form_modal(ctx: &egui::Context, id_salt: &str, modal: &mut ProductFormModal) -> FormAction {
    let mut open = true;
    let mut action = FormAction::None;
    let editable = accepts_input(modal.phase());
    let busy = modal.phase() == ModalPhase::Submitting;

    egui::Window::new(modal.heading())
        .id(egui::Id::new(id_salt))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_enabled_ui(editable, |ui| {
                egui::Grid::new((id_salt, "fields"))
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        for field in ProductField::ALL {
                            ui.label(field.label());
                            ui.vertical(|ui| {
                                let value = modal.draft.field_mut(field);
                                if field == ProductField::Description {
                                    ui.text_edit_multiline(value);
                                } else {
                                    ui.text_edit_singleline(value);
                                }
                                if let Some(error) = modal.field_error(field) {
                                    ui.colored_label(ERROR_COLOR, error);
                                }
                            });
                            ui.end_row();
                        }
                    });
            });

            ui.add_space(6.0);
            show_message(ui, modal.message());
            ui.horizontal(|ui| {
                if ui.add_enabled(editable, egui::Button::new("Submit")).clicked() {
                    action = FormAction::Submit;
                }
                if busy {
                    ui.spinner();
                }
                if ui.button("Close").clicked() {
                    action = FormAction::Close;
                }
            });
        });

    if !open {
        action = FormAction::Close;
    }
    action
}

pub fn show_delete_modal(ctx: &egui::Context, modal: &DeletionModal) -> DeleteAction {
    let mut open = true;
    let mut action = DeleteAction::None;
    let editable = accepts_input(modal.phase());

    egui::Window::new(modal.heading())
        .id(egui::Id::new("delete_product_modal"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(modal.prompt());
            ui.add_space(6.0);
            show_message(ui, modal.message());
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    action = DeleteAction::Cancel;
                }
                if ui.add_enabled(editable, egui::Button::new("Confirm")).clicked() {
                    action = DeleteAction::Confirm;
                }
                if modal.phase() == ModalPhase::Submitting {
                    ui.spinner();
                }
            });
        });

    if !open {
        action = DeleteAction::Cancel;
    }
    action
}

/// Returns false once the user dismisses the window.
pub fn show_view_modal(ctx: &egui::Context, modal: &ViewModal) -> bool {
    let mut open = true;
    egui::Window::new(modal.heading())
        .id(egui::Id::new("view_product_modal"))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            egui::Grid::new("view_product_details")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    for (label, value) in modal.details() {
                        ui.strong(label);
                        if label == "Image" && !value.is_empty() {
                            ui.hyperlink_to("Open image", value);
                        } else {
                            ui.add(egui::Label::new(value).wrap());
                        }
                        ui.end_row();
                    }
                });
        });
    open
}
