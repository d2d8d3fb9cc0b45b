//! App shell: drains backend events, advances modal timers, draws the panel.

use std::time::{Duration, Instant};

use client_core::{ListState, Settings};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{err_label, UiError, UiErrorContext, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::PanelState,
};
use crate::ui::{
    modals::{show_delete_modal, show_form_modal, show_view_modal, DeleteAction, FormAction},
    table::{show_product_table, RowAction},
    WINDOW_TITLE,
};

const IDLE_REPAINT: Duration = Duration::from_millis(100);

pub struct CatalogAdminApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: PanelState,
    status: String,
    status_banner: Option<UiError>,
}

impl CatalogAdminApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, settings: &Settings) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: PanelState::new(settings),
            status: "Starting".to_string(),
            status_banner: None,
        };
        app.request_refresh();
        app
    }

    fn queue(&mut self, cmd: BackendCommand) {
        if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.status_banner = Some(UiError::from_message(
                UiErrorContext::General,
                self.status.clone(),
            ));
        }
    }

    fn request_refresh(&mut self) {
        let cmd = self.state.refresh();
        self.queue(cmd);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    if err.context() == UiErrorContext::BackendStartup {
                        tracing::error!("backend unavailable: {}", err.message());
                    }
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                    self.status_banner = Some(err);
                }
                UiEvent::ProductsLoaded { ticket, products } => {
                    self.status = format!("Loaded {} products", products.len());
                    self.status_banner = None;
                    self.state.products_loaded(ticket, products);
                }
                UiEvent::ProductsFailed { ticket, error } => {
                    if self.state.listing.current_ticket() == Some(ticket) {
                        self.status_banner =
                            Some(UiError::from_catalog(UiErrorContext::LoadProducts, &error));
                    }
                    self.state.products_failed(ticket, error);
                }
                UiEvent::MutationFinished {
                    modal,
                    ticket,
                    result,
                } => {
                    if let Err(err) = &result {
                        tracing::warn!(modal = modal.0, "mutation failed: {err}");
                    }
                    self.state
                        .mutation_finished(modal, ticket, result, Instant::now());
                }
            }
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading(WINDOW_TITLE);
            ui.horizontal(|ui| {
                ui.label("Filter categories");
                let filter = ui.add(
                    egui::TextEdit::singleline(&mut self.state.filter_input)
                        .hint_text("e.g. electronics")
                        .desired_width(200.0),
                );
                if filter.changed() {
                    self.state.sync_filter();
                }
                if ui.button("Create a product").clicked() {
                    self.state.open_create();
                }
                if ui
                    .add_enabled(!self.state.listing.is_loading(), egui::Button::new("Refresh"))
                    .clicked()
                {
                    self.request_refresh();
                }
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(banner) = &self.status_banner {
                    let color = if banner.is_fatal() {
                        egui::Color32::from_rgb(220, 80, 80)
                    } else {
                        egui::Color32::from_rgb(214, 168, 40)
                    };
                    ui.colored_label(color, banner.message());
                } else {
                    ui.label(&self.status);
                }
            });
        });
    }

    fn show_products(&mut self, ctx: &egui::Context) {
        let mut retry = false;
        let mut row_action = None;

        egui::CentralPanel::default().show(ctx, |ui| match self.state.listing.state() {
            ListState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading products...");
                });
            }
            ListState::Failed(message) => {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), message);
                if ui.button("Retry").clicked() {
                    retry = true;
                }
            }
            ListState::Loaded(products) => {
                row_action = show_product_table(
                    ui,
                    &self.state.table_spec,
                    products,
                    &mut self.state.table_state,
                );
            }
        });

        if retry {
            self.request_refresh();
        }
        match row_action {
            Some(RowAction::View(product)) => self.state.open_view(product),
            Some(RowAction::Update(product)) => self.state.open_update(product),
            Some(RowAction::Delete(product)) => self.state.open_delete(product),
            None => {}
        }
    }

    fn show_modals(&mut self, ctx: &egui::Context) {
        if self.state.create.modal.is_open() {
            match show_form_modal(ctx, "create_product_modal", &mut self.state.create.modal) {
                FormAction::Submit => {
                    if let Some(cmd) = self.state.submit_create() {
                        self.queue(cmd);
                    }
                }
                FormAction::Close => self.state.create.modal.close(),
                FormAction::None => {}
            }
        }

        if let Some(handle) = self.state.update.as_mut() {
            match show_form_modal(ctx, "update_product_modal", &mut handle.modal) {
                FormAction::Submit => {
                    if let Some(cmd) = self.state.submit_update() {
                        self.queue(cmd);
                    }
                }
                FormAction::Close => self.state.close_update(),
                FormAction::None => {}
            }
        }

        if let Some(handle) = self.state.delete.as_ref() {
            match show_delete_modal(ctx, &handle.modal) {
                DeleteAction::Confirm => {
                    if let Some(cmd) = self.state.confirm_delete() {
                        self.queue(cmd);
                    }
                }
                DeleteAction::Cancel => self.state.cancel_delete(),
                DeleteAction::None => {}
            }
        }

        if let Some(view) = self.state.view.as_ref() {
            if !show_view_modal(ctx, view) {
                self.state.close_view();
            }
        }
    }
}

impl eframe::App for CatalogAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        if let Some(cmd) = self.state.tick(Instant::now()) {
            self.queue(cmd);
        }

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_products(ctx);
        self.show_modals(ctx);

        let repaint = self
            .state
            .next_deadline(Instant::now())
            .map_or(IDLE_REPAINT, |deadline| deadline.min(IDLE_REPAINT));
        ctx.request_repaint_after(repaint);
    }
}
