//! Panel state owned by the UI thread, and the transitions driven by user
//! actions and backend events. Nothing here touches egui or the network; every
//! transition that needs I/O returns the [`BackendCommand`] to queue.

use std::time::{Duration, Instant};

use client_core::{
    columns::{product_table, CATEGORY_COLUMN},
    modal::{
        DeletionModal, ModalEffect, ModalPhase, PendingSubmission, ProductFormModal,
        SubmitRejected, SubmitTicket, ViewModal,
    },
    table::{TableSpec, TableState},
    CatalogError, ProductListController, RefreshTicket, Settings,
};
use shared::domain::Product;
use tracing::debug;

use crate::backend_bridge::commands::{BackendCommand, ModalId};

#[derive(Debug)]
pub struct ModalHandle<M> {
    pub id: ModalId,
    pub modal: M,
}

pub struct PanelState {
    pub listing: ProductListController,
    pub table_spec: TableSpec<Product>,
    pub table_state: TableState,
    pub filter_input: String,
    pub create: ModalHandle<ProductFormModal>,
    pub update: Option<ModalHandle<ProductFormModal>>,
    pub delete: Option<ModalHandle<DeletionModal>>,
    pub view: Option<ViewModal>,
    success_delay: Duration,
    next_modal_id: u64,
}

impl PanelState {
    pub fn new(settings: &Settings) -> Self {
        let success_delay = settings.success_close_delay();
        Self {
            listing: ProductListController::new(),
            table_spec: product_table(),
            table_state: TableState::new(CATEGORY_COLUMN, settings.page_size),
            filter_input: String::new(),
            create: ModalHandle {
                id: ModalId(0),
                modal: ProductFormModal::create(success_delay),
            },
            update: None,
            delete: None,
            view: None,
            success_delay,
            next_modal_id: 1,
        }
    }

    fn allocate_modal_id(&mut self) -> ModalId {
        let id = ModalId(self.next_modal_id);
        self.next_modal_id += 1;
        id
    }

    pub fn refresh(&mut self) -> BackendCommand {
        BackendCommand::RefreshProducts {
            ticket: self.listing.begin_refresh(),
        }
    }

    /// Pushes the typed filter text into the table state.
    pub fn sync_filter(&mut self) {
        self.table_state.set_filter(self.filter_input.clone());
    }

    pub fn open_create(&mut self) {
        self.create.modal.open();
    }

    pub fn open_update(&mut self, product: Product) {
        let mut modal = ProductFormModal::update(product, self.success_delay);
        modal.open();
        self.update = Some(ModalHandle {
            id: self.allocate_modal_id(),
            modal,
        });
    }

    pub fn open_delete(&mut self, product: Product) {
        let mut modal = DeletionModal::new(product, self.success_delay);
        modal.open();
        self.delete = Some(ModalHandle {
            id: self.allocate_modal_id(),
            modal,
        });
    }

    pub fn open_view(&mut self, product: Product) {
        self.view = Some(ViewModal::new(product));
    }

    pub fn close_view(&mut self) {
        self.view = None;
    }

    pub fn close_update(&mut self) {
        self.update = None;
    }

    pub fn cancel_delete(&mut self) {
        self.delete = None;
    }

    pub fn submit_create(&mut self) -> Option<BackendCommand> {
        let id = self.create.id;
        submission_command(id, self.create.modal.submit())
    }

    pub fn submit_update(&mut self) -> Option<BackendCommand> {
        let handle = self.update.as_mut()?;
        submission_command(handle.id, handle.modal.submit())
    }

    pub fn confirm_delete(&mut self) -> Option<BackendCommand> {
        let handle = self.delete.as_mut()?;
        submission_command(handle.id, handle.modal.confirm())
    }

    pub fn products_loaded(&mut self, ticket: RefreshTicket, products: Vec<Product>) {
        self.listing.resolve(ticket, Ok(products));
    }

    pub fn products_failed(&mut self, ticket: RefreshTicket, error: CatalogError) {
        self.listing.resolve(ticket, Err(error));
    }

    /// Routes a mutation result to the modal that issued it. Results for a
    /// modal that has since been dismissed are dropped.
    pub fn mutation_finished(
        &mut self,
        modal: ModalId,
        ticket: SubmitTicket,
        result: Result<(), CatalogError>,
        now: Instant,
    ) {
        if self.create.id == modal {
            self.create.modal.complete(ticket, result, now);
            return;
        }
        if let Some(handle) = self.update.as_mut().filter(|h| h.id == modal) {
            handle.modal.complete(ticket, result, now);
            return;
        }
        if let Some(handle) = self.delete.as_mut().filter(|h| h.id == modal) {
            handle.modal.complete(ticket, result, now);
            return;
        }
        debug!(modal = modal.0, "dropping mutation result for a dismissed modal");
    }

    /// Advances modal timers. Returns a refresh command when at least one modal
    /// finished its success delay this tick.
    pub fn tick(&mut self, now: Instant) -> Option<BackendCommand> {
        let mut refresh = self.create.modal.poll(now) == Some(ModalEffect::RefreshAndClose);

        if let Some(handle) = self.update.as_mut() {
            refresh |= handle.modal.poll(now) == Some(ModalEffect::RefreshAndClose);
        }
        if let Some(handle) = self.delete.as_mut() {
            refresh |= handle.modal.poll(now) == Some(ModalEffect::RefreshAndClose);
        }
        if self.update.as_ref().is_some_and(|h| !h.modal.is_open()) {
            self.update = None;
        }
        if self.delete.as_ref().is_some_and(|h| !h.modal.is_open()) {
            self.delete = None;
        }

        refresh.then(|| self.refresh())
    }

    /// Time until the earliest pending modal close, for repaint scheduling.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        let phases = [
            Some(self.create.modal.phase()),
            self.update.as_ref().map(|h| h.modal.phase()),
            self.delete.as_ref().map(|h| h.modal.phase()),
        ];
        phases
            .into_iter()
            .flatten()
            .filter_map(|phase| match phase {
                ModalPhase::Succeeded { close_at } => Some(close_at.saturating_duration_since(now)),
                _ => None,
            })
            .min()
    }
}

fn submission_command(
    modal: ModalId,
    submitted: Result<PendingSubmission, SubmitRejected>,
) -> Option<BackendCommand> {
    match submitted {
        Ok(submission) => Some(BackendCommand::from_submission(modal, submission)),
        Err(SubmitRejected::Invalid(errors)) => {
            debug!(modal = modal.0, "submission blocked by validation: {errors}");
            None
        }
        Err(SubmitRejected::NotAccepting(phase)) => {
            debug!(modal = modal.0, ?phase, "ignoring submit");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::ListState;
    use shared::{
        domain::{ProductId, Rating},
        protocol::CatalogOperation,
    };

    fn settings() -> Settings {
        Settings {
            success_close_delay_ms: 1000,
            ..Settings::default()
        }
    }

    fn product(id: i64, title: &str) -> Product {
        Product {
            id: ProductId(id),
            title: title.to_string(),
            price: 10.0,
            description: String::new(),
            category: "electronics".to_string(),
            image: String::new(),
            rating: Rating {
                rate: 4.0,
                count: 3,
            },
        }
    }

    fn refresh_ticket(cmd: BackendCommand) -> RefreshTicket {
        match cmd {
            BackendCommand::RefreshProducts { ticket } => ticket,
            other => panic!("expected refresh, got {other:?}"),
        }
    }

    #[test]
    fn loaded_products_replace_the_collection() {
        let mut state = PanelState::new(&settings());
        let ticket = refresh_ticket(state.refresh());

        state.products_loaded(ticket, vec![product(1, "Lamp")]);

        assert_eq!(state.listing.products().map(<[_]>::len), Some(1));
    }

    #[test]
    fn superseded_fetch_does_not_overwrite_newer_result() {
        let mut state = PanelState::new(&settings());
        let old = refresh_ticket(state.refresh());
        let new = refresh_ticket(state.refresh());

        state.products_loaded(new, vec![product(2, "Desk")]);
        state.products_failed(
            old,
            CatalogError::Status {
                operation: CatalogOperation::List,
                status: 500,
            },
        );

        assert!(matches!(state.listing.state(), ListState::Loaded(p) if p[0].id == ProductId(2)));
    }

    #[test]
    fn successful_delete_refreshes_once_after_delay() {
        let mut state = PanelState::new(&settings());
        state.open_delete(product(3, "Bracelet"));
        let cmd = state.confirm_delete().expect("delete command");
        let (modal, ticket) = match cmd {
            BackendCommand::DeleteProduct { modal, ticket, id } => {
                assert_eq!(id, ProductId(3));
                (modal, ticket)
            }
            other => panic!("unexpected {other:?}"),
        };
        assert!(state.confirm_delete().is_none(), "no double delete");

        let now = Instant::now();
        state.mutation_finished(modal, ticket, Ok(()), now);
        assert_eq!(state.next_deadline(now), Some(Duration::from_millis(1000)));
        assert!(state.tick(now).is_none());

        let refresh = state.tick(now + Duration::from_millis(1000));
        assert!(matches!(refresh, Some(BackendCommand::RefreshProducts { .. })));
        assert!(state.delete.is_none());
        assert!(state.tick(now + Duration::from_millis(2000)).is_none());
    }

    #[test]
    fn result_for_replaced_update_modal_is_dropped() {
        let mut state = PanelState::new(&settings());
        state.open_update(product(1, "Lamp"));
        let first = state.submit_update().expect("update command");
        let (first_modal, first_ticket) = match first {
            BackendCommand::UpdateProduct { modal, ticket, .. } => (modal, ticket),
            other => panic!("unexpected {other:?}"),
        };

        state.close_update();
        state.open_update(product(2, "Desk"));
        state.submit_update().expect("second update command");
        state.mutation_finished(first_modal, first_ticket, Ok(()), Instant::now());

        let current = state.update.as_ref().expect("second modal open");
        assert_eq!(current.modal.phase(), ModalPhase::Submitting);
    }

    #[test]
    fn invalid_create_queues_nothing() {
        let mut state = PanelState::new(&settings());
        state.open_create();

        assert!(state.submit_create().is_none());
        assert!(state.create.modal.is_open());
    }

    #[test]
    fn filter_input_resets_page() {
        let mut state = PanelState::new(&Settings {
            page_size: 1,
            ..settings()
        });
        state.table_state.next_page(5);
        state.filter_input = "elec".to_string();

        state.sync_filter();

        assert_eq!(state.table_state.page_index(), 0);
        assert_eq!(state.table_state.filter(), "elec");
    }
}
