//! Row action modals: `Closed -> Open -> Submitting -> (Succeeded | Failed)`.
//!
//! A modal never touches the network itself. `submit`/`confirm` hand back a
//! [`PendingSubmission`] for the owner to execute, and the owner feeds the result
//! back through `complete`. After a success the modal waits out its close delay,
//! then `poll` yields [`ModalEffect::RefreshAndClose`] exactly once.

use std::time::{Duration, Instant};

use shared::{
    domain::{Product, ProductFields, ProductId},
    protocol::CatalogOperation,
};
use tracing::{debug, info, warn};

use crate::{
    validation::{ProductDraft, ProductField, ValidationErrors},
    CatalogApi, CatalogError,
};

pub const DEFAULT_SUCCESS_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Open,
    Submitting,
    Succeeded { close_at: Instant },
    /// Still open and editable; the error message is shown and submit may be retried.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEffect {
    RefreshAndClose,
}

/// Identifies one submission of one opening of a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmitTicket {
    session: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(ProductFields),
    Update { id: ProductId, fields: ProductFields },
    Delete(ProductId),
}

impl Mutation {
    pub fn operation(&self) -> CatalogOperation {
        match self {
            Self::Create(_) => CatalogOperation::Create,
            Self::Update { .. } => CatalogOperation::Update,
            Self::Delete(_) => CatalogOperation::Delete,
        }
    }

    pub async fn execute(&self, api: &dyn CatalogApi) -> Result<(), CatalogError> {
        match self {
            Self::Create(fields) => api.create(fields).await,
            Self::Update { id, fields } => api.update(*id, fields).await,
            Self::Delete(id) => api.delete(*id).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub ticket: SubmitTicket,
    pub mutation: Mutation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Field-level errors; nothing was sent.
    Invalid(ValidationErrors),
    /// Closed, or a submission is already in flight or has succeeded.
    NotAccepting(ModalPhase),
}

#[derive(Debug)]
struct Lifecycle {
    operation: CatalogOperation,
    phase: ModalPhase,
    message: Option<FormMessage>,
    session: u64,
    success_delay: Duration,
}

impl Lifecycle {
    fn new(operation: CatalogOperation, success_delay: Duration) -> Self {
        Self {
            operation,
            phase: ModalPhase::Closed,
            message: None,
            session: 0,
            success_delay,
        }
    }

    fn open(&mut self) {
        self.session += 1;
        self.phase = ModalPhase::Open;
        self.message = None;
    }

    fn close(&mut self) {
        if self.phase == ModalPhase::Submitting {
            debug!(operation = %self.operation, "modal closed with a request in flight");
        }
        self.phase = ModalPhase::Closed;
        self.message = None;
    }

    fn accepts_submit(&self) -> bool {
        matches!(self.phase, ModalPhase::Open | ModalPhase::Failed)
    }

    fn begin_submit(&mut self) -> SubmitTicket {
        self.phase = ModalPhase::Submitting;
        self.message = None;
        SubmitTicket {
            session: self.session,
        }
    }

    fn complete(&mut self, ticket: SubmitTicket, result: Result<(), CatalogError>, now: Instant) {
        if ticket.session != self.session || self.phase != ModalPhase::Submitting {
            debug!(operation = %self.operation, "ignoring completion for a closed modal");
            return;
        }
        match result {
            Ok(()) => {
                info!(operation = %self.operation, "catalog mutation succeeded");
                self.phase = ModalPhase::Succeeded {
                    close_at: now + self.success_delay,
                };
                self.message = Some(FormMessage {
                    kind: MessageKind::Success,
                    text: self.operation.success_message().to_string(),
                });
            }
            Err(err) => {
                warn!(operation = %self.operation, "catalog mutation failed: {err}");
                self.phase = ModalPhase::Failed;
                self.message = Some(FormMessage {
                    kind: MessageKind::Error,
                    text: err.user_message(),
                });
            }
        }
    }

    fn poll(&mut self, now: Instant) -> Option<ModalEffect> {
        match self.phase {
            ModalPhase::Succeeded { close_at } if now >= close_at => {
                self.close();
                Some(ModalEffect::RefreshAndClose)
            }
            _ => None,
        }
    }

    fn is_open(&self) -> bool {
        self.phase != ModalPhase::Closed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Update(Product),
}

/// Create and update forms share one shape; only the seed values and the call differ.
#[derive(Debug)]
pub struct ProductFormModal {
    mode: FormMode,
    pub draft: ProductDraft,
    field_errors: Option<ValidationErrors>,
    lifecycle: Lifecycle,
}

impl ProductFormModal {
    pub fn create(success_delay: Duration) -> Self {
        Self {
            mode: FormMode::Create,
            draft: ProductDraft::blank(),
            field_errors: None,
            lifecycle: Lifecycle::new(CatalogOperation::Create, success_delay),
        }
    }

    pub fn update(product: Product, success_delay: Duration) -> Self {
        Self {
            draft: ProductDraft::from_product(&product),
            mode: FormMode::Update(product),
            field_errors: None,
            lifecycle: Lifecycle::new(CatalogOperation::Update, success_delay),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn heading(&self) -> String {
        match &self.mode {
            FormMode::Create => "Create a product".to_string(),
            FormMode::Update(product) => format!("Update {}", product.title),
        }
    }

    /// Opening always reseeds the form from its mode.
    pub fn open(&mut self) {
        self.draft = match &self.mode {
            FormMode::Create => ProductDraft::blank(),
            FormMode::Update(product) => ProductDraft::from_product(product),
        };
        self.field_errors = None;
        self.lifecycle.open();
    }

    pub fn close(&mut self) {
        self.field_errors = None;
        self.lifecycle.close();
    }

    pub fn submit(&mut self) -> Result<PendingSubmission, SubmitRejected> {
        if !self.lifecycle.accepts_submit() {
            return Err(SubmitRejected::NotAccepting(self.lifecycle.phase));
        }
        let fields = match self.draft.validate() {
            Ok(fields) => fields,
            Err(errors) => {
                self.field_errors = Some(errors.clone());
                return Err(SubmitRejected::Invalid(errors));
            }
        };
        self.field_errors = None;
        let mutation = match &self.mode {
            FormMode::Create => Mutation::Create(fields),
            FormMode::Update(product) => Mutation::Update {
                id: product.id,
                fields,
            },
        };
        Ok(PendingSubmission {
            ticket: self.lifecycle.begin_submit(),
            mutation,
        })
    }

    pub fn complete(&mut self, ticket: SubmitTicket, result: Result<(), CatalogError>, now: Instant) {
        self.lifecycle.complete(ticket, result, now);
    }

    pub fn poll(&mut self, now: Instant) -> Option<ModalEffect> {
        self.lifecycle.poll(now)
    }

    pub fn phase(&self) -> ModalPhase {
        self.lifecycle.phase
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.lifecycle.message.as_ref()
    }

    pub fn field_error(&self, field: ProductField) -> Option<&'static str> {
        self.field_errors
            .as_ref()
            .and_then(|errors| errors.for_field(field))
    }
}

/// Two-button confirm dialog. Cancel closes with no side effects.
#[derive(Debug)]
pub struct DeletionModal {
    product: Product,
    lifecycle: Lifecycle,
}

impl DeletionModal {
    pub fn new(product: Product, success_delay: Duration) -> Self {
        Self {
            product,
            lifecycle: Lifecycle::new(CatalogOperation::Delete, success_delay),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn heading(&self) -> String {
        format!("Delete {}", self.product.title)
    }

    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete {}?", self.product.title)
    }

    pub fn open(&mut self) {
        self.lifecycle.open();
    }

    pub fn cancel(&mut self) {
        self.lifecycle.close();
    }

    pub fn confirm(&mut self) -> Result<PendingSubmission, SubmitRejected> {
        if !self.lifecycle.accepts_submit() {
            return Err(SubmitRejected::NotAccepting(self.lifecycle.phase));
        }
        Ok(PendingSubmission {
            ticket: self.lifecycle.begin_submit(),
            mutation: Mutation::Delete(self.product.id),
        })
    }

    pub fn complete(&mut self, ticket: SubmitTicket, result: Result<(), CatalogError>, now: Instant) {
        self.lifecycle.complete(ticket, result, now);
    }

    pub fn poll(&mut self, now: Instant) -> Option<ModalEffect> {
        self.lifecycle.poll(now)
    }

    pub fn phase(&self) -> ModalPhase {
        self.lifecycle.phase
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.lifecycle.message.as_ref()
    }
}

/// Read-only detail view of one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModal {
    product: Product,
}

impl ViewModal {
    pub fn new(product: Product) -> Self {
        Self { product }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn heading(&self) -> &str {
        &self.product.title
    }

    pub fn details(&self) -> Vec<(&'static str, String)> {
        let p = &self.product;
        vec![
            ("Image", p.image.clone()),
            ("ID", p.id.to_string()),
            ("Title", p.title.clone()),
            ("Rating", format!("{}/5", p.rating.rate)),
            ("# of reviews", p.rating.count.to_string()),
            ("Price", crate::columns::format_price(p.price)),
            ("Category", p.category.clone()),
            ("Description", p.description.clone()),
        ]
    }
}

#[cfg(test)]
#[path = "tests/modal_tests.rs"]
mod tests;
