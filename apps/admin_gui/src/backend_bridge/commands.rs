//! Backend commands queued from UI to backend worker.

use client_core::{
    modal::{Mutation, PendingSubmission, SubmitTicket},
    RefreshTicket,
};
use shared::domain::{ProductFields, ProductId};

/// Which modal a mutation belongs to. Update and delete modals are created per
/// row, so the id tells apart two instances of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    RefreshProducts {
        ticket: RefreshTicket,
    },
    CreateProduct {
        modal: ModalId,
        ticket: SubmitTicket,
        fields: ProductFields,
    },
    UpdateProduct {
        modal: ModalId,
        ticket: SubmitTicket,
        id: ProductId,
        fields: ProductFields,
    },
    DeleteProduct {
        modal: ModalId,
        ticket: SubmitTicket,
        id: ProductId,
    },
}

impl BackendCommand {
    pub fn from_submission(modal: ModalId, submission: PendingSubmission) -> Self {
        let ticket = submission.ticket;
        match submission.mutation {
            Mutation::Create(fields) => Self::CreateProduct {
                modal,
                ticket,
                fields,
            },
            Mutation::Update { id, fields } => Self::UpdateProduct {
                modal,
                ticket,
                id,
                fields,
            },
            Mutation::Delete(id) => Self::DeleteProduct { modal, ticket, id },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RefreshProducts { .. } => "refresh_products",
            Self::CreateProduct { .. } => "create_product",
            Self::UpdateProduct { .. } => "update_product",
            Self::DeleteProduct { .. } => "delete_product",
        }
    }
}
