//! Owner of the in-memory product collection.
//!
//! The collection is only ever replaced wholesale by the result of a list call.
//! Every refresh hands out a [`RefreshTicket`]; only the newest ticket may resolve
//! into state, so a superseded fetch that completes late is discarded.

use shared::domain::Product;
use tracing::{debug, info, warn};

use crate::{CatalogApi, CatalogError};

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Product>),
    /// Last fetch failed; holds the user-facing message. Retry is a plain refresh.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct ProductListController {
    state: ListState,
    issued: u64,
}

impl Default for ProductListController {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListController {
    pub fn new() -> Self {
        Self {
            state: ListState::Loading,
            issued: 0,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn products(&self) -> Option<&[Product]> {
        match &self.state {
            ListState::Loaded(products) => Some(products),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading)
    }

    /// The ticket a pending fetch must present to resolve, if one was issued.
    pub fn current_ticket(&self) -> Option<RefreshTicket> {
        (self.issued > 0).then_some(RefreshTicket(self.issued))
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        self.state = ListState::Loading;
        debug!(generation = self.issued, "product list refresh started");
        RefreshTicket(self.issued)
    }

    /// Applies a fetch result. Returns false when the ticket was superseded.
    pub fn resolve(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Product>, CatalogError>,
    ) -> bool {
        if ticket.0 != self.issued {
            debug!(
                generation = ticket.0,
                current = self.issued,
                "dropping stale product list result"
            );
            return false;
        }

        self.state = match result {
            Ok(products) => {
                info!(count = products.len(), "product list loaded");
                ListState::Loaded(products)
            }
            Err(err) => {
                warn!("product list fetch failed: {err}");
                ListState::Failed(err.user_message())
            }
        };
        true
    }

    pub async fn refresh(&mut self, api: &dyn CatalogApi) -> bool {
        let ticket = self.begin_refresh();
        let result = api.list().await;
        self.resolve(ticket, result)
    }
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
