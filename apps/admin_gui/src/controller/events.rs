//! UI/backend events and error modeling for the admin panel.

use client_core::{modal::SubmitTicket, CatalogError, RefreshTicket};
use shared::domain::Product;

use crate::backend_bridge::commands::ModalId;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    ProductsLoaded {
        ticket: RefreshTicket,
        products: Vec<Product>,
    },
    ProductsFailed {
        ticket: RefreshTicket,
        error: CatalogError,
    },
    MutationFinished {
        modal: ModalId,
        ticket: SubmitTicket,
        result: Result<(), CatalogError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Server,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadProducts,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("base url")
            || message_lower.contains("setting")
            || message_lower.contains("not configured")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("request failed")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_catalog(context: UiErrorContext, err: &CatalogError) -> Self {
        let category = match err {
            CatalogError::InvalidBaseUrl { .. } => UiErrorCategory::Configuration,
            CatalogError::Transport { .. } => UiErrorCategory::Transport,
            CatalogError::Status { .. } => UiErrorCategory::Server,
            CatalogError::Decode { .. } => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Startup failures leave the panel unable to reach the API until relaunch.
    pub fn is_fatal(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Configuration => "Configuration",
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Validation => "Data",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::protocol::CatalogOperation;

    #[test]
    fn classifies_startup_and_transport_messages() {
        let startup = UiError::from_message(
            UiErrorContext::BackendStartup,
            "invalid catalog base url 'ftp://x': unsupported scheme 'ftp'",
        );
        assert_eq!(startup.category(), UiErrorCategory::Configuration);
        assert!(startup.is_fatal());

        let queue = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected",
        );
        assert_eq!(queue.category(), UiErrorCategory::Transport);
        assert!(!queue.is_fatal());

        let full = UiError::from_message(
            UiErrorContext::General,
            "UI command queue is full; please retry",
        );
        assert_eq!(full.category(), UiErrorCategory::Unknown);

        let other = UiError::from_message(UiErrorContext::General, "something odd");
        assert_eq!(other.category(), UiErrorCategory::Unknown);
    }

    #[test]
    fn catalog_status_errors_are_server_errors() {
        let err = CatalogError::Status {
            operation: CatalogOperation::List,
            status: 503,
        };

        let ui = UiError::from_catalog(UiErrorContext::LoadProducts, &err);

        assert_eq!(ui.category(), UiErrorCategory::Server);
        assert_eq!(ui.context(), UiErrorContext::LoadProducts);
        assert_eq!(ui.message(), "list request returned status 503");
        assert_eq!(err_label(ui.category()), "Server");
    }
}
