//! Backend worker thread: owns the tokio runtime and the catalog client.

use std::{sync::Arc, thread};

use client_core::{modal::Mutation, CatalogApi, HttpCatalogClient, Settings};
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::{BackendCommand, ModalId};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    match HttpCatalogClient::from_settings(&settings) {
        Ok(client) => {
            tracing::info!(url = client.products_url(), "catalog backend configured");
            spawn_worker(Arc::new(client), cmd_rx, ui_tx);
        }
        Err(err) => {
            tracing::error!("backend worker startup failure: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_catalog(
                UiErrorContext::BackendStartup,
                &err,
            )));
        }
    }
}

pub fn spawn_worker(
    api: Arc<dyn CatalogApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            let mut list_task: Option<JoinHandle<()>> = None;
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend received command");
                match cmd {
                    BackendCommand::RefreshProducts { ticket } => {
                        if let Some(task) = list_task.take() {
                            task.abort();
                        }
                        let api = Arc::clone(&api);
                        let ui_tx = ui_tx.clone();
                        list_task = Some(tokio::spawn(async move {
                            let event = match api.list().await {
                                Ok(products) => UiEvent::ProductsLoaded { ticket, products },
                                Err(error) => UiEvent::ProductsFailed { ticket, error },
                            };
                            deliver(&ui_tx, event);
                        }));
                    }
                    BackendCommand::CreateProduct {
                        modal,
                        ticket,
                        fields,
                    } => spawn_mutation(&api, &ui_tx, modal, ticket, Mutation::Create(fields)),
                    BackendCommand::UpdateProduct {
                        modal,
                        ticket,
                        id,
                        fields,
                    } => spawn_mutation(
                        &api,
                        &ui_tx,
                        modal,
                        ticket,
                        Mutation::Update { id, fields },
                    ),
                    BackendCommand::DeleteProduct { modal, ticket, id } => {
                        spawn_mutation(&api, &ui_tx, modal, ticket, Mutation::Delete(id))
                    }
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    })
}

fn spawn_mutation(
    api: &Arc<dyn CatalogApi>,
    ui_tx: &Sender<UiEvent>,
    modal: ModalId,
    ticket: client_core::modal::SubmitTicket,
    mutation: Mutation,
) {
    let api = Arc::clone(api);
    let ui_tx = ui_tx.clone();
    tokio::spawn(async move {
        let result = mutation.execute(api.as_ref()).await;
        deliver(
            &ui_tx,
            UiEvent::MutationFinished {
                modal,
                ticket,
                result,
            },
        );
    });
}

fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if let Err(err) = ui_tx.try_send(event) {
        tracing::warn!("dropping backend event: {err}");
    }
}
