use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client_core::{
    columns::{product_table, ACTIONS_COLUMN, CATEGORY_COLUMN, PRICE_COLUMN},
    config::load_settings,
    modal::{DeletionModal, ModalPhase, PendingSubmission, ProductFormModal, SubmitRejected, ViewModal},
    table::{render_table, TableState, TableView, EMPTY_MESSAGE},
    validation::ProductDraft,
    CatalogApi, HttpCatalogClient, ListState, ProductListController, Settings,
};
use shared::domain::{Product, ProductId};
use tracing_subscriber::EnvFilter;

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Parser, Debug)]
#[command(about = "Manage a remote product catalog from the terminal")]
struct Cli {
    /// Overrides the configured catalog base URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Settings file; defaults to ./catalog_admin.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print products as JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of products.
    List {
        /// Case-sensitive substring of the category.
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum)]
        sort_price: Option<SortOrder>,
        /// One-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show every field of one product.
    Show { id: i64 },
    Create(FieldArgs),
    /// Update a product; omitted fields keep their current values.
    Update {
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortOrder {
    Asc,
    Desc,
}

#[derive(Args, Debug, Default)]
struct FieldArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    image: Option<String>,
}

impl FieldArgs {
    fn apply(self, draft: &mut ProductDraft) {
        let overrides = [
            (self.title, &mut draft.title),
            (self.price, &mut draft.price),
            (self.description, &mut draft.description),
            (self.category, &mut draft.category),
            (self.image, &mut draft.image),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    tracing::debug!(api = %settings.api_base_url, page_size = settings.page_size, "catalog cli configured");
    let client = HttpCatalogClient::from_settings(&settings)
        .map_err(|err| anyhow!("{}: {err}", err.user_message()))?;

    match cli.command {
        Command::List {
            category,
            sort_price,
            page,
        } => list(&client, &settings, category, sort_price, page, cli.json).await,
        Command::Show { id } => show(&client, ProductId(id), cli.json).await,
        Command::Create(fields) => {
            let mut modal = ProductFormModal::create(settings.success_close_delay());
            modal.open();
            fields.apply(&mut modal.draft);
            let pending = accepted(modal.submit())?;
            let result = pending.mutation.execute(&client).await;
            modal.complete(pending.ticket, result, Instant::now());
            report(modal.phase(), modal.message().map(|m| m.text.as_str()))
        }
        Command::Update { id, fields } => {
            let product = find_product(&client, ProductId(id)).await?;
            let mut modal = ProductFormModal::update(product, settings.success_close_delay());
            modal.open();
            fields.apply(&mut modal.draft);
            let pending = accepted(modal.submit())?;
            let result = pending.mutation.execute(&client).await;
            modal.complete(pending.ticket, result, Instant::now());
            report(modal.phase(), modal.message().map(|m| m.text.as_str()))
        }
        Command::Delete { id, yes } => {
            let product = find_product(&client, ProductId(id)).await?;
            let mut modal = DeletionModal::new(product, settings.success_close_delay());
            modal.open();
            if !yes && !confirm(&modal.prompt())? {
                modal.cancel();
                println!("Cancelled.");
                return Ok(());
            }
            let pending = accepted(modal.confirm())?;
            let result = pending.mutation.execute(&client).await;
            modal.complete(pending.ticket, result, Instant::now());
            report(modal.phase(), modal.message().map(|m| m.text.as_str()))
        }
    }
}

fn accepted(submission: Result<PendingSubmission, SubmitRejected>) -> Result<PendingSubmission> {
    match submission {
        Ok(pending) => Ok(pending),
        Err(SubmitRejected::Invalid(errors)) => bail!("invalid product: {errors}"),
        Err(SubmitRejected::NotAccepting(phase)) => bail!("form is not accepting input ({phase:?})"),
    }
}

fn report(phase: ModalPhase, message: Option<&str>) -> Result<()> {
    let message = message.unwrap_or_default();
    match phase {
        ModalPhase::Succeeded { .. } => {
            println!("{message}");
            Ok(())
        }
        _ => bail!("{message}"),
    }
}

async fn fetch_products(api: &dyn CatalogApi) -> Result<Vec<Product>> {
    let mut listing = ProductListController::new();
    listing.refresh(api).await;
    match listing.state() {
        ListState::Loaded(products) => Ok(products.clone()),
        ListState::Failed(message) => bail!("{message}"),
        ListState::Loading => bail!("product list did not load"),
    }
}

async fn find_product(api: &dyn CatalogApi, id: ProductId) -> Result<Product> {
    fetch_products(api)
        .await?
        .into_iter()
        .find(|product| product.id == id)
        .ok_or_else(|| anyhow!("product {id} not found"))
}

async fn list(
    api: &dyn CatalogApi,
    settings: &Settings,
    category: Option<String>,
    sort_price: Option<SortOrder>,
    page: usize,
    json: bool,
) -> Result<()> {
    let products = fetch_products(api).await?;
    let spec = product_table();
    let mut state = TableState::new(CATEGORY_COLUMN, settings.page_size);
    if let Some(category) = category {
        state.set_filter(category);
    }
    match sort_price {
        Some(SortOrder::Asc) => state.toggle_sort(PRICE_COLUMN),
        Some(SortOrder::Desc) => {
            state.toggle_sort(PRICE_COLUMN);
            state.toggle_sort(PRICE_COLUMN);
        }
        None => {}
    }
    state.go_to_page(page.saturating_sub(1));

    let view = render_table(&spec, &products, &mut state);
    if json {
        let page: Vec<&Product> = view.rows.iter().map(|row| row.item).collect();
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", format_table(&view));
    }
    Ok(())
}

async fn show(api: &dyn CatalogApi, id: ProductId, json: bool) -> Result<()> {
    let product = find_product(api, id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&product)?);
        return Ok(());
    }
    let view = ViewModal::new(product);
    let width = view
        .details()
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or_default();
    for (label, value) in view.details() {
        println!("{label:<width$}  {value}");
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Aligned plain-text rendering of one table page. Highlighted rows are
/// marked with `*`.
fn format_table(view: &TableView<'_, Product>) -> String {
    let columns: Vec<usize> = view
        .headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.key != ACTIONS_COLUMN)
        .map(|(index, _)| index)
        .collect();
    let cell = |row: &[String], index: usize| {
        if view.headers[index].key == "description" {
            truncate(&row[index], DESCRIPTION_WIDTH)
        } else {
            row[index].clone()
        }
    };

    let mut widths: Vec<usize> = columns
        .iter()
        .map(|&index| view.headers[index].label.chars().count())
        .collect();
    for row in &view.rows {
        for (slot, &index) in columns.iter().enumerate() {
            widths[slot] = widths[slot].max(cell(&row.cells, index).chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(&index, &width)| format!("{:<width$}", view.headers[index].label))
        .collect();
    out.push_str(&format!("  {}\n", header.join("  ").trim_end()));

    if view.is_empty() {
        out.push_str(&format!("  {EMPTY_MESSAGE}\n"));
        return out;
    }
    for row in &view.rows {
        let marker = if row.highlighted { '*' } else { ' ' };
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(&index, &width)| format!("{:<width$}", cell(&row.cells, index)))
            .collect();
        out.push_str(&format!("{marker} {}\n", cells.join("  ").trim_end()));
    }
    out.push_str(&format!(
        "Page {} of {} ({} products)\n",
        view.page_index + 1,
        view.page_count,
        view.filtered_len
    ));
    out
}
