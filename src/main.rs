use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use listing_desk::config::{Config, DEFAULT_REQUEST_TIMEOUT};
use listing_desk::dispatch::{resolve_renderer, DetailService, DetailView};
use listing_desk::schema;
use listing_desk::store::{DataStore, MemoryStore, ObjectStorage, SupabaseClient};
use listing_desk::submission::{ListingDraft, PendingImage, SubmissionPipeline};

#[derive(Parser, Debug)]
#[command(name = "listing-desk", about = "Post and inspect marketplace listings")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories with their form schema and detail renderer
    Categories,
    /// Print the form schema for a category as JSON
    Schema { category: String },
    /// Post a listing from a JSON draft
    Post {
        draft: PathBuf,
        /// Image to attach, in display order
        #[arg(long = "image", short = 'i')]
        images: Vec<PathBuf>,
        /// Run against an in-memory store instead of Supabase
        #[arg(long)]
        dry_run: bool,
    },
    /// Show a listing the way its category renderer would
    Show { listing_id: Uuid },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Categories => list_categories().await,
        Command::Schema { category } => print_schema(&category),
        Command::Post {
            draft,
            images,
            dry_run,
        } => post(draft, images, dry_run).await,
        Command::Show { listing_id } => show(listing_id).await,
    }
}

fn connect() -> anyhow::Result<(Config, Arc<SupabaseClient>)> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let client = SupabaseClient::new(&config).context("Failed to build Supabase client")?;
    Ok((config, Arc::new(client)))
}

async fn list_categories() -> anyhow::Result<()> {
    let (_, client) = connect()?;
    let categories = client
        .list_categories()
        .await
        .context("Failed to load categories")?;

    info!("Found {} categories", categories.len());
    for category in &categories {
        let form = schema::lookup(&category.slug)
            .map(|schema| schema.category_id)
            .unwrap_or("-");
        println!(
            "{:<32} form: {:<16} detail: {}",
            category.slug,
            form,
            resolve_renderer(&category.slug)
        );
    }
    Ok(())
}

fn print_schema(category: &str) -> anyhow::Result<()> {
    let Some(schema) = schema::lookup(category) else {
        bail!("No form schema for category {category}");
    };
    println!("{}", serde_json::to_string_pretty(schema)?);
    Ok(())
}

async fn post(draft_path: PathBuf, image_paths: Vec<PathBuf>, dry_run: bool) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(&draft_path)
        .await
        .with_context(|| format!("Failed to read draft {}", draft_path.display()))?;
    let draft: ListingDraft = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse draft {}", draft_path.display()))?;

    let mut images = Vec::with_capacity(image_paths.len());
    for path in &image_paths {
        images.push(PendingImage::from_path(path).await?);
    }

    if dry_run {
        info!("Dry run: writing to an in-memory store");
        let store = Arc::new(MemoryStore::new());
        let display_name = schema::lookup(&draft.category)
            .map(|schema| schema.display_name)
            .unwrap_or(draft.category.as_str());
        store.add_category(display_name, &draft.category);
        for country in &draft.countries {
            store.add_country(country, country);
        }
        return submit_and_show(
            store,
            "marketplace",
            DEFAULT_REQUEST_TIMEOUT,
            &draft,
            images,
        )
        .await;
    }

    let (config, client) = connect()?;
    submit_and_show(
        client,
        &config.media_bucket,
        config.request_timeout,
        &draft,
        images,
    )
    .await
}

async fn submit_and_show<S>(
    store: Arc<S>,
    bucket: &str,
    view_timeout: Duration,
    draft: &ListingDraft,
    images: Vec<PendingImage>,
) -> anyhow::Result<()>
where
    S: DataStore + ObjectStorage + 'static,
{
    let categories = store
        .list_categories()
        .await
        .context("Failed to load categories")?;
    let countries = store
        .list_countries()
        .await
        .context("Failed to load countries")?;

    let mut form = draft.to_form(&categories, &countries)?;
    form.add_images(images)?;
    if !form.images().is_empty() && !form.set_primary_image(draft.primary_image) {
        warn!(
            "Primary image {} is out of range, keeping the first image",
            draft.primary_image
        );
    }

    let pipeline = SubmissionPipeline::new(Arc::clone(&store), bucket);
    let submitted = match pipeline.submit(&form).await {
        Ok(submitted) => submitted,
        Err(e) => {
            warn!("Submission failed: {}", e);
            bail!(e.user_message());
        }
    };
    info!("✅ Created listing {}", submitted.listing.id);

    let service = DetailService::new(store, view_timeout);
    let opened = service.open(submitted.listing.id).await?;
    print_view(&opened.view);
    Ok(())
}

async fn show(listing_id: Uuid) -> anyhow::Result<()> {
    let (config, client) = connect()?;
    let service = DetailService::new(client, config.request_timeout);
    let opened = service
        .open(listing_id)
        .await
        .with_context(|| format!("Failed to load listing {listing_id}"))?;

    print_view(&opened.view);
    if !opened.related.is_empty() {
        println!("Related:");
        for listing in &opened.related {
            println!("  {} {}", listing.id, listing.title);
        }
    }
    Ok(())
}

fn print_view(view: &DetailView) {
    println!("{} [{}]", view.title, view.renderer);
    println!("   {}", view.price_line);
    for fact in &view.facts {
        println!("   {}: {}", fact.label, fact.value);
    }
    for list in view.lists.iter().filter(|list| !list.items.is_empty()) {
        println!("   {}: {}", list.label, list.items.join(", "));
    }
    if !view.countries.is_empty() {
        println!("   Countries: {}", view.countries.join(", "));
    }
    if let Some(image) = &view.primary_image {
        println!("   Image: {}", image);
    }
}
