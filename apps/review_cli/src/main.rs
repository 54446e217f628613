use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    render_gallery, CardStates, CommentsPanel, GallerySession, ImageUpload, MutationOutcome,
};
use shared::domain::ImageId;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "review", about = "Browse, upload, like and comment on reviewed images")]
struct Cli {
    /// Overrides `api_base_url` from review.toml and the environment.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true)]
    expand_comments: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the gallery.
    List,
    /// Upload an image, then show the refreshed gallery.
    Upload { path: Option<PathBuf> },
    Like { image_id: String },
    Comment { image_id: String, text: String },
}

async fn read_upload(path: &Path) -> Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image file '{}'", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageUpload::new(filename, bytes))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(server_url) = cli.server_url {
        settings.api_base_url = server_url;
    }
    info!(api_base_url = %settings.api_base_url, "starting gallery session");

    let session = GallerySession::connect(settings.api_base_url.clone())
        .with_context(|| format!("invalid server url '{}'", settings.api_base_url))?;
    // A failed first fetch is shown in the rendered gallery below.
    let _ = session.mount().await;

    let mut cards = CardStates::default();
    match cli.command.unwrap_or(Command::List) {
        Command::List => {}
        Command::Upload { path } => {
            let file = match path {
                Some(path) => Some(read_upload(&path).await?),
                None => None,
            };
            session.upload.select_file(file).await;
            let outcome = session.upload.submit().await;
            debug!(?outcome, "upload finished");
            println!("{}", session.upload.message().await);
        }
        Command::Like { image_id } => {
            let outcome = session.like.like(&ImageId::new(image_id)).await;
            debug!(?outcome, "like finished");
        }
        Command::Comment { image_id, text } => {
            let image_id = ImageId::new(image_id);
            let card = cards.card_mut(&image_id);
            card.set_draft(text);
            let outcome = session.comment.submit(&image_id, card).await;
            if outcome == MutationOutcome::Failed {
                debug!(draft = %card.draft, "comment kept for retry");
            }
        }
    }

    let snapshot = session.controller.snapshot().await;
    if cli.expand_comments {
        for image in &snapshot.images {
            cards.card_mut(&image.id).panel = CommentsPanel::Expanded;
        }
    }
    println!("{}", render_gallery(&snapshot, &cards));

    Ok(())
}
