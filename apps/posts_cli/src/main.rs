use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{PostForm, PostFormState};
use shared::domain::{Post, PostId, SortOrder, UserId};
use tracing_subscriber::EnvFilter;

mod app;
mod browse;
mod config;
mod events;
mod render;

use app::Session;
use config::load_settings;
use render::{render_list, render_post};

#[derive(Parser, Debug)]
#[command(name = "posts", about = "Browse, search, and edit posts from a remote posts API")]
struct Cli {
    #[arg(long, default_value = "posts.toml")]
    config: PathBuf,
    /// Overrides the configured API base URL.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the first pages of posts.
    List {
        #[arg(long, default_value = "none")]
        sort: SortOrder,
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    Search {
        query: String,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// Comma separated.
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Replace the title, body, and tags of a saved post.
    Edit {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Interactive list with search, sort, and infinite scroll.
    Browse {
        #[arg(long, default_value = "none")]
        sort: SortOrder,
    },
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

    let mut settings = load_settings(&cli.config);
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    let session = Session::connect(&settings)?;

    match cli.command {
        Command::List { sort, pages } => {
            session.controller.initialize_sorted(sort).await;
            for _ in 1..pages {
                if !session.controller.on_scroll_sentinel_visible().await {
                    break;
                }
            }
            print_session(&session).await;
        }
        Command::Search { query } => {
            session.controller.on_search_text_changed(query).await;
            if !session.controller.has_pending_search() {
                bail!("search text must be at least 2 characters");
            }
            session.controller.wait_for_pending_search().await;
            print_session(&session).await;
        }
        Command::Add { title, body, tags } => {
            let mut form = PostFormState::create();
            form.values = PostForm::new(title, body, tags);
            submit_once(&session, form).await?;
        }
        Command::Edit {
            id,
            title,
            body,
            tags,
            user_id,
        } => {
            let post = Post {
                id: Some(PostId(id)),
                user_id: user_id.map(UserId),
                ..Post::default()
            };
            let mut form = PostFormState::edit(&post);
            form.values = PostForm::new(title, body, tags);
            submit_once(&session, form).await?;
        }
        Command::Browse { sort } => browse::run(session, sort).await?,
    }

    Ok(())
}

async fn print_session(session: &Session) {
    let snapshot = session.controller.snapshot().await;
    print!("{}", render_list(&session.store.snapshot(), &snapshot));
}

async fn submit_once(session: &Session, mut form: PostFormState) -> Result<()> {
    let label = form.submit_label();
    match form.submit(&session.editor).await {
        Some(saved) => {
            if let Some(card) = render_post(&saved) {
                print!("{card}");
            }
            Ok(())
        }
        None => bail!(form.error.unwrap_or_else(|| format!("{label} failed"))),
    }
}
