//! Interactive loop: stdin lines in, re-rendered list out.

use std::sync::Arc;

use anyhow::Context;
use client_core::{PostFormState, SortChange, SyncController};
use shared::domain::{PostId, SortOrder};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    app::Session,
    events::{parse_line, FormChanges, UiEvent, HELP},
    render::render_list,
};

pub enum Flow {
    Continue,
    Quit,
}

/// Re-renders the list every time the store changes.
fn spawn_view(session: &Session) -> JoinHandle<()> {
    let mut changes = session.store.subscribe();
    let controller = Arc::clone(&session.controller);
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let posts = changes.borrow_and_update().clone();
            let snapshot = controller.snapshot().await;
            print!("{}", render_list(&posts, &snapshot));
        }
    })
}

async fn print_list(session: &Session) {
    let snapshot = session.controller.snapshot().await;
    print!("{}", render_list(&session.store.snapshot(), &snapshot));
}

pub async fn run(session: Session, sort: SortOrder) -> anyhow::Result<()> {
    let view = spawn_view(&session);
    session.controller.initialize_sorted(sort).await;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        let event = match parse_line(&line) {
            Ok(event) => event,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        if let Flow::Quit = handle_event(&session, event).await {
            break;
        }
    }

    view.abort();
    Ok(())
}

/// Line printed after a sort selection, if any.
pub fn sort_notice(change: SortChange, order: SortOrder) -> Option<String> {
    match change {
        SortChange::Deferred => Some(format!(
            "Sort order {order} applies once the search is cleared."
        )),
        SortChange::Unchanged | SortChange::Reloaded => None,
    }
}

pub async fn handle_event(session: &Session, event: UiEvent) -> Flow {
    debug!(event = event.name(), "handling ui event");
    let controller: &SyncController = &session.controller;
    match event {
        UiEvent::SearchText(text) => {
            controller.on_search_text_changed(text).await;
            if controller.has_pending_search() {
                println!("Searching...");
            }
        }
        UiEvent::Sort(order) => {
            let change = controller.on_sort_order_changed(order).await;
            if let Some(notice) = sort_notice(change, order) {
                println!("{notice}");
            }
        }
        UiEvent::ScrolledToEnd => {
            if !controller.on_scroll_sentinel_visible().await {
                println!("No more posts to load.");
            }
        }
        UiEvent::Add(values) => {
            let mut form = PostFormState::create();
            form.values = values;
            submit(session, &mut form).await;
        }
        UiEvent::Edit { id, changes } => edit(session, id, &changes).await,
        UiEvent::Show => print_list(session).await,
        UiEvent::Help => println!("{HELP}"),
        UiEvent::Quit => return Flow::Quit,
    }
    Flow::Continue
}

async fn edit(session: &Session, id: PostId, changes: &FormChanges) {
    let Some(post) = session.store.find(id) else {
        eprintln!("Post #{id} is not in the list.");
        return;
    };
    let mut form = PostFormState::edit(&post);
    changes.apply(&mut form.values);
    submit(session, &mut form).await;
}

async fn submit(session: &Session, form: &mut PostFormState) {
    let label = form.submit_label();
    match form.submit(&session.editor).await {
        Some(saved) => {
            let id = saved.id.map(|id| id.to_string()).unwrap_or_else(|| "?".into());
            println!("{label}: saved post #{id}");
        }
        None => {
            if let Some(error) = &form.error {
                eprintln!("{label} failed: {error}");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/browse_tests.rs"]
mod tests;
