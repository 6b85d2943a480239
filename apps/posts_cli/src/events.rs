//! Terminal input lines turned into controller events.

use anyhow::{bail, Context};
use client_core::PostForm;
use shared::domain::{PostId, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// New content of the search box. Empty text clears the search.
    SearchText(String),
    Sort(SortOrder),
    ScrolledToEnd,
    Add(PostForm),
    Edit { id: PostId, changes: FormChanges },
    Show,
    Help,
    Quit,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::SearchText(_) => "search_text",
            UiEvent::Sort(_) => "sort",
            UiEvent::ScrolledToEnd => "scrolled_to_end",
            UiEvent::Add(_) => "add",
            UiEvent::Edit { .. } => "edit",
            UiEvent::Show => "show",
            UiEvent::Help => "help",
            UiEvent::Quit => "quit",
        }
    }
}

/// Edit-form fields the user typed; `None` keeps the post's current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<String>,
}

impl FormChanges {
    pub fn apply(&self, form: &mut PostForm) {
        if let Some(title) = &self.title {
            form.title.clone_from(title);
        }
        if let Some(body) = &self.body {
            form.body.clone_from(body);
        }
        if let Some(tags) = &self.tags {
            form.tags.clone_from(tags);
        }
    }
}

pub const HELP: &str = "\
type text            search posts (empty line clears the search)
:more                load the next page
:sort asc|desc|none  sort by title
:clear               clear the search
:add title | body | tags
:edit <id> title | body | tags   (leave a field empty to keep it)
:show                print the list again
:quit";

pub fn parse_line(line: &str) -> anyhow::Result<UiEvent> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return Ok(UiEvent::SearchText(line.to_string()));
    };

    let (name, rest) = command
        .trim_start()
        .split_once(char::is_whitespace)
        .unwrap_or((command.trim(), ""));
    let rest = rest.trim();

    let event = match name {
        "more" => UiEvent::ScrolledToEnd,
        "clear" => UiEvent::SearchText(String::new()),
        "show" => UiEvent::Show,
        "help" | "?" => UiEvent::Help,
        "quit" | "q" => UiEvent::Quit,
        "sort" => UiEvent::Sort(rest.parse()?),
        "add" => {
            let [title, body, tags] = split_fields(rest);
            UiEvent::Add(PostForm::new(title, body, tags))
        }
        "edit" => {
            let (id, fields) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let id = id
                .parse::<i64>()
                .with_context(|| format!("expected a post id, got '{id}'"))?;
            let [title, body, tags] = split_fields(fields).map(non_empty);
            UiEvent::Edit {
                id: PostId(id),
                changes: FormChanges { title, body, tags },
            }
        }
        other => bail!("unknown command ':{other}', try :help"),
    };
    Ok(event)
}

fn split_fields(raw: &str) -> [String; 3] {
    let mut parts = raw.splitn(3, '|').map(|part| part.trim().to_string());
    [
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    ]
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
