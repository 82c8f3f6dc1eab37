//! Line-oriented front end standing in for the browser view. All behavior
//! lives in `catalog_core`; this module only translates commands to
//! messages and renders the view model as text.

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use catalog_core::{
    update, AppState, Category, CatalogViewModel, ItemId, Msg, SortOrder,
};
use catalog_engine::{ApiSettings, PlantDraft, PlantRecord};

use crate::prefs;
use crate::runner::EffectRunner;

pub fn run(base_url: &str) -> Result<()> {
    let prefs_dir = std::env::current_dir()?;
    let key = prefs::load(&prefs_dir);
    let mut saved_key = key;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(ApiSettings::new(base_url), msg_tx.clone());

    let mut state = AppState::with_key(key);
    let _ = msg_tx.send(Msg::ReloadRequested);

    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("catalog shell — type `help` for commands");
    loop {
        let mut saw_input = false;

        while let Ok(msg) = msg_rx.try_recv() {
            saw_input = true;
            let (next, effects) = update(std::mem::take(&mut state), msg);
            state = next;
            runner.run(effects);
        }

        match line_rx.try_recv() {
            Ok(line) => {
                saw_input = true;
                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Help => print_help(),
                    Command::Core(msg) => {
                        let _ = msg_tx.send(msg);
                    }
                    Command::Detail(id) => runner.fetch_detail(&id),
                    Command::DeleteOne(id) => runner.delete_one(&id),
                    Command::Add(draft) => runner.create(draft),
                    Command::Edit(id, draft) => runner.update_item(&id, draft),
                    Command::Unknown(text) => {
                        println!("unrecognized command: {text} (try `help`)");
                    }
                    Command::Empty => {}
                }
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => break,
        }

        if state.consume_dirty() {
            let current = state.session_key();
            if current != saved_key {
                prefs::save(&prefs_dir, current);
                saved_key = current;
            }
            render(&state.view());
        }

        if !saw_input {
            thread::sleep(Duration::from_millis(20));
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Core(Msg),
    Detail(String),
    DeleteOne(ItemId),
    Add(PlantDraft),
    Edit(ItemId, PlantDraft),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    match head {
        "more" => Command::Core(Msg::EndOfListReached),
        "reload" => Command::Core(Msg::ReloadRequested),
        "filter" => match rest {
            "all" | "" => Command::Core(Msg::CategorySelected(None)),
            name => match Category::parse(name).or_else(|| category_by_index(name)) {
                Some(category) => Command::Core(Msg::CategorySelected(Some(category))),
                None => Command::Unknown(line.to_string()),
            },
        },
        "sort" => match rest {
            "asc" => Command::Core(Msg::SortSelected(Some(SortOrder::PriceAsc))),
            "desc" => Command::Core(Msg::SortSelected(Some(SortOrder::PriceDesc))),
            "none" | "" => Command::Core(Msg::SortSelected(None)),
            _ => Command::Unknown(line.to_string()),
        },
        "del" => Command::Core(Msg::DeleteModeToggled),
        "sel" if !rest.is_empty() => Command::Core(Msg::ItemSelectionToggled {
            id: ItemId::new(rest),
        }),
        "confirm" => Command::Core(Msg::BatchDeleteConfirmed),
        "rm" if !rest.is_empty() => Command::DeleteOne(ItemId::new(rest)),
        "show" if !rest.is_empty() => Command::Detail(rest.to_string()),
        "add" => match parse_draft(rest) {
            Some(draft) => Command::Add(draft),
            None => Command::Unknown(line.to_string()),
        },
        "edit" => match rest.split_once(' ') {
            Some((id, fields)) => match parse_draft(fields.trim()) {
                Some(draft) => Command::Edit(ItemId::new(id), draft),
                None => Command::Unknown(line.to_string()),
            },
            None => Command::Unknown(line.to_string()),
        },
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// `filter 3` selects the third entry of the fixed category list.
fn category_by_index(token: &str) -> Option<Category> {
    let n = token.parse::<usize>().ok()?;
    Category::ALL.get(n.checked_sub(1)?).copied()
}

/// Draft syntax: `name;cost;category[;description]`.
fn parse_draft(rest: &str) -> Option<PlantDraft> {
    let mut parts = rest.splitn(4, ';').map(str::trim);
    let name = parts.next().filter(|s| !s.is_empty())?;
    let cost = parts.next().filter(|s| !s.is_empty())?;
    let category = parts.next().filter(|s| !s.is_empty())?;
    let description = parts.next().unwrap_or("");
    Some(PlantDraft {
        name: name.to_string(),
        cost: cost.to_string(),
        category: category.to_string(),
        status: String::new(),
        description: description.to_string(),
        image: None,
    })
}

fn render(view: &CatalogViewModel) {
    println!();
    let category = view.category.map(|c| c.as_str()).unwrap_or("All");
    let sort = view.sort.map(|s| s.as_str()).unwrap_or("default");
    let total = view
        .total
        .map(|t| t.to_string())
        .unwrap_or_else(|| "?".to_string());
    println!("[{category} | {sort}] {total} plants{}", mode_suffix(view));

    if let Some(notice) = &view.notice {
        println!("  {notice}");
    }
    if let Some(error) = &view.error {
        println!("  error: {error}");
    }

    for row in &view.rows {
        let marker = if view.delete_mode {
            if row.selected {
                "[x] "
            } else {
                "[ ] "
            }
        } else {
            ""
        };
        let status = row.status.map(|s| format!(" ({s})")).unwrap_or_default();
        println!(
            "  {marker}{}  {}  {}  {}{status}",
            row.id,
            row.name,
            row.price,
            row.category.unwrap_or("N/A"),
        );
    }

    if view.loading {
        println!("  loading...");
    } else if view.loading_more {
        println!("  loading more...");
    } else if view.has_more {
        println!("  (more available — `more` to load)");
    }

    if view.delete_mode && view.stale_selected_count > 0 {
        println!(
            "  note: {} selected item(s) not currently displayed due to \
             filtering; they will still be deleted",
            view.stale_selected_count
        );
    }
}

fn mode_suffix(view: &CatalogViewModel) -> String {
    if view.delete_mode {
        format!("  [delete mode, {} selected]", view.selected_count)
    } else {
        String::new()
    }
}

pub(crate) fn render_detail(record: &PlantRecord) -> String {
    let mut out = format!(
        "{}\n  {} — {}\n  category: {}",
        record.id,
        record.name,
        record.cost,
        if record.category.is_empty() {
            "N/A"
        } else {
            &record.category
        },
    );
    if !record.status.is_empty() {
        out.push_str(&format!("\n  status: {}", record.status));
    }
    if !record.description.is_empty() {
        out.push_str(&format!("\n  {}", record.description));
    }
    if !record.image.is_empty() {
        out.push_str(&format!("\n  image: {}", record.image));
    }
    out
}

fn print_help() {
    println!(
        "commands:\n  \
         more                 load the next page\n  \
         filter <name|n|all>  category filter (n = 1..{})\n  \
         sort <asc|desc|none> price ordering\n  \
         reload               refetch from page 1\n  \
         show <id>            item detail\n  \
         add n;cost;cat[;d]   create an item\n  \
         edit <id> n;cost;cat[;d]\n  \
         rm <id>              delete one item\n  \
         del                  toggle delete mode\n  \
         sel <id>             toggle selection (delete mode)\n  \
         confirm              delete selected items\n  \
         quit",
        Category::ALL.len()
    );
}
