//! Simple CLI demo for the tasklist store.
//!
//! Wires the reactive store to the JSON file backend, runs through the
//! four use cases, and shows the derived views reacting to a category
//! filter. State persists to `tasks.json` in the working directory, so a
//! second run picks up where the first left off.

use std::sync::Arc;
use tasklist_core::environment::SystemClock;
use tasklist_core::flags::{FeatureFlag, FeatureFlags, StaticFlags};
use tasklist_runtime::TodoStore;
use tasklist_storage::JsonFileTaskRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Tasklist Demo ===\n");

    let repository = Arc::new(JsonFileTaskRepository::new("tasks.json"));
    let store = TodoStore::new(repository, Arc::new(SystemClock));
    let flags = StaticFlags;

    store.load().await?;
    println!("Loaded {} persisted task(s)", store.state().tasks.len());

    println!("\nAdding tasks...");
    store.add("Buy milk", "home").await?;
    store.add("Write documentation", "work").await?;
    store.add("Review pull requests", "work").await?;

    print_tasks("All tasks", &store.visible_tasks().borrow());

    if flags.is_enabled(FeatureFlag::Categories) {
        println!("\nFiltering by category 'work'...");
        store.set_category(Some("work".to_string()));
        print_tasks("Visible tasks", &store.visible_tasks().borrow());

        let categories = store.categories().borrow().clone();
        println!("Known categories: {}", categories.join(", "));

        store.set_category(None);
    }

    if flags.is_enabled(FeatureFlag::Complete) {
        if let Some(first) = store.state().tasks.first().map(|t| t.id.clone()) {
            println!("\nCompleting the newest task...");
            store.toggle_done(&first).await?;
        }
    }

    if flags.is_enabled(FeatureFlag::Delete) {
        if let Some(last) = store.state().tasks.last().map(|t| t.id.clone()) {
            println!("Deleting the oldest task...");
            store.remove(&last).await?;
        }
    }

    print_tasks("\nFinal state", &store.visible_tasks().borrow());
    println!("\nState persisted to tasks.json");

    Ok(())
}

fn print_tasks(heading: &str, tasks: &[tasklist_core::Task]) {
    println!("{heading}:");
    for task in tasks {
        let mark = if task.status.is_done() { "✓" } else { " " };
        println!("  [{}] {} ({})", mark, task.title, task.category);
    }
}
