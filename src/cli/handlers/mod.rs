mod memo;
pub use memo::pick_memo;

use std::path::PathBuf;

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, shell, store};
use crate::model::config::Config;
use crate::model::todo::{TodoDocument, TodoNode};
use crate::ops::path::{TodoPath, parse_path};
use crate::ops::tree_ops;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let ctx = Context::load(cli.config.as_deref(), cli.file.as_deref())?;

    match cli.command {
        // Read commands
        Commands::List(args) => cmd_list(&ctx, args, json),
        Commands::Tags(args) => cmd_tags(&ctx, args, json),

        // Write commands
        Commands::Add(args) => cmd_add(&ctx, args),
        Commands::Done(args) => cmd_done(&ctx, args),
        Commands::Clean(args) => cmd_clean(&ctx, args),
        Commands::Delete(args) => cmd_delete(&ctx, args),

        // Editor commands
        Commands::Memo(args) => cmd_memo(&ctx, args),
        Commands::Setting => cmd_setting(&ctx),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolved config and file locations for one invocation
struct Context {
    config_path: PathBuf,
    config: Config,
    store_path: PathBuf,
}

impl Context {
    fn load(
        config_override: Option<&str>,
        file_override: Option<&str>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = match config_override {
            Some(path) => PathBuf::from(path),
            None => config_io::default_config_path()?,
        };
        let config = config_io::load_config(&config_path)
            .map_err(|e| format!("failed to load config file: {}", e))?;

        let store_path = match file_override {
            Some(path) => PathBuf::from(path),
            None if config.gtdfile.is_empty() => {
                return Err(format!("please set gtdfile in {}", config_path.display()).into());
            }
            None => config.store_path(),
        };

        Ok(Context {
            config_path,
            config,
            store_path,
        })
    }

    fn load_store(&self) -> Result<TodoDocument, store::StoreError> {
        store::load_store(&self.store_path)
    }

    fn save_store(&self, doc: &TodoDocument) -> Result<(), store::StoreError> {
        store::save_store(&self.store_path, doc)
    }

    fn editor(&self) -> Result<&str, Box<dyn std::error::Error>> {
        if self.config.editor.is_empty() {
            return Err(format!("please set editor in {}", self.config_path.display()).into());
        }
        Ok(&self.config.editor)
    }
}

/// Parse a TODO_NUM that must name a node (not the top level)
fn parse_todo_num(s: &str) -> Result<TodoPath, Box<dyn std::error::Error>> {
    let path = parse_path(s)?;
    if path.is_root() {
        return Err(tree_ops::TreeError::EmptyPath.into());
    }
    Ok(path)
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = ctx.load_store()?;
    let entries = tree_ops::render(&doc.todos, args.all);

    if json {
        let todos: Vec<TodoJson> = entries.map(|e| entry_to_json(&e)).collect();
        println!("{}", serde_json::to_string_pretty(&todos)?);
    } else {
        for line in format_listing(entries) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_tags(ctx: &Context, args: TagsArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = ctx.load_store()?;

    if args.all {
        let tags = tree_ops::collect_tags(&doc.todos);
        if json {
            let out = TagsJson {
                tags: tags.into_iter().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            for tag in &tags {
                println!("{}", tag);
            }
        }
        return Ok(());
    }

    let tag = match args.tag.as_deref() {
        Some(tag) if !tag.is_empty() => tag,
        _ => return Err("specify a TAG, or --all to list every tag".into()),
    };
    let hits = tree_ops::filter_by_tag(&doc.todos, tag);
    if json {
        let todos: Vec<TodoJson> = hits.map(|e| entry_to_json(&e)).collect();
        println!("{}", serde_json::to_string_pretty(&todos)?);
    } else {
        for entry in hits {
            println!("{}", format_tag_hit(&entry));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.title.is_empty() {
        return Err("todo title cannot be empty".into());
    }
    let parent = parse_path(&args.parent)?;
    let mut doc = ctx.load_store()?;

    // Resolve the parent before prompting for a memo
    if !parent.is_root() {
        tree_ops::search(&doc.todos, &parent).map_err(|e| format!("failed to add todo: {}", e))?;
    }

    let memo_ref = if args.memo {
        pick_memo(&ctx.config, &mut std::io::stdin().lock())?
    } else {
        String::new()
    };

    let node = TodoNode::new(args.title, Local::now().date_naive())
        .with_tag(args.tag)
        .with_memo(memo_ref);
    let path = tree_ops::insert(&mut doc.todos, node, &parent)
        .map_err(|e| format!("failed to add todo: {}", e))?;

    ctx.save_store(&doc)?;
    tracing::info!(%path, "added todo");
    println!("{}", path);
    Ok(())
}

fn cmd_done(ctx: &Context, args: PathArg) -> Result<(), Box<dyn std::error::Error>> {
    let path = parse_todo_num(&args.todo_num)?;
    let mut doc = ctx.load_store()?;

    let done = tree_ops::toggle_done(&mut doc.todos, &path)
        .map_err(|e| format!("failed to toggle todo: {}", e))?;

    ctx.save_store(&doc)?;
    tracing::info!(%path, done, "toggled todo");
    println!("{} → {}", path, if done { "done" } else { "pending" });
    Ok(())
}

fn cmd_clean(ctx: &Context, args: CleanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = ctx.load_store()?;

    let removed: Vec<TodoNode> = if args.once {
        tree_ops::prune_done(&mut doc.todos).into_iter().collect()
    } else {
        tree_ops::prune_all_done(&mut doc.todos)
    };

    if removed.is_empty() {
        println!("nothing to clean");
        return Ok(());
    }

    ctx.save_store(&doc)?;
    tracing::info!(count = removed.len(), "cleaned done todos");
    for node in &removed {
        println!("removed: {}", node.title);
    }
    Ok(())
}

fn cmd_delete(ctx: &Context, args: PathArg) -> Result<(), Box<dyn std::error::Error>> {
    let path = parse_todo_num(&args.todo_num)?;
    let mut doc = ctx.load_store()?;

    let removed = tree_ops::delete_at(&mut doc.todos, &path)
        .map_err(|e| format!("failed to delete todo: {}", e))?;

    ctx.save_store(&doc)?;
    tracing::info!(%path, "deleted todo");
    println!("deleted {}: {}", path, removed.title);
    Ok(())
}

// ---------------------------------------------------------------------------
// Editor handlers
// ---------------------------------------------------------------------------

fn cmd_memo(ctx: &Context, args: PathArg) -> Result<(), Box<dyn std::error::Error>> {
    let path = parse_todo_num(&args.todo_num)?;
    let doc = ctx.load_store()?;

    let node = tree_ops::search(&doc.todos, &path)
        .map_err(|e| format!("failed to access todo: {}", e))?;
    if !node.has_memo() {
        return Err(format!("todo {} has no memo", path).into());
    }

    shell::run_editor(ctx.editor()?, &[node.memo_ref.as_str()])?;
    Ok(())
}

fn cmd_setting(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = ctx.config_path.to_string_lossy();
    shell::run_editor(ctx.editor()?, &[config_path.as_ref()])?;
    Ok(())
}
