use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gtd",
    about = concat!("gtd v", env!("CARGO_PKG_VERSION"), " - getting things done in a tree"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this config file instead of ~/.config/gtd/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<String>,

    /// Use this todo file instead of the configured gtdfile
    #[arg(long, global = true, value_name = "FILE")]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a todo (ex: gtd add -p 1 -t life task)
    #[command(visible_alias = "a")]
    Add(AddArgs),
    /// List pending todos
    #[command(visible_alias = "l")]
    List(ListArgs),
    /// List tags, or the todos carrying a tag
    #[command(visible_alias = "t")]
    Tags(TagsArgs),
    /// Toggle a todo between pending and done
    #[command(visible_alias = "d")]
    Done(PathArg),
    /// Remove done todos
    #[command(visible_alias = "c")]
    Clean(CleanArgs),
    /// Permanently delete a todo and its subtodos
    #[command(visible_alias = "rm")]
    Delete(PathArg),
    /// Edit the config file
    #[command(visible_alias = "s")]
    Setting,
    /// Edit the memo file attached to a todo (ex: gtd memo 4)
    #[command(visible_alias = "m")]
    Memo(PathArg),
}

#[derive(Args)]
pub struct AddArgs {
    /// Todo title
    pub title: String,
    /// Parent TODO_NUM to nest under (ex: 1.0)
    #[arg(short, long, value_name = "TODO_NUM", default_value = "")]
    pub parent: String,
    /// Tag for the new todo
    #[arg(short, long, default_value = "")]
    pub tag: String,
    /// Attach a memo file picked with the configured filter
    #[arg(short, long)]
    pub memo: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Include done todos
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args)]
pub struct TagsArgs {
    /// Tag whose todos to show
    pub tag: Option<String>,
    /// Show every tag in use
    #[arg(short, long, conflicts_with = "tag")]
    pub all: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Remove only the first done todo
    #[arg(long)]
    pub once: bool,
}

#[derive(Args)]
pub struct PathArg {
    /// Dotted TODO_NUM (ex: 2.0)
    pub todo_num: String,
}
