use clap::{Args, Parser, Subcommand};
use mdblock_engine::ListIntent;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdblock")]
#[command(about = "Inspect and move structural blocks in markdown documents")]
#[command(version)]
pub struct Cli {
    /// Columns a tab counts for (overrides the config file)
    #[arg(long, global = true)]
    pub tab_size: Option<usize>,

    /// Config file to read instead of ~/.config/mdblock/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every block with its line range
    Blocks {
        file: PathBuf,

        /// Print blocks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a block may be dropped before a line
    Validate {
        file: PathBuf,

        #[command(flatten)]
        drop: DropArgs,
    },

    /// Move a block and print (or write) the result
    Move {
        file: PathBuf,

        #[command(flatten)]
        drop: DropArgs,

        /// Write the result back to the file instead of printing it
        #[arg(long)]
        write: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DropArgs {
    /// Line (1-indexed) of the block to move
    #[arg(long)]
    pub source: usize,

    /// Insert before this line; one past the last line appends. Lines inside
    /// code, math or table blocks move to the nearer edge
    #[arg(long)]
    pub target: usize,

    /// Measure list indentation against this line
    #[arg(long)]
    pub context_line: Option<usize>,

    /// Nest (positive) or unnest (negative) by whole indent units
    #[arg(long, allow_hyphen_values = true)]
    pub indent_step: Option<isize>,

    /// Land list items at exactly this indent width
    #[arg(long)]
    pub target_indent: Option<usize>,
}

impl DropArgs {
    pub fn intent(&self) -> ListIntent {
        ListIntent {
            context_line: self.context_line,
            indent_step: self.indent_step,
            target_indent_width: self.target_indent,
        }
    }
}
