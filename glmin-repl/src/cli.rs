use clap::{ArgAction, Parser};
use glmin_parser::simplify::{SimplifyOptions, SimplifyOptionsBuilder};
use std::path::PathBuf;

/// Minifies GLSL expressions and `return` statements, one per line.
///
/// Reads the given file, or stdin when it is piped. With neither, starts an interactive prompt.
#[derive(Parser, Debug)]
#[command(name = "glmin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File to read expressions from
    pub file: Option<PathBuf>,

    /// Maximum number of rewrites per expression (0 for no limit)
    #[arg(long, default_value_t = 10_000)]
    pub max_steps: usize,

    /// Do not fold constant arithmetic
    #[arg(long)]
    pub no_fold: bool,

    /// Do not remove parens around single values
    #[arg(long)]
    pub keep_parens: bool,

    /// Print the structure of each simplified tree to stderr
    #[arg(long)]
    pub tree: bool,

    /// Increase log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Returns the simplifier options selected on the command line.
    pub fn simplify_options(&self) -> SimplifyOptions {
        SimplifyOptionsBuilder::new()
            .max_steps((self.max_steps > 0).then_some(self.max_steps))
            .fold_constants(!self.no_fold)
            .strip_parens(!self.keep_parens)
            .build()
    }
}
