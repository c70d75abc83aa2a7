mod cli;
mod error;

use clap::Parser;
use cli::Cli;
use error::Error;
use glmin_parser::{
    leaf::{classify, LeafKind},
    simplify::{Simplifier, SimplifyOptions},
    stmt::ReturnStmt,
    tree::TokenTree,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, process};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Minifies a single line: a `return` statement or a bare expression.
fn minify_line(line: &str, options: SimplifyOptions, show_tree: bool) -> Result<String, Error> {
    let leaves = classify(line)?;
    let is_return = leaves.first()
        .is_some_and(|leaf| leaf.kind == LeafKind::Keyword && leaf.lexeme == "return");

    let (tree, minified) = if is_return {
        let mut stmt = ReturnStmt::from_leaves(leaves)?;
        let report = stmt.simplify(options)?;
        debug!(steps = report.steps, converged = report.converged, "simplified statement");
        let minified = stmt.minify()?;
        (stmt.tree, minified)
    } else {
        let mut tree = TokenTree::build(leaves)?;
        let report = Simplifier::new(options).run(&mut tree)?;
        debug!(steps = report.steps, converged = report.converged, "simplified expression");
        let minified = match tree.root() {
            Some(root) => tree.minify(root)?,
            None => String::new(),
        };
        (tree, minified)
    };

    if let Some(root) = tree.root().filter(|_| show_tree) {
        eprint!("{}", tree.dump(root));
    }
    Ok(minified)
}

/// Minifies every non-empty line of the input, printing the results. Returns false if any line
/// failed.
fn minify_all(input: &str, cli: &Cli) -> bool {
    let options = cli.simplify_options();
    let mut ok = true;

    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match minify_line(line, options, cli.tree) {
            Ok(minified) => println!("{}", minified),
            Err(err) => {
                err.report_to_stderr(line);
                ok = false;
            },
        }
    }

    ok
}

fn read_input(cli: &Cli) -> Result<Option<String>, Error> {
    if let Some(path) = &cli.file {
        info!(path = %path.display(), "reading file");
        return Ok(Some(fs::read_to_string(path)?));
    }

    if !io::stdin().is_terminal() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        return Ok(Some(input));
    }

    Ok(None)
}

fn repl(cli: &Cli) -> Result<(), Error> {
    let mut rl = DefaultEditor::new()?;
    let options = cli.simplify_options();

    loop {
        let input = match rl.readline("> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        rl.add_history_entry(input)?;
        match minify_line(input, options, cli.tree) {
            Ok(minified) => println!("{}", minified),
            Err(err) => err.report_to_stderr(input),
        }
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match read_input(&cli) {
        Ok(Some(input)) => {
            if !minify_all(&input, &cli) {
                process::exit(1);
            }
            Ok(())
        },
        Ok(None) => repl(&cli),
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        err.report_to_stderr("");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minify(line: &str) -> String {
        minify_line(line, SimplifyOptions::default(), false).unwrap()
    }

    #[test]
    fn expression_lines() {
        assert_eq!(minify("vec3(0.50, (1.0 + 1.0), x)"), "vec3(.5,2.,x)");
        assert_eq!(minify("a - -1"), "a- -1");
    }

    #[test]
    fn return_lines() {
        assert_eq!(minify("return (a);"), "return a;");
        assert_eq!(minify("return (a + b) * 2;"), "return(a+b)*2;");
        assert_eq!(minify("returned + 0"), "returned+0");
    }

    #[test]
    fn failed_line() {
        assert!(matches!(
            minify_line("a + (b", SimplifyOptions::default(), false),
            Err(Error::Minify(_)),
        ));
    }
}
