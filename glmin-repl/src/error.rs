use rustyline::error::ReadlineError;
use std::io;

/// Utility enum to package errors that can occur while minifying input.
#[derive(Debug)]
pub enum Error {
    /// The input could not be built or simplified.
    Minify(glmin_error::Error),

    /// The input could not be read.
    Io(io::Error),

    /// The interactive prompt failed.
    Readline(ReadlineError),
}

impl Error {
    /// Report the error to stderr, highlighting the given input where possible.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Minify(err) => err.report_to_stderr("input", input),
            Self::Io(err) => eprintln!("error: {}", err),
            Self::Readline(err) => eprintln!("error: {}", err),
        }
    }
}

impl From<glmin_error::Error> for Error {
    fn from(err: glmin_error::Error) -> Self {
        Self::Minify(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Self::Readline(err)
    }
}
