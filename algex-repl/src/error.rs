use algex_expr::CanonError;
use algex_parser::ParseError;

/// Utility enum to package errors that can occur while handling a line.
#[derive(Debug)]
pub enum Error {
    /// Errors that occurred while parsing.
    Parse(ParseError),

    /// Errors that occurred while canonicalizing.
    Canon(CanonError),

    /// The target of a `let` is not a name.
    NotAName(String),
}

impl Error {
    /// Report this error to stderr.
    ///
    /// Parse errors point into the source, so they are printed as an `ariadne` report.
    pub fn report_to_stderr(&self) {
        match self {
            Self::Parse(err) => {
                if let Err(io_err) = err.report_to_stderr() {
                    eprintln!("{}", io_err);
                }
            },
            Self::Canon(err) => eprintln!("error: {}", err),
            Self::NotAName(target) => eprintln!("error: cannot bind to `{}`, which is not a name", target),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<CanonError> for Error {
    fn from(err: CanonError) -> Self {
        Self::Canon(err)
    }
}
