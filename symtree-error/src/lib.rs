//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that carries an [`ErrorKind`] along with the text it refers
//! to.

// lets `#[derive(ErrorKind)]` refer to this crate by name in its own tests
extern crate self as symtree_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns this error kind as [`Any`], so that callers can find out which kind it is.
    fn as_any(&self) -> &dyn Any;

    /// Returns the message of this error, without any highlighting.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of some text that can be highlighted.
///
/// Expressions are not parsed from source code, so `src` holds whatever text the error is best
/// explained against: the rejected input itself, or the rendering of the offending expression.
#[derive(Debug)]
pub struct Error {
    /// The text that the spans index into.
    pub src: String,

    /// The regions of `src` that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given source text, spans and kind.
    pub fn new(src: impl Into<String>, spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { src: src.into(), spans, kind: Box::new(kind) }
    }

    /// Creates a new error whose single span covers the whole source text.
    pub fn spanning(src: impl Into<String>, kind: impl ErrorKind + 'static) -> Self {
        let src = src.into();
        let spans = vec![0..src.len()];
        Self { src, spans, kind: Box::new(kind) }
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns a reference to the kind of this error if it is `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self) -> std::io::Result<()> {
        self.build_report("input").eprint(("input", Source::from(&self.src)))
    }

    /// Writes the report for this error into a [`String`], without colors.
    pub fn report_to_string(&self) -> String {
        let mut buf = Vec::new();
        let result = self.build_report("input")
            .write(("input", Source::from(&self.src)), &mut buf);
        match result {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{:?}", self.kind),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}
