use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the front end and the contraction analysis collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Source text could not be parsed.
    #[snafu(display("parse error: {reason}"))]
    Parse { reason: String },

    /// A program could not be bound to concrete shapes.
    #[snafu(display("bind error: {reason}"))]
    Bind { reason: String },

    /// The constraint system leaves an index without a finite range.
    #[snafu(display("index '{index}' is unbounded"))]
    UnboundedIndex { index: String },

    /// The constraint system admits no value for an index.
    #[snafu(display("index '{index}' has empty range [{min}, {max}]"))]
    EmptyRange { index: String, min: i64, max: i64 },

    /// The constraint system has no rational solution at all.
    #[snafu(display("constraint system is infeasible while bounding '{index}'"))]
    Infeasible { index: String },
}
