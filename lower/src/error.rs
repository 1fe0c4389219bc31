use ferrotile_lang::Rational;
use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that abort lowering. No partial IR is returned after any of them.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// A referenced value is absent from the bindings.
    #[snafu(display("unknown name '{name}'"))]
    UnknownName { name: String },

    /// An access polynomial mentions an index the bounds solver did not bound.
    #[snafu(display("index '{index}' has no solved bound"))]
    UnknownIndex { index: String },

    #[snafu(display("contractions need 2, 3 or 4 tensor specs, found {specs}"))]
    UnsupportedArity { specs: usize },

    /// A polynomial coefficient is fractional where an integer affine is required.
    #[snafu(display("non-integer coefficient {coeff} on {term} in access polynomial"))]
    NonIntegerTerm { term: String, coeff: Rational },

    #[snafu(display("unable to compute bounds for contraction: {contraction}"))]
    UnsatisfiableBounds { contraction: String, source: ferrotile_lang::Error },

    /// An op that needs at least one input has none.
    #[snafu(display("'{op}' has no input"))]
    MissingInput { op: String },

    #[snafu(display("not implemented: {what}"))]
    Unimplemented { what: String },

    /// Lowering one op failed; `op` is its source form.
    #[snafu(display("failed to lower '{op}': {source}"))]
    Op {
        op: String,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },

    /// Parsing or binding the source program failed.
    #[snafu(display("front end failed"))]
    Frontend { source: ferrotile_lang::Error },
}

impl Error {
    /// The error beneath any per-op context.
    pub fn innermost(&self) -> &Error {
        match self {
            Error::Op { source, .. } => source.innermost(),
            other => other,
        }
    }
}
