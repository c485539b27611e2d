use serde::Serialize;
use thiserror::Error;

/// A non-fatal problem found while interpreting route input. The offending item is dropped and
/// interpretation carries on.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    #[error("unknown airport code {code} in {token}")]
    UnresolvedCode { code: String, token: String },
    #[error("invalid input: {token}")]
    MalformedToken { token: String },
    #[error("no unique great circle between antipodal airports {from} and {to}")]
    DegenerateGreatCircle { from: String, to: String },
    #[error("nothing to draw")]
    EmptyResult,
}
