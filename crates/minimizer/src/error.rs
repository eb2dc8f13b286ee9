use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinimizerError {
    #[error("Minimizer error: body contains a comparison atom '{0}'; only relational bodies can be minimized")]
    UnsupportedComparison(String),
    #[error("Minimizer error: head variable '{0}' has no binding site in the body")]
    UnboundVariable(String),
}
