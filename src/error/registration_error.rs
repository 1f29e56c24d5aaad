/// Errors raised when registering a custom function.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The name is not a valid identifier.
    #[error("'{name}' is not a valid function name.")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
    /// No signature was supplied.
    #[error("Function '{name}' has no signatures.")]
    NoSignatures {
        /// The function name.
        name: String,
    },
    /// The signatures disagree on the number of arguments.
    #[error("Signatures of function '{name}' do not share one arity.")]
    InconsistentArity {
        /// The function name.
        name: String,
    },
    /// Functions take at most three arguments.
    #[error("Function '{name}' takes {arity} arguments; at most 3 are supported.")]
    UnsupportedArity {
        /// The function name.
        name:  String,
        /// The requested arity.
        arity: usize,
    },
}
