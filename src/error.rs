use miette::Diagnostic;
use thiserror::Error;

pub type RevealResult<T> = Result<T, RevealError>;

#[derive(Clone, Debug, Error, Diagnostic, PartialEq)]
pub enum RevealError {
    #[error("invalid multiplier: {0}")]
    #[diagnostic(
        code("reveal.invalid_multiplier"),
        help("Multipliers must be finite and non-negative")
    )]
    InvalidMultiplier(f64),
    #[error("invalid bet amount: {0}")]
    #[diagnostic(
        code("reveal.invalid_bet"),
        help("Bet amounts must be finite and non-negative")
    )]
    InvalidBet(f64),
    #[error("invalid configuration: {0}")]
    #[diagnostic(code("reveal.invalid_config"))]
    InvalidConfig(String),
    #[error("headless run stopped after {frames} frames with work outstanding")]
    #[diagnostic(
        code("reveal.incomplete_run"),
        help("Use a larger frame step or schedule fewer reveals")
    )]
    IncompleteRun { frames: u32 },
}

/// Delivery failure reported by a haptic collaborator.
///
/// The stage never surfaces these to its caller.
#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum HapticError {
    #[error("haptic device unavailable: {0}")]
    #[diagnostic(code("reveal.haptics.unavailable"))]
    Unavailable(String),
    #[error("haptic pulse rejected")]
    #[diagnostic(code("reveal.haptics.rejected"))]
    Rejected,
}
