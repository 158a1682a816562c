//! Error types for each subsystem, following the manual `Display` + `Error`
//! style used throughout the teacher crate (`CollapseError`,
//! `TileBuilderError`) rather than pulling in a derive-macro error crate.

use std::error::Error;
use std::fmt::{self, Display};

/// Failure assembling a [`Geometry`](crate::geometry::Geometry) from a
/// polygon stream.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    Invalid(String),
    /// A required field was never set on the [`GeometryBuilder`](crate::geometry::GeometryBuilder).
    MissingField(BuilderError),
}

impl Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Invalid(reason) => write!(f, "invalid geometry: {reason}"),
            GeometryError::MissingField(e) => write!(f, "{e}"),
        }
    }
}

impl Error for GeometryError {}

/// Failure or incompleteness of the deductive solver.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The deductive rule set reached a fixed point without finishing.
    /// The caller may fall back to [`crate::brute::solve_brute_force`].
    UnsolvableInBudget,
}

impl Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::UnsolvableInBudget => {
                write!(f, "deductive solver exhausted its rules without a complete solution")
            }
        }
    }
}

impl Error for SolveError {}

/// Failure of the brute-force DFS solver.
#[derive(Debug, Clone, PartialEq)]
pub enum BruteForceError {
    /// Brute force needs at least one ON edge to pick a starting point.
    NoInitialOn,
    /// The edges reachable from the chosen start already form a closed loop.
    LoopAttemptedOnClosed,
    /// A vertex has more continuations than the route bitmask can track.
    UnboundedContinuation { edge: usize, routes: usize },
    /// The backtracking stack grew past the number of edges still OFF at the
    /// start of the search — every step is supposed to claim one more
    /// previously-unclaimed edge, so this means the walk is revisiting
    /// already-ON edges without ever backtracking.
    StepStackExhausted { limit: usize },
}

impl Display for BruteForceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BruteForceError::NoInitialOn => write!(f, "brute force needs at least one ON edge to start"),
            BruteForceError::LoopAttemptedOnClosed => {
                write!(f, "brute force start edge is already part of a closed loop")
            }
            BruteForceError::UnboundedContinuation { edge, routes } => write!(
                f,
                "edge {edge} has {routes} continuations, exceeding the 32-bit route bitmask"
            ),
            BruteForceError::StepStackExhausted { limit } => {
                write!(f, "backtracking stack exceeded its {limit}-step bound without closing a loop")
            }
        }
    }
}

impl Error for BruteForceError {}

/// Failure of the puzzle generator.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// Every visible cell became fixed before any hint could be hidden
    /// while honoring the uniqueness and difficulty constraints.
    NoHintsHideable,
    /// The caller's `should_continue` predicate returned `false`.
    Cancelled,
    /// A required field was never set on the
    /// [`PuzzleGenerator`](crate::generate::PuzzleGenerator).
    MissingField(BuilderError),
}

impl Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::NoHintsHideable => {
                write!(f, "no hint could be hidden while keeping the puzzle unique and within difficulty")
            }
            GeneratorError::Cancelled => write!(f, "generation was cancelled"),
            GeneratorError::MissingField(e) => write!(f, "{e}"),
        }
    }
}

impl Error for GeneratorError {}

/// Error returned by a `*Builder::build()` terminal call, collecting every
/// missing required field rather than failing on the first one. Mirrors
/// `grid_forge`'s `BuilderError`/`TileBuilderError` shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuilderError {
    missing: Vec<&'static str>,
}

impl BuilderError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_missing_field(&mut self, field: &'static str) {
        self.missing.push(field);
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    /// Returns `Err(self)` if any field was recorded missing, else `Ok(())`.
    pub fn try_throw(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required builder fields: {}", self.missing.join(", "))
    }
}

impl Error for BuilderError {}
