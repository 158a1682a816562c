//! Loop-puzzle engine: planar tiling geometry, a deductive rule-based
//! solver, and (behind the `gen` feature) a brute-force solver, a random
//! loop builder, and a puzzle generator built on top of them.
//!
//! ## Basic functionality
//!
//! A board is built once from a stream of polygons via [`geometry::GeometryBuilder`],
//! producing an immutable [`geometry::Geometry`] that can be shared read-only
//! across solver and generator calls. Nine tiling families are provided
//! under [`tiles`].
//!
//! ```
//! use loop_forge::tiles::{build_geometry, TileKind};
//!
//! let geo = build_geometry(TileKind::Square, 4).unwrap();
//! assert_eq!(geo.num_tiles(), 16);
//! ```
//!
//! Hints are a per-tile `Option<u8>` vector; [`solve::solve`] runs the
//! deductive rule engine to a fixed point and reports a difficulty score.
//!
//! ### Progress observation
//!
//! Solver and generator driver loops report their progress through a
//! [`subscriber::Subscriber`] the caller supplies, rather than a logging
//! crate dependency; [`subscriber::NullSubscriber`] is the usual default.
//!
//! ### Generation
//!
//! With the `gen` feature (on by default), [`loopgen::build_loop`] draws a
//! random closed loop over a board and [`generate::generate`] hides as many
//! of its hints as possible while a re-solve still reproduces it within a
//! difficulty budget.

pub mod error;
pub mod geometry;
pub mod solve;
pub mod subscriber;
pub mod tiles;

#[cfg(feature = "gen")]
pub mod brute;
#[cfg(feature = "gen")]
pub mod generate;
#[cfg(feature = "gen")]
pub mod loopgen;
