//! Progress observation for the solver and generator driver loops, following
//! the teacher's `DebugSubscriber` idiom (`grid_forge/src/gen/collapse/mod.rs`):
//! a trait object the caller supplies, rather than a hard dependency on a
//! logging crate. The default no-op costs nothing; [`DebugSubscriber`] is
//! provided for quick `println!`-based visibility while developing.

/// Callbacks fired at the boundaries the driver loops already check anyway.
/// All methods have empty default bodies so implementors only override what
/// they care about.
pub trait Subscriber {
    /// A deductive rule at `level` changed `changes` edges.
    fn rule_fired(&mut self, _level: usize, _changes: usize) {}

    /// The generator tried hiding a hint: `visible`/`fixed` cell counts after
    /// the attempt, the resulting difficulty `score`, and whether the hide
    /// was kept (`accepted`) or reverted.
    fn generator_step(&mut self, _visible: usize, _fixed: usize, _score: f64, _accepted: bool) {}

    /// The brute-force solver finished, having found `solutions` distinct
    /// closed loops consistent with the board.
    fn brute_force_done(&mut self, _solutions: u32) {}
}

/// Discards every event. The default when a caller doesn't pass a subscriber.
pub struct NullSubscriber;

impl Subscriber for NullSubscriber {}

/// Prints every event to stdout, mirroring the source's own `printf` trace
/// output in `solve_game`/`build_new_game`.
pub struct DebugSubscriber;

impl Subscriber for DebugSubscriber {
    fn rule_fired(&mut self, level: usize, changes: usize) {
        println!("level {level}: count {changes}");
    }

    fn generator_step(&mut self, visible: usize, fixed: usize, score: f64, accepted: bool) {
        let verdict = if accepted { "accepted" } else { "reverted" };
        println!("new game ({visible} - {fixed}): score {score:.2} ({verdict})");
    }

    fn brute_force_done(&mut self, solutions: u32) {
        println!("brute force: {solutions} solutions");
    }
}
