//! Puzzle generator: builds one random loop, then iteratively hides hints
//! while a deductive re-solve keeps reproducing that exact loop within a
//! difficulty budget. Grounded on `build-game.c`'s `build_new_game`.

use rand::Rng;

use crate::error::{BuilderError, GeneratorError};
use crate::geometry::{Geometry, TileId};
use crate::loopgen::build_loop;
use crate::solve::{solve, Hints, LineState};
use crate::subscriber::{NullSubscriber, Subscriber};

/// A generated puzzle: the hints shown to the player, the unique solution
/// loop, and the difficulty score of the hardest re-solve step that produced
/// it (mirrors the source's `max_diff`).
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub hints: Hints,
    pub solution: Vec<LineState>,
    pub difficulty: f64,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum HintMask {
    Hidden,
    Visible,
    Fixed,
}

/// Generate a puzzle on `geo` whose re-solve score never exceeds
/// `target_difficulty`. Mirrors `build_new_game`, except the difficulty cap
/// is a caller-supplied parameter rather than the source's hardcoded `2.5`,
/// and the source's debug difficulty stub is replaced by the real computed
/// score (including the deductive solver's +10 incomplete-solve penalty).
///
/// `should_continue` is polled once per hide-loop iteration; once it returns
/// `false`, generation stops and reports [`GeneratorError::Cancelled`].
pub fn generate<R: Rng + ?Sized>(
    geo: &Geometry,
    target_difficulty: f64,
    rng: &mut R,
    sub: &mut dyn Subscriber,
    should_continue: &mut dyn FnMut() -> bool,
) -> Result<GeneratedPuzzle, GeneratorError> {
    let loop_states = build_loop(geo, rng);

    let numbers: Vec<u8> = (0..geo.num_tiles())
        .map(|i| {
            geo.tile(TileId(i))
                .edges
                .iter()
                .filter(|&&e| loop_states[e.index()] == LineState::On)
                .count() as u8
        })
        .collect();

    let mut hints: Hints = numbers.iter().map(|&n| Some(n)).collect();
    let mut mask = vec![HintMask::Visible; geo.num_tiles()];
    let mut nvisible = geo.num_tiles();
    let mut nfixed = 0usize;
    let mut max_diff = 0.0;
    let mut any_hidden = false;

    while nvisible > nfixed {
        if !should_continue() {
            return Err(GeneratorError::Cancelled);
        }

        let mut count = rng.gen_range(0..(nvisible - nfixed));
        let mut sq_id = 0;
        for (i, &m) in mask.iter().enumerate() {
            if m == HintMask::Visible {
                if count == 0 {
                    sq_id = i;
                    break;
                }
                count -= 1;
            }
        }

        let saved = hints[sq_id];
        hints[sq_id] = None;

        let result = solve(geo, &hints, sub);

        // Only ON-ness needs to match: the solver may leave an off-loop edge
        // CROSSED where the loop builder left it OFF, same as the source's
        // own `sol->states[i] == LINE_ON` comparison against `loop[i]`.
        let matches_loop = result
            .states
            .iter()
            .zip(loop_states.iter())
            .all(|(a, b)| (*a == LineState::On) == (*b == LineState::On));
        let accepted = matches_loop && result.score <= target_difficulty;

        if !accepted {
            hints[sq_id] = saved;
            mask[sq_id] = HintMask::Fixed;
            nfixed += 1;
            sub.generator_step(nvisible, nfixed, result.score, false);
            if nfixed == nvisible {
                break;
            }
        } else {
            mask[sq_id] = HintMask::Hidden;
            nvisible -= 1;
            nfixed = 0;
            for m in mask.iter_mut() {
                if *m == HintMask::Fixed {
                    *m = HintMask::Visible;
                }
            }
            max_diff = result.score;
            any_hidden = true;
            sub.generator_step(nvisible, nfixed, result.score, true);
        }
    }

    if !any_hidden {
        return Err(GeneratorError::NoHintsHideable);
    }

    Ok(GeneratedPuzzle { hints, solution: loop_states, difficulty: max_diff })
}

/// Fluent wrapper around [`generate`]. Configure with the `with_*` setters
/// and finish with [`build`](Self::build). `subscriber` defaults to
/// [`NullSubscriber`] and `should_continue` defaults to always-continue, so
/// only `geo`, `target_difficulty` and `rng` are required. Mirrors
/// `GridWalker2DBuilder`'s shape.
pub struct PuzzleGenerator<'a, R: Rng + ?Sized> {
    geo: Option<&'a Geometry>,
    target_difficulty: Option<f64>,
    rng: Option<&'a mut R>,
    sub: Option<&'a mut dyn Subscriber>,
    should_continue: Option<&'a mut dyn FnMut() -> bool>,
}

impl<'a, R: Rng + ?Sized> Default for PuzzleGenerator<'a, R> {
    fn default() -> Self {
        Self { geo: None, target_difficulty: None, rng: None, sub: None, should_continue: None }
    }
}

impl<'a, R: Rng + ?Sized> PuzzleGenerator<'a, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geo(mut self, geo: &'a Geometry) -> Self {
        self.geo = Some(geo);
        self
    }

    pub fn with_target_difficulty(mut self, target_difficulty: f64) -> Self {
        self.target_difficulty = Some(target_difficulty);
        self
    }

    pub fn with_rng(mut self, rng: &'a mut R) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn with_subscriber(mut self, sub: &'a mut dyn Subscriber) -> Self {
        self.sub = Some(sub);
        self
    }

    pub fn with_should_continue(mut self, should_continue: &'a mut dyn FnMut() -> bool) -> Self {
        self.should_continue = Some(should_continue);
        self
    }

    pub fn build(self) -> Result<GeneratedPuzzle, GeneratorError> {
        let mut error = BuilderError::new();
        if self.geo.is_none() {
            error.add_missing_field("geo");
        }
        if self.target_difficulty.is_none() {
            error.add_missing_field("target_difficulty");
        }
        if self.rng.is_none() {
            error.add_missing_field("rng");
        }
        error.try_throw().map_err(GeneratorError::MissingField)?;

        let mut null_sub = NullSubscriber;
        let sub = self.sub.unwrap_or(&mut null_sub);
        let mut always_continue = || true;
        let should_continue = self.should_continue.unwrap_or(&mut always_continue);

        generate(self.geo.unwrap(), self.target_difficulty.unwrap(), self.rng.unwrap(), sub, should_continue)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{GeometryBuilder, Point};
    use crate::subscriber::NullSubscriber;
    use rand::SeedableRng;

    fn grid(n: usize) -> Geometry {
        let mut b = GeometryBuilder::new().with_eps(0.1).with_board_size(n as f64).with_board_margin(0.0);
        for y in 0..n {
            for x in 0..n {
                let (x, y) = (x as f64, y as f64);
                b.add_tile(&[Point::new(x, y), Point::new(x + 1.0, y), Point::new(x + 1.0, y + 1.0), Point::new(x, y + 1.0)], None)
                    .unwrap();
            }
        }
        b.build().unwrap()
    }

    // A random loop's own full-hint board is not guaranteed to resolve back
    // to that exact loop (the source has this same exposure: see the first
    // pass through `build_new_game`'s hide-loop, which just marks a square
    // "fixed" and tries another when the resolve disagrees). Sweep a few
    // seeds, as `build_new_game` effectively does by trying other squares,
    // and require that at least one produces a puzzle whose re-solve matches.
    #[test]
    fn generated_puzzle_resolves_to_its_own_solution() {
        let geo = grid(5);
        let mut last_err = None;
        for seed in 0..20u64 {
            let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
            match generate(&geo, 10.0, &mut rng, &mut NullSubscriber, &mut || true) {
                Ok(puzzle) => {
                    let result = solve(&geo, &puzzle.hints, &mut NullSubscriber);
                    assert!(result.complete);
                    assert!(result
                        .states
                        .iter()
                        .zip(puzzle.solution.iter())
                        .all(|(a, b)| (*a == LineState::On) == (*b == LineState::On)));
                    assert!(puzzle.hints.iter().any(|h| h.is_none()), "generator hid no hints");
                    return;
                }
                Err(e) => last_err = Some(e),
            }
        }
        panic!("no seed in range produced a puzzle: {last_err:?}");
    }

    #[test]
    fn should_continue_returning_false_cancels_generation() {
        let geo = grid(5);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
        let result = generate(&geo, 10.0, &mut rng, &mut NullSubscriber, &mut || false);
        assert!(matches!(result, Err(GeneratorError::Cancelled)));
    }

    #[test]
    fn puzzle_generator_without_rng_reports_missing_field() {
        let geo = grid(5);
        let err = PuzzleGenerator::<rand_chacha::ChaCha8Rng>::new().with_geo(&geo).with_target_difficulty(10.0).build().unwrap_err();
        assert!(matches!(err, GeneratorError::MissingField(_)));
    }

    #[test]
    fn puzzle_generator_matches_generate() {
        let geo = grid(5);
        for seed in 0..20u64 {
            let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
            if let Ok(puzzle) = PuzzleGenerator::new().with_geo(&geo).with_target_difficulty(10.0).with_rng(&mut rng).build() {
                assert!(puzzle.hints.iter().any(|h| h.is_none()));
                return;
            }
        }
        panic!("no seed in range produced a puzzle");
    }
}
