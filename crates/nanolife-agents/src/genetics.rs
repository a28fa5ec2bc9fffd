//! Mutation and genetic-similarity primitives.

use nanolife_types::{GENE_VALUE_BOUND, Genome, IDENTITY_TAIL};
use rand::Rng;
use rust_decimal::Decimal;

/// Cap on consecutive successful mutation draws per [`mutate`] call.
pub const MAX_MUTATION_DRAWS: usize = 100;

/// Number of tail positions sampled per [`compatible`] call.
const COMPATIBILITY_SAMPLES: usize = 5;

/// Copy `genome` and mutate it.
///
/// Each draw succeeds with probability `rate / 1000`; a success replaces
/// one uniformly random cell with a uniform value in `[0, 20)`. Drawing
/// stops at the first failure or after [`MAX_MUTATION_DRAWS`] successes,
/// so the mutation count is geometrically distributed and truncated, not
/// binomial. Draw order per iteration is success roll, position, value.
pub fn mutate<R: Rng>(genome: &Genome, rate: u32, rng: &mut R) -> Genome {
    let mut cells = genome.cells().to_vec();
    if cells.is_empty() {
        return Genome::from_cells(cells);
    }
    for _ in 0..MAX_MUTATION_DRAWS {
        if rng.random_range(0_u32..1000) >= rate {
            break;
        }
        let position = rng.random_range(0..cells.len());
        if let Some(cell) = cells.get_mut(position) {
            *cell = rng.random_range(0..GENE_VALUE_BOUND);
        }
    }
    Genome::from_cells(cells)
}

/// Stochastic genetic-match test gating mating and energy sharing.
///
/// Samples [`COMPATIBILITY_SAMPLES`] positions, with repetition, from the
/// last [`IDENTITY_TAIL`] cells — freshly per call, so repeated calls on
/// the same pair may disagree. All sampled positions must hold equal
/// values in both genomes. An absent argument is never compatible.
pub fn compatible<R: Rng>(a: Option<&Genome>, b: Option<&Genome>, rng: &mut R) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    (0..COMPATIBILITY_SAMPLES).all(|_| {
        let back = rng.random_range(1..=IDENTITY_TAIL);
        match (a.tail_cell(back), b.tail_cell(back)) {
            (Some(cell_a), Some(cell_b)) => cell_a == cell_b,
            _ => false,
        }
    })
}

/// Deterministic similarity: the exact-match fraction over all positions,
/// in `[0, 1]`. Genomes of different lengths score 0.
pub fn compatibility(reference: &Genome, other: &Genome) -> Decimal {
    if reference.len() != other.len() || reference.is_empty() {
        return Decimal::ZERO;
    }
    let matches = reference
        .cells()
        .iter()
        .zip(other.cells())
        .filter(|(a, b)| a == b)
        .count();
    Decimal::from(matches)
        .checked_div(Decimal::from(reference.len()))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn mutate_at_rate_zero_changes_nothing() {
        let mut rng = SmallRng::seed_from_u64(3);
        let genome = Genome::random(50, &mut rng);
        let copy = mutate(&genome, 0, &mut rng);
        assert_eq!(copy, genome);
    }

    #[test]
    fn mutate_at_certainty_caps_at_one_hundred_draws() {
        // rate 1000 means every draw succeeds; replay the documented draw
        // sequence against a twin RNG to confirm exactly 100 draws occur.
        let genome = Genome::from_cells(vec![0; 50]);
        let mut rng = SmallRng::seed_from_u64(5);
        let mutated = mutate(&genome, 1000, &mut rng);

        let mut twin = SmallRng::seed_from_u64(5);
        let mut cells = vec![0_i16; 50];
        for _ in 0..MAX_MUTATION_DRAWS {
            assert!(twin.random_range(0_u32..1000) < 1000);
            let position = twin.random_range(0..cells.len());
            *cells.get_mut(position).unwrap() = twin.random_range(0..GENE_VALUE_BOUND);
        }
        assert_eq!(mutated.cells(), cells.as_slice());
    }

    #[test]
    fn mutate_stops_at_first_failed_draw() {
        // Replay the same seed through the documented sequence to find
        // where the first failure lands, then check the real call made
        // exactly that many replacements.
        let genome = Genome::from_cells(vec![-1; 50]);
        let rate = 600_u32;
        let seed = 11_u64;

        let mut twin = SmallRng::seed_from_u64(seed);
        let mut expected = vec![-1_i16; 50];
        for _ in 0..MAX_MUTATION_DRAWS {
            if twin.random_range(0_u32..1000) >= rate {
                break;
            }
            let position = twin.random_range(0..expected.len());
            *expected.get_mut(position).unwrap() = twin.random_range(0..GENE_VALUE_BOUND);
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let mutated = mutate(&genome, rate, &mut rng);
        assert_eq!(mutated.cells(), expected.as_slice());
    }

    #[test]
    fn compatible_is_false_for_absent_arguments() {
        let mut rng = SmallRng::seed_from_u64(1);
        let genome = Genome::from_cells(vec![1; 10]);
        assert!(!compatible(None, Some(&genome), &mut rng));
        assert!(!compatible(Some(&genome), None, &mut rng));
        assert!(!compatible(None, None, &mut rng));
    }

    #[test]
    fn identical_genomes_are_always_compatible() {
        let mut rng = SmallRng::seed_from_u64(2);
        let genome = Genome::random(50, &mut rng);
        for _ in 0..64 {
            assert!(compatible(Some(&genome), Some(&genome), &mut rng));
        }
    }

    #[test]
    fn fully_distinct_tails_are_never_compatible() {
        let mut rng = SmallRng::seed_from_u64(4);
        let a = Genome::from_cells(vec![1; 50]);
        let b = Genome::from_cells(vec![2; 50]);
        for _ in 0..64 {
            assert!(!compatible(Some(&a), Some(&b), &mut rng));
        }
    }

    #[test]
    fn compatibility_extremes() {
        let a = Genome::from_cells(vec![3; 50]);
        let b = Genome::from_cells(vec![4; 50]);
        assert_eq!(compatibility(&a, &a), Decimal::ONE);
        assert_eq!(compatibility(&a, &b), Decimal::ZERO);
    }

    #[test]
    fn compatibility_counts_exact_matches() {
        let a = Genome::from_cells(vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
        let b = Genome::from_cells(vec![1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);
        assert_eq!(
            compatibility(&a, &b),
            Decimal::from(5)
                .checked_div(Decimal::from(10))
                .unwrap()
        );
    }
}
