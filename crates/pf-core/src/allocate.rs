use rand::Rng;

/// Split `total` into one integer quota per weight, summing exactly to `total`.
///
/// Each quota starts at `floor(total * w / sum(w))`; the slack is then handed
/// out one unit at a time to uniformly chosen categories (repeats allowed).
/// An empty or all-zero weight list is treated as uniform.
pub fn allocate<R: Rng + ?Sized>(total: usize, weights: &[f64], rng: &mut R) -> Vec<usize> {
    if total == 0 || weights.is_empty() {
        return Vec::new();
    }

    let sum: f64 = weights.iter().sum();
    let normalized: Vec<f64> = if sum > 0.0 && sum.is_finite() {
        weights.iter().map(|w| w / sum).collect()
    } else {
        vec![1.0 / weights.len() as f64; weights.len()]
    };

    let mut quotas: Vec<usize> = normalized
        .iter()
        .map(|w| (total as f64 * w).floor() as usize)
        .collect();

    let mut assigned: usize = quotas.iter().sum();
    while assigned < total {
        let i = rng.random_range(0..quotas.len());
        quotas[i] += 1;
        assigned += 1;
    }
    // float error can only overshoot by a unit or two
    while assigned > total {
        let i = rng.random_range(0..quotas.len());
        if quotas[i] > 0 {
            quotas[i] -= 1;
            assigned -= 1;
        }
    }
    quotas
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn equal_weights_sum_to_total() {
        let mut rng = StdRng::seed_from_u64(1);
        let q = allocate(100, &[1.0, 1.0, 1.0], &mut rng);
        assert_eq!(q.len(), 3);
        assert_eq!(q.iter().sum::<usize>(), 100);
        assert!(q.iter().all(|&n| n == 33 || n == 34));
    }

    #[test]
    fn sums_hold_across_totals_and_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        let weight_sets: [&[f64]; 4] = [
            &[1.0],
            &[3.0, 2.0, 1.5],
            &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7],
            &[1e-9, 1.0],
        ];
        for weights in weight_sets {
            for total in [1, 2, 9, 100, 1001, 15_000] {
                let q = allocate(total, weights, &mut rng);
                assert_eq!(q.len(), weights.len());
                assert_eq!(q.iter().sum::<usize>(), total, "{weights:?} / {total}");
            }
        }
    }

    #[test]
    fn weights_shape_the_split() {
        let mut rng = StdRng::seed_from_u64(3);
        let q = allocate(10_000, &[3.0, 1.0], &mut rng);
        assert!(q[0] >= 7_500 && q[0] <= 7_501);
    }

    #[test]
    fn zero_total_or_no_categories_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(allocate(0, &[1.0, 2.0], &mut rng).is_empty());
        assert!(allocate(10, &[], &mut rng).is_empty());
    }

    #[test]
    fn zero_weight_sum_falls_back_to_uniform() {
        let mut rng = StdRng::seed_from_u64(0);
        let q = allocate(10, &[0.0, 0.0], &mut rng);
        assert_eq!(q.iter().sum::<usize>(), 10);
        assert!(q.iter().all(|&n| n == 5));
    }

    #[test]
    fn total_smaller_than_categories() {
        let mut rng = StdRng::seed_from_u64(11);
        let q = allocate(2, &[1.0; 10], &mut rng);
        assert_eq!(q.len(), 10);
        assert_eq!(q.iter().sum::<usize>(), 2);
    }
}
