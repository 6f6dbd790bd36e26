use rand::seq::SliceRandom;
use rand::Rng;

/// Picks up to `count` items by uniformly shuffling `items` and keeping the head
///
/// Every permutation is equally likely, so each subset of size `count` is too.
/// Fewer than `count` items are returned only when fewer were supplied.
pub fn sample<T, R>(mut items: Vec<T>, count: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);
    items.truncate(count);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_sample_eight_of_ten() {
        let items: Vec<u32> = (0..10).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let picked = sample(items.clone(), 8, &mut rng);

        assert_eq!(picked.len(), 8);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 8);
        assert!(picked.iter().all(|p| items.contains(p)));
    }

    #[test]
    fn test_sample_more_than_available() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = sample(vec!["a", "b", "c"], 8, &mut rng);

        let mut sorted = picked.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sample_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample(Vec::<u8>::new(), 8, &mut rng).is_empty());
    }

    #[test]
    fn test_every_item_can_lead() {
        // every item must be able to land in the first slot
        let mut rng = StdRng::seed_from_u64(42);
        let mut leaders = HashSet::new();

        for _ in 0..500 {
            let picked = sample((0..10).collect::<Vec<u32>>(), 1, &mut rng);
            leaders.insert(picked[0]);
        }

        assert_eq!(leaders.len(), 10);
    }
}
