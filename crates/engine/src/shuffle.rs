use rand::Rng;

/// Returns a uniformly random permutation of `items`, leaving the input untouched.
///
/// This is the classic Fisher-Yates walk: from the last index down to `1`, each position is
/// swapped with a uniformly chosen position at or before it.
pub fn shuffle<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}
