//! Bounded first-fit subset-sum search

/// Candidate lists at or above this length are never enumerated
pub const MAX_CANDIDATES: usize = 20;

/// Find the first subset of `candidates` whose absolute sum equals `|target_cents|`.
///
/// Each candidate is `(position, cents)`; the positions of the chosen
/// candidates are returned. Subsets are tried by increasing size and, within
/// a size, in lexicographic index order, so the result is the first fit rather
/// than the closest one. Lists of [`MAX_CANDIDATES`] or more entries return
/// `None` without enumerating anything.
pub fn find_subset(candidates: &[(usize, i64)], target_cents: i64) -> Option<Vec<usize>> {
    let n = candidates.len();
    if n >= MAX_CANDIDATES {
        return None;
    }

    let target = target_cents.checked_abs()?;
    for size in 1..=n {
        let mut combo: Vec<usize> = (0..size).collect();
        loop {
            // An overflowing sum cannot equal any i64 target
            let sum = combo
                .iter()
                .try_fold(0i64, |acc, &i| acc.checked_add(candidates[i].1));
            if sum.and_then(i64::checked_abs) == Some(target) {
                return Some(combo.iter().map(|&i| candidates[i].0).collect());
            }
            if !next_combination(&mut combo, n) {
                break;
            }
        }
    }
    None
}

/// Advance `combo` to the next k-combination of `0..n` in lexicographic order
fn next_combination(combo: &mut [usize], n: usize) -> bool {
    let k = combo.len();
    for i in (0..k).rev() {
        if combo[i] < n - k + i {
            combo[i] += 1;
            for j in i + 1..k {
                combo[j] = combo[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
