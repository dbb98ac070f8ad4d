// A schedule exists iff every race can be filled: the total number of seats `n·a` splits into
// whole races and there are enough distinct participants for a single race. The scheduler in
// `schedule.rs` always converges when both conditions hold.

pub fn is_feasible(participant_count: usize, appearance_count: usize, group_size: usize) -> bool {
    group_size > 0
        && appearance_count > 0
        && participant_count >= group_size
        && participant_count
            .checked_mul(appearance_count)
            .is_some_and(|seats| seats % group_size == 0)
}

// Ascending list of appearance counts in `1..=max_to_consider` that admit a full schedule.
// Empty if there are none, which is not an error: the caller simply has nothing to offer.
pub fn valid_appearance_counts(
    participant_count: usize, group_size: usize, max_to_consider: usize,
) -> Vec<usize> {
    (1..=max_to_consider)
        .filter(|&a| is_feasible(participant_count, a, group_size))
        .collect()
}
