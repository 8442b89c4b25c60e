//! Gap-limited forward filling.

/// Forward-fill missing runs of at most `max_gap` entries, in place.
///
/// A run of consecutive `None`s following an observation is filled entirely
/// from that observation when the run is no longer than `max_gap`; a longer
/// run is left entirely missing, never partially bridged. Trailing runs
/// follow the same rule. Leading missingness has no prior observation and
/// always stays missing.
pub fn fill_limited_gaps(values: &mut [Option<f64>], max_gap: usize) {
    if max_gap == 0 {
        return;
    }

    let n = values.len();
    let mut i = 0;
    while i < n {
        if values[i].is_none() {
            i += 1;
            continue;
        }

        // Measure the missing run after this observation.
        let run_start = i + 1;
        let mut run_end = run_start;
        while run_end < n && values[run_end].is_none() {
            run_end += 1;
        }

        let run_len = run_end - run_start;
        if run_len > 0 && run_len <= max_gap {
            let carry = values[i];
            for slot in &mut values[run_start..run_end] {
                *slot = carry;
            }
        }

        i = run_end.max(i + 1);
    }
}
