/// Builds the query-string suffix that carries a result's tracking payload.
///
/// `seed` is an already-encoded query string placed before the tracking
/// payload. Returns `""` when there is nothing to append, otherwise a
/// string starting with `?`. An empty tracking payload counts as absent.
pub fn apply_tracking_params(tracking: Option<&str>, seed: Option<&str>) -> String {
    let tracking = tracking.filter(|t| !t.is_empty());
    let seed = seed.filter(|s| !s.is_empty());

    match (seed, tracking) {
        (Some(seed), Some(tracking)) => format!("?{seed}&{tracking}"),
        (Some(seed), None) => format!("?{seed}"),
        (None, Some(tracking)) => format!("?{tracking}"),
        (None, None) => String::new(),
    }
}
