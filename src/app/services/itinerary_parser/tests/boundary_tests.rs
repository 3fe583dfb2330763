//! Tests for the section boundary detector

use super::default_policy;
use crate::app::services::itinerary_parser::boundary::find_section_boundary;

#[test]
fn test_boundary_at_frequency_run() {
    // Route: MEX 1030 JFK 1530, then seven day codes and two dates
    let tokens = vec![
        "MEX", "1030", "JFK", "1530", "1", "2", "3", "4", "5", "6", "7", "010126", "150226",
    ];
    let boundary = find_section_boundary(&tokens, 0, &default_policy());
    assert_eq!(boundary, 4);
}

#[test]
fn test_short_time_not_mistaken_for_day_code() {
    // "5" is a 00:05 departure; only one airport has been seen when it
    // appears, so it must not open the day-code region
    let tokens = vec!["MEX", "5", "JFK", "45", "3", "3", "3", "010126"];
    let boundary = find_section_boundary(&tokens, 0, &default_policy());
    assert_eq!(boundary, 4);
    assert_eq!(tokens[boundary], "3");
}

#[test]
fn test_date_ends_region_unconditionally() {
    // No frequency run at all: the first date after two airports closes
    // the segment region
    let tokens = vec!["MEX", "1030", "JFK", "1530", "010126", "150226"];
    let boundary = find_section_boundary(&tokens, 0, &default_policy());
    assert_eq!(boundary, 4);
}

#[test]
fn test_no_boundary_runs_to_end() {
    let tokens = vec!["MEX", "1030", "JFK", "1530"];
    let boundary = find_section_boundary(&tokens, 0, &default_policy());
    assert_eq!(boundary, tokens.len());
}

#[test]
fn test_conservative_lookahead_rejects_short_runs() {
    // A single candidate code between route tokens is not a boundary for
    // the conservative policy (needs 2 contiguous frequency tokens)...
    let tokens = vec!["MEX", "800", "JFK", "5", "MAD", "900", "3", "3", "010126"];
    let conservative = default_policy();
    assert_eq!(find_section_boundary(&tokens, 0, &conservative), 6);

    // ...but the loose variant commits to it
    let loose = default_policy().with_freq_lookahead(1);
    assert_eq!(find_section_boundary(&tokens, 0, &loose), 3);
}

#[test]
fn test_fused_token_counts_as_airport() {
    // "1030JFK" counts as one airport for the two-airport gate
    let tokens = vec!["MEX", "1030JFK", "1", "2", "3", "010126"];
    let boundary = find_section_boundary(&tokens, 0, &default_policy());
    assert_eq!(boundary, 2);
}
