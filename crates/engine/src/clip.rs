use reelcut_core::ClipSegment;
use reelcut_core::limits::{DURATION_EPSILON, MAX_TIMELINE_DURATION, MIN_CLIP_DURATION};

/// Clamps a time into `[0, MAX_TIMELINE_DURATION]`; non-finite values become 0.
pub(crate) fn clamp_time(value: f64) -> f64 {
    if value.is_finite() {
        // `+ 0.0` folds -0.0 into 0.0 so ordering is stable.
        value.clamp(0.0, MAX_TIMELINE_DURATION) + 0.0
    } else {
        0.0
    }
}

/// Reorders a clamped span and widens it to at least `min_duration`, growing
/// forward when there is room under the ceiling and pulling the start back
/// otherwise.
pub(crate) fn enforce_span(start: f64, end: f64, min_duration: f64) -> (f64, f64) {
    let (start, end) = if end < start { (end, start) } else { (start, end) };
    if end - start >= min_duration - DURATION_EPSILON {
        return (start, end);
    }
    if start + min_duration <= MAX_TIMELINE_DURATION {
        (start, start + min_duration)
    } else {
        (MAX_TIMELINE_DURATION - min_duration, MAX_TIMELINE_DURATION)
    }
}

pub fn normalize_clip(clip: &ClipSegment) -> ClipSegment {
    let (start, end) =
        enforce_span(clamp_time(clip.start), clamp_time(clip.end), MIN_CLIP_DURATION);
    ClipSegment {
        start,
        end,
        ..clip.clone()
    }
}

/// Normalizes every clip and sorts the result by `(start, end, id)`.
pub fn normalize_clips(clips: &[ClipSegment]) -> Vec<ClipSegment> {
    let mut normalized: Vec<ClipSegment> = clips.iter().map(normalize_clip).collect();
    normalized.sort_by(ClipSegment::timeline_order);
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(start: f64, end: f64) -> ClipSegment {
        ClipSegment::new("c", "Clip", start, end, "p")
    }

    #[test]
    fn valid_clip_is_untouched() {
        let c = clip(1.0, 4.5);
        assert_eq!(normalize_clip(&c), c);
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let n = normalize_clip(&clip(8.0, 3.0));
        assert_eq!((n.start, n.end), (3.0, 8.0));
    }

    #[test]
    fn non_finite_values_become_zero() {
        let n = normalize_clip(&clip(f64::NAN, f64::INFINITY));
        assert_eq!(n.start, 0.0);
        assert_eq!(n.end, MIN_CLIP_DURATION);

        let n = normalize_clip(&clip(f64::NEG_INFINITY, 5.0));
        assert_eq!((n.start, n.end), (0.0, 5.0));
    }

    #[test]
    fn short_clip_grows_forward() {
        let n = normalize_clip(&clip(10.0, 10.1));
        assert_eq!(n.start, 10.0);
        assert_eq!(n.end, 10.0 + MIN_CLIP_DURATION);
    }

    #[test]
    fn short_clip_at_ceiling_pulls_start_back() {
        let n = normalize_clip(&clip(MAX_TIMELINE_DURATION + 50.0, MAX_TIMELINE_DURATION));
        assert_eq!(n.end, MAX_TIMELINE_DURATION);
        assert_eq!(n.start, MAX_TIMELINE_DURATION - MIN_CLIP_DURATION);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let n = normalize_clip(&clip(-4.0, -1.0));
        assert_eq!((n.start, n.end), (0.0, MIN_CLIP_DURATION));
    }

    #[test]
    fn normalization_is_idempotent() {
        for c in [clip(0.1, 0.1), clip(-0.0, 0.2), clip(35_999.9, 1e12), clip(7.3, 2.2)] {
            let once = normalize_clip(&c);
            assert_eq!(normalize_clip(&once), once);
        }
    }

    #[test]
    fn clips_are_sorted() {
        let clips = vec![
            ClipSegment::new("b", "", 5.0, 6.0, "p"),
            ClipSegment::new("a", "", 5.0, 6.0, "p"),
            ClipSegment::new("z", "", 1.0, 2.0, "p"),
        ];
        let ids: Vec<String> = normalize_clips(&clips).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["z", "a", "b"]);
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        fn any_time() -> impl Strategy<Value = f64> {
            prop_oneof![
                4 => -100.0..36_100.0f64,
                1 => Just(f64::NAN),
                1 => Just(f64::INFINITY),
                1 => Just(f64::NEG_INFINITY),
            ]
        }

        proptest! {
            #[test]
            fn normalized_clip_is_in_bounds(start in any_time(), end in any_time()) {
                let n = normalize_clip(&clip(start, end));
                prop_assert!(n.start >= 0.0 && n.end <= MAX_TIMELINE_DURATION);
                prop_assert!(n.duration() >= MIN_CLIP_DURATION - DURATION_EPSILON);
                prop_assert_eq!(normalize_clip(&n), n);
            }
        }
    }
}
