//! Property-based tests for normalization and the history manager.
//!
//! 1. Normalization is idempotent and reuses the assembly it produced
//! 2. Any candidate normalizes to a snapshot with no invariant violations
//! 3. Arbitrary edit sequences keep the present valid and the past bounded
//! 4. Undo exactly reverts a recorded edit and redo exactly reverts undo

use std::sync::Arc;

use proptest::prelude::*;
use reelcut_core::{ClipAssemblyItem, ClipAssemblyState, ClipSegment, SnapshotCandidate, TrackType};
use reelcut_engine::edits::{self, TrackFlags};
use reelcut_engine::{HistoryConfig, normalize_snapshot};
use reelcut_harness::fixtures::{audio_file, clip, clip_item, track, video_file};
use reelcut_harness::{TestSession, check_invariants};
use serde_json::json;

// ── Strategies ──────────────────────────────────────────────────────────

fn time() -> impl Strategy<Value = f64> {
    prop_oneof![
        12 => 0.0..30.0f64,
        2 => -50.0..36_050.0f64,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

fn clip_id() -> impl Strategy<Value = String> {
    (0usize..6).prop_map(|n| format!("c{n}"))
}

fn clip_strategy() -> impl Strategy<Value = ClipSegment> {
    (clip_id(), time(), time()).prop_map(|(id, start, end)| clip(&id, start, end))
}

fn item_strategy() -> impl Strategy<Value = ClipAssemblyItem> {
    (0u8..3, prop_oneof![Just(String::new()), "[a-c]{1,2}"], clip_id(), time(), time()).prop_map(
        |(kind, id, clip_id, start, end)| match kind {
            0 => clip_item(&id, &clip_id, start, end),
            1 => video_file(&id, start, end),
            _ => audio_file(&id, start, end),
        },
    )
}

fn assembly_strategy() -> impl Strategy<Value = ClipAssemblyState> {
    let track = (
        any::<bool>(),
        prop_oneof![
            Just(String::new()),
            Just("v".to_string()),
            Just("a".to_string()),
            Just("main".to_string()),
        ],
        prop::collection::vec(item_strategy(), 0..5),
    )
        .prop_map(|(audio, id, items)| {
            let track_type = if audio { TrackType::Audio } else { TrackType::Video };
            track(track_type, &id, items)
        });
    (
        prop::collection::vec(track, 0..4),
        prop_oneof![Just("v".to_string()), Just("main-2".to_string()), Just("gone".to_string())],
        prop::option::of("[a-c]{1,2}"),
        prop_oneof![time(), Just(100.0)],
    )
        .prop_map(|(tracks, active_track_id, active_item_id, zoom)| ClipAssemblyState {
            tracks,
            active_track_id,
            active_item_id,
            zoom,
            subtitle_overlays_enabled: true,
        })
}

fn candidate_strategy() -> impl Strategy<Value = SnapshotCandidate> {
    (
        prop::collection::vec(clip_strategy(), 0..6),
        prop::option::of(clip_id()),
        prop::collection::vec(clip_id(), 0..4),
        prop::option::of(assembly_strategy()),
    )
        .prop_map(|(clips, active_clip_id, draft_ids, assembly)| SnapshotCandidate {
            clips,
            active_clip_id,
            clip_drafts: draft_ids
                .into_iter()
                .map(|id| {
                    let draft = Arc::new(json!({ "clip": id }));
                    (id, draft)
                })
                .collect(),
            assembly: assembly.map(Arc::new),
        })
}

/// UI edits. Indices pick among whatever exists at the time they run.
#[derive(Debug, Clone)]
enum Op {
    AddClip(f64, f64),
    RemoveClip(usize),
    TrimClip(usize, f64, f64),
    SplitClip(usize, f64),
    AddTrack(bool),
    Place(usize, usize, f64),
    Move(usize, f64),
    Lock(usize, bool),
    Zoom(f64),
    DragZoom(f64),
    Undo,
    Redo,
}

impl Op {
    fn is_recorded_edit(&self) -> bool {
        !matches!(self, Op::DragZoom(_) | Op::Undo | Op::Redo)
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (time(), 0.0..10.0f64).prop_map(|(start, len)| Op::AddClip(start, len)),
        1 => any::<usize>().prop_map(Op::RemoveClip),
        2 => (any::<usize>(), time(), time()).prop_map(|(i, s, e)| Op::TrimClip(i, s, e)),
        1 => (any::<usize>(), 0.0..1.0f64).prop_map(|(i, at)| Op::SplitClip(i, at)),
        1 => any::<bool>().prop_map(Op::AddTrack),
        3 => (any::<usize>(), any::<usize>(), time()).prop_map(|(t, c, s)| Op::Place(t, c, s)),
        2 => (any::<usize>(), time()).prop_map(|(i, s)| Op::Move(i, s)),
        1 => (any::<usize>(), any::<bool>()).prop_map(|(t, locked)| Op::Lock(t, locked)),
        1 => time().prop_map(Op::Zoom),
        1 => time().prop_map(Op::DragZoom),
        2 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

fn nth_clip(session: &TestSession, index: usize) -> Option<ClipSegment> {
    let clips = &session.present().clips;
    (!clips.is_empty()).then(|| clips[index % clips.len()].clone())
}

fn nth_track_id(session: &TestSession, index: usize) -> String {
    let tracks = &session.present().assembly.tracks;
    tracks[index % tracks.len()].id.clone()
}

/// Applies `op`; returns whether the history changed.
fn apply_op(session: &mut TestSession, op: &Op, next_clip: &mut usize) -> bool {
    match *op {
        Op::AddClip(start, len) => {
            *next_clip += 1;
            session.apply(edits::add_clip(clip(&format!("n{next_clip}"), start, start + len)))
        }
        Op::RemoveClip(i) => match nth_clip(session, i) {
            Some(target) => session.apply(edits::remove_clip(target.id)),
            None => false,
        },
        Op::TrimClip(i, start, end) => match nth_clip(session, i) {
            Some(target) => session.apply(edits::trim_clip(target.id, start, end)),
            None => false,
        },
        Op::SplitClip(i, at) => match nth_clip(session, i) {
            Some(target) => {
                let at = target.start + at * target.duration();
                session.apply(edits::split_clip(target.id, at))
            }
            None => false,
        },
        Op::AddTrack(audio) => {
            let track_type = if audio { TrackType::Audio } else { TrackType::Video };
            session.apply(edits::add_track(track_type))
        }
        Op::Place(t, c, start) => match nth_clip(session, c) {
            Some(target) => {
                let track_id = nth_track_id(session, t);
                session.apply(edits::place_clip(track_id, target.id, start))
            }
            None => false,
        },
        Op::Move(i, start) => {
            let items: Vec<String> = session
                .present()
                .assembly
                .tracks
                .iter()
                .flat_map(|track| track.items.iter().map(|item| item.id.clone()))
                .collect();
            if items.is_empty() {
                return false;
            }
            session.apply(edits::move_item(items[i % items.len()].clone(), start))
        }
        Op::Lock(t, locked) => {
            let track_id = nth_track_id(session, t);
            let flags = TrackFlags {
                locked,
                ..TrackFlags::default()
            };
            session.apply(edits::set_track_flags(track_id, flags))
        }
        Op::Zoom(zoom) => session.apply(edits::set_zoom(zoom)),
        Op::DragZoom(zoom) => session.drag(edits::set_zoom(zoom)),
        Op::Undo => session.undo(),
        Op::Redo => session.redo(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1-2. Normalization
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn normalization_is_idempotent(candidate in candidate_strategy()) {
        let once = normalize_snapshot(candidate);
        let twice = normalize_snapshot(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(Arc::ptr_eq(&once.assembly, &twice.assembly));
    }

    #[test]
    fn normalized_candidates_are_valid(candidate in candidate_strategy()) {
        let snap = normalize_snapshot(candidate);
        let violations = check_invariants(&snap);
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3-4. History under arbitrary edits
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn edit_sequences_keep_present_valid(
        seed in candidate_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut session = TestSession::from_seed(seed)
            .with_config(HistoryConfig { max_history_entries: 10 });
        let mut next_clip = 0;
        for op in &ops {
            apply_op(&mut session, op, &mut next_clip);
            let violations = check_invariants(session.present());
            prop_assert!(violations.is_empty(), "after {:?}: {:?}", op, violations);
            prop_assert!(session.history().undo_depth() <= 10);
        }
    }

    #[test]
    fn undo_reverts_each_recorded_edit(
        ops in prop::collection::vec(op_strategy(), 1..30),
    ) {
        let mut session = TestSession::with_clips(vec![clip("c1", 0.0, 3.0), clip("c2", 3.0, 5.0)]);
        let mut next_clip = 0;
        for op in &ops {
            let before = Arc::clone(session.history().present_arc());
            let changed = apply_op(&mut session, op, &mut next_clip);
            if changed && op.is_recorded_edit() {
                let undone = session.history().undo();
                prop_assert!(Arc::ptr_eq(undone.present_arc(), &before), "undo of {:?}", op);
            }
        }
    }

    #[test]
    fn redo_reverts_undo(
        ops in prop::collection::vec(op_strategy(), 1..30),
    ) {
        let mut session = TestSession::with_clips(vec![clip("c1", 0.0, 3.0)]);
        let mut next_clip = 0;
        for op in &ops {
            apply_op(&mut session, op, &mut next_clip);
        }
        let present = Arc::clone(session.history().present_arc());
        let future = session.history().redo_depth();
        if session.undo() {
            prop_assert_eq!(session.history().redo_depth(), future + 1);
            prop_assert!(session.redo());
            prop_assert!(Arc::ptr_eq(session.history().present_arc(), &present));
            prop_assert_eq!(session.history().redo_depth(), future);
        }
    }
}
