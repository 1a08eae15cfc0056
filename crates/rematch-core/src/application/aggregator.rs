//! Match Aggregation Engine
//!
//! Drives a single-shot [`Matcher`](crate::application::Matcher) once (local
//! mode) or repeatedly over an advancing read offset (global mode) and
//! collects one [`MatchRecord`] per kept capture slot.

use tracing::{debug, trace};

use crate::application::compiler::CompiledPattern;
use crate::config::Limits;
use crate::domain::{CapacityError, MatchError, MatchRecord, MatchSession, Resource, Span};

#[derive(Debug, Clone, Copy)]
pub struct MatchAggregator {
    limits: Limits,
}

impl MatchAggregator {
    pub fn new(limits: Limits) -> Self {
        MatchAggregator { limits }
    }

    /// Run `compiled` over `input` and collect the session.
    ///
    /// Global mode matches on the unread suffix of the input, so `^` can
    /// match again at each read offset. The loop stops at the end of input,
    /// after a zero-width whole match, or after the first pass in local mode.
    pub fn aggregate(&self, input: &[u8], compiled: &CompiledPattern) -> Result<MatchSession, MatchError> {
        let max_text = self.limits.max_text_length;
        if input.len() > max_text {
            return Err(CapacityError::exceeded(Resource::Text, max_text, input.len()).into());
        }

        let flags = *compiled.flags();
        let groups = compiled.group_count();
        let matcher = compiled.matcher();

        let mut slots: Vec<Option<Span>> = vec![None; groups + 1];
        let mut records = Vec::new();
        let mut occurrences = 0;
        let mut read = 0;

        loop {
            if !matcher.exec(&input[read..], &mut slots)? {
                break;
            }
            let whole = match slots[0] {
                Some(span) => span.shifted(read),
                None => {
                    return Err(MatchError::Fault {
                        message: "matcher reported a match without a whole-match span".into(),
                    })
                }
            };
            if input.get(whole.start()..whole.end()).is_none() {
                return Err(MatchError::Fault {
                    message: format!("matcher span {}..{} is not a range of the input", whole.start(), whole.end()),
                });
            }
            occurrences += 1;
            trace!(occurrence = occurrences, start = whole.start(), end = whole.end(), "occurrence");

            for (submatch, span) in assign_submatches(&slots) {
                if !flags.keeps_submatch(submatch) {
                    continue;
                }
                if records.len() >= self.limits.max_records {
                    return Err(CapacityError::exceeded(
                        Resource::Records,
                        self.limits.max_records,
                        records.len() + 1,
                    )
                    .into());
                }
                let span = span.shifted(read);
                let text = input.get(span.start()..span.end()).ok_or_else(|| MatchError::Fault {
                    message: format!("matcher span {}..{} is not a range of the input", span.start(), span.end()),
                })?;
                records.push(MatchRecord::new(occurrences, submatch, span, text.to_vec()));
            }

            if !flags.global() || whole.is_empty() {
                break;
            }
            read = whole.end();
            if read >= input.len() {
                break;
            }
        }

        debug!(occurrences, records = records.len(), global = flags.global(), "match session complete");
        Ok(MatchSession::new(input.to_vec(), records, occurrences, groups, flags))
    }
}

/// Pair each participating slot with the submatch index it is recorded under.
///
/// Walks the slots tracking the distance from a non-participating slot to the
/// next participating one. Once a gap wider than one slot has been seen, the
/// index carried from the start of the walk is used instead of the raw slot
/// position. An index that would not increase falls back to the slot
/// position, so indices within one occurrence stay unique and ascending.
/// Trailing non-participating slots end the walk.
pub(crate) fn assign_submatches(slots: &[Option<Span>]) -> Vec<(usize, Span)> {
    let last = slots.len().saturating_sub(1);
    let mut assigned: Vec<(usize, Span)> = Vec::with_capacity(slots.len());

    let mut compensating = false;
    let mut carried = 0;
    let mut distance = 0;
    let mut exhausted = false;

    for i in 0..slots.len() {
        for j in (i + 1)..=last {
            if i == 0 {
                carried = 0;
            }
            if i == 1 && compensating {
                carried = distance;
            }
            if slots[j].is_some() {
                exhausted = false;
                distance = j - i;
                if distance > 1 {
                    compensating = true;
                }
                break;
            }
            if j == last {
                exhausted = true;
            }
        }

        match slots[i] {
            None if exhausted => break,
            None => {}
            Some(span) => {
                let mut index = if compensating { carried } else { i };
                if let Some(&(previous, _)) = assigned.last() {
                    if index <= previous {
                        index = i;
                    }
                }
                assigned.push((index, span));
            }
        }
    }

    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{Matcher, MatcherFault};
    use crate::domain::{CapabilityFlags, Pattern};
    use proptest::prelude::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays canned slot arrays, one per exec call, then reports no match.
    #[derive(Debug)]
    struct ScriptedMatcher {
        groups: usize,
        script: Mutex<VecDeque<Result<Vec<Option<(usize, usize)>>, String>>>,
        calls: Arc<Mutex<Vec<usize>>>,
    }

    impl ScriptedMatcher {
        fn new(groups: usize, script: Vec<Vec<Option<(usize, usize)>>>) -> Self {
            ScriptedMatcher {
                groups,
                script: Mutex::new(script.into_iter().map(Ok).collect()),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing(message: &str) -> Self {
            ScriptedMatcher {
                groups: 0,
                script: Mutex::new(VecDeque::from(vec![Err(message.to_string())])),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl Matcher for ScriptedMatcher {
        fn group_count(&self) -> usize { self.groups }

        fn exec(&self, haystack: &[u8], slots: &mut [Option<Span>]) -> Result<bool, MatcherFault> {
            self.calls.lock().unwrap().push(haystack.len());
            match self.script.lock().unwrap().pop_front() {
                None => Ok(false),
                Some(Err(message)) => Err(MatcherFault::new(message)),
                Some(Ok(next)) => {
                    for (slot, value) in slots.iter_mut().zip(next) {
                        *slot = value.map(|(start, end)| Span::new(start, end));
                    }
                    Ok(true)
                }
            }
        }
    }

    fn compiled(matcher: ScriptedMatcher, flags: CapabilityFlags) -> CompiledPattern {
        let (flags, _) = flags.resolve();
        CompiledPattern::from_parts(Pattern::new(&b"x"[..], &b"x"[..]), flags, Box::new(matcher))
    }

    fn summary(session: &MatchSession) -> Vec<(usize, usize, usize, usize)> {
        session
            .records()
            .iter()
            .map(|r| (r.occurrence(), r.submatch(), r.start(), r.end()))
            .collect()
    }

    #[test]
    fn test_local_mode_runs_once() {
        let matcher = ScriptedMatcher::new(1, vec![
            vec![Some((0, 3)), Some((1, 2))],
            vec![Some((4, 7)), Some((5, 6))],
        ]);
        let pattern = compiled(matcher, CapabilityFlags::new());
        let session = MatchAggregator::new(Limits::default()).aggregate(b"abc abc", &pattern).unwrap();

        assert_eq!(session.occurrence_count(), 1);
        assert_eq!(summary(&session), vec![(1, 0, 0, 3), (1, 1, 1, 2)]);
        assert_eq!(session.records()[1].text(), b"b");
    }

    #[test]
    fn test_global_mode_shifts_offsets_by_read_position() {
        // offsets are relative to the suffix handed to the matcher
        let matcher = ScriptedMatcher::new(0, vec![vec![Some((0, 3))], vec![Some((1, 4))]]);
        let pattern = compiled(matcher, CapabilityFlags::new().global());
        let session = MatchAggregator::new(Limits::default()).aggregate(b"abc abc", &pattern).unwrap();

        assert_eq!(summary(&session), vec![(1, 0, 0, 3), (2, 0, 4, 7)]);
        assert_eq!(session.records()[1].text(), b"abc");
    }

    #[test]
    fn test_global_mode_advances_to_end_of_whole_match() {
        let matcher = ScriptedMatcher::new(0, vec![vec![Some((0, 2))], vec![Some((0, 1))]]);
        let calls = Arc::clone(&matcher.calls);
        let pattern = compiled(matcher, CapabilityFlags::new().global());
        let session = MatchAggregator::new(Limits::default()).aggregate(b"abcd", &pattern).unwrap();

        assert_eq!(summary(&session), vec![(1, 0, 0, 2), (2, 0, 2, 3)]);
        assert_eq!(*calls.lock().unwrap(), vec![4, 2, 1]);
    }

    #[test]
    fn test_zero_width_match_stops_global_loop() {
        let matcher = ScriptedMatcher::new(0, vec![vec![Some((0, 0))], vec![Some((0, 0))]]);
        let pattern = compiled(matcher, CapabilityFlags::new().global());
        let session = MatchAggregator::new(Limits::default()).aggregate(b"abc", &pattern).unwrap();

        assert_eq!(session.occurrence_count(), 1);
        assert_eq!(summary(&session), vec![(1, 0, 0, 0)]);
    }

    #[test]
    fn test_global_loop_stops_at_end_of_input() {
        let matcher = ScriptedMatcher::new(0, vec![vec![Some((0, 3))], vec![Some((0, 0))]]);
        let pattern = compiled(matcher, CapabilityFlags::new().global());
        let session = MatchAggregator::new(Limits::default()).aggregate(b"abc", &pattern).unwrap();

        assert_eq!(session.occurrence_count(), 1);
    }

    #[test]
    fn test_no_match_is_empty_session() {
        let matcher = ScriptedMatcher::new(2, Vec::new());
        let pattern = compiled(matcher, CapabilityFlags::new().global());
        let session = MatchAggregator::new(Limits::default()).aggregate(b"abc", &pattern).unwrap();

        assert!(session.is_empty());
        assert_eq!(session.submatch_count(), 2);
        assert_eq!(session.status(), crate::domain::SessionStatus::NoMatch);
    }

    #[test]
    fn test_exclude_and_only_subexpressions_filter_records() {
        let script = || vec![vec![Some((0, 3)), Some((0, 1)), Some((1, 3))]];

        let pattern = compiled(ScriptedMatcher::new(2, script()), CapabilityFlags::new().exclude_subexpressions());
        let session = MatchAggregator::new(Limits::default()).aggregate(b"abc", &pattern).unwrap();
        assert_eq!(summary(&session), vec![(1, 0, 0, 3)]);

        let pattern = compiled(ScriptedMatcher::new(2, script()), CapabilityFlags::new().only_subexpressions());
        let session = MatchAggregator::new(Limits::default()).aggregate(b"abc", &pattern).unwrap();
        assert_eq!(summary(&session), vec![(1, 1, 0, 1), (1, 2, 1, 3)]);
    }

    #[test]
    fn test_record_capacity_is_fatal() {
        let matcher = ScriptedMatcher::new(0, vec![vec![Some((0, 1))], vec![Some((0, 1))], vec![Some((0, 1))]]);
        let pattern = compiled(matcher, CapabilityFlags::new().global());
        let limits = Limits { max_records: 2, ..Limits::default() };
        let err = MatchAggregator::new(limits).aggregate(b"aaaa", &pattern).unwrap_err();

        assert_eq!(err, MatchError::Capacity(CapacityError::exceeded(Resource::Records, 2, 3)));
    }

    #[test]
    fn test_text_length_limit() {
        let pattern = compiled(ScriptedMatcher::new(0, Vec::new()), CapabilityFlags::new());
        let limits = Limits { max_text_length: 3, ..Limits::default() };
        let err = MatchAggregator::new(limits).aggregate(b"abcd", &pattern).unwrap_err();

        assert_eq!(err, MatchError::Capacity(CapacityError::exceeded(Resource::Text, 3, 4)));
    }

    #[test]
    fn test_matcher_fault_is_propagated() {
        let pattern = compiled(ScriptedMatcher::failing("backtrack limit"), CapabilityFlags::new());
        let err = MatchAggregator::new(Limits::default()).aggregate(b"abc", &pattern).unwrap_err();

        assert_eq!(err, MatchError::Fault { message: "backtrack limit".into() });
    }

    #[test]
    fn test_assign_submatches_all_participating() {
        let slots = [Some(Span::new(0, 3)), Some(Span::new(0, 1)), Some(Span::new(1, 3))];
        let indices: Vec<usize> = assign_submatches(&slots).into_iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_assign_submatches_skips_gap() {
        let slots = [Some(Span::new(0, 2)), None, Some(Span::new(1, 2))];
        let assigned = assign_submatches(&slots);
        assert_eq!(assigned, vec![(0, Span::new(0, 2)), (2, Span::new(1, 2))]);
    }

    #[test]
    fn test_assign_submatches_wide_gap_keeps_indices_ascending() {
        let slots = [
            Some(Span::new(0, 4)),
            None,
            None,
            Some(Span::new(1, 2)),
            Some(Span::new(2, 4)),
        ];
        let indices: Vec<usize> = assign_submatches(&slots).into_iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 3, 4]);
    }

    #[test]
    fn test_assign_submatches_trailing_gap_ends_walk() {
        let slots = [Some(Span::new(0, 1)), Some(Span::new(0, 1)), None, None];
        let indices: Vec<usize> = assign_submatches(&slots).into_iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_reversed_whole_span_is_fault() {
        let matcher = ScriptedMatcher::new(0, vec![vec![Some((3, 1))]]);
        let pattern = compiled(matcher, CapabilityFlags::new().only_subexpressions());
        let err = MatchAggregator::new(Limits::default()).aggregate(b"abcd", &pattern).unwrap_err();

        assert!(matches!(err, MatchError::Fault { .. }));
    }

    #[test]
    fn test_reversed_group_span_is_fault() {
        let matcher = ScriptedMatcher::new(1, vec![vec![Some((0, 4)), Some((2, 1))]]);
        let pattern = compiled(matcher, CapabilityFlags::new());
        let err = MatchAggregator::new(Limits::default()).aggregate(b"abcd", &pattern).unwrap_err();

        assert!(matches!(err, MatchError::Fault { .. }));
    }

    /// Slot arrays as a backend fills them: the whole match always set, each
    /// group either set or not participating.
    fn slots_strategy() -> impl Strategy<Value = Vec<Option<Span>>> {
        let span = (0usize..64, 0usize..16).prop_map(|(start, len)| Span::new(start, start + len));
        (span.clone(), prop::collection::vec(prop::option::of(span), 0..12)).prop_map(|(whole, groups)| {
            let mut slots = vec![Some(whole)];
            slots.extend(groups);
            slots
        })
    }

    proptest! {
        #[test]
        fn prop_assign_submatches_yields_participating_slot_positions(slots in slots_strategy()) {
            let expected: Vec<(usize, Span)> = slots
                .iter()
                .enumerate()
                .filter_map(|(index, slot)| slot.map(|span| (index, span)))
                .collect();
            prop_assert_eq!(assign_submatches(&slots), expected);
        }

        #[test]
        fn prop_assign_submatches_indices_ascend(slots in slots_strategy()) {
            let indices: Vec<usize> = assign_submatches(&slots).into_iter().map(|(index, _)| index).collect();
            prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(indices.iter().all(|&index| index < slots.len()));
        }
    }
}
