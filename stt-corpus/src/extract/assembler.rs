//! Segment assembly: turn a classified run stream into title/body records.

use super::classifier::{Classification, StyleTags, classify};
use super::normalizer::{ScriptRange, normalize};
use super::{Record, Run};
use crate::error::Result;

/// Where the walk currently stands.
#[derive(Debug)]
enum State {
    NoPendingRecord,
    AccumulatingRecord { title: String, lines: Vec<String> },
}

impl State {
    /// Take the pending record if it is complete, leaving no pending record.
    fn take_complete(&mut self) -> Option<Record> {
        match std::mem::replace(self, State::NoPendingRecord) {
            State::AccumulatingRecord { title, lines } if !title.is_empty() && !lines.is_empty() => {
                Some(Record { title, lines })
            }
            _ => None,
        }
    }

    fn push_line(&mut self, line: String) {
        if let State::AccumulatingRecord { lines, .. } = self {
            lines.push(line);
        }
    }

    fn pop_line(&mut self) -> Option<String> {
        match self {
            State::AccumulatingRecord { lines, .. } => lines.pop(),
            State::NoPendingRecord => None,
        }
    }
}

/// Walks runs in document order and hands every completed record to a sink.
pub struct SegmentAssembler<'a> {
    tags: &'a StyleTags,
    script: &'a ScriptRange,
}

impl<'a> SegmentAssembler<'a> {
    pub fn new(tags: &'a StyleTags, script: &'a ScriptRange) -> Self {
        Self { tags, script }
    }

    /// Assemble `runs`, calling `emit(counter, record)` once per completed
    /// record. Counters start at 1 and have no gaps.
    ///
    /// Returns the number of records emitted.
    pub fn run<F>(&self, runs: &[Run], mut emit: F) -> Result<usize>
    where
        F: FnMut(usize, &Record) -> Result<()>,
    {
        let mut state = State::NoPendingRecord;
        let mut counter = 1;
        let mut skip_next = false;

        for (index, run) in runs.iter().enumerate() {
            // Already folded into the previous continuation merge
            if skip_next {
                skip_next = false;
                continue;
            }

            match classify(run, self.tags) {
                Classification::Ignorable => {}
                Classification::Title(title) => {
                    if let Some(record) = state.take_complete() {
                        emit(counter, &record)?;
                        counter += 1;
                    }
                    state = State::AccumulatingRecord {
                        title,
                        lines: Vec::new(),
                    };
                }
                Classification::Body => {
                    let line = normalize(&run.text, self.script);
                    if !line.is_empty() {
                        state.push_line(line);
                    }
                }
                Classification::ContinuationBody => {
                    let middle = normalize(&run.text, self.script);
                    let left = state.pop_line().unwrap_or_default();

                    let lookahead = runs
                        .get(index + 1)
                        .filter(|next| classify(next, self.tags) == Classification::Body);
                    let right = lookahead
                        .map(|next| normalize(&next.text, self.script))
                        .unwrap_or_default();

                    let merged = join_fragments(&[left.as_str(), middle.as_str(), right.as_str()]);
                    if !merged.is_empty() {
                        state.push_line(merged);
                    }
                    skip_next = lookahead.is_some();
                }
            }
        }

        if let Some(record) = state.take_complete() {
            emit(counter, &record)?;
            counter += 1;
        }

        Ok(counter - 1)
    }

    /// Assemble into memory.
    #[cfg(test)]
    pub fn collect(&self, runs: &[Run]) -> Vec<Record> {
        let mut records = Vec::new();
        // The sink never fails, so neither does the walk
        let _ = self.run(runs, |_, record| {
            records.push(record.clone());
            Ok(())
        });
        records
    }
}

/// Join non-empty fragments with single spaces.
fn join_fragments(fragments: &[&str]) -> String {
    fragments
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn latin() -> ScriptRange {
        ScriptRange::new(0x20, 0x7E).unwrap()
    }

    fn title(text: &str) -> Run {
        Run::new(&["c3"], text)
    }

    fn body(text: &str) -> Run {
        Run::new(&["c1"], text)
    }

    fn continuation(text: &str) -> Run {
        Run::new(&["c24"], text)
    }

    fn assemble(runs: &[Run]) -> Vec<Record> {
        let tags = StyleTags::default();
        let script = latin();
        SegmentAssembler::new(&tags, &script).collect(runs)
    }

    fn record(title: &str, lines: &[&str]) -> Record {
        Record {
            title: title.to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_continuation_merges_neighbours() {
        let runs = vec![
            title("1. Intro"),
            body("line one"),
            continuation("mid"),
            body("tail"),
        ];
        assert_eq!(assemble(&runs), vec![record("Intro", &["line one mid tail"])]);
    }

    #[test]
    fn test_continuation_without_left_line() {
        // The merge pops the previous line; with only the title before it
        // there is nothing to pop
        let runs = vec![title("1. Intro"), continuation("mid"), body("tail")];
        assert_eq!(assemble(&runs), vec![record("Intro", &["mid tail"])]);
    }

    #[test]
    fn test_scenario_two_lines_then_merge() {
        let runs = vec![
            title("1. Intro"),
            body("line one"),
            body("line two"),
            continuation("mid"),
            body("tail"),
            body("after"),
        ];
        assert_eq!(
            assemble(&runs),
            vec![record("Intro", &["line one", "line two mid tail", "after"])]
        );
    }

    #[test]
    fn test_lookahead_skips_exactly_one_run() {
        let runs = vec![
            title("T"),
            continuation("a"),
            body("b"),
            body("c"),
            body("d"),
        ];
        assert_eq!(assemble(&runs), vec![record("T", &["a b", "c", "d"])]);
    }

    #[test]
    fn test_lookahead_ignores_non_body() {
        let runs = vec![
            title("T"),
            body("left"),
            continuation("mid"),
            title("U"),
            body("x"),
        ];
        assert_eq!(
            assemble(&runs),
            vec![record("T", &["left mid"]), record("U", &["x"])]
        );
    }

    #[test]
    fn test_lookahead_does_not_chain_continuations() {
        let runs = vec![
            title("T"),
            body("a"),
            continuation("b"),
            continuation("c"),
            body("d"),
        ];
        // The second continuation is not Body, so it is processed on its own
        // and merges with the line built by the first
        assert_eq!(assemble(&runs), vec![record("T", &["a b c d"])]);
    }

    #[test]
    fn test_lookahead_at_end_of_stream() {
        let runs = vec![title("T"), body("a"), continuation("b")];
        assert_eq!(assemble(&runs), vec![record("T", &["a b"])]);
    }

    #[test]
    fn test_empty_lookahead_body_is_not_skipped() {
        // A whitespace-only c1 run is Ignorable, not Body
        let runs = vec![title("T"), continuation("a"), body("   "), body("b")];
        assert_eq!(assemble(&runs), vec![record("T", &["a", "b"])]);
    }

    #[test]
    fn test_lookahead_body_outside_script_is_still_skipped() {
        let tags = StyleTags::default();
        let script = ScriptRange::TIBETAN;
        let runs = vec![title("T"), continuation("ཀ"), body("latin"), body("ཁ")];
        let records = SegmentAssembler::new(&tags, &script).collect(&runs);
        assert_eq!(records, vec![record("T", &["ཀ", "ཁ"])]);
    }

    #[test]
    fn test_empty_merge_appends_nothing() {
        let tags = StyleTags::default();
        let script = ScriptRange::TIBETAN;
        let runs = vec![title("T"), body("ཀ"), title("U"), continuation("latin only")];
        let records = SegmentAssembler::new(&tags, &script).collect(&runs);
        assert_eq!(records, vec![record("T", &["ཀ"])]);
    }

    #[test]
    fn test_title_without_body_is_discarded() {
        let runs = vec![title("A"), title("B"), body("x")];
        assert_eq!(assemble(&runs), vec![record("B", &["x"])]);
    }

    #[test]
    fn test_trailing_title_without_body_is_discarded() {
        let runs = vec![title("A"), body("x"), title("B")];
        assert_eq!(assemble(&runs), vec![record("A", &["x"])]);
    }

    #[test]
    fn test_body_before_first_title_is_dropped() {
        let runs = vec![body("orphan"), continuation("frag"), title("A"), body("x")];
        assert_eq!(assemble(&runs), vec![record("A", &["x"])]);
    }

    #[test]
    fn test_empty_stream() {
        assert!(assemble(&[]).is_empty());
    }

    #[test]
    fn test_body_normalized_to_script() {
        let tags = StyleTags::default();
        let script = ScriptRange::TIBETAN;
        let runs = vec![
            title("1. ཐོག་མ"),
            body("1) ཀ་ཁ་\nག abc"),
            body("latin only"),
        ];
        let records = SegmentAssembler::new(&tags, &script).collect(&runs);
        assert_eq!(records, vec![record("ཐོག་མ", &["ཀ་ཁ་ག"])]);
    }

    #[test]
    fn test_counters_are_contiguous() {
        let tags = StyleTags::default();
        let script = latin();
        let runs = vec![
            title("A"),
            title("B"),
            body("b"),
            title("C"),
            title("D"),
            body("d"),
            title("E"),
        ];
        let mut seen = Vec::new();
        let count = SegmentAssembler::new(&tags, &script)
            .run(&runs, |counter, record| {
                seen.push((counter, record.title.clone()));
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(seen, vec![(1, "B".to_string()), (2, "D".to_string())]);
    }

    #[test]
    fn test_sink_error_stops_walk() {
        let tags = StyleTags::default();
        let script = latin();
        let runs = vec![title("A"), body("a"), title("B"), body("b")];
        let mut calls = 0;
        let result = SegmentAssembler::new(&tags, &script).run(&runs, |_, _| {
            calls += 1;
            Err(crate::error::CorpusError::Config("sink failed".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[derive(Debug, Clone)]
    enum Kind {
        Title,
        Body,
        Blank,
    }

    fn kind_sequences() -> impl Strategy<Value = Vec<Kind>> {
        prop::collection::vec(
            prop_oneof![Just(Kind::Title), Just(Kind::Body), Just(Kind::Blank)],
            0..40,
        )
    }

    fn to_runs(kinds: &[Kind]) -> Vec<Run> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| match kind {
                Kind::Title => title(&format!("{}. title {}", i, i)),
                Kind::Body => body(&format!("line {}", i)),
                Kind::Blank => body("  "),
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_record_count_matches_titles_with_body(kinds in kind_sequences()) {
            let mut expected = 0;
            let mut open = false;
            let mut has_body = false;
            for kind in &kinds {
                match kind {
                    Kind::Title => {
                        if open && has_body {
                            expected += 1;
                        }
                        open = true;
                        has_body = false;
                    }
                    Kind::Body => has_body = true,
                    Kind::Blank => {}
                }
            }
            if open && has_body {
                expected += 1;
            }

            let records = assemble(&to_runs(&kinds));
            prop_assert_eq!(records.len(), expected);
        }

        #[test]
        fn prop_records_are_never_empty(kinds in kind_sequences()) {
            for record in assemble(&to_runs(&kinds)) {
                prop_assert!(!record.title.is_empty());
                prop_assert!(!record.lines.is_empty());
                prop_assert!(record.lines.iter().all(|l| !l.is_empty()));
            }
        }

        #[test]
        fn prop_counters_start_at_one_without_gaps(kinds in kind_sequences()) {
            let tags = StyleTags::default();
            let script = latin();
            let mut counters = Vec::new();
            let count = SegmentAssembler::new(&tags, &script)
                .run(&to_runs(&kinds), |counter, _| {
                    counters.push(counter);
                    Ok(())
                })
                .unwrap();
            prop_assert_eq!(counters, (1..=count).collect::<Vec<_>>());
        }
    }
}
