//! Merging ordered per-chunk results into one continuous transcript.

use crate::defaults::UNKNOWN_LANGUAGE;
use crate::pipeline::types::{ChunkError, ChunkOutcome, ChunkResult, TranscriptResult};
use crate::stt::transcriber::Segment;

/// Merge per-chunk results into a single transcript.
///
/// Merging happens in chunk-index order regardless of arrival order — the
/// sequential runner happens to deliver results in index order already,
/// but this function must not rely on that, so a future concurrent runner
/// only has to buffer results, not re-sort them here.
///
/// Segment timestamps are shifted onto the global timeline by a running
/// offset that advances by each successful chunk's reported duration. A
/// chunk that reports no duration leaves the offset unchanged; if such a
/// chunk carries segments, every later chunk's timestamps end up shifted
/// short. That approximation is inherited behavior, kept until the
/// upstream duration reporting is guaranteed.
pub fn reassemble(results: &[ChunkResult]) -> TranscriptResult {
    let mut ordered: Vec<&ChunkResult> = results.iter().collect();
    ordered.sort_by_key(|r| r.index);

    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for result in ordered {
        match &result.outcome {
            ChunkOutcome::Success(transcription) => successes.push((result.index, transcription)),
            ChunkOutcome::Failure { error } => failures.push(ChunkError {
                index: result.index,
                error: error.clone(),
            }),
        }
    }

    if successes.is_empty() {
        return TranscriptResult {
            success: false,
            text: String::new(),
            language: UNKNOWN_LANGUAGE.to_string(),
            segments: Vec::new(),
            total_chunks: results.len(),
            successful_chunks: 0,
            failed_chunks: failures.len(),
            total_duration: None,
            chunk_errors: Some(failures),
        };
    }

    let text = successes
        .iter()
        .map(|(_, t)| t.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut segments = Vec::new();
    let mut time_offset = 0.0;
    for (_, transcription) in &successes {
        if let Some(chunk_segments) = &transcription.segments {
            for segment in chunk_segments {
                segments.push(Segment {
                    start: segment.start + time_offset,
                    end: segment.end + time_offset,
                    text: segment.text.clone(),
                });
            }
        }
        if let Some(duration) = transcription.duration {
            time_offset += duration;
        }
    }

    let language = successes
        .iter()
        .find_map(|(_, t)| t.language.clone())
        .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());

    TranscriptResult {
        success: true,
        text,
        language,
        segments,
        total_chunks: results.len(),
        successful_chunks: successes.len(),
        failed_chunks: failures.len(),
        total_duration: (time_offset > 0.0).then_some(time_offset),
        chunk_errors: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::ChunkTranscription;

    fn success(index: usize, text: &str) -> ChunkResult {
        ChunkResult::success(
            index,
            ChunkTranscription {
                text: text.to_string(),
                language: Some("en".to_string()),
                duration: None,
                segments: None,
            },
        )
    }

    fn success_timed(index: usize, text: &str, duration: f64, segments: Vec<Segment>) -> ChunkResult {
        ChunkResult::success(
            index,
            ChunkTranscription {
                text: text.to_string(),
                language: Some("en".to_string()),
                duration: Some(duration),
                segments: Some(segments),
            },
        )
    }

    fn seg(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn all_success_accumulates_offsets_from_durations() {
        let results = vec![
            success_timed(0, "first", 300.0, vec![seg(0.0, 10.0, "first")]),
            success_timed(1, "second", 300.0, vec![seg(0.0, 10.0, "second")]),
            success_timed(2, "third", 120.0, vec![seg(0.0, 10.0, "third")]),
        ];

        let merged = reassemble(&results);

        assert!(merged.success);
        assert_eq!(merged.text, "first second third");
        let starts: Vec<f64> = merged.segments.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.0, 300.0, 600.0]);
        assert_eq!(merged.total_duration, Some(720.0));
        assert_eq!(merged.language, "en");
        assert_eq!(merged.total_chunks, 3);
        assert_eq!(merged.successful_chunks, 3);
        assert_eq!(merged.failed_chunks, 0);
        assert!(merged.chunk_errors.is_none());
    }

    #[test]
    fn merging_keys_on_index_not_arrival_order() {
        let in_order = vec![
            success_timed(0, "alpha", 60.0, vec![seg(0.0, 5.0, "alpha")]),
            success_timed(1, "beta", 60.0, vec![seg(0.0, 5.0, "beta")]),
            success_timed(2, "gamma", 60.0, vec![seg(0.0, 5.0, "gamma")]),
        ];
        let shuffled = vec![
            in_order[2].clone(),
            in_order[0].clone(),
            in_order[1].clone(),
        ];

        assert_eq!(reassemble(&in_order), reassemble(&shuffled));
        assert_eq!(reassemble(&shuffled).text, "alpha beta gamma");
    }

    #[test]
    fn partial_failure_is_still_a_success() {
        let results = vec![
            success_timed(0, "start", 300.0, vec![seg(0.0, 10.0, "start")]),
            ChunkResult::failure(1, "status 502: bad gateway"),
            success_timed(2, "end", 120.0, vec![seg(0.0, 10.0, "end")]),
        ];

        let merged = reassemble(&results);

        assert!(merged.success);
        assert_eq!(merged.text, "start end");
        assert_eq!(merged.successful_chunks, 2);
        assert_eq!(merged.failed_chunks, 1);
        // The failed chunk contributes no duration; the next chunk starts
        // right after the first one's 300s.
        let starts: Vec<f64> = merged.segments.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.0, 300.0]);
        assert!(merged.chunk_errors.is_none());
    }

    #[test]
    fn total_failure_reports_every_chunk_error() {
        let results = vec![
            ChunkResult::failure(0, "timeout"),
            ChunkResult::failure(1, "status 500"),
            ChunkResult::failure(2, "connection reset"),
        ];

        let merged = reassemble(&results);

        assert!(!merged.success);
        assert_eq!(merged.text, "");
        assert_eq!(merged.language, "unknown");
        assert!(merged.segments.is_empty());
        assert_eq!(merged.total_chunks, 3);
        assert_eq!(merged.failed_chunks, 3);
        assert_eq!(merged.total_duration, None);

        let errors = merged.chunk_errors.unwrap();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], ChunkError { index: 0, error: "timeout".to_string() });
        assert_eq!(errors[1].index, 1);
        assert_eq!(errors[2].error, "connection reset");
    }

    #[test]
    fn chunk_without_duration_leaves_offset_unchanged() {
        // Known approximation: the middle chunk has segments but no
        // duration, so the third chunk's timestamps land short.
        let results = vec![
            success_timed(0, "one", 100.0, vec![seg(0.0, 5.0, "one")]),
            ChunkResult::success(
                1,
                ChunkTranscription {
                    text: "two".to_string(),
                    language: None,
                    duration: None,
                    segments: Some(vec![seg(0.0, 5.0, "two")]),
                },
            ),
            success_timed(2, "three", 100.0, vec![seg(0.0, 5.0, "three")]),
        ];

        let merged = reassemble(&results);

        let starts: Vec<f64> = merged.segments.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.0, 100.0, 100.0]);
        assert_eq!(merged.total_duration, Some(200.0));
    }

    #[test]
    fn chunk_without_segments_still_advances_offset() {
        let results = vec![
            ChunkResult::success(
                0,
                ChunkTranscription {
                    text: "silent metadata".to_string(),
                    language: Some("en".to_string()),
                    duration: Some(300.0),
                    segments: None,
                },
            ),
            success_timed(1, "spoken", 120.0, vec![seg(0.0, 10.0, "spoken")]),
        ];

        let merged = reassemble(&results);

        assert_eq!(merged.segments.len(), 1);
        assert_eq!(merged.segments[0].start, 300.0);
        assert_eq!(merged.total_duration, Some(420.0));
    }

    #[test]
    fn language_comes_from_first_successful_chunk_in_index_order() {
        let results = vec![
            ChunkResult::failure(0, "boom"),
            ChunkResult::success(
                1,
                ChunkTranscription {
                    text: "hallo".to_string(),
                    language: Some("de".to_string()),
                    duration: None,
                    segments: None,
                },
            ),
            ChunkResult::success(
                2,
                ChunkTranscription {
                    text: "bonjour".to_string(),
                    language: Some("fr".to_string()),
                    duration: None,
                    segments: None,
                },
            ),
        ];

        assert_eq!(reassemble(&results).language, "de");
    }

    #[test]
    fn missing_languages_fall_back_to_unknown() {
        let results = vec![ChunkResult::success(
            0,
            ChunkTranscription {
                text: "hi".to_string(),
                language: None,
                duration: None,
                segments: None,
            },
        )];

        assert_eq!(reassemble(&results).language, "unknown");
    }

    #[test]
    fn empty_chunk_text_does_not_produce_double_spaces() {
        let results = vec![
            success(0, "hello"),
            success(1, "   "),
            success(2, "world"),
        ];

        assert_eq!(reassemble(&results).text, "hello world");
    }

    #[test]
    fn no_durations_means_no_total_duration() {
        let results = vec![success(0, "a"), success(1, "b")];
        assert_eq!(reassemble(&results).total_duration, None);
    }

    #[test]
    fn reassembly_is_idempotent() {
        let results = vec![
            success_timed(0, "first", 300.0, vec![seg(0.0, 10.0, "first")]),
            ChunkResult::failure(1, "boom"),
            success_timed(2, "third", 120.0, vec![seg(1.5, 9.0, "third")]),
        ];

        let a = serde_json::to_string(&reassemble(&results)).unwrap();
        let b = serde_json::to_string(&reassemble(&results)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn global_timestamps_are_monotonic_when_durations_are_reported() {
        let results: Vec<ChunkResult> = (0..5)
            .map(|i| {
                success_timed(
                    i,
                    "text",
                    60.0,
                    vec![seg(0.0, 20.0, "a"), seg(20.0, 59.0, "b")],
                )
            })
            .collect();

        let merged = reassemble(&results);
        for pair in merged.segments.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
    }
}
