//! SRT subtitle parsing and writing

use crate::domain::model::{SubtitleEntry, TranscriptSegment};
use crate::utils::time::parse_srt_time;

/// Parse the `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing line of a cue.
///
/// Only the timestamps next to the arrow are read, so trailing position
/// coordinates (`X1:100 X2:200 ...`) are ignored.
fn parse_timing(line: &str) -> Option<(f64, f64)> {
    let (start, end) = line.split_once("-->")?;
    let start = start.split_whitespace().last()?;
    let end = end.split_whitespace().next()?;
    Some((parse_srt_time(start).ok()?, parse_srt_time(end).ok()?))
}

/// Parse SRT content into cues.
///
/// Blocks are separated by blank lines. A block needs an index line, a timing
/// line and at least one text line; anything else is skipped.
pub fn parse_srt(content: &str) -> Vec<SubtitleEntry> {
    let normalized = content.replace("\r\n", "\n");
    let mut entries = Vec::new();

    for block in normalized.trim().split("\n\n") {
        let lines: Vec<&str> = block.lines().collect();
        if lines.len() < 3 {
            continue;
        }

        let Some((start_time, end_time)) = parse_timing(lines[1]) else {
            continue;
        };

        entries.push(SubtitleEntry {
            index: lines[0].trim().parse().unwrap_or(0),
            start_time,
            end_time,
            text: lines[2..].join("\n"),
        });
    }

    entries
}

fn ends_sentence(text: &str) -> bool {
    text.trim_end().ends_with(&['.', '!', '?'][..])
}

/// Turn transcript segments into numbered cues, one per sentence.
///
/// Tokens are joined with spaces and a cue is closed after a token ending in
/// `.`, `!` or `?`, or at the last token of the segment. A segment without
/// tokens becomes a single cue with its trimmed text.
pub fn group_segments(segments: &[TranscriptSegment]) -> Vec<SubtitleEntry> {
    let mut entries = Vec::new();
    let mut push = |start_time: f64, end_time: f64, text: String| {
        let index = entries.len() as u32 + 1;
        entries.push(SubtitleEntry {
            index,
            start_time,
            end_time,
            text,
        });
    };

    for segment in segments {
        let Some(first) = segment.tokens.first() else {
            push(segment.start, segment.end, segment.text.trim().to_string());
            continue;
        };

        let mut start = first.start;
        let mut words: Vec<&str> = Vec::new();
        for (i, token) in segment.tokens.iter().enumerate() {
            words.push(&token.text);
            let last = i + 1 == segment.tokens.len();
            if !(ends_sentence(&token.text) || last) {
                continue;
            }

            let text = words.join(" ").trim().to_string();
            if !text.is_empty() {
                push(start, token.end, text);
            }
            if let Some(next) = segment.tokens.get(i + 1) {
                start = next.start;
                words.clear();
            }
        }
    }

    entries
}

/// Format seconds as an SRT timestamp, `HH:MM:SS,mmm` (truncated, not rounded)
pub fn format_srt_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    // Nudge before truncating so 1.2s stays 1200ms rather than 1199ms
    let total_millis = (seconds * 1000.0 + 1e-6).floor() as u64;
    let whole = total_millis / 1000;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        whole / 3600,
        (whole % 3600) / 60,
        whole % 60,
        total_millis % 1000
    )
}

/// Render cues as SRT text
pub fn to_srt(entries: &[SubtitleEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\n{} --> {}\n{}\n",
                entry.index,
                format_srt_timestamp(entry.start_time),
                format_srt_timestamp(entry.end_time),
                entry.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TranscriptToken;

    const SAMPLE: &str = "1\n00:00:01,000 --> 00:00:04,000\nHello world\n\n2\n00:00:05,500 --> 00:00:08,250\nSecond line\nwith a wrap\n";

    fn token(start: f64, end: f64, text: &str) -> TranscriptToken {
        TranscriptToken {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_parse_srt_basic() {
        let entries = parse_srt(SAMPLE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[0].start_time, 1.0);
        assert_eq!(entries[0].end_time, 4.0);
        assert_eq!(entries[0].text, "Hello world");
        assert_eq!(entries[1].start_time, 5.5);
        assert_eq!(entries[1].end_time, 8.25);
        assert_eq!(entries[1].text, "Second line\nwith a wrap");
    }

    #[test]
    fn test_parse_srt_crlf() {
        let entries = parse_srt(&SAMPLE.replace('\n', "\r\n"));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].text, "Second line\nwith a wrap");
    }

    #[test]
    fn test_parse_srt_ignores_position_coordinates() {
        let entries =
            parse_srt("1\n00:00:01,000 --> 00:00:04,000 X1:100 X2:200 Y1:10 Y2:20\nHello\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].start_time, 1.0);
        assert_eq!(entries[0].end_time, 4.0);
        assert_eq!(entries[0].text, "Hello");

        let entries = parse_srt("7\n00:00:02,000-->00:00:03,500\nTight arrow\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].end_time, 3.5);
    }

    #[test]
    fn test_parse_srt_skips_malformed_blocks() {
        let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\nnot a timing line\ntext\n\n3\n00:00:03,000 --> 00:00:04,000\nkept";
        let entries = parse_srt(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].index, 3);
        assert_eq!(entries[0].text, "kept");
    }

    #[test]
    fn test_parse_srt_empty() {
        assert!(parse_srt("").is_empty());
        assert!(parse_srt("\n\n\n").is_empty());
    }

    #[test]
    fn test_group_segments_splits_sentences() {
        let segments = vec![TranscriptSegment {
            start: 0.0,
            end: 6.0,
            text: "Hello there. How are you? Fine".to_string(),
            tokens: vec![
                token(0.0, 0.5, "Hello"),
                token(0.5, 1.0, "there."),
                token(1.2, 1.5, "How"),
                token(1.5, 1.8, "are"),
                token(1.8, 2.4, "you?"),
                token(3.0, 3.6, "Fine"),
            ],
        }];

        let entries = group_segments(&segments);
        let cues: Vec<(u32, f64, f64, &str)> = entries
            .iter()
            .map(|e| (e.index, e.start_time, e.end_time, e.text.as_str()))
            .collect();
        assert_eq!(
            cues,
            vec![
                (1, 0.0, 1.0, "Hello there."),
                (2, 1.2, 2.4, "How are you?"),
                (3, 3.0, 3.6, "Fine"),
            ]
        );
    }

    #[test]
    fn test_group_segments_without_tokens_keeps_segment() {
        let segments = vec![
            TranscriptSegment {
                start: 1.0,
                end: 2.0,
                text: "  plain segment  ".to_string(),
                tokens: vec![],
            },
            TranscriptSegment {
                start: 2.0,
                end: 3.0,
                text: "Wow!!".to_string(),
                tokens: vec![token(2.0, 2.5, "Wow!!"), token(2.5, 3.0, "  ")],
            },
        ];

        let entries = group_segments(&segments);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[0].text, "plain segment");
        assert_eq!(entries[1].index, 2);
        assert_eq!(entries[1].text, "Wow!!");
        assert_eq!(entries[1].end_time, 2.5);
    }

    #[test]
    fn test_format_srt_timestamp() {
        assert_eq!(format_srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(3661.5), "01:01:01,500");
        assert_eq!(format_srt_timestamp(59.25), "00:00:59,250");
        assert_eq!(format_srt_timestamp(1.2), "00:00:01,200");
        assert_eq!(format_srt_timestamp(2.9999), "00:00:02,999");
        assert_eq!(format_srt_timestamp(-3.0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(f64::NAN), "00:00:00,000");
    }

    #[test]
    fn test_to_srt_reads_back() {
        let entries = parse_srt(SAMPLE);
        let text = to_srt(&entries);
        assert!(text.starts_with("1\n00:00:01,000 --> 00:00:04,000\nHello world\n\n2\n"));
        assert_eq!(parse_srt(&text), entries);
    }
}
