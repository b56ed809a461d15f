// Unit tests for domain models

use super::*;

#[test]
fn test_probe_metadata_new_formats_numbers() {
    let meta = ProbeMetadata::new(12.5, 2048);
    assert_eq!(meta.duration.as_deref(), Some("12.5"));
    assert_eq!(meta.size.as_deref(), Some("2048"));
}

#[test]
fn test_probe_outcome_accessors() {
    let ok = ProbeOutcome::Success {
        path: "a.mp4".to_string(),
        duration_seconds: 10.0,
        size_bytes: 1000,
    };
    assert!(ok.is_success());
    assert_eq!(ok.path(), "a.mp4");
    assert_eq!(ok.duration_seconds(), Some(10.0));
    assert_eq!(ok.size_bytes(), Some(1000));
    assert_eq!(ok.error(), None);

    let err = ProbeOutcome::Failure {
        path: "b.mp4".to_string(),
        error: "corrupt".to_string(),
    };
    assert!(!err.is_success());
    assert_eq!(err.path(), "b.mp4");
    assert_eq!(err.duration_seconds(), None);
    assert_eq!(err.error(), Some("corrupt"));
}

#[test]
fn test_probe_outcome_json_shape() {
    let err = ProbeOutcome::Failure {
        path: "b.mp4".to_string(),
        error: "corrupt".to_string(),
    };
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["status"], "failure");
    assert_eq!(json["path"], "b.mp4");
    assert_eq!(json["error"], "corrupt");
}

#[test]
fn test_probe_outcome_display() {
    let ok = ProbeOutcome::Success {
        path: "a.mp4".to_string(),
        duration_seconds: 1.5,
        size_bytes: 10,
    };
    assert_eq!(ok.to_string(), "a.mp4: 1.500s, 10 bytes");
}

#[test]
fn test_time_range_parse() {
    let range = TimeRange::parse("0:10-1:02:03").unwrap();
    assert_eq!(range.start, "0:10");
    assert_eq!(range.end, "1:02:03");
    assert_eq!(range.to_string(), "0:10-1:02:03");

    assert!(TimeRange::parse("0:10").is_none());
    assert!(TimeRange::parse("-0:10").is_none());
    assert!(TimeRange::parse("0:10-").is_none());
}

#[test]
fn test_video_file_skips_missing_subtitle() {
    let file = VideoFile {
        name: "a.mp4".to_string(),
        path: "/v/a.mp4".to_string(),
        duration: "1:00".to_string(),
        size: "1.0 KB".to_string(),
        subtitle_path: None,
    };
    let json = serde_json::to_string(&file).unwrap();
    assert!(!json.contains("subtitle_path"));
}

#[test]
fn test_prompt_settings_camel_case() {
    let json = serde_json::to_value(PromptSettings::default()).unwrap();
    assert!(json.get("contentCriteria").is_some());
    assert!(json.get("priorityGuidelines").is_some());
}

#[test]
fn test_prompt_settings_default_guidelines_include_examples() {
    let guidelines = PromptSettings::default().priority_guidelines;
    assert!(guidelines.starts_with("Priority Guidelines:\n- HIGH:"));
    assert!(guidelines.contains("\n\nExamples:\n"));
    assert!(guidelines.contains("\"She cast a spell on him\" → HIGH (sorcery)"));
    assert!(guidelines.ends_with("\"That monster looks scary\" → LOW (mild fright)"));
}

#[test]
fn test_edit_event_tagging() {
    let json = serde_json::to_value(EditEvent::Progress { percent: 42 }).unwrap();
    assert_eq!(json["event"], "progress");
    assert_eq!(json["percent"], 42);
}
