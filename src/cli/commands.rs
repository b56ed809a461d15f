//! Command implementations

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::AppContainer;
use crate::cli::args::{
    EditArgs, ListArgs, OutputFormat, ProbeArgs, SettingsAction, SettingsArgs, SubtitlesArgs,
    TranscribeArgs,
};
use crate::domain::model::{EditEvent, ProbeOutcome, PromptSettings, SubtitleEntry, TimeRange, VideoFile};
use crate::utils::logging::ProgressReporter;
use crate::utils::{format_time, parse_srt};

/// Execute the probe command.
///
/// Files that cannot be probed are reported in the output; the command only
/// fails when the batch itself cannot run.
pub async fn probe(container: &dyn AppContainer, args: ProbeArgs) -> Result<()> {
    info!("Starting probe operation on {} files", args.paths.len());

    let outcomes = container
        .probe_pool()
        .run(&args.paths)
        .await
        .context("Failed to probe files")?;

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        warn!("{} of {} files could not be probed", failed, outcomes.len());
    }

    println!("{}", render_outcomes(&outcomes, args.format)?);
    Ok(())
}

/// Execute the list command; a file argument is described on its own
pub async fn list(container: &dyn AppContainer, args: ListArgs) -> Result<()> {
    info!("Listing videos in {}", args.folder.display());

    let interactor = container.list_interactor();
    let videos = if args.folder.is_file() {
        vec![interactor
            .describe(&args.folder)
            .await
            .with_context(|| format!("Failed to probe {}", args.folder.display()))?]
    } else {
        interactor
            .list(&args.folder)
            .await
            .with_context(|| format!("Failed to list {}", args.folder.display()))?
    };

    if args.json {
        let json = serde_json::to_string_pretty(&videos)
            .context("Failed to serialize video list to JSON")?;
        println!("{}", json);
    } else {
        display_videos(&videos);
    }
    Ok(())
}

/// Execute the edit command
pub async fn edit(container: &dyn AppContainer, args: EditArgs) -> Result<()> {
    let ranges = args
        .ranges
        .iter()
        .map(|text| {
            TimeRange::parse(text)
                .with_context(|| format!("Invalid range '{}', expected START-END", text))
        })
        .collect::<Result<Vec<_>>>()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let operation = format!("edit {}", args.input.display());
    let printer = tokio::spawn(async move {
        let mut reporter = ProgressReporter::start(operation);
        let mut success = false;
        while let Some(event) = rx.recv().await {
            match event {
                EditEvent::Progress { percent } => {
                    if let Some(line) = reporter.update(percent) {
                        eprintln!("{}", line);
                    }
                }
                EditEvent::Complete { .. } => success = true,
                EditEvent::Failed { .. } => success = false,
            }
        }
        reporter.finish(success);
    });

    let result = container
        .edit_interactor()
        .edit(&args.input, &ranges, Some(tx))
        .await;
    printer.await.context("Progress printer stopped unexpectedly")?;

    let output = result.context("Failed to edit video")?;
    println!("{}", output.display());
    Ok(())
}

/// Execute the subtitles command
pub async fn subtitles(args: SubtitlesArgs) -> Result<()> {
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let entries = parse_srt(&content);
    info!("Parsed {} subtitle entries", entries.len());

    if args.json {
        let json = serde_json::to_string_pretty(&entries)
            .context("Failed to serialize subtitles to JSON")?;
        println!("{}", json);
    } else {
        display_subtitles(&entries);
    }
    Ok(())
}

/// Execute the transcribe command
pub async fn transcribe(container: &dyn AppContainer, args: TranscribeArgs) -> Result<()> {
    info!("Transcribing {}", args.video.display());

    let transcription = container
        .transcribe_interactor()?
        .transcribe(&args.video)
        .await
        .with_context(|| format!("Failed to transcribe {}", args.video.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&transcription)
            .context("Failed to serialize transcription to JSON")?;
        println!("{}", json);
    } else {
        println!("{}", transcription.srt_path.display());
    }
    Ok(())
}

/// Execute the settings command
pub async fn settings(container: &dyn AppContainer, args: SettingsArgs) -> Result<()> {
    let store = container.settings();

    let settings = match args.action {
        SettingsAction::Show => store.load().await,
        SettingsAction::Reset => {
            let defaults = PromptSettings::default();
            store.save(&defaults).await.context("Failed to reset settings")?;
            defaults
        }
        SettingsAction::Set {
            content_criteria,
            priority_guidelines,
        } => {
            if content_criteria.is_none() && priority_guidelines.is_none() {
                anyhow::bail!("Nothing to set: pass --content-criteria or --priority-guidelines");
            }
            let mut settings = store.load().await;
            if let Some(criteria) = content_criteria {
                settings.content_criteria = criteria;
            }
            if let Some(guidelines) = priority_guidelines {
                settings.priority_guidelines = guidelines;
            }
            store.save(&settings).await.context("Failed to save settings")?;
            settings
        }
    };

    let json = serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?;
    println!("{}", json);
    Ok(())
}

/// Render probe outcomes in the requested format
pub fn render_outcomes(outcomes: &[ProbeOutcome], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => outcomes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(outcomes)
            .context("Failed to serialize probe results to JSON")?,
        OutputFormat::Yaml => serde_yaml::to_string(outcomes)
            .context("Failed to serialize probe results to YAML")?,
    })
}

fn display_videos(videos: &[VideoFile]) {
    if videos.is_empty() {
        println!("No videos found");
        return;
    }

    let width = videos.iter().map(|v| v.name.len()).max().unwrap_or(0);
    for video in videos {
        let marker = if video.subtitle_path.is_some() { "  [srt]" } else { "" };
        println!(
            "{:<width$}  {:>9}  {:>10}{}",
            video.name,
            video.duration,
            video.size,
            marker,
            width = width
        );
    }
}

fn display_subtitles(entries: &[SubtitleEntry]) {
    let last = entries.iter().map(|e| e.end_time).fold(0.0, f64::max);
    for entry in entries {
        println!(
            "{:>4}  {} --> {}  {}",
            entry.index,
            format_time(entry.start_time, Some(last)),
            format_time(entry.end_time, Some(last)),
            entry.text.replace('\n', " / ")
        );
    }
}
