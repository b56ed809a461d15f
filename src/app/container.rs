use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::adapters::{
    AppConfig, CommandTranscriber, FFmpegAdapter, FFprobeAdapter, JsonSettingsAdapter, TimeoutProbe,
};
use crate::app::{
    edit_interactor::EditInteractor, list_interactor::ListInteractor,
    transcribe_interactor::TranscribeInteractor,
};
use crate::error::{ReelcutError, ReelcutResult};
use crate::ports::{ExecutePort, ProbePort, SettingsPort, TranscribePort};
use crate::probe::ProbePool;

pub trait AppContainer: Send + Sync {
    fn probe_pool(&self) -> ProbePool;
    fn list_interactor(&self) -> Arc<ListInteractor>;
    fn edit_interactor(&self) -> Arc<EditInteractor>;
    fn settings(&self) -> Arc<dyn SettingsPort>;
    /// Fails when no transcriber program is configured
    fn transcribe_interactor(&self) -> ReelcutResult<Arc<TranscribeInteractor>>;
}

pub struct DefaultAppContainer {
    probe_pool: ProbePool,
    list_interactor: Arc<ListInteractor>,
    edit_interactor: Arc<EditInteractor>,
    settings: Arc<dyn SettingsPort>,
    transcribe_interactor: Option<Arc<TranscribeInteractor>>,
}

impl DefaultAppContainer {
    /// Wire the real adapters described by `config`
    pub fn new(config: &AppConfig) -> ReelcutResult<Self> {
        let ffprobe = FFprobeAdapter::new(&config.probe.ffprobe_bin);
        let probe_port: Arc<dyn ProbePort> = match config.probe.timeout_secs {
            Some(secs) => Arc::new(TimeoutProbe::new(ffprobe, Duration::from_secs(secs))),
            None => Arc::new(ffprobe),
        };

        let execute_port: Arc<dyn ExecutePort> = Arc::new(FFmpegAdapter::new(
            &config.edit.ffmpeg_bin,
            &config.edit.video_codec,
            &config.edit.audio_codec,
        ));

        let settings_path = config
            .settings
            .path
            .clone()
            .unwrap_or_else(JsonSettingsAdapter::default_path);
        let settings: Arc<dyn SettingsPort> = Arc::new(JsonSettingsAdapter::new(settings_path));

        let container = Self::with_ports(
            probe_port,
            execute_port,
            settings,
            config.probe.max_concurrent,
        )?;

        Ok(match &config.transcribe.program {
            Some(program) => container.with_transcriber(Arc::new(CommandTranscriber::new(
                program,
                config.transcribe.args.clone(),
            ))),
            None => container,
        })
    }

    /// Wire the interactors around already-built ports
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        settings: Arc<dyn SettingsPort>,
        max_concurrent: Option<i64>,
    ) -> ReelcutResult<Self> {
        let probe_pool = match max_concurrent {
            Some(n) => ProbePool::with_concurrency(probe_port, n)?,
            None => ProbePool::new(probe_port),
        };
        debug!("Probe pool allows {} concurrent probes", probe_pool.max_concurrent());

        Ok(Self {
            list_interactor: Arc::new(ListInteractor::new(probe_pool.clone())),
            edit_interactor: Arc::new(EditInteractor::new(execute_port)),
            probe_pool,
            settings,
            transcribe_interactor: None,
        })
    }

    /// Enable transcription through `transcriber`
    pub fn with_transcriber(mut self, transcriber: Arc<dyn TranscribePort>) -> Self {
        self.transcribe_interactor = Some(Arc::new(TranscribeInteractor::new(transcriber)));
        self
    }
}

impl AppContainer for DefaultAppContainer {
    fn probe_pool(&self) -> ProbePool {
        self.probe_pool.clone()
    }

    fn list_interactor(&self) -> Arc<ListInteractor> {
        Arc::clone(&self.list_interactor)
    }

    fn edit_interactor(&self) -> Arc<EditInteractor> {
        Arc::clone(&self.edit_interactor)
    }

    fn settings(&self) -> Arc<dyn SettingsPort> {
        Arc::clone(&self.settings)
    }

    fn transcribe_interactor(&self) -> ReelcutResult<Arc<TranscribeInteractor>> {
        self.transcribe_interactor
            .clone()
            .ok_or_else(|| ReelcutError::ConfigError {
                message: "No transcriber configured; set transcribe.program or REELCUT_TRANSCRIBER"
                    .to_string(),
            })
    }
}
