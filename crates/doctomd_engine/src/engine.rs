use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::api::{ConvertService, HttpConvertService, ServiceSettings};
use crate::progress::{ProgressTicker, TickerSettings};
use crate::{EngineEvent, UploadEntry};

/// Engine-wide configuration: service connection, progress simulation, and
/// where downloads land.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub service: ServiceSettings,
    pub ticker: TickerSettings,
    pub download_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_downloads(download_dir: PathBuf) -> Self {
        Self {
            service: ServiceSettings::default(),
            ticker: TickerSettings::default(),
            download_dir,
        }
    }
}

enum EngineCommand {
    CheckPandoc,
    Submit { entries: Vec<UploadEntry> },
    DownloadBundle { batch_id: String },
    DownloadFile { url: String, filename: String },
}

/// Handle to the engine worker thread. Commands go in over one channel,
/// events come back over another; clones share both ends.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let config = Arc::new(config);
            while let Ok(command) = cmd_rx.recv() {
                let config = config.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&config, command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn check_pandoc(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckPandoc);
    }

    pub fn submit(&self, entries: Vec<UploadEntry>) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { entries });
    }

    pub fn download_bundle(&self, batch_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::DownloadBundle {
            batch_id: batch_id.into(),
        });
    }

    pub fn download_file(&self, url: impl Into<String>, filename: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::DownloadFile {
            url: url.into(),
            filename: filename.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    config: &EngineConfig,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let service = match HttpConvertService::new(config.service.clone()) {
        Ok(service) => service,
        Err(err) => {
            log::error!("could not build http client: {err}");
            return;
        }
    };

    match command {
        EngineCommand::CheckPandoc => {
            let result = service.check_pandoc().await;
            let _ = event_tx.send(EngineEvent::CapabilityChecked { result });
        }
        EngineCommand::Submit { entries } => {
            // The ticker lives exactly as long as the request is
            // outstanding. Emitting ticks and the final event from one task
            // keeps them strictly ordered: no progress event can trail
            // UploadFinished.
            let mut ticker = ProgressTicker::new(&config.ticker);
            let upload = service.upload(&entries);
            tokio::pin!(upload);
            let result = loop {
                tokio::select! {
                    increment = ticker.step() => {
                        let _ = event_tx.send(EngineEvent::UploadProgress { increment });
                    }
                    result = &mut upload => break result,
                }
            };
            drop(ticker);
            let _ = event_tx.send(EngineEvent::UploadFinished { result });
        }
        EngineCommand::DownloadBundle { batch_id } => {
            let result = service
                .download_bundle(&batch_id, &config.download_dir)
                .await;
            let _ = event_tx.send(EngineEvent::BundleSaved { result });
        }
        EngineCommand::DownloadFile { url, filename } => {
            let result = service
                .download_file(&url, &filename, &config.download_dir)
                .await;
            let _ = event_tx.send(EngineEvent::FileSaved { result });
        }
    }
}
