use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::{client_error, client_info, client_warn};
use doctomd_core::{ConversionOutcome, ConversionResult, Effect, Msg, SelectedFile};
use doctomd_engine::{EngineConfig, EngineEvent, EngineHandle, FileResult, UploadEntry};

use crate::render;

/// Pause between the 100% snap and the results panel.
const REVEAL_DELAY: Duration = Duration::from_millis(500);

/// Executes core effects against the engine and feeds engine events back
/// into the session loop as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>) -> Self {
        let download_dir = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("downloads");
        if let Err(err) = std::fs::create_dir_all(&download_dir) {
            client_warn!("could not create {}: {err}", download_dir.display());
        }

        let engine = EngineHandle::new(EngineConfig::default_with_downloads(download_dir));
        let runner = Self {
            engine,
            msg_tx: msg_tx.clone(),
        };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ProbeCapability => self.engine.check_pandoc(),
                Effect::SubmitBatch { files } => {
                    client_info!("submitting batch of {} files", files.len());
                    self.engine
                        .submit(files.into_iter().map(to_upload_entry).collect());
                }
                Effect::ScheduleResultsReveal => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(REVEAL_DELAY);
                        let _ = msg_tx.send(Msg::RevealDelayElapsed);
                    });
                }
                Effect::OpenBundleDownload { batch_id } => {
                    client_info!("downloading bundle for batch {batch_id}");
                    self.engine.download_bundle(batch_id);
                }
                Effect::DownloadFile { url, filename } => {
                    self.engine.download_file(url, filename);
                }
                Effect::ShowNotice { message } => {
                    println!("{}", render::notice(&message));
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                match event {
                    EngineEvent::CapabilityChecked { result } => match result {
                        Ok(status) => {
                            let _ = msg_tx.send(Msg::CapabilityProbed {
                                installed: status.pandoc_installed,
                                message: status.message,
                            });
                        }
                        // Silent degradation: an unreachable probe is not a
                        // confirmed-missing engine.
                        Err(err) => client_error!("capability check failed: {err}"),
                    },
                    EngineEvent::UploadProgress { increment } => {
                        let _ = msg_tx.send(Msg::ProgressTicked { increment });
                    }
                    EngineEvent::UploadFinished { result } => {
                        let msg = match result {
                            Ok(batch) => Msg::UploadSucceeded {
                                batch_id: batch.id,
                                results: batch.files.into_iter().map(to_result).collect(),
                            },
                            Err(err) => {
                                client_warn!("upload failed: {err}");
                                Msg::UploadFailed {
                                    message: err.to_string(),
                                }
                            }
                        };
                        let _ = msg_tx.send(msg);
                    }
                    EngineEvent::BundleSaved { result } => match result {
                        Ok(path) => {
                            client_info!("bundle saved to {}", path.display());
                            println!("{}", render::notice(&format!("Saved {}", path.display())));
                        }
                        Err(err) => {
                            client_warn!("bundle download failed: {err}");
                            println!("{}", render::notice(&format!("Download failed: {err}")));
                        }
                    },
                    EngineEvent::FileSaved { result } => match result {
                        Ok(path) => {
                            client_info!("file saved to {}", path.display());
                            println!("{}", render::notice(&format!("Saved {}", path.display())));
                        }
                        Err(err) => {
                            client_warn!("file download failed: {err}");
                            println!("{}", render::notice(&format!("Download failed: {err}")));
                        }
                    },
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn to_upload_entry(file: SelectedFile) -> UploadEntry {
    UploadEntry {
        filename: file.name,
        path: file.path,
    }
}

fn to_result(file: FileResult) -> ConversionResult {
    let converted = file.is_converted();
    let outcome = match (converted, file.markdown_filename, file.download_url) {
        (true, Some(markdown_filename), Some(download_url)) => ConversionOutcome::Converted {
            markdown_filename,
            download_url,
        },
        (true, _, _) => {
            client_warn!(
                "converted row for {} is missing its download fields",
                file.original_filename
            );
            ConversionOutcome::Failed { error_message: None }
        }
        (false, _, _) => ConversionOutcome::Failed {
            error_message: file.error_message,
        },
    };
    ConversionResult {
        original_filename: file.original_filename,
        outcome,
    }
}
