use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::capture::domain::capture_sink::{CaptureSink, PhotoArtifact};
use crate::capture::domain::completion_sink::CompletionSink;
use crate::capture::infrastructure::capture_worker::{CaptureOutcome, CaptureWorker};
use crate::detection::domain::face_source::FaceSource;
use crate::feed::domain::frame_feed::FrameFeed;
use crate::sequencer::guided_sequencer::GuidedCaptureSequencer;
use crate::sequencer::pose_zone::PoseZone;
use crate::session::session_logger::SessionLogger;
use crate::shared::constants::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_SAMPLE_INTERVAL};
use crate::shared::frame::Frame;
use crate::shared::observation::FaceObservation;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Runtime knobs for a capture session.
pub struct SessionConfig {
    /// Evaluate every n-th frame; intermediate frames are skipped at the
    /// feed so detection never sees them.
    pub sample_interval: usize,
    pub channel_capacity: usize,
    /// Cooperative cancellation flag, shared with the caller.
    pub cancelled: Arc<AtomicBool>,
    /// Called after each evaluated frame with (captured, total) zone
    /// counts. Returning `false` cancels the session.
    pub on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            cancelled: Arc::new(AtomicBool::new(false)),
            on_progress: None,
        }
    }
}

/// What a session produced.
#[derive(Debug)]
pub struct CaptureReport {
    pub photos: Vec<PhotoArtifact>,
    pub frames_evaluated: usize,
    /// True when all five zones ended the session with a photo.
    pub completed: bool,
}

/// Runs the guided capture flow over a frame feed.
///
/// Layout: `feed → observe → main [evaluate/apply] → capture worker`
///
/// Detection and frame I/O run on their own threads; the capture worker
/// persists photos off the main loop so evaluation never stalls behind
/// storage.
pub struct CaptureSession {
    feed: Option<Box<dyn FrameFeed>>,
    source: Option<Box<dyn FaceSource>>,
    sink: Option<Box<dyn CaptureSink>>,
    completion: Box<dyn CompletionSink>,
    sequencer: GuidedCaptureSequencer,
    config: SessionConfig,
}

impl CaptureSession {
    pub fn new(
        feed: Box<dyn FrameFeed>,
        source: Box<dyn FaceSource>,
        sink: Box<dyn CaptureSink>,
        completion: Box<dyn CompletionSink>,
        sequencer: GuidedCaptureSequencer,
        config: SessionConfig,
    ) -> Self {
        Self {
            feed: Some(feed),
            source: Some(source),
            sink: Some(sink),
            completion,
            sequencer,
            config,
        }
    }

    /// Run the session to completion, feed exhaustion, or cancellation.
    /// Consumes the feed, source, and sink; calling `run` twice is an error.
    pub fn run(
        &mut self,
        logger: &mut dyn SessionLogger,
    ) -> Result<CaptureReport, Box<dyn std::error::Error>> {
        let feed = self.feed.take().ok_or("Session already executed")?;
        let source = self.source.take().ok_or("Session already executed")?;
        let sink = self.sink.take().ok_or("Session already executed")?;

        let metadata = feed.metadata();
        logger.info(&format!(
            "Starting capture session: {} frames at {}x{}",
            metadata.total_frames, metadata.width, metadata.height
        ));

        let cap = self.config.channel_capacity;
        let (frame_tx, frame_rx) = bounded::<Result<Frame, SendError>>(cap);
        let (observed_tx, observed_rx) =
            bounded::<Result<(usize, Vec<FaceObservation>), SendError>>(cap);

        let feed_handle = spawn_feed(
            feed,
            frame_tx,
            self.config.cancelled.clone(),
            self.config.sample_interval.max(1),
        );
        let observe_handle = spawn_observer(
            source,
            frame_rx,
            observed_tx,
            self.config.cancelled.clone(),
        );
        let worker = CaptureWorker::spawn(sink, cap);

        let mut photos: Vec<PhotoArtifact> = Vec::new();
        let mut frames_evaluated: usize = 0;
        let mut main_error: Option<Box<dyn std::error::Error>> = None;

        for observed in observed_rx {
            if self.config.cancelled.load(Ordering::Relaxed) {
                break;
            }

            let (index, faces) = match observed {
                Ok(pair) => pair,
                Err(e) => {
                    main_error = Some(e.to_string().into());
                    break;
                }
            };
            frames_evaluated += 1;

            let decision = self.sequencer.evaluate(&faces);
            log::trace!("frame {index}: {} faces, phase {:?}", faces.len(), decision.phase);

            for request in decision.requests {
                if let Err(reason) = worker.submit(request.zone) {
                    // Re-arm the zone; a later qualifying frame retries it.
                    self.sequencer
                        .apply_capture_result(request.zone, Err::<PathBuf, _>(reason));
                }
            }

            for outcome in worker.drain() {
                apply_outcome(&mut self.sequencer, &mut photos, outcome);
            }

            let captured = self.sequencer.progress().done_count();
            logger.progress(captured, PoseZone::COUNT);

            if let Some(ref callback) = self.config.on_progress {
                if !callback(captured, PoseZone::COUNT) {
                    self.config.cancelled.store(true, Ordering::Relaxed);
                    break;
                }
            }

            if self.sequencer.is_complete() {
                self.config.cancelled.store(true, Ordering::Relaxed);
                break;
            }
        }

        // Captures still in flight when the loop ended.
        for outcome in worker.shutdown() {
            apply_outcome(&mut self.sequencer, &mut photos, outcome);
        }

        join_threads(feed_handle, observe_handle, main_error)?;

        let completed = self.sequencer.is_complete();
        if completed {
            self.completion.session_complete(&photos);
        }

        logger.progress(self.sequencer.progress().done_count(), PoseZone::COUNT);
        logger.metric("frames_evaluated", frames_evaluated as f64);
        logger.metric("photos_captured", photos.len() as f64);
        logger.summary();

        Ok(CaptureReport {
            photos,
            frames_evaluated,
            completed,
        })
    }

    pub fn progress(&self) -> &crate::sequencer::progress::CaptureProgress {
        self.sequencer.progress()
    }
}

fn apply_outcome(
    sequencer: &mut GuidedCaptureSequencer,
    photos: &mut Vec<PhotoArtifact>,
    outcome: CaptureOutcome,
) {
    match outcome.result {
        Ok(artifact) => {
            sequencer.apply_capture_result::<SendError>(outcome.zone, Ok(artifact.path.clone()));
            photos.push(artifact);
        }
        Err(e) => sequencer.apply_capture_result(outcome.zone, Err::<PathBuf, _>(e)),
    }
}

fn spawn_feed(
    mut feed: Box<dyn FrameFeed>,
    frame_tx: Sender<Result<Frame, SendError>>,
    cancelled: Arc<AtomicBool>,
    sample_interval: usize,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for frame_result in feed.frames() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            // Feed errors always pass through; frames are sampled.
            if let Ok(frame) = &frame_result {
                if frame.index() % sample_interval != 0 {
                    continue;
                }
            }
            let mapped = frame_result.map_err(|e| -> SendError { e.to_string().into() });
            if frame_tx.send(mapped).is_err() {
                break;
            }
        }
    })
}

fn spawn_observer(
    mut source: Box<dyn FaceSource>,
    frame_rx: Receiver<Result<Frame, SendError>>,
    observed_tx: Sender<Result<(usize, Vec<FaceObservation>), SendError>>,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for frame_result in frame_rx {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }

            let result = match frame_result {
                Ok(frame) => match source.observe(&frame) {
                    Ok(faces) => Ok((frame.index(), faces)),
                    Err(e) => Err(e.to_string().into()),
                },
                Err(e) => Err(e),
            };

            if observed_tx.send(result).is_err() {
                break;
            }
        }
    })
}

/// Joins the feed and observer threads and coalesces the first error
/// encountered.
fn join_threads(
    feed_handle: std::thread::JoinHandle<()>,
    observe_handle: std::thread::JoinHandle<()>,
    mut first_error: Option<Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    fn set_if_none(slot: &mut Option<Box<dyn std::error::Error>>, err: Box<dyn std::error::Error>) {
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    if feed_handle.join().is_err() {
        set_if_none(&mut first_error, "Feed thread panicked".into());
    }
    if observe_handle.join().is_err() {
        set_if_none(&mut first_error, "Observer thread panicked".into());
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
