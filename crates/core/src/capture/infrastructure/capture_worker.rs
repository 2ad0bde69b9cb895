use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::capture::domain::capture_sink::{CaptureSink, PhotoArtifact};
use crate::sequencer::pose_zone::PoseZone;

pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub struct CaptureJob {
    pub zone: PoseZone,
}

/// Outcome of one capture job, reported back to the session loop.
#[derive(Debug)]
pub struct CaptureOutcome {
    pub zone: PoseZone,
    pub result: Result<PhotoArtifact, SinkError>,
}

/// Runs the capture sink on its own thread so slow photo persistence never
/// stalls frame evaluation. Jobs go in over a bounded channel; outcomes
/// come back the same way.
pub struct CaptureWorker {
    job_tx: Option<Sender<CaptureJob>>,
    outcome_rx: Receiver<CaptureOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl CaptureWorker {
    pub fn spawn(mut sink: Box<dyn CaptureSink>, capacity: usize) -> Self {
        let (job_tx, job_rx) = bounded::<CaptureJob>(capacity);
        let (outcome_tx, outcome_rx) = bounded::<CaptureOutcome>(capacity);

        let handle = std::thread::spawn(move || {
            for job in job_rx {
                let result = sink.capture(job.zone);
                let outcome = CaptureOutcome {
                    zone: job.zone,
                    result,
                };
                // Receiver gone means the session is shutting down.
                if outcome_tx.send(outcome).is_err() {
                    break;
                }
            }
        });

        Self {
            job_tx: Some(job_tx),
            outcome_rx,
            handle: Some(handle),
        }
    }

    /// Queue a capture without blocking. A full queue or a dead worker is
    /// reported so the caller can re-arm the zone.
    pub fn submit(&self, zone: PoseZone) -> Result<(), &'static str> {
        let Some(tx) = &self.job_tx else {
            return Err("capture worker already shut down");
        };
        match tx.try_send(CaptureJob { zone }) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err("capture queue full"),
            Err(TrySendError::Disconnected(_)) => Err("capture worker stopped"),
        }
    }

    /// Collect every outcome ready right now, without blocking.
    pub fn drain(&self) -> Vec<CaptureOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Stop accepting jobs, wait for in-flight captures, and return their
    /// outcomes.
    pub fn shutdown(mut self) -> Vec<CaptureOutcome> {
        drop(self.job_tx.take());
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.outcome_rx.recv() {
            outcomes.push(outcome);
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        outcomes
    }
}

impl Drop for CaptureWorker {
    fn drop(&mut self) {
        drop(self.job_tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
