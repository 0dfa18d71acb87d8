//! Service calls run off the UI thread.
//!
//! Each request runs on its own worker thread and reports back through a
//! channel that the frame loop drains. Outcomes are applied in completion
//! order, so when two loads overlap the one that finishes last wins.

use slidedesk_core::service::{ExportedJson, SavedScreenshot, ServiceResult};
use slidedesk_core::{SlideDocument, SlideService};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

/// A finished service call.
#[derive(Debug)]
pub enum JobOutcome {
    Exported(ServiceResult<ExportedJson>),
    Loaded(ServiceResult<SlideDocument>),
    Screenshot(ServiceResult<SavedScreenshot>),
}

pub struct ServiceJobs<S: SlideService + 'static> {
    service: Arc<S>,
    tx: Sender<JobOutcome>,
    rx: Receiver<JobOutcome>,
    in_flight: usize,
}

impl<S: SlideService + 'static> ServiceJobs<S> {
    pub fn new(service: Arc<S>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            service,
            tx,
            rx,
            in_flight: 0,
        }
    }

    fn spawn<F>(&mut self, name: &str, work: F)
    where
        F: FnOnce(&S) -> JobOutcome + Send + 'static,
    {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("slidedesk-{name}"))
            .spawn(move || {
                let outcome = work(&service);
                // The receiver only goes away when the app is shutting down.
                let _ = tx.send(outcome);
            });
        match spawned {
            Ok(_) => self.in_flight += 1,
            Err(e) => log::error!("Failed to start {} job: {}", name, e),
        }
    }

    pub fn export_json(&mut self, document: SlideDocument) {
        self.spawn("export", move |service| {
            JobOutcome::Exported(pollster::block_on(service.export_json(document)))
        });
    }

    pub fn load_json(&mut self, json_string: String) {
        self.spawn("load", move |service| {
            JobOutcome::Loaded(pollster::block_on(service.load_json(json_string)))
        });
    }

    pub fn save_screenshot(&mut self, image_data: String) {
        self.spawn("screenshot", move |service| {
            JobOutcome::Screenshot(pollster::block_on(service.save_screenshot(image_data)))
        });
    }

    /// Take every outcome that has arrived since the last poll.
    pub fn poll(&mut self) -> Vec<JobOutcome> {
        let outcomes: Vec<JobOutcome> = self.rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(outcomes.len());
        outcomes
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    #[cfg(test)]
    pub fn wait(&mut self) -> Option<JobOutcome> {
        let outcome = self
            .rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidedesk_core::LocalService;
    use tempfile::tempdir;

    #[test]
    fn test_export_job_reports_back() {
        let dir = tempdir().unwrap();
        let mut jobs = ServiceJobs::new(Arc::new(LocalService::new(dir.path())));
        jobs.export_json(SlideDocument::default());
        assert!(jobs.is_busy());

        match jobs.wait() {
            Some(JobOutcome::Exported(Ok(exported))) => {
                assert!(exported.json_string.contains("\"type\": \"content\""));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!jobs.is_busy());
    }

    #[test]
    fn test_load_job_reports_error() {
        let dir = tempdir().unwrap();
        let mut jobs = ServiceJobs::new(Arc::new(LocalService::new(dir.path())));
        jobs.load_json("{not json".into());
        assert!(matches!(jobs.wait(), Some(JobOutcome::Loaded(Err(_)))));
    }

    #[test]
    fn test_poll_is_empty_without_jobs() {
        let dir = tempdir().unwrap();
        let mut jobs = ServiceJobs::new(Arc::new(LocalService::new(dir.path())));
        assert!(jobs.poll().is_empty());
        assert!(!jobs.is_busy());
    }
}
