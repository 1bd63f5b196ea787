//! Run orchestration.
//!
//! Loads the input and runs the synchronous analysis on tokio's blocking
//! pool, so a one-second ticker keeps reporting elapsed time while the
//! work is in flight. A shutdown future (Ctrl-C in the binary) abandons
//! the run.

use std::future::Future;
use std::time::Duration;

use log::{debug, info};
use tokio::runtime::Runtime;
use tokio::task::{spawn_blocking, JoinError};
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::analysis::analyze;
use crate::console::progress::{Phase, ProgressCallback, ProgressEvent};
use crate::errors::SeqStatError;
use crate::ingest::{self, IngestError, InputSource};
use crate::results::AnalysisReport;

/// How often the elapsed-time tick is emitted.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Run an analysis, stopping early on Ctrl-C.
pub async fn run(
    source: InputSource,
    progress: &dyn ProgressCallback,
) -> Result<AnalysisReport, SeqStatError> {
    let ctrl_c = async {
        // If the handler cannot be installed, never resolve.
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    run_until(source, progress, ctrl_c).await
}

/// Run an analysis, abandoning it if `shutdown` resolves first.
pub async fn run_until<F>(
    source: InputSource,
    progress: &dyn ProgressCallback,
    shutdown: F,
) -> Result<AnalysisReport, SeqStatError>
where
    F: Future<Output = ()>,
{
    let label = source.to_string();
    run_with_loader(label, move || ingest::load(&source), progress, shutdown)
        .await
}

/// Core of [`run_until`], with the input read by `load` on the blocking
/// pool. `label` names the input in logs and in the report.
async fn run_with_loader<L, F>(
    label: String,
    load: L,
    progress: &dyn ProgressCallback,
    shutdown: F,
) -> Result<AnalysisReport, SeqStatError>
where
    L: FnOnce() -> Result<Vec<i64>, IngestError> + Send + 'static,
    F: Future<Output = ()>,
{
    let started = Instant::now();

    let work = async {
        progress.on_progress(ProgressEvent::PhaseChange(Phase::Loading));
        let numbers = spawn_blocking(load).await.map_err(task_failed)??;

        let count = numbers.len();
        progress.on_progress(ProgressEvent::Loaded { count });
        progress.on_progress(ProgressEvent::PhaseChange(Phase::Analyzing));
        debug!("Starting analysis of {} values", count);

        // The blocking task owns the sequence; analysis only borrows it.
        let statistics = spawn_blocking(move || analyze(&numbers))
            .await
            .map_err(task_failed)??;

        Ok::<_, SeqStatError>((count, statistics))
    };

    tokio::pin!(work);
    tokio::pin!(shutdown);

    let mut ticker = interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let outcome = loop {
        tokio::select! {
            biased;

            outcome = &mut work => break outcome,
            _ = &mut shutdown => break Err(SeqStatError::cancelled()),
            _ = ticker.tick() => {
                progress.on_progress(ProgressEvent::Tick {
                    elapsed: started.elapsed(),
                });
            }
        }
    };

    let elapsed = started.elapsed();
    match outcome {
        Ok((count, statistics)) => {
            progress.on_progress(ProgressEvent::Finished { elapsed });
            info!("Analyzed {} values from {} in {:?}", count, label, elapsed);
            Ok(AnalysisReport::new(label, count, elapsed, statistics))
        }
        Err(error) => {
            progress.on_progress(ProgressEvent::Failed(error.message.clone()));
            Err(error)
        }
    }
}

/// Drive `future` on `runtime`, then shut the runtime down without
/// joining blocking tasks still in flight.
///
/// A cancelled run can leave a thread parked in a read (e.g. stdin with
/// no writer) or inside a long analysis; dropping the runtime normally
/// would wait for it.
pub fn block_on_detached<F: Future>(
    runtime: Runtime,
    future: F,
) -> F::Output {
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    output
}

fn task_failed(error: JoinError) -> SeqStatError {
    SeqStatError::unknown("Background task failed").with_source(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{mpsc, Mutex};
    use std::thread;

    /// Records every event it receives.
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn on_progress(&self, event: ProgressEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn write_input(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("seqstat-{}-{}.txt", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_run_reports_statistics() {
        let path = write_input("sample", "5\n3\n8\n1\n9\n2\n");
        let progress = RecordingProgress::default();

        let report = run_until(
            InputSource::File(path.clone()),
            &progress,
            std::future::pending(),
        )
        .await
        .unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(report.count, 6);
        assert_eq!(report.source, path.display().to_string());
        assert_eq!(report.statistics.median(), 4.0);
        assert_eq!(report.statistics.longest_increasing(), &[3, 8]);

        let events = progress.events.lock().unwrap();
        assert!(matches!(
            events.first(),
            Some(ProgressEvent::PhaseChange(Phase::Loading))
        ));
        assert!(events
            .iter()
            .any(|e| matches!(e, ProgressEvent::Loaded { count: 6 })));
        assert!(matches!(
            events.last(),
            Some(ProgressEvent::Finished { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_empty_input_is_error() {
        let path = write_input("empty", "\n   \n");
        let progress = RecordingProgress::default();

        let source = InputSource::File(path.clone());
        let error = run_until(source, &progress, std::future::pending())
            .await
            .unwrap_err();
        let _ = fs::remove_file(&path);

        assert_eq!(error.kind, ErrorKind::EmptyInput);
        let events = progress.events.lock().unwrap();
        assert!(matches!(events.last(), Some(ProgressEvent::Failed(_))));
    }

    #[tokio::test]
    async fn test_run_malformed_input_is_error() {
        let path = write_input("malformed", "1\n2\nx\n");
        let progress = RecordingProgress::default();

        let source = InputSource::File(path.clone());
        let error = run_until(source, &progress, std::future::pending())
            .await
            .unwrap_err();
        let _ = fs::remove_file(&path);

        assert_eq!(error.kind, ErrorKind::MalformedInput);
        assert!(error.message.contains("line 3"));
    }

    #[tokio::test]
    async fn test_run_missing_file_is_input_error() {
        let progress = RecordingProgress::default();
        let source = InputSource::File(PathBuf::from(
            "/nonexistent/seqstat/missing.txt",
        ));

        let error = run_until(source, &progress, std::future::pending())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Input);
    }

    /// A loader that blocks until `open` is sent to or dropped.
    fn gated_loader(
        values: Vec<i64>,
    ) -> (
        mpsc::Sender<()>,
        impl FnOnce() -> Result<Vec<i64>, IngestError> + Send + 'static,
    ) {
        let (open, gate) = mpsc::channel::<()>();
        let load = move || {
            let _ = gate.recv();
            Ok(values)
        };
        (open, load)
    }

    #[tokio::test]
    async fn test_run_cancelled_while_loading() {
        let progress = RecordingProgress::default();
        let (open, load) = gated_loader(vec![1, 2, 3]);

        let error =
            run_with_loader("gated".to_string(), load, &progress, async {})
                .await
                .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Cancelled);
        {
            let events = progress.events.lock().unwrap();
            assert!(!events
                .iter()
                .any(|e| matches!(e, ProgressEvent::Loaded { .. })));
            assert!(matches!(events.last(), Some(ProgressEvent::Failed(_))));
        }

        // Release the parked loader so the test runtime can shut down.
        drop(open);
    }

    #[tokio::test]
    async fn test_run_gated_loader_completes_when_opened() {
        let progress = RecordingProgress::default();
        let (open, load) = gated_loader(vec![5, 3, 8, 1, 9, 2]);
        open.send(()).unwrap();

        let report = run_with_loader(
            "gated".to_string(),
            load,
            &progress,
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(report.source, "gated");
        assert_eq!(report.count, 6);
        assert_eq!(report.statistics.median(), 4.0);
    }

    #[test]
    fn test_cancelled_run_does_not_wait_for_blocked_loader() {
        let (done_tx, done_rx) = mpsc::channel();
        // Kept alive past the deadline so the loader stays parked.
        let (open, load) = gated_loader(vec![1, 2, 3]);

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap();
            let progress = RecordingProgress::default();
            let outcome = block_on_detached(
                runtime,
                run_with_loader("gated".to_string(), load, &progress, async {}),
            );
            let _ = done_tx.send(outcome.map(|report| report.count));
        });

        let outcome = done_rx
            .recv_timeout(Duration::from_secs(3))
            .expect("runtime shutdown waited on the blocked loader");
        assert_eq!(outcome.unwrap_err().kind, ErrorKind::Cancelled);

        drop(open);
    }
}
