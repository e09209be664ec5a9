use std::io;
use std::sync::Arc;
use std::sync::Mutex;

use cadence::WorkflowService;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_building_the_service_is_logged() {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let service = tracing::subscriber::with_default(subscriber, WorkflowService::new).unwrap();
    assert_eq!(service.registry().methods().count(), 3);

    let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert_eq!(logs.matches("registered method").count(), 3);
    assert!(logs.contains("SignalWorkflowExecution"), "{}", logs);
    assert!(logs.contains("service helpers ready"), "{}", logs);
    assert!(logs.contains("methods=3"), "{}", logs);
}
