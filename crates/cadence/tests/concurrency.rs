use std::sync::Arc;

use anyhow::Result;
use cadence::shared::*;
use cadence::ServiceError;
use cadence::WorkflowService;
use wirepack::Envelope;
use wirerpc::MethodResult;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Plays one call/reply exchange through bytes, as a client and server would.
fn exchange(service: &WorkflowService, seq_id: i32) -> Result<()> {
    let start = service.start_workflow_execution;
    let request = StartWorkflowExecutionRequest {
        domain: Some("samples".into()),
        workflow_id: Some(format!("wf-{}", seq_id)),
        request_id: Some(format!("req-{}", seq_id)),
        ..Default::default()
    };

    // Client side.
    let call = start.call(seq_id, &start.args((Some(request.clone()),)))?.to_bytes()?;

    // Server side.
    let call = Envelope::from_bytes(&call)?;
    let args = start.read_call(&call)?;
    let outcome = if seq_id % 3 == 0 {
        Err(ServiceError::from(ServiceBusyError { message: "busy".into(), reason: None }))
    } else {
        Ok(StartWorkflowExecutionResponse { run_id: args.start_request.and_then(|r| r.request_id) })
    };
    let result = start
        .wrap_response(outcome)
        .map_err(|e| anyhow::anyhow!("unclassified: {}", e))?;
    let reply = start.reply(call.seq_id, &result)?.to_bytes()?;

    // Client side again.
    let reply = Envelope::from_bytes(&reply)?;
    assert_eq!(reply.seq_id, seq_id);
    match start.unwrap_response(start.read_reply(&reply)?) {
        Ok(response) => assert_eq!(response.run_id, request.request_id),
        Err(err) => {
            assert_eq!(seq_id % 3, 0);
            assert_eq!(err.to_string(), "ServiceBusyError{Message: busy}");
        }
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_one_service_many_tasks() -> Result<()> {
    init_tracing();
    let service = Arc::new(WorkflowService::new()?);

    let mut handles = Vec::new();
    for task in 0..16 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            for i in 0..50 {
                exchange(&service, task * 100 + i)?;
                tokio::task::yield_now().await;
            }
            Ok::<_, anyhow::Error>(())
        }));
    }
    for handle in handles {
        handle.await??;
    }
    Ok(())
}

#[tokio::test]
async fn test_helpers_are_copied_into_tasks() -> Result<()> {
    init_tracing();
    let signal = WorkflowService::new()?.signal_workflow_execution;
    let handle = tokio::spawn(async move {
        let result = signal.wrap_response(Ok(()))?;
        Ok::<_, ServiceError>(result)
    });
    assert_eq!(handle.await??, MethodResult::Success(()));
    Ok(())
}
