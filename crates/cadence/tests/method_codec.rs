use std::sync::Arc;

use anyhow::Result;
use cadence::shared::*;
use cadence::workflow_service::*;
use cadence::ServiceError;
use cadence::WorkflowService;
use wirepack::Envelope;
use wirepack::EnvelopeType;
use wirepack::Field;
use wirepack::Struct;
use wirepack::Type;
use wirepack::Value;
use wirerpc::ArgsStruct;
use wirerpc::FromWire;
use wirerpc::MethodResult;
use wirerpc::ServiceException;
use wirerpc::ToWire;

fn service() -> WorkflowService {
    WorkflowService::new().unwrap()
}

fn request() -> ListClosedWorkflowExecutionsRequest {
    ListClosedWorkflowExecutionsRequest {
        domain: Some("samples".into()),
        maximum_page_size: Some(50),
        start_time_filter: Some(StartTimeFilter {
            earliest_time: Some(1_600_000_000_000),
            latest_time: Some(1_700_000_000_000),
        }),
        type_filter: Some(WorkflowTypeFilter { name: Some("OrderWorkflow".into()) }),
        ..Default::default()
    }
}

fn response() -> ListClosedWorkflowExecutionsResponse {
    ListClosedWorkflowExecutionsResponse {
        executions: Some(vec![WorkflowExecutionInfo {
            execution: Some(WorkflowExecution {
                workflow_id: Some("order-1".into()),
                run_id: Some("run-1".into()),
            }),
            close_status: Some(WorkflowExecutionCloseStatus::Completed),
            ..Default::default()
        }]),
        next_page_token: None,
    }
}

fn strukt(fields: Vec<(u16, Value)>) -> Value {
    let fields = fields.into_iter().map(|(id, v)| Field::new(id, v)).collect();
    Value::Struct(Struct::new(fields).unwrap())
}

// ============================================================================
//  ARGS
// ============================================================================

#[test]
fn test_args_through_bytes() -> Result<()> {
    let list = service().list_closed_workflow_executions;
    let args = list.args((Some(request()),));
    assert_eq!(args.method_name(), "ListClosedWorkflowExecutions");
    assert_eq!(args.envelope_type(), EnvelopeType::Call);

    let value = args.to_wire()?;
    let fields = value.as_struct()?.fields();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].id, 1);
    assert_eq!(fields[0].value.ty(), Type::Struct);

    let bytes = wirepack::encode(&value)?;
    let decoded = ListClosedWorkflowExecutionsArgs::from_wire(&wirepack::decode(&bytes, Type::Struct)?)?;
    assert_eq!(decoded, args);
    Ok(())
}

#[test]
fn test_absent_args_stay_absent() -> Result<()> {
    let list = service().list_closed_workflow_executions;
    let args = list.args((None,));
    assert_eq!(args.to_wire()?, Value::Struct(Struct::empty()));
    assert_eq!(list.decode_args(&Value::Struct(Struct::empty()))?, args);
    Ok(())
}

#[test]
fn test_unknown_fields_are_ignored() -> Result<()> {
    let list = service().list_closed_workflow_executions;
    let mut fields = list.args((Some(request()),)).to_wire()?.as_struct()?.fields().to_vec();
    fields.push(Field::new(99, Value::Binary(b"from a newer client".to_vec())));
    let value = Value::Struct(Struct::new(fields)?);

    let args = list.decode_args(&value)?;
    assert_eq!(args.list_request, Some(request()));
    Ok(())
}

#[test]
fn test_err_args_of_wrong_shape() {
    let list = service().list_closed_workflow_executions;
    let err = list.decode_args(&Value::I64(1)).unwrap_err();
    assert_eq!(err.to_string(), "cannot extract struct from value of type i64");
}

// ============================================================================
//  RESULTS
// ============================================================================

#[test]
fn test_success_roundtrip() -> Result<()> {
    let list = service().list_closed_workflow_executions;
    let result = list.wrap_response(Ok(response())).unwrap();
    assert_eq!(result.method_name(), "ListClosedWorkflowExecutions");
    assert_eq!(result.envelope_type(), EnvelopeType::Reply);

    let value = list.encode_result(&result)?;
    assert_eq!(value.as_struct()?.len(), 1);
    assert!(value.as_struct()?.get(0).is_some());
    assert_eq!(list.unwrap_wire(&value)?, Ok(response()));
    Ok(())
}

#[test]
fn test_every_declared_exception_has_its_slot() -> Result<()> {
    let list = service().list_closed_workflow_executions;
    let cases: Vec<(u16, ServiceError)> = vec![
        (1, BadRequestError { message: "bad".into() }.into()),
        (2, InternalServiceError { message: "oops".into() }.into()),
        (3, EntityNotExistsError { message: "gone".into(), ..Default::default() }.into()),
        (4, ServiceBusyError { message: "busy".into(), reason: None }.into()),
        (
            5,
            ClientVersionNotSupportedError {
                feature_version: "1.5.0".into(),
                client_impl: "uber-go".into(),
                supported_versions: ">=1.6.0".into(),
            }
            .into(),
        ),
    ];
    for (id, err) in cases {
        assert!(list.is_exception(&err));
        let result = list.wrap_response(Err(err.clone())).unwrap();
        let value = list.encode_result(&result)?;
        let ids: Vec<u16> = value.as_struct()?.fields().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![id]);
        assert_eq!(list.unwrap_wire(&value)?, Err(err));
    }
    Ok(())
}

#[test]
fn test_undeclared_exception_passes_through() {
    let list = service().list_closed_workflow_executions;
    let err: ServiceError = LimitExceededError { message: "too many".into() }.into();
    assert!(!list.is_exception(&err));
    assert_eq!(list.wrap_response(Err(err.clone())), Err(err));
}

#[test]
fn test_unrelated_error_is_the_same_error() {
    let list = service().list_closed_workflow_executions;
    let err = ServiceError::other(std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline"));
    let ServiceError::Other(original) = &err else { unreachable!() };
    let original = Arc::clone(original);

    match list.wrap_response(Err(err)) {
        Err(ServiceError::Other(returned)) => assert!(Arc::ptr_eq(&returned, &original)),
        other => panic!("Expected the unrelated error back, got {:?}", other),
    }
}

#[test]
fn test_result_ignores_unknown_slots() -> Result<()> {
    let list = service().list_closed_workflow_executions;
    let value = strukt(vec![
        (0, response().to_wire()?),
        (42, ServiceBusyError { message: "from a newer server".into(), reason: None }.to_wire()?),
    ]);
    assert_eq!(list.unwrap_wire(&value)?, Ok(response()));

    let err: ServiceError = InternalServiceError { message: "oops".into() }.into();
    let value = strukt(vec![(99, Value::I32(1)), (2, err.encode_exception()?)]);
    assert_eq!(list.unwrap_wire(&value)?, Err(err));
    Ok(())
}

#[test]
fn test_err_two_populated_slots() {
    let list = service().list_closed_workflow_executions;
    let value = strukt(vec![
        (0, response().to_wire().unwrap()),
        (1, BadRequestError { message: "bad".into() }.to_wire().unwrap()),
    ]);
    let err = list.decode_result(&value).unwrap_err();
    assert_eq!(err, wirerpc::Error::ResultArity { method: "ListClosedWorkflowExecutions", count: 2 });
    assert_eq!(
        err.to_string(),
        "ListClosedWorkflowExecutions result should have exactly one field: got 2 fields"
    );
}

#[test]
fn test_err_empty_result() {
    let list = service().list_closed_workflow_executions;
    let err = list.unwrap_wire(&Value::Struct(Struct::empty())).unwrap_err();
    assert_eq!(err, wirerpc::Error::EmptyResult { method: "ListClosedWorkflowExecutions" });
    assert!(err.to_string().starts_with("expected a non-void result"));
}

#[test]
fn test_mistyped_success_is_skipped() {
    let list = service().list_closed_workflow_executions;
    let value = strukt(vec![(0, Value::I32(1))]);
    assert_eq!(
        list.decode_result(&value),
        Err(wirerpc::Error::EmptyResult { method: "ListClosedWorkflowExecutions" })
    );
}

#[test]
fn test_start_workflow_exceptions() -> Result<()> {
    let start = service().start_workflow_execution;
    let err: ServiceError = WorkflowExecutionAlreadyStartedError {
        message: Some("already running".into()),
        start_request_id: Some("req-1".into()),
        run_id: Some("run-0".into()),
    }
    .into();
    let result = start.wrap_response(Err(err.clone())).unwrap();
    let value = start.encode_result(&result)?;
    assert!(value.as_struct()?.get(3).is_some());
    assert_eq!(start.unwrap_wire(&value)?, Err(err));

    let limit: ServiceError = LimitExceededError { message: "slow".into() }.into();
    assert!(start.is_exception(&limit));
    Ok(())
}

// ============================================================================
//  VOID METHODS
// ============================================================================

#[test]
fn test_void_success_is_an_empty_result() -> Result<()> {
    let signal = service().signal_workflow_execution;
    let result = signal.wrap_response(Ok(())).unwrap();
    let value = signal.encode_result(&result)?;
    assert_eq!(value, Value::Struct(Struct::empty()));
    assert_eq!(signal.unwrap_wire(&value)?, Ok(()));
    Ok(())
}

#[test]
fn test_void_exception() -> Result<()> {
    let signal = service().signal_workflow_execution;
    let err: ServiceError = EntityNotExistsError { message: "no such run".into(), ..Default::default() }.into();
    let value = signal.encode_result(&signal.wrap_response(Err(err.clone())).unwrap())?;
    assert_eq!(value.as_struct()?.fields()[0].id, 3);
    assert_eq!(signal.unwrap_wire(&value)?, Err(err));
    Ok(())
}

#[test]
fn test_err_void_with_two_exceptions() {
    let signal = service().signal_workflow_execution;
    let value = strukt(vec![
        (1, BadRequestError { message: "a".into() }.to_wire().unwrap()),
        (4, ServiceBusyError { message: "b".into(), reason: None }.to_wire().unwrap()),
    ]);
    assert_eq!(
        signal.decode_result(&value),
        Err(wirerpc::Error::ResultArity { method: "SignalWorkflowExecution", count: 2 })
    );
}

// ============================================================================
//  ENVELOPES
// ============================================================================

#[test]
fn test_call_and_reply_through_bytes() -> Result<()> {
    let service = service();
    let list = service.list_closed_workflow_executions;

    let call = list.call(17, &list.args((Some(request()),)))?.to_bytes()?;
    let call = Envelope::from_bytes(&call)?;
    assert_eq!(service.registry().route(&call)?.name, "ListClosedWorkflowExecutions");
    let args = list.read_call(&call)?;
    assert_eq!(args.list_request, Some(request()));

    let result: ListClosedWorkflowExecutionsResult = MethodResult::Success(response());
    let reply = Envelope::from_bytes(&list.reply(call.seq_id, &result)?.to_bytes()?)?;
    assert_eq!(reply.seq_id, 17);
    assert_eq!(reply.kind, EnvelopeType::Reply);
    assert_eq!(list.read_reply(&reply)?, result);
    Ok(())
}

#[test]
fn test_err_reply_for_other_method() -> Result<()> {
    let service = service();
    let reply = service.signal_workflow_execution.reply(1, &MethodResult::Success(()))?;
    assert!(matches!(
        service.list_closed_workflow_executions.read_reply(&reply),
        Err(wirerpc::Error::EnvelopeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_err_route_unknown_method() {
    let service = service();
    let env = Envelope::new("DescribeDomain", EnvelopeType::Call, 1, Value::Struct(Struct::empty()));
    assert_eq!(
        service.registry().route(&env),
        Err(wirerpc::Error::UnknownMethod("DescribeDomain".into()))
    );
}

#[test]
fn test_result_display() {
    let err: ServiceError = ServiceBusyError { message: "busy".into(), reason: None }.into();
    let result: ListClosedWorkflowExecutionsResult = MethodResult::Exception(err);
    assert!(result
        .to_string()
        .starts_with("WorkflowService_ListClosedWorkflowExecutions_Result{ServiceBusyError: "));
}
