use std::collections::BTreeMap;

use anyhow::Result;
use wirepack::Field;
use wirepack::List;
use wirepack::Map;
use wirepack::Struct;
use wirepack::Type;
use wirepack::Value;
use wirerpc::Binary;
use wirerpc::FromWire;
use wirerpc::ServiceException;
use wirerpc::ToWire;

use crate::shared::*;
use crate::workflow_service::*;
use crate::ServiceError;

fn text(s: &str) -> Value {
    Value::Binary(s.as_bytes().to_vec())
}

fn strukt(fields: Vec<(u16, Value)>) -> Value {
    let fields = fields.into_iter().map(|(id, v)| Field::new(id, v)).collect();
    Value::Struct(Struct::new(fields).unwrap())
}

// ============================================================================
//  GENERATED STRUCTS
// ============================================================================

#[test]
fn test_schemas_are_valid() -> Result<()> {
    let service = WorkflowService::new()?;
    let names: Vec<_> = service.registry().methods().map(|m| m.name).collect();
    assert_eq!(
        names,
        vec!["ListClosedWorkflowExecutions", "SignalWorkflowExecution", "StartWorkflowExecution"]
    );
    for schema in [
        WorkflowExecution::wire_schema(),
        ListClosedWorkflowExecutionsRequest::wire_schema(),
        StartWorkflowExecutionRequest::wire_schema(),
        ClientVersionNotSupportedError::wire_schema(),
    ] {
        schema.validate()?;
    }
    Ok(())
}

#[test]
fn test_field_ids_on_the_wire() -> Result<()> {
    let execution = WorkflowExecution { workflow_id: Some("wid".into()), run_id: None };
    assert_eq!(execution.to_wire()?, strukt(vec![(10, text("wid"))]));
    Ok(())
}

#[test]
fn test_nested_request_roundtrip() -> Result<()> {
    let request = ListClosedWorkflowExecutionsRequest {
        domain: Some("samples".into()),
        maximum_page_size: Some(100),
        next_page_token: Some(Binary(vec![0, 1, 2])),
        start_time_filter: Some(StartTimeFilter { earliest_time: Some(1), latest_time: Some(2) }),
        execution_filter: Some(WorkflowExecutionFilter { workflow_id: Some("wid".into()), run_id: None }),
        type_filter: None,
        status_filter: Some(WorkflowExecutionCloseStatus::TimedOut),
    };
    let value = request.to_wire()?;
    assert_eq!(value.as_struct()?.get(70), Some(&Value::I32(5)));
    assert_eq!(ListClosedWorkflowExecutionsRequest::from_wire(&value)?, request);
    Ok(())
}

#[test]
fn test_list_of_structs() -> Result<()> {
    let response = ListClosedWorkflowExecutionsResponse {
        executions: Some(vec![
            WorkflowExecutionInfo {
                execution: Some(WorkflowExecution { workflow_id: Some("a".into()), run_id: Some("r".into()) }),
                workflow_type: Some(WorkflowType { name: Some("Greeter".into()) }),
                close_status: Some(WorkflowExecutionCloseStatus::Completed),
                history_length: Some(12),
                ..Default::default()
            },
            WorkflowExecutionInfo::default(),
        ]),
        next_page_token: None,
    };
    let value = response.to_wire()?;
    let list = value.as_struct()?.get(10).unwrap().as_list()?;
    assert_eq!(list.elem_type(), Type::Struct);
    assert_eq!(list.len(), 2);
    assert_eq!(ListClosedWorkflowExecutionsResponse::from_wire(&value)?, response);
    Ok(())
}

#[test]
fn test_map_field() -> Result<()> {
    let mut fields = BTreeMap::new();
    fields.insert("owner".to_string(), Binary(b"ops".to_vec()));
    let memo = Memo { fields: Some(fields) };
    assert_eq!(Memo::from_wire(&memo.to_wire()?)?, memo);
    Ok(())
}

#[test]
fn test_container_of_other_elements_reads_as_absent() -> Result<()> {
    let executions = List::new(Type::I32, vec![Value::I32(7)])?;
    let value = strukt(vec![(10, Value::List(executions)), (20, Value::Binary(vec![9]))]);
    let response = ListClosedWorkflowExecutionsResponse::from_wire(&value)?;
    assert_eq!(response.executions, None);
    assert_eq!(response.next_page_token, Some(Binary(vec![9])));

    let fields = Map::new(Type::Binary, Type::I64, vec![(text("owner"), Value::I64(1))])?;
    let memo = Memo::from_wire(&strukt(vec![(10, Value::Map(fields))]))?;
    assert_eq!(memo, Memo::default());
    Ok(())
}

#[test]
fn test_err_unknown_enum_value() {
    let value = strukt(vec![(70, Value::I32(42))]);
    assert_eq!(
        ListClosedWorkflowExecutionsRequest::from_wire(&value),
        Err(wirerpc::Error::UnknownVariant { name: "WorkflowExecutionCloseStatus", value: 42 })
    );
}

#[test]
fn test_err_missing_required_field() {
    let value = strukt(vec![(1, text("1.0")), (3, text(">=1.0"))]);
    assert_eq!(
        ClientVersionNotSupportedError::from_wire(&value),
        Err(wirerpc::Error::MissingField {
            strukt: "ClientVersionNotSupportedError",
            field: "clientImpl",
        })
    );
}

#[test]
fn test_enum_codes() -> Result<()> {
    for (code, status) in WorkflowExecutionCloseStatus::ALL.iter().enumerate() {
        assert_eq!(status.to_wire()?, Value::I32(code as i32));
        assert_eq!(WorkflowExecutionCloseStatus::from_wire(&Value::I32(code as i32))?, *status);
    }
    Ok(())
}

// ============================================================================
//  SERVICE ERRORS
// ============================================================================

#[test]
fn test_exception_kinds() {
    let busy: ServiceError = ServiceBusyError { message: "slow down".into(), reason: None }.into();
    assert_eq!(busy.kind(), Some("ServiceBusyError"));
    let missing: ServiceError = EntityNotExistsError { message: "gone".into(), ..Default::default() }.into();
    assert_eq!(missing.kind(), Some("EntityNotExistsError"));
    assert_eq!(ServiceError::other(std::fmt::Error).kind(), None);
}

#[test]
fn test_exception_payload_roundtrip() -> Result<()> {
    let err: ServiceError = DomainNotActiveError {
        message: "m".into(),
        domain_name: "d".into(),
        current_cluster: "a".into(),
        active_cluster: "b".into(),
    }
    .into();
    let value = err.encode_exception()?;
    assert_eq!(ServiceError::decode_exception("DomainNotActiveError", &value)?, err);
    assert!(ServiceError::decode_exception("NoSuchError", &value).is_err());
    Ok(())
}

#[test]
fn test_other_errors_compare_by_identity() {
    let a = ServiceError::other(std::fmt::Error);
    let b = ServiceError::other(std::fmt::Error);
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

#[test]
fn test_error_display() {
    let err: ServiceError = BadRequestError { message: "no domain".into() }.into();
    assert_eq!(err.to_string(), "BadRequestError{Message: no domain}");
    let err: ServiceError = EntityNotExistsError {
        message: "gone".into(),
        current_cluster: Some("east".into()),
        active_cluster: None,
    }
    .into();
    assert_eq!(err.to_string(), "EntityNotExistsError{Message: gone, CurrentCluster: east}");
}

// ============================================================================
//  DISPLAY AND JSON
// ============================================================================

#[test]
fn test_args_display() {
    assert_eq!(
        ListClosedWorkflowExecutionsArgs::default().to_string(),
        "WorkflowService_ListClosedWorkflowExecutions_Args{}"
    );
    let args = SignalWorkflowExecutionArgs {
        signal_request: Some(SignalWorkflowExecutionRequest {
            signal_name: Some("poke".into()),
            ..Default::default()
        }),
    };
    let shown = args.to_string();
    assert!(shown.starts_with("WorkflowService_SignalWorkflowExecution_Args{SignalRequest: "));
    assert!(shown.contains("poke"));
}

#[test]
fn test_json_names_and_omission() -> Result<()> {
    let request = ListClosedWorkflowExecutionsRequest {
        domain: Some("samples".into()),
        maximum_page_size: Some(10),
        next_page_token: Some(Binary(b"hi".to_vec())),
        status_filter: Some(WorkflowExecutionCloseStatus::ContinuedAsNew),
        ..Default::default()
    };
    let json = serde_json::to_value(&request)?;
    assert_eq!(
        json,
        serde_json::json!({
            "domain": "samples",
            "maximumPageSize": 10,
            "nextPageToken": "aGk=",
            "statusFilter": "CONTINUED_AS_NEW",
        })
    );
    let back: ListClosedWorkflowExecutionsRequest = serde_json::from_value(json)?;
    assert_eq!(back, request);
    Ok(())
}

#[test]
fn test_json_map_of_blobs() -> Result<()> {
    let mut fields = BTreeMap::new();
    fields.insert("k".to_string(), Binary(vec![0xff]));
    let memo = Memo { fields: Some(fields) };
    let json = serde_json::to_string(&memo)?;
    assert_eq!(json, r#"{"fields":{"k":"/w=="}}"#);
    assert_eq!(serde_json::from_str::<Memo>(&json)?, memo);
    assert_eq!(serde_json::to_string(&Memo::default())?, "{}");
    Ok(())
}

#[test]
fn test_json_rejects_bad_base64() {
    let parsed = serde_json::from_str::<WorkflowExecutionInfo>(r#"{"type":{"name":"x"}}"#);
    assert!(parsed.is_ok());
    let parsed = serde_json::from_str::<ListClosedWorkflowExecutionsResponse>(r#"{"nextPageToken":"!!"}"#);
    assert!(parsed.is_err());
}
