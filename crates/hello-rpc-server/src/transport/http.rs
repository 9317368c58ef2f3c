//! HTTP handler for `POST /rpc` and `GET /rpc/describe`.
//!
//! Pipeline per request:
//! - buffer the body (size-limited by the router) and decode the envelope
//! - dispatch: lookup, bind args, invoke, shape check
//! - drain the reply into the response envelope
//!
//! A panicking operation is caught here, at the request boundary, and turned
//! into a generic `INTERNAL` fault. The dispatcher itself does not recover.

use std::panic::AssertUnwindSafe;

use axum::{
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use futures_util::FutureExt;
use tokio::time::Instant;
use tracing::Instrument;

use hello_rpc_core::error::{ClientCode, RpcError};
use hello_rpc_core::protocol::envelope::{self, Request};
use hello_rpc_core::protocol::decode_request;

use crate::app_state::AppState;
use crate::dispatch::CallCtx;

/// Metric label for names that match no registered operation.
const UNKNOWN_OP_LABEL: &str = "_unknown";

pub fn status_for(err: &RpcError) -> StatusCode {
    match err.client_code() {
        ClientCode::BadRequest
        | ClientCode::InvalidInput
        | ClientCode::UnknownOperation
        | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ClientCode::Fault | ClientCode::ContractViolation | ClientCode::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn fault_response(op: Option<String>, id: Option<String>, err: &RpcError) -> Response {
    (status_for(err), Json(envelope::Response::fault(op, id, err))).into_response()
}

/// Envelope-level failure: no operation has been identified yet.
fn reject(app: &AppState, err: RpcError) -> Response {
    let code = err.client_code().as_str();
    app.metrics().decode_errors.inc(&[("code", code)]);
    tracing::warn!(code, error = %err, "rejected request envelope");
    fault_response(None, None, &err)
}

pub async fn rpc(State(app): State<AppState>, body: Result<Bytes, BytesRejection>) -> Response {
    let body = match body {
        Ok(b) => b,
        Err(rej) if rej.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return reject(&app, RpcError::PayloadTooLarge)
        }
        Err(rej) => return reject(&app, RpcError::BadRequest(rej.body_text())),
    };

    let Request { op, id, args, .. } = match decode_request(body) {
        Ok(req) => req,
        Err(e) => return reject(&app, e),
    };

    let span = tracing::info_span!("rpc", op = %op, id = ?id);
    call(app, op, id, args).instrument(span).await
}

async fn call(
    app: AppState,
    op: String,
    id: Option<String>,
    args: Option<Box<serde_json::value::RawValue>>,
) -> Response {
    let started = Instant::now();
    let dispatcher = app.dispatcher();
    let metrics = app.metrics();
    let ctx = CallCtx { id: id.clone() };

    let in_flight = metrics.in_flight.track();
    let outcome = AssertUnwindSafe(async {
        dispatcher
            .dispatch(ctx, &op, args.as_deref())
            .await?
            .into_result()
    })
    .catch_unwind()
    .await;
    drop(in_flight);

    let result = outcome.unwrap_or_else(|_| {
        tracing::error!("operation panicked");
        Err(RpcError::Internal("operation panicked".into()))
    });

    let label = if dispatcher.signature(&op).is_some() {
        op.as_str()
    } else {
        UNKNOWN_OP_LABEL
    };
    metrics
        .dispatch_duration
        .observe(&[("op", label)], started.elapsed());

    match result {
        Ok(result) => {
            metrics.requests.inc(&[("op", label), ("outcome", "ok")]);
            tracing::debug!("operation completed");
            (StatusCode::OK, Json(envelope::Response::ok(op, id, result))).into_response()
        }
        Err(err) => {
            let code = err.client_code().as_str();
            metrics.requests.inc(&[("op", label), ("outcome", code)]);
            if err.is_fault() {
                metrics
                    .faults
                    .inc(&[("op", label), ("code", err.fault_code().as_str())]);
            }
            if err.is_client_error() {
                tracing::warn!(code, error = %err, "operation rejected");
            } else {
                tracing::error!(code, error = %err, "operation failed");
            }
            fault_response(Some(op), id, &err)
        }
    }
}

pub async fn describe(State(app): State<AppState>) -> Response {
    let dispatcher = app.dispatcher();
    Json(dispatcher.describe()).into_response()
}
