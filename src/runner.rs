//! One file-backed request/response cycle inside a failure boundary.
//!
//! The read, dispatch and write steps run together in a spawned task. Whatever
//! that task does not finish cleanly, an `Err` or a panic, is reported as a
//! `-32000` error response written over the response file.

use std::any::Any;
use std::path::Path;

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::jsonrpc::{self, Request, Response};
use crate::logging::{debug, error};
use crate::registry::Registry;
use crate::Result;

/// Run one cycle against the default request and response files
pub async fn run(registry: Registry) -> Response {
    run_with_config(registry, Config::default()).await
}

/// Run one cycle against the files named in `config`.
///
/// Exactly one response is written. The returned value is that response.
pub async fn run_with_config(registry: Registry, config: Config) -> Response {
    let dispatcher = Dispatcher::new(registry);

    let task = {
        let config = config.clone();
        tokio::spawn(async move { handle(&dispatcher, &config).await })
    };

    let failure = match task.await {
        Ok(Ok(response)) => return response,
        Ok(Err(err)) => err.to_string(),
        Err(err) if err.is_panic() => panic_message(err.into_panic()),
        Err(err) => err.to_string(),
    };

    error!("Uncaught failure - {}", failure);
    let response = jsonrpc::server_error(failure);
    if let Err(err) = write_response(&config.response_path, &response).await {
        error!(
            "Failed to write {}: {}",
            config.response_path.display(),
            err
        );
    }
    response
}

async fn handle(dispatcher: &Dispatcher, config: &Config) -> Result<Response> {
    let request = read_request(&config.request_path).await?;
    let response = dispatcher.dispatch(request).await?;
    write_response(&config.response_path, &response).await?;
    Ok(response)
}

/// Read and parse the request file
pub async fn read_request(path: &Path) -> Result<Request> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

/// Serialize `response` and write it over the response file
pub async fn write_response(path: &Path, response: &Response) -> Result<()> {
    let contents = serde_json::to_string(response)?;
    tokio::fs::write(path, contents).await?;
    debug!("res - {}", response_summary(response));
    Ok(())
}

fn response_summary(response: &Response) -> String {
    match response {
        Response::Success { .. } => "result".to_string(),
        Response::Error { error, msg } => format!("error {} ({})", error, msg),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new("boom".to_string())), "boom");
        assert_eq!(panic_message(Box::new(42)), "panic with non-string payload");
    }

    #[test]
    fn test_response_summary() {
        assert_eq!(response_summary(&jsonrpc::success(serde_json::json!(1))), "result");
        assert_eq!(
            response_summary(&jsonrpc::method_not_found()),
            "error -32601 (Method not found)"
        );
    }
}
