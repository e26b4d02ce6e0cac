//! Resolves `Service.function` requests against a [`Registry`].

use std::sync::Arc;

use crate::Result;
use crate::jsonrpc::{self, Request, Response};
use crate::logging::{debug, info, warn};
use crate::registry::Registry;

/// Request dispatcher
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    /// Create a dispatcher over `registry`
    pub fn new(registry: Registry) -> Self {
        Self::with_registry(Arc::new(registry))
    }

    /// Create a dispatcher over a shared registry
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        for name in registry.names() {
            if let Some(service) = registry.get(name) {
                debug!("Service {} - {:?}", name, service.names());
            }
        }
        Self { registry }
    }

    /// Get the registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Dispatch a request.
    ///
    /// Unknown services and methods produce error responses. Failures of the
    /// invoked method are returned as `Err` for the caller's failure boundary.
    pub async fn dispatch(&self, request: Request) -> Result<Response> {
        info!("Dispatching {}", request.method);

        let Some((service_name, method_name)) = jsonrpc::split_method(&request.method) else {
            warn!("Malformed method name {:?}", request.method);
            return Ok(jsonrpc::service_not_found());
        };

        let Some(service) = self.registry.get(service_name) else {
            warn!("Service not found: {}", service_name);
            return Ok(jsonrpc::service_not_found());
        };

        let Some(handler) = service.get(method_name) else {
            warn!("Method not found: {}.{}", service_name, method_name);
            return Ok(jsonrpc::method_not_found());
        };

        let result = handler(serde_json::Value::Array(request.params)).await?;

        Ok(jsonrpc::success(result))
    }

    /// Parse a request, dispatch it and serialize the response
    pub async fn dispatch_str(&self, request_str: &str) -> Result<String> {
        let request: Request = serde_json::from_str(request_str)?;
        let response = self.dispatch(request).await?;
        Ok(serde_json::to_string(&response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    struct Math {
        scale: i64,
    }

    fn math_dispatcher() -> Dispatcher {
        let mut registry = Registry::new();
        registry
            .service("Math", Math { scale: 10 })
            .method("add", |_: Arc<Math>, (a, b): (i64, i64)| async move { Ok(a + b) })
            .method("scale", |math: Arc<Math>, (x,): (i64,)| async move {
                Ok(x * math.scale)
            })
            .method("divide", |_: Arc<Math>, (a, b): (i64, i64)| async move {
                if b == 0 {
                    return Err(Error::Other("division by zero".to_string()));
                }
                Ok(a / b)
            });
        Dispatcher::new(registry)
    }

    fn request(method: &str, params: serde_json::Value) -> Request {
        serde_json::from_value(json!({ "method": method, "params": params })).unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let dispatcher = math_dispatcher();

        let response = assert_ok!(dispatcher.dispatch(request("Math.add", json!([2, 3]))).await);
        assert_eq!(response, jsonrpc::success(json!(5)));

        let response = assert_ok!(dispatcher.dispatch(request("Math.scale", json!([4]))).await);
        assert_eq!(response, jsonrpc::success(json!(40)));
    }

    #[tokio::test]
    async fn test_dispatch_service_not_found() {
        let dispatcher = math_dispatcher();

        let response = assert_ok!(dispatcher.dispatch(request("Ghost.foo", json!([]))).await);
        assert_eq!(response, jsonrpc::service_not_found());
    }

    #[tokio::test]
    async fn test_dispatch_method_not_found() {
        let dispatcher = math_dispatcher();

        let response = assert_ok!(dispatcher.dispatch(request("Math.pow", json!([2, 3]))).await);
        assert_eq!(response, jsonrpc::method_not_found());

        let response = assert_ok!(dispatcher.dispatch(request("Math.", json!([]))).await);
        assert_eq!(response, jsonrpc::method_not_found());
    }

    #[tokio::test]
    async fn test_dispatch_requires_exactly_one_dot() {
        let dispatcher = math_dispatcher();

        for method in ["Math", "Math.add.extra", ""] {
            let response = assert_ok!(dispatcher.dispatch(request(method, json!([2, 3]))).await);
            assert_eq!(response, jsonrpc::service_not_found(), "method {:?}", method);
        }
    }

    #[tokio::test]
    async fn test_dispatch_propagates_method_failure() {
        let dispatcher = math_dispatcher();

        let err = assert_err!(dispatcher.dispatch(request("Math.divide", json!([1, 0]))).await);
        assert_eq!(err.to_string(), "division by zero");

        let err = assert_err!(dispatcher.dispatch(request("Math.add", json!(["2", 3]))).await);
        assert!(matches!(err, Error::InvalidParam(_)));
    }

    #[tokio::test]
    async fn test_dispatch_str() {
        let dispatcher = math_dispatcher();

        let response = assert_ok!(
            dispatcher
                .dispatch_str(r#"{"method":"Math.add","params":[2,3]}"#)
                .await
        );
        assert_eq!(response, r#"{"result":5}"#);

        let err = assert_err!(dispatcher.dispatch_str("{not json").await);
        assert!(matches!(err, Error::Json(_)));
    }
}
