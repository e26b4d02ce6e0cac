//! Service registry mapping `(service, method)` names to typed handlers.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::logging::debug;
use crate::{Error, Result};

/// Method handler function signature
pub type HandlerFn = Box<
    dyn Fn(Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> + Send + Sync,
>;

/// Parameter type for methods that take no positional arguments.
///
/// Deserializes from an empty array only.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NoParams {}

/// A service that registers its own methods
pub trait Service: Send + Sync + Sized + 'static {
    /// The name the service is registered under
    fn name(&self) -> &str;

    /// Register the service's methods
    fn methods(builder: &mut ServiceBuilder<'_, Self>);
}

/// Methods registered for one service
#[derive(Default)]
pub struct ServiceMethods {
    handlers: HashMap<String, HandlerFn>,
}

impl ServiceMethods {
    /// Look up a method handler by exact name
    pub fn get(&self, method: &str) -> Option<&HandlerFn> {
        self.handlers.get(method)
    }

    /// Names of the registered methods, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Registry of services available to the dispatcher
#[derive(Default)]
pub struct Registry {
    services: HashMap<String, ServiceMethods>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service under `name` with `receiver` bound to its methods.
    ///
    /// Registering a name again replaces the earlier service and its methods.
    pub fn service<S>(&mut self, name: &str, receiver: S) -> ServiceBuilder<'_, S>
    where
        S: Send + Sync + 'static,
    {
        debug!("Registering service {}", name);
        let methods = self
            .services
            .entry(name.to_string())
            .insert_entry(ServiceMethods::default())
            .into_mut();
        ServiceBuilder {
            name: name.to_string(),
            receiver: Arc::new(receiver),
            methods,
        }
    }

    /// Register a self-describing service
    pub fn add<S: Service>(&mut self, service: S) -> &mut Self {
        let name = service.name().to_string();
        let mut builder = self.service(&name, service);
        S::methods(&mut builder);
        self
    }

    /// Look up a service by exact name
    pub fn get(&self, service: &str) -> Option<&ServiceMethods> {
        self.services.get(service)
    }

    /// Names of the registered services, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.services.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Adds methods to a service being registered
pub struct ServiceBuilder<'a, S> {
    name: String,
    receiver: Arc<S>,
    methods: &'a mut ServiceMethods,
}

impl<S> ServiceBuilder<'_, S>
where
    S: Send + Sync + 'static,
{
    /// Register a method handler.
    ///
    /// The handler receives the service's receiver and the positional
    /// arguments deserialized into `P` (a tuple, or [`NoParams`]).
    pub fn method<F, Fut, P, O>(&mut self, method: &str, handler: F) -> &mut Self
    where
        F: Fn(Arc<S>, P) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = Result<O>> + Send + 'static,
        P: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
    {
        debug!("Registering method {}.{}", self.name, method);
        let receiver = self.receiver.clone();

        let handler_fn: HandlerFn = Box::new(move |params: Value| {
            let handler_clone = handler.clone();
            let receiver_clone = receiver.clone();

            Box::pin(async move {
                let typed_params = deserialize_params::<P>(params)?;

                let result = handler_clone(receiver_clone, typed_params).await?;

                Ok(serde_json::to_value(result)?)
            })
        });

        self.methods.handlers.insert(method.to_string(), handler_fn);
        self
    }
}

fn deserialize_params<P: DeserializeOwned>(params: Value) -> Result<P> {
    serde_json::from_value(params).map_err(|err| Error::InvalidParam(err.to_string()))
}
