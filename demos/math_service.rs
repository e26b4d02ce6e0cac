use std::sync::Arc;

use stackrun::logging::{self, LevelFilter};
use stackrun::{Error, NoParams, Registry, Service, ServiceBuilder};

/// Arithmetic service; results are rounded to `places` decimal places
struct Math {
    places: i32,
}

impl Math {
    fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.places);
        (value * factor).round() / factor
    }
}

impl Service for Math {
    fn name(&self) -> &str {
        "Math"
    }

    fn methods(builder: &mut ServiceBuilder<'_, Self>) {
        builder
            .method("add", |math: Arc<Math>, (a, b): (f64, f64)| async move {
                Ok(math.round(a + b))
            })
            .method("divide", |math: Arc<Math>, (a, b): (f64, f64)| async move {
                if b == 0.0 {
                    return Err(Error::Other("division by zero".to_string()));
                }
                Ok(math.round(a / b))
            })
            .method("pi", |math: Arc<Math>, _: NoParams| async move {
                Ok(math.round(std::f64::consts::PI))
            });
    }
}

// Reads ./service_req.json and writes ./service_resp.json, for example:
//   echo '{"method":"Math.add","params":[2,3]}' > service_req.json
//   cargo run --example math_service
#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init(LevelFilter::Info);

    let mut registry = Registry::new();
    registry.add(Math { places: 6 });

    let response = stackrun::run(registry).await;
    println!("{}", serde_json::to_string(&response).unwrap_or_default());
}
