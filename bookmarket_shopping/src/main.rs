use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer};
use opentelemetry::global;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::runtime::TokioCurrentThread;
use paperclip::actix::{web, OpenApiExt};
use serde::Deserialize;
use tracing_actix_web::TracingLogger;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use bookmarket_shopping::app_config::config_app;
use bookmarket_shopping::payment::PaymentAuthorizer;
use bookmarket_shopping::shopping_store::{
    InMemoryShoppingStore, PostgresShoppingStore, PostgresShoppingStoreConfig, ShoppingStore,
};

#[derive(Debug, Deserialize)]
struct Settings {
    #[serde(default)]
    use_in_memory_db: bool,
    #[serde(default = "default_db_host")]
    db_host: String,
    #[serde(default = "default_db_credential")]
    db_username: String,
    #[serde(default = "default_db_credential")]
    db_password: String,
    /// Delay of the payment authorization stub
    #[serde(default = "default_payment_delay_ms")]
    payment_delay_ms: u64,
}

fn default_db_host() -> String {
    "127.0.0.1".to_string()
}

fn default_db_credential() -> String {
    "postgres".to_string()
}

fn default_payment_delay_ms() -> u64 {
    1500
}

impl Settings {
    fn from_env() -> anyhow::Result<Self> {
        Ok(config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()?)
    }
}

// Based on https://github.com/LukeMathWalker/tracing-actix-web/blob/main/examples/opentelemetry/src/main.rs#L15
fn init_telemetry() {
    let app_name = "bookmarket_shopping";

    // Start a new Jaeger trace pipeline.
    // Spans are exported in batch - recommended setup for a production application.
    global::set_text_map_propagator(TraceContextPropagator::new());
    #[allow(deprecated)]
    let tracer = opentelemetry_jaeger::new_agent_pipeline()
        .with_service_name(app_name)
        .install_batch(TokioCurrentThread)
        .expect("Failed to install OpenTelemetry tracer.");

    // Filter based on level - trace, debug, info, warn, error
    // Tunable via `RUST_LOG` env variable
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("info"));
    // Create a `tracing` layer using the Jaeger tracer
    let telemetry = tracing_opentelemetry::layer().with_tracer(tracer);
    // Create a `tracing` layer to emit spans as structured logs to stdout
    let formatting_layer = BunyanFormattingLayer::new(app_name.into(), std::io::stdout);
    // Combined them all together in a `tracing` subscriber
    let subscriber = Registry::default()
        .with(env_filter)
        .with(telemetry)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to install `tracing` subscriber.")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();
    println!("starting HTTP server at http://localhost:8080");

    let settings = Settings::from_env().expect("Failed to read settings");

    let shopping_store: Arc<dyn ShoppingStore> = if settings.use_in_memory_db {
        Arc::new(InMemoryShoppingStore::default())
    } else {
        Arc::new(
            PostgresShoppingStore::init(PostgresShoppingStoreConfig {
                hostname: settings.db_host,
                username: settings.db_username,
                password: settings.db_password,
            })
            .await
            .expect("Failed to init postgres"),
        )
    };

    let payment_delay = Duration::from_millis(settings.payment_delay_ms);

    HttpServer::new(move || {
        App::new()
            .wrap_api()
            .app_data(web::Data::new(shopping_store.clone()))
            .app_data(web::Data::new(PaymentAuthorizer::new(payment_delay)))
            .wrap(TracingLogger::default())
            .configure(config_app)
            .with_json_spec_at("/apispec/v2")
            .build()
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
