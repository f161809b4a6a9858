//! Metrics server module
//!
//! This module provides an HTTP server to expose Prometheus metrics for scraping.

use actix_web::middleware::{Compress, DefaultHeaders, NormalizePath};
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use prometheus::Registry;
use tracing::{error, info};

use crate::utils::metrics::{gather_metrics, SystemMetrics};

/// Metrics endpoint handler
async fn metrics_handler(
	registry: web::Data<Registry>,
	system: web::Data<SystemMetrics>,
) -> impl Responder {
	system.update();

	match gather_metrics(&registry) {
		Ok(buffer) => HttpResponse::Ok()
			.content_type("text/plain; version=0.0.4; charset=utf-8")
			.body(buffer),
		Err(e) => {
			error!("Error gathering metrics: {}", e);
			HttpResponse::InternalServerError().finish()
		}
	}
}

/// Create the metrics server
///
/// System gauges are registered into `registry` so they are served next to the monitor
/// metrics.
pub fn create_metrics_server(
	bind_address: String,
	registry: Registry,
) -> std::io::Result<actix_web::dev::Server> {
	let system = SystemMetrics::register(&registry).map_err(std::io::Error::other)?;

	info!("Starting metrics server on {}", bind_address);

	Ok(HttpServer::new(move || {
		App::new()
			.wrap(Compress::default())
			.wrap(NormalizePath::trim())
			.wrap(DefaultHeaders::new())
			.app_data(web::Data::new(registry.clone()))
			.app_data(web::Data::new(system.clone()))
			.route("/metrics", web::get().to(metrics_handler))
	})
	.workers(2)
	.bind(bind_address)?
	.shutdown_timeout(5)
	.run())
}
