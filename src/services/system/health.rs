use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::system::responses::HealthResponse;
use crate::models::{AppStartTime, MessageResponse};

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let now = chrono::Utc::now();
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (now - start.start_datetime).num_seconds())
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        timestamp: now,
        environment: service.get_config().app.environment.clone(),
        uptime_seconds,
    }))
}

pub async fn ping() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Backend server is responding correctly",
    )))
}
