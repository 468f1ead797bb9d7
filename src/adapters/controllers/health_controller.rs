use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use sysinfo::System;
use tracing::info;

use crate::adapters::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(rename = "uptimeSeconds")]
    pub uptime_seconds: i64,
    pub registry: RegistryInfo,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct RegistryInfo {
    #[serde(rename = "totalFiles")]
    pub total_files: u64,
    #[serde(rename = "totalStorage")]
    pub total_storage: u64,
    #[serde(rename = "maxUploadSize")]
    pub max_upload_size: u64,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

pub struct HealthController;

impl HealthController {
    /// GET /api/health
    pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
        info!("Health check requested");

        let stats = app_state.file_repository.stats();

        // Only refresh what's reported
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            uptime_seconds: (Utc::now() - app_state.started_at).num_seconds(),
            registry: RegistryInfo {
                total_files: stats.total_files,
                total_storage: stats.total_storage,
                max_upload_size: app_state.config.max_upload_size,
            },
            metrics: SystemMetrics {
                cpu_usage_percent: sys.global_cpu_usage(),
                memory_used_bytes: memory_used,
                memory_total_bytes: memory_total,
                memory_usage_percent,
            },
        })
    }
}
