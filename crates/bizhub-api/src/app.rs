//! Server bootstrap — wires repositories, services, the worker, and the
//! router into a running application.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use bizhub_auth::jwt::decoder::JwtDecoder;
use bizhub_auth::jwt::encoder::JwtEncoder;
use bizhub_auth::password::hasher::PasswordHasher;
use bizhub_core::config::AppConfig;
use bizhub_core::error::AppError;
use bizhub_database::connection::DatabasePool;
use bizhub_database::migration::run_migrations;
use bizhub_database::repositories::business::BusinessRepository;
use bizhub_database::repositories::invite::InviteRepository;
use bizhub_database::repositories::job::JobRepository;
use bizhub_database::repositories::staff::StaffRepository;
use bizhub_database::repositories::user::UserRepository;
use bizhub_service::auth::service::AuthService;
use bizhub_service::business::service::BusinessService;
use bizhub_service::invite::service::InviteService;
use bizhub_service::staff::service::StaffService;
use bizhub_service::upload::service::UploadService;
use bizhub_worker::executor::JobExecutor;
use bizhub_worker::jobs::staff_invite::StaffInviteJobHandler;
use bizhub_worker::notifier::{build_email_sender, build_whatsapp_sender};
use bizhub_worker::queue::JobQueue;
use bizhub_worker::runner::WorkerRunner;

use crate::router::build_router;
use crate::state::AppState;

/// Runs the Bizhub server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Bizhub server...");

    // Database
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // Repositories
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let business_repo = Arc::new(BusinessRepository::new(db_pool.clone()));
    let staff_repo = Arc::new(StaffRepository::new(db_pool.clone()));
    let invite_repo = Arc::new(InviteRepository::new(db_pool.clone()));
    let job_repo = Arc::new(JobRepository::new(db_pool.clone()));

    // Auth primitives
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // Services
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        config.auth.password_min_length,
    ));
    let business_service = Arc::new(BusinessService::new(
        Arc::clone(&business_repo),
        Arc::clone(&staff_repo),
    ));
    let staff_service = Arc::new(StaffService::new(
        Arc::clone(&staff_repo),
        Arc::clone(&user_repo),
    ));
    let invite_service = Arc::new(InviteService::new(
        Arc::clone(&invite_repo),
        Arc::clone(&staff_repo),
        Arc::clone(&business_repo),
        Arc::clone(&user_repo),
        Arc::clone(&job_repo),
        config.notification.frontend_url.clone(),
        config.worker.max_attempts,
    ));
    let upload_service = Arc::new(UploadService::new(&config.upload).await?);

    // Shutdown channel and notification worker
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker_handle = if config.worker.enabled {
        let email_sender = build_email_sender(&config.notification)?;
        let whatsapp_sender = build_whatsapp_sender(&config.notification)?;

        let mut executor = JobExecutor::new();
        executor.register(Arc::new(StaffInviteJobHandler::new(
            email_sender,
            whatsapp_sender,
        )));
        let executor = Arc::new(executor);

        let queue = Arc::new(JobQueue::new(
            Arc::clone(&job_repo),
            config.worker.retry_base_delay_seconds,
        ));

        let runner = WorkerRunner::new(queue, executor, config.worker.clone());
        let cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            runner.run(cancel).await;
        }))
    } else {
        tracing::info!("Notification worker disabled");
        None
    };

    // HTTP server
    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        jwt_decoder,
        auth_service,
        business_service,
        staff_service,
        invite_service,
        upload_service,
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Bizhub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // Give the worker a bounded window to drain in-flight jobs.
    if let Some(handle) = worker_handle {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Worker did not stop within the shutdown grace period");
        }
    }

    tracing::info!("Bizhub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
