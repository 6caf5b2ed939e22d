use std::{net::SocketAddr, process, sync::Arc};

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{
    api::health_checks::ok,
    app::App,
    config::Config,
    database::setup_database,
    environment::Environment,
    jobs::{
        engine::TokioScheduler, job_registry::JobRegistry, job_service::JobService,
        runner::JobRunner, JobContext,
    },
    router::router,
};

pub async fn handle_serve_command(
    environment: Environment,
    config: Config,
    job_registry: JobRegistry,
) {
    let port = config.server.port;

    // Answers liveness probes while migrations run
    let liveness_server_task = tokio::spawn(start_liveness_server(port));

    let (db, migration_receiver) = match setup_database(&config.database).await {
        Ok(setup) => setup,
        Err(e) => {
            error!("❌ Database connection failed: {}", e);
            process::exit(1);
        }
    };

    match migration_receiver.await {
        Ok(Ok(())) => {
            info!("✅ Database is ready!");
        }
        Ok(Err(e)) => {
            error!("❌ Database setup failed: {}", e);
            process::exit(1);
        }
        Err(_) => {
            error!("❌ Database setup channel closed unexpectedly");
            process::exit(1);
        }
    }

    info!(
        "🧩 Registered job types: {}",
        job_registry
            .job_names()
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    );

    let ctx = JobContext {
        config: config.clone(),
        db: db.clone(),
    };
    let scheduler = Arc::new(TokioScheduler::new(Arc::new(JobRunner::new(
        job_registry,
        ctx,
    ))));
    let jobs = JobService::new(db.clone(), scheduler);

    // A job that cannot be scheduled must not be skipped silently
    if let Err(e) = jobs.init().await {
        error!("❌ Scheduler initialization failed: {}", e);
        process::exit(1);
    }

    let app = App {
        config,
        environment,
        db,
        jobs,
    };

    liveness_server_task.abort();
    let _ = liveness_server_task.await;

    start_server(router(app), port).await;
}

// Minimal server that only serves liveness endpoint during migrations
async fn start_liveness_server(port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.unwrap();

    let migration_router = Router::new().route("/liveness", get(ok));
    axum::serve(listener, migration_router).await.unwrap();
}

async fn start_server(router: Router, port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.unwrap();

    info!("🌐 Server starting on http://{}", addr);
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
