// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use notemark_server::api::router;
use notemark_server::auth::SessionKeys;
use notemark_server::config::{
    CLIENT_URL_ENV, DATA_DIR_ENV, SESSION_SECRET_ENV, SMTP_FROM_ENV, SMTP_HOST_ENV,
    SMTP_PASSWORD_ENV, SMTP_PORT_ENV, SMTP_USERNAME_ENV,
};
use notemark_server::email::{EmailConfig, EmailService};
use notemark_server::state::AppState;
use notemark_server::storage::{DocumentStorage, StoragePaths};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    if env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn email_service() -> EmailService {
    let Ok(smtp_host) = env::var(SMTP_HOST_ENV) else {
        warn!("SMTP_HOST not set; outgoing email is disabled");
        return EmailService::disabled();
    };

    let config = EmailConfig {
        smtp_host,
        smtp_port: env::var(SMTP_PORT_ENV)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587),
        smtp_username: env::var(SMTP_USERNAME_ENV).unwrap_or_default(),
        smtp_password: env::var(SMTP_PASSWORD_ENV).unwrap_or_default(),
        from_address: env::var(SMTP_FROM_ENV).unwrap_or_else(|_| "noreply@localhost".to_string()),
    };

    match EmailService::new(&config) {
        Ok(service) => service,
        Err(e) => {
            warn!(error = %e, "failed to configure SMTP relay; outgoing email is disabled");
            EmailService::disabled()
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Initialize the document store
    let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| "/data".to_string());
    let mut storage = DocumentStorage::new(StoragePaths::new(&data_dir));
    storage
        .initialize()
        .expect("Failed to initialize document storage");

    let secret = match env::var(SESSION_SECRET_ENV) {
        Ok(secret) => secret,
        Err(_) => {
            warn!("SESSION_SECRET not set; using an insecure development secret");
            "insecure-dev-secret".to_string()
        }
    };
    let sessions = SessionKeys::new(secret.as_bytes());

    let client_url =
        env::var(CLIENT_URL_ENV).unwrap_or_else(|_| "http://localhost:3000".to_string());

    let state = AppState::new(storage, sessions, email_service(), client_url);
    let app = router(state);

    // Parse bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    info!("Notemark server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    axum::serve(listener, app)
        .await
        .expect("HTTP server failed");
}
