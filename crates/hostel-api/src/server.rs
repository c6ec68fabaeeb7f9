use crate::{create_router, AppState};
use hostel_core::{HostelConfig, HostelError, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

pub struct Server {
    state: AppState,
    addr: SocketAddr,
}

impl Server {
    pub fn new(addr: SocketAddr, config: Arc<HostelConfig>) -> Result<Self> {
        let state = AppState::new(config)?;
        Ok(Self { state, addr })
    }

    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state);

        info!("Starting hostel API server on {}", self.addr);

        // Bind with tuned socket options for better keep-alive behavior
        let listener = {
            let socket = if self.addr.is_ipv6() {
                tokio::net::TcpSocket::new_v6()
            } else {
                tokio::net::TcpSocket::new_v4()
            }
            .map_err(HostelError::Io)?;

            // Reuse addr/port to improve rebind under restarts
            let _ = socket.set_reuseaddr(true);
            #[cfg(unix)]
            let _ = socket.set_reuseport(true);

            let _ = socket.set_keepalive(true);

            socket.bind(self.addr).map_err(HostelError::Io)?;
            socket.listen(1024)?
        };

        info!("Server listening on http://{}", self.addr);
        info!("API documentation:");
        info!("  POST /api/login - Authenticate admin or student");
        info!("  GET  /api/admin/dashboard - Admin statistics");
        info!("  GET  /api/student/dashboard/{{id}} - Student dashboard");
        info!("  GET  /api/rooms, /api/rooms/{{identifier}}/details - Rooms");
        info!("  GET/PUT /api/payments - Payments");
        info!("  GET/POST/PUT /api/complaints - Complaints");
        info!("  GET  /api/menu - Weekly mess menu");
        info!("  GET/POST /api/waiting-list - Waiting list");
        info!("  POST /api/admin/waiting-list/{{id}}/assign - Assign room");
        info!("  GET/POST /api/maintenance - Maintenance requests");
        info!("  GET/POST /api/room-change-requests (+ approve/deny) - Room changes");
        info!("  GET/POST /api/announcements - Announcements");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(HostelError::Io)?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
