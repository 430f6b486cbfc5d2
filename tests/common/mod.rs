//! Shared utilities for relay integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use lis_bridge::config::BridgeConfig;
use lis_bridge::http::{HttpServer, SAVE_ORDER_PATH};
use lis_bridge::lifecycle::Shutdown;

/// Path the mock downstream listens on.
pub const DOWNSTREAM_PATH: &str = "/lis/order";

/// One request received by the mock downstream.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: Value,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A running mock of the laboratory bridging endpoint.
pub struct MockDownstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[allow(dead_code)]
impl MockDownstream {
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, DOWNSTREAM_PATH)
    }

    /// Number of orders the relay forwarded.
    pub fn calls(&self) -> usize {
        self.captured.lock().unwrap().len()
    }

    pub fn last(&self) -> CapturedRequest {
        self.captured
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("downstream received no request")
    }
}

/// Start a mock downstream that answers every POST with `status` and `body`.
pub async fn start_mock_downstream(status: u16, body: &'static str) -> MockDownstream {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        captured: captured.clone(),
    };

    let app = Router::new()
        .route(DOWNSTREAM_PATH, post(capture))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockDownstream { addr, captured }
}

async fn capture(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state
        .captured
        .lock()
        .unwrap()
        .push(CapturedRequest { headers, body });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, DOWNSTREAM_PATH)
}

/// Relay config pointing at `downstream_url` with default credentials.
pub fn relay_config(downstream_url: &str) -> BridgeConfig {
    let mut config = BridgeConfig::default();
    config.downstream.url = downstream_url.to_string();
    config.downstream.sign = "config-sign".to_string();
    config.downstream.cons = "config-cons".to_string();
    config
}

/// A relay running on an ephemeral port.
pub struct TestRelay {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestRelay {
    pub fn save_order_url(&self) -> String {
        format!("http://{}{}", self.addr, SAVE_ORDER_PATH)
    }

    #[allow(dead_code)]
    pub fn root_url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the relay. The listener is bound before returning.
pub async fn start_relay(mut config: BridgeConfig) -> TestRelay {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.server.bind_address = addr.to_string();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    TestRelay { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// A source order that passes validation.
pub fn valid_order() -> Value {
    json!({
        "no_pendaftaran": "REG-2024-0001",
        "no_rm": "RM-000123",
        "no_order": "ORD-778",
        "nama_pasien": "Siti Aminah",
        "tempat_lahir": "Bandung",
        "tgl_lahir": "1990-04-12",
        "jk": "P",
        "alamat": "Jl. Merdeka No. 1",
        "phone": "",
        "nik": "3273000000000001",
        "rujukan_asal": "Poli Penyakit Dalam",
        "detail_rujukan": [
            {
                "id_dokter": "D-01",
                "nama_dokter": "dr. Budi Santoso",
                "id_ward": "W-3",
                "ward": "Melati",
                "id_fasilitas": "F-1",
                "fasilitas": "RSUD Kota"
            }
        ],
        "cito": "1",
        "diagnose": "Anemia",
        "registration_date": "2024-05-01 08:00:00",
        "code_clinic": "INT",
        "clinic_name": "Klinik Penyakit Dalam",
        "order": [
            { "id_test": "HB", "nama_test": "Hemoglobin" },
            { "id_test": "GDS", "nama_test": "Glukosa Darah Sewaktu" }
        ]
    })
}
