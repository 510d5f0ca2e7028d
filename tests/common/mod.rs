#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const BIN: &str = env!("CARGO_BIN_EXE_notes-api");

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(BIN)
            .arg("serve")
            .env("NOTES_STORE", "memory")
            .env("NOTES_API_PORT", port.to_string())
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            // Any answer means the listener is up; without a token it is 401
            if client.get(format!("{}/notes", self.base_url)).send().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Bearer header for a token the gateway would have verified
pub fn bearer(sub: &str) -> String {
    let token = encode(
        &Header::default(),
        &json!({ "sub": sub, "token_use": "access" }),
        &EncodingKey::from_secret(b"upstream-gateway"),
    )
    .expect("encode test token");
    format!("Bearer {}", token)
}

/// Owner id unique to one test, so tests sharing the server do not collide
pub fn unique_owner(label: &str) -> String {
    format!("{}-{}", label, uuid::Uuid::new_v4().simple())
}
