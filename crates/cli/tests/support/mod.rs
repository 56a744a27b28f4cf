#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const USERNAME: &str = "ana@sigescon.gov";
pub const PASSWORD: &str = "senha123";
const TOKEN: &str = "tok-cli";

/// Isolated config directory for one test.
pub struct Sandbox {
	dir: TempDir,
}

impl Sandbox {
	pub fn new() -> Self {
		Self {
			dir: TempDir::new().expect("temp dir should be created"),
		}
	}

	pub fn token_file(&self) -> PathBuf {
		self.dir.path().join("sigescon").join("auth.json")
	}

	pub fn config_file(&self) -> PathBuf {
		self.dir.path().join("sigescon").join("config.json")
	}

	pub fn work_dir(&self) -> PathBuf {
		self.dir.path().to_path_buf()
	}

	/// Runs the binary with JSON output and returns (success, envelope, stderr).
	pub async fn run(&self, args: &[&str]) -> (bool, Value, String) {
		self.run_with_env(args, &[]).await
	}

	pub async fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> (bool, Value, String) {
		let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_sigescon"));
		command
			.current_dir(self.dir.path())
			.args(["-f", "json"])
			.args(args)
			.env("XDG_CONFIG_HOME", self.dir.path())
			.env_remove("SIGESCON_API_URL")
			.env_remove("SIGESCON_PASSWORD")
			.env_remove("RUST_LOG")
			.stdin(Stdio::null());
		for (key, value) in env {
			command.env(key, value);
		}
		let output = command.output().await.expect("failed to execute sigescon");

		let stdout = String::from_utf8_lossy(&output.stdout).to_string();
		let stderr = String::from_utf8_lossy(&output.stderr).to_string();
		let parsed = serde_json::from_str::<Value>(&stdout).unwrap_or_else(|_| json!({ "raw": stdout }));
		(output.status.success(), parsed, stderr)
	}
}

struct Backend {
	active: AtomicI64,
	logged_out: AtomicBool,
}

/// Minimal SIGESCON backend: one user holding Administrador (1) and Fiscal (2).
pub struct TestBackend {
	addr: std::net::SocketAddr,
	state: Arc<Backend>,
	handle: JoinHandle<()>,
}

impl TestBackend {
	pub async fn start() -> Self {
		let state = Arc::new(Backend {
			active: AtomicI64::new(1),
			logged_out: AtomicBool::new(false),
		});
		let app = Router::new()
			.route("/auth/login", post(login))
			.route("/auth/contexto", get(context))
			.route("/usuarios/me", get(me))
			.route("/auth/alternar-perfil", post(switch))
			.route("/auth/logout", post(logout))
			.route("/contratos", get(contracts))
			.route("/arquivos/1", get(file))
			.with_state(Arc::clone(&state));

		let listener = TcpListener::bind("127.0.0.1:0").await.expect("backend should bind");
		let addr = listener.local_addr().expect("backend should have an address");
		let handle = tokio::spawn(async move {
			axum::serve(listener, app).await.expect("backend should serve");
		});
		Self { addr, state, handle }
	}

	pub fn url(&self) -> String {
		format!("http://{}", self.addr)
	}

	pub fn logged_out(&self) -> bool {
		self.state.logged_out.load(Ordering::SeqCst)
	}
}

impl Drop for TestBackend {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

fn authorized(headers: &HeaderMap) -> bool {
	headers
		.get(header::AUTHORIZATION)
		.and_then(|v| v.to_str().ok())
		.is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
	(StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Não autenticado" }))).into_response()
}

fn session_context(active: i64) -> Value {
	let name = if active == 2 { "Fiscal" } else { "Administrador" };
	json!({
		"usuario_id": 42,
		"perfil_ativo_id": active,
		"perfil_ativo_nome": name,
		"perfis_disponiveis": [
			{ "id": 1, "nome": "Administrador" },
			{ "id": 2, "nome": "Fiscal" }
		],
		"pode_alternar": true
	})
}

#[derive(Deserialize)]
struct LoginForm {
	username: String,
	password: String,
}

async fn login(State(state): State<Arc<Backend>>, Form(form): Form<LoginForm>) -> Response {
	if form.username != USERNAME || form.password != PASSWORD {
		return (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Usuário ou senha incorretos" }))).into_response();
	}
	Json(json!({
		"access_token": TOKEN,
		"token_type": "bearer",
		"contexto_sessao": session_context(state.active.load(Ordering::SeqCst))
	}))
	.into_response()
}

async fn context(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	Json(session_context(state.active.load(Ordering::SeqCst))).into_response()
}

async fn me(headers: HeaderMap) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	Json(json!({ "id": 42, "nome": "Ana Souza", "email": USERNAME, "perfis": ["Administrador", "Fiscal"] })).into_response()
}

async fn switch(State(state): State<Arc<Backend>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	match body.get("novo_perfil_id").and_then(Value::as_i64) {
		Some(id @ (1 | 2)) => {
			state.active.store(id, Ordering::SeqCst);
			Json(session_context(id)).into_response()
		}
		_ => (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Perfil não disponível" }))).into_response(),
	}
}

async fn logout(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	state.logged_out.store(true, Ordering::SeqCst);
	Json(json!({ "message": "ok" })).into_response()
}

async fn contracts(headers: HeaderMap, axum::extract::Query(query): axum::extract::Query<Vec<(String, String)>>) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	Json(json!({ "data": [{ "id": 1, "numero": "001/2026" }], "query": query })).into_response()
}

async fn file(headers: HeaderMap) -> Response {
	if !authorized(&headers) {
		return unauthorized();
	}
	(StatusCode::OK, [(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.7".to_vec()).into_response()
}
