// In-process SIGESCON backend for integration tests.
//
// Serves the session endpoints with one known user (ana@sigescon.gov /
// senha123, profiles Administrador=1 and Fiscal=2) plus a few endpoints for
// exercising the API client. Failure toggles and request counters live on
// `MockState`.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Form;
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::{Value, json};
use sigescon::{ClientConfig, SessionManager, TokenStore};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const USERNAME: &str = "ana@sigescon.gov";
pub const PASSWORD: &str = "senha123";
pub const TOKEN: &str = "tok-ana";

pub struct MockState {
	pub requests: AtomicUsize,
	pub switch_calls: AtomicUsize,
	pub logout_calls: AtomicUsize,
	pub fail_user: AtomicBool,
	pub fail_logout: AtomicBool,
	pub context_delay_ms: AtomicU64,
	pub active_profile: Mutex<i64>,
	/// Returned verbatim by the switch endpoint when set.
	pub switch_override: Mutex<Option<Value>>,
	/// Profile name the switch endpoint reports instead of the real one.
	pub switch_name_override: Mutex<Option<String>>,
	pub last_logout_auth: Mutex<Option<String>>,
	pub last_switch_body: Mutex<Option<Value>>,
	/// Returned verbatim by the context endpoint when set.
	pub context_override: Mutex<Option<Value>>,
}

impl MockState {
	fn new() -> Self {
		Self {
			requests: AtomicUsize::new(0),
			switch_calls: AtomicUsize::new(0),
			logout_calls: AtomicUsize::new(0),
			fail_user: AtomicBool::new(false),
			fail_logout: AtomicBool::new(false),
			context_delay_ms: AtomicU64::new(0),
			active_profile: Mutex::new(1),
			switch_override: Mutex::new(None),
			switch_name_override: Mutex::new(None),
			last_logout_auth: Mutex::new(None),
			last_switch_body: Mutex::new(None),
			context_override: Mutex::new(None),
		}
	}

	pub fn request_count(&self) -> usize {
		self.requests.load(Ordering::SeqCst)
	}

	fn hit(&self) {
		self.requests.fetch_add(1, Ordering::SeqCst);
	}

	fn context(&self, name_override: Option<String>) -> Value {
		let active = *self.active_profile.lock().unwrap();
		let name = name_override.unwrap_or_else(|| profile_name(active).to_string());
		json!({
			"usuario_id": 42,
			"perfil_ativo_id": active,
			"perfil_ativo_nome": name,
			"perfis_disponiveis": [
				{ "id": 1, "nome": "Administrador", "descricao": "Acesso total" },
				{ "id": 2, "nome": "Fiscal", "descricao": "Fiscalização de contratos" }
			],
			"pode_alternar": true,
			"sessao_id": "sessao-1"
		})
	}
}

fn profile_name(id: i64) -> &'static str {
	match id {
		1 => "Administrador",
		2 => "Fiscal",
		_ => "Desconhecido",
	}
}

pub struct MockApi {
	pub state: Arc<MockState>,
	addr: SocketAddr,
	handle: JoinHandle<()>,
}

impl MockApi {
	pub async fn start() -> Self {
		let state = Arc::new(MockState::new());
		let app = Router::new()
			.route("/auth/login", post(login))
			.route("/auth/contexto", get(session_context))
			.route("/usuarios/me", get(current_user))
			.route("/auth/alternar-perfil", post(switch_profile))
			.route("/auth/logout", post(logout))
			.route("/empty", get(empty))
			.route("/malformed", get(malformed))
			.route("/validation", post(validation))
			.route("/echo", get(echo).post(echo))
			.route("/arquivos/relatorio.pdf", get(download))
			.with_state(Arc::clone(&state));

		let listener = TcpListener::bind("127.0.0.1:0").await.expect("mock api should bind");
		let addr = listener.local_addr().expect("mock api should have an address");
		let handle = tokio::spawn(async move {
			axum::serve(listener, app).await.expect("mock api should serve");
		});

		Self { state, addr, handle }
	}

	pub fn url(&self) -> String {
		format!("http://{}", self.addr)
	}

	pub fn config(&self) -> ClientConfig {
		ClientConfig::new(&self.url()).expect("mock url is valid")
	}

	pub fn manager(&self, tokens: Arc<dyn TokenStore>) -> SessionManager {
		SessionManager::connect(self.config(), tokens).expect("manager should build")
	}
}

impl Drop for MockApi {
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
	(StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Token inválido ou expirado" }))).into_response()
}

#[derive(Deserialize)]
struct LoginForm {
	username: String,
	password: String,
}

async fn login(State(state): State<Arc<MockState>>, Form(form): Form<LoginForm>) -> Response {
	state.hit();
	if form.username != USERNAME || form.password != PASSWORD {
		return (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Usuário ou senha incorretos" }))).into_response();
	}
	Json(json!({
		"access_token": TOKEN,
		"token_type": "bearer",
		"contexto_sessao": state.context(None),
		"requer_selecao_perfil": false
	}))
	.into_response()
}

async fn session_context(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
	state.hit();
	let delay = state.context_delay_ms.load(Ordering::SeqCst);
	if delay > 0 {
		tokio::time::sleep(Duration::from_millis(delay)).await;
	}
	if !authorized(&headers) {
		return unauthorized();
	}
	if let Some(body) = state.context_override.lock().unwrap().clone() {
		return Json(body).into_response();
	}
	Json(state.context(None)).into_response()
}

async fn current_user(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
	state.hit();
	if !authorized(&headers) {
		return unauthorized();
	}
	if state.fail_user.load(Ordering::SeqCst) {
		return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
	}
	Json(json!({
		"id": 42,
		"nome": "Ana Souza",
		"email": USERNAME,
		"matricula": "M-0042",
		"perfis": ["Administrador", "Fiscal"]
	}))
	.into_response()
}

async fn switch_profile(State(state): State<Arc<MockState>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
	state.hit();
	state.switch_calls.fetch_add(1, Ordering::SeqCst);
	*state.last_switch_body.lock().unwrap() = Some(body.clone());
	if !authorized(&headers) {
		return unauthorized();
	}
	if let Some(response) = state.switch_override.lock().unwrap().clone() {
		return Json(response).into_response();
	}
	let Some(target) = body.get("novo_perfil_id").and_then(Value::as_i64) else {
		return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": [{ "loc": ["body"], "msg": "field required" }] }))).into_response();
	};
	if !matches!(target, 1 | 2) {
		return (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Perfil não disponível para o usuário" }))).into_response();
	}
	*state.active_profile.lock().unwrap() = target;
	let name_override = state.switch_name_override.lock().unwrap().clone();
	let mut context = state.context(name_override);
	context["data_ultima_alternancia"] = json!("2026-10-16T12:00:00Z");
	Json(context).into_response()
}

async fn logout(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
	state.hit();
	state.logout_calls.fetch_add(1, Ordering::SeqCst);
	*state.last_logout_auth.lock().unwrap() = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).map(str::to_string);
	if state.fail_logout.load(Ordering::SeqCst) {
		return StatusCode::INTERNAL_SERVER_ERROR.into_response();
	}
	Json(json!({ "message": "Logout realizado" })).into_response()
}

async fn empty(State(state): State<Arc<MockState>>) -> Response {
	state.hit();
	StatusCode::NO_CONTENT.into_response()
}

async fn malformed(State(state): State<Arc<MockState>>) -> Response {
	state.hit();
	(StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], "{\"contratos\": [").into_response()
}

async fn validation(State(state): State<Arc<MockState>>) -> Response {
	state.hit();
	(
		StatusCode::UNPROCESSABLE_ENTITY,
		Json(json!({
			"detail": [
				{ "loc": ["body", "numero"], "msg": "Número do contrato é obrigatório" },
				{ "loc": ["body", "valor"], "msg": "Valor deve ser positivo" }
			]
		})),
	)
		.into_response()
}

async fn echo(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
	state.hit();
	let header_value = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
	Json(json!({
		"authorization": header_value(header::AUTHORIZATION),
		"contentType": header_value(header::CONTENT_TYPE),
		"bodyLength": body.len(),
	}))
	.into_response()
}

async fn download(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
	state.hit();
	if !authorized(&headers) {
		return unauthorized();
	}
	(StatusCode::OK, [(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.7 fake".to_vec()).into_response()
}
