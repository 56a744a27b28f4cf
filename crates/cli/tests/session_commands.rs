mod support;

use serde_json::json;
use support::{PASSWORD, Sandbox, TestBackend, USERNAME};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn login_switch_and_logout_against_backend() {
	let backend = TestBackend::start().await;
	let sandbox = Sandbox::new();
	let url = backend.url();

	let (success, json, stderr) = sandbox.run(&["--api-url", &url, "login", USERNAME, "--password", PASSWORD]).await;
	assert!(success, "login failed: {stderr}");
	assert_eq!(json["data"]["user"]["name"], "Ana Souza");
	assert_eq!(json["data"]["activeProfile"], json!({ "id": 1, "name": "Administrador" }));
	assert!(sandbox.token_file().exists());

	let (success, json, _) = sandbox.run(&["--api-url", &url, "status"]).await;
	assert!(success);
	assert_eq!(json["data"]["state"], "authenticated");
	assert_eq!(json["data"]["restore"], "restored");

	let (success, json, _) = sandbox.run(&["--api-url", &url, "can", "manage_users"]).await;
	assert!(success);
	assert_eq!(json["data"]["capabilities"], json!([{ "capability": "manage_users", "allowed": true }]));

	let (success, json, stderr) = sandbox.run(&["--api-url", &url, "switch", "fiscal", "-j", "vistoria"]).await;
	assert!(success, "switch failed: {stderr}");
	assert_eq!(json["data"]["previousProfile"]["id"], 1);
	assert_eq!(json["data"]["activeProfile"], json!({ "id": 2, "name": "Fiscal" }));

	let (_, json, _) = sandbox.run(&["--api-url", &url, "can", "submit_report"]).await;
	assert_eq!(json["data"]["activeProfile"], "Fiscal");
	assert_eq!(json["data"]["capabilities"][0]["allowed"], true);

	let (success, json, _) = sandbox.run(&["--api-url", &url, "profiles"]).await;
	assert!(success);
	let profiles = json["data"]["profiles"].as_array().unwrap();
	assert_eq!(profiles.len(), 2);
	assert_eq!(profiles[1]["active"], true);

	let (success, json, _) = sandbox.run(&["--api-url", &url, "logout"]).await;
	assert!(success);
	assert_eq!(json["data"], json!({ "hadSession": true, "serverNotified": true }));
	assert!(backend.logged_out());
	assert!(!sandbox.token_file().exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn login_reads_password_from_env() {
	let backend = TestBackend::start().await;
	let sandbox = Sandbox::new();

	let (success, json, stderr) = sandbox
		.run_with_env(&["login", USERNAME], &[("SIGESCON_API_URL", &backend.url()), ("SIGESCON_PASSWORD", PASSWORD)])
		.await;
	assert!(success, "login failed: {stderr}");
	assert_eq!(json["data"]["requiresProfileSelection"], false);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn wrong_password_reports_auth_error() {
	let backend = TestBackend::start().await;
	let sandbox = Sandbox::new();

	let (success, json, _) = sandbox.run(&["--api-url", &backend.url(), "login", USERNAME, "--password", "errada"]).await;
	assert!(!success);
	assert_eq!(json["error"]["code"], "AUTH_ERROR");
	assert_eq!(json["error"]["message"], "Usuário ou senha incorretos");
	assert_eq!(json["error"]["status"], json!(401));
	assert!(!sandbox.token_file().exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn switch_to_unknown_profile_fails_without_changing_session() {
	let backend = TestBackend::start().await;
	let sandbox = Sandbox::new();
	let url = backend.url();
	sandbox.run(&["--api-url", &url, "login", USERNAME, "--password", PASSWORD]).await;

	let (success, json, _) = sandbox.run(&["--api-url", &url, "switch", "99"]).await;
	assert!(!success);
	assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

	let (_, json, _) = sandbox.run(&["--api-url", &url, "status"]).await;
	assert_eq!(json["data"]["activeProfile"]["id"], 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn get_and_download_use_stored_token() {
	let backend = TestBackend::start().await;
	let sandbox = Sandbox::new();
	let url = backend.url();
	sandbox.run(&["--api-url", &url, "login", USERNAME, "--password", PASSWORD]).await;

	let (success, json, stderr) = sandbox.run(&["--api-url", &url, "get", "/contratos", "-q", "page=2"]).await;
	assert!(success, "get failed: {stderr}");
	assert_eq!(json["data"]["data"][0]["numero"], "001/2026");
	assert_eq!(json["data"]["query"], json!([["page", "2"]]));

	let target = sandbox.work_dir().join("out").join("contrato.pdf");
	let target_arg = target.to_string_lossy().to_string();
	let (success, json, stderr) = sandbox.run(&["--api-url", &url, "download", "/arquivos/1", "-o", &target_arg]).await;
	assert!(success, "download failed: {stderr}");
	assert_eq!(json["data"]["sizeBytes"], 8);
	assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.7");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_backend_is_network_error() {
	let sandbox = Sandbox::new();
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let url = format!("http://{}", listener.local_addr().unwrap());
	drop(listener);

	let (success, json, _) = sandbox.run(&["--api-url", &url, "login", USERNAME, "--password", PASSWORD]).await;
	assert!(!success);
	assert_eq!(json["error"]["code"], "NETWORK_ERROR");
}
