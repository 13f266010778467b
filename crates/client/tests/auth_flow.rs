mod support;

use std::sync::Arc;

use smartbiz_auth::{Access, FileSessionStore, MemorySessionStore, Role, Route, SessionStore, guard};
use smartbiz_client::{AuthClient, ClientError, Credentials, RegistrationRequest, SupplierClient};

use support::{PASSWORD, TestServer};

#[tokio::test]
async fn login_persists_session_and_opens_the_role_dashboard() {
    let srv = TestServer::spawn().await;
    let store = Arc::new(MemorySessionStore::new());
    let auth = AuthClient::new(srv.config(), store.clone());

    let session = auth
        .login(Role::Owner, &Credentials::new("o@x.com", PASSWORD))
        .await
        .unwrap();

    assert_eq!(session.role(), Some(Role::Owner));
    assert_eq!(session.token().unwrap().as_str(), "token-owner");
    assert_eq!(store.read(), session);

    let landing = Role::Owner.dashboard_route();
    assert_eq!(landing, Route::OwnerDashboard);
    assert_eq!(guard(store.as_ref(), landing), Access::Allow);
    assert_eq!(
        guard(store.as_ref(), Route::AdminDashboard),
        Access::Redirect(Route::Login)
    );
}

#[tokio::test]
async fn rejected_login_leaves_no_session() {
    let srv = TestServer::spawn().await;
    let store = Arc::new(MemorySessionStore::new());
    let auth = AuthClient::new(srv.config(), store.clone());

    let err = auth
        .login(Role::Admin, &Credentials::new("a@x.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Invalid email or password");
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn login_against_dead_server_uses_fallback_message() {
    let config = smartbiz_client::ClientConfig::new(&support::dead_base_url().await).unwrap();
    let auth = AuthClient::new(config, Arc::new(MemorySessionStore::new()));

    let err = auth
        .login(Role::Employee, &Credentials::new("e@x.com", PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));
    assert_eq!(err.message(), "Login failed");
}

#[tokio::test]
async fn logout_clears_the_session_and_locks_dashboards() {
    let srv = TestServer::spawn().await;
    let store = Arc::new(MemorySessionStore::new());
    let auth = AuthClient::new(srv.config(), store.clone());
    auth.login(Role::Employee, &Credentials::new("e@x.com", PASSWORD))
        .await
        .unwrap();

    auth.logout().unwrap();

    assert!(!store.is_authenticated());
    assert_eq!(
        guard(store.as_ref(), Route::EmployeeDashboard),
        Access::Redirect(Route::Login)
    );
}

#[tokio::test]
async fn session_from_login_authorizes_supplier_calls() {
    let srv = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(dir.path().join("session.json")));

    let auth = AuthClient::new(srv.config(), store.clone());
    auth.login(Role::Owner, &Credentials::new("o@x.com", PASSWORD))
        .await
        .unwrap();

    let suppliers = SupplierClient::new(srv.config(), store);
    suppliers.list().await.unwrap();

    assert_eq!(
        srv.state.auth_headers(),
        vec![Some("Bearer token-owner".to_string())]
    );
}

#[tokio::test]
async fn register_creates_account_without_logging_in() {
    let srv = TestServer::spawn().await;
    let store = Arc::new(MemorySessionStore::new());
    let auth = AuthClient::new(srv.config(), store.clone());

    let request = RegistrationRequest {
        email: "o@x.com".to_string(),
        password: "pw".to_string(),
        name: "Olivia".to_string(),
        role: Role::Owner,
    };
    let confirmation = auth.register(&request).await.unwrap();

    assert_eq!(confirmation, "Registration successful!");
    assert!(!store.is_authenticated());
    let accounts = srv.state.accounts();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0]["role"], "owner");
    assert_eq!(accounts[0]["name"], "Olivia");

    let err = auth.register(&request).await.unwrap_err();
    assert_eq!(err.message(), "Email already registered");
}

#[tokio::test]
async fn admin_accounts_cannot_be_registered() {
    let srv = TestServer::spawn().await;
    let auth = AuthClient::new(srv.config(), Arc::new(MemorySessionStore::new()));

    let err = auth
        .register(&RegistrationRequest {
            email: "root@x.com".to_string(),
            password: "pw".to_string(),
            name: "Root".to_string(),
            role: Role::Admin,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(srv.state.accounts().is_empty());
}
