use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use salon_hub::auth::AuthenticatedUser;
use salon_hub::db::{DbPool, establish_connection_pool};
use salon_hub::models::config::{AsaasConfig, ServerConfig, UazapiConfig};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// File-backed SQLite database in a temp directory with all migrations
/// applied; removed when the value drops.
pub struct TestDb {
    pool: DbPool,
    _dir: tempfile::TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let database_url = dir.path().join(name).to_string_lossy().to_string();

        let pool = establish_connection_pool(&database_url).expect("create pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub const TEST_SECRET: &str = "test-secret";

#[allow(dead_code)]
pub fn test_config(database_url: &str) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        database_url: database_url.to_string(),
        secret: TEST_SECRET.to_string(),
        uazapi: UazapiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            token: "test-token".to_string(),
            establishment_id: 1,
            default_country_code: "55".to_string(),
            webhook_secret: None,
        },
        asaas: AsaasConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: None,
            webhook_token: None,
        },
    }
}

#[allow(dead_code)]
pub fn test_user(establishment_id: i32, roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user-1".to_string(),
        email: "staff@example.com".to_string(),
        name: "Staff".to_string(),
        establishment_id,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: usize::MAX,
    }
}

#[allow(dead_code)]
pub fn bearer_token(user: &AuthenticatedUser) -> String {
    format!("Bearer {}", user.to_jwt(TEST_SECRET).expect("encode jwt"))
}
