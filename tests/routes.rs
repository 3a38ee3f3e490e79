use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use salon_hub::repository::DieselRepository;
use salon_hub::routes::appointments::{add_appointment, list_appointments};
use salon_hub::routes::catalog::add_service;
use salon_hub::routes::clients::{add_client, get_client, list_clients};
use salon_hub::routes::main::health;
use salon_hub::routes::professionals::add_professional;

mod common;

fn test_app_config(
    repo: DieselRepository,
    config: salon_hub::models::config::ServerConfig,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(health)
            .service(
                web::scope("/api/v1")
                    .service(list_clients)
                    .service(get_client)
                    .service(add_client)
                    .service(add_professional)
                    .service(add_service)
                    .service(list_appointments)
                    .service(add_appointment),
            )
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(salon_hub::integrations::uazapi::UazapiClient::new(
                &config.uazapi,
            )))
            .app_data(web::Data::new(config));
    }
}

#[actix_web::test]
async fn health_endpoint_is_public() {
    let test_db = common::TestDb::new("routes_health.db");
    let repo = DieselRepository::new(test_db.pool());
    let config = common::test_config("unused");

    let app = test::init_service(App::new().configure(test_app_config(repo, config))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn api_requires_bearer_token() {
    let test_db = common::TestDb::new("routes_auth.db");
    let repo = DieselRepository::new(test_db.pool());
    let config = common::test_config("unused");

    let app = test::init_service(App::new().configure(test_app_config(repo, config))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/clients").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/clients")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn client_crud_over_http() {
    let test_db = common::TestDb::new("routes_client_crud.db");
    let repo = DieselRepository::new(test_db.pool());
    let config = common::test_config("unused");
    let user = common::test_user(1, &["salon", "salon_admin"]);
    let token = common::bearer_token(&user);

    let app = test::init_service(App::new().configure(test_app_config(repo, config))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/clients")
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({
                "name": "Alice",
                "email": "alice@example.com",
                "phone": "+55 11 99999-0001",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/clients?q=alice")
            .insert_header(("Authorization", token.clone()))
            .to_request(),
    )
    .await;
    assert_eq!(body["total"], 1);
    // Phone was normalized to E.164 on the way in.
    assert_eq!(
        body["clients"]["items"][0]["phone"],
        Value::String("+5511999990001".to_string())
    );

    // Role gating: a user without the access role gets 401.
    let outsider = common::test_user(1, &["other_app"]);
    let outsider_token = common::bearer_token(&outsider);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/clients")
            .insert_header(("Authorization", outsider_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn appointment_booking_rejects_conflicts() {
    let test_db = common::TestDb::new("routes_appointment_conflict.db");
    let repo = DieselRepository::new(test_db.pool());
    let config = common::test_config("unused");
    let user = common::test_user(1, &["salon", "salon_admin"]);
    let token = common::bearer_token(&user);

    let app = test::init_service(App::new().configure(test_app_config(repo, config))).await;

    let post = |uri: &str, body: Value, token: String| {
        test::TestRequest::post()
            .uri(uri)
            .insert_header(("Authorization", token))
            .set_json(body)
            .to_request()
    };

    let resp = test::call_service(
        &app,
        post(
            "/api/v1/clients",
            json!({ "name": "Alice" }),
            token.clone(),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let professional: Value = test::call_and_read_body_json(
        &app,
        post(
            "/api/v1/professionals",
            json!({
                "name": "Marcos",
                "email": "marcos@example.com",
                "commission_bps": 4000,
            }),
            token.clone(),
        ),
    )
    .await;

    let service: Value = test::call_and_read_body_json(
        &app,
        post(
            "/api/v1/services",
            json!({
                "name": "Corte",
                "duration_min": 30,
                "price_cents": 5000,
            }),
            token.clone(),
        ),
    )
    .await;

    let clients: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/clients")
            .insert_header(("Authorization", token.clone()))
            .to_request(),
    )
    .await;
    let client_id = clients["clients"]["items"][0]["id"].clone();

    let booking = json!({
        "client_id": client_id,
        "professional_id": professional["id"],
        "service_id": service["id"],
        "starts_at": "2026-09-01T10:00:00",
    });

    let resp = test::call_service(&app, post("/api/v1/appointments", booking.clone(), token.clone())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Same professional, overlapping window.
    let overlapping = json!({
        "client_id": client_id,
        "professional_id": professional["id"],
        "service_id": service["id"],
        "starts_at": "2026-09-01T10:15:00",
    });
    let resp = test::call_service(&app, post("/api/v1/appointments", overlapping, token.clone())).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Unknown service is a validation error.
    let bad_service = json!({
        "client_id": client_id,
        "professional_id": professional["id"],
        "service_id": 999,
        "starts_at": "2026-09-02T10:00:00",
    });
    let resp = test::call_service(&app, post("/api/v1/appointments", bad_service, token)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
