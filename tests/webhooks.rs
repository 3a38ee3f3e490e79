use actix_web::{App, http::StatusCode, test, web};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;

use salon_hub::domain::appointment::{AppointmentStatus, NewAppointment};
use salon_hub::domain::client::NewClient;
use salon_hub::domain::conversation::{MessageDirection, MessageStatus, NewMessage};
use salon_hub::domain::payment::{PaymentMethod, PaymentProvider, PaymentStatus};
use salon_hub::domain::subscription::{
    BillingCycle, NewSubscription, NewSubscriptionPlan, SubscriptionStatus,
};
use salon_hub::domain::professional::NewProfessional;
use salon_hub::domain::service::NewService;
use salon_hub::domain::webhook_event::WebhookStatus;
use salon_hub::repository::{
    AppointmentReader, AppointmentWriter, ClientListQuery, ClientReader, ClientWriter,
    CommissionReader, ConversationReader, ConversationWriter, DieselRepository, PaymentReader,
    ProfessionalWriter, ServiceWriter, SubscriptionReader, SubscriptionWriter,
    WebhookEventReader,
};
use salon_hub::routes::webhooks::{asaas_webhook, uazapi_webhook};
use salon_hub::services::webhooks::{asaas::apply_asaas_event, uazapi::apply_uazapi_event};

mod common;

struct Booking {
    client_id: i32,
    professional_id: i32,
    appointment_id: i32,
}

fn seed_booking(repo: &DieselRepository) -> Booking {
    repo.create_clients(&[NewClient::new(
        1,
        "Alice".to_string(),
        Some("alice@example.com".to_string()),
        Some("+5511999990001".to_string()),
        NaiveDate::from_ymd_opt(1990, 6, 15),
        None,
    )])
    .unwrap();
    let client = repo
        .list_clients(ClientListQuery::new(1))
        .unwrap()
        .1
        .remove(0);

    let professional = repo
        .create_professional(&NewProfessional::new(
            1,
            "Marcos".to_string(),
            "marcos@example.com".to_string(),
            None,
            4000,
        ))
        .unwrap();

    let service = repo
        .create_service(&NewService {
            establishment_id: 1,
            name: "Corte".to_string(),
            duration_min: 30,
            price_cents: 5000,
            commission_bps: None,
        })
        .unwrap();

    let starts_at = Utc::now().naive_utc() + Duration::hours(4);
    let appointment = repo
        .create_appointment(&NewAppointment {
            establishment_id: 1,
            client_id: client.id,
            professional_id: professional.id,
            service_id: service.id,
            starts_at,
            ends_at: starts_at + Duration::minutes(30),
            notes: None,
        })
        .unwrap();

    Booking {
        client_id: client.id,
        professional_id: professional.id,
        appointment_id: appointment.id,
    }
}

#[std::prelude::v1::test]
fn asaas_payment_received_settles_and_books_commission() {
    let test_db = common::TestDb::new("asaas_payment_received.db");
    let repo = DieselRepository::new(test_db.pool());
    let booking = seed_booking(&repo);

    let raw = json!({
        "event": "PAYMENT_RECEIVED",
        "payment": {
            "id": "pay_001",
            "value": 50.0,
            "billingType": "PIX",
            "externalReference": format!("appt:{}", booking.appointment_id),
        }
    })
    .to_string();

    let status = apply_asaas_event(&repo, &raw).unwrap();
    assert_eq!(status, WebhookStatus::Processed);

    let payment = repo
        .get_payment_by_provider_ref(PaymentProvider::Asaas, "pay_001")
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Paid);
    assert_eq!(payment.method, PaymentMethod::Pix);
    assert_eq!(payment.amount_cents, 5000);
    assert_eq!(payment.appointment_id, Some(booking.appointment_id));
    assert_eq!(payment.client_id, Some(booking.client_id));

    // 40% of R$50.00
    let commission = repo
        .find_commission_for_payment(payment.id)
        .unwrap()
        .unwrap();
    assert_eq!(commission.professional_id, booking.professional_id);
    assert_eq!(commission.rate_bps, 4000);
    assert_eq!(commission.amount_cents, 2000);

    // Redelivery re-applies the same conditional update without a second
    // commission entry.
    let status = apply_asaas_event(&repo, &raw).unwrap();
    assert_eq!(status, WebhookStatus::Processed);
    let entries = repo
        .list_commission_entries(
            booking.professional_id,
            Utc::now().naive_utc() - Duration::days(1),
            Utc::now().naive_utc() + Duration::days(1),
        )
        .unwrap();
    assert_eq!(entries.len(), 1);
}

#[std::prelude::v1::test]
fn asaas_refund_reverses_commission() {
    let test_db = common::TestDb::new("asaas_refund.db");
    let repo = DieselRepository::new(test_db.pool());
    let booking = seed_booking(&repo);

    let received = json!({
        "event": "PAYMENT_RECEIVED",
        "payment": {
            "id": "pay_002",
            "value": 50.0,
            "billingType": "CREDIT_CARD",
            "externalReference": format!("appt:{}", booking.appointment_id),
        }
    })
    .to_string();
    apply_asaas_event(&repo, &received).unwrap();

    let refunded = json!({
        "event": "PAYMENT_REFUNDED",
        "payment": {
            "id": "pay_002",
            "value": 50.0,
        }
    })
    .to_string();
    let status = apply_asaas_event(&repo, &refunded).unwrap();
    assert_eq!(status, WebhookStatus::Processed);

    let payment = repo
        .get_payment_by_provider_ref(PaymentProvider::Asaas, "pay_002")
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Refunded);

    let entries = repo
        .list_commission_entries(
            booking.professional_id,
            Utc::now().naive_utc() - Duration::days(1),
            Utc::now().naive_utc() + Duration::days(1),
        )
        .unwrap();
    assert_eq!(entries.len(), 2);
    let net: i64 = entries.iter().map(|e| e.amount_cents).sum();
    assert_eq!(net, 0);
}

#[std::prelude::v1::test]
fn asaas_subscription_payment_activates_subscription() {
    let test_db = common::TestDb::new("asaas_subscription_payment.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_clients(&[NewClient::new(
        1,
        "Alice".to_string(),
        None,
        None,
        None,
        None,
    )])
    .unwrap();
    let client = repo
        .list_clients(ClientListQuery::new(1))
        .unwrap()
        .1
        .remove(0);
    let plan = repo
        .create_plan(&NewSubscriptionPlan {
            establishment_id: 1,
            name: "Clube".to_string(),
            price_cents: 9900,
            billing_cycle: BillingCycle::Monthly,
        })
        .unwrap();
    let subscription = repo
        .create_subscription(&NewSubscription {
            establishment_id: 1,
            client_id: client.id,
            plan_id: plan.id,
            started_at: Utc::now().naive_utc(),
        })
        .unwrap();
    repo.set_subscription_provider_ref(subscription.id, "sub_abc")
        .unwrap();

    let raw = json!({
        "event": "PAYMENT_CONFIRMED",
        "payment": {
            "id": "pay_003",
            "value": 99.0,
            "billingType": "BOLETO",
            "subscription": "sub_abc",
            "paymentDate": "2026-08-01",
        }
    })
    .to_string();

    let status = apply_asaas_event(&repo, &raw).unwrap();
    assert_eq!(status, WebhookStatus::Processed);

    let active = repo
        .get_subscription_by_id(subscription.id, 1)
        .unwrap()
        .unwrap();
    assert_eq!(active.status, SubscriptionStatus::Active);
    let period_end = active.current_period_end.unwrap();
    assert_eq!(period_end.date(), NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());

    // Overdue on the next cycle marks it past due.
    let overdue = json!({
        "event": "PAYMENT_OVERDUE",
        "payment": { "id": "pay_003", "value": 99.0 }
    })
    .to_string();
    apply_asaas_event(&repo, &overdue).unwrap();
    let past_due = repo
        .get_subscription_by_id(subscription.id, 1)
        .unwrap()
        .unwrap();
    assert_eq!(past_due.status, SubscriptionStatus::PastDue);
    assert_eq!(past_due.current_period_end, Some(period_end));
}

#[std::prelude::v1::test]
fn asaas_unknown_or_unlinked_events_are_ignored() {
    let test_db = common::TestDb::new("asaas_ignored.db");
    let repo = DieselRepository::new(test_db.pool());

    let unknown = json!({
        "event": "PAYMENT_ANTICIPATED",
        "payment": { "id": "pay_x", "value": 10.0 }
    })
    .to_string();
    assert_eq!(
        apply_asaas_event(&repo, &unknown).unwrap(),
        WebhookStatus::Ignored
    );

    let unlinked = json!({
        "event": "PAYMENT_CREATED",
        "payment": { "id": "pay_y", "value": 10.0, "externalReference": "order-9" }
    })
    .to_string();
    assert_eq!(
        apply_asaas_event(&repo, &unlinked).unwrap(),
        WebhookStatus::Ignored
    );

    assert!(apply_asaas_event(&repo, "not json").is_err());
}

#[std::prelude::v1::test]
fn uazapi_inbound_message_confirms_appointment() {
    let test_db = common::TestDb::new("uazapi_confirm.db");
    let repo = DieselRepository::new(test_db.pool());
    let booking = seed_booking(&repo);

    let raw = json!({
        "event": "messages",
        "message": {
            "id": "wamid_1",
            "sender": "5511999990001@s.whatsapp.net",
            "fromMe": false,
            "text": "1",
        }
    })
    .to_string();

    let status = apply_uazapi_event(&repo, &raw, 1, "55").unwrap();
    assert_eq!(status, WebhookStatus::Processed);

    let appointment = repo
        .get_appointment_by_id(booking.appointment_id, 1)
        .unwrap()
        .unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Confirmed);

    // Thread was created, linked to the client, and holds the inbound
    // message.
    let conversation = repo
        .find_conversation_by_phone(1, "+5511999990001")
        .unwrap()
        .unwrap();
    assert_eq!(conversation.client_id, Some(booking.client_id));
    let messages = repo.list_messages(conversation.id).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].direction, MessageDirection::In);
    assert_eq!(messages[0].content, "1");
}

#[std::prelude::v1::test]
fn uazapi_cancellation_and_agent_commands() {
    let test_db = common::TestDb::new("uazapi_cancel.db");
    let repo = DieselRepository::new(test_db.pool());
    let booking = seed_booking(&repo);

    let cancel = json!({
        "event": "messages",
        "message": {
            "sender": "5511999990001",
            "fromMe": false,
            "text": "cancelar",
        }
    })
    .to_string();
    apply_uazapi_event(&repo, &cancel, 1, "55").unwrap();

    let appointment = repo
        .get_appointment_by_id(booking.appointment_id, 1)
        .unwrap()
        .unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Canceled);

    let pause = json!({
        "event": "messages",
        "message": {
            "sender": "5511999990001",
            "fromMe": false,
            "text": "#pausar",
        }
    })
    .to_string();
    apply_uazapi_event(&repo, &pause, 1, "55").unwrap();

    let conversation = repo
        .find_conversation_by_phone(1, "+5511999990001")
        .unwrap()
        .unwrap();
    assert!(!conversation.ai_enabled);
}

#[std::prelude::v1::test]
fn uazapi_delivery_receipt_updates_message() {
    let test_db = common::TestDb::new("uazapi_receipt.db");
    let repo = DieselRepository::new(test_db.pool());

    let conversation = repo
        .upsert_conversation(1, "+5511999990001", None, Utc::now().naive_utc())
        .unwrap();
    repo.create_message(&NewMessage {
        conversation_id: conversation.id,
        direction: MessageDirection::Out,
        content: "Olá".to_string(),
        provider_ref: Some("wamid_9".to_string()),
        status: MessageStatus::Sent,
    })
    .unwrap();

    let receipt = json!({
        "event": "messages_update",
        "update": { "id": "wamid_9", "status": "read" }
    })
    .to_string();
    assert_eq!(
        apply_uazapi_event(&repo, &receipt, 1, "55").unwrap(),
        WebhookStatus::Processed
    );
    let messages = repo.list_messages(conversation.id).unwrap();
    assert_eq!(messages[0].status, MessageStatus::Read);

    // Receipt for an unknown message id is acknowledged but ignored.
    let unknown = json!({
        "event": "messages_update",
        "update": { "id": "wamid_404", "status": "read" }
    })
    .to_string();
    assert_eq!(
        apply_uazapi_event(&repo, &unknown, 1, "55").unwrap(),
        WebhookStatus::Ignored
    );
}

#[actix_web::test]
async fn asaas_endpoint_records_event_and_enforces_token() {
    let test_db = common::TestDb::new("asaas_endpoint.db");
    let repo = DieselRepository::new(test_db.pool());

    let mut config = common::test_config("unused");
    config.asaas.webhook_token = Some("expected-token".to_string());

    let app = test::init_service(
        App::new()
            .service(web::scope("/webhooks").service(asaas_webhook))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config)),
    )
    .await;

    // Wrong token is rejected before anything is recorded.
    let req = test::TestRequest::post()
        .uri("/webhooks/asaas")
        .insert_header(("asaas-access-token", "wrong"))
        .set_payload(r#"{"event":"PAYMENT_RECEIVED"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(repo.list_webhook_events(10).unwrap().is_empty());

    // Valid token: the delivery is recorded and acknowledged even though
    // it matches no local entity.
    let req = test::TestRequest::post()
        .uri("/webhooks/asaas")
        .insert_header(("asaas-access-token", "expected-token"))
        .set_payload(r#"{"event":"PAYMENT_RECEIVED","payment":{"id":"pay_z","value":1.0}}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let events = repo.list_webhook_events(10).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "PAYMENT_RECEIVED");
    assert_eq!(events[0].status, WebhookStatus::Ignored);
}

#[actix_web::test]
async fn uazapi_endpoint_handles_connection_events() {
    let test_db = common::TestDb::new("uazapi_endpoint.db");
    let repo = DieselRepository::new(test_db.pool());
    let config = common::test_config("unused");

    let app = test::init_service(
        App::new()
            .service(web::scope("/webhooks").service(uazapi_webhook))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhooks/uazapi")
        .set_payload(r#"{"event":"connection","instance":"main","status":"disconnected"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let events = repo.list_webhook_events(10).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].status, WebhookStatus::Processed);
}
