use chrono::{Duration, NaiveDate, Utc};

use salon_hub::domain::appointment::{AppointmentStatus, NewAppointment};
use salon_hub::domain::client::{NewClient, UpdateClient};
use salon_hub::domain::conversation::{MessageDirection, MessageStatus, NewMessage};
use salon_hub::domain::payment::{NewPayment, PaymentMethod, PaymentProvider, PaymentStatus};
use salon_hub::domain::product::{NewProduct, NewStockMovement};
use salon_hub::domain::professional::NewProfessional;
use salon_hub::domain::service::NewService;
use salon_hub::domain::subscription::{
    BillingCycle, NewSubscription, NewSubscriptionPlan, SubscriptionStatus,
};
use salon_hub::domain::webhook_event::{NewWebhookEvent, WebhookProvider, WebhookStatus};
use salon_hub::repository::{
    AppointmentReader, AppointmentWriter, ClientListQuery, ClientReader, ClientWriter,
    ConversationReader, ConversationWriter, DieselRepository, PaymentReader, PaymentWriter,
    ProductReader, ProductWriter, ProfessionalWriter, ServiceWriter, SubscriptionReader,
    SubscriptionWriter, WebhookEventReader, WebhookEventWriter,
};

mod common;

fn sample_client(establishment_id: i32, name: &str, phone: &str) -> NewClient {
    NewClient::new(
        establishment_id,
        name.to_string(),
        Some(format!("{}@example.com", name.to_lowercase())),
        Some(phone.to_string()),
        NaiveDate::from_ymd_opt(1990, 6, 15),
        None,
    )
}

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_clients(&[
            sample_client(1, "Alice", "+5511999990001"),
            sample_client(1, "Bob", "+5511999990002"),
            sample_client(2, "Carol", "+5511999990003"),
        ])
        .unwrap();
    assert_eq!(created, 3);

    // Tenant scoping
    let (total, items) = repo.list_clients(ClientListQuery::new(1)).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let (search_total, search_items) = repo
        .list_clients(ClientListQuery::new(1).search("Bob"))
        .unwrap();
    assert_eq!(search_total, 1);
    let bob = search_items[0].clone();
    assert_eq!(bob.name, "Bob");

    // Phone lookup honors the tenant
    assert!(
        repo.get_client_by_phone("+5511999990002", 1)
            .unwrap()
            .is_some()
    );
    assert!(
        repo.get_client_by_phone("+5511999990002", 2)
            .unwrap()
            .is_none()
    );

    let updates = UpdateClient::new(
        "Bobby".to_string(),
        Some("bobby@example.com".to_string()),
        Some("+5511999990002".to_string()),
        None,
        Some("prefers clipper cut".to_string()),
    );
    let updated = repo.update_client(bob.id, 1, &updates).unwrap();
    assert_eq!(updated.name, "Bobby");
    assert_eq!(updated.notes.as_deref(), Some("prefers clipper cut"));

    // Cross-tenant update must not match any row
    assert!(repo.update_client(bob.id, 2, &updates).is_err());

    repo.delete_client(bob.id, 1).unwrap();
    assert!(repo.get_client_by_id(bob.id, 1).unwrap().is_none());
}

#[test]
fn test_client_birthday_filter() {
    let test_db = common::TestDb::new("test_client_birthday_filter.db");
    let repo = DieselRepository::new(test_db.pool());

    let june = NewClient::new(
        1,
        "June".to_string(),
        None,
        None,
        NaiveDate::from_ymd_opt(1985, 6, 2),
        None,
    );
    let december = NewClient::new(
        1,
        "December".to_string(),
        None,
        None,
        NaiveDate::from_ymd_opt(1985, 12, 24),
        None,
    );
    repo.create_clients(&[june, december]).unwrap();

    let (total, items) = repo
        .list_clients(ClientListQuery::new(1).birthday_month(6))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "June");
}

struct Booking {
    client_id: i32,
    professional_id: i32,
    service_id: i32,
}

fn seed_booking(repo: &DieselRepository, establishment_id: i32) -> Booking {
    repo.create_clients(&[sample_client(establishment_id, "Alice", "+5511999990001")])
        .unwrap();
    let client = repo
        .list_clients(ClientListQuery::new(establishment_id))
        .unwrap()
        .1
        .remove(0);

    let professional = repo
        .create_professional(&NewProfessional::new(
            establishment_id,
            "Marcos".to_string(),
            "marcos@example.com".to_string(),
            None,
            4000,
        ))
        .unwrap();

    let service = repo
        .create_service(&NewService {
            establishment_id,
            name: "Corte".to_string(),
            duration_min: 30,
            price_cents: 5000,
            commission_bps: None,
        })
        .unwrap();

    Booking {
        client_id: client.id,
        professional_id: professional.id,
        service_id: service.id,
    }
}

#[test]
fn test_appointment_conflicts_and_status() {
    let test_db = common::TestDb::new("test_appointment_conflicts.db");
    let repo = DieselRepository::new(test_db.pool());
    let booking = seed_booking(&repo, 1);

    let starts_at = NaiveDate::from_ymd_opt(2026, 9, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let ends_at = starts_at + Duration::minutes(30);

    let appointment = repo
        .create_appointment(&NewAppointment {
            establishment_id: 1,
            client_id: booking.client_id,
            professional_id: booking.professional_id,
            service_id: booking.service_id,
            starts_at,
            ends_at,
            notes: None,
        })
        .unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);

    // Overlapping window conflicts; adjacent window does not.
    assert!(
        repo.has_appointment_conflict(
            booking.professional_id,
            starts_at + Duration::minutes(15),
            ends_at + Duration::minutes(15),
            None,
        )
        .unwrap()
    );
    assert!(
        !repo
            .has_appointment_conflict(
                booking.professional_id,
                ends_at,
                ends_at + Duration::minutes(30),
                None,
            )
            .unwrap()
    );
    // The appointment does not conflict with itself when excluded.
    assert!(
        !repo
            .has_appointment_conflict(
                booking.professional_id,
                starts_at,
                ends_at,
                Some(appointment.id),
            )
            .unwrap()
    );

    let confirmed = repo
        .set_appointment_status(appointment.id, AppointmentStatus::Confirmed)
        .unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    // Canceled appointments release the window.
    repo.set_appointment_status(appointment.id, AppointmentStatus::Canceled)
        .unwrap();
    assert!(
        !repo
            .has_appointment_conflict(booking.professional_id, starts_at, ends_at, None)
            .unwrap()
    );
}

#[test]
fn test_appointment_reminder_queries() {
    let test_db = common::TestDb::new("test_appointment_reminders.db");
    let repo = DieselRepository::new(test_db.pool());
    let booking = seed_booking(&repo, 1);

    let now = Utc::now().naive_utc();
    let soon = now + Duration::hours(3);
    let appointment = repo
        .create_appointment(&NewAppointment {
            establishment_id: 1,
            client_id: booking.client_id,
            professional_id: booking.professional_id,
            service_id: booking.service_id,
            starts_at: soon,
            ends_at: soon + Duration::minutes(30),
            notes: None,
        })
        .unwrap();

    let due = repo
        .list_appointments_due_reminder(now, now + Duration::hours(24))
        .unwrap();
    assert_eq!(due.len(), 1);

    repo.mark_appointment_reminded(appointment.id, now).unwrap();
    let due_after = repo
        .list_appointments_due_reminder(now, now + Duration::hours(24))
        .unwrap();
    assert!(due_after.is_empty());

    let next = repo
        .find_next_open_appointment(booking.client_id, now)
        .unwrap()
        .unwrap();
    assert_eq!(next.id, appointment.id);
}

#[test]
fn test_product_stock_movements() {
    let test_db = common::TestDb::new("test_product_stock.db");
    let repo = DieselRepository::new(test_db.pool());

    let product = repo
        .create_product(&NewProduct {
            establishment_id: 1,
            name: "Pomada".to_string(),
            sku: "POM-01".to_string(),
            price_cents: 3500,
            stock: 10,
            min_stock: 3,
        })
        .unwrap();

    let after_sale = repo
        .apply_stock_movement(&NewStockMovement {
            product_id: product.id,
            quantity: -8,
            reason: "sale".to_string(),
        })
        .unwrap();
    assert_eq!(after_sale.stock, 2);
    assert!(after_sale.is_low_on_stock());

    let movements = repo.list_stock_movements(product.id).unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].quantity, -8);

    let low = repo.list_products(1, true).unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].id, product.id);
}

#[test]
fn test_payment_provider_ref_lookup() {
    let test_db = common::TestDb::new("test_payment_provider_ref.db");
    let repo = DieselRepository::new(test_db.pool());

    let payment = repo
        .create_payment(&NewPayment {
            establishment_id: 1,
            client_id: None,
            appointment_id: None,
            subscription_id: None,
            provider: PaymentProvider::Asaas,
            provider_ref: Some("pay_123".to_string()),
            method: PaymentMethod::Pix,
            amount_cents: 4500,
            status: PaymentStatus::Pending,
            paid_at: None,
        })
        .unwrap();

    let found = repo
        .get_payment_by_provider_ref(PaymentProvider::Asaas, "pay_123")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, payment.id);
    assert!(
        repo.get_payment_by_provider_ref(PaymentProvider::Manual, "pay_123")
            .unwrap()
            .is_none()
    );

    let settled = repo
        .set_payment_status(
            payment.id,
            PaymentStatus::Paid,
            Some(Utc::now().naive_utc()),
        )
        .unwrap();
    assert_eq!(settled.status, PaymentStatus::Paid);
    assert!(settled.paid_at.is_some());
}

#[test]
fn test_subscription_lifecycle() {
    let test_db = common::TestDb::new("test_subscription_lifecycle.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_clients(&[sample_client(1, "Alice", "+5511999990001")])
        .unwrap();
    let client = repo
        .list_clients(ClientListQuery::new(1))
        .unwrap()
        .1
        .remove(0);

    let plan = repo
        .create_plan(&NewSubscriptionPlan {
            establishment_id: 1,
            name: "Clube da Barba".to_string(),
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
    assert_eq!(subscription.status, SubscriptionStatus::Pending);

    let with_ref = repo
        .set_subscription_provider_ref(subscription.id, "sub_abc")
        .unwrap();
    assert_eq!(with_ref.provider_ref.as_deref(), Some("sub_abc"));

    let found = repo
        .get_subscription_by_provider_ref("sub_abc")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, subscription.id);

    let period_end = Utc::now().naive_utc() + Duration::days(30);
    let active = repo
        .set_subscription_status(
            subscription.id,
            SubscriptionStatus::Active,
            Some(period_end),
            None,
        )
        .unwrap();
    assert_eq!(active.status, SubscriptionStatus::Active);
    assert_eq!(active.current_period_end, Some(period_end));
}

#[test]
fn test_conversation_upsert_and_receipts() {
    let test_db = common::TestDb::new("test_conversation_upsert.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_clients(&[sample_client(1, "Alice", "+5511999990001")])
        .unwrap();
    let client = repo
        .list_clients(ClientListQuery::new(1))
        .unwrap()
        .1
        .remove(0);

    let t1 = Utc::now().naive_utc();
    let conversation = repo
        .upsert_conversation(1, "+5511999990001", None, t1)
        .unwrap();
    assert!(conversation.ai_enabled);
    assert!(conversation.client_id.is_none());

    // Upsert links the client and refreshes the timestamp, not a new row.
    let t2 = t1 + Duration::minutes(5);
    let again = repo
        .upsert_conversation(1, "+5511999990001", Some(client.id), t2)
        .unwrap();
    assert_eq!(again.id, conversation.id);
    assert_eq!(again.client_id, Some(client.id));
    assert_eq!(again.last_message_at, t2);

    let message = repo
        .create_message(&NewMessage {
            conversation_id: conversation.id,
            direction: MessageDirection::Out,
            content: "Olá!".to_string(),
            provider_ref: Some("msg_1".to_string()),
            status: MessageStatus::Sent,
        })
        .unwrap();

    let affected = repo
        .set_message_status_by_provider_ref("msg_1", MessageStatus::Read)
        .unwrap();
    assert_eq!(affected, 1);

    let messages = repo.list_messages(conversation.id).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, message.id);
    assert_eq!(messages[0].status, MessageStatus::Read);

    let muted = repo.set_conversation_ai(conversation.id, false).unwrap();
    assert!(!muted.ai_enabled);
}

#[test]
fn test_webhook_event_audit_trail() {
    let test_db = common::TestDb::new("test_webhook_events.db");
    let repo = DieselRepository::new(test_db.pool());

    let event = repo
        .create_webhook_event(&NewWebhookEvent {
            provider: WebhookProvider::Asaas,
            event_type: "PAYMENT_RECEIVED".to_string(),
            payload: r#"{"event":"PAYMENT_RECEIVED"}"#.to_string(),
        })
        .unwrap();
    assert_eq!(event.status, WebhookStatus::Received);
    assert!(event.processed_at.is_none());

    repo.mark_webhook_event(event.id, WebhookStatus::Failed, Some("boom"))
        .unwrap();

    let events = repo.list_webhook_events(10).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].status, WebhookStatus::Failed);
    assert_eq!(events[0].error.as_deref(), Some("boom"));
    assert!(events[0].processed_at.is_some());
}
