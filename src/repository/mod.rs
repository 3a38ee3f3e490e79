use chrono::{NaiveDate, NaiveDateTime};

use crate::db::{DbConnection, DbPool};
use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::campaign::{Campaign, CampaignStatus, NewCampaign, UpdateCampaign};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::commission::{CommissionEntry, NewCommissionEntry};
use crate::domain::conversation::{Conversation, Message, MessageStatus, NewMessage};
use crate::domain::payment::{NewPayment, Payment, PaymentProvider, PaymentStatus};
use crate::domain::product::{NewProduct, NewStockMovement, Product, StockMovement, UpdateProduct};
use crate::domain::professional::{NewProfessional, Professional, UpdateProfessional};
use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::subscription::{
    NewSubscription, NewSubscriptionPlan, Subscription, SubscriptionPlan, SubscriptionStatus,
};
use crate::domain::webhook_event::{NewWebhookEvent, WebhookEvent, WebhookStatus};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod appointment;
pub mod campaign;
pub mod client;
pub mod conversation;
pub mod errors;
pub mod finance;
pub mod product;
pub mod professional;
pub mod service;
pub mod subscription;
pub mod webhook_event;

/// Diesel-backed implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> Result<DbConnection, RepositoryError> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone)]
pub struct ClientListQuery {
    pub establishment_id: i32,
    pub search: Option<String>,
    pub birthday_month: Option<u32>,
    pub inactive_since: Option<NaiveDateTime>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new(establishment_id: i32) -> Self {
        Self {
            establishment_id,
            search: None,
            birthday_month: None,
            inactive_since: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn birthday_month(mut self, month: u32) -> Self {
        self.birthday_month = Some(month);
        self
    }

    pub fn inactive_since(mut self, since: NaiveDateTime) -> Self {
        self.inactive_since = Some(since);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct AppointmentListQuery {
    pub establishment_id: i32,
    pub professional_id: Option<i32>,
    pub client_id: Option<i32>,
    pub day: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
    pub pagination: Option<Pagination>,
}

impl AppointmentListQuery {
    pub fn new(establishment_id: i32) -> Self {
        Self {
            establishment_id,
            professional_id: None,
            client_id: None,
            day: None,
            status: None,
            pagination: None,
        }
    }

    pub fn professional(mut self, professional_id: i32) -> Self {
        self.professional_id = Some(professional_id);
        self
    }

    pub fn client(mut self, client_id: i32) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn day(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct PaymentListQuery {
    pub establishment_id: i32,
    pub status: Option<PaymentStatus>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub pagination: Option<Pagination>,
}

impl PaymentListQuery {
    pub fn new(establishment_id: i32) -> Self {
        Self {
            establishment_id,
            status: None,
            from: None,
            to: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn between(mut self, from: NaiveDateTime, to: NaiveDateTime) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait ClientReader {
    fn get_client_by_id(
        &self,
        client_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Client>>;
    fn get_client_by_phone(
        &self,
        phone: &str,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ClientWriter {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
    fn update_client(
        &self,
        client_id: i32,
        establishment_id: i32,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client>;
    fn delete_client(&self, client_id: i32, establishment_id: i32) -> RepositoryResult<()>;
}

pub trait ProfessionalReader {
    fn get_professional_by_id(
        &self,
        professional_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Professional>>;
    fn get_professional_by_email(
        &self,
        email: &str,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Professional>>;
    fn list_professionals(
        &self,
        establishment_id: i32,
        only_active: bool,
    ) -> RepositoryResult<Vec<Professional>>;
}

pub trait ProfessionalWriter {
    fn create_professional(
        &self,
        new_professional: &NewProfessional,
    ) -> RepositoryResult<Professional>;
    fn update_professional(
        &self,
        professional_id: i32,
        establishment_id: i32,
        updates: &UpdateProfessional,
    ) -> RepositoryResult<Professional>;
}

pub trait ServiceReader {
    fn get_service_by_id(
        &self,
        service_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Service>>;
    fn list_services(
        &self,
        establishment_id: i32,
        only_active: bool,
    ) -> RepositoryResult<Vec<Service>>;
}

pub trait ServiceWriter {
    fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service>;
    fn update_service(
        &self,
        service_id: i32,
        establishment_id: i32,
        updates: &UpdateService,
    ) -> RepositoryResult<Service>;
}

pub trait AppointmentReader {
    fn get_appointment_by_id(
        &self,
        appointment_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Appointment>>;
    /// Unscoped primary-key lookup used when resolving gateway
    /// references, which do not carry the tenant.
    fn find_appointment(&self, appointment_id: i32) -> RepositoryResult<Option<Appointment>>;
    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<(usize, Vec<Appointment>)>;
    /// True when the professional already has an open appointment
    /// overlapping the given window.
    fn has_appointment_conflict(
        &self,
        professional_id: i32,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
        exclude_id: Option<i32>,
    ) -> RepositoryResult<bool>;
    /// Open appointments starting inside the window that have not been
    /// reminded yet.
    fn list_appointments_due_reminder(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> RepositoryResult<Vec<Appointment>>;
    /// The client's next open appointment after the given instant.
    fn find_next_open_appointment(
        &self,
        client_id: i32,
        after: NaiveDateTime,
    ) -> RepositoryResult<Option<Appointment>>;
}

pub trait AppointmentWriter {
    fn create_appointment(&self, new_appointment: &NewAppointment)
    -> RepositoryResult<Appointment>;
    fn reschedule_appointment(
        &self,
        appointment_id: i32,
        establishment_id: i32,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Appointment>;
    fn set_appointment_status(
        &self,
        appointment_id: i32,
        status: AppointmentStatus,
    ) -> RepositoryResult<Appointment>;
    fn mark_appointment_reminded(
        &self,
        appointment_id: i32,
        at: NaiveDateTime,
    ) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn get_product_by_id(
        &self,
        product_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Product>>;
    fn list_products(
        &self,
        establishment_id: i32,
        low_stock_only: bool,
    ) -> RepositoryResult<Vec<Product>>;
    fn list_stock_movements(&self, product_id: i32) -> RepositoryResult<Vec<StockMovement>>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        establishment_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    /// Records the movement and adjusts the product stock in one
    /// transaction.
    fn apply_stock_movement(&self, movement: &NewStockMovement) -> RepositoryResult<Product>;
}

pub trait PaymentReader {
    fn get_payment_by_id(
        &self,
        payment_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Payment>>;
    fn get_payment_by_provider_ref(
        &self,
        provider: PaymentProvider,
        provider_ref: &str,
    ) -> RepositoryResult<Option<Payment>>;
    fn list_payments(&self, query: PaymentListQuery) -> RepositoryResult<(usize, Vec<Payment>)>;
}

pub trait PaymentWriter {
    fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
    fn set_payment_status(
        &self,
        payment_id: i32,
        status: PaymentStatus,
        paid_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Payment>;
}

pub trait CommissionReader {
    /// The original (positive) commission booked for a payment, if any.
    fn find_commission_for_payment(
        &self,
        payment_id: i32,
    ) -> RepositoryResult<Option<CommissionEntry>>;
    fn list_commission_entries(
        &self,
        professional_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> RepositoryResult<Vec<CommissionEntry>>;
}

pub trait CommissionWriter {
    fn create_commission_entry(
        &self,
        entry: &NewCommissionEntry,
    ) -> RepositoryResult<CommissionEntry>;
}

pub trait SubscriptionReader {
    fn get_plan_by_id(
        &self,
        plan_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<SubscriptionPlan>>;
    fn list_plans(
        &self,
        establishment_id: i32,
        only_active: bool,
    ) -> RepositoryResult<Vec<SubscriptionPlan>>;
    fn get_subscription_by_id(
        &self,
        subscription_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Subscription>>;
    fn get_subscription_by_provider_ref(
        &self,
        provider_ref: &str,
    ) -> RepositoryResult<Option<Subscription>>;
    /// Unscoped primary-key lookup used when resolving gateway
    /// references, which do not carry the tenant.
    fn find_subscription(&self, subscription_id: i32) -> RepositoryResult<Option<Subscription>>;
    fn list_subscriptions(&self, establishment_id: i32) -> RepositoryResult<Vec<Subscription>>;
}

pub trait SubscriptionWriter {
    fn create_plan(&self, new_plan: &NewSubscriptionPlan) -> RepositoryResult<SubscriptionPlan>;
    fn set_plan_active(
        &self,
        plan_id: i32,
        establishment_id: i32,
        active: bool,
    ) -> RepositoryResult<SubscriptionPlan>;
    fn create_subscription(
        &self,
        new_subscription: &NewSubscription,
    ) -> RepositoryResult<Subscription>;
    fn set_subscription_provider_ref(
        &self,
        subscription_id: i32,
        provider_ref: &str,
    ) -> RepositoryResult<Subscription>;
    fn set_subscription_status(
        &self,
        subscription_id: i32,
        status: SubscriptionStatus,
        current_period_end: Option<NaiveDateTime>,
        canceled_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Subscription>;
}

pub trait CampaignReader {
    fn get_campaign_by_id(
        &self,
        campaign_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Campaign>>;
    fn list_campaigns(&self, establishment_id: i32) -> RepositoryResult<Vec<Campaign>>;
}

pub trait CampaignWriter {
    fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign>;
    fn update_campaign(
        &self,
        campaign_id: i32,
        establishment_id: i32,
        updates: &UpdateCampaign,
    ) -> RepositoryResult<Campaign>;
    fn set_campaign_status(
        &self,
        campaign_id: i32,
        status: CampaignStatus,
        sent_count: i32,
    ) -> RepositoryResult<Campaign>;
}

pub trait ConversationReader {
    fn get_conversation_by_id(
        &self,
        conversation_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Conversation>>;
    fn find_conversation_by_phone(
        &self,
        establishment_id: i32,
        phone: &str,
    ) -> RepositoryResult<Option<Conversation>>;
    fn list_conversations(
        &self,
        establishment_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<Conversation>)>;
    fn list_messages(&self, conversation_id: i32) -> RepositoryResult<Vec<Message>>;
}

pub trait ConversationWriter {
    /// Finds the thread for the phone or creates it, refreshing
    /// `last_message_at` and the client link either way.
    fn upsert_conversation(
        &self,
        establishment_id: i32,
        phone: &str,
        client_id: Option<i32>,
        last_message_at: NaiveDateTime,
    ) -> RepositoryResult<Conversation>;
    fn set_conversation_ai(
        &self,
        conversation_id: i32,
        ai_enabled: bool,
    ) -> RepositoryResult<Conversation>;
    fn create_message(&self, new_message: &NewMessage) -> RepositoryResult<Message>;
    /// Applies a delivery receipt; returns the number of rows touched.
    fn set_message_status_by_provider_ref(
        &self,
        provider_ref: &str,
        status: MessageStatus,
    ) -> RepositoryResult<usize>;
}

pub trait WebhookEventReader {
    fn list_webhook_events(&self, limit: i64) -> RepositoryResult<Vec<WebhookEvent>>;
}

pub trait WebhookEventWriter {
    fn create_webhook_event(&self, event: &NewWebhookEvent) -> RepositoryResult<WebhookEvent>;
    fn mark_webhook_event(
        &self,
        event_id: i32,
        status: WebhookStatus,
        error: Option<&str>,
    ) -> RepositoryResult<()>;
}
