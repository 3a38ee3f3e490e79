#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod integrations;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Role required for any authenticated access to the API.
pub const SERVICE_ACCESS_ROLE: &str = "salon";
/// Role required for administrative operations.
pub const SERVICE_ADMIN_ROLE: &str = "salon_admin";
/// Role marking a professional account, restricted to its own calendar.
pub const SERVICE_PRO_ROLE: &str = "salon_pro";

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::integrations::{asaas::AsaasClient, uazapi::UazapiClient};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;

/// Builds and runs the Actix-Web HTTP server using the provided
/// configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    use crate::routes::appointments::{
        add_appointment, get_appointment, list_appointments, reschedule_appointment,
        transition_appointment,
    };
    use crate::routes::campaigns::{add_campaign, list_campaigns, save_campaign, send_campaign};
    use crate::routes::catalog::{add_service, list_services, save_service};
    use crate::routes::clients::{
        add_client, clients_upload, delete_client, get_client, list_birthday_clients,
        list_clients, save_client,
    };
    use crate::routes::conversations::{
        get_conversation, list_conversations, send_message, set_conversation_ai,
    };
    use crate::routes::finance::{add_payment, commission_report, list_payments};
    use crate::routes::inventory::{
        add_product, add_stock_movement, list_products, list_stock_movements, save_product,
    };
    use crate::routes::main::health;
    use crate::routes::professionals::{add_professional, list_professionals, save_professional};
    use crate::routes::subscriptions::{
        add_plan, add_subscription, cancel_subscription, list_plans, list_subscriptions,
        set_plan_active,
    };
    use crate::routes::webhooks::{asaas_webhook, list_webhook_events, uazapi_webhook};

    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);
    let uazapi = UazapiClient::new(&server_config.uazapi);
    let asaas = AsaasClient::new(&server_config.asaas);

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(health)
            .service(
                web::scope("/webhooks")
                    .service(asaas_webhook)
                    .service(uazapi_webhook)
                    .service(list_webhook_events),
            )
            .service(
                web::scope("/api/v1")
                    .service(list_clients)
                    .service(list_birthday_clients)
                    .service(clients_upload)
                    .service(get_client)
                    .service(add_client)
                    .service(save_client)
                    .service(delete_client)
                    .service(list_professionals)
                    .service(add_professional)
                    .service(save_professional)
                    .service(list_services)
                    .service(add_service)
                    .service(save_service)
                    .service(list_appointments)
                    .service(get_appointment)
                    .service(add_appointment)
                    .service(reschedule_appointment)
                    .service(transition_appointment)
                    .service(list_products)
                    .service(add_product)
                    .service(save_product)
                    .service(add_stock_movement)
                    .service(list_stock_movements)
                    .service(list_payments)
                    .service(add_payment)
                    .service(commission_report)
                    .service(list_plans)
                    .service(add_plan)
                    .service(set_plan_active)
                    .service(list_subscriptions)
                    .service(add_subscription)
                    .service(cancel_subscription)
                    .service(list_campaigns)
                    .service(add_campaign)
                    .service(save_campaign)
                    .service(send_campaign)
                    .service(list_conversations)
                    .service(get_conversation)
                    .service(send_message)
                    .service(set_conversation_ai),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(uazapi.clone()))
            .app_data(web::Data::new(asaas.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
