//! One-shot reminder dispatcher, intended to run from cron.
//!
//! Selects open appointments starting within the next 24 hours that have
//! not been reminded yet, sends the WhatsApp reminder, and stamps
//! `reminder_sent_at` for the ones that went out.

use chrono::{Duration, Utc};

use salon_hub::db::establish_connection_pool;
use salon_hub::integrations::uazapi::UazapiClient;
use salon_hub::models::config::ServerConfig;
use salon_hub::repository::{AppointmentReader, AppointmentWriter, DieselRepository};
use salon_hub::services::appointments::send_appointment_reminder;

fn load_config() -> std::io::Result<ServerConfig> {
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path).required(false))
        .add_source(config::Environment::default().separator("__"))
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    settings
        .try_deserialize::<ServerConfig>()
        .map_err(|e| std::io::Error::other(format!("Invalid configuration: {e}")))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let server_config = load_config()?;

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    let repo = DieselRepository::new(pool);
    let uazapi = UazapiClient::new(&server_config.uazapi);

    let now = Utc::now().naive_utc();
    let due = repo
        .list_appointments_due_reminder(now, now + Duration::hours(24))
        .map_err(|e| std::io::Error::other(format!("Failed to load due appointments: {e}")))?;

    log::info!("{} appointment(s) due a reminder", due.len());

    let mut sent = 0;
    for appointment in &due {
        if send_appointment_reminder(&repo, &uazapi, appointment).await {
            if let Err(e) = repo.mark_appointment_reminded(appointment.id, Utc::now().naive_utc())
            {
                log::error!(
                    "Reminder sent but failed to stamp appointment {}: {e}",
                    appointment.id
                );
            } else {
                sent += 1;
            }
        }
    }

    log::info!("Sent {sent} of {} reminder(s)", due.len());

    Ok(())
}
