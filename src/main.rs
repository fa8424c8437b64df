use medical_chatbot::{config::Settings, telemetry};

/* ---------- main ---------- */
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    telemetry::init(&settings.log_level);

    medical_chatbot::run(settings).await?;
    Ok(())
}
