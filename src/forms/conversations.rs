use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct SendMessageForm {
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Deserialize)]
pub struct AiToggleForm {
    pub ai_enabled: bool,
}
