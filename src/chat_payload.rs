use serde::Deserialize;

#[derive(Deserialize)]
pub struct ChatPayload {
    pub session_id: Option<String>,
    pub question: Option<String>,
}
