use serde::Serialize;

#[derive(Serialize)]
pub struct ChatResponse {
    pub answer: String,
}
