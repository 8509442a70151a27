use chrono::Local;

/// One recorded exchange between the user and the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    pub prior_file_text: String,
    pub user_input: String,
    pub model_response: String,
    /// Local wall-clock time of the exchange, `HH:MM`.
    pub timestamp: String,
}

impl ConversationEntry {
    pub fn new(prior_file_text: String, user_input: String, model_response: String) -> Self {
        Self::with_timestamp(
            prior_file_text,
            user_input,
            model_response,
            Local::now().format("%H:%M").to_string(),
        )
    }

    pub fn with_timestamp(
        prior_file_text: String,
        user_input: String,
        model_response: String,
        timestamp: String,
    ) -> Self {
        Self {
            prior_file_text,
            user_input,
            model_response,
            timestamp,
        }
    }
}
