use crate::error::Result;
use crate::llm::client::OllamaClient;
use crate::llm::prompts::{DEFAULT_SYSTEM_PROMPT, REPORT_ANALYSIS_PROMPT};
use crate::llm::types::ChatMessage;
use crate::report::render_markdown;
use crate::schema::FinancialYear;
use log::info;

pub struct ReportAssistant {
    client: OllamaClient,
}

impl ReportAssistant {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }

    /// Renders the deterministic KPI report for `year` and asks the model
    /// for a narrative analysis of it.
    pub async fn narrate(&self, year: &FinancialYear) -> Result<String> {
        let markdown = render_markdown(year)?;

        info!(
            "Requesting narrative analysis for {} from model {}",
            year.organization_name,
            self.client.model()
        );

        let messages = vec![ChatMessage::user(format!(
            "{}\n\nHere is the computed report:\n\n{}",
            REPORT_ANALYSIS_PROMPT, markdown
        ))];

        self.client.chat(DEFAULT_SYSTEM_PROMPT, messages).await
    }

    /// Free-form follow-up question, carrying the prior conversation.
    pub async fn ask(&self, question: &str, history: Vec<ChatMessage>) -> Result<String> {
        let mut messages = history;
        messages.push(ChatMessage::user(question));
        self.client.chat(DEFAULT_SYSTEM_PROMPT, messages).await
    }
}
