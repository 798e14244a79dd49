//! Sends a rendered report to a local Ollama server for narrative analysis.
//!
//! Requires `OLLAMA_API_BASE` and `OLLAMA_MODEL` (a `.env` file works).
//! Run with: `cargo run --example ollama_narrative --features ollama`

use anyhow::Result;
use financial_report_builder::llm::{OllamaClient, ReportAssistant};
use financial_report_builder::parse_markdown_table;

const SAMPLE_TABLE: &str = "\
| Month | Revenue | COGS | Salaries | Rent | Marketing | Customers |
|-------|---------|------|----------|------|-----------|-----------|
| Jan | $28,000 | $14,600 | $9,000 | $2,800 | $2,100 | 180 |
| Feb | $26,500 | $13,900 | $9,000 | $2,800 | $2,400 | 176 |
| Mar | $25,100 | $13,400 | $9,000 | $2,800 | $2,800 | 171 |
| Apr | $24,800 | $13,200 | $9,400 | $2,800 | $3,100 | 169 |
";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let year = parse_markdown_table(SAMPLE_TABLE, "Harborview Bakery", 2024)?;

    let client = OllamaClient::from_env()?;
    let assistant = ReportAssistant::new(client);

    let narrative = assistant.narrate(&year).await?;
    println!("{}", narrative);

    Ok(())
}
