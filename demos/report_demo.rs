//! Renders a full report for a sample year of figures.
//!
//! Run with: `cargo run --example report_demo`

use anyhow::Result;
use financial_report_builder::{parse_markdown_table, render_markdown};

const SAMPLE_TABLE: &str = "\
| Month | Revenue | COGS | Salaries | Rent | Marketing | Customers |
|-------|---------|------|----------|------|-----------|-----------|
| Jan | $42,000 | $18,000 | $12,000 | $3,500 | $2,800 | 310 |
| Feb | $45,500 | $19,200 | $12,000 | $3,500 | $3,100 | 334 |
| Mar | $43,800 | $18,700 | $12,400 | $3,500 | $2,900 | 329 |
| Apr | $48,900 | $20,100 | $12,400 | $3,500 | $3,400 | 351 |
| May | $51,300 | $21,000 | $12,900 | $3,500 | $3,700 | 372 |
| Jun | $49,700 | $20,400 | $12,900 | $3,500 | $3,500 | 368 |
| Jul | $46,200 | $19,100 | $12,900 | $3,500 | $3,200 | 361 |
| Aug | $47,800 | $19,600 | $13,200 | $3,500 | $3,300 | 365 |
| Sep | $53,400 | $21,800 | $13,200 | $3,500 | $3,900 | 391 |
| Oct | $56,100 | $22,700 | $13,600 | $3,500 | $4,200 | 412 |
| Nov | $58,800 | $23,600 | $13,600 | $3,500 | $4,500 | 436 |
| Dec | $64,500 | $25,900 | $14,100 | $3,500 | $5,100 | 468 |
";

fn main() -> Result<()> {
    env_logger::init();

    let year = parse_markdown_table(SAMPLE_TABLE, "Cedar & Pine Goods Co", 2024)?;
    let markdown = render_markdown(&year)?;
    println!("{}", markdown);

    Ok(())
}
