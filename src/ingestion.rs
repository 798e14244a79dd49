use crate::error::{FinancialReportError, Result};
use crate::schema::{FinancialYear, MonthlyRecord};
use crate::utils::{parse_amount, parse_month};
use std::collections::BTreeMap;

/// Column roles recognized in the header row. Anything that is not one of
/// the fixed columns becomes an operating-expense category.
#[derive(Debug, Clone)]
enum Column {
    Month,
    Revenue,
    Cogs,
    Customers,
    Expense(String),
}

/// Parses a pipe-delimited (Markdown-style) table of monthly figures into a
/// validated [`FinancialYear`].
///
/// The header row must name `Month`, `Revenue`, `COGS` and `Customers`
/// (case-insensitive); every other column is treated as an expense category.
/// Month cells accept ordinals or English month names; numeric cells tolerate
/// `$` and thousands separators. Markdown separator rows (`|---|---|`) are
/// skipped.
pub fn parse_markdown_table(
    input: &str,
    organization_name: &str,
    year: i32,
) -> Result<FinancialYear> {
    let mut columns: Option<Vec<Column>> = None;
    let mut records = Vec::new();

    for (line_no, line) in input.lines().enumerate() {
        let line_no = line_no + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || is_separator_row(trimmed) {
            continue;
        }

        let cells = split_row(trimmed);
        if cells.is_empty() {
            continue;
        }

        match &columns {
            None => {
                columns = Some(parse_header(&cells, line_no)?);
            }
            Some(cols) => {
                records.push(parse_row(&cells, cols, line_no)?);
            }
        }
    }

    if columns.is_none() {
        return Err(FinancialReportError::TableParseError {
            line: 0,
            details: "no header row found".to_string(),
        });
    }

    FinancialYear::new(organization_name, year, records)
}

fn is_separator_row(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | '+' | '=' | ' '))
}

fn split_row(line: &str) -> Vec<String> {
    line.trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn parse_header(cells: &[String], line_no: usize) -> Result<Vec<Column>> {
    let mut columns = Vec::with_capacity(cells.len());
    let mut have_month = false;
    let mut have_revenue = false;
    let mut have_cogs = false;
    let mut have_customers = false;

    for cell in cells {
        let lower = cell.to_lowercase();
        let column = if lower == "month" {
            have_month = true;
            Column::Month
        } else if lower == "revenue" || lower == "sales" {
            have_revenue = true;
            Column::Revenue
        } else if lower == "cogs" || lower == "cost of goods sold" {
            have_cogs = true;
            Column::Cogs
        } else if lower == "customers" || lower == "customer count" {
            have_customers = true;
            Column::Customers
        } else {
            Column::Expense(cell.clone())
        };
        columns.push(column);
    }

    for (present, name) in [
        (have_month, "Month"),
        (have_revenue, "Revenue"),
        (have_cogs, "COGS"),
        (have_customers, "Customers"),
    ] {
        if !present {
            return Err(FinancialReportError::TableParseError {
                line: line_no,
                details: format!("header is missing required column '{}'", name),
            });
        }
    }

    Ok(columns)
}

fn parse_row(cells: &[String], columns: &[Column], line_no: usize) -> Result<MonthlyRecord> {
    if cells.len() != columns.len() {
        return Err(FinancialReportError::TableParseError {
            line: line_no,
            details: format!(
                "expected {} cells but found {}",
                columns.len(),
                cells.len()
            ),
        });
    }

    let mut month = None;
    let mut revenue = None;
    let mut cogs = None;
    let mut customers = None;
    let mut operating_expenses = BTreeMap::new();

    for (cell, column) in cells.iter().zip(columns) {
        match column {
            Column::Month => {
                month = Some(parse_month(cell).ok_or_else(|| {
                    FinancialReportError::TableParseError {
                        line: line_no,
                        details: format!("unrecognized month '{}'", cell),
                    }
                })?);
            }
            Column::Revenue => revenue = Some(required_amount(cell, "revenue", line_no)?),
            Column::Cogs => cogs = Some(required_amount(cell, "COGS", line_no)?),
            Column::Customers => {
                let value = required_amount(cell, "customers", line_no)?;
                if value < 0.0 || value.fract() != 0.0 {
                    return Err(FinancialReportError::TableParseError {
                        line: line_no,
                        details: format!("customer count '{}' must be a whole number", cell),
                    });
                }
                customers = Some(value as u64);
            }
            Column::Expense(category) => {
                // Blank expense cells read as zero spend for the category.
                let amount = if cell.is_empty() {
                    0.0
                } else {
                    required_amount(cell, category, line_no)?
                };
                operating_expenses.insert(category.clone(), amount);
            }
        }
    }

    Ok(MonthlyRecord {
        month: month.ok_or_else(|| missing_cell("month", line_no))?,
        revenue: revenue.ok_or_else(|| missing_cell("revenue", line_no))?,
        cogs: cogs.ok_or_else(|| missing_cell("COGS", line_no))?,
        operating_expenses,
        customers: customers.ok_or_else(|| missing_cell("customers", line_no))?,
    })
}

fn required_amount(cell: &str, field: &str, line_no: usize) -> Result<f64> {
    parse_amount(cell).ok_or_else(|| FinancialReportError::TableParseError {
        line: line_no,
        details: format!("could not parse {} value '{}'", field, cell),
    })
}

fn missing_cell(field: &str, line_no: usize) -> FinancialReportError {
    FinancialReportError::TableParseError {
        line: line_no,
        details: format!("row has no {} cell", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
| Month | Revenue | COGS | Salaries | Rent | Marketing | Customers |
|-------|---------|------|----------|------|-----------|-----------|
| Jan   | $42,000 | $18,000 | $12,000 | $3,500 | $2,800 | 310 |
| Feb   | $45,500 | $19,200 | $12,000 | $3,500 | $3,100 | 334 |
| Mar   | $43,800 | $18,700 | $12,400 | $3,500 | $2,900 | 329 |
";

    #[test]
    fn test_parse_sample_table() {
        let year = parse_markdown_table(SAMPLE, "Sample Co", 2024).unwrap();
        assert_eq!(year.records.len(), 3);

        let jan = &year.records[0];
        assert_eq!(jan.month, 1);
        assert!((jan.revenue - 42_000.0).abs() < 1e-9);
        assert!((jan.cogs - 18_000.0).abs() < 1e-9);
        assert_eq!(jan.customers, 310);
        assert_eq!(jan.operating_expenses.len(), 3);
        assert!((jan.operating_expenses["Marketing"] - 2_800.0).abs() < 1e-9);
        assert!((jan.total_opex() - 18_300.0).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_month_cells() {
        let table = "\
Month | Revenue | COGS | Marketing | Customers
3 | 1000 | 400 | 100 | 10
4 | 1100 | 420 | 100 | 12
";
        let year = parse_markdown_table(table, "Plain Co", 2024).unwrap();
        assert_eq!(year.records[0].month, 3);
        assert_eq!(year.records[1].month, 4);
    }

    #[test]
    fn test_missing_required_column() {
        let table = "| Month | Revenue | Marketing | Customers |\n| Jan | 1000 | 100 | 10 |";
        let err = parse_markdown_table(table, "Bad Co", 2024).unwrap_err();
        assert!(err.to_string().contains("COGS"));
    }

    #[test]
    fn test_bad_row_names_line() {
        let table = "\
| Month | Revenue | COGS | Customers |
| Jan | 1000 | 400 | 10 |
| Smarch | 1100 | 420 | 12 |
";
        let err = parse_markdown_table(table, "Bad Co", 2024).unwrap_err();
        match err {
            FinancialReportError::TableParseError { line, details } => {
                assert_eq!(line, 3);
                assert!(details.contains("Smarch"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_blank_expense_cell_is_zero() {
        let table = "\
| Month | Revenue | COGS | Marketing | Customers |
| Jan | 1000 | 400 |  | 10 |
";
        let year = parse_markdown_table(table, "Blank Co", 2024).unwrap();
        assert_eq!(year.records[0].operating_expenses["Marketing"], 0.0);
    }

    #[test]
    fn test_empty_input() {
        let err = parse_markdown_table("", "Empty Co", 2024).unwrap_err();
        assert!(matches!(
            err,
            FinancialReportError::TableParseError { line: 0, .. }
        ));
    }
}
