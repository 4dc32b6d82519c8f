//! Output Formatting

use std::path::{Path, PathBuf};

use policy_api::ApiEnvelope;
use policy_core::{DropdownOptions, Page, Policy};
use serde::Serialize;

use crate::commands::OutputFormat;
use crate::error::CliResult;

/// Print as JSON
fn print_json<T: Serialize + ?Sized>(data: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

pub fn print_init(data_dir: &Path, created: &[PathBuf]) {
    if created.is_empty() {
        println!("Data directory {} already initialized.", data_dir.display());
        return;
    }
    println!("Initialized {}:", data_dir.display());
    for path in created {
        println!("  created {}", path.display());
    }
}

pub fn print_options(options: &DropdownOptions, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(options),
        OutputFormat::Table => {
            println!("Dropdown Options");
            println!("================");
            for (name, values) in options.lists() {
                println!("{:<18} {}", name, values.join(", "));
            }
            Ok(())
        }
    }
}

/// Print a search result page
pub fn print_page(envelope: &ApiEnvelope<Page<Policy>>, format: OutputFormat) -> CliResult<()> {
    let page = match (&envelope.data, format) {
        (Some(page), OutputFormat::Table) => page,
        _ => return print_json(envelope),
    };

    println!(
        "{:>5}  {:<14} {:<16} {:<14} {:<10} {}",
        "ID", "JURISDICTION", "BUSINESS AREA", "INVENTORY", "STATUS", "DESCRIPTION"
    );
    for policy in &page.content {
        println!(
            "{:>5}  {:<14} {:<16} {:<14} {:<10} {}",
            policy.id,
            policy.jurisdiction,
            policy.business_area,
            policy.inventory_type,
            policy.status,
            policy.description
        );
    }
    println!();
    println!("{}", page_footer(page));
    Ok(())
}

fn page_footer<T>(page: &Page<T>) -> String {
    format!(
        "Page {} of {} ({} policies)",
        page.number.saturating_add(1),
        page.total_pages.max(1),
        page.total_elements
    )
}
