//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use requireflow_core::customer::model::Customer;
use requireflow_core::dashboard::model::{Breakdown, CountEntry, DashboardSummary};
use requireflow_core::requirement::model::{Priority, Requirement, RequirementStatus};
use requireflow_core::requirement::LinkedRequirements;
use requireflow_core::user::model::User;
use unicode_width::UnicodeWidthStr;

/// Print requirements as a table.
pub fn print_requirements_table(requirements: &[Requirement], total: usize) {
    if requirements.is_empty() {
        println!("{}", "No requirements found.".dimmed());
        return;
    }

    // ID, priority, status, customer and separators take the fixed part
    let title_width = term_width().saturating_sub(10 + 4 + 16 + 14 + 4).clamp(16, 60);

    println!(
        "{} {} {} {} {}",
        pad_right("ID", 10),
        pad_right("PRI", 4),
        pad_right("Title", title_width),
        pad_right("Status", 16),
        "Customer"
    );
    println!("{}", "─".repeat(10 + 4 + title_width + 16 + 14 + 4));

    for req in requirements {
        let title = truncate_visual(&req.title, title_width);
        println!(
            "{} {} {} {} {}",
            short_id(&req.id).dimmed(),
            priority_colored(req.priority, 4),
            pad_right(&title, title_width),
            status_colored(req.status, 16),
            truncate_visual(&req.customer_name, 14)
        );
    }

    println!();
    println!("{} requirement(s) total", total);
}

/// Print a single requirement with its comments.
pub fn print_requirement(req: &Requirement) {
    println!("{} {}", req.title.cyan().bold(), format!("({})", req.id).dimmed());
    println!();
    println!("{}", req.description);
    println!();

    println!("{}: {}", "Status".bold(), status_colored(req.status, 0));
    println!("{}: {}", "Priority".bold(), priority_colored(req.priority, 0));
    println!("{}: {}", "Urgency".bold(), req.customer_urgency.as_str());
    println!(
        "{}: {} / {}",
        "Type".bold(),
        req.kind.as_str(),
        req.module.as_str()
    );
    println!(
        "{}: {} ({})",
        "Customer".bold(),
        req.customer_name,
        req.customer_industry.dimmed()
    );
    println!(
        "{}: {}/10, {}: {}",
        "Business value".bold(),
        req.business_value,
        "Frequency".bold(),
        req.frequency
    );
    println!(
        "{}: {} ({}) by {} at {}",
        "Source".bold(),
        req.source.kind.as_str(),
        req.source.category.as_str(),
        req.source.collector_name,
        req.source.collect_time
    );
    if let Some(content) = &req.source.original_content {
        println!("  {}", content.dimmed());
    }
    if !req.tags.is_empty() {
        println!("{}: {}", "Tags".bold(), req.tags.join(", "));
    }
    if let Some(version) = &req.planned_version {
        println!("{}: {}", "Planned version".bold(), version);
    }
    if let Some(released) = &req.released_at {
        println!("{}: {}", "Released".bold(), released.format("%Y-%m-%d %H:%M"));
    }
    if let Some(assessment) = &req.ai_assessment {
        println!(
            "{}: {}/100 → {} ({}% confidence)",
            "Assessment".bold(),
            assessment.overall_score,
            assessment.priority.as_str(),
            assessment.confidence_level
        );
        println!("  {}", assessment.suggested_schedule.dimmed());
    }
    println!(
        "{}",
        format!(
            "Created {} · Updated {}",
            req.created_at.format("%Y-%m-%d %H:%M"),
            req.updated_at.format("%Y-%m-%d %H:%M")
        )
        .dimmed()
    );

    if !req.comments.is_empty() {
        println!();
        println!("{}", "Comments".bold());
        for comment in &req.comments {
            println!(
                "  {} {} {}",
                "●".cyan(),
                comment.user_name.bold(),
                comment.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
            );
            println!("    {}", comment.content);
        }
    }
}

/// Print resolved and dangling links.
pub fn print_links(links: &LinkedRequirements) {
    if links.found.is_empty() && links.missing.is_empty() {
        return;
    }
    println!();
    println!("{}", "Linked requirements".bold());
    for linked in &links.found {
        println!(
            "  {} {} {}",
            "→".dimmed(),
            linked.title,
            status_colored(linked.status, 0)
        );
    }
    for id in &links.missing {
        println!("  {} {} {}", "→".dimmed(), id.dimmed(), "(missing)".red());
    }
}

/// Print customers as a table.
pub fn print_customers_table(customers: &[Customer]) {
    if customers.is_empty() {
        println!("{}", "No customers found.".dimmed());
        return;
    }

    println!(
        "{} {} {} {} {}",
        pad_right("ID", 10),
        pad_right("Name", 20),
        pad_right("Industry", 16),
        pad_right("Size", 8),
        "Stage"
    );
    println!("{}", "─".repeat(66));

    for customer in customers {
        println!(
            "{} {} {} {} {}",
            short_id(&customer.id).dimmed(),
            pad_right(&truncate_visual(&customer.name, 20), 20),
            pad_right(&truncate_visual(&customer.industry, 16), 16),
            pad_right(customer.size.as_str(), 8),
            customer.stage.as_str()
        );
    }
}

/// Print a single customer with contacts.
pub fn print_customer(customer: &Customer) {
    println!(
        "{} {}",
        customer.name.cyan().bold(),
        format!("({})", customer.id).dimmed()
    );
    println!();
    println!("{}: {}", "Industry".bold(), customer.industry);
    println!("{}: {}", "Size".bold(), customer.size.as_str());
    println!("{}: {}", "Stage".bold(), customer.stage.as_str().yellow());
    if let Some(value) = customer.contract_value {
        println!("{}: {:.2}", "Contract value".bold(), value);
    }

    if !customer.contacts.is_empty() {
        println!();
        println!("{}", "Contacts".bold());
        for contact in &customer.contacts {
            println!(
                "  {} {} {} {}",
                "●".cyan(),
                contact.name.bold(),
                format!("{} · {}", contact.title, contact.department).dimmed(),
                contact.influence.as_str()
            );
        }
    }
}

/// Print the user directory.
pub fn print_users_table(users: &[User]) {
    if users.is_empty() {
        println!("{}", "No users found.".dimmed());
        return;
    }

    println!(
        "{} {} {} {}",
        pad_right("ID", 10),
        pad_right("Name", 12),
        pad_right("Role", 16),
        "Department"
    );
    println!("{}", "─".repeat(52));

    for user in users {
        println!(
            "{} {} {} {}",
            short_id(&user.id).dimmed(),
            pad_right(&user.name, 12),
            pad_right(user.role.as_str(), 16),
            user.department
        );
    }
}

/// Print the dashboard headline counts.
pub fn print_summary(summary: &DashboardSummary) {
    println!("{}", "Dashboard".bold());
    println!();
    println!("  {:<22} {}", "Total requirements", summary.total_requirements.to_string().bold());
    println!("  {:<22} {}", "Pending review", summary.pending_review.to_string().cyan());
    println!("  {:<22} {}", "In progress", summary.in_progress.to_string().yellow());
    println!(
        "  {:<22} {}",
        "Completed this month",
        summary.completed_this_month.to_string().green()
    );
    println!("  {:<22} {}", "Customers", summary.total_customers);
}

/// Print grouped counts as bar charts.
pub fn print_breakdown(breakdown: &Breakdown) {
    print_counts("By status", &breakdown.by_status);
    print_counts("By priority", &breakdown.by_priority);
    print_counts("By module", &breakdown.by_module);
    print_counts("By source", &breakdown.by_source_category);
    print_counts("Top customers", &breakdown.top_customers);
}

fn print_counts(heading: &str, entries: &[CountEntry]) {
    println!();
    println!("{}", heading.bold());
    if entries.is_empty() {
        println!("  {}", "none".dimmed());
        return;
    }

    let max = entries.iter().map(|e| e.count).max().unwrap_or(0).max(1);
    let bar_width = term_width().saturating_sub(30).clamp(10, 40);
    for entry in entries {
        let filled = entry.count * bar_width / max;
        println!(
            "  {} {} {}",
            pad_right(&truncate_visual(&entry.key, 16), 16),
            "■".repeat(filled).cyan(),
            entry.count
        );
    }
}

fn status_colored(status: RequirementStatus, width: usize) -> ColoredString {
    let label = pad_right(status.as_str(), width);
    match status {
        RequirementStatus::PendingReview => label.cyan(),
        RequirementStatus::Planned => label.blue(),
        RequirementStatus::Developing | RequirementStatus::Testing => label.yellow(),
        RequirementStatus::Released => label.green(),
        RequirementStatus::Rejected | RequirementStatus::Merged => label.dimmed(),
    }
}

fn priority_colored(priority: Priority, width: usize) -> ColoredString {
    let label = pad_right(priority.as_str(), width);
    match priority {
        Priority::P0 => label.red().bold(),
        Priority::P1 => label.yellow(),
        Priority::P2 => label.normal(),
        Priority::P3 => label.dimmed(),
    }
}

/// First 8 characters of an id, padded to the ID column.
fn short_id(id: &str) -> String {
    let short: String = id.chars().take(8).collect();
    pad_right(&short, 10)
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
