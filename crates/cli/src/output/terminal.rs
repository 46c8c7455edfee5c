//! Terminal output formatting

use crate::session::{SessionEvent, HELP};
use crate::upstream::Envelope;
use colored::Colorize;
use shepherd_core::{
    Classification, Committed, Decision, EntitlementState, FreeChange, MatrixRow, MonthlyCost,
    PendingAction, Tier, TierKind,
};

pub fn format_tiers(tiers: &[Tier]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {}\n",
        format!(
            "{:<12} {:>8} {:>9} {:>10} {:>10} {:>10}",
            "Tier", "Price", "Included", "Max", "Add-ons", "Swaps"
        )
        .bold()
    ));
    out.push_str(&format!("  {}\n", "\u{2500}".repeat(64).dimmed()));

    for tier in tiers {
        let price = if tier.contact_sales {
            "Contact".to_string()
        } else {
            format!("{}/mo", tier.price)
        };
        out.push_str(&format!(
            "  {:<12} {:>8} {:>9} {:>10} {:>10} {:>10}\n",
            tier.name(),
            price,
            tier.included,
            tier.max.to_string(),
            tier.add_on_quota.to_string(),
            tier.swap_quota.to_string(),
        ));
        out.push_str(&format!("  {}\n", tier.summary().dimmed()));
    }
    out
}

pub fn format_matrix(rows: &[MatrixRow]) -> String {
    let mut out = String::new();
    let mut header = format!("{:<24}", "Feature/Protection");
    for kind in TierKind::ALL {
        header.push_str(&format!(" {:^11}", kind.name()));
    }
    out.push_str(&format!("  {}\n", header.bold()));
    out.push_str(&format!("  {}\n", "\u{2500}".repeat(header.len()).dimmed()));

    for row in rows {
        let mut line = format!("{:<24}", row.protection.name());
        for &included in &row.included {
            let mark = if included { "\u{2713}" } else { "-" };
            line.push_str(&format!(" {:^11}", mark));
        }
        out.push_str(&format!("  {}\n", line));
    }
    out
}

pub fn format_cost(cost: &MonthlyCost) -> String {
    let tier = cost.tier.tier();
    let mut out = String::new();
    out.push_str(&format!(
        "  Base Price ({}): {}/mo\n",
        tier.name(),
        cost.base.to_string().bold()
    ));
    if cost.add_on_count > 0 {
        out.push_str(&format!(
            "  Extra Protections ({} \u{00d7} {}): {}\n",
            cost.add_on_count,
            tier.add_on_price,
            format!("+{}/mo", cost.add_on_charge).green()
        ));
    }
    if cost.billable_swaps > 0 {
        out.push_str(&format!(
            "  Swap Charges ({} \u{00d7} {}): {}\n",
            cost.billable_swaps,
            tier.swap_price,
            format!("+{}/mo", cost.swap_charge).green()
        ));
    }
    out.push_str(&format!(
        "  {} {}\n",
        "Total Monthly Cost:".bold(),
        format!("{}/mo", cost.total).green().bold()
    ));
    if tier.contact_sales {
        out.push_str(&format!(
            "  {}\n",
            "Enterprise pricing is finalised with our sales team.".dimmed()
        ));
    }
    out
}

pub fn format_state(state: &EntitlementState) -> String {
    let tier = state.tier();
    let mut out = String::new();
    out.push_str(&format!(
        "  {}: {} ({} included, max {})\n",
        "Tier".bold(),
        tier.name().cyan(),
        tier.included,
        tier.max
    ));

    for (i, protection) in state.selected().iter().enumerate() {
        let tag = match state.classification(*protection) {
            Some(Classification::AddOn) => format!("(+{})", tier.add_on_price).yellow().to_string(),
            _ => String::new(),
        };
        out.push_str(&format!(
            "  {:>3}. {} {} {}\n",
            i + 1,
            "\u{2713}".green(),
            protection,
            tag
        ));
    }

    let swaps = match tier.swap_quota {
        shepherd_core::Limit::Unbounded => format!("{} (unlimited)", state.swaps_used()),
        quota => format!("{} of {} free", state.swaps_used(), quota),
    };
    out.push_str(&format!("  {}: {}\n", "Swaps used".bold(), swaps));

    if let Some(pending) = state.pending() {
        out.push_str(&format!(
            "  {}: {}\n",
            "Pending".bold(),
            describe_pending(pending).yellow()
        ));
    }
    out
}

fn describe_pending(pending: &PendingAction) -> String {
    match pending {
        PendingAction::AddOn {
            protection,
            monthly_delta,
        } => format!("add {} (+{}/mo)", protection, monthly_delta),
        PendingAction::Swap {
            outgoing,
            incoming: Some(incoming),
            ..
        } => format!("swap {} \u{2192} {}", outgoing, incoming),
        PendingAction::Swap {
            outgoing,
            incoming: None,
            ..
        } => format!("swap out {} (no replacement chosen)", outgoing),
    }
}

fn swap_price_label(is_free: bool, price: &shepherd_core::Money) -> String {
    if is_free {
        "free swap".to_string()
    } else {
        format!("{} swap", price)
    }
}

pub fn format_decision(decision: &Decision, cost: &MonthlyCost) -> String {
    match decision {
        Decision::Reject(reason) => {
            format!("  {} Not allowed: {}\n", "\u{2717}".red(), reason)
        }
        Decision::ApplyFree(FreeChange::Add(p)) => {
            format!("  {} Added {}\n", "\u{2713}".green(), p.to_string().bold())
        }
        Decision::ApplyFree(FreeChange::Remove(p)) => {
            format!("  {} Removed {}\n", "\u{2713}".green(), p.to_string().bold())
        }
        Decision::RequiresAddOnConfirmation {
            protection,
            monthly_delta,
        } => {
            let mut out = format!(
                "  {} You're about to add {} as an extra protection.\n",
                "$".yellow(),
                protection.to_string().yellow().bold()
            );
            out.push_str(&format!("    Current Monthly Cost:  {}/mo\n", cost.total));
            out.push_str(&format!(
                "    Additional Protection: {}\n",
                format!("+{}/mo", monthly_delta).yellow()
            ));
            out.push_str(&format!(
                "    New Monthly Cost:      {}\n",
                format!("{}/mo", cost.total + *monthly_delta).green().bold()
            ));
            out.push_str(&confirm_hint());
            out
        }
        Decision::RequiresSwapConfirmation {
            outgoing,
            incoming: None,
            is_free,
            monthly_delta,
        } => {
            let mut out = format!(
                "  {} Swapping out add-on {}.\n",
                "\u{21c4}".yellow(),
                outgoing.to_string().bold()
            );
            out.push_str(&format!(
                "    Pick a replacement with 'toggle <protection>' ({}),\n",
                swap_price_label(*is_free, &cost.tier.tier().swap_price)
            ));
            out.push_str(&format!(
                "    or 'confirm' to drop it. New Monthly Cost: {} ({}/mo)\n",
                format!("{}/mo", cost.total + *monthly_delta).green().bold(),
                monthly_delta
            ));
            out
        }
        Decision::RequiresSwapConfirmation {
            outgoing,
            incoming: Some(incoming),
            is_free,
            monthly_delta,
        } => {
            let mut out = format!(
                "  {} Swap {} \u{2192} {} ({}).\n",
                "\u{21c4}".yellow(),
                outgoing.to_string().bold(),
                incoming.to_string().bold(),
                swap_price_label(*is_free, monthly_delta)
            );
            out.push_str(&format!(
                "    New Monthly Cost: {}\n",
                format!("{}/mo", cost.total + *monthly_delta).green().bold()
            ));
            out.push_str(&confirm_hint());
            out
        }
    }
}

fn confirm_hint() -> String {
    format!(
        "    Type '{}' to update billing or '{}' to keep your plan.\n",
        "confirm".bold(),
        "cancel".bold()
    )
}

pub fn format_committed(change: &Committed, cost: &MonthlyCost) -> String {
    let what = match change {
        Committed::Added { protection } => format!("Added {} as an add-on", protection),
        Committed::Removed { protection } => format!("Removed add-on {}", protection),
        Committed::Swapped {
            outgoing,
            incoming,
            free,
            ..
        } => format!(
            "Swapped {} \u{2192} {}{}",
            outgoing,
            incoming,
            if *free { " (free)" } else { "" }
        ),
    };
    format!(
        "  {} {}. Total: {}\n",
        "\u{2713}".green(),
        what,
        format!("{}/mo", cost.total).green().bold()
    )
}

pub fn format_event(event: &SessionEvent) -> String {
    match event {
        SessionEvent::Decision { decision, cost } => format_decision(decision, cost),
        SessionEvent::Committed { change, cost } => format_committed(change, cost),
        SessionEvent::Cancelled { discarded: Some(p) } => {
            format!("  Cancelled: {}\n", describe_pending(p))
        }
        SessionEvent::Cancelled { discarded: None } => {
            format!("  {}\n", "Nothing to cancel.".dimmed())
        }
        SessionEvent::TierChanged { tier, cost } => format!(
            "  {} Switched to {}. Protections reset to the plan defaults.\n{}",
            "\u{2713}".green(),
            tier.name().cyan(),
            format_cost(cost)
        ),
        SessionEvent::Status { state, cost } => {
            format!("{}{}", format_state(state), format_cost(cost))
        }
        SessionEvent::Cost { cost } => format_cost(cost),
        SessionEvent::PeriodReset => format!(
            "  {} New billing period: swap usage reset.\n",
            "\u{2713}".green()
        ),
        SessionEvent::Help => format!("{}\n", HELP),
        SessionEvent::Error { message } => {
            format!("  {} {}\n", "Error:".red().bold(), message)
        }
        SessionEvent::Quit => String::new(),
    }
}

pub fn format_envelope(title: &str, envelope: &Envelope) -> String {
    if !envelope.success {
        return format!(
            "  {} {}\n",
            "Error:".red().bold(),
            envelope.error.as_deref().unwrap_or("request failed")
        );
    }

    let mut out = match envelope.count {
        Some(n) => format!("  {} ({})\n", title.bold(), n),
        None => format!("  {}\n", title.bold()),
    };
    if let Some(data) = &envelope.data {
        let body = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
        for line in body.lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }
    out
}
