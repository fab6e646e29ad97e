//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::NaiveDateTime;

use crate::{Account, Case, Deal, Person, Subscription};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(kind: &str, id: Option<&str>) -> Vec<String> {
    let title = format!("{kind}: {}", id.unwrap_or("-"));
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn stamp(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

impl PrettyPrint for Account {
    fn pretty_print(&self) -> String {
        let mut lines = header("Account", self.uid.as_deref());

        if let Some(ref name) = self.name {
            lines.push(format!("Name:           {}", name));
        }

        match (self.stage(), self.account_stage) {
            (Some(stage), _) => lines.push(format!("Stage:          {}", stage)),
            (None, Some(code)) => lines.push(format!("Stage:          {} (unknown)", code)),
            (None, None) => {}
        }

        if let Some(primary) = self.primary_contact().and_then(|pa| pa.person.as_deref()) {
            lines.push(format!(
                "Primary:        {}",
                primary.email.as_deref().unwrap_or("-")
            ));
        }

        if let Some(ref members) = self.person_account {
            lines.push(format!("Members:        {}", members.len()));
        }

        if let Some(ref created) = self.created {
            lines.push(format!("Created:        {}", stamp(created)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Person {
    fn pretty_print(&self) -> String {
        let mut lines = header("Person", self.uid.as_deref());

        let name = self.display_name();
        if !name.is_empty() {
            lines.push(format!("Name:           {}", name));
        }

        if let Some(ref email) = self.email {
            lines.push(format!("Email:          {}", email));
        }

        if let Some(ref title) = self.title {
            lines.push(format!("Title:          {}", title));
        }

        if let Some(ref accounts) = self.person_account {
            let names: Vec<&str> = accounts
                .iter()
                .filter_map(|pa| pa.account.as_ref()?.name.as_deref())
                .collect();
            if !names.is_empty() {
                lines.push(format!("Accounts:       {}", names.join(", ")));
            }
        }

        if let Some(ref last_login) = self.last_login_date_time {
            lines.push(format!("Last Login:     {}", stamp(last_login)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Subscription {
    fn pretty_print(&self) -> String {
        let mut lines = header("Subscription", self.uid.as_deref());

        if let Some(name) = self.plan.as_ref().and_then(|p| p.name.as_deref()) {
            lines.push(format!("Plan:           {}", name));
        }

        if let Some(term) = self.renewal_term() {
            lines.push(format!("Renews:         {}", term));
        }

        if let Some(quantity) = self.quantity {
            lines.push(format!("Quantity:       {}", quantity));
        }

        if let Some(ref renewal) = self.renewal_date {
            lines.push(format!("Next Renewal:   {}", stamp(renewal)));
        }

        if self.is_plan_upgrade_required == Some(true) {
            lines.push(format!(
                "Upgrade:        required{}",
                self.plan_upgrade_required_message
                    .as_deref()
                    .map(|m| format!(" ({m})"))
                    .unwrap_or_default()
            ));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Deal {
    fn pretty_print(&self) -> String {
        let mut lines = header("Deal", self.uid.as_deref());

        if let Some(ref name) = self.name {
            lines.push(format!("Name:           {}", name));
        }

        if let Some(amount) = self.amount {
            lines.push(format!("Amount:         {:.2}", amount));
        }

        if let Some(stage) = self
            .deal_pipeline_stage
            .as_ref()
            .and_then(|s| s.name.as_deref().or(s.uid.as_deref()))
        {
            lines.push(format!("Stage:          {}", stage));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Case {
    fn pretty_print(&self) -> String {
        let mut lines = header("Case", self.uid.as_deref());

        if let Some(ref subject) = self.subject {
            lines.push(format!("Subject:        {}", subject));
        }

        if let Some(status) = self.case_status() {
            lines.push(format!("Status:         {}", status));
        }

        if let Some(from) = self.from_person.as_ref().and_then(|p| p.email.as_deref()) {
            lines.push(format!("From:           {}", from));
        }

        if let Some(ref histories) = self.case_histories {
            lines.push(format!("Replies:        {}", histories.len()));
        }

        if let Some(ref submitted) = self.submitted_date_time {
            lines.push(format!("Submitted:      {}", stamp(submitted)));
        }

        lines.join("\n")
    }
}
