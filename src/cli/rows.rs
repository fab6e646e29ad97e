//! Table rows for non-JSON list output.

use tabled::Tabled;

use crate::{
    Account, Activity, AddOn, Case, Deal, EmailList, MarketingSubscription, Person, Plan,
    PlanFamily, Subscription, Transaction,
};

/// One line of a listing: the Uid, a name and one entity-specific detail.
#[derive(Tabled)]
pub(crate) struct Row {
    uid: String,
    name: String,
    detail: String,
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

impl From<&Account> for Row {
    fn from(a: &Account) -> Self {
        Self {
            uid: text(a.uid.as_deref()),
            name: text(a.name.as_deref()),
            detail: a.stage().map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

impl From<&Person> for Row {
    fn from(p: &Person) -> Self {
        Self {
            uid: text(p.uid.as_deref()),
            name: p.display_name(),
            detail: text(p.email.as_deref()),
        }
    }
}

impl From<&Deal> for Row {
    fn from(d: &Deal) -> Self {
        Self {
            uid: text(d.uid.as_deref()),
            name: text(d.name.as_deref()),
            detail: d.amount.map(|a| format!("{a:.2}")).unwrap_or_default(),
        }
    }
}

impl From<&Activity> for Row {
    fn from(a: &Activity) -> Self {
        Self {
            uid: text(a.uid.as_deref()),
            name: text(a.title.as_deref()),
            detail: a.kind().map(|k| k.to_string()).unwrap_or_default(),
        }
    }
}

impl From<&Subscription> for Row {
    fn from(s: &Subscription) -> Self {
        Self {
            uid: text(s.uid.as_deref()),
            name: text(s.plan.as_ref().and_then(|p| p.name.as_deref())),
            detail: s.renewal_term().map(|t| t.to_string()).unwrap_or_default(),
        }
    }
}

impl From<&Plan> for Row {
    fn from(p: &Plan) -> Self {
        Self {
            uid: text(p.uid.as_deref()),
            name: text(p.name.as_deref()),
            detail: p
                .monthly_rate
                .map(|r| format!("{r:.2}/month"))
                .unwrap_or_default(),
        }
    }
}

impl From<&PlanFamily> for Row {
    fn from(f: &PlanFamily) -> Self {
        Self {
            uid: text(f.uid.as_deref()),
            name: text(f.name.as_deref()),
            detail: f
                .plans
                .as_ref()
                .map(|p| format!("{} plans", p.len()))
                .unwrap_or_default(),
        }
    }
}

impl From<&AddOn> for Row {
    fn from(a: &AddOn) -> Self {
        Self {
            uid: text(a.uid.as_deref()),
            name: text(a.name.as_deref()),
            detail: text(a.unit_of_measure.as_deref()),
        }
    }
}

impl From<&Transaction> for Row {
    fn from(t: &Transaction) -> Self {
        Self {
            uid: text(t.uid.as_deref()),
            name: t.kind().map(|k| k.to_string()).unwrap_or_default(),
            detail: t.amount.map(|a| format!("{a:.2}")).unwrap_or_default(),
        }
    }
}

impl From<&EmailList> for Row {
    fn from(l: &EmailList) -> Self {
        Self {
            uid: text(l.uid.as_deref()),
            name: text(l.name.as_deref()),
            detail: l
                .count_subscriptions_active
                .map(|c| format!("{c} active"))
                .unwrap_or_default(),
        }
    }
}

impl From<&MarketingSubscription> for Row {
    fn from(s: &MarketingSubscription) -> Self {
        Self {
            uid: text(s.uid.as_deref()),
            name: text(s.person.as_ref().and_then(|p| p.email.as_deref())),
            detail: s
                .subscribed_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

impl From<&Case> for Row {
    fn from(c: &Case) -> Self {
        Self {
            uid: text(c.uid.as_deref()),
            name: text(c.subject.as_deref()),
            detail: c.case_status().map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_become_empty_cells() {
        let row = Row::from(&Deal::default());
        assert_eq!(row.uid, "");
        assert_eq!(row.name, "");
        assert_eq!(row.detail, "");
    }

    #[test]
    fn test_plan_family_counts_plans() {
        let family: PlanFamily = serde_json::from_value(serde_json::json!({
            "Uid": "fam-1",
            "Name": "Core",
            "Plans": [{"Uid": "p1"}, {"Uid": "p2"}]
        }))
        .unwrap();

        let row = Row::from(&family);
        assert_eq!(row.name, "Core");
        assert_eq!(row.detail, "2 plans");
    }
}
