//! Basic example demonstrating the Outseta API client.
//!
//! Run with:
//! ```
//! OUTSETA_URL=https://acme.outseta.com/api/v1 OUTSETA_KEY="Outseta key:secret" \
//!     cargo run --example basic
//! ```

use outseta::{
    Account, AccountListQuery, AccountStage, Get, List, ListOptions, OrderBy, OutsetaClient,
    Person, Plan,
};

#[tokio::main]
async fn main() -> outseta::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Outseta client...");
    let client = OutsetaClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List first page of people, newest first
    println!("\n--- Listing People (first page) ---");
    let people = Person::list_page(&client, &(), 0, 10).await?;
    println!("Found {} people (total: {:?})", people.len(), people.total);

    for person in &people {
        println!(
            "  - {} <{}>",
            person.display_name(),
            person.email.as_deref().unwrap_or("-")
        );
    }

    // Get a specific person with their account memberships
    if let Some(uid) = people.items.first().and_then(|p| p.uid.clone()) {
        println!("\n--- Person Details ---");
        let person = Person::get(&client, uid).await?;
        println!("Person: {}", person.display_name());
        for membership in person.person_account.iter().flatten() {
            let name = membership
                .account
                .as_ref()
                .and_then(|a| a.name.as_deref())
                .unwrap_or("unknown");
            let primary = if membership.is_primary == Some(true) {
                " (primary)"
            } else {
                ""
            };
            println!("  Member of: {name}{primary}");
        }
    }

    // Accounts that are currently trialing
    println!("\n--- Trialing Accounts ---");
    let query = AccountListQuery {
        account_stage: Some(AccountStage::Trialing),
        options: ListOptions::default().order_by(OrderBy::desc("Created")),
    };
    let trialing = Account::list_all(&client, &query).await?;
    println!("Found {} trialing accounts", trialing.len());

    for account in trialing.iter().take(5) {
        println!(
            "  - {} ({})",
            account.name.as_deref().unwrap_or("unnamed"),
            account.uid.as_deref().unwrap_or("-")
        );
    }

    // Plans on offer
    println!("\n--- Plans ---");
    let plans = Plan::list_all(&client, &ListOptions::default()).await?;
    for plan in &plans {
        println!(
            "  - {} ({})",
            plan.name.as_deref().unwrap_or("unnamed"),
            plan.uid.as_deref().unwrap_or("-")
        );
    }

    println!("\nDone!");
    Ok(())
}
