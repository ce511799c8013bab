use std::sync::Arc;

use colored::Colorize;

use tipjar_events::{EventFilter, EventHub};
use tipjar_ledger::{
    DonationRead, DonationWrite, InMemoryLedger, LedgerAuditor, LedgerConfig, RecordingSink,
};
use tipjar_server::{DonationServer, ServerConfig};
use tipjar_types::{AccountId, Amount};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Account(args) => cmd_account(args),
        Command::Demo(_) => cmd_demo(),
    }
}

/// Command-line flags win over whatever the config file says.
fn apply_overrides(mut config: ServerConfig, args: &ServeArgs) -> ServerConfig {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(owner) = &args.owner {
        config.owner = owner.clone();
    }
    if let Some(minimum) = args.min_donation {
        config.minimum_donation = minimum;
    }
    config
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    let config = apply_overrides(config, &args);

    println!("{} tipjar server", "●".green());
    println!("  Bind: {}", config.bind_addr.to_string().bold());
    println!("  Owner: {}", config.owner.short_id().yellow());
    println!(
        "  Minimum donation: {} base units",
        config.minimum_donation.to_string().bold()
    );

    DonationServer::new(config).serve().await?;
    Ok(())
}

fn cmd_account(args: AccountArgs) -> anyhow::Result<()> {
    let account = match &args.label {
        Some(label) => AccountId::from_label(label),
        None => AccountId::ephemeral(),
    };
    println!("{}", account.to_hex());
    println!("  Short: {}", account.short_id().cyan());
    if let Some(label) = &args.label {
        println!("  Label: {}", label.yellow());
    }
    Ok(())
}

fn cmd_demo() -> anyhow::Result<()> {
    let owner = AccountId::from_label("demo-owner");
    let sink = Arc::new(RecordingSink::new());
    let events = Arc::new(EventHub::default());
    let ledger = InMemoryLedger::new(owner.clone())
        .with_config(LedgerConfig {
            minimum_donation: Amount::new(10),
        })
        .with_sink(sink.clone())
        .with_events(events.clone());
    let mut stream = events.subscribe(EventFilter::default());

    let alice = AccountId::from_label("alice");
    let bob = AccountId::from_label("bob");

    println!("{}", "tipjar demo ledger".bold());
    println!("  Owner: {}", owner.short_id().cyan());
    println!("  Minimum donation: {} base units\n", "10".bold());

    for (donor, amount, message) in [
        (&alice, 25, "keep it up"),
        (&bob, 40, ""),
        (&alice, 15, "round two"),
    ] {
        let receipt = ledger.donate(donor, Amount::new(amount), message)?;
        println!(
            "{} {} donated {} ({})",
            "✓".green(),
            donor.short_id().yellow(),
            receipt.amount.to_string().bold(),
            if receipt.first_donation {
                "first donation"
            } else {
                "returning donor"
            },
        );
    }

    // At the floor exactly: strictly-greater is enforced.
    if let Err(e) = ledger.donate(&bob, Amount::new(10), "sorry") {
        println!("{} rejected donation: {}", "✗".red(), e);
    }

    let stranger = AccountId::from_label("stranger");
    if let Err(e) = ledger.withdraw(&stranger) {
        println!("{} rejected withdrawal: {}", "✗".red(), e);
    }

    let totals = ledger.totals()?;
    println!(
        "\nTotals: {} donors, {} raised, {} held",
        totals.donor_count.to_string().bold(),
        totals.total_amount.to_string().bold(),
        totals.balance.to_string().bold(),
    );
    for account in ledger.donors()? {
        let summary = ledger.donor(&account)?;
        let history = ledger.donor_history(&account)?;
        println!(
            "  {}: total {}, {} contributions, latest message {:?}",
            account.short_id().yellow(),
            summary.total_amount,
            history.len(),
            summary.latest_message,
        );
    }

    let receipt = ledger.withdraw(&owner)?;
    println!(
        "\n{} swept {} to {}",
        "✓".green().bold(),
        receipt.amount.to_string().bold(),
        owner.short_id().yellow(),
    );
    println!("  Settled payouts: {}", sink.total_to(&owner));

    let report = LedgerAuditor::audit(&ledger)?;
    println!(
        "{} audit: {} donors, consistent: {}",
        "✓".green().bold(),
        report.donor_count,
        report.is_consistent(),
    );

    println!("\nEvents observed:");
    while let Ok(event) = stream.try_recv() {
        println!(
            "  {} {} {}",
            event.kind.to_string().cyan(),
            event.payload.account().short_id().yellow(),
            event.payload.amount(),
        );
    }
    Ok(())
}
