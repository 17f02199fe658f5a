//! custodial_ledger - reference host
//!
//! Creates a ledger and runs a short deposit/withdraw session against it,
//! logging each outcome. Payouts are queued rather than delivered.

use custodial_ledger::domain::units::{format_ether, parse_ether};
use custodial_ledger::telemetry::init_tracing;
use custodial_ledger::{AccountId, Amount, Config, Ledger, LedgerEvent};

/// One call made by the account holder during the session
#[derive(Debug, Clone, Copy)]
enum Step {
    Deposit(Amount),
    Withdraw(Amount),
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config);

    let owner = config.owner.unwrap_or_else(AccountId::random);
    let mut ledger = Ledger::create(owner);

    let symbol = config.native_symbol.clone();
    ledger.subscribe(move |event: &LedgerEvent| {
        tracing::info!(
            sequence = event.sequence(),
            account = %event.account(),
            "{} {} {}",
            event.event_type(),
            format_ether(event.amount()),
            symbol
        );
    });

    let holder = AccountId::random();
    tracing::info!(ledger_id = %ledger.id(), owner = %ledger.owner(), holder = %holder, "Session started");

    let session = [
        Step::Deposit(parse_ether("0.01")?),
        Step::Withdraw(parse_ether("0.005")?),
        Step::Withdraw(parse_ether("0.02")?),
        Step::Deposit(Amount::ZERO),
    ];

    for step in session {
        let result = match step {
            Step::Deposit(amount) => ledger.deposit(holder, amount).map(|_| ()),
            Step::Withdraw(amount) => ledger.withdraw(holder, amount).map(|_| ()),
        };

        if let Err(e) = result {
            tracing::warn!(?step, code = e.code(), "{}", e);
        }
    }

    let payouts = ledger.settlement_mut().drain();
    tracing::info!(
        balance = %format_ether(ledger.balance_of(holder).into()),
        total_held = %format_ether(ledger.total_held().into()),
        payouts = payouts.len(),
        "Session finished"
    );
    let journal = ledger.snapshot().to_json()?;
    tracing::debug!(snapshot = %journal, "Final journal");

    Ok(())
}
