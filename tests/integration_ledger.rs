//! Integration tests for the ledger's deposit/withdraw session

use custodial_ledger::domain::units::parse_ether;
use custodial_ledger::{
    AccountId, Amount, ErrorKind, Ledger, LedgerError, LedgerSnapshot, Payout, PayoutQueue,
};

mod common;

#[test]
fn test_owner_is_creator() {
    let fx = common::setup_ledger();
    assert_eq!(fx.ledger.owner(), fx.owner);
    assert_ne!(fx.ledger.owner(), fx.holder);
}

#[test]
fn test_deposit_updates_balance_and_notifies() {
    let mut fx = common::setup_ledger();
    let initial = fx.ledger.balance_of(fx.holder);
    let deposit = parse_ether("0.01").unwrap();

    fx.ledger.deposit(fx.holder, deposit).unwrap();

    let balance = fx.ledger.balance_of(fx.holder);
    assert_eq!(balance.wei(), initial.wei() + deposit.wei());

    let observed = fx.observed.borrow();
    assert_eq!(observed.len(), 1);
    assert_eq!(observed[0].event_type(), "Deposited");
    assert_eq!(observed[0].args(), (deposit, fx.holder));
}

#[test]
fn test_withdraw_updates_balance_and_notifies() {
    let mut fx = common::setup_ledger();
    fx.ledger.deposit(fx.holder, parse_ether("0.01").unwrap()).unwrap();
    let initial = fx.ledger.balance_of(fx.holder);
    let withdraw = parse_ether("0.005").unwrap();

    fx.ledger.withdraw(fx.holder, withdraw).unwrap();

    assert_eq!(fx.ledger.balance_of(fx.holder).wei(), initial.wei() - withdraw.wei());

    let observed = fx.observed.borrow();
    assert_eq!(observed.len(), 2);
    assert_eq!(observed[1].event_type(), "Withdrawn");
    assert_eq!(observed[1].args(), (withdraw, fx.holder));

    assert_eq!(
        fx.ledger.settlement().payouts(),
        &[Payout { to: fx.holder, amount: withdraw }]
    );
}

#[test]
fn test_query_balance() {
    let mut fx = common::setup_ledger();
    let deposit = parse_ether("0.01").unwrap();
    fx.ledger.deposit(fx.holder, deposit).unwrap();

    assert_eq!(Amount::from(fx.ledger.balance_of(fx.holder)), deposit);
    assert!(fx.ledger.balance_of(AccountId::random()).is_zero());
}

#[test]
fn test_zero_deposit_rejected() {
    let mut fx = common::setup_ledger();

    let err = fx.ledger.deposit(fx.holder, Amount::ZERO).unwrap_err();

    assert_eq!(err.to_string(), "deposit amount must be greater than zero");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(fx.observed.borrow().is_empty());
}

#[test]
fn test_overdraw_rejected() {
    let mut fx = common::setup_ledger();

    let err = fx
        .ledger
        .withdraw(fx.holder, parse_ether("0.02").unwrap())
        .unwrap_err();

    assert_eq!(err.to_string(), "insufficient balance");
    assert_eq!(err.code(), "insufficient_balance");
    assert!(fx.observed.borrow().is_empty());
}

#[test]
fn test_full_session() {
    let mut fx = common::setup_ledger();
    let holder = fx.holder;

    fx.ledger.deposit(holder, parse_ether("0.01").unwrap()).unwrap();
    assert_eq!(fx.ledger.balance_of(holder).wei(), parse_ether("0.01").unwrap().wei());

    fx.ledger.withdraw(holder, parse_ether("0.005").unwrap()).unwrap();
    let remaining = parse_ether("0.005").unwrap().wei();
    assert_eq!(fx.ledger.balance_of(holder).wei(), remaining);

    let err = fx
        .ledger
        .withdraw(holder, parse_ether("0.02").unwrap())
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    assert_eq!(fx.ledger.balance_of(holder).wei(), remaining);

    let err = fx.ledger.deposit(holder, Amount::ZERO).unwrap_err();
    assert_eq!(err, LedgerError::ZeroDeposit);
    assert_eq!(fx.ledger.balance_of(holder).wei(), remaining);

    let observed = fx.observed.borrow();
    let types: Vec<_> = observed.iter().map(|e| e.event_type()).collect();
    assert_eq!(types, ["Deposited", "Withdrawn"]);
    assert_eq!(fx.ledger.total_held().wei(), remaining);
}

#[test]
fn test_conservation_across_accounts() {
    let mut ledger = Ledger::create(AccountId::random());
    let accounts: Vec<AccountId> = (0..5).map(|_| AccountId::random()).collect();

    for (i, account) in accounts.iter().enumerate() {
        ledger.deposit(*account, Amount::from_wei(100 * (i as u128 + 1))).unwrap();
    }
    for account in accounts.iter().step_by(2) {
        ledger.withdraw(*account, Amount::from_wei(50)).unwrap();
    }
    // Rejected calls must not disturb the books.
    let _ = ledger.withdraw(accounts[0], Amount::from_wei(1_000));
    let _ = ledger.deposit(accounts[1], Amount::ZERO);

    let sum: u128 = accounts.iter().map(|a| ledger.balance_of(*a).wei()).sum();
    assert_eq!(sum, ledger.total_held().wei());
    assert_eq!(sum, 1_500 - 150);
}

#[test]
fn test_independent_ledgers() {
    let holder = AccountId::random();
    let mut first = Ledger::create(AccountId::random());
    let second = Ledger::create(AccountId::random());

    first.deposit(holder, Amount::from_wei(7)).unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(first.balance_of(holder).wei(), 7);
    assert!(second.balance_of(holder).is_zero());
}

#[test]
fn test_journal_replays_to_same_balances() {
    let mut fx = common::setup_ledger();
    let other = AccountId::random();
    fx.ledger.deposit(fx.holder, parse_ether("1.5").unwrap()).unwrap();
    fx.ledger.deposit(other, parse_ether("0.25").unwrap()).unwrap();
    fx.ledger.withdraw(fx.holder, parse_ether("0.5").unwrap()).unwrap();

    let json = fx.ledger.snapshot().to_json().unwrap();
    let snapshot = LedgerSnapshot::from_json(&json).unwrap();
    let restored = Ledger::restore(snapshot, PayoutQueue::new()).unwrap();

    assert_eq!(restored.balance_of(fx.holder), fx.ledger.balance_of(fx.holder));
    assert_eq!(restored.balance_of(other), fx.ledger.balance_of(other));
    assert_eq!(restored.total_held(), fx.ledger.total_held());
    assert_eq!(restored.owner(), fx.owner);
}
