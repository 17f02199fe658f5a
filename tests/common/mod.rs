//! Common test utilities

use std::cell::RefCell;
use std::rc::Rc;

use custodial_ledger::{AccountId, Ledger, LedgerEvent};

/// Ledger with an owner and one funded-by-nobody holder, plus a recorder
/// that collects every notification.
pub struct Fixture {
    pub ledger: Ledger,
    pub owner: AccountId,
    pub holder: AccountId,
    pub observed: Rc<RefCell<Vec<LedgerEvent>>>,
}

/// Fresh ledger per test, the way a fresh deployment precedes every case
pub fn setup_ledger() -> Fixture {
    let owner = AccountId::random();
    let holder = AccountId::random();
    let mut ledger = Ledger::create(owner);

    let observed = Rc::new(RefCell::new(Vec::new()));
    let sink = observed.clone();
    ledger.subscribe(move |event: &LedgerEvent| sink.borrow_mut().push(event.clone()));

    Fixture {
        ledger,
        owner,
        holder,
        observed,
    }
}
