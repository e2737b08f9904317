//! Ownership lifecycle tests against the public registry API.

use ownable_core::{Caller, EventLog, OwnerRegistry};
use ownable_types::{Identity, OwnershipError, OwnershipTransferred};

use crate::common::{ALICE, BOB, DEPLOYER, identity};

fn deploy() -> (OwnerRegistry, EventLog) {
    let registry = OwnerRegistry::deploy(&Caller::new(identity(DEPLOYER))).unwrap();
    (registry, EventLog::new())
}

#[test]
fn sets_deployer_as_owner() {
    let (registry, _) = deploy();
    assert_eq!(registry.owner(), identity(DEPLOYER));
}

#[test]
fn prevents_non_owner_from_transferring() {
    let (mut registry, mut log) = deploy();
    let attacker = identity(ALICE);

    let err = registry
        .transfer_ownership(&Caller::new(attacker), &mut log, attacker)
        .unwrap_err();

    assert_eq!(err.code(), "NOT_OWNER");
    assert_eq!(registry.owner(), identity(DEPLOYER));
}

#[test]
fn allows_owner_to_transfer() {
    let (mut registry, mut log) = deploy();

    registry
        .transfer_ownership(&Caller::new(identity(DEPLOYER)), &mut log, identity(ALICE))
        .unwrap();

    assert_eq!(registry.owner(), identity(ALICE));
}

#[test]
fn emits_ownership_transferred_with_previous_and_new() {
    let (mut registry, mut log) = deploy();

    registry
        .transfer_ownership(&Caller::new(identity(DEPLOYER)), &mut log, identity(ALICE))
        .unwrap();

    assert_eq!(
        log.take(),
        vec![OwnershipTransferred::new(identity(DEPLOYER), identity(ALICE))]
    );
}

#[test]
fn rejects_zero_new_owner() {
    let (mut registry, mut log) = deploy();

    let err = registry
        .transfer_ownership(&Caller::new(identity(DEPLOYER)), &mut log, Identity::ZERO)
        .unwrap_err();

    assert_eq!(err.code(), "ZERO_ADDRESS");
    assert!(log.is_empty());
}

#[test]
fn rejects_transfer_to_same_owner() {
    let (mut registry, mut log) = deploy();

    let err = registry
        .transfer_ownership(&Caller::new(identity(DEPLOYER)), &mut log, identity(DEPLOYER))
        .unwrap_err();

    assert_eq!(err.code(), "SAME_OWNER");
    assert!(log.is_empty());
}

#[test]
fn every_non_owner_is_refused() {
    let (mut registry, mut log) = deploy();

    for byte in 1..=u8::MAX {
        let outsider = Identity::from_bytes([byte; ownable_types::IDENTITY_LEN]);
        if outsider == registry.owner() {
            continue;
        }
        for target in [Identity::ZERO, outsider, identity(DEPLOYER), identity(BOB)] {
            assert_eq!(
                registry.transfer_ownership(&Caller::new(outsider), &mut log, target),
                Err(OwnershipError::Unauthorized)
            );
        }
    }

    assert_eq!(registry.owner(), identity(DEPLOYER));
    assert!(log.is_empty());
}

#[test]
fn ownership_chain_moves_authority_each_hop() {
    let (mut registry, mut log) = deploy();
    let chain = [identity(DEPLOYER), identity(ALICE), identity(BOB), identity(DEPLOYER)];

    for hop in chain.windows(2) {
        let (from, to) = (hop[0], hop[1]);
        registry
            .transfer_ownership(&Caller::new(from), &mut log, to)
            .unwrap();

        assert_eq!(registry.owner(), to);
        assert_eq!(
            registry.transfer_ownership(&Caller::new(from), &mut log, from),
            Err(OwnershipError::Unauthorized),
            "previous owner {from} kept authority"
        );
    }

    let recorded: Vec<(Identity, Identity)> = log
        .events()
        .iter()
        .map(|event| (event.previous_owner(), event.new_owner()))
        .collect();
    assert_eq!(
        recorded,
        vec![
            (identity(DEPLOYER), identity(ALICE)),
            (identity(ALICE), identity(BOB)),
            (identity(BOB), identity(DEPLOYER)),
        ]
    );
}
