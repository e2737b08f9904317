//! One function per subcommand. Each runs as a single atomic call: load the
//! state, apply at most one registry operation, persist only on success.
//! Mutating calls hold the store lock across all three steps.

use std::io::Write;

use anyhow::{Context, Result};

use ownable_core::{Caller, OwnerRegistry};
use ownable_types::{Identity, OwnershipError};

use crate::state::{Deployment, StateError, Store};

/// Result of a mutating call that the registry may refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(OwnershipError),
}

pub fn deploy(
    store: &Store,
    deployer: Identity,
    force: bool,
    out: &mut impl Write,
) -> Result<Outcome> {
    let registry = match OwnerRegistry::deploy(&Caller::new(deployer)) {
        Ok(registry) => registry,
        Err(err) => return Ok(Outcome::Rejected(err)),
    };

    let _lock = store.lock()?;
    if store.exists() && !force {
        return Err(StateError::AlreadyDeployed {
            path: store.path().to_path_buf(),
        }
        .into());
    }

    let deployment = Deployment::new(registry);
    store.save(&deployment)?;

    tracing::info!(
        path = %store.path().display(),
        owner = %deployment.registry.owner(),
        "Registry state created"
    );
    writeln!(out, "deployed: owner {}", deployment.registry.owner())?;
    Ok(Outcome::Applied)
}

pub fn owner(store: &Store, out: &mut impl Write) -> Result<()> {
    let deployment = store.load()?;
    writeln!(out, "{}", deployment.registry.owner())?;
    Ok(())
}

pub fn transfer(
    store: &Store,
    caller: Identity,
    new_owner: Identity,
    out: &mut impl Write,
) -> Result<Outcome> {
    let _lock = store.lock()?;
    let mut deployment = store.load()?;
    let Deployment { registry, history } = &mut deployment;

    if let Err(err) = registry.transfer_ownership(&Caller::new(caller), history, new_owner) {
        return Ok(Outcome::Rejected(err));
    }

    store
        .save(&deployment)
        .context("transfer succeeded but the new state could not be persisted")?;

    if let Some(event) = deployment.history.last() {
        writeln!(out, "{event}")?;
    }
    Ok(Outcome::Applied)
}

pub fn history(store: &Store, json: bool, out: &mut impl Write) -> Result<()> {
    let deployment = store.load()?;
    let events = deployment.history.events();

    if json {
        serde_json::to_writer_pretty(&mut *out, events)?;
        writeln!(out)?;
        return Ok(());
    }

    for event in events {
        writeln!(out, "{event}")?;
    }
    Ok(())
}
