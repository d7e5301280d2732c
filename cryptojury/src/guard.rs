//! Precondition checks shared by the court operations.
//!
//! Each operation composes the guards it needs before touching any state.

use crate::*;

pub fn ensure_not_null(identity: &Identity) -> Result<(), ValidationError> {
    if identity.is_null() {
        return Err(ValidationError::InvalidIdentity);
    }
    Ok(())
}

pub fn ensure_owner(registry: &IdentityRegistry, caller: &Identity) -> Result<(), ValidationError> {
    if *caller != registry.owner() {
        return Err(ValidationError::NotOwner);
    }
    Ok(())
}

pub fn ensure_judge(case: &Case, caller: &Identity) -> Result<(), ValidationError> {
    if *caller != case.judge {
        return Err(ValidationError::NotJudge(case.id));
    }
    Ok(())
}

pub fn ensure_certified(
    registry: &IdentityRegistry,
    identity: &Identity,
) -> Result<(), ValidationError> {
    if !registry.is_certified(identity) {
        return Err(ValidationError::NotCertified(*identity));
    }
    Ok(())
}

pub fn ensure_authorized(
    table: &AuthorizationTable,
    case: &Case,
    identity: &Identity,
) -> Result<(), ValidationError> {
    if !table.is_authorized(case.id, identity) {
        return Err(ValidationError::NotAuthorized(*identity, case.id));
    }
    Ok(())
}

pub fn ensure_batch_size(len: usize, max: usize) -> Result<(), ValidationError> {
    if len == 0 {
        return Err(ValidationError::EmptyBatch);
    }
    if len > max {
        return Err(ValidationError::BatchTooLarge(len, max));
    }
    Ok(())
}

pub fn ensure_not_revealed(case: &Case) -> Result<(), ValidationError> {
    if case.revealed {
        return Err(ValidationError::AlreadyRevealed(case.id));
    }
    Ok(())
}

/// Voting is open when the flag is set and the voting period has not run out
pub fn ensure_voting_open(case: &Case, now: u64) -> Result<(), ValidationError> {
    if !case.voting_open || now > case.voting_end_time {
        return Err(ValidationError::VotingClosed(case.id));
    }
    Ok(())
}
