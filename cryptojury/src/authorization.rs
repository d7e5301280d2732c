use crate::*;
use std::collections::BTreeMap;

/// When a voter was authorized, and by whom
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationEntry {
    pub authorized_at: u64,
    pub authorized_by: Identity,
}

/// Per-case set of voters permitted to cast a ballot
///
/// Entries are never removed. The number of entries for a case never exceeds the case's
/// `required_voters`.
#[derive(Default, Clone, Debug)]
pub struct AuthorizationTable {
    entries: BTreeMap<(CaseId, Identity), AuthorizationEntry>,
}

impl AuthorizationTable {
    pub fn is_authorized(&self, case_id: CaseId, identity: &Identity) -> bool {
        self.entries.contains_key(&(case_id, *identity))
    }

    /// Validate authorizing a single voter
    pub fn validate_authorize(
        &self,
        caller: &Identity,
        case: &Case,
        identity: &Identity,
        registry: &IdentityRegistry,
    ) -> Result<(), ValidationError> {
        guard::ensure_judge(case, caller)?;
        guard::ensure_certified(registry, identity)?;

        if self.is_authorized(case.id, identity) {
            return Err(ValidationError::AlreadyAuthorized(*identity, case.id));
        }
        if case.authorized_count >= case.required_voters {
            return Err(ValidationError::CapacityReached(
                case.id,
                case.required_voters,
            ));
        }

        Ok(())
    }

    /// Validate authorizing a batch of voters, all or nothing
    pub fn validate_authorize_batch(
        &self,
        caller: &Identity,
        case: &Case,
        identities: &[Identity],
        registry: &IdentityRegistry,
        max_batch_size: usize,
    ) -> Result<(), ValidationError> {
        guard::ensure_judge(case, caller)?;
        guard::ensure_batch_size(identities.len(), max_batch_size)?;

        if case.authorized_count + identities.len() > case.required_voters {
            return Err(ValidationError::ExceedsCapacity(
                identities.len(),
                case.required_voters,
            ));
        }

        for (i, identity) in identities.iter().enumerate() {
            guard::ensure_certified(registry, identity)?;
            if self.is_authorized(case.id, identity) || identities[..i].contains(identity) {
                return Err(ValidationError::AlreadyAuthorized(*identity, case.id));
            }
        }

        Ok(())
    }

    /// Record a validated authorization
    pub(crate) fn apply_authorize(
        &mut self,
        case: &mut Case,
        identity: Identity,
        now: u64,
    ) -> Event {
        self.entries.insert(
            (case.id, identity),
            AuthorizationEntry {
                authorized_at: now,
                authorized_by: case.judge,
            },
        );
        case.authorized_count += 1;

        Event::VoterAuthorized {
            case_id: case.id,
            identity,
        }
    }
}
