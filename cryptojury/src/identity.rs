use crate::*;
use indexmap::IndexMap;

/// A certified voter identity and its standing
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IdentityRecord {
    pub certified: bool,
    pub reputation: u64,
    pub certified_at: u64,
    pub certifier: Identity,
}

/// Registry of certified voter identities
///
/// Records are created on certification and never removed. Reputation only ever grows, and
/// only through `reward`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct IdentityRegistry {
    owner: Identity,
    records: IndexMap<Identity, IdentityRecord>,
}

impl IdentityRegistry {
    pub fn new(owner: Identity) -> Self {
        IdentityRegistry {
            owner,
            records: IndexMap::new(),
        }
    }

    /// The identity allowed to certify voters
    pub fn owner(&self) -> Identity {
        self.owner
    }

    pub fn get(&self, identity: &Identity) -> Option<&IdentityRecord> {
        self.records.get(identity)
    }

    pub fn is_certified(&self, identity: &Identity) -> bool {
        self.records
            .get(identity)
            .map(|record| record.certified)
            .unwrap_or(false)
    }

    /// Reputation of an identity, zero if it was never certified
    pub fn reputation(&self, identity: &Identity) -> u64 {
        self.records
            .get(identity)
            .map(|record| record.reputation)
            .unwrap_or(0)
    }

    /// Validate a single certification without applying it
    pub fn validate_certify(
        &self,
        caller: &Identity,
        identity: &Identity,
    ) -> Result<(), ValidationError> {
        guard::ensure_owner(self, caller)?;
        guard::ensure_not_null(identity)?;

        if self.is_certified(identity) {
            return Err(ValidationError::AlreadyCertified(*identity));
        }

        Ok(())
    }

    /// Validate a certification batch, returning the entries that will actually be certified
    ///
    /// Entries that are already certified, or repeated inside the batch, are skipped rather than
    /// rejected.
    pub fn validate_certify_batch(
        &self,
        caller: &Identity,
        identities: &[Identity],
        max_batch_size: usize,
    ) -> Result<Vec<Identity>, ValidationError> {
        guard::ensure_owner(self, caller)?;
        guard::ensure_batch_size(identities.len(), max_batch_size)?;

        let mut fresh: Vec<Identity> = Vec::with_capacity(identities.len());
        for identity in identities {
            guard::ensure_not_null(identity)?;
            if self.is_certified(identity) || fresh.contains(identity) {
                continue;
            }
            fresh.push(*identity);
        }

        Ok(fresh)
    }

    /// Apply a validated certification
    pub(crate) fn apply_certify(
        &mut self,
        identity: Identity,
        certifier: Identity,
        reputation: u64,
        now: u64,
    ) -> Event {
        self.records.insert(
            identity,
            IdentityRecord {
                certified: true,
                reputation,
                certified_at: now,
                certifier,
            },
        );

        Event::VoterCertified {
            identity,
            certifier,
        }
    }

    /// Grant reputation for participating in a revealed case
    pub(crate) fn reward(&mut self, identity: &Identity, amount: u64) {
        if let Some(record) = self.records.get_mut(identity) {
            record.reputation = record.reputation.saturating_add(amount);
        }
    }
}
