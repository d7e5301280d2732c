use crate::*;
use std::collections::BTreeMap;

/// A committed vote
///
/// The vote itself stays encrypted. `has_voted` is cleared once, by a refund claim.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VoteRecord {
    #[serde(with = "hex::serde")]
    pub committed_vote: Vec<u8>,
    pub has_voted: bool,
    pub timestamp: u64,
    pub integrity_commitment: Commitment,
}

/// A vote as submitted by a voter
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Ballot {
    #[serde(with = "hex::serde")]
    pub committed_vote: Vec<u8>,
    pub integrity_commitment: Commitment,
}

impl Ballot {
    pub fn new(committed_vote: Vec<u8>, integrity_commitment: Commitment) -> Self {
        Ballot {
            committed_vote,
            integrity_commitment,
        }
    }

    /// Reject empty or zero payloads
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.committed_vote.iter().all(|b| *b == 0) {
            return Err(ValidationError::InvalidCommittedVote);
        }
        if self.integrity_commitment.is_zero() {
            return Err(ValidationError::InvalidIntegrityCommitment);
        }
        Ok(())
    }
}

/// Per-case, per-voter vote records
#[derive(Default, Clone, Debug)]
pub struct VoteLedger {
    records: BTreeMap<(CaseId, Identity), VoteRecord>,
}

impl VoteLedger {
    pub fn get(&self, case_id: CaseId, identity: &Identity) -> Option<&VoteRecord> {
        self.records.get(&(case_id, *identity))
    }

    pub fn has_voted(&self, case_id: CaseId, identity: &Identity) -> bool {
        self.get(case_id, identity)
            .map(|record| record.has_voted)
            .unwrap_or(false)
    }

    /// Number of voters on a case whose vote still counts
    pub fn votes_cast(&self, case_id: CaseId) -> usize {
        self.records
            .range((case_id, Identity([0; 32]))..=(case_id, Identity([0xff; 32])))
            .filter(|(_, record)| record.has_voted)
            .count()
    }

    /// Validate a vote
    ///
    /// A voter that already has a record is always rejected with `AlreadyVoted`, whatever
    /// the ballot holds.
    pub fn validate_cast(
        &self,
        voter: &Identity,
        case: &Case,
        ballot: &Ballot,
        authorizations: &AuthorizationTable,
        registry: &IdentityRegistry,
        now: u64,
    ) -> Result<(), ValidationError> {
        guard::ensure_authorized(authorizations, case, voter)?;
        guard::ensure_certified(registry, voter)?;

        if self.records.contains_key(&(case.id, *voter)) {
            return Err(ValidationError::AlreadyVoted(*voter, case.id));
        }

        guard::ensure_voting_open(case, now)?;
        ballot.validate()?;

        // Capacity bounds authorizations, so this only trips if the two disagree
        debug_assert!(case.voters.len() < case.required_voters);

        Ok(())
    }

    /// Record a validated vote and fold it into the case tally
    pub(crate) fn apply_cast(
        &mut self,
        voter: Identity,
        case: &mut Case,
        ballot: Ballot,
        now: u64,
    ) -> Event {
        case.tally.absorb(&ballot.committed_vote);
        case.voters.push(voter);

        self.records.insert(
            (case.id, voter),
            VoteRecord {
                committed_vote: ballot.committed_vote,
                has_voted: true,
                timestamp: now,
                integrity_commitment: ballot.integrity_commitment,
            },
        );

        Event::VoteCast {
            case_id: case.id,
            identity: voter,
            timestamp: now,
        }
    }

    /// Consume a voter's participation, so it can only be refunded once
    pub(crate) fn clear(&mut self, case_id: CaseId, identity: &Identity) -> bool {
        match self.records.get_mut(&(case_id, *identity)) {
            Some(record) if record.has_voted => {
                record.has_voted = false;
                true
            }
            _ => false,
        }
    }
}

/// Who may close voting on a case
///
/// Anyone once the voting period is over, the judge at any time, and anyone once the jury
/// is fully authorized.
pub fn validate_close_voting(
    caller: &Identity,
    case: &Case,
    now: u64,
) -> Result<(), ValidationError> {
    if !case.voting_open {
        return Err(ValidationError::VotingAlreadyClosed(case.id));
    }

    let period_over = now > case.voting_end_time;
    let is_judge = *caller == case.judge;
    let jury_full = case.authorized_count >= case.required_voters;

    if !(period_over || is_judge || jury_full) {
        return Err(ValidationError::CloseNotAllowed(case.id));
    }

    Ok(())
}
