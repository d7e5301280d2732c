use crate::*;
use rand::Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashMap;

/// Generates decryption request identifiers
///
/// Each identifier hashes the current time, 32 bytes from a ChaCha20 CSPRNG, the case id and
/// a counter that only goes up, so two requests never share an id within a process.
pub struct RequestIdGenerator {
    rng: ChaCha20Rng,
    counter: u64,
}

impl RequestIdGenerator {
    /// A generator seeded from the operating system
    pub fn new() -> Self {
        let mut csprng = rand::rngs::OsRng {};
        let seed: [u8; 32] = csprng.gen();
        RequestIdGenerator::from_seed(seed)
    }

    /// A deterministic generator, for tests and simulations
    pub fn from_seed(seed: [u8; 32]) -> Self {
        RequestIdGenerator {
            rng: ChaCha20Rng::from_seed(seed),
            counter: 0,
        }
    }

    pub fn next_id(&mut self, case_id: CaseId, now: u64) -> RequestId {
        self.counter += 1;

        let mut entropy = [0u8; 32];
        self.rng.fill_bytes(&mut entropy);

        RequestId(sha256(&[
            &now.to_be_bytes(),
            &entropy,
            &case_id.to_bytes(),
            &self.counter.to_be_bytes(),
        ]))
    }
}

impl Default for RequestIdGenerator {
    fn default() -> Self {
        RequestIdGenerator::new()
    }
}

impl std::fmt::Debug for RequestIdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("RequestIdGenerator")
            .field("counter", &self.counter)
            .finish()
    }
}

/// The oracle's answer to a decryption request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DecryptionResult {
    pub request_id: RequestId,
    pub guilty_count: usize,
    pub innocent_count: usize,

    #[serde(with = "hex::serde")]
    pub cleartext: Vec<u8>,

    #[serde(with = "hex::serde")]
    pub proof: Vec<u8>,
}

/// A request the oracle still has to answer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub case_id: CaseId,
    pub request_id: RequestId,
    pub deadline: u64,

    /// Digest of the committed aggregate the oracle is asked to decrypt
    pub tally: Commitment,
}

/// Revealed outcome of a case
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub case_id: CaseId,
    pub guilty: bool,
    pub guilty_count: usize,
    pub innocent_count: usize,
    pub total_voters: usize,
}

/// Request/response side of the decryption protocol
///
/// Requests are recorded here and answered later by an independent call. Nothing blocks
/// waiting on the oracle.
#[derive(Debug, Default)]
pub struct DecryptionCoordinator {
    requests: HashMap<RequestId, CaseId>,
    generator: RequestIdGenerator,
}

impl DecryptionCoordinator {
    pub fn new(generator: RequestIdGenerator) -> Self {
        DecryptionCoordinator {
            requests: HashMap::new(),
            generator,
        }
    }

    /// The case a request was issued for
    pub fn case_for(&self, request_id: &RequestId) -> Result<CaseId, ValidationError> {
        self.requests
            .get(request_id)
            .copied()
            .ok_or(ValidationError::UnknownRequest(*request_id))
    }

    /// Validate a decryption request
    pub fn validate_request(
        caller: &Identity,
        case: &Case,
        votes_cast: usize,
        min_voters: usize,
    ) -> Result<(), ValidationError> {
        guard::ensure_judge(case, caller)?;
        guard::ensure_not_revealed(case)?;

        // Also covers cases that timed out. A failed case cannot be re-armed.
        if case.decryption_requested {
            return Err(ValidationError::AlreadyRequested(case.id));
        }
        if case.voting_open {
            return Err(ValidationError::VotingStillOpen(case.id));
        }
        if votes_cast < min_voters {
            return Err(ValidationError::InsufficientVoters(
                case.id, votes_cast, min_voters,
            ));
        }

        Ok(())
    }

    /// Issue a request for a validated case
    pub(crate) fn apply_request(&mut self, case: &mut Case, now: u64, timeout: u64) -> Event {
        let mut request_id = self.generator.next_id(case.id, now);
        while self.requests.contains_key(&request_id) {
            request_id = self.generator.next_id(case.id, now);
        }

        let deadline = now.saturating_add(timeout);

        self.requests.insert(request_id, case.id);
        case.request_id = Some(request_id);
        case.decryption_deadline = Some(deadline);
        case.decryption_requested = true;

        Event::DecryptionRequested {
            case_id: case.id,
            request_id,
            deadline,
        }
    }

    /// Validate an oracle callback against its case
    pub fn validate_result(
        case: &Case,
        result: &DecryptionResult,
        votes_cast: usize,
        now: u64,
    ) -> Result<(), ValidationError> {
        guard::ensure_not_revealed(case)?;

        // A timed out case is always past its deadline
        let deadline = case
            .decryption_deadline
            .ok_or(ValidationError::NoRequestPending(case.id))?;
        if now > deadline {
            return Err(ValidationError::DeadlineExceeded(deadline, case.id));
        }

        if result.cleartext.is_empty() {
            return Err(ValidationError::EmptyCleartext);
        }
        if result.proof.is_empty() {
            return Err(ValidationError::EmptyProof);
        }

        let revealed = result.guilty_count.saturating_add(result.innocent_count);
        if revealed != votes_cast {
            return Err(ValidationError::VoteCountMismatch(revealed, votes_cast));
        }

        Ok(())
    }

    /// Reveal a case from a validated result, rewarding every participant
    pub(crate) fn apply_result(
        case: &mut Case,
        result: &DecryptionResult,
        participants: &[Identity],
        registry: &mut IdentityRegistry,
        reward: u64,
    ) -> Vec<Event> {
        case.revealed_guilty = result.guilty_count;
        case.revealed_innocent = result.innocent_count;
        case.verdict = result.guilty_count > result.innocent_count;
        case.revealed = true;

        for voter in participants {
            registry.reward(voter, reward);
        }

        vec![
            Event::DecryptionResultReceived {
                case_id: case.id,
                request_id: result.request_id,
                success: true,
            },
            Event::CaseRevealed {
                case_id: case.id,
                verdict: case.verdict,
                guilty_count: case.revealed_guilty,
                innocent_count: case.revealed_innocent,
                total_voters: participants.len(),
            },
        ]
    }
}

impl Verdict {
    pub fn from_case(case: &Case) -> Result<Self, ValidationError> {
        if !case.revealed {
            return Err(ValidationError::NotRevealedYet(case.id));
        }

        Ok(Verdict {
            case_id: case.id,
            guilty: case.verdict,
            guilty_count: case.revealed_guilty,
            innocent_count: case.revealed_innocent,
            total_voters: case.revealed_guilty + case.revealed_innocent,
        })
    }
}
