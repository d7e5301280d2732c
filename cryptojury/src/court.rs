use crate::*;
use log::{debug, info, warn};

/// Where a case stands in the decryption protocol
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DecryptionStatus {
    pub case_id: CaseId,
    pub requested: bool,
    pub request_id: Option<RequestId>,
    pub deadline: Option<u64>,
    pub failed: bool,
    pub refund_available: bool,
    pub revealed: bool,

    /// The deadline has passed without an answer and the timeout can be triggered
    pub expired: bool,
}

/// A jury court
///
/// Owns every component and runs each operation as a single step: all preconditions are
/// checked against the current state first, and only then is anything written. A rejected
/// operation leaves the court exactly as it was.
///
/// Mutating operations take `&mut self`, which serializes them. A networked service should
/// put the court behind a `Mutex` to keep that guarantee.
#[derive(Debug)]
pub struct Court<C: Clock> {
    config: Config,
    clock: C,
    registry: IdentityRegistry,
    cases: CaseStore,
    authorizations: AuthorizationTable,
    votes: VoteLedger,
    coordinator: DecryptionCoordinator,
    refunds: TimeoutRefundManager,
    events: EventLog,
}

impl<C: Clock> Court<C> {
    /// Create a new court. `owner` is the identity allowed to certify voters.
    pub fn new(config: Config, owner: Identity, clock: C) -> Self {
        Court::with_generator(config, owner, clock, RequestIdGenerator::new())
    }

    pub fn with_generator(
        config: Config,
        owner: Identity,
        clock: C,
        generator: RequestIdGenerator,
    ) -> Self {
        Court {
            config,
            clock,
            registry: IdentityRegistry::new(owner),
            cases: CaseStore::default(),
            authorizations: AuthorizationTable::default(),
            votes: VoteLedger::default(),
            coordinator: DecryptionCoordinator::new(generator),
            refunds: TimeoutRefundManager::default(),
            events: EventLog::default(),
        }
    }

    // Identity registry
    // -----------------

    /// Certify a voter identity
    pub fn certify(&mut self, caller: &Identity, identity: &Identity) -> Result<(), ValidationError> {
        self.registry
            .validate_certify(caller, identity)
            .map_err(|e| rejected("certify", e))?;

        let now = self.clock.now();
        let event =
            self.registry
                .apply_certify(*identity, *caller, self.config.initial_reputation, now);
        self.events.push(event);

        info!("cryptojury: certified {}", identity);
        Ok(())
    }

    /// Certify up to `max_batch_size` identities, skipping those already certified
    ///
    /// Returns how many identities were newly certified.
    pub fn certify_batch(
        &mut self,
        caller: &Identity,
        identities: &[Identity],
    ) -> Result<usize, ValidationError> {
        let fresh = self
            .registry
            .validate_certify_batch(caller, identities, self.config.max_batch_size)
            .map_err(|e| rejected("certify_batch", e))?;

        let now = self.clock.now();
        for identity in fresh.iter() {
            let event = self.registry.apply_certify(
                *identity,
                *caller,
                self.config.initial_reputation,
                now,
            );
            self.events.push(event);
        }

        info!(
            "cryptojury: certified {} of {} identities in batch",
            fresh.len(),
            identities.len()
        );
        Ok(fresh.len())
    }

    // Cases
    // -----

    /// Open a new case with `judge` presiding. Voting opens immediately.
    pub fn create_case(
        &mut self,
        judge: &Identity,
        new_case: NewCase,
    ) -> Result<CaseId, ValidationError> {
        CaseStore::validate_new(judge, &new_case, &self.config)
            .map_err(|e| rejected("create_case", e))?;

        let now = self.clock.now();
        let (case_id, event) =
            self.cases
                .insert(*judge, new_case, now, self.config.voting_duration);
        self.events.push(event);

        info!("cryptojury: created case {} judged by {}", case_id, judge);
        Ok(case_id)
    }

    // Authorization
    // -------------

    /// Authorize a certified voter on a case. Judge only.
    pub fn authorize(
        &mut self,
        caller: &Identity,
        case_id: CaseId,
        identity: &Identity,
    ) -> Result<(), ValidationError> {
        let case = self.cases.get(case_id).map_err(|e| rejected("authorize", e))?;
        self.authorizations
            .validate_authorize(caller, case, identity, &self.registry)
            .map_err(|e| rejected("authorize", e))?;

        let now = self.clock.now();
        let case = self.cases.get_mut(case_id)?;
        let event = self.authorizations.apply_authorize(case, *identity, now);
        self.events.push(event);

        info!("cryptojury: authorized {} on case {}", identity, case_id);
        Ok(())
    }

    /// Authorize several voters at once. Either all of them are authorized or none are.
    pub fn authorize_batch(
        &mut self,
        caller: &Identity,
        case_id: CaseId,
        identities: &[Identity],
    ) -> Result<(), ValidationError> {
        let case = self
            .cases
            .get(case_id)
            .map_err(|e| rejected("authorize_batch", e))?;
        self.authorizations
            .validate_authorize_batch(
                caller,
                case,
                identities,
                &self.registry,
                self.config.max_batch_size,
            )
            .map_err(|e| rejected("authorize_batch", e))?;

        let now = self.clock.now();
        let case = self.cases.get_mut(case_id)?;
        for identity in identities {
            let event = self.authorizations.apply_authorize(case, *identity, now);
            self.events.push(event);
        }

        info!(
            "cryptojury: authorized {} voters on case {}",
            identities.len(),
            case_id
        );
        Ok(())
    }

    // Voting
    // ------

    /// Cast a committed vote
    pub fn cast_vote(
        &mut self,
        voter: &Identity,
        case_id: CaseId,
        ballot: Ballot,
    ) -> Result<(), ValidationError> {
        let now = self.clock.now();

        let case = self.cases.get(case_id).map_err(|e| rejected("cast_vote", e))?;
        self.votes
            .validate_cast(
                voter,
                case,
                &ballot,
                &self.authorizations,
                &self.registry,
                now,
            )
            .map_err(|e| rejected("cast_vote", e))?;

        let case = self.cases.get_mut(case_id)?;
        let event = self.votes.apply_cast(*voter, case, ballot, now);
        self.events.push(event);

        info!("cryptojury: vote cast on case {} by {}", case_id, voter);
        Ok(())
    }

    /// Close voting on a case
    pub fn close_voting(&mut self, caller: &Identity, case_id: CaseId) -> Result<(), ValidationError> {
        let now = self.clock.now();

        let case = self
            .cases
            .get(case_id)
            .map_err(|e| rejected("close_voting", e))?;
        validate_close_voting(caller, case, now).map_err(|e| rejected("close_voting", e))?;

        let case = self.cases.get_mut(case_id)?;
        case.voting_open = false;

        info!(
            "cryptojury: voting closed on case {} with {} votes",
            case_id,
            case.voters.len()
        );
        Ok(())
    }

    // Decryption
    // ----------

    /// Ask the oracle to decrypt the tally of a closed case. Judge only.
    ///
    /// Returns as soon as the request is recorded. The oracle picks it up from the
    /// `DecryptionRequested` event and answers through `submit_decryption_result`.
    pub fn request_decryption(
        &mut self,
        caller: &Identity,
        case_id: CaseId,
    ) -> Result<RequestId, ValidationError> {
        let now = self.clock.now();
        let votes_cast = self.votes.votes_cast(case_id);

        let case = self
            .cases
            .get(case_id)
            .map_err(|e| rejected("request_decryption", e))?;
        DecryptionCoordinator::validate_request(caller, case, votes_cast, self.config.min_voters)
            .map_err(|e| rejected("request_decryption", e))?;

        let case = self.cases.get_mut(case_id)?;
        let event = self
            .coordinator
            .apply_request(case, now, self.config.decryption_timeout);
        self.events.push(event);

        let request_id = case
            .request_id
            .ok_or(ValidationError::NoRequestPending(case_id))?;

        info!(
            "cryptojury: decryption of case {} requested as {}, deadline {}",
            case_id,
            request_id,
            case.decryption_deadline.unwrap_or_default()
        );
        Ok(request_id)
    }

    /// Oracle callback carrying the decrypted counts
    ///
    /// The callback is authenticated by its request id alone. A rejected result is final for
    /// that call; nothing is retried here.
    pub fn submit_decryption_result(
        &mut self,
        result: DecryptionResult,
    ) -> Result<Verdict, ValidationError> {
        let now = self.clock.now();

        let case_id = self
            .coordinator
            .case_for(&result.request_id)
            .map_err(|e| rejected("submit_decryption_result", e))?;
        let votes_cast = self.votes.votes_cast(case_id);

        let case = self
            .cases
            .get(case_id)
            .map_err(|e| rejected("submit_decryption_result", e))?;
        DecryptionCoordinator::validate_result(case, &result, votes_cast, now)
            .map_err(|e| rejected("submit_decryption_result", e))?;

        let participants: Vec<Identity> = case
            .voters
            .iter()
            .filter(|voter| self.votes.has_voted(case_id, voter))
            .copied()
            .collect();

        let case = self.cases.get_mut(case_id)?;
        let events = DecryptionCoordinator::apply_result(
            case,
            &result,
            &participants,
            &mut self.registry,
            self.config.reputation_reward,
        );
        for event in events {
            self.events.push(event);
        }

        let verdict = Verdict::from_case(case)?;
        info!(
            "cryptojury: case {} revealed: guilty {} ({} to {})",
            case_id, verdict.guilty, verdict.guilty_count, verdict.innocent_count
        );
        Ok(verdict)
    }

    // Timeout and refunds
    // -------------------

    /// Time out a case whose decryption deadline passed without an answer. Anyone may call.
    pub fn trigger_timeout(&mut self, case_id: CaseId) -> Result<(), ValidationError> {
        let now = self.clock.now();

        let case = self
            .cases
            .get(case_id)
            .map_err(|e| rejected("trigger_timeout", e))?;
        let deadline = TimeoutRefundManager::validate_trigger(case, now)
            .map_err(|e| rejected("trigger_timeout", e))?;

        let case = self.cases.get_mut(case_id)?;
        let event = TimeoutRefundManager::apply_trigger(case, deadline);
        self.events.push(event);

        warn!(
            "cryptojury: decryption of case {} timed out (deadline {}), refunds enabled",
            case_id, deadline
        );
        Ok(())
    }

    /// Claim the refund for a vote on a timed out case
    pub fn claim_refund(
        &mut self,
        case_id: CaseId,
        identity: &Identity,
    ) -> Result<RefundReason, ValidationError> {
        let now = self.clock.now();

        let case = self
            .cases
            .get(case_id)
            .map_err(|e| rejected("claim_refund", e))?;
        TimeoutRefundManager::validate_claim(case, identity, &self.votes)
            .map_err(|e| rejected("claim_refund", e))?;

        let event = self
            .refunds
            .apply_claim(case, *identity, &mut self.votes, now);
        let reason = RefundReason::for_case(case);
        self.events.push(event);

        info!("cryptojury: refund issued to {} on case {}", identity, case_id);
        Ok(reason)
    }

    /// Time out every pending request whose deadline has passed
    ///
    /// Meant to be driven by a timer. Returns the cases that were timed out.
    pub fn sweep_expired(&mut self) -> Vec<CaseId> {
        let now = self.clock.now();

        let expired: Vec<CaseId> = self
            .cases
            .iter()
            .filter(|case| TimeoutRefundManager::validate_trigger(case, now).is_ok())
            .map(|case| case.id)
            .collect();

        expired
            .into_iter()
            .filter(|case_id| self.trigger_timeout(*case_id).is_ok())
            .collect()
    }

    // Queries
    // -------

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn case_info(&self, case_id: CaseId) -> Result<&Case, ValidationError> {
        self.cases.get(case_id)
    }

    pub fn phase(&self, case_id: CaseId) -> Result<CasePhase, ValidationError> {
        Ok(self.cases.get(case_id)?.phase())
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// A page of cases, clamped to the cases that exist
    pub fn list_cases(&self, offset: usize, limit: usize) -> &[Case] {
        self.cases.list(offset, limit)
    }

    pub fn has_voted(&self, case_id: CaseId, identity: &Identity) -> bool {
        self.votes.has_voted(case_id, identity)
    }

    pub fn vote_record(&self, case_id: CaseId, identity: &Identity) -> Option<&VoteRecord> {
        self.votes.get(case_id, identity)
    }

    pub fn votes_cast(&self, case_id: CaseId) -> usize {
        self.votes.votes_cast(case_id)
    }

    pub fn is_authorized(&self, case_id: CaseId, identity: &Identity) -> bool {
        self.authorizations.is_authorized(case_id, identity)
    }

    pub fn is_certified(&self, identity: &Identity) -> bool {
        self.registry.is_certified(identity)
    }

    pub fn identity(&self, identity: &Identity) -> Option<&IdentityRecord> {
        self.registry.get(identity)
    }

    pub fn reputation(&self, identity: &Identity) -> u64 {
        self.registry.reputation(identity)
    }

    /// Revealed counts and verdict. Fails until the case is revealed.
    pub fn revealed_results(&self, case_id: CaseId) -> Result<Verdict, ValidationError> {
        Verdict::from_case(self.cases.get(case_id)?)
    }

    pub fn decryption_status(&self, case_id: CaseId) -> Result<DecryptionStatus, ValidationError> {
        let case = self.cases.get(case_id)?;
        let now = self.clock.now();

        Ok(DecryptionStatus {
            case_id,
            requested: case.decryption_requested,
            request_id: case.request_id,
            deadline: case.decryption_deadline,
            failed: case.decryption_failed,
            refund_available: case.refund_enabled,
            revealed: case.revealed,
            expired: TimeoutRefundManager::validate_trigger(case, now).is_ok(),
        })
    }

    /// Requests the oracle can still answer
    pub fn pending_requests(&self) -> Vec<PendingRequest> {
        let now = self.clock.now();

        self.cases
            .iter()
            .filter(|case| case.decryption_requested && !case.revealed && !case.refund_enabled)
            .filter_map(|case| match (case.request_id, case.decryption_deadline) {
                (Some(request_id), Some(deadline)) if now <= deadline => Some(PendingRequest {
                    case_id: case.id,
                    request_id,
                    deadline,
                    tally: case.tally.digest(),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn refund_claims(&self, case_id: CaseId) -> Vec<&RefundClaim> {
        self.refunds.claims_for(case_id)
    }
}

fn rejected(operation: &str, err: ValidationError) -> ValidationError {
    debug!(
        "cryptojury: {} rejected ({}): {}",
        operation,
        err.code(),
        err
    );
    err
}
