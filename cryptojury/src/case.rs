use crate::*;

/// A case put before a jury
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Case {
    pub id: CaseId,

    pub title: String,
    pub description: String,

    /// Pointer to the evidence bundle, stored elsewhere
    pub evidence_reference: String,

    /// The identity that created the case. Only the judge may authorize voters and request
    /// decryption.
    pub judge: Identity,

    /// Capacity of the jury
    pub required_voters: usize,

    pub start_time: u64,
    pub voting_end_time: u64,

    /// Set once, when decryption is requested
    pub decryption_deadline: Option<u64>,

    pub voting_open: bool,
    pub revealed: bool,
    pub verdict: bool,
    pub decryption_requested: bool,
    pub decryption_failed: bool,
    pub refund_enabled: bool,

    /// Set once, never reused
    pub request_id: Option<RequestId>,

    /// Number of authorized voters
    pub authorized_count: usize,

    /// Voters in the order their votes arrived
    pub voters: Vec<Identity>,

    /// Committed aggregates. Opaque, not decryptable here.
    pub tally: Tally,

    pub revealed_guilty: usize,
    pub revealed_innocent: usize,
}

impl Case {
    pub fn phase(&self) -> CasePhase {
        if self.revealed {
            CasePhase::Revealed
        } else if self.refund_enabled {
            CasePhase::TimedOut
        } else if self.decryption_requested {
            CasePhase::DecryptionRequested
        } else if !self.voting_open {
            CasePhase::VotingClosed
        } else if self.voters.is_empty() && self.authorized_count == 0 {
            CasePhase::Created
        } else {
            CasePhase::VotingOpen
        }
    }
}

/// Where a case is in its lifecycle
///
/// `Created → VotingOpen → VotingClosed → DecryptionRequested → {Revealed | TimedOut}`
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CasePhase {
    /// Open for voting but nobody has been authorized yet
    Created,
    VotingOpen,
    VotingClosed,
    DecryptionRequested,
    Revealed,
    TimedOut,
}

/// Input for a new case
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewCase {
    pub title: String,
    pub description: String,
    pub evidence_reference: String,
    pub required_voters: usize,
}

/// Arena of cases, indexed by `CaseId`
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct CaseStore {
    cases: Vec<Case>,
}

impl CaseStore {
    pub fn get(&self, id: CaseId) -> Result<&Case, ValidationError> {
        self.cases
            .get(id.index())
            .ok_or(ValidationError::CaseNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: CaseId) -> Result<&mut Case, ValidationError> {
        self.cases
            .get_mut(id.index())
            .ok_or(ValidationError::CaseNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter()
    }

    /// A page of cases. Out of range offsets give an empty page.
    pub fn list(&self, offset: usize, limit: usize) -> &[Case] {
        let start = offset.min(self.cases.len());
        let end = start.saturating_add(limit).min(self.cases.len());
        &self.cases[start..end]
    }

    /// Validate a new case against the configured limits
    pub fn validate_new(
        judge: &Identity,
        new_case: &NewCase,
        config: &Config,
    ) -> Result<(), ValidationError> {
        guard::ensure_not_null(judge)?;

        let title_len = new_case.title.chars().count();
        if title_len == 0 || title_len > config.max_title_len {
            return Err(ValidationError::InvalidTitle(config.max_title_len));
        }

        let description_len = new_case.description.chars().count();
        if description_len == 0 || description_len > config.max_description_len {
            return Err(ValidationError::InvalidDescription(
                config.max_description_len,
            ));
        }

        if new_case.required_voters < config.min_voters
            || new_case.required_voters > config.max_voters
        {
            return Err(ValidationError::InvalidVoterCount(
                config.min_voters,
                config.max_voters,
                new_case.required_voters,
            ));
        }

        Ok(())
    }

    /// Insert a validated case, allocating the next id
    pub(crate) fn insert(
        &mut self,
        judge: Identity,
        new_case: NewCase,
        now: u64,
        voting_duration: u64,
    ) -> (CaseId, Event) {
        let id = CaseId(self.cases.len() as u64);

        let case = Case {
            id,
            title: new_case.title,
            description: new_case.description,
            evidence_reference: new_case.evidence_reference,
            judge,
            required_voters: new_case.required_voters,
            start_time: now,
            voting_end_time: now.saturating_add(voting_duration),
            decryption_deadline: None,
            voting_open: true,
            revealed: false,
            verdict: false,
            decryption_requested: false,
            decryption_failed: false,
            refund_enabled: false,
            request_id: None,
            authorized_count: 0,
            voters: vec![],
            tally: Tally::default(),
            revealed_guilty: 0,
            revealed_innocent: 0,
        };

        let event = Event::CaseCreated {
            case_id: id,
            title: case.title.clone(),
            judge,
            start_time: case.start_time,
            end_time: case.voting_end_time,
            required_voters: case.required_voters,
        };

        self.cases.push(case);
        (id, event)
    }
}
