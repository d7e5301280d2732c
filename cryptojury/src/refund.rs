use crate::*;
use std::collections::BTreeMap;

/// Why a refund was issued
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RefundReason {
    /// The case was timed out, which marks its decryption failed
    DecryptionFailed,
    /// Deadline passed without the failure flag being set. Reserved: every refund path today
    /// goes through a timeout, so claims always carry `DecryptionFailed`.
    Timeout,
}

impl RefundReason {
    pub fn for_case(case: &Case) -> Self {
        if case.decryption_failed {
            RefundReason::DecryptionFailed
        } else {
            RefundReason::Timeout
        }
    }
}

/// A consumed refund claim, for whoever disburses refunds
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RefundClaim {
    pub case_id: CaseId,
    pub identity: Identity,
    pub reason: RefundReason,
    pub claimed_at: u64,
}

/// Failure path of the decryption protocol
///
/// Once the deadline of an unanswered request has passed, anyone may time the case out. That
/// is terminal: the case can never be revealed or re-requested, and every voter may claim a
/// refund exactly once.
#[derive(Default, Clone, Debug)]
pub struct TimeoutRefundManager {
    claims: BTreeMap<(CaseId, Identity), RefundClaim>,
}

impl TimeoutRefundManager {
    pub fn validate_trigger(case: &Case, now: u64) -> Result<u64, ValidationError> {
        let deadline = match (case.decryption_requested, case.decryption_deadline) {
            (true, Some(deadline)) => deadline,
            _ => return Err(ValidationError::NoRequestPending(case.id)),
        };

        guard::ensure_not_revealed(case)?;

        if case.refund_enabled {
            return Err(ValidationError::RefundAlreadyEnabled(case.id));
        }
        if now <= deadline {
            return Err(ValidationError::DeadlineNotYetPassed(deadline, case.id));
        }

        Ok(deadline)
    }

    pub(crate) fn apply_trigger(case: &mut Case, deadline: u64) -> Event {
        case.decryption_failed = true;
        case.refund_enabled = true;

        Event::TimeoutTriggered {
            case_id: case.id,
            deadline,
        }
    }

    pub fn validate_claim(
        case: &Case,
        identity: &Identity,
        ledger: &VoteLedger,
    ) -> Result<(), ValidationError> {
        if !case.refund_enabled {
            return Err(ValidationError::RefundsNotEnabled(case.id));
        }
        if !ledger.has_voted(case.id, identity) {
            return Err(ValidationError::DidNotVote(*identity, case.id));
        }
        Ok(())
    }

    pub(crate) fn apply_claim(
        &mut self,
        case: &Case,
        identity: Identity,
        ledger: &mut VoteLedger,
        now: u64,
    ) -> Event {
        ledger.clear(case.id, &identity);

        let reason = RefundReason::for_case(case);
        self.claims.insert(
            (case.id, identity),
            RefundClaim {
                case_id: case.id,
                identity,
                reason,
                claimed_at: now,
            },
        );

        Event::RefundIssued {
            case_id: case.id,
            identity,
            reason,
        }
    }

    /// All refunds claimed on a case
    pub fn claims_for(&self, case_id: CaseId) -> Vec<&RefundClaim> {
        self.claims
            .range((case_id, Identity([0; 32]))..=(case_id, Identity([0xff; 32])))
            .map(|(_, claim)| claim)
            .collect()
    }
}
