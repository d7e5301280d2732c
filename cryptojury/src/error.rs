use crate::*;

use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("cryptojury: invalid identifier - invalid hexidecimal")]
    IdentifierBadHex,

    #[error("cryptojury: invalid identifier - wrong length")]
    IdentifierBadLen,

    #[error("cryptojury: invalid identifier - not a number")]
    IdentifierBadNumber,

    #[error("cryptojury: CBOR error deserializing event: {0}")]
    CBORDeserialization(#[from] serde_cbor::Error),

    #[error("cryptojury: JSON error deserializing: {0}")]
    JSONDeserialization(#[from] serde_json::Error),

    #[error("cryptojury: error deserializing event: unknown format")]
    DeserializationUnknownFormat,

    #[error("cryptojury: invalid configuration value for {0}: {1}")]
    InvalidConfig(&'static str, String),
}

/// Broad class of a rejected operation.
///
/// Lets a caller tell "fix your input" apart from "wrong phase" and "too late".
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    Authorization,
    State,
    Timeout,
}

/// Operation rejections
///
/// Every operation validates fully before it mutates anything, so receiving one of these
/// means the state of the court is exactly what it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    // Input validation
    #[error("cryptojury validation: invalid (null) identity")]
    InvalidIdentity,

    #[error("cryptojury validation: title must be between 1 and {0} characters")]
    InvalidTitle(usize),

    #[error("cryptojury validation: description must be between 1 and {0} characters")]
    InvalidDescription(usize),

    #[error("cryptojury validation: required voters must be between {0} and {1}, got {2}")]
    InvalidVoterCount(usize, usize, usize),

    #[error("cryptojury validation: batch is empty")]
    EmptyBatch,

    #[error("cryptojury validation: batch of {0} exceeds the maximum of {1}")]
    BatchTooLarge(usize, usize),

    #[error("cryptojury validation: committed vote is empty or zero")]
    InvalidCommittedVote,

    #[error("cryptojury validation: integrity commitment is zero")]
    InvalidIntegrityCommitment,

    #[error("cryptojury validation: decryption result has an empty cleartext")]
    EmptyCleartext,

    #[error("cryptojury validation: decryption result has an empty proof")]
    EmptyProof,

    #[error("cryptojury validation: revealed {0} votes but {1} were cast")]
    VoteCountMismatch(usize, usize),

    // Authorization
    #[error("cryptojury authorization: caller is not the registry owner")]
    NotOwner,

    #[error("cryptojury authorization: caller is not the judge of case {0}")]
    NotJudge(CaseId),

    #[error("cryptojury authorization: identity {0} is not certified")]
    NotCertified(Identity),

    #[error("cryptojury authorization: identity {0} is already certified")]
    AlreadyCertified(Identity),

    #[error("cryptojury authorization: identity {0} is not authorized for case {1}")]
    NotAuthorized(Identity, CaseId),

    #[error("cryptojury authorization: identity {0} is already authorized for case {1}")]
    AlreadyAuthorized(Identity, CaseId),

    #[error("cryptojury authorization: case {0} already has all {1} voters authorized")]
    CapacityReached(CaseId, usize),

    #[error("cryptojury authorization: authorizing {0} more voters would exceed capacity of {1}")]
    ExceedsCapacity(usize, usize),

    #[error("cryptojury authorization: voting on case {0} cannot be closed by this caller yet")]
    CloseNotAllowed(CaseId),

    // Case phase
    #[error("cryptojury state: case {0} not found")]
    CaseNotFound(CaseId),

    #[error("cryptojury state: voting on case {0} is closed")]
    VotingClosed(CaseId),

    #[error("cryptojury state: voting on case {0} is already closed")]
    VotingAlreadyClosed(CaseId),

    #[error("cryptojury state: voting on case {0} is still open")]
    VotingStillOpen(CaseId),

    #[error("cryptojury state: identity {0} already voted on case {1}")]
    AlreadyVoted(Identity, CaseId),

    #[error("cryptojury state: case {0} has only {1} votes, need at least {2}")]
    InsufficientVoters(CaseId, usize, usize),

    #[error("cryptojury state: case {0} is already revealed")]
    AlreadyRevealed(CaseId),

    #[error("cryptojury state: decryption of case {0} was already requested")]
    AlreadyRequested(CaseId),

    #[error("cryptojury state: unknown decryption request {0}")]
    UnknownRequest(RequestId),

    #[error("cryptojury state: no decryption request pending for case {0}")]
    NoRequestPending(CaseId),

    #[error("cryptojury state: refunds already enabled for case {0}")]
    RefundAlreadyEnabled(CaseId),

    #[error("cryptojury state: refunds are not enabled for case {0}")]
    RefundsNotEnabled(CaseId),

    #[error("cryptojury state: identity {0} has no vote to refund on case {1}")]
    DidNotVote(Identity, CaseId),

    #[error("cryptojury state: case {0} is not revealed yet")]
    NotRevealedYet(CaseId),

    // Deadlines
    #[error("cryptojury timeout: decryption deadline {0} for case {1} has passed")]
    DeadlineExceeded(u64, CaseId),

    #[error("cryptojury timeout: decryption deadline {0} for case {1} has not passed yet")]
    DeadlineNotYetPassed(u64, CaseId),
}

impl ValidationError {
    /// Which class of failure this is
    pub fn category(&self) -> ErrorCategory {
        use ValidationError::*;

        match self {
            InvalidIdentity
            | InvalidTitle(_)
            | InvalidDescription(_)
            | InvalidVoterCount(..)
            | EmptyBatch
            | BatchTooLarge(..)
            | InvalidCommittedVote
            | InvalidIntegrityCommitment
            | EmptyCleartext
            | EmptyProof
            | VoteCountMismatch(..) => ErrorCategory::Validation,

            NotOwner
            | NotJudge(_)
            | NotCertified(_)
            | AlreadyCertified(_)
            | NotAuthorized(..)
            | AlreadyAuthorized(..)
            | CapacityReached(..)
            | ExceedsCapacity(..)
            | CloseNotAllowed(_) => ErrorCategory::Authorization,

            CaseNotFound(_)
            | VotingClosed(_)
            | VotingAlreadyClosed(_)
            | VotingStillOpen(_)
            | AlreadyVoted(..)
            | InsufficientVoters(..)
            | AlreadyRevealed(_)
            | AlreadyRequested(_)
            | UnknownRequest(_)
            | NoRequestPending(_)
            | RefundAlreadyEnabled(_)
            | RefundsNotEnabled(_)
            | DidNotVote(..)
            | NotRevealedYet(_) => ErrorCategory::State,

            DeadlineExceeded(..) | DeadlineNotYetPassed(..) => ErrorCategory::Timeout,
        }
    }

    /// Stable machine-readable reason code
    pub fn code(&self) -> &'static str {
        use ValidationError::*;

        match self {
            InvalidIdentity => "invalid_identity",
            InvalidTitle(_) => "invalid_title",
            InvalidDescription(_) => "invalid_description",
            InvalidVoterCount(..) => "invalid_voter_count",
            EmptyBatch => "empty_batch",
            BatchTooLarge(..) => "batch_too_large",
            InvalidCommittedVote => "invalid_committed_vote",
            InvalidIntegrityCommitment => "invalid_integrity_commitment",
            EmptyCleartext => "empty_cleartext",
            EmptyProof => "empty_proof",
            VoteCountMismatch(..) => "vote_count_mismatch",
            NotOwner => "not_owner",
            NotJudge(_) => "not_judge",
            NotCertified(_) => "not_certified",
            AlreadyCertified(_) => "already_certified",
            NotAuthorized(..) => "not_authorized",
            AlreadyAuthorized(..) => "already_authorized",
            CapacityReached(..) => "capacity_reached",
            ExceedsCapacity(..) => "exceeds_capacity",
            CloseNotAllowed(_) => "close_not_allowed",
            CaseNotFound(_) => "case_not_found",
            VotingClosed(_) => "voting_closed",
            VotingAlreadyClosed(_) => "voting_already_closed",
            VotingStillOpen(_) => "voting_still_open",
            AlreadyVoted(..) => "already_voted",
            InsufficientVoters(..) => "insufficient_voters",
            AlreadyRevealed(_) => "already_revealed",
            AlreadyRequested(_) => "already_requested",
            UnknownRequest(_) => "unknown_request",
            NoRequestPending(_) => "no_request_pending",
            RefundAlreadyEnabled(_) => "refund_already_enabled",
            RefundsNotEnabled(_) => "refunds_not_enabled",
            DidNotVote(..) => "did_not_vote",
            NotRevealedYet(_) => "not_revealed_yet",
            DeadlineExceeded(..) => "deadline_exceeded",
            DeadlineNotYetPassed(..) => "deadline_not_yet_passed",
        }
    }
}
