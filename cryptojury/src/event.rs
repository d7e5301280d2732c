use crate::*;
use content_inspector::ContentType;
use num_enum::TryFromPrimitive;

/// A notification emitted by a successful operation
///
/// Events are how the outside world learns about the court. The decryption oracle in
/// particular picks up its work from `DecryptionRequested`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Event {
    CaseCreated {
        case_id: CaseId,
        title: String,
        judge: Identity,
        start_time: u64,
        end_time: u64,
        required_voters: usize,
    },
    VoterAuthorized {
        case_id: CaseId,
        identity: Identity,
    },
    VoterCertified {
        identity: Identity,
        certifier: Identity,
    },
    /// Carries nothing about the value of the vote
    VoteCast {
        case_id: CaseId,
        identity: Identity,
        timestamp: u64,
    },
    DecryptionRequested {
        case_id: CaseId,
        request_id: RequestId,
        deadline: u64,
    },
    DecryptionResultReceived {
        case_id: CaseId,
        request_id: RequestId,
        success: bool,
    },
    CaseRevealed {
        case_id: CaseId,
        verdict: bool,
        guilty_count: usize,
        innocent_count: usize,
        total_voters: usize,
    },
    RefundIssued {
        case_id: CaseId,
        identity: Identity,
        reason: RefundReason,
    },
    TimeoutTriggered {
        case_id: CaseId,
        deadline: u64,
    },
}

impl Event {
    /// Get the event type
    pub fn event_type(&self) -> EventType {
        match self {
            Event::CaseCreated { .. } => EventType::CaseCreated,
            Event::VoterAuthorized { .. } => EventType::VoterAuthorized,
            Event::VoterCertified { .. } => EventType::VoterCertified,
            Event::VoteCast { .. } => EventType::VoteCast,
            Event::DecryptionRequested { .. } => EventType::DecryptionRequested,
            Event::DecryptionResultReceived { .. } => EventType::DecryptionResultReceived,
            Event::CaseRevealed { .. } => EventType::CaseRevealed,
            Event::RefundIssued { .. } => EventType::RefundIssued,
            Event::TimeoutTriggered { .. } => EventType::TimeoutTriggered,
        }
    }

    /// The case this event concerns, if any
    pub fn case_id(&self) -> Option<CaseId> {
        match self {
            Event::VoterCertified { .. } => None,
            Event::CaseCreated { case_id, .. }
            | Event::VoterAuthorized { case_id, .. }
            | Event::VoteCast { case_id, .. }
            | Event::DecryptionRequested { case_id, .. }
            | Event::DecryptionResultReceived { case_id, .. }
            | Event::CaseRevealed { case_id, .. }
            | Event::RefundIssued { case_id, .. }
            | Event::TimeoutTriggered { case_id, .. } => Some(*case_id),
        }
    }

    /// Pack into bytes
    pub fn as_bytes(&self) -> Vec<u8> {
        serde_cbor::to_vec(self).expect("cryptojury: Unexpected error packing event")
    }

    /// Unpack from bytes, either JSON or CBOR
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        match content_inspector::inspect(bytes) {
            ContentType::UTF_8 => match serde_json::from_slice(bytes) {
                Ok(event) => Ok(event),
                // CBOR without a null byte also inspects as UTF-8
                Err(e) => serde_cbor::from_slice(bytes).map_err(|_| Error::from(e)),
            },
            ContentType::BINARY => Ok(serde_cbor::from_slice(bytes)?),
            _ => Err(Error::DeserializationUnknownFormat),
        }
    }
}

/// An event type
#[derive(Serialize, Deserialize, TryFromPrimitive, Copy, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EventType {
    CaseCreated = 1,
    VoterAuthorized = 2,
    VoterCertified = 3,
    VoteCast = 4,
    DecryptionRequested = 5,
    DecryptionResultReceived = 6,
    CaseRevealed = 7,
    RefundIssued = 8,
    TimeoutTriggered = 9,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            EventType::CaseCreated => "CaseCreated",
            EventType::VoterAuthorized => "VoterAuthorized",
            EventType::VoterCertified => "VoterCertified",
            EventType::VoteCast => "VoteCast",
            EventType::DecryptionRequested => "DecryptionRequested",
            EventType::DecryptionResultReceived => "DecryptionResultReceived",
            EventType::CaseRevealed => "CaseRevealed",
            EventType::RefundIssued => "RefundIssued",
            EventType::TimeoutTriggered => "TimeoutTriggered",
        };
        write!(f, "{}", name)
    }
}

/// An event together with its position in the log
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LoggedEvent {
    pub sequence: u64,
    pub event: Event,
}

/// Append-only log of everything the court has emitted
#[derive(Default, Clone, Debug)]
pub struct EventLog {
    inner: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn push(&mut self, event: Event) -> u64 {
        let sequence = self.inner.len() as u64;
        log::trace!("cryptojury: event {} {}", sequence, event.event_type());
        self.inner.push(LoggedEvent { sequence, event });
        sequence
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn all(&self) -> &[LoggedEvent] {
        &self.inner
    }

    pub fn of_type(&self, event_type: EventType) -> Vec<&Event> {
        self.inner
            .iter()
            .map(|logged| &logged.event)
            .filter(|event| event.event_type() == event_type)
            .collect()
    }

    pub fn for_case(&self, case_id: CaseId) -> Vec<&Event> {
        self.inner
            .iter()
            .map(|logged| &logged.event)
            .filter(|event| event.case_id() == Some(case_id))
            .collect()
    }
}
