use super::*;

const OWNER: Identity = Identity([0xaa; 32]);
const JUDGE: Identity = Identity([0xbb; 32]);
const START: u64 = 1_600_000_000;

struct Fixture {
    court: Court<ManualClock>,
    clock: ManualClock,
    voters: Vec<Identity>,
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn voter(i: u8) -> Identity {
    Identity([i; 32])
}

fn ballot(choice: &str, i: u8) -> Ballot {
    // The court never looks inside the ciphertext
    let ciphertext = format!("enc({}:{})", choice, i).into_bytes();
    let integrity = Commitment::digest(&ciphertext);
    Ballot::new(ciphertext, integrity)
}

fn new_case(required_voters: usize) -> NewCase {
    NewCase {
        title: "People v. Knave of Hearts".to_owned(),
        description: "Theft of tarts made by the Queen of Hearts".to_owned(),
        evidence_reference: "ipfs://QmTarts".to_owned(),
        required_voters,
    }
}

/// A court with `n` certified voters and one open case requiring `required` voters
fn setup(n: u8, required: usize) -> (Fixture, CaseId) {
    init_logging();

    let clock = ManualClock::new(START);
    let mut court = Court::with_generator(
        Config::default(),
        OWNER,
        clock.clone(),
        RequestIdGenerator::from_seed([42; 32]),
    );

    let voters: Vec<Identity> = (1..=n).map(voter).collect();
    assert_eq!(court.certify_batch(&OWNER, &voters).unwrap(), voters.len());

    let case_id = court.create_case(&JUDGE, new_case(required)).unwrap();

    (
        Fixture {
            court,
            clock,
            voters,
        },
        case_id,
    )
}

/// Three voters authorized, two guilty and one innocent vote cast, voting closed,
/// decryption requested
fn voted_and_requested() -> (Fixture, CaseId, RequestId) {
    let (mut f, case_id) = setup(3, 3);

    f.court
        .authorize_batch(&JUDGE, case_id, &f.voters)
        .unwrap();

    let choices = ["guilty", "guilty", "innocent"];
    for (i, voter) in f.voters.iter().enumerate() {
        f.clock.advance(60);
        f.court
            .cast_vote(voter, case_id, ballot(choices[i], i as u8))
            .unwrap();
    }

    f.court.close_voting(&JUDGE, case_id).unwrap();
    let request_id = f.court.request_decryption(&JUDGE, case_id).unwrap();

    (f, case_id, request_id)
}

fn result(request_id: RequestId, guilty_count: usize, innocent_count: usize) -> DecryptionResult {
    DecryptionResult {
        request_id,
        guilty_count,
        innocent_count,
        cleartext: format!("{},{}", guilty_count, innocent_count).into_bytes(),
        proof: b"decryption-proof".to_vec(),
    }
}

#[test]
fn scenario_a_reveal() {
    let (mut f, case_id, request_id) = voted_and_requested();

    assert_eq!(f.court.phase(case_id).unwrap(), CasePhase::DecryptionRequested);

    // The oracle sees the request
    let pending = f.court.pending_requests();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].request_id, request_id);
    assert_eq!(
        pending[0].deadline,
        f.court.now() + f.court.config().decryption_timeout
    );

    f.clock.advance(DAY);
    let verdict = f
        .court
        .submit_decryption_result(result(request_id, 2, 1))
        .unwrap();

    assert!(verdict.guilty);
    assert_eq!(verdict.total_voters, 3);

    let case = f.court.case_info(case_id).unwrap();
    assert!(case.revealed);
    assert!(case.verdict);
    assert!(!case.refund_enabled);
    assert_eq!(case.revealed_guilty + case.revealed_innocent, f.court.votes_cast(case_id));
    assert_eq!(case.phase(), CasePhase::Revealed);

    for voter in &f.voters {
        assert_eq!(f.court.reputation(voter), 105);
    }

    assert_eq!(f.court.revealed_results(case_id).unwrap(), verdict);
    assert!(f.court.pending_requests().is_empty());

    // Events tell the whole story, in order
    let types: Vec<EventType> = f
        .court
        .events()
        .for_case(case_id)
        .iter()
        .map(|event| event.event_type())
        .collect();
    assert_eq!(
        types,
        vec![
            EventType::CaseCreated,
            EventType::VoterAuthorized,
            EventType::VoterAuthorized,
            EventType::VoterAuthorized,
            EventType::VoteCast,
            EventType::VoteCast,
            EventType::VoteCast,
            EventType::DecryptionRequested,
            EventType::DecryptionResultReceived,
            EventType::CaseRevealed,
        ]
    );

    // A second answer is rejected and changes nothing
    assert_eq!(
        f.court.submit_decryption_result(result(request_id, 1, 2)),
        Err(ValidationError::AlreadyRevealed(case_id))
    );
    assert_eq!(f.court.revealed_results(case_id).unwrap(), verdict);
    for voter in &f.voters {
        assert_eq!(f.court.reputation(voter), 105);
    }

    // Revealed cases cannot time out
    f.clock.advance(30 * DAY);
    assert_eq!(
        f.court.trigger_timeout(case_id),
        Err(ValidationError::AlreadyRevealed(case_id))
    );
    assert!(f.court.sweep_expired().is_empty());
}

#[test]
fn scenario_b_timeout_and_refunds() {
    let (mut f, case_id, request_id) = voted_and_requested();
    let deadline = f.court.case_info(case_id).unwrap().decryption_deadline.unwrap();

    // The oracle never answers
    f.clock.set(deadline);
    assert_eq!(
        f.court.trigger_timeout(case_id),
        Err(ValidationError::DeadlineNotYetPassed(deadline, case_id))
    );
    assert_eq!(
        f.court.claim_refund(case_id, &f.voters[0]),
        Err(ValidationError::RefundsNotEnabled(case_id))
    );

    f.clock.advance(1);
    assert!(f.court.decryption_status(case_id).unwrap().expired);
    f.court.trigger_timeout(case_id).unwrap();

    let status = f.court.decryption_status(case_id).unwrap();
    assert!(status.requested);
    assert!(status.failed);
    assert!(status.refund_available);
    assert!(!status.revealed);
    assert_eq!(status.deadline, Some(deadline));
    assert_eq!(status.request_id, Some(request_id));

    assert_eq!(
        f.court.trigger_timeout(case_id),
        Err(ValidationError::RefundAlreadyEnabled(case_id))
    );

    for voter in f.voters.clone() {
        assert_eq!(
            f.court.claim_refund(case_id, &voter).unwrap(),
            RefundReason::DecryptionFailed
        );
        assert_eq!(
            f.court.claim_refund(case_id, &voter),
            Err(ValidationError::DidNotVote(voter, case_id))
        );
        assert!(!f.court.has_voted(case_id, &voter));
    }
    assert_eq!(f.court.refund_claims(case_id).len(), 3);
    assert_eq!(f.court.events().of_type(EventType::RefundIssued).len(), 3);

    // Late answers are refused, and the case cannot be re-armed
    assert_eq!(
        f.court.submit_decryption_result(result(request_id, 2, 1)),
        Err(ValidationError::DeadlineExceeded(deadline, case_id))
    );
    assert_eq!(
        f.court.request_decryption(&JUDGE, case_id),
        Err(ValidationError::AlreadyRequested(case_id))
    );
    assert_eq!(
        f.court.revealed_results(case_id),
        Err(ValidationError::NotRevealedYet(case_id))
    );

    let case = f.court.case_info(case_id).unwrap();
    assert!(!(case.revealed && case.refund_enabled));
    assert_eq!(case.phase(), CasePhase::TimedOut);

    // Nobody earned reputation
    for voter in &f.voters {
        assert_eq!(f.court.reputation(voter), 100);
    }
}

#[test]
fn scenario_c_too_few_required_voters() {
    let (mut f, _) = setup(3, 3);
    let count = f.court.case_count();

    let err = f.court.create_case(&JUDGE, new_case(2)).unwrap_err();
    assert_eq!(err, ValidationError::InvalidVoterCount(3, 12, 2));
    assert_eq!(err.category(), ErrorCategory::Validation);

    // Nothing was allocated
    assert_eq!(f.court.case_count(), count);
    assert_eq!(f.court.create_case(&JUDGE, new_case(3)).unwrap(), CaseId(count as u64));
}

#[test]
fn scenario_d_batch_over_capacity() {
    let (mut f, case_id) = setup(4, 3);

    f.court
        .authorize_batch(&JUDGE, case_id, &f.voters[..3])
        .unwrap();
    let events_before = f.court.events().len();

    assert_eq!(
        f.court.authorize_batch(&JUDGE, case_id, &f.voters[3..]),
        Err(ValidationError::ExceedsCapacity(1, 3))
    );
    assert!(!f.court.is_authorized(case_id, &f.voters[3]));
    assert_eq!(f.court.case_info(case_id).unwrap().authorized_count, 3);
    assert_eq!(f.court.events().len(), events_before);
}

#[test]
fn batch_authorization_is_all_or_nothing() {
    let (mut f, case_id) = setup(3, 5);
    let stranger = voter(0x77);

    let batch = vec![f.voters[0], f.voters[1], stranger];
    assert_eq!(
        f.court.authorize_batch(&JUDGE, case_id, &batch),
        Err(ValidationError::NotCertified(stranger))
    );
    assert!(!f.court.is_authorized(case_id, &f.voters[0]));
    assert!(!f.court.is_authorized(case_id, &f.voters[1]));

    assert_eq!(
        f.court.authorize_batch(&f.voters[0].clone(), case_id, &f.voters[..1]),
        Err(ValidationError::NotJudge(case_id))
    );
}

#[test]
fn batch_certification_skips_certified() {
    let (mut f, _) = setup(3, 3);

    // Give one voter some standing first, so we can see it is left alone
    let (mut g, case_id, request_id) = voted_and_requested();
    g.court
        .submit_decryption_result(result(request_id, 2, 1))
        .unwrap();
    assert_eq!(g.court.revealed_results(case_id).unwrap().guilty_count, 2);

    let mut batch = g.voters.clone();
    batch.push(voter(50));
    batch.push(voter(51));
    assert_eq!(g.court.certify_batch(&OWNER, &batch).unwrap(), 2);
    for voter in &g.voters {
        assert_eq!(g.court.reputation(voter), 105);
    }
    assert_eq!(g.court.reputation(&voter(50)), 100);
    assert!(g.court.is_certified(&voter(51)));
    assert_eq!(g.court.identity(&voter(51)).unwrap().certifier, OWNER);

    // Only the owner certifies, and batches are bounded
    assert_eq!(
        f.court.certify_batch(&JUDGE, &[voter(60)]),
        Err(ValidationError::NotOwner)
    );
    let too_many: Vec<Identity> = (0..101).map(|i| Identity([i as u8 + 100; 32])).collect();
    assert_eq!(
        f.court.certify_batch(&OWNER, &too_many),
        Err(ValidationError::BatchTooLarge(101, 100))
    );
    assert_eq!(
        f.court.certify_batch(&OWNER, &[]),
        Err(ValidationError::EmptyBatch)
    );

    // Single certification
    assert_eq!(
        f.court.certify(&OWNER, &f.voters[0].clone()),
        Err(ValidationError::AlreadyCertified(f.voters[0]))
    );
    assert_eq!(
        f.court.certify(&OWNER, &Identity::NULL),
        Err(ValidationError::InvalidIdentity)
    );
    f.court.certify(&OWNER, &voter(61)).unwrap();
    assert_eq!(f.court.reputation(&voter(61)), 100);
}

#[test]
fn second_vote_always_fails() {
    let (mut f, case_id) = setup(3, 3);
    let alice = f.voters[0];
    f.court.authorize(&JUDGE, case_id, &alice).unwrap();

    f.court
        .cast_vote(&alice, case_id, ballot("guilty", 0))
        .unwrap();
    let tally = f.court.case_info(case_id).unwrap().tally.clone();

    for choice in &["guilty", "innocent", "abstain"] {
        assert_eq!(
            f.court.cast_vote(&alice, case_id, ballot(choice, 1)),
            Err(ValidationError::AlreadyVoted(alice, case_id))
        );
    }
    assert_eq!(f.court.case_info(case_id).unwrap().tally, tally);
    assert_eq!(f.court.votes_cast(case_id), 1);
}

#[test]
fn voting_rules() {
    let (mut f, case_id) = setup(4, 3);
    let (alice, bob, carol) = (f.voters[0], f.voters[1], f.voters[2]);

    // Not authorized
    assert_eq!(
        f.court.cast_vote(&alice, case_id, ballot("guilty", 0)),
        Err(ValidationError::NotAuthorized(alice, case_id))
    );

    f.court.authorize(&JUDGE, case_id, &alice).unwrap();
    f.court.authorize(&JUDGE, case_id, &bob).unwrap();
    assert_eq!(
        f.court.authorize(&JUDGE, case_id, &bob),
        Err(ValidationError::AlreadyAuthorized(bob, case_id))
    );
    assert_eq!(
        f.court.authorize(&JUDGE, CaseId(99), &bob),
        Err(ValidationError::CaseNotFound(CaseId(99)))
    );

    // Bad payloads
    assert_eq!(
        f.court
            .cast_vote(&alice, case_id, Ballot::new(vec![0; 16], Commitment([1; 32]))),
        Err(ValidationError::InvalidCommittedVote)
    );
    assert_eq!(
        f.court
            .cast_vote(&alice, case_id, Ballot::new(vec![1; 16], Commitment::default())),
        Err(ValidationError::InvalidIntegrityCommitment)
    );
    assert!(f.court.vote_record(case_id, &alice).is_none());

    f.court
        .cast_vote(&alice, case_id, ballot("guilty", 0))
        .unwrap();
    let record = f.court.vote_record(case_id, &alice).unwrap();
    assert!(record.has_voted);
    assert_eq!(record.timestamp, START);

    // VoteCast carries no vote value
    let json = serde_json::to_string(f.court.events().of_type(EventType::VoteCast)[0]).unwrap();
    assert!(!json.contains("guilty"));
    assert!(!json.contains(&hex::encode(b"enc(guilty:0)")));

    // Nobody but the judge can close early while the jury is incomplete
    assert_eq!(
        f.court.close_voting(&carol, case_id),
        Err(ValidationError::CloseNotAllowed(case_id))
    );

    // The voting period ends
    f.clock.advance(f.court.config().voting_duration + 1);
    assert_eq!(
        f.court.cast_vote(&bob, case_id, ballot("innocent", 1)),
        Err(ValidationError::VotingClosed(case_id))
    );

    // Anyone may close after the period
    f.court.close_voting(&carol, case_id).unwrap();
    assert_eq!(
        f.court.close_voting(&JUDGE, case_id),
        Err(ValidationError::VotingAlreadyClosed(case_id))
    );
    assert_eq!(f.court.phase(case_id).unwrap(), CasePhase::VotingClosed);

    // One vote is not enough to decrypt
    assert_eq!(
        f.court.request_decryption(&JUDGE, case_id),
        Err(ValidationError::InsufficientVoters(case_id, 1, 3))
    );
}

#[test]
fn full_jury_lets_anyone_close() {
    let (mut f, case_id) = setup(3, 3);
    f.court
        .authorize_batch(&JUDGE, case_id, &f.voters)
        .unwrap();
    f.court.close_voting(&voter(0x66), case_id).unwrap();

    assert_eq!(
        f.court.cast_vote(&f.voters[0].clone(), case_id, ballot("guilty", 0)),
        Err(ValidationError::VotingClosed(case_id))
    );
}

#[test]
fn request_before_close_fails() {
    let (mut f, case_id) = setup(3, 3);
    f.court
        .authorize_batch(&JUDGE, case_id, &f.voters)
        .unwrap();
    for (i, voter) in f.voters.clone().iter().enumerate() {
        f.court
            .cast_vote(voter, case_id, ballot("guilty", i as u8))
            .unwrap();
    }

    assert_eq!(
        f.court.request_decryption(&JUDGE, case_id),
        Err(ValidationError::VotingStillOpen(case_id))
    );

    // Even once the period is over, until someone actually closes voting
    f.clock.advance(f.court.config().voting_duration + 1);
    assert_eq!(
        f.court.request_decryption(&JUDGE, case_id),
        Err(ValidationError::VotingStillOpen(case_id))
    );

    f.court.close_voting(&JUDGE, case_id).unwrap();
    assert_eq!(
        f.court.request_decryption(&f.voters[0].clone(), case_id),
        Err(ValidationError::NotJudge(case_id))
    );
    f.court.request_decryption(&JUDGE, case_id).unwrap();
    assert_eq!(
        f.court.request_decryption(&JUDGE, case_id),
        Err(ValidationError::AlreadyRequested(case_id))
    );
}

#[test]
fn late_result_is_rejected() {
    let (mut f, case_id, request_id) = voted_and_requested();
    let deadline = f.court.case_info(case_id).unwrap().decryption_deadline.unwrap();

    f.clock.set(deadline + 1);
    let err = f
        .court
        .submit_decryption_result(result(request_id, 2, 1))
        .unwrap_err();
    assert_eq!(err, ValidationError::DeadlineExceeded(deadline, case_id));
    assert_eq!(err.category(), ErrorCategory::Timeout);

    let case = f.court.case_info(case_id).unwrap();
    assert!(!case.revealed);
    assert_eq!(case.revealed_guilty, 0);
    assert!(f.court.pending_requests().is_empty());

    // The sweep picks it up
    assert_eq!(f.court.sweep_expired(), vec![case_id]);
    assert!(f.court.sweep_expired().is_empty());
    assert_eq!(f.court.phase(case_id).unwrap(), CasePhase::TimedOut);
}

#[test]
fn late_result_fails_before_and_after_timeout() {
    let (mut f, case_id, request_id) = voted_and_requested();
    let deadline = f.court.case_info(case_id).unwrap().decryption_deadline.unwrap();

    f.clock.set(deadline + 1);
    assert_eq!(
        f.court.submit_decryption_result(result(request_id, 2, 1)),
        Err(ValidationError::DeadlineExceeded(deadline, case_id))
    );

    f.court.trigger_timeout(case_id).unwrap();
    f.clock.advance(3600);
    let err = f
        .court
        .submit_decryption_result(result(request_id, 2, 1))
        .unwrap_err();
    assert_eq!(err, ValidationError::DeadlineExceeded(deadline, case_id));
    assert_eq!(err.category(), ErrorCategory::Timeout);

    let case = f.court.case_info(case_id).unwrap();
    assert!(!case.revealed);
    assert!(case.refund_enabled);
    assert_eq!(
        f.court
            .events()
            .of_type(EventType::DecryptionResultReceived)
            .len(),
        0
    );
}

#[test]
fn malformed_results_leave_request_open() {
    let (mut f, case_id, request_id) = voted_and_requested();

    let unknown = RequestId([0x13; 32]);
    assert_eq!(
        f.court.submit_decryption_result(result(unknown, 2, 1)),
        Err(ValidationError::UnknownRequest(unknown))
    );

    assert_eq!(
        f.court.submit_decryption_result(result(request_id, 2, 2)),
        Err(ValidationError::VoteCountMismatch(4, 3))
    );

    let mut no_proof = result(request_id, 2, 1);
    no_proof.proof = vec![];
    assert_eq!(
        f.court.submit_decryption_result(no_proof),
        Err(ValidationError::EmptyProof)
    );

    let mut no_cleartext = result(request_id, 2, 1);
    no_cleartext.cleartext = vec![];
    assert_eq!(
        f.court.submit_decryption_result(no_cleartext),
        Err(ValidationError::EmptyCleartext)
    );

    assert_eq!(f.court.pending_requests().len(), 1);
    for voter in &f.voters {
        assert_eq!(f.court.reputation(voter), 100);
    }

    // A corrected answer before the deadline still goes through
    let verdict = f
        .court
        .submit_decryption_result(result(request_id, 1, 2))
        .unwrap();
    assert!(!verdict.guilty);
}

#[test]
fn tie_is_not_guilty() {
    let (mut f, case_id) = setup(4, 4);
    f.court
        .authorize_batch(&JUDGE, case_id, &f.voters)
        .unwrap();
    for (i, voter) in f.voters.clone().iter().enumerate() {
        f.court
            .cast_vote(voter, case_id, ballot("either", i as u8))
            .unwrap();
    }
    f.court.close_voting(&JUDGE, case_id).unwrap();
    let request_id = f.court.request_decryption(&JUDGE, case_id).unwrap();

    let verdict = f
        .court
        .submit_decryption_result(result(request_id, 2, 2))
        .unwrap();
    assert!(!verdict.guilty);
    assert_eq!(verdict.total_voters, 4);
}

#[test]
fn tally_follows_arrival_order() {
    let (mut f, case_id) = setup(3, 3);
    f.court
        .authorize_batch(&JUDGE, case_id, &f.voters)
        .unwrap();

    let ballots: Vec<Ballot> = (0..3).map(|i| ballot("vote", i)).collect();
    for (voter, ballot) in f.voters.clone().iter().zip(ballots.iter()) {
        f.court.cast_vote(voter, case_id, ballot.clone()).unwrap();
    }

    let case = f.court.case_info(case_id).unwrap();
    let expected = Tally::replay(ballots.iter().map(|b| b.committed_vote.as_slice()));
    assert_eq!(case.tally, expected);
    assert_eq!(case.voters, f.voters);

    let reversed = Tally::replay(ballots.iter().rev().map(|b| b.committed_vote.as_slice()));
    assert_ne!(case.tally, reversed);
}

#[test]
fn case_listing_and_ids() {
    let (mut f, first) = setup(3, 3);
    assert_eq!(first, CaseId(0));

    for i in 1..5u64 {
        assert_eq!(f.court.create_case(&JUDGE, new_case(3)).unwrap(), CaseId(i));
    }

    let page = f.court.list_cases(1, 2);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, CaseId(1));
    assert_eq!(page[1].id, CaseId(2));
    assert_eq!(f.court.list_cases(4, 100).len(), 1);
    assert!(f.court.list_cases(5, 100).is_empty());

    let mut bad = new_case(3);
    bad.title = String::new();
    assert_eq!(
        f.court.create_case(&JUDGE, bad),
        Err(ValidationError::InvalidTitle(200))
    );
    assert_eq!(
        f.court.create_case(&Identity::NULL, new_case(3)),
        Err(ValidationError::InvalidIdentity)
    );
    assert_eq!(f.court.case_count(), 5);

    let case = f.court.case_info(CaseId(3)).unwrap();
    assert_eq!(case.voting_end_time, case.start_time + 3 * DAY);
    assert_eq!(
        f.court.decryption_status(CaseId(3)).unwrap(),
        DecryptionStatus {
            case_id: CaseId(3),
            requested: false,
            request_id: None,
            deadline: None,
            failed: false,
            refund_available: false,
            revealed: false,
            expired: false,
        }
    );
    assert_eq!(
        f.court.trigger_timeout(CaseId(3)),
        Err(ValidationError::NoRequestPending(CaseId(3)))
    );
}

#[test]
fn request_ids_differ_across_cases() {
    let (mut f, first) = setup(3, 3);
    let second = f.court.create_case(&JUDGE, new_case(3)).unwrap();

    let mut request_ids = vec![];
    for case_id in vec![first, second] {
        f.court
            .authorize_batch(&JUDGE, case_id, &f.voters)
            .unwrap();
        for (i, voter) in f.voters.clone().iter().enumerate() {
            f.court
                .cast_vote(voter, case_id, ballot("guilty", i as u8))
                .unwrap();
        }
        f.court.close_voting(&JUDGE, case_id).unwrap();
        request_ids.push(f.court.request_decryption(&JUDGE, case_id).unwrap());
    }

    assert_ne!(request_ids[0], request_ids[1]);
    assert_eq!(f.court.pending_requests().len(), 2);

    // Answering one case leaves the other pending
    f.court
        .submit_decryption_result(result(request_ids[1], 3, 0))
        .unwrap();
    let pending = f.court.pending_requests();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].case_id, first);
    assert_eq!(
        pending[0].tally,
        f.court.case_info(first).unwrap().tally.digest()
    );

    // Reputation counts both participations
    f.court
        .submit_decryption_result(result(request_ids[0], 0, 3))
        .unwrap();
    for voter in &f.voters {
        assert_eq!(f.court.reputation(voter), 110);
    }
}

#[test]
fn oracle_handoff_through_events() {
    let (f, case_id, request_id) = voted_and_requested();

    // The oracle consumes the request event as bytes
    let event = f.court.events().of_type(EventType::DecryptionRequested)[0].clone();
    let received = Event::from_bytes(&event.as_bytes()).unwrap();

    match received {
        Event::DecryptionRequested {
            case_id: id,
            request_id: rid,
            deadline,
        } => {
            assert_eq!(id, case_id);
            assert_eq!(rid, request_id);
            assert_eq!(
                Some(deadline),
                f.court.case_info(case_id).unwrap().decryption_deadline
            );
        }
        other => panic!("unexpected event {:?}", other),
    }
}
