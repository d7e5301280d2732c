use crate::*;

const GUILTY_DOMAIN: &[u8] = b"cryptojury_tally_guilty";
const INNOCENT_DOMAIN: &[u8] = b"cryptojury_tally_innocent";

/// Running committed aggregate of the votes cast on a case
///
/// Each side is a SHA-256 hash chain over the committed votes in arrival order. It stands in
/// for a homomorphic tally: it detects tampering with the vote sequence, but it cannot be
/// decrypted and does not bind the counts the oracle reveals.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub guilty_commitment: Commitment,
    pub innocent_commitment: Commitment,

    /// Number of votes folded in so far
    pub absorbed: usize,
}

impl Tally {
    /// Fold the next committed vote into both aggregates
    pub fn absorb(&mut self, committed_vote: &[u8]) {
        self.guilty_commitment = combine(GUILTY_DOMAIN, &self.guilty_commitment, committed_vote);
        self.innocent_commitment =
            combine(INNOCENT_DOMAIN, &self.innocent_commitment, committed_vote);
        self.absorbed += 1;
    }

    /// Recompute the aggregate from a vote sequence
    pub fn replay<'a, I>(votes: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut tally = Tally::default();
        for vote in votes {
            tally.absorb(vote);
        }
        tally
    }

    /// Single digest over both sides, handed to the oracle with a request
    pub fn digest(&self) -> Commitment {
        Commitment(sha256(&[
            self.guilty_commitment.as_bytes(),
            self.innocent_commitment.as_bytes(),
            &(self.absorbed as u64).to_be_bytes(),
        ]))
    }
}

fn combine(domain: &[u8], previous: &Commitment, committed_vote: &[u8]) -> Commitment {
    let len = (committed_vote.len() as u64).to_be_bytes();
    Commitment(sha256(&[domain, previous.as_bytes(), &len, committed_vote]))
}
