// src/matching.rs
//
// Assigns expected titles (from the program page) to scraped paper links.
//
// Greedy on purpose: titles are taken in session order and each grabs the
// best link still in the pool. Two near-identical titles can therefore
// steal each other's paper; an optimal bipartite matching would change
// which file lands where, so it is not used.

use std::collections::HashSet;

use crate::config::consts::{LABEL_LEADING_TOKENS, LABEL_TRAILING_TOKENS};
use crate::scrape::{AssetLink, SessionMap};

/// Jaccard similarity of the whitespace-separated word sets of `a` and `b`.
/// Two empty strings score 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: HashSet<&str> = a.split_whitespace().collect();
    let b: HashSet<&str> = b.split_whitespace().collect();
    let common = a.intersection(&b).count();
    let union = a.len() + b.len() - common;
    if union == 0 {
        return 0.0;
    }
    common as f64 / union as f64
}

/// Words of a paper's file name, minus author and venue tokens.
///
/// `Smith_Deep_Nets_CVPR_2020_paper.pdf` -> `deep nets`
pub fn label_from_filename(filename: &str) -> String {
    let lower = filename.to_lowercase();
    let tokens: Vec<&str> = lower.split('_').collect();
    let keep = tokens
        .len()
        .saturating_sub(LABEL_LEADING_TOKENS + LABEL_TRAILING_TOKENS);
    tokens
        .iter()
        .skip(LABEL_LEADING_TOKENS)
        .take(keep)
        .filter(|t| !t.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub link: AssetLink,
}

/// Links not yet given to a title. Order matters: ties go to the earlier entry.
#[derive(Clone, Debug, Default)]
pub struct CandidatePool {
    entries: Vec<Candidate>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool labelled from each link's file name.
    pub fn from_links<I: IntoIterator<Item = AssetLink>>(links: I) -> Self {
        links
            .into_iter()
            .map(|link| Candidate { label: label_from_filename(link.filename()), link })
            .collect()
    }

    pub fn push(&mut self, label: impl Into<String>, link: AssetLink) {
        self.entries.push(Candidate { label: label.into(), link });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    /// Remove and return the best-scoring entry for `title`.
    /// First entry wins a tie. `None` only when the pool is empty.
    pub fn take_best(&mut self, title: &str) -> Option<(Candidate, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, c) in self.entries.iter().enumerate() {
            let score = similarity(&c.label, title);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((i, score));
            }
        }
        best.map(|(i, score)| (self.entries.remove(i), score))
    }
}

impl FromIterator<Candidate> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Best link found for one expected title.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub session: String,
    pub title: String,
    /// `None` when the pool was already empty.
    pub link: Option<AssetLink>,
    pub score: f64,
}

impl Assignment {
    pub fn is_unmatched(&self) -> bool {
        self.link.is_none()
    }
}

/// Walk sessions and titles in order, each title taking its best remaining
/// candidate. The pool carries over between sessions.
pub fn assign(sessions: &SessionMap, pool: &mut CandidatePool) -> Vec<Assignment> {
    let mut out = Vec::with_capacity(sessions.title_count());

    for session in sessions.iter() {
        for title in &session.titles {
            let assignment = match pool.take_best(title) {
                Some((candidate, score)) => Assignment {
                    session: session.name.clone(),
                    title: title.clone(),
                    link: Some(candidate.link),
                    score,
                },
                None => Assignment {
                    session: session.name.clone(),
                    title: title.clone(),
                    link: None,
                    score: 0.0,
                },
            };
            out.push(assignment);
        }
    }
    out
}
