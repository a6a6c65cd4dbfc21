//! Levenshtein distance and "did you mean" suggestions.

/// Closest known name to a misspelled input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The candidate with the smallest edit distance.
    pub name: String,
    /// Edit distance between the input and `name`.
    pub distance: usize,
}

/// Edit-distance table over a pair of character sequences.
struct Levenshtein {
    a: Vec<char>,
    b: Vec<char>,
    /// `(a.len() + 1) * (b.len() + 1)` cells; cell `(ia, ib)` holds the
    /// distance between the suffixes `a[ia..]` and `b[ib..]`.
    table: Vec<usize>,
}

impl Levenshtein {
    fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let table = vec![0; (a.len() + 1) * (b.len() + 1)];
        Self { a, b, table }
    }

    fn slot(&self, ia: usize, ib: usize) -> usize {
        ia * (self.b.len() + 1) + ib
    }

    /// Fills the table from the ends of both sequences towards their
    /// starts and returns the distance between the whole sequences.
    ///
    /// Stack usage does not depend on the input lengths.
    fn run(&mut self) -> usize {
        let (len_a, len_b) = (self.a.len(), self.b.len());
        for ia in (0..=len_a).rev() {
            for ib in (0..=len_b).rev() {
                let dist = if ib == len_b {
                    len_a - ia
                } else if ia == len_a {
                    len_b - ib
                } else if self.a[ia] == self.b[ib] {
                    self.table[self.slot(ia + 1, ib + 1)]
                } else {
                    let insert = self.table[self.slot(ia, ib + 1)];
                    let delete = self.table[self.slot(ia + 1, ib)];
                    let substitute = self.table[self.slot(ia + 1, ib + 1)];
                    1 + insert.min(delete).min(substitute)
                };
                let slot = self.slot(ia, ib);
                self.table[slot] = dist;
            }
        }
        self.table[0]
    }
}

/// Edit distance between `a` and `b` with unit insert/delete/substitute
/// costs, over Unicode scalar values.
#[must_use]
pub fn distance(a: &str, b: &str) -> usize {
    Levenshtein::new(a, b).run()
}

/// Candidate closest to `input`; the first one wins on ties.
///
/// Returns `None` only when `candidates` is empty.
pub fn closest_match<'a, I>(input: &str, candidates: I) -> Option<Suggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<Suggestion> = None;
    for candidate in candidates {
        let dist = distance(input, candidate);
        if best.as_ref().map_or(true, |b| dist < b.distance) {
            best = Some(Suggestion {
                name: candidate.to_owned(),
                distance: dist,
            });
        }
    }
    best
}
