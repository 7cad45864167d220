//! Candidate selection stages.
//!
//! Each stage is a pure filter: it borrows the surviving candidates of the
//! previous stage and returns a new collection, never mutating a candidate.
//! Duplicated candidates are kept.
//!
//! The inclusion stage re-checks the start and end vertices even though the
//! primer stage already guarantees them; those steps are flagged as
//! `already_guaranteed` so progress reporting can say so.

use tracing::{debug, info, instrument};

use crate::{alphabet::Strand, encoder::Encoding, graph::Graph};

/// Keeps candidates that begin with the start strand and end with the end
/// strand.
///
/// Applying the filter to its own output returns the same collection.
#[must_use]
pub fn primer_filter(candidates: &[Strand], encoding: &Encoding) -> Vec<Strand> {
    let width = encoding.strand_length();
    let (Some(start), Some(end)) = (encoding.start_strand(), encoding.end_strand()) else {
        return Vec::new();
    };
    candidates
        .iter()
        .filter(|candidate| {
            candidate.prefix(width) == Some(start.as_str())
                && candidate.suffix(width) == Some(end.as_str())
        })
        .cloned()
        .collect()
}

/// Keeps candidates exactly `vertex_count * strand_length` symbols long.
#[must_use]
pub fn length_filter(candidates: &[Strand], vertex_count: usize, strand_length: usize) -> Vec<Strand> {
    let expected = vertex_count.saturating_mul(strand_length);
    candidates
        .iter()
        .filter(|candidate| candidate.len() == expected)
        .cloned()
        .collect()
}

/// Keeps candidates that contain `vertex_strand` anywhere.
#[must_use]
pub fn inclusion_filter(candidates: &[Strand], vertex_strand: &Strand) -> Vec<Strand> {
    candidates
        .iter()
        .filter(|candidate| candidate.contains(vertex_strand))
        .cloned()
        .collect()
}

/// Survivor count after one per-vertex inclusion step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InclusionStep {
    /// Index of the vertex checked in this step.
    pub vertex: usize,
    /// Candidates still alive after the step.
    pub remaining: usize,
    /// Whether the primer stage already guaranteed this vertex.
    pub already_guaranteed: bool,
}

/// Survivor counts of every selection stage plus the final survivors.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectionReport {
    /// Candidates entering the pipeline.
    pub assembled: usize,
    /// Survivors of the primer stage.
    pub after_primer: usize,
    /// Survivors of the length stage.
    pub after_length: usize,
    /// Survivors after each inclusion step, in vertex order.
    pub inclusion: Vec<InclusionStep>,
    /// Final survivors, possibly with duplicates.
    pub survivors: Vec<Strand>,
}

impl SelectionReport {
    /// Returns `true` when no candidate survived every stage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.survivors.is_empty()
    }
}

/// Runs primer, length and inclusion selection in order.
#[derive(Clone, Copy, Debug)]
pub struct SelectionPipeline<'a> {
    graph: &'a Graph,
    encoding: &'a Encoding,
}

impl<'a> SelectionPipeline<'a> {
    /// Creates a pipeline for candidates assembled from `encoding`.
    #[must_use]
    pub const fn new(graph: &'a Graph, encoding: &'a Encoding) -> Self {
        Self { graph, encoding }
    }

    /// Filters `candidates` through every stage.
    ///
    /// # Examples
    /// ```
    /// use oligo_core::{Encoding, GraphPreset, SelectionPipeline};
    ///
    /// let graph = GraphPreset::Chain.build().expect("preset is valid");
    /// let encoding = Encoding::from_vertex_strands(&graph, 2, ["AC", "GT", "CA"])
    ///     .expect("strands are valid");
    /// let full = encoding.path_strand(&[0, 1, 2]);
    /// let partial = encoding.edge_strands()[1].clone();
    /// let report = SelectionPipeline::new(&graph, &encoding).run(&[partial, full.clone()]);
    /// assert_eq!(report.after_primer, 1);
    /// assert_eq!(report.survivors, vec![full]);
    /// ```
    #[must_use]
    #[instrument(
        name = "core.select",
        skip(self, candidates),
        fields(candidates = candidates.len(), vertices = self.graph.vertex_count()),
    )]
    pub fn run(&self, candidates: &[Strand]) -> SelectionReport {
        let primed = primer_filter(candidates, self.encoding);
        info!(
            remaining = primed.len(),
            start = self.graph.vertex_name(self.graph.start()).unwrap_or_default(),
            end = self.graph.vertex_name(self.graph.end()).unwrap_or_default(),
            "kept strands with correct start and end"
        );

        let sized = length_filter(
            &primed,
            self.graph.vertex_count(),
            self.encoding.strand_length(),
        );
        info!(
            remaining = sized.len(),
            steps = self.graph.vertex_count(),
            "kept strands with one strand length per vertex"
        );

        let mut inclusion = Vec::with_capacity(self.graph.vertex_count());
        let mut survivors = sized.clone();
        for (vertex, strand) in self.encoding.vertex_strands().iter().enumerate() {
            survivors = inclusion_filter(&survivors, strand);
            let already_guaranteed = vertex == self.graph.start() || vertex == self.graph.end();
            let name = self.graph.vertex_name(vertex).unwrap_or_default();
            if already_guaranteed {
                debug!(vertex = name, remaining = survivors.len(), "already checked");
            } else {
                debug!(vertex = name, remaining = survivors.len(), "removed strands missing vertex");
            }
            inclusion.push(InclusionStep {
                vertex,
                remaining: survivors.len(),
                already_guaranteed,
            });
        }
        info!(remaining = survivors.len(), "kept strands including every vertex");

        SelectionReport {
            assembled: candidates.len(),
            after_primer: primed.len(),
            after_length: sized.len(),
            inclusion,
            survivors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::{fixture, rstest};

    use crate::{assembler::Assembler, encoder::Encoder, graph::GraphPreset};

    struct Fixture {
        graph: Graph,
        encoding: Encoding,
    }

    /// `A -> B -> C` with strands `AC`, `GT` and `CA`.
    #[fixture]
    fn chain() -> Fixture {
        let graph = GraphPreset::Chain.build().expect("preset is valid");
        let encoding = Encoding::from_vertex_strands(&graph, 2, ["AC", "GT", "CA"])
            .expect("strands are valid");
        Fixture { graph, encoding }
    }

    fn strands(raw: &[&str]) -> Vec<Strand> {
        raw.iter()
            .map(|value| Strand::parse(value).expect("valid strand"))
            .collect()
    }

    #[rstest]
    fn primer_filter_checks_both_ends(chain: Fixture) {
        let candidates = strands(&["ACGTCA", "GTCA", "ACGT", "ACCA", "TTCA"]);
        let kept = primer_filter(&candidates, &chain.encoding);
        assert_eq!(kept, strands(&["ACGTCA", "ACCA"]));
    }

    #[rstest]
    fn primer_filter_rejects_strands_shorter_than_a_vertex(chain: Fixture) {
        let kept = primer_filter(&strands(&["A", ""]), &chain.encoding);
        assert!(kept.is_empty());
    }

    #[rstest]
    fn length_filter_keeps_exact_lengths_only() {
        let candidates = strands(&["ACGTCA", "ACCA", "ACGTGTCA"]);
        assert_eq!(length_filter(&candidates, 3, 2), strands(&["ACGTCA"]));
    }

    #[rstest]
    fn inclusion_filter_requires_contiguous_match() {
        let candidates = strands(&["ACGTCA", "AGCTCA"]);
        let vertex = Strand::parse("GT").expect("valid strand");
        assert_eq!(inclusion_filter(&candidates, &vertex), strands(&["ACGTCA"]));
    }

    #[rstest]
    fn pipeline_keeps_duplicates(chain: Fixture) {
        let candidates = strands(&["ACGTCA", "ACGTCA", "ACCA"]);
        let report = SelectionPipeline::new(&chain.graph, &chain.encoding).run(&candidates);
        assert_eq!(report.assembled, 3);
        assert_eq!(report.after_primer, 3);
        assert_eq!(report.after_length, 2);
        assert_eq!(report.survivors, strands(&["ACGTCA", "ACGTCA"]));
    }

    #[rstest]
    fn pipeline_flags_boundary_steps(chain: Fixture) {
        let report = SelectionPipeline::new(&chain.graph, &chain.encoding)
            .run(&strands(&["ACGTCA"]));
        let flags: Vec<bool> = report
            .inclusion
            .iter()
            .map(|step| step.already_guaranteed)
            .collect();
        assert_eq!(flags, vec![true, false, true]);
        let vertices: Vec<usize> = report.inclusion.iter().map(|step| step.vertex).collect();
        assert_eq!(vertices, vec![0, 1, 2]);
    }

    #[rstest]
    fn inclusion_drops_length_matches_missing_a_vertex() {
        // A -> C -> C style candidate: right length, right ends, no B.
        let graph = GraphPreset::Chain.build().expect("preset is valid");
        let encoding = Encoding::from_vertex_strands(&graph, 2, ["AC", "GT", "CA"])
            .expect("strands are valid");
        let report = SelectionPipeline::new(&graph, &encoding).run(&strands(&["ACACCA"]));
        assert_eq!(report.after_length, 1);
        let remaining: Vec<usize> = report.inclusion.iter().map(|step| step.remaining).collect();
        assert_eq!(remaining, vec![1, 0, 0]);
        assert!(report.is_empty());
    }

    #[rstest]
    fn empty_input_yields_empty_report(chain: Fixture) {
        let report = SelectionPipeline::new(&chain.graph, &chain.encoding).run(&[]);
        assert!(report.is_empty());
        assert_eq!(report.after_primer, 0);
        assert!(report.inclusion.iter().all(|step| step.remaining == 0));
    }

    proptest! {
        #[test]
        fn stages_are_monotone_and_primer_is_idempotent(seed in any::<u64>()) {
            let graph = GraphPreset::LoveDna.build().expect("preset is valid");
            let mut rng = SmallRng::seed_from_u64(seed);
            let encoding = Encoder::new(10)
                .expect("strand length is valid")
                .encode(&graph, &mut rng);
            let assembly = Assembler::new(&encoding, 30).assemble(&mut rng).expect("valid");

            let primed = primer_filter(&assembly.candidates, &encoding);
            prop_assert_eq!(primer_filter(&primed, &encoding), primed.clone());
            for candidate in &primed {
                prop_assert_eq!(candidate.len() % 10, 0);
            }

            let report = SelectionPipeline::new(&graph, &encoding).run(&assembly.candidates);
            prop_assert!(report.after_primer <= report.assembled);
            prop_assert!(report.after_length <= report.after_primer);
            let mut previous = report.after_length;
            for step in &report.inclusion {
                prop_assert!(step.remaining <= previous);
                previous = step.remaining;
            }

            let mut kept = length_filter(&primed, graph.vertex_count(), 10);
            for (index, (strand, step)) in encoding
                .vertex_strands()
                .iter()
                .zip(&report.inclusion)
                .enumerate()
            {
                kept = inclusion_filter(&kept, strand);
                prop_assert_eq!(kept.len(), step.remaining);
                for survivor in &kept {
                    for required in encoding.vertex_strands().iter().take(index + 1) {
                        prop_assert!(survivor.contains(required));
                    }
                }
            }
            prop_assert_eq!(&kept, &report.survivors);

            for survivor in &report.survivors {
                prop_assert_eq!(survivor.len(), graph.vertex_count() * 10);
                for strand in encoding.vertex_strands() {
                    prop_assert!(survivor.contains(strand));
                }
            }
        }
    }
}
