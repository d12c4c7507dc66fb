use crate::markov::*;

use approx::assert_relative_eq;
use std::sync::Arc;

/// A reference calculation of a single step, with a matrix whose first
/// row holds the emissions of every candidate (from the third column),
/// and each following row holds a predecessor's `(filtprob, seqprob)`
/// followed by its transition towards every candidate.
struct MockStates {
    matrix: Vec<Vec<f64>>,
    seqprob: Vec<f64>,
    filtprob: Vec<f64>,
    pred: Vec<Option<usize>>,
}

impl MockStates {
    fn new(matrix: Vec<Vec<f64>>) -> Self {
        let candidates = matrix[0].len() - 2;

        let mut states = Self {
            matrix,
            seqprob: vec![f64::NEG_INFINITY; candidates],
            filtprob: vec![0.0; candidates],
            pred: vec![None; candidates],
        };

        states.calculate();
        states
    }

    fn calculate(&mut self) {
        let mut normsum = 0.0;

        for c in 0..self.num_candidates() {
            let mut transition = false;

            for p in 0..self.num_predecessors() {
                let (filtprob, seqprob) = self.predecessor(p);
                if self.transition(p, c) == 0.0 {
                    continue;
                }

                transition = true;
                self.filtprob[c] += filtprob * self.transition(p, c);

                let candidate_seqprob =
                    seqprob + self.transition(p, c).log10() + self.emission(c).log10();

                if candidate_seqprob > self.seqprob[c] {
                    self.pred[c] = Some(p);
                    self.seqprob[c] = candidate_seqprob;
                }
            }

            if transition {
                self.filtprob[c] *= self.emission(c);
            } else {
                self.filtprob[c] = self.emission(c);
                self.seqprob[c] = self.emission(c).log10();
                self.pred[c] = None;
            }

            normsum += self.filtprob[c];
        }

        for c in 0..self.num_candidates() {
            self.filtprob[c] /= normsum;
        }
    }

    fn num_candidates(&self) -> usize {
        self.matrix[0].len() - 2
    }

    fn num_predecessors(&self) -> usize {
        self.matrix.len() - 1
    }

    fn emission(&self, candidate: usize) -> f64 {
        self.matrix[0][candidate + 2]
    }

    fn transition(&self, predecessor: usize, candidate: usize) -> f64 {
        self.matrix[predecessor + 1][candidate + 2]
    }

    fn predecessor(&self, predecessor: usize) -> (f64, f64) {
        let row = &self.matrix[predecessor + 1];
        (row[0], row[1].log10())
    }
}

struct MockModel<'a> {
    states: &'a MockStates,
}

impl Model for MockModel<'_> {
    type State = usize;
    type Transition = ();
    type Sample = u32;

    fn candidates(
        &self,
        _predecessors: &[StateOf<Self>],
        _sample: &Self::Sample,
    ) -> Vec<Emission<Self::State>> {
        (0..self.states.num_candidates())
            .map(|c| Emission::new(c, self.states.emission(c)))
            .collect()
    }

    fn transitions(
        &self,
        (_, predecessors): (&Self::Sample, &[StateOf<Self>]),
        (_, candidates): (&Self::Sample, &[Emission<Self::State>]),
    ) -> Transitions<Self::Transition> {
        let mut transitions = Transitions::new();

        for (p, predecessor) in predecessors.iter().enumerate() {
            for (c, candidate) in candidates.iter().enumerate() {
                let probability = self
                    .states
                    .transition(*predecessor.state(), candidate.state);

                transitions.insert(p, c, Reachable::new((), probability));
            }
        }

        transitions
    }
}

fn execute(states: &MockStates) -> Result<Vec<StateOf<MockModel<'_>>>, FilterError> {
    let filter = Filter::new(MockModel { states });

    let predecessors = (0..states.num_predecessors())
        .map(|p| {
            let (filtprob, seqprob) = states.predecessor(p);
            Arc::new(StateCandidate::seed(p, filtprob, seqprob))
        })
        .collect::<Vec<_>>();

    filter.execute(Some((&0, &predecessors)), &1)
}

fn assert_matches_reference(states: &MockStates, linked: bool) {
    let result = execute(states).expect("step must not be degenerate");
    assert_eq!(result.len(), states.num_candidates());

    for element in &result {
        let id = *element.state();

        assert_relative_eq!(element.filtprob(), states.filtprob[id], epsilon = 1e-6);
        assert_relative_eq!(element.seqprob(), states.seqprob[id], epsilon = 1e-6);

        match states.pred[id] {
            None => {
                assert!(element.predecessor().is_none());
                assert!(!element.has_transition());
            }
            Some(pred) => {
                let predecessor = element.predecessor().expect("must have a predecessor");
                assert_eq!(*predecessor.state(), pred);
                assert_eq!(element.has_transition(), linked);
            }
        }
    }
}

#[test_log::test]
fn filter_initial() {
    let states = MockStates::new(vec![vec![0.0, 0.0, 0.6, 1.0, 0.4]]);
    assert_matches_reference(&states, false);

    let result = execute(&states).unwrap();
    let total = 0.6 + 1.0 + 0.4;

    for element in &result {
        let emission = states.emission(*element.state());

        assert_relative_eq!(element.filtprob(), emission / total, epsilon = 1e-9);
        assert_relative_eq!(element.seqprob(), emission.log10(), epsilon = 1e-9);
        assert!(matches!(element.origin(), Origin::Initial));
    }
}

#[test_log::test]
fn filter_subsequent() {
    let states = MockStates::new(vec![
        vec![0.0, 0.0, 0.6, 1.0, 0.4],
        vec![0.2, 0.3, 0.01, 1.0, 0.3],
        vec![0.3, 0.4, 0.2, 0.05, 0.02],
    ]);

    assert_matches_reference(&states, true);

    let result = execute(&states).unwrap();
    assert!(result.iter().all(|element| element.has_transition()));
}

#[test_log::test]
fn filter_subsequent_reference_transitions() {
    let states = MockStates::new(vec![
        vec![0.0, 0.0, 0.6, 1.0, 0.4],
        vec![0.2, 0.3, 0.01, 0.02, 0.3],
        vec![0.3, 0.4, 0.2, 0.05, 0.02],
    ]);

    assert_matches_reference(&states, true);
}

#[test_log::test]
fn filter_break_transition() {
    let states = MockStates::new(vec![
        vec![0.0, 0.0, 0.6, 1.0, 0.4],
        vec![0.2, 0.3, 0.0, 0.0, 0.0],
        vec![0.3, 0.4, 0.0, 0.0, 0.0],
    ]);

    assert_matches_reference(&states, true);

    let result = execute(&states).unwrap();
    for element in &result {
        let emission = states.emission(*element.state());

        assert!(element.is_break());
        assert!(element.predecessor().is_none());
        assert_relative_eq!(element.seqprob(), emission.log10(), epsilon = 1e-9);
    }
}

#[test_log::test]
fn filter_partial_break() {
    // The second candidate cannot be reached, and restarts with its
    // raw emission before normalisation.
    let states = MockStates::new(vec![
        vec![0.0, 0.0, 0.6, 1.0, 0.4],
        vec![0.2, 0.3, 0.5, 0.0, 0.3],
        vec![0.3, 0.4, 0.2, 0.0, 0.02],
    ]);

    assert_matches_reference(&states, true);

    let result = execute(&states).unwrap();
    assert!(result[1].is_break());
    assert!(result[0].has_transition());
    assert!(result[2].has_transition());
}

#[test_log::test]
fn filter_break_candidates() {
    let states = MockStates::new(vec![vec![0.0, 0.0], vec![0.2, 0.3], vec![0.3, 0.4]]);

    let result = execute(&states).unwrap();
    assert!(result.is_empty());
}

#[test_log::test]
fn filter_degenerate() {
    let states = MockStates::new(vec![vec![0.0, 0.0, 0.0, 0.0]]);

    let result = execute(&states);
    assert_eq!(result.err(), Some(FilterError::Degenerate { candidates: 2 }));
}

#[test_log::test]
fn filter_tie_keeps_first_predecessor() {
    let states = MockStates::new(vec![
        vec![0.0, 0.0, 0.5],
        vec![0.5, 0.5, 0.4],
        vec![0.5, 0.5, 0.4],
    ]);

    let result = execute(&states).unwrap();
    let predecessor = result[0].predecessor().expect("must be linked");
    assert_eq!(*predecessor.state(), 0);
}

/// A model replaying fixed emissions and transition matrices per step,
/// where the sample is the index of the step.
struct ScriptedModel {
    emissions: Vec<Vec<f64>>,
    transitions: Vec<Vec<Vec<f64>>>,
}

impl Model for ScriptedModel {
    type State = usize;
    type Transition = f64;
    type Sample = usize;

    fn candidates(&self, _: &[StateOf<Self>], sample: &usize) -> Vec<Emission<usize>> {
        self.emissions[*sample]
            .iter()
            .enumerate()
            .map(|(c, probability)| Emission::new(c, *probability))
            .collect()
    }

    fn transitions(
        &self,
        (_, predecessors): (&usize, &[StateOf<Self>]),
        (sample, _): (&usize, &[Emission<usize>]),
    ) -> Transitions<f64> {
        let matrix = &self.transitions[*sample];

        predecessors
            .iter()
            .enumerate()
            .flat_map(|(p, predecessor)| {
                matrix[*predecessor.state()]
                    .iter()
                    .enumerate()
                    .filter(|(_, probability)| **probability > 0.0)
                    .map(move |(c, probability)| (p, c, Reachable::new(*probability, *probability)))
            })
            .collect()
    }
}

fn scripted() -> ScriptedModel {
    ScriptedModel {
        emissions: vec![
            vec![0.6, 1.0, 0.4],
            vec![0.3, 0.9, 0.2],
            vec![0.8, 0.1, 0.5],
        ],
        transitions: vec![
            vec![],
            vec![
                vec![0.5, 0.1, 0.4],
                vec![0.05, 0.9, 0.05],
                vec![0.3, 0.3, 0.4],
            ],
            vec![
                vec![0.7, 0.2, 0.1],
                vec![0.1, 0.2, 0.7],
                vec![0.2, 0.6, 0.2],
            ],
        ],
    }
}

#[test_log::test]
fn filter_normalizes_each_step() -> Result<(), FilterError> {
    let filter = Filter::new(scripted());

    let mut layer: Option<Layer<ScriptedModel>> = None;
    for sample in 0..3 {
        let next = filter.step(layer.as_ref(), sample)?;

        let total = next
            .candidates()
            .iter()
            .map(|candidate| candidate.filtprob())
            .sum::<f64>();

        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
        layer = Some(next);
    }

    Ok(())
}

#[test_log::test]
fn backtrace_matches_sequence_probability() -> Result<(), FilterError> {
    let model = scripted();
    let emissions = model.emissions.clone();
    let matrices = model.transitions.clone();
    let filter = Filter::new(model);

    let first = filter.step(None, 0)?;
    let second = filter.step(Some(&first), 1)?;
    let third = filter.step(Some(&second), 2)?;

    let best = third.best().expect("must have a best candidate");
    let sequence = third.sequence();
    assert_eq!(sequence.len(), 3);

    // The most likely sequence must be the highest scoring of the last layer.
    for candidate in third.candidates() {
        assert!(best.seqprob() >= candidate.seqprob());
    }

    let states = sequence
        .iter()
        .map(|candidate| *candidate.state())
        .collect::<Vec<_>>();

    let mut cumulative = emissions[0][states[0]].log10();
    for step in 1..states.len() {
        let transition = matrices[step][states[step - 1]][states[step]];
        assert_relative_eq!(*sequence[step].transition().unwrap(), transition);

        cumulative += transition.log10() + emissions[step][states[step]].log10();
    }

    assert_relative_eq!(cumulative, best.seqprob(), epsilon = 1e-9);
    assert!(sequence[0].predecessor().is_none());

    Ok(())
}

#[test_log::test]
fn history_released_with_survivors() -> Result<(), FilterError> {
    let filter = Filter::new(scripted());

    let first = filter.step(None, 0)?;
    let observed = Arc::downgrade(&first.candidates()[0]);

    let second = filter.step(Some(&first), 1)?;
    drop(first);

    let still_chained = second
        .candidates()
        .iter()
        .any(|candidate| candidate.predecessor().is_some_and(|p| *p.state() == 0));

    assert_eq!(observed.upgrade().is_some(), still_chained);

    drop(second);
    assert!(observed.upgrade().is_none());

    Ok(())
}

#[test]
fn long_chain_drops_iteratively() {
    let mut head = Arc::new(StateCandidate::<usize, ()>::seed(0, 1.0, 0.0));

    for step in 1..250_000 {
        head = Arc::new(StateCandidate::new(
            step,
            1.0,
            0.0,
            Origin::Linked {
                predecessor: head,
                transition: (),
            },
        ));
    }

    assert_eq!(head.ancestry().count(), 250_000);
    drop(head);
}
