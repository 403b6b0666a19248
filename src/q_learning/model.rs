//! Experience memory replayed during Dyna planning

use rand::Rng;

use crate::tictactoe::StateId;

/// One observed transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Experience {
    pub state: StateId,
    pub action: usize,
    pub next_state: StateId,
    pub reward: f64,
}

/// Fixed-capacity ring buffer of real transitions. Overwrites oldest when full.
#[derive(Debug, Clone)]
pub struct ExperienceModel {
    buffer: Vec<Experience>,
    capacity: usize,
    position: usize,
}

impl ExperienceModel {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Vec::with_capacity(capacity.min(4_096)),
            capacity,
            position: 0,
        }
    }

    pub fn push(&mut self, experience: Experience) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(experience);
        } else {
            self.buffer[self.position] = experience;
        }
        self.position = (self.position + 1) % self.capacity;
    }

    /// Draw one stored transition uniformly, or `None` while empty
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Experience> {
        if self.buffer.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.buffer.len());
        Some(self.buffer[idx])
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn experience(action: usize) -> Experience {
        Experience {
            state: StateId::EMPTY,
            action,
            next_state: StateId::EMPTY,
            reward: -1.0,
        }
    }

    #[test]
    fn test_empty_model_samples_nothing() {
        let model = ExperienceModel::new(4);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(model.is_empty());
        assert_eq!(model.sample(&mut rng), None);
    }

    #[test]
    fn test_overwrites_oldest_when_full() {
        let mut model = ExperienceModel::new(3);
        for action in 0..5 {
            model.push(experience(action));
        }
        assert_eq!(model.len(), 3);

        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let sampled = model.sample(&mut rng).unwrap();
            assert!(sampled.action >= 2, "action {} was overwritten", sampled.action);
        }
    }
}
