use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot cycle over an empty collection")]
pub struct EmptyInputError;

/// An endless, shuffled walk over a fixed set of items.
///
/// Every item is drawn exactly once per cycle, and a fresh cycle never opens
/// with the item that closed the previous one (unless all items are equal).
#[derive(Debug, Clone)]
pub struct RandomCycle<T, R = StdRng> {
    items: Vec<T>,
    order: Vec<usize>,
    cursor: usize,
    last: Option<usize>,
    rng: R,
}

impl<T> RandomCycle<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Result<Self, EmptyInputError> {
        Self::with_rng(items, StdRng::from_entropy())
    }
}

impl<T, R> RandomCycle<T, R> {
    pub fn with_rng(items: impl IntoIterator<Item = T>, rng: R) -> Result<Self, EmptyInputError> {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Err(EmptyInputError);
        }
        let len = items.len();
        Ok(Self {
            items,
            order: (0..len).collect(),
            // start exhausted so the first draw shuffles
            cursor: len,
            last: None,
            rng,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: PartialEq, R: Rng> RandomCycle<T, R> {
    fn reshuffle(&mut self) {
        self.order.shuffle(&mut self.rng);
        self.cursor = 0;

        let Some(last) = self.last else { return };
        if self.items[self.order[0]] != self.items[last] {
            return;
        }
        if let Some(swap) = self
            .order
            .iter()
            .position(|&index| self.items[index] != self.items[last])
        {
            self.order.swap(0, swap);
        }
    }

    /// Draws the next item, starting a new cycle when the current one is spent.
    pub fn draw(&mut self) -> &T {
        if self.cursor >= self.order.len() {
            self.reshuffle();
        }
        let index = self.order[self.cursor];
        self.cursor += 1;
        self.last = Some(index);
        &self.items[index]
    }
}

impl<T: Clone + PartialEq, R: Rng> Iterator for RandomCycle<T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.draw().clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
