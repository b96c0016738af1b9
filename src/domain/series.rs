// Rolling series storage for one channel
use super::reading::Reading;
use std::collections::VecDeque;

/// Points kept per chart while appending live readings.
pub const DEFAULT_CAPACITY: usize = 60;

/// Ordered readings for one channel.
///
/// The capacity only applies to `append`: `replace_all` installs whatever it
/// is given, however long.
#[derive(Debug, Clone)]
pub struct SeriesBuffer {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl SeriesBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push to the tail, evicting from the head until within capacity.
    pub fn append(&mut self, reading: Reading) {
        self.readings.push_back(reading);
        while self.readings.len() > self.capacity {
            self.readings.pop_front();
        }
    }

    pub fn replace_all(&mut self, readings: Vec<Reading>) {
        self.readings = VecDeque::from(readings);
    }

    pub fn snapshot(&self) -> Vec<Reading> {
        self.readings.iter().copied().collect()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SeriesBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
