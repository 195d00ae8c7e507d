/// Error type for record store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A single task entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub text: String,
    pub done: bool,
}

impl Record {
    pub fn new(text: impl Into<String>) -> Self {
        Record {
            text: text.into(),
            done: false,
        }
    }
}

/// Ordered sequence of records. Position is the only handle a record has.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, not-done record and return its index.
    pub fn add(&mut self, text: impl Into<String>) -> usize {
        self.records.push(Record::new(text));
        self.records.len() - 1
    }

    pub fn toggle(&mut self, index: usize) -> Result<(), StoreError> {
        let record = self.get_mut(index)?;
        record.done = !record.done;
        Ok(())
    }

    pub fn rename(&mut self, index: usize, text: impl Into<String>) -> Result<(), StoreError> {
        self.get_mut(index)?.text = text.into();
        Ok(())
    }

    /// Remove the record at `index`; later records shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<Record, StoreError> {
        self.check(index)?;
        Ok(self.records.remove(index))
    }

    /// Mark every record done.
    pub fn complete_all(&mut self) {
        for record in &mut self.records {
            record.done = true;
        }
    }

    /// Remove every done record, preserving the order of the rest.
    /// Returns the removed indexes (as they were before removal), ascending.
    pub fn clear_completed(&mut self) -> Vec<usize> {
        let removed: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.done)
            .map(|(i, _)| i)
            .collect();
        self.records.retain(|r| !r.done);
        removed
    }

    pub fn count_incomplete(&self) -> usize {
        self.records.iter().filter(|r| !r.done).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn check(&self, index: usize) -> Result<(), StoreError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Record, StoreError> {
        self.check(index)?;
        Ok(&mut self.records[index])
    }
}
