//a Imports
use std::collections::BTreeMap;

use crate::Error;

//a Entry
//tp Entry
/// A single contiguous run: `length` consecutive keys starting at a
/// range's start key all map to `start + shift`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    shift: i64,
    length: u64,
}

//a RangeMap
//tp RangeMap
/// A sparse, range-compressed, one-directional mapping from a
/// contiguous run of keys to a shifted contiguous run of values
///
/// Insertion follows `original_source/src/celengine/crossindex.cpp`:
/// a new range that overlaps an existing one either fails (the default)
/// or, when an overwrite is requested, truncates the overlapped range(s),
/// reinserting any overhanging tail with its original shift so that the
/// parts of a range outside the newly inserted one still resolve exactly
/// as they did before
#[derive(Debug, Default, Clone)]
struct RangeMap(BTreeMap<u64, Entry>);

//ip RangeMap
impl RangeMap {
    //mp get
    fn get(&self, key: u64) -> Option<u64> {
        let (&start, entry) = self.0.range(..=key).next_back()?;
        if key < start + entry.length {
            Some((key as i64 + entry.shift) as u64)
        } else {
            None
        }
    }

    //mp insert
    fn insert(&mut self, start: u64, shift: i64, length: u64, overwrite: bool) -> Result<(), Error> {
        if length == 0 {
            return Ok(());
        }
        let end = start + length;

        // Predecessor: a range starting at or before `start`
        if let Some((&pred_start, &pred)) = self.0.range(..=start).next_back() {
            let pred_end = pred_start + pred.length;
            if pred_end > start {
                if !overwrite {
                    return Err(Error::OverlappingRange(pred_start as u32));
                }
                self.0.remove(&pred_start);
                if start > pred_start {
                    self.0.insert(
                        pred_start,
                        Entry {
                            shift: pred.shift,
                            length: start - pred_start,
                        },
                    );
                }
                if pred_end > end {
                    self.0.insert(
                        end,
                        Entry {
                            shift: pred.shift,
                            length: pred_end - end,
                        },
                    );
                }
            }
        }

        // Any ranges that start within [start, end) are fully or
        // partially overwritten
        let overlapping: Vec<u64> = self
            .0
            .range(start..end)
            .map(|(&k, _)| k)
            .collect();
        for key in overlapping {
            if !overwrite {
                return Err(Error::OverlappingRange(key as u32));
            }
            let entry = self.0.remove(&key).unwrap();
            let entry_end = key + entry.length;
            if entry_end > end {
                self.0.insert(
                    end,
                    Entry {
                        shift: entry.shift,
                        length: entry_end - end,
                    },
                );
            }
        }

        self.0.insert(start, Entry { shift, length });
        Ok(())
    }
}

//a CrossIndex
//tp CrossIndex
/// A bidirectional range-compressed mapping between an external
/// catalog's numbering and this database's internal catalog numbers
#[derive(Debug, Default, Clone)]
pub struct CrossIndex {
    forward: RangeMap,
    reverse: RangeMap,
}

//ip CrossIndex
impl CrossIndex {
    //cp new
    pub fn new() -> Self {
        Self::default()
    }

    //mp insert
    /// Register that `length` consecutive external numbers starting at
    /// `start` map to internal numbers starting at `start as i64 + shift`
    pub fn insert(
        &mut self,
        start: u32,
        shift: i32,
        length: u32,
        overwrite: bool,
    ) -> Result<(), Error> {
        self.forward
            .insert(start as u64, shift as i64, length as u64, overwrite)?;
        let reverse_start = (start as i64 + shift as i64) as u64;
        self.reverse
            .insert(reverse_start, -(shift as i64), length as u64, overwrite)?;
        Ok(())
    }

    //mp get
    /// Map an external catalog number to an internal one
    pub fn get(&self, external: u32) -> Option<u32> {
        self.forward.get(external as u64).map(|v| v as u32)
    }

    //mp get_reverse
    /// Map an internal catalog number back to its external one
    pub fn get_reverse(&self, internal: u32) -> Option<u32> {
        self.reverse.get(internal as u64).map(|v| v as u32)
    }
}
