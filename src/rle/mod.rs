// src/rle/mod.rs

//! A generic run-length-encoded sequence container.
//!
//! [`RleVec`] stores a logical sequence of `N = Σ length` equal-comparable
//! values as an ordered list of `(value, length)` runs, collapsing adjacent
//! equal values. It exposes the shape of a flat random-access sequence:
//! point access, slicing, bulk range replacement (which may shorten or
//! lengthen the sequence), value remapping, and trailing resize.
//!
//! The canonical form maintained by every operation is:
//! * no run has length zero,
//! * no two adjacent runs share a value,
//! * the cached total length equals the sum of all run lengths.
//!
//! The run store is a [`SmallVec`] with inline capacity `INLINE`; a terminal
//! row is usually a single run, so the common case never touches the heap.

pub mod iter;


use std::fmt;
use std::slice;

use smallvec::SmallVec;

use crate::error::RleError;
use crate::run::{to_index, to_u64_saturating, Run, RunLength};

use self::iter::{RleCursor, RleIter};

/// Locates the run containing a logical index.
///
/// A single left-to-right walk accumulating run lengths; resumable, so a
/// second `scan` for a larger index continues where the first one stopped.
struct Scanner<'a, T, S> {
    runs: &'a [Run<T, S>],
    idx: usize,
    total: S,
}

impl<'a, T, S: RunLength> Scanner<'a, T, S> {
    fn new(runs: &'a [Run<T, S>]) -> Self {
        Self {
            runs,
            idx: 0,
            total: S::zero(),
        }
    }

    /// Returns `(run_index, offset_in_run)` for the `index`-th logical
    /// element. For `index` at or past the end of the sequence the run index
    /// is `runs.len()` and the offset is zero.
    fn scan(&mut self, index: S) -> (usize, S) {
        let mut run_pos = S::zero();

        while self.idx < self.runs.len() {
            let new_total = self.total + self.runs[self.idx].length;
            if new_total > index {
                run_pos = index - self.total;
                break;
            }

            self.total = new_total;
            self.idx += 1;
        }

        (self.idx, run_pos)
    }
}

/// A run-length-encoded sequence of `T` with logical length tracked in `S`.
///
/// The first `INLINE` runs are stored inline; longer sequences spill to the
/// heap. Mutating operations borrow the container exclusively, so any
/// outstanding [`RleCursor`]/[`RleIter`] borrows must end before a mutation
/// compiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleVec<T, S = usize, const INLINE: usize = 1> {
    runs: SmallVec<[Run<T, S>; INLINE]>,
    total_length: S,
}

impl<T, S: RunLength, const INLINE: usize> Default for RleVec<T, S, INLINE> {
    fn default() -> Self {
        Self {
            runs: SmallVec::new(),
            total_length: S::zero(),
        }
    }
}

impl<T, S: RunLength, const INLINE: usize> RleVec<T, S, INLINE> {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container of `length` copies of `value` (a single run).
    ///
    /// `length == 0` yields an empty container.
    pub fn filled(length: S, value: T) -> Self {
        let mut runs = SmallVec::new();
        if length > S::zero() {
            runs.push(Run::new(value, length));
        }
        Self {
            runs,
            total_length: length,
        }
    }

    /// The logical length of the sequence (sum of all run lengths).
    pub fn len(&self) -> S {
        self.total_length
    }

    /// Whether the logical sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.total_length == S::zero()
    }

    /// Read-only access to the raw run list.
    pub fn runs(&self) -> &[Run<T, S>] {
        &self.runs
    }

    /// The value at logical index `position`, or `None` past the end.
    pub fn get(&self, position: S) -> Option<&T> {
        let (idx, _) = Scanner::new(&self.runs).scan(position);
        self.runs.get(idx).map(|run| &run.value)
    }

    /// The value at logical index `position`.
    ///
    /// # Errors
    /// [`RleError::OutOfRange`] when `position >= self.len()`.
    pub fn at(&self, position: S) -> Result<&T, RleError> {
        self.get(position).ok_or(RleError::OutOfRange {
            position: to_u64_saturating(position),
            length: to_u64_saturating(self.total_length),
        })
    }

    /// An iterator over the logical sequence, one item per element.
    ///
    /// Supports reverse iteration via [`Iterator::rev`] and random skips via
    /// [`Iterator::nth`] in `O(runs)`.
    pub fn iter(&self) -> RleIter<'_, T, S> {
        RleIter::new(&self.runs, to_index(self.total_length))
    }

    /// A cursor positioned on the first logical element (or at the end
    /// sentinel when the sequence is empty).
    pub fn cursor(&self) -> RleCursor<'_, T, S> {
        RleCursor::begin(&self.runs)
    }

    /// A cursor positioned on logical index `position`.
    ///
    /// Positions at or past the end yield the end sentinel.
    pub fn cursor_at(&self, position: S) -> RleCursor<'_, T, S> {
        let (idx, pos) = Scanner::new(&self.runs).scan(position);
        RleCursor::at(&self.runs, idx, pos)
    }

    /// The past-the-end cursor.
    pub fn cursor_end(&self) -> RleCursor<'_, T, S> {
        RleCursor::end(&self.runs)
    }

    /// Adjusts the logical length in place.
    ///
    /// Growing extends the last run to cover the new extent; shrinking cuts
    /// off trailing runs (splitting the run the new end falls into).
    ///
    /// # Errors
    /// [`RleError::EmptyExtend`] when growing an empty container, which has
    /// no trailing value to replicate. The container is left unchanged.
    pub fn resize_trailing_extent(&mut self, new_size: S) -> Result<(), RleError> {
        if new_size == S::zero() {
            self.runs.clear();
        } else if new_size < self.total_length {
            let (idx, pos) = Scanner::new(&self.runs).scan(new_size - S::one());
            self.runs[idx].length = pos + S::one();
            self.runs.truncate(idx + 1);
        } else if new_size > self.total_length {
            let grown = new_size - self.total_length;
            let last = self.runs.last_mut().ok_or(RleError::EmptyExtend)?;
            last.length += grown;
        }

        self.total_length = new_size;
        Ok(())
    }

    fn check_indices(&self, start: S, end: S) -> Result<S, RleError> {
        let end = if end > self.total_length {
            self.total_length
        } else {
            end
        };

        if start > end {
            return Err(RleError::OutOfRange {
                position: to_u64_saturating(start),
                length: to_u64_saturating(self.total_length),
            });
        }

        Ok(end)
    }
}

impl<T: Eq + Clone, S: RunLength, const INLINE: usize> RleVec<T, S, INLINE> {
    /// Builds a container from an explicit run list.
    ///
    /// The total length is recomputed; zero-length runs are dropped and
    /// adjacent equal-valued runs are merged, so the result is canonical for
    /// any input.
    pub fn from_runs<I>(runs: I) -> Self
    where
        I: IntoIterator<Item = Run<T, S>>,
    {
        let mut out = Self::new();
        for run in runs {
            out.push_run(run);
        }
        out
    }

    fn push_run(&mut self, run: Run<T, S>) {
        if run.length == S::zero() {
            return;
        }

        self.total_length += run.length;

        if let Some(last) = self.runs.last_mut() {
            if last.value == run.value {
                last.length += run.length;
                return;
            }
        }
        self.runs.push(run);
    }

    /// Returns an independent container covering the logical range
    /// `[start, end)`. `end` is clamped to the sequence length; an inverted
    /// or empty range yields an empty container.
    #[must_use]
    pub fn slice(&self, start: S, end: S) -> Self {
        let end = if end > self.total_length {
            self.total_length
        } else {
            end
        };

        if start >= end {
            return Self::new();
        }

        // start < end <= total_length here, so both scans land inside runs
        // and `end - 1` cannot underflow.
        let mut scanner = Scanner::new(&self.runs);
        let (begin_run, start_pos) = scanner.scan(start);
        let (end_run, end_pos) = scanner.scan(end - S::one());

        let mut runs: SmallVec<[Run<T, S>; INLINE]> =
            self.runs[begin_run..=end_run].iter().cloned().collect();
        if let Some(last) = runs.last_mut() {
            last.length = end_pos + S::one();
        }
        if let Some(first) = runs.first_mut() {
            first.length -= start_pos;
        }

        Self {
            runs,
            total_length: end - start,
        }
    }

    /// Sets the logical range `[start, end)` to `value`.
    ///
    /// `end` is clamped to the sequence length.
    ///
    /// # Errors
    /// [`RleError::OutOfRange`] when `start > end` after clamping.
    pub fn replace(&mut self, start: S, end: S, value: T) -> Result<(), RleError> {
        let end = self.check_indices(start, end)?;
        let new_run = Run::new(value, end - start);
        self.splice(start, end, slice::from_ref(&new_run));
        Ok(())
    }

    /// Replaces the logical range `[start, end)` with `new_run`, keeping the
    /// run's own length. This may change the sequence length.
    ///
    /// # Errors
    /// [`RleError::OutOfRange`] when `start > end` after clamping.
    pub fn replace_run(&mut self, start: S, end: S, new_run: Run<T, S>) -> Result<(), RleError> {
        let end = self.check_indices(start, end)?;
        self.splice(start, end, slice::from_ref(&new_run));
        Ok(())
    }

    /// Replaces the logical range `[start, end)` with the concatenation of
    /// `new_runs`. An empty span is a pure deletion; a zero-width range is a
    /// pure insertion. The sequence length changes by
    /// `Σ new_runs[i].length − (end − start)`.
    ///
    /// # Errors
    /// [`RleError::OutOfRange`] when `start > end` after clamping.
    pub fn replace_runs(
        &mut self,
        start: S,
        end: S,
        new_runs: &[Run<T, S>],
    ) -> Result<(), RleError> {
        let end = self.check_indices(start, end)?;
        self.splice(start, end, new_runs);
        Ok(())
    }

    /// Rewrites every occurrence of `old_value` to `new_value` in place,
    /// then merges any now-equal neighboring runs. Positions and the total
    /// length are unchanged.
    pub fn replace_values(&mut self, old_value: T, new_value: T) {
        for run in &mut self.runs {
            if run.value == old_value {
                run.value = new_value.clone();
            }
        }

        self.compact();
    }

    /// One-pass merge of adjacent equal-valued runs.
    fn compact(&mut self) {
        if self.runs.len() < 2 {
            return;
        }

        let mut write = 0;
        for read in 1..self.runs.len() {
            if self.runs[write].value == self.runs[read].value {
                let extra = self.runs[read].length;
                self.runs[write].length += extra;
            } else {
                write += 1;
                self.runs.swap(write, read);
            }
        }

        self.runs.truncate(write + 1);
    }

    fn splice(&mut self, start: S, end_index: S, new_runs: &[Run<T, S>]) {
        // Degenerate replacement spans (zero-length runs, adjacent equal
        // values) are normalized first so the canonical postcondition holds
        // for any caller input.
        let degenerate = new_runs.iter().any(|run| run.length == S::zero())
            || new_runs.windows(2).any(|pair| pair[0].value == pair[1].value);

        if degenerate {
            let mut normalized: SmallVec<[Run<T, S>; INLINE]> = SmallVec::new();
            for run in new_runs {
                if run.length == S::zero() {
                    continue;
                }
                if let Some(last) = normalized.last_mut() {
                    if last.value == run.value {
                        last.length += run.length;
                        continue;
                    }
                }
                normalized.push(run.clone());
            }
            self.splice_canonical(start, end_index, &normalized);
        } else {
            self.splice_canonical(start, end_index, new_runs);
        }
    }

    /// The central range-replacement algorithm. `new_runs` must be canonical
    /// (no zero lengths, no adjacent equal values); `start <= end_index` and
    /// `end_index <= total_length` have been checked by the caller.
    fn splice_canonical(&mut self, start: S, end_index: S, new_runs: &[Run<T, S>]) {
        let mut scanner = Scanner::new(&self.runs);
        let (mut begin, mut begin_pos) = scanner.scan(start);
        let (mut end, mut end_pos) = scanner.scan(end_index);

        let (first_new, last_new) = match (new_runs.first(), new_runs.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                // Pure deletion.
                let removed = end_index - start;

                // A deletion strictly inside the sequence can bring an equal-
                // valued predecessor and successor together; merge them by
                // letting the surviving end run absorb the predecessor.
                if start != S::zero() && end_index != self.total_length {
                    let previous = if begin_pos > S::zero() { begin } else { begin - 1 };
                    if self.runs[previous].value == self.runs[end].value {
                        let absorbed = if begin_pos > S::zero() {
                            begin_pos
                        } else {
                            self.runs[previous].length
                        };
                        self.runs[end].length = self.runs[end].length - end_pos + absorbed;
                        begin_pos = S::zero();
                        end_pos = S::zero();
                        begin = previous;
                    }
                }

                if begin_pos > S::zero() {
                    self.runs[begin].length = begin_pos;
                    begin += 1;
                }
                if end_pos > S::zero() {
                    self.runs[end].length -= end_pos;
                }

                self.runs.drain(begin..end);
                self.total_length -= removed;
                return;
            }
        };

        // Two complications can occur during the splice:
        // 1. The first/last new run has the same value as the run preceding/
        //    succeeding the replaced range -> the new runs must be joined
        //    with those neighbors.
        // 2. The range boundaries fall inside existing runs -> those runs
        //    must be split.

        // Neighbor joins are recorded now and applied after the store has
        // reached its final shape.
        let mut begin_additional_length = S::zero();
        let mut end_additional_length = S::zero();

        if start != S::zero() {
            let previous = if begin_pos > S::zero() { begin } else { begin - 1 };
            if self.runs[previous].value == first_new.value {
                begin_additional_length = if begin_pos > S::zero() {
                    begin_pos
                } else {
                    self.runs[previous].length
                };
                begin_pos = S::zero();
                begin = previous;
            }
        }
        if end_index != self.total_length && self.runs[end].value == last_new.value {
            // `end` already points one run past the replaced range's last
            // full run, so no predecessor step is needed on this side.
            end_additional_length = self.runs[end].length - end_pos;
            end_pos = S::zero();
            end += 1;
        }

        // An insertion that starts and ends inside one existing run splits
        // it in three; the right-hand remainder is appended after the new
        // runs.
        let mut mid_insertion_trailer: Option<Run<T, S>> = None;
        if begin == end && begin_pos > S::zero() {
            mid_insertion_trailer = Some(Run::new(
                self.runs[begin].value.clone(),
                self.runs[begin].length - end_pos,
            ));
            end_pos = S::zero();
        }

        // Split bookkeeping: trim the boundary runs that survive.
        if begin_pos > S::zero() {
            self.runs[begin].length = begin_pos;
            begin += 1;
        }
        if end_pos > S::zero() {
            self.runs[end].length -= end_pos;
        }

        // `begin` can point past `end` after the splits above.
        let available = end.saturating_sub(begin);
        let required = new_runs.len() + usize::from(mid_insertion_trailer.is_some());
        let begin_index = begin;

        // Overwrite as many existing slots as fit, then either erase the
        // leftover slots or insert space for the remainder.
        let direct = available.min(new_runs.len());
        for (slot, new_run) in self.runs[begin..begin + direct].iter_mut().zip(new_runs) {
            *slot = new_run.clone();
        }

        if available >= required {
            self.runs.drain(begin + direct..end);
        } else {
            let rest = new_runs[direct..].iter().cloned().chain(mid_insertion_trailer);
            self.runs.insert_many(begin + direct, rest);
        }

        // Apply the recorded neighbor joins; the store is stable now, so the
        // joined runs are found by index arithmetic.
        if begin_additional_length > S::zero() {
            self.runs[begin_index].length += begin_additional_length;
        }
        if end_additional_length > S::zero() {
            self.runs[begin_index + required - 1].length += end_additional_length;
        }

        let added = new_runs
            .iter()
            .fold(S::zero(), |sum, run| sum + run.length);
        self.total_length = self.total_length - (end_index - start) + added;
    }
}

impl<T: Eq + Clone, S: RunLength, const INLINE: usize> FromIterator<Run<T, S>>
    for RleVec<T, S, INLINE>
{
    fn from_iter<I: IntoIterator<Item = Run<T, S>>>(iter: I) -> Self {
        Self::from_runs(iter)
    }
}

impl<'a, T, S: RunLength, const INLINE: usize> IntoIterator for &'a RleVec<T, S, INLINE> {
    type Item = &'a T;
    type IntoIter = RleIter<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Debug form: elements within a run separated by spaces, runs separated by
/// `|`, e.g. `1 1 1|2 2|1`.
impl<T: fmt::Display, S: RunLength, const INLINE: usize> fmt::Display for RleVec<T, S, INLINE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, run) in self.runs.iter().enumerate() {
            if i != 0 {
                f.write_str("|")?;
            }
            for j in 0..to_index(run.length) {
                if j != 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", run.value)?;
            }
        }
        Ok(())
    }
}
