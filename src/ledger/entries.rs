//! Entry store
//!
//! Single entries are indexed by date, each date holding its entries in
//! insertion order. Repeating and installment entries are indexed by their
//! description, which must be unique within each kind.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Entry, InstallmentEntry, Money, RepeatingEntry, SingleEntry, YearMonth};

/// Dated single entries
#[derive(Debug, Clone, Default)]
pub struct SingleEntries {
    by_date: BTreeMap<NaiveDate, Vec<SingleEntry>>,
}

impl SingleEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the entry's date; no sorting or dedupe
    pub fn add(&mut self, entry: SingleEntry) {
        self.by_date.entry(entry.date).or_default().push(entry);
    }

    /// Remove the entry at `index` on `date`
    pub fn delete_at(&mut self, date: NaiveDate, index: usize) -> LedgerResult<SingleEntry> {
        let list = self
            .by_date
            .get_mut(&date)
            .filter(|list| index < list.len())
            .ok_or_else(|| LedgerError::entry_not_found(format!("{} #{}", date, index)))?;

        let removed = list.remove(index);
        if list.is_empty() {
            self.by_date.remove(&date);
        }
        Ok(removed)
    }

    /// Remove the first entry equal to `entry` under its date
    pub fn delete(&mut self, entry: &SingleEntry) -> LedgerResult<SingleEntry> {
        let index = self
            .position(entry)
            .ok_or_else(|| LedgerError::entry_not_found(entry.description()))?;
        self.delete_at(entry.date, index)
    }

    /// Replace the entry at (`old_date`, `old_index`)
    ///
    /// Same-date edits keep the entry's position; an edit that moves the
    /// entry to another date appends it there. Returns the replaced entry.
    pub fn update(
        &mut self,
        old_date: NaiveDate,
        old_index: usize,
        new_entry: SingleEntry,
    ) -> LedgerResult<SingleEntry> {
        if new_entry.date == old_date {
            let slot = self
                .by_date
                .get_mut(&old_date)
                .and_then(|list| list.get_mut(old_index))
                .ok_or_else(|| {
                    LedgerError::entry_not_found(format!("{} #{}", old_date, old_index))
                })?;
            return Ok(std::mem::replace(slot, new_entry));
        }

        let old = self.delete_at(old_date, old_index)?;
        self.add(new_entry);
        Ok(old)
    }

    pub fn get(&self, date: NaiveDate, index: usize) -> Option<&SingleEntry> {
        self.by_date.get(&date).and_then(|list| list.get(index))
    }

    pub fn contains(&self, entry: &SingleEntry) -> bool {
        self.position(entry).is_some()
    }

    fn position(&self, entry: &SingleEntry) -> Option<usize> {
        self.by_date
            .get(&entry.date)
            .and_then(|list| list.iter().position(|e| e == entry))
    }

    pub fn list_for_date(&self, date: NaiveDate) -> &[SingleEntry] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All entries, date ascending
    pub fn list_all(&self) -> impl Iterator<Item = &SingleEntry> {
        self.by_date.values().flatten()
    }

    /// Entries dated within an inclusive range
    pub fn list_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&SingleEntry> {
        if start > end {
            return Vec::new();
        }
        self.by_date.range(start..=end).flat_map(|(_, l)| l).collect()
    }

    pub fn list_for_month(&self, month: YearMonth) -> Vec<&SingleEntry> {
        self.list_range(month.first_day(), month.last_day())
    }

    pub fn count_for_date(&self, date: NaiveDate) -> usize {
        self.by_date.get(&date).map_or(0, Vec::len)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    /// Sum of an account's entries over an inclusive date range
    pub fn total_for_account(&self, account: &str, start: NaiveDate, end: NaiveDate) -> Money {
        self.list_range(start, end)
            .into_iter()
            .filter(|e| e.account() == account)
            .map(SingleEntry::amount)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// An entry stored under its description
pub trait KeyedEntry: Clone {
    fn key(&self) -> &str;

    /// Whether the entry contributes anything to `month`
    fn active_in(&self, month: YearMonth) -> bool;
}

impl KeyedEntry for RepeatingEntry {
    fn key(&self) -> &str {
        self.description()
    }

    fn active_in(&self, month: YearMonth) -> bool {
        self.covers(month)
    }
}

impl KeyedEntry for InstallmentEntry {
    fn key(&self) -> &str {
        self.description()
    }

    fn active_in(&self, month: YearMonth) -> bool {
        self.payment_for(month).is_some()
    }
}

/// Entries keyed by description, iterated in description order
#[derive(Debug, Clone)]
pub struct KeyedEntries<T> {
    by_description: BTreeMap<String, T>,
}

impl<T> Default for KeyedEntries<T> {
    fn default() -> Self {
        Self {
            by_description: BTreeMap::new(),
        }
    }
}

impl<T: KeyedEntry> KeyedEntries<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; a second entry with the same description is rejected
    pub fn add(&mut self, entry: T) -> LedgerResult<()> {
        if self.by_description.contains_key(entry.key()) {
            return Err(LedgerError::DuplicateEntry(entry.key().to_string()));
        }
        self.by_description.insert(entry.key().to_string(), entry);
        Ok(())
    }

    pub fn delete(&mut self, description: &str) -> LedgerResult<T> {
        self.by_description
            .remove(description)
            .ok_or_else(|| LedgerError::entry_not_found(description))
    }

    pub fn get(&self, description: &str) -> Option<&T> {
        self.by_description.get(description)
    }

    /// Entries active in `month`, or every entry when `None`
    pub fn list_for_month(&self, month: Option<YearMonth>) -> Vec<&T> {
        self.by_description
            .values()
            .filter(|e| month.map_or(true, |m| e.active_in(m)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.by_description.values()
    }

    pub fn len(&self) -> usize {
        self.by_description.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_description.is_empty()
    }
}

/// All recorded entries
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    pub single: SingleEntries,
    pub repeating: KeyedEntries<RepeatingEntry>,
    pub installments: KeyedEntries<InstallmentEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every entry contributing to `month`
    pub fn entries_for_month(&self, month: YearMonth) -> Vec<Entry> {
        let singles = self
            .single
            .list_for_month(month)
            .into_iter()
            .cloned()
            .map(Entry::from);
        let repeating = self
            .repeating
            .list_for_month(Some(month))
            .into_iter()
            .cloned()
            .map(Entry::from);
        let installments = self
            .installments
            .list_for_month(Some(month))
            .into_iter()
            .cloned()
            .map(Entry::from);

        singles.chain(repeating).chain(installments).collect()
    }
}
