//! # Client-side booking store
//!
//! Holds the simulated booking registry for the resident page. The
//! availability index is a denormalized view over the personal booking list
//! and both are only ever mutated together, through `BookingStore`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{LaundryUnit, TimeSlot};
use crate::error::{AppError, Result};
use crate::models::BookingRecord;

/// date → laundry id → booked slot ids.
///
/// Serializes as `{"2025-05-20":{"1":["07-11"]}}`. Empty slot sets and empty
/// dates are pruned so the map never holds husks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityIndex(BTreeMap<NaiveDate, BTreeMap<String, BTreeSet<String>>>);

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a slot booked. Returns false if it already was.
    pub fn insert(&mut self, date: NaiveDate, laundry_id: &str, slot_id: &str) -> bool {
        self.0
            .entry(date)
            .or_default()
            .entry(laundry_id.to_string())
            .or_default()
            .insert(slot_id.to_string())
    }

    /// Frees a slot. Returns false if it was not booked.
    pub fn remove(&mut self, date: NaiveDate, laundry_id: &str, slot_id: &str) -> bool {
        let Some(by_laundry) = self.0.get_mut(&date) else {
            return false;
        };
        let Some(slots) = by_laundry.get_mut(laundry_id) else {
            return false;
        };
        let removed = slots.remove(slot_id);
        if slots.is_empty() {
            by_laundry.remove(laundry_id);
        }
        if by_laundry.is_empty() {
            self.0.remove(&date);
        }
        removed
    }

    pub fn is_booked(&self, date: NaiveDate, laundry_id: &str, slot_id: &str) -> bool {
        self.booked(date, laundry_id)
            .is_some_and(|slots| slots.contains(slot_id))
    }

    pub fn booked(&self, date: NaiveDate, laundry_id: &str) -> Option<&BTreeSet<String>> {
        self.0.get(&date).and_then(|by_laundry| by_laundry.get(laundry_id))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Explicit store passed to the resident page controller.
#[derive(Debug, Clone, Default)]
pub struct BookingStore {
    index: AvailabilityIndex,
    mine: Vec<BookingRecord>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &AvailabilityIndex {
        &self.index
    }

    /// Personal bookings, ascending by (date, slot start).
    pub fn my_bookings(&self) -> &[BookingRecord] {
        &self.mine
    }

    pub fn find(&self, id: Uuid) -> Option<&BookingRecord> {
        self.mine.iter().find(|booking| booking.id == id)
    }

    pub fn is_booked(&self, date: NaiveDate, unit: LaundryUnit, slot: &TimeSlot) -> bool {
        self.index.is_booked(date, unit.id(), slot.id)
    }

    /// Books a slot and records it in the personal list.
    pub fn create(
        &mut self,
        date: NaiveDate,
        unit: LaundryUnit,
        slot: &TimeSlot,
    ) -> Result<BookingRecord> {
        if !self.index.insert(date, unit.id(), slot.id) {
            return Err(AppError::Conflict(format!(
                "{} {} on {date} is already booked",
                unit.name(),
                slot.label
            )));
        }

        let record = BookingRecord {
            id: Uuid::now_v7(),
            date,
            time: slot.label.to_string(),
            laundry: unit.name().to_string(),
        };
        self.mine.push(record.clone());
        self.sort();
        Ok(record)
    }

    /// Cancels a personal booking by id and frees its slot.
    ///
    /// The laundry is recovered from the record's display name, see
    /// [`LaundryUnit::from_label`].
    pub fn cancel(&mut self, id: Uuid) -> Result<BookingRecord> {
        let position = self
            .mine
            .iter()
            .position(|booking| booking.id == id)
            .ok_or_else(|| AppError::NotFound("Booking".into(), id.to_string()))?;

        let record = self.mine.remove(position);
        let unit = LaundryUnit::from_label(&record.laundry);
        if let Some(slot) = record.slot() {
            self.index.remove(record.date, unit.id(), slot.id);
        }
        self.sort();
        Ok(record)
    }

    fn sort(&mut self) {
        self.mine.sort_by_key(BookingRecord::sort_key);
    }
}
