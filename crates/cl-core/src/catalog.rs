//! # Fixed catalogs
//!
//! The daily time-slot table and the two laundry units every floor has.
//! Both are compile-time constants; nothing here is ever mutated.

/// One of the four bookable daily intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    /// Stable key stored in the availability index (e.g. "07-11")
    pub id: &'static str,
    /// Human label shown on the slot widget and in the personal list
    pub label: &'static str,
    start_hour: u32,
}

impl TimeSlot {
    const fn new(id: &'static str, label: &'static str, start_hour: u32) -> Self {
        Self { id, label, start_hour }
    }

    /// Hour of day the slot starts; used to order bookings within a date.
    pub const fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn by_id(id: &str) -> Option<&'static TimeSlot> {
        TIME_SLOTS.iter().find(|slot| slot.id == id)
    }

    pub fn by_label(label: &str) -> Option<&'static TimeSlot> {
        TIME_SLOTS.iter().find(|slot| slot.label == label)
    }
}

pub const TIME_SLOTS: [TimeSlot; 4] = [
    TimeSlot::new("07-11", "07:00 - 11:00", 7),
    TimeSlot::new("11-15", "11:00 - 15:00", 11),
    TimeSlot::new("15-19", "15:00 - 19:00", 15),
    TimeSlot::new("19-23", "19:00 - 23:00", 19),
];

/// The resident's two floor-scoped laundry rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LaundryUnit {
    One,
    Two,
}

impl LaundryUnit {
    pub const ALL: [LaundryUnit; 2] = [LaundryUnit::One, LaundryUnit::Two];

    pub fn id(self) -> &'static str {
        match self {
            LaundryUnit::One => "1",
            LaundryUnit::Two => "2",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LaundryUnit::One => "Lavanderia 1",
            LaundryUnit::Two => "Lavanderia 2",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "1" => Some(LaundryUnit::One),
            "2" => Some(LaundryUnit::Two),
            _ => None,
        }
    }

    /// Resolves a unit from the display name kept on a personal booking.
    ///
    /// Any label containing a '1' maps to unit 1, everything else to unit 2.
    /// This only holds for the two hardcoded names above.
    pub fn from_label(label: &str) -> Self {
        if label.contains('1') {
            LaundryUnit::One
        } else {
            LaundryUnit::Two
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_ordered_by_start_hour() {
        let hours: Vec<u32> = TIME_SLOTS.iter().map(TimeSlot::start_hour).collect();
        assert_eq!(hours, vec![7, 11, 15, 19]);
    }

    #[test]
    fn lookup_by_id_and_label_agree() {
        for slot in &TIME_SLOTS {
            assert_eq!(TimeSlot::by_id(slot.id), Some(slot));
            assert_eq!(TimeSlot::by_label(slot.label), Some(slot));
        }
        assert!(TimeSlot::by_id("23-07").is_none());
        assert!(TimeSlot::by_label("07:00-11:00").is_none());
    }

    #[test]
    fn unit_label_heuristic() {
        assert_eq!(LaundryUnit::from_label("Lavanderia 1"), LaundryUnit::One);
        assert_eq!(LaundryUnit::from_label("Lavanderia 2"), LaundryUnit::Two);
        // Known fragility: anything without a '1' falls through to unit 2.
        assert_eq!(LaundryUnit::from_label("Lavanderia"), LaundryUnit::Two);
        for unit in LaundryUnit::ALL {
            assert_eq!(LaundryUnit::from_label(unit.name()), unit);
            assert_eq!(LaundryUnit::from_id(unit.id()), Some(unit));
        }
    }
}
