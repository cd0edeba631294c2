//! Ward rooms

use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;
use super::ValidationError;

/// Smallest daily rate a room may be billed at.
pub const MIN_DAILY_RATE: f64 = 1.0;

labelled_enum! {
    /// Kind of room; determines capacity.
    pub enum RoomType as "room type" {
        Single => "Single",
        Double => "Double",
        Icu => "ICU",
    }
}

impl RoomType {
    /// Beds in a room of this type: Double holds two, everything else one.
    pub fn capacity(self) -> u32 {
        match self {
            RoomType::Double => 2,
            RoomType::Single | RoomType::Icu => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    room_number: i64,
    room_type: RoomType,
    daily_rate: f64,
    capacity: u32,
    is_occupied: bool,
}

impl Room {
    pub fn new(room_number: i64, room_type: RoomType, daily_rate: f64) -> Result<Self, ValidationError> {
        validate_room_number(room_number)?;
        validate_daily_rate(daily_rate)?;

        Ok(Self {
            room_number,
            room_type,
            daily_rate,
            capacity: room_type.capacity(),
            is_occupied: false,
        })
    }

    /// Rebuild a room from a stored row.
    pub(crate) fn from_parts(
        room_number: i64,
        room_type: RoomType,
        daily_rate: f64,
        is_occupied: bool,
    ) -> Self {
        Self {
            room_number,
            room_type,
            daily_rate,
            capacity: room_type.capacity(),
            is_occupied,
        }
    }

    pub fn room_number(&self) -> i64 {
        self.room_number
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn daily_rate(&self) -> f64 {
        self.daily_rate
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_occupied(&self) -> bool {
        self.is_occupied
    }

    /// Changing the type re-derives the capacity.
    pub fn set_room_type(&mut self, room_type: RoomType) {
        self.room_type = room_type;
        self.capacity = room_type.capacity();
    }

    pub fn set_daily_rate(&mut self, daily_rate: f64) -> Result<(), ValidationError> {
        validate_daily_rate(daily_rate)?;
        self.daily_rate = daily_rate;
        Ok(())
    }

    pub fn set_occupied(&mut self, occupied: bool) {
        self.is_occupied = occupied;
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Room: {} | Type: {} | Occupied: {}",
            self.room_number, self.room_type, self.is_occupied
        )
    }
}

fn validate_room_number(room_number: i64) -> Result<(), ValidationError> {
    if room_number < 1 {
        return Err(ValidationError::OutOfRange {
            field: "room number",
            min: 1,
            max: i64::MAX,
            value: room_number,
        });
    }
    Ok(())
}

fn validate_daily_rate(daily_rate: f64) -> Result<(), ValidationError> {
    if !daily_rate.is_finite() || daily_rate < MIN_DAILY_RATE {
        return Err(ValidationError::BelowMinimum {
            field: "daily rate",
            min: MIN_DAILY_RATE,
            value: daily_rate,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_follows_type() {
        assert_eq!(Room::new(1, RoomType::Single, 50.0).unwrap().capacity(), 1);
        assert_eq!(Room::new(2, RoomType::Double, 80.0).unwrap().capacity(), 2);
        assert_eq!(Room::new(3, RoomType::Icu, 400.0).unwrap().capacity(), 1);

        let mut room = Room::new(4, RoomType::Single, 50.0).unwrap();
        room.set_room_type(RoomType::Double);
        assert_eq!(room.capacity(), 2);
    }

    #[test]
    fn rejects_cheap_rooms() {
        let err = Room::new(101, RoomType::Single, 0.99).unwrap_err();
        assert!(matches!(err, ValidationError::BelowMinimum { .. }));
        assert!(Room::new(101, RoomType::Single, f64::NAN).is_err());

        let mut room = Room::new(101, RoomType::Single, 1.0).unwrap();
        assert!(room.set_daily_rate(-5.0).is_err());
        assert_eq!(room.daily_rate(), 1.0);
    }

    #[test]
    fn rejects_non_positive_numbers() {
        assert!(Room::new(0, RoomType::Single, 50.0).is_err());
        assert!(Room::new(-3, RoomType::Single, 50.0).is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(RoomType::Icu.as_str(), "ICU");
        assert_eq!("icu".parse::<RoomType>().unwrap(), RoomType::Icu);
        assert!("suite".parse::<RoomType>().is_err());
        assert_eq!(RoomType::all().count(), 3);
    }

    #[test]
    fn display_line() {
        let room = Room::new(19, RoomType::Single, 50.0).unwrap();
        assert_eq!(room.to_string(), "Room: 19 | Type: Single | Occupied: false");
    }
}
