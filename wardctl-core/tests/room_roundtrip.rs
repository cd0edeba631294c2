use proptest::prelude::*;
use tempfile::TempDir;
use wardctl_core::db::schema;
use wardctl_core::models::{Room, RoomType};
use wardctl_core::{Database, RoomController};

fn arb_room_type() -> impl Strategy<Value = RoomType> {
    prop_oneof![Just(RoomType::Single), Just(RoomType::Double), Just(RoomType::Icu)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: a stored room reads back with the same number, type, rate
    /// and type-derived capacity
    #[test]
    fn prop_room_round_trip(
        number in 1i64..100_000,
        room_type in arb_room_type(),
        rate in 1.0f64..10_000.0,
    ) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("rooms.db"));
        schema::initialize(&db);
        let rooms = RoomController::new(&db);

        let room = Room::new(number, room_type, rate).unwrap();
        prop_assert!(rooms.add_room(&room));

        let stored = rooms.get_room(number).unwrap();
        prop_assert_eq!(stored.room_number(), number);
        prop_assert_eq!(stored.room_type(), room_type);
        prop_assert_eq!(stored.daily_rate(), rate);
        prop_assert_eq!(stored.capacity(), if room_type == RoomType::Double { 2 } else { 1 });
        prop_assert!(!stored.is_occupied());
    }

    /// Property: rates below the minimum never construct a room
    #[test]
    fn prop_low_rate_rejected(rate in -1_000.0f64..1.0, room_type in arb_room_type()) {
        prop_assert!(Room::new(1, room_type, rate).is_err());
    }
}
