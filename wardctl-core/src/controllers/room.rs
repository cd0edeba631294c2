//! Room rows

use rusqlite::{params, Row};
use tracing::{info, warn};

use super::first;
use crate::db::Database;
use crate::models::Room;

pub(crate) const ROOM_COLUMNS: &str = "room_number, room_type, daily_rate, is_occupied";

pub(crate) fn room_from_row(row: &Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room::from_parts(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

pub struct RoomController<'a> {
    db: &'a Database,
}

impl<'a> RoomController<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert the room, or overwrite type, rate, capacity and occupancy of an
    /// existing row with the same number.
    pub fn add_room(&self, room: &Room) -> bool {
        let sql = "INSERT INTO rooms (room_number, room_type, daily_rate, capacity, is_occupied)
                   VALUES (?1, ?2, ?3, ?4, ?5)
                   ON CONFLICT(room_number) DO UPDATE SET
                       room_type = excluded.room_type,
                       daily_rate = excluded.daily_rate,
                       capacity = excluded.capacity,
                       is_occupied = excluded.is_occupied";
        let saved = self
            .db
            .execute(
                sql,
                params![
                    room.room_number(),
                    room.room_type(),
                    room.daily_rate(),
                    room.capacity(),
                    room.is_occupied()
                ],
            )
            .is_some();

        if saved {
            info!(room = room.room_number(), room_type = %room.room_type(), "room saved");
        }
        saved
    }

    pub fn get_room(&self, room_number: i64) -> Option<Room> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE room_number = ?1");
        let room = first(self.db.query_map(&sql, params![room_number], room_from_row));
        if room.is_none() {
            warn!(room = room_number, "room not found");
        }
        room
    }

    pub fn list_rooms(&self) -> Option<Vec<Room>> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms ORDER BY room_number");
        self.db.query_map(&sql, params![], room_from_row)
    }

    /// Number of inpatients currently admitted to the room.
    pub fn admitted_count(&self, room_number: i64) -> Option<i64> {
        super::lookup_i64(
            self.db,
            "SELECT COUNT(*) FROM inpatients WHERE room_number = ?1 AND admission_status = 'Admitted'",
            params![room_number],
        )
    }

    pub fn update_room_occupancy(&self, room_number: i64, occupied: bool) -> bool {
        match self.db.execute(
            "UPDATE rooms SET is_occupied = ?1 WHERE room_number = ?2",
            params![occupied, room_number],
        ) {
            Some(0) => {
                warn!(room = room_number, "room not found");
                false
            }
            Some(_) => {
                info!(room = room_number, occupied, "room occupancy updated");
                true
            }
            None => false,
        }
    }

    /// Delete the room. Fails while an inpatient row still points at it.
    pub fn remove_room(&self, room_number: i64) -> bool {
        match self
            .db
            .execute("DELETE FROM rooms WHERE room_number = ?1", params![room_number])
        {
            Some(0) => {
                warn!(room = room_number, "room not found");
                false
            }
            Some(_) => {
                info!(room = room_number, "room removed");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use crate::models::RoomType;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("hospital.db"));
        schema::initialize(&db);
        (dir, db)
    }

    #[test]
    fn add_room_upserts() {
        let (_dir, db) = setup();
        let rooms = RoomController::new(&db);

        assert!(rooms.add_room(&Room::new(12, RoomType::Single, 40.0).unwrap()));
        assert!(rooms.add_room(&Room::new(12, RoomType::Double, 65.0).unwrap()));

        let stored = rooms.get_room(12).unwrap();
        assert_eq!(stored.room_type(), RoomType::Double);
        assert_eq!(stored.capacity(), 2);
        assert_eq!(stored.daily_rate(), 65.0);
        assert_eq!(rooms.list_rooms().unwrap().len(), 1);
    }

    #[test]
    fn occupancy_and_removal_need_a_row() {
        let (_dir, db) = setup();
        let rooms = RoomController::new(&db);

        assert!(!rooms.update_room_occupancy(5, true));
        assert!(!rooms.remove_room(5));
        assert!(rooms.get_room(5).is_none());

        rooms.add_room(&Room::new(5, RoomType::Icu, 300.0).unwrap());
        assert!(rooms.update_room_occupancy(5, true));
        assert!(rooms.get_room(5).unwrap().is_occupied());
        assert_eq!(rooms.admitted_count(5), Some(0));
        assert!(rooms.remove_room(5));
    }
}
