//! Room command - add, inspect and free ward rooms

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use wardctl_core::models::{Room, RoomType};
use wardctl_core::{Database, RoomController};

use crate::ui;

#[derive(Parser, Debug)]
#[command(about = "Manage ward rooms")]
pub struct RoomArgs {
    #[command(subcommand)]
    pub command: RoomCommands,
}

#[derive(Subcommand, Debug)]
pub enum RoomCommands {
    /// Add a room, or update it if the number is taken
    Add {
        /// Room number (1 or higher)
        number: i64,
        /// Single, Double or ICU
        #[arg(long = "type", default_value = "Single")]
        room_type: RoomType,
        /// Daily rate (at least 1)
        #[arg(long)]
        rate: f64,
    },
    /// Show one room
    Show {
        number: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all rooms
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a room occupied or free
    Occupancy {
        number: i64,
        #[arg(value_enum)]
        state: OccupancyState,
    },
    /// Delete a room (refused while an inpatient is assigned to it)
    Remove { number: i64 },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OccupancyState {
    Occupied,
    Free,
}

pub fn run_room(args: RoomArgs, db: &Database) -> Result<()> {
    let rooms = RoomController::new(db);

    match args.command {
        RoomCommands::Add {
            number,
            room_type,
            rate,
        } => {
            let room = Room::new(number, room_type, rate)?;
            ui::outcome(
                rooms.add_room(&room),
                format!("Saved room {number} ({room_type}, capacity {})", room.capacity()),
                format!("save room {number}"),
            )
        }
        RoomCommands::Show { number, json } => {
            let room = rooms
                .get_room(number)
                .with_context(|| format!("Room {number} not found"))?;
            if json {
                ui::print_json(&room)
            } else {
                println!("{room}");
                println!("Capacity: {} | Daily rate: {:.2}", room.capacity(), room.daily_rate());
                Ok(())
            }
        }
        RoomCommands::List { json } => {
            let all = rooms.list_rooms().context("Failed to read rooms")?;
            if json {
                return ui::print_json(&all);
            }
            if all.is_empty() {
                println!("No rooms.");
            }
            for room in &all {
                println!("{room}");
            }
            Ok(())
        }
        RoomCommands::Occupancy { number, state } => {
            let occupied = matches!(state, OccupancyState::Occupied);
            ui::outcome(
                rooms.update_room_occupancy(number, occupied),
                format!("Room {number} marked {}", if occupied { "occupied" } else { "free" }),
                format!("update room {number}"),
            )
        }
        RoomCommands::Remove { number } => ui::outcome(
            rooms.remove_room(number),
            format!("Removed room {number}"),
            format!("remove room {number}"),
        ),
    }
}
