pub mod db;

pub mod migrations;

pub mod cycles;

pub mod events;

pub mod shift_types;

pub mod store;
