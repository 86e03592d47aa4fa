pub mod email;
pub mod flight_data;
pub mod indoor_map;
pub mod notify;
pub mod payment;
pub mod user_communication;
