#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # rassid-entities
//!
//! Reusable, agnostic domain entities for the Rassid airport-operations
//! platform.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod airport;
pub mod contact;
pub mod email;
pub mod flight;
pub mod gate;
pub mod id;
pub mod notification;
pub mod passenger;
pub mod password;
pub mod payment;
pub mod request;
pub mod subscription;
pub mod ticket;
pub mod time;
pub mod user;
