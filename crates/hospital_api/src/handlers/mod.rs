//! HTTP request handlers.
//!
//! Every entity handler follows the same flow: parse input, build the
//! repository on a pooled connection, run the service call, and shape the
//! result into a response struct.

pub mod department;
pub mod doctor;
pub mod health;
pub mod hospital;
