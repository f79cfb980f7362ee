//! Handles the delivery of formatted notifications to the destination chat.
//!
//! This module defines the client trait and implementation for the outbound
//! messaging API. The dispatcher only ever sees the trait, so tests can swap
//! in a recording fake without any network involvement.
pub mod telegram;
