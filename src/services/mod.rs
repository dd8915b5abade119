// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod account;
pub mod password;

pub use account::AccountService;
